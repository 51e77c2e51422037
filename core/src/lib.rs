//! Kin Core Types
//!
//! This crate provides the foundational types used throughout the branch subsystem:
//! - Identity types (TreeId, PersonId, FamilyId, BranchId, RecordId)
//! - Record structures (Person, Family)
//! - Branch label lists
//! - Collaborator contracts (GraphAccessor, MutationStore)
//! - Common error types

mod accessor;
mod entity;
mod error;
mod id;
mod label;
mod store;

pub use accessor::*;
pub use entity::*;
pub use error::*;
pub use id::*;
pub use label::*;
pub use store::*;
