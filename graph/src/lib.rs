//! Kin Graph Storage
//!
//! This crate provides an in-memory genealogy tree with indexed access:
//! - Person and family storage
//! - Parent index: find the family a person was born into
//! - Spouse index: find the families a person heads
//! - Label index: find records carrying a branch label
//!
//! `Genealogy` implements both `GraphAccessor` and `MutationStore`, so a
//! branch operation can run end to end without a database.

mod graph;
mod index;

pub use graph::*;
