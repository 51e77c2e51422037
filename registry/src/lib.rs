//! Kin Registry
//!
//! Saved branch definitions that can be re-applied by id.

mod builder;
mod registry;
mod types;

pub use builder::{BranchDefBuilder, RegistryError, RegistryResult};
pub use registry::BranchRegistry;
pub use types::BranchDef;
