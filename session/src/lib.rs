//! Kin Session
//!
//! Branch labeling sessions: compute a branch, plan a label change, apply it.

mod config;
mod error;
mod result;
mod session;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use result::{BranchPreview, BranchReport};
pub use session::{BranchSession, LabelRequest};
