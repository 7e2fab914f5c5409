//! SbcForge Core - Roster types and indexing for squad building
//!
//! This crate provides the fundamental abstractions for SbcForge:
//! - Candidate and roster types handed over by the ingestion layer
//! - Formation templates and role-label counts
//! - Group kinds used by the chemistry rules
//! - The roster indexer used for constant-time constraint assembly

pub mod domain;
pub mod error;
pub mod index;


pub use domain::{Candidate, Formation, GroupKind, Roster};
pub use error::{Result, SbcError};
pub use index::{Attribute, AttributeIndex, RosterIndex};
