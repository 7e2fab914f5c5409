//! Shared test fixtures for SbcForge crates.
//!
//! This crate provides rosters and pure helper functions for testing.
//! It depends on `sbcforge-core` only, so any crate can take it as a
//! dev-dependency.
//!
//! - [`roster`] - Hand-built rosters with known optimal squads
//! - [`subsets`] - Exhaustive subset enumeration for brute-force checks
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! sbcforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```
//! use sbcforge_test::roster::worked_scenario;
//! use sbcforge_test::subsets::combinations;
//!
//! let roster = worked_scenario();
//! assert_eq!(combinations(roster.len(), 11).count(), 364);
//! ```

pub mod roster;
pub mod subsets;

pub use roster::{card, mixed_clubs, single_club, worked_scenario, WORKED_SCENARIO_FORMATION};
pub use subsets::{combinations, fills_formation};
