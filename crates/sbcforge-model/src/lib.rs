//! SbcForge Model - constraint model compiler and chemistry engine
//!
//! Turns a roster and a rule configuration into a solver-agnostic
//! optimization model:
//! - [`model`]: variables, linear and reified constraints, objective
//! - [`variables`]: fixed-order decision variables per candidate and group
//! - [`rules`]: one compiler per business rule
//! - [`chemistry`]: step-function group tiers, per-candidate chemistry and
//!   a standalone evaluator
//! - [`objective`]: cost objectives and the cost ceiling

pub mod chemistry;
pub mod compiler;
pub mod model;
pub mod objective;
pub mod rating;
pub mod rules;
pub mod variables;

#[cfg(test)]
mod rating_tests;
#[cfg(test)]
mod test_support;

pub use chemistry::{bucket_tier, evaluate_chemistry, ChemistryReport, StepFunction};
pub use compiler::{compile, CompileReport, CompiledModel};
pub use model::{
    Constraint, LinearExpr, Literal, Model, ModelStats, Objective, Sense, VarDef, VarId, VarKind,
};
pub use objective::objective_mode;
pub use rules::RuleContext;
pub use variables::Variables;
