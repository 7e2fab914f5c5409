//! SbcForge - squad building challenges as optimization models
//!
//! Compile a roster and a rule configuration into a solver-agnostic model,
//! solve it and read the squad back.
//!
//! # Example
//!
//! ```rust
//! use sbcforge::prelude::*;
//!
//! let roster: Roster = [("Keeper", "GK", 300), ("Back", "CB", 200), ("Other Back", "CB", 150)]
//!     .iter()
//!     .map(|(name, role, cost)| Candidate::new(*name, "Club", "League", "Nation", *role, 80, *cost))
//!     .collect();
//! let rules = RuleConfig::new()
//!     .with_custom_formation(["GK", "CB"])
//!     .with_squad_size(2);
//!
//! let outcome = run_solver(&roster, &rules, &SolveSettings::default());
//! let squad = outcome.assignment.unwrap();
//! assert_eq!(squad.total_cost, 450);
//! ```

// Domain types
pub use sbcforge_core::{
    Candidate, Formation, GroupKind, Result, Roster, RosterIndex, SbcError,
};

// Configuration
pub use sbcforge_config::{
    ChemistryConfig, ChemistryException, ConfigError, CountKind, DuplicatePriority,
    FormationMode, IncludeRule, ObjectiveMode, RuleConfig, RuleKind, RuleSet, SbcConfig,
    SolveSettings, SquadRatingFormula, TierMinimum, UniqueCount,
};

// Model compiler and chemistry
pub use sbcforge_model::{compile, evaluate_chemistry, ChemistryReport, CompiledModel, Model};

// Solving
pub use sbcforge_solver::{
    compile_batch, run_batch, run_solver, run_solver_with, run_solver_with_channel,
    solve_batch, Assignment, MicrolpAdapter, Pick, SolveStatus, SolverAdapter, SquadOutcome,
    StopSignal,
};

#[cfg(feature = "console")]
pub mod console;

mod solver;
pub use solver::{solve, solve_with_config, SolveJob, CONFIG_FILE};

/// Crate re-exports for advanced use.
pub mod model {
    pub use sbcforge_model::*;
}

pub mod solvers {
    pub use sbcforge_solver::*;
}

pub mod prelude {
    pub use super::{Candidate, Formation, GroupKind, Roster};
    pub use super::{ObjectiveMode, RuleConfig, SolveSettings, SquadRatingFormula};
    pub use super::{run_solver, Assignment, SolveStatus, SquadOutcome};
}
