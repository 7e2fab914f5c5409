//! SbcForge Solver - backends and the solve loop
//!
//! This crate provides:
//! - The [`SolverAdapter`] seam and the `good_lp`/microlp backend
//! - Termination conditions and the [`StagnationWatchdog`]
//! - Result extraction into an [`Assignment`]
//! - `run_solver` orchestration and parallel batch compile/solve

pub mod adapter;
pub mod backend;
pub mod basic;
pub mod batch;
pub mod extract;
pub mod status;
pub mod termination;
pub mod watchdog;


pub use adapter::{IncumbentListener, NoopListener, SolveParams, SolveResponse, SolverAdapter};
pub use backend::{LinearProgram, MicrolpAdapter};
pub use basic::{
    run_solver, run_solver_with, run_solver_with_channel, solve_compiled, SquadOutcome,
    DEFAULT_TIME_LIMIT_SECS,
};
pub use batch::{compile_batch, run_batch, solve_batch};
pub use extract::{extract, Assignment, Pick};
pub use status::SolveStatus;
pub use termination::{
    ExternalTermination, OrTermination, SolveScope, StopSignal, Termination, TimeTermination,
    UnimprovedTimeTermination,
};
pub use watchdog::StagnationWatchdog;
