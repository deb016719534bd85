//! Timetable Generator - Constraint-driven university timetable generator
//!
//! This library assigns every required session of every subject, for each
//! class, to a (time slot, teacher, room) triple such that a fixed set of
//! hard constraints is satisfied and a set of soft preferences is maximized.
//!
//! # Algorithm Overview
//!
//! A run works through 5 phases:
//! 1. **Validation**: Reject malformed or provably infeasible instances
//! 2. **Expansion**: Convert subject credits into per-class session bags
//!    (3+ credits derive an extra lab session)
//! 3. **Ordering**: Topologically sort each class's subjects by prerequisites
//! 4. **Round-robin search**: Place sessions class by class, least progressed
//!    first, with evict-and-reinsert repair when a class gets stuck
//! 5. **Verification**: Re-check all hard constraints on the final schedule
//!
//! # Example
//!
//! ```no_run
//! use timetable_generator::parser::load_problem;
//! use timetable_generator::scheduler::generate_timetable;
//! use timetable_generator::types::SolverConfig;
//! use std::path::Path;
//!
//! let problem = load_problem(Path::new("./data/demo/problem.json")).unwrap();
//! let response = generate_timetable(&problem, &SolverConfig::default(), false).unwrap();
//! println!("Success rate: {:.1}%", response.statistics.success_rate);
//! ```

pub mod error;
pub mod parser;
pub mod reporter;
pub mod scheduler;
pub mod types;
pub mod validator;

pub use error::{Result, TimetableError};

use types::{Problem, SolverConfig, TimetableResponse};

/// One-call entry point with default solver settings
pub fn schedule(problem: &Problem) -> Result<TimetableResponse> {
    scheduler::generate_timetable(problem, &SolverConfig::default(), true)
}
