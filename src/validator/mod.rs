mod hard_constraints;

pub use hard_constraints::*;

use crate::scheduler::SolveContext;
use crate::types::{ScheduleGrid, SATISFIED_MARKER};

/// Result of verifying a finished schedule
#[derive(Debug, Clone)]
pub struct VerificationReport {
    pub violations: Vec<Violation>,
}

/// A hard-constraint violation in the final schedule
#[derive(Debug, Clone)]
pub struct Violation {
    pub constraint: String,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

impl VerificationReport {
    pub fn is_satisfied(&self) -> bool {
        self.violations.iter().all(|v| v.severity != Severity::Error)
    }

    /// Human-readable violation list, or the single satisfaction marker
    pub fn messages(&self) -> Vec<String> {
        if self.violations.is_empty() {
            vec![SATISFIED_MARKER.to_string()]
        } else {
            self.violations.iter().map(|v| v.message.clone()).collect()
        }
    }
}

/// Re-check the hard constraints on a finished schedule grid.
///
/// Works from the grid alone, not the scheduler's indexes, so it doubles as
/// defense in depth against index drift and as the integrity check for
/// externally supplied schedules.
pub fn verify_timetable(ctx: &SolveContext, schedule: &ScheduleGrid) -> VerificationReport {
    let mut violations = Vec::new();

    violations.extend(check_session_counts(ctx, schedule));
    violations.extend(check_teacher_qualifications(ctx, schedule));
    violations.extend(check_room_capacity(ctx, schedule));
    violations.extend(check_teacher_conflicts(ctx, schedule));
    violations.extend(check_lab_ordering(ctx, schedule));

    VerificationReport { violations }
}
