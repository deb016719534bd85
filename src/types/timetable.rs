use super::{ClassId, RoomId, SlotId, SubjectId, TeacherId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Marker emitted in `constraints` when the Verifier finds no violations
pub const SATISFIED_MARKER: &str = "All constraints satisfied!";

/// One committed (subject, teacher, room) placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentEntry {
    pub subject: SubjectId,
    pub teacher: TeacherId,
    pub room: RoomId,
}

/// Per-class weekly grid: every declared (class, slot) pair appears,
/// empty cells as `None`
pub type ScheduleGrid = BTreeMap<ClassId, BTreeMap<SlotId, Option<AssignmentEntry>>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherUtilization {
    pub name: TeacherId,
    pub total_sessions: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statistics {
    pub total_required: u32,
    pub total_scheduled: u32,
    /// Percent of required sessions placed; 0 when nothing is required
    pub success_rate: f64,
    pub teacher_utilization: Vec<TeacherUtilization>,
}

/// Metadata about the generated timetable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableMetadata {
    pub generated_at: String,
    pub algorithm_version: String,
    pub solve_time_ms: u64,
    pub iterations: u32,
}

impl Default for TimetableMetadata {
    fn default() -> Self {
        Self {
            generated_at: String::new(),
            algorithm_version: String::new(),
            solve_time_ms: 0,
            iterations: 0,
        }
    }
}

/// The complete result of a scheduling run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableResponse {
    pub schedule: ScheduleGrid,
    pub statistics: Statistics,
    /// Violation messages, or the single satisfaction marker
    pub constraints: Vec<String>,
    #[serde(default)]
    pub metadata: TimetableMetadata,
}

impl TimetableResponse {
    pub fn entry(&self, class: &ClassId, slot: &SlotId) -> Option<&AssignmentEntry> {
        self.schedule
            .get(class)
            .and_then(|row| row.get(slot))
            .and_then(|cell| cell.as_ref())
    }

    /// Whether the Verifier reported a clean schedule
    pub fn is_satisfied(&self) -> bool {
        self.constraints.len() == 1 && self.constraints[0] == SATISFIED_MARKER
    }

    /// Number of filled cells across all classes
    pub fn total_assignments(&self) -> usize {
        self.schedule
            .values()
            .map(|row| row.values().filter(|cell| cell.is_some()).count())
            .sum()
    }
}
