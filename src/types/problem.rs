use super::{ClassId, RoomId, RoomSpec, SessionKind, SlotId, SubjectId, TeacherId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A complete problem instance.
///
/// Ordered maps keep every enumeration deterministic, so a fixed seed yields
/// an identical timetable on every run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub teachers: Vec<TeacherId>,
    pub classes: Vec<ClassId>,
    /// Base subjects only; lab-subjects are derived from credits
    pub subjects: Vec<SubjectId>,
    pub rooms: BTreeMap<RoomId, RoomSpec>,
    /// Order-significant weekly grid; day tag is the label prefix before '-'
    pub time_slots: Vec<SlotId>,
    pub subject_credits: BTreeMap<SubjectId, u32>,
    pub teacher_qualifications: BTreeMap<TeacherId, BTreeSet<SubjectId>>,
    #[serde(default)]
    pub subject_room_requirements: BTreeMap<SubjectId, SessionKind>,
    #[serde(default)]
    pub subject_prerequisites: BTreeMap<SubjectId, Vec<SubjectId>>,
    pub class_sizes: BTreeMap<ClassId, u32>,
    #[serde(default = "default_max_daily_load")]
    pub teacher_max_daily_load: u32,
    #[serde(default = "default_consecutive_preferred")]
    pub consecutive_preferred: bool,
    /// Accepted for compatibility with the legacy one-shot scheduling path;
    /// the round-robin driver uses its own iteration bound
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_max_daily_load() -> u32 {
    5
}

fn default_consecutive_preferred() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    200
}

impl Problem {
    pub fn class_size(&self, class: &ClassId) -> Option<u32> {
        self.class_sizes.get(class).copied()
    }

    pub fn room(&self, room: &RoomId) -> Option<&RoomSpec> {
        self.rooms.get(room)
    }

    /// Whether the teacher's qualification set contains the subject
    pub fn is_qualified(&self, teacher: &TeacherId, subject: &SubjectId) -> bool {
        self.teacher_qualifications
            .get(teacher)
            .map(|subjects| subjects.contains(subject))
            .unwrap_or(false)
    }

    /// Room kind a subject requires: lab-subjects always need a lab,
    /// everything else follows its declaration, defaulting to theory
    pub fn required_kind(&self, subject: &SubjectId) -> SessionKind {
        if subject.is_lab() {
            SessionKind::Lab
        } else {
            self.subject_room_requirements
                .get(subject)
                .copied()
                .unwrap_or(SessionKind::Theory)
        }
    }

    pub fn prerequisites(&self, subject: &SubjectId) -> &[SubjectId] {
        self.subject_prerequisites
            .get(subject)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Solver knobs read from an optional `config.toml` next to the input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Seed for the slot-permutation and eviction-order randomness.
    /// Fixed by default so repeated runs reproduce the same timetable.
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    #[serde(default = "default_max_evictions")]
    pub max_evictions: usize,
}

fn default_max_iterations() -> u32 {
    1000
}

fn default_max_evictions() -> usize {
    3
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_iterations: default_max_iterations(),
            max_evictions: default_max_evictions(),
        }
    }
}
