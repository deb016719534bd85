mod problem;
mod room;
mod slot;
mod timetable;

pub use problem::*;
pub use room::*;
pub use slot::*;
pub use timetable::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Newtype for teacher names
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeacherId(pub String);

impl fmt::Display for TeacherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype for class (cohort) names
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassId(pub String);

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype for subject names.
///
/// Lab sessions are carried by a derived subject named "<base> Lab"; the
/// helpers below translate between a base subject and its lab companion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubjectId(pub String);

const LAB_SUFFIX: &str = " Lab";

impl SubjectId {
    /// Whether this is a derived lab-subject
    pub fn is_lab(&self) -> bool {
        self.0.ends_with(LAB_SUFFIX)
    }

    /// The lab-subject derived from this base subject
    pub fn lab(&self) -> SubjectId {
        SubjectId(format!("{}{}", self.0, LAB_SUFFIX))
    }

    /// The base subject of a lab-subject (identity for base subjects)
    pub fn base(&self) -> SubjectId {
        match self.0.strip_suffix(LAB_SUFFIX) {
            Some(base) => SubjectId(base.to_string()),
            None => self.clone(),
        }
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype for room names
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub String);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype for time-slot labels, e.g. "Mon-1".
///
/// The substring before the first '-' is the day tag used for daily load
/// accounting; the position in the declared slot sequence is the slot index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(pub String);

impl SlotId {
    /// Day tag grouping slots into daily buckets
    pub fn day_tag(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
