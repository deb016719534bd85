use crate::types::{ClassId, SlotId, SubjectId};
use thiserror::Error;

/// Domain-specific errors for the timetable generator
#[derive(Error, Debug)]
pub enum TimetableError {
    // Input/Parse errors
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON in '{file}': {message}")]
    JsonParse { file: String, message: String },

    // Validation errors, raised before any search is attempted
    #[error("At least one {0} is required")]
    EmptyInventory(&'static str),

    #[error("Class size not specified for '{class}'")]
    MissingClassSize { class: ClassId },

    #[error("Invalid class size for '{class}': {size}")]
    InvalidClassSize { class: ClassId, size: u32 },

    #[error("Unknown subject '{subject}' referenced in {context}")]
    UnknownSubject {
        subject: SubjectId,
        context: &'static str,
    },

    #[error("No qualified teachers available for '{subject}'")]
    UnqualifiedSubject { subject: SubjectId },

    #[error("Insufficient teacher capacity: required {required} sessions, available {available}")]
    InfeasibleCapacity { required: u32, available: u32 },

    // State errors
    #[error("No assignment for class '{class}' at slot '{slot}'")]
    NoAssignment { class: ClassId, slot: SlotId },
}

/// Use anyhow::Result at application boundaries
pub type Result<T> = anyhow::Result<T>;
