use crate::error::{Result, TimetableError};
use crate::scheduler::expand_requirements;
use crate::types::{Problem, SubjectId};
use std::collections::HashSet;

/// Reject malformed or provably infeasible instances before any search.
///
/// Everything here is fatal: empty inventories, missing or non-positive
/// class sizes, unknown subject references, expanded subjects with no
/// qualified teacher, and a total session demand above the
/// `|teachers| x |time slots|` capacity bound.
pub fn validate_problem(problem: &Problem) -> Result<()> {
    if problem.teachers.is_empty() {
        return Err(TimetableError::EmptyInventory("teacher").into());
    }
    if problem.classes.is_empty() {
        return Err(TimetableError::EmptyInventory("class").into());
    }
    if problem.subjects.is_empty() {
        return Err(TimetableError::EmptyInventory("subject").into());
    }
    if problem.rooms.is_empty() {
        return Err(TimetableError::EmptyInventory("room").into());
    }
    if problem.time_slots.is_empty() {
        return Err(TimetableError::EmptyInventory("time slot").into());
    }

    for class in &problem.classes {
        match problem.class_size(class) {
            None => {
                return Err(TimetableError::MissingClassSize {
                    class: class.clone(),
                }
                .into())
            }
            Some(0) => {
                return Err(TimetableError::InvalidClassSize {
                    class: class.clone(),
                    size: 0,
                }
                .into())
            }
            Some(_) => {}
        }
    }

    check_subject_references(problem)?;
    check_teacher_coverage(problem)?;
    check_capacity_bound(problem)?;

    Ok(())
}

/// Credits and prerequisites may only reference declared base subjects
fn check_subject_references(problem: &Problem) -> Result<()> {
    let known: HashSet<&SubjectId> = problem.subjects.iter().collect();

    for subject in problem.subject_credits.keys() {
        if !known.contains(subject) {
            return Err(TimetableError::UnknownSubject {
                subject: subject.clone(),
                context: "subject_credits",
            }
            .into());
        }
    }

    for (subject, prereqs) in &problem.subject_prerequisites {
        if !known.contains(subject) {
            return Err(TimetableError::UnknownSubject {
                subject: subject.clone(),
                context: "subject_prerequisites",
            }
            .into());
        }
        for prereq in prereqs {
            if !known.contains(prereq) {
                return Err(TimetableError::UnknownSubject {
                    subject: prereq.clone(),
                    context: "subject_prerequisites",
                }
                .into());
            }
        }
    }

    Ok(())
}

/// Every expanded required subject, lab-subjects included, needs at least
/// one qualified teacher somewhere in the faculty
fn check_teacher_coverage(problem: &Problem) -> Result<()> {
    let requirements = expand_requirements(problem);

    let mut seen: HashSet<SubjectId> = HashSet::new();
    for class in &problem.classes {
        let Some(bag) = requirements.get(class) else {
            continue;
        };
        for subject in bag.subjects() {
            if !seen.insert(subject.clone()) {
                continue;
            }
            let covered = problem
                .teachers
                .iter()
                .any(|teacher| problem.is_qualified(teacher, subject));
            if !covered {
                return Err(TimetableError::UnqualifiedSubject {
                    subject: subject.clone(),
                }
                .into());
            }
        }
    }

    Ok(())
}

/// Lower bound: the faculty can deliver at most one session per teacher per
/// slot, so demand beyond that can never be scheduled
fn check_capacity_bound(problem: &Problem) -> Result<()> {
    let requirements = expand_requirements(problem);
    let total_required: u32 = requirements.values().map(|bag| bag.total_sessions()).sum();
    let available = (problem.teachers.len() * problem.time_slots.len()) as u32;

    if total_required > available {
        return Err(TimetableError::InfeasibleCapacity {
            required: total_required,
            available,
        }
        .into());
    }

    Ok(())
}
