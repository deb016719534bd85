use crate::scheduler::SolveContext;
use crate::types::{ScheduleGrid, SlotId, SubjectId, TeacherId};
use crate::validator::{Severity, Violation};
use std::collections::{HashMap, HashSet};

/// Every (class, subject) pair must hold exactly its required session count
pub fn check_session_counts(ctx: &SolveContext, schedule: &ScheduleGrid) -> Vec<Violation> {
    let mut violations = Vec::new();

    for class in &ctx.problem.classes {
        let mut scheduled: HashMap<&SubjectId, u32> = HashMap::new();
        if let Some(row) = schedule.get(class) {
            for entry in row.values().flatten() {
                *scheduled.entry(&entry.subject).or_insert(0) += 1;
            }
        }

        let bag = ctx.bag(class);
        for subject in bag.subjects() {
            let required = bag.required(subject);
            let placed = scheduled.get(subject).copied().unwrap_or(0);
            if placed != required {
                violations.push(Violation {
                    constraint: "SessionCount".to_string(),
                    message: format!(
                        "Class {class} subject {subject}: scheduled {placed}, required {required}"
                    ),
                    severity: Severity::Error,
                });
            }
        }
    }

    violations
}

/// Every assignment's teacher must be qualified for its subject
pub fn check_teacher_qualifications(ctx: &SolveContext, schedule: &ScheduleGrid) -> Vec<Violation> {
    let mut violations = Vec::new();

    for class in &ctx.problem.classes {
        let Some(row) = schedule.get(class) else {
            continue;
        };
        for slot in ctx.grid.slots() {
            if let Some(Some(entry)) = row.get(slot) {
                if !ctx.problem.is_qualified(&entry.teacher, &entry.subject) {
                    violations.push(Violation {
                        constraint: "TeacherQualified".to_string(),
                        message: format!(
                            "Teacher {} not qualified for {}",
                            entry.teacher, entry.subject
                        ),
                        severity: Severity::Error,
                    });
                }
            }
        }
    }

    violations
}

/// Every assignment's room must hold the class
pub fn check_room_capacity(ctx: &SolveContext, schedule: &ScheduleGrid) -> Vec<Violation> {
    let mut violations = Vec::new();

    for class in &ctx.problem.classes {
        let Some(row) = schedule.get(class) else {
            continue;
        };
        let Some(class_size) = ctx.problem.class_size(class) else {
            continue;
        };
        for slot in ctx.grid.slots() {
            if let Some(Some(entry)) = row.get(slot) {
                let capacity = ctx
                    .problem
                    .room(&entry.room)
                    .map(|room| room.capacity)
                    .unwrap_or(0);
                if class_size > capacity {
                    violations.push(Violation {
                        constraint: "RoomCapacity".to_string(),
                        message: format!("Room {} capacity exceeded for {class}", entry.room),
                        severity: Severity::Error,
                    });
                }
            }
        }
    }

    violations
}

/// No teacher may hold two assignments at the same slot
pub fn check_teacher_conflicts(ctx: &SolveContext, schedule: &ScheduleGrid) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut booked: HashMap<&TeacherId, HashSet<&SlotId>> = HashMap::new();
    let mut flagged: HashSet<&TeacherId> = HashSet::new();

    for class in &ctx.problem.classes {
        let Some(row) = schedule.get(class) else {
            continue;
        };
        for slot in ctx.grid.slots() {
            if let Some(Some(entry)) = row.get(slot) {
                let slots = booked.entry(&entry.teacher).or_default();
                if !slots.insert(slot) && flagged.insert(&entry.teacher) {
                    violations.push(Violation {
                        constraint: "NoTeacherConflict".to_string(),
                        message: format!("Teacher {} has conflicting assignments", entry.teacher),
                        severity: Severity::Error,
                    });
                }
            }
        }
    }

    violations
}

/// A lab session must sit strictly after some theory session of its base
/// subject within the same class
pub fn check_lab_ordering(ctx: &SolveContext, schedule: &ScheduleGrid) -> Vec<Violation> {
    let mut violations = Vec::new();

    for class in &ctx.problem.classes {
        let Some(row) = schedule.get(class) else {
            continue;
        };

        // Slot indexes per subject, gathered from the grid itself
        let mut subject_indexes: HashMap<&SubjectId, Vec<usize>> = HashMap::new();
        for slot in ctx.grid.slots() {
            if let Some(Some(entry)) = row.get(slot) {
                if let Some(idx) = ctx.grid.index_of(slot) {
                    subject_indexes.entry(&entry.subject).or_default().push(idx);
                }
            }
        }

        for slot in ctx.grid.slots() {
            let Some(Some(entry)) = row.get(slot) else {
                continue;
            };
            if !entry.subject.is_lab() {
                continue;
            }
            let Some(lab_idx) = ctx.grid.index_of(slot) else {
                continue;
            };
            let base = entry.subject.base();
            let has_earlier_theory = subject_indexes
                .get(&base)
                .map(|indexes| indexes.iter().any(|&idx| idx < lab_idx))
                .unwrap_or(false);
            if !has_earlier_theory {
                violations.push(Violation {
                    constraint: "LabAfterTheory".to_string(),
                    message: format!("Lab {} scheduled before theory in {class}", entry.subject),
                    severity: Severity::Error,
                });
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        AssignmentEntry, ClassId, Problem, RoomId, RoomKind, RoomSpec, SlotId, TeacherId,
    };
    use std::collections::BTreeMap;

    fn subject(name: &str) -> SubjectId {
        SubjectId(name.to_string())
    }

    fn slot(name: &str) -> SlotId {
        SlotId(name.to_string())
    }

    fn entry(subject_name: &str, teacher: &str, room: &str) -> Option<AssignmentEntry> {
        Some(AssignmentEntry {
            subject: subject(subject_name),
            teacher: TeacherId(teacher.to_string()),
            room: RoomId(room.to_string()),
        })
    }

    fn fixture() -> Problem {
        Problem {
            teachers: vec![TeacherId("T".to_string())],
            classes: vec![ClassId("C".to_string()), ClassId("D".to_string())],
            subjects: vec![subject("S")],
            rooms: [(
                RoomId("R".to_string()),
                RoomSpec {
                    capacity: 30,
                    kind: RoomKind::Theory,
                },
            )]
            .into_iter()
            .collect(),
            time_slots: vec![slot("Mon-1"), slot("Mon-2"), slot("Mon-3"), slot("Mon-4")],
            subject_credits: [(subject("S"), 3)].into_iter().collect(),
            teacher_qualifications: [(
                TeacherId("T".to_string()),
                [subject("S"), subject("S Lab")].into_iter().collect(),
            )]
            .into_iter()
            .collect(),
            subject_room_requirements: BTreeMap::new(),
            subject_prerequisites: BTreeMap::new(),
            class_sizes: [
                (ClassId("C".to_string()), 20),
                (ClassId("D".to_string()), 20),
            ]
            .into_iter()
            .collect(),
            teacher_max_daily_load: 5,
            consecutive_preferred: true,
            max_attempts: 200,
        }
    }

    fn empty_grid(problem: &Problem) -> ScheduleGrid {
        problem
            .classes
            .iter()
            .map(|class| {
                (
                    class.clone(),
                    problem
                        .time_slots
                        .iter()
                        .map(|s| (s.clone(), None))
                        .collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_detects_unmet_session_counts() {
        let problem = fixture();
        let ctx = SolveContext::new(&problem);
        let schedule = empty_grid(&problem);

        let violations = check_session_counts(&ctx, &schedule);
        // Both classes miss 3 theory sessions and 1 lab each
        assert_eq!(violations.len(), 4);
        assert!(violations[0].message.contains("scheduled 0, required 3"));
    }

    #[test]
    fn test_detects_unqualified_teacher() {
        let problem = fixture();
        let ctx = SolveContext::new(&problem);
        let mut schedule = empty_grid(&problem);
        schedule
            .get_mut(&ClassId("C".to_string()))
            .unwrap()
            .insert(slot("Mon-1"), entry("S", "Impostor", "R"));

        let violations = check_teacher_qualifications(&ctx, &schedule);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("Impostor"));
    }

    #[test]
    fn test_detects_room_over_capacity() {
        let mut problem = fixture();
        problem.class_sizes.insert(ClassId("C".to_string()), 50);
        let ctx = SolveContext::new(&problem);
        let mut schedule = empty_grid(&problem);
        schedule
            .get_mut(&ClassId("C".to_string()))
            .unwrap()
            .insert(slot("Mon-1"), entry("S", "T", "R"));

        let violations = check_room_capacity(&ctx, &schedule);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_detects_teacher_double_booking() {
        let problem = fixture();
        let ctx = SolveContext::new(&problem);
        let mut schedule = empty_grid(&problem);
        // Same teacher, same slot, two classes
        schedule
            .get_mut(&ClassId("C".to_string()))
            .unwrap()
            .insert(slot("Mon-1"), entry("S", "T", "R"));
        schedule
            .get_mut(&ClassId("D".to_string()))
            .unwrap()
            .insert(slot("Mon-1"), entry("S", "T", "R"));

        let violations = check_teacher_conflicts(&ctx, &schedule);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("conflicting assignments"));
    }

    #[test]
    fn test_detects_lab_before_theory() {
        let problem = fixture();
        let ctx = SolveContext::new(&problem);
        let mut schedule = empty_grid(&problem);
        let row = schedule.get_mut(&ClassId("C".to_string())).unwrap();
        row.insert(slot("Mon-1"), entry("S Lab", "T", "R"));
        row.insert(slot("Mon-2"), entry("S", "T", "R"));

        let violations = check_lab_ordering(&ctx, &schedule);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("before theory"));
    }

    #[test]
    fn test_lab_after_theory_is_clean() {
        let problem = fixture();
        let ctx = SolveContext::new(&problem);
        let mut schedule = empty_grid(&problem);
        let row = schedule.get_mut(&ClassId("C".to_string())).unwrap();
        row.insert(slot("Mon-1"), entry("S", "T", "R"));
        row.insert(slot("Mon-2"), entry("S Lab", "T", "R"));

        assert!(check_lab_ordering(&ctx, &schedule).is_empty());
    }

    #[test]
    fn test_clean_schedule_reports_satisfaction() {
        let mut problem = fixture();
        problem.subject_credits.insert(subject("S"), 1);
        let ctx = SolveContext::new(&problem);
        let mut schedule = empty_grid(&problem);
        schedule
            .get_mut(&ClassId("C".to_string()))
            .unwrap()
            .insert(slot("Mon-1"), entry("S", "T", "R"));
        schedule
            .get_mut(&ClassId("D".to_string()))
            .unwrap()
            .insert(slot("Mon-2"), entry("S", "T", "R"));

        let report = crate::validator::verify_timetable(&ctx, &schedule);
        assert!(report.is_satisfied());
        assert_eq!(
            report.messages(),
            vec![crate::types::SATISFIED_MARKER.to_string()]
        );
    }
}
