mod json;
mod markdown;
mod text;

pub use json::*;
pub use markdown::*;
pub use text::*;

use crate::error::Result;
use crate::types::{ClassId, Problem, TeacherId, TimetableResponse};
use std::fs;
use std::path::Path;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Text,
}

/// Generate all requested reports and write them to the output directory
pub fn generate_reports(
    response: &TimetableResponse,
    problem: &Problem,
    output_dir: &Path,
    formats: &[OutputFormat],
) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    for format in formats {
        match format {
            OutputFormat::Json => {
                let json = generate_json_report(response)?;
                fs::write(output_dir.join("timetable.json"), json)?;
            }
            OutputFormat::Markdown => {
                let md = generate_markdown_report(response, problem);
                fs::write(output_dir.join("timetable.md"), md)?;
            }
            OutputFormat::Text => {
                let txt = generate_text_report(response, problem);
                fs::write(output_dir.join("timetable.txt"), txt)?;
            }
        }
    }

    Ok(())
}

/// Render one class's weekly schedule
pub fn generate_class_schedule(
    response: &TimetableResponse,
    problem: &Problem,
    class: &ClassId,
) -> Option<String> {
    let row = response.schedule.get(class)?;

    let mut lines = vec![format!("# Timetable for class {class}"), String::new()];

    let mut any = false;
    for slot in &problem.time_slots {
        if let Some(Some(entry)) = row.get(slot) {
            lines.push(format!(
                "**{}**: {} with {} in {}",
                slot, entry.subject, entry.teacher, entry.room
            ));
            any = true;
        }
    }
    if !any {
        lines.push("No sessions scheduled.".to_string());
    }

    Some(lines.join("\n"))
}

/// Render one teacher's weekly schedule across all classes
pub fn generate_teacher_schedule(
    response: &TimetableResponse,
    problem: &Problem,
    teacher: &TeacherId,
) -> Option<String> {
    if !problem.teachers.contains(teacher) {
        return None;
    }

    let mut lines = vec![format!("# Timetable for {teacher}"), String::new()];

    let mut sessions = Vec::new();
    for slot in &problem.time_slots {
        for class in &problem.classes {
            if let Some(entry) = response.entry(class, slot) {
                if &entry.teacher == teacher {
                    sessions.push(format!(
                        "**{}**: {} for {} in {}",
                        slot, entry.subject, class, entry.room
                    ));
                }
            }
        }
    }

    if sessions.is_empty() {
        lines.push("No sessions assigned.".to_string());
    } else {
        lines.push(format!("## Teaching {} sessions", sessions.len()));
        lines.push(String::new());
        lines.extend(sessions);
    }

    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::generate_timetable;
    use crate::types::{RoomId, RoomKind, RoomSpec, SlotId, SolverConfig, SubjectId};
    use std::collections::BTreeMap;

    fn problem() -> Problem {
        Problem {
            teachers: vec![TeacherId("T".to_string())],
            classes: vec![ClassId("C".to_string())],
            subjects: vec![SubjectId("S".to_string())],
            rooms: [(
                RoomId("R".to_string()),
                RoomSpec {
                    capacity: 30,
                    kind: RoomKind::Theory,
                },
            )]
            .into_iter()
            .collect(),
            time_slots: vec![SlotId("Mon-1".to_string())],
            subject_credits: [(SubjectId("S".to_string()), 1)].into_iter().collect(),
            teacher_qualifications: [(
                TeacherId("T".to_string()),
                [SubjectId("S".to_string())].into_iter().collect(),
            )]
            .into_iter()
            .collect(),
            subject_room_requirements: BTreeMap::new(),
            subject_prerequisites: BTreeMap::new(),
            class_sizes: [(ClassId("C".to_string()), 20)].into_iter().collect(),
            teacher_max_daily_load: 5,
            consecutive_preferred: true,
            max_attempts: 200,
        }
    }

    #[test]
    fn test_class_schedule_lists_the_session() {
        let problem = problem();
        let response = generate_timetable(&problem, &SolverConfig::default(), true).unwrap();

        let report = generate_class_schedule(&response, &problem, &ClassId("C".to_string()))
            .expect("class exists");
        assert!(report.contains("Mon-1"));
        assert!(report.contains("S with T in R"));
    }

    #[test]
    fn test_unknown_class_yields_none() {
        let problem = problem();
        let response = generate_timetable(&problem, &SolverConfig::default(), true).unwrap();

        assert!(generate_class_schedule(&response, &problem, &ClassId("X".to_string())).is_none());
    }

    #[test]
    fn test_teacher_schedule_lists_the_session() {
        let problem = problem();
        let response = generate_timetable(&problem, &SolverConfig::default(), true).unwrap();

        let report = generate_teacher_schedule(&response, &problem, &TeacherId("T".to_string()))
            .expect("teacher exists");
        assert!(report.contains("Teaching 1 sessions"));
        assert!(report.contains("S for C in R"));
    }
}
