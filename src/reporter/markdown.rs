use crate::types::{Problem, TimetableResponse};

/// Markdown report: one weekly grid table per class, then statistics and
/// the constraint verdict
pub fn generate_markdown_report(response: &TimetableResponse, problem: &Problem) -> String {
    let mut lines = vec![
        "# University Timetable".to_string(),
        String::new(),
        format!("Generated: {}", response.metadata.generated_at),
        format!("Solve time: {}ms", response.metadata.solve_time_ms),
        String::new(),
    ];

    for class in &problem.classes {
        lines.push(format!("## Class {class}"));
        lines.push(String::new());
        lines.push("| Slot | Subject | Teacher | Room |".to_string());
        lines.push("|------|---------|---------|------|".to_string());

        for slot in &problem.time_slots {
            match response.entry(class, slot) {
                Some(entry) => lines.push(format!(
                    "| {} | {} | {} | {} |",
                    slot, entry.subject, entry.teacher, entry.room
                )),
                None => lines.push(format!("| {slot} | - | - | - |")),
            }
        }
        lines.push(String::new());
    }

    lines.push("## Statistics".to_string());
    lines.push(String::new());
    lines.push(format!(
        "- Required sessions: {}",
        response.statistics.total_required
    ));
    lines.push(format!(
        "- Scheduled sessions: {}",
        response.statistics.total_scheduled
    ));
    lines.push(format!(
        "- Success rate: {:.1}%",
        response.statistics.success_rate
    ));
    lines.push(String::new());

    lines.push("## Teacher utilization".to_string());
    lines.push(String::new());
    for utilization in &response.statistics.teacher_utilization {
        lines.push(format!(
            "- {}: {} sessions",
            utilization.name, utilization.total_sessions
        ));
    }
    lines.push(String::new());

    lines.push("## Constraints".to_string());
    lines.push(String::new());
    for constraint in &response.constraints {
        lines.push(format!("- {constraint}"));
    }
    lines.push(String::new());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::generate_timetable;
    use crate::types::{
        ClassId, RoomId, RoomKind, RoomSpec, SlotId, SolverConfig, SubjectId, TeacherId,
    };
    use std::collections::BTreeMap;

    #[test]
    fn test_markdown_contains_grid_and_stats() {
        let problem = Problem {
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
            time_slots: vec![SlotId("Mon-1".to_string()), SlotId("Mon-2".to_string())],
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
        };

        let response = generate_timetable(&problem, &SolverConfig::default(), true).unwrap();
        let report = generate_markdown_report(&response, &problem);

        assert!(report.contains("## Class C"));
        assert!(report.contains("| Slot | Subject | Teacher | Room |"));
        assert!(report.contains("Success rate: 100.0%"));
        assert!(report.contains("T: 1 sessions"));
    }
}
