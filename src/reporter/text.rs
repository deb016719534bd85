use crate::types::{Problem, TimetableResponse};
use colored::Colorize;

/// Plain text report (with colors for terminal)
pub fn generate_text_report(response: &TimetableResponse, problem: &Problem) -> String {
    let mut lines = Vec::new();

    lines.push("═".repeat(60));
    lines.push("               TIMETABLE REPORT".to_string());
    lines.push("═".repeat(60));
    lines.push(String::new());

    lines.push(format!("Generated: {}", response.metadata.generated_at));
    lines.push(format!("Solve Time: {}ms", response.metadata.solve_time_ms));
    lines.push(format!("Iterations: {}", response.metadata.iterations));
    lines.push(String::new());

    lines.push("─".repeat(40));
    lines.push("STATISTICS".to_string());
    lines.push("─".repeat(40));
    lines.push(format!(
        "  Required:      {}",
        response.statistics.total_required
    ));
    lines.push(format!(
        "  Scheduled:     {}",
        response.statistics.total_scheduled
    ));
    lines.push(format!(
        "  Success Rate:  {:.1}%",
        response.statistics.success_rate
    ));
    lines.push(String::new());

    lines.push("─".repeat(40));
    if response.is_satisfied() {
        lines.push("VERIFICATION: PASSED".green().to_string());
    } else {
        lines.push("VERIFICATION: FAILED".red().to_string());
        for constraint in &response.constraints {
            lines.push(format!("  ! {constraint}"));
        }
    }
    lines.push("─".repeat(40));
    lines.push(String::new());

    for class in &problem.classes {
        lines.push(format!("CLASS {class}").bold().to_string());
        for slot in &problem.time_slots {
            match response.entry(class, slot) {
                Some(entry) => lines.push(format!(
                    "  {:10} {} | {} | {}",
                    slot.to_string(),
                    entry.subject,
                    entry.teacher,
                    entry.room
                )),
                None => lines.push(format!("  {:10} {}", slot.to_string(), "free".dimmed())),
            }
        }
        lines.push(String::new());
    }

    lines.push("TEACHER UTILIZATION".to_string());
    lines.push("─".repeat(40));
    for utilization in &response.statistics.teacher_utilization {
        lines.push(format!(
            "  {} | {} sessions",
            utilization.name, utilization.total_sessions
        ));
    }

    lines.push(String::new());
    lines.push("═".repeat(60));

    lines.join("\n")
}

/// Print a quick summary to stdout
pub fn print_summary(response: &TimetableResponse) {
    println!();
    if response.is_satisfied() {
        println!("{}", "✓ Timetable generated successfully".green().bold());
    } else {
        println!("{}", "✗ Timetable has constraint violations".red().bold());
    }
    println!();
    println!("  Required:     {}", response.statistics.total_required);
    println!("  Scheduled:    {}", response.statistics.total_scheduled);
    println!(
        "  Success Rate: {:.1}%",
        response.statistics.success_rate
    );
    println!("  Time:         {}ms", response.metadata.solve_time_ms);
    println!();
}
