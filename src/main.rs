use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use timetable_generator::parser::{load_config_or_default, load_problem, validate_problem};
use timetable_generator::reporter::{
    generate_class_schedule, generate_json_summary, generate_reports, generate_teacher_schedule,
    print_summary, OutputFormat,
};
use timetable_generator::scheduler::{generate_timetable, SolveContext};
use timetable_generator::types::{ClassId, TeacherId, TimetableResponse};
use timetable_generator::validator::verify_timetable;

#[derive(Parser)]
#[command(name = "timetable-generator")]
#[command(about = "Constraint-driven university timetable generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run demo with sample data
    Demo {
        /// Override the randomization seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate a timetable from a problem instance
    Generate {
        /// Path to the problem JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for timetable files
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Output format(s): json, markdown, text, or all
        #[arg(short, long, default_value = "all")]
        format: String,

        /// Suppress progress output, print JSON summary only
        #[arg(short, long)]
        quiet: bool,

        /// Override the randomization seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Re-verify an existing timetable against its problem instance
    Validate {
        /// Path to timetable.json file
        #[arg(short, long)]
        timetable: PathBuf,

        /// Path to the problem JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Show detailed validation results
        #[arg(short, long)]
        verbose: bool,
    },

    /// Generate schedule views from a timetable
    Report {
        /// Path to timetable.json file
        #[arg(short, long)]
        timetable: PathBuf,

        /// Path to the problem JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Schedule for a specific class
        #[arg(long)]
        class: Option<String>,

        /// Schedule for a specific teacher
        #[arg(long)]
        teacher: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { seed } => run_demo(seed),
        Commands::Generate {
            input,
            output,
            format,
            quiet,
            seed,
        } => run_generate(&input, &output, &format, quiet, seed),
        Commands::Validate {
            timetable,
            input,
            verbose,
        } => run_validate(&timetable, &input, verbose),
        Commands::Report {
            timetable,
            input,
            class,
            teacher,
        } => run_report(&timetable, &input, class, teacher),
    }
}

fn run_demo(seed: Option<u64>) -> Result<()> {
    println!("{}", "Timetable Generator Demo".bold().cyan());
    println!("{}", "─".repeat(40));

    let demo_path = PathBuf::from("data/demo");
    let problem_path = demo_path.join("problem.json");
    let output_path = PathBuf::from("output");

    if !problem_path.exists() {
        println!(
            "{}",
            "Demo data not found. Creating sample data...".yellow()
        );
        create_demo_data(&demo_path)?;
    }

    println!("Loading demo data from: {}", demo_path.display());

    let problem = load_problem(&problem_path).context("Failed to load demo data")?;
    validate_problem(&problem)?;

    let mut config = load_config_or_default(&demo_path.join("config.toml"));
    if let Some(seed) = seed {
        config.seed = seed;
    }

    println!(
        "Loaded {} teachers, {} classes, {} subjects, {} rooms, {} slots",
        problem.teachers.len(),
        problem.classes.len(),
        problem.subjects.len(),
        problem.rooms.len(),
        problem.time_slots.len()
    );

    println!("\nGenerating timetable...\n");
    let response = generate_timetable(&problem, &config, false)?;

    print_summary(&response);

    generate_reports(
        &response,
        &problem,
        &output_path,
        &[OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Text],
    )?;

    println!(
        "Reports written to: {}",
        output_path.display().to_string().green()
    );

    Ok(())
}

fn run_generate(
    input: &Path,
    output: &Path,
    format: &str,
    quiet: bool,
    seed: Option<u64>,
) -> Result<()> {
    let problem = load_problem(input).context("Failed to load problem instance")?;

    let config_path = input
        .parent()
        .map(|dir| dir.join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"));
    let mut config = load_config_or_default(&config_path);
    if let Some(seed) = seed {
        config.seed = seed;
    }

    if !quiet {
        println!(
            "Loaded {} teachers, {} classes, {} subjects, {} rooms, {} slots",
            problem.teachers.len(),
            problem.classes.len(),
            problem.subjects.len(),
            problem.rooms.len(),
            problem.time_slots.len()
        );
    }

    let response = generate_timetable(&problem, &config, quiet)?;

    let formats = parse_formats(format);
    generate_reports(&response, &problem, output, &formats)?;

    if quiet {
        println!("{}", generate_json_summary(&response)?);
    } else {
        print_summary(&response);
        println!("Reports written to: {}", output.display().to_string().green());
    }

    Ok(())
}

fn run_validate(timetable_path: &Path, input: &Path, verbose: bool) -> Result<()> {
    let problem = load_problem(input)?;
    validate_problem(&problem)?;

    let timetable_json = std::fs::read_to_string(timetable_path)?;
    let response: TimetableResponse = serde_json::from_str(&timetable_json)?;

    let ctx = SolveContext::new(&problem);
    let report = verify_timetable(&ctx, &response.schedule);

    if report.is_satisfied() {
        println!("{}", "✓ Timetable satisfies all hard constraints".green().bold());
    } else {
        println!("{}", "✗ Timetable has violations".red().bold());
        for violation in &report.violations {
            println!("  - {}: {}", violation.constraint.red(), violation.message);
        }
    }

    if verbose {
        println!("\n{}", "Statistics:".bold());
        println!("  Required:  {}", response.statistics.total_required);
        println!("  Scheduled: {}", response.statistics.total_scheduled);
        println!(
            "  Success rate: {:.1}%",
            response.statistics.success_rate
        );
    }

    Ok(())
}

fn run_report(
    timetable_path: &Path,
    input: &Path,
    class: Option<String>,
    teacher: Option<String>,
) -> Result<()> {
    let problem = load_problem(input)?;

    let timetable_json = std::fs::read_to_string(timetable_path)?;
    let response: TimetableResponse = serde_json::from_str(&timetable_json)?;

    if let Some(class_name) = class {
        let id = ClassId(class_name);
        match generate_class_schedule(&response, &problem, &id) {
            Some(report) => println!("{report}"),
            None => println!("Class not found"),
        }
    } else if let Some(teacher_name) = teacher {
        let id = TeacherId(teacher_name);
        match generate_teacher_schedule(&response, &problem, &id) {
            Some(report) => println!("{report}"),
            None => println!("Teacher not found"),
        }
    } else {
        print_summary(&response);
    }

    Ok(())
}

fn parse_formats(format: &str) -> Vec<OutputFormat> {
    if format == "all" {
        return vec![OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Text];
    }

    format
        .split(',')
        .filter_map(|f| match f.trim().to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "text" | "txt" => Some(OutputFormat::Text),
            _ => None,
        })
        .collect()
}

fn create_demo_data(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;

    let problem = serde_json::json!({
        "teachers": ["Dr. Rao", "Prof. Iyer", "Dr. Menon", "Ms. Pillai"],
        "classes": ["CS-A", "CS-B"],
        "subjects": ["Mathematics", "Physics", "Data Structures", "English"],
        "rooms": {
            "R101": {"capacity": 60, "type": "theory"},
            "R102": {"capacity": 40, "type": "theory"},
            "PhysLab": {"capacity": 35, "type": "lab"},
            "Hall": {"capacity": 80, "type": "flex"}
        },
        "time_slots": [
            "Mon-1", "Mon-2", "Mon-3", "Mon-4",
            "Tue-1", "Tue-2", "Tue-3", "Tue-4",
            "Wed-1", "Wed-2", "Wed-3", "Wed-4",
            "Thu-1", "Thu-2", "Thu-3", "Thu-4",
            "Fri-1", "Fri-2", "Fri-3", "Fri-4"
        ],
        "subject_credits": {
            "Mathematics": 3,
            "Physics": 3,
            "Data Structures": 2,
            "English": 2
        },
        "teacher_qualifications": {
            "Dr. Rao": ["Mathematics", "Mathematics Lab"],
            "Prof. Iyer": ["Physics", "Physics Lab"],
            "Dr. Menon": ["Data Structures", "Mathematics"],
            "Ms. Pillai": ["English"]
        },
        "subject_room_requirements": {
            "Physics": "theory",
            "Data Structures": "theory"
        },
        "subject_prerequisites": {
            "Data Structures": ["Mathematics"]
        },
        "class_sizes": {"CS-A": 38, "CS-B": 32},
        "teacher_max_daily_load": 5,
        "consecutive_preferred": true
    });
    std::fs::write(
        path.join("problem.json"),
        serde_json::to_string_pretty(&problem)?,
    )?;

    println!("{}", "Demo data created successfully!".green());
    Ok(())
}
