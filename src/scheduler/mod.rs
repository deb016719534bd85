mod driver;
mod expander;
mod ordering;
mod repair;
mod scorer;
mod search;
mod state;

pub use driver::*;
pub use expander::*;
pub use ordering::*;
pub use repair::*;
pub use scorer::*;
pub use search::*;
pub use state::*;

use crate::error::Result;
use crate::parser::validate_problem;
use crate::types::{
    ClassId, Problem, SolverConfig, Statistics, SubjectId, TeacherUtilization, TimeGrid,
    TimetableMetadata, TimetableResponse,
};
use crate::validator::verify_timetable;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::time::Instant;

/// Immutable context shared by every scheduling component: the problem, the
/// slot grid, the expanded requirements and the per-class subject order.
pub struct SolveContext<'a> {
    pub problem: &'a Problem,
    pub grid: TimeGrid,
    requirements: HashMap<ClassId, SessionBag>,
    subject_order: HashMap<ClassId, Vec<SubjectId>>,
    empty_bag: SessionBag,
}

impl<'a> SolveContext<'a> {
    pub fn new(problem: &'a Problem) -> Self {
        let grid = TimeGrid::new(&problem.time_slots);
        let requirements = expand_requirements(problem);
        let subject_order = requirements
            .iter()
            .map(|(class, bag)| (class.clone(), order_subjects(problem, bag)))
            .collect();
        Self {
            problem,
            grid,
            requirements,
            subject_order,
            empty_bag: SessionBag::default(),
        }
    }

    /// The class's required session bag
    pub fn bag(&self, class: &ClassId) -> &SessionBag {
        self.requirements.get(class).unwrap_or(&self.empty_bag)
    }

    pub fn required(&self, class: &ClassId, subject: &SubjectId) -> u32 {
        self.requirements
            .get(class)
            .map(|bag| bag.required(subject))
            .unwrap_or(0)
    }

    /// The class's subjects in prerequisite order
    pub fn order(&self, class: &ClassId) -> &[SubjectId] {
        self.subject_order
            .get(class)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn daily_load_cap(&self) -> u32 {
        self.problem.teacher_max_daily_load
    }

    /// Required sessions summed over every (class, subject) pair
    pub fn total_required(&self) -> u32 {
        self.problem
            .classes
            .iter()
            .filter_map(|class| self.requirements.get(class))
            .map(SessionBag::total_sessions)
            .sum()
    }
}

/// Run the full pipeline: validate, expand, order, drive, verify, report.
///
/// Returns only on completion; a schedule with unplaced sessions is not an
/// error, the gaps are reported through `constraints` and `statistics`.
pub fn generate_timetable(
    problem: &Problem,
    config: &SolverConfig,
    quiet: bool,
) -> Result<TimetableResponse> {
    let start_time = Instant::now();

    validate_problem(problem)?;

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    };

    progress.set_message("Expanding requirements...");
    progress.set_position(10);
    let ctx = SolveContext::new(problem);

    progress.set_message("Scheduling sessions...");
    progress.set_position(25);
    let mut state = ScheduleState::new(&ctx);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let outcome = run_round_robin(&ctx, &mut state, &mut rng, config);

    progress.set_message("Verifying constraints...");
    progress.set_position(85);
    let schedule = state.to_grid(&ctx);
    let report = verify_timetable(&ctx, &schedule);

    progress.set_message("Complete!");
    progress.set_position(100);
    progress.finish_with_message("Timetable generated");

    let statistics = build_statistics(&ctx, &state);
    let elapsed = start_time.elapsed();

    Ok(TimetableResponse {
        schedule,
        statistics,
        constraints: report.messages(),
        metadata: TimetableMetadata {
            generated_at: chrono::Utc::now().to_rfc3339(),
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            solve_time_ms: elapsed.as_millis() as u64,
            iterations: outcome.iterations,
        },
    })
}

fn build_statistics(ctx: &SolveContext, state: &ScheduleState) -> Statistics {
    let total_required = ctx.total_required();
    let total_scheduled: u32 = ctx
        .problem
        .classes
        .iter()
        .map(|class| {
            ctx.bag(class)
                .subjects()
                .iter()
                .map(|subject| state.scheduled_count(class, subject))
                .sum::<u32>()
        })
        .sum();

    let success_rate = if total_required > 0 {
        (total_scheduled as f64 / total_required as f64) * 100.0
    } else {
        0.0
    };

    let teacher_utilization = ctx
        .problem
        .teachers
        .iter()
        .map(|teacher| TeacherUtilization {
            name: teacher.clone(),
            total_sessions: state.teacher_total_load(teacher),
        })
        .collect();

    Statistics {
        total_required,
        total_scheduled,
        success_rate,
        teacher_utilization,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RoomId, RoomKind, RoomSpec, SessionKind, SlotId, TeacherId, SATISFIED_MARKER};
    use std::collections::BTreeMap;

    fn trivial_problem() -> Problem {
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
    fn test_trivial_instance_end_to_end() {
        let problem = trivial_problem();
        let response =
            generate_timetable(&problem, &SolverConfig::default(), true).expect("valid instance");

        let entry = response
            .entry(&ClassId("C".to_string()), &SlotId("Mon-1".to_string()))
            .expect("the single cell must be filled");
        assert_eq!(entry.subject.0, "S");
        assert_eq!(entry.teacher.0, "T");
        assert_eq!(entry.room.0, "R");

        assert_eq!(response.statistics.total_required, 1);
        assert_eq!(response.statistics.total_scheduled, 1);
        assert!((response.statistics.success_rate - 100.0).abs() < 1e-9);
        assert_eq!(response.constraints, vec![SATISFIED_MARKER.to_string()]);
        assert!(response.is_satisfied());
    }

    #[test]
    fn test_every_declared_cell_appears_in_the_grid() {
        let mut problem = trivial_problem();
        problem.time_slots = vec![
            SlotId("Mon-1".to_string()),
            SlotId("Mon-2".to_string()),
            SlotId("Tue-1".to_string()),
        ];

        let response =
            generate_timetable(&problem, &SolverConfig::default(), true).expect("valid instance");

        let row = &response.schedule[&ClassId("C".to_string())];
        assert_eq!(row.len(), 3);
        // One session required, two cells stay empty
        assert_eq!(response.total_assignments(), 1);
    }

    #[test]
    fn test_missing_room_kind_yields_partial_schedule() {
        let mut problem = trivial_problem();
        problem
            .subject_room_requirements
            .insert(SubjectId("S".to_string()), SessionKind::Lab);

        let response =
            generate_timetable(&problem, &SolverConfig::default(), true).expect("valid instance");

        assert_eq!(response.statistics.total_scheduled, 0);
        assert!(response.statistics.success_rate < 100.0);
        assert!(!response.is_satisfied());
        assert!(response
            .constraints
            .iter()
            .any(|c| c.contains("scheduled 0, required 1")));
    }

    #[test]
    fn test_same_seed_reproduces_the_same_timetable() {
        let mut problem = trivial_problem();
        problem.time_slots = (1..=4)
            .flat_map(|i| {
                [
                    SlotId(format!("Mon-{i}")),
                    SlotId(format!("Tue-{i}")),
                ]
            })
            .collect();
        problem.subject_credits.insert(SubjectId("S".to_string()), 2);

        let config = SolverConfig {
            seed: 42,
            ..SolverConfig::default()
        };
        let first = generate_timetable(&problem, &config, true).unwrap();
        let second = generate_timetable(&problem, &config, true).unwrap();

        assert_eq!(first.schedule, second.schedule);
    }
}
