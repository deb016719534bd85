use super::{evict_and_reinsert, find_best_placement, qualified_teachers, ScheduleState, SolveContext};
use crate::types::{ClassId, SolverConfig, SubjectId};
use rand::rngs::StdRng;

/// What the round-robin loop achieved
#[derive(Debug, Clone, Copy)]
pub struct DriveOutcome {
    pub iterations: u32,
    /// Every class fully scheduled
    pub complete: bool,
}

/// Round-robin outer loop.
///
/// Each iteration visits the not-yet-complete classes from least to most
/// progressed and tries to place one session of each class's first unmet
/// subject (in prerequisite order). A full pass without progress triggers a
/// repair attempt for the most starved (class, subject) pair; if that also
/// fails the schedule is left best-effort for the Verifier to report.
pub fn run_round_robin(
    ctx: &SolveContext,
    state: &mut ScheduleState,
    rng: &mut StdRng,
    config: &SolverConfig,
) -> DriveOutcome {
    let mut pending: Vec<ClassId> = ctx
        .problem
        .classes
        .iter()
        .filter(|class| !state.is_class_complete(ctx, class))
        .cloned()
        .collect();
    let mut iterations = 0;

    while !pending.is_empty() && iterations < config.max_iterations {
        iterations += 1;

        // Least progressed first; stable sort keeps declared order on ties
        pending.sort_by(|a, b| state.progress(a).total_cmp(&state.progress(b)));

        let mut made_progress = false;
        for class in &pending {
            let Some(subject) = first_unmet_subject(ctx, state, class) else {
                continue;
            };
            for teacher in qualified_teachers(ctx, state, &subject) {
                if let Some((slot, room)) = find_best_placement(ctx, state, class, &subject, &teacher, rng) {
                    if state.try_place(ctx, class, &subject, &teacher, &room, &slot) {
                        made_progress = true;
                        break;
                    }
                }
            }
        }

        pending.retain(|class| !state.is_class_complete(ctx, class));

        if !made_progress {
            let stuck = pending
                .iter()
                .find_map(|class| first_unmet_subject(ctx, state, class).map(|s| (class.clone(), s)));
            if let Some((class, subject)) = stuck {
                if evict_and_reinsert(ctx, state, &class, &subject, rng, config.max_evictions) {
                    pending.retain(|c| !state.is_class_complete(ctx, c));
                    continue;
                }
            }
            break;
        }
    }

    DriveOutcome {
        iterations,
        complete: pending.is_empty(),
    }
}

/// First subject in the class's prerequisite order whose scheduled count is
/// below its requirement
pub fn first_unmet_subject(
    ctx: &SolveContext,
    state: &ScheduleState,
    class: &ClassId,
) -> Option<SubjectId> {
    ctx.order(class)
        .iter()
        .find(|subject| state.scheduled_count(class, subject) < ctx.required(class, subject))
        .cloned()
}
