use super::{ScheduleState, SolveContext};
use crate::types::{ClassId, RoomId, RoomKind, SlotId, SubjectId, TeacherId};

/// Soft-preference score for an admissible candidate placement.
///
/// Higher is preferred; the search keeps the first candidate seen on ties.
/// The coefficients are load-bearing: they decide tie-breaks, so they are
/// kept exactly as calibrated.
pub fn score_candidate(
    ctx: &SolveContext,
    state: &ScheduleState,
    class: &ClassId,
    subject: &SubjectId,
    teacher: &TeacherId,
    room_id: &RoomId,
    slot: &SlotId,
    prefer_consecutive: bool,
) -> f64 {
    let mut score = 0.0;

    // Sessions of the same subject close together on the grid
    if prefer_consecutive {
        let existing = state.subject_slot_list(class, subject);
        if !existing.is_empty() {
            if let Some(candidate_idx) = ctx.grid.index_of(slot) {
                let min_distance = existing
                    .iter()
                    .filter_map(|placed| ctx.grid.index_of(placed))
                    .map(|placed_idx| placed_idx.abs_diff(candidate_idx))
                    .min();
                match min_distance {
                    Some(1) => score += 10.0,
                    Some(d) if d <= 3 => score += 5.0,
                    _ => {}
                }
            }
        }
    }

    // Spread work towards less loaded teachers
    let total_load = state.teacher_total_load(teacher);
    score += (10.0 - total_load as f64) * 0.5;
    let day_load = state.teacher_day_load(teacher, slot.day_tag());
    score += (ctx.daily_load_cap() as f64 - day_load as f64) * 0.2;

    // Unmet requirements first
    if state.scheduled_count(class, subject) < ctx.required(class, subject) {
        score += 20.0;
    }

    // Labs belong in lab rooms
    let in_lab_room = ctx
        .problem
        .room(room_id)
        .map(|room| room.kind == RoomKind::Lab)
        .unwrap_or(false);
    if subject.is_lab() && in_lab_room {
        score += 50.0;
    }

    // Pull the least progressed classes forward
    score += (1.0 - state.progress(class)) * 30.0;

    score
}
