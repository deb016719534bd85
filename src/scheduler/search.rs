use super::{score_candidate, ScheduleState, SolveContext};
use crate::types::{ClassId, RoomId, RoomKind, SessionKind, SlotId, SubjectId, TeacherId};
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::cmp::Reverse;

/// Rooms that can host a session of the required kind for this class,
/// smallest capacity first so large rooms stay available for large classes.
pub fn suitable_rooms(ctx: &SolveContext, class: &ClassId, required: SessionKind) -> Vec<RoomId> {
    let Some(class_size) = ctx.problem.class_size(class) else {
        return Vec::new();
    };

    let mut rooms: Vec<(&RoomId, u32)> = ctx
        .problem
        .rooms
        .iter()
        .filter(|(_, spec)| spec.fits(class_size) && spec.kind.suits(required))
        .map(|(id, spec)| (id, spec.capacity))
        .collect();
    rooms.sort_by_key(|(_, capacity)| *capacity);
    rooms.into_iter().map(|(id, _)| id.clone()).collect()
}

/// Qualified teachers for a subject, least loaded first; ties broken by the
/// most remaining free slots.
pub fn qualified_teachers(
    ctx: &SolveContext,
    state: &ScheduleState,
    subject: &SubjectId,
) -> Vec<TeacherId> {
    ctx.problem
        .teachers
        .iter()
        .filter(|teacher| ctx.problem.is_qualified(teacher, subject))
        .cloned()
        .sorted_by_key(|teacher| {
            let remaining = ctx.grid.len() - state.teacher_booked_slots(teacher);
            (state.teacher_total_load(teacher), Reverse(remaining))
        })
        .collect()
}

/// Scan legal (slot, room) combinations for a (class, subject, teacher)
/// triple and return the highest-scoring admissible one.
///
/// Slots are visited in a random permutation so placements spread across the
/// week instead of piling onto the front of the grid.
pub fn find_best_placement(
    ctx: &SolveContext,
    state: &ScheduleState,
    class: &ClassId,
    subject: &SubjectId,
    teacher: &TeacherId,
    rng: &mut StdRng,
) -> Option<(SlotId, RoomId)> {
    let required = ctx.problem.required_kind(subject);
    let rooms = suitable_rooms(ctx, class, required);
    if rooms.is_empty() {
        return None;
    }

    let mut slots: Vec<SlotId> = ctx.grid.slots().to_vec();
    slots.shuffle(rng);

    let mut best: Option<(SlotId, RoomId)> = None;
    let mut best_score = f64::NEG_INFINITY;

    for slot in &slots {
        for room_id in &rooms {
            // A lab-kind room already holding a lab this slot is out
            let is_lab_room = ctx
                .problem
                .room(room_id)
                .map(|room| room.kind == RoomKind::Lab)
                .unwrap_or(false);
            if is_lab_room && state.lab_slot_taken(slot) {
                continue;
            }

            if !state.admissible(ctx, class, subject, teacher, room_id, slot) {
                continue;
            }

            let score = score_candidate(
                ctx,
                state,
                class,
                subject,
                teacher,
                room_id,
                slot,
                ctx.problem.consecutive_preferred,
            );
            if score > best_score {
                best_score = score;
                best = Some((slot.clone(), room_id.clone()));
            }
        }
    }

    best
}
