use super::{find_best_placement, qualified_teachers, ScheduleState, SolveContext};
use crate::types::{ClassId, SubjectId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Best-effort local repair: evict up to `max_evictions` of the class's own
/// assignments to make room for a stuck target subject, then reseat every
/// evictee.
///
/// Either the target and all evictees end up placed (commit), or the state
/// is restored from the snapshot taken on entry. The state is never left
/// half-repaired.
pub fn evict_and_reinsert(
    ctx: &SolveContext,
    state: &mut ScheduleState,
    class: &ClassId,
    target: &SubjectId,
    rng: &mut StdRng,
    max_evictions: usize,
) -> bool {
    let snapshot = state.snapshot();

    let mut candidate_slots = state.class_slots(ctx, class);
    candidate_slots.shuffle(rng);

    let mut evicted: Vec<SubjectId> = Vec::new();

    for slot in candidate_slots.into_iter().take(max_evictions) {
        let Some(entry) = state.assignment(class, &slot) else {
            continue;
        };
        // Prefer moving theory sessions; a lab only makes way for a lab
        if entry.subject.is_lab() && !target.is_lab() {
            continue;
        }

        let Ok(removed) = state.unplace(ctx, class, &slot) else {
            continue;
        };
        evicted.push(removed.subject);

        if !place_anywhere(ctx, state, class, target, rng) {
            // Target still stuck: keep the eviction and widen the hole
            continue;
        }

        let all_reseated = evicted
            .iter()
            .all(|moved| place_anywhere(ctx, state, class, moved, rng));
        if all_reseated {
            return true;
        }

        state.restore(snapshot);
        return false;
    }

    state.restore(snapshot);
    false
}

/// Place one session of a subject with any qualified teacher
fn place_anywhere(
    ctx: &SolveContext,
    state: &mut ScheduleState,
    class: &ClassId,
    subject: &SubjectId,
    rng: &mut StdRng,
) -> bool {
    for teacher in qualified_teachers(ctx, state, subject) {
        if let Some((slot, room)) = find_best_placement(ctx, state, class, subject, &teacher, rng) {
            if state.try_place(ctx, class, subject, &teacher, &room, &slot) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Problem, RoomId, RoomKind, RoomSpec, SlotId, TeacherId};
    use rand::SeedableRng;
    use std::collections::BTreeMap;

    fn subject(name: &str) -> SubjectId {
        SubjectId(name.to_string())
    }

    fn slot(name: &str) -> SlotId {
        SlotId(name.to_string())
    }

    fn fixture() -> Problem {
        Problem {
            teachers: vec![TeacherId("T1".to_string()), TeacherId("T2".to_string())],
            classes: vec![ClassId("C".to_string())],
            subjects: vec![subject("A"), subject("B")],
            rooms: [(
                RoomId("R".to_string()),
                RoomSpec {
                    capacity: 30,
                    kind: RoomKind::Theory,
                },
            )]
            .into_iter()
            .collect(),
            time_slots: vec![slot("Mon-1"), slot("Mon-2"), slot("Tue-1")],
            subject_credits: [(subject("A"), 2), (subject("B"), 1)].into_iter().collect(),
            teacher_qualifications: [
                (
                    TeacherId("T1".to_string()),
                    [subject("A")].into_iter().collect(),
                ),
                (
                    TeacherId("T2".to_string()),
                    [subject("A"), subject("B")].into_iter().collect(),
                ),
            ]
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
    fn test_failed_repair_restores_state() {
        let problem = fixture();
        let ctx = SolveContext::new(&problem);
        let mut state = ScheduleState::new(&ctx);
        let c = ClassId("C".to_string());
        let mut rng = StdRng::seed_from_u64(5);

        // Fill the whole grid with A sessions by both teachers, then ask
        // repair to fit yet another A session: impossible, the class has no
        // free slot even after evictions
        assert!(state.try_place(&ctx, &c, &subject("A"), &TeacherId("T1".to_string()), &RoomId("R".to_string()), &slot("Mon-1")));
        assert!(state.try_place(&ctx, &c, &subject("A"), &TeacherId("T1".to_string()), &RoomId("R".to_string()), &slot("Mon-2")));
        assert!(state.try_place(&ctx, &c, &subject("A"), &TeacherId("T2".to_string()), &RoomId("R".to_string()), &slot("Tue-1")));
        let before = state.snapshot();

        // Every eviction frees exactly one slot; target takes it, and the
        // evictee then has nowhere to go
        let repaired = evict_and_reinsert(&ctx, &mut state, &c, &subject("A"), &mut rng, 3);

        assert!(!repaired);
        assert_eq!(state, before);
    }

    #[test]
    fn test_repair_never_needed_leaves_state_unchanged() {
        let problem = fixture();
        let ctx = SolveContext::new(&problem);
        let mut state = ScheduleState::new(&ctx);
        let c = ClassId("C".to_string());
        let mut rng = StdRng::seed_from_u64(1);

        // Empty class: nothing to evict, repair reports failure and leaves
        // the pristine state intact
        let before = state.snapshot();
        let repaired = evict_and_reinsert(&ctx, &mut state, &c, &subject("B"), &mut rng, 3);

        assert!(!repaired);
        assert_eq!(state, before);
    }

    #[test]
    fn test_repair_reseats_evictees() {
        let problem = fixture();
        let ctx = SolveContext::new(&problem);
        let mut state = ScheduleState::new(&ctx);
        let c = ClassId("C".to_string());
        let mut rng = StdRng::seed_from_u64(9);

        // Two A sessions leave one free slot; B fits there directly, but
        // force the interesting path by occupying all three slots first
        assert!(state.try_place(&ctx, &c, &subject("A"), &TeacherId("T1".to_string()), &RoomId("R".to_string()), &slot("Mon-1")));
        assert!(state.try_place(&ctx, &c, &subject("A"), &TeacherId("T1".to_string()), &RoomId("R".to_string()), &slot("Mon-2")));

        let repaired = evict_and_reinsert(&ctx, &mut state, &c, &subject("B"), &mut rng, 3);

        // One slot was still free, so the first eviction makes two holes and
        // both B and the evicted A session find a seat
        assert!(repaired);
        assert_eq!(state.scheduled_count(&c, &subject("A")), 2);
        assert_eq!(state.scheduled_count(&c, &subject("B")), 1);
    }
}
