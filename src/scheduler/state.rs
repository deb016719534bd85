use super::SolveContext;
use crate::error::TimetableError;
use crate::types::{
    AssignmentEntry, ClassId, RoomId, RoomKind, ScheduleGrid, SlotId, SubjectId, TeacherId,
};
use std::collections::{HashMap, HashSet};

/// Mutable scheduling state: the primary assignment map plus the secondary
/// indexes kept synchronized with it.
///
/// Every index is a function of the assignment map; `try_place` and
/// `unplace` are the only mutation paths and update all of them together.
/// Empty sub-containers are removed on unplacement so a place/unplace cycle
/// restores the state bit-for-bit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleState {
    /// Primary map: class -> slot -> committed assignment
    assignments: HashMap<ClassId, HashMap<SlotId, AssignmentEntry>>,
    teacher_bookings: HashMap<TeacherId, HashSet<SlotId>>,
    class_bookings: HashMap<ClassId, HashSet<SlotId>>,
    room_bookings: HashMap<RoomId, HashSet<SlotId>>,
    /// teacher -> day tag -> assignments that day
    teacher_daily_load: HashMap<TeacherId, HashMap<String, u32>>,
    /// class -> subject -> slots holding a session of that subject
    subject_slots: HashMap<ClassId, HashMap<SubjectId, Vec<SlotId>>>,
    scheduled_counts: HashMap<ClassId, HashMap<SubjectId, u32>>,
    /// slot -> lab-kind rooms occupied by a lab session
    lab_room_bookings: HashMap<SlotId, HashSet<RoomId>>,
    /// class -> sum of scheduled/required ratios over its subjects
    progress: HashMap<ClassId, f64>,
}

impl ScheduleState {
    pub fn new(ctx: &SolveContext) -> Self {
        let mut state = Self::default();
        for class in &ctx.problem.classes {
            state.progress.insert(class.clone(), 0.0);
        }
        state
    }

    /// Check whether a candidate placement keeps every hard constraint
    /// satisfied, without mutating anything.
    pub fn admissible(
        &self,
        ctx: &SolveContext,
        class: &ClassId,
        subject: &SubjectId,
        teacher: &TeacherId,
        room_id: &RoomId,
        slot: &SlotId,
    ) -> bool {
        let Some(room) = ctx.problem.room(room_id) else {
            return false;
        };
        let Some(class_size) = ctx.problem.class_size(class) else {
            return false;
        };

        // Slot must be free for the teacher, class and room
        if self.slot_booked(&self.teacher_bookings, teacher, slot)
            || self.slot_booked(&self.class_bookings, class, slot)
            || self.slot_booked(&self.room_bookings, room_id, slot)
        {
            return false;
        }

        if !ctx.problem.is_qualified(teacher, subject) {
            return false;
        }

        if !room.fits(class_size) {
            return false;
        }

        if !room.kind.suits(ctx.problem.required_kind(subject)) {
            return false;
        }

        if subject.is_lab() {
            // One lab session per slot across the lab-room inventory
            if room.kind == RoomKind::Lab && self.lab_slot_taken(slot) {
                return false;
            }
            // At least one theory session of the base subject must already
            // sit at a strictly smaller slot index
            let Some(slot_idx) = ctx.grid.index_of(slot) else {
                return false;
            };
            let base = subject.base();
            let has_earlier_theory = self
                .subject_slot_list(class, &base)
                .iter()
                .filter_map(|placed| ctx.grid.index_of(placed))
                .any(|placed_idx| placed_idx < slot_idx);
            if !has_earlier_theory {
                return false;
            }
        }

        self.teacher_day_load(teacher, slot.day_tag()) < ctx.daily_load_cap()
    }

    /// Commit an assignment if it is admissible; no change on failure.
    pub fn try_place(
        &mut self,
        ctx: &SolveContext,
        class: &ClassId,
        subject: &SubjectId,
        teacher: &TeacherId,
        room_id: &RoomId,
        slot: &SlotId,
    ) -> bool {
        if !self.admissible(ctx, class, subject, teacher, room_id, slot) {
            return false;
        }

        self.assignments.entry(class.clone()).or_default().insert(
            slot.clone(),
            AssignmentEntry {
                subject: subject.clone(),
                teacher: teacher.clone(),
                room: room_id.clone(),
            },
        );

        self.teacher_bookings
            .entry(teacher.clone())
            .or_default()
            .insert(slot.clone());
        self.class_bookings
            .entry(class.clone())
            .or_default()
            .insert(slot.clone());
        self.room_bookings
            .entry(room_id.clone())
            .or_default()
            .insert(slot.clone());

        *self
            .teacher_daily_load
            .entry(teacher.clone())
            .or_default()
            .entry(slot.day_tag().to_string())
            .or_insert(0) += 1;

        self.subject_slots
            .entry(class.clone())
            .or_default()
            .entry(subject.clone())
            .or_default()
            .push(slot.clone());

        *self
            .scheduled_counts
            .entry(class.clone())
            .or_default()
            .entry(subject.clone())
            .or_insert(0) += 1;

        let is_lab_room = ctx
            .problem
            .room(room_id)
            .map(|room| room.kind == RoomKind::Lab)
            .unwrap_or(false);
        if subject.is_lab() && is_lab_room {
            self.lab_room_bookings
                .entry(slot.clone())
                .or_default()
                .insert(room_id.clone());
        }

        self.recompute_progress(ctx, class);
        true
    }

    /// Remove the assignment at (class, slot) and reverse every index update.
    pub fn unplace(
        &mut self,
        ctx: &SolveContext,
        class: &ClassId,
        slot: &SlotId,
    ) -> Result<AssignmentEntry, TimetableError> {
        let entry = self
            .assignments
            .get_mut(class)
            .and_then(|row| row.remove(slot))
            .ok_or_else(|| TimetableError::NoAssignment {
                class: class.clone(),
                slot: slot.clone(),
            })?;
        if self.assignments.get(class).is_some_and(HashMap::is_empty) {
            self.assignments.remove(class);
        }

        Self::discard(&mut self.teacher_bookings, &entry.teacher, slot);
        Self::discard(&mut self.class_bookings, class, slot);
        Self::discard(&mut self.room_bookings, &entry.room, slot);

        let day = slot.day_tag().to_string();
        if let Some(per_day) = self.teacher_daily_load.get_mut(&entry.teacher) {
            if let Some(load) = per_day.get_mut(&day) {
                *load -= 1;
                if *load == 0 {
                    per_day.remove(&day);
                }
            }
            if per_day.is_empty() {
                self.teacher_daily_load.remove(&entry.teacher);
            }
        }

        if let Some(per_subject) = self.subject_slots.get_mut(class) {
            if let Some(slots) = per_subject.get_mut(&entry.subject) {
                slots.retain(|s| s != slot);
                if slots.is_empty() {
                    per_subject.remove(&entry.subject);
                }
            }
            if per_subject.is_empty() {
                self.subject_slots.remove(class);
            }
        }

        if let Some(counts) = self.scheduled_counts.get_mut(class) {
            if let Some(count) = counts.get_mut(&entry.subject) {
                *count -= 1;
                if *count == 0 {
                    counts.remove(&entry.subject);
                }
            }
            if counts.is_empty() {
                self.scheduled_counts.remove(class);
            }
        }

        if let Some(rooms) = self.lab_room_bookings.get_mut(slot) {
            rooms.remove(&entry.room);
            if rooms.is_empty() {
                self.lab_room_bookings.remove(slot);
            }
        }

        self.recompute_progress(ctx, class);
        Ok(entry)
    }

    /// Opaque deep copy for the Repair pass
    pub fn snapshot(&self) -> ScheduleState {
        self.clone()
    }

    pub fn restore(&mut self, snapshot: ScheduleState) {
        *self = snapshot;
    }

    pub fn assignment(&self, class: &ClassId, slot: &SlotId) -> Option<&AssignmentEntry> {
        self.assignments.get(class).and_then(|row| row.get(slot))
    }

    /// Slots currently holding an assignment for a class, in grid order
    pub fn class_slots(&self, ctx: &SolveContext, class: &ClassId) -> Vec<SlotId> {
        let mut slots: Vec<SlotId> = self
            .assignments
            .get(class)
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();
        slots.sort_by_key(|slot| ctx.grid.index_of(slot));
        slots
    }

    pub fn scheduled_count(&self, class: &ClassId, subject: &SubjectId) -> u32 {
        self.scheduled_counts
            .get(class)
            .and_then(|counts| counts.get(subject))
            .copied()
            .unwrap_or(0)
    }

    pub fn subject_slot_list(&self, class: &ClassId, subject: &SubjectId) -> &[SlotId] {
        self.subject_slots
            .get(class)
            .and_then(|per_subject| per_subject.get(subject))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn teacher_day_load(&self, teacher: &TeacherId, day: &str) -> u32 {
        self.teacher_daily_load
            .get(teacher)
            .and_then(|per_day| per_day.get(day))
            .copied()
            .unwrap_or(0)
    }

    /// Total assignments across the teacher's week
    pub fn teacher_total_load(&self, teacher: &TeacherId) -> u32 {
        self.teacher_daily_load
            .get(teacher)
            .map(|per_day| per_day.values().sum())
            .unwrap_or(0)
    }

    /// Slots the teacher already holds
    pub fn teacher_booked_slots(&self, teacher: &TeacherId) -> usize {
        self.teacher_bookings
            .get(teacher)
            .map(HashSet::len)
            .unwrap_or(0)
    }

    pub fn lab_slot_taken(&self, slot: &SlotId) -> bool {
        self.lab_room_bookings
            .get(slot)
            .map(|rooms| !rooms.is_empty())
            .unwrap_or(false)
    }

    pub fn progress(&self, class: &ClassId) -> f64 {
        self.progress.get(class).copied().unwrap_or(0.0)
    }

    pub fn is_class_complete(&self, ctx: &SolveContext, class: &ClassId) -> bool {
        ctx.bag(class)
            .subjects()
            .iter()
            .all(|subject| self.scheduled_count(class, subject) >= ctx.required(class, subject))
    }

    /// Export the per-class weekly grid, empty cells as `None`
    pub fn to_grid(&self, ctx: &SolveContext) -> ScheduleGrid {
        ctx.problem
            .classes
            .iter()
            .map(|class| {
                let row = ctx
                    .grid
                    .slots()
                    .iter()
                    .map(|slot| (slot.clone(), self.assignment(class, slot).cloned()))
                    .collect();
                (class.clone(), row)
            })
            .collect()
    }

    fn slot_booked<K: std::hash::Hash + Eq>(
        &self,
        bookings: &HashMap<K, HashSet<SlotId>>,
        key: &K,
        slot: &SlotId,
    ) -> bool {
        bookings
            .get(key)
            .map(|slots| slots.contains(slot))
            .unwrap_or(false)
    }

    fn discard<K: std::hash::Hash + Eq>(
        bookings: &mut HashMap<K, HashSet<SlotId>>,
        key: &K,
        slot: &SlotId,
    ) where
        K: Clone,
    {
        if let Some(slots) = bookings.get_mut(key) {
            slots.remove(slot);
            if slots.is_empty() {
                bookings.remove(key);
            }
        }
    }

    fn recompute_progress(&mut self, ctx: &SolveContext, class: &ClassId) {
        let bag = ctx.bag(class);
        let ratio: f64 = bag
            .subjects()
            .iter()
            .map(|subject| {
                let required = bag.required(subject);
                if required == 0 {
                    0.0
                } else {
                    self.scheduled_count(class, subject) as f64 / required as f64
                }
            })
            .sum();
        self.progress.insert(class.clone(), ratio);
    }
}
