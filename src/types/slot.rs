use super::SlotId;
use std::collections::HashMap;

/// The weekly grid of time slots in declared order.
///
/// Slot labels are order-significant: the lab-before-theory rule and the
/// consecutiveness preference both compare positions in this sequence.
#[derive(Debug, Clone)]
pub struct TimeGrid {
    slots: Vec<SlotId>,
    index: HashMap<SlotId, usize>,
}

impl TimeGrid {
    pub fn new(slots: &[SlotId]) -> Self {
        let index = slots
            .iter()
            .enumerate()
            .map(|(idx, slot)| (slot.clone(), idx))
            .collect();
        Self {
            slots: slots.to_vec(),
            index,
        }
    }

    /// Slots in declared order
    pub fn slots(&self) -> &[SlotId] {
        &self.slots
    }

    /// Position of a slot in the declared order
    pub fn index_of(&self, slot: &SlotId) -> Option<usize> {
        self.index.get(slot).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
