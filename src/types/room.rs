use serde::{Deserialize, Serialize};

/// Kind of room a session requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Theory,
    Lab,
}

/// Kind of a physical room; flex rooms host any session kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomKind {
    Theory,
    Lab,
    Flex,
}

impl RoomKind {
    /// Check whether a room of this kind can host a session of the required kind
    pub fn suits(&self, required: SessionKind) -> bool {
        match self {
            RoomKind::Flex => true,
            RoomKind::Theory => required == SessionKind::Theory,
            RoomKind::Lab => required == SessionKind::Lab,
        }
    }
}

/// Capacity and kind of a room in the inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub capacity: u32,
    #[serde(rename = "type")]
    pub kind: RoomKind,
}

impl RoomSpec {
    /// Check whether the room holds a class of the given size
    pub fn fits(&self, class_size: u32) -> bool {
        self.capacity >= class_size
    }
}
