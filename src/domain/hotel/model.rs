//! Hotel domain entity

/// Persisted hotel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotel {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub description: Option<String>,
}

/// Caller-supplied hotel fields, used for both creation and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelDraft {
    pub name: String,
    pub address: String,
    pub description: Option<String>,
}

impl Hotel {
    /// Overwrite the mutable fields, keeping the identity.
    pub fn apply(&mut self, draft: HotelDraft) {
        self.name = draft.name;
        self.address = draft.address;
        self.description = draft.description;
    }
}
