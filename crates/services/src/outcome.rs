use serde::Serialize;

/// Result of a delete request.
///
/// Deleting an id that is not stored is not an error; callers decide whether
/// to mention it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    Removed,
    NotFound,
}

impl DeleteOutcome {
    #[must_use]
    pub fn from_removed(removed: bool) -> Self {
        if removed { Self::Removed } else { Self::NotFound }
    }

    #[must_use]
    pub fn is_removed(self) -> bool {
        matches!(self, Self::Removed)
    }
}
