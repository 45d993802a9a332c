//! Record lifecycle (soft delete)

use chrono::{DateTime, Utc};

/// Deleted records keep their row as a tombstone and are invisible to
/// every normal query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Active,
    Deleted { at: DateTime<Utc> },
}

impl Lifecycle {
    pub fn is_active(&self) -> bool {
        matches!(self, Lifecycle::Active)
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Lifecycle::Active => None,
            Lifecycle::Deleted { at } => Some(*at),
        }
    }

    /// Build from the nullable `deleted_at` column
    pub fn from_db(deleted_at: Option<DateTime<Utc>>) -> Self {
        deleted_at.map_or(Lifecycle::Active, |at| Lifecycle::Deleted { at })
    }
}
