//! Core types for Showtrack

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::Record;

/// A show being tracked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Show {
    /// Store-assigned identifier, never reused
    pub id: u64,
    /// Show title
    pub name: String,
    /// Number of episodes watched so far
    pub episodes_seen: i64,
}

/// Fields needed to create a show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewShow {
    pub name: String,
    pub episodes_seen: i64,
}

/// Partial update for a show
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowPatch {
    pub name: Option<String>,
    pub episodes_seen: Option<i64>,
}

impl Record for Show {
    const COLLECTION: &'static str = "shows";
    const ENTITY: &'static str = "show";

    type Draft = NewShow;
    type Patch = ShowPatch;

    fn from_draft(id: u64, draft: NewShow) -> Self {
        Self {
            id,
            name: draft.name,
            episodes_seen: draft.episodes_seen,
        }
    }

    fn id(&self) -> u64 {
        self.id
    }

    fn apply(&mut self, patch: ShowPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(episodes_seen) = patch.episodes_seen {
            self.episodes_seen = episodes_seen;
        }
    }
}
