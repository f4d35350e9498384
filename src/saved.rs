use std::collections::BTreeSet;

use uuid::Uuid;

use crate::models::SaveEvent;

/// Story ids an account has saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedSet {
    ids: BTreeSet<i64>,
}

impl SavedSet {
    /// Builds the set from `account_id`'s rows, ignoring any other account's.
    pub fn from_events(account_id: Uuid, events: &[SaveEvent]) -> Self {
        Self {
            ids: events
                .iter()
                .filter(|event| event.account_id == account_id)
                .map(|event| event.story_id)
                .collect(),
        }
    }

    /// Flips the saved state of `story_id` and returns whether it is now saved.
    pub fn toggle(&mut self, story_id: i64) -> bool {
        if self.ids.remove(&story_id) {
            false
        } else {
            self.ids.insert(story_id);
            true
        }
    }

    pub fn is_saved(&self, story_id: i64) -> bool {
        self.ids.contains(&story_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}
