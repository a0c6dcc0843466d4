// Stable numeric ids for dynamic objects.
// Survives frame clears; only `clear` forgets an actor.

use crate::types::ActorHandle;
use std::collections::HashMap;
use tracing::debug;

#[derive(Default)]
pub struct ActorRegistry {
    ids: HashMap<ActorHandle, u32>,
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `handle`, allocating the next one (starting at 1) on first sight.
    pub fn identity_of(&mut self, handle: ActorHandle) -> u32 {
        let next = self.ids.len() as u32 + 1;
        *self.ids.entry(handle).or_insert(next)
    }

    pub fn get(&self, handle: ActorHandle) -> Option<u32> {
        self.ids.get(&handle).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        debug!(actors = self.ids.len(), "actor identities cleared");
        self.ids.clear();
    }
}
