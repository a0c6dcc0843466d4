// Per-frame sprite bookkeeping.
//
// Every drawable sprite the rasterizer is about to draw gets one
// `SpriteEntry`. Labels are handed out lazily, the first time a sprite
// becomes the active paint target, so sprites that end up fully occluded
// never consume a label value.

use crate::actors::ActorRegistry;
use crate::label::{BACKGROUND, LAST_SPRITE_LABEL, SEGMENT_LABELS, WEAPON};
use crate::types::{ActorHandle, BoundingBox, SpriteHandle};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{trace, warn};

/// One drawable instance for the current frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpriteEntry {
    pub handle: SpriteHandle,
    /// 0 for the weapon sprite.
    pub actor_id: u32,
    /// Background until `labeled` is set.
    pub label: u8,
    pub is_weapon: bool,
    pub labeled: bool,
    pub bbox: BoundingBox,
    pub point_count: u32,
}

impl SpriteEntry {
    fn new(handle: SpriteHandle, actor_id: u32, is_weapon: bool) -> Self {
        Self {
            handle,
            actor_id,
            label: BACKGROUND,
            is_weapon,
            labeled: false,
            bbox: BoundingBox::EMPTY,
            point_count: 0,
        }
    }

    /// Count one painted pixel.
    #[inline]
    pub fn record_point(&mut self, x: u32, y: u32) {
        self.bbox.widen(x, y);
        self.point_count += 1;
    }
}

pub struct SpriteRegistry {
    entries: Vec<SpriteEntry>,
    by_handle: HashMap<SpriteHandle, usize>,
    weapon: Option<usize>,
    last_label: u8, // last sprite label handed out this frame
    exhausted: bool,
}

impl Default for SpriteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            by_handle: HashMap::new(),
            weapon: None,
            last_label: SEGMENT_LABELS,
            exhausted: false,
        }
    }

    /// Add an ordinary sprite; a handle already seen this frame is left alone.
    pub fn register_sprite(
        &mut self,
        handle: SpriteHandle,
        actor: ActorHandle,
        actors: &mut ActorRegistry,
    ) -> usize {
        if let Some(&idx) = self.by_handle.get(&handle) {
            return idx;
        }
        let actor_id = actors.identity_of(actor);
        let idx = self.push(SpriteEntry::new(handle, actor_id, false));
        trace!(?handle, actor_id, idx, "sprite registered");
        idx
    }

    /// The weapon sprite is a singleton: later calls only rebind its drawable.
    pub fn register_weapon_sprite(&mut self, handle: SpriteHandle) -> usize {
        let Some(idx) = self.weapon else {
            let idx = self.push(SpriteEntry::new(handle, 0, true));
            self.weapon = Some(idx);
            trace!(?handle, idx, "weapon sprite registered");
            return idx;
        };

        let previous = self.entries[idx].handle;
        if previous != handle {
            if self.by_handle.get(&previous) == Some(&idx) {
                self.by_handle.remove(&previous);
            }
            let displaced = self.by_handle.insert(handle, idx);
            debug_assert!(
                displaced.is_none_or(|other| other == idx),
                "weapon sprite rebound onto a handle owned by another sprite"
            );
            self.entries[idx].handle = handle;
        }
        idx
    }

    fn push(&mut self, entry: SpriteEntry) -> usize {
        let idx = self.entries.len();
        self.by_handle.insert(entry.handle, idx);
        self.entries.push(entry);
        idx
    }

    pub fn find(&self, handle: SpriteHandle) -> Option<usize> {
        self.by_handle.get(&handle).copied()
    }

    /// Label of entry `idx`, assigning one on first use. Unknown index → background.
    pub fn label_for(&mut self, idx: usize) -> u8 {
        let Some(entry) = self.entries.get(idx) else {
            return BACKGROUND;
        };
        if entry.labeled {
            return entry.label;
        }

        let label = if entry.is_weapon {
            WEAPON
        } else if self.last_label < LAST_SPRITE_LABEL {
            self.last_label += 1;
            self.last_label
        } else {
            if !self.exhausted {
                warn!(
                    sprites = self.entries.len(),
                    "sprite label space exhausted, further sprites carry no label"
                );
                self.exhausted = true;
            }
            BACKGROUND
        };

        let entry = &mut self.entries[idx];
        entry.label = label;
        entry.labeled = true;
        label
    }

    /// Label for the sprite bound to `handle`, or background if none is.
    pub fn label_of(&mut self, handle: SpriteHandle) -> u8 {
        match self.find(handle) {
            Some(idx) => self.label_for(idx),
            None => BACKGROUND,
        }
    }

    pub fn get(&self, idx: usize) -> Option<&SpriteEntry> {
        self.entries.get(idx)
    }

    pub(crate) fn get_mut(&mut self, idx: usize) -> Option<&mut SpriteEntry> {
        self.entries.get_mut(idx)
    }

    pub fn weapon(&self) -> Option<&SpriteEntry> {
        self.weapon.map(|idx| &self.entries[idx])
    }

    pub fn entries(&self) -> &[SpriteEntry] {
        &self.entries
    }

    /// Owned copy for the frame consumer.
    pub fn snapshot(&self) -> Vec<SpriteEntry> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Frame boundary: forget every entry and restart the label counter.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.by_handle.clear();
        self.weapon = None;
        self.last_label = SEGMENT_LABELS;
        self.exhausted = false;
    }
}
