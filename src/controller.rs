// Paint dispatch and frame lifecycle.
//
// A `LabelsController` is owned by the rendering session and handed by
// reference to whatever rasterizes. Per frame:
//
// ```text
// begin_frame ─► register_sprite / set_active_sprite / set_segment ─► paint … ─► snapshot
//      ▲                                                                         │
//      └─────────────────────────────────────────────────────────────────────────┘
// ```
//
// The rasterizer promises to register a drawable before painting it and to
// finish painting before the next `begin_frame`; nothing here checks that.

use crate::actors::ActorRegistry;
use crate::buffer::LabelBuffer;
use crate::classify::{SegmentClassifier, SegmentLabelTable};
use crate::config::LabelsConfig;
use crate::error::Result;
use crate::label::{BACKGROUND, SegmentCategory};
use crate::rasterizer::{LineSpecials, Screen, Segment, TextureLookup};
use crate::sprites::{SpriteEntry, SpriteRegistry};
use crate::types::{ActorHandle, SpriteHandle};
use tracing::debug;

/// What the next pixel write will use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaintContext {
    /// Background means no sprite label is active.
    pub sprite_label: u8,
    /// Background means the current geometry is unclassified.
    pub segment_label: u8,
    /// Entry whose bounding box grows with each paint.
    pub active_sprite: Option<usize>,
}

pub struct LabelsController {
    buffer: LabelBuffer,
    actors: ActorRegistry,
    sprites: SpriteRegistry,
    segments: SegmentLabelTable,
    classifier: SegmentClassifier,
    context: PaintContext,
    clear_value: u8,
}

impl LabelsController {
    pub fn new(width: u32, height: u32, textures: &impl TextureLookup) -> Result<Self> {
        let config = LabelsConfig { width, height, ..LabelsConfig::default() };
        Self::from_config(&config, textures)
    }

    /// Build from config; the exit sign texture is resolved here, once.
    pub fn from_config(config: &LabelsConfig, textures: &impl TextureLookup) -> Result<Self> {
        let mut buffer = LabelBuffer::new(config.width, config.height)?;
        buffer.fill(config.clear_value);
        Ok(Self {
            buffer,
            actors: ActorRegistry::new(),
            sprites: SpriteRegistry::new(),
            segments: SegmentLabelTable::new(),
            classifier: SegmentClassifier::new(textures, &config.exit_sign_texture),
            context: PaintContext::default(),
            clear_value: config.clear_value,
        })
    }

    /// Follow the display resolution. A change reallocates the buffer and
    /// drops all per-frame state.
    pub fn update_size(&mut self, screen: &impl Screen) -> Result<bool> {
        let (width, height) = screen.resolution();
        let resized = self.buffer.resize(width, height)?;
        if resized {
            self.reset_frame();
        }
        Ok(resized)
    }

    /// Resize if needed, then clear to the configured value.
    pub fn begin_frame(&mut self, screen: &impl Screen) -> Result<()> {
        self.update_size(screen)?;
        self.clear(self.clear_value);
        Ok(())
    }

    /// The frame boundary: fill the buffer and forget sprites, segment
    /// categories and the paint context. Actor ids survive.
    pub fn clear(&mut self, fill: u8) {
        if !self.sprites.is_empty() {
            debug!(
                sprites = self.sprites.len(),
                segments = self.segments.len(),
                "label frame finished"
            );
        }
        self.buffer.fill(fill);
        self.reset_frame();
    }

    fn reset_frame(&mut self) {
        self.sprites.reset();
        self.segments.clear();
        self.context = PaintContext::default();
    }

    /// Forget every actor id; numbering restarts at 1.
    pub fn clear_actors(&mut self) {
        self.actors.clear();
    }

    pub fn register_sprite(&mut self, handle: SpriteHandle, actor: ActorHandle) -> usize {
        self.sprites.register_sprite(handle, actor, &mut self.actors)
    }

    pub fn register_weapon_sprite(&mut self, handle: SpriteHandle) -> usize {
        self.sprites.register_weapon_sprite(handle)
    }

    /// Make the sprite bound to `handle` the paint target and return its label.
    /// An unknown handle leaves no sprite active.
    pub fn set_active_sprite(&mut self, handle: SpriteHandle) -> Option<u8> {
        match self.sprites.find(handle) {
            Some(idx) => {
                let label = self.sprites.label_for(idx);
                self.context.sprite_label = label;
                self.context.active_sprite = Some(idx);
                Some(label)
            }
            None => {
                self.context.sprite_label = BACKGROUND;
                self.context.active_sprite = None;
                None
            }
        }
    }

    /// No sprite is being drawn; the geometry label, if any, stays active.
    pub fn clear_active_sprite(&mut self) {
        self.context.sprite_label = BACKGROUND;
        self.context.active_sprite = None;
    }

    /// Paint with a raw label that belongs to no sprite entry.
    pub fn set_label(&mut self, label: u8) {
        self.context.sprite_label = label;
        self.context.active_sprite = None;
    }

    /// Classify `segment` and make its category the geometry label.
    /// Unclassified segments set the geometry label back to background.
    pub fn set_segment(
        &mut self,
        segment: &Segment,
        specials: &impl LineSpecials,
    ) -> Option<SegmentCategory> {
        let category = self.classifier.classify(segment, specials);
        self.context.segment_label = match category {
            Some(category) => self.segments.note(category),
            None => BACKGROUND,
        };
        category
    }

    pub fn unset_segment(&mut self) {
        self.context.segment_label = BACKGROUND;
    }

    /// Write the active label at `(x, y)`: the sprite label if one is set,
    /// else the geometry label. Pixels of an active sprite entry also grow its
    /// bounding box. Out-of-bounds pixels are dropped entirely.
    #[inline]
    pub fn paint(&mut self, x: u32, y: u32) {
        let label = if self.context.sprite_label != BACKGROUND {
            self.context.sprite_label
        } else {
            self.context.segment_label
        };
        if !self.buffer.write(x, y, label) {
            return;
        }
        if let Some(entry) = self.context.active_sprite.and_then(|idx| self.sprites.get_mut(idx)) {
            entry.record_point(x, y);
        }
    }

    /// Write the geometry label even while a sprite is active.
    #[inline]
    pub fn paint_segment(&mut self, x: u32, y: u32) {
        self.buffer.write(x, y, self.context.segment_label);
    }

    pub fn buffer(&self) -> &LabelBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut LabelBuffer {
        &mut self.buffer
    }

    pub fn sprites(&self) -> &[SpriteEntry] {
        self.sprites.entries()
    }

    pub fn snapshot(&self) -> Vec<SpriteEntry> {
        self.sprites.snapshot()
    }

    pub fn segment_labels(&self) -> &SegmentLabelTable {
        &self.segments
    }

    pub fn actors(&self) -> &ActorRegistry {
        &self.actors
    }

    pub fn context(&self) -> PaintContext {
        self.context
    }

    pub fn clear_value(&self) -> u8 {
        self.clear_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::{SEGMENT_LABELS, WEAPON};
    use crate::rasterizer::{SpecialTable, special};
    use crate::types::{BoundingBox, TextureId};
    use std::collections::HashMap;

    fn controller(w: u32, h: u32) -> LabelsController {
        let mut textures = HashMap::new();
        textures.insert("EXITSIGN".to_string(), TextureId(8));
        LabelsController::new(w, h, &textures).unwrap()
    }

    #[test]
    fn clear_resets_frame_but_keeps_actors() {
        let mut c = controller(4, 4);
        c.register_sprite(SpriteHandle(1), ActorHandle(10));
        c.register_weapon_sprite(SpriteHandle(2));
        c.set_segment(&Segment::with_special(special::EXIT_NORMAL), &SpecialTable::standard());
        c.set_active_sprite(SpriteHandle(1));
        c.paint(0, 0);

        c.clear(3);
        assert!(c.buffer().as_bytes().iter().all(|&b| b == 3));
        assert!(c.sprites().is_empty());
        assert!(c.segment_labels().is_empty());
        assert_eq!(c.context(), PaintContext::default());
        assert_eq!(c.actors().get(ActorHandle(10)), Some(1));

        // a new weapon registration creates a fresh entry
        c.register_weapon_sprite(SpriteHandle(5));
        assert_eq!(c.sprites().len(), 1);
    }

    #[test]
    fn sprite_label_beats_segment_label() {
        let mut c = controller(4, 4);
        c.register_sprite(SpriteHandle(1), ActorHandle(1));
        c.set_segment(&Segment::with_special(special::DOOR_OPEN), &SpecialTable::standard());
        c.paint(0, 0);
        assert_eq!(c.buffer().read(0, 0), Some(2));

        c.set_active_sprite(SpriteHandle(1));
        c.paint(1, 0);
        assert_eq!(c.buffer().read(1, 0), Some(SEGMENT_LABELS + 1));
    }

    #[test]
    fn unknown_sprite_paints_background_without_boxes() {
        let mut c = controller(4, 4);
        c.clear(0);
        c.register_sprite(SpriteHandle(1), ActorHandle(1));
        assert_eq!(c.set_active_sprite(SpriteHandle(99)), None);
        c.paint(2, 2);
        assert_eq!(c.buffer().read(2, 2), Some(0));
        assert_eq!(c.sprites()[0].point_count, 0);
        assert!(!c.sprites()[0].labeled);
    }

    #[test]
    fn geometry_paints_do_not_touch_boxes() {
        let mut c = controller(4, 4);
        c.register_sprite(SpriteHandle(1), ActorHandle(1));
        c.set_active_sprite(SpriteHandle(1));
        c.paint(0, 0);
        c.clear_active_sprite();
        c.set_segment(&Segment::with_special(special::ACS_EXECUTE), &SpecialTable::standard());
        c.paint(3, 3);
        assert_eq!(c.buffer().read(3, 3), Some(3));
        let entry = &c.sprites()[0];
        assert_eq!(entry.point_count, 1);
        assert_eq!(entry.bbox, BoundingBox { min_x: 0, max_x: 0, min_y: 0, max_y: 0 });
    }

    #[test]
    fn out_of_bounds_paint_is_dropped() {
        let mut c = controller(4, 4);
        c.register_sprite(SpriteHandle(1), ActorHandle(1));
        c.set_active_sprite(SpriteHandle(1));
        c.paint(4, 1);
        c.paint(1, 9);
        assert!(c.buffer().as_bytes().iter().all(|&b| b == 0));
        assert_eq!(c.sprites()[0].point_count, 0);
        assert!(c.sprites()[0].bbox.is_empty());
    }

    #[test]
    fn weapon_paints_top_label() {
        let mut c = controller(4, 4);
        c.register_weapon_sprite(SpriteHandle(7));
        assert_eq!(c.set_active_sprite(SpriteHandle(7)), Some(WEAPON));
        c.paint(3, 3);
        assert_eq!(c.buffer().read(3, 3), Some(WEAPON));
        assert_eq!(c.snapshot()[0].point_count, 1);
    }

    #[test]
    fn set_label_paints_without_entry() {
        let mut c = controller(2, 2);
        c.set_label(42);
        c.paint(1, 1);
        assert_eq!(c.buffer().read(1, 1), Some(42));
        assert!(c.sprites().is_empty());
    }

    #[test]
    fn paint_segment_ignores_sprite_context() {
        let mut c = controller(2, 2);
        c.register_sprite(SpriteHandle(1), ActorHandle(1));
        c.set_active_sprite(SpriteHandle(1));
        c.set_segment(&Segment::with_middle_texture(TextureId(8)), &SpecialTable::standard());
        c.paint_segment(0, 1);
        assert_eq!(c.buffer().read(0, 1), Some(4));
        assert_eq!(c.sprites()[0].point_count, 0);
    }

    #[test]
    fn unclassified_segment_resets_geometry_label() {
        let mut c = controller(2, 2);
        let specials = SpecialTable::standard();
        c.set_segment(&Segment::with_special(special::DOOR_CLOSE), &specials);
        assert_eq!(c.context().segment_label, 2);
        assert_eq!(c.set_segment(&Segment::default(), &specials), None);
        c.paint(0, 0);
        assert_eq!(c.buffer().read(0, 0), Some(0));
        assert_eq!(c.segment_labels().name(2), Some("Door"));
    }

    #[test]
    fn segment_label_survives_sprite_context_changes() {
        let mut c = controller(4, 1);
        let specials = SpecialTable::standard();
        c.set_segment(&Segment::with_special(special::EXIT_NORMAL), &specials);
        c.paint(0, 0);

        assert_eq!(c.set_active_sprite(SpriteHandle(99)), None);
        assert_eq!(c.context().segment_label, 1);
        c.paint(1, 0);

        c.set_segment(&Segment::with_special(special::EXIT_NORMAL), &specials);
        c.clear_active_sprite();
        assert_eq!(c.context().segment_label, 1);
        c.paint(2, 0);

        assert_eq!(c.buffer().as_bytes(), &[1, 1, 1, 0]);

        c.unset_segment();
        c.paint(3, 0);
        assert_eq!(c.buffer().read(3, 0), Some(0));
    }

    #[test]
    fn resolution_change_reallocates_and_resets() {
        let mut c = controller(4, 4);
        c.register_sprite(SpriteHandle(1), ActorHandle(1));
        c.set_active_sprite(SpriteHandle(1));
        c.paint(1, 1);

        assert!(!c.update_size(&(4, 4)).unwrap());
        assert_eq!(c.sprites().len(), 1);

        assert!(c.update_size(&(8, 8)).unwrap());
        assert_eq!(c.buffer().len(), 64);
        assert!(c.sprites().is_empty());
        assert_eq!(c.context(), PaintContext::default());
        assert!(c.update_size(&(0, 8)).is_err());
    }

    #[test]
    fn begin_frame_uses_configured_clear_value() {
        let config = LabelsConfig { width: 3, height: 3, clear_value: 9, ..LabelsConfig::default() };
        let mut c = LabelsController::from_config(&config, &HashMap::<String, TextureId>::new()).unwrap();
        assert!(c.buffer().as_bytes().iter().all(|&b| b == 9));
        c.buffer_mut().write(0, 0, 1);
        c.begin_frame(&(3, 3)).unwrap();
        assert_eq!(c.buffer().read(0, 0), Some(9));
        assert_eq!(c.clear_value(), 9);
    }
}
