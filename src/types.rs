// Core types shared by the registries, the controller and the viewer.

use serde::Serialize;

/// Identity of a dynamic object, assigned by whoever owns object lifetime.
/// Two sprites carrying the same handle belong to the same logical actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActorHandle(pub u64);

/// Identity of one visible-sprite record inside the rasterizer for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SpriteHandle(pub u64);

/// Stable numeric id of a texture, as resolved by the texture manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TextureId(pub u32);

/// Minimal rectangle covering every pixel painted for one sprite this frame.
/// Starts "empty" (min above max) and grows with `widen`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
}

impl BoundingBox {
    pub const EMPTY: BoundingBox = BoundingBox {
        min_x: u32::MAX,
        max_x: 0,
        min_y: u32::MAX,
        max_y: 0,
    };

    #[inline]
    pub fn widen(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn width(&self) -> u32 {
        if self.is_empty() { 0 } else { self.max_x - self.min_x + 1 }
    }

    pub fn height(&self) -> u32 {
        if self.is_empty() { 0 } else { self.max_y - self.min_y + 1 }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// RGB image the viewer pushes to the window.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}
