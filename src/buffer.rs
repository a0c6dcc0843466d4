// The label image: one byte per screen pixel, row-major.
// Visual: each byte says what occupies that pixel (see `label`).

use crate::error::{Error, Result};
use tracing::debug;

pub struct LabelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>, // length = width * height, always
    locked: bool,    // advisory only; writes are never refused here
}

impl LabelBuffer {
    /// Allocate a buffer cleared to background.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        check_resolution(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize],
            locked: false,
        })
    }

    /// Reallocate when the resolution changed; old contents are discarded.
    /// Returns true when a reallocation happened.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<bool> {
        check_resolution(width, height)?;
        if width == self.width && height == self.height {
            return Ok(false);
        }
        debug!(from_w = self.width, from_h = self.height, width, height, "label buffer resized");
        self.width = width;
        self.height = height;
        self.pixels = vec![0u8; width as usize * height as usize];
        Ok(true)
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: u8) {
        self.pixels.fill(value);
    }

    /// Out-of-bounds writes happen at clipped edges; they are dropped.
    #[inline]
    pub fn write(&mut self, x: u32, y: u32, label: u8) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.pixels[idx] = label;
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn read(&self, x: u32, y: u32) -> Option<u8> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Flat `width * height` grid for the frame consumer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

fn check_resolution(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::ZeroResolution { width, height });
    }
    Ok(())
}
