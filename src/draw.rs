// Debug window for the label image.
// Visual effects provided here:
// 1) A window that shows the label buffer through a palette.
// 2) Optional outlines around every sprite's bounding box.

use crate::buffer::LabelBuffer;
use crate::error::Error;
use crate::palette::Palette;
use crate::sprites::SpriteEntry;
use crate::types::{BoundingBox, FrameBuffer};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

pub struct LabelViewer {
    window: Window,      // the on-screen window you see
    title: String,
    screen: FrameBuffer, // palette image, reused every frame
}

impl LabelViewer {
    /// Create a window sized to the label buffer.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = open_window(title, width, height)?;
        Ok(Self { window, title: title.to_string(), screen: FrameBuffer::new(width, height) })
    }

    /// Colorize the labels and push them to the screen.
    /// The window is reopened when the buffer resolution changed.
    pub fn present(
        &mut self,
        labels: &LabelBuffer,
        palette: &Palette,
        boxes: Option<&[SpriteEntry]>,
    ) -> Result<(), Error> {
        let (w, h) = (labels.width() as usize, labels.height() as usize);
        if w != self.screen.width || h != self.screen.height {
            self.window = open_window(&self.title, w, h)?;
            self.screen = FrameBuffer::new(w, h);
        }

        colorize(labels, palette, &mut self.screen);
        if let Some(sprites) = boxes {
            for sprite in sprites.iter().filter(|s| s.point_count > 0) {
                // outline in the inverted label color so it shows on its own fill
                let color = !palette.color(sprite.label) & 0x00FF_FFFF;
                draw_rect(&mut self.screen, &sprite.bbox, color);
            }
        }

        self.window
            .update_with_buffer(&self.screen.pixels, self.screen.width, self.screen.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    // palette toggle
    pub fn c_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::C, KeyRepeat::No)
    }

    // bounding box toggle
    pub fn b_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::B, KeyRepeat::No)
    }

    // export PNG + JSON
    pub fn e_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::E, KeyRepeat::No)
    }
}

fn open_window(title: &str, width: usize, height: usize) -> Result<Window, Error> {
    Window::new(title, width, height, WindowOptions::default())
        .map_err(|e| Error::WindowInit(e.to_string()))
}

/// Map every label byte through the palette into `fb`.
pub fn colorize(labels: &LabelBuffer, palette: &Palette, fb: &mut FrameBuffer) {
    for (dst, &label) in fb.pixels.iter_mut().zip(labels.as_bytes()) {
        *dst = palette.color(label);
    }
}

/* ---------- Software drawing: pixels, rectangle outline ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: u32, y: u32, color: u32) {
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw the 1-pixel outline of `bbox`.
pub fn draw_rect(fb: &mut FrameBuffer, bbox: &BoundingBox, color: u32) {
    if bbox.is_empty() {
        return;
    }
    for x in bbox.min_x..=bbox.max_x {
        put_pixel(fb, x, bbox.min_y, color);
        put_pixel(fb, x, bbox.max_y, color);
    }
    for y in bbox.min_y..=bbox.max_y {
        put_pixel(fb, bbox.min_x, y, color);
        put_pixel(fb, bbox.max_x, y, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colorize_maps_each_cell() {
        let mut labels = LabelBuffer::new(2, 2).unwrap();
        labels.write(1, 0, 9);
        let mut fb = FrameBuffer::new(2, 2);
        colorize(&labels, &Palette::grayscale(), &mut fb);
        assert_eq!(fb.pixels, vec![0, 0x0009_0909, 0, 0]);
    }

    #[test]
    fn rect_outline_leaves_inside_untouched() {
        let mut fb = FrameBuffer::new(5, 5);
        let bbox = BoundingBox { min_x: 1, max_x: 3, min_y: 1, max_y: 3 };
        draw_rect(&mut fb, &bbox, 7);
        assert_eq!(fb.pixels[5 + 1], 7);
        assert_eq!(fb.pixels[3 * 5 + 3], 7);
        assert_eq!(fb.pixels[2 * 5 + 2], 0);
        assert_eq!(fb.pixels[0], 0);
        assert_eq!(fb.pixels.iter().filter(|&&p| p == 7).count(), 8);
    }

    #[test]
    fn empty_rect_draws_nothing() {
        let mut fb = FrameBuffer::new(3, 3);
        draw_rect(&mut fb, &BoundingBox::EMPTY, 1);
        assert!(fb.pixels.iter().all(|&p| p == 0));
    }
}
