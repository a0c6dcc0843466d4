// A stand-in rasterizer for the demo binary.
// Visual outcomes:
// - A row of wall segments across the middle: exit, locked door, switch,
//   exit sign, and a plain wall that stays background.
// - Actors wander around in front of the walls and bounce off the edges.
// - The weapon sprite sits at the bottom centre and bobs.
//
// It draws in painter's order (walls, far actors, near actors, weapon), calling
// the labels controller exactly the way a real rasterizer would.

use crate::controller::LabelsController;
use crate::rasterizer::{LineSpecials, Segment, special};
use crate::types::{ActorHandle, SpriteHandle, TextureId};
use std::collections::HashMap;

pub const EXIT_SIGN: TextureId = TextureId(1);
const PLAIN_WALL: TextureId = TextureId(2);

// ----------------------------- tiny RNG (no external crate) -----------------------------

/// Deterministic xorshift32 RNG.
/// Visual: controls actor start positions and velocities.
#[derive(Clone)]
struct Rng32 { state: u32 }

impl Rng32 {
    fn from_seed(seed: u32) -> Self { Self { state: seed | 1 } }
    #[inline] fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
    #[inline] fn next_f32(&mut self) -> f32 {
        // Uniform [0,1)
        (self.next_u32() >> 8) as f32 / ((1u32 << 24) as f32)
    }
    #[inline] fn range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_f32()
    }
}

// ----------------------------- scene content --------------------------------

struct Walker {
    actor: ActorHandle,
    x: f32, y: f32,   // centre, screen pixels
    vx: f32, vy: f32, // pixels per second
    depth: f32,       // 0 = near, 1 = far; sets size and draw order
}

struct Wall {
    x0: f32, x1: f32, // fraction of screen width
    segment: Segment,
}

pub struct Scene {
    walkers: Vec<Walker>,
    walls: Vec<Wall>,
    time: f32,
}

impl Scene {
    pub fn new(width: u32, height: u32, actors: usize, seed: u32) -> Self {
        let mut rng = Rng32::from_seed(seed);
        let walkers = (0..actors)
            .map(|i| Walker {
                actor: ActorHandle(1000 + i as u64),
                x: rng.range(0.0, width as f32),
                y: rng.range(height as f32 * 0.3, height as f32 * 0.9),
                vx: rng.range(-80.0, 80.0),
                vy: rng.range(-30.0, 30.0),
                depth: rng.next_f32(),
            })
            .collect();

        let wall = |x0: f32, x1: f32, segment: Segment| Wall { x0, x1, segment };
        let walls = vec![
            wall(0.00, 0.20, Segment::with_special(special::EXIT_NORMAL)),
            wall(0.20, 0.40, Segment::with_special(special::DOOR_LOCKED_RAISE)),
            wall(0.40, 0.55, Segment::with_special(special::FLOOR_LOWER_BY_VALUE)),
            wall(0.55, 0.70, Segment::with_middle_texture(EXIT_SIGN)),
            wall(0.70, 1.00, Segment::with_middle_texture(PLAIN_WALL)),
        ];

        Self { walkers, walls, time: 0.0 }
    }

    /// Texture names this scene uses, for resolving the exit sign.
    pub fn textures() -> HashMap<String, TextureId> {
        let mut textures = HashMap::new();
        textures.insert("EXITSIGN".to_string(), EXIT_SIGN);
        textures.insert("STARTAN2".to_string(), PLAIN_WALL);
        textures
    }

    /// Move actors; they bounce off the screen edges.
    pub fn update(&mut self, dt: f32, width: u32, height: u32) {
        self.time += dt;
        let (w, h) = (width as f32, height as f32);
        for walker in &mut self.walkers {
            walker.x += walker.vx * dt;
            walker.y += walker.vy * dt;
            if walker.x < -20.0 || walker.x > w + 20.0 { walker.vx = -walker.vx; }
            if walker.y < h * 0.3 || walker.y > h * 0.9 { walker.vy = -walker.vy; }
        }
    }

    /// Draw one frame of labels. The caller has already run `begin_frame`.
    pub fn render(&self, labels: &mut LabelsController, specials: &impl LineSpecials) {
        let width = labels.buffer().width();
        let height = labels.buffer().height();

        // Walls: a band across the middle of the screen.
        let top = height / 4;
        let bottom = height / 2;
        labels.clear_active_sprite();
        for wall in &self.walls {
            labels.set_segment(&wall.segment, specials);
            let x0 = (wall.x0 * width as f32) as u32;
            let x1 = (wall.x1 * width as f32) as u32;
            for y in top..bottom {
                for x in x0..x1 {
                    labels.paint(x, y);
                }
            }
        }

        // Sprites: every actor is registered, only the ones on screen get drawn.
        let mut order: Vec<usize> = (0..self.walkers.len()).collect();
        order.sort_by(|&a, &b| self.walkers[b].depth.total_cmp(&self.walkers[a].depth));
        for &i in &order {
            let sprite = SpriteHandle(i as u64);
            labels.register_sprite(sprite, self.walkers[i].actor);
        }
        for &i in &order {
            let walker = &self.walkers[i];
            let half = 10.0 + 20.0 * (1.0 - walker.depth);
            if walker.x + half < 0.0 || walker.x - half >= width as f32 {
                continue; // culled: stays registered but never takes a label
            }
            labels.set_active_sprite(SpriteHandle(i as u64));
            paint_ellipse(labels, walker.x, walker.y, half * 0.6, half);
        }

        // Weapon: body then muzzle flash, two drawables sharing one entry.
        let bob = (self.time * 4.0).sin() * 6.0;
        let cx = width as f32 / 2.0;
        let cy = height as f32 - 20.0 + bob;
        let weapon = SpriteHandle(u64::MAX);
        labels.register_weapon_sprite(weapon);
        labels.set_active_sprite(weapon);
        paint_rect(labels, cx - 25.0, cy - 20.0, cx + 25.0, cy + 40.0);
        if (self.time * 2.0).fract() < 0.25 {
            let flash = SpriteHandle(u64::MAX - 1);
            labels.register_weapon_sprite(flash);
            labels.set_active_sprite(flash);
            paint_ellipse(labels, cx, cy - 32.0, 10.0, 10.0);
        }
        labels.clear_active_sprite();
    }
}

/// Paint every pixel centre inside the ellipse; off-screen parts are dropped
/// by the controller.
fn paint_ellipse(labels: &mut LabelsController, cx: f32, cy: f32, rx: f32, ry: f32) {
    let (x0, x1) = ((cx - rx).floor().max(0.0) as u32, (cx + rx).ceil().max(0.0) as u32);
    let (y0, y1) = ((cy - ry).floor().max(0.0) as u32, (cy + ry).ceil().max(0.0) as u32);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = (x as f32 + 0.5 - cx) / rx;
            let dy = (y as f32 + 0.5 - cy) / ry;
            if dx * dx + dy * dy <= 1.0 {
                labels.paint(x, y);
            }
        }
    }
}

fn paint_rect(labels: &mut LabelsController, x0: f32, y0: f32, x1: f32, y1: f32) {
    for y in y0.max(0.0) as u32..y1.max(0.0) as u32 {
        for x in x0.max(0.0) as u32..x1.max(0.0) as u32 {
            labels.paint(x, y);
        }
    }
}
