// Per-pixel semantic labels for a software rasterizer.
//
// Alongside the color image, every frame gets a label image: which actor,
// the player's weapon, or which kind of special wall (exit, door, switch,
// exit sign) is visible at each pixel.

pub mod actors;
pub mod buffer;
pub mod classify;
pub mod config;
pub mod controller;
pub mod draw;
pub mod error;
pub mod export;
pub mod label;
pub mod palette;
pub mod rasterizer;
pub mod report;
pub mod scene;
pub mod sprites;
pub mod types;

pub use buffer::LabelBuffer;
pub use config::LabelsConfig;
pub use controller::{LabelsController, PaintContext};
pub use error::{Error, Result};
pub use label::{LabelKind, SegmentCategory};
pub use rasterizer::{LineSpecials, Screen, Segment, SpecialTable, TextureLookup};
pub use report::FrameReport;
pub use sprites::SpriteEntry;
pub use types::{ActorHandle, BoundingBox, SpriteHandle, TextureId};
