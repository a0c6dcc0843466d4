// What this crate needs from the host rasterizer, and the records it hands us.
// The rasterizer owns projection, clipping and occlusion; we only see the
// outcome: which drawable is next, and which of its pixels are visible.

use crate::types::TextureId;
use std::collections::HashMap;

/// Current output resolution, queried once per frame.
pub trait Screen {
    fn resolution(&self) -> (u32, u32);
}

impl Screen for (u32, u32) {
    fn resolution(&self) -> (u32, u32) {
        *self
    }
}

/// Line-special metadata: is `special` a known action that takes arguments?
pub trait LineSpecials {
    fn is_parameterized(&self, special: u16) -> bool;
}

/// Name → texture id, resolved once at startup.
pub trait TextureLookup {
    fn find(&self, name: &str) -> Option<TextureId>;
}

impl TextureLookup for HashMap<String, TextureId> {
    fn find(&self, name: &str) -> Option<TextureId> {
        self.get(name).copied()
    }
}

/// Line action codes (ZDoom action special numbering) the classifier knows by name.
pub mod special {
    pub const NONE: u16 = 0;
    pub const DOOR_CLOSE: u16 = 10;
    pub const DOOR_OPEN: u16 = 11;
    pub const DOOR_RAISE: u16 = 12;
    pub const DOOR_LOCKED_RAISE: u16 = 13;
    pub const DOOR_ANIMATED: u16 = 14;
    pub const FLOOR_LOWER_BY_VALUE: u16 = 20;
    pub const CEILING_LOWER_BY_VALUE: u16 = 40;
    pub const FS_EXECUTE: u16 = 52;
    pub const PLAT_DOWN_WAIT_UP_STAY: u16 = 62;
    pub const TELEPORT: u16 = 70;
    pub const TELEPORT_NEW_MAP: u16 = 74;
    pub const TELEPORT_END_GAME: u16 = 75;
    pub const ACS_EXECUTE: u16 = 80;
    pub const ACS_LOCKED_EXECUTE: u16 = 83;
    pub const ACS_LOCKED_EXECUTE_DOOR: u16 = 85;
    pub const LIGHT_CHANGE_TO_VALUE: u16 = 112;
    pub const GENERIC_DOOR: u16 = 202;
    pub const EXIT_NORMAL: u16 = 243;
    pub const EXIT_SECRET: u16 = 244;
    pub const DOOR_CLOSE_WAIT_OPEN: u16 = 249;
}

/// Lookup table of known specials and their maximum argument count.
/// A negative count marks a special that exists but is not parameterized.
#[derive(Debug, Clone, Default)]
pub struct SpecialTable {
    max_args: HashMap<u16, i8>,
}

impl SpecialTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, special: u16, max_args: i8) {
        self.max_args.insert(special, max_args);
    }

    /// The specials named in [`special`], with their usual argument counts.
    pub fn standard() -> Self {
        use special::*;
        let mut table = Self::new();
        for (code, args) in [
            (DOOR_CLOSE, 3),
            (DOOR_OPEN, 3),
            (DOOR_RAISE, 4),
            (DOOR_LOCKED_RAISE, 5),
            (DOOR_ANIMATED, 4),
            (FLOOR_LOWER_BY_VALUE, 3),
            (CEILING_LOWER_BY_VALUE, 3),
            (FS_EXECUTE, 4),
            (PLAT_DOWN_WAIT_UP_STAY, 3),
            (TELEPORT, 3),
            (TELEPORT_NEW_MAP, 3),
            (TELEPORT_END_GAME, 0),
            (ACS_EXECUTE, 5),
            (ACS_LOCKED_EXECUTE, 5),
            (ACS_LOCKED_EXECUTE_DOOR, 5),
            (LIGHT_CHANGE_TO_VALUE, 2),
            (GENERIC_DOOR, 5),
            (EXIT_NORMAL, 1),
            (EXIT_SECRET, 1),
            (DOOR_CLOSE_WAIT_OPEN, 4),
        ] {
            table.insert(code, args);
        }
        table
    }
}

impl LineSpecials for SpecialTable {
    fn is_parameterized(&self, special: u16) -> bool {
        self.max_args.get(&special).is_some_and(|&args| args >= 0)
    }
}

/// The action part of a wall's line definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineDef {
    pub special: u16,
}

/// Textures on the visible side of a wall: upper, middle, lower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SideDef {
    pub textures: [Option<TextureId>; 3],
}

/// One wall segment about to be rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Segment {
    pub line: Option<LineDef>,
    pub side: Option<SideDef>,
}

impl Segment {
    pub fn with_special(special: u16) -> Self {
        Self { line: Some(LineDef { special }), side: None }
    }

    pub fn with_middle_texture(texture: TextureId) -> Self {
        Self {
            line: None,
            side: Some(SideDef { textures: [None, Some(texture), None] }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_knows_doors_and_switches() {
        let table = SpecialTable::standard();
        assert!(table.is_parameterized(special::DOOR_OPEN));
        assert!(table.is_parameterized(special::FLOOR_LOWER_BY_VALUE));
        assert!(!table.is_parameterized(special::NONE));
        assert!(!table.is_parameterized(9999));
    }

    #[test]
    fn negative_arg_count_is_not_parameterized() {
        let mut table = SpecialTable::new();
        table.insert(300, -1);
        assert!(!table.is_parameterized(300));
    }
}
