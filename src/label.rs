// Label value space.
//
// The buffer stores raw bytes; this module is the only place that knows what
// a byte means.
//
// ```text
//   0          background / unclassified geometry
//   1..=4      static geometry categories (Exit, Door, Switch, ExitSign)
//   5..=254    sprite instances, in first-paint order
//   255        the player's weapon sprite
// ```

use serde::Serialize;

/// Value written for empty or unclassified pixels.
pub const BACKGROUND: u8 = 0;

/// Number of label values reserved for geometry categories.
/// The sprite counter is seeded here, so the first sprite gets `SEGMENT_LABELS + 1`.
pub const SEGMENT_LABELS: u8 = 4;

/// Top of the label range, kept for the weapon sprite alone.
pub const WEAPON: u8 = u8::MAX;

/// Highest value an ordinary sprite may receive.
pub const LAST_SPRITE_LABEL: u8 = WEAPON - 1;

/// Static geometry categories, in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SegmentCategory {
    Exit,
    Door,
    Switch,
    ExitSign,
}

impl SegmentCategory {
    pub const ALL: [SegmentCategory; 4] = [
        SegmentCategory::Exit,
        SegmentCategory::Door,
        SegmentCategory::Switch,
        SegmentCategory::ExitSign,
    ];

    pub fn label(self) -> u8 {
        match self {
            SegmentCategory::Exit => 1,
            SegmentCategory::Door => 2,
            SegmentCategory::Switch => 3,
            SegmentCategory::ExitSign => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SegmentCategory::Exit => "Exit",
            SegmentCategory::Door => "Door",
            SegmentCategory::Switch => "Switch",
            SegmentCategory::ExitSign => "ExitSign",
        }
    }

    pub fn from_label(label: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

/// Decoded meaning of one buffer byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Background,
    Segment(SegmentCategory),
    Sprite(u8),
    Weapon,
}

impl LabelKind {
    pub fn decode(value: u8) -> Self {
        match value {
            BACKGROUND => LabelKind::Background,
            WEAPON => LabelKind::Weapon,
            v if v <= SEGMENT_LABELS => match SegmentCategory::from_label(v) {
                Some(category) => LabelKind::Segment(category),
                None => LabelKind::Background,
            },
            v => LabelKind::Sprite(v),
        }
    }

    pub fn encode(self) -> u8 {
        match self {
            LabelKind::Background => BACKGROUND,
            LabelKind::Segment(category) => category.label(),
            LabelKind::Sprite(v) => v,
            LabelKind::Weapon => WEAPON,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_use_reserved_range() {
        for category in SegmentCategory::ALL {
            let label = category.label();
            assert!(label > BACKGROUND && label <= SEGMENT_LABELS);
            assert_eq!(SegmentCategory::from_label(label), Some(category));
        }
        assert_eq!(SegmentCategory::from_label(0), None);
        assert_eq!(SegmentCategory::from_label(5), None);
    }

    #[test]
    fn decode_splits_value_space() {
        assert_eq!(LabelKind::decode(0), LabelKind::Background);
        assert_eq!(LabelKind::decode(2), LabelKind::Segment(SegmentCategory::Door));
        assert_eq!(LabelKind::decode(5), LabelKind::Sprite(5));
        assert_eq!(LabelKind::decode(254), LabelKind::Sprite(254));
        assert_eq!(LabelKind::decode(255), LabelKind::Weapon);
        assert_eq!(LabelKind::decode(4).encode(), 4);
        assert_eq!(LabelKind::Weapon.encode(), WEAPON);
    }
}
