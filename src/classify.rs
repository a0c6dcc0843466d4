// Static geometry classification.
//
// A wall segment falls into at most one `SegmentCategory`. Rules are tried
// top-down and the first match wins:
//
// 1. level exit actions → `Exit`
// 2. door actions (plain, animated, generic and locked variants) → `Door`
// 3. any other recognized, parameterized action → `Switch`
// 4. a side texture equal to the exit sign texture → `ExitSign`
//
// Anything else is unclassified and paints as background.

use crate::label::SegmentCategory;
use crate::rasterizer::{LineSpecials, Segment, TextureLookup, special};
use crate::types::TextureId;
use std::collections::BTreeMap;
use tracing::{trace, warn};

const EXIT_ACTIONS: [u16; 4] = [
    special::TELEPORT_NEW_MAP,
    special::TELEPORT_END_GAME,
    special::EXIT_NORMAL,
    special::EXIT_SECRET,
];

const DOOR_ACTIONS: [u16; 10] = [
    special::DOOR_LOCKED_RAISE,
    special::ACS_LOCKED_EXECUTE,
    special::ACS_LOCKED_EXECUTE_DOOR,
    special::DOOR_ANIMATED,
    special::GENERIC_DOOR,
    special::FS_EXECUTE,
    special::DOOR_OPEN,
    special::DOOR_CLOSE,
    special::DOOR_CLOSE_WAIT_OPEN,
    special::DOOR_RAISE,
];

/// Holds the exit sign texture id, resolved once.
#[derive(Debug, Clone)]
pub struct SegmentClassifier {
    exit_actions: Vec<u16>,
    door_actions: Vec<u16>,
    exit_sign: Option<TextureId>,
}

impl SegmentClassifier {
    pub fn new(textures: &impl TextureLookup, exit_sign_texture: &str) -> Self {
        let exit_sign = textures.find(exit_sign_texture);
        if exit_sign.is_none() {
            warn!(
                texture = exit_sign_texture,
                "exit sign texture not found, sign detection disabled"
            );
        }
        Self::with_actions(exit_sign, &EXIT_ACTIONS, &DOOR_ACTIONS)
    }

    /// Custom action sets, mostly for tests and non-standard special numbering.
    pub fn with_actions(exit_sign: Option<TextureId>, exits: &[u16], doors: &[u16]) -> Self {
        Self {
            exit_actions: exits.to_vec(),
            door_actions: doors.to_vec(),
            exit_sign,
        }
    }

    pub fn exit_sign(&self) -> Option<TextureId> {
        self.exit_sign
    }

    pub fn classify(
        &self,
        segment: &Segment,
        specials: &impl LineSpecials,
    ) -> Option<SegmentCategory> {
        let category = self.by_action(segment, specials).or_else(|| self.by_texture(segment));
        trace!(?segment, ?category, "segment classified");
        category
    }

    fn by_action(&self, segment: &Segment, specials: &impl LineSpecials) -> Option<SegmentCategory> {
        let code = segment.line?.special;
        if code == special::NONE {
            return None;
        }
        if self.exit_actions.contains(&code) {
            Some(SegmentCategory::Exit)
        } else if self.door_actions.contains(&code) {
            Some(SegmentCategory::Door)
        } else if specials.is_parameterized(code) {
            Some(SegmentCategory::Switch)
        } else {
            None
        }
    }

    fn by_texture(&self, segment: &Segment) -> Option<SegmentCategory> {
        let sign = self.exit_sign?;
        let side = segment.side?;
        side.textures
            .iter()
            .any(|&t| t == Some(sign))
            .then_some(SegmentCategory::ExitSign)
    }
}

/// Categories seen this frame, keyed by label value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentLabelTable {
    names: BTreeMap<u8, &'static str>,
}

impl SegmentLabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `category`; the entry is created once and reused.
    pub fn note(&mut self, category: SegmentCategory) -> u8 {
        let label = category.label();
        self.names.entry(label).or_insert_with(|| category.name());
        label
    }

    pub fn name(&self, label: u8) -> Option<&'static str> {
        self.names.get(&label).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &'static str)> + '_ {
        self.names.iter().map(|(&label, &name)| (label, name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::{LineDef, SideDef, SpecialTable};
    use std::collections::HashMap;

    const SIGN: TextureId = TextureId(31);

    fn classifier() -> SegmentClassifier {
        let mut textures = HashMap::new();
        textures.insert("EXITSIGN".to_string(), SIGN);
        SegmentClassifier::new(&textures, "EXITSIGN")
    }

    fn classify(seg: Segment) -> Option<SegmentCategory> {
        classifier().classify(&seg, &SpecialTable::standard())
    }

    #[test]
    fn exit_actions() {
        for code in EXIT_ACTIONS {
            assert_eq!(classify(Segment::with_special(code)), Some(SegmentCategory::Exit));
        }
    }

    #[test]
    fn door_actions_including_locked_variants() {
        for code in DOOR_ACTIONS {
            assert_eq!(classify(Segment::with_special(code)), Some(SegmentCategory::Door));
        }
    }

    #[test]
    fn other_parameterized_actions_are_switches() {
        assert_eq!(
            classify(Segment::with_special(special::FLOOR_LOWER_BY_VALUE)),
            Some(SegmentCategory::Switch)
        );
        assert_eq!(
            classify(Segment::with_special(special::ACS_EXECUTE)),
            Some(SegmentCategory::Switch)
        );
    }

    #[test]
    fn unknown_or_missing_action_is_unclassified() {
        assert_eq!(classify(Segment::with_special(9999)), None);
        assert_eq!(classify(Segment::with_special(special::NONE)), None);
        assert_eq!(classify(Segment::default()), None);
    }

    #[test]
    fn exit_sign_on_any_side_texture() {
        assert_eq!(classify(Segment::with_middle_texture(SIGN)), Some(SegmentCategory::ExitSign));
        let upper = Segment {
            line: None,
            side: Some(SideDef { textures: [Some(SIGN), None, None] }),
        };
        assert_eq!(classify(upper), Some(SegmentCategory::ExitSign));
        assert_eq!(classify(Segment::with_middle_texture(TextureId(1))), None);
    }

    #[test]
    fn actions_take_priority_over_texture() {
        let seg = Segment {
            line: Some(LineDef { special: special::DOOR_OPEN }),
            side: Some(SideDef { textures: [None, Some(SIGN), None] }),
        };
        assert_eq!(classify(seg), Some(SegmentCategory::Door));

        // a line with an unrecognized action still falls through to the texture rule
        let seg = Segment {
            line: Some(LineDef { special: 9999 }),
            side: Some(SideDef { textures: [None, None, Some(SIGN)] }),
        };
        assert_eq!(classify(seg), Some(SegmentCategory::ExitSign));
    }

    #[test]
    fn exit_wins_when_code_is_in_both_sets() {
        let shared = 500;
        let c = SegmentClassifier::with_actions(None, &[shared], &[shared, special::DOOR_OPEN]);
        assert_eq!(
            c.classify(&Segment::with_special(shared), &SpecialTable::standard()),
            Some(SegmentCategory::Exit)
        );
    }

    #[test]
    fn missing_sign_texture_disables_sign_rule() {
        let c = SegmentClassifier::new(&HashMap::<String, TextureId>::new(), "EXITSIGN");
        assert_eq!(c.exit_sign(), None);
        assert_eq!(c.classify(&Segment::with_middle_texture(SIGN), &SpecialTable::standard()), None);
    }

    #[test]
    fn label_table_creates_each_entry_once() {
        let mut table = SegmentLabelTable::new();
        assert_eq!(table.note(SegmentCategory::Door), 2);
        assert_eq!(table.note(SegmentCategory::Door), 2);
        assert_eq!(table.note(SegmentCategory::Exit), 1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![(1, "Exit"), (2, "Door")]);
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.name(2), None);
    }
}
