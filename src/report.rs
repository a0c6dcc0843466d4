// Label → metadata mapping for one finished frame.
//
// Lists every label value that means something this frame: each painted
// sprite (with its actor id, box and pixel count) and each geometry category
// that was classified. Sprites that were registered but never painted are
// left out.

use crate::controller::LabelsController;
use crate::error::Result;
use crate::label::{BACKGROUND, SegmentCategory};
use crate::types::BoundingBox;
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LabelObject {
    Actor { actor_id: u32 },
    Weapon,
    Segment { category: SegmentCategory, name: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelRecord {
    pub value: u8,
    #[serde(flatten)]
    pub object: LabelObject,
    /// None for geometry, which has no box accounting.
    pub bbox: Option<BoundingBox>,
    pub point_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub width: u32,
    pub height: u32,
    pub labels: Vec<LabelRecord>,
}

impl FrameReport {
    pub fn collect(controller: &LabelsController) -> Self {
        let mut labels: Vec<LabelRecord> = controller
            .segment_labels()
            .iter()
            .filter_map(|(value, name)| {
                let category = SegmentCategory::from_label(value)?;
                Some(LabelRecord {
                    value,
                    object: LabelObject::Segment { category, name },
                    bbox: None,
                    point_count: 0,
                })
            })
            .collect();

        labels.extend(
            controller
                .sprites()
                .iter()
                .filter(|s| s.labeled && s.label != BACKGROUND)
                .map(|s| LabelRecord {
                    value: s.label,
                    object: if s.is_weapon {
                        LabelObject::Weapon
                    } else {
                        LabelObject::Actor { actor_id: s.actor_id }
                    },
                    bbox: (!s.bbox.is_empty()).then_some(s.bbox),
                    point_count: s.point_count,
                }),
        );
        labels.sort_by_key(|r| r.value);

        let buffer = controller.buffer();
        Self { width: buffer.width(), height: buffer.height(), labels }
    }

    pub fn get(&self, value: u8) -> Option<&LabelRecord> {
        self.labels.iter().find(|r| r.value == value)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
