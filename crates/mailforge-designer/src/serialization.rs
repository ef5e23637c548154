//! Serialization of a design into the campaign record shape.
//!
//! A campaign stores the postcard size, the full element list under
//! `design_data`, and a flattened list of merge-tag placements that the
//! print pipeline reads without having to understand elements.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mailforge_core::{CampaignStatus, PersistenceError};

use crate::canvas::{Canvas, CanvasSize};
use crate::model::{Element, ElementKind};

/// Design data format version
const DESIGN_FORMAT_VERSION: &str = "1.0";

fn default_version() -> String {
    DESIGN_FORMAT_VERSION.to_string()
}

/// Element list plus bookkeeping stored under `design_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignData {
    #[serde(default = "default_version")]
    pub version: String,
    pub elements: Vec<Element>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

/// Where a merge tag is printed, for the mail-merge step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeTagPlacement {
    pub tag: String,
    pub x: f64,
    pub y: f64,
    pub font: String,
    #[serde(rename = "fontSize")]
    pub font_size: f64,
}

/// Design fields of a campaign record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedDesign {
    pub postcard_size: CanvasSize,
    pub design_data: DesignData,
    #[serde(default)]
    pub merge_tags: Vec<MergeTagPlacement>,
    #[serde(default)]
    pub status: CampaignStatus,
}

impl PersistedDesign {
    /// Snapshots the canvas. Elements keep their ids and sequence order.
    pub fn from_canvas(canvas: &Canvas, status: CampaignStatus) -> Self {
        let elements = canvas.elements().to_vec();
        let merge_tags = merge_tag_placements(&elements);
        Self {
            postcard_size: canvas.size(),
            design_data: DesignData {
                version: default_version(),
                elements,
                saved_at: Some(Utc::now()),
            },
            merge_tags,
            status,
        }
    }

    /// Rebuilds a canvas holding the saved elements with their saved ids.
    ///
    /// A record naming the same id twice is rejected. Out-of-range numbers
    /// are pulled back into range and positions are re-clamped to the
    /// postcard size.
    pub fn to_canvas(&self) -> Result<Canvas, PersistenceError> {
        let mut seen = HashSet::new();
        for element in &self.design_data.elements {
            if !seen.insert(element.id) {
                return Err(PersistenceError::Serialization(format!(
                    "duplicate element id {}",
                    element.id
                )));
            }
        }

        let mut canvas = Canvas::with_size(self.postcard_size);
        canvas.restore_elements(self.design_data.elements.clone());
        Ok(canvas)
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, PersistenceError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Placements for every merge-tag element, bottom first.
pub fn merge_tag_placements(elements: &[Element]) -> Vec<MergeTagPlacement> {
    elements
        .iter()
        .filter_map(|e| match &e.kind {
            ElementKind::MergeTag(tag) => Some(MergeTagPlacement {
                tag: tag.tag.clone(),
                x: e.x,
                y: e.y,
                font: tag.style.font_family.clone(),
                font_size: tag.style.font_size,
            }),
            _ => None,
        })
        .collect()
}
