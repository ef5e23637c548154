//! Canvas type definitions: CanvasSize, PointerButton, PointerOutcome, PaintItem.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use mailforge_core::{DesignError, ElementId};

use crate::model::{Bounds, ElementType};

/// Postcard size presets. Canvas units are 100 per printed inch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CanvasSize {
    #[default]
    #[serde(rename = "4x6")]
    FourBySix,
    #[serde(rename = "6x9")]
    SixByNine,
    #[serde(rename = "6x11")]
    SixByEleven,
}

impl CanvasSize {
    pub const ALL: [CanvasSize; 3] = [
        CanvasSize::FourBySix,
        CanvasSize::SixByNine,
        CanvasSize::SixByEleven,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            CanvasSize::FourBySix => "4x6",
            CanvasSize::SixByNine => "6x9",
            CanvasSize::SixByEleven => "6x11",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CanvasSize::FourBySix => "4\" × 6\"",
            CanvasSize::SixByNine => "6\" × 9\"",
            CanvasSize::SixByEleven => "6\" × 11\"",
        }
    }

    pub fn width(&self) -> f64 {
        match self {
            CanvasSize::FourBySix => 600.0,
            CanvasSize::SixByNine => 900.0,
            CanvasSize::SixByEleven => 1100.0,
        }
    }

    pub fn height(&self) -> f64 {
        match self {
            CanvasSize::FourBySix => 400.0,
            CanvasSize::SixByNine | CanvasSize::SixByEleven => 600.0,
        }
    }

    /// Top-left position that centers a `width` × `height` box, as new
    /// elements are placed.
    pub fn centered_origin(&self, ty: ElementType) -> (f64, f64) {
        let y_offset = match ty {
            ElementType::MergeTag => 15.0,
            _ => 25.0,
        };
        (self.width() / 2.0 - 50.0, self.height() / 2.0 - y_offset)
    }
}

impl fmt::Display for CanvasSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CanvasSize {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|size| size.key() == s.trim())
            .ok_or_else(|| DesignError::UnknownCanvasSize(s.to_string()))
    }
}

/// Mouse button that produced a pointer press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// What a pointer press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Element selected and a drag session started.
    DragStarted(ElementId),
    /// Element selected; it is locked so it will not move.
    Selected(ElementId),
    /// Press on empty canvas cleared the selection.
    Deselected,
    /// Non-primary button; nothing happened.
    Ignored,
}

/// One entry of the canvas paint list, bottom first.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintItem {
    pub id: ElementId,
    pub z_index: usize,
    pub bounds: Bounds,
    pub opacity: f64,
    pub selected: bool,
}
