//! Element model for postcard designs.
//!
//! A design is a flat, ordered list of [`Element`]s. Every element shares the
//! positional and visual attributes (`x`, `y`, `width`, `height`, `opacity`,
//! `hidden`, `locked`) and carries a variant payload in [`ElementKind`].

use serde::{Deserialize, Serialize};

use mailforge_core::ElementId;

mod image;
mod merge_tag;
mod shape;
mod text;

pub use image::{ImageAdjustments, ImageElement, ObjectFit, MAX_BLUR_PX, MAX_FILTER_PERCENT};
pub use merge_tag::{MergeTagDescriptor, MergeTagElement, MERGE_TAGS};
pub use shape::{CircleElement, Fill, GradientDirection, RectangleElement, ShapeStyle, Stroke};
pub use text::{FontStyle, FontWeight, TextAlign, TextElement, TextStyle};

pub const MIN_FONT_SIZE: f64 = 8.0;
pub const MAX_FONT_SIZE: f64 = 120.0;
pub const MAX_CORNER_RADIUS: f64 = 50.0;
pub const MAX_STROKE_WIDTH: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box in canvas units, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Edges are inclusive.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Variant tag without payload, used by tool buttons and the properties panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Text,
    Image,
    Rectangle,
    Circle,
    MergeTag,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Text => "text",
            ElementType::Image => "image",
            ElementType::Rectangle => "rectangle",
            ElementType::Circle => "circle",
            ElementType::MergeTag => "merge_tag",
        }
    }

    /// Human name used in the layers list.
    pub fn display_name(&self) -> &'static str {
        match self {
            ElementType::Text => "Text",
            ElementType::Image => "Image",
            ElementType::Rectangle => "Rectangle",
            ElementType::Circle => "Circle",
            ElementType::MergeTag => "Merge Tag",
        }
    }

    /// Default (width, height) for a freshly added element.
    pub fn default_size(&self) -> (f64, f64) {
        match self {
            ElementType::Text => (200.0, 40.0),
            ElementType::MergeTag => (150.0, 30.0),
            ElementType::Image | ElementType::Rectangle | ElementType::Circle => (100.0, 100.0),
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    Text(TextElement),
    Image(ImageElement),
    Rectangle(RectangleElement),
    Circle(CircleElement),
    MergeTag(MergeTagElement),
}

impl ElementKind {
    pub fn element_type(&self) -> ElementType {
        match self {
            ElementKind::Text(_) => ElementType::Text,
            ElementKind::Image(_) => ElementType::Image,
            ElementKind::Rectangle(_) => ElementType::Rectangle,
            ElementKind::Circle(_) => ElementType::Circle,
            ElementKind::MergeTag(_) => ElementType::MergeTag,
        }
    }

    /// Payload with the defaults a new element of `ty` starts with.
    pub fn default_for(ty: ElementType) -> Self {
        match ty {
            ElementType::Text => ElementKind::Text(TextElement::default()),
            ElementType::Image => ElementKind::Image(ImageElement::default()),
            ElementType::Rectangle => ElementKind::Rectangle(RectangleElement::default()),
            ElementType::Circle => ElementKind::Circle(CircleElement::default()),
            ElementType::MergeTag => {
                ElementKind::MergeTag(MergeTagElement::from_descriptor(&MERGE_TAGS[0]))
            }
        }
    }

    pub fn text_style(&self) -> Option<&TextStyle> {
        match self {
            ElementKind::Text(t) => Some(&t.style),
            ElementKind::MergeTag(m) => Some(&m.style),
            ElementKind::Image(_) | ElementKind::Rectangle(_) | ElementKind::Circle(_) => None,
        }
    }

    pub fn text_style_mut(&mut self) -> Option<&mut TextStyle> {
        match self {
            ElementKind::Text(t) => Some(&mut t.style),
            ElementKind::MergeTag(m) => Some(&mut m.style),
            ElementKind::Image(_) | ElementKind::Rectangle(_) | ElementKind::Circle(_) => None,
        }
    }

    pub fn shape_style(&self) -> Option<&ShapeStyle> {
        match self {
            ElementKind::Rectangle(r) => Some(&r.style),
            ElementKind::Circle(c) => Some(&c.style),
            ElementKind::Text(_) | ElementKind::Image(_) | ElementKind::MergeTag(_) => None,
        }
    }

    pub fn shape_style_mut(&mut self) -> Option<&mut ShapeStyle> {
        match self {
            ElementKind::Rectangle(r) => Some(&mut r.style),
            ElementKind::Circle(c) => Some(&mut c.style),
            ElementKind::Text(_) | ElementKind::Image(_) | ElementKind::MergeTag(_) => None,
        }
    }
}

fn default_opacity() -> f64 {
    1.0
}

/// A visual primitive on the postcard canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    pub fn new(id: ElementId, kind: ElementKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
            opacity: 1.0,
            hidden: false,
            locked: false,
            kind,
        }
    }

    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    pub fn contains_point(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Visible elements can be hit, painted and dragged.
    pub fn is_visible(&self) -> bool {
        !self.hidden
    }

    /// True when a pointer drag may move this element.
    pub fn is_draggable(&self) -> bool {
        !self.locked && !self.hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_contains_edges() {
        let b = Bounds::new(10.0, 10.0, 20.0, 5.0);
        assert!(b.contains(Point::new(10.0, 10.0)));
        assert!(b.contains(Point::new(30.0, 15.0)));
        assert!(!b.contains(Point::new(30.1, 12.0)));
        assert!(!b.contains(Point::new(9.9, 12.0)));
    }

    #[test]
    fn test_element_json_shape() {
        let el = Element::new(
            ElementId(3),
            ElementKind::default_for(ElementType::MergeTag),
            5.0,
            6.0,
            150.0,
            30.0,
        );
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["type"], "merge_tag");
        assert_eq!(json["id"], 3);
        assert_eq!(json["tag"], "{{FirstName}}");
        assert_eq!(json["hidden"], false);

        let back: Element = serde_json::from_value(json).unwrap();
        assert_eq!(back, el);
    }

    #[test]
    fn test_missing_flags_default() {
        let json = serde_json::json!({
            "id": 1, "type": "circle", "x": 0, "y": 0, "width": 10, "height": 10,
            "style": { "fill": { "kind": "solid", "color": "#000000" } }
        });
        let el: Element = serde_json::from_value(json).unwrap();
        assert_eq!(el.opacity, 1.0);
        assert!(!el.hidden);
        assert!(!el.locked);
        assert_eq!(el.element_type(), ElementType::Circle);
    }
}
