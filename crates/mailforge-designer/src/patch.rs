//! Partial attribute sets merged into an element by `update_element`.
//!
//! Only fields that are `Some` are written. Fields that do not belong to the
//! target element's variant are skipped, numbers are clamped to their valid
//! ranges, and non-finite numbers are dropped so a bad value can never reach
//! the model.

use crate::model::{
    Element, ElementKind, Fill, FontStyle, FontWeight, GradientDirection, ImageAdjustments,
    MergeTagDescriptor, ObjectFit, ShapeStyle, Stroke, TextAlign, MAX_BLUR_PX, MAX_CORNER_RADIUS,
    MAX_FILTER_PERCENT, MAX_FONT_SIZE, MAX_STROKE_WIDTH, MIN_FONT_SIZE,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub opacity: Option<f64>,
    pub hidden: Option<bool>,
    pub locked: Option<bool>,

    // text / merge tag
    pub content: Option<String>,
    pub merge_tag: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub text_align: Option<TextAlign>,
    pub color: Option<String>,

    // rectangle / circle
    pub fill: Option<Fill>,
    pub gradient: Option<bool>,
    pub gradient_start: Option<String>,
    pub gradient_end: Option<String>,
    pub gradient_direction: Option<GradientDirection>,
    /// `Some(None)` removes the stroke.
    pub stroke: Option<Option<Stroke>>,
    pub corner_radius: Option<f64>,

    // image
    pub src: Option<String>,
    pub object_fit: Option<ObjectFit>,
    pub brightness: Option<f64>,
    pub contrast: Option<f64>,
    pub saturation: Option<f64>,
    pub blur: Option<f64>,
}

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|v| v.is_finite())
}

fn set<T: PartialEq>(slot: &mut T, value: T, changed: &mut bool) {
    if *slot != value {
        *slot = value;
        *changed = true;
    }
}

fn apply_shape(style: &mut ShapeStyle, patch: &ElementPatch, changed: &mut bool) {
    if let Some(fill) = &patch.fill {
        set(&mut style.fill, fill.clone(), changed);
    }
    if let Some(gradient) = patch.gradient {
        if gradient != style.fill.is_gradient() {
            style.set_gradient(gradient);
            *changed = true;
        }
    }
    match &mut style.fill {
        Fill::Solid { color } => {
            if let Some(c) = &patch.color {
                set(color, c.clone(), changed);
            }
        }
        Fill::LinearGradient {
            start,
            end,
            direction,
        } => {
            if let Some(c) = patch.gradient_start.as_ref().or(patch.color.as_ref()) {
                set(start, c.clone(), changed);
            }
            if let Some(c) = &patch.gradient_end {
                set(end, c.clone(), changed);
            }
            if let Some(d) = patch.gradient_direction {
                set(direction, d, changed);
            }
        }
    }
    if let Some(stroke) = &patch.stroke {
        let stroke = stroke.clone().map(|mut s| {
            s.width = if s.width.is_finite() {
                s.width.clamp(0.0, MAX_STROKE_WIDTH)
            } else {
                0.0
            };
            s
        });
        set(&mut style.stroke, stroke, changed);
    }
}

impl Element {
    /// Merges `patch` into this element. Returns true if anything changed.
    pub fn apply_patch(&mut self, patch: &ElementPatch) -> bool {
        let mut changed = false;

        if let Some(x) = finite(patch.x) {
            set(&mut self.x, x, &mut changed);
        }
        if let Some(y) = finite(patch.y) {
            set(&mut self.y, y, &mut changed);
        }
        if let Some(w) = finite(patch.width).filter(|w| *w > 0.0) {
            set(&mut self.width, w, &mut changed);
        }
        if let Some(h) = finite(patch.height).filter(|h| *h > 0.0) {
            set(&mut self.height, h, &mut changed);
        }
        if let Some(o) = finite(patch.opacity) {
            set(&mut self.opacity, o.clamp(0.0, 1.0), &mut changed);
        }
        if let Some(hidden) = patch.hidden {
            set(&mut self.hidden, hidden, &mut changed);
        }
        if let Some(locked) = patch.locked {
            set(&mut self.locked, locked, &mut changed);
        }

        if let Some(style) = self.kind.text_style_mut() {
            if let Some(family) = &patch.font_family {
                set(&mut style.font_family, family.clone(), &mut changed);
            }
            if let Some(size) = finite(patch.font_size) {
                set(
                    &mut style.font_size,
                    size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
                    &mut changed,
                );
            }
            if let Some(weight) = patch.font_weight {
                set(&mut style.font_weight, weight, &mut changed);
            }
            if let Some(fs) = patch.font_style {
                set(&mut style.font_style, fs, &mut changed);
            }
            if let Some(align) = patch.text_align {
                set(&mut style.text_align, align, &mut changed);
            }
            if let Some(color) = &patch.color {
                set(&mut style.color, color.clone(), &mut changed);
            }
        }

        match &mut self.kind {
            ElementKind::Text(text) => {
                if let Some(content) = &patch.content {
                    set(&mut text.content, content.clone(), &mut changed);
                }
            }
            ElementKind::MergeTag(tag) => {
                if let Some(token) = &patch.merge_tag {
                    set(&mut tag.tag, token.clone(), &mut changed);
                    if let Some(descriptor) = MergeTagDescriptor::find(token) {
                        set(&mut tag.label, descriptor.label.to_string(), &mut changed);
                    }
                }
            }
            ElementKind::Rectangle(rect) => {
                apply_shape(&mut rect.style, patch, &mut changed);
                if let Some(r) = finite(patch.corner_radius) {
                    set(
                        &mut rect.corner_radius,
                        r.clamp(0.0, MAX_CORNER_RADIUS),
                        &mut changed,
                    );
                }
            }
            ElementKind::Circle(circle) => {
                apply_shape(&mut circle.style, patch, &mut changed);
            }
            ElementKind::Image(image) => {
                if let Some(src) = &patch.src {
                    set(&mut image.src, src.clone(), &mut changed);
                }
                if let Some(fit) = patch.object_fit {
                    set(&mut image.object_fit, fit, &mut changed);
                }
                let adj = &mut image.adjustments;
                if let Some(v) = finite(patch.brightness) {
                    set(&mut adj.brightness, v.clamp(0.0, MAX_FILTER_PERCENT), &mut changed);
                }
                if let Some(v) = finite(patch.contrast) {
                    set(&mut adj.contrast, v.clamp(0.0, MAX_FILTER_PERCENT), &mut changed);
                }
                if let Some(v) = finite(patch.saturation) {
                    set(&mut adj.saturation, v.clamp(0.0, MAX_FILTER_PERCENT), &mut changed);
                }
                if let Some(v) = finite(patch.blur) {
                    set(&mut adj.blur, v.clamp(0.0, MAX_BLUR_PX), &mut changed);
                }
            }
        }

        changed
    }
}

/// `value` clamped to `[lo, hi]`, or `fallback` when it is not finite.
fn bounded(value: f64, lo: f64, hi: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(lo, hi)
    } else {
        fallback
    }
}

impl Element {
    /// Forces every numeric attribute into the range `apply_patch` would
    /// allow. Used for elements that did not arrive through a patch, such as
    /// a design read back from the store. Position is left to the canvas,
    /// which knows the bounds.
    pub fn normalize(&mut self) {
        let (default_w, default_h) = self.element_type().default_size();
        if !(self.width.is_finite() && self.width > 0.0) {
            self.width = default_w;
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            self.height = default_h;
        }
        if !self.x.is_finite() {
            self.x = 0.0;
        }
        if !self.y.is_finite() {
            self.y = 0.0;
        }
        self.opacity = bounded(self.opacity, 0.0, 1.0, 1.0);

        if let Some(style) = self.kind.text_style_mut() {
            style.font_size = bounded(style.font_size, MIN_FONT_SIZE, MAX_FONT_SIZE, MIN_FONT_SIZE);
        }
        if let Some(stroke) = self.kind.shape_style_mut().and_then(|s| s.stroke.as_mut()) {
            stroke.width = bounded(stroke.width, 0.0, MAX_STROKE_WIDTH, 0.0);
        }
        match &mut self.kind {
            ElementKind::Rectangle(rect) => {
                rect.corner_radius = bounded(rect.corner_radius, 0.0, MAX_CORNER_RADIUS, 0.0);
            }
            ElementKind::Image(image) => {
                let defaults = ImageAdjustments::default();
                let adj = &mut image.adjustments;
                adj.brightness =
                    bounded(adj.brightness, 0.0, MAX_FILTER_PERCENT, defaults.brightness);
                adj.contrast = bounded(adj.contrast, 0.0, MAX_FILTER_PERCENT, defaults.contrast);
                adj.saturation =
                    bounded(adj.saturation, 0.0, MAX_FILTER_PERCENT, defaults.saturation);
                adj.blur = bounded(adj.blur, 0.0, MAX_BLUR_PX, defaults.blur);
            }
            ElementKind::Text(_) | ElementKind::Circle(_) | ElementKind::MergeTag(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementType, TextElement};
    use mailforge_core::ElementId;

    fn element(ty: ElementType) -> Element {
        Element::new(
            ElementId(1),
            ElementKind::default_for(ty),
            10.0,
            10.0,
            100.0,
            100.0,
        )
    }

    #[test]
    fn test_partial_merge_keeps_other_fields() {
        let mut el = element(ElementType::Text);
        el.apply_patch(&ElementPatch {
            x: Some(42.0),
            ..Default::default()
        });
        el.apply_patch(&ElementPatch {
            y: Some(7.0),
            ..Default::default()
        });
        assert_eq!((el.x, el.y), (42.0, 7.0));
        assert_eq!((el.width, el.height), (100.0, 100.0));
    }

    #[test]
    fn test_non_finite_and_out_of_range_values() {
        let mut el = element(ElementType::Rectangle);
        let changed = el.apply_patch(&ElementPatch {
            x: Some(f64::NAN),
            width: Some(-5.0),
            opacity: Some(1.7),
            corner_radius: Some(500.0),
            ..Default::default()
        });
        assert!(changed);
        assert_eq!(el.x, 10.0);
        assert_eq!(el.width, 100.0);
        assert_eq!(el.opacity, 1.0);
        match &el.kind {
            ElementKind::Rectangle(r) => assert_eq!(r.corner_radius, MAX_CORNER_RADIUS),
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_fields_for_other_variants_are_ignored() {
        let mut el = element(ElementType::Image);
        let before = el.clone();
        let changed = el.apply_patch(&ElementPatch {
            content: Some("hello".to_string()),
            corner_radius: Some(3.0),
            font_size: Some(30.0),
            ..Default::default()
        });
        assert!(!changed);
        assert_eq!(el, before);
    }

    #[test]
    fn test_text_style_patch() {
        let mut el = element(ElementType::Text);
        el.apply_patch(&ElementPatch {
            font_size: Some(2.0),
            font_weight: Some(FontWeight::Bold),
            text_align: Some(TextAlign::Right),
            content: Some("Just Sold!".to_string()),
            ..Default::default()
        });
        match &el.kind {
            ElementKind::Text(TextElement { content, style }) => {
                assert_eq!(content, "Just Sold!");
                assert_eq!(style.font_size, MIN_FONT_SIZE);
                assert_eq!(style.font_weight, FontWeight::Bold);
                assert_eq!(style.text_align, TextAlign::Right);
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_gradient_fields() {
        let mut el = element(ElementType::Circle);
        el.apply_patch(&ElementPatch {
            gradient: Some(true),
            gradient_end: Some("#111111".to_string()),
            gradient_direction: Some(GradientDirection::ToLeft),
            ..Default::default()
        });
        let style = el.kind.shape_style().unwrap();
        assert_eq!(
            style.fill,
            Fill::LinearGradient {
                start: "#10B981".to_string(),
                end: "#111111".to_string(),
                direction: GradientDirection::ToLeft,
            }
        );
    }

    #[test]
    fn test_merge_tag_swap_updates_label() {
        let mut el = element(ElementType::MergeTag);
        el.apply_patch(&ElementPatch {
            merge_tag: Some("{{City}}".to_string()),
            ..Default::default()
        });
        match &el.kind {
            ElementKind::MergeTag(tag) => {
                assert_eq!(tag.tag, "{{City}}");
                assert_eq!(tag.label, "City");
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn test_normalize_out_of_range_values() {
        let mut el = element(ElementType::Image);
        el.opacity = 7.0;
        el.width = -5.0;
        el.height = f64::NAN;
        el.x = f64::INFINITY;
        if let ElementKind::Image(image) = &mut el.kind {
            image.adjustments.brightness = 900.0;
            image.adjustments.blur = -1.0;
        }

        el.normalize();
        assert_eq!(el.opacity, 1.0);
        assert_eq!((el.width, el.height), (100.0, 100.0));
        assert_eq!(el.x, 0.0);
        match &el.kind {
            ElementKind::Image(image) => {
                assert_eq!(image.adjustments.brightness, MAX_FILTER_PERCENT);
                assert_eq!(image.adjustments.blur, 0.0);
            }
            other => panic!("unexpected kind {:?}", other),
        }
    }
}
