//! Properties panel: the editable field set of the selected element.
//!
//! The panel is a view over the canvas. [`PropertiesView::build`] derives
//! the rows from the current selection and [`apply_input`] turns raw text
//! from an input widget into an [`ElementPatch`] that goes through
//! [`Canvas::update_element`], the same path pointer drags use.

use std::fmt;

use mailforge_core::{DesignError, ElementId};

use crate::canvas::Canvas;
use crate::model::{
    Element, ElementKind, ElementType, Fill, FontStyle, FontWeight, GradientDirection,
    MergeTagDescriptor, ObjectFit, ShapeStyle, Stroke, TextAlign, MAX_BLUR_PX, MAX_CORNER_RADIUS,
    MAX_FILTER_PERCENT, MAX_FONT_SIZE, MAX_STROKE_WIDTH, MIN_FONT_SIZE,
};
use crate::patch::ElementPatch;

const DEFAULT_STROKE_COLOR: &str = "#000000";
const DEFAULT_STROKE_WIDTH: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyField {
    X,
    Y,
    Width,
    Height,
    /// Entered and shown as a percentage (0–100).
    Opacity,
    Content,
    MergeTag,
    FontFamily,
    FontSize,
    FontWeight,
    FontStyle,
    TextAlign,
    Color,
    FillType,
    FillColor,
    GradientEnd,
    GradientDirection,
    StrokeColor,
    StrokeWidth,
    CornerRadius,
    ImageSource,
    ObjectFit,
    Brightness,
    Contrast,
    Saturation,
    Blur,
}

impl PropertyField {
    pub const COMMON: [PropertyField; 5] = [
        PropertyField::X,
        PropertyField::Y,
        PropertyField::Width,
        PropertyField::Height,
        PropertyField::Opacity,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            PropertyField::X => "x",
            PropertyField::Y => "y",
            PropertyField::Width => "width",
            PropertyField::Height => "height",
            PropertyField::Opacity => "opacity",
            PropertyField::Content => "content",
            PropertyField::MergeTag => "merge_tag",
            PropertyField::FontFamily => "font_family",
            PropertyField::FontSize => "font_size",
            PropertyField::FontWeight => "font_weight",
            PropertyField::FontStyle => "font_style",
            PropertyField::TextAlign => "text_align",
            PropertyField::Color => "color",
            PropertyField::FillType => "fill_type",
            PropertyField::FillColor => "fill_color",
            PropertyField::GradientEnd => "gradient_end",
            PropertyField::GradientDirection => "gradient_direction",
            PropertyField::StrokeColor => "stroke_color",
            PropertyField::StrokeWidth => "stroke_width",
            PropertyField::CornerRadius => "corner_radius",
            PropertyField::ImageSource => "src",
            PropertyField::ObjectFit => "object_fit",
            PropertyField::Brightness => "brightness",
            PropertyField::Contrast => "contrast",
            PropertyField::Saturation => "saturation",
            PropertyField::Blur => "blur",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PropertyField::X => "X",
            PropertyField::Y => "Y",
            PropertyField::Width => "Width",
            PropertyField::Height => "Height",
            PropertyField::Opacity => "Opacity",
            PropertyField::Content => "Text Content",
            PropertyField::MergeTag => "Merge Field",
            PropertyField::FontFamily => "Font",
            PropertyField::FontSize => "Font Size",
            PropertyField::FontWeight => "Bold",
            PropertyField::FontStyle => "Italic",
            PropertyField::TextAlign => "Alignment",
            PropertyField::Color => "Text Color",
            PropertyField::FillType => "Fill Type",
            PropertyField::FillColor => "Fill Color",
            PropertyField::GradientEnd => "Gradient End",
            PropertyField::GradientDirection => "Direction",
            PropertyField::StrokeColor => "Border Color",
            PropertyField::StrokeWidth => "Border Width",
            PropertyField::CornerRadius => "Corner Radius",
            PropertyField::ImageSource => "Image",
            PropertyField::ObjectFit => "Fit",
            PropertyField::Brightness => "Brightness",
            PropertyField::Contrast => "Contrast",
            PropertyField::Saturation => "Saturation",
            PropertyField::Blur => "Blur",
        }
    }

    /// Slider range for numeric fields.
    pub fn range(&self) -> Option<(f64, f64)> {
        match self {
            PropertyField::Opacity => Some((0.0, 100.0)),
            PropertyField::FontSize => Some((MIN_FONT_SIZE, MAX_FONT_SIZE)),
            PropertyField::CornerRadius => Some((0.0, MAX_CORNER_RADIUS)),
            PropertyField::StrokeWidth => Some((0.0, MAX_STROKE_WIDTH)),
            PropertyField::Brightness | PropertyField::Contrast | PropertyField::Saturation => {
                Some((0.0, MAX_FILTER_PERCENT))
            }
            PropertyField::Blur => Some((0.0, MAX_BLUR_PX)),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            PropertyField::X
                | PropertyField::Y
                | PropertyField::Width
                | PropertyField::Height
                | PropertyField::Opacity
                | PropertyField::FontSize
                | PropertyField::StrokeWidth
                | PropertyField::CornerRadius
                | PropertyField::Brightness
                | PropertyField::Contrast
                | PropertyField::Saturation
                | PropertyField::Blur
        )
    }
}

impl fmt::Display for PropertyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
    Toggle(bool),
    Choice(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRow {
    pub field: PropertyField,
    pub value: PropertyValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertiesView {
    /// Nothing selected; the panel shows a hint.
    Empty,
    Element {
        id: ElementId,
        element_type: ElementType,
        rows: Vec<PropertyRow>,
    },
}

impl PropertiesView {
    pub fn build(canvas: &Canvas) -> Self {
        match canvas.selected_element() {
            None => PropertiesView::Empty,
            Some(element) => PropertiesView::Element {
                id: element.id,
                element_type: element.element_type(),
                rows: fields_for(element)
                    .into_iter()
                    .filter_map(|field| {
                        value_of(element, field).map(|value| PropertyRow { field, value })
                    })
                    .collect(),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, PropertiesView::Empty)
    }

    pub fn value(&self, field: PropertyField) -> Option<&PropertyValue> {
        match self {
            PropertiesView::Empty => None,
            PropertiesView::Element { rows, .. } => {
                rows.iter().find(|r| r.field == field).map(|r| &r.value)
            }
        }
    }
}

fn shape_fields(style: &ShapeStyle, fields: &mut Vec<PropertyField>) {
    fields.push(PropertyField::FillType);
    fields.push(PropertyField::FillColor);
    if style.fill.is_gradient() {
        fields.push(PropertyField::GradientEnd);
        fields.push(PropertyField::GradientDirection);
    }
    fields.push(PropertyField::StrokeColor);
    fields.push(PropertyField::StrokeWidth);
}

const TEXT_STYLE_FIELDS: [PropertyField; 6] = [
    PropertyField::FontFamily,
    PropertyField::FontSize,
    PropertyField::FontWeight,
    PropertyField::FontStyle,
    PropertyField::TextAlign,
    PropertyField::Color,
];

/// Fields shown for `element`: the shared geometry block followed by the
/// variant's own fields.
pub fn fields_for(element: &Element) -> Vec<PropertyField> {
    let mut fields = PropertyField::COMMON.to_vec();
    match &element.kind {
        ElementKind::Text(_) => {
            fields.push(PropertyField::Content);
            fields.extend(TEXT_STYLE_FIELDS);
        }
        ElementKind::MergeTag(_) => {
            fields.push(PropertyField::MergeTag);
            fields.extend(TEXT_STYLE_FIELDS);
        }
        ElementKind::Rectangle(rect) => {
            shape_fields(&rect.style, &mut fields);
            fields.push(PropertyField::CornerRadius);
        }
        ElementKind::Circle(circle) => shape_fields(&circle.style, &mut fields),
        ElementKind::Image(_) => fields.extend([
            PropertyField::ImageSource,
            PropertyField::ObjectFit,
            PropertyField::Brightness,
            PropertyField::Contrast,
            PropertyField::Saturation,
            PropertyField::Blur,
        ]),
    }
    fields
}

fn value_of(element: &Element, field: PropertyField) -> Option<PropertyValue> {
    use PropertyValue::{Choice, Number, Text, Toggle};

    let text = element.kind.text_style();
    let shape = element.kind.shape_style();
    let value = match field {
        PropertyField::X => Number(element.x),
        PropertyField::Y => Number(element.y),
        PropertyField::Width => Number(element.width),
        PropertyField::Height => Number(element.height),
        PropertyField::Opacity => Number((element.opacity * 100.0).round()),
        PropertyField::Content => match &element.kind {
            ElementKind::Text(t) => Text(t.content.clone()),
            _ => return None,
        },
        PropertyField::MergeTag => match &element.kind {
            ElementKind::MergeTag(m) => Choice(m.tag.clone()),
            _ => return None,
        },
        PropertyField::FontFamily => Choice(text?.font_family.clone()),
        PropertyField::FontSize => Number(text?.font_size),
        PropertyField::FontWeight => Toggle(text?.font_weight == FontWeight::Bold),
        PropertyField::FontStyle => Toggle(text?.font_style == FontStyle::Italic),
        PropertyField::TextAlign => Choice(text?.text_align.as_str().to_string()),
        PropertyField::Color => Text(text?.color.clone()),
        PropertyField::FillType => Choice(
            if shape?.fill.is_gradient() {
                "gradient"
            } else {
                "solid"
            }
            .to_string(),
        ),
        PropertyField::FillColor => Text(shape?.fill.primary_color().to_string()),
        PropertyField::GradientEnd => match &shape?.fill {
            Fill::LinearGradient { end, .. } => Text(end.clone()),
            Fill::Solid { .. } => return None,
        },
        PropertyField::GradientDirection => match &shape?.fill {
            Fill::LinearGradient { direction, .. } => {
                Choice(direction.css_keyword().to_string())
            }
            Fill::Solid { .. } => return None,
        },
        PropertyField::StrokeColor => Text(
            shape?
                .stroke
                .as_ref()
                .map(|s| s.color.clone())
                .unwrap_or_default(),
        ),
        PropertyField::StrokeWidth => {
            Number(shape?.stroke.as_ref().map(|s| s.width).unwrap_or(0.0))
        }
        PropertyField::CornerRadius => match &element.kind {
            ElementKind::Rectangle(r) => Number(r.corner_radius),
            _ => return None,
        },
        PropertyField::ImageSource
        | PropertyField::ObjectFit
        | PropertyField::Brightness
        | PropertyField::Contrast
        | PropertyField::Saturation
        | PropertyField::Blur => {
            let ElementKind::Image(image) = &element.kind else {
                return None;
            };
            let adj = &image.adjustments;
            match field {
                PropertyField::ImageSource => Text(image.src.clone()),
                PropertyField::ObjectFit => Choice(image.object_fit.as_str().to_string()),
                PropertyField::Brightness => Number(adj.brightness),
                PropertyField::Contrast => Number(adj.contrast),
                PropertyField::Saturation => Number(adj.saturation),
                _ => Number(adj.blur),
            }
        }
    };
    Some(value)
}

fn parse_number(field: PropertyField, raw: &str) -> Result<f64, DesignError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DesignError::InvalidNumber {
            field: field.key().to_string(),
            input: raw.to_string(),
        })
}

fn invalid_value(field: PropertyField, raw: &str) -> DesignError {
    DesignError::InvalidValue {
        field: field.key().to_string(),
        input: raw.to_string(),
    }
}

fn parse_toggle(field: PropertyField, raw: &str) -> Result<bool, DesignError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "1" | "yes" => Ok(true),
        "false" | "off" | "0" | "no" => Ok(false),
        _ => Err(invalid_value(field, raw)),
    }
}

fn stroke_with(
    current: Option<&Stroke>,
    color: Option<String>,
    width: Option<f64>,
) -> Option<Stroke> {
    let mut stroke = current.cloned().unwrap_or(Stroke {
        color: DEFAULT_STROKE_COLOR.to_string(),
        width: DEFAULT_STROKE_WIDTH,
    });
    if let Some(color) = color {
        stroke.color = color;
    }
    if let Some(width) = width {
        stroke.width = width;
    }
    (stroke.width > 0.0).then_some(stroke)
}

/// Builds the patch for one field edit on `element`.
pub fn patch_for_input(
    element: &Element,
    field: PropertyField,
    raw: &str,
) -> Result<ElementPatch, DesignError> {
    if !fields_for(element).contains(&field) {
        return Err(DesignError::FieldNotApplicable {
            field: field.key().to_string(),
            kind: element.element_type().to_string(),
        });
    }

    let mut patch = ElementPatch::new();
    if field.is_numeric() {
        let value = parse_number(field, raw)?;
        let stroke = element.kind.shape_style().and_then(|s| s.stroke.as_ref());
        match field {
            PropertyField::X => patch.x = Some(value),
            PropertyField::Y => patch.y = Some(value),
            PropertyField::Width => patch.width = Some(value),
            PropertyField::Height => patch.height = Some(value),
            PropertyField::Opacity => patch.opacity = Some(value / 100.0),
            PropertyField::FontSize => patch.font_size = Some(value),
            PropertyField::CornerRadius => patch.corner_radius = Some(value),
            PropertyField::StrokeWidth => {
                patch.stroke = Some(stroke_with(stroke, None, Some(value)))
            }
            PropertyField::Brightness => patch.brightness = Some(value),
            PropertyField::Contrast => patch.contrast = Some(value),
            PropertyField::Saturation => patch.saturation = Some(value),
            _ => patch.blur = Some(value),
        }
        return Ok(patch);
    }

    let text = raw.to_string();
    match field {
        PropertyField::Content => patch.content = Some(text),
        PropertyField::MergeTag => {
            let descriptor =
                MergeTagDescriptor::find(raw.trim()).ok_or_else(|| invalid_value(field, raw))?;
            patch.merge_tag = Some(descriptor.tag.to_string());
        }
        PropertyField::FontFamily => {
            let family = raw.trim();
            if family.is_empty() {
                return Err(invalid_value(field, raw));
            }
            patch.font_family = Some(family.to_string());
        }
        PropertyField::FontWeight => {
            patch.font_weight = Some(if parse_toggle(field, raw)? {
                FontWeight::Bold
            } else {
                FontWeight::Normal
            })
        }
        PropertyField::FontStyle => {
            patch.font_style = Some(if parse_toggle(field, raw)? {
                FontStyle::Italic
            } else {
                FontStyle::Normal
            })
        }
        PropertyField::TextAlign => {
            patch.text_align = Some(TextAlign::parse(raw).ok_or_else(|| invalid_value(field, raw))?)
        }
        PropertyField::Color | PropertyField::FillColor => patch.color = Some(text),
        PropertyField::FillType => {
            patch.gradient = Some(match raw.trim().to_ascii_lowercase().as_str() {
                "solid" => false,
                "gradient" => true,
                _ => return Err(invalid_value(field, raw)),
            })
        }
        PropertyField::GradientEnd => patch.gradient_end = Some(text),
        PropertyField::GradientDirection => {
            patch.gradient_direction =
                Some(GradientDirection::parse(raw).ok_or_else(|| invalid_value(field, raw))?)
        }
        PropertyField::StrokeColor => {
            let stroke = element.kind.shape_style().and_then(|s| s.stroke.as_ref());
            patch.stroke = Some(stroke_with(stroke, Some(text), None));
        }
        PropertyField::ImageSource => patch.src = Some(raw.trim().to_string()),
        PropertyField::ObjectFit => {
            patch.object_fit = Some(ObjectFit::parse(raw).ok_or_else(|| invalid_value(field, raw))?)
        }
        _ => return Err(invalid_value(field, raw)),
    }
    Ok(patch)
}

/// Applies raw input for `field` to the selected element.
///
/// Numeric fields reject text that is not a finite number and leave the
/// model untouched. Returns whether the element changed.
pub fn apply_input(
    canvas: &mut Canvas,
    field: PropertyField,
    raw: &str,
) -> Result<bool, DesignError> {
    let element = canvas.selected_element().ok_or(DesignError::NoSelection)?;
    let id = element.id;
    let patch = patch_for_input(element, field, raw).inspect_err(|e| {
        tracing::warn!("Rejected property input: {}", e);
    })?;
    Ok(canvas.update_element(id, &patch))
}

fn selected_text_style(canvas: &Canvas) -> Result<(ElementId, FontWeight, FontStyle), DesignError> {
    let element = canvas.selected_element().ok_or(DesignError::NoSelection)?;
    let style = element
        .kind
        .text_style()
        .ok_or_else(|| DesignError::FieldNotApplicable {
            field: PropertyField::FontWeight.key().to_string(),
            kind: element.element_type().to_string(),
        })?;
    Ok((element.id, style.font_weight, style.font_style))
}

/// Flips bold on the selected text or merge-tag element.
pub fn toggle_bold(canvas: &mut Canvas) -> Result<FontWeight, DesignError> {
    let (id, weight, _) = selected_text_style(canvas)?;
    let weight = weight.toggled();
    canvas.update_element(
        id,
        &ElementPatch {
            font_weight: Some(weight),
            ..Default::default()
        },
    );
    Ok(weight)
}

/// Flips italic on the selected text or merge-tag element.
pub fn toggle_italic(canvas: &mut Canvas) -> Result<FontStyle, DesignError> {
    let (id, _, style) = selected_text_style(canvas)?;
    let style = style.toggled();
    canvas.update_element(
        id,
        &ElementPatch {
            font_style: Some(style),
            ..Default::default()
        },
    );
    Ok(style)
}

pub fn set_text_align(canvas: &mut Canvas, align: TextAlign) -> Result<bool, DesignError> {
    let (id, _, _) = selected_text_style(canvas)?;
    Ok(canvas.update_element(
        id,
        &ElementPatch {
            text_align: Some(align),
            ..Default::default()
        },
    ))
}

/// Switches the selected shape between a solid and a gradient fill.
pub fn set_fill_type(canvas: &mut Canvas, gradient: bool) -> Result<bool, DesignError> {
    let element = canvas.selected_element().ok_or(DesignError::NoSelection)?;
    if element.kind.shape_style().is_none() {
        return Err(DesignError::FieldNotApplicable {
            field: PropertyField::FillType.key().to_string(),
            kind: element.element_type().to_string(),
        });
    }
    let id = element.id;
    Ok(canvas.update_element(
        id,
        &ElementPatch {
            gradient: Some(gradient),
            ..Default::default()
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas_with(ty: ElementType) -> (Canvas, ElementId) {
        let mut canvas = Canvas::new();
        let id = canvas.add_element(ty);
        (canvas, id)
    }

    #[test]
    fn test_empty_without_selection() {
        let (mut canvas, _) = canvas_with(ElementType::Text);
        canvas.deselect();
        assert!(PropertiesView::build(&canvas).is_empty());
        assert_eq!(
            apply_input(&mut canvas, PropertyField::X, "10"),
            Err(DesignError::NoSelection)
        );
    }

    #[test]
    fn test_field_sets_per_variant() {
        let (canvas, _) = canvas_with(ElementType::Rectangle);
        let PropertiesView::Element { rows, .. } = PropertiesView::build(&canvas) else {
            panic!("expected element view");
        };
        let fields: Vec<_> = rows.iter().map(|r| r.field).collect();
        assert_eq!(&fields[..5], &PropertyField::COMMON);
        assert!(fields.contains(&PropertyField::CornerRadius));
        assert!(!fields.contains(&PropertyField::GradientEnd));
        assert!(!fields.contains(&PropertyField::FontSize));

        let (canvas, _) = canvas_with(ElementType::Image);
        let view = PropertiesView::build(&canvas);
        assert_eq!(
            view.value(PropertyField::Brightness),
            Some(&PropertyValue::Number(100.0))
        );
        assert_eq!(view.value(PropertyField::Content), None);
    }

    #[test]
    fn test_invalid_number_leaves_model() {
        let (mut canvas, id) = canvas_with(ElementType::Text);
        let before = canvas.get_element(id).unwrap().clone();
        for raw in ["", "abc", "NaN", "inf", "12px"] {
            let result = apply_input(&mut canvas, PropertyField::FontSize, raw);
            assert!(
                matches!(result, Err(DesignError::InvalidNumber { .. })),
                "{raw:?} accepted"
            );
        }
        assert_eq!(canvas.get_element(id), Some(&before));
    }

    #[test]
    fn test_opacity_is_percent() {
        let (mut canvas, id) = canvas_with(ElementType::Circle);
        assert_eq!(apply_input(&mut canvas, PropertyField::Opacity, "40"), Ok(true));
        assert!((canvas.get_element(id).unwrap().opacity - 0.4).abs() < 1e-9);
        assert_eq!(
            PropertiesView::build(&canvas).value(PropertyField::Opacity),
            Some(&PropertyValue::Number(40.0))
        );
    }

    #[test]
    fn test_not_applicable_field() {
        let (mut canvas, _) = canvas_with(ElementType::Image);
        assert!(matches!(
            apply_input(&mut canvas, PropertyField::CornerRadius, "4"),
            Err(DesignError::FieldNotApplicable { .. })
        ));
        assert!(toggle_bold(&mut canvas).is_err());
    }

    #[test]
    fn test_text_helpers() {
        let (mut canvas, id) = canvas_with(ElementType::MergeTag);
        assert_eq!(toggle_bold(&mut canvas), Ok(FontWeight::Normal));
        assert_eq!(toggle_italic(&mut canvas), Ok(FontStyle::Italic));
        assert_eq!(set_text_align(&mut canvas, TextAlign::Center), Ok(true));
        apply_input(&mut canvas, PropertyField::MergeTag, "{{ZipCode}}").unwrap();

        let el = canvas.get_element(id).unwrap();
        let style = el.kind.text_style().unwrap();
        assert_eq!(style.text_align, TextAlign::Center);
        match &el.kind {
            ElementKind::MergeTag(m) => assert_eq!(m.label, "Zip Code"),
            other => panic!("unexpected kind {:?}", other),
        }
        assert!(apply_input(&mut canvas, PropertyField::MergeTag, "{{Nope}}").is_err());
    }

    #[test]
    fn test_fill_type_and_stroke() {
        let (mut canvas, id) = canvas_with(ElementType::Rectangle);
        assert_eq!(set_fill_type(&mut canvas, true), Ok(true));
        let view = PropertiesView::build(&canvas);
        assert_eq!(
            view.value(PropertyField::GradientEnd),
            Some(&PropertyValue::Text("#1E40AF".to_string()))
        );

        apply_input(&mut canvas, PropertyField::StrokeWidth, "3").unwrap();
        apply_input(&mut canvas, PropertyField::StrokeColor, "#FF0000").unwrap();
        let stroke = canvas
            .get_element(id)
            .and_then(|e| e.kind.shape_style())
            .and_then(|s| s.stroke.clone())
            .unwrap();
        assert_eq!(stroke.color, "#FF0000");
        assert_eq!(stroke.width, 3.0);

        apply_input(&mut canvas, PropertyField::StrokeWidth, "0").unwrap();
        assert!(canvas
            .get_element(id)
            .and_then(|e| e.kind.shape_style())
            .is_some_and(|s| s.stroke.is_none()));
    }
}
