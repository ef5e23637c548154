//! # Postcard Template Catalog
//!
//! Built-in starting designs grouped by marketing occasion. The catalog is
//! static and read-only; loading a template replaces the whole design on a
//! canvas in one step, including the postcard size.

use std::sync::OnceLock;

use mailforge_core::{DesignError, ElementId};
use serde::{Deserialize, Serialize};

use crate::canvas::{Canvas, CanvasSize};
use crate::model::{
    CircleElement, Element, ElementKind, Fill, FontWeight, GradientDirection, ImageElement,
    MergeTagDescriptor, MergeTagElement, RectangleElement, ShapeStyle, TextAlign, TextElement,
    TextStyle,
};

/// Template categories for organizing postcards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateCategory {
    /// General agent branding and farming cards
    RealEstate,
    /// New listing announcements
    JustListed,
    /// Closed sale announcements
    JustSold,
    /// Open house invitations
    OpenHouse,
    /// Holiday and seasonal greetings
    Seasonal,
}

impl TemplateCategory {
    pub const ALL: [TemplateCategory; 5] = [
        TemplateCategory::RealEstate,
        TemplateCategory::JustListed,
        TemplateCategory::JustSold,
        TemplateCategory::OpenHouse,
        TemplateCategory::Seasonal,
    ];

    /// Get category as string
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateCategory::RealEstate => "real_estate",
            TemplateCategory::JustListed => "just_listed",
            TemplateCategory::JustSold => "just_sold",
            TemplateCategory::OpenHouse => "open_house",
            TemplateCategory::Seasonal => "seasonal",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TemplateCategory::RealEstate => "Real Estate",
            TemplateCategory::JustListed => "Just Listed",
            TemplateCategory::JustSold => "Just Sold",
            TemplateCategory::OpenHouse => "Open House",
            TemplateCategory::Seasonal => "Seasonal",
        }
    }

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s.trim())
    }
}

/// Category filter in the template picker; "All" disables filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(TemplateCategory),
}

impl CategoryFilter {
    pub fn matches(&self, category: TemplateCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }

    /// Parses "all" or a category name.
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Some(CategoryFilter::All);
        }
        TemplateCategory::parse(s).map(CategoryFilter::Only)
    }
}

/// A ready-made postcard design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostcardTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: TemplateCategory,
    pub size: CanvasSize,
    pub tags: Vec<String>,
    /// Elements bottom first. Ids here are placeholders; loading assigns
    /// fresh ones.
    pub elements: Vec<Element>,
}

impl PostcardTemplate {
    /// Case-insensitive match against name, description and tags.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&query))
    }
}

/// Read-only template catalog
#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    templates: Vec<PostcardTemplate>,
}

impl TemplateLibrary {
    pub fn new(templates: Vec<PostcardTemplate>) -> Self {
        Self { templates }
    }

    /// The catalog shipped with the editor.
    pub fn builtin() -> &'static TemplateLibrary {
        static LIBRARY: OnceLock<TemplateLibrary> = OnceLock::new();
        LIBRARY.get_or_init(|| TemplateLibrary::new(builtin_templates()))
    }

    pub fn list_all(&self) -> &[PostcardTemplate] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&PostcardTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Templates in `category` for postcards of `size`.
    pub fn filter(&self, category: CategoryFilter, size: CanvasSize) -> Vec<&PostcardTemplate> {
        self.templates
            .iter()
            .filter(|t| category.matches(t.category) && t.size == size)
            .collect()
    }

    pub fn search(&self, query: &str) -> Vec<&PostcardTemplate> {
        self.templates
            .iter()
            .filter(|t| t.matches_search(query))
            .collect()
    }

    pub fn count(&self) -> usize {
        self.templates.len()
    }

    /// Replaces the canvas contents with the template `id`.
    ///
    /// Unknown ids leave the canvas untouched.
    pub fn load_into(&self, id: &str, canvas: &mut Canvas) -> Result<Vec<ElementId>, DesignError> {
        let template = self
            .get(id)
            .ok_or_else(|| DesignError::TemplateNotFound(id.to_string()))?;
        Ok(canvas.load_template(template))
    }
}

impl Canvas {
    /// Swaps in the template's size and elements and clears the selection.
    pub fn load_template(&mut self, template: &PostcardTemplate) -> Vec<ElementId> {
        self.set_size(template.size);
        let ids = self.replace_elements(template.elements.clone());
        tracing::info!(
            "Loaded template '{}' ({} elements)",
            template.id,
            ids.len()
        );
        ids
    }
}

fn placeholder(kind: ElementKind, x: f64, y: f64, width: f64, height: f64) -> Element {
    Element::new(ElementId(0), kind, x, y, width, height)
}

fn background(size: CanvasSize, fill: Fill) -> Element {
    let style = ShapeStyle {
        fill,
        stroke: None,
        gradient_end: None,
    };
    placeholder(
        ElementKind::Rectangle(RectangleElement {
            style,
            corner_radius: 0.0,
        }),
        0.0,
        0.0,
        size.width(),
        size.height(),
    )
}

fn band(x: f64, y: f64, width: f64, height: f64, color: &str, radius: f64) -> Element {
    placeholder(
        ElementKind::Rectangle(RectangleElement {
            style: ShapeStyle {
                fill: Fill::solid(color),
                stroke: None,
                gradient_end: None,
            },
            corner_radius: radius,
        }),
        x,
        y,
        width,
        height,
    )
}

fn text(content: &str, x: f64, y: f64, width: f64, height: f64, style: TextStyle) -> Element {
    placeholder(
        ElementKind::Text(TextElement {
            content: content.to_string(),
            style,
        }),
        x,
        y,
        width,
        height,
    )
}

fn heading(size: f64, color: &str, align: TextAlign) -> TextStyle {
    TextStyle {
        font_size: size,
        font_weight: FontWeight::Bold,
        text_align: align,
        color: color.to_string(),
        ..TextStyle::default()
    }
}

fn body(size: f64, color: &str) -> TextStyle {
    TextStyle {
        font_size: size,
        color: color.to_string(),
        ..TextStyle::default()
    }
}

fn merge_tag(tag: &str, x: f64, y: f64) -> Element {
    let descriptor = MergeTagDescriptor::find(tag).unwrap_or(&crate::model::MERGE_TAGS[0]);
    placeholder(
        ElementKind::MergeTag(MergeTagElement::from_descriptor(descriptor)),
        x,
        y,
        150.0,
        30.0,
    )
}

fn photo(x: f64, y: f64, width: f64, height: f64) -> Element {
    placeholder(ElementKind::Image(ImageElement::default()), x, y, width, height)
}

fn gradient(start: &str, end: &str, direction: GradientDirection) -> Fill {
    Fill::LinearGradient {
        start: start.to_string(),
        end: end.to_string(),
        direction,
    }
}

fn template(
    id: &str,
    name: &str,
    description: &str,
    category: TemplateCategory,
    size: CanvasSize,
    tags: &[&str],
    elements: Vec<Element>,
) -> PostcardTemplate {
    PostcardTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category,
        size,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        elements,
    }
}

fn builtin_templates() -> Vec<PostcardTemplate> {
    use CanvasSize::{FourBySix, SixByEleven, SixByNine};
    use TemplateCategory::*;

    vec![
        template(
            "just-listed-classic",
            "Just Listed Classic",
            "Photo left, bold headline and listing details on the right",
            JustListed,
            FourBySix,
            &["listing", "photo", "navy"],
            vec![
                background(FourBySix, Fill::solid("#F8FAFC")),
                photo(20.0, 20.0, 280.0, 360.0),
                text(
                    "JUST LISTED",
                    320.0,
                    40.0,
                    260.0,
                    50.0,
                    heading(36.0, "#0F172A", TextAlign::Left),
                ),
                text("123 Maple Street", 320.0, 110.0, 260.0, 30.0, body(20.0, "#1E293B")),
                text(
                    "3 Beds | 2 Baths | 1,850 sq ft",
                    320.0,
                    150.0,
                    260.0,
                    30.0,
                    body(16.0, "#475569"),
                ),
                band(320.0, 300.0, 260.0, 60.0, "#3B82F6", 8.0),
                text(
                    "Call for a private showing",
                    330.0,
                    315.0,
                    240.0,
                    30.0,
                    heading(16.0, "#FFFFFF", TextAlign::Center),
                ),
            ],
        ),
        template(
            "just-listed-wide",
            "Just Listed Panorama",
            "Full-width photo with a gradient caption band",
            JustListed,
            SixByEleven,
            &["listing", "photo", "gradient"],
            vec![
                background(SixByEleven, gradient("#0F172A", "#1E40AF", GradientDirection::ToRight)),
                photo(0.0, 0.0, 1100.0, 420.0),
                text(
                    "Just Listed in Your Neighborhood",
                    40.0,
                    440.0,
                    700.0,
                    60.0,
                    heading(40.0, "#FFFFFF", TextAlign::Left),
                ),
                merge_tag("{{FirstName}}", 40.0, 520.0),
                text(
                    "see what your home could be worth",
                    200.0,
                    520.0,
                    500.0,
                    30.0,
                    body(18.0, "#CBD5E1"),
                ),
            ],
        ),
        template(
            "just-sold-banner",
            "Just Sold Banner",
            "Diagonal sold banner over a large photo",
            JustSold,
            FourBySix,
            &["sold", "banner", "red"],
            vec![
                photo(0.0, 0.0, 600.0, 400.0),
                band(0.0, 300.0, 600.0, 100.0, "#DC2626", 0.0),
                text(
                    "JUST SOLD",
                    20.0,
                    315.0,
                    560.0,
                    50.0,
                    heading(44.0, "#FFFFFF", TextAlign::Center),
                ),
                text(
                    "Thinking of selling? Let's talk.",
                    20.0,
                    365.0,
                    560.0,
                    25.0,
                    body(16.0, "#FEE2E2"),
                ),
            ],
        ),
        template(
            "just-sold-stats",
            "Just Sold Market Stats",
            "Sold price callout with neighborhood stats and a personal greeting",
            JustSold,
            SixByNine,
            &["sold", "stats", "market"],
            vec![
                background(SixByNine, Fill::solid("#FFFFFF")),
                band(0.0, 0.0, 900.0, 120.0, "#0F172A", 0.0),
                text(
                    "SOLD IN 6 DAYS",
                    40.0,
                    35.0,
                    820.0,
                    50.0,
                    heading(40.0, "#FFFFFF", TextAlign::Center),
                ),
                photo(40.0, 150.0, 400.0, 300.0),
                text("Hi", 480.0, 160.0, 40.0, 30.0, body(20.0, "#1E293B")),
                merge_tag("{{FirstName}}", 520.0, 160.0),
                text(
                    "Homes on your street are in demand.",
                    480.0,
                    210.0,
                    380.0,
                    60.0,
                    body(20.0, "#1E293B"),
                ),
                text(
                    "98% of asking | 12 offers",
                    480.0,
                    300.0,
                    380.0,
                    40.0,
                    heading(24.0, "#10B981", TextAlign::Left),
                ),
                merge_tag("{{Address}}", 480.0, 520.0),
                merge_tag("{{City}}", 640.0, 520.0),
            ],
        ),
        template(
            "open-house-invite",
            "Open House Invite",
            "Date block and address with a friendly invitation",
            OpenHouse,
            FourBySix,
            &["open house", "event", "green"],
            vec![
                background(FourBySix, gradient("#ECFDF5", "#D1FAE5", GradientDirection::ToBottom)),
                text(
                    "You're Invited",
                    40.0,
                    30.0,
                    520.0,
                    50.0,
                    heading(36.0, "#065F46", TextAlign::Center),
                ),
                text(
                    "OPEN HOUSE",
                    40.0,
                    90.0,
                    520.0,
                    40.0,
                    heading(28.0, "#10B981", TextAlign::Center),
                ),
                placeholder(
                    ElementKind::Circle(CircleElement::default()),
                    250.0,
                    150.0,
                    100.0,
                    100.0,
                ),
                text(
                    "Sat 1-4 PM",
                    250.0,
                    185.0,
                    100.0,
                    30.0,
                    heading(16.0, "#FFFFFF", TextAlign::Center),
                ),
                text("456 Oak Avenue", 40.0, 280.0, 520.0, 30.0, body(20.0, "#1E293B")),
                text("Refreshments provided", 40.0, 330.0, 520.0, 30.0, body(16.0, "#475569")),
            ],
        ),
        template(
            "agent-introduction",
            "Agent Introduction",
            "Headshot, name and tagline for farming a new area",
            RealEstate,
            SixByNine,
            &["branding", "agent", "farming"],
            vec![
                background(SixByNine, Fill::solid("#F8FAFC")),
                photo(60.0, 60.0, 240.0, 240.0),
                text(
                    "Your Neighborhood Expert",
                    340.0,
                    80.0,
                    520.0,
                    60.0,
                    heading(40.0, "#0F172A", TextAlign::Left),
                ),
                text(
                    "Local knowledge. Real results.",
                    340.0,
                    160.0,
                    520.0,
                    40.0,
                    body(24.0, "#475569"),
                ),
                band(60.0, 480.0, 780.0, 80.0, "#3B82F6", 12.0),
                text(
                    "Scan for a free home valuation",
                    80.0,
                    505.0,
                    740.0,
                    30.0,
                    heading(22.0, "#FFFFFF", TextAlign::Center),
                ),
            ],
        ),
        template(
            "holiday-greetings",
            "Holiday Greetings",
            "Seasonal greeting with a personal merge tag",
            Seasonal,
            FourBySix,
            &["holiday", "greeting", "winter"],
            vec![
                background(
                    FourBySix,
                    gradient("#7F1D1D", "#DC2626", GradientDirection::ToBottomRight),
                ),
                text(
                    "Happy Holidays",
                    40.0,
                    120.0,
                    520.0,
                    60.0,
                    heading(48.0, "#FFFFFF", TextAlign::Center),
                ),
                merge_tag("{{FirstName}}", 225.0, 200.0),
                text(
                    "Wishing you and your family a wonderful season",
                    60.0,
                    260.0,
                    480.0,
                    30.0,
                    body(16.0, "#FEE2E2"),
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ElementType;

    #[test]
    fn test_category_parse() {
        for category in TemplateCategory::ALL {
            assert_eq!(TemplateCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(CategoryFilter::parse("All"), Some(CategoryFilter::All));
        assert_eq!(
            CategoryFilter::parse("open_house"),
            Some(CategoryFilter::Only(TemplateCategory::OpenHouse))
        );
        assert_eq!(TemplateCategory::parse("spooky"), None);
    }

    #[test]
    fn test_builtin_templates_fit_their_canvas() {
        let library = TemplateLibrary::builtin();
        assert!(library.count() >= 5);
        for template in library.list_all() {
            assert!(!template.elements.is_empty(), "{}", template.id);
            for el in &template.elements {
                assert!(
                    el.x >= 0.0
                        && el.y >= 0.0
                        && el.x + el.width <= template.size.width()
                        && el.y + el.height <= template.size.height(),
                    "{} has an element outside the canvas",
                    template.id
                );
            }
        }
    }

    #[test]
    fn test_filter_by_category_and_size() {
        let library = TemplateLibrary::builtin();
        let all_small = library.filter(CategoryFilter::All, CanvasSize::FourBySix);
        assert!(all_small.iter().all(|t| t.size == CanvasSize::FourBySix));

        let sold = library.filter(
            CategoryFilter::Only(TemplateCategory::JustSold),
            CanvasSize::FourBySix,
        );
        assert!(!sold.is_empty());
        assert!(sold.iter().all(|t| t.category == TemplateCategory::JustSold));
        assert!(sold.len() < all_small.len());
    }

    #[test]
    fn test_unknown_template_leaves_canvas() {
        let mut canvas = Canvas::new();
        let id = canvas.add_element(ElementType::Text);
        let err = TemplateLibrary::builtin()
            .load_into("no-such-template", &mut canvas)
            .unwrap_err();
        assert_eq!(err, DesignError::TemplateNotFound("no-such-template".to_string()));
        assert_eq!(canvas.element_store.ids(), vec![id]);
        assert_eq!(canvas.selected_id(), Some(id));
    }

    #[test]
    fn test_search() {
        let library = TemplateLibrary::builtin();
        let hits = library.search("HOLIDAY");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].category, TemplateCategory::Seasonal);
    }
}
