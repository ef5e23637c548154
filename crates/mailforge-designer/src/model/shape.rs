use serde::{Deserialize, Serialize};

/// Direction of a two-stop linear gradient, named after the CSS keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientDirection {
    #[default]
    ToBottom,
    ToTop,
    ToRight,
    ToLeft,
    ToBottomRight,
    ToBottomLeft,
}

impl GradientDirection {
    pub const ALL: [GradientDirection; 6] = [
        GradientDirection::ToBottom,
        GradientDirection::ToTop,
        GradientDirection::ToRight,
        GradientDirection::ToLeft,
        GradientDirection::ToBottomRight,
        GradientDirection::ToBottomLeft,
    ];

    pub fn css_keyword(&self) -> &'static str {
        match self {
            GradientDirection::ToBottom => "to bottom",
            GradientDirection::ToTop => "to top",
            GradientDirection::ToRight => "to right",
            GradientDirection::ToLeft => "to left",
            GradientDirection::ToBottomRight => "to bottom right",
            GradientDirection::ToBottomLeft => "to bottom left",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GradientDirection::ToBottom => "Top to Bottom",
            GradientDirection::ToTop => "Bottom to Top",
            GradientDirection::ToRight => "Left to Right",
            GradientDirection::ToLeft => "Right to Left",
            GradientDirection::ToBottomRight => "Diagonal ↘",
            GradientDirection::ToBottomLeft => "Diagonal ↙",
        }
    }

    /// Accepts the CSS keyword ("to bottom right") or the snake_case name.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase().replace('_', " ");
        Self::ALL.iter().copied().find(|d| d.css_keyword() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fill {
    Solid {
        color: String,
    },
    LinearGradient {
        start: String,
        end: String,
        #[serde(default)]
        direction: GradientDirection,
    },
}

impl Fill {
    pub fn solid(color: impl Into<String>) -> Self {
        Fill::Solid {
            color: color.into(),
        }
    }

    pub fn is_gradient(&self) -> bool {
        matches!(self, Fill::LinearGradient { .. })
    }

    /// The color used when the fill is shown as a single swatch.
    pub fn primary_color(&self) -> &str {
        match self {
            Fill::Solid { color } => color,
            Fill::LinearGradient { start, .. } => start,
        }
    }

    /// Converts to a gradient starting at the current color.
    pub fn into_gradient(self, default_end: &str) -> Self {
        match self {
            Fill::Solid { color } => Fill::LinearGradient {
                start: color,
                end: default_end.to_string(),
                direction: GradientDirection::ToBottom,
            },
            gradient => gradient,
        }
    }

    /// Converts to a solid fill using the gradient's start color.
    pub fn into_solid(self) -> Self {
        match self {
            Fill::LinearGradient { start, .. } => Fill::Solid { color: start },
            solid => solid,
        }
    }

    /// CSS `background` value.
    pub fn css(&self) -> String {
        match self {
            Fill::Solid { color } => color.clone(),
            Fill::LinearGradient {
                start,
                end,
                direction,
            } => format!(
                "linear-gradient({}, {}, {})",
                direction.css_keyword(),
                start,
                end
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub fill: Fill,
    #[serde(default)]
    pub stroke: Option<Stroke>,
    /// End color offered when the user switches the fill to a gradient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_end: Option<String>,
}

impl ShapeStyle {
    pub fn new(color: &str, gradient_end: &str) -> Self {
        Self {
            fill: Fill::solid(color),
            stroke: None,
            gradient_end: Some(gradient_end.to_string()),
        }
    }

    pub fn set_gradient(&mut self, enabled: bool) {
        let fill = std::mem::replace(&mut self.fill, Fill::solid(""));
        self.fill = if enabled {
            let end = self
                .gradient_end
                .clone()
                .unwrap_or_else(|| fill.primary_color().to_string());
            fill.into_gradient(&end)
        } else {
            if let Fill::LinearGradient { end, .. } = &fill {
                self.gradient_end = Some(end.clone());
            }
            fill.into_solid()
        };
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectangleElement {
    pub style: ShapeStyle,
    #[serde(default)]
    pub corner_radius: f64,
}

impl Default for RectangleElement {
    fn default() -> Self {
        Self {
            style: ShapeStyle::new("#3B82F6", "#1E40AF"),
            corner_radius: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleElement {
    pub style: ShapeStyle,
}

impl Default for CircleElement {
    fn default() -> Self {
        Self {
            style: ShapeStyle::new("#10B981", "#059669"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_toggle_keeps_colors() {
        let mut style = ShapeStyle::new("#3B82F6", "#1E40AF");
        style.set_gradient(true);
        assert_eq!(
            style.fill,
            Fill::LinearGradient {
                start: "#3B82F6".to_string(),
                end: "#1E40AF".to_string(),
                direction: GradientDirection::ToBottom,
            }
        );

        if let Fill::LinearGradient { end, .. } = &mut style.fill {
            *end = "#000000".to_string();
        }
        style.set_gradient(false);
        assert_eq!(style.fill, Fill::solid("#3B82F6"));

        // The edited end color comes back.
        style.set_gradient(true);
        assert!(style.fill.css().ends_with("#000000)"));
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(
            GradientDirection::parse("to bottom right"),
            Some(GradientDirection::ToBottomRight)
        );
        assert_eq!(
            GradientDirection::parse("to_left"),
            Some(GradientDirection::ToLeft)
        );
        assert_eq!(GradientDirection::parse("sideways"), None);
    }
}
