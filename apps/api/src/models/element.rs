//! Positioned canvas objects and the persisted page/document shapes.
//!
//! Serialized field names follow the canvas JSON the editor stores:
//! `type`, `left`, `top`, `width`, `height`, per-type style fields, plus
//! `semanticType` / `semanticGroup`. Unknown fields are ignored and unknown
//! semantic tags load as untagged.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::semantic::vocabulary::{deserialize_lenient_tag, SemanticCategory, SemanticTag};

pub const PAGE_FORMAT_VERSION: &str = "1.0";

// ────────────────────────────────────────────────────────────────────────────
// Element
// ────────────────────────────────────────────────────────────────────────────

/// One positioned text or shape item on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualElement {
    #[serde(default = "new_element_id")]
    pub id: String,
    #[serde(default)]
    pub left: f32,
    #[serde(default)]
    pub top: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    #[serde(flatten)]
    pub kind: ElementKind,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_lenient_tag"
    )]
    pub semantic_type: Option<SemanticTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    #[serde(alias = "textbox", alias = "i-text")]
    Text(TextProps),
    Rect(ShapeProps),
    Circle(ShapeProps),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default)]
    pub font_weight: FontWeight,
    #[serde(default = "default_fill")]
    pub fill: String,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_line_height")]
    pub line_height: f32,
    /// Letter spacing in 1/1000 em, as the canvas stores it.
    #[serde(default)]
    pub char_spacing: f32,
    #[serde(default)]
    pub text_align: TextAlign,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeProps {
    #[serde(default = "default_fill")]
    pub fill: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default)]
    pub stroke_width: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
}

fn new_element_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_font_size() -> f32 {
    12.0
}

fn default_fill() -> String {
    "#000000".to_string()
}

fn default_font_family() -> String {
    "Helvetica".to_string()
}

fn default_line_height() -> f32 {
    1.16
}

// ────────────────────────────────────────────────────────────────────────────
// Font weight / alignment
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    /// Accepts CSS keywords and numeric weights; 600 and above is bold.
    pub fn parse(raw: &str) -> FontWeight {
        let raw = raw.trim().to_lowercase();
        match raw.as_str() {
            "bold" | "bolder" | "semibold" | "extrabold" | "black" => FontWeight::Bold,
            _ => raw
                .parse::<f64>()
                .map(FontWeight::from_numeric)
                .unwrap_or(FontWeight::Normal),
        }
    }

    fn from_numeric(weight: f64) -> FontWeight {
        if weight >= 600.0 {
            FontWeight::Bold
        } else {
            FontWeight::Normal
        }
    }

    pub fn is_bold(self) -> bool {
        self == FontWeight::Bold
    }
}

impl<'de> Deserialize<'de> for FontWeight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(weight) => FontWeight::from_numeric(weight),
            Raw::Text(text) => FontWeight::parse(&text),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl<'de> Deserialize<'de> for TextAlign {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.trim().to_lowercase().as_str() {
            "center" => TextAlign::Center,
            "right" => TextAlign::Right,
            "justify" | "justify-left" | "justify-center" | "justify-right" => TextAlign::Justify,
            _ => TextAlign::Left,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Accessors
// ────────────────────────────────────────────────────────────────────────────

impl VisualElement {
    pub fn new_text(props: TextProps, left: f32, top: f32, width: f32, height: f32) -> Self {
        VisualElement {
            id: new_element_id(),
            left,
            top,
            width,
            height,
            kind: ElementKind::Text(props),
            semantic_type: None,
            semantic_group: None,
        }
    }

    pub fn new_rect(fill: &str, left: f32, top: f32, width: f32, height: f32) -> Self {
        VisualElement {
            id: new_element_id(),
            left,
            top,
            width,
            height,
            kind: ElementKind::Rect(ShapeProps {
                fill: fill.to_string(),
                stroke: None,
                stroke_width: 0.0,
                radius: None,
            }),
            semantic_type: None,
            semantic_group: None,
        }
    }

    pub fn new_circle(fill: &str, center_x: f32, center_y: f32, radius: f32) -> Self {
        VisualElement {
            id: new_element_id(),
            left: center_x - radius,
            top: center_y - radius,
            width: radius * 2.0,
            height: radius * 2.0,
            kind: ElementKind::Circle(ShapeProps {
                fill: fill.to_string(),
                stroke: None,
                stroke_width: 0.0,
                radius: Some(radius),
            }),
            semantic_type: None,
            semantic_group: None,
        }
    }

    pub fn with_tag(mut self, tag: SemanticTag) -> Self {
        self.semantic_type = Some(tag);
        self
    }

    pub fn with_group(mut self, group: Option<String>) -> Self {
        self.semantic_group = group;
        self
    }

    pub fn text_props(&self) -> Option<&TextProps> {
        match &self.kind {
            ElementKind::Text(props) => Some(props),
            _ => None,
        }
    }

    pub fn text_props_mut(&mut self) -> Option<&mut TextProps> {
        match &mut self.kind {
            ElementKind::Text(props) => Some(props),
            _ => None,
        }
    }

    pub fn shape_props_mut(&mut self) -> Option<&mut ShapeProps> {
        match &mut self.kind {
            ElementKind::Rect(props) | ElementKind::Circle(props) => Some(props),
            ElementKind::Text(_) => None,
        }
    }

    /// Text content, for text elements only.
    pub fn text(&self) -> Option<&str> {
        self.text_props().map(|p| p.text.as_str())
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ElementKind::Text(_))
    }

    pub fn is_bold(&self) -> bool {
        self.text_props().is_some_and(|p| p.font_weight.is_bold())
    }

    pub fn font_size(&self) -> f32 {
        self.text_props().map_or(0.0, |p| p.font_size)
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn center_x(&self) -> f32 {
        self.left + self.width / 2.0
    }

    pub fn category(&self) -> Option<SemanticCategory> {
        self.semantic_type.map(SemanticTag::category)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Persisted shapes
// ────────────────────────────────────────────────────────────────────────────

/// One canvas page: `{ version, objects, background }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub objects: Vec<VisualElement>,
    #[serde(default = "default_background")]
    pub background: String,
}

/// A multi-page document: `{ pages }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub pages: Vec<Page>,
}

fn default_version() -> String {
    PAGE_FORMAT_VERSION.to_string()
}

fn default_background() -> String {
    "#ffffff".to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_element_serializes_with_type_and_semantics() {
        let props = TextProps {
            text: "Engineer".to_string(),
            font_size: 14.0,
            font_weight: FontWeight::Bold,
            fill: "#111111".to_string(),
            font_family: "Inter".to_string(),
            line_height: 1.2,
            char_spacing: 0.0,
            text_align: TextAlign::Left,
        };
        let el = VisualElement::new_text(props, 10.0, 20.0, 300.0, 18.0)
            .with_tag(SemanticTag::ExperienceTitle)
            .with_group(Some("experience_0".to_string()));
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["semanticType"], "experience_title");
        assert_eq!(json["semanticGroup"], "experience_0");
        assert_eq!(json["fontWeight"], "bold");
        assert_eq!(json["left"], 10.0);
    }

    #[test]
    fn test_canvas_json_with_unknown_fields_loads() {
        let el: VisualElement = serde_json::from_str(
            r#"{"type": "textbox", "left": 5, "top": 7, "text": "JOHN SMITH",
                "fontSize": 28, "fontWeight": 700, "angle": 0, "opacity": 1,
                "semanticType": "tag_from_the_future"}"#,
        )
        .unwrap();
        assert!(el.is_text());
        assert!(el.is_bold(), "numeric weight 700 should read as bold");
        assert_eq!(el.font_size(), 28.0);
        assert_eq!(el.semantic_type, None, "unknown tags load as untagged");
        assert!(!el.id.is_empty());
    }

    #[test]
    fn test_rect_round_trip() {
        let el = VisualElement::new_rect("#223344", 0.0, 0.0, 250.0, 1123.0)
            .with_tag(SemanticTag::SidebarBackground);
        let json = serde_json::to_string(&el).unwrap();
        let back: VisualElement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, el);
    }

    #[test]
    fn test_font_weight_parse() {
        assert_eq!(FontWeight::parse("bold"), FontWeight::Bold);
        assert_eq!(FontWeight::parse("600"), FontWeight::Bold);
        assert_eq!(FontWeight::parse("400"), FontWeight::Normal);
        assert_eq!(FontWeight::parse("weird"), FontWeight::Normal);
    }

    #[test]
    fn test_page_defaults() {
        let page: Page = serde_json::from_str(r#"{"objects": []}"#).unwrap();
        assert_eq!(page.version, PAGE_FORMAT_VERSION);
        assert_eq!(page.background, "#ffffff");
    }
}
