//! Element emission: columns with a running cursor, text/shape construction
//! and the one section emitter every layout goes through.

use tracing::debug;

use crate::layout::font_metrics::{estimate_height, estimate_width};
use crate::layout::sections::{ContentLine, SectionBody, SectionContent, LIST_SEPARATOR};
use crate::models::element::{FontWeight, TextAlign, TextProps, VisualElement};
use crate::models::style::StyleConfig;
use crate::semantic::vocabulary::SemanticTag;
use crate::templates::zones::{
    resolve_element_style, BandZone, ColumnZone, ElementStyle, Region, TemplateZones,
};

/// Vertical gap between lines of one entry.
pub const LINE_GAP: f32 = 2.0;

/// Horizontal gap between fields of an inline row.
pub const INLINE_GAP: f32 = 16.0;

/// Columns narrower than this list skills one per line.
pub const NARROW_COLUMN: f32 = 300.0;

/// Extra room a single-line field reserves over its line height.
const SINGLE_LINE_PAD: f32 = 4.0;

const DIVIDER_THICKNESS: f32 = 1.0;
const DIVIDER_GAP: f32 = 6.0;

/// A column being filled top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub x: f32,
    pub width: f32,
    pub y: f32,
    pub region: Region,
}

impl Column {
    pub fn from_zone(zone: &ColumnZone) -> Self {
        Column {
            x: zone.x,
            width: zone.width,
            y: zone.top,
            region: zone.region,
        }
    }
}

/// Tags whose content wraps freely; everything else is a one-line field.
pub fn is_multiline(tag: SemanticTag) -> bool {
    matches!(
        tag,
        SemanticTag::Summary
            | SemanticTag::Profile
            | SemanticTag::Objective
            | SemanticTag::AboutMe
            | SemanticTag::SkillList
            | SemanticTag::InterestList
            | SemanticTag::CustomText
            | SemanticTag::CustomItem
            | SemanticTag::Description
            | SemanticTag::AdditionalInfo
            | SemanticTag::ProjectTechnologies
    ) || tag.as_str().ends_with("_description")
        || tag.as_str().ends_with("_bullet")
}

/// Height a text box needs: the estimate, and for one-line fields never less
/// than a fixed increment.
pub fn text_box_height(tag: SemanticTag, text: &str, style: &ElementStyle, width: f32) -> f32 {
    let estimate = estimate_height(
        text,
        style.font_size,
        style.line_height,
        width,
        style.bold,
    );
    if is_multiline(tag) {
        estimate
    } else {
        estimate.max((style.font_size * style.line_height).ceil() + SINGLE_LINE_PAD)
    }
}

pub fn text_props(text: &str, style: &ElementStyle, align: TextAlign) -> TextProps {
    TextProps {
        text: text.to_string(),
        font_size: style.font_size,
        font_weight: if style.bold {
            FontWeight::Bold
        } else {
            FontWeight::Normal
        },
        fill: style.color.clone(),
        font_family: style.font_family.clone(),
        line_height: style.line_height,
        char_spacing: style.char_spacing,
        text_align: align,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Writer
// ────────────────────────────────────────────────────────────────────────────

pub struct ElementWriter<'a> {
    zones: &'a TemplateZones,
    style: &'a StyleConfig,
    elements: Vec<VisualElement>,
}

impl<'a> ElementWriter<'a> {
    pub fn new(zones: &'a TemplateZones, style: &'a StyleConfig) -> Self {
        ElementWriter {
            zones,
            style,
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: VisualElement) -> usize {
        self.elements.push(element);
        self.elements.len() - 1
    }

    pub fn element_mut(&mut self, index: usize) -> Option<&mut VisualElement> {
        self.elements.get_mut(index)
    }

    /// Background shape for a band; height is settled by the caller later.
    pub fn band(&mut self, band: &BandZone) -> usize {
        self.push(
            VisualElement::new_rect(&band.fill, band.left, band.top, band.width, band.height)
                .with_tag(band.tag),
        )
    }

    /// Lowest edge of any text placed so far.
    pub fn content_bottom(&self) -> f32 {
        self.elements
            .iter()
            .filter(|e| e.is_text())
            .map(VisualElement::bottom)
            .fold(0.0, f32::max)
    }

    fn text_element(
        &self,
        line: &ContentLine,
        region: Region,
        left: f32,
        top: f32,
        width: f32,
        group: Option<&str>,
        align: TextAlign,
    ) -> VisualElement {
        let style = resolve_element_style(line.tag, region, self.zones, self.style);
        let height = text_box_height(line.tag, &line.text, &style, width);
        let mut element = VisualElement::new_text(
            text_props(&line.text, &style, align),
            left,
            top,
            width,
            height,
        )
        .with_tag(line.tag)
        .with_group(group.map(str::to_string));
        if let Some(id) = &line.id {
            element.id = id.clone();
        }
        element
    }

    /// Places one line at the column cursor and advances past it.
    pub fn line(
        &mut self,
        column: &mut Column,
        line: &ContentLine,
        group: Option<&str>,
        align: TextAlign,
    ) {
        let element = self.text_element(
            line,
            column.region,
            column.x,
            column.y,
            column.width,
            group,
            align,
        );
        column.y += element.height + LINE_GAP;
        self.push(element);
    }

    /// Lays `lines` out side by side, wrapping to a new row when the column
    /// is full.
    pub fn inline_row(&mut self, column: &mut Column, lines: &[ContentLine], align: TextAlign) {
        let measured: Vec<(usize, f32)> = lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let style =
                    resolve_element_style(line.tag, column.region, self.zones, self.style);
                let width = estimate_width(&line.text, style.font_size, style.bold, style.char_spacing)
                    + SINGLE_LINE_PAD;
                (i, width.min(column.width))
            })
            .collect();

        let mut rows: Vec<Vec<(usize, f32)>> = Vec::new();
        let mut used = 0.0;
        for (i, width) in measured {
            let fits = used + INLINE_GAP + width <= column.width;
            match rows.last_mut() {
                Some(row) if fits => {
                    used += INLINE_GAP + width;
                    row.push((i, width));
                }
                _ => {
                    used = width;
                    rows.push(vec![(i, width)]);
                }
            }
        }

        for row in rows {
            let row_width: f32 =
                row.iter().map(|(_, w)| w).sum::<f32>() + INLINE_GAP * (row.len() - 1) as f32;
            let slack = (column.width - row_width).max(0.0);
            let mut x = column.x
                + match align {
                    TextAlign::Center => slack / 2.0,
                    TextAlign::Right => slack,
                    _ => 0.0,
                };
            let mut row_height: f32 = 0.0;
            for (i, width) in row {
                let element = self.text_element(
                    &lines[i],
                    column.region,
                    x,
                    column.y,
                    width,
                    None,
                    TextAlign::Left,
                );
                row_height = row_height.max(element.height);
                x += width + INLINE_GAP;
                self.push(element);
            }
            column.y += row_height + LINE_GAP;
        }
    }

    /// Emits a section: header, optional divider, entries, trailing spacing.
    pub fn section(&mut self, column: &mut Column, content: &SectionContent) {
        if content.is_empty() {
            return;
        }
        let style: &'a StyleConfig = self.style;
        let spacing = &style.layout;

        if let Some(header) = &content.header {
            self.line(column, header, content.header_group.as_deref(), TextAlign::Left);
            if self.zones.dividers && column.region != Region::Header {
                let color =
                    resolve_element_style(header.tag, column.region, self.zones, self.style).color;
                self.push(
                    VisualElement::new_rect(&color, column.x, column.y, column.width, DIVIDER_THICKNESS)
                        .with_tag(SemanticTag::Divider),
                );
                column.y += DIVIDER_THICKNESS;
            }
            column.y += DIVIDER_GAP;
        }

        match &content.body {
            SectionBody::Entries(entries) => {
                let count = entries.len();
                for (i, entry) in entries.iter().enumerate() {
                    for line in &entry.lines {
                        self.line(column, line, entry.group.as_deref(), TextAlign::Left);
                    }
                    if i + 1 < count {
                        column.y += spacing.item_spacing;
                    }
                }
            }
            SectionBody::List {
                item_tag,
                list_tag,
                items,
            } => {
                if column.width < NARROW_COLUMN {
                    for (i, item) in items.iter().enumerate() {
                        let group = content.category.group_id(i);
                        let line = ContentLine::new(*item_tag, item.clone());
                        self.line(column, &line, Some(&group), TextAlign::Left);
                    }
                } else {
                    let group = content.category.group_id(0);
                    let line = ContentLine::new(*list_tag, items.join(LIST_SEPARATOR));
                    self.line(column, &line, Some(&group), TextAlign::Left);
                }
            }
        }
        column.y += spacing.section_spacing;
        debug!(category = ?content.category, y = column.y, "section placed");
    }

    /// Places an element as-is apart from its position, clamped to the column.
    pub fn carry_over(&mut self, column: &mut Column, mut element: VisualElement) {
        element.left = column.x;
        element.top = column.y;
        element.width = if element.width > 0.0 {
            element.width.min(column.width)
        } else {
            column.width
        };
        column.y += element.height + LINE_GAP;
        self.push(element);
    }

    pub fn finish(self) -> Vec<VisualElement> {
        self.elements
    }
}
