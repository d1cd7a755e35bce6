//! Content model shared by the forward renderer and the template switcher.
//!
//! A `LayoutPlan` is the resume broken into tagged lines, grouped into
//! sections and entries, with no geometry. The renderer builds one from a
//! `ResumeRecord`; the switcher builds one from existing canvas elements so
//! their ids survive. Both hand the plan to the same composer.

use crate::models::element::VisualElement;
use crate::models::resume::{Education, Experience, Project, ResumeRecord};
use crate::semantic::patterns::{format_date_range, strip_bullet};
use crate::semantic::vocabulary::{SemanticCategory, SemanticTag};

pub const BULLET: &str = "•";

/// Separator used inside composite lines ("Acme | Berlin").
pub const FIELD_SEPARATOR: &str = " | ";

/// Separator used by single-element skill and interest lists.
pub const LIST_SEPARATOR: &str = " • ";

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// One text element to be placed.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentLine {
    /// Existing element id to keep; `None` mints a fresh one.
    pub id: Option<String>,
    pub tag: SemanticTag,
    pub text: String,
}

impl ContentLine {
    pub fn new(tag: SemanticTag, text: impl Into<String>) -> Self {
        ContentLine {
            id: None,
            tag,
            text: text.into(),
        }
    }

    /// Lifts a tagged text element, keeping its id and text.
    pub fn from_element(element: &VisualElement) -> Option<Self> {
        let tag = element.semantic_type?;
        let text = element.text()?;
        Some(ContentLine {
            id: Some(element.id.clone()),
            tag,
            text: text.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentEntry {
    pub group: Option<String>,
    pub lines: Vec<ContentLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    Entries(Vec<ContentEntry>),
    /// Short items, one element each in narrow columns or joined into one
    /// list element in wide ones.
    List {
        item_tag: SemanticTag,
        list_tag: SemanticTag,
        items: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionContent {
    pub category: SemanticCategory,
    pub header: Option<ContentLine>,
    pub header_group: Option<String>,
    pub body: SectionBody,
}

impl SectionContent {
    pub fn is_empty(&self) -> bool {
        let body_empty = match &self.body {
            SectionBody::Entries(entries) => entries.iter().all(|e| e.lines.is_empty()),
            SectionBody::List { items, .. } => items.is_empty(),
        };
        self.header.is_none() && body_empty
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutPlan {
    pub personal: Vec<ContentLine>,
    pub contact: Vec<ContentLine>,
    /// Header used when contact renders as a stacked section.
    pub contact_header: Option<ContentLine>,
    pub sections: Vec<SectionContent>,
    /// Elements placed after all sections with their own styling intact.
    pub carry_over: Vec<VisualElement>,
}

/// Default header line for a category: its label in capitals.
pub fn header_line(category: SemanticCategory) -> Option<ContentLine> {
    let tag = category.section_tag()?;
    Some(ContentLine::new(tag, category.label().to_uppercase()))
}

fn join_non_empty(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn bullet_line(tag: SemanticTag, text: &str) -> Option<ContentLine> {
    let body = strip_bullet(text);
    (!body.is_empty()).then(|| ContentLine::new(tag, format!("{BULLET} {body}")))
}

fn push_if(lines: &mut Vec<ContentLine>, tag: SemanticTag, text: String) {
    if !text.trim().is_empty() {
        lines.push(ContentLine::new(tag, text.trim()));
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Record → plan
// ────────────────────────────────────────────────────────────────────────────

fn experience_lines(exp: &Experience) -> Vec<ContentLine> {
    let mut lines = Vec::new();
    push_if(&mut lines, SemanticTag::ExperienceTitle, exp.title.clone());
    push_if(
        &mut lines,
        SemanticTag::ExperienceCompany,
        join_non_empty(&[&exp.company, &exp.location], FIELD_SEPARATOR),
    );
    push_if(
        &mut lines,
        SemanticTag::ExperienceDate,
        format_date_range(&exp.start_date, &exp.end_date, exp.current),
    );
    lines.extend(
        exp.description
            .iter()
            .filter_map(|d| bullet_line(SemanticTag::ExperienceDescription, d)),
    );
    lines
}

/// "Bachelor of Science in Physics", or whichever half is present.
pub fn degree_text(degree: &str, field: &str) -> String {
    match (degree.trim(), field.trim()) {
        ("", field) => field.to_string(),
        (degree, "") => degree.to_string(),
        (degree, field) => format!("{degree} in {field}"),
    }
}

fn education_lines(edu: &Education) -> Vec<ContentLine> {
    let mut lines = Vec::new();
    push_if(
        &mut lines,
        SemanticTag::EducationDegree,
        degree_text(&edu.degree, &edu.field),
    );
    push_if(
        &mut lines,
        SemanticTag::EducationInstitution,
        join_non_empty(&[&edu.institution, &edu.location], FIELD_SEPARATOR),
    );
    push_if(
        &mut lines,
        SemanticTag::EducationDate,
        format_date_range(&edu.start_date, &edu.end_date, false),
    );
    if !edu.gpa.trim().is_empty() {
        lines.push(ContentLine::new(
            SemanticTag::EducationGpa,
            format!("GPA: {}", edu.gpa.trim()),
        ));
    }
    lines.extend(
        edu.description
            .iter()
            .filter_map(|d| bullet_line(SemanticTag::EducationDescription, d)),
    );
    lines
}

fn project_lines(project: &Project) -> Vec<ContentLine> {
    let mut lines = Vec::new();
    push_if(&mut lines, SemanticTag::ProjectName, project.name.clone());
    push_if(
        &mut lines,
        SemanticTag::ProjectDescription,
        project.description.clone(),
    );
    let tech = join_non_empty(
        &project
            .technologies
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>(),
        ", ",
    );
    if !tech.is_empty() {
        lines.push(ContentLine::new(
            SemanticTag::ProjectTechnologies,
            format!("Technologies: {tech}"),
        ));
    }
    push_if(&mut lines, SemanticTag::ProjectUrl, project.url.clone());
    lines
}

/// Builds one entry per non-empty item, numbering groups densely.
fn entries<T>(
    category: SemanticCategory,
    items: &[T],
    lines_for: impl Fn(&T) -> Vec<ContentLine>,
) -> Vec<ContentEntry> {
    let mut out: Vec<ContentEntry> = Vec::new();
    for item in items {
        let lines = lines_for(item);
        if lines.is_empty() {
            continue;
        }
        out.push(ContentEntry {
            group: Some(category.group_id(out.len())),
            lines,
        });
    }
    out
}

fn entry_section(category: SemanticCategory, entries: Vec<ContentEntry>) -> Option<SectionContent> {
    if entries.is_empty() {
        return None;
    }
    Some(SectionContent {
        category,
        header: header_line(category),
        header_group: None,
        body: SectionBody::Entries(entries),
    })
}

fn list_section(
    category: SemanticCategory,
    item_tag: SemanticTag,
    list_tag: SemanticTag,
    items: &[String],
) -> Option<SectionContent> {
    let items: Vec<String> = items
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        return None;
    }
    Some(SectionContent {
        category,
        header: header_line(category),
        header_group: None,
        body: SectionBody::List {
            item_tag,
            list_tag,
            items,
        },
    })
}

/// Breaks a record into a layout plan.
pub fn plan_from_record(record: &ResumeRecord) -> LayoutPlan {
    let info = &record.personal_info;
    let mut personal = Vec::new();
    push_if(&mut personal, SemanticTag::Name, info.full_name.clone());
    push_if(&mut personal, SemanticTag::Title, info.title.clone());

    let contact = info
        .contact_fields()
        .into_iter()
        .map(|(tag, value)| ContentLine::new(tag, value.trim()))
        .collect();

    let mut sections = Vec::new();

    if !record.summary.trim().is_empty() {
        sections.push(SectionContent {
            category: SemanticCategory::Summary,
            header: header_line(SemanticCategory::Summary),
            header_group: None,
            body: SectionBody::Entries(vec![ContentEntry {
                group: None,
                lines: vec![ContentLine::new(
                    SemanticTag::Summary,
                    record.summary.trim(),
                )],
            }]),
        });
    }

    sections.extend(entry_section(
        SemanticCategory::Experience,
        entries(
            SemanticCategory::Experience,
            &record.experience,
            experience_lines,
        ),
    ));
    sections.extend(entry_section(
        SemanticCategory::Education,
        entries(SemanticCategory::Education, &record.education, education_lines),
    ));
    sections.extend(list_section(
        SemanticCategory::Skills,
        SemanticTag::Skill,
        SemanticTag::SkillList,
        &record.skills,
    ));
    sections.extend(entry_section(
        SemanticCategory::Languages,
        entries(SemanticCategory::Languages, &record.languages, |lang| {
            let name = lang.name.trim();
            let level = lang.proficiency.trim();
            let text = match (name.is_empty(), level.is_empty()) {
                (true, _) => String::new(),
                (false, true) => name.to_string(),
                (false, false) => format!("{name} ({level})"),
            };
            let mut lines = Vec::new();
            push_if(&mut lines, SemanticTag::Language, text);
            lines
        }),
    ));
    sections.extend(entry_section(
        SemanticCategory::Certifications,
        entries(
            SemanticCategory::Certifications,
            &record.certifications,
            |cert| {
                let mut lines = Vec::new();
                push_if(&mut lines, SemanticTag::CertificationName, cert.name.clone());
                push_if(&mut lines, SemanticTag::CertificationIssuer, cert.issuer.clone());
                push_if(&mut lines, SemanticTag::CertificationDate, cert.date.clone());
                push_if(&mut lines, SemanticTag::CertificationUrl, cert.url.clone());
                lines
            },
        ),
    ));
    sections.extend(entry_section(
        SemanticCategory::Projects,
        entries(SemanticCategory::Projects, &record.projects, project_lines),
    ));
    sections.extend(list_section(
        SemanticCategory::Interests,
        SemanticTag::Interest,
        SemanticTag::InterestList,
        &record.interests,
    ));

    // Each custom section is its own headed block sharing one group.
    let mut custom_index = 0;
    for custom in &record.custom_sections {
        let items: Vec<ContentLine> = custom
            .items
            .iter()
            .map(|item| item.trim())
            .filter(|item| !item.is_empty())
            .map(|item| ContentLine::new(SemanticTag::CustomItem, item))
            .collect();
        if custom.title.trim().is_empty() && items.is_empty() {
            continue;
        }
        let group = SemanticCategory::Custom.group_id(custom_index);
        custom_index += 1;
        let title = if custom.title.trim().is_empty() {
            SemanticCategory::Custom.label().to_uppercase()
        } else {
            custom.title.trim().to_uppercase()
        };
        sections.push(SectionContent {
            category: SemanticCategory::Custom,
            header: Some(ContentLine::new(SemanticTag::CustomSection, title)),
            header_group: Some(group.clone()),
            body: SectionBody::Entries(vec![ContentEntry {
                group: Some(group),
                lines: items,
            }]),
        });
    }

    LayoutPlan {
        personal,
        contact,
        contact_header: header_line(SemanticCategory::Contact),
        sections,
        carry_over: Vec::new(),
    }
}
