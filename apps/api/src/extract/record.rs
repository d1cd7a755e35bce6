//! Record reconstruction from section spans.
//!
//! Tags are trusted when present; untagged lines fall back to positional and
//! textual heuristics. Extraction never fails: anything it cannot place is
//! left out and missing fields stay empty.

use tracing::debug;

use crate::extract::sections::{group_sections, SectionSpan};
use crate::models::element::VisualElement;
use crate::models::resume::{
    Certification, CustomSection, Education, Experience, Language, PersonalInfo, Project,
    ResumeRecord,
};
use crate::semantic::patterns::{
    find_email, find_phone, has_bullet_prefix, is_date_like, is_present_marker, is_url,
    social_tag, split_date_range, strip_bullet,
};
use crate::semantic::vocabulary::{SemanticCategory, SemanticTag};
use crate::templates::zones::{is_date_tag, is_item_subtitle, is_item_title};

/// Separators between items of a skill or interest line.
const LIST_SEPARATORS: &[char] = &[',', ';', '•', '·', '|', '\n'];

/// Separators inside a subtitle line ("Acme | Berlin | 2020 - 2022").
const FIELD_SEPARATORS: &[&str] = &[" | ", " · ", " • "];

const MAX_TITLE_CHARS: usize = 80;
const LONG_LINE_CHARS: usize = 100;
const MAX_PERSONAL_TITLE_WORDS: usize = 8;

// ────────────────────────────────────────────────────────────────────────────
// Lines and roles
// ────────────────────────────────────────────────────────────────────────────

/// A text element as the parsers see it.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    tag: Option<SemanticTag>,
    group: Option<&'a str>,
    text: &'a str,
    bold: bool,
    font_size: f32,
}

impl<'a> Line<'a> {
    fn of(element: &'a VisualElement) -> Option<Self> {
        let props = element.text_props()?;
        let text = props.text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Line {
            tag: element.semantic_type,
            group: element.semantic_group.as_deref(),
            text,
            bold: props.font_weight.is_bold(),
            font_size: props.font_size,
        })
    }
}

/// What a line contributes to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryLine {
    Title,
    Subtitle,
    Date,
    StartDate,
    EndDate,
    Location,
    Field,
    Gpa,
    Url,
    Tech,
    Detail,
}

fn role_of_tag(tag: SemanticTag) -> Option<EntryLine> {
    use SemanticTag as T;
    let role = match tag {
        T::ExperienceStartDate | T::EducationStartDate => EntryLine::StartDate,
        T::ExperienceEndDate | T::EducationEndDate | T::CertificationExpiry => EntryLine::EndDate,
        t if is_item_title(t) => EntryLine::Title,
        T::Achievement => EntryLine::Title,
        t if is_item_subtitle(t) => EntryLine::Subtitle,
        T::ProjectRole | T::MembershipRole | T::ReferenceTitle | T::ExperienceType => {
            EntryLine::Subtitle
        }
        t if is_date_tag(t) => EntryLine::Date,
        T::ExperienceLocation | T::EducationLocation | T::VolunteerLocation => EntryLine::Location,
        T::EducationField => EntryLine::Field,
        T::EducationGpa => EntryLine::Gpa,
        T::CertificationUrl | T::ProjectUrl | T::PublicationUrl => EntryLine::Url,
        T::ProjectTechnologies | T::ExperienceTechnologies => EntryLine::Tech,
        t if matches!(
            t.category(),
            SemanticCategory::Custom | SemanticCategory::Layout
        ) =>
        {
            return None
        }
        _ => EntryLine::Detail,
    };
    Some(role)
}

fn role_of_text(line: &Line) -> EntryLine {
    let lower = line.text.to_lowercase();
    if has_bullet_prefix(line.text) {
        EntryLine::Detail
    } else if lower.starts_with("gpa") {
        EntryLine::Gpa
    } else if lower.starts_with("technologies") || lower.starts_with("tech stack") {
        EntryLine::Tech
    } else if is_url(line.text) {
        EntryLine::Url
    } else if is_date_like(line.text) {
        EntryLine::Date
    } else if line.bold && line.text.chars().count() <= MAX_TITLE_CHARS {
        EntryLine::Title
    } else if line.text.chars().count() > LONG_LINE_CHARS {
        EntryLine::Detail
    } else {
        EntryLine::Subtitle
    }
}

fn classify(line: &Line) -> EntryLine {
    line.tag
        .and_then(role_of_tag)
        .unwrap_or_else(|| role_of_text(line))
}

/// One entry's lines, split off a section by title or group change.
#[derive(Debug, Default)]
struct RawEntry<'a> {
    group: Option<&'a str>,
    lines: Vec<(EntryLine, Line<'a>)>,
}

impl RawEntry<'_> {
    fn has_title(&self) -> bool {
        self.lines.iter().any(|(role, _)| *role == EntryLine::Title)
    }
}

fn split_entries<'a>(lines: &[Line<'a>]) -> Vec<RawEntry<'a>> {
    let mut entries: Vec<RawEntry<'a>> = Vec::new();
    let mut current = RawEntry::default();

    for line in lines {
        let role = classify(line);
        let new_title = role == EntryLine::Title && current.has_title();
        let new_group = matches!(
            (current.group, line.group),
            (Some(open), Some(next)) if open != next
        );
        if (new_title || new_group) && !current.lines.is_empty() {
            entries.push(std::mem::take(&mut current));
        }
        if current.group.is_none() {
            current.group = line.group;
        }
        current.lines.push((role, *line));
    }
    if !current.lines.is_empty() {
        entries.push(current);
    }
    entries
}

// ────────────────────────────────────────────────────────────────────────────
// Field helpers
// ────────────────────────────────────────────────────────────────────────────

fn split_fields(text: &str) -> Vec<&str> {
    let mut parts = vec![text];
    for separator in FIELD_SEPARATORS {
        parts = parts
            .into_iter()
            .flat_map(|part| part.split(separator))
            .collect();
    }
    parts
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

fn set_if_empty(slot: &mut String, value: &str) -> bool {
    if slot.is_empty() && !value.trim().is_empty() {
        *slot = value.trim().to_string();
        true
    } else {
        false
    }
}

/// Fills start/end/current from a date line without overwriting.
fn apply_range(text: &str, start: &mut String, end: &mut String, current: &mut bool) {
    let range = split_date_range(text);
    set_if_empty(start, &range.start);
    set_if_empty(end, &range.end);
    *current |= range.current;
}

fn strip_label<'a>(text: &'a str, labels: &[&str]) -> &'a str {
    let lower = text.to_lowercase();
    for label in labels {
        if lower.starts_with(label) {
            let rest = text.get(label.len()..).unwrap_or(text);
            return rest.trim_start_matches([':', ' ', '-']).trim();
        }
    }
    text.trim()
}

/// Splits a list line, dropping bullets, blanks and case-insensitive repeats.
fn push_list_items(items: &mut Vec<String>, text: &str) {
    for raw in text.split(LIST_SEPARATORS) {
        let item = strip_bullet(raw);
        if item.is_empty() {
            continue;
        }
        let lower = item.to_lowercase();
        if items.iter().any(|existing| existing.to_lowercase() == lower) {
            continue;
        }
        items.push(item.to_string());
    }
}

fn degree_and_field(text: &str) -> (String, String) {
    match text.split_once(" in ") {
        Some((degree, field)) => (degree.trim().to_string(), field.trim().to_string()),
        None => (text.trim().to_string(), String::new()),
    }
}

fn parse_language(text: &str) -> Option<Language> {
    let text = strip_bullet(text);
    if text.is_empty() {
        return None;
    }
    if let Some((name, rest)) = text.split_once('(') {
        return Some(Language {
            name: name.trim().to_string(),
            proficiency: rest.trim_end_matches(')').trim().to_string(),
        });
    }
    for separator in [" - ", " – ", ": "] {
        if let Some((name, level)) = text.split_once(separator) {
            return Some(Language {
                name: name.trim().to_string(),
                proficiency: level.trim().to_string(),
            });
        }
    }
    Some(Language {
        name: text.to_string(),
        proficiency: String::new(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Entry parsers
// ────────────────────────────────────────────────────────────────────────────

fn parse_experience(entry: &RawEntry) -> Option<Experience> {
    let mut exp = Experience::default();
    for (role, line) in &entry.lines {
        match role {
            EntryLine::Title => {
                if !set_if_empty(&mut exp.title, line.text) {
                    exp.description.push(strip_bullet(line.text).to_string());
                }
            }
            EntryLine::Subtitle => {
                for part in split_fields(line.text) {
                    if is_date_like(part) {
                        apply_range(part, &mut exp.start_date, &mut exp.end_date, &mut exp.current);
                    } else if !set_if_empty(&mut exp.company, part)
                        && !set_if_empty(&mut exp.location, part)
                    {
                        exp.description.push(part.to_string());
                    }
                }
            }
            EntryLine::Location => {
                set_if_empty(&mut exp.location, line.text);
            }
            EntryLine::Date => {
                apply_range(line.text, &mut exp.start_date, &mut exp.end_date, &mut exp.current)
            }
            EntryLine::StartDate => {
                set_if_empty(&mut exp.start_date, line.text);
            }
            EntryLine::EndDate => {
                if is_present_marker(line.text) {
                    exp.current = true;
                } else {
                    set_if_empty(&mut exp.end_date, line.text);
                }
            }
            _ => {
                let body = strip_bullet(line.text);
                if !body.is_empty() {
                    exp.description.push(body.to_string());
                }
            }
        }
    }
    (exp != Experience::default()).then_some(exp)
}

fn parse_education(entry: &RawEntry) -> Option<Education> {
    let mut edu = Education::default();
    let mut current = false;
    for (role, line) in &entry.lines {
        match role {
            EntryLine::Title if edu.degree.is_empty() => {
                let (degree, field) = degree_and_field(line.text);
                edu.degree = degree;
                set_if_empty(&mut edu.field, &field);
            }
            EntryLine::Field => {
                set_if_empty(&mut edu.field, line.text);
            }
            EntryLine::Subtitle => {
                for part in split_fields(line.text) {
                    if is_date_like(part) {
                        apply_range(part, &mut edu.start_date, &mut edu.end_date, &mut current);
                    } else if !set_if_empty(&mut edu.institution, part) {
                        set_if_empty(&mut edu.location, part);
                    }
                }
            }
            EntryLine::Location => {
                set_if_empty(&mut edu.location, line.text);
            }
            EntryLine::Date => {
                apply_range(line.text, &mut edu.start_date, &mut edu.end_date, &mut current)
            }
            EntryLine::StartDate => {
                set_if_empty(&mut edu.start_date, line.text);
            }
            EntryLine::EndDate => {
                set_if_empty(&mut edu.end_date, line.text);
            }
            EntryLine::Gpa => {
                set_if_empty(&mut edu.gpa, strip_label(line.text, &["gpa"]));
            }
            _ => {
                let body = strip_bullet(line.text);
                if !body.is_empty() {
                    edu.description.push(body.to_string());
                }
            }
        }
    }
    (edu != Education::default()).then_some(edu)
}

fn parse_certification(entry: &RawEntry) -> Option<Certification> {
    let mut cert = Certification::default();
    for (role, line) in &entry.lines {
        match role {
            EntryLine::Title => {
                set_if_empty(&mut cert.name, line.text);
            }
            EntryLine::Date | EntryLine::StartDate | EntryLine::EndDate => {
                set_if_empty(&mut cert.date, line.text);
            }
            EntryLine::Url => {
                set_if_empty(&mut cert.url, line.text);
            }
            _ => {
                for part in split_fields(line.text) {
                    if is_date_like(part) {
                        set_if_empty(&mut cert.date, part);
                    } else if !set_if_empty(&mut cert.name, part) {
                        set_if_empty(&mut cert.issuer, part);
                    }
                }
            }
        }
    }
    (cert != Certification::default()).then_some(cert)
}

fn parse_project(entry: &RawEntry) -> Option<Project> {
    let mut project = Project::default();
    let mut description: Vec<&str> = Vec::new();
    for (role, line) in &entry.lines {
        match role {
            EntryLine::Title if project.name.is_empty() => project.name = line.text.to_string(),
            EntryLine::Url => {
                set_if_empty(&mut project.url, line.text);
            }
            EntryLine::Tech => {
                let list = strip_label(line.text, &["technologies", "tech stack"]);
                push_list_items(&mut project.technologies, list);
            }
            EntryLine::Date | EntryLine::StartDate | EntryLine::EndDate => {}
            _ => {
                let body = strip_bullet(line.text);
                if !body.is_empty() {
                    description.push(body);
                }
            }
        }
    }
    project.description = description.join(" ");
    (project != Project::default()).then_some(project)
}

// ────────────────────────────────────────────────────────────────────────────
// Personal info
// ────────────────────────────────────────────────────────────────────────────

fn apply_contact_tag(info: &mut PersonalInfo, tag: SemanticTag, text: &str) {
    use SemanticTag as T;
    let slot = match tag {
        T::Name => &mut info.full_name,
        T::Title | T::Headline => &mut info.title,
        T::Email => &mut info.email,
        T::Phone | T::Mobile => &mut info.phone,
        T::Location | T::Address | T::City => &mut info.location,
        T::Website | T::Portfolio => &mut info.website,
        T::Linkedin => &mut info.linkedin,
        T::Github => &mut info.github,
        _ => return,
    };
    set_if_empty(slot, text);
}

/// Fills contact fields from regexes; true if the line was consumed.
fn apply_contact_patterns(info: &mut PersonalInfo, text: &str) -> bool {
    if let Some(email) = find_email(text) {
        set_if_empty(&mut info.email, email);
        return true;
    }
    if let Some(phone) = find_phone(text) {
        set_if_empty(&mut info.phone, phone);
        return true;
    }
    match social_tag(text) {
        Some(SemanticTag::Linkedin) => {
            set_if_empty(&mut info.linkedin, text);
            return true;
        }
        Some(SemanticTag::Github) => {
            set_if_empty(&mut info.github, text);
            return true;
        }
        Some(_) => return true,
        None => {}
    }
    if is_url(text) {
        set_if_empty(&mut info.website, text);
        return true;
    }
    false
}

fn extract_personal(
    elements: &[VisualElement],
    spans: &[SectionSpan],
) -> PersonalInfo {
    let mut info = PersonalInfo::default();

    for line in elements.iter().filter_map(Line::of) {
        if let Some(tag) = line.tag {
            apply_contact_tag(&mut info, tag, line.text);
        }
    }

    // Untagged lines in the header and contact areas.
    let mut leftovers: Vec<Line> = Vec::new();
    for span in spans.iter().filter(|s| {
        matches!(
            s.category,
            SemanticCategory::Personal | SemanticCategory::Contact
        )
    }) {
        let contact_area = span.category == SemanticCategory::Contact;
        for line in span.members.iter().filter_map(|i| Line::of(&elements[*i])) {
            if line.tag.is_some() || apply_contact_patterns(&mut info, line.text) {
                continue;
            }
            if contact_area {
                set_if_empty(&mut info.location, line.text);
            } else {
                leftovers.push(line);
            }
        }
    }

    if info.full_name.is_empty() {
        let name_at = leftovers
            .iter()
            .enumerate()
            .filter(|(_, l)| !has_bullet_prefix(l.text))
            .max_by(|(ia, a), (ib, b)| a.font_size.total_cmp(&b.font_size).then(ib.cmp(ia)))
            .map(|(i, _)| i);
        if let Some(at) = name_at {
            info.full_name = leftovers[at].text.to_string();
            if info.title.is_empty() {
                if let Some(next) = leftovers.get(at + 1) {
                    if next.text.split_whitespace().count() <= MAX_PERSONAL_TITLE_WORDS {
                        info.title = next.text.to_string();
                    }
                }
            }
        }
    }
    info
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction
// ────────────────────────────────────────────────────────────────────────────

fn span_lines<'a>(elements: &'a [VisualElement], span: &SectionSpan) -> Vec<Line<'a>> {
    span.members
        .iter()
        .filter_map(|i| Line::of(&elements[*i]))
        .filter(|l| !l.tag.is_some_and(SemanticTag::is_decoration))
        .collect()
}

/// Rebuilds a resume record from canvas elements.
pub fn extract_record(elements: &[VisualElement]) -> ResumeRecord {
    let spans = group_sections(elements);
    let mut record = ResumeRecord {
        personal_info: extract_personal(elements, &spans),
        ..Default::default()
    };
    let mut summary: Vec<&str> = Vec::new();

    for span in &spans {
        let lines = span_lines(elements, span);
        match span.category {
            SemanticCategory::Personal | SemanticCategory::Contact | SemanticCategory::Layout => {}
            SemanticCategory::Summary => summary.extend(lines.iter().map(|l| l.text)),
            SemanticCategory::Experience => record
                .experience
                .extend(split_entries(&lines).iter().filter_map(parse_experience)),
            SemanticCategory::Education => record
                .education
                .extend(split_entries(&lines).iter().filter_map(parse_education)),
            SemanticCategory::Certifications => record
                .certifications
                .extend(split_entries(&lines).iter().filter_map(parse_certification)),
            SemanticCategory::Projects => record
                .projects
                .extend(split_entries(&lines).iter().filter_map(parse_project)),
            SemanticCategory::Skills => {
                for line in &lines {
                    push_list_items(&mut record.skills, line.text);
                }
            }
            SemanticCategory::Interests => {
                for line in &lines {
                    push_list_items(&mut record.interests, line.text);
                }
            }
            SemanticCategory::Languages => {
                for line in &lines {
                    for part in line.text.split(['\n', ';', '•', '|']) {
                        let Some(language) = parse_language(part) else {
                            continue;
                        };
                        let known = record
                            .languages
                            .iter()
                            .any(|l| l.name.eq_ignore_ascii_case(&language.name));
                        if !known {
                            record.languages.push(language);
                        }
                    }
                }
            }
            category => {
                let title = span
                    .header
                    .and_then(|i| elements[i].text())
                    .map(|t| t.trim().to_string())
                    .unwrap_or_else(|| category.label().to_string());
                let items: Vec<String> = lines
                    .iter()
                    .map(|l| strip_bullet(l.text).to_string())
                    .filter(|t| !t.is_empty())
                    .collect();
                if !items.is_empty() || span.header.is_some() {
                    record.custom_sections.push(CustomSection { title, items });
                }
            }
        }
    }
    record.summary = summary.join(" ");

    debug!(
        spans = spans.len(),
        experience = record.experience.len(),
        education = record.education.len(),
        skills = record.skills.len(),
        custom = record.custom_sections.len(),
        "extracted record"
    );
    record
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::render::render;
    use crate::models::element::{FontWeight, TextAlign, TextProps};
    use crate::models::style::{LayoutArchetype, StyleConfig};
    use crate::templates::defaults::default_record;

    fn text(t: &str, size: f32, bold: bool, left: f32, top: f32, width: f32) -> VisualElement {
        VisualElement::new_text(
            TextProps {
                text: t.to_string(),
                font_size: size,
                font_weight: if bold {
                    FontWeight::Bold
                } else {
                    FontWeight::Normal
                },
                fill: "#000000".to_string(),
                font_family: "Helvetica".to_string(),
                line_height: 1.2,
                char_spacing: 0.0,
                text_align: TextAlign::Left,
            },
            left,
            top,
            width,
            size * 1.4,
        )
    }

    #[test]
    fn test_rendered_experience_round_trips() {
        let record = ResumeRecord {
            experience: vec![Experience {
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                start_date: "2020".to_string(),
                current: true,
                description: vec!["Built X".to_string(), "Shipped Y".to_string()],
                ..Default::default()
            }],
            ..Default::default()
        };
        let elements = render(&record, &StyleConfig::default());
        let extracted = extract_record(&elements);
        assert_eq!(extracted.experience.len(), 1);
        let exp = &extracted.experience[0];
        assert_eq!(exp.title, "Engineer");
        assert!(exp.company.contains("Acme"));
        assert_eq!(exp.description, vec!["Built X", "Shipped Y"]);
        assert_eq!(exp.start_date, "2020");
        assert!(exp.current, "\"Present\" marks the role as current");
    }

    #[test]
    fn test_single_column_round_trip_is_exact() {
        let record = default_record();
        let elements = render(&record, &StyleConfig::default());
        assert_eq!(extract_record(&elements), record);
    }

    #[test]
    fn test_round_trip_core_fields_for_every_archetype() {
        let record = default_record();
        for archetype in LayoutArchetype::ALL {
            let elements = render(&record, &StyleConfig::for_archetype(archetype));
            let extracted = extract_record(&elements);
            assert_eq!(
                extracted.personal_info.full_name, record.personal_info.full_name,
                "{archetype:?}"
            );
            let titles: Vec<&str> = extracted.experience.iter().map(|e| e.title.as_str()).collect();
            assert_eq!(titles, vec!["Senior Software Engineer", "Software Engineer"], "{archetype:?}");
            let companies: Vec<&str> =
                extracted.experience.iter().map(|e| e.company.as_str()).collect();
            assert_eq!(companies, vec!["Northwind Labs", "Contoso"], "{archetype:?}");
            assert_eq!(extracted.skills, record.skills, "{archetype:?}");
            assert_eq!(extracted.personal_info.email, record.personal_info.email);
        }
    }

    #[test]
    fn test_untagged_canvas_uses_heuristics() {
        let elements = vec![
            text("Jane Doe", 26.0, true, 40.0, 30.0, 700.0),
            text("Data Engineer", 14.0, false, 40.0, 70.0, 700.0),
            text("jane@example.io", 10.0, false, 40.0, 100.0, 110.0),
            text("+1 555 123 4567", 10.0, false, 300.0, 100.0, 110.0),
            text("EXPERIENCE", 13.0, true, 40.0, 150.0, 700.0),
            text("Data Engineer", 12.0, true, 40.0, 180.0, 700.0),
            text("Initech | Remote", 11.0, false, 40.0, 200.0, 700.0),
            text("2019 - 2022", 10.0, false, 40.0, 220.0, 700.0),
            text("• Built pipelines", 11.0, false, 40.0, 240.0, 700.0),
            text("Analyst", 12.0, true, 40.0, 270.0, 700.0),
            text("Globex", 11.0, false, 40.0, 290.0, 700.0),
            text("SKILLS", 13.0, true, 40.0, 330.0, 700.0),
            text("Python, SQL, python", 11.0, false, 40.0, 350.0, 700.0),
        ];
        let record = extract_record(&elements);

        assert_eq!(record.personal_info.full_name, "Jane Doe");
        assert_eq!(record.personal_info.title, "Data Engineer");
        assert_eq!(record.personal_info.email, "jane@example.io");
        assert_eq!(record.personal_info.phone, "+1 555 123 4567");

        assert_eq!(record.experience.len(), 2, "a second bold title starts a new entry");
        let first = &record.experience[0];
        assert_eq!(first.title, "Data Engineer");
        assert_eq!(first.company, "Initech");
        assert_eq!(first.location, "Remote");
        assert_eq!((first.start_date.as_str(), first.end_date.as_str()), ("2019", "2022"));
        assert_eq!(first.description, vec!["Built pipelines"]);
        assert_eq!(record.experience[1].company, "Globex");

        assert_eq!(record.skills, vec!["Python", "SQL"], "duplicates dropped");
    }

    #[test]
    fn test_group_change_splits_entries_without_titles() {
        let elements = vec![
            text("EDUCATION", 13.0, true, 40.0, 100.0, 700.0),
            text("University of Somewhere", 11.0, false, 40.0, 130.0, 700.0)
                .with_tag(SemanticTag::EducationInstitution)
                .with_group(Some("education_0".to_string())),
            text("College of Elsewhere", 11.0, false, 40.0, 160.0, 700.0)
                .with_tag(SemanticTag::EducationInstitution)
                .with_group(Some("education_1".to_string())),
            text("GPA: 3.5", 10.0, false, 40.0, 180.0, 700.0)
                .with_group(Some("education_1".to_string())),
        ];
        let record = extract_record(&elements);
        assert_eq!(record.education.len(), 2);
        assert_eq!(record.education[1].institution, "College of Elsewhere");
        assert_eq!(record.education[1].gpa, "3.5");
    }

    #[test]
    fn test_unknown_headers_become_custom_sections() {
        let mut header = text("PATENTS", 13.0, true, 40.0, 100.0, 700.0);
        if let Some(props) = header.text_props_mut() {
            props.char_spacing = 40.0;
        }
        let elements = vec![
            header,
            text("• US 1,234,567", 11.0, false, 40.0, 130.0, 700.0),
            text("LANGUAGES", 13.0, true, 40.0, 170.0, 700.0),
            text("German - Fluent", 11.0, false, 40.0, 200.0, 700.0),
            text("French (B2)", 11.0, false, 40.0, 220.0, 700.0),
        ];
        let record = extract_record(&elements);
        assert_eq!(record.custom_sections.len(), 1);
        assert_eq!(record.custom_sections[0].title, "PATENTS");
        assert_eq!(record.custom_sections[0].items, vec!["US 1,234,567"]);
        assert_eq!(
            record.languages,
            vec![
                Language {
                    name: "German".to_string(),
                    proficiency: "Fluent".to_string()
                },
                Language {
                    name: "French".to_string(),
                    proficiency: "B2".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_empty_canvas_gives_empty_record() {
        assert_eq!(extract_record(&[]), ResumeRecord::default());
    }
}
