//! Tag inference for untagged canvas text.
//!
//! `infer_tag` looks at one element in isolation and runs an ordered table of
//! named rules; the first rule that fires decides. `add_inferred_tags` adds
//! document context on top: it picks the single best name candidate, then
//! walks the page in reading order remembering the last section header, so
//! a bold line under "EXPERIENCE" becomes a job title rather than a generic
//! custom line. Existing tags are never changed.

use std::collections::BTreeMap;

use tracing::debug;

use crate::extract::sections::reading_order;
use crate::models::element::VisualElement;
use crate::semantic::patterns::{
    has_bullet_prefix, is_date_like, is_email, is_phone, is_uppercase_text, is_url,
    match_section_keyword, social_tag, word_count,
};
use crate::semantic::vocabulary::{SemanticCategory, SemanticTag};

/// Lines above this y may be the name or the professional title.
pub const HEADER_CUTOFF_Y: f32 = 200.0;

pub const NAME_MIN_FONT_SIZE: f32 = 20.0;
pub const TITLE_MIN_FONT_SIZE: f32 = 14.0;

/// Unstructured text longer than this reads as a summary paragraph.
pub const SUMMARY_MIN_CHARS: usize = 100;

const SHORT_HEADER_CHARS: usize = 40;
const SHORT_HEADER_WORDS: usize = 5;
const SHORT_LINE_CHARS: usize = 80;

// ────────────────────────────────────────────────────────────────────────────
// Facts
// ────────────────────────────────────────────────────────────────────────────

/// What the rules can see of an element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementFacts<'a> {
    pub text: &'a str,
    pub font_size: f32,
    pub bold: bool,
    pub top: f32,
    pub uppercase: bool,
    pub chars: usize,
    pub words: usize,
}

impl<'a> ElementFacts<'a> {
    /// Facts for a non-empty text element.
    pub fn of(element: &'a VisualElement) -> Option<Self> {
        let props = element.text_props()?;
        let text = props.text.trim();
        if text.is_empty() {
            return None;
        }
        Some(ElementFacts {
            text,
            font_size: props.font_size,
            bold: props.font_weight.is_bold(),
            top: element.top,
            uppercase: is_uppercase_text(text),
            chars: text.chars().count(),
            words: word_count(text),
        })
    }

    fn is_short_header(&self) -> bool {
        self.chars <= SHORT_HEADER_CHARS && self.words <= SHORT_HEADER_WORDS
    }

    fn is_short_line(&self) -> bool {
        self.chars <= SHORT_LINE_CHARS
    }

    fn in_header_band(&self) -> bool {
        self.top < HEADER_CUTOFF_Y
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rules
// ────────────────────────────────────────────────────────────────────────────

/// One named inference rule.
pub struct InferenceRule {
    pub name: &'static str,
    pub infer: fn(&ElementFacts) -> Option<SemanticTag>,
}

fn rule_email(f: &ElementFacts) -> Option<SemanticTag> {
    (f.chars <= 60 && is_email(f.text)).then_some(SemanticTag::Email)
}

fn rule_phone(f: &ElementFacts) -> Option<SemanticTag> {
    (f.chars <= 40 && is_phone(f.text)).then_some(SemanticTag::Phone)
}

fn rule_social(f: &ElementFacts) -> Option<SemanticTag> {
    if f.words > 2 {
        return None;
    }
    social_tag(f.text)
}

fn rule_url(f: &ElementFacts) -> Option<SemanticTag> {
    is_url(f.text).then_some(SemanticTag::Website)
}

fn rule_section_keyword(f: &ElementFacts) -> Option<SemanticTag> {
    match_section_keyword(f.text, f.bold || f.uppercase).and_then(SemanticCategory::section_tag)
}

fn rule_name(f: &ElementFacts) -> Option<SemanticTag> {
    (f.font_size >= NAME_MIN_FONT_SIZE && f.bold && f.in_header_band() && f.words <= 5)
        .then_some(SemanticTag::Name)
}

fn rule_title(f: &ElementFacts) -> Option<SemanticTag> {
    (f.font_size >= TITLE_MIN_FONT_SIZE
        && f.font_size < NAME_MIN_FONT_SIZE
        && f.in_header_band()
        && f.words <= 8)
        .then_some(SemanticTag::Title)
}

fn rule_section_header(f: &ElementFacts) -> Option<SemanticTag> {
    (f.bold && f.uppercase && f.is_short_header()).then_some(SemanticTag::SectionHeader)
}

fn rule_bullet(f: &ElementFacts) -> Option<SemanticTag> {
    has_bullet_prefix(f.text).then_some(SemanticTag::Description)
}

fn rule_long_text(f: &ElementFacts) -> Option<SemanticTag> {
    (f.chars > SUMMARY_MIN_CHARS).then_some(SemanticTag::Summary)
}

/// Ordered rule table. First match wins; `custom_text` when nothing fires.
pub const RULES: &[InferenceRule] = &[
    InferenceRule { name: "email", infer: rule_email },
    InferenceRule { name: "phone", infer: rule_phone },
    InferenceRule { name: "social", infer: rule_social },
    InferenceRule { name: "url", infer: rule_url },
    InferenceRule { name: "section_keyword", infer: rule_section_keyword },
    InferenceRule { name: "name", infer: rule_name },
    InferenceRule { name: "title", infer: rule_title },
    InferenceRule { name: "section_header", infer: rule_section_header },
    InferenceRule { name: "bullet", infer: rule_bullet },
    InferenceRule { name: "long_text", infer: rule_long_text },
];

fn infer_from_facts(facts: &ElementFacts) -> SemanticTag {
    RULES
        .iter()
        .find_map(|rule| (rule.infer)(facts))
        .unwrap_or(SemanticTag::CustomText)
}

/// Infers a tag for one element from its own content and style.
///
/// Returns `None` for shapes and empty text.
pub fn infer_tag(element: &VisualElement) -> Option<SemanticTag> {
    ElementFacts::of(element).map(|facts| infer_from_facts(&facts))
}

// ────────────────────────────────────────────────────────────────────────────
// Context tags
// ────────────────────────────────────────────────────────────────────────────

/// Per-section tags for the four line roles of an entry.
struct EntryTags {
    title: SemanticTag,
    subtitle: SemanticTag,
    date: SemanticTag,
    description: SemanticTag,
}

fn entry_tags(category: SemanticCategory) -> Option<EntryTags> {
    use SemanticTag as T;
    let (title, subtitle, date, description) = match category {
        SemanticCategory::Experience => (
            T::ExperienceTitle,
            T::ExperienceCompany,
            T::ExperienceDate,
            T::ExperienceDescription,
        ),
        SemanticCategory::Education => (
            T::EducationDegree,
            T::EducationInstitution,
            T::EducationDate,
            T::EducationDescription,
        ),
        SemanticCategory::Certifications => (
            T::CertificationName,
            T::CertificationIssuer,
            T::CertificationDate,
            T::CertificationIssuer,
        ),
        SemanticCategory::Projects => (
            T::ProjectName,
            T::ProjectDescription,
            T::ProjectDate,
            T::ProjectDescription,
        ),
        SemanticCategory::Awards => (
            T::AwardTitle,
            T::AwardIssuer,
            T::AwardDate,
            T::AwardDescription,
        ),
        SemanticCategory::Publications => (
            T::PublicationTitle,
            T::PublicationPublisher,
            T::PublicationDate,
            T::PublicationAuthors,
        ),
        SemanticCategory::Volunteer => (
            T::VolunteerRole,
            T::VolunteerOrganization,
            T::VolunteerDate,
            T::VolunteerDescription,
        ),
        SemanticCategory::Courses => (
            T::CourseName,
            T::CourseProvider,
            T::CourseDate,
            T::CourseDescription,
        ),
        SemanticCategory::Achievements => (
            T::Achievement,
            T::AchievementDescription,
            T::AchievementDescription,
            T::AchievementDescription,
        ),
        SemanticCategory::Memberships => (
            T::MembershipOrganization,
            T::MembershipRole,
            T::MembershipDate,
            T::MembershipRole,
        ),
        SemanticCategory::References => (
            T::ReferenceName,
            T::ReferenceCompany,
            T::ReferenceContact,
            T::ReferenceTitle,
        ),
        SemanticCategory::Custom => (
            T::CustomTitle,
            T::CustomSubtitle,
            T::CustomText,
            T::CustomItem,
        ),
        _ => return None,
    };
    Some(EntryTags {
        title,
        subtitle,
        date,
        description,
    })
}

fn has_list_separator(text: &str) -> bool {
    text.contains([',', '•', '|', ';', '·'])
}

/// Tag for an untagged line inside `section`, and whether it opens a new entry.
fn contextual_tag(
    section: SemanticCategory,
    facts: &ElementFacts,
    base: SemanticTag,
) -> (SemanticTag, bool) {
    let lower = facts.text.to_lowercase();
    match section {
        SemanticCategory::Summary => (SemanticTag::Summary, false),
        SemanticCategory::Skills => {
            if has_list_separator(facts.text) {
                (SemanticTag::SkillList, true)
            } else {
                (SemanticTag::Skill, true)
            }
        }
        SemanticCategory::Interests => {
            if has_list_separator(facts.text) {
                (SemanticTag::InterestList, true)
            } else {
                (SemanticTag::Interest, true)
            }
        }
        SemanticCategory::Languages => (SemanticTag::Language, true),
        SemanticCategory::Contact => {
            if facts.is_short_line() {
                (SemanticTag::Location, false)
            } else {
                (base, false)
            }
        }
        SemanticCategory::Additional => (SemanticTag::AdditionalInfo, false),
        SemanticCategory::Education if lower.starts_with("gpa") => {
            (SemanticTag::EducationGpa, false)
        }
        SemanticCategory::Projects if lower.starts_with("tech") => {
            (SemanticTag::ProjectTechnologies, false)
        }
        SemanticCategory::Projects if is_url(facts.text) => (SemanticTag::ProjectUrl, false),
        SemanticCategory::Certifications if is_url(facts.text) => {
            (SemanticTag::CertificationUrl, false)
        }
        category => match entry_tags(category) {
            Some(tags) => {
                if facts.bold && facts.is_short_line() && !has_bullet_prefix(facts.text) {
                    (tags.title, true)
                } else if is_date_like(facts.text) {
                    (tags.date, false)
                } else if has_bullet_prefix(facts.text) || facts.chars > SUMMARY_MIN_CHARS {
                    (tags.description, false)
                } else {
                    (tags.subtitle, false)
                }
            }
            None => (base, false),
        },
    }
}

fn is_contact_tag(tag: SemanticTag) -> bool {
    tag.category() == SemanticCategory::Contact
}

/// Next free entry index per category, past any groups already on the page.
fn next_group_indices(elements: &[VisualElement]) -> BTreeMap<SemanticCategory, usize> {
    let mut next = BTreeMap::new();
    for element in elements {
        let Some(group) = &element.semantic_group else {
            continue;
        };
        for category in SemanticCategory::ALL {
            let index = group
                .strip_prefix(category.as_str())
                .and_then(|rest| rest.strip_prefix('_'))
                .and_then(|n| n.parse::<usize>().ok());
            if let Some(index) = index {
                let slot = next.entry(category).or_insert(0);
                *slot = (*slot).max(index + 1);
            }
        }
    }
    next
}

// ────────────────────────────────────────────────────────────────────────────
// Document pass
// ────────────────────────────────────────────────────────────────────────────

/// Tags every untagged text element, using page context. Returns how many
/// elements were changed. Running it twice changes nothing the second time.
pub fn add_inferred_tags(elements: &mut [VisualElement]) -> usize {
    let mut changed = 0;

    // Pass 1: the single best name candidate.
    let mut has_name = elements
        .iter()
        .any(|e| e.semantic_type == Some(SemanticTag::Name));
    if !has_name {
        let best = elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.semantic_type.is_none())
            .filter_map(|(i, e)| ElementFacts::of(e).map(|f| (i, f)))
            .filter(|(_, f)| infer_from_facts(f) == SemanticTag::Name)
            .max_by(|(_, a), (_, b)| {
                a.font_size
                    .total_cmp(&b.font_size)
                    .then(b.top.total_cmp(&a.top))
            })
            .map(|(i, _)| i);
        if let Some(index) = best {
            elements[index].semantic_type = Some(SemanticTag::Name);
            has_name = true;
            changed += 1;
        }
    }

    // Pass 2: reading order with the current section carried along.
    let mut has_title = elements
        .iter()
        .any(|e| e.semantic_type == Some(SemanticTag::Title));
    let mut next_group = next_group_indices(elements);
    let mut section: Option<SemanticCategory> = None;
    let mut open_group: Option<(SemanticCategory, String)> = None;

    for placed in reading_order(elements) {
        let element = &elements[placed.index];

        if let Some(tag) = element.semantic_type {
            let category = tag.category();
            if tag.is_section_header() {
                section = Some(category);
                open_group = None;
            } else if category.is_repeatable() && category != SemanticCategory::Custom {
                section = Some(category);
                open_group = element.semantic_group.clone().map(|g| (category, g));
            }
            continue;
        }

        let Some(facts) = ElementFacts::of(element) else {
            continue;
        };
        let base = infer_from_facts(&facts);

        let (tag, opens_entry) = if base.is_section_header() {
            section = Some(base.category());
            open_group = None;
            (base, false)
        } else if is_contact_tag(base) {
            (base, false)
        } else if base == SemanticTag::Name && section.is_none() && !has_name {
            has_name = true;
            (base, false)
        } else if base == SemanticTag::Title && section.is_none() && !has_title {
            has_title = true;
            (base, false)
        } else {
            match section {
                Some(current) => contextual_tag(current, &facts, base),
                None => match base {
                    SemanticTag::Name | SemanticTag::Title => (SemanticTag::CustomText, false),
                    other => (other, false),
                },
            }
        };

        let category = tag.category();
        let group = if category.is_repeatable() && !tag.is_section_header() {
            let reuse = match &open_group {
                Some((open_category, group)) if *open_category == category && !opens_entry => {
                    Some(group.clone())
                }
                _ => None,
            };
            let group = reuse.unwrap_or_else(|| {
                let slot = next_group.entry(category).or_insert(0);
                let group = category.group_id(*slot);
                *slot += 1;
                group
            });
            open_group = Some((category, group.clone()));
            Some(group)
        } else {
            None
        };

        let element = &mut elements[placed.index];
        element.semantic_type = Some(tag);
        if element.semantic_group.is_none() {
            element.semantic_group = group;
        }
        changed += 1;
    }

    debug!(changed, "inferred tags");
    changed
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
