//! Pattern tables shared by tag inference, reverse extraction and reordering.
//!
//! Contact regexes, multilingual section-header keywords (en/es/fr/de), bullet
//! and date detection. Everything here is a pure function of the text.

use std::sync::LazyLock;

use regex::Regex;

use crate::semantic::vocabulary::{SemanticCategory, SemanticTag};

// ────────────────────────────────────────────────────────────────────────────
// Regex table
// ────────────────────────────────────────────────────────────────────────────

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("valid regex")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\(?\d[\d\s().\-]{6,}\d").expect("valid regex"));

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:https?://|www\.)\S+$|^[a-z0-9\-]+(?:\.[a-z0-9\-]+)*\.(?:com|io|dev|net|org|me|co|app|ai|tech)(?:/\S*)?$",
    )
    .expect("valid regex")
});

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("valid regex"));

static MONTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec|ene|abr|ago|dic|janv|févr|avr|mai|juin|juil|déc|mär|okt|dez)[a-zé]*\.?\s+(?:19|20)\d{2}\b|\b\d{1,2}/(?:19|20)\d{2}\b",
    )
    .expect("valid regex")
});

static PRESENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:present|current|now|actualidad|presente|aujourd'hui|heute)\b")
        .expect("valid regex")
});

static RANGE_SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+[-–—]\s+|\s*[–—]\s*|\s+(?:to|until|hasta|à|bis)\s+")
        .expect("valid regex")
});

static TIGHT_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*\d)-(\S.*)$").expect("valid regex"));

static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[•·▪▸►◦‣○●■□✓➤*\-–]|\d{1,2}[.)])\s+").expect("valid regex")
});

/// Social sites recognised by substring, checked before the generic URL rule.
const SOCIAL_HOSTS: &[(&str, SemanticTag)] = &[
    ("linkedin.com", SemanticTag::Linkedin),
    ("github.com", SemanticTag::Github),
    ("twitter.com", SemanticTag::Twitter),
    ("x.com/", SemanticTag::Twitter),
    ("gitlab.com", SemanticTag::SocialLink),
    ("behance.net", SemanticTag::SocialLink),
    ("dribbble.com", SemanticTag::SocialLink),
    ("medium.com", SemanticTag::SocialLink),
    ("stackoverflow.com", SemanticTag::SocialLink),
];

pub fn is_email(text: &str) -> bool {
    EMAIL_RE.is_match(text)
}

pub fn find_email(text: &str) -> Option<&str> {
    EMAIL_RE.find(text).map(|m| m.as_str())
}

/// Phone numbers need at least nine digits; shorter runs are usually date ranges.
pub fn is_phone(text: &str) -> bool {
    find_phone(text).is_some()
}

pub fn find_phone(text: &str) -> Option<&str> {
    if is_date_like(text) && !text.contains('+') {
        return None;
    }
    PHONE_RE
        .find(text)
        .filter(|m| m.as_str().chars().filter(|c| c.is_ascii_digit()).count() >= 9)
        .map(|m| m.as_str().trim())
}

/// Returns the social tag for a known host, checked as a substring.
pub fn social_tag(text: &str) -> Option<SemanticTag> {
    let lower = text.to_lowercase();
    SOCIAL_HOSTS
        .iter()
        .find(|(host, _)| lower.contains(host))
        .map(|(_, tag)| *tag)
}

pub fn is_url(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.contains(' ') && !is_email(trimmed) && URL_RE.is_match(trimmed)
}

// ────────────────────────────────────────────────────────────────────────────
// Bullets, dates and shape helpers
// ────────────────────────────────────────────────────────────────────────────

pub fn has_bullet_prefix(text: &str) -> bool {
    BULLET_RE.is_match(text)
}

pub fn strip_bullet(text: &str) -> &str {
    match BULLET_RE.find(text) {
        Some(m) => text[m.end()..].trim(),
        None => text.trim(),
    }
}

/// Short text containing a year, a month-year pair or "present".
pub fn is_date_like(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.chars().count() > 40 {
        return false;
    }
    YEAR_RE.is_match(trimmed) || MONTH_RE.is_match(trimmed) || PRESENT_RE.is_match(trimmed)
}

pub fn is_present_marker(text: &str) -> bool {
    PRESENT_RE.is_match(text)
}

/// A parsed date range. `current` is set when the end reads "present".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
    pub current: bool,
}

/// Splits `"Jan 2020 - Present"` into its parts. A single date lands in `start`.
pub fn split_date_range(text: &str) -> DateRange {
    let trimmed = text.trim();
    let (start, end) = match RANGE_SEPARATOR_RE.find(trimmed) {
        Some(m) => (&trimmed[..m.start()], &trimmed[m.end()..]),
        None => match TIGHT_RANGE_RE.captures(trimmed) {
            Some(caps) => (
                caps.get(1).map_or("", |m| m.as_str()),
                caps.get(2).map_or("", |m| m.as_str()),
            ),
            None => (trimmed, ""),
        },
    };
    let (start, end) = (start.trim(), end.trim());

    if end.is_empty() && is_present_marker(start) {
        return DateRange {
            start: String::new(),
            end: String::new(),
            current: true,
        };
    }
    if is_present_marker(end) {
        return DateRange {
            start: start.to_string(),
            end: String::new(),
            current: true,
        };
    }
    DateRange {
        start: start.to_string(),
        end: end.to_string(),
        current: false,
    }
}

/// Inverse of `split_date_range`.
pub fn format_date_range(start: &str, end: &str, current: bool) -> String {
    let start = start.trim();
    let end = if current { "Present" } else { end.trim() };
    match (start.is_empty(), end.is_empty()) {
        (true, true) => String::new(),
        (false, true) => start.to_string(),
        (true, false) => end.to_string(),
        (false, false) => format!("{start} - {end}"),
    }
}

pub fn is_uppercase_text(text: &str) -> bool {
    let mut letters = text.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(|c| c.is_uppercase())
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

// ────────────────────────────────────────────────────────────────────────────
// Multilingual section keywords
// ────────────────────────────────────────────────────────────────────────────

/// Section header keywords per category: English, Spanish, French, German.
const SECTION_KEYWORDS: &[(SemanticCategory, &[&str])] = &[
    (
        SemanticCategory::Contact,
        &["contact", "contact information", "contact info", "contacto", "coordonnées", "kontakt"],
    ),
    (
        SemanticCategory::Summary,
        &[
            "summary",
            "professional summary",
            "profile",
            "professional profile",
            "about me",
            "about",
            "objective",
            "career objective",
            "resumen",
            "perfil",
            "perfil profesional",
            "sobre mí",
            "profil",
            "à propos",
            "résumé",
            "zusammenfassung",
            "über mich",
        ],
    ),
    (
        SemanticCategory::Experience,
        &[
            "experience",
            "work experience",
            "professional experience",
            "employment",
            "employment history",
            "work history",
            "experiencia",
            "experiencia laboral",
            "experiencia profesional",
            "expérience",
            "expérience professionnelle",
            "expériences",
            "berufserfahrung",
            "erfahrung",
        ],
    ),
    (
        SemanticCategory::Education,
        &[
            "education",
            "academic background",
            "qualifications",
            "educación",
            "formación",
            "formación académica",
            "formation",
            "éducation",
            "ausbildung",
            "bildung",
        ],
    ),
    (
        SemanticCategory::Skills,
        &[
            "skills",
            "technical skills",
            "core competencies",
            "competencies",
            "expertise",
            "habilidades",
            "competencias",
            "compétences",
            "fähigkeiten",
            "kenntnisse",
        ],
    ),
    (
        SemanticCategory::Languages,
        &["languages", "language skills", "idiomas", "lenguas", "langues", "sprachen", "sprachkenntnisse"],
    ),
    (
        SemanticCategory::Certifications,
        &[
            "certifications",
            "certificates",
            "licenses",
            "licenses & certifications",
            "certificaciones",
            "certificados",
            "certificats",
            "zertifikate",
            "zertifizierungen",
        ],
    ),
    (
        SemanticCategory::Projects,
        &["projects", "personal projects", "key projects", "proyectos", "projets", "projekte"],
    ),
    (
        SemanticCategory::Interests,
        &[
            "interests",
            "hobbies",
            "hobbies & interests",
            "intereses",
            "aficiones",
            "centres d'intérêt",
            "loisirs",
            "interessen",
            "hobbys",
        ],
    ),
    (
        SemanticCategory::Awards,
        &["awards", "honors", "honours", "awards & honors", "premios", "distinciones", "prix", "auszeichnungen"],
    ),
    (
        SemanticCategory::Publications,
        &["publications", "publicaciones", "publikationen", "veröffentlichungen"],
    ),
    (
        SemanticCategory::Volunteer,
        &["volunteer", "volunteering", "volunteer experience", "voluntariado", "bénévolat", "ehrenamt"],
    ),
    (
        SemanticCategory::References,
        &["references", "referencias", "références", "referenzen"],
    ),
    (
        SemanticCategory::Courses,
        &["courses", "training", "cursos", "formations", "cours", "kurse", "weiterbildung"],
    ),
    (
        SemanticCategory::Achievements,
        &["achievements", "accomplishments", "logros", "réalisations", "erfolge"],
    ),
    (
        SemanticCategory::Memberships,
        &["memberships", "affiliations", "membresías", "adhésions", "mitgliedschaften"],
    ),
    (
        SemanticCategory::Additional,
        &[
            "additional information",
            "other information",
            "información adicional",
            "informations complémentaires",
            "weitere informationen",
        ],
    ),
];

const MAX_HEADER_CHARS: usize = 40;
const MAX_HEADER_WORDS: usize = 5;

/// Lowercases, trims trailing colons and leading icons/numbering.
fn normalize_header(text: &str) -> String {
    let trimmed = text
        .trim()
        .trim_end_matches(':')
        .trim_start_matches(|c: char| !c.is_alphabetic())
        .trim();
    trimmed
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Detects a section header from its text alone.
///
/// An exact keyword match always counts. A keyword contained as whole words
/// counts only when the line is styled like a header (`emphasized`), so a
/// skill called "Communication skills" stays a skill.
pub fn match_section_keyword(text: &str, emphasized: bool) -> Option<SemanticCategory> {
    if text.chars().count() > MAX_HEADER_CHARS
        || word_count(text) > MAX_HEADER_WORDS
        || has_bullet_prefix(text)
    {
        return None;
    }
    let normalized = normalize_header(text);
    if normalized.is_empty() {
        return None;
    }

    for (category, keywords) in SECTION_KEYWORDS {
        if keywords.iter().any(|k| *k == normalized) {
            return Some(*category);
        }
    }
    if !emphasized {
        return None;
    }

    // Longest contained keyword wins ("work experience" over "experience").
    let padded = format!(" {normalized} ");
    SECTION_KEYWORDS
        .iter()
        .flat_map(|(category, keywords)| keywords.iter().map(move |k| (*category, *k)))
        .filter(|(_, keyword)| padded.contains(&format!(" {keyword} ")))
        .max_by_key(|(_, keyword)| keyword.len())
        .map(|(category, _)| category)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_detection() {
        assert!(is_email("john.smith@example.com"));
        assert!(is_email("✉ jane@mail.co.uk"));
        assert!(!is_email("john at example dot com"));
    }

    #[test]
    fn test_phone_requires_nine_digits() {
        assert!(is_phone("+1 (555) 123-4567"));
        assert!(is_phone("555 123 4567"));
        assert!(!is_phone("2019 - 2023"), "date ranges must not read as phones");
        assert!(!is_phone("12345"));
    }

    #[test]
    fn test_social_hosts() {
        assert_eq!(
            social_tag("linkedin.com/in/jsmith"),
            Some(SemanticTag::Linkedin)
        );
        assert_eq!(social_tag("https://github.com/jsmith"), Some(SemanticTag::Github));
        assert_eq!(social_tag("example.com"), None);
    }

    #[test]
    fn test_generic_url() {
        assert!(is_url("https://jsmith.dev"));
        assert!(is_url("www.portfolio.net/me"));
        assert!(is_url("jsmith.io"));
        assert!(!is_url("Senior Dev"));
        assert!(!is_url("john@example.com"));
    }

    #[test]
    fn test_bullets() {
        assert!(has_bullet_prefix("• Built X"));
        assert!(has_bullet_prefix("- Shipped Y"));
        assert!(has_bullet_prefix("1. First"));
        assert!(!has_bullet_prefix("Built X"));
        assert_eq!(strip_bullet("•  Built X "), "Built X");
        assert_eq!(strip_bullet("Plain"), "Plain");
    }

    #[test]
    fn test_date_like() {
        assert!(is_date_like("2020 - Present"));
        assert!(is_date_like("Jan 2019 – Mar 2021"));
        assert!(is_date_like("Present"));
        assert!(!is_date_like("Acme Corp"));
    }

    #[test]
    fn test_split_date_range_current() {
        let range = split_date_range("2020 - Present");
        assert_eq!(range.start, "2020");
        assert_eq!(range.end, "");
        assert!(range.current);
    }

    #[test]
    fn test_split_date_range_closed() {
        let range = split_date_range("Jan 2016 – Jun 2019");
        assert_eq!(range.start, "Jan 2016");
        assert_eq!(range.end, "Jun 2019");
        assert!(!range.current);

        let tight = split_date_range("2016-2020");
        assert_eq!(tight.start, "2016");
        assert_eq!(tight.end, "2020");
    }

    #[test]
    fn test_format_date_range_inverse() {
        assert_eq!(format_date_range("2020", "", true), "2020 - Present");
        assert_eq!(format_date_range("2016", "2020", false), "2016 - 2020");
        assert_eq!(format_date_range("2016", "", false), "2016");
        let parsed = split_date_range(&format_date_range("2018", "2021", false));
        assert_eq!((parsed.start.as_str(), parsed.end.as_str()), ("2018", "2021"));
    }

    #[test]
    fn test_section_keywords_multilingual() {
        assert_eq!(
            match_section_keyword("EXPERIENCE", true),
            Some(SemanticCategory::Experience)
        );
        assert_eq!(
            match_section_keyword("Experiencia Laboral", false),
            Some(SemanticCategory::Experience)
        );
        assert_eq!(
            match_section_keyword("Compétences:", false),
            Some(SemanticCategory::Skills)
        );
        assert_eq!(
            match_section_keyword("Sprachen", false),
            Some(SemanticCategory::Languages)
        );
    }

    #[test]
    fn test_contained_keyword_needs_emphasis() {
        assert_eq!(match_section_keyword("Communication skills", false), None);
        assert_eq!(
            match_section_keyword("KEY SKILLS", true),
            Some(SemanticCategory::Skills)
        );
    }

    #[test]
    fn test_long_or_bulleted_lines_are_not_headers() {
        assert_eq!(
            match_section_keyword("• experience", true),
            None,
            "bulleted lines are list items"
        );
        assert_eq!(
            match_section_keyword(
                "Gained experience building distributed systems at scale",
                true
            ),
            None
        );
    }

    #[test]
    fn test_uppercase_detection() {
        assert!(is_uppercase_text("JOHN SMITH"));
        assert!(!is_uppercase_text("John Smith"));
        assert!(!is_uppercase_text("2020"));
    }
}
