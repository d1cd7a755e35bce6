use serde::{Deserialize, Serialize};

/// The structured resume record. Plain data, no positions.
///
/// Every field defaults so partially filled payloads (AI drafts, legacy saves)
/// deserialize without error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeRecord {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    pub languages: Vec<Language>,
    pub certifications: Vec<Certification>,
    pub projects: Vec<Project>,
    pub interests: Vec<String>,
    /// Sections under headers the vocabulary does not map to a record field.
    pub custom_sections: Vec<CustomSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub linkedin: String,
    pub github: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub degree: String,
    pub field: String,
    pub institution: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: String,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    pub name: String,
    pub proficiency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomSection {
    pub title: String,
    pub items: Vec<String>,
}

impl PersonalInfo {
    /// Contact fields in display order, paired with the tag they render under.
    pub fn contact_fields(&self) -> Vec<(crate::semantic::SemanticTag, &str)> {
        use crate::semantic::SemanticTag;
        [
            (SemanticTag::Email, self.email.as_str()),
            (SemanticTag::Phone, self.phone.as_str()),
            (SemanticTag::Location, self.location.as_str()),
            (SemanticTag::Website, self.website.as_str()),
            (SemanticTag::Linkedin, self.linkedin.as_str()),
            (SemanticTag::Github, self.github.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_payload_deserializes() {
        let record: ResumeRecord = serde_json::from_str(
            r#"{"personalInfo": {"fullName": "Ada"}, "experience": [{"title": "Engineer"}]}"#,
        )
        .unwrap();
        assert_eq!(record.personal_info.full_name, "Ada");
        assert_eq!(record.experience[0].title, "Engineer");
        assert!(record.experience[0].description.is_empty());
        assert!(record.skills.is_empty());
    }

    #[test]
    fn test_contact_fields_skip_empty() {
        let info = PersonalInfo {
            email: "a@b.io".to_string(),
            github: "github.com/a".to_string(),
            ..Default::default()
        };
        let fields = info.contact_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].1, "a@b.io");
    }
}
