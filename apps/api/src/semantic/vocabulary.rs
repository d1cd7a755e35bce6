//! Semantic tag vocabulary: the static taxonomy every element label comes from.
//!
//! Each `SemanticTag` maps 1:1 to exactly one `SemanticCategory` and carries a
//! display label. Tags serialize as their snake_case key (`experience_title`),
//! which is the persisted `semanticType` value on canvas objects.
//!
//! The table is read-only and shared; nothing here is mutable at runtime.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Deserializer, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Categories
// ────────────────────────────────────────────────────────────────────────────

/// The twenty semantic categories. Record sections, layout decorations and the
/// personal/contact header blocks are all categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SemanticCategory {
    Personal,
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Languages,
    Certifications,
    Projects,
    Interests,
    Awards,
    Publications,
    Volunteer,
    References,
    Courses,
    Achievements,
    Memberships,
    Additional,
    Custom,
    Layout,
}

impl SemanticCategory {
    pub const ALL: [SemanticCategory; 20] = [
        SemanticCategory::Personal,
        SemanticCategory::Contact,
        SemanticCategory::Summary,
        SemanticCategory::Experience,
        SemanticCategory::Education,
        SemanticCategory::Skills,
        SemanticCategory::Languages,
        SemanticCategory::Certifications,
        SemanticCategory::Projects,
        SemanticCategory::Interests,
        SemanticCategory::Awards,
        SemanticCategory::Publications,
        SemanticCategory::Volunteer,
        SemanticCategory::References,
        SemanticCategory::Courses,
        SemanticCategory::Achievements,
        SemanticCategory::Memberships,
        SemanticCategory::Additional,
        SemanticCategory::Custom,
        SemanticCategory::Layout,
    ];

    /// snake_case key, also the prefix of entry groups (`experience_0`).
    pub fn as_str(self) -> &'static str {
        match self {
            SemanticCategory::Personal => "personal",
            SemanticCategory::Contact => "contact",
            SemanticCategory::Summary => "summary",
            SemanticCategory::Experience => "experience",
            SemanticCategory::Education => "education",
            SemanticCategory::Skills => "skills",
            SemanticCategory::Languages => "languages",
            SemanticCategory::Certifications => "certifications",
            SemanticCategory::Projects => "projects",
            SemanticCategory::Interests => "interests",
            SemanticCategory::Awards => "awards",
            SemanticCategory::Publications => "publications",
            SemanticCategory::Volunteer => "volunteer",
            SemanticCategory::References => "references",
            SemanticCategory::Courses => "courses",
            SemanticCategory::Achievements => "achievements",
            SemanticCategory::Memberships => "memberships",
            SemanticCategory::Additional => "additional",
            SemanticCategory::Custom => "custom",
            SemanticCategory::Layout => "layout",
        }
    }

    /// Display label, used as the default section header text.
    pub fn label(self) -> &'static str {
        match self {
            SemanticCategory::Personal => "Personal Information",
            SemanticCategory::Contact => "Contact",
            SemanticCategory::Summary => "Summary",
            SemanticCategory::Experience => "Experience",
            SemanticCategory::Education => "Education",
            SemanticCategory::Skills => "Skills",
            SemanticCategory::Languages => "Languages",
            SemanticCategory::Certifications => "Certifications",
            SemanticCategory::Projects => "Projects",
            SemanticCategory::Interests => "Interests",
            SemanticCategory::Awards => "Awards",
            SemanticCategory::Publications => "Publications",
            SemanticCategory::Volunteer => "Volunteer",
            SemanticCategory::References => "References",
            SemanticCategory::Courses => "Courses",
            SemanticCategory::Achievements => "Achievements",
            SemanticCategory::Memberships => "Memberships",
            SemanticCategory::Additional => "Additional Information",
            SemanticCategory::Custom => "Other",
            SemanticCategory::Layout => "Layout",
        }
    }

    /// The header tag that opens this category's section, if it has one.
    pub fn section_tag(self) -> Option<SemanticTag> {
        let tag = match self {
            SemanticCategory::Personal | SemanticCategory::Layout => return None,
            SemanticCategory::Contact => SemanticTag::ContactSection,
            SemanticCategory::Summary => SemanticTag::SummarySection,
            SemanticCategory::Experience => SemanticTag::ExperienceSection,
            SemanticCategory::Education => SemanticTag::EducationSection,
            SemanticCategory::Skills => SemanticTag::SkillsSection,
            SemanticCategory::Languages => SemanticTag::LanguagesSection,
            SemanticCategory::Certifications => SemanticTag::CertificationsSection,
            SemanticCategory::Projects => SemanticTag::ProjectsSection,
            SemanticCategory::Interests => SemanticTag::InterestsSection,
            SemanticCategory::Awards => SemanticTag::AwardsSection,
            SemanticCategory::Publications => SemanticTag::PublicationsSection,
            SemanticCategory::Volunteer => SemanticTag::VolunteerSection,
            SemanticCategory::References => SemanticTag::ReferencesSection,
            SemanticCategory::Courses => SemanticTag::CoursesSection,
            SemanticCategory::Achievements => SemanticTag::AchievementsSection,
            SemanticCategory::Memberships => SemanticTag::MembershipsSection,
            SemanticCategory::Additional => SemanticTag::AdditionalSection,
            SemanticCategory::Custom => SemanticTag::CustomSection,
        };
        Some(tag)
    }

    /// Categories whose content is a list of entries, each with its own group id.
    pub fn is_repeatable(self) -> bool {
        !matches!(
            self,
            SemanticCategory::Personal
                | SemanticCategory::Contact
                | SemanticCategory::Summary
                | SemanticCategory::Layout
        )
    }

    /// Builds the group id for entry `index` of this category (`experience_2`).
    pub fn group_id(self, index: usize) -> String {
        format!("{}_{}", self.as_str(), index)
    }

    pub fn tags(self) -> impl Iterator<Item = SemanticTag> {
        SemanticTag::ALL
            .iter()
            .copied()
            .filter(move |t| t.category() == self)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tags
// ────────────────────────────────────────────────────────────────────────────

macro_rules! semantic_tags {
    ($( $variant:ident => $key:literal, $category:ident, $label:literal; )+) => {
        /// A semantic label identifying which resume field an element represents.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub enum SemanticTag {
            $(
                #[serde(rename = $key)]
                $variant,
            )+
        }

        impl SemanticTag {
            pub const ALL: &'static [SemanticTag] = &[$(SemanticTag::$variant,)+];

            /// Persisted snake_case key.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(SemanticTag::$variant => $key,)+
                }
            }

            pub fn category(self) -> SemanticCategory {
                match self {
                    $(SemanticTag::$variant => SemanticCategory::$category,)+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $(SemanticTag::$variant => $label,)+
                }
            }
        }
    };
}

semantic_tags! {
    // Personal
    Name => "name", Personal, "Full Name";
    FirstName => "first_name", Personal, "First Name";
    LastName => "last_name", Personal, "Last Name";
    Title => "title", Personal, "Professional Title";
    Headline => "headline", Personal, "Headline";
    Tagline => "tagline", Personal, "Tagline";
    Photo => "photo", Personal, "Photo";
    DateOfBirth => "date_of_birth", Personal, "Date of Birth";
    Nationality => "nationality", Personal, "Nationality";

    // Contact
    ContactSection => "contact_section", Contact, "Contact Header";
    Email => "email", Contact, "Email";
    Phone => "phone", Contact, "Phone";
    Mobile => "mobile", Contact, "Mobile";
    Location => "location", Contact, "Location";
    Address => "address", Contact, "Address";
    City => "city", Contact, "City";
    Country => "country", Contact, "Country";
    Website => "website", Contact, "Website";
    Linkedin => "linkedin", Contact, "LinkedIn";
    Github => "github", Contact, "GitHub";
    Twitter => "twitter", Contact, "Twitter";
    Portfolio => "portfolio", Contact, "Portfolio";
    SocialLink => "social_link", Contact, "Social Link";

    // Summary
    SummarySection => "summary_section", Summary, "Summary Header";
    Summary => "summary", Summary, "Summary";
    Profile => "profile", Summary, "Profile";
    Objective => "objective", Summary, "Objective";
    AboutMe => "about_me", Summary, "About Me";

    // Experience
    ExperienceSection => "experience_section", Experience, "Experience Header";
    ExperienceTitle => "experience_title", Experience, "Job Title";
    ExperienceCompany => "experience_company", Experience, "Company";
    ExperienceLocation => "experience_location", Experience, "Job Location";
    ExperienceDate => "experience_date", Experience, "Employment Dates";
    ExperienceStartDate => "experience_start_date", Experience, "Start Date";
    ExperienceEndDate => "experience_end_date", Experience, "End Date";
    ExperienceDescription => "experience_description", Experience, "Job Description";
    ExperienceBullet => "experience_bullet", Experience, "Job Bullet";
    ExperienceAchievement => "experience_achievement", Experience, "Job Achievement";
    ExperienceTechnologies => "experience_technologies", Experience, "Technologies Used";
    ExperienceType => "experience_type", Experience, "Employment Type";

    // Education
    EducationSection => "education_section", Education, "Education Header";
    EducationDegree => "education_degree", Education, "Degree";
    EducationField => "education_field", Education, "Field of Study";
    EducationInstitution => "education_institution", Education, "Institution";
    EducationLocation => "education_location", Education, "Institution Location";
    EducationDate => "education_date", Education, "Study Dates";
    EducationStartDate => "education_start_date", Education, "Study Start";
    EducationEndDate => "education_end_date", Education, "Graduation";
    EducationGpa => "education_gpa", Education, "GPA";
    EducationDescription => "education_description", Education, "Education Details";
    EducationHonors => "education_honors", Education, "Honors";
    EducationCoursework => "education_coursework", Education, "Coursework";

    // Skills
    SkillsSection => "skills_section", Skills, "Skills Header";
    Skill => "skill", Skills, "Skill";
    SkillList => "skill_list", Skills, "Skill List";
    SkillCategory => "skill_category", Skills, "Skill Category";
    SkillLevel => "skill_level", Skills, "Skill Level";
    SkillBar => "skill_bar", Skills, "Skill Bar";
    TechnicalSkills => "technical_skills", Skills, "Technical Skills";
    SoftSkills => "soft_skills", Skills, "Soft Skills";
    Tools => "tools", Skills, "Tools";

    // Languages
    LanguagesSection => "languages_section", Languages, "Languages Header";
    Language => "language", Languages, "Language";
    LanguageName => "language_name", Languages, "Language Name";
    LanguageLevel => "language_level", Languages, "Proficiency";
    LanguageCertificate => "language_certificate", Languages, "Language Certificate";

    // Certifications
    CertificationsSection => "certifications_section", Certifications, "Certifications Header";
    CertificationName => "certification_name", Certifications, "Certification";
    CertificationIssuer => "certification_issuer", Certifications, "Issuer";
    CertificationDate => "certification_date", Certifications, "Issue Date";
    CertificationExpiry => "certification_expiry", Certifications, "Expiry Date";
    CertificationId => "certification_id", Certifications, "Credential ID";
    CertificationUrl => "certification_url", Certifications, "Credential URL";

    // Projects
    ProjectsSection => "projects_section", Projects, "Projects Header";
    ProjectName => "project_name", Projects, "Project Name";
    ProjectRole => "project_role", Projects, "Project Role";
    ProjectDescription => "project_description", Projects, "Project Description";
    ProjectTechnologies => "project_technologies", Projects, "Project Technologies";
    ProjectUrl => "project_url", Projects, "Project URL";
    ProjectDate => "project_date", Projects, "Project Date";
    ProjectBullet => "project_bullet", Projects, "Project Bullet";

    // Interests
    InterestsSection => "interests_section", Interests, "Interests Header";
    Interest => "interest", Interests, "Interest";
    InterestList => "interest_list", Interests, "Interest List";
    Hobby => "hobby", Interests, "Hobby";

    // Awards
    AwardsSection => "awards_section", Awards, "Awards Header";
    AwardTitle => "award_title", Awards, "Award";
    AwardIssuer => "award_issuer", Awards, "Award Issuer";
    AwardDate => "award_date", Awards, "Award Date";
    AwardDescription => "award_description", Awards, "Award Description";

    // Publications
    PublicationsSection => "publications_section", Publications, "Publications Header";
    PublicationTitle => "publication_title", Publications, "Publication";
    PublicationPublisher => "publication_publisher", Publications, "Publisher";
    PublicationAuthors => "publication_authors", Publications, "Authors";
    PublicationDate => "publication_date", Publications, "Publication Date";
    PublicationUrl => "publication_url", Publications, "Publication URL";

    // Volunteer
    VolunteerSection => "volunteer_section", Volunteer, "Volunteer Header";
    VolunteerRole => "volunteer_role", Volunteer, "Volunteer Role";
    VolunteerOrganization => "volunteer_organization", Volunteer, "Organization";
    VolunteerLocation => "volunteer_location", Volunteer, "Volunteer Location";
    VolunteerDate => "volunteer_date", Volunteer, "Volunteer Dates";
    VolunteerDescription => "volunteer_description", Volunteer, "Volunteer Description";

    // References
    ReferencesSection => "references_section", References, "References Header";
    ReferenceName => "reference_name", References, "Reference Name";
    ReferenceTitle => "reference_title", References, "Reference Title";
    ReferenceCompany => "reference_company", References, "Reference Company";
    ReferenceContact => "reference_contact", References, "Reference Contact";
    ReferencesOnRequest => "references_on_request", References, "Available on Request";

    // Courses
    CoursesSection => "courses_section", Courses, "Courses Header";
    CourseName => "course_name", Courses, "Course";
    CourseProvider => "course_provider", Courses, "Course Provider";
    CourseDate => "course_date", Courses, "Course Date";
    CourseDescription => "course_description", Courses, "Course Description";

    // Achievements
    AchievementsSection => "achievements_section", Achievements, "Achievements Header";
    Achievement => "achievement", Achievements, "Achievement";
    AchievementDescription => "achievement_description", Achievements, "Achievement Details";

    // Memberships
    MembershipsSection => "memberships_section", Memberships, "Memberships Header";
    MembershipOrganization => "membership_organization", Memberships, "Membership";
    MembershipRole => "membership_role", Memberships, "Membership Role";
    MembershipDate => "membership_date", Memberships, "Membership Date";

    // Additional
    AdditionalSection => "additional_section", Additional, "Additional Header";
    AdditionalInfo => "additional_info", Additional, "Additional Information";
    Availability => "availability", Additional, "Availability";
    DrivingLicense => "driving_license", Additional, "Driving License";
    Signature => "signature", Additional, "Signature";
    Declaration => "declaration", Additional, "Declaration";

    // Custom
    CustomSection => "custom_section", Custom, "Custom Header";
    SectionHeader => "section_header", Custom, "Section Header";
    CustomTitle => "custom_title", Custom, "Custom Title";
    CustomSubtitle => "custom_subtitle", Custom, "Custom Subtitle";
    CustomText => "custom_text", Custom, "Custom Text";
    CustomItem => "custom_item", Custom, "Custom Item";
    Description => "description", Custom, "Description";

    // Layout
    Divider => "divider", Layout, "Divider";
    HeaderBackground => "header_background", Layout, "Header Background";
    SidebarBackground => "sidebar_background", Layout, "Sidebar Background";
    AccentBar => "accent_bar", Layout, "Accent Bar";
    DecorativeShape => "decorative_shape", Layout, "Decorative Shape";
    Icon => "icon", Layout, "Icon";
    PageNumber => "page_number", Layout, "Page Number";
}

static TAGS_BY_KEY: LazyLock<HashMap<&'static str, SemanticTag>> = LazyLock::new(|| {
    SemanticTag::ALL
        .iter()
        .map(|tag| (tag.as_str(), *tag))
        .collect()
});

impl SemanticTag {
    /// Looks a tag up by its persisted key. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<SemanticTag> {
        TAGS_BY_KEY.get(key.trim()).copied()
    }

    /// True for every `<section>_section` tag and the generic `section_header`.
    pub fn is_section_header(self) -> bool {
        self == SemanticTag::SectionHeader || self.category().section_tag() == Some(self)
    }

    /// Decorations (backgrounds, dividers) are regenerated, never carried over.
    pub fn is_decoration(self) -> bool {
        self.category() == SemanticCategory::Layout || self == SemanticTag::SkillBar
    }
}

/// Lenient deserializer for persisted `semanticType` values.
///
/// Documents saved by older clients may carry tags this build does not know;
/// those load as untagged instead of failing the whole document.
pub fn deserialize_lenient_tag<'de, D>(deserializer: D) -> Result<Option<SemanticTag>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(SemanticTag::from_key))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
