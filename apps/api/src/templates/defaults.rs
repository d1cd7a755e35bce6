//! Placeholder content shown when a template is applied to an empty canvas.

use crate::models::resume::{
    Certification, Education, Experience, Language, PersonalInfo, Project, ResumeRecord,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// A complete sample resume touching every record section.
pub fn default_record() -> ResumeRecord {
    ResumeRecord {
        personal_info: PersonalInfo {
            full_name: "Alex Morgan".to_string(),
            title: "Senior Software Engineer".to_string(),
            email: "alex.morgan@example.com".to_string(),
            phone: "+1 (555) 010-2030".to_string(),
            location: "Austin, TX".to_string(),
            website: "alexmorgan.dev".to_string(),
            linkedin: "linkedin.com/in/alexmorgan".to_string(),
            github: "github.com/alexmorgan".to_string(),
        },
        summary: "Backend engineer with eight years of experience building reliable \
                  distributed systems. Comfortable owning services end to end, from \
                  schema design to on-call."
            .to_string(),
        experience: vec![
            Experience {
                title: "Senior Software Engineer".to_string(),
                company: "Northwind Labs".to_string(),
                location: "Austin, TX".to_string(),
                start_date: "Mar 2021".to_string(),
                end_date: String::new(),
                current: true,
                description: strings(&[
                    "Led the migration of the billing pipeline to an event-driven design",
                    "Cut p99 checkout latency by 40% through query and cache tuning",
                    "Mentored four engineers through their first on-call rotations",
                ]),
            },
            Experience {
                title: "Software Engineer".to_string(),
                company: "Contoso".to_string(),
                location: "Remote".to_string(),
                start_date: "Jun 2017".to_string(),
                end_date: "Feb 2021".to_string(),
                current: false,
                description: strings(&[
                    "Built the internal metrics ingestion service handling 2M events/min",
                    "Introduced contract tests between the API and mobile clients",
                ]),
            },
        ],
        education: vec![Education {
            degree: "Bachelor of Science".to_string(),
            field: "Computer Science".to_string(),
            institution: "University of Texas".to_string(),
            location: "Austin, TX".to_string(),
            start_date: "2013".to_string(),
            end_date: "2017".to_string(),
            gpa: "3.8".to_string(),
            description: Vec::new(),
        }],
        skills: strings(&["Rust", "Go", "PostgreSQL", "Kafka", "Kubernetes", "AWS"]),
        languages: vec![
            Language {
                name: "English".to_string(),
                proficiency: "Native".to_string(),
            },
            Language {
                name: "Spanish".to_string(),
                proficiency: "Professional".to_string(),
            },
        ],
        certifications: vec![Certification {
            name: "AWS Certified Solutions Architect".to_string(),
            issuer: "Amazon Web Services".to_string(),
            date: "2022".to_string(),
            url: String::new(),
        }],
        projects: vec![Project {
            name: "tracekit".to_string(),
            description: "Open-source toolkit for sampling and replaying production traces."
                .to_string(),
            technologies: strings(&["Rust", "gRPC"]),
            url: "github.com/alexmorgan/tracekit".to_string(),
        }],
        interests: strings(&["Climbing", "Chess", "Woodworking"]),
        custom_sections: Vec::new(),
    }
}
