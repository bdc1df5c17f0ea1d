//! The portfolio document: personal info, skills, experience, projects,
//! testimonials and per-section visibility.
//!
//! Serializes with camelCase keys. Every field defaults when absent so
//! partially-filled documents (for example parser output) deserialize.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn enabled() -> bool {
    true
}

/// Header and contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    /// Full name.
    pub name: String,
    /// Professional title.
    pub title: String,
    /// One-line pitch.
    pub tagline: String,
    /// City and country.
    pub location: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// LinkedIn profile URL.
    pub linkedin: String,
    /// Path or URL of the profile image.
    pub profile_image: String,
    /// Availability badge text.
    pub availability: String,
    /// Free-form experience figure, e.g. `9+`.
    pub years_experience: String,
    /// Spoken languages with level.
    pub languages: Vec<String>,
    /// Longer about-me text.
    pub summary: String,
}

/// A rated technical skill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TechnicalSkill {
    /// Skill name.
    pub name: String,
    /// Proficiency, 0 to 100; edits clamp larger values.
    #[serde(alias = "proficiency")]
    pub level: u8,
    /// Grouping label.
    pub category: String,
    /// Shown on the public profile.
    #[serde(default = "enabled")]
    pub enabled: bool,
}

/// A rated AI skill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct AiSkill {
    /// Skill name.
    pub name: String,
    /// Proficiency, 0 to 100; edits clamp larger values.
    #[serde(alias = "proficiency")]
    pub level: u8,
    /// Shown on the public profile.
    #[serde(default = "enabled")]
    pub enabled: bool,
}

/// A certification or degree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Certification {
    /// Certification name.
    pub name: String,
    /// Issuing body.
    pub issuer: String,
    /// Year obtained.
    #[serde(alias = "date")]
    pub year: String,
    /// Status label, e.g. `Completed`.
    pub status: String,
    /// Shown on the public profile.
    #[serde(default = "enabled")]
    pub enabled: bool,
}

/// Skills section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Skills {
    /// Technical skills.
    pub technical: Vec<TechnicalSkill>,
    /// AI skills.
    pub ai_skills: Vec<AiSkill>,
    /// Certifications.
    pub certifications: Vec<Certification>,
}

impl Skills {
    /// Technical plus AI skill count.
    #[must_use]
    pub fn listed(&self) -> usize {
        self.technical.len() + self.ai_skills.len()
    }
}

/// One position held.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceEntry {
    /// Position in the list; assigned on merge when zero.
    pub id: u32,
    /// Employer.
    pub company: String,
    /// Role title.
    pub position: String,
    /// Free-form date range.
    pub duration: String,
    /// Work location.
    pub location: String,
    /// Employment type, e.g. `Full-time`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Shown on the public profile.
    #[serde(default = "enabled")]
    pub enabled: bool,
    /// Bullet points.
    pub achievements: Vec<String>,
    /// Tools used.
    pub technologies: Vec<String>,
    /// Headline result.
    pub impact: String,
}

/// A showcased project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    /// Identifier within the list.
    pub id: u32,
    /// Project name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Tools used.
    pub technologies: Vec<String>,
    /// Headline result.
    pub impact: String,
    /// Highlighted on the public profile.
    pub featured: bool,
    /// Shown on the public profile.
    #[serde(default = "enabled")]
    pub enabled: bool,
}

/// A recommendation quote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Testimonial {
    /// Identifier within the list.
    pub id: u32,
    /// Author name.
    pub name: String,
    /// Author role.
    pub position: String,
    /// Author employer.
    pub company: String,
    /// Quote text.
    pub content: String,
    /// Rating, 1 to 5.
    pub rating: u8,
    /// Shown on the public profile.
    #[serde(default = "enabled")]
    pub enabled: bool,
}

/// Highest skill level.
pub const MAX_LEVEL: u8 = 100;

/// Highest testimonial rating.
pub const MAX_RATING: u8 = 5;

/// Which sections the public profile renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct SectionVisibility {
    /// Header block.
    pub hero: bool,
    /// About block: summary and languages.
    pub about: bool,
    /// Skills section.
    pub skills: bool,
    /// Experience section.
    pub experience: bool,
    /// Projects section.
    pub projects: bool,
    /// Testimonials section.
    pub testimonials: bool,
    /// Contact details.
    pub contact: bool,
}

impl Default for SectionVisibility {
    fn default() -> Self {
        Self {
            hero: true,
            about: true,
            skills: true,
            experience: true,
            projects: true,
            testimonials: true,
            contact: true,
        }
    }
}

/// The whole live document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct PortfolioData {
    /// Header and contact details.
    pub personal_info: PersonalInfo,
    /// Skills section.
    pub skills: Skills,
    /// Work history, newest first.
    pub experience: Vec<ExperienceEntry>,
    /// Showcased projects.
    pub projects: Vec<Project>,
    /// Recommendation quotes.
    pub testimonials: Vec<Testimonial>,
    /// Section visibility flags.
    pub sections: SectionVisibility,
}

impl PortfolioData {
    /// Copy suitable for public display: disabled entries are dropped and
    /// hidden sections are emptied.
    #[must_use]
    pub fn public_view(&self) -> Self {
        let mut view = self.clone();
        let visible = self.sections;

        view.skills.technical.retain(|s| s.enabled);
        view.skills.ai_skills.retain(|s| s.enabled);
        view.skills.certifications.retain(|c| c.enabled);
        view.experience.retain(|e| e.enabled);
        view.projects.retain(|p| p.enabled);
        view.testimonials.retain(|t| t.enabled);

        if !visible.about {
            view.personal_info.summary.clear();
            view.personal_info.languages.clear();
        }
        if !visible.skills {
            view.skills = Skills::default();
        }
        if !visible.experience {
            view.experience.clear();
        }
        if !visible.projects {
            view.projects.clear();
        }
        if !visible.testimonials {
            view.testimonials.clear();
        }
        if !visible.contact {
            view.personal_info.email.clear();
            view.personal_info.phone.clear();
            view.personal_info.linkedin.clear();
        }
        view
    }

    /// Replaces one section with `value`, decoded as that section's type.
    ///
    /// # Errors
    ///
    /// Returns the decoder error if `value` does not fit the section; the
    /// document is left unchanged in that case.
    pub fn apply_section(
        &mut self,
        section: PortfolioSection,
        value: serde_json::Value,
    ) -> Result<(), serde_json::Error> {
        match section {
            PortfolioSection::PersonalInfo => self.personal_info = serde_json::from_value(value)?,
            PortfolioSection::Skills => self.skills = serde_json::from_value(value)?,
            PortfolioSection::Experience => self.experience = serde_json::from_value(value)?,
            PortfolioSection::Projects => self.projects = serde_json::from_value(value)?,
            PortfolioSection::Testimonials => self.testimonials = serde_json::from_value(value)?,
            PortfolioSection::Sections => self.sections = serde_json::from_value(value)?,
        }
        self.clamp_ratings();
        Ok(())
    }

    /// Caps skill levels at [`MAX_LEVEL`] and testimonial ratings at
    /// [`MAX_RATING`].
    pub fn clamp_ratings(&mut self) {
        for skill in &mut self.skills.technical {
            skill.level = skill.level.min(MAX_LEVEL);
        }
        for skill in &mut self.skills.ai_skills {
            skill.level = skill.level.min(MAX_LEVEL);
        }
        for testimonial in &mut self.testimonials {
            testimonial.rating = testimonial.rating.min(MAX_RATING);
        }
    }

    /// Number of experience entries.
    #[must_use]
    pub fn experience_count(&self) -> usize {
        self.experience.len()
    }
}

/// Editable top-level section of [`PortfolioData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortfolioSection {
    /// `personalInfo`
    PersonalInfo,
    /// `skills`
    Skills,
    /// `experience`
    Experience,
    /// `projects`
    Projects,
    /// `testimonials`
    Testimonials,
    /// `sections`
    Sections,
}

impl PortfolioSection {
    /// JSON key of the section.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PersonalInfo => "personalInfo",
            Self::Skills => "skills",
            Self::Experience => "experience",
            Self::Projects => "projects",
            Self::Testimonials => "testimonials",
            Self::Sections => "sections",
        }
    }
}

impl fmt::Display for PortfolioSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unknown section name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown portfolio section: {0}")]
pub struct UnknownSection(pub String);

impl FromStr for PortfolioSection {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "personalinfo" | "personal" => Ok(Self::PersonalInfo),
            "skills" => Ok(Self::Skills),
            "experience" => Ok(Self::Experience),
            "projects" => Ok(Self::Projects),
            "testimonials" => Ok(Self::Testimonials),
            "sections" => Ok(Self::Sections),
            _ => Err(UnknownSection(s.to_string())),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn technical(name: &str, level: u8, category: &str) -> TechnicalSkill {
    TechnicalSkill {
        name: name.to_string(),
        level,
        category: category.to_string(),
        enabled: true,
    }
}

fn ai(name: &str, level: u8) -> AiSkill {
    AiSkill {
        name: name.to_string(),
        level,
        enabled: true,
    }
}

fn certification(name: &str, issuer: &str, year: &str) -> Certification {
    Certification {
        name: name.to_string(),
        issuer: issuer.to_string(),
        year: year.to_string(),
        status: "Completed".to_string(),
        enabled: true,
    }
}

/// The hardcoded profile the live document starts from.
#[must_use]
pub fn seed_profile() -> PortfolioData {
    PortfolioData {
        personal_info: PersonalInfo {
            name: "Alex Morgan".to_string(),
            title: "Engineering & Digital Marketing Professional | AI Generalist".to_string(),
            tagline: "Turning technical depth into measurable digital results".to_string(),
            location: "Berlin, Germany".to_string(),
            email: "alex.morgan@example.com".to_string(),
            phone: "+49 30 0000000".to_string(),
            linkedin: "https://linkedin.com/in/alex-morgan".to_string(),
            profile_image: "/profile.jpg".to_string(),
            availability: "Open to Opportunities".to_string(),
            years_experience: "9+".to_string(),
            languages: strings(&["English (C2)", "German (B1)", "Spanish (A2)"]),
            summary: "Engineer turned marketer who pairs process discipline with \
                      data-driven campaign work."
                .to_string(),
        },
        skills: Skills {
            technical: vec![
                technical("Project Management (PRINCE2)", 95, "Management"),
                technical("Scrum Master", 95, "Agile"),
                technical("Meta Ads & Social Media Marketing", 88, "Marketing"),
                technical("AutoCAD & SolidWorks", 85, "Engineering"),
                technical("Python & SQL", 75, "Programming"),
                technical("Quality Management (ISO 9001)", 90, "Operations"),
            ],
            ai_skills: vec![
                ai("AI-Powered Process Optimization", 85),
                ai("Machine Learning Applications", 80),
                ai("AI Tools Integration", 90),
                ai("Data Analysis & Insights", 82),
                ai("Automated Workflow Design", 88),
            ],
            certifications: vec![
                certification("PRINCE2 Specialist", "Lecturio GmbH", "2025"),
                certification("Scrum Master I", "PeopleCert", "2025"),
                certification("Mechanical Engineering", "State University", "2015"),
            ],
        },
        experience: vec![
            ExperienceEntry {
                id: 1,
                company: "Northwind Media".to_string(),
                position: "Social Media Marketing Professional".to_string(),
                duration: "Nov 2023 - Oct 2024".to_string(),
                location: "Berlin, Germany".to_string(),
                kind: "Full-time".to_string(),
                enabled: true,
                achievements: strings(&[
                    "Moved from small-business to global-business clients within 6 months",
                    "Improved campaign performance by 25% through structured optimization",
                    "Maintained 95%+ client satisfaction across 50+ accounts",
                ]),
                technologies: strings(&["Meta Ads", "Campaign Management", "Client Relations"]),
                impact: "Raised ROI for 50+ clients through campaign evaluations".to_string(),
            },
            ExperienceEntry {
                id: 2,
                company: "Contoso Foundries".to_string(),
                position: "Junior Engineer".to_string(),
                duration: "Mar 2019 - Sep 2022".to_string(),
                location: "Hyderabad, India".to_string(),
                kind: "Full-time".to_string(),
                enabled: true,
                achievements: strings(&[
                    "Commissioned a quenching system for steel production",
                    "Improved production efficiency by 15% through process changes",
                    "Kept ISO 9001 and OHSAS 18001 compliance",
                ]),
                technologies: strings(&["Mechanical Systems", "ISO Standards", "Quality Control"]),
                impact: "Supported a capacity expansion with lower waste".to_string(),
            },
        ],
        projects: vec![
            Project {
                id: 1,
                name: "Ads Campaign Optimization".to_string(),
                description: "Systematic evaluation and tuning of paid campaigns".to_string(),
                technologies: strings(&["Ads Manager", "Analytics", "Campaign Strategy"]),
                impact: "25% average improvement in campaign performance".to_string(),
                featured: true,
                enabled: true,
            },
            Project {
                id: 2,
                name: "Quenching System Rollout".to_string(),
                description: "Integration of quenching technology on a rolling line".to_string(),
                technologies: strings(&["Mechanical Systems", "Quality Control"]),
                impact: "15% improvement in production efficiency".to_string(),
                featured: true,
                enabled: true,
            },
            Project {
                id: 3,
                name: "AI Workflow Optimization".to_string(),
                description: "AI-assisted process automation for back-office work".to_string(),
                technologies: strings(&["AI Tools", "Process Automation", "Data Analysis"]),
                impact: "30% reduction in manual processing time".to_string(),
                featured: true,
                enabled: true,
            },
        ],
        testimonials: vec![Testimonial {
            id: 1,
            name: "Jordan Lee".to_string(),
            position: "Team Lead".to_string(),
            company: "Northwind Media".to_string(),
            content: "Picks up new client portfolios faster than anyone on the team.".to_string(),
            rating: 5,
            enabled: true,
        }],
        sections: SectionVisibility::default(),
    }
}
