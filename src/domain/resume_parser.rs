//! Simulated resume parser.
//!
//! A parse run is a small state machine:
//!
//! ```text
//! Idle -> Running(0) -> Running(20) -> ... -> Running(100) -> Succeeded
//!    \                                                     \
//!     -> Failed (blank input)                               -> Failed
//! ```
//!
//! Each step waits on an injected [`Clock`] so tests can run the whole
//! sequence without real delays. The result is a fixed profile fragment and
//! does not depend on the input text.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::portfolio::{Certification, ExperienceEntry, PersonalInfo, PortfolioData, TechnicalSkill};
use crate::error::AdminError;

/// Source of delays for the parser.
pub trait Clock: fmt::Debug + Send + Sync {
    /// Resolves after `duration`.
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

/// [`Clock`] backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// Progress checkpoints and their messages.
pub const PARSE_STEPS: [(u8, &str); 5] = [
    (20, "Extracting personal information..."),
    (40, "Identifying work experience..."),
    (60, "Parsing skills and technologies..."),
    (80, "Analyzing achievements and metrics..."),
    (100, "Finalizing data structure..."),
];

/// State of one parse run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ParseState {
    /// Not started.
    Idle,
    /// In progress.
    Running {
        /// Percent complete.
        progress: u8,
        /// Current step message.
        message: String,
    },
    /// Finished with a result.
    Succeeded {
        /// Extracted profile fragment.
        result: ParsedResume,
    },
    /// Finished without a result.
    Failed {
        /// Why parsing stopped.
        reason: String,
    },
}

impl ParseState {
    /// `true` for `Succeeded` and `Failed`.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Failed { .. })
    }

    /// Percent complete; 100 once succeeded.
    #[must_use]
    pub const fn progress(&self) -> u8 {
        match self {
            Self::Idle | Self::Failed { .. } => 0,
            Self::Running { progress, .. } => *progress,
            Self::Succeeded { .. } => 100,
        }
    }

    /// Short status label.
    #[must_use]
    pub const fn status_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running { .. } => "running",
            Self::Succeeded { .. } => "succeeded",
            Self::Failed { .. } => "failed",
        }
    }

    /// Whether moving from `self` to `next` is a legal transition.
    ///
    /// Progress never goes backwards and terminal states are final.
    #[must_use]
    pub fn can_transition_to(&self, next: &Self) -> bool {
        match (self, next) {
            (Self::Idle, Self::Running { .. } | Self::Failed { .. }) => true,
            (Self::Running { progress: from, .. }, Self::Running { progress: to, .. }) => to >= from,
            (Self::Running { .. }, Self::Succeeded { .. } | Self::Failed { .. }) => true,
            _ => false,
        }
    }
}

/// Fields the parser extracts from a resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ParsedResume {
    /// Contact and header fields; blank fields are ignored on apply.
    pub personal_info: PersonalInfo,
    /// Positions found.
    pub experience: Vec<ExperienceEntry>,
    /// Skills found.
    pub skills: ParsedSkills,
}

/// Skill subset produced by the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ParsedSkills {
    /// Rated technical skills.
    pub technical: Vec<TechnicalSkill>,
    /// Certifications.
    pub certifications: Vec<Certification>,
}

fn overwrite(target: &mut String, value: &str) {
    if !value.trim().is_empty() {
        *target = value.to_string();
    }
}

impl ParsedResume {
    /// Merges the parsed fields into `doc`.
    ///
    /// Non-blank personal fields overwrite. Experience entries matching an
    /// existing company and position replace it in place; new ones are
    /// prepended with a fresh id. Skills and certifications are upserted by
    /// name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidRequest`] if no experience id is left for
    /// a new entry; `doc` is unchanged in that case.
    pub fn apply_to(&self, doc: &mut PortfolioData) -> Result<(), AdminError> {
        let mut merged = doc.clone();
        self.merge_into(&mut merged)?;
        *doc = merged;
        Ok(())
    }

    fn merge_into(&self, doc: &mut PortfolioData) -> Result<(), AdminError> {
        let info = &self.personal_info;
        let target = &mut doc.personal_info;
        overwrite(&mut target.name, &info.name);
        overwrite(&mut target.title, &info.title);
        overwrite(&mut target.tagline, &info.tagline);
        overwrite(&mut target.location, &info.location);
        overwrite(&mut target.email, &info.email);
        overwrite(&mut target.phone, &info.phone);
        overwrite(&mut target.linkedin, &info.linkedin);
        overwrite(&mut target.summary, &info.summary);

        for parsed in &self.experience {
            let existing = doc.experience.iter_mut().find(|e| {
                e.company.eq_ignore_ascii_case(&parsed.company)
                    && e.position.eq_ignore_ascii_case(&parsed.position)
            });
            if let Some(entry) = existing {
                let id = entry.id;
                *entry = parsed.clone();
                entry.id = id;
            } else {
                let next_id = next_experience_id(&doc.experience).ok_or_else(|| {
                    AdminError::InvalidRequest("no free experience id left".to_string())
                })?;
                let mut entry = parsed.clone();
                entry.id = next_id;
                doc.experience.insert(0, entry);
            }
        }

        for skill in &self.skills.technical {
            match doc
                .skills
                .technical
                .iter_mut()
                .find(|s| s.name.eq_ignore_ascii_case(&skill.name))
            {
                Some(existing) => existing.level = skill.level,
                None => doc.skills.technical.push(skill.clone()),
            }
        }

        for cert in &self.skills.certifications {
            match doc
                .skills
                .certifications
                .iter_mut()
                .find(|c| c.name.eq_ignore_ascii_case(&cert.name))
            {
                Some(existing) => {
                    overwrite(&mut existing.status, &cert.status);
                    overwrite(&mut existing.year, &cert.year);
                }
                None => doc.skills.certifications.push(cert.clone()),
            }
        }
        Ok(())
    }
}

/// One past the highest id, or the lowest free id once the top is taken.
fn next_experience_id(entries: &[ExperienceEntry]) -> Option<u32> {
    let highest = entries.iter().map(|e| e.id).max().unwrap_or(0);
    highest
        .checked_add(1)
        .or_else(|| (1..u32::MAX).find(|id| entries.iter().all(|e| e.id != *id)))
}

/// The fixed result every successful run yields.
#[must_use]
pub fn canned_result() -> ParsedResume {
    let skill = |name: &str, level: u8| TechnicalSkill {
        name: name.to_string(),
        level,
        category: String::new(),
        enabled: true,
    };
    let cert = |name: &str| Certification {
        name: name.to_string(),
        issuer: String::new(),
        year: "2025".to_string(),
        status: "Completed".to_string(),
        enabled: true,
    };

    ParsedResume {
        personal_info: PersonalInfo {
            name: "Alex Morgan".to_string(),
            title: "Engineering & Digital Marketing Professional | AI Generalist".to_string(),
            email: "alex.morgan@example.com".to_string(),
            phone: "+49 30 0000000".to_string(),
            location: "Berlin, Germany".to_string(),
            ..PersonalInfo::default()
        },
        experience: vec![ExperienceEntry {
            company: "Northwind Media".to_string(),
            position: "Social Media Marketing Professional".to_string(),
            duration: "Nov 2023 - Oct 2024".to_string(),
            enabled: true,
            achievements: vec![
                "Moved from small-business to global-business clients in 6 months".to_string(),
                "Improved campaign performance by 25%".to_string(),
                "Maintained 95%+ client satisfaction rates".to_string(),
            ],
            ..ExperienceEntry::default()
        }],
        skills: ParsedSkills {
            technical: vec![
                skill("Meta Ads Management", 90),
                skill("Project Management", 95),
                skill("Python", 75),
            ],
            certifications: vec![cert("PRINCE2 Specialist"), cert("Scrum Master")],
        },
    }
}

/// Runs simulated parses.
#[derive(Debug, Clone)]
pub struct ResumeParser {
    clock: Arc<dyn Clock>,
    step_delay: Duration,
}

impl ResumeParser {
    /// Creates a parser that waits `step_delay` on `clock` before each step.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, step_delay: Duration) -> Self {
        Self { clock, step_delay }
    }

    /// Parser over the tokio timer.
    #[must_use]
    pub fn with_tokio_clock(step_delay: Duration) -> Self {
        Self::new(Arc::new(TokioClock), step_delay)
    }

    /// Runs one parse of `text`, reporting every state it enters to
    /// `on_state`, and returns the terminal state.
    pub async fn run<F>(&self, text: &str, mut on_state: F) -> ParseState
    where
        F: FnMut(&ParseState) + Send,
    {
        let mut state = ParseState::Idle;
        let mut enter = |state: &mut ParseState, next: ParseState| {
            debug_assert!(state.can_transition_to(&next));
            *state = next;
            on_state(state);
        };

        if text.trim().is_empty() {
            enter(
                &mut state,
                ParseState::Failed {
                    reason: "resume text is empty".to_string(),
                },
            );
            return state;
        }

        enter(
            &mut state,
            ParseState::Running {
                progress: 0,
                message: "Reading resume...".to_string(),
            },
        );
        for (progress, message) in PARSE_STEPS {
            self.clock.sleep(self.step_delay).await;
            enter(
                &mut state,
                ParseState::Running {
                    progress,
                    message: message.to_string(),
                },
            );
        }
        enter(
            &mut state,
            ParseState::Succeeded {
                result: canned_result(),
            },
        );
        state
    }
}
