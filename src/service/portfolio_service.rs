//! Portfolio service: owns the live document and orchestrates every admin
//! operation, emitting events as it goes.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, watch};

use crate::config::AdminConfig;
use crate::domain::{
    EventBus, MediaId, ParseJobId, ParseState, PortfolioData, PortfolioEvent, PortfolioSection,
    ResumeParser, Restored, ShareLink, ShareLinkGenerator, Snapshot, SnapshotExport, SnapshotId,
    SnapshotStore, StoredImage, seed_profile, validate_image,
};
use crate::error::AdminError;
use crate::persistence::StorageBackend;

/// Finished parse jobs kept for polling; older ones are dropped first.
pub const MAX_FINISHED_JOBS: usize = 32;

/// Share links kept for listing.
pub const MAX_SHARE_LINKS: usize = 100;

/// Tunables the service is built with.
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    /// Storage key of the snapshot list.
    pub snapshot_key: String,
    /// Base URL for share links.
    pub share_base_url: String,
    /// Largest accepted image, in bytes.
    pub max_image_bytes: usize,
    /// Parser used for resume jobs.
    pub parser: ResumeParser,
}

impl ServiceOptions {
    /// Options derived from the loaded configuration.
    #[must_use]
    pub fn from_config(config: &AdminConfig) -> Self {
        Self {
            snapshot_key: config.snapshot_storage_key.clone(),
            share_base_url: config.share_base_url.clone(),
            max_image_bytes: config.max_image_bytes,
            parser: ResumeParser::with_tokio_clock(config.parse_step_delay),
        }
    }
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self::from_config(&AdminConfig::default())
    }
}

/// Summary figures shown next to the version list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionStats {
    /// Number of stored snapshots.
    pub total_versions: usize,
    /// Timestamp of the newest snapshot.
    pub last_updated: Option<DateTime<Utc>>,
    /// Experience entries in the live document.
    pub experience_entries: usize,
    /// Technical plus AI skills in the live document.
    pub skills_listed: usize,
}

/// Point-in-time view of a parse job.
#[derive(Debug, Clone)]
pub struct ParseJobView {
    /// Job identifier.
    pub id: ParseJobId,
    /// When the job was started.
    pub created_at: DateTime<Utc>,
    /// Current state.
    pub state: ParseState,
}

#[derive(Debug)]
struct ParseJob {
    created_at: DateTime<Utc>,
    state: watch::Receiver<ParseState>,
}

/// Orchestration layer for the portfolio admin.
///
/// Lock order is snapshot store, then the live document, then media.
#[derive(Debug)]
pub struct PortfolioService {
    store: RwLock<SnapshotStore<PortfolioData, StorageBackend>>,
    live: RwLock<PortfolioData>,
    jobs: RwLock<HashMap<ParseJobId, ParseJob>>,
    media: RwLock<HashMap<MediaId, Arc<StoredImage>>>,
    share_links: RwLock<Vec<ShareLink>>,
    parser: ResumeParser,
    share: ShareLinkGenerator,
    max_image_bytes: usize,
    storage_kind: &'static str,
    event_bus: EventBus,
}

impl PortfolioService {
    /// Opens the version history on `storage` and makes the current
    /// snapshot the live document. First use seeds it with the built-in
    /// profile.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::StorageFailure`] if the history cannot be
    /// loaded or seeded.
    pub async fn new(
        storage: StorageBackend,
        options: ServiceOptions,
        event_bus: EventBus,
    ) -> Result<Self, AdminError> {
        let storage_kind = storage.kind_str();
        let store = SnapshotStore::initialize(storage, options.snapshot_key, &seed_profile()).await?;
        let live = store
            .current()
            .map(|s| s.data.clone())
            .ok_or_else(|| AdminError::Internal("version history is empty".to_string()))?;

        tracing::info!(
            backend = storage_kind,
            versions = store.len(),
            "portfolio service ready"
        );

        Ok(Self {
            store: RwLock::new(store),
            live: RwLock::new(live),
            jobs: RwLock::new(HashMap::new()),
            media: RwLock::new(HashMap::new()),
            share_links: RwLock::new(Vec::new()),
            parser: options.parser,
            share: ShareLinkGenerator::new(&options.share_base_url),
            max_image_bytes: options.max_image_bytes,
            storage_kind,
            event_bus,
        })
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Name of the storage backend in use.
    #[must_use]
    pub fn storage_kind(&self) -> &'static str {
        self.storage_kind
    }

    /// Largest accepted image upload, in bytes.
    #[must_use]
    pub fn max_image_bytes(&self) -> usize {
        self.max_image_bytes
    }

    // -- live document ----------------------------------------------------

    /// Copy of the live document.
    pub async fn portfolio(&self) -> PortfolioData {
        self.live.read().await.clone()
    }

    /// Live document with disabled entries and hidden sections removed.
    pub async fn public_portfolio(&self) -> PortfolioData {
        self.live.read().await.public_view()
    }

    /// Replaces the whole live document. Skill levels and ratings are
    /// clamped to their ranges.
    pub async fn replace_portfolio(&self, mut data: PortfolioData) -> PortfolioData {
        data.clamp_ratings();
        let mut live = self.live.write().await;
        *live = data;
        let updated = live.clone();
        drop(live);

        self.publish_updated(None);
        tracing::info!("portfolio replaced");
        updated
    }

    /// Replaces one section of the live document.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidRequest`] for an unknown section name or
    /// a body that does not fit the section.
    pub async fn update_section(
        &self,
        section: &str,
        value: serde_json::Value,
    ) -> Result<PortfolioData, AdminError> {
        let section: PortfolioSection = section
            .parse()
            .map_err(|e: crate::domain::portfolio::UnknownSection| {
                AdminError::InvalidRequest(e.to_string())
            })?;

        let mut live = self.live.write().await;
        live.apply_section(section, value)
            .map_err(|e| AdminError::InvalidRequest(format!("invalid {section} body: {e}")))?;
        let updated = live.clone();
        drop(live);

        self.publish_updated(Some(section.as_str()));
        tracing::info!(%section, "portfolio section updated");
        Ok(updated)
    }

    // -- versions ---------------------------------------------------------

    /// Saves the live document as a new snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::StorageFailure`] if the history cannot be
    /// persisted.
    pub async fn save_version(
        &self,
        description: Option<&str>,
    ) -> Result<Snapshot<PortfolioData>, AdminError> {
        let mut store = self.store.write().await;
        let live = self.live.read().await;
        let snapshot = store.save(&live, description).await?;
        let total_versions = store.len();
        drop(live);
        drop(store);

        let _ = self.event_bus.publish(PortfolioEvent::VersionSaved {
            version_id: snapshot.id.to_string(),
            description: snapshot.description.clone(),
            total_versions,
            timestamp: Utc::now(),
        });
        Ok(snapshot)
    }

    /// Snapshots, newest first.
    pub async fn list_versions(&self) -> Vec<Snapshot<PortfolioData>> {
        self.store.read().await.list().to_vec()
    }

    /// One snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::SnapshotNotFound`] if `id` is absent.
    pub async fn get_version(&self, id: &SnapshotId) -> Result<Snapshot<PortfolioData>, AdminError> {
        self.store.read().await.get(id).cloned()
    }

    /// Restores a snapshot and makes its data the live document.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::SnapshotNotFound`] if `id` is absent, or
    /// [`AdminError::StorageFailure`] if the history cannot be persisted;
    /// the live document is untouched on error.
    pub async fn restore_version(
        &self,
        id: &SnapshotId,
    ) -> Result<Restored<PortfolioData>, AdminError> {
        let mut store = self.store.write().await;
        let restored = store.restore(id).await?;
        let mut live = self.live.write().await;
        *live = restored.data.clone();
        drop(live);
        drop(store);

        let _ = self.event_bus.publish(PortfolioEvent::VersionRestored {
            version_id: restored.recorded.id.to_string(),
            restored_from: id.to_string(),
            timestamp: Utc::now(),
        });
        self.publish_updated(None);
        Ok(restored)
    }

    /// Deletes a snapshot other than the current one.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::SnapshotNotFound`] if `id` is absent,
    /// [`AdminError::InvalidOperation`] for the current or last snapshot, or
    /// [`AdminError::StorageFailure`] if the history cannot be persisted.
    pub async fn delete_version(&self, id: &SnapshotId) -> Result<(), AdminError> {
        let mut store = self.store.write().await;
        store.delete(id).await?;
        let total_versions = store.len();
        drop(store);

        let _ = self.event_bus.publish(PortfolioEvent::VersionDeleted {
            version_id: id.to_string(),
            total_versions,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// A snapshot's data as a downloadable JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::SnapshotNotFound`] if `id` is absent.
    pub async fn export_version(&self, id: &SnapshotId) -> Result<SnapshotExport, AdminError> {
        self.store.read().await.export(id)
    }

    /// Figures for the version overview.
    pub async fn version_stats(&self) -> VersionStats {
        let store = self.store.read().await;
        let live = self.live.read().await;
        VersionStats {
            total_versions: store.len(),
            last_updated: store.current().map(|s| s.timestamp),
            experience_entries: live.experience_count(),
            skills_listed: live.skills.listed(),
        }
    }

    // -- resume parsing ---------------------------------------------------

    /// Starts a background parse of `text`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidRequest`] if `text` is blank.
    pub async fn start_parse(&self, text: String) -> Result<ParseJobView, AdminError> {
        if text.trim().is_empty() {
            return Err(AdminError::InvalidRequest(
                "paste resume text or upload a file first".to_string(),
            ));
        }

        let id = ParseJobId::new();
        let created_at = Utc::now();
        let (tx, rx) = watch::channel(ParseState::Idle);
        let mut jobs = self.jobs.write().await;
        prune_finished_jobs(&mut jobs);
        jobs.insert(
            id,
            ParseJob {
                created_at,
                state: rx,
            },
        );
        drop(jobs);

        let parser = self.parser.clone();
        let bus = self.event_bus.clone();
        tokio::spawn(async move {
            let terminal = parser
                .run(&text, move |state| {
                    tx.send_replace(state.clone());
                    publish_parse_state(&bus, id, state);
                })
                .await;
            tracing::info!(job_id = %id, status = terminal.status_str(), "resume parse finished");
        });

        tracing::info!(job_id = %id, "resume parse started");
        Ok(ParseJobView {
            id,
            created_at,
            state: ParseState::Idle,
        })
    }

    /// Current state of a parse job.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::ParseJobNotFound`] for an unknown job.
    pub async fn parse_job(&self, id: ParseJobId) -> Result<ParseJobView, AdminError> {
        let jobs = self.jobs.read().await;
        let job = jobs
            .get(&id)
            .ok_or(AdminError::ParseJobNotFound(*id.as_uuid()))?;
        Ok(ParseJobView {
            id,
            created_at: job.created_at,
            state: job.state.borrow().clone(),
        })
    }

    /// Merges a succeeded job's result into the live document and forgets
    /// the job.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::ParseJobNotFound`] for an unknown job,
    /// [`AdminError::InvalidOperation`] if the job has not succeeded, or
    /// [`AdminError::InvalidRequest`] if the result cannot be merged.
    pub async fn apply_parse(&self, id: ParseJobId) -> Result<PortfolioData, AdminError> {
        let view = self.parse_job(id).await?;
        let ParseState::Succeeded { result } = view.state else {
            return Err(AdminError::InvalidOperation(format!(
                "parse job {id} is {}, not succeeded",
                view.state.status_str()
            )));
        };

        let mut live = self.live.write().await;
        result.apply_to(&mut live)?;
        let updated = live.clone();
        drop(live);
        self.jobs.write().await.remove(&id);

        self.publish_updated(Some("resume"));
        tracing::info!(job_id = %id, "parsed resume applied");
        Ok(updated)
    }

    // -- media ------------------------------------------------------------

    /// Validates and stores a profile image, then points
    /// `personalInfo.profileImage` at it. Images no longer referenced by the
    /// live document are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidRequest`] for a non-image, empty or
    /// oversize upload.
    pub async fn upload_profile_image(
        &self,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Arc<StoredImage>, AdminError> {
        validate_image(content_type, bytes.len(), self.max_image_bytes)
            .map_err(|e| AdminError::InvalidRequest(e.to_string()))?;

        let image = Arc::new(StoredImage::new(content_type, bytes));
        let url = image.url();
        let mut live = self.live.write().await;
        let mut media = self.media.write().await;
        media.insert(image.id, Arc::clone(&image));
        live.personal_info.profile_image = url.clone();
        media.retain(|_, stored| stored.url() == url);
        drop(media);
        drop(live);

        let _ = self.event_bus.publish(PortfolioEvent::ProfileImageUpdated {
            media_id: image.id,
            url,
            size: image.size(),
            timestamp: Utc::now(),
        });
        tracing::info!(media_id = %image.id, size = image.size(), "profile image stored");
        Ok(image)
    }

    /// A stored image.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::MediaNotFound`] for an unknown id.
    pub async fn media(&self, id: MediaId) -> Result<Arc<StoredImage>, AdminError> {
        self.media
            .read()
            .await
            .get(&id)
            .map(Arc::clone)
            .ok_or(AdminError::MediaNotFound(*id.as_uuid()))
    }

    // -- share links ------------------------------------------------------

    /// Generates and records a share link.
    pub async fn create_share_link(&self) -> ShareLink {
        let link = self.share.generate();
        let mut links = self.share_links.write().await;
        links.push(link.clone());
        if links.len() > MAX_SHARE_LINKS {
            let excess = links.len() - MAX_SHARE_LINKS;
            links.drain(..excess);
        }
        drop(links);

        let _ = self.event_bus.publish(PortfolioEvent::ShareLinkCreated {
            url: link.url.clone(),
            timestamp: link.created_at,
        });
        tracing::info!(url = %link.url, "share link created");
        link
    }

    /// Links generated so far, newest first.
    pub async fn share_links(&self) -> Vec<ShareLink> {
        self.share_links.read().await.iter().rev().cloned().collect()
    }

    fn publish_updated(&self, section: Option<&str>) {
        let _ = self.event_bus.publish(PortfolioEvent::PortfolioUpdated {
            section: section.map(str::to_string),
            timestamp: Utc::now(),
        });
    }
}

fn prune_finished_jobs(jobs: &mut HashMap<ParseJobId, ParseJob>) {
    let mut finished: Vec<(DateTime<Utc>, ParseJobId)> = jobs
        .iter()
        .filter(|(_, job)| job.state.borrow().is_terminal())
        .map(|(id, job)| (job.created_at, *id))
        .collect();
    if finished.len() < MAX_FINISHED_JOBS {
        return;
    }
    finished.sort_unstable_by_key(|(created_at, _)| *created_at);
    let excess = finished.len() + 1 - MAX_FINISHED_JOBS;
    for (_, id) in finished.into_iter().take(excess) {
        jobs.remove(&id);
    }
}

fn publish_parse_state(bus: &EventBus, job_id: ParseJobId, state: &ParseState) {
    let event = match state {
        ParseState::Idle => return,
        ParseState::Running { progress, message } => PortfolioEvent::ResumeParseProgress {
            job_id,
            progress: *progress,
            message: message.clone(),
            timestamp: Utc::now(),
        },
        ParseState::Succeeded { .. } => PortfolioEvent::ResumeParseFinished {
            job_id,
            succeeded: true,
            error: None,
            timestamp: Utc::now(),
        },
        ParseState::Failed { reason } => PortfolioEvent::ResumeParseFinished {
            job_id,
            succeeded: false,
            error: Some(reason.clone()),
            timestamp: Utc::now(),
        },
    };
    let _ = bus.publish(event);
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::portfolio::ExperienceEntry;
    use crate::persistence::MemoryStorage;
    use serde_json::json;
    use std::time::Duration;

    fn options() -> ServiceOptions {
        ServiceOptions {
            snapshot_key: "portfolioVersions".to_string(),
            share_base_url: "https://portfolio.test".to_string(),
            max_image_bytes: 1024,
            parser: ResumeParser::with_tokio_clock(Duration::ZERO),
        }
    }

    async fn service_over(storage: MemoryStorage) -> PortfolioService {
        let Ok(service) =
            PortfolioService::new(StorageBackend::Memory(storage), options(), EventBus::new(64))
                .await
        else {
            panic!("service construction failed");
        };
        service
    }

    async fn service() -> PortfolioService {
        service_over(MemoryStorage::new()).await
    }

    async fn wait_for_terminal(service: &PortfolioService, id: ParseJobId) -> ParseState {
        for _ in 0..200 {
            let Ok(view) = service.parse_job(id).await else {
                panic!("job vanished");
            };
            if view.state.is_terminal() {
                return view.state;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("parse job did not finish");
    }

    #[tokio::test]
    async fn starts_from_seed_profile() {
        let service = service().await;
        assert_eq!(service.portfolio().await, seed_profile());
        assert_eq!(service.list_versions().await.len(), 1);
        assert_eq!(service.storage_kind(), "memory");
    }

    #[tokio::test]
    async fn live_document_reloads_from_head_snapshot() {
        let storage = MemoryStorage::new();
        let service = service_over(storage.clone()).await;
        let mut doc = seed_profile();
        doc.personal_info.name = "Renamed".to_string();
        service.replace_portfolio(doc.clone()).await;
        assert!(service.save_version(Some("rename")).await.is_ok());

        let reopened = service_over(storage).await;
        assert_eq!(reopened.portfolio().await, doc);
    }

    #[tokio::test]
    async fn update_section_validates_name_and_body() {
        let service = service().await;
        let result = service.update_section("footer", json!({})).await;
        assert!(matches!(result, Err(AdminError::InvalidRequest(_))));

        let result = service.update_section("experience", json!("nope")).await;
        assert!(matches!(result, Err(AdminError::InvalidRequest(_))));

        let Ok(updated) = service
            .update_section("sections", json!({ "projects": false }))
            .await
        else {
            panic!("section update failed");
        };
        assert!(!updated.sections.projects);
        assert!(service.public_portfolio().await.projects.is_empty());
    }

    #[tokio::test]
    async fn restore_makes_data_live() {
        let service = service().await;
        let mut edited = seed_profile();
        edited.experience.push(ExperienceEntry::default());
        service.replace_portfolio(edited).await;
        assert!(service.save_version(Some("edit")).await.is_ok());

        let Ok(restored) = service.restore_version(&SnapshotId::FIRST).await else {
            panic!("restore failed");
        };
        assert_eq!(restored.data, seed_profile());
        assert_eq!(service.portfolio().await, seed_profile());
        assert_eq!(service.list_versions().await.len(), 3);
    }

    #[tokio::test]
    async fn mutations_publish_events() {
        let service = service().await;
        let mut rx = service.event_bus().subscribe();
        assert!(service.save_version(None).await.is_ok());

        let Ok(event) = rx.recv().await else {
            panic!("no event");
        };
        assert_eq!(event.event_type_str(), "version_saved");
    }

    #[tokio::test]
    async fn version_stats_reflect_live_document() {
        let service = service().await;
        let stats = service.version_stats().await;
        assert_eq!(stats.total_versions, 1);
        assert_eq!(stats.experience_entries, 2);
        assert_eq!(stats.skills_listed, 11);
        assert!(stats.last_updated.is_some());
    }

    #[tokio::test]
    async fn blank_resume_is_rejected() {
        let service = service().await;
        let result = service.start_parse("  ".to_string()).await;
        assert!(matches!(result, Err(AdminError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn parse_then_apply() {
        let service = service().await;
        let Ok(job) = service.start_parse("Experienced engineer".to_string()).await else {
            panic!("start failed");
        };
        let state = wait_for_terminal(&service, job.id).await;
        assert!(matches!(state, ParseState::Succeeded { .. }));

        let Ok(updated) = service.apply_parse(job.id).await else {
            panic!("apply failed");
        };
        assert_eq!(updated.personal_info.email, "alex.morgan@example.com");
        assert_eq!(service.portfolio().await, updated);
    }

    #[tokio::test]
    async fn unknown_job_is_not_found() {
        let service = service().await;
        let result = service.apply_parse(ParseJobId::new()).await;
        assert!(matches!(result, Err(AdminError::ParseJobNotFound(_))));
    }

    #[tokio::test]
    async fn upload_links_profile_image() {
        let service = service().await;
        let Ok(image) = service.upload_profile_image("image/png", vec![0u8; 16]).await else {
            panic!("upload failed");
        };
        assert_eq!(
            service.portfolio().await.personal_info.profile_image,
            image.url()
        );
        let Ok(fetched) = service.media(image.id).await else {
            panic!("media missing");
        };
        assert_eq!(fetched.bytes.len(), 16);
    }

    #[tokio::test]
    async fn upload_rejects_bad_images() {
        let service = service().await;
        let before = service.portfolio().await;
        let result = service.upload_profile_image("text/plain", vec![1]).await;
        assert!(matches!(result, Err(AdminError::InvalidRequest(_))));
        let result = service.upload_profile_image("image/png", vec![0u8; 2048]).await;
        assert!(matches!(result, Err(AdminError::InvalidRequest(_))));
        assert_eq!(service.portfolio().await, before);
    }

    #[tokio::test]
    async fn share_links_are_listed_newest_first() {
        let service = service().await;
        let first = service.create_share_link().await;
        let second = service.create_share_link().await;
        assert!(first.url.starts_with("https://portfolio.test/share/"));
        let links = service.share_links().await;
        assert_eq!(links, vec![second, first]);
    }

    async fn finished_job(service: &PortfolioService) -> ParseJobId {
        let Ok(job) = service.start_parse("Resume text".to_string()).await else {
            panic!("start failed");
        };
        wait_for_terminal(service, job.id).await;
        job.id
    }

    #[tokio::test]
    async fn apply_survives_exhausted_experience_ids() {
        let service = service().await;
        let mut doc = seed_profile();
        doc.experience = vec![ExperienceEntry {
            id: u32::MAX,
            company: "Fabrikam".to_string(),
            position: "Lead".to_string(),
            ..ExperienceEntry::default()
        }];
        service.replace_portfolio(doc).await;

        let id = finished_job(&service).await;
        let Ok(updated) = service.apply_parse(id).await else {
            panic!("apply failed");
        };
        let ids: Vec<u32> = updated.experience.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, u32::MAX]);
    }

    #[tokio::test]
    async fn applied_job_is_forgotten() {
        let service = service().await;
        let id = finished_job(&service).await;
        assert!(service.apply_parse(id).await.is_ok());
        assert!(matches!(
            service.parse_job(id).await,
            Err(AdminError::ParseJobNotFound(_))
        ));
    }

    #[tokio::test]
    async fn finished_jobs_are_capped() {
        let service = service().await;
        let first = finished_job(&service).await;
        for _ in 0..MAX_FINISHED_JOBS + 4 {
            finished_job(&service).await;
        }
        assert!(service.jobs.read().await.len() <= MAX_FINISHED_JOBS);
        assert!(matches!(
            service.parse_job(first).await,
            Err(AdminError::ParseJobNotFound(_))
        ));
    }

    #[tokio::test]
    async fn replaced_images_are_evicted() {
        let service = service().await;
        let mut uploaded = Vec::new();
        for size in [8, 16, 32] {
            let Ok(image) = service.upload_profile_image("image/png", vec![0u8; size]).await
            else {
                panic!("upload failed");
            };
            uploaded.push(image.id);
        }

        assert_eq!(service.media.read().await.len(), 1);
        let Some((latest, older)) = uploaded.split_last() else {
            panic!("nothing uploaded");
        };
        assert!(service.media(*latest).await.is_ok());
        for id in older {
            assert!(matches!(
                service.media(*id).await,
                Err(AdminError::MediaNotFound(_))
            ));
        }
    }

    #[tokio::test]
    async fn share_links_are_capped() {
        let service = service().await;
        for _ in 0..MAX_SHARE_LINKS + 3 {
            service.create_share_link().await;
        }
        assert_eq!(service.share_links().await.len(), MAX_SHARE_LINKS);
    }

    #[tokio::test]
    async fn replace_clamps_skill_levels() {
        let service = service().await;
        let mut doc = seed_profile();
        if let Some(skill) = doc.skills.technical.first_mut() {
            skill.level = 250;
        }
        let stored = service.replace_portfolio(doc).await;
        assert!(stored.skills.technical.iter().all(|s| s.level <= 100));
    }
}
