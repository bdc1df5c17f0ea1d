//! Domain layer: snapshot history, the portfolio document, the resume
//! parser, media, share links and the event system.

pub mod event_bus;
pub mod ids;
pub mod media;
pub mod portfolio;
pub mod portfolio_event;
pub mod resume_parser;
pub mod share_link;
pub mod snapshot;
pub mod snapshot_store;

pub use event_bus::EventBus;
pub use ids::{MediaId, ParseJobId};
pub use media::{ImageRejection, StoredImage, validate_image};
pub use portfolio::{PortfolioData, PortfolioSection, seed_profile};
pub use portfolio_event::{EventTopic, PortfolioEvent};
pub use resume_parser::{Clock, ParseState, ParsedResume, ResumeParser, TokioClock};
pub use share_link::{ShareLink, ShareLinkGenerator};
pub use snapshot::{Snapshot, SnapshotExport, SnapshotId};
pub use snapshot_store::{Restored, SnapshotStore};
