//! Data Transfer Objects for REST request/response serialization.
//!
//! The portfolio document itself is exchanged as
//! [`crate::domain::PortfolioData`]; the types here wrap everything else.

pub mod common_dto;
pub mod media_dto;
pub mod resume_dto;
pub mod share_dto;
pub mod version_dto;

pub use common_dto::*;
pub use media_dto::*;
pub use resume_dto::*;
pub use share_dto::*;
pub use version_dto::*;
