//! Shareable profile links.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Length of the random link suffix.
pub const TOKEN_LEN: usize = 13;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A generated link. Nothing resolves it; it is recorded for listing only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ShareLink {
    /// Random lowercase base36 suffix.
    pub token: String,
    /// Full URL.
    pub url: String,
    /// Generation instant.
    pub created_at: DateTime<Utc>,
}

/// Produces links rooted at a base URL.
#[derive(Debug, Clone)]
pub struct ShareLinkGenerator {
    base_url: String,
}

impl ShareLinkGenerator {
    /// Creates a generator; a trailing `/` on `base_url` is ignored.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Generates `<base>/share/<token>`.
    #[must_use]
    pub fn generate(&self) -> ShareLink {
        let token = random_token();
        ShareLink {
            url: format!("{}/share/{token}", self.base_url),
            token,
            created_at: Utc::now(),
        }
    }
}

fn random_token() -> String {
    let mut n = uuid::Uuid::new_v4().as_u128();
    let mut token = String::with_capacity(TOKEN_LEN);
    for _ in 0..TOKEN_LEN {
        let digit = (n % 36) as u8;
        n /= 36;
        if let Some(c) = ALPHABET.get(usize::from(digit)) {
            token.push(char::from(*c));
        }
    }
    token
}
