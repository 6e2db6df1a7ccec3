//! State

use std::sync::Arc;

use gallery_app::context::AppContext;
use sha2::{Digest, Sha256};

/// SHA-256 of the configured admin token.
#[derive(Clone)]
pub(crate) struct AdminToken([u8; 32]);

impl AdminToken {
    /// Returns `None` for a missing or blank token, which disables the admin
    /// routes.
    pub(crate) fn from_config(token: Option<&str>) -> Option<Self> {
        token
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| Self(digest(token)))
    }

    /// Compares digests so the comparison time does not depend on how much
    /// of the raw token matches.
    pub(crate) fn matches(&self, candidate: &str) -> bool {
        self.0 == digest(candidate)
    }
}

fn digest(token: &str) -> [u8; 32] {
    Sha256::digest(token.as_bytes()).into()
}

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) admin_token: Option<AdminToken>,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, admin_token: Option<AdminToken>) -> Self {
        Self { app, admin_token }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, admin_token: Option<AdminToken>) -> Arc<Self> {
        Arc::new(Self::new(app, admin_token))
    }
}
