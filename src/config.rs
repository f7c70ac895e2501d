//! Configuration for the admin screen and the loan service adapter.

use crate::error::{AdminError, Result};
use clap::ValueEnum;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Which outcome wins when several fetches of the pending list overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FetchOrdering {
    /// The fetch that resolves last decides the state; earlier outcomes are dropped.
    #[default]
    LastResolved,
    /// Only the most recently issued fetch may decide the state.
    LatestIssued,
}

/// Behavior of a single admin screen instance.
#[derive(Debug, Clone, Default)]
pub struct ScreenConfig {
    pub fetch_ordering: FetchOrdering,
    /// Re-fetch the pending list after a successful approve or reject.
    pub refresh_after_decision: bool,
}

impl ScreenConfig {
    pub fn with_fetch_ordering(mut self, ordering: FetchOrdering) -> Self {
        self.fetch_ordering = ordering;
        self
    }

    pub fn with_refresh_after_decision(mut self, refresh: bool) -> Self {
        self.refresh_after_decision = refresh;
        self
    }
}

/// Connection settings for the HTTP loan service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub api_token: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            api_token: None,
        }
    }
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_api_token(mut self, token: Option<String>) -> Self {
        self.api_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(AdminError::Config(format!(
                "API URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(AdminError::Config("timeout must be greater than zero".to_string()));
        }
        Ok(())
    }
}
