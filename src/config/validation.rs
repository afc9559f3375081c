//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (default path and fallback page are routed)
//! - Validate page identifiers are usable as bundle path segments
//! - Validate addresses and URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{BundleSource, RouterConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route table is empty")]
    EmptyRouteTable,

    #[error("route path '{0}' must start with '/'")]
    RelativePath(String),

    #[error("page identifier '{page}' for route '{path}' is not a valid bundle name")]
    InvalidPageId { path: String, page: String },

    #[error("default path '{0}' has no route")]
    UnroutedDefaultPath(String),

    #[error("fallback page '{0}' is not the target of any route")]
    UnroutedFallbackPage(String),

    #[error("pages prefix '{0}' must start with '/'")]
    InvalidPagesPrefix(String),

    #[error("invalid bundle base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),

    #[error("event channel capacity must be greater than zero")]
    ZeroEventCapacity,
}

/// Check that a page identifier can be embedded in `{prefix}/P/P.html`.
pub fn is_valid_page_id(page: &str) -> bool {
    !page.is_empty()
        && page != "."
        && page != ".."
        && page
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.routes.is_empty() {
        errors.push(ValidationError::EmptyRouteTable);
    }

    for (path, page) in &config.routes {
        if !path.starts_with('/') {
            errors.push(ValidationError::RelativePath(path.clone()));
        }
        if !is_valid_page_id(page) {
            errors.push(ValidationError::InvalidPageId {
                path: path.clone(),
                page: page.clone(),
            });
        }
    }

    if !config.routes.is_empty() {
        if !config.routes.contains_key(&config.default_path) {
            errors.push(ValidationError::UnroutedDefaultPath(
                config.default_path.clone(),
            ));
        }
        if !config.routes.values().any(|p| *p == config.fallback_page) {
            errors.push(ValidationError::UnroutedFallbackPage(
                config.fallback_page.clone(),
            ));
        }
    }

    if !config.bundles.pages_prefix.starts_with('/') {
        errors.push(ValidationError::InvalidPagesPrefix(
            config.bundles.pages_prefix.clone(),
        ));
    }

    if let BundleSource::Http { base_url } = &config.bundles.source {
        if let Err(e) = url::Url::parse(base_url) {
            errors.push(ValidationError::InvalidBaseUrl {
                url: base_url.clone(),
                reason: e.to_string(),
            });
        }
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.navigation.event_capacity == 0 {
        errors.push(ValidationError::ZeroEventCapacity);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
