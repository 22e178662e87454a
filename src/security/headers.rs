//! Forwarded-header policy.
//!
//! # Responsibilities
//! - Decide which caller-supplied headers reach the upstream
//! - Keep the default contract permissive (forward everything)
//!
//! # Design Decisions
//! - Names compared case-insensitively
//! - The relay's own User-Agent default is not subject to the list;
//!   only caller-supplied headers are filtered

use std::collections::HashSet;

use crate::config::SecurityConfig;

/// Which caller headers are forwarded upstream.
#[derive(Debug, Clone, Default)]
pub struct HeaderPolicy {
    /// Lower-cased allowed names. `None` allows all.
    allowed: Option<HashSet<String>>,
}

impl HeaderPolicy {
    /// Forward every caller header.
    pub fn permissive() -> Self {
        Self { allowed: None }
    }

    /// Forward only the named headers.
    pub fn allow_list<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed: Some(
                names
                    .into_iter()
                    .map(|n| n.as_ref().trim().to_ascii_lowercase())
                    .collect(),
            ),
        }
    }

    pub fn from_config(config: &SecurityConfig) -> Self {
        match &config.forward_headers {
            Some(names) => Self::allow_list(names),
            None => Self::permissive(),
        }
    }

    /// Whether a caller header named `name` may be forwarded.
    pub fn permits(&self, name: &str) -> bool {
        match &self.allowed {
            Some(allowed) => allowed.contains(&name.to_ascii_lowercase()),
            None => true,
        }
    }
}
