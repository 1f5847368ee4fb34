// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

//! Renderer configuration.

use serde::Deserialize;
use serde::Serialize;

/// What to do with a forwarder egress hop which is neither the chain
/// egress nor an intra-overlay hop.
///
/// No such hop should ever be built, but nothing in the hop model
/// rules it out either.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UncoveredHopPolicy {
    /// Install nothing and log a warning.
    #[default]
    Warn,
    /// Fail the hop.
    Deny,
}

/// The overall configuration for a processor.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct RendererCfg {
    pub uncovered_hop: UncoveredHopPolicy,

    /// Log every resolver answer at debug level.
    pub log_resolutions: bool,
}

impl Default for RendererCfg {
    fn default() -> Self {
        Self { uncovered_hop: UncoveredHopPolicy::Warn, log_resolutions: true }
    }
}

#[cfg(feature = "std")]
#[derive(Debug, thiserror::Error)]
pub enum CfgError {
    #[error("failed to parse renderer config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(feature = "std")]
impl RendererCfg {
    /// Parse a configuration from a TOML document. Missing keys take
    /// their default value.
    pub fn from_toml(s: &str) -> Result<Self, CfgError> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(all(test, feature = "std"))]
mod test {
    use super::*;

    #[test]
    fn empty_doc_is_default() {
        let cfg = RendererCfg::from_toml("").unwrap();
        assert_eq!(cfg, RendererCfg::default());
    }

    #[test]
    fn deny_uncovered() {
        let cfg = RendererCfg::from_toml(
            r#"
            uncovered_hop = "deny"
            log_resolutions = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.uncovered_hop, UncoveredHopPolicy::Deny);
        assert!(!cfg.log_resolutions);
    }

    #[test]
    fn bad_policy() {
        let err = RendererCfg::from_toml(r#"uncovered_hop = "panic""#)
            .unwrap_err();
        assert!(matches!(err, CfgError::Parse(_)));
    }
}
