// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./sibyl.toml` > `~/.config/sibyl/sibyl.toml` > `/etc/sibyl/sibyl.toml`
//! with environment variable overrides via `SIBYL_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::SibylConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/sibyl/sibyl.toml` (system-wide)
/// 3. `~/.config/sibyl/sibyl.toml` (user XDG config)
/// 4. `./sibyl.toml` (local directory)
/// 5. `SIBYL_*` environment variables
pub fn load_config() -> Result<SibylConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SibylConfig::default()))
        .merge(Toml::file("/etc/sibyl/sibyl.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("sibyl/sibyl.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("sibyl.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<SibylConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SibylConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SibylConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SibylConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `SIBYL_GROQ_API_KEY` must map to
/// `groq.api_key`, not `groq.api.key`.
fn env_provider() -> Env {
    Env::prefixed("SIBYL_").map(|key| {
        // `key` is the env var name with prefix stripped; figment hands it
        // over before its own lowercasing, so lowercase here.
        // Example: SIBYL_GROQ_API_KEY -> "groq_api_key"
        let key_str = key.as_str().to_ascii_lowercase();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("groq_", "groq.", 1)
            .replacen("retrieval_", "retrieval.", 1)
            .replacen("search_", "search.", 1)
            .replacen("gateway_", "gateway.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_from_str_overrides_defaults() {
        let config = load_config_from_str(
            r#"
            [agent]
            name = "test-agent"

            [retrieval]
            top_k = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.agent.name, "test-agent");
        assert_eq!(config.retrieval.top_k, 3);
        // Untouched sections keep their defaults.
        assert_eq!(config.retrieval.chunk_size, 800);
        assert_eq!(config.gateway.port, 8000);
    }

    #[test]
    fn load_from_str_empty_gives_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.agent.name, "sibyl");
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = load_config_from_str(
            r#"
            [agent]
            nmae = "typo"
            "#,
        );
        assert!(result.is_err(), "deny_unknown_fields should reject typos");
    }

    #[test]
    fn env_provider_maps_sections() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SIBYL_GROQ_API_KEY", "gsk-test");
            jail.set_env("SIBYL_GATEWAY_PORT", "9000");
            let config: SibylConfig = Figment::new()
                .merge(Serialized::defaults(SibylConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.groq.api_key.as_deref(), Some("gsk-test"));
            assert_eq!(config.gateway.port, 9000);
            Ok(())
        });
    }
}
