// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Sibyl answering service.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, and environment
//! variable overrides.

pub mod loader;
pub mod model;

pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::SibylConfig;
