// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editor configuration.
//!
//! Every field has a default, so a partial JSON object (or `{}`) is a valid configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MAX_UNDO: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Number of undo records kept before the oldest is dropped.
    pub max_undo: usize,
    /// Round interactive move deltas to whole canvas units.
    pub round_move_delta: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_undo: DEFAULT_MAX_UNDO,
            round_move_delta: true,
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid editor configuration: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::{EditorConfig, DEFAULT_MAX_UNDO};

    #[test]
    fn empty_object_yields_defaults() {
        let config = EditorConfig::from_json_str("{}").expect("config");
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.max_undo, DEFAULT_MAX_UNDO);
    }

    #[test]
    fn partial_object_overrides_only_given_fields() {
        let config = EditorConfig::from_json_str(r#"{ "maxUndo": 3 }"#).expect("config");
        assert_eq!(config.max_undo, 3);
        assert!(config.round_move_delta);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(EditorConfig::from_json_str(r#"{ "maxUndo": "many" }"#).is_err());
    }
}
