// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Match configuration, read from JSON.

use std::{fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{ai::Difficulty, core::Color};

/// Who sits at the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayMode {
    /// Two humans sharing the board.
    Local,
    /// A human against the computer, which plays `ai_color`.
    VsAi {
        #[serde(default = "default_ai_color")]
        ai_color: Color,
        #[serde(default)]
        difficulty: Difficulty,
    },
}

impl PlayMode {
    /// A human-vs-AI mode with the AI playing black.
    pub fn vs_ai(difficulty: Difficulty) -> PlayMode {
        PlayMode::VsAi {
            ai_color: default_ai_color(),
            difficulty,
        }
    }

    /// The color and difficulty of the AI seat, if there is one.
    pub fn ai_seat(&self) -> Option<(Color, Difficulty)> {
        match *self {
            PlayMode::Local => None,
            PlayMode::VsAi {
                ai_color,
                difficulty,
            } => Some((ai_color, difficulty)),
        }
    }
}

impl Default for PlayMode {
    fn default() -> Self {
        PlayMode::Local
    }
}

fn default_ai_color() -> Color {
    Color::Black
}

fn default_first_to_move() -> Color {
    Color::White
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchConfig {
    #[serde(default)]
    pub mode: PlayMode,
    #[serde(default = "default_first_to_move")]
    pub first_to_move: Color,
    /// Seed for the AI's random tie-breaks. Seeded from entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl MatchConfig {
    pub fn from_json(json: &str) -> anyhow::Result<MatchConfig> {
        let config = serde_json::from_str(json).context("invalid match configuration")?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<MatchConfig> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read match configuration {}", path.display()))?;
        let config = MatchConfig::from_json(&contents)?;
        tracing::info!("loaded match configuration from {}", path.display());
        Ok(config)
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            mode: PlayMode::default(),
            first_to_move: default_first_to_move(),
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(MatchConfig::default(), MatchConfig::from_json("{}").unwrap());
    }

    #[test]
    fn vs_ai() {
        let config = MatchConfig::from_json(
            r#"{
                "mode": { "type": "vs_ai", "ai_color": "white", "difficulty": "hard" },
                "first_to_move": "black",
                "seed": 42
            }"#,
        )
        .unwrap();
        assert_eq!(
            PlayMode::VsAi {
                ai_color: Color::White,
                difficulty: Difficulty::Hard
            },
            config.mode
        );
        assert_eq!(Color::Black, config.first_to_move);
        assert_eq!(Some(42), config.seed);
    }

    #[test]
    fn vs_ai_defaults() {
        let config = MatchConfig::from_json(r#"{ "mode": { "type": "vs_ai" } }"#).unwrap();
        assert_eq!(PlayMode::vs_ai(Difficulty::Medium), config.mode);
        assert_eq!(Some((Color::Black, Difficulty::Medium)), config.mode.ai_seat());
        assert_eq!(None, PlayMode::Local.ai_seat());
    }

    #[test]
    fn rejects_garbage() {
        assert!(MatchConfig::from_json(r#"{ "mode": { "type": "online" } }"#).is_err());
        assert!(MatchConfig::from_json(r#"{ "first_to_move": "red" }"#).is_err());
        assert!(MatchConfig::from_json(r#"{ "board_size": 10 }"#).is_err());
    }

    #[test]
    fn missing_file() {
        assert!(MatchConfig::from_file("/nonexistent/checkers.json").is_err());
    }
}
