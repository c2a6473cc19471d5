//! Optional tuning file at `~/.config/critical/config.json`.
//!
//! Every field has a default, so a missing file, a partial file, or a broken
//! file all produce a usable config. Prompts are deliberately not part of it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ResourceError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub music_path: PathBuf,
    pub music_volume: f32,
    pub font_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,
    pub star_count: usize,
    pub nebula_count: usize,
    pub star_interval_ms: u64,
    pub nebula_interval_ms: u64,
    pub reveal_interval_ms: u64,
    pub key_bindings: KeyBindings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub choose_first: String,
    pub choose_second: String,
    pub activate: String,
    pub next: String,
    pub prev: String,
    pub quit: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            choose_first: "1".into(),
            choose_second: "2".into(),
            activate: "Enter".into(),
            next: "Right".into(),
            prev: "Left".into(),
            quit: "q".into(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            music_path: "audiogame.mp3".into(),
            music_volume: 0.25,
            font_path: "game_font.json".into(),
            log_path: None,
            star_count: 150,
            nebula_count: 20,
            star_interval_ms: 50,
            nebula_interval_ms: 100,
            reveal_interval_ms: 30,
            key_bindings: KeyBindings::default(),
        }
    }
}

impl GameConfig {
    /// Load the user config. A missing file yields the defaults; a broken
    /// one is handed back so the caller can log it and fall back.
    pub fn load() -> Result<Self, ResourceError> {
        let path = Self::config_path();
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self, ResourceError> {
        let json = std::fs::read_to_string(path).map_err(|e| ResourceError::read(path, e))?;
        serde_json::from_str(&json).map_err(|e| ResourceError::parse(path, e))
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_path
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("critical.log"))
    }

    pub fn star_interval(&self) -> Duration {
        Duration::from_millis(self.star_interval_ms.max(1))
    }

    pub fn nebula_interval(&self) -> Duration {
        Duration::from_millis(self.nebula_interval_ms.max(1))
    }

    pub fn reveal_interval(&self) -> Duration {
        Duration::from_millis(self.reveal_interval_ms.max(1))
    }

    fn config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("critical");
        path.push("config.json");
        path
    }
}

/// Check whether a crossterm `KeyEvent` matches a binding string from config.
pub fn matches_binding(binding: &str, event: &KeyEvent) -> bool {
    if let Some(rest) = binding.strip_prefix("Alt-") {
        return event.modifiers.contains(KeyModifiers::ALT) && matches_key(rest, event.code);
    }

    if let Some(rest) = binding.strip_prefix("Ctrl-") {
        return event.modifiers.contains(KeyModifiers::CONTROL) && matches_key(rest, event.code);
    }

    // Plain bindings never fire while Ctrl or Alt is held.
    if event.modifiers.contains(KeyModifiers::CONTROL)
        || event.modifiers.contains(KeyModifiers::ALT)
    {
        return false;
    }

    matches_key(binding, event.code)
}

fn matches_key(name: &str, code: KeyCode) -> bool {
    match name {
        "Right" => code == KeyCode::Right,
        "Left" => code == KeyCode::Left,
        "Up" => code == KeyCode::Up,
        "Down" => code == KeyCode::Down,
        "Enter" => code == KeyCode::Enter,
        "Esc" => code == KeyCode::Esc,
        "Space" => code == KeyCode::Char(' '),
        "Tab" => code == KeyCode::Tab,
        s => {
            if let Some(rest) = s.strip_prefix('F') {
                if let Ok(n) = rest.parse::<u8>() {
                    return code == KeyCode::F(n);
                }
            }
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => code == KeyCode::Char(c),
                _ => false,
            }
        }
    }
}
