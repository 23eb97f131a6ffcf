use crate::libflagfinder::db::Setting;
use clap::ValueEnum;
use log::{debug, warn};
use rusqlite::{Connection, Result};
use std::fmt;

pub const TIMER_ENABLED_KEY: &str = "quizTimerEnabled";
pub const TIMER_DURATION_KEY: &str = "quizTimerDuration";
pub const THEME_KEY: &str = "quizTheme";

pub const DEFAULT_TIMER_DURATION: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    fn parse(value: &str) -> Option<Theme> {
        match value {
            "system" => Some(Theme::System),
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::System => write!(f, "system"),
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

/// Preferences read once at startup. Absent or malformed stored values
/// fall back to the defaults, there is no error path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub timer_enabled: bool,
    pub timer_duration: u32,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timer_enabled: false,
            timer_duration: DEFAULT_TIMER_DURATION,
            theme: Theme::System,
        }
    }
}

impl Settings {
    pub fn load(conn: &Connection) -> Result<Settings> {
        let timer_enabled = Setting::get(conn, TIMER_ENABLED_KEY)?
            .map(|value| value == "true")
            .unwrap_or(false);
        let timer_duration = Setting::get(conn, TIMER_DURATION_KEY)?
            .and_then(|value| match value.parse::<u32>() {
                Ok(secs) => Some(secs),
                Err(_) => {
                    warn!("[Settings] Malformed '{}' value {:?}.", TIMER_DURATION_KEY, value);
                    None
                }
            })
            .unwrap_or(DEFAULT_TIMER_DURATION);
        let theme = Setting::get(conn, THEME_KEY)?
            .and_then(|value| Theme::parse(&value))
            .unwrap_or_default();

        let settings = Settings {
            timer_enabled,
            timer_duration,
            theme,
        };
        debug!("[Settings] Loaded {:?}", settings);
        Ok(settings)
    }

    pub fn store_timer_enabled(conn: &Connection, enabled: bool) -> Result<()> {
        Setting::set(conn, TIMER_ENABLED_KEY, if enabled { "true" } else { "false" })
    }

    pub fn store_timer_duration(conn: &Connection, duration_secs: u32) -> Result<()> {
        Setting::set(conn, TIMER_DURATION_KEY, &duration_secs.to_string())
    }

    pub fn store_theme(conn: &Connection, theme: Theme) -> Result<()> {
        Setting::set(conn, THEME_KEY, &theme.to_string())
    }

    pub fn reset(conn: &Connection) -> Result<()> {
        Setting::delete(conn, TIMER_ENABLED_KEY)?;
        Setting::delete(conn, TIMER_DURATION_KEY)?;
        Setting::delete(conn, THEME_KEY)
    }
}
