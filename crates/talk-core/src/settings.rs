//! Global settings loaded from TOML, following the same OnceLock pattern as the
//! phonotactics tables.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();
static INSTANCE: OnceLock<Settings> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    if INSTANCE.get().is_some() {
        return Err(SettingsError::AlreadyInitialized);
    }
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub simplify: SimplifySettings,
}

/// Per-axis weights for simplified spellings.
#[derive(Debug, Clone, Deserialize)]
pub struct SimplifySettings {
    pub precision: u32,
    pub vowel_none: u32,
    pub vowel_one: u32,
    pub vowel_basic: u32,
    pub vowel_all: u32,
    pub consonant_simplified: u32,
    pub consonant_all: u32,
    pub tone_no: u32,
    pub tone_yes: u32,
    pub duration_no: u32,
    pub duration_yes: u32,
    pub aspiration_no: u32,
    pub aspiration_yes: u32,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive!(simplify.vowel_none);
    check_positive!(simplify.vowel_one);
    check_positive!(simplify.vowel_basic);
    check_positive!(simplify.vowel_all);
    check_positive!(simplify.consonant_simplified);
    check_positive!(simplify.consonant_all);
    check_positive!(simplify.tone_no);
    check_positive!(simplify.tone_yes);
    check_positive!(simplify.duration_no);
    check_positive!(simplify.duration_yes);
    check_positive!(simplify.aspiration_no);
    check_positive!(simplify.aspiration_yes);

    if s.simplify.precision > 12 {
        return Err(SettingsError::InvalidValue {
            field: "simplify.precision".to_string(),
            reason: "must be at most 12".to_string(),
        });
    }

    Ok(())
}
