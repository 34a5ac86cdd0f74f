//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; a `config.toml` in the content root overrides any subset of
//! them. Unknown keys are rejected to catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [colors.light]
//! background = "#ffffff"
//! surface = "#f1f5f9"       # Muted bands (moodboard, contact) and tag pills
//! text = "#0f172a"
//! text_muted = "#64748b"
//! border = "#bfdbfe"
//! accent = "#2563eb"
//! accent_hover = "#1d4ed8"
//!
//! [colors.dark]
//! background = "#030712"
//! surface = "#111827"
//! text = "#f9fafb"
//! text_muted = "#9ca3af"
//! border = "#1e3a8a"
//! accent = "#60a5fa"
//! accent_hover = "#93c5fd"
//!
//! [reveal]
//! threshold = 0.1           # Fraction of a section visible before it reveals
//! trigger_once = false      # true = reveal once, never hide again
//! stagger = 0.1             # Seconds between siblings in a cascade
//!
//! [cursor]
//! enabled = true
//! radius = 12.0             # Half the ring size, px
//! stiffness = 300.0
//! damping = 20.0
//! mass = 0.5
//! hover_scale = 1.5         # Ring scale over links and buttons
//!
//! [theme]
//! default = "system"        # system | light | dark
//! storage_key = "theme"     # localStorage key for the visitor's choice
//!
//! [contact]
//! # endpoint = "https://formspree.io/f/xxxx"  # POST target; mailto: when unset
//!
//! [processing]
//! max_processes = 4         # Asset probing workers (omit for auto = CPU cores)
//! ```

use crate::spring::{SpringError, SpringParams};
use crate::theme::ThemePreference;
use crate::visibility::{Threshold, VisibilityError, VisibilityOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

impl From<SpringError> for ConfigError {
    fn from(e: SpringError) -> Self {
        ConfigError::Validation(format!("cursor: {e}"))
    }
}

impl From<VisibilityError> for ConfigError {
    fn from(e: VisibilityError) -> Self {
        ConfigError::Validation(format!("reveal: {e}"))
    }
}

/// Everything `config.toml` can set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Scroll reveal behaviour.
    pub reveal: RevealConfig,
    /// Cursor follower physics.
    pub cursor: CursorConfig,
    /// Theme toggle defaults and persistence.
    pub theme: ThemeConfig,
    /// Contact form submission.
    pub contact: ContactConfig,
    /// Parallel asset probing.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Threshold::new(self.reveal.threshold)?;
        if !(self.reveal.stagger.is_finite() && self.reveal.stagger >= 0.0) {
            return Err(ConfigError::Validation(
                "reveal.stagger must be a non-negative number of seconds".into(),
            ));
        }
        self.cursor.spring()?;
        if !(self.cursor.radius.is_finite() && self.cursor.radius >= 0.0) {
            return Err(ConfigError::Validation(
                "cursor.radius must be non-negative".into(),
            ));
        }
        if !(self.cursor.hover_scale.is_finite() && self.cursor.hover_scale > 0.0) {
            return Err(ConfigError::Validation(
                "cursor.hover_scale must be positive".into(),
            ));
        }
        if self.theme.storage_key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "theme.storage_key must not be empty".into(),
            ));
        }
        if let Some(endpoint) = &self.contact.endpoint {
            let routable = endpoint.starts_with("https://")
                || endpoint.starts_with("http://")
                || endpoint.starts_with('/');
            if !routable {
                return Err(ConfigError::Validation(format!(
                    "contact.endpoint must be an http(s) URL or absolute path, got '{endpoint}'"
                )));
            }
        }
        Ok(())
    }
}

/// Scroll reveal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// Fraction of a section that must be on screen, in (0, 1].
    pub threshold: f64,
    /// Reveal once and stay revealed.
    pub trigger_once: bool,
    /// Seconds between consecutive siblings of a cascade.
    pub stagger: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            trigger_once: false,
            stagger: 0.1,
        }
    }
}

impl RevealConfig {
    pub fn visibility(&self) -> Result<VisibilityOptions, VisibilityError> {
        Ok(VisibilityOptions {
            threshold: Threshold::new(self.threshold)?,
            trigger_once: self.trigger_once,
        })
    }
}

/// Cursor follower settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CursorConfig {
    /// Render the follower at all.
    pub enabled: bool,
    /// Offset from the pointer to the ring's top-left corner, px.
    pub radius: f64,
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Scale applied while over a link or button.
    pub hover_scale: f64,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 12.0,
            stiffness: 300.0,
            damping: 20.0,
            mass: 0.5,
            hover_scale: 1.5,
        }
    }
}

impl CursorConfig {
    pub fn spring(&self) -> Result<SpringParams, SpringError> {
        SpringParams::new(self.stiffness, self.damping, self.mass)
    }
}

/// Theme toggle settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Theme shown before the visitor picks one.
    pub default: ThemePreference,
    /// `localStorage` key holding the visitor's choice.
    pub storage_key: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default: ThemePreference::System,
            storage_key: "theme".to_string(),
        }
    }
}

/// Contact form settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Where the form POSTs. Without one, the form submits to the profile's
    /// `mailto:` address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// Worker pool for asset probing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of asset probing workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    /// Muted bands and tag pills.
    pub surface: String,
    pub text: String,
    pub text_muted: String,
    pub border: String,
    /// Logo, buttons, cursor ring.
    pub accent: String,
    pub accent_hover: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            surface: "#f1f5f9".to_string(),
            text: "#0f172a".to_string(),
            text_muted: "#64748b".to_string(),
            border: "#bfdbfe".to_string(),
            accent: "#2563eb".to_string(),
            accent_hover: "#1d4ed8".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#030712".to_string(),
            surface: "#111827".to_string(),
            text: "#f9fafb".to_string(),
            text_muted: "#9ca3af".to_string(),
            border: "#1e3a8a".to_string(),
            accent: "#60a5fa".to_string(),
            accent_hover: "#93c5fd".to_string(),
        }
    }

    fn css_vars(&self, indent: &str) -> String {
        [
            ("bg", &self.background),
            ("surface", &self.surface),
            ("text", &self.text),
            ("text-muted", &self.text_muted),
            ("border", &self.border),
            ("accent", &self.accent),
            ("accent-hover", &self.accent_hover),
        ]
        .iter()
        .map(|(name, value)| format!("{indent}--color-{name}: {value};"))
        .collect::<Vec<_>>()
        .join("\n")
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// [`SiteConfig::default`] as a TOML table, the bottom layer of every load.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Layer `overlay` over `base`. Tables merge per key and recurse; any other
/// overlay value replaces the base value. Base-only keys survive.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if there is no `config.toml`.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Apply the user layer if there is one, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, layered over the
/// stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    match &overlay {
        Some(_) => log::debug!(
            "layering {} over stock defaults",
            root.join("config.toml").display()
        ),
        None => log::debug!(
            "no config.toml in {}, using stock defaults",
            root.display()
        ),
    }
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`. Used by `folio gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# folio configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Colors - light mode
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
surface = "#f1f5f9"       # Muted bands (moodboard, contact) and tag pills
text = "#0f172a"
text_muted = "#64748b"
border = "#bfdbfe"
accent = "#2563eb"        # Logo, buttons, cursor ring
accent_hover = "#1d4ed8"

# ---------------------------------------------------------------------------
# Colors - dark mode
# ---------------------------------------------------------------------------
[colors.dark]
background = "#030712"
surface = "#111827"
text = "#f9fafb"
text_muted = "#9ca3af"
border = "#1e3a8a"
accent = "#60a5fa"
accent_hover = "#93c5fd"

# ---------------------------------------------------------------------------
# Scroll reveal
# ---------------------------------------------------------------------------
[reveal]
# Fraction of a section that must be on screen before it animates in, (0, 1].
threshold = 0.1

# false: sections hide again when scrolled away and replay on return.
# true: each section reveals once and stays.
trigger_once = false

# Seconds between siblings in a cascade (skill tags, mood tiles).
# Project cards use twice this.
stagger = 0.1

# ---------------------------------------------------------------------------
# Cursor follower
# ---------------------------------------------------------------------------
[cursor]
enabled = true
radius = 12.0             # Ring is 2 * radius px across
stiffness = 300.0
damping = 20.0
mass = 0.5
hover_scale = 1.5         # Ring scale over links and buttons

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
[theme]
# Theme before the visitor chooses: "system", "light" or "dark".
default = "system"
# localStorage key holding the visitor's choice.
storage_key = "theme"

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[contact]
# URL the form POSTs to. When unset the form opens a mail to profile.email.
# endpoint = "https://example.com/contact"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel asset-probing workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// CSS custom properties for both color schemes.
///
/// Light values sit on `:root`. Dark values apply when the page carries
/// `data-theme="dark"`, or when no theme was chosen and the OS prefers dark.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        ":root {{\n{light}\n}}\n\n\
         @media (prefers-color-scheme: dark) {{\n    :root:not([data-theme=\"light\"]) {{\n{dark_nested}\n    }}\n}}\n\n\
         :root[data-theme=\"dark\"] {{\n{dark}\n}}",
        light = colors.light.css_vars("    "),
        dark_nested = colors.dark.css_vars("        "),
        dark = colors.dark.css_vars("    "),
    )
}
