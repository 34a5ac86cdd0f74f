//! HTML generation.
//!
//! Stage 2 of the build. Takes the scan manifest and writes the finished site.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html          # The whole page: inline CSS, runtime config, runtime JS
//! ├── placeholder.svg     # Stands in for missing or broken images
//! └── assets/             # content/assets/ copied verbatim
//! ```
//!
//! ## Page Composition
//!
//! Sections render in a fixed order: cursor ring, navigation, hero, about,
//! projects, moodboard, contact, footer. None of them share state.
//!
//! ## CSS and JavaScript
//!
//! Embedded at compile time and inlined into the page:
//! - `static/style.css`: layout and components (colors come from config)
//! - `static/theme-init.js`: applies the stored theme before first paint
//! - `static/runtime.js`: scroll reveal, cursor springs, theme toggle and
//!   image fallback
//!
//! The runtime reads its parameters from a `<script type="application/json"
//! id="folio-runtime">` block, so nothing in the scripts is templated.

use crate::assets::{ASSETS_DIR, PLACEHOLDER};
use crate::config::{self, SiteConfig};
use crate::scan::Manifest;
use crate::sections::{self, SectionContext};
use crate::theme::ThemePreference;
use chrono::Datelike;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const THEME_INIT_JS: &str = include_str!("../static/theme-init.js");
const RUNTIME_JS: &str = include_str!("../static/runtime.js");

/// Built-in stand-in image, 4:3 with a muted frame glyph.
pub const PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="600" viewBox="0 0 800 600"><rect width="800" height="600" fill="#e2e8f0"/><g fill="none" stroke="#94a3b8" stroke-width="12" stroke-linejoin="round"><rect x="300" y="220" width="200" height="160" rx="12"/><path d="m310 370 60-70 45 45 30-30 45 55"/></g><circle cx="445" cy="265" r="14" fill="#94a3b8"/></svg>
"##;

/// Section names in render order.
pub const SECTION_ORDER: &[&str] = &[
    "cursor",
    "nav",
    "hero",
    "about",
    "projects",
    "moodboard",
    "contact",
    "footer",
];

/// What the generate stage produced.
#[derive(Debug)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    pub page_bytes: usize,
    pub assets_copied: usize,
    /// References rendered as the placeholder.
    pub fallbacks: Vec<String>,
    pub cursor_enabled: bool,
}

/// Parameters handed to the browser runtime.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig<'a> {
    pub threshold: f64,
    pub trigger_once: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<CursorRuntime>,
    pub theme_key: &'a str,
    pub theme_default: ThemePreference,
    pub placeholder: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorRuntime {
    pub radius: f64,
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    pub hover_scale: f64,
}

impl<'a> RuntimeConfig<'a> {
    pub fn from_config(config: &'a SiteConfig) -> Self {
        let c = &config.cursor;
        Self {
            threshold: config.reveal.threshold,
            trigger_once: config.reveal.trigger_once,
            cursor: c.enabled.then_some(CursorRuntime {
                radius: c.radius,
                stiffness: c.stiffness,
                damping: c.damping,
                mass: c.mass,
                hover_scale: c.hover_scale,
            }),
            theme_key: &config.theme.storage_key,
            theme_default: config.theme.default,
            placeholder: PLACEHOLDER,
        }
    }

    /// JSON safe to place inside a `<script>` element.
    pub fn to_script_json(&self) -> Result<String, serde_json::Error> {
        Ok(serde_json::to_string(self)?.replace("</", "<\\/"))
    }
}

pub fn generate(
    manifest_path: &Path,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;

    fs::create_dir_all(output_dir)?;

    let page = render_page(&manifest, current_year())?.into_string();
    fs::write(output_dir.join("index.html"), &page)?;
    log::debug!("wrote {} ({} bytes)", output_dir.join("index.html").display(), page.len());

    fs::write(output_dir.join(PLACEHOLDER), PLACEHOLDER_SVG)?;

    let assets_copied = copy_assets(&source_dir.join(ASSETS_DIR), &output_dir.join(ASSETS_DIR))?;

    Ok(GenerateReport {
        output_dir: output_dir.to_path_buf(),
        page_bytes: page.len(),
        assets_copied,
        fallbacks: manifest
            .assets
            .fallbacks()
            .map(|a| a.reference.clone())
            .collect(),
        cursor_enabled: manifest.config.cursor.enabled,
    })
}

/// Copy every file under `src` to `dst`, keeping relative paths. A missing
/// `src` copies nothing.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// Page composition
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, description: &str, head: Markup, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(description);
                meta name="color-scheme" content="light dark";
                title { (title) }
                (head)
            }
            body {
                (content)
            }
        }
    }
}

/// The whole single-page site.
pub fn render_page(manifest: &Manifest, year: i32) -> Result<Markup, GenerateError> {
    let config = &manifest.config;
    let profile = &manifest.portfolio.profile;
    let ctx = SectionContext {
        portfolio: &manifest.portfolio,
        assets: &manifest.assets,
        about_html: manifest.about_html.as_deref(),
        contact: &config.contact,
        stagger: config.reveal.stagger,
        year,
    };

    let css = format!("{}\n\n{}", config::generate_color_css(&config.colors), CSS_STATIC);
    let runtime = RuntimeConfig::from_config(config).to_script_json()?;

    let head = html! {
        style { (PreEscaped(css)) }
        script #folio-runtime type="application/json" { (PreEscaped(runtime)) }
        script { (PreEscaped(THEME_INIT_JS)) }
    };

    let content = html! {
        @if config.cursor.enabled {
            (sections::cursor::render(config.cursor.radius))
        }
        (sections::nav::render(&ctx))
        main {
            (sections::hero::render(&ctx))
            (sections::about::render(&ctx))
            (sections::projects::render(&ctx))
            (sections::moodboard::render(&ctx))
            (sections::contact::render(&ctx))
        }
        (sections::footer::render(&ctx))
        script { (PreEscaped(RUNTIME_JS)) }
    };

    let title = format!("{} | {}", profile.name, profile.role);
    Ok(base_document(&title, &profile.tagline, head, content))
}

// ============================================================================
// Dates
// ============================================================================

/// Calendar year in the local time zone, for the copyright line.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

// ============================================================================
// Tests
// ============================================================================
