//! CLI output formatting for the build stages.
//!
//! Output is content-first: each section of the page is listed with what it
//! will show, and file paths appear only as indented context. Missing images
//! are called out next to the entity that uses them.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Profile
//!     Nicholas Hess, Web & App Developer
//!     Avatar: avatar.jpg (400×400)
//!     About image: about.jpg → placeholder
//!
//! Projects
//! 001 BlockTones [Next.js, Three.js, React, Zustand]
//!     Image: none → placeholder
//!
//! Moodboard
//! 001 workspace
//!     Source: moodboard/010-workspace.jpg
//!
//! Assets: 3 local, 0 remote, 2 missing
//! ```
//!
//! ## Generate
//!
//! ```text
//! Sections: cursor → nav → hero → about → projects → moodboard → contact → footer
//! index.html (48.2 KB)
//! placeholder.svg
//! assets/ (3 files)
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::assets::{AssetMap, PLACEHOLDER};
use crate::config::SiteConfig;
use crate::generate::{GenerateReport, SECTION_ORDER};
use crate::scan::{ABOUT_FILE, Manifest};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// How an image reference resolved, for a context line.
///
/// ```text
/// avatar.jpg (400×400)
/// about.jpg → placeholder
/// https://cdn.example.com/a.png (remote)
/// none → placeholder
/// ```
fn asset_status(assets: &AssetMap, reference: Option<&str>) -> String {
    let Some(reference) = reference else {
        return format!("none → {}", placeholder_name());
    };
    match assets.get(reference) {
        None => format!("{reference} (unresolved)"),
        Some(a) if a.fallback => format!("{reference} → {}", placeholder_name()),
        Some(a) if a.is_remote() => format!("{reference} (remote)"),
        Some(a) => match a.dimensions {
            Some((w, h)) => format!("{reference} ({w}×{h})"),
            None => reference.to_string(),
        },
    }
}

fn placeholder_name() -> &'static str {
    PLACEHOLDER.trim_end_matches(".svg")
}

fn format_bytes(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    }
}

// ============================================================================
// Scan
// ============================================================================

pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let portfolio = &manifest.portfolio;
    let profile = &portfolio.profile;
    let assets = &manifest.assets;

    lines.push("Profile".to_string());
    lines.push(format!("{}{}, {}", indent(1), profile.name, profile.role));
    lines.push(format!(
        "{}Avatar: {}",
        indent(1),
        asset_status(assets, profile.avatar.as_deref())
    ));
    lines.push(format!(
        "{}About image: {}",
        indent(1),
        asset_status(assets, profile.about_image.as_deref())
    ));
    if manifest.about_html.is_some() {
        lines.push(format!("{}About text: {ABOUT_FILE}", indent(1)));
    } else {
        lines.push(format!(
            "{}About text: {} paragraphs",
            indent(1),
            portfolio.about.paragraphs.len()
        ));
    }
    lines.push(format!("{}Skills: {}", indent(1), portfolio.about.skills.len()));

    lines.push(String::new());
    lines.push("Projects".to_string());
    if portfolio.projects.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, project) in portfolio.projects.iter().enumerate() {
        let tags = if project.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", project.tags.join(", "))
        };
        lines.push(format!("{} {}{}", format_index(i + 1), project.title, tags));
        lines.push(format!(
            "{}Image: {}",
            indent(1),
            asset_status(assets, project.image.as_deref())
        ));
        if let Some(link) = &project.link {
            lines.push(format!("{}Live: {link}", indent(1)));
        }
        if let Some(github) = &project.github {
            lines.push(format!("{}Code: {github}", indent(1)));
        }
    }

    lines.push(String::new());
    lines.push("Moodboard".to_string());
    if portfolio.moodboard.is_empty() {
        lines.push(format!("{}(empty)", indent(1)));
    }
    for (i, tile) in portfolio.moodboard.iter().enumerate() {
        let label = tile.alt.as_deref().unwrap_or(&tile.src);
        lines.push(format!("{} {}", format_index(i + 1), label));
        lines.push(format!(
            "{}Source: {}",
            indent(1),
            asset_status(assets, Some(tile.src.as_str()))
        ));
    }

    lines.push(String::new());
    let remote = assets.iter().filter(|a| a.is_remote()).count();
    let missing = assets.fallbacks().count();
    let local = assets.len() - remote - missing;
    lines.push(format!(
        "Assets: {local} local, {remote} remote, {missing} missing"
    ));

    lines.push(String::new());
    lines.push("Config".to_string());
    let config_path = source_root.join("config.toml");
    if config_path.exists() {
        lines.push(format!("{}config.toml", indent(1)));
    } else {
        lines.push(format!("{}(stock defaults)", indent(1)));
    }

    lines
}

pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let sections: Vec<&str> = SECTION_ORDER
        .iter()
        .copied()
        .filter(|s| report.cursor_enabled || *s != "cursor")
        .collect();

    let mut lines = vec![
        format!("Sections: {}", sections.join(" → ")),
        format!("index.html ({})", format_bytes(report.page_bytes)),
        PLACEHOLDER.to_string(),
    ];
    if report.assets_copied > 0 {
        let noun = if report.assets_copied == 1 { "file" } else { "files" };
        lines.push(format!("assets/ ({} {noun})", report.assets_copied));
    }
    if !report.fallbacks.is_empty() {
        lines.push(format!(
            "Placeholder used for: {}",
            report.fallbacks.join(", ")
        ));
    }
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Motion report
// ============================================================================

/// Settle tolerance as a fraction of the distance travelled.
const SETTLE_EPSILON: f64 = 0.01;
const SETTLE_HORIZON: f64 = 5.0;

/// What the configured reveal and cursor settings will feel like.
///
/// ```text
/// Motion
///     Reveal: at 10% visible, replays on re-entry, 100ms stagger
///     Cursor spring: stiffness 300, damping 20, mass 0.5
///         Damping ratio: 0.82 (underdamped)
///         Max overshoot: 1.2%
///         Settles within 1% in 310ms
///     Hover scale: 1.5×
/// ```
pub fn format_motion_report(config: &SiteConfig) -> Vec<String> {
    let reveal = &config.reveal;
    let cursor = &config.cursor;
    let mut lines = vec!["Motion".to_string()];

    let replay = if reveal.trigger_once {
        "reveals once"
    } else {
        "replays on re-entry"
    };
    lines.push(format!(
        "{}Reveal: at {:.0}% visible, {replay}, {:.0}ms stagger",
        indent(1),
        reveal.threshold * 100.0,
        reveal.stagger * 1000.0
    ));

    if !cursor.enabled {
        lines.push(format!("{}Cursor: disabled", indent(1)));
        return lines;
    }

    lines.push(format!(
        "{}Cursor spring: stiffness {}, damping {}, mass {}",
        indent(1),
        cursor.stiffness,
        cursor.damping,
        cursor.mass
    ));
    match cursor.spring() {
        Ok(params) => {
            let zeta = params.damping_ratio();
            let kind = if zeta < 1.0 {
                "underdamped"
            } else if zeta > 1.0 {
                "overdamped"
            } else {
                "critically damped"
            };
            lines.push(format!("{}Damping ratio: {zeta:.2} ({kind})", indent(2)));
            lines.push(format!(
                "{}Max overshoot: {:.1}%",
                indent(2),
                params.max_overshoot() * 100.0
            ));
            let settle = params.settle_time(SETTLE_EPSILON, SETTLE_HORIZON);
            if settle >= SETTLE_HORIZON {
                lines.push(format!(
                    "{}Does not settle within {SETTLE_HORIZON:.0}s",
                    indent(2)
                ));
            } else {
                lines.push(format!(
                    "{}Settles within {:.0}% in {:.0}ms",
                    indent(2),
                    SETTLE_EPSILON * 100.0,
                    settle * 1000.0
                ));
            }
        }
        Err(e) => lines.push(format!("{}Invalid: {e}", indent(2))),
    }
    lines.push(format!("{}Hover scale: {}×", indent(1), cursor.hover_scale));
    lines
}

pub fn print_motion_report(config: &SiteConfig) {
    for line in format_motion_report(config) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
