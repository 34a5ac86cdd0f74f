//! Content scanning and manifest generation.
//!
//! Stage 1 of the build. Reads the content directory, validates it, resolves
//! every image reference and produces a [`Manifest`] that the generate stage
//! consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml            # Site configuration (optional)
//! ├── portfolio.toml         # Profile, projects, hero facts, skills (required)
//! ├── about.md               # About text as markdown (optional, replaces paragraphs)
//! └── assets/                # Images referenced by portfolio.toml, copied to dist/assets/
//!     ├── avatar.jpg
//!     └── moodboard/         # Optional: replaces [[moodboard]] entries
//!         ├── 010-studio-desk.jpg
//!         └── 020-sketchbook.png
//! ```
//!
//! ## Validation
//!
//! - `profile.name` must not be blank
//! - project ids must be unique and titles non-blank
//!
//! Missing image files are not errors: they resolve to the placeholder and
//! are reported as warnings.

use crate::assets::{self, ASSETS_DIR, AssetMap};
use crate::config::{self, SiteConfig};
use crate::naming;
use crate::types::{MoodImage, Portfolio};
use pulldown_cmark::{Options, Parser, html as md_html};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const PORTFOLIO_FILE: &str = "portfolio.toml";
pub const ABOUT_FILE: &str = "about.md";
/// Under the assets directory.
pub const MOODBOARD_DIR: &str = "moodboard";

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error reading {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("no {PORTFOLIO_FILE} in {0} (run 'folio gen-content' for a starting point)")]
    MissingPortfolio(PathBuf),
    #[error("invalid {PORTFOLIO_FILE}: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("{0} must not be blank")]
    Blank(String),
    #[error("duplicate project id {0}")]
    DuplicateProjectId(u32),
}

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Manifest output from the scan stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub config: SiteConfig,
    /// With the effective moodboard (directory listing wins over inline).
    pub portfolio: Portfolio,
    /// Rendered `about.md`, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_html: Option<String>,
    pub assets: AssetMap,
}

impl Manifest {
    /// Every asset reference the page will render, in page order.
    pub fn references(&self) -> Vec<&str> {
        image_references(&self.portfolio)
    }
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;
    let mut portfolio = load_portfolio(root)?;
    let about_html = load_about(root)?;

    let assets_dir = root.join(ASSETS_DIR);
    let discovered = discover_moodboard(&assets_dir.join(MOODBOARD_DIR))?;
    if !discovered.is_empty() {
        log::debug!(
            "moodboard: {} files from {}/{MOODBOARD_DIR}, ignoring inline entries",
            discovered.len(),
            ASSETS_DIR
        );
        portfolio.moodboard = discovered;
    }

    let threads = config::effective_threads(&config.processing);
    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    let assets = pool.install(|| assets::resolve_all(&assets_dir, image_references(&portfolio)));
    for missing in assets.fallbacks() {
        log::warn!("image '{}' not found, using placeholder", missing.reference);
    }

    Ok(Manifest {
        config,
        portfolio,
        about_html,
        assets,
    })
}

/// Read and validate `portfolio.toml`.
pub fn load_portfolio(root: &Path) -> Result<Portfolio, ContentError> {
    let path = root.join(PORTFOLIO_FILE);
    if !path.exists() {
        return Err(ContentError::MissingPortfolio(root.to_path_buf()));
    }
    let content = fs::read_to_string(&path).map_err(|e| ContentError::Io(path.clone(), e))?;
    let portfolio: Portfolio = toml::from_str(&content)?;
    validate_portfolio(&portfolio)?;
    Ok(portfolio)
}

pub fn validate_portfolio(portfolio: &Portfolio) -> Result<(), ContentError> {
    if portfolio.profile.name.trim().is_empty() {
        return Err(ContentError::Blank("profile.name".into()));
    }
    let mut seen = HashSet::new();
    for project in &portfolio.projects {
        if !seen.insert(project.id) {
            return Err(ContentError::DuplicateProjectId(project.id));
        }
        if project.title.trim().is_empty() {
            return Err(ContentError::Blank(format!("title of project {}", project.id)));
        }
    }
    Ok(())
}

/// Render `about.md` to HTML if it exists.
fn load_about(root: &Path) -> Result<Option<String>, ContentError> {
    let path = root.join(ABOUT_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    let markdown = fs::read_to_string(&path).map_err(|e| ContentError::Io(path.clone(), e))?;
    Ok(Some(render_markdown(&markdown)))
}

pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH);
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html
}

fn discover_moodboard(dir: &Path) -> Result<Vec<MoodImage>, walkdir::Error> {
    Ok(naming::ordered_images(dir)?
        .into_iter()
        .filter_map(|file| {
            let name = file.path.file_name()?.to_str()?;
            Some(MoodImage {
                src: format!("{MOODBOARD_DIR}/{name}"),
                alt: (!file.label.is_empty()).then_some(file.label),
            })
        })
        .collect())
}

fn image_references(portfolio: &Portfolio) -> Vec<&str> {
    let profile = &portfolio.profile;
    profile
        .avatar
        .iter()
        .chain(profile.about_image.iter())
        .chain(portfolio.projects.iter().filter_map(|p| p.image.as_ref()))
        .chain(portfolio.moodboard.iter().map(|m| &m.src))
        .map(String::as_str)
        .collect()
}

/// A complete `portfolio.toml` to start from.
pub fn sample_portfolio_toml() -> &'static str {
    r##"# Portfolio content. Images are looked up under assets/ next to this file;
# anything missing is replaced by a placeholder.

[profile]
name = "Nicholas Hess"
initials = "NH"
role = "Web & App Developer"
location = "Virginia-based"
tagline = "web & app developer passionate about building interactive and creative digital experiences."
avatar = "avatar.jpg"
about_image = "about.jpg"
email = "hello@example.com"
github = "https://github.com/hessnt30"

[[hero.facts]]
label = "Specializing in"
value = "Full-Stack Web & Mobile Apps"

[[hero.facts]]
label = "Experience"
value = "1 Year"

[[hero.facts]]
label = "Available for"
value = "Collaborative Projects"

[about]
heading = "About Me"
# An about.md file replaces these paragraphs.
paragraphs = [
    "I'm a web & app developer passionate about crafting interactive, creative, and functional digital experiences.",
    "With expertise in front-end development, interactive design, and creative problem-solving, I build websites and applications that are not only functional but also intuitive and visually engaging.",
    "My approach blends technical precision with a passion for seamless user experiences, resulting in digital creations that are both efficient and impactful.",
]
skills = [
    "React", "Next.js", "Tailwind CSS", "TypeScript", "Docker",
    "MongoDB", "Three.js", "Framer Motion", "UI/UX Design",
]

[[projects]]
id = 1
title = "BlockTones"
description = "A web app that lets users create, share, and visualize custom Minecraft block palettes in real-time with a dynamic 3D rendering of a Minecraft house."
tags = ["Next.js", "Three.js", "React", "Zustand"]
link = "https://block-tones.netlify.app/"
github = "https://github.com/hessnt30/block-tones"

[[projects]]
id = 2
title = "CrisisBrief"
description = "An LLM-powered web app to automate the extraction and summarization of crisis event details from multiple webpages into a standardized template."
tags = ["Next.js", "MongoDB", "Flask", "Docker"]

[[projects]]
id = 3
title = "Interactive Data Visualization"
description = "A dynamic visualization of complex datasets using D3.js"
tags = ["D3.js", "SVG", "Data Visualization"]

# Files in assets/moodboard/ named NNN-name.ext replace these entries.
[[moodboard]]
src = "moodboard/010-workspace.jpg"
alt = "workspace"

[[moodboard]]
src = "moodboard/020-sketches.jpg"
alt = "sketches"

[[moodboard]]
src = "moodboard/030-palette.jpg"
alt = "palette"

[contact]
heading = "Get in Touch"
blurb = "Interested in working together? Feel free to reach out for collaborations or just a friendly hello."

[[footer.links]]
label = "Privacy"
href = "#"

[[footer.links]]
label = "Terms"
href = "#"
"##
}
