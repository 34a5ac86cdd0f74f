//! Shared test utilities.
//!
//! [`ContentFixture`] builds a throwaway content directory one file at a
//! time; the lookup helpers panic with a readable message on a miss.
//!
//! ```rust,ignore
//! let fixture = ContentFixture::sample().image("avatar.jpg", 4, 4);
//! let manifest = scan(fixture.root()).unwrap();
//! assert_eq!(find_project(&manifest, "BlockTones").id, 1);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::assets::{ASSETS_DIR, AssetMap};
use crate::config::ContactConfig;
use crate::scan::{Manifest, PORTFOLIO_FILE, sample_portfolio_toml};
use crate::sections::SectionContext;
use crate::types::{Portfolio, Project};

// =========================================================================
// Fixture setup
// =========================================================================

/// A content directory in a temp dir, removed on drop.
pub struct ContentFixture {
    dir: TempDir,
}

impl ContentFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Starts with the sample `portfolio.toml` and no images.
    pub fn sample() -> Self {
        Self::new().portfolio(sample_portfolio_toml())
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn portfolio(self, toml: &str) -> Self {
        self.file(PORTFOLIO_FILE, toml)
    }

    /// Write `contents` at `rel`, creating parent directories.
    pub fn file(self, rel: &str, contents: &str) -> Self {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
        self
    }

    /// A solid-colour PNG at `assets/<rel>`. The extension is ignored; the
    /// bytes are always PNG, which the dimension probe sniffs correctly.
    pub fn image(self, rel: &str, width: u32, height: u32) -> Self {
        let path = self.dir.path().join(ASSETS_DIR).join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([90, 140, 220]));
        img.save_with_format(&path, image::ImageFormat::Png).unwrap();
        self
    }
}

/// Owned content for rendering sections without touching the filesystem.
pub struct SampleContent {
    pub portfolio: Portfolio,
    pub assets: AssetMap,
    pub about_html: Option<String>,
    pub contact: ContactConfig,
}

impl SampleContent {
    /// The sample portfolio, no assets resolved.
    pub fn new() -> Self {
        Self {
            portfolio: toml::from_str(sample_portfolio_toml()).unwrap(),
            assets: AssetMap::default(),
            about_html: None,
            contact: ContactConfig::default(),
        }
    }

    pub fn ctx(&self) -> SectionContext<'_> {
        SectionContext {
            portfolio: &self.portfolio,
            assets: &self.assets,
            about_html: self.about_html.as_deref(),
            contact: &self.contact,
            stagger: 0.1,
            year: 2026,
        }
    }
}

// =========================================================================
// Manifest lookups
// =========================================================================

pub fn find_project<'a>(manifest: &'a Manifest, title: &str) -> &'a Project {
    manifest
        .portfolio
        .projects
        .iter()
        .find(|p| p.title == title)
        .unwrap_or_else(|| {
            let titles: Vec<&str> = manifest
                .portfolio
                .projects
                .iter()
                .map(|p| p.title.as_str())
                .collect();
            panic!("project '{title}' not found. Available: {titles:?}")
        })
}

// =========================================================================
// HTML assertions
// =========================================================================

/// Byte offset of `needle` in `html`. Panics if absent.
pub fn position_of(html: &str, needle: &str) -> usize {
    html.find(needle)
        .unwrap_or_else(|| panic!("'{needle}' not found in rendered HTML"))
}

/// Assert the needles appear in `html` in the given order.
pub fn assert_in_order(html: &str, needles: &[&str]) {
    let positions: Vec<usize> = needles.iter().map(|n| position_of(html, n)).collect();
    for (pair, names) in positions.windows(2).zip(needles.windows(2)) {
        assert!(
            pair[0] < pair[1],
            "expected '{}' before '{}'",
            names[0],
            names[1]
        );
    }
}
