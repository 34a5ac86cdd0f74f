//! Image asset resolution.
//!
//! Content refers to images by name (`avatar.jpg`, resolved under
//! `content/assets/`) or by URL. Resolution happens once at scan time, in
//! parallel:
//!
//! - **Local, present**: the URL gains a `?v=<hash>` cache-buster from the
//!   file's SHA-256, and pixel dimensions are read from the header when the
//!   format is one we can decode.
//! - **Local, missing**: the built-in placeholder is substituted and a warning
//!   is logged. A missing picture never fails the build.
//! - **Remote** (`http(s)://`, `//`, `data:`): passed through untouched.
//!
//! Images are never resized or re-encoded.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

/// Output path of the built-in placeholder image.
pub const PLACEHOLDER: &str = "placeholder.svg";

/// Directory under the content root (and the output root) holding images.
pub const ASSETS_DIR: &str = "assets";

/// Hex digits of the content hash kept in URLs.
const HASH_LEN: usize = 8;

/// Bytes escaped inside one URL path segment. Non-ASCII is always escaped.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Where a reference points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    /// Path relative to the assets directory.
    Local(PathBuf),
    Remote(String),
    /// Escapes the assets directory or is empty; treated as missing.
    Invalid,
}

pub fn classify(reference: &str) -> AssetSource {
    let r = reference.trim();
    if ["http://", "https://", "//", "data:"]
        .iter()
        .any(|p| r.starts_with(p))
    {
        return AssetSource::Remote(r.to_string());
    }
    let rel = r.trim_start_matches('/');
    let rel = rel.strip_prefix("assets/").unwrap_or(rel);
    let path = PathBuf::from(rel);
    let clean = !rel.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
    if clean {
        AssetSource::Local(path)
    } else {
        AssetSource::Invalid
    }
}

/// A reference after resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAsset {
    /// As written in the content.
    pub reference: String,
    /// What the page links to.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<(u32, u32)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// The placeholder stands in for a missing local file.
    #[serde(default)]
    pub fallback: bool,
}

impl ResolvedAsset {
    fn placeholder(reference: &str) -> Self {
        Self {
            reference: reference.to_string(),
            url: PLACEHOLDER.to_string(),
            dimensions: None,
            hash: None,
            fallback: true,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(classify(&self.reference), AssetSource::Remote(_))
    }
}

/// Resolved assets keyed by reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetMap(BTreeMap<String, ResolvedAsset>);

impl AssetMap {
    pub fn get(&self, reference: &str) -> Option<&ResolvedAsset> {
        self.0.get(reference)
    }

    /// URL for `reference`; the placeholder for anything unknown or absent.
    pub fn url(&self, reference: Option<&str>) -> &str {
        reference
            .and_then(|r| self.0.get(r))
            .map(|a| a.url.as_str())
            .unwrap_or(PLACEHOLDER)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedAsset> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fallbacks(&self) -> impl Iterator<Item = &ResolvedAsset> {
        self.0.values().filter(|a| a.fallback)
    }
}

impl FromIterator<ResolvedAsset> for AssetMap {
    fn from_iter<I: IntoIterator<Item = ResolvedAsset>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|a| (a.reference.clone(), a))
                .collect(),
        )
    }
}

/// SHA-256 of `bytes`, truncated for use in URLs.
pub fn short_hash(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut hex = format!("{:x}", digest);
    hex.truncate(HASH_LEN);
    hex
}

/// Pixel size from the file header. The format is sniffed from the bytes,
/// so a mislabelled extension still probes.
fn probe_dimensions(path: &Path) -> Option<(u32, u32)> {
    image::ImageReader::open(path)
        .ok()?
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

/// Resolve one reference against `assets_dir`.
pub fn resolve(assets_dir: &Path, reference: &str) -> ResolvedAsset {
    let rel = match classify(reference) {
        AssetSource::Remote(url) => {
            return ResolvedAsset {
                reference: reference.to_string(),
                url,
                dimensions: None,
                hash: None,
                fallback: false,
            };
        }
        AssetSource::Invalid => {
            log::warn!(
                "asset reference '{reference}' is not under {ASSETS_DIR}/, using placeholder"
            );
            return ResolvedAsset::placeholder(reference);
        }
        AssetSource::Local(rel) => rel,
    };

    let path = assets_dir.join(&rel);
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("asset {} unavailable ({e}), using placeholder", path.display());
            return ResolvedAsset::placeholder(reference);
        }
    };
    let hash = short_hash(&bytes);
    let dimensions = probe_dimensions(&path);
    if dimensions.is_none() {
        log::debug!("no decodable dimensions for {}", path.display());
    }
    let rel_url = rel
        .components()
        .map(|c| {
            let segment = c.as_os_str().to_string_lossy();
            utf8_percent_encode(&segment, PATH_SEGMENT).to_string()
        })
        .collect::<Vec<_>>()
        .join("/");

    ResolvedAsset {
        reference: reference.to_string(),
        url: format!("{ASSETS_DIR}/{rel_url}?v={hash}"),
        dimensions,
        hash: Some(hash),
        fallback: false,
    }
}

/// Resolve every reference in parallel. Duplicates are resolved once.
pub fn resolve_all<'a>(
    assets_dir: &Path,
    references: impl IntoIterator<Item = &'a str>,
) -> AssetMap {
    let mut unique: Vec<&str> = references.into_iter().collect();
    unique.sort_unstable();
    unique.dedup();
    unique
        .par_iter()
        .map(|r| resolve(assets_dir, r))
        .collect::<Vec<_>>()
        .into_iter()
        .collect()
}
