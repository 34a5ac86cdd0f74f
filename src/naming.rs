//! The `NNN-name` ordering convention for dropped-in files.
//!
//! Files in `content/assets/moodboard/` are ordered by a numeric prefix:
//! `010-studio-desk.jpg` comes before `020-sketchbook.png`. Files without a
//! prefix are treated as drafts and left out of the page. Dashes in the name
//! part become spaces to form the alt text.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file name split into its ordering prefix and readable label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedName {
    pub number: Option<u32>,
    /// Everything after `NNN-`, without extension, dashes kept.
    pub slug: String,
}

impl NumberedName {
    /// `studio-desk` → `studio desk`.
    pub fn label(&self) -> String {
        self.slug.replace('-', " ").trim().to_string()
    }
}

/// Split `stem` (no extension) on the convention.
///
/// `"010-studio-desk"` → `(Some(10), "studio-desk")`; `"007"` → `(Some(7), "")`;
/// `"draft-idea"` → `(None, "draft-idea")`.
pub fn parse_numbered(stem: &str) -> NumberedName {
    let (head, tail) = match stem.split_once('-') {
        Some((head, tail)) => (head, tail),
        None => (stem, ""),
    };
    let all_digits = !head.is_empty() && head.bytes().all(|b| b.is_ascii_digit());
    match head.parse::<u32>() {
        Ok(n) if all_digits => NumberedName {
            number: Some(n),
            slug: tail.to_string(),
        },
        _ => NumberedName {
            number: None,
            slug: stem.to_string(),
        },
    }
}

/// One ordered file found in a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedFile {
    pub number: u32,
    pub path: PathBuf,
    pub label: String,
}

/// Image-like extensions picked up from convention directories.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "avif", "svg"];

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.iter().any(|x| x.eq_ignore_ascii_case(e)))
}

/// Numbered image files directly inside `dir`, in prefix order (ties broken
/// by file name). Unnumbered files are skipped with a debug log. A missing
/// directory yields nothing.
pub fn ordered_images(dir: &Path) -> Result<Vec<OrderedFile>, walkdir::Error> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || !has_image_extension(path) {
            continue;
        }
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        let parsed = parse_numbered(stem);
        match parsed.number {
            Some(number) => files.push(OrderedFile {
                number,
                label: parsed.label(),
                path: path.to_path_buf(),
            }),
            None => log::debug!("skipping unnumbered {}", path.display()),
        }
    }
    files.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.path.cmp(&b.path)));
    Ok(files)
}
