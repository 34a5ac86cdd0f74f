//! Missing and unusable image references are reported as warnings and
//! rendered as the placeholder, never as build errors.

use folio::assets::PLACEHOLDER;
use folio::generate::{self, GenerateReport};
use folio::output::format_generate_output;
use folio::scan;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs;
use std::sync::Mutex;
use tempfile::TempDir;

/// Keeps every warning for inspection.
struct CapturedWarnings {
    lines: Mutex<Vec<String>>,
}

impl Log for CapturedWarnings {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.lines.lock().unwrap().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static WARNINGS: CapturedWarnings = CapturedWarnings {
    lines: Mutex::new(Vec::new()),
};

fn install_logger() {
    // Several tests may race to install; the first wins and all share it.
    if log::set_logger(&WARNINGS).is_ok() {
        log::set_max_level(LevelFilter::Warn);
    }
}

fn warnings_mentioning(needle: &str) -> usize {
    WARNINGS
        .lines
        .lock()
        .unwrap()
        .iter()
        .filter(|l| l.contains(needle))
        .count()
}

const PORTFOLIO: &str = r#"
[profile]
name = "Ada Park"
role = "Systems Engineer"
tagline = "engineer."
avatar = "../outside.png"
about_image = "missing-about.jpg"
email = "ada@example.com"

[contact]
heading = "Contact"
blurb = "Hi."
"#;

fn build() -> (TempDir, GenerateReport) {
    let content = TempDir::new().unwrap();
    fs::write(content.path().join("portfolio.toml"), PORTFOLIO).unwrap();
    fs::write(content.path().join("outside.png"), b"not under assets").unwrap();

    let manifest = scan::scan(content.path()).unwrap();
    let manifest_path = content.path().join("manifest.json");
    fs::write(&manifest_path, serde_json::to_string(&manifest).unwrap()).unwrap();
    let report =
        generate::generate(&manifest_path, content.path(), &content.path().join("dist")).unwrap();
    (content, report)
}

#[test]
fn unusable_references_warn_and_fall_back() {
    install_logger();
    let (content, report) = build();

    assert!(warnings_mentioning("../outside.png") >= 1);
    assert!(warnings_mentioning("missing-about.jpg") >= 1);

    let page = fs::read_to_string(content.path().join("dist/index.html")).unwrap();
    assert!(!page.contains("outside.png"));
    assert!(page.contains(&format!(r#"src="{PLACEHOLDER}""#)));

    let mut fallbacks = report.fallbacks.clone();
    fallbacks.sort();
    assert_eq!(fallbacks, vec!["../outside.png", "missing-about.jpg"]);
}

#[test]
fn generate_output_lists_placeholder_uses() {
    let (_content, report) = build();
    let lines = format_generate_output(&report);
    assert!(
        lines.contains(&"Placeholder used for: ../outside.png, missing-about.jpg".to_string()),
        "{lines:?}"
    );
}
