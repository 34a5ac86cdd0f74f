//! Page sections.
//!
//! Each section is a pure function from content to [`Markup`]. The only logic
//! in here is layout: stagger delays from an element's index and the
//! alternating project layout.
//!
//! Three attribute conventions tie the markup to the browser runtime:
//!
//! - `data-observe` on a section makes it a visibility root.
//! - `data-reveal='{"from":…,"to":…,"duration":…}'` on an element inside one
//!   gives it a [`MotionSpec`] to play whenever the section enters or leaves.
//! - `data-interactive` marks everything the cursor ring should grow over.

pub mod about;
pub mod contact;
pub mod cursor;
pub mod footer;
pub mod hero;
pub mod icons;
pub mod moodboard;
pub mod nav;
pub mod projects;

use crate::assets::{AssetMap, PLACEHOLDER};
use crate::config::ContactConfig;
use crate::reveal::MotionSpec;
use crate::types::Portfolio;
use maud::{Markup, html};

/// Everything a section may read.
#[derive(Debug, Clone, Copy)]
pub struct SectionContext<'a> {
    pub portfolio: &'a Portfolio,
    pub assets: &'a AssetMap,
    /// Rendered `about.md`, replacing the plain paragraphs.
    pub about_html: Option<&'a str>,
    pub contact: &'a ContactConfig,
    /// Seconds between cascade siblings.
    pub stagger: f64,
    /// For the copyright line.
    pub year: i32,
}

/// JSON for a `data-reveal` attribute.
pub fn motion(spec: &MotionSpec) -> String {
    serde_json::to_string(spec).unwrap_or_default()
}

/// Links leaving the page open in a new tab.
pub fn is_external(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}

/// An anchor tagged for the cursor follower.
pub fn link(href: &str, class: &str, label: Option<&str>, content: Markup) -> Markup {
    let external = is_external(href);
    html! {
        a class=(class) href=(href) aria-label=[label]
            target=[external.then_some("_blank")]
            rel=[external.then_some("noopener noreferrer")]
            data-interactive {
            (content)
        }
    }
}

/// An image that swaps to the placeholder if it fails to load.
pub fn image(assets: &AssetMap, reference: Option<&str>, alt: &str, class: &str) -> Markup {
    let dims = reference
        .and_then(|r| assets.get(r))
        .and_then(|a| a.dimensions);
    html! {
        img class=(class) src=(assets.url(reference)) alt=(alt)
            width=[dims.map(|d| d.0)] height=[dims.map(|d| d.1)]
            loading="lazy" decoding="async"
            data-fallback=(PLACEHOLDER);
    }
}
