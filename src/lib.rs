//! # Folio
//!
//! A static site generator for single-page developer portfolios. One TOML
//! file describes the person and their work; the output is one `index.html`
//! with scroll-triggered reveals, a spring-animated cursor ring and a
//! light/dark toggle.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (files → validated, resolved data)
//! 2. Generate  manifest  →  dist/            (final HTML page + assets)
//! ```
//!
//! The manifest is plain JSON, so the result of the scan can be inspected
//! and regenerated without touching the content directory again.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: loads `portfolio.toml`, `about.md` and the moodboard, resolves assets |
//! | [`generate`] | Stage 2: composes the page from sections using Maud |
//! | [`sections`] | One renderer per page section: nav, hero, about, projects, moodboard, contact, footer |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation and color CSS |
//! | [`types`] | Portfolio content types shared by scan and generate |
//! | [`assets`] | Image reference classification, hashing and dimension probing |
//! | [`naming`] | `NNN-name` filename convention used by the moodboard directory |
//! | [`output`] | CLI output formatting for each stage and the motion report |
//! | [`signal`] | Single-writer observable values with subscription guards |
//! | [`visibility`] | Viewport intersection tracking with a threshold |
//! | [`reveal`] | Motion specs and the hidden/revealing/revealed/hiding state machine |
//! | [`spring`] | Closed-form damped spring used by the cursor follower |
//! | [`cursor`] | Cursor follower: pointer tracking, hover detection, spring targets |
//! | [`theme`] | Light/dark preference with a pluggable persistence store |
//!
//! # Behavior Model and Runtime
//!
//! The interactive parts of the page run as a small vanilla script in the
//! browser. [`visibility`], [`reveal`], [`spring`], [`cursor`] and [`theme`]
//! are the same behavior expressed as deterministic state machines: tests
//! drive them with synthetic viewports, pointer events and clock ticks. The
//! generator serializes their parameters (motion specs per element, spring
//! constants, reveal threshold) into the page, and the script follows the
//! same rules.
//!
//! # Design Decisions
//!
//! ## Static First
//!
//! Nothing is hidden until the runtime has confirmed `IntersectionObserver`
//! support. Without it, or without JavaScript at all, the page is fully
//! readable and only the motion is missing.
//!
//! ## Interactive Elements Are Tagged
//!
//! The cursor ring grows over anything tagged `data-interactive` at render
//! time, plus anchors and buttons. Inspecting computed cursor styles is kept
//! only as a last resort for third-party markup.
//!
//! ## Missing Images Never Fail a Build
//!
//! Unresolvable local images render as `placeholder.svg` with a warning, and
//! the runtime swaps in the same placeholder for images that fail to load.

pub mod assets;
pub mod config;
pub mod cursor;
pub mod generate;
pub mod naming;
pub mod output;
pub mod reveal;
pub mod scan;
pub mod sections;
pub mod signal;
pub mod spring;
pub mod theme;
pub mod types;
pub mod visibility;

#[cfg(test)]
pub(crate) mod test_helpers;
