//! Light/dark theme preference.
//!
//! The preference has a single writer, [`ThemeToggle`], which persists every
//! change through a [`ThemeStore`] and publishes it to subscribers (the
//! styling layer). In the generated page the store is `localStorage`; the
//! runtime reads it back before first paint.

use crate::signal::{Observable, Watch};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The icon on the toggle button: it always offers the other mode.
    pub fn toggle_icon(self) -> ThemeIcon {
        match self {
            Theme::Dark => ThemeIcon::Sun,
            Theme::Light => ThemeIcon::Moon,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeIcon {
    Sun,
    Moon,
}

impl ThemeIcon {
    pub fn label(self) -> &'static str {
        match self {
            ThemeIcon::Sun => "Switch to light mode",
            ThemeIcon::Moon => "Switch to dark mode",
        }
    }
}

/// Initial theme before the visitor has chosen one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Follow `prefers-color-scheme`.
    #[default]
    System,
    Light,
    Dark,
}

impl ThemePreference {
    /// Resolve against the operating system's scheme.
    pub fn resolve(self, system: Theme) -> Theme {
        match self {
            ThemePreference::System => system,
            ThemePreference::Light => Theme::Light,
            ThemePreference::Dark => Theme::Dark,
        }
    }

    /// A fixed theme, if one is configured.
    pub fn fixed(self) -> Option<Theme> {
        match self {
            ThemePreference::System => None,
            ThemePreference::Light => Some(Theme::Light),
            ThemePreference::Dark => Some(Theme::Dark),
        }
    }
}

/// Where the chosen theme survives reloads.
pub trait ThemeStore {
    fn load(&self) -> Option<Theme>;
    fn save(&mut self, theme: Theme);
}

/// In-process store, for tests and headless use.
#[derive(Debug, Default, Clone)]
pub struct MemoryThemeStore {
    saved: Option<Theme>,
    writes: usize,
}

impl MemoryThemeStore {
    pub fn with(theme: Theme) -> Self {
        Self {
            saved: Some(theme),
            writes: 0,
        }
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Option<Theme> {
        self.saved
    }

    fn save(&mut self, theme: Theme) {
        self.saved = Some(theme);
        self.writes += 1;
    }
}

/// The single writer of the theme preference.
pub struct ThemeToggle<S: ThemeStore> {
    store: S,
    current: Observable<Theme>,
}

impl<S: ThemeStore> ThemeToggle<S> {
    /// Start from the stored theme, falling back to `default` resolved
    /// against `system`.
    pub fn new(store: S, default: ThemePreference, system: Theme) -> Self {
        let initial = store.load().unwrap_or_else(|| default.resolve(system));
        Self {
            store,
            current: Observable::new(initial),
        }
    }

    pub fn current(&self) -> Theme {
        self.current.get()
    }

    pub fn icon(&self) -> ThemeIcon {
        self.current().toggle_icon()
    }

    pub fn watch(&self) -> Watch<Theme> {
        self.current.watch()
    }

    /// Flip light ↔ dark, persist, publish. Returns the new theme.
    pub fn toggle(&mut self) -> Theme {
        let next = self.current().toggled();
        self.store.save(next);
        self.current.set(next);
        next
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn display_matches_stored_value() {
        assert_eq!(Theme::Light.to_string(), "light");
        assert_eq!(
            serde_json::from_str::<Theme>(&format!("\"{}\"", Theme::Dark)).unwrap(),
            Theme::Dark
        );
        assert!(serde_json::from_str::<Theme>("\"sepia\"").is_err());
    }

    #[test]
    fn icon_offers_other_mode() {
        assert_eq!(Theme::Dark.toggle_icon(), ThemeIcon::Sun);
        assert_eq!(Theme::Light.toggle_icon(), ThemeIcon::Moon);
    }

    #[test]
    fn stored_theme_wins() {
        let toggle = ThemeToggle::new(
            MemoryThemeStore::with(Theme::Dark),
            ThemePreference::Light,
            Theme::Light,
        );
        assert_eq!(toggle.current(), Theme::Dark);
    }

    #[test]
    fn falls_back_to_system() {
        let toggle = ThemeToggle::new(
            MemoryThemeStore::default(),
            ThemePreference::System,
            Theme::Dark,
        );
        assert_eq!(toggle.current(), Theme::Dark);
        assert_eq!(toggle.icon(), ThemeIcon::Sun);
    }

    #[test]
    fn configured_default_beats_system() {
        let toggle = ThemeToggle::new(
            MemoryThemeStore::default(),
            ThemePreference::Light,
            Theme::Dark,
        );
        assert_eq!(toggle.current(), Theme::Light);
    }

    #[test]
    fn toggle_twice_restores() {
        let mut toggle = ThemeToggle::new(
            MemoryThemeStore::default(),
            ThemePreference::System,
            Theme::Light,
        );
        assert_eq!(toggle.toggle(), Theme::Dark);
        assert_eq!(toggle.icon(), ThemeIcon::Sun);
        assert_eq!(toggle.toggle(), Theme::Light);
        assert_eq!(toggle.icon(), ThemeIcon::Moon);
    }

    #[test]
    fn toggle_persists_and_publishes() {
        let mut toggle = ThemeToggle::new(
            MemoryThemeStore::default(),
            ThemePreference::System,
            Theme::Light,
        );
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = toggle.watch().subscribe(move |t| sink.borrow_mut().push(*t));

        toggle.toggle();
        assert_eq!(toggle.store().load(), Some(Theme::Dark));
        assert_eq!(toggle.store().writes(), 1);
        assert_eq!(*seen.borrow(), vec![Theme::Dark]);
    }

    #[test]
    fn preference_fixed() {
        assert_eq!(ThemePreference::System.fixed(), None);
        assert_eq!(ThemePreference::Dark.fixed(), Some(Theme::Dark));
    }
}
