//! Portfolio content types.
//!
//! These mirror `portfolio.toml` and are serialized into the scan manifest,
//! so the scan and generate stages share one definition.

use serde::{Deserialize, Serialize};

/// Everything the page says, as authored in `portfolio.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Portfolio {
    pub profile: Profile,
    #[serde(default)]
    pub hero: Hero,
    #[serde(default)]
    pub about: About,
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Mood images listed inline. A `moodboard/` directory replaces these.
    #[serde(default)]
    pub moodboard: Vec<MoodImage>,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub footer: Footer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub name: String,
    /// Logo text in the nav bar. Derived from `name` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    pub role: String,
    /// Highlighted phrase in the intro, e.g. "Virginia-based".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Rest of the intro sentence after the location.
    #[serde(default)]
    pub tagline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

impl Profile {
    /// Explicit initials, else the first letter of each word of the name.
    pub fn initials(&self) -> String {
        match &self.initials {
            Some(i) => i.clone(),
            None => self
                .name
                .split_whitespace()
                .filter_map(|w| w.chars().next())
                .flat_map(char::to_uppercase)
                .collect(),
        }
    }

    pub fn mailto(&self) -> Option<String> {
        self.email.as_ref().map(|e| format!("mailto:{e}"))
    }
}

/// A label/value pair in the hero card ("Experience" / "1 Year").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fact {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Hero {
    pub facts: Vec<Fact>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct About {
    pub heading: String,
    /// Plain paragraphs. An `about.md` in the content root takes precedence.
    pub paragraphs: Vec<String>,
    pub skills: Vec<String>,
}

impl Default for About {
    fn default() -> Self {
        Self {
            heading: "About Me".to_string(),
            paragraphs: Vec::new(),
            skills: Vec::new(),
        }
    }
}

/// A showcased project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub description: String,
    /// Asset reference; the placeholder is used when absent or missing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Live demo URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Source repository URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

/// Which side of a project card the image sits on (wide layouts only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSide {
    Left,
    Right,
}

impl ImageSide {
    /// Cards alternate, starting with the image on the left.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            ImageSide::Left
        } else {
            ImageSide::Right
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImageSide::Left => "left",
            ImageSide::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoodImage {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// Tile shape in the mood grid, cycling square → landscape → portrait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodAspect {
    Square,
    Landscape,
    Portrait,
}

impl MoodAspect {
    pub fn for_index(index: usize) -> Self {
        match index % 3 {
            0 => MoodAspect::Square,
            1 => MoodAspect::Landscape,
            _ => MoodAspect::Portrait,
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            MoodAspect::Square => "aspect-square",
            MoodAspect::Landscape => "aspect-landscape",
            MoodAspect::Portrait => "aspect-portrait",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Contact {
    pub heading: String,
    pub blurb: String,
}

impl Default for Contact {
    fn default() -> Self {
        Self {
            heading: "Get in Touch".to_string(),
            blurb: "Interested in working together? Feel free to reach out for \
                    collaborations or just a friendly hello."
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Link {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Footer {
    /// Copyright holder; the profile name when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub links: Vec<Link>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str) -> Profile {
        Profile {
            name: name.to_string(),
            initials: None,
            role: "Developer".to_string(),
            location: None,
            tagline: String::new(),
            avatar: None,
            about_image: None,
            email: None,
            github: None,
        }
    }

    #[test]
    fn initials_derived_from_name() {
        assert_eq!(profile("Nicholas Hess").initials(), "NH");
        assert_eq!(profile("ada  lovelace").initials(), "AL");
    }

    #[test]
    fn explicit_initials_win() {
        let mut p = profile("Nicholas Hess");
        p.initials = Some("nh.".into());
        assert_eq!(p.initials(), "nh.");
    }

    #[test]
    fn mailto_from_email() {
        let mut p = profile("A");
        assert_eq!(p.mailto(), None);
        p.email = Some("hello@example.com".into());
        assert_eq!(p.mailto().as_deref(), Some("mailto:hello@example.com"));
    }

    #[test]
    fn image_side_alternates_by_parity() {
        let sides: Vec<ImageSide> = (0..5).map(ImageSide::for_index).collect();
        assert_eq!(
            sides,
            vec![
                ImageSide::Left,
                ImageSide::Right,
                ImageSide::Left,
                ImageSide::Right,
                ImageSide::Left
            ]
        );
    }

    #[test]
    fn mood_aspect_cycles() {
        let classes: Vec<&str> = (0..6).map(|i| MoodAspect::for_index(i).class()).collect();
        assert_eq!(
            classes,
            vec![
                "aspect-square",
                "aspect-landscape",
                "aspect-portrait",
                "aspect-square",
                "aspect-landscape",
                "aspect-portrait"
            ]
        );
    }

    #[test]
    fn minimal_portfolio_parses() {
        let toml = r#"
[profile]
name = "Ada Lovelace"
role = "Analyst"
"#;
        let p: Portfolio = toml::from_str(toml).unwrap();
        assert_eq!(p.about.heading, "About Me");
        assert_eq!(p.contact.heading, "Get in Touch");
        assert!(p.projects.is_empty());
    }

    #[test]
    fn unknown_project_field_rejected() {
        let toml = r#"
[profile]
name = "A"
role = "B"

[[projects]]
id = 1
title = "X"
description = "Y"
repo = "nope"
"#;
        assert!(toml::from_str::<Portfolio>(toml).is_err());
    }
}
