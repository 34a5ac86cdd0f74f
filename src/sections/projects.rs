//! Project showcase. Cards alternate image side by index parity and cascade
//! in at twice the configured stagger.

use super::icons::{Icon, icon};
use super::{SectionContext, image, link, motion};
use crate::reveal::MotionSpec;
use crate::types::{ImageSide, Project};
use maud::{Markup, html};

pub fn render(ctx: &SectionContext) -> Markup {
    html! {
        section #projects.projects data-observe {
            div.container {
                h2.section-title.centered data-reveal=(motion(&MotionSpec::fade_up(20.0, 0.6))) {
                    "Featured Projects"
                }
                div.project-list {
                    @for (i, project) in ctx.portfolio.projects.iter().enumerate() {
                        (card(ctx, project, i))
                    }
                }
            }
        }
    }
}

pub fn card(ctx: &SectionContext, project: &Project, index: usize) -> Markup {
    let side = ImageSide::for_index(index);
    let spec = MotionSpec::fade_up(50.0, 0.8).staggered(0.0, ctx.stagger * 2.0, index);

    html! {
        article class={ "project-card image-" (side.as_str()) }
            data-project=(project.id) data-reveal=(motion(&spec)) {
            div.project-media {
                (image(ctx.assets, project.image.as_deref(), &project.title, "project-img"))
                @if project.link.is_some() || project.github.is_some() {
                    div.overlay {
                        @if let Some(href) = &project.link {
                            (link(href, "overlay-btn", None, html! { (icon(Icon::ExternalLink)) "View Live" }))
                        }
                        @if let Some(href) = &project.github {
                            (link(href, "overlay-btn", None, html! { (icon(Icon::Github)) "Code" }))
                        }
                    }
                }
            }
            div.project-body {
                h3 { (project.title) }
                p.muted { (project.description) }
                @if !project.tags.is_empty() {
                    ul.tags {
                        @for tag in &project.tags {
                            li.tag { (tag) }
                        }
                    }
                }
                div.actions {
                    @if let Some(href) = &project.link {
                        (link(href, "btn btn-primary", None, html! { (icon(Icon::ExternalLink)) "View Project" }))
                    }
                    @if let Some(href) = &project.github {
                        (link(href, "btn btn-outline", None, html! { (icon(Icon::Github)) "View Code" }))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::SampleContent;

    #[test]
    fn image_side_follows_parity() {
        let content = SampleContent::new();
        let html = render(&content.ctx()).into_string();
        let classes: Vec<&str> = html
            .match_indices("project-card image-")
            .map(|(i, m)| {
                let rest = &html[i + m.len()..];
                &rest[..rest.find('"').unwrap()]
            })
            .collect();
        assert_eq!(classes, vec!["left", "right", "left"]);
    }

    #[test]
    fn cards_cascade() {
        let content = SampleContent::new();
        let ctx = content.ctx();
        let project = &content.portfolio.projects[0];
        let first = card(&ctx, project, 0).into_string();
        let third = card(&ctx, project, 2).into_string();
        assert!(first.contains("&quot;delay&quot;:0.0"));
        assert!(third.contains("&quot;delay&quot;:0.4"));
    }

    #[test]
    fn buttons_only_for_present_links() {
        let content = SampleContent::new();
        let ctx = content.ctx();
        let with_links = card(&ctx, &content.portfolio.projects[0], 0).into_string();
        assert!(with_links.contains("View Live"));
        assert!(with_links.contains("View Code"));
        assert!(with_links.contains("https://block-tones.netlify.app/"));

        let bare = card(&ctx, &content.portfolio.projects[1], 1).into_string();
        assert!(!bare.contains("View Project"));
        assert!(!bare.contains("overlay"));
        assert!(bare.contains("CrisisBrief"));
        assert!(bare.contains(r#"src="placeholder.svg""#));
    }

    #[test]
    fn tags_rendered() {
        let content = SampleContent::new();
        let html = card(&content.ctx(), &content.portfolio.projects[0], 0).into_string();
        for tag in ["Next.js", "Three.js", "React", "Zustand"] {
            assert!(html.contains(&format!("<li class=\"tag\">{tag}</li>")));
        }
    }
}
