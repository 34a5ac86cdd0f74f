use super::icons::{Icon, icon};
use super::{SectionContext, image, link, motion};
use crate::reveal::MotionSpec;
use maud::{Markup, html};

pub fn render(ctx: &SectionContext) -> Markup {
    let profile = &ctx.portfolio.profile;
    let rise = |offset: f64, delay: f64| MotionSpec::fade_up(offset, 0.5).with_delay(delay);
    let location = profile.location.as_deref().filter(|l| !l.trim().is_empty());
    let tagline = profile.tagline.trim();

    html! {
        section #hero.hero data-observe {
            div.container data-reveal=(motion(&MotionSpec::fade_up(50.0, 0.8).with_delay(0.2))) {
                div.hero-intro {
                    div.avatar data-reveal=(motion(&MotionSpec::zoom(0.8, 0.5).with_delay(0.3))) {
                        (image(ctx.assets, profile.avatar.as_deref(), &profile.name, "avatar-img"))
                    }
                    div.hero-title {
                        h1.hero-name data-reveal=(motion(&rise(20.0, 0.4))) { (profile.name) }
                        h2.hero-role data-reveal=(motion(&rise(20.0, 0.5))) { (profile.role) }
                        div.social data-reveal=(motion(&MotionSpec::fade(0.5).with_delay(0.6))) {
                            (social_links(ctx))
                        }
                    }
                }
                div.hero-card data-reveal=(motion(&MotionSpec::fade_up(30.0, 0.6).with_delay(0.7))) {
                    @if location.is_some() || !tagline.is_empty() {
                        p.hero-tagline {
                            "I'm a "
                            @if let Some(location) = location {
                                span.highlight { (location) }
                                @if !tagline.is_empty() { " " }
                            }
                            (tagline)
                        }
                    }
                    @if !ctx.portfolio.hero.facts.is_empty() {
                        dl.facts {
                            @for fact in &ctx.portfolio.hero.facts {
                                div.fact {
                                    dt { (fact.label) }
                                    dd { (fact.value) }
                                }
                            }
                        }
                    }
                    div.actions {
                        (link("#projects", "btn btn-primary", None, html! { "View Projects" }))
                        (link("#contact", "btn btn-outline", None, html! { "Get in Touch" }))
                    }
                }
            }
            div.scroll-hint data-reveal=(motion(&MotionSpec::fade(0.5).with_delay(1.0))) {
                (icon(Icon::ChevronDown))
            }
        }
    }
}

/// GitHub and mail icon links; either is omitted when the profile lacks it.
pub fn social_links(ctx: &SectionContext) -> Markup {
    let profile = &ctx.portfolio.profile;
    html! {
        @if let Some(github) = &profile.github {
            (link(github, "icon-btn", Some("GitHub"), icon(Icon::Github)))
        }
        @if let Some(mailto) = profile.mailto() {
            (link(&mailto, "icon-btn", Some("Email"), icon(Icon::Mail)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::SampleContent;

    #[test]
    fn hero_content() {
        let content = SampleContent::new();
        let html = render(&content.ctx()).into_string();
        assert!(html.contains(r#"id="hero""#));
        assert!(html.contains("Nicholas Hess"));
        assert!(html.contains("Web &amp; App Developer"));
        assert!(html.contains(r#"<span class="highlight">Virginia-based</span>"#));
        assert!(html.contains("<dt>Experience</dt><dd>1 Year</dd>"));
        assert!(html.contains("View Projects"));
        assert!(html.contains("icon-chevron-down"));
    }

    #[test]
    fn intro_sentence_skipped_when_empty() {
        let mut content = SampleContent::new();
        content.portfolio.profile.tagline = String::new();
        content.portfolio.profile.location = None;
        let html = render(&content.ctx()).into_string();
        assert!(!html.contains("hero-tagline"));

        content.portfolio.profile.location = Some("Lisbon".into());
        let html = render(&content.ctx()).into_string();
        assert!(html.contains(r#" a <span class="highlight">Lisbon</span></p>"#));
    }

    #[test]
    fn social_links_follow_profile() {
        let mut content = SampleContent::new();
        let html = social_links(&content.ctx()).into_string();
        assert!(html.contains("mailto:hello@example.com"));
        assert!(html.contains("https://github.com/hessnt30"));

        content.portfolio.profile.github = None;
        content.portfolio.profile.email = None;
        assert_eq!(social_links(&content.ctx()).into_string(), "");
    }

    #[test]
    fn reveal_delays_cascade() {
        let content = SampleContent::new();
        let html = render(&content.ctx()).into_string();
        let name = html.find("hero-name").unwrap();
        let role = html.find("hero-role").unwrap();
        assert!(name < role);
        assert!(html.contains(r#"&quot;delay&quot;:0.4"#));
        assert!(html.contains(r#"&quot;delay&quot;:0.5"#));
    }
}
