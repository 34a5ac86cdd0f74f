//! Fixed top bar: initials logo, in-page links and the theme toggle.

use super::icons::{Icon, icon};
use super::{SectionContext, link, motion};
use crate::reveal::MotionSpec;
use crate::theme::ThemeIcon;
use maud::{Markup, html};

/// In-page targets, in bar order.
pub const NAV_LINKS: &[(&str, &str)] = &[
    ("Home", "#hero"),
    ("About", "#about"),
    ("Projects", "#projects"),
    ("Contact", "#contact"),
];

pub fn render(ctx: &SectionContext) -> Markup {
    let drop_in = MotionSpec::fade_up(-20.0, 0.5);
    html! {
        header.site-header data-observe {
            div.container.nav-bar {
                div.logo data-reveal=(motion(&drop_in)) {
                    (link("#hero", "logo-link", Some("Back to top"), html! {
                        (ctx.portfolio.profile.initials())
                    }))
                }
                nav.site-nav data-reveal=(motion(&drop_in.with_delay(0.1))) {
                    ul {
                        @for (label, href) in NAV_LINKS {
                            li { (link(href, "nav-link", None, html! { (label) })) }
                        }
                    }
                    (theme_toggle())
                }
            }
        }
    }
}

/// Both glyphs are rendered; CSS shows the one for the mode not in use.
pub fn theme_toggle() -> Markup {
    html! {
        button #theme-toggle.theme-toggle type="button"
            aria-label=(ThemeIcon::Moon.label())
            data-label-sun=(ThemeIcon::Sun.label())
            data-label-moon=(ThemeIcon::Moon.label())
            data-interactive {
            (icon(Icon::Sun))
            (icon(Icon::Moon))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{SampleContent, assert_in_order};

    #[test]
    fn toggle_is_interactive_button() {
        let html = theme_toggle().into_string();
        assert!(html.contains(r#"id="theme-toggle""#));
        assert!(html.contains("data-interactive"));
        assert!(html.contains("icon-sun"));
        assert!(html.contains("icon-moon"));
        assert!(html.contains("Switch to light mode"));
    }

    #[test]
    fn links_in_order() {
        let content = SampleContent::new();
        let html = render(&content.ctx()).into_string();
        assert!(html.contains(">NH<"));
        assert_in_order(
            &html,
            &[
                r##"href="#about""##,
                r##"href="#projects""##,
                r##"href="#contact""##,
                "theme-toggle",
            ],
        );
        assert!(html.contains("data-observe"));
    }
}
