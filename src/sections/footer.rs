use super::{SectionContext, link};
use maud::{Markup, html};

pub fn render(ctx: &SectionContext) -> Markup {
    let footer = &ctx.portfolio.footer;
    let owner = footer
        .owner
        .as_deref()
        .unwrap_or(&ctx.portfolio.profile.name);

    html! {
        footer.site-footer {
            div.container.footer-bar {
                p.muted { "© " (ctx.year) " " (owner) ". All rights reserved." }
                @if !footer.links.is_empty() {
                    nav.footer-links {
                        @for l in &footer.links {
                            (link(&l.href, "footer-link", None, html! { (l.label) }))
                        }
                    }
                }
            }
        }
    }
}
