use super::{SectionContext, image, motion};
use crate::reveal::MotionSpec;
use maud::{Markup, PreEscaped, html};

/// Skill tags start cascading once the text block has begun moving.
const SKILLS_BASE_DELAY: f64 = 0.4;

pub fn render(ctx: &SectionContext) -> Markup {
    let profile = &ctx.portfolio.profile;
    let about = &ctx.portfolio.about;

    html! {
        section #about.about data-observe {
            div.container.about-grid {
                div.about-figure data-reveal=(motion(&MotionSpec::slide_x(-50.0, 0.6))) {
                    div.frame aria-hidden="true" {}
                    div.photo {
                        (image(ctx.assets, profile.about_image.as_deref(), &profile.name, "about-img"))
                    }
                }
                div.about-text data-reveal=(motion(&MotionSpec::slide_x(50.0, 0.6).with_delay(0.2))) {
                    h2.section-title { (about.heading) }
                    div.prose {
                        @match ctx.about_html {
                            Some(rendered) => (PreEscaped(rendered)),
                            None => {
                                @for paragraph in &about.paragraphs {
                                    p { (paragraph) }
                                }
                            }
                        }
                    }
                    @if !about.skills.is_empty() {
                        div.skills {
                            h3 { "Skills" }
                            ul.tags {
                                @for (i, skill) in about.skills.iter().enumerate() {
                                    @let spec = MotionSpec::fade_up(10.0, 0.4)
                                        .staggered(SKILLS_BASE_DELAY, ctx.stagger, i);
                                    li.tag data-reveal=(motion(&spec)) { (skill) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
