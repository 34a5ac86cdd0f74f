//! Contact form and direct links.
//!
//! The form has no delivery of its own. With `contact.endpoint` configured it
//! POSTs there; otherwise it submits to the profile's `mailto:` address as
//! plain text, which opens the visitor's mail client. With neither, the form
//! still renders but carries `data-unsent` and the runtime keeps it from
//! submitting. Field validation is the browser's (`required`, `type="email"`).

use super::hero::social_links;
use super::{SectionContext, motion};
use crate::reveal::MotionSpec;
use maud::{Markup, html};

/// Form `action` and `enctype`, or `None` when there is nowhere to send to.
pub fn form_target(ctx: &SectionContext) -> Option<(String, Option<&'static str>)> {
    match &ctx.contact.endpoint {
        Some(endpoint) => Some((endpoint.clone(), None)),
        None => ctx
            .portfolio
            .profile
            .mailto()
            .map(|mailto| (mailto, Some("text/plain"))),
    }
}

pub fn render(ctx: &SectionContext) -> Markup {
    let contact = &ctx.portfolio.contact;
    let target = form_target(ctx);

    html! {
        section #contact.contact.band data-observe {
            div.container {
                div.contact-intro data-reveal=(motion(&MotionSpec::fade_up(20.0, 0.6))) {
                    h2.section-title { (contact.heading) }
                    p.muted { (contact.blurb) }
                }
                div.contact-body data-reveal=(motion(&MotionSpec::fade_up(30.0, 0.6).with_delay(0.2))) {
                    @let action = target.as_ref().map(|(action, _)| action.as_str());
                    @let enctype = target.as_ref().and_then(|(_, enctype)| *enctype);
                    form.contact-form method=[action.map(|_| "post")] action=[action]
                        enctype=[enctype] data-unsent[target.is_none()] {
                        div.field {
                            label for="name" { "Name" }
                            input #name name="name" type="text" placeholder="Your name" autocomplete="name" required;
                        }
                        div.field {
                            label for="email" { "Email" }
                            input #email name="email" type="email" placeholder="Your email" autocomplete="email" required;
                        }
                        div.field {
                            label for="message" { "Message" }
                            textarea #message name="message" rows="5" placeholder="Your message" required {}
                        }
                        button.btn.btn-primary.btn-block type="submit" data-interactive { "Send Message" }
                    }
                    div.social.centered {
                        (social_links(ctx))
                    }
                }
            }
        }
    }
}
