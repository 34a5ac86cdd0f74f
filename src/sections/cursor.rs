//! The cursor ring element. Springs and hover detection live in the runtime.

use maud::{Markup, html};

pub fn render(radius: f64) -> Markup {
    let size = format!("--cursor-size: {}px;", radius * 2.0);
    html! {
        div #cursor.cursor style=(size) aria-hidden="true" {}
    }
}
