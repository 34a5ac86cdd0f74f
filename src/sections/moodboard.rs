use super::{SectionContext, image, motion};
use crate::reveal::MotionSpec;
use crate::types::MoodAspect;
use maud::{Markup, html};

pub fn render(ctx: &SectionContext) -> Markup {
    let tiles = &ctx.portfolio.moodboard;
    html! {
        section #moodboard.moodboard.band data-observe {
            div.container {
                h2.section-title.centered data-reveal=(motion(&MotionSpec::fade_up(20.0, 0.6))) {
                    "Inspiration & Mood"
                }
                div.mood-grid data-reveal=(motion(&MotionSpec::fade(0.8).with_delay(0.2))) {
                    @for (i, tile) in tiles.iter().enumerate() {
                        @let spec = MotionSpec::fade_up(20.0, 0.5).staggered(0.0, ctx.stagger, i);
                        @let alt = tile.alt.clone().unwrap_or_else(|| format!("Mood image {}", i + 1));
                        figure class={ "mood-tile " (MoodAspect::for_index(i).class()) }
                            data-reveal=(motion(&spec)) {
                            (image(ctx.assets, Some(&tile.src), &alt, "mood-img"))
                        }
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
    use crate::types::MoodImage;

    #[test]
    fn tiles_cycle_aspect() {
        let mut content = SampleContent::new();
        content.portfolio.moodboard = (0..4)
            .map(|i| MoodImage {
                src: format!("m{i}.jpg"),
                alt: None,
            })
            .collect();
        let html = render(&content.ctx()).into_string();
        let order: Vec<usize> = ["aspect-square", "aspect-landscape", "aspect-portrait"]
            .iter()
            .map(|c| html.find(c).unwrap())
            .collect();
        assert!(order[0] < order[1] && order[1] < order[2]);
        assert_eq!(html.matches("aspect-square").count(), 2);
        assert!(html.contains(r#"alt="Mood image 4""#));
    }

    #[test]
    fn alt_text_from_content() {
        let content = SampleContent::new();
        let html = render(&content.ctx()).into_string();
        assert!(html.contains(r#"alt="workspace""#));
        assert!(html.contains("Inspiration &amp; Mood"));
    }

    #[test]
    fn empty_board_renders_heading_only() {
        let mut content = SampleContent::new();
        content.portfolio.moodboard.clear();
        let html = render(&content.ctx()).into_string();
        assert!(!html.contains("mood-tile"));
    }
}
