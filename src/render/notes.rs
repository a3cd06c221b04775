//! Plain-text speaker notes.

use super::{select_slides, RenderOptions};
use crate::error::Result;
use crate::model::Deck;

/// Collect speaker notes of the selected slides as plain text.
///
/// Each slide with notes gets a `Slide N` header followed by its notes;
/// slides without notes are skipped.
pub fn to_notes(deck: &Deck, options: &RenderOptions) -> Result<String> {
    let sections: Vec<String> = select_slides(deck, &options.slide_selection)?
        .into_iter()
        .filter_map(|slide| {
            slide
                .notes
                .as_ref()
                .map(|notes| format!("Slide {}\n{}\n", slide.number(), notes))
        })
        .collect();
    Ok(sections.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Slide;
    use crate::render::SlideSelection;

    #[test]
    fn test_to_notes() {
        let mut deck = Deck::new();
        deck.add_slide(Slide::new(0, "", Some("intro\nwave".into())));
        deck.add_slide(Slide::new(1, "", None));
        deck.add_slide(Slide::new(2, "", Some("outro".into())));

        let text = to_notes(&deck, &RenderOptions::default()).unwrap();
        assert_eq!(text, "Slide 1\nintro\nwave\n\nSlide 3\noutro\n");

        let options = RenderOptions::new().with_slides(SlideSelection::Range(2..=3));
        assert_eq!(to_notes(&deck, &options).unwrap(), "Slide 3\noutro\n");
    }

    #[test]
    fn test_no_notes() {
        let mut deck = Deck::new();
        deck.add_slide(Slide::new(0, "<p>x</p>", None));
        assert_eq!(to_notes(&deck, &RenderOptions::default()).unwrap(), "");
    }
}
