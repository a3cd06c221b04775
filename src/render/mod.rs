//! Rendering module for converting decks to output formats.

mod html;
mod json;
mod notes;
mod options;

pub use html::{error_page, to_html};
pub use json::{to_json, JsonFormat};
pub use notes::to_notes;
pub use options::{RenderOptions, SlideSelection};

use crate::error::{Error, Result};
use crate::model::{Deck, Slide};

/// Slides picked by a selection, in deck order.
///
/// Explicitly named slides past the end of the deck are an error; a range
/// is cut off at the last slide.
pub fn select_slides<'d>(deck: &'d Deck, selection: &SlideSelection) -> Result<Vec<&'d Slide>> {
    let count = deck.slide_count();
    match selection {
        SlideSelection::Range(range) if *range.start() > count && count > 0 => {
            return Err(Error::SlideOutOfRange(*range.start(), count));
        }
        SlideSelection::Slides(slides) => {
            if let Some(&missing) = slides.iter().find(|&&n| n > count) {
                return Err(Error::SlideOutOfRange(missing, count));
            }
        }
        _ => {}
    }

    Ok(deck
        .slides
        .iter()
        .filter(|slide| selection.includes(slide.number()))
        .collect())
}

/// Copy of the deck holding only the selected slides.
pub fn select_deck(deck: &Deck, selection: &SlideSelection) -> Result<Deck> {
    if *selection == SlideSelection::All {
        return Ok(deck.clone());
    }

    let mut selected = Deck::new();
    selected.metadata = deck.metadata.clone();
    selected.image_urls = deck.image_urls.clone();
    for slide in select_slides(deck, selection)? {
        selected.add_slide(slide.clone());
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(n: usize) -> Deck {
        let mut deck = Deck::new();
        for i in 0..n {
            deck.add_slide(Slide::new(i, format!("<p>{}</p>", i + 1), None));
        }
        deck
    }

    #[test]
    fn test_select_slides() {
        let deck = deck(5);
        let picked = select_slides(&deck, &SlideSelection::Slides(vec![2, 4])).unwrap();
        assert_eq!(picked.iter().map(|s| s.number()).collect::<Vec<_>>(), vec![2, 4]);

        let picked = select_slides(&deck, &SlideSelection::Range(4..=9)).unwrap();
        assert_eq!(picked.len(), 2);

        assert!(matches!(
            select_slides(&deck, &SlideSelection::Slides(vec![6])),
            Err(Error::SlideOutOfRange(6, 5))
        ));
        assert!(select_slides(&deck, &SlideSelection::Range(7..=8)).is_err());
    }

    #[test]
    fn test_select_deck_restats() {
        let deck = deck(3);
        let selected = select_deck(&deck, &SlideSelection::Range(2..=3)).unwrap();
        assert_eq!(selected.slide_count(), 2);
        assert_eq!(selected.stats.slide_count, 2);
        assert_eq!(selected.slides[0].index, 1);
    }
}
