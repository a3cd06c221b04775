//! Presentation session: view state, navigation and the display seam.
//!
//! The parser never looks at anything in this module. A [`Presenter`]
//! takes a finished [`Deck`] and drives a [`Surface`] and a
//! [`DiagramRenderer`] from a [`ViewState`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Deck;

/// Fragment key carrying the slide number.
pub const FRAGMENT_KEY: &str = "slide";

/// Current position and toggles of a presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    /// Current slide (0-indexed)
    pub current: usize,
    /// Whether the navigation bar is collapsed
    pub nav_minimized: bool,
    /// Whether speaker notes are shown
    pub presenter_mode: bool,
}

impl ViewState {
    /// Start at the first slide.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the position from a location fragment such as `#slide=3`.
    ///
    /// Missing, malformed or out-of-range numbers start at slide 1.
    pub fn from_fragment(fragment: &str, slide_count: usize) -> Self {
        let current = fragment
            .trim_start_matches('#')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == FRAGMENT_KEY)
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .filter(|&number| number >= 1 && number <= slide_count)
            .map_or(0, |number| number - 1);

        Self {
            current,
            ..Self::default()
        }
    }

    /// Location fragment for the current slide (1-indexed).
    pub fn fragment(&self) -> String {
        format!("{}={}", FRAGMENT_KEY, self.current + 1)
    }

    /// Apply a navigation command. Returns whether anything changed.
    pub fn apply(&mut self, command: NavCommand, slide_count: usize) -> bool {
        let before = *self;
        let last = slide_count.saturating_sub(1);
        match command {
            NavCommand::Next => {
                if self.current < last {
                    self.current += 1;
                }
            }
            NavCommand::Previous => self.current = self.current.saturating_sub(1),
            NavCommand::First => self.current = 0,
            NavCommand::Last => self.current = last,
            NavCommand::GoTo(number) => {
                if number >= 1 && number <= slide_count {
                    self.current = number - 1;
                }
            }
            NavCommand::TogglePresenter => self.presenter_mode = !self.presenter_mode,
            NavCommand::ToggleNav => self.nav_minimized = !self.nav_minimized,
        }
        *self != before
    }
}

/// A navigation request from the audience or the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    /// Advance one slide
    Next,
    /// Go back one slide
    Previous,
    /// Jump to the first slide
    First,
    /// Jump to the last slide
    Last,
    /// Jump to a slide number (1-indexed); out-of-range numbers are ignored
    GoTo(usize),
    /// Show or hide speaker notes
    TogglePresenter,
    /// Collapse or expand the navigation bar
    ToggleNav,
}

/// A key press delivered by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// Right arrow
    Right,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Up arrow
    Up,
    /// Home
    Home,
    /// End
    End,
    /// A character, with the control modifier state
    Char(char, bool),
}

impl NavKey {
    /// Command bound to this key, if any.
    pub fn command(self) -> Option<NavCommand> {
        match self {
            NavKey::Right | NavKey::Down => Some(NavCommand::Next),
            NavKey::Left | NavKey::Up => Some(NavCommand::Previous),
            NavKey::Home => Some(NavCommand::First),
            NavKey::End => Some(NavCommand::Last),
            NavKey::Char('p', true) => Some(NavCommand::TogglePresenter),
            NavKey::Char(..) => None,
        }
    }
}

/// What the slide index control should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationModel {
    /// Current slide number (1-indexed)
    pub current: usize,
    /// Total number of slides
    pub total: usize,
    /// Whether "previous" is available
    pub prev_enabled: bool,
    /// Whether "next" is available
    pub next_enabled: bool,
    /// Whether the bar is collapsed
    pub collapsed: bool,
    /// Whether presenter mode is on
    pub presenter_mode: bool,
}

impl NavigationModel {
    /// Describe the control for a state and deck size.
    pub fn new(state: &ViewState, total: usize) -> Self {
        Self {
            current: state.current + 1,
            total,
            prev_enabled: state.current > 0,
            next_enabled: state.current + 1 < total,
            collapsed: state.nav_minimized,
            presenter_mode: state.presenter_mode,
        }
    }
}

/// The visual surface a deck is shown on.
pub trait Surface {
    /// Remove everything currently displayed.
    fn clear(&mut self);

    /// Display slide markup.
    fn show_content(&mut self, html: &str);

    /// Display speaker notes.
    fn show_notes(&mut self, notes: &str);

    /// Display the navigation control.
    fn show_navigation(&mut self, nav: &NavigationModel);

    /// Replace the whole surface with an error message.
    fn show_error(&mut self, message: &str);
}

/// Renders diagram containers once they are on the surface.
pub trait DiagramRenderer {
    /// Whether the renderer has finished loading.
    fn is_ready(&self) -> bool;

    /// Render the container with the given id in place.
    fn render(&mut self, container_id: &str) -> Result<()>;
}

/// Renderer for surfaces without diagram support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiagrams;

impl DiagramRenderer for NoDiagrams {
    fn is_ready(&self) -> bool {
        false
    }

    fn render(&mut self, container_id: &str) -> Result<()> {
        Err(Error::Diagram(format!("no renderer for {}", container_id)))
    }
}

/// Message shown when the document could not be loaded.
pub fn error_message(err: &Error) -> String {
    match err {
        Error::Fetch { reason, .. } => format!("Error loading markdown file: {}", reason),
        other => format!("Error loading markdown file: {}", other),
    }
}

/// Show a load failure on the surface. No slides are displayed.
pub fn show_load_error<S: Surface>(surface: &mut S, err: &Error) {
    log::error!("{}", err);
    surface.clear();
    surface.show_error(&error_message(err));
}

/// Drives a surface through a deck.
pub struct Presenter<'d, S, R> {
    deck: &'d Deck,
    state: ViewState,
    surface: S,
    renderer: R,
}

impl<'d, S: Surface, R: DiagramRenderer> Presenter<'d, S, R> {
    /// Create a presenter starting at slide 1.
    pub fn new(deck: &'d Deck, surface: S, renderer: R) -> Self {
        Self {
            deck,
            state: ViewState::new(),
            surface,
            renderer,
        }
    }

    /// Start at the slide named by a location fragment.
    pub fn with_fragment(mut self, fragment: &str) -> Self {
        self.state = ViewState::from_fragment(fragment, self.deck.slide_count());
        self
    }

    /// Current view state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The surface being driven.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The diagram renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Give back the surface and renderer.
    pub fn into_parts(self) -> (S, R) {
        (self.surface, self.renderer)
    }

    /// Display the current slide.
    pub fn show(&mut self) {
        let total = self.deck.slide_count();
        self.surface.clear();

        let Some(slide) = self.deck.slides.get(self.state.current) else {
            self.surface.show_navigation(&NavigationModel::new(&self.state, total));
            return;
        };

        self.surface.show_content(&slide.content);
        if let Some(ref notes) = slide.notes {
            self.surface.show_notes(notes);
        }
        self.surface.show_navigation(&NavigationModel::new(&self.state, total));

        let ids = slide.diagram_ids();
        if ids.is_empty() {
            return;
        }
        if !self.renderer.is_ready() {
            log::warn!("Diagram renderer is not loaded yet, diagrams will not be rendered");
            return;
        }
        for id in ids {
            if let Err(e) = self.renderer.render(id) {
                log::warn!("{}", e);
            }
        }
    }

    /// Apply a command and redisplay if the position or toggles changed.
    pub fn handle(&mut self, command: NavCommand) -> bool {
        let changed = self.state.apply(command, self.deck.slide_count());
        if changed {
            self.show();
        }
        changed
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: NavKey) -> bool {
        key.command().is_some_and(|command| self.handle(command))
    }
}
