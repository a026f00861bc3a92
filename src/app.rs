//! Event loop driving the navigator
//!
//! All state changes happen on the thread that runs [`App::run`]. Catalog
//! fetches run on short-lived worker threads and report back through the same
//! channel that carries user input, so the loop only ever handles one event at
//! a time.

use crate::catalog::CatalogProvider;
use crate::input::{HELP_TEXT, Input, InputError};
use crate::navigation::{Action, Effect, Navigator, Screen, View};
use crate::render::CardRenderer;
use crate::ShowBrowserError;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use tracing::{debug, info};

/// Messages processed by the event loop
#[derive(Debug)]
pub enum Event {
    /// A command typed by the user
    Input(Input),

    /// A line that could not be parsed
    InvalidInput(InputError),

    /// The input stream ended
    InputClosed,

    /// A completed fetch
    Action(Action),
}

/// Whether the event loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Where screens are drawn
pub trait Surface {
    /// The node type of the cards on a screen
    type Node;

    /// Replaces whatever was drawn before with the given screen
    fn present(&mut self, screen: &Screen<Self::Node>) -> io::Result<()>;

    /// Shows a one-off message below the current screen
    fn notify(&mut self, message: &str) -> io::Result<()>;
}

/// Draws screens as text on a terminal or any other writer
pub struct TerminalSurface<W: Write> {
    out: W,
    /// Clear the terminal before each screen
    clear: bool,
}

impl TerminalSurface<io::Stdout> {
    /// A surface writing to stdout that clears the terminal between screens
    pub fn stdout() -> Self {
        Self::new(io::stdout(), true)
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, clear: bool) -> Self {
        Self { out, clear }
    }

    /// Consumes the surface and returns the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    type Node = String;

    fn present(&mut self, screen: &Screen<String>) -> io::Result<()> {
        if self.clear {
            // Clear screen and move the cursor home
            write!(self.out, "\x1B[2J\x1B[H")?;
        }

        writeln!(self.out, "=== {} ===", screen.title)?;
        writeln!(self.out, "Search: {}", screen.search_input)?;

        let selected_show = screen
            .selected_show
            .and_then(|id| screen.show_options.iter().find(|option| option.value == id.0))
            .map_or("-", |option| option.label.as_str());
        writeln!(
            self.out,
            "Show: {} ({} options)",
            selected_show,
            screen.show_options.len()
        )?;

        if screen.view != View::ShowsBrowsing {
            let selected_episode = screen
                .selected_episode
                .and_then(|id| {
                    screen
                        .episode_options
                        .iter()
                        .find(|option| option.value == id.0)
                })
                .map_or("-", |option| option.label.as_str());
            writeln!(
                self.out,
                "Episode: {} ({} options)",
                selected_episode,
                screen.episode_options.len()
            )?;
        }
        writeln!(self.out)?;

        if let Some(message) = &screen.message {
            writeln!(self.out, "{}", message)?;
        } else {
            let noun = if screen.view == View::ShowsBrowsing {
                "shows"
            } else {
                "episodes"
            };
            writeln!(
                self.out,
                "Displaying {}/{} {}",
                screen.cards.len(),
                screen.total,
                noun
            )?;

            for (index, card) in screen.cards.iter().enumerate() {
                writeln!(self.out)?;
                write!(self.out, "[{}] {}", index + 1, card.node)?;
            }
        }

        writeln!(self.out)?;
        write!(self.out, "> ")?;
        self.out.flush()
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", message)?;
        write!(self.out, "> ")?;
        self.out.flush()
    }
}

/// The running application
pub struct App<P, R, S> {
    navigator: Navigator,
    provider: Arc<P>,
    renderer: R,
    surface: S,
    events: Sender<Event>,
    /// Click handlers of the cards on the last drawn screen
    clickable: Vec<Option<Action>>,
}

impl<P, R, S> App<P, R, S>
where
    P: CatalogProvider + 'static,
    R: CardRenderer,
    S: Surface<Node = R::Node>,
{
    /// Creates the application
    ///
    /// # Arguments
    ///
    /// * `provider` - Catalog used by the fetch threads
    /// * `renderer` - Turns cards into nodes for the surface
    /// * `surface` - Where screens are drawn
    /// * `events` - Sender of the channel the event loop reads from
    pub fn new(provider: Arc<P>, renderer: R, surface: S, events: Sender<Event>) -> Self {
        Self {
            navigator: Navigator::new(),
            provider,
            renderer,
            surface,
            events,
            clickable: Vec::new(),
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Requests the show catalog and draws the first screen
    pub fn start(&mut self) -> Result<(), ShowBrowserError> {
        let effects = self.navigator.start();
        self.run_effects(effects)
    }

    /// Starts the application and processes events until the user quits
    pub fn run(mut self, events: Receiver<Event>) -> Result<(), ShowBrowserError> {
        self.start()?;

        for event in events {
            if self.handle_event(event)? == Flow::Quit {
                break;
            }
        }

        info!("shutting down");
        Ok(())
    }

    /// Processes a single event
    pub fn handle_event(&mut self, event: Event) -> Result<Flow, ShowBrowserError> {
        match event {
            Event::Input(Input::Dispatch(action)) | Event::Action(action) => {
                self.dispatch(action)?;
            }
            Event::Input(Input::Open(position)) => self.open(position)?,
            Event::Input(Input::Redraw) => self.render()?,
            Event::Input(Input::Help) => self.surface.notify(HELP_TEXT)?,
            Event::Input(Input::Quit) | Event::InputClosed => return Ok(Flow::Quit),
            Event::InvalidInput(e) => self.surface.notify(&e.to_string())?,
        }

        Ok(Flow::Continue)
    }

    fn dispatch(&mut self, action: Action) -> Result<(), ShowBrowserError> {
        let effects = self.navigator.dispatch(action);
        self.run_effects(effects)
    }

    /// Clicks the card at the 1-based position on the last drawn screen
    fn open(&mut self, position: usize) -> Result<(), ShowBrowserError> {
        let handler = position
            .checked_sub(1)
            .and_then(|index| self.clickable.get(index))
            .cloned();

        match handler {
            Some(Some(action)) => self.dispatch(action),
            Some(None) => Ok(self.surface.notify("That card cannot be opened")?),
            None => Ok(self.surface.notify("No card at that position")?),
        }
    }

    fn run_effects(&mut self, effects: Vec<Effect>) -> Result<(), ShowBrowserError> {
        for effect in effects {
            match effect {
                Effect::FetchShows | Effect::FetchEpisodes { .. } => self.spawn_fetch(effect),
                Effect::Render => self.render()?,
            }
        }
        Ok(())
    }

    fn spawn_fetch(&self, effect: Effect) {
        let provider = Arc::clone(&self.provider);
        let events = self.events.clone();

        thread::spawn(move || {
            let action = match effect {
                Effect::FetchShows => Action::ShowsLoaded(provider.list_shows()),
                Effect::FetchEpisodes { show_id, token } => Action::EpisodesLoaded {
                    token,
                    result: provider.list_episodes(show_id),
                },
                Effect::Render => return,
            };

            if events.send(Event::Action(action)).is_err() {
                debug!("event loop closed before fetch completed");
            }
        });
    }

    fn render(&mut self) -> io::Result<()> {
        let screen = self.navigator.screen(&self.renderer);
        self.clickable = screen
            .cards
            .iter()
            .map(|card| card.on_select.clone())
            .collect();
        self.surface.present(&screen)
    }
}
