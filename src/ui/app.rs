use crate::api::{CreatureRecord, LookupError, SpriteArt};
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{info, warn};

/// How many moves the result panel lists.
pub const MAX_MOVES: usize = 5;

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    None,
    /// A search was started for this lower-cased key.
    Submit(String),
    Quit,
}

/// Which of the mutually exclusive panels the view currently shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchView<'a> {
    Idle,
    Loading,
    Failed(&'a str),
    Found(&'a CreatureRecord),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpriteState {
    None,
    Loading(String),
    Ready { url: String, art: SpriteArt },
    Unavailable(String),
}

pub struct App {
    pub query: String,
    pub creature: Option<CreatureRecord>,
    pub loading: bool,
    pub error: Option<String>,
    pub sprite: SpriteState,
    pub theme: Theme,
    pub should_quit: bool,
}

impl App {
    pub fn new(theme: Theme) -> Self {
        Self {
            query: String::new(),
            creature: None,
            loading: false,
            error: None,
            sprite: SpriteState::None,
            theme,
            should_quit: false,
        }
    }

    /// Replace the query with the input's current value, verbatim.
    pub fn set_query(&mut self, value: impl Into<String>) {
        self.query = value.into();
    }

    pub fn input_push_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn input_pop_char(&mut self) {
        self.query.pop();
    }

    pub fn clear_input(&mut self) {
        self.query.clear();
    }

    /// Start a search: raise the in-flight flag, drop the previous result and
    /// error, and return the lower-cased path key to look up.
    pub fn begin_search(&mut self) -> String {
        self.loading = true;
        self.error = None;
        self.creature = None;
        self.sprite = SpriteState::None;

        let key = self.query.to_lowercase();
        info!(query = %self.query, %key, "search submitted");
        key
    }

    /// Apply the outcome of a lookup. The in-flight flag is cleared whatever
    /// the outcome.
    ///
    /// Outcomes are applied in the order they arrive, so a slow, superseded
    /// request can still overwrite a newer result.
    ///
    /// Returns the sprite URL to fetch when the record carries one.
    pub fn finish_search(&mut self, result: Result<CreatureRecord, LookupError>) -> Option<String> {
        self.loading = false;

        match result {
            Ok(record) => {
                info!(name = %record.name, "lookup succeeded");
                let sprite_url = record.sprite_url().map(str::to_owned);
                self.sprite = match &sprite_url {
                    Some(url) => SpriteState::Loading(url.clone()),
                    None => SpriteState::None,
                };
                self.error = None;
                self.creature = Some(record);
                sprite_url
            }
            Err(err) => {
                warn!(error = %err, "lookup failed");
                self.error = Some(err.to_string());
                None
            }
        }
    }

    /// Apply a downloaded sprite, unless the view has moved on to another one.
    pub fn apply_sprite(&mut self, url: &str, result: Result<SpriteArt, LookupError>) {
        if !matches!(&self.sprite, SpriteState::Loading(pending) if pending == url) {
            return;
        }

        self.sprite = match result {
            Ok(art) => SpriteState::Ready {
                url: url.to_string(),
                art,
            },
            Err(err) => {
                warn!(%url, error = %err, "sprite unavailable");
                SpriteState::Unavailable(url.to_string())
            }
        };
    }

    pub fn view(&self) -> SearchView<'_> {
        if self.loading {
            SearchView::Loading
        } else if let Some(error) = &self.error {
            SearchView::Failed(error)
        } else if let Some(record) = &self.creature {
            SearchView::Found(record)
        } else {
            SearchView::Idle
        }
    }

    /// The first [`MAX_MOVES`] moves of the active record, in source order.
    pub fn visible_moves(&self) -> Vec<&str> {
        self.creature
            .as_ref()
            .map(|record| record.move_names().take(MAX_MOVES).collect())
            .unwrap_or_default()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        if key.kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                KeyAction::Quit
            }
            KeyCode::Char('c') if has_ctrl => {
                self.should_quit = true;
                KeyAction::Quit
            }
            KeyCode::Char('u') if has_ctrl => {
                self.clear_input();
                KeyAction::None
            }
            KeyCode::Enter => KeyAction::Submit(self.begin_search()),
            KeyCode::Backspace => {
                self.input_pop_char();
                KeyAction::None
            }
            KeyCode::Char(c) if !has_ctrl => {
                self.input_push_char(c);
                KeyAction::None
            }
            _ => KeyAction::None,
        }
    }
}
