//! # Search Dispatch
//!
//! Bridges the synchronous event loop and the async lookup client.
//!
//! Every submit spawns one task; the task reports back over an unbounded
//! channel and the loop drains it with [`SearchDispatcher::pump`] before each
//! draw. Nothing is cancelled and nothing is sequence-checked: outcomes are
//! applied in the order they arrive.

use crate::api::{CreatureRecord, LookupError, PokeApiClient, SpriteArt};
use crate::ui::app::App;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tracing::debug;

/// A finished background request.
#[derive(Debug)]
pub enum LookupEvent {
    Creature(Result<CreatureRecord, LookupError>),
    Sprite {
        url: String,
        result: Result<SpriteArt, LookupError>,
    },
}

pub struct SearchDispatcher {
    client: PokeApiClient,
    tx: UnboundedSender<LookupEvent>,
    rx: UnboundedReceiver<LookupEvent>,
}

impl SearchDispatcher {
    pub fn new(client: PokeApiClient) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { client, tx, rx }
    }

    /// Start a search for the app's current query.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, app: &mut App) {
        let key = app.begin_search();
        self.spawn_lookup(key);
    }

    /// Issue the lookup for an already prepared key (see [`App::begin_search`]).
    pub fn spawn_lookup(&self, key: String) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.lookup(&key).await;
            // The receiver only goes away when the UI is shutting down.
            let _ = tx.send(LookupEvent::Creature(result));
        });
    }

    fn spawn_sprite(&self, url: String) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_sprite(&url).await;
            let _ = tx.send(LookupEvent::Sprite { url, result });
        });
    }

    /// Apply one finished request to the app, fetching the sprite of a newly
    /// found creature.
    pub fn apply(&self, app: &mut App, event: LookupEvent) {
        match event {
            LookupEvent::Creature(result) => {
                if let Some(url) = app.finish_search(result) {
                    debug!(%url, "fetching sprite");
                    self.spawn_sprite(url);
                }
            }
            LookupEvent::Sprite { url, result } => app.apply_sprite(&url, result),
        }
    }

    /// Drain every request that finished since the last call.
    pub fn pump(&mut self, app: &mut App) {
        loop {
            match self.rx.try_recv() {
                Ok(event) => self.apply(app, event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    /// Wait for the next finished request.
    pub async fn next_event(&mut self) -> Option<LookupEvent> {
        self.rx.recv().await
    }
}
