//! Game document storage
//!
//! A game is one document keyed by its six-digit [`GameCode`]. Writes are
//! merge patches applied last-write-wins; subscribers receive the full
//! merged document after every write.

mod local;
mod memory;
mod model;

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;

pub use local::LocalStore;
pub use memory::MemoryStore;
pub use model::{GameCode, GameDocument, GAME_CODE_LEN};

use crate::error::{Error, Result};

/// Keyed document storage for games
pub trait DocumentStore: Send + Sync {
    /// Fetch the current document for a game
    fn get(&self, code: &GameCode) -> Result<Option<GameDocument>>;

    /// Merge a patch into the stored document, creating it if absent.
    /// Returns the merged document.
    fn set_merge(&self, code: &GameCode, patch: GameDocument) -> Result<GameDocument>;

    /// Receive every merged document written for a game from now on
    fn subscribe(&self, code: &GameCode) -> Result<Receiver<GameDocument>>;

    /// Short name for log output
    fn name(&self) -> &'static str;
}

/// Change listeners grouped by game code
#[derive(Default)]
pub(crate) struct Subscribers {
    senders: Mutex<Vec<(GameCode, Sender<GameDocument>)>>,
}

impl Subscribers {
    pub(crate) fn add(&self, code: &GameCode) -> Result<Receiver<GameDocument>> {
        let (tx, rx) = mpsc::channel();
        self.senders
            .lock()
            .map_err(|_| Error::Other("Failed to lock subscribers".into()))?
            .push((code.clone(), tx));
        Ok(rx)
    }

    /// Send a document to every listener of `code`, dropping closed ones
    pub(crate) fn notify(&self, code: &GameCode, doc: &GameDocument) -> Result<()> {
        let mut senders = self
            .senders
            .lock()
            .map_err(|_| Error::Other("Failed to lock subscribers".into()))?;
        senders.retain(|(key, tx)| key != code || tx.send(doc.clone()).is_ok());
        Ok(())
    }
}
