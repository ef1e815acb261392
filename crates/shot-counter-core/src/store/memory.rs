//! In-process document store

use std::collections::HashMap;
use std::sync::mpsc::Receiver;
use std::sync::Mutex;

use chrono::Utc;

use super::{DocumentStore, GameCode, GameDocument, Subscribers};
use crate::error::{Error, Result};

/// Store that keeps documents in memory for the life of the process
#[derive(Default)]
pub struct MemoryStore {
    docs: Mutex<HashMap<GameCode, GameDocument>>,
    subscribers: Subscribers,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, code: &GameCode) -> Result<Option<GameDocument>> {
        let docs = self
            .docs
            .lock()
            .map_err(|_| Error::Other("Failed to lock documents".into()))?;
        Ok(docs.get(code).cloned())
    }

    fn set_merge(&self, code: &GameCode, patch: GameDocument) -> Result<GameDocument> {
        let merged = {
            let mut docs = self
                .docs
                .lock()
                .map_err(|_| Error::Other("Failed to lock documents".into()))?;
            let doc = docs.entry(code.clone()).or_default();
            doc.merge(patch, Utc::now());
            doc.clone()
        };
        self.subscribers.notify(code, &merged)?;
        Ok(merged)
    }

    fn subscribe(&self, code: &GameCode) -> Result<Receiver<GameDocument>> {
        self.subscribers.add(code)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
