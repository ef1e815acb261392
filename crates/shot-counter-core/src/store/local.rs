//! File-backed document store

use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use std::sync::Mutex;

use chrono::Utc;

use super::{DocumentStore, GameCode, GameDocument, Subscribers};
use crate::error::{Error, Result};

/// Store that keeps one pretty-printed JSON file per game in a directory.
///
/// Every writer sharing the directory sees the same documents; subscriptions
/// only observe writes made through this instance.
pub struct LocalStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
    subscribers: Subscribers,
}

impl LocalStore {
    /// Open a store rooted at `dir`, creating it if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        tracing::debug!("Opened game store at {}", dir.display());
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
            subscribers: Subscribers::default(),
        })
    }

    /// Directory holding the game files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, code: &GameCode) -> PathBuf {
        self.dir.join(format!("{}.json", code))
    }

    fn load(&self, code: &GameCode) -> Result<StoredFile> {
        let path = self.path_for(code);
        if !path.exists() {
            return Ok(StoredFile::Missing);
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(match serde_json::from_str(&content) {
            Ok(doc) => StoredFile::Parsed(doc),
            Err(e) => {
                tracing::warn!("Unreadable game file {}: {}", path.display(), e);
                StoredFile::Unreadable
            }
        })
    }

    /// Move an unreadable game file out of the way so a write never
    /// replaces it
    fn set_aside(&self, code: &GameCode) -> Result<()> {
        let backup = self.dir.join(format!(
            "{}.json.{}.bad",
            code,
            Utc::now().timestamp_millis()
        ));
        std::fs::rename(self.path_for(code), &backup)?;
        tracing::warn!("Moved unreadable game {} to {}", code, backup.display());
        Ok(())
    }

    /// Codes of every game stored in the directory
    pub fn codes(&self) -> Result<Vec<GameCode>> {
        let mut codes: Vec<GameCode> = std::fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension()? != "json" {
                    return None;
                }
                GameCode::parse(path.file_stem()?.to_str()?).ok()
            })
            .collect();
        codes.sort();
        Ok(codes)
    }
}

/// What was found on disk for a game code
enum StoredFile {
    Missing,
    Parsed(GameDocument),
    Unreadable,
}

impl DocumentStore for LocalStore {
    fn get(&self, code: &GameCode) -> Result<Option<GameDocument>> {
        match self.load(code)? {
            StoredFile::Parsed(doc) => Ok(Some(doc)),
            StoredFile::Missing | StoredFile::Unreadable => Ok(None),
        }
    }

    fn set_merge(&self, code: &GameCode, patch: GameDocument) -> Result<GameDocument> {
        let merged = {
            let _guard = self
                .write_lock
                .lock()
                .map_err(|_| Error::Other("Failed to lock game store".into()))?;
            let mut doc = match self.load(code)? {
                StoredFile::Parsed(doc) => doc,
                StoredFile::Missing => GameDocument::default(),
                StoredFile::Unreadable => {
                    self.set_aside(code)?;
                    GameDocument::default()
                }
            };
            doc.merge(patch, Utc::now());
            let content = serde_json::to_string_pretty(&doc)?;
            std::fs::write(self.path_for(code), content)?;
            doc
        };
        tracing::trace!("Wrote game {} to {}", code, self.dir.display());
        self.subscribers.notify(code, &merged)?;
        Ok(merged)
    }

    fn subscribe(&self, code: &GameCode) -> Result<Receiver<GameDocument>> {
        self.subscribers.add(code)
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn code() -> GameCode {
        GameCode::parse("424242").unwrap()
    }

    #[test]
    fn test_round_trip_through_disk() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        store.set_merge(&code(), GameDocument::name_only("Finals")).unwrap();

        let reopened = LocalStore::open(dir.path()).unwrap();
        let doc = reopened.get(&code()).unwrap().unwrap();
        assert_eq!(doc.game_name.as_deref(), Some("Finals"));
        assert!(doc.last_updated.is_some());
        assert_eq!(reopened.codes().unwrap(), vec![code()]);
    }

    #[test]
    fn test_corrupt_file_reads_as_missing() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("424242.json"), "{not json").unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        assert!(store.get(&code()).unwrap().is_none());

        // The next write keeps the old bytes in a backup next to the new file
        store.set_merge(&code(), GameDocument::name_only("Fresh")).unwrap();
        assert!(store.get(&code()).unwrap().is_some());

        let backups: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "bad"))
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(std::fs::read_to_string(&backups[0]).unwrap(), "{not json");
        assert_eq!(store.codes().unwrap(), vec![code()]);
    }

    #[test]
    fn test_damaged_shot_keeps_other_players() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("424242.json"),
            r#"{"homePlayers": [
                {"id": "a", "number": 1, "shots": [{"id": "s1", "result": "made", "type": "2pt"}]},
                {"id": "b", "number": 2, "shots": [{"result": "missed", "type": "3pt"}]}
            ]}"#,
        )
        .unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        let roster = store.get(&code()).unwrap().unwrap().roster().unwrap();
        assert_eq!(roster.home.len(), 2);
        assert_eq!(roster.home[1].shots.len(), 1);

        let merged = store.set_merge(&code(), GameDocument::name_only("Named")).unwrap();
        assert_eq!(merged.roster().unwrap().home.len(), 2);
    }

    #[test]
    fn test_codes_ignores_other_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();
        std::fs::write(dir.path().join("abc.json"), "{}").unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        assert!(store.codes().unwrap().is_empty());
    }

    #[test]
    fn test_subscribe_sees_writes() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        let rx = store.subscribe(&code()).unwrap();
        store.set_merge(&code(), GameDocument::name_only("Live")).unwrap();
        assert_eq!(rx.try_recv().unwrap().game_name.as_deref(), Some("Live"));
    }
}
