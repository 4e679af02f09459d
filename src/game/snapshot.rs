//! Game snapshots for stop-and-resume
//!
//! A snapshot is the whole `GameState`, RNG included, so a restored match
//! shuffles exactly as the original would have. Stores are keyed by room.

use crate::core::RoomId;
use crate::game::state::GameState;
use crate::Result;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Format version written into every snapshot
pub const SNAPSHOT_VERSION: u32 = 1;

/// A saved match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub version: u32,
    pub room: RoomId,
    pub game_state: GameState,
}

impl GameSnapshot {
    /// Wrap a state for saving; undrained events are dropped
    pub fn new(mut game_state: GameState) -> Self {
        game_state.log.drain();
        GameSnapshot {
            version: SNAPSHOT_VERSION,
            room: game_state.room.clone(),
            game_state,
        }
    }

    /// Save this snapshot to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Load a snapshot from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let snapshot = serde_json::from_str(&json)?;
        Ok(snapshot)
    }
}

/// Persistence seam for the session layer
///
/// The engine never calls a store itself; whoever owns the room decides
/// when to save.
pub trait SnapshotStore {
    fn load(&self, room: &RoomId) -> Result<Option<GameState>>;

    fn save(&mut self, state: &GameState) -> Result<()>;

    /// Forget a room; removing an unknown room is not an error
    fn remove(&mut self, room: &RoomId) -> Result<()>;
}

/// In-process store, mostly for tests and single-process servers
#[derive(Debug, Default)]
pub struct MemoryStore {
    rooms: FxHashMap<RoomId, GameSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, room: &RoomId) -> Result<Option<GameState>> {
        Ok(self.rooms.get(room).map(|s| s.game_state.clone()))
    }

    fn save(&mut self, state: &GameState) -> Result<()> {
        self.rooms.insert(state.room.clone(), GameSnapshot::new(state.clone()));
        Ok(())
    }

    fn remove(&mut self, room: &RoomId) -> Result<()> {
        self.rooms.remove(room);
        Ok(())
    }
}

/// One pretty-printed JSON file per room inside a directory
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    /// Use `dir` for snapshots, creating it if needed
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        std::fs::create_dir_all(dir.as_ref())?;
        Ok(JsonDirStore {
            dir: dir.as_ref().to_path_buf(),
        })
    }

    /// File a room is stored in
    ///
    /// Anything outside `[A-Za-z0-9_-]` becomes `_` so a room id can never
    /// escape the directory.
    pub fn path_for(&self, room: &RoomId) -> PathBuf {
        let stem: String = room
            .as_str()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{stem}.json"))
    }
}

impl SnapshotStore for JsonDirStore {
    fn load(&self, room: &RoomId) -> Result<Option<GameState>> {
        let path = self.path_for(room);
        if !path.exists() {
            return Ok(None);
        }
        let snapshot = GameSnapshot::load_from_file(&path)?;
        Ok(Some(snapshot.game_state))
    }

    fn save(&mut self, state: &GameState) -> Result<()> {
        GameSnapshot::new(state.clone()).save_to_file(self.path_for(&state.room))
    }

    fn remove(&mut self, room: &RoomId) -> Result<()> {
        let path = self.path_for(room);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Intent;

    fn started(room: &str) -> GameState {
        let mut game = GameState::with_seed(room, 5);
        game.add_participant("Alice", None).unwrap();
        game.add_participant("Bob", None).unwrap();
        game.start_match().unwrap();
        game
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        let game = started("room-1");
        store.save(&game).unwrap();
        assert_eq!(store.len(), 1);

        let loaded = store.load(&game.room).unwrap().unwrap();
        assert_eq!(loaded.players[0].hand, game.players[0].hand);

        store.remove(&game.room).unwrap();
        assert!(store.load(&game.room).unwrap().is_none());
        assert!(store.remove(&game.room).is_ok());
    }

    #[test]
    fn test_json_dir_store_resumes_identically() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonDirStore::new(dir.path()).unwrap();
        let mut game = started("room-2");
        store.save(&game).unwrap();

        let mut restored = store.load(&game.room).unwrap().unwrap();
        let actor = game.current_player_id().unwrap();
        game.apply(actor, Intent::Draw).unwrap();
        restored.apply(actor, Intent::Draw).unwrap();

        let idx = game.player_idx(actor).unwrap();
        assert_eq!(game.players[idx].hand, restored.players[idx].hand);
        assert_eq!(game.draw_pile.cards, restored.draw_pile.cards);
        assert!(restored.check_conservation().is_ok());
    }

    #[test]
    fn test_snapshot_leaves_out_undrained_events() {
        let mut store = MemoryStore::new();
        let game = started("room-3");
        assert!(!game.log.is_empty());
        store.save(&game).unwrap();

        let loaded = store.load(&game.room).unwrap().unwrap();
        assert!(loaded.log.is_empty());
        let json = serde_json::to_value(GameSnapshot::new(game)).unwrap();
        assert!(json["game_state"]["log"].get("events").is_none());
    }

    #[test]
    fn test_json_dir_store_missing_room() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDirStore::new(dir.path()).unwrap();
        assert!(store.load(&RoomId::new("nobody")).unwrap().is_none());
    }

    #[test]
    fn test_room_id_cannot_escape_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDirStore::new(dir.path()).unwrap();
        let path = store.path_for(&RoomId::new("../etc/passwd"));
        assert_eq!(path.parent(), Some(dir.path()));
        assert_eq!(path.file_name().unwrap(), "___etc_passwd.json");
    }
}
