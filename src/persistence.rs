// File: src/persistence.rs
use crate::core::types::{RotationState, TierMap};
use crate::error::{HookError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Backing store for the per-tier rotation cursors.
pub trait StateStore {
    /// Current cursors. A store with nothing saved yet returns all zeros.
    fn load(&self) -> Result<RotationState>;

    /// Replaces the stored cursors as a whole.
    fn save(&mut self, state: &RotationState) -> Result<()>;
}

/// On-disk shape of the rotation state. Missing fields read as 0.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct StoredState {
    broad: usize,
    mid: usize,
    niche: usize,
    local: usize,
}

impl From<StoredState> for RotationState {
    fn from(stored: StoredState) -> Self {
        TierMap::new(stored.broad, stored.mid, stored.niche, stored.local)
    }
}

impl From<&RotationState> for StoredState {
    fn from(state: &RotationState) -> Self {
        Self {
            broad: state.broad,
            mid: state.mid,
            niche: state.niche,
            local: state.local,
        }
    }
}

/// Pretty-printed JSON file, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct JsonFileStateStore {
    path: PathBuf,
}

impl JsonFileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStateStore {
    fn load(&self) -> Result<RotationState> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no rotation state yet, starting at zero");
                return Ok(RotationState::default());
            }
            Err(e) => return Err(HookError::io(&self.path, e)),
        };

        let stored: StoredState = serde_json::from_str(&text).map_err(|source| HookError::CorruptState {
            path: self.path.clone(),
            source,
        })?;
        Ok(stored.into())
    }

    fn save(&mut self, state: &RotationState) -> Result<()> {
        let mut bytes =
            serde_json::to_vec_pretty(&StoredState::from(state)).map_err(HookError::StateEncode)?;
        bytes.push(b'\n');
        write_atomically(&self.path, &bytes)
    }
}

/// Keeps the state in memory. Counts saves so callers can check write behavior.
#[derive(Debug, Clone, Default)]
pub struct MemoryStateStore {
    state: RotationState,
    saves: usize,
}

impl MemoryStateStore {
    pub fn new(state: RotationState) -> Self {
        Self { state, saves: 0 }
    }

    pub fn snapshot(&self) -> RotationState {
        self.state.clone()
    }

    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> Result<RotationState> {
        Ok(self.state.clone())
    }

    fn save(&mut self, state: &RotationState) -> Result<()> {
        self.state = state.clone();
        self.saves += 1;
        Ok(())
    }
}

/// Writes `bytes` to a temp file next to `path`, then renames it into place.
/// Readers see either the old file or the complete new one.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent_dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir).map_err(|e| HookError::io(parent_dir, e))?;

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| HookError::io(parent_dir, e))?;
    {
        let mut writer = BufWriter::new(&temp_file);
        writer
            .write_all(bytes)
            .and_then(|()| writer.flush())
            .map_err(|e| HookError::io(temp_file.path(), e))?;
    }
    temp_file
        .persist(path)
        .map_err(|e| HookError::io(path, e.error))?;
    Ok(())
}
