use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{CompState, MatchId};

/// Name of the exported snapshot within the compstate directory
pub const SNAPSHOT_FILE: &str = "snapshot.json";

/// Errors that can occur while loading a snapshot
#[derive(Debug, Error)]
pub enum CompstateError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid snapshot: {0}")]
    Invalid(String),
}

/// Check the cross references a snapshot must satisfy
pub fn validate(state: &CompState) -> Result<(), CompstateError> {
    if let Some(pair) = state.matches.windows(2).find(|pair| pair[0].num > pair[1].num) {
        return Err(CompstateError::Invalid(format!(
            "matches out of order: {} follows {}",
            pair[1].num, pair[0].num
        )));
    }

    let resolve = |id: &MatchId| {
        state.find_match(id).map(|_| ()).ok_or_else(|| {
            CompstateError::Invalid(format!("unknown match {} in arena {}", id.num, id.arena))
        })
    };

    for id in state.knockout_rounds.iter().flatten() {
        resolve(id)?;
    }
    if let Some(id) = &state.tiebreaker {
        resolve(id)?;
    }

    for team in &state.teams {
        if state.location(&team.location).is_none() {
            return Err(CompstateError::Invalid(format!(
                "team {} is based in unknown location {}",
                team.tla, team.location
            )));
        }
    }

    Ok(())
}

/// Read, parse and validate the snapshot held in `root`
pub async fn load_snapshot(root: &Path) -> Result<CompState, CompstateError> {
    let path = root.join(SNAPSHOT_FILE);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|source| CompstateError::Io { path, source })?;

    let state: CompState = serde_json::from_slice(&bytes)?;
    validate(&state)?;
    Ok(state)
}

async fn modified(root: &Path) -> Option<SystemTime> {
    let metadata = tokio::fs::metadata(root.join(SNAPSHOT_FILE)).await.ok()?;
    metadata.modified().ok()
}

struct Loaded {
    state: Arc<CompState>,
    modified: Option<SystemTime>,
}

/// Shared, read-only handle on the current snapshot
///
/// Each call to [`get`](Self::get) checks whether the snapshot file has
/// changed on disk and, if so, replaces the whole snapshot. Callers keep the
/// `Arc` they were handed for as long as they need it.
pub struct CompstateManager {
    root: PathBuf,
    loaded: RwLock<Loaded>,
}

impl CompstateManager {
    /// Load the initial snapshot from `root`
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, CompstateError> {
        let root = root.into();
        let modified = modified(&root).await;
        let state = load_snapshot(&root).await?;

        tracing::info!(
            "Loaded compstate {} from {} ({} matches, {} teams)",
            state.state,
            root.display(),
            state.matches.len(),
            state.teams.len()
        );

        Ok(Self {
            root,
            loaded: RwLock::new(Loaded {
                state: Arc::new(state),
                modified,
            }),
        })
    }

    /// Serve an already-built snapshot
    ///
    /// A snapshot file already present in `root` does not replace `state`
    /// until it is modified.
    pub fn from_state(root: impl Into<PathBuf>, state: CompState) -> Self {
        let root = root.into();
        let modified = std::fs::metadata(root.join(SNAPSHOT_FILE))
            .and_then(|m| m.modified())
            .ok();

        Self {
            root,
            loaded: RwLock::new(Loaded {
                state: Arc::new(state),
                modified,
            }),
        }
    }

    /// Directory holding the snapshot and its assets
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Current snapshot, reloading it first if the file has changed
    pub async fn get(&self) -> Arc<CompState> {
        let on_disk = modified(&self.root).await;

        {
            let loaded = self.loaded.read().await;
            if on_disk.is_none() || on_disk == loaded.modified {
                return Arc::clone(&loaded.state);
            }
        }

        let mut loaded = self.loaded.write().await;
        self.refresh(&mut loaded).await;
        Arc::clone(&loaded.state)
    }

    /// Reload into `loaded` if the file differs from what it was loaded from
    ///
    /// The mtime is sampled here, under the write lock, so a reload finished
    /// by another request while this one waited is not undone.
    async fn refresh(&self, loaded: &mut Loaded) {
        let on_disk = match modified(&self.root).await {
            Some(on_disk) if Some(on_disk) != loaded.modified => on_disk,
            _ => return,
        };

        match load_snapshot(&self.root).await {
            Ok(state) => {
                tracing::info!(
                    "Reloaded compstate {} (was {})",
                    state.state,
                    loaded.state.state
                );
                loaded.state = Arc::new(state);
            }
            Err(e) => {
                tracing::error!(
                    "Failed to reload compstate, keeping {}: {}",
                    loaded.state.state,
                    e
                );
            }
        }
        // Remember the attempt either way so a broken file is not re-read per request
        loaded.modified = Some(on_disk);
    }
}
