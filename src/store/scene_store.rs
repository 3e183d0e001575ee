// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::{DiagramElement, Scene};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("json error at {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("scene file {path:?} does not contain a JSON array")]
    NotAnArray { path: PathBuf },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Temp file + atomic rename, no fsync.
    #[default]
    BestEffort,

    /// Additionally fsyncs the written file and its directory where the platform allows.
    Durable,
}

/// What a mutation left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationReceipt {
    pub revision: u64,
    pub len: usize,
    /// `false` when the disk write failed; the in-memory mutation still stands.
    pub persisted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedScene {
    pub scene: Scene,
    /// Entries of the array that did not decode as elements.
    pub skipped: usize,
}

#[derive(Debug)]
struct StoreState {
    scene: Scene,
    revision: u64,
}

/// The one canonical scene, guarded by a single lock.
///
/// Every mutation rewrites the scene file before the lock is released, so no reader can see a
/// state whose write has not finished. Write failures are logged and reported in the receipt,
/// never rolled back.
#[derive(Debug)]
pub struct SceneStore {
    path: PathBuf,
    durability: WriteDurability,
    state: Mutex<StoreState>,
}

impl SceneStore {
    /// Opens the store at `path`, loading whatever is there. A missing or unreadable file yields
    /// an empty scene.
    pub fn open(path: impl Into<PathBuf>, durability: WriteDurability) -> Self {
        let path = path.into();
        let scene = match load_scene(&path) {
            Ok(LoadedScene { scene, skipped }) => {
                if skipped > 0 {
                    tracing::warn!(path = %path.display(), skipped, "skipped undecodable elements");
                }
                tracing::info!(path = %path.display(), elements = scene.len(), "loaded scene");
                scene
            }
            Err(err) if err.is_not_found() => {
                tracing::info!(path = %path.display(), "no scene file yet, starting fresh");
                Scene::default()
            }
            Err(err) => {
                tracing::warn!(error = %err, "cannot load scene file, starting fresh");
                Scene::default()
            }
        };

        Self { path, durability, state: Mutex::new(StoreState { scene, revision: 0 }) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// An independent copy of the current scene.
    pub fn get(&self) -> Scene {
        self.lock().scene.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().scene.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn revision(&self) -> u64 {
        self.lock().revision
    }

    pub fn replace_all(&self, elements: Vec<DiagramElement>) -> MutationReceipt {
        self.mutate(|scene| *scene = Scene::new(elements))
    }

    pub fn append(&self, element: DiagramElement) -> MutationReceipt {
        self.mutate(|scene| scene.elements_mut().push(element))
    }

    pub fn clear(&self) -> MutationReceipt {
        self.mutate(|scene| scene.elements_mut().clear())
    }

    fn mutate(&self, apply: impl FnOnce(&mut Scene)) -> MutationReceipt {
        let mut state = self.lock();
        apply(&mut state.scene);
        state.revision += 1;

        let persisted = match save_scene(&self.path, &state.scene, self.durability) {
            Ok(()) => {
                tracing::debug!(
                    path = %self.path.display(),
                    elements = state.scene.len(),
                    "saved scene"
                );
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "cannot persist scene; keeping in-memory state");
                false
            }
        };

        MutationReceipt { revision: state.revision, len: state.scene.len(), persisted }
    }
}

/// Reads a scene file: a JSON array of element objects.
pub fn load_scene(path: &Path) -> Result<LoadedScene, StoreError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| StoreError::Io { path: path.to_path_buf(), source })?;
    decode_scene(path, &raw)
}

/// Writes the whole scene as a pretty-printed JSON array, atomically replacing `path`.
pub fn save_scene(
    path: &Path,
    scene: &Scene,
    durability: WriteDurability,
) -> Result<(), StoreError> {
    let mut json = serde_json::to_vec_pretty(scene.elements())
        .map_err(|source| StoreError::Json { path: path.to_path_buf(), source })?;
    json.push(b'\n');
    write_atomic(path, &json, durability)
}

// Decoding and atomic-write helpers for `SceneStore`.
include!("scene_store/helpers.rs");
