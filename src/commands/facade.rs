// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::str::FromStr;
use std::sync::Arc;

use super::{
    demo_scene, CommandError, CommandOutcome, IdSequence, InputError, CREATED_ELEMENT_HEIGHT,
    CREATED_ELEMENT_WIDTH,
};
use crate::broadcast::SceneObserver;
use crate::compile::{compile, CompileOptions, CompileOutcome};
use crate::model::{DiagramElement, ElementKind};
use crate::ratelimit::{RateLimiter, GLOBAL_KEY};
use crate::store::{MutationReceipt, SceneStore};

/// Composes compiler, store, limiter and broadcast signal behind the command operations.
///
/// Safe to share across threads; every operation takes `&self`.
pub struct SceneCommands {
    store: Arc<SceneStore>,
    limiter: RateLimiter,
    compile: CompileOptions,
    observer: Arc<dyn SceneObserver>,
    ids: IdSequence,
}

impl std::fmt::Debug for SceneCommands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneCommands")
            .field("store", &self.store.path())
            .field("limiter", &self.limiter)
            .field("compile", &self.compile)
            .finish_non_exhaustive()
    }
}

impl SceneCommands {
    pub fn new(
        store: Arc<SceneStore>,
        limiter: RateLimiter,
        compile: CompileOptions,
        observer: Arc<dyn SceneObserver>,
    ) -> Self {
        Self { store, limiter, compile, observer, ids: IdSequence::default() }
    }

    pub fn store(&self) -> &Arc<SceneStore> {
        &self.store
    }

    /// Replaces the whole scene with the diagram compiled from `description`.
    ///
    /// Rate limited. A description that yields no edges answers `EmptyDiagram` and leaves the
    /// scene as it was.
    pub fn generate_diagram(&self, description: &str) -> Result<CommandOutcome, CommandError> {
        self.guarded("generate diagram", || {
            self.limiter.check(GLOBAL_KEY)?;
            tracing::info!(chars = description.chars().count(), "generate_diagram");

            match compile(description, &self.compile)? {
                CompileOutcome::Empty => {
                    tracing::info!("description produced no edges; scene unchanged");
                    Ok(CommandOutcome::EmptyDiagram)
                }
                CompileOutcome::Diagram(diagram) => {
                    tracing::debug!(
                        nodes = diagram.graph().nodes().len(),
                        edges = diagram.graph().edges().len(),
                        "compiled diagram"
                    );
                    let elements = diagram.into_elements();
                    let count = elements.len();
                    self.commit(self.store.replace_all(elements));
                    Ok(CommandOutcome::Generated { elements: count })
                }
            }
        })
    }

    /// Appends one shape or text element with the default size and style.
    pub fn create_element(
        &self,
        kind: &str,
        text: &str,
        x: f64,
        y: f64,
    ) -> Result<CommandOutcome, CommandError> {
        self.guarded("create element", || {
            let kind =
                ElementKind::from_str(kind).map_err(|err| InputError::UnknownKind(err.0))?;
            if kind.is_connector() {
                return Err(InputError::ArrowKind.into());
            }
            if !x.is_finite() || !y.is_finite() {
                return Err(InputError::NonFiniteCoordinate.into());
            }

            let id = self.ids.next_id("el");
            tracing::info!(%kind, %id, x, y, "create_element");
            let element = DiagramElement::shape(
                &id,
                kind,
                x,
                y,
                CREATED_ELEMENT_WIDTH,
                CREATED_ELEMENT_HEIGHT,
            )
            .with_text(text);
            self.commit(self.store.append(element));
            Ok(CommandOutcome::Created { id })
        })
    }

    /// Appends an arrow between two element ids.
    ///
    /// The endpoints are not looked up: an arrow naming a missing element is stored as given and
    /// stays out of broadcast snapshots until both ends resolve.
    pub fn connect_elements(
        &self,
        from_id: &str,
        to_id: &str,
        label: Option<&str>,
    ) -> Result<CommandOutcome, CommandError> {
        self.guarded("connect elements", || {
            let (from_id, to_id) = (from_id.trim(), to_id.trim());
            if from_id.is_empty() || to_id.is_empty() {
                return Err(InputError::EmptyId.into());
            }

            let id = self.ids.next_id("arrow");
            tracing::info!(%id, from = from_id, to = to_id, "connect_elements");
            let arrow = DiagramElement::arrow(&id, from_id, to_id)
                .with_label(label.filter(|l| !l.is_empty()).map(str::to_owned));
            self.commit(self.store.append(arrow));
            Ok(CommandOutcome::Connected { id })
        })
    }

    pub fn clear_scene(&self) -> Result<CommandOutcome, CommandError> {
        self.guarded("clear scene", || {
            tracing::info!("clear_scene");
            self.commit(self.store.clear());
            Ok(CommandOutcome::Cleared)
        })
    }

    /// Replaces the scene with the canned service chain. Not rate limited.
    pub fn load_demo_scene(&self) -> Result<CommandOutcome, CommandError> {
        self.guarded("load demo scene", || {
            let elements = demo_scene();
            let count = elements.len();
            self.commit(self.store.replace_all(elements));
            tracing::info!(elements = count, "demo scene queued");
            Ok(CommandOutcome::DemoLoaded { elements: count })
        })
    }

    fn commit(&self, receipt: MutationReceipt) {
        tracing::debug!(
            revision = receipt.revision,
            elements = receipt.len,
            persisted = receipt.persisted,
            "scene mutated"
        );
        self.observer.scene_changed();
    }

    fn guarded<T>(
        &self,
        operation: &'static str,
        run: impl FnOnce() -> Result<T, CommandError>,
    ) -> Result<T, CommandError> {
        match catch_unwind(AssertUnwindSafe(run)) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                tracing::warn!(operation, error = %err, "command rejected");
                Err(err)
            }
            Err(_) => {
                tracing::error!(operation, "command panicked");
                Err(CommandError::Internal { operation })
            }
        }
    }
}
