// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::{status_line, CommandError, CommandOutcome, InputError, SceneCommands, DEMO_PARTS};
use crate::broadcast::SceneObserver;
use crate::compile::{CompileError, CompileOptions};
use crate::model::ElementKind;
use crate::ratelimit::RateLimiter;
use crate::store::{SceneStore, WriteDurability};

#[derive(Debug, Default)]
struct CountingObserver {
    changes: AtomicUsize,
}

impl SceneObserver for CountingObserver {
    fn scene_changed(&self) {
        self.changes.fetch_add(1, Ordering::SeqCst);
    }
}

impl CountingObserver {
    fn count(&self) -> usize {
        self.changes.load(Ordering::SeqCst)
    }
}

struct PanickingObserver;

impl SceneObserver for PanickingObserver {
    fn scene_changed(&self) {
        panic!("observer blew up");
    }
}

struct CommandsTestCtx {
    _tmp: TempDir,
    store: Arc<SceneStore>,
    observer: Arc<CountingObserver>,
    commands: SceneCommands,
}

impl CommandsTestCtx {
    fn with_limits(max_calls: usize, max_elements: usize) -> Self {
        let tmp = tempfile::tempdir().expect("temp dir");
        let store = Arc::new(SceneStore::open(
            tmp.path().join("diagrams.json"),
            WriteDurability::BestEffort,
        ));
        let observer = Arc::new(CountingObserver::default());
        let commands = SceneCommands::new(
            store.clone(),
            RateLimiter::new(max_calls, Duration::from_secs(60)),
            CompileOptions { max_elements },
            observer.clone(),
        );
        Self { _tmp: tmp, store, observer, commands }
    }
}

#[fixture]
fn ctx() -> CommandsTestCtx {
    CommandsTestCtx::with_limits(60, 1000)
}

#[rstest]
fn generate_replaces_scene_and_notifies(ctx: CommandsTestCtx) {
    ctx.commands.create_element("rectangle", "Old", 0.0, 0.0).expect("create");

    let outcome = ctx
        .commands
        .generate_diagram("User connects to API which interacts with Database")
        .expect("generate");
    assert_eq!(outcome, CommandOutcome::Generated { elements: 5 });
    assert_eq!(outcome.to_string(), "Generated diagram with 5 elements.");

    let scene = ctx.store.get();
    assert_eq!(scene.len(), 5);
    assert!(scene.elements().iter().all(|el| el.text.as_deref() != Some("Old")));
    assert_eq!(scene.get("node-2").map(|el| el.kind), Some(ElementKind::Ellipse));
    assert_eq!(ctx.observer.count(), 2);
}

#[rstest]
fn generating_twice_yields_the_same_scene(ctx: CommandsTestCtx) {
    let text = "Client -> Gateway -> Orders Service. Orders depends on Database";
    ctx.commands.generate_diagram(text).expect("first");
    let first = ctx.store.get();
    ctx.commands.generate_diagram(text).expect("second");
    assert_eq!(ctx.store.get(), first);
}

#[rstest]
fn empty_diagram_leaves_scene_untouched(ctx: CommandsTestCtx) {
    ctx.commands.create_element("ellipse", "Keep", 10.0, 20.0).expect("create");
    let before = ctx.store.get();

    let outcome = ctx.commands.generate_diagram("nothing relates to anything here").expect("ok");
    assert_eq!(outcome, CommandOutcome::EmptyDiagram);
    assert_eq!(outcome.to_string(), "Empty diagram");
    assert_eq!(ctx.store.get(), before);
    assert_eq!(ctx.observer.count(), 1);
}

#[rstest]
#[case("", "Error: Description cannot be empty")]
#[case("   \n\t ", "Error: Description cannot be empty")]
fn blank_descriptions_are_input_errors(
    ctx: CommandsTestCtx,
    #[case] description: &str,
    #[case] expected: &str,
) {
    let result = ctx.commands.generate_diagram(description);
    assert!(matches!(
        result,
        Err(CommandError::Input(InputError::Compile(CompileError::EmptyDescription)))
    ));
    assert_eq!(status_line(&result), expected);
    assert_eq!(ctx.observer.count(), 0);
}

#[rstest]
fn overlong_description_is_rejected(ctx: CommandsTestCtx) {
    let text = "A -> B ".repeat(2_000);
    let result = ctx.commands.generate_diagram(&text);
    assert_eq!(status_line(&result), "Error: Description too long (max 10000 characters)");
    assert!(ctx.store.get().is_empty());
}

#[test]
fn element_cap_is_enforced() {
    let ctx = CommandsTestCtx::with_limits(60, 4);
    let result = ctx.commands.generate_diagram("A -> B -> C");
    assert_eq!(status_line(&result), "Error: Too many elements generated (5 > 4)");
    assert!(ctx.store.get().is_empty());
}

#[test]
fn rate_limit_rejects_the_call_after_the_cap() {
    let ctx = CommandsTestCtx::with_limits(3, 1000);
    for n in 0..3 {
        ctx.commands.generate_diagram(&format!("A{n} -> B{n}")).expect("admitted");
    }
    let admitted = ctx.store.get();

    let result = ctx.commands.generate_diagram("X -> Y");
    assert!(matches!(result, Err(CommandError::RateLimited(_))));
    assert_eq!(
        status_line(&result),
        "Error: Rate limit exceeded. Please wait before making another request."
    );
    assert_eq!(ctx.store.get(), admitted);
}

#[test]
fn rate_limit_applies_before_input_validation() {
    let ctx = CommandsTestCtx::with_limits(1, 1000);
    ctx.commands.generate_diagram("").unwrap_err();
    let result = ctx.commands.generate_diagram("");
    assert!(matches!(result, Err(CommandError::RateLimited(_))));
}

#[test]
fn other_commands_are_not_rate_limited() {
    let ctx = CommandsTestCtx::with_limits(1, 1000);
    for n in 0..5 {
        ctx.commands.create_element("text", &format!("t{n}"), 0.0, 0.0).expect("create");
    }
    ctx.commands.clear_scene().expect("clear");
    ctx.commands.load_demo_scene().expect("demo");
}

#[rstest]
#[case("rectangle", ElementKind::Rectangle)]
#[case("Ellipse", ElementKind::Ellipse)]
#[case(" DIAMOND ", ElementKind::Diamond)]
#[case("text", ElementKind::Text)]
fn create_element_appends_a_default_sized_shape(
    ctx: CommandsTestCtx,
    #[case] kind: &str,
    #[case] expected: ElementKind,
) {
    let outcome = ctx.commands.create_element(kind, "Cache", 12.5, -4.0).expect("create");
    let CommandOutcome::Created { id } = &outcome else {
        panic!("unexpected outcome {outcome:?}");
    };
    assert!(id.starts_with("el-"));
    assert_eq!(outcome.to_string(), format!("Created element {id}"));

    let scene = ctx.store.get();
    let element = scene.get(id).expect("stored");
    assert_eq!(element.kind, expected);
    assert_eq!((element.x, element.y), (12.5, -4.0));
    assert_eq!((element.width, element.height), (Some(120.0), Some(60.0)));
    assert_eq!(element.text.as_deref(), Some("Cache"));
    assert_eq!(element.style.fill_style.as_deref(), Some("hachure"));
}

#[rstest]
#[case("arrow", 0.0)]
#[case("hexagon", 0.0)]
#[case("rectangle", f64::NAN)]
#[case("rectangle", f64::INFINITY)]
fn create_element_rejects_bad_input(ctx: CommandsTestCtx, #[case] kind: &str, #[case] x: f64) {
    let result = ctx.commands.create_element(kind, "Nope", x, 0.0);
    assert!(matches!(result, Err(CommandError::Input(_))), "got {result:?}");
    assert!(ctx.store.get().is_empty());
    assert_eq!(ctx.observer.count(), 0);
}

#[rstest]
fn connect_elements_stores_unchecked_arrows(ctx: CommandsTestCtx) {
    let outcome =
        ctx.commands.connect_elements("ghost-a", "ghost-b", Some("calls")).expect("connect");
    let CommandOutcome::Connected { id } = &outcome else {
        panic!("unexpected outcome {outcome:?}");
    };
    assert!(id.starts_with("arrow-"));
    assert_eq!(outcome.to_string(), format!("Connected elements with arrow {id}."));

    let scene = ctx.store.get();
    let arrow = scene.get(id).expect("stored");
    assert_eq!(arrow.endpoints(), Some(("ghost-a", "ghost-b")));
    assert_eq!(arrow.label.as_deref(), Some("calls"));
    // Stored, but hidden from viewers until both ends exist.
    assert!(scene.resolved_elements().is_empty());
}

#[rstest]
#[case("", "b")]
#[case("a", "  ")]
fn connect_elements_rejects_empty_ids(ctx: CommandsTestCtx, #[case] from: &str, #[case] to: &str) {
    let result = ctx.commands.connect_elements(from, to, None);
    assert_eq!(result, Err(CommandError::Input(InputError::EmptyId)));
}

#[rstest]
fn clear_scene_empties_and_notifies(ctx: CommandsTestCtx) {
    ctx.commands.load_demo_scene().expect("demo");
    let outcome = ctx.commands.clear_scene().expect("clear");
    assert_eq!(outcome.to_string(), "Scene cleared.");
    assert!(ctx.store.get().is_empty());
    assert_eq!(ctx.observer.count(), 2);
}

#[rstest]
fn demo_scene_is_a_resolved_chain(ctx: CommandsTestCtx) {
    let outcome = ctx.commands.load_demo_scene().expect("demo");
    let expected = DEMO_PARTS.len() * 2 - 1;
    assert_eq!(outcome.to_string(), format!("Demo scene with {expected} elements queued"));

    let scene = ctx.store.get();
    assert_eq!(scene.len(), expected);
    assert_eq!(scene.resolved_elements().len(), expected);
    assert_eq!(scene.get("demo-node-6").and_then(|el| el.text.as_deref()), Some("Database"));
}

#[rstest]
fn concurrent_creates_lose_nothing(ctx: CommandsTestCtx) {
    const CALLERS: usize = 16;

    ctx.commands.create_element("rectangle", "seed", 0.0, 0.0).expect("seed");
    let commands = &ctx.commands;
    let ids = std::thread::scope(|scope| {
        let handles = (0..CALLERS)
            .map(|n| {
                scope.spawn(move || {
                    match commands.create_element("rectangle", &format!("n{n}"), n as f64, 0.0) {
                        Ok(CommandOutcome::Created { id }) => id,
                        other => panic!("unexpected {other:?}"),
                    }
                })
            })
            .collect::<Vec<_>>();
        handles.into_iter().map(|h| h.join().expect("join")).collect::<Vec<_>>()
    });

    let unique = ids.iter().collect::<std::collections::HashSet<_>>();
    assert_eq!(unique.len(), CALLERS);
    assert_eq!(ctx.store.len(), CALLERS + 1);
    assert_eq!(ctx.observer.count(), CALLERS + 1);
}

#[test]
fn panics_become_internal_errors() {
    let tmp = tempfile::tempdir().expect("temp dir");
    let store =
        Arc::new(SceneStore::open(tmp.path().join("diagrams.json"), WriteDurability::BestEffort));
    let commands = SceneCommands::new(
        store,
        RateLimiter::new(10, Duration::from_secs(60)),
        CompileOptions::default(),
        Arc::new(PanickingObserver),
    );

    let result = commands.clear_scene();
    assert_eq!(result, Err(CommandError::Internal { operation: "clear scene" }));
    assert_eq!(status_line(&result), "Error: failed to clear scene");

    // The facade stays usable afterwards.
    let result = commands.create_element("rectangle", "again", 0.0, 0.0);
    assert_eq!(status_line(&result), "Error: failed to create element");
}
