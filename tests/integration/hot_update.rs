//! Integration tests for the hot-update merge

use modtree::definition::RawModule;
use modtree::module::ModuleCollection;
use modtree::path::ModulePath;
use serde_json::json;

fn live_tree() -> ModuleCollection {
    let raw = RawModule::new()
        .with_mutation("bump", |state, _| {
            state["n"] = json!(state["n"].as_i64().unwrap_or(0) + 1)
        })
        .with_state(json!({"n": 0}))
        .with_module(
            "a",
            RawModule::new()
                .namespaced(true)
                .with_state(json!({"x": 1}))
                .with_getter("x", |state| state["x"].clone())
                .with_module("b", RawModule::new().with_state(json!({"y": 2}))),
        );
    ModuleCollection::new(raw).unwrap()
}

/// Test that an update swaps handler catalogs without touching state
#[test]
fn test_update_swaps_handlers_preserves_state() {
    let mut collection = live_tree();

    // Mutate live state first so we can tell it survives.
    collection
        .get_mut(&ModulePath::new(["a"]))
        .unwrap()
        .state_mut()["x"] = json!(99);

    let new_raw = RawModule::new().with_module(
        "a",
        RawModule::new()
            .namespaced(true)
            .with_getter("double_x", |state| {
                json!(state["x"].as_i64().unwrap_or(0) * 2)
            })
            .with_module("b", RawModule::new()),
    );
    collection.update(new_raw).unwrap();

    let a = collection.get(&ModulePath::new(["a"])).unwrap();
    assert_eq!(a.state(), &json!({"x": 99}));

    let mut getter_names = Vec::new();
    a.for_each_getter(|name, _| getter_names.push(name.to_string()));
    assert_eq!(getter_names, vec!["double_x"]);
}

/// Test the partial-merge asymmetry: omitted catalogs persist, omitted
/// namespaced resets
#[test]
fn test_update_asymmetry() {
    let mut collection = live_tree();

    let new_raw = RawModule::new().with_module(
        "a",
        RawModule::new()
            .with_action("load", |_state, payload| async move { payload })
            .with_module("b", RawModule::new()),
    );
    collection.update(new_raw).unwrap();

    let a = collection.get(&ModulePath::new(["a"])).unwrap();

    // Getters were omitted from the new definition: the old catalog stays.
    let mut getter_names = Vec::new();
    a.for_each_getter(|name, _| getter_names.push(name.to_string()));
    assert_eq!(getter_names, vec!["x"]);

    // Actions were declared: replaced wholesale.
    let mut action_names = Vec::new();
    a.for_each_action(|name, _| action_names.push(name.to_string()));
    assert_eq!(action_names, vec!["load"]);

    // `namespaced` was omitted: always reset.
    assert!(!a.namespaced());
}

/// Test that a structural add aborts the merge but keeps applied updates
#[test]
fn test_structural_add_is_reported_not_applied() {
    let mut collection = live_tree();

    let new_raw = RawModule::new().with_module(
        "a",
        RawModule::new()
            .with_getter("swapped", |state| state.clone())
            .with_module("brand_new", RawModule::new().with_state(json!({"z": 3}))),
    );
    collection.update(new_raw).unwrap();

    // The update on `a` itself had already been applied.
    let a = collection.get(&ModulePath::new(["a"])).unwrap();
    let mut getter_names = Vec::new();
    a.for_each_getter(|name, _| getter_names.push(name.to_string()));
    assert_eq!(getter_names, vec!["swapped"]);

    // The unknown subtree was dropped, not registered.
    assert!(!collection.is_registered(&ModulePath::new(["a", "brand_new"])));

    // Existing children were never touched.
    assert_eq!(
        collection.get(&ModulePath::new(["a", "b"])).unwrap().state(),
        &json!({"y": 2})
    );
}

/// Test that an update cannot remove modules
#[test]
fn test_update_never_removes_children() {
    let mut collection = live_tree();

    // New definition has no mention of `a` at all.
    collection.update(RawModule::new()).unwrap();

    assert!(collection.is_registered(&ModulePath::new(["a"])));
    assert!(collection.is_registered(&ModulePath::new(["a", "b"])));
}

/// Test updating a dynamically registered module
#[test]
fn test_update_reaches_runtime_modules() {
    let mut collection = live_tree();
    collection
        .register(
            &ModulePath::new(["plugin"]),
            RawModule::new().with_mutation("noop", |_, _| {}),
            true,
        )
        .unwrap();

    let new_raw = RawModule::new().with_module(
        "plugin",
        RawModule::new().with_mutation("replaced", |_, _| {}),
    );
    collection.update(new_raw).unwrap();

    let plugin = collection.get(&ModulePath::new(["plugin"])).unwrap();
    let mut names = Vec::new();
    plugin.for_each_mutation(|name, _| names.push(name.to_string()));
    assert_eq!(names, vec!["replaced"]);
    // Still removable afterwards: update does not touch the runtime flag.
    assert!(plugin.runtime());
}
