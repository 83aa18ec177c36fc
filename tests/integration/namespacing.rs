//! Integration tests for namespace derivation

use modtree::definition::RawModule;
use modtree::error::RegistryError;
use modtree::module::ModuleCollection;
use modtree::path::ModulePath;

fn mixed_tree() -> ModuleCollection {
    // root (plain) -> account (namespaced) -> profile (plain) -> avatar (namespaced)
    let raw = RawModule::new().with_module(
        "account",
        RawModule::new().namespaced(true).with_module(
            "profile",
            RawModule::new().with_module("avatar", RawModule::new().namespaced(true)),
        ),
    );
    ModuleCollection::new(raw).unwrap()
}

/// Test that only namespaced modules contribute path segments
#[test]
fn test_non_namespaced_modules_contribute_nothing() {
    let collection = mixed_tree();

    assert_eq!(collection.get_namespace(&ModulePath::root()).unwrap(), "");
    assert_eq!(
        collection.get_namespace(&ModulePath::new(["account"])).unwrap(),
        "account/"
    );
    assert_eq!(
        collection
            .get_namespace(&ModulePath::new(["account", "profile"]))
            .unwrap(),
        "account/"
    );
    assert_eq!(
        collection
            .get_namespace(&ModulePath::new(["account", "profile", "avatar"]))
            .unwrap(),
        "account/avatar/"
    );
}

/// Test that namespaces re-derive after a hot update flips the flag
#[test]
fn test_namespace_follows_update() {
    let raw = RawModule::new().with_module("account", RawModule::new().namespaced(true));
    let mut collection = ModuleCollection::new(raw).unwrap();

    // The new definition omits `namespaced`, which resets it to false.
    collection
        .update(RawModule::new().with_module("account", RawModule::new()))
        .unwrap();

    assert_eq!(
        collection.get_namespace(&ModulePath::new(["account"])).unwrap(),
        ""
    );
}

/// Test that deriving a namespace through a missing module fails loudly
#[test]
fn test_namespace_on_invalid_path_is_an_error() {
    let collection = mixed_tree();
    let err = collection
        .get_namespace(&ModulePath::new(["account", "missing"]))
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidPath(_)));
}

/// Test namespaces of dynamically registered modules
#[test]
fn test_dynamic_module_namespace() {
    let mut collection = mixed_tree();
    collection
        .register(
            &ModulePath::new(["account", "settings"]),
            RawModule::new().namespaced(true),
            true,
        )
        .unwrap();

    assert_eq!(
        collection
            .get_namespace(&ModulePath::new(["account", "settings"]))
            .unwrap(),
        "account/settings/"
    );
}
