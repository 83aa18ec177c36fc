//! A single node in the module tree.

use crate::definition::{
    empty_state, ActionDecl, GetterDecl, MutationDecl, RawModule, StateInit,
};
use indexmap::IndexMap;
use serde_json::Value;
use std::mem;

/// One node of the namespace tree: a state blob, three handler catalogs,
/// and named children. A module knows nothing about paths or the global
/// tree; [`super::ModuleCollection`] owns that.
#[derive(Debug)]
pub struct Module {
    runtime: bool,
    namespaced: bool,
    state: Value,
    children: IndexMap<String, Module>,
    getters: IndexMap<String, GetterDecl>,
    mutations: IndexMap<String, MutationDecl>,
    actions: IndexMap<String, ActionDecl>,
}

impl Module {
    /// Build a module from a raw definition. The state initializer is
    /// invoked exactly once, here. Nested `modules` entries are ignored;
    /// the collection registers those as separate nodes.
    pub fn new(raw: RawModule, runtime: bool) -> Self {
        let RawModule {
            state,
            namespaced,
            getters,
            mutations,
            actions,
            modules: _,
        } = raw;

        Module {
            runtime,
            namespaced,
            state: state.as_ref().map(StateInit::materialize).unwrap_or_else(empty_state),
            children: IndexMap::new(),
            getters,
            mutations,
            actions,
        }
    }

    /// True if this module was registered dynamically after initial tree
    /// construction. Only runtime modules may be unregistered.
    pub fn runtime(&self) -> bool {
        self.runtime
    }

    pub fn namespaced(&self) -> bool {
        self.namespaced
    }

    /// The module's state blob. No copy; the consuming container reads and
    /// writes through this reference.
    pub fn state(&self) -> &Value {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut Value {
        &mut self.state
    }

    /// Swap in a new state blob, returning the old one.
    pub fn replace_state(&mut self, state: Value) -> Value {
        mem::replace(&mut self.state, state)
    }

    /// Insert or overwrite a child. Key freshness is the caller's concern.
    pub fn add_child(&mut self, key: impl Into<String>, module: Module) {
        self.children.insert(key.into(), module);
    }

    /// Drop a child; no error if absent. Sibling order is preserved.
    pub fn remove_child(&mut self, key: &str) {
        self.children.shift_remove(key);
    }

    pub fn get_child(&self, key: &str) -> Option<&Module> {
        self.children.get(key)
    }

    pub fn get_child_mut(&mut self, key: &str) -> Option<&mut Module> {
        self.children.get_mut(key)
    }

    /// Membership over explicitly-inserted keys only.
    pub fn has_child(&self, key: &str) -> bool {
        self.children.contains_key(key)
    }

    /// Replace handler definitions in place, preserving state and children.
    ///
    /// `namespaced` is overwritten unconditionally: omitting it in the new
    /// definition resets it to false. Each handler catalog is replaced only
    /// if the new definition declares a non-empty one; an omitted catalog
    /// keeps its prior handlers. This asymmetry is part of the contract.
    pub fn update(&mut self, mut raw: RawModule) {
        self.namespaced = raw.namespaced;
        if !raw.actions.is_empty() {
            self.actions = mem::take(&mut raw.actions);
        }
        if !raw.mutations.is_empty() {
            self.mutations = mem::take(&mut raw.mutations);
        }
        if !raw.getters.is_empty() {
            self.getters = mem::take(&mut raw.getters);
        }
    }

    pub fn for_each_child<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &Module),
    {
        for (key, child) in &self.children {
            visit(key, child);
        }
    }

    pub fn for_each_getter<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &GetterDecl),
    {
        for (name, getter) in &self.getters {
            visit(name, getter);
        }
    }

    pub fn for_each_mutation<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &MutationDecl),
    {
        for (name, mutation) in &self.mutations {
            visit(name, mutation);
        }
    }

    pub fn for_each_action<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &ActionDecl),
    {
        for (name, action) in &self.actions {
            visit(name, action);
        }
    }

    pub(crate) fn getters(&self) -> &IndexMap<String, GetterDecl> {
        &self.getters
    }

    pub(crate) fn mutations(&self) -> &IndexMap<String, MutationDecl> {
        &self.mutations
    }

    pub(crate) fn actions(&self) -> &IndexMap<String, ActionDecl> {
        &self.actions
    }
}
