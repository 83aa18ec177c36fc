//! The module tree manager.

use crate::config::RegistryConfig;
use crate::definition::RawModule;
use crate::error::RegistryError;
use crate::module::node::Module;
use crate::module::validate;
use crate::path::ModulePath;
use std::mem;
use std::ops::ControlFlow;
use tracing::warn;

/// Owns the module tree and provides its path-addressed operations:
/// lookup, namespace derivation, registration, unregistration, and
/// hot update.
///
/// The root module is assigned exactly once, at construction; there is no
/// later assignment point. All operations are synchronous depth-first
/// walks. Mutating the tree from within a traversal callback over that
/// same subtree is the caller's responsibility to avoid.
#[derive(Debug)]
pub struct ModuleCollection {
    root: Module,
    config: RegistryConfig,
}

impl ModuleCollection {
    /// Build the tree from a nested raw definition with default config.
    /// The root and every statically-declared descendant are non-runtime.
    pub fn new(raw: RawModule) -> Result<Self, RegistryError> {
        Self::with_config(raw, RegistryConfig::default())
    }

    /// Build the tree with explicit behavior switches.
    pub fn with_config(mut raw: RawModule, config: RegistryConfig) -> Result<Self, RegistryError> {
        if config.development {
            validate::assert_raw_module(&ModulePath::root(), &raw)?;
        }

        let nested = mem::take(&mut raw.modules);
        let mut collection = ModuleCollection {
            root: Module::new(raw, false),
            config,
        };

        for (key, child_raw) in nested {
            collection.register(&ModulePath::root().child(key), child_raw, false)?;
        }

        Ok(collection)
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The root module.
    pub fn root(&self) -> &Module {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Module {
        &mut self.root
    }

    /// Resolve a path by successive child lookups. `None` if any key along
    /// the way is missing.
    pub fn get(&self, path: &ModulePath) -> Option<&Module> {
        self.get_by_keys(path.keys())
    }

    pub fn get_mut(&mut self, path: &ModulePath) -> Option<&mut Module> {
        self.get_mut_by_keys(path.keys())
    }

    /// Derive the slash-terminated namespace prefix for a path: each
    /// traversed module that is namespaced contributes `key + "/"`.
    ///
    /// An unresolvable path is a caller error and fails with
    /// [`RegistryError::InvalidPath`].
    pub fn get_namespace(&self, path: &ModulePath) -> Result<String, RegistryError> {
        let mut module = &self.root;
        let mut namespace = String::new();

        for key in path.keys() {
            module = module
                .get_child(key)
                .ok_or_else(|| RegistryError::InvalidPath(path.clone()))?;
            if module.namespaced() {
                namespace.push_str(key);
                namespace.push('/');
            }
        }

        Ok(namespace)
    }

    /// Register a raw definition at `path`, then recursively register its
    /// nested modules under the same `runtime` flag.
    ///
    /// The parent path must already resolve; registering at the root path
    /// is refused, since the root exists from construction.
    pub fn register(
        &mut self,
        path: &ModulePath,
        raw: RawModule,
        runtime: bool,
    ) -> Result<(), RegistryError> {
        if self.config.development {
            validate::assert_raw_module(path, &raw)?;
        }

        let (parent_keys, key) = path.split_last().ok_or(RegistryError::RootRedefinition)?;

        let mut raw = raw;
        let nested = mem::take(&mut raw.modules);
        let module = Module::new(raw, runtime);

        let parent = self
            .get_mut_by_keys(parent_keys)
            .ok_or_else(|| RegistryError::InvalidPath(path.clone()))?;
        parent.add_child(key, module);

        for (child_key, child_raw) in nested {
            self.register(&path.child(child_key), child_raw, runtime)?;
        }

        Ok(())
    }

    /// Remove the runtime module at `path`.
    ///
    /// A missing child is reported as a warning (development mode) and
    /// ignored. A statically-declared child is silently refused: the static
    /// tree shape is protected, and callers who need to know why nothing
    /// happened can inspect `runtime()` themselves.
    pub fn unregister(&mut self, path: &ModulePath) -> Result<(), RegistryError> {
        let development = self.config.development;
        let (parent_keys, key) = path
            .split_last()
            .ok_or_else(|| RegistryError::InvalidPath(path.clone()))?;

        let parent = self
            .get_mut_by_keys(parent_keys)
            .ok_or_else(|| RegistryError::InvalidPath(path.clone()))?;

        match parent.get_child(key) {
            None => {
                if development {
                    warn!(
                        module = %path,
                        "trying to unregister module '{key}', which is not registered"
                    );
                }
                Ok(())
            }
            Some(child) if !child.runtime() => Ok(()),
            Some(_) => {
                parent.remove_child(key);
                Ok(())
            }
        }
    }

    /// Whether a module exists at `path`. The root always reports true.
    pub fn is_registered(&self, path: &ModulePath) -> bool {
        match path.split_last() {
            None => true,
            Some((parent_keys, key)) => self
                .get_by_keys(parent_keys)
                .is_some_and(|parent| parent.has_child(key)),
        }
    }

    /// Merge a new raw definition tree over the live tree, replacing
    /// handler catalogs in place while preserving state and children.
    ///
    /// The merge cannot add or remove modules. Encountering a source key
    /// with no live counterpart emits a warning (development mode) and
    /// aborts the remaining traversal; updates already applied stand.
    /// Validation failures propagate and likewise leave prior levels
    /// applied.
    pub fn update(&mut self, raw: RawModule) -> Result<(), RegistryError> {
        let development = self.config.development;
        update_recursive(&ModulePath::root(), &mut self.root, raw, development).map(|_| ())
    }

    fn get_by_keys(&self, keys: &[String]) -> Option<&Module> {
        keys.iter()
            .try_fold(&self.root, |module, key| module.get_child(key))
    }

    fn get_mut_by_keys(&mut self, keys: &[String]) -> Option<&mut Module> {
        keys.iter()
            .try_fold(&mut self.root, |module, key| module.get_child_mut(key))
    }
}

/// Depth-first merge walk. `Break` propagates all the way out once a
/// structural add is detected, leaving completed updates in place.
fn update_recursive(
    path: &ModulePath,
    target: &mut Module,
    mut source: RawModule,
    development: bool,
) -> Result<ControlFlow<()>, RegistryError> {
    if development {
        validate::assert_raw_module(path, &source)?;
    }

    let nested = mem::take(&mut source.modules);
    target.update(source);

    for (key, child_raw) in nested {
        let child_path = path.child(key.as_str());
        match target.get_child_mut(&key) {
            None => {
                if development {
                    warn!(
                        module = %child_path,
                        "trying to add a new module '{key}' on hot update, manual reload is needed"
                    );
                }
                return Ok(ControlFlow::Break(()));
            }
            Some(child) => {
                if update_recursive(&child_path, child, child_raw, development)?.is_break() {
                    return Ok(ControlFlow::Break(()));
                }
            }
        }
    }

    Ok(ControlFlow::Continue(()))
}
