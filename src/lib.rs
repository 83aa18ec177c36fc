//! Modtree: Hierarchical Module Registry
//!
//! A path-addressed registry of configuration modules arranged in a tree.
//! Each module carries a local state blob and three named handler catalogs
//! (getters, mutations, actions); the tree manager provides registration,
//! traversal, namespace derivation, dynamic unregistration, and hot update.

pub mod config;
pub mod definition;
pub mod error;
pub mod logging;
pub mod module;
pub mod path;
