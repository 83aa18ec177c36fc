//! Raw module definitions
//!
//! The caller-authored declarative description of a module tree: state
//! initializers, handler declarations, and nested modules. Declarations are
//! tagged variants rather than duck-typed values; validation rejects the
//! `Raw` forms once, at registration time, so the rest of the crate never
//! shape-probes a handler.

use futures::future::BoxFuture;
use futures::FutureExt;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Getter handler: derives a value from the module's state.
pub type GetterFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Mutation handler: applies a payload to the module's state in place.
pub type MutationFn = Arc<dyn Fn(&mut Value, Value) + Send + Sync>;

/// Future returned by an action handler.
pub type ActionFuture = BoxFuture<'static, Value>;

/// Action handler: receives a state snapshot and a payload, runs
/// asynchronously.
pub type ActionFn = Arc<dyn Fn(Value, Value) -> ActionFuture + Send + Sync>;

/// State initializer: a literal value or a zero-argument producer invoked
/// once when the module is constructed.
#[derive(Clone)]
pub enum StateInit {
    Value(Value),
    Producer(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl StateInit {
    /// Produce the initial state blob. `null` materializes as an empty
    /// object, matching the default for an absent initializer.
    pub fn materialize(&self) -> Value {
        let state = match self {
            StateInit::Value(value) => value.clone(),
            StateInit::Producer(producer) => producer.as_ref()(),
        };
        if state.is_null() {
            empty_state()
        } else {
            state
        }
    }
}

impl fmt::Debug for StateInit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateInit::Value(value) => f.debug_tuple("Value").field(value).finish(),
            StateInit::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

/// The default state for modules that declare none.
pub(crate) fn empty_state() -> Value {
    Value::Object(serde_json::Map::new())
}

/// A getter or mutation declaration as authored by the caller.
///
/// `Raw` holds any non-callable value. It exists so a malformed definition
/// survives long enough for validation to report it precisely; it is never
/// reachable through [`HandlerDecl::as_func`].
#[derive(Clone)]
pub enum HandlerDecl<F> {
    Func(F),
    Raw(Value),
}

impl<F> HandlerDecl<F> {
    pub fn as_func(&self) -> Option<&F> {
        match self {
            HandlerDecl::Func(func) => Some(func),
            HandlerDecl::Raw(_) => None,
        }
    }
}

impl<F> fmt::Debug for HandlerDecl<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerDecl::Func(_) => f.write_str("Func(..)"),
            HandlerDecl::Raw(value) => f.debug_tuple("Raw").field(value).finish(),
        }
    }
}

pub type GetterDecl = HandlerDecl<GetterFn>;
pub type MutationDecl = HandlerDecl<MutationFn>;

/// Descriptor form of an action declaration: the callable wrapped in an
/// options object.
#[derive(Clone)]
pub struct ActionDescriptor {
    pub handler: ActionFn,
}

impl fmt::Debug for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ActionDescriptor { handler: .. }")
    }
}

/// An action declaration: a direct callable, a descriptor wrapping one, or
/// (for validation diagnostics) any other value.
#[derive(Clone)]
pub enum ActionDecl {
    Handler(ActionFn),
    Descriptor(ActionDescriptor),
    Raw(Value),
}

impl ActionDecl {
    /// The callable behind this declaration, regardless of form.
    pub fn handler(&self) -> Option<&ActionFn> {
        match self {
            ActionDecl::Handler(handler) => Some(handler),
            ActionDecl::Descriptor(descriptor) => Some(&descriptor.handler),
            ActionDecl::Raw(_) => None,
        }
    }
}

impl fmt::Debug for ActionDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionDecl::Handler(_) => f.write_str("Handler(..)"),
            ActionDecl::Descriptor(descriptor) => fmt::Debug::fmt(descriptor, f),
            ActionDecl::Raw(value) => f.debug_tuple("Raw").field(value).finish(),
        }
    }
}

/// Caller-authored declaration of one module: state initializer, handler
/// catalogs, and nested modules. Catalogs preserve declaration order.
#[derive(Debug, Clone, Default)]
pub struct RawModule {
    pub state: Option<StateInit>,
    pub namespaced: bool,
    pub getters: IndexMap<String, GetterDecl>,
    pub mutations: IndexMap<String, MutationDecl>,
    pub actions: IndexMap<String, ActionDecl>,
    pub modules: IndexMap<String, RawModule>,
}

impl RawModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a literal initial state.
    pub fn with_state(mut self, state: Value) -> Self {
        self.state = Some(StateInit::Value(state));
        self
    }

    /// Set a producer invoked once at module construction.
    pub fn with_state_producer<F>(mut self, producer: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.state = Some(StateInit::Producer(Arc::new(producer)));
        self
    }

    pub fn namespaced(mut self, namespaced: bool) -> Self {
        self.namespaced = namespaced;
        self
    }

    pub fn with_getter<F>(mut self, name: impl Into<String>, getter: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.getters
            .insert(name.into(), HandlerDecl::Func(Arc::new(getter)));
        self
    }

    pub fn with_mutation<F>(mut self, name: impl Into<String>, mutation: F) -> Self
    where
        F: Fn(&mut Value, Value) + Send + Sync + 'static,
    {
        self.mutations
            .insert(name.into(), HandlerDecl::Func(Arc::new(mutation)));
        self
    }

    pub fn with_action<F, Fut>(mut self, name: impl Into<String>, action: F) -> Self
    where
        F: Fn(Value, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Value> + Send + 'static,
    {
        self.actions
            .insert(name.into(), ActionDecl::Handler(boxed_action(action)));
        self
    }

    /// Declare an action in descriptor form.
    pub fn with_action_descriptor<F, Fut>(mut self, name: impl Into<String>, action: F) -> Self
    where
        F: Fn(Value, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Value> + Send + 'static,
    {
        self.actions.insert(
            name.into(),
            ActionDecl::Descriptor(ActionDescriptor {
                handler: boxed_action(action),
            }),
        );
        self
    }

    /// Declare a nested module under the given key.
    pub fn with_module(mut self, key: impl Into<String>, module: RawModule) -> Self {
        self.modules.insert(key.into(), module);
        self
    }
}

fn boxed_action<F, Fut>(action: F) -> ActionFn
where
    F: Fn(Value, Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Value> + Send + 'static,
{
    Arc::new(move |state, payload| action(state, payload).boxed())
}
