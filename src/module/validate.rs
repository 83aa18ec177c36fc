//! Raw definition validation
//!
//! Shape checks applied to every raw definition at registration and update
//! time (development mode only). Each handler category has an expected
//! shape; a violation is a configuration error carrying enough context to
//! locate the offending entry.

use crate::definition::{ActionDecl, HandlerDecl, RawModule};
use crate::error::RegistryError;
use crate::path::ModulePath;
use serde_json::Value;

const EXPECTED_FUNCTION: &str = "function";
const EXPECTED_ACTION: &str = "function or object with \"handler\" function";

/// Validate one raw definition's own handler catalogs.
///
/// Nested `modules` entries are not descended into here; they are validated
/// by the recursive registration and update walks as each level is reached.
pub fn assert_raw_module(path: &ModulePath, raw: &RawModule) -> Result<(), RegistryError> {
    for (name, getter) in &raw.getters {
        if getter.as_func().is_none() {
            return Err(invalid_handler(path, "getters", name, EXPECTED_FUNCTION, decl_value(getter)));
        }
    }

    for (name, mutation) in &raw.mutations {
        if mutation.as_func().is_none() {
            return Err(invalid_handler(path, "mutations", name, EXPECTED_FUNCTION, decl_value(mutation)));
        }
    }

    for (name, action) in &raw.actions {
        if action.handler().is_none() {
            let value = match action {
                ActionDecl::Raw(value) => value,
                _ => &Value::Null,
            };
            return Err(invalid_handler(path, "actions", name, EXPECTED_ACTION, value));
        }
    }

    Ok(())
}

fn decl_value<F>(decl: &HandlerDecl<F>) -> &Value {
    match decl {
        HandlerDecl::Raw(value) => value,
        HandlerDecl::Func(_) => &Value::Null,
    }
}

fn invalid_handler(
    path: &ModulePath,
    category: &'static str,
    entry: &str,
    expected: &'static str,
    value: &Value,
) -> RegistryError {
    RegistryError::InvalidHandler {
        path: path.clone(),
        category,
        entry: entry.to_string(),
        expected,
        value: value.to_string(),
    }
}
