//! # reprs
//!
//! A value representation engine for debugging and diagnostics: turn any
//! runtime value into a precise single-line text repr, or into a structured
//! tree that tools can consume.
//!
//! ## Key Features
//!
//! - **Two output surfaces**: one-line text reprs for logs and REPLs, and a
//!   JSON tree where every node is tagged with its type and kind
//! - **Exact floats**: bit-exact decimal expansion of `f32`/`f64` (never a
//!   rounded shortest-form), plus IEEE bit-field and hex-power renderings
//! - **Numeric format directives**: hex, binary, octal, quaternary and
//!   thousands-grouped integers; fixed, scientific and grouped floats
//! - **Cycle safe**: shared reference cells are tracked per traversal, so
//!   self-referential data renders a circular-reference marker instead of
//!   recursing forever
//! - **Bounded output**: depth, element, property and string-length limits
//!   with explicit truncation markers
//! - **Serde Compatible**: capture any `#[derive(Serialize)]` type into the
//!   dynamic [`Value`] model with [`to_value`]
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! reprs = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Rendering captured data
//!
//! ```rust
//! use serde::Serialize;
//! use reprs::{to_repr, to_value};
//!
//! #[derive(Serialize)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     active: true,
//! };
//!
//! let value = to_value(&user).unwrap();
//! assert_eq!(to_repr(&value), r#"User(id: 123, name: "Alice", active: true)"#);
//! ```
//!
//! ### Controlling the rendering
//!
//! ```rust
//! use reprs::{to_repr_with_options, value, ReprOptions, TypeDisplay};
//!
//! let data = value!([1, 2, 3]);
//! let options = ReprOptions::new()
//!     .with_int_format("X")
//!     .with_type_display(TypeDisplay::AlwaysShow);
//! assert_eq!(
//!     to_repr_with_options(&data, options),
//!     "Vec([0x1_i32, 0x2_i32, 0x3_i32])"
//! );
//! ```
//!
//! ### Tree output
//!
//! ```rust
//! use reprs::{to_tree, value};
//!
//! let json = to_tree(&value!(true)).unwrap();
//! assert_eq!(json, r#"{"type":"bool","kind":"scalar","value":"true"}"#);
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - All traversal is bounds- and cycle-checked
//! - Proper error propagation with `Result` types
//! - Rendering itself never panics or fails; only tree serialization
//!   returns a `Result`

pub mod capture;
pub mod context;
pub mod engine;
pub mod error;
pub mod exact;
pub mod formatters;
pub mod macros;
pub mod numfmt;
pub mod options;
pub mod registry;
pub mod tree;
pub mod value;

pub use capture::{to_value, ValueSerializer};
pub use context::Context;
pub use error::{Error, Result};
pub use options::{ContainerStyle, FormatterMode, MemberScope, ReprOptions, TypeDisplay};
pub use registry::Formatter;
pub use tree::TreeNode;
pub use value::{Field, MemberError, Shared, Value};

/// Render a value as a single-line text repr with the default options.
///
/// # Examples
///
/// ```rust
/// use reprs::{to_repr, value};
///
/// assert_eq!(to_repr(&value!([1, "two", true])), r#"[1, "two", true]"#);
/// ```
#[must_use]
pub fn to_repr(value: &Value) -> String {
    to_repr_with_options(value, ReprOptions::new())
}

/// Render a value as a single-line text repr with custom options.
///
/// # Examples
///
/// ```rust
/// use reprs::{to_repr_with_options, value, ReprOptions};
///
/// let long = value!([1, 2, 3, 4, 5]);
/// let options = ReprOptions::new().with_max_elements(3);
/// assert_eq!(
///     to_repr_with_options(&long, options),
///     "[1, 2, 3, ... (2 more items)]"
/// );
/// ```
#[must_use]
pub fn to_repr_with_options(value: &Value, options: ReprOptions) -> String {
    engine::render_text(value, &Context::new(options))
}

/// Render a value as a structured tree with the default options.
///
/// Every node in the output carries `type` and `kind` tags; shared cells
/// additionally carry a stable `id` that circular-reference nodes refer
/// back to.
///
/// # Errors
///
/// Returns an error if the tree cannot be serialized to JSON.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_tree(value: &Value) -> Result<String> {
    to_tree_with_options(value, ReprOptions::new())
}

/// Render a value as a structured tree with custom options.
///
/// # Errors
///
/// Returns an error if the tree cannot be serialized to JSON.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_tree_with_options(value: &Value, options: ReprOptions) -> Result<String> {
    let pretty = options.pretty;
    to_tree_value(value, options).to_json(pretty)
}

/// Render a value as an in-memory tree node, without serializing it.
///
/// Useful when the caller wants to inspect or post-process the tree rather
/// than emit JSON.
#[must_use]
pub fn to_tree_value(value: &Value, options: ReprOptions) -> TreeNode {
    engine::render_tree(value, &Context::new(options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_repr_smoke() {
        assert_eq!(to_repr(&Value::Null), "null");
        assert_eq!(to_repr(&Value::from(42i32)), "42");
        assert_eq!(to_repr(&Value::from("hi")), "\"hi\"");
        let nested = Value::list(vec![Value::from(1i32), Value::list(vec![Value::from(2i32)])]);
        assert_eq!(to_repr(&nested), "[1, [2]]");
    }

    #[test]
    fn test_to_tree_smoke() {
        let json = to_tree(&Value::from(42i32)).unwrap();
        assert_eq!(json, r#"{"type":"i32","kind":"scalar","value":"42"}"#);
    }

    #[test]
    fn test_pretty_tree_is_multiline() {
        let json =
            to_tree_with_options(&Value::from(42i32), ReprOptions::new().with_pretty(true))
                .unwrap();
        assert!(json.contains('\n'));
    }
}
