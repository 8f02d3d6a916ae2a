//! The rendering engine.
//!
//! [`render_text`] and [`render_tree`] are the recursive entry points every
//! formatter routes child values back through. The engine owns the concerns
//! that must hold across the whole traversal regardless of which formatter
//! runs: optional-value unwrapping, shared-cell cycle detection, the depth
//! limit, and type-prefix decoration.

use tracing::trace;

use crate::context::Context;
use crate::options::TypeDisplay;
use crate::registry::registry;
use crate::tree::TreeNode;
use crate::value::Value;

pub(crate) const MAX_DEPTH_MARKER: &str = "<Max Depth Reached>";

/// Wraps a rendered body in `TypeName(...)` when the options ask for the
/// type and the value's name is not already evident from its syntax.
fn decorate(value: &Value, body: String, ctx: &Context) -> String {
    let show = match ctx.options.type_display {
        TypeDisplay::AlwaysHide => false,
        TypeDisplay::HideObvious => !value.is_obvious_type(),
        TypeDisplay::AlwaysShow => true,
    };
    if show {
        format!("{}({})", value.type_name(), body)
    } else {
        body
    }
}

/// Depth is cut for values that would recurse. Scalars at the limit still
/// render, except under a zero limit where nothing below the root does.
fn depth_cut(value: &Value, ctx: &Context) -> bool {
    if !ctx.depth_exceeded() {
        return false;
    }
    ctx.options.max_depth == 0
        || matches!(value, Value::Seq(_) | Value::Map(_) | Value::Record(_))
}

/// Renders `value` as a single line of text under `ctx`.
pub fn render_text(value: &Value, ctx: &Context) -> String {
    match value {
        Value::Null | Value::Opt(None) => "null".to_string(),
        Value::Opt(Some(inner)) => {
            // The wrapper decorates as `Option`; the payload renders bare so
            // the name is not stated twice.
            let body = render_text(inner, &ctx.with_type_prefix_hidden());
            decorate(value, body, ctx)
        }
        Value::Shared(cell) => {
            let identity = cell.identity();
            match ctx.try_visit(identity) {
                Some(_guard) => render_text(&cell.borrow(), ctx),
                None => format!(
                    "<Circular Reference to {} @0x{:08x}>",
                    value.type_name(),
                    identity as u32
                ),
            }
        }
        _ => {
            if depth_cut(value, ctx) {
                trace!(depth = ctx.depth, "depth limit reached");
                return MAX_DEPTH_MARKER.to_string();
            }
            let facets = value.facets();
            let formatter = registry().text.resolve(&facets, ctx.options.formatter_mode);
            let body = formatter.format_text(value, ctx);
            if formatter.prefers_type_prefix() {
                decorate(value, body, ctx)
            } else {
                body
            }
        }
    }
}

/// Renders `value` as a structured tree under `ctx`. Every node carries
/// `type` and `kind` tags regardless of the text-side display options.
pub fn render_tree(value: &Value, ctx: &Context) -> TreeNode {
    match value {
        Value::Null => TreeNode::tagged("null", "null").field("value", TreeNode::Null).build(),
        Value::Opt(None) => {
            TreeNode::tagged("Option", "null").field("value", TreeNode::Null).build()
        }
        // The wrapper is transparent in tree form; the payload's own tags
        // identify it.
        Value::Opt(Some(inner)) => render_tree(inner, ctx),
        Value::Shared(cell) => {
            let identity = cell.identity();
            let id = format!("0x{:08x}", identity as u32);
            match ctx.try_visit(identity) {
                Some(_guard) => {
                    let mut node = render_tree(&cell.borrow(), ctx);
                    let stamped = match &mut node {
                        // A directly nested cell has already stamped its own
                        // identity on the same node; both ids must survive so
                        // every circular back-reference resolves.
                        TreeNode::Object(map) if !map.contains_key("id") => {
                            map.insert("id".to_string(), TreeNode::Str(id.clone()));
                            true
                        }
                        _ => false,
                    };
                    if stamped {
                        node
                    } else {
                        TreeNode::tagged(&value.type_name(), "shared")
                            .field("id", id)
                            .field("value", node)
                            .build()
                    }
                }
                None => TreeNode::tagged(&value.type_name(), "circular")
                    .field("id", id)
                    .build(),
            }
        }
        _ => {
            if depth_cut(value, ctx) {
                trace!(depth = ctx.depth, "depth limit reached");
                return TreeNode::tagged(&value.type_name(), "maxDepth")
                    .field("maxDepthReached", "true")
                    .field("depth", ctx.depth.to_string())
                    .build();
            }
            let facets = value.facets();
            registry()
                .tree
                .resolve(&facets, ctx.options.formatter_mode)
                .format_tree(value, ctx)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{ReprOptions, TypeDisplay};
    use crate::value::Field;

    fn render(value: &Value, options: ReprOptions) -> String {
        render_text(value, &Context::new(options))
    }

    #[test]
    fn test_scalars_survive_the_depth_limit() {
        let list = Value::list(vec![Value::from(1i32), Value::from(2i32)]);
        assert_eq!(render(&list, ReprOptions::new().with_max_depth(1)), "[1, 2]");
    }

    #[test]
    fn test_nested_list_cut_at_depth() {
        let inner = Value::list(vec![Value::from(3i32)]);
        let mid = Value::list(vec![Value::from(2i32), inner]);
        let outer = Value::list(vec![Value::from(1i32), mid]);
        assert_eq!(
            render(&outer, ReprOptions::new().with_max_depth(1)),
            "[1, <Max Depth Reached>]"
        );
    }

    #[test]
    fn test_zero_depth_cuts_everything() {
        assert_eq!(
            render(&Value::from(42i32), ReprOptions::new().with_max_depth(0)),
            "<Max Depth Reached>"
        );
        assert_eq!(
            render(&Value::Null, ReprOptions::new().with_max_depth(0)),
            "null"
        );
    }

    #[test]
    fn test_negative_depth_is_unlimited() {
        let mut value = Value::from(0i32);
        for _ in 0..40 {
            value = Value::list(vec![value]);
        }
        let text = render(&value, ReprOptions::new().with_max_depth(-1));
        assert!(!text.contains(MAX_DEPTH_MARKER));
        assert!(text.contains("0"));
    }

    #[test]
    fn test_option_some_unwraps_without_double_prefix() {
        let value = Value::from(Some(42i32));
        assert_eq!(render(&value, ReprOptions::new()), "42");
        // The inner value's own tag is suppressed; the wrapper names it once.
        assert_eq!(
            render(&value, ReprOptions::new().with_type_display(TypeDisplay::AlwaysShow)),
            "Option(42)"
        );
    }

    #[test]
    fn test_option_none_is_null() {
        let value = Value::from(None::<i32>);
        assert_eq!(render(&value, ReprOptions::new()), "null");
    }

    #[test]
    fn test_type_prefix_for_records() {
        let point = Value::record(
            "Point",
            vec![
                Field::public("x", Value::from(1i32)),
                Field::public("y", Value::from(2i32)),
            ],
        );
        assert_eq!(render(&point, ReprOptions::new()), "Point(x: 1, y: 2)");
        assert_eq!(
            render(&point, ReprOptions::new().with_type_display(TypeDisplay::AlwaysHide)),
            "x: 1, y: 2"
        );
    }

    #[test]
    fn test_self_cycle_renders_marker() {
        let cell = Value::shared(Value::list(vec![]));
        let Value::Shared(shared) = &cell else {
            unreachable!()
        };
        let identity = shared.identity();
        *shared.borrow_mut() = Value::list(vec![cell.clone()]);

        let text = render(&cell, ReprOptions::new());
        assert_eq!(
            text,
            format!("[<Circular Reference to Vec @0x{:08x}>]", identity as u32)
        );
    }

    #[test]
    fn test_visited_set_clears_between_siblings() {
        let shared = Value::shared(Value::from(7i32));
        let list = Value::list(vec![shared.clone(), shared]);
        // Same cell twice is aliasing, not a cycle: the guard releases the
        // identity after the first sibling finishes.
        assert_eq!(render(&list, ReprOptions::new()), "[7, 7]");
    }

    #[test]
    fn test_mutual_cycle_terminates() {
        let a = Value::shared(Value::list(vec![]));
        let b = Value::shared(Value::list(vec![a.clone()]));
        let Value::Shared(cell_a) = &a else {
            unreachable!()
        };
        *cell_a.borrow_mut() = Value::list(vec![b.clone()]);

        let text = render(&a, ReprOptions::new());
        assert!(text.contains("<Circular Reference to Vec @0x"));
    }

    #[test]
    fn test_tree_max_depth_node() {
        let inner = Value::list(vec![Value::from(1i32)]);
        let outer = Value::list(vec![inner]);
        let ctx = Context::new(ReprOptions::new().with_max_depth(1));
        let node = render_tree(&outer, &ctx);
        let map = node.as_object().unwrap();
        let TreeNode::Array(items) = &map["items"] else {
            panic!("expected items array");
        };
        let cut = items[0].as_object().unwrap();
        assert_eq!(cut["kind"].as_str(), Some("maxDepth"));
        assert_eq!(cut["maxDepthReached"].as_str(), Some("true"));
        assert_eq!(cut["depth"].as_str(), Some("1"));
    }

    #[test]
    fn test_tree_shared_carries_id_and_circular_refers_back() {
        let cell = Value::shared(Value::list(vec![]));
        let Value::Shared(shared) = &cell else {
            unreachable!()
        };
        *shared.borrow_mut() = Value::list(vec![cell.clone()]);

        let ctx = Context::new(ReprOptions::new());
        let node = render_tree(&cell, &ctx);
        let map = node.as_object().unwrap();
        let id = map["id"].as_str().unwrap().to_string();
        let TreeNode::Array(items) = &map["items"] else {
            panic!("expected items array");
        };
        let back = items[0].as_object().unwrap();
        assert_eq!(back["kind"].as_str(), Some("circular"));
        assert_eq!(back["id"].as_str(), Some(id.as_str()));
    }
}
