//! The per-type formatter catalog.
//!
//! Each formatter is a stateless unit-struct singleton registered in the
//! [`crate::registry`] tables. Formatters render only the value they were
//! resolved for; every child value goes back through the engine with a
//! depth-incremented, container-flavored context, so cycle detection, depth
//! limits and type-prefix decoration apply uniformly.
//!
//! Failures are localized here, not in the engine: a member whose accessor
//! failed arrives as captured [`MemberError`](crate::MemberError) data and is
//! rendered as an inline placeholder for that one member, never aborting the
//! traversal.

use crate::context::Context;
use crate::engine;
use crate::numfmt;
use crate::options::{MemberScope, TypeDisplay};
use crate::registry::Formatter;
use crate::tree::{TreeMap, TreeNode};
use crate::value::{Field, Value, Visibility};

pub static INT: IntFormatter = IntFormatter;
pub static FLOAT: FloatFormatter = FloatFormatter;
pub static BOOL: BoolFormatter = BoolFormatter;
pub static CHAR: CharFormatter = CharFormatter;
pub static STR: StrFormatter = StrFormatter;
pub static TIMESTAMP: TimestampFormatter = TimestampFormatter;
pub static ENUM: EnumFormatter = EnumFormatter;
pub static RECORD: RecordFormatter = RecordFormatter;
pub static MAP: MapFormatter = MapFormatter;
pub static TUPLE: TupleFormatter = TupleFormatter;
pub static LIST: ListFormatter = ListFormatter;
pub static SET: SetFormatter = SetFormatter;
pub static PRIORITY_QUEUE: PriorityQueueFormatter = PriorityQueueFormatter;
pub static FUNC: FuncFormatter = FuncFormatter;
pub static ITERATOR: IteratorFormatter = IteratorFormatter;
pub static ANON_RECORD: AnonRecordFormatter = AnonRecordFormatter;
pub static TYPE_DESC: TypeDescFormatter = TypeDescFormatter;
pub static DISPLAY_OVERRIDE: DisplayOverrideFormatter = DisplayOverrideFormatter;
pub static REFLECT: ReflectFormatter = ReflectFormatter;

/// Rendering for a value a formatter was not registered for. Dispatch makes
/// this unreachable in practice; the placeholder keeps formatters total.
fn mismatch(value: &Value) -> String {
    format!("<{}>", value.type_name())
}

// --- scalars -----------------------------------------------------------

/// Integers self-decorate with a Rust literal-style width suffix under
/// `AlwaysShow` instead of the `TypeName(...)` wrapper.
pub struct IntFormatter;

impl Formatter for IntFormatter {
    fn prefers_type_prefix(&self) -> bool {
        false
    }

    fn format_text(&self, value: &Value, ctx: &Context) -> String {
        let Value::Int(int) = value else {
            return mismatch(value);
        };
        let digits = numfmt::format_int(int, &ctx.options.int_format);
        if ctx.options.type_display == TypeDisplay::AlwaysShow {
            format!("{}_{}", digits, int.width.as_str())
        } else {
            digits
        }
    }

    fn format_tree(&self, value: &Value, ctx: &Context) -> TreeNode {
        let Value::Int(int) = value else {
            return TreeNode::Str(mismatch(value));
        };
        TreeNode::tagged(int.width.as_str(), "scalar")
            .field("value", numfmt::format_int(int, &ctx.options.int_format))
            .build()
    }
}

pub struct FloatFormatter;

impl Formatter for FloatFormatter {
    fn prefers_type_prefix(&self) -> bool {
        false
    }

    fn format_text(&self, value: &Value, ctx: &Context) -> String {
        let Value::Float(float) = value else {
            return mismatch(value);
        };
        let digits = numfmt::format_float(float, &ctx.options.float_format);
        if ctx.options.type_display == TypeDisplay::AlwaysShow {
            format!("{}_{}", digits, float.type_name())
        } else {
            digits
        }
    }

    fn format_tree(&self, value: &Value, ctx: &Context) -> TreeNode {
        let Value::Float(float) = value else {
            return TreeNode::Str(mismatch(value));
        };
        TreeNode::tagged(float.type_name(), "scalar")
            .field("value", numfmt::format_float(float, &ctx.options.float_format))
            .build()
    }
}

pub struct BoolFormatter;

impl Formatter for BoolFormatter {
    fn format_text(&self, value: &Value, _ctx: &Context) -> String {
        match value {
            Value::Bool(b) => b.to_string(),
            _ => mismatch(value),
        }
    }

    fn format_tree(&self, value: &Value, ctx: &Context) -> TreeNode {
        TreeNode::tagged("bool", "scalar")
            .field("value", self.format_text(value, ctx))
            .build()
    }
}

pub struct CharFormatter;

impl Formatter for CharFormatter {
    fn format_text(&self, value: &Value, _ctx: &Context) -> String {
        match value {
            Value::Char(c) => format!("'{}'", c.escape_debug()),
            _ => mismatch(value),
        }
    }

    fn format_tree(&self, value: &Value, _ctx: &Context) -> TreeNode {
        let body = match value {
            Value::Char(c) => c.to_string(),
            _ => mismatch(value),
        };
        TreeNode::tagged("char", "scalar").field("value", body).build()
    }
}

/// Splits a string at the configured length limit. `None` means no
/// truncation applies; otherwise the prefix to show and the count of
/// characters beyond it. A zero limit truncates even the empty string, so
/// the output is a marker rather than an empty quoted string.
fn clip(s: &str, limit: i32) -> Option<(String, usize)> {
    if limit < 0 {
        return None;
    }
    let limit = limit as usize;
    let total = s.chars().count();
    if total > limit || limit == 0 {
        let prefix: String = s.chars().take(limit).collect();
        let shown = prefix.chars().count();
        Some((prefix, total - shown))
    } else {
        None
    }
}

pub struct StrFormatter;

impl Formatter for StrFormatter {
    fn format_text(&self, value: &Value, ctx: &Context) -> String {
        let Value::Str(s) = value else {
            return mismatch(value);
        };
        match clip(s, ctx.options.max_string_len) {
            None => format!("\"{}\"", s.escape_debug()),
            Some((prefix, more)) if prefix.is_empty() => {
                format!("<0 shown, {} more characters>", more)
            }
            Some((prefix, more)) => format!(
                "\"{}\" <{} shown, {} more characters>",
                prefix.escape_debug(),
                prefix.chars().count(),
                more
            ),
        }
    }

    fn format_tree(&self, value: &Value, ctx: &Context) -> TreeNode {
        let Value::Str(s) = value else {
            return TreeNode::Str(mismatch(value));
        };
        match clip(s, ctx.options.max_string_len) {
            None => TreeNode::tagged("str", "string").field("value", s.as_str()).build(),
            Some((prefix, more)) => TreeNode::tagged("str", "string")
                .field("value", prefix)
                .field("more", more.to_string())
                .build(),
        }
    }
}

pub struct TimestampFormatter;

impl Formatter for TimestampFormatter {
    fn format_text(&self, value: &Value, _ctx: &Context) -> String {
        match value {
            Value::Timestamp(dt) => dt.to_rfc3339(),
            _ => mismatch(value),
        }
    }

    fn format_tree(&self, value: &Value, ctx: &Context) -> TreeNode {
        TreeNode::tagged("DateTime", "timestamp")
            .field("value", self.format_text(value, ctx))
            .build()
    }
}

// --- sequences ---------------------------------------------------------

/// Renders sequence items through the engine with a container-flavored,
/// depth-incremented context, honoring the element limit.
fn items_text(items: &[Value], ctx: &Context, open: char, close: char) -> String {
    let child = ctx.with_container_formatting().derive_for_child();
    let limit = ctx.options.max_elements;
    let shown = if limit < 0 {
        items.len()
    } else {
        items.len().min(limit as usize)
    };

    let mut parts: Vec<String> = items[..shown]
        .iter()
        .map(|item| engine::render_text(item, &child))
        .collect();
    if shown < items.len() {
        parts.push(format!("... ({} more items)", items.len() - shown));
    }
    format!("{}{}{}", open, parts.join(", "), close)
}

fn items_tree(items: &[Value], ctx: &Context, type_name: &str, kind: &str) -> TreeNode {
    let child = ctx.with_container_formatting().derive_for_child();
    let limit = ctx.options.max_elements;
    let shown = if limit < 0 {
        items.len()
    } else {
        items.len().min(limit as usize)
    };

    let rendered: Vec<TreeNode> = items[..shown]
        .iter()
        .map(|item| engine::render_tree(item, &child))
        .collect();
    let mut node = TreeNode::tagged(type_name, kind).field("items", rendered);
    if shown < items.len() {
        node = node.field("truncated", (items.len() - shown).to_string());
    }
    node.build()
}

macro_rules! seq_formatter {
    ($name:ident, $kind:literal, $open:literal, $close:literal) => {
        pub struct $name;

        impl Formatter for $name {
            fn prefers_type_prefix(&self) -> bool {
                // Brackets already make the shape evident; the engine's
                // obviousness rules decide whether the name is added.
                true
            }

            fn format_text(&self, value: &Value, ctx: &Context) -> String {
                match value {
                    Value::Seq(seq) => items_text(&seq.items, ctx, $open, $close),
                    _ => mismatch(value),
                }
            }

            fn format_tree(&self, value: &Value, ctx: &Context) -> TreeNode {
                match value {
                    Value::Seq(seq) => {
                        items_tree(&seq.items, ctx, &value.type_name(), $kind)
                    }
                    _ => TreeNode::Str(mismatch(value)),
                }
            }
        }
    };
}

seq_formatter!(ListFormatter, "list", '[', ']');
seq_formatter!(TupleFormatter, "tuple", '(', ')');
seq_formatter!(SetFormatter, "set", '{', '}');
seq_formatter!(PriorityQueueFormatter, "priorityQueue", '[', ']');
seq_formatter!(IteratorFormatter, "iterator", '[', ']');

pub struct MapFormatter;

impl Formatter for MapFormatter {
    fn format_text(&self, value: &Value, ctx: &Context) -> String {
        let Value::Map(map) = value else {
            return mismatch(value);
        };
        let child = ctx.with_container_formatting().derive_for_child();
        let limit = ctx.options.max_elements;
        let shown = if limit < 0 {
            map.entries.len()
        } else {
            map.entries.len().min(limit as usize)
        };

        let mut parts: Vec<String> = map.entries[..shown]
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}: {}",
                    engine::render_text(k, &child),
                    engine::render_text(v, &child)
                )
            })
            .collect();
        if shown < map.entries.len() {
            parts.push(format!("... ({} more entries)", map.entries.len() - shown));
        }
        format!("{{{}}}", parts.join(", "))
    }

    fn format_tree(&self, value: &Value, ctx: &Context) -> TreeNode {
        let Value::Map(map) = value else {
            return TreeNode::Str(mismatch(value));
        };
        let child = ctx.with_container_formatting().derive_for_child();
        let limit = ctx.options.max_elements;
        let shown = if limit < 0 {
            map.entries.len()
        } else {
            map.entries.len().min(limit as usize)
        };

        let entries: Vec<TreeNode> = map.entries[..shown]
            .iter()
            .map(|(k, v)| {
                let mut entry = TreeMap::new();
                entry.insert("key".to_string(), engine::render_tree(k, &child));
                entry.insert("value".to_string(), engine::render_tree(v, &child));
                TreeNode::Object(entry)
            })
            .collect();
        let mut node = TreeNode::tagged(&value.type_name(), "map").field("entries", entries);
        if shown < map.entries.len() {
            node = node.field("truncated", (map.entries.len() - shown).to_string());
        }
        node.build()
    }
}

// --- records and members -----------------------------------------------

fn visible_fields<'a>(fields: &'a [Field], scope: MemberScope) -> Vec<&'a Field> {
    fields
        .iter()
        .filter(|f| scope == MemberScope::All || f.visibility == Visibility::Public)
        .collect()
}

/// Renders record members as `name: value` pairs. A member whose accessor
/// failed renders an inline placeholder; siblings are unaffected.
fn members_text(fields: &[Field], ctx: &Context) -> String {
    let child = ctx.derive_for_child();
    let members = visible_fields(fields, ctx.options.member_scope);
    let limit = ctx.options.max_properties;
    let shown = if limit < 0 {
        members.len()
    } else {
        members.len().min(limit as usize)
    };

    let mut parts: Vec<String> = members[..shown]
        .iter()
        .map(|field| match &field.value {
            Ok(v) => format!("{}: {}", field.name, engine::render_text(v, &child)),
            Err(e) => format!("{}: <unreadable: {}>", field.name, e.message),
        })
        .collect();
    if shown < members.len() {
        parts.push(format!("... ({} more properties)", members.len() - shown));
    }
    parts.join(", ")
}

fn members_tree(fields: &[Field], ctx: &Context) -> (TreeNode, Option<usize>) {
    let child = ctx.derive_for_child();
    let members = visible_fields(fields, ctx.options.member_scope);
    let limit = ctx.options.max_properties;
    let shown = if limit < 0 {
        members.len()
    } else {
        members.len().min(limit as usize)
    };

    let mut map = TreeMap::new();
    for field in &members[..shown] {
        let node = match &field.value {
            Ok(v) => engine::render_tree(v, &child),
            Err(e) => TreeNode::tagged("member", "error")
                .field("message", e.message.as_str())
                .build(),
        };
        map.insert(field.name.clone(), node);
    }
    let hidden = members.len() - shown;
    (
        TreeNode::Object(map),
        (hidden > 0).then_some(hidden),
    )
}

fn record_kind_label(value: &Value) -> &'static str {
    match value {
        Value::Record(record) => match record.kind {
            crate::value::RecordKind::Struct => "struct",
            crate::value::RecordKind::Class => "class",
        },
        _ => "struct",
    }
}

fn record_tree(value: &Value, ctx: &Context) -> TreeNode {
    let Value::Record(record) = value else {
        return TreeNode::Str(mismatch(value));
    };
    let (fields, hidden) = members_tree(&record.fields, ctx);
    let mut node = TreeNode::tagged(&value.type_name(), record_kind_label(value))
        .field("fields", fields);
    if let Some(hidden) = hidden {
        node = node.field("truncated", hidden.to_string());
    }
    node.build()
}

pub struct RecordFormatter;

impl Formatter for RecordFormatter {
    fn format_text(&self, value: &Value, ctx: &Context) -> String {
        match value {
            Value::Record(record) => members_text(&record.fields, ctx),
            _ => mismatch(value),
        }
    }

    fn format_tree(&self, value: &Value, ctx: &Context) -> TreeNode {
        record_tree(value, ctx)
    }
}

/// Anonymous records have no name worth prefixing; the braces stand alone.
pub struct AnonRecordFormatter;

impl Formatter for AnonRecordFormatter {
    fn prefers_type_prefix(&self) -> bool {
        false
    }

    fn format_text(&self, value: &Value, ctx: &Context) -> String {
        match value {
            Value::Record(record) => format!("{{{}}}", members_text(&record.fields, ctx)),
            _ => mismatch(value),
        }
    }

    fn format_tree(&self, value: &Value, ctx: &Context) -> TreeNode {
        record_tree(value, ctx)
    }
}

// --- self-descriptive leaves -------------------------------------------

pub struct EnumFormatter;

impl Formatter for EnumFormatter {
    fn prefers_type_prefix(&self) -> bool {
        false
    }

    fn format_text(&self, value: &Value, _ctx: &Context) -> String {
        match value {
            Value::Enum { type_name, variant } => format!("{}::{}", type_name, variant),
            _ => mismatch(value),
        }
    }

    fn format_tree(&self, value: &Value, _ctx: &Context) -> TreeNode {
        match value {
            Value::Enum { type_name, variant } => TreeNode::tagged(type_name, "enum")
                .field("variant", variant.as_str())
                .build(),
            _ => TreeNode::Str(mismatch(value)),
        }
    }
}

pub struct FuncFormatter;

impl Formatter for FuncFormatter {
    fn prefers_type_prefix(&self) -> bool {
        false
    }

    fn format_text(&self, value: &Value, _ctx: &Context) -> String {
        match value {
            Value::Func { name, signature } => {
                format!("fn {}{}", name, signature.as_deref().unwrap_or(""))
            }
            _ => mismatch(value),
        }
    }

    fn format_tree(&self, value: &Value, _ctx: &Context) -> TreeNode {
        match value {
            Value::Func { name, signature } => {
                let mut node = TreeNode::tagged("fn", "function").field("name", name.as_str());
                if let Some(sig) = signature {
                    node = node.field("signature", sig.as_str());
                }
                node.build()
            }
            _ => TreeNode::Str(mismatch(value)),
        }
    }
}

pub struct TypeDescFormatter;

impl Formatter for TypeDescFormatter {
    fn prefers_type_prefix(&self) -> bool {
        false
    }

    fn format_text(&self, value: &Value, _ctx: &Context) -> String {
        match value {
            Value::TypeDesc { name } => format!("<type {}>", name),
            _ => mismatch(value),
        }
    }

    fn format_tree(&self, value: &Value, _ctx: &Context) -> TreeNode {
        match value {
            Value::TypeDesc { name } => {
                TreeNode::tagged("type", "type").field("name", name.as_str()).build()
            }
            _ => TreeNode::Str(mismatch(value)),
        }
    }
}

/// Defers to the hosted type's own stringification override. Text mode
/// only; the registry never routes tree mode here.
pub struct DisplayOverrideFormatter;

impl Formatter for DisplayOverrideFormatter {
    fn prefers_type_prefix(&self) -> bool {
        false
    }

    fn format_text(&self, value: &Value, ctx: &Context) -> String {
        match value {
            Value::Record(record) => match &record.display {
                Some(display) => display.clone(),
                None => members_text(&record.fields, ctx),
            },
            _ => mismatch(value),
        }
    }

    fn format_tree(&self, value: &Value, ctx: &Context) -> TreeNode {
        record_tree(value, ctx)
    }
}

// --- universal fallback ------------------------------------------------

/// The universal member enumerator: renders anything by walking its members
/// generically. Terminal for dispatch; also the whole catalog under
/// [`FormatterMode::Reflective`](crate::FormatterMode).
pub struct ReflectFormatter;

impl Formatter for ReflectFormatter {
    fn format_text(&self, value: &Value, ctx: &Context) -> String {
        match value {
            Value::Record(record) => members_text(&record.fields, ctx),
            Value::Seq(seq) => {
                let child = ctx.with_container_formatting().derive_for_child();
                let parts: Vec<String> = seq
                    .items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| format!("{}: {}", i, engine::render_text(item, &child)))
                    .collect();
                parts.join(", ")
            }
            Value::Map(_) => MAP.format_text(value, ctx),
            Value::Enum { variant, .. } => variant.clone(),
            Value::Func { name, .. } => name.clone(),
            Value::TypeDesc { name } => name.clone(),
            _ => mismatch(value),
        }
    }

    fn format_tree(&self, value: &Value, ctx: &Context) -> TreeNode {
        match value {
            Value::Record(_) => record_tree(value, ctx),
            Value::Seq(seq) => items_tree(&seq.items, ctx, &value.type_name(), "iterator"),
            Value::Map(_) => MAP.format_tree(value, ctx),
            _ => TreeNode::tagged(&value.type_name(), "scalar")
                .field("value", self.format_text(value, ctx))
                .build(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ReprOptions;

    fn ctx() -> Context {
        Context::new(ReprOptions::new())
    }

    #[test]
    fn test_clip_boundaries() {
        assert_eq!(clip("hello", -1), None);
        assert_eq!(clip("hello", 10), None);
        assert_eq!(clip("hello", 5), None);
        assert_eq!(clip("hello", 3), Some(("hel".to_string(), 2)));
        assert_eq!(clip("hello", 0), Some((String::new(), 5)));
        assert_eq!(clip("", 0), Some((String::new(), 0)));
        assert_eq!(clip("", 5), None);
        // Counts are in characters, not bytes.
        assert_eq!(clip("héllo wörld", 4), Some(("héll".to_string(), 7)));
    }

    #[test]
    fn test_string_truncation_marker() {
        let long = Value::Str("abcdefgh".to_string());
        let ctx = Context::new(ReprOptions::new().with_max_string_len(3));
        assert_eq!(
            STR.format_text(&long, &ctx),
            "\"abc\" <3 shown, 5 more characters>"
        );
    }

    #[test]
    fn test_empty_string_zero_limit_is_marker_not_quotes() {
        let empty = Value::Str(String::new());
        let ctx = Context::new(ReprOptions::new().with_max_string_len(0));
        assert_eq!(STR.format_text(&empty, &ctx), "<0 shown, 0 more characters>");
    }

    #[test]
    fn test_member_error_renders_inline() {
        let record = Value::record(
            "Account",
            vec![
                Field::public("id", Value::from(7i32)),
                Field::failed("balance", "backing store gone"),
                Field::public("open", Value::from(true)),
            ],
        );
        let text = RECORD.format_text(&record, &ctx());
        assert_eq!(
            text,
            "id: 7, balance: <unreadable: backing store gone>, open: true"
        );
    }

    #[test]
    fn test_member_scope_filters_private() {
        let record = Value::record(
            "Secret",
            vec![
                Field::public("shown", Value::from(1i32)),
                Field::private("hidden", Value::from(2i32)),
            ],
        );
        assert_eq!(RECORD.format_text(&record, &ctx()), "shown: 1");

        let all = Context::new(ReprOptions::new().with_member_scope(MemberScope::All));
        assert_eq!(RECORD.format_text(&record, &all), "shown: 1, hidden: 2");
    }

    #[test]
    fn test_property_limit() {
        let fields: Vec<Field> = (0..5)
            .map(|i| Field::public(&format!("f{}", i), Value::from(i)))
            .collect();
        let record = Value::record("Wide", fields);
        let ctx = Context::new(ReprOptions::new().with_max_properties(2));
        assert_eq!(
            RECORD.format_text(&record, &ctx),
            "f0: 0, f1: 1, ... (3 more properties)"
        );
    }

    #[test]
    fn test_enum_is_self_descriptive() {
        let color = Value::Enum {
            type_name: "Color".to_string(),
            variant: "Red".to_string(),
        };
        assert_eq!(ENUM.format_text(&color, &ctx()), "Color::Red");
        assert!(!ENUM.prefers_type_prefix());
    }
}
