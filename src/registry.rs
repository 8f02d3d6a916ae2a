//! Formatter resolution: runtime type descriptor -> formatter singleton.
//!
//! Resolution order, first match wins:
//!
//! 1. exact-type table (formatters bound to one concrete type name; only
//!    scalar-shaped values consult it);
//! 2. if the active mode forces reflection-based rendering, the universal
//!    reflection formatter;
//! 3. an ordered predicate list, most specific first — the order matters
//!    because many types satisfy several predicates (a map is also
//!    iterable);
//! 4. the universal reflection formatter as fallback.
//!
//! Registration is an explicit static table built in code on first use
//! (no discovery or scanning step), so resolution order is deterministic.
//! Text mode and tree mode keep separate tables: tree mode omits the
//! display-override rule, because tree output never defers to ad hoc
//! stringification. After the one-time build the tables are read-only, so
//! concurrent lookups need no locking.

use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

use crate::context::Context;
use crate::formatters;
use crate::options::FormatterMode;
use crate::tree::TreeNode;
use crate::value::{TypeFacets, Value};

/// A renderer for one family of value types.
///
/// Formatters are stateless singletons. For every child value a formatter
/// wants represented, it must call back into the engine with a
/// depth-incremented (and optionally container-flavored) context — never
/// compute a child representation by other means.
pub trait Formatter: Sync {
    /// Static metadata: whether the engine should wrap this formatter's text
    /// output in a `TypeName(...)` prefix. Formatters whose output is
    /// self-descriptive opt out.
    fn prefers_type_prefix(&self) -> bool {
        true
    }

    /// Renders the single-line text form.
    fn format_text(&self, value: &Value, ctx: &Context) -> String;

    /// Renders the structured tree form.
    fn format_tree(&self, value: &Value, ctx: &Context) -> TreeNode;
}

type Predicate = fn(&TypeFacets) -> bool;

/// One resolution table: exact matches, ordered predicate rules, fallback.
pub struct Table {
    exact: HashMap<&'static str, &'static dyn Formatter>,
    rules: Vec<(Predicate, &'static dyn Formatter)>,
    fallback: &'static dyn Formatter,
}

impl Table {
    /// Resolves a formatter for the given type descriptor. Total: something
    /// always matches because the reflection formatter accepts anything.
    #[must_use]
    pub fn resolve(&self, facets: &TypeFacets, mode: FormatterMode) -> &'static dyn Formatter {
        // The exact table binds scalar formatters to primitive names; a
        // container whose element type is named after a primitive must not
        // hit it.
        if facets.is_scalar {
            if let Some(formatter) = self.exact.get(facets.name.as_str()) {
                return *formatter;
            }
        }
        if mode == FormatterMode::Reflective {
            return self.fallback;
        }
        for (predicate, formatter) in &self.rules {
            if predicate(facets) {
                return *formatter;
            }
        }
        self.fallback
    }
}

/// The text-mode and tree-mode tables.
pub struct Registry {
    pub text: Table,
    pub tree: Table,
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The process-wide registry, built once on first use.
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        let registry = Registry {
            text: build_table(true),
            tree: build_table(false),
        };
        debug!(
            exact = registry.text.exact.len(),
            rules = registry.text.rules.len(),
            "formatter registry built"
        );
        registry
    })
}

fn build_table(text_mode: bool) -> Table {
    let mut exact: HashMap<&'static str, &'static dyn Formatter> = HashMap::new();
    for name in [
        "i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64",
    ] {
        exact.insert(name, &formatters::INT);
    }
    exact.insert("f32", &formatters::FLOAT);
    exact.insert("f64", &formatters::FLOAT);
    exact.insert("bool", &formatters::BOOL);
    exact.insert("char", &formatters::CHAR);
    exact.insert("str", &formatters::STR);
    exact.insert("DateTime", &formatters::TIMESTAMP);

    // Most specific first; a concrete type may satisfy several predicates.
    let mut rules: Vec<(Predicate, &'static dyn Formatter)> = vec![
        (|f| f.is_enum, &formatters::ENUM),
        (|f| f.is_record, &formatters::RECORD),
        (|f| f.is_map, &formatters::MAP),
        (|f| f.is_tuple, &formatters::TUPLE),
        (|f| f.is_list, &formatters::LIST),
        (|f| f.is_set, &formatters::SET),
        (|f| f.is_priority_queue, &formatters::PRIORITY_QUEUE),
        (|f| f.is_callable, &formatters::FUNC),
        (|f| f.is_iterable, &formatters::ITERATOR),
        (|f| f.is_anonymous, &formatters::ANON_RECORD),
        (|f| f.is_type_desc, &formatters::TYPE_DESC),
    ];
    if text_mode {
        // Structural rules win over a type's own stringification: a struct
        // record with an override still enumerates its members. The override
        // only catches what no structural rule claims (class records,
        // mostly). Tree mode never defers to ad hoc stringification.
        rules.push((|f| f.has_display_override, &formatters::DISPLAY_OVERRIDE));
    }

    Table {
        exact,
        rules,
        fallback: &formatters::REFLECT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_text(value: &Value) -> &'static dyn Formatter {
        registry().text.resolve(&value.facets(), FormatterMode::Standard)
    }

    fn is_same(a: &dyn Formatter, b: &dyn Formatter) -> bool {
        std::ptr::eq(
            a as *const dyn Formatter as *const (),
            b as *const dyn Formatter as *const (),
        )
    }

    #[test]
    fn test_exact_table_wins() {
        assert!(is_same(resolve_text(&Value::from(1i32)), &formatters::INT));
        assert!(is_same(resolve_text(&Value::from(1.0f64)), &formatters::FLOAT));
        assert!(is_same(resolve_text(&Value::from("x")), &formatters::STR));
    }

    #[test]
    fn test_map_is_not_misclassified_as_iterable() {
        let map = Value::map(vec![]);
        assert!(is_same(resolve_text(&map), &formatters::MAP));
        let set = Value::set(vec![]);
        assert!(is_same(resolve_text(&set), &formatters::SET));
    }

    #[test]
    fn test_reflective_mode_skips_predicates_but_not_exact_table() {
        let map = Value::map(vec![]);
        let resolved = registry()
            .tree
            .resolve(&map.facets(), FormatterMode::Reflective);
        assert!(is_same(resolved, &formatters::REFLECT));

        let int = Value::from(1i32);
        let resolved = registry()
            .text
            .resolve(&int.facets(), FormatterMode::Reflective);
        assert!(is_same(resolved, &formatters::INT));
    }

    #[test]
    fn test_tree_table_omits_display_override() {
        let mut record = crate::value::Record::new("Wrapped", vec![]);
        record.kind = crate::value::RecordKind::Class;
        record.display = Some("Wrapped<7>".to_string());
        let value = Value::Record(record);

        let text = registry().text.resolve(&value.facets(), FormatterMode::Standard);
        assert!(is_same(text, &formatters::DISPLAY_OVERRIDE));
        let tree = registry().tree.resolve(&value.facets(), FormatterMode::Standard);
        assert!(is_same(tree, &formatters::REFLECT));
    }

    #[test]
    fn test_container_named_after_a_primitive_stays_structural() {
        use crate::value::{Seq, SeqKind};
        let mut seq = Seq::new(SeqKind::List, vec![Value::from(1.0f32)]);
        seq.type_name = Some("f32".to_string());
        let value = Value::Seq(seq);
        assert!(is_same(resolve_text(&value), &formatters::LIST));
    }

    #[test]
    fn test_structural_rules_win_over_display_override() {
        let mut record = crate::value::Record::new(
            "Duration",
            vec![crate::value::Field::public("secs", Value::from(10i64))],
        );
        record.display = Some("2h 15m".to_string());
        let value = Value::Record(record);
        assert!(is_same(resolve_text(&value), &formatters::RECORD));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let value = Value::list(vec![]);
        let first = resolve_text(&value);
        for _ in 0..8 {
            assert!(is_same(resolve_text(&value), first));
        }
    }
}
