//! The dynamic value model the engine traverses.
//!
//! Rust has no runtime reflection, so "arbitrary runtime values" are hosted
//! in the [`Value`] enum: a dynamically-typed model that carries the type
//! descriptors the formatter registry dispatches on. Values arrive here two
//! ways:
//!
//! - [`crate::to_value`] captures any `T: serde::Serialize` into a `Value`
//!   (struct names, field names, integer widths and container shapes are all
//!   taken from the serde data model), or
//! - values are built directly, which is the only way to express reference
//!   semantics: a [`Shared`] cell (`Rc<RefCell<Value>>`) has identity and can
//!   participate in cycles.
//!
//! ## Core Types
//!
//! - [`Value`]: any representable value (scalars, containers, records, enums,
//!   callables, type descriptors, shared reference cells)
//! - [`Shared`]: a reference cell with pointer identity, the cycle-capable part
//!   of the model
//! - [`Field`] / [`MemberError`]: a record member whose value may be a
//!   captured access failure, rendered inline rather than propagated
//! - [`TypeFacets`]: the runtime type descriptor the registry predicates
//!   inspect
//!
//! ## Examples
//!
//! ```rust
//! use reprs::{Value, to_repr};
//!
//! let v = Value::list(vec![Value::from(1i32), Value::from(2i32)]);
//! assert_eq!(to_repr(&v), "[1, 2]");
//! ```
//!
//! A self-referential list:
//!
//! ```rust
//! use reprs::{Shared, Value, to_repr};
//!
//! let cell = Shared::new(Value::list(vec![]));
//! if let Value::Seq(seq) = &mut *cell.borrow_mut() {
//!     seq.items.push(Value::Shared(cell.clone()));
//! }
//! let out = to_repr(&Value::Shared(cell));
//! assert!(out.contains("Circular Reference"));
//! ```

use chrono::{DateTime, Utc};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use thiserror::Error;

/// The width (and signedness) of a hosted integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

impl IntWidth {
    /// The Rust type name for this width (`"i32"`, `"u64"`, ...).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IntWidth::I8 => "i8",
            IntWidth::I16 => "i16",
            IntWidth::I32 => "i32",
            IntWidth::I64 => "i64",
            IntWidth::U8 => "u8",
            IntWidth::U16 => "u16",
            IntWidth::U32 => "u32",
            IntWidth::U64 => "u64",
        }
    }
}

/// An integer value together with its declared width.
///
/// The payload is an `i128` so every supported width (up to `u64`) fits
/// losslessly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Int {
    pub value: i128,
    pub width: IntWidth,
}

impl Int {
    #[must_use]
    pub const fn new(value: i128, width: IntWidth) -> Self {
        Int { value, width }
    }
}

/// A floating-point value preserving its binary width.
///
/// The two widths are kept distinct because the exact decimal expansion is
/// defined over the value's own bit pattern, not over a widened `f64`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Float {
    F32(f32),
    F64(f64),
}

impl Float {
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Float::F32(_) => "f32",
            Float::F64(_) => "f64",
        }
    }
}

/// The flavor of a sequence-shaped container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeqKind {
    List,
    Tuple,
    Set,
    PriorityQueue,
    Iterator,
}

impl SeqKind {
    /// Default type name used when the sequence carries none of its own.
    #[must_use]
    pub const fn default_type_name(&self) -> &'static str {
        match self {
            SeqKind::List => "Vec",
            SeqKind::Tuple => "tuple",
            SeqKind::Set => "HashSet",
            SeqKind::PriorityQueue => "BinaryHeap",
            SeqKind::Iterator => "Iterator",
        }
    }
}

/// A sequence-shaped container value.
#[derive(Clone, Debug, PartialEq)]
pub struct Seq {
    pub kind: SeqKind,
    pub type_name: Option<String>,
    pub items: Vec<Value>,
}

impl Seq {
    #[must_use]
    pub fn new(kind: SeqKind, items: Vec<Value>) -> Self {
        Seq {
            kind,
            type_name: None,
            items,
        }
    }
}

/// A key-value container value. Entries keep their insertion order.
#[derive(Clone, Debug, PartialEq)]
pub struct MapValue {
    pub type_name: Option<String>,
    pub entries: Vec<(Value, Value)>,
}

/// Whether a record has value ("struct") or reference ("class") semantics.
///
/// The distinction only affects the `kind` label in tree output and which
/// registry predicate matches: `Struct` records are record-like, `Class`
/// records fall through to the display-override rule or the reflection
/// fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RecordKind {
    #[default]
    Struct,
    Class,
}

/// Whether a member is a plain field or a computed property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MemberKind {
    #[default]
    Field,
    Property,
}

/// Member visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// A captured member-access failure.
///
/// When reading a member of a live object throws, the failure is recorded
/// here and rendered as an inline placeholder for that one member; traversal
/// of sibling members continues unaffected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("failed to read {member}: {message}")]
pub struct MemberError {
    pub member: String,
    pub message: String,
}

impl MemberError {
    #[must_use]
    pub fn new(member: &str, message: &str) -> Self {
        MemberError {
            member: member.to_string(),
            message: message.to_string(),
        }
    }
}

/// One member of a [`Record`].
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    pub kind: MemberKind,
    pub visibility: Visibility,
    pub value: Result<Value, MemberError>,
}

impl Field {
    /// A public field with a readable value.
    #[must_use]
    pub fn public(name: &str, value: Value) -> Self {
        Field {
            name: name.to_string(),
            kind: MemberKind::Field,
            visibility: Visibility::Public,
            value: Ok(value),
        }
    }

    /// A private field with a readable value.
    #[must_use]
    pub fn private(name: &str, value: Value) -> Self {
        Field {
            visibility: Visibility::Private,
            ..Field::public(name, value)
        }
    }

    /// A public computed property with a readable value.
    #[must_use]
    pub fn property(name: &str, value: Value) -> Self {
        Field {
            kind: MemberKind::Property,
            ..Field::public(name, value)
        }
    }

    /// A member whose accessor failed.
    #[must_use]
    pub fn failed(name: &str, message: &str) -> Self {
        Field {
            name: name.to_string(),
            kind: MemberKind::Property,
            visibility: Visibility::Public,
            value: Err(MemberError::new(name, message)),
        }
    }
}

/// A named-member composite value.
///
/// An empty `type_name` marks an anonymous record. `display` carries the
/// result of a custom stringification override when the hosted type has one;
/// text mode falls back to it for records no structural rule claims, tree
/// mode never does.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub type_name: String,
    pub kind: RecordKind,
    pub display: Option<String>,
    pub fields: Vec<Field>,
}

impl Record {
    #[must_use]
    pub fn new(type_name: &str, fields: Vec<Field>) -> Self {
        Record {
            type_name: type_name.to_string(),
            kind: RecordKind::Struct,
            display: None,
            fields,
        }
    }
}

/// A reference cell: the only values with identity, and the only way to form
/// cycles.
///
/// Cloning a `Shared` clones the handle, not the contents; equality is
/// pointer identity (structural comparison of a cyclic value would never
/// terminate).
#[derive(Clone)]
pub struct Shared(Rc<RefCell<Value>>);

impl Shared {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Shared(Rc::new(RefCell::new(value)))
    }

    /// The stable identity of this cell for the lifetime of the value.
    #[must_use]
    pub fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    /// Borrows the contained value.
    ///
    /// # Panics
    ///
    /// Panics if the value is currently mutably borrowed.
    #[must_use]
    pub fn borrow(&self) -> Ref<'_, Value> {
        self.0.borrow()
    }

    /// Mutably borrows the contained value, e.g. to splice the cell into its
    /// own contents when building a cyclic structure.
    ///
    /// # Panics
    ///
    /// Panics if the value is currently borrowed.
    #[must_use]
    pub fn borrow_mut(&self) -> RefMut<'_, Value> {
        self.0.borrow_mut()
    }
}

impl PartialEq for Shared {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for Shared {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the contents: a cyclic cell would recurse forever.
        write!(f, "Shared(@{:#x})", self.identity())
    }
}

/// A dynamically-typed representation of any value the engine can render.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(Int),
    Float(Float),
    Char(char),
    Str(String),
    Timestamp(DateTime<Utc>),
    /// Optional wrapper; the engine unwraps it before dispatch.
    Opt(Option<Box<Value>>),
    Seq(Seq),
    Map(MapValue),
    Record(Record),
    Enum {
        type_name: String,
        variant: String,
    },
    Func {
        name: String,
        signature: Option<String>,
    },
    TypeDesc {
        name: String,
    },
    Shared(Shared),
}

/// The runtime type descriptor registry predicates inspect.
///
/// Each facet answers one structural question about the value's type; many
/// values satisfy several facets at once (a map is also iterable), which is
/// why the registry evaluates its predicate rules in a fixed
/// most-specific-first order.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeFacets {
    pub name: String,
    pub is_scalar: bool,
    pub is_enum: bool,
    pub is_record: bool,
    pub is_map: bool,
    pub is_tuple: bool,
    pub is_list: bool,
    pub is_set: bool,
    pub is_priority_queue: bool,
    pub is_callable: bool,
    pub is_iterable: bool,
    pub is_anonymous: bool,
    pub is_type_desc: bool,
    pub has_display_override: bool,
}

impl Value {
    /// Builds a list-kind sequence.
    #[must_use]
    pub fn list(items: Vec<Value>) -> Self {
        Value::Seq(Seq::new(SeqKind::List, items))
    }

    /// Builds a tuple-kind sequence.
    #[must_use]
    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Seq(Seq::new(SeqKind::Tuple, items))
    }

    /// Builds a set-kind sequence.
    #[must_use]
    pub fn set(items: Vec<Value>) -> Self {
        Value::Seq(Seq::new(SeqKind::Set, items))
    }

    /// Builds a map from entry pairs, keeping their order.
    #[must_use]
    pub fn map(entries: Vec<(Value, Value)>) -> Self {
        Value::Map(MapValue {
            type_name: None,
            entries,
        })
    }

    /// Builds a named struct-kind record from fields.
    #[must_use]
    pub fn record(type_name: &str, fields: Vec<Field>) -> Self {
        Value::Record(Record::new(type_name, fields))
    }

    /// Wraps a value in a fresh reference cell.
    #[must_use]
    pub fn shared(value: Value) -> Self {
        Value::Shared(Shared::new(value))
    }

    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a reference cell.
    #[inline]
    #[must_use]
    pub const fn is_shared(&self) -> bool {
        matches!(self, Value::Shared(_))
    }

    /// The display type name of this value.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Int(i) => i.width.as_str().to_string(),
            Value::Float(f) => f.type_name().to_string(),
            Value::Char(_) => "char".to_string(),
            Value::Str(_) => "str".to_string(),
            Value::Timestamp(_) => "DateTime".to_string(),
            Value::Opt(_) => "Option".to_string(),
            Value::Seq(seq) => seq
                .type_name
                .clone()
                .unwrap_or_else(|| seq.kind.default_type_name().to_string()),
            Value::Map(map) => map
                .type_name
                .clone()
                .unwrap_or_else(|| "HashMap".to_string()),
            Value::Record(record) => {
                if record.type_name.is_empty() {
                    "<anonymous>".to_string()
                } else {
                    record.type_name.clone()
                }
            }
            Value::Enum { type_name, .. } => type_name.clone(),
            Value::Func { .. } => "fn".to_string(),
            Value::TypeDesc { .. } => "type".to_string(),
            Value::Shared(cell) => cell.borrow().type_name(),
        }
    }

    /// Whether this value's type is "obvious" under the hide-obvious display
    /// mode. The list is closed by design: primitives, timestamps, options
    /// and the common containers are obvious, everything else is not.
    #[must_use]
    pub fn is_obvious_type(&self) -> bool {
        match self {
            Value::Null
            | Value::Bool(_)
            | Value::Int(_)
            | Value::Float(_)
            | Value::Char(_)
            | Value::Str(_)
            | Value::Timestamp(_)
            | Value::Opt(_)
            | Value::Map(_) => true,
            Value::Seq(seq) => matches!(
                seq.kind,
                SeqKind::List | SeqKind::Tuple | SeqKind::Set
            ),
            Value::Record(_)
            | Value::Enum { .. }
            | Value::Func { .. }
            | Value::TypeDesc { .. } => false,
            Value::Shared(cell) => cell.borrow().is_obvious_type(),
        }
    }

    /// Computes the type descriptor for registry dispatch.
    #[must_use]
    pub fn facets(&self) -> TypeFacets {
        let mut facets = TypeFacets {
            name: self.type_name(),
            is_scalar: matches!(
                self,
                Value::Int(_)
                    | Value::Float(_)
                    | Value::Bool(_)
                    | Value::Char(_)
                    | Value::Str(_)
                    | Value::Timestamp(_)
            ),
            is_enum: false,
            is_record: false,
            is_map: false,
            is_tuple: false,
            is_list: false,
            is_set: false,
            is_priority_queue: false,
            is_callable: false,
            is_iterable: false,
            is_anonymous: false,
            is_type_desc: false,
            has_display_override: false,
        };
        match self {
            Value::Enum { .. } => facets.is_enum = true,
            Value::Record(record) => {
                facets.is_anonymous = record.type_name.is_empty();
                facets.is_record =
                    record.kind == RecordKind::Struct && !facets.is_anonymous;
                facets.has_display_override = record.display.is_some();
            }
            Value::Map(_) => {
                facets.is_map = true;
                facets.is_iterable = true;
            }
            Value::Seq(seq) => {
                facets.is_iterable = true;
                match seq.kind {
                    SeqKind::Tuple => facets.is_tuple = true,
                    SeqKind::List => facets.is_list = true,
                    SeqKind::Set => facets.is_set = true,
                    SeqKind::PriorityQueue => facets.is_priority_queue = true,
                    SeqKind::Iterator => {}
                }
            }
            Value::Func { .. } => facets.is_callable = true,
            Value::TypeDesc { .. } => facets.is_type_desc = true,
            Value::Shared(cell) => return cell.borrow().facets(),
            _ => {}
        }
        facets
    }
}

impl std::fmt::Display for Value {
    /// Renders with the default options; equivalent to [`crate::to_repr`].
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::to_repr(self))
    }
}

macro_rules! int_from {
    ($($ty:ty => $width:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Int(Int {
                        value: value as i128,
                        width: IntWidth::$width,
                    })
                }
            }
        )*
    };
}

int_from! {
    i8 => I8, i16 => I16, i32 => I32, i64 => I64,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64,
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(Float::F32(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(Float::F64(value))
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        Value::Opt(value.map(|v| Box::new(v.into())))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::list(value.into_iter().map(Into::into).collect())
    }
}
