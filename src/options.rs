//! Configuration options for value representation.
//!
//! This module provides the types that customize engine output:
//!
//! - [`ReprOptions`]: Main configuration struct
//! - [`TypeDisplay`]: Whether values are wrapped in a `TypeName(...)` prefix
//! - [`MemberScope`]: Which members the record/reflection formatters enumerate
//! - [`FormatterMode`]: Normal dispatch vs. forced reflection-based rendering
//! - [`ContainerStyle`]: How nested container elements inherit formatting
//!
//! `ReprOptions` is immutable: every `with_*` method consumes `self` and
//! returns a new value, so a configuration can be built once and shared
//! across any number of calls.
//!
//! ## Examples
//!
//! ```rust
//! use reprs::{ReprOptions, TypeDisplay, to_repr_with_options, Value};
//!
//! let options = ReprOptions::new()
//!     .with_int_format("X")
//!     .with_type_display(TypeDisplay::AlwaysShow)
//!     .with_max_elements(3);
//!
//! let out = to_repr_with_options(&Value::from(42i32), options);
//! assert_eq!(out, "0x2A_i32");
//! ```
//!
//! ## Numeric format directives
//!
//! Integer directives: `D` decimal (default), `X`/`x` hex upper/lower, `B`
//! binary, `O` octal, `Q` quaternary, `N` grouped; a trailing decimal count
//! zero-pads the digits (`X8` renders at least 8 hex digits). Float
//! directives: `exact` (default, bit-exact decimal expansion), `bits` (IEEE
//! bit fields), `hexpow` (hex-power literal), `F<p>` fixed, `E` scientific,
//! `G` general, `N<p>` grouped. An unrecognized directive falls back to the
//! plain `Display` rendering of the number.

/// Controls whether a rendered value is wrapped in a `TypeName(...)` prefix.
///
/// # Examples
///
/// ```rust
/// use reprs::TypeDisplay;
///
/// assert_eq!(TypeDisplay::default(), TypeDisplay::HideObvious);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TypeDisplay {
    /// Every value carries its type prefix.
    AlwaysShow,
    /// Values of "obvious" types (primitives, common containers, tuples) are
    /// rendered bare; everything else keeps the prefix.
    #[default]
    HideObvious,
    /// No value carries a type prefix.
    AlwaysHide,
}

/// Which members the record and reflection formatters enumerate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MemberScope {
    /// Public fields and properties only.
    #[default]
    Public,
    /// All members, private ones included.
    All,
}

/// Formatter dispatch mode.
///
/// `Reflective` bypasses the predicate rules and renders everything past the
/// exact-type table with the universal member enumerator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FormatterMode {
    #[default]
    Standard,
    Reflective,
}

/// How elements nested inside a container are formatted.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum ContainerStyle {
    /// Elements inherit the parent's numeric and type-display settings.
    #[default]
    Inherit,
    /// Elements use default numeric formats and hide their type prefixes.
    Simplified,
    /// Elements use the given options in place of the parent's.
    Custom(Box<ReprOptions>),
}

const UNLIMITED: i32 = -1;

/// Configuration options for the representation engine.
///
/// Limits are `i32` values where a negative number means "unlimited" and zero
/// means "emit zero items plus a truncation marker".
///
/// # Examples
///
/// ```rust
/// use reprs::{ReprOptions, TypeDisplay};
///
/// // Default: exact floats, decimal integers, hide-obvious types,
/// // depth 5, 10 properties, 50 elements, 120 characters.
/// let options = ReprOptions::new();
/// assert_eq!(options.max_depth, 5);
///
/// // Unlimited depth, hex integers, every type prefix shown.
/// let options = ReprOptions::new()
///     .with_max_depth(-1)
///     .with_int_format("x")
///     .with_type_display(TypeDisplay::AlwaysShow);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ReprOptions {
    pub int_format: String,
    pub float_format: String,
    pub type_display: TypeDisplay,
    pub member_scope: MemberScope,
    pub formatter_mode: FormatterMode,
    pub container_style: ContainerStyle,
    pub max_depth: i32,
    pub max_properties: i32,
    pub max_elements: i32,
    pub max_string_len: i32,
    pub pretty: bool,
}

impl Default for ReprOptions {
    fn default() -> Self {
        ReprOptions {
            int_format: "D".to_string(),
            float_format: "exact".to_string(),
            type_display: TypeDisplay::default(),
            member_scope: MemberScope::default(),
            formatter_mode: FormatterMode::default(),
            container_style: ContainerStyle::default(),
            max_depth: 5,
            max_properties: 10,
            max_elements: 50,
            max_string_len: 120,
            pretty: false,
        }
    }
}

impl ReprOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options with every limit disabled.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use reprs::ReprOptions;
    ///
    /// let options = ReprOptions::unlimited();
    /// assert!(options.max_depth < 0);
    /// assert!(options.max_elements < 0);
    /// ```
    #[must_use]
    pub fn unlimited() -> Self {
        ReprOptions {
            max_depth: UNLIMITED,
            max_properties: UNLIMITED,
            max_elements: UNLIMITED,
            max_string_len: UNLIMITED,
            ..Default::default()
        }
    }

    /// Sets the integer format directive (`D`, `X`, `x`, `B`, `O`, `Q`, `N`,
    /// with an optional min-digit suffix).
    #[must_use]
    pub fn with_int_format(mut self, directive: &str) -> Self {
        self.int_format = directive.to_string();
        self
    }

    /// Sets the float format directive (`exact`, `bits`, `hexpow`, `F<p>`,
    /// `E`, `G`, `N<p>`).
    #[must_use]
    pub fn with_float_format(mut self, directive: &str) -> Self {
        self.float_format = directive.to_string();
        self
    }

    /// Sets the type-prefix display mode.
    #[must_use]
    pub fn with_type_display(mut self, mode: TypeDisplay) -> Self {
        self.type_display = mode;
        self
    }

    /// Sets the member visibility scope.
    #[must_use]
    pub fn with_member_scope(mut self, scope: MemberScope) -> Self {
        self.member_scope = scope;
        self
    }

    /// Sets the formatter dispatch mode.
    #[must_use]
    pub fn with_formatter_mode(mut self, mode: FormatterMode) -> Self {
        self.formatter_mode = mode;
        self
    }

    /// Sets the container formatting strategy.
    #[must_use]
    pub fn with_container_style(mut self, style: ContainerStyle) -> Self {
        self.container_style = style;
        self
    }

    /// Sets the maximum recursion depth. Negative means unlimited; zero makes
    /// every non-null value render as the max-depth marker.
    #[must_use]
    pub fn with_max_depth(mut self, depth: i32) -> Self {
        self.max_depth = depth;
        self
    }

    /// Sets the maximum number of properties rendered per object.
    #[must_use]
    pub fn with_max_properties(mut self, count: i32) -> Self {
        self.max_properties = count;
        self
    }

    /// Sets the maximum number of elements rendered per collection.
    #[must_use]
    pub fn with_max_elements(mut self, count: i32) -> Self {
        self.max_elements = count;
        self
    }

    /// Sets the maximum number of characters rendered per string.
    #[must_use]
    pub fn with_max_string_len(mut self, count: i32) -> Self {
        self.max_string_len = count;
        self
    }

    /// Enables or disables pretty-printing of the tree-mode output.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// The options nested container elements should use, per the configured
    /// [`ContainerStyle`].
    #[must_use]
    pub(crate) fn for_container_elements(&self) -> ReprOptions {
        match &self.container_style {
            ContainerStyle::Inherit => self.clone(),
            ContainerStyle::Simplified => ReprOptions {
                int_format: "D".to_string(),
                float_format: "exact".to_string(),
                type_display: TypeDisplay::AlwaysHide,
                ..self.clone()
            },
            ContainerStyle::Custom(options) => (**options).clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ReprOptions::new();
        assert_eq!(options.int_format, "D");
        assert_eq!(options.float_format, "exact");
        assert_eq!(options.type_display, TypeDisplay::HideObvious);
        assert_eq!(options.max_depth, 5);
        assert_eq!(options.max_properties, 10);
        assert_eq!(options.max_elements, 50);
        assert_eq!(options.max_string_len, 120);
        assert!(!options.pretty);
    }

    #[test]
    fn test_builder_is_copy_on_write() {
        let base = ReprOptions::new();
        let derived = base.clone().with_max_depth(2).with_int_format("X4");
        assert_eq!(base.max_depth, 5);
        assert_eq!(derived.max_depth, 2);
        assert_eq!(derived.int_format, "X4");
    }

    #[test]
    fn test_simplified_container_elements() {
        let options = ReprOptions::new()
            .with_int_format("B")
            .with_type_display(TypeDisplay::AlwaysShow)
            .with_container_style(ContainerStyle::Simplified);
        let inner = options.for_container_elements();
        assert_eq!(inner.int_format, "D");
        assert_eq!(inner.type_display, TypeDisplay::AlwaysHide);
        // Limits carry over untouched.
        assert_eq!(inner.max_elements, options.max_elements);
    }

    #[test]
    fn test_custom_container_elements() {
        let custom = ReprOptions::new().with_int_format("Q");
        let options = ReprOptions::new()
            .with_container_style(ContainerStyle::Custom(Box::new(custom.clone())));
        assert_eq!(options.for_container_elements(), custom);
    }
}
