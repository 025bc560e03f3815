//! The introspection seam for generic serialization.
//!
//! Rust has no runtime field enumeration, so every type that wants to ride
//! the structural fallback describes itself through [`Reflect`]: a handle to
//! the concrete value for registry dispatch (`as_any`), an absence test
//! (`Option::None` serializes as `null`), and a [`Shape`] the engine walks.
//! Field tables are written once per type — by hand, or through the
//! [`reflect_struct!`] and [`reflect_enum!`] macros.
//!
//! Associated constants are not instance state and can never appear in a
//! field table, so "static" members are excluded by construction; per-field
//! opt-out is the explicit `transient` flag, which the engine skips in both
//! passes of the field walk.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;

use crate::value::{Object, Primitive, Value};

/// A value the serialization engine can inspect.
pub trait Reflect: Any {
    /// The concrete value, for registry dispatch by `TypeId`.
    fn as_any(&self) -> &dyn Any;

    /// True when the value stands for "no value at all"; serialized as
    /// `null` before any other strategy is consulted.
    fn is_absent(&self) -> bool {
        false
    }

    /// How the structural fallback sees this value. The default — an empty
    /// field list — suits types that only ever serialize through a
    /// registered strategy.
    fn shape(&self) -> Shape<'_> {
        Shape::Fields(Vec::new())
    }
}

/// The structural classification the engine dispatches on when no serializer
/// is registered for a value's type.
pub enum Shape<'a> {
    /// Defer to a wrapped value (`Option::Some`, `Box`).
    Inner(&'a dyn Reflect),
    /// An enumeration constant, serialized as its name.
    Variant(&'static str),
    /// Index-ordered elements.
    Sequence(Vec<&'a dyn Reflect>),
    /// String-keyed entries in iteration order.
    Mapping(Vec<(String, &'a dyn Reflect)>),
    /// A plain aggregate, walked field by field.
    Fields(Vec<Field<'a>>),
}

/// One row of an aggregate's field table.
pub struct Field<'a> {
    /// Key the field is emitted under.
    pub name: &'static str,
    /// Externally-visible fields are emitted in the first pass, the rest in
    /// the second.
    pub public: bool,
    /// Transient fields are never serialized.
    pub transient: bool,
    /// Comment attached to the entry when the field is emitted.
    pub comment: Option<&'static str>,
    /// Current value. `None` marks a field that could not be read; the
    /// engine skips it silently.
    pub value: Option<&'a dyn Reflect>,
}

macro_rules! reflect_opaque {
    ($($ty:ty),* $(,)?) => {
        $(impl Reflect for $ty {
            fn as_any(&self) -> &dyn Any {
                self
            }
        })*
    };
}

reflect_opaque!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    String,
    &'static str,
);

// Tree fragments embedded in native aggregates; the default strategy set
// installs identity serializers for these.
reflect_opaque!(Value, Object, Primitive);

impl<T: Reflect> Reflect for Option<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn is_absent(&self) -> bool {
        self.is_none()
    }

    fn shape(&self) -> Shape<'_> {
        match self {
            Some(inner) => Shape::Inner(inner),
            None => Shape::Fields(Vec::new()),
        }
    }
}

impl<T: Reflect> Reflect for Box<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Inner(&**self)
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(self.iter().map(|item| item as &dyn Reflect).collect())
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(self.iter().map(|item| item as &dyn Reflect).collect())
    }
}

impl<K: Display + 'static, V: Reflect> Reflect for HashMap<K, V> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Mapping(
            self.iter()
                .map(|(key, value)| (key.to_string(), value as &dyn Reflect))
                .collect(),
        )
    }
}

impl<K: Display + 'static, V: Reflect> Reflect for BTreeMap<K, V> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Mapping(
            self.iter()
                .map(|(key, value)| (key.to_string(), value as &dyn Reflect))
                .collect(),
        )
    }
}

/// Generates the field table for a plain struct: a [`Reflect`] impl whose
/// shape lists the declared fields in order, plus a [`Marshal`] marker impl
/// so the type can be targeted by a registered adapter.
///
/// Field entries end with `;` and come in three forms, each optionally
/// prefixed with `transient` and optionally followed by `= "comment"`:
///
/// ```rust
/// struct Server {
///     host: String,
///     port: u16,
///     attempts: i32,
///     scratch: Vec<String>,
/// }
///
/// jonc_core::reflect_struct!(Server {
///     pub host = "Interface the listener binds";
///     pub port;
///     attempts;          // non-public: emitted in the second pass
///     transient scratch; // never serialized
/// });
/// ```
///
/// The `pub` marker controls emission-pass ordering only; it is independent
/// of the field's Rust visibility. Only unit field access is generated, so
/// the macro suits plain named-field structs.
///
/// [`Marshal`]: crate::Marshal
#[macro_export]
macro_rules! reflect_struct {
    ($ty:ident { $($body:tt)* }) => {
        impl $crate::Reflect for $ty {
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn shape(&self) -> $crate::Shape<'_> {
                let mut fields = ::std::vec::Vec::new();
                $crate::reflect_struct!(@fields self fields $($body)*);
                $crate::Shape::Fields(fields)
            }
        }

        impl $crate::Marshal for $ty {}
    };

    (@fields $this:ident $out:ident) => {};
    (@fields $this:ident $out:ident transient pub $name:ident ; $($rest:tt)*) => {
        $out.push($crate::Field {
            name: stringify!($name),
            public: true,
            transient: true,
            comment: ::std::option::Option::None,
            value: ::std::option::Option::Some(&$this.$name as &dyn $crate::Reflect),
        });
        $crate::reflect_struct!(@fields $this $out $($rest)*);
    };
    (@fields $this:ident $out:ident transient $name:ident ; $($rest:tt)*) => {
        $out.push($crate::Field {
            name: stringify!($name),
            public: false,
            transient: true,
            comment: ::std::option::Option::None,
            value: ::std::option::Option::Some(&$this.$name as &dyn $crate::Reflect),
        });
        $crate::reflect_struct!(@fields $this $out $($rest)*);
    };
    (@fields $this:ident $out:ident pub $name:ident = $comment:literal ; $($rest:tt)*) => {
        $out.push($crate::Field {
            name: stringify!($name),
            public: true,
            transient: false,
            comment: ::std::option::Option::Some($comment),
            value: ::std::option::Option::Some(&$this.$name as &dyn $crate::Reflect),
        });
        $crate::reflect_struct!(@fields $this $out $($rest)*);
    };
    (@fields $this:ident $out:ident pub $name:ident ; $($rest:tt)*) => {
        $out.push($crate::Field {
            name: stringify!($name),
            public: true,
            transient: false,
            comment: ::std::option::Option::None,
            value: ::std::option::Option::Some(&$this.$name as &dyn $crate::Reflect),
        });
        $crate::reflect_struct!(@fields $this $out $($rest)*);
    };
    (@fields $this:ident $out:ident $name:ident = $comment:literal ; $($rest:tt)*) => {
        $out.push($crate::Field {
            name: stringify!($name),
            public: false,
            transient: false,
            comment: ::std::option::Option::Some($comment),
            value: ::std::option::Option::Some(&$this.$name as &dyn $crate::Reflect),
        });
        $crate::reflect_struct!(@fields $this $out $($rest)*);
    };
    (@fields $this:ident $out:ident $name:ident ; $($rest:tt)*) => {
        $out.push($crate::Field {
            name: stringify!($name),
            public: false,
            transient: false,
            comment: ::std::option::Option::None,
            value: ::std::option::Option::Some(&$this.$name as &dyn $crate::Reflect),
        });
        $crate::reflect_struct!(@fields $this $out $($rest)*);
    };
}

/// Generates [`Reflect`] and [`Marshal`] impls for a unit-variant enum:
/// constants serialize as their names and marshall back by exact name match.
///
/// ```rust
/// #[derive(Debug, PartialEq)]
/// enum Mode { Active, Passive }
///
/// jonc_core::reflect_enum!(Mode { Active, Passive });
/// ```
///
/// [`Marshal`]: crate::Marshal
#[macro_export]
macro_rules! reflect_enum {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::Reflect for $ty {
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn shape(&self) -> $crate::Shape<'_> {
                $crate::Shape::Variant(match self {
                    $( $ty::$variant => stringify!($variant), )+
                })
            }
        }

        impl $crate::Marshal for $ty {
            const CLASS: $crate::TypeClass = $crate::TypeClass::Enum;

            fn from_variant(name: &str) -> ::std::option::Option<Self> {
                match name {
                    $( stringify!($variant) => ::std::option::Option::Some($ty::$variant), )+
                    _ => ::std::option::Option::None,
                }
            }
        }
    };
}
