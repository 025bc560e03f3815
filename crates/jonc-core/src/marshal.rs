//! The marshalling engine: tree nodes to native values and back.
//!
//! Both directions consult the [registry](crate::registry) first and fall
//! back to structural algorithms, and both recurse through the same engine
//! for nested aggregates. The two directions fail differently, by design:
//!
//! - [`Marshaller::marshall`] is failure-tolerant. Every unmatched case
//!   yields `None` — never a panic, never an error. Callers check for it.
//! - [`Marshaller::serialize`] is total. Every value maps to *some* node;
//!   individual fields that cannot be read are dropped silently and the rest
//!   of the aggregate still serializes.
//!
//! Recursion depth is bounded only by the depth of the value or tree being
//! walked; there is no cycle detection. A self-referential structure will
//! exhaust the stack rather than fail gracefully.
//!
//! # Example
//! ```rust
//! use jonc_core::{parse, Marshaller};
//!
//! let marshaller = Marshaller::new();
//! let doc = parse("{ workers: 4 }").unwrap();
//! let workers: u32 = marshaller.marshall(doc.as_object().unwrap().get("workers")).unwrap();
//! assert_eq!(workers, 4);
//! ```

use std::any::{Any, TypeId};

use crate::defaults;
use crate::reflect::{Field, Reflect, Shape};
use crate::registry::Registry;
use crate::value::{Object, Primitive, Value};
use crate::write;

/// How a target type participates in tree-to-native dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeClass {
    /// Primitive-like: produced by coercions, never from objects or arrays.
    Primitive,
    /// Enumeration: produced by constant-name lookup.
    Enum,
    /// Ordered sequence: produced element-wise from array nodes.
    Sequence,
    /// Wrapper that absorbs conversion failure (`Option<T>`).
    Nullable,
    /// Everything else: produced by a registered adapter.
    Structured,
}

/// Compile-time descriptor for types the engine can produce.
///
/// Most types only need the marker impl (`impl Marshal for Config {}`) plus
/// a registered adapter; the hooks exist for the classes with intrinsic
/// structure. [`reflect_struct!`](crate::reflect_struct) and
/// [`reflect_enum!`](crate::reflect_enum) generate impls alongside the
/// serialization table.
pub trait Marshal: Sized + 'static {
    const CLASS: TypeClass = TypeClass::Structured;

    /// Enum targets: resolve a constant by exact name.
    fn from_variant(name: &str) -> Option<Self> {
        let _ = name;
        None
    }

    /// Sequence targets: build from array elements, in order.
    fn from_elements(marshaller: &Marshaller, items: &[Value]) -> Option<Self> {
        let _ = (marshaller, items);
        None
    }

    /// Nullable targets: wrap the inner conversion, absorbing failure.
    fn from_inner(marshaller: &Marshaller, node: &Value) -> Option<Self> {
        let _ = (marshaller, node);
        None
    }
}

macro_rules! marshal_primitive {
    ($($ty:ty),* $(,)?) => {
        $(impl Marshal for $ty {
            const CLASS: TypeClass = TypeClass::Primitive;
        })*
    };
}

marshal_primitive!((), bool, char, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, String);

impl Marshal for Value {}
impl Marshal for Object {}
impl Marshal for Primitive {}

impl<T: Marshal> Marshal for Vec<T> {
    const CLASS: TypeClass = TypeClass::Sequence;

    /// Strict: an element that cannot convert fails the whole conversion.
    /// Use `Vec<Option<T>>` to keep unconvertible positions as `None`.
    fn from_elements(marshaller: &Marshaller, items: &[Value]) -> Option<Self> {
        items.iter().map(|item| marshaller.marshall(Some(item))).collect()
    }
}

impl<T: Marshal> Marshal for Option<T> {
    const CLASS: TypeClass = TypeClass::Nullable;

    fn from_inner(marshaller: &Marshaller, node: &Value) -> Option<Self> {
        Some(marshaller.marshall(Some(node)))
    }
}

/// The conversion engine.
///
/// Construction installs the default strategy set and nothing else;
/// application types opt in through the `register_*` methods.
/// Registration needs `&mut self` — configure the engine first, then share
/// it freely (`&Marshaller` is all the conversion paths ever take).
pub struct Marshaller {
    registry: Registry,
}

impl Default for Marshaller {
    fn default() -> Self {
        Self::new()
    }
}

impl Marshaller {
    /// An engine pre-populated with the default strategy set.
    pub fn new() -> Self {
        let mut registry = Registry::new();
        defaults::install(&mut registry);
        Self { registry }
    }

    /// An engine with no strategies at all; every conversion must be
    /// registered explicitly.
    pub fn bare() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Install or replace the primitive coercion for `T`; the last
    /// registration wins.
    pub fn register_coercion<T: 'static>(
        &mut self,
        f: impl Fn(&Primitive) -> Option<T> + 'static,
    ) {
        self.registry.register_coercion(f);
    }

    /// Install or replace the object adapter for `T`; the last registration
    /// wins.
    pub fn register_adapter<T: 'static>(
        &mut self,
        f: impl Fn(&Object, &Marshaller) -> Option<T> + 'static,
    ) {
        self.registry.register_adapter(f);
    }

    /// Install or replace the serializer for `T`; the last registration
    /// wins, and a registered serializer always beats the structural walk.
    pub fn register_serializer<T: 'static>(
        &mut self,
        f: impl Fn(&T, &Marshaller) -> Value + 'static,
    ) {
        self.registry.register_serializer(f);
    }

    /// Convert a tree node into a `T`, or report that no strategy applies.
    ///
    /// Strategy order, first match wins:
    /// 1. no node → `None`
    /// 2. the node already is the requested representation
    ///    (`Value`, `Object`, `Primitive`, `Vec<Value>`) → cloned as-is
    /// 3. enum target + primitive node → constant-name lookup
    /// 4. `String` target → canonical text of any node (`"null"` for null,
    ///    compact rendering for objects and arrays)
    /// 5. primitive node → registered coercion
    /// 6. object node → registered adapter (primitive targets always fail)
    /// 7. array node → element-wise sequence construction (primitive targets
    ///    always fail)
    /// 8. `None`
    ///
    /// Numeric coercions narrow with `as`-cast semantics: integer narrowing
    /// truncates (`300` marshalled to `i8` is `44`), float-to-integer
    /// saturates.
    pub fn marshall<T: Marshal>(&self, node: Option<&Value>) -> Option<T> {
        let node = node?;

        if let Some(hit) = identity::<T>(node) {
            return Some(hit);
        }

        match T::CLASS {
            TypeClass::Enum => {
                return match node {
                    Value::Primitive(p) => T::from_variant(&p.to_text()),
                    _ => None,
                };
            }
            TypeClass::Nullable => return T::from_inner(self, node),
            _ => {}
        }

        if TypeId::of::<T>() == TypeId::of::<String>() {
            return cast(self.stringify(node));
        }

        match node {
            Value::Primitive(p) => {
                let coercion = self.registry.coercion(TypeId::of::<T>())?;
                coercion(p).and_then(downcast::<T>)
            }
            Value::Object(object) => {
                if T::CLASS == TypeClass::Primitive {
                    return None;
                }
                let adapter = self.registry.adapter(TypeId::of::<T>())?;
                adapter(object, self).and_then(downcast::<T>)
            }
            Value::Array(items) => {
                if T::CLASS == TypeClass::Primitive {
                    return None;
                }
                match T::CLASS {
                    TypeClass::Sequence => T::from_elements(self, items),
                    _ => None,
                }
            }
            Value::Null => None,
        }
    }

    /// Canonical text form of any node, for the string-coercion path.
    fn stringify(&self, node: &Value) -> String {
        match node {
            Value::Object(_) | Value::Array(_) => write::encode_compact(node),
            Value::Primitive(p) => p.to_text(),
            Value::Null => "null".to_string(),
        }
    }

    /// Convert any reflectable value into a tree node. This path never
    /// fails.
    ///
    /// Strategy order, first match wins:
    /// 1. absent value (`Option::None`) → null node
    /// 2. serializer registered for the value's exact runtime type
    /// 3. enum constant → primitive wrapping its name
    /// 4. sequence → array node, elements serialized in order
    /// 5. mapping → object node, keys by string form, no comments
    /// 6. plain aggregate → two-pass field walk (see below)
    ///
    /// The field walk emits externally-visible fields first, in declaration
    /// order, then the remaining fields that were not already emitted.
    /// Transient fields are excluded in both passes. A field whose accessor
    /// yields no value is skipped silently — indistinguishable, by design,
    /// from a field that never existed.
    pub fn serialize(&self, value: &dyn Reflect) -> Value {
        if value.is_absent() {
            return Value::Null;
        }
        if let Some(serializer) = self.registry.serializer(value.as_any().type_id()) {
            return serializer(value.as_any(), self);
        }
        match value.shape() {
            Shape::Inner(inner) => self.serialize(inner),
            Shape::Variant(name) => Value::Primitive(Primitive::Str(name.to_string())),
            Shape::Sequence(items) => {
                Value::Array(items.into_iter().map(|item| self.serialize(item)).collect())
            }
            Shape::Mapping(entries) => {
                let mut object = Object::new();
                for (key, entry) in entries {
                    object.insert(key, self.serialize(entry));
                }
                Value::Object(object)
            }
            Shape::Fields(fields) => Value::Object(self.serialize_fields(&fields)),
        }
    }

    fn serialize_fields(&self, fields: &[Field<'_>]) -> Object {
        let mut object = Object::new();
        for field in fields.iter().filter(|field| field.public) {
            self.emit_field(&mut object, field);
        }
        for field in fields.iter().filter(|field| !field.public) {
            if object.contains_key(field.name) {
                continue;
            }
            self.emit_field(&mut object, field);
        }
        object
    }

    fn emit_field(&self, object: &mut Object, field: &Field<'_>) {
        if field.transient {
            return;
        }
        let Some(value) = field.value else {
            return;
        };
        let node = self.serialize(value);
        match field.comment {
            Some(comment) => object.insert_with_comment(field.name, node, comment),
            None => object.insert(field.name, node),
        }
    }
}

/// The identity fast path: the node's own representation already satisfies
/// the target type.
fn identity<T: 'static>(node: &Value) -> Option<T> {
    let target = TypeId::of::<T>();
    if target == TypeId::of::<Value>() {
        return cast(node.clone());
    }
    match node {
        Value::Object(object) if target == TypeId::of::<Object>() => cast(object.clone()),
        Value::Primitive(p) if target == TypeId::of::<Primitive>() => cast(p.clone()),
        Value::Array(items) if target == TypeId::of::<Vec<Value>>() => cast(items.clone()),
        _ => None,
    }
}

fn cast<T: 'static, U: 'static>(value: U) -> Option<T> {
    downcast::<T>(Box::new(value))
}

fn downcast<T: 'static>(boxed: Box<dyn Any>) -> Option<T> {
    boxed.downcast::<T>().ok().map(|boxed| *boxed)
}
