//! The built-in strategy set for primitive-like types, installed once at
//! engine construction.
//!
//! Outbound, integer-like values normalize to the 64-bit representation
//! (`u64` values above `i64::MAX` wrap) and floats to `f64`. Inbound numeric
//! coercions accept either numeric representation and narrow with `as`-cast
//! semantics: integer narrowing truncates, float-to-integer saturates.

use crate::registry::Registry;
use crate::value::{Object, Primitive, Value};

pub(crate) fn install(registry: &mut Registry) {
    install_coercions(registry);
    install_serializers(registry);
}

fn install_coercions(registry: &mut Registry) {
    macro_rules! numeric {
        ($($ty:ty),*) => {
            $(registry.register_coercion::<$ty>(|raw| match raw {
                Primitive::Int(n) => Some(*n as $ty),
                Primitive::Float(f) => Some(*f as $ty),
                _ => None,
            });)*
        };
    }
    numeric!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

    registry.register_coercion::<bool>(|raw| match raw {
        Primitive::Bool(b) => Some(*b),
        _ => None,
    });

    // Numeric sources go through the scalar-value lattice; anything else
    // contributes the first character of its text form.
    registry.register_coercion::<char>(|raw| match raw {
        Primitive::Int(n) => char::from_u32(*n as u32),
        Primitive::Float(f) => char::from_u32(*f as u32),
        other => other.to_text().chars().next(),
    });

    registry.register_coercion::<String>(|raw| Some(raw.to_text()));

    // The unit coercion deliberately never produces a value.
    registry.register_coercion::<()>(|_| None);
}

fn install_serializers(registry: &mut Registry) {
    macro_rules! integer {
        ($($ty:ty),*) => {
            $(registry.register_serializer::<$ty>(|value, _| {
                Value::Primitive(Primitive::Int(*value as i64))
            });)*
        };
    }
    integer!(i8, i16, i32, i64, u8, u16, u32, u64);

    macro_rules! float {
        ($($ty:ty),*) => {
            $(registry.register_serializer::<$ty>(|value, _| {
                Value::Primitive(Primitive::Float(*value as f64))
            });)*
        };
    }
    float!(f32, f64);

    registry.register_serializer::<bool>(|value, _| Value::Primitive(Primitive::Bool(*value)));
    registry.register_serializer::<char>(|value, _| Value::Primitive(Primitive::Char(*value)));
    registry
        .register_serializer::<String>(|value, _| Value::Primitive(Primitive::Str(value.clone())));
    registry.register_serializer::<&'static str>(|value, _| {
        Value::Primitive(Primitive::Str((*value).to_string()))
    });
    registry.register_serializer::<()>(|_, _| Value::Null);

    // Tree fragments embedded in native aggregates pass through unchanged.
    registry.register_serializer::<Value>(|value, _| value.clone());
    registry.register_serializer::<Object>(|value, _| Value::Object(value.clone()));
    registry.register_serializer::<Primitive>(|value, _| Value::Primitive(value.clone()));
}
