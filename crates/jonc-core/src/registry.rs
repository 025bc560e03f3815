//! The conversion registry: three independent `TypeId`-keyed tables of
//! strategy functions.
//!
//! Registration is an idempotent overwrite — the last registration for a
//! given type wins — and there is no removal. Lookups report absence as
//! `None`; nothing in this module panics or returns an error. Registration
//! is a configuration-time operation: the engine only hands out `&mut`
//! access before steady-state use, so the borrow checker enforces the
//! configure-then-share phase split.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::marshal::Marshaller;
use crate::value::{Object, Primitive, Value};

/// Coerces a primitive's raw value into a boxed value of the registered type.
pub type Coercion = Box<dyn Fn(&Primitive) -> Option<Box<dyn Any>>>;

/// Builds a boxed value of the registered type directly from an object node.
/// The marshaller parameter lets adapter logic recurse through the same
/// registry for nested members.
pub type Adapter = Box<dyn Fn(&Object, &Marshaller) -> Option<Box<dyn Any>>>;

/// Turns a native value of the registered type into a tree node.
pub type Serializer = Box<dyn Fn(&dyn Any, &Marshaller) -> Value>;

#[derive(Default)]
pub struct Registry {
    coercions: HashMap<TypeId, Coercion>,
    adapters: HashMap<TypeId, Adapter>,
    serializers: HashMap<TypeId, Serializer>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or replace the primitive coercion for `T`.
    pub fn register_coercion<T: 'static>(
        &mut self,
        f: impl Fn(&Primitive) -> Option<T> + 'static,
    ) {
        self.coercions.insert(
            TypeId::of::<T>(),
            Box::new(move |raw| f(raw).map(|value| Box::new(value) as Box<dyn Any>)),
        );
    }

    /// Install or replace the structured adapter for `T`.
    pub fn register_adapter<T: 'static>(
        &mut self,
        f: impl Fn(&Object, &Marshaller) -> Option<T> + 'static,
    ) {
        self.adapters.insert(
            TypeId::of::<T>(),
            Box::new(move |object, marshaller| {
                f(object, marshaller).map(|value| Box::new(value) as Box<dyn Any>)
            }),
        );
    }

    /// Install or replace the outbound serializer for `T`.
    pub fn register_serializer<T: 'static>(
        &mut self,
        f: impl Fn(&T, &Marshaller) -> Value + 'static,
    ) {
        self.serializers.insert(
            TypeId::of::<T>(),
            Box::new(move |any, marshaller| match any.downcast_ref::<T>() {
                Some(value) => f(value, marshaller),
                None => Value::Null,
            }),
        );
    }

    pub fn coercion(&self, target: TypeId) -> Option<&Coercion> {
        self.coercions.get(&target)
    }

    pub fn adapter(&self, target: TypeId) -> Option<&Adapter> {
        self.adapters.get(&target)
    }

    pub fn serializer(&self, target: TypeId) -> Option<&Serializer> {
        self.serializers.get(&target)
    }
}
