//! A typed bag of dependencies, looked up by type rather than by name. The
//! `with_environment!` macro generates the lookups; this module holds the
//! runtime the generated code calls into.

use std::any::type_name;
use std::any::Any;
use std::any::TypeId;
use std::collections::HashMap;
use std::ops::Deref;
use std::rc::Rc;

// ======================
// === ObservedObject ===
// ======================

/// A shared handle to an object stored in an [`Environment`]. Cloning the
/// handle never clones the object.
#[derive(Debug)]
pub struct ObservedObject<T>(Rc<T>);

impl<T> ObservedObject<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(value))
    }
}

impl<T> Clone for ObservedObject<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> Deref for ObservedObject<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

// ================
// === Observed ===
// ================

/// A value copied out of an [`Environment`].
#[derive(Clone, Debug)]
pub struct Observed<T>(T);

impl<T> Observed<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Observed<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

// ===================
// === Environment ===
// ===================

/// Holds at most one object and one value per type. Lookups panic when the
/// type is absent; an environment is assembled once at startup and a missing
/// entry is a programming error, not a recoverable condition.
#[derive(Default)]
pub struct Environment {
    objects: HashMap<TypeId, Rc<dyn Any>>,
    values: HashMap<TypeId, Box<dyn Any>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` as the shared object for its type, replacing any
    /// previous one.
    pub fn insert_object<T: 'static>(&mut self, value: T) {
        self.objects.insert(TypeId::of::<T>(), Rc::new(value));
    }

    /// Stores `value` as the copied value for its type, replacing any
    /// previous one.
    pub fn insert_value<T: 'static>(&mut self, value: T) {
        self.values.insert(TypeId::of::<T>(), Box::new(value));
    }

    pub fn with_object<T: 'static>(mut self, value: T) -> Self {
        self.insert_object(value);
        self
    }

    pub fn with_value<T: 'static>(mut self, value: T) -> Self {
        self.insert_value(value);
        self
    }

    /// The shared object of type `T`.
    ///
    /// # Panics
    /// Panics if no object of type `T` was inserted.
    pub fn object<T: 'static>(&self) -> ObservedObject<T> {
        let entry = self
            .objects
            .get(&TypeId::of::<T>())
            .unwrap_or_else(|| panic!("no `{}` object in the environment", type_name::<T>()));
        match Rc::clone(entry).downcast::<T>() {
            Ok(object) => ObservedObject(object),
            Err(_) => panic!("`{}` object stored under a foreign key", type_name::<T>()),
        }
    }

    /// A copy of the value of type `T`.
    ///
    /// # Panics
    /// Panics if no value of type `T` was inserted.
    pub fn value<T: Clone + 'static>(&self) -> Observed<T> {
        let entry = self
            .values
            .get(&TypeId::of::<T>())
            .unwrap_or_else(|| panic!("no `{}` value in the environment", type_name::<T>()));
        match entry.downcast_ref::<T>() {
            Some(value) => Observed(value.clone()),
            None => panic!("`{}` value stored under a foreign key", type_name::<T>()),
        }
    }

    /// Lookup stub for declared types the environment cannot provide. The
    /// generator keeps such variables in the signature but routes them here.
    ///
    /// # Panics
    /// Always.
    #[allow(clippy::unused_self)]
    pub fn unsupported<T>(&self) -> T {
        panic!("`{}` is not an observable environment type", type_name::<T>())
    }
}
