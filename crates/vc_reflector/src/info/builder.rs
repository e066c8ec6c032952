use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::marker::PhantomData;

use indexmap::IndexMap;

use crate::info::{
    ClassInfo, ClassKind, FieldUpcast, MethodInfo, ParentLink, PropertyInfo, Signature,
};
use crate::reflector::InvokeError;
use crate::{Arguments, FromValue, Value, ValueError, Visibility};

// -----------------------------------------------------------------------------
// ClassBuilder

/// Builds the [`ClassInfo`] of a class whose instances are `T`.
///
/// This is the capability table a type opts into: each property and method
/// is registered together with the closure that reaches it, whatever its
/// declared visibility.
///
/// # Examples
///
/// ```
/// use vc_reflector::{Value, Visibility};
/// use vc_reflector::info::{ClassBuilder, ParamInfo, Signature};
///
/// struct Counter { hits: i64, label: Option<String> }
///
/// let info = ClassBuilder::<Counter>::new("App\\Counter")
///     .constant("MAX", 100)
///     .field("hits", Visibility::Private, |c| &c.hits, |c| &mut c.hits)
///     .optional_field("label", Visibility::Protected, |c| &c.label, |c| &mut c.label)
///     .method(
///         Signature::new("bump", Visibility::Public)
///             .with_param(ParamInfo::new("by").with_type("int").with_default(1)),
///         |c, mut args| {
///             c.hits += args.take::<i64>(0)?;
///             Ok(Value::Int(c.hits))
///         },
///     )
///     .build();
///
/// assert_eq!(info.name(), "App\\Counter");
/// assert_eq!(info.short_name(), "Counter");
/// assert!(info.property("hits").is_some());
/// assert!(info.method("BUMP").is_some());
/// ```
pub struct ClassBuilder<T: Any> {
    info: ClassInfo,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any> ClassBuilder<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            info: ClassInfo {
                name,
                kind: ClassKind::Class,
                type_id: Some(TypeId::of::<T>()),
                type_name: Some(core::any::type_name::<T>()),
                parent: None,
                interfaces: Vec::new(),
                constants: IndexMap::new(),
                properties: Vec::new(),
                methods: Vec::new(),
                docs: None,
            },
            _marker: PhantomData,
        }
    }

    /// Declares `name` as the parent class, reached through an embedded
    /// field of type `P`.
    ///
    /// The parent's instance properties and methods then resolve on `T`
    /// instances.
    pub fn extends<P: Any>(
        mut self,
        name: &'static str,
        as_ref: fn(&T) -> &P,
        as_mut: fn(&mut T) -> &mut P,
    ) -> Self {
        let upcast = FieldUpcast { as_ref, as_mut };
        self.info.parent = Some(ParentLink::new(name, Some(Box::new(upcast))));
        self
    }

    /// Declares `name` as the parent class without an instance projection.
    ///
    /// Only the parent's static members, constants and interfaces are
    /// inherited in a reachable way.
    pub fn parent(mut self, name: &'static str) -> Self {
        self.info.parent = Some(ParentLink::new(name, None));
        self
    }

    pub fn implements(mut self, interface: &'static str) -> Self {
        self.info.interfaces.push(interface);
        self
    }

    pub fn constant(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        self.info.constants.insert(name, value.into());
        self
    }

    /// Replaces docs (overwrite, do not merge).
    pub fn with_docs(mut self, docs: &'static str) -> Self {
        self.info.docs = Some(docs);
        self
    }

    /// Registers a property backed by a plain field, which is always set.
    pub fn field<F>(
        self,
        name: &'static str,
        visibility: Visibility,
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
    ) -> Self
    where
        F: Clone + Into<Value> + FromValue + 'static,
    {
        self.property(
            name,
            visibility,
            move |this| Some(get(this).clone().into()),
            move |this, value| {
                *get_mut(this) = F::from_value(value)?;
                Ok(())
            },
        )
    }

    /// Registers a property backed by an `Option` field.
    ///
    /// `None` reads as an unset property; writing `null` unsets it.
    pub fn optional_field<F>(
        self,
        name: &'static str,
        visibility: Visibility,
        get: fn(&T) -> &Option<F>,
        get_mut: fn(&mut T) -> &mut Option<F>,
    ) -> Self
    where
        F: Clone + Into<Value> + FromValue + 'static,
    {
        self.property(
            name,
            visibility,
            move |this| get(this).clone().map(Into::into),
            move |this, value| {
                *get_mut(this) = Option::<F>::from_value(value)?;
                Ok(())
            },
        )
    }

    /// Registers a property with custom accessors.
    pub fn property(
        mut self,
        name: &'static str,
        visibility: Visibility,
        get: impl Fn(&T) -> Option<Value> + Send + Sync + 'static,
        set: impl Fn(&mut T, Value) -> Result<(), ValueError> + Send + Sync + 'static,
    ) -> Self {
        self.info
            .properties
            .push(PropertyInfo::instance::<T>(name, visibility, get, set));
        self
    }

    /// Registers a static property; the class owns its value.
    pub fn static_property(
        mut self,
        name: &'static str,
        visibility: Visibility,
        initial: impl Into<Value>,
    ) -> Self {
        self.info
            .properties
            .push(PropertyInfo::new_static(name, visibility, initial));
        self
    }

    /// Registers a prepared [`PropertyInfo`], e.g. one carrying docs.
    pub fn property_info(mut self, property: PropertyInfo) -> Self {
        self.info.properties.push(property);
        self
    }

    /// Registers an instance method.
    pub fn method(
        mut self,
        signature: Signature,
        body: impl Fn(&mut T, Arguments) -> Result<Value, InvokeError> + Send + Sync + 'static,
    ) -> Self {
        self.info
            .methods
            .push(MethodInfo::instance::<T>(signature, body));
        self
    }

    /// Registers a static method.
    pub fn static_method(
        mut self,
        signature: Signature,
        body: impl Fn(Arguments) -> Result<Value, InvokeError> + Send + Sync + 'static,
    ) -> Self {
        self.info
            .methods
            .push(MethodInfo::new_static(signature, body));
        self
    }

    /// Registers a method declared without a body.
    pub fn abstract_method(mut self, signature: Signature) -> Self {
        self.info.methods.push(MethodInfo::new_abstract(signature));
        self
    }

    #[inline]
    pub fn build(self) -> ClassInfo {
        self.info
    }
}

// -----------------------------------------------------------------------------
// InterfaceBuilder

/// Builds the [`ClassInfo`] of an interface.
///
/// Interfaces carry constants, abstract method signatures and the list of
/// interfaces they extend; they have no instances.
///
/// # Examples
///
/// ```
/// use vc_reflector::{Visibility, info::{InterfaceBuilder, Signature}};
///
/// let info = InterfaceBuilder::new("App\\Contracts\\Named")
///     .extends("App\\Contracts\\Labeled")
///     .constant("SEPARATOR", " ")
///     .method(Signature::new("name", Visibility::Public))
///     .build();
///
/// assert!(info.is_interface());
/// assert_eq!(info.interfaces(), ["App\\Contracts\\Labeled"]);
/// assert!(info.method("name").unwrap().is_abstract());
/// ```
pub struct InterfaceBuilder {
    info: ClassInfo,
}

impl InterfaceBuilder {
    pub fn new(name: &'static str) -> Self {
        Self {
            info: ClassInfo {
                name,
                kind: ClassKind::Interface,
                type_id: None,
                type_name: None,
                parent: None,
                interfaces: Vec::new(),
                constants: IndexMap::new(),
                properties: Vec::new(),
                methods: Vec::new(),
                docs: None,
            },
        }
    }

    pub fn extends(mut self, interface: &'static str) -> Self {
        self.info.interfaces.push(interface);
        self
    }

    pub fn constant(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        self.info.constants.insert(name, value.into());
        self
    }

    pub fn method(mut self, signature: Signature) -> Self {
        self.info.methods.push(MethodInfo::new_abstract(signature));
        self
    }

    /// Replaces docs (overwrite, do not merge).
    pub fn with_docs(mut self, docs: &'static str) -> Self {
        self.info.docs = Some(docs);
        self
    }

    #[inline]
    pub fn build(self) -> ClassInfo {
        self.info
    }
}
