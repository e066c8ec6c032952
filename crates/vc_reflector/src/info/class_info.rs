use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;

use indexmap::IndexMap;

use crate::Value;
use crate::info::{MethodInfo, PropertyInfo};

// -----------------------------------------------------------------------------
// Upcast

/// Views an instance of a class as an instance of its parent class.
///
/// Rust has no inheritance, so a subclass embeds its parent and the link
/// records how to reach it.
pub(crate) trait Upcast: Send + Sync {
    fn upcast<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn Any>;

    fn upcast_mut<'a>(&self, value: &'a mut dyn Any) -> Option<&'a mut dyn Any>;
}

/// An [`Upcast`] through a pair of field projections.
pub(crate) struct FieldUpcast<C, P> {
    pub as_ref: fn(&C) -> &P,
    pub as_mut: fn(&mut C) -> &mut P,
}

impl<C: Any, P: Any> Upcast for FieldUpcast<C, P> {
    fn upcast<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn Any> {
        let child = value.downcast_ref::<C>()?;
        Some((self.as_ref)(child))
    }

    fn upcast_mut<'a>(&self, value: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        let child = value.downcast_mut::<C>()?;
        Some((self.as_mut)(child))
    }
}

// -----------------------------------------------------------------------------
// ParentLink

/// The declared parent of a class.
pub struct ParentLink {
    name: &'static str,
    upcast: Option<Box<dyn Upcast>>,
}

impl ParentLink {
    #[inline]
    pub(crate) fn new(name: &'static str, upcast: Option<Box<dyn Upcast>>) -> Self {
        Self { name, upcast }
    }

    /// Returns the parent class name as declared.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether instances can be viewed as the parent.
    ///
    /// Without it only the parent's static members are reachable from
    /// the child.
    #[inline]
    pub const fn has_upcast(&self) -> bool {
        self.upcast.is_some()
    }

    pub(crate) fn upcast<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn Any> {
        self.upcast.as_ref()?.upcast(value)
    }

    pub(crate) fn upcast_mut<'a>(&self, value: &'a mut dyn Any) -> Option<&'a mut dyn Any> {
        self.upcast.as_ref()?.upcast_mut(value)
    }
}

impl fmt::Debug for ParentLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParentLink")
            .field("name", &self.name)
            .field("upcast", &self.has_upcast())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ClassKind

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
}

// -----------------------------------------------------------------------------
// ClassInfo

/// Everything registered about one class or interface.
///
/// Created through [`ClassBuilder`](crate::info::ClassBuilder) or
/// [`InterfaceBuilder`](crate::info::InterfaceBuilder) and stored in a
/// [`ClassRegistry`](crate::registry::ClassRegistry). Members listed here
/// are the ones declared by this class only; inherited members are resolved
/// by the registry.
///
/// For an interface, [`interfaces`](Self::interfaces) lists the interfaces
/// it extends.
#[derive(Debug)]
pub struct ClassInfo {
    pub(crate) name: &'static str,
    pub(crate) kind: ClassKind,
    pub(crate) type_id: Option<TypeId>,
    pub(crate) type_name: Option<&'static str>,
    pub(crate) parent: Option<ParentLink>,
    pub(crate) interfaces: Vec<&'static str>,
    pub(crate) constants: IndexMap<&'static str, Value>,
    pub(crate) properties: Vec<PropertyInfo>,
    pub(crate) methods: Vec<MethodInfo>,
    pub(crate) docs: Option<&'static str>,
}

impl ClassInfo {
    /// Returns the declared class name, e.g. `App\Models\User`.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the part of the name after the last `\`.
    pub fn short_name(&self) -> &'static str {
        match self.name.rfind('\\') {
            Some(index) => &self.name[index + 1..],
            None => self.name,
        }
    }

    #[inline]
    pub const fn kind(&self) -> ClassKind {
        self.kind
    }

    #[inline]
    pub const fn is_interface(&self) -> bool {
        matches!(self.kind, ClassKind::Interface)
    }

    /// Returns the `TypeId` of the Rust type backing instances, if any.
    #[inline]
    pub const fn type_id(&self) -> Option<TypeId> {
        self.type_id
    }

    /// Returns the Rust type name backing instances, if any.
    #[inline]
    pub const fn type_name(&self) -> Option<&'static str> {
        self.type_name
    }

    #[inline]
    pub const fn parent(&self) -> Option<&ParentLink> {
        self.parent.as_ref()
    }

    /// Returns the declared parent class name.
    #[inline]
    pub fn parent_name(&self) -> Option<&'static str> {
        self.parent.as_ref().map(ParentLink::name)
    }

    /// Returns the directly declared interfaces.
    #[inline]
    pub fn interfaces(&self) -> &[&'static str] {
        &self.interfaces
    }

    /// Returns the constants declared by this class only.
    #[inline]
    pub const fn constants(&self) -> &IndexMap<&'static str, Value> {
        &self.constants
    }

    #[inline]
    pub fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    /// Returns a declared property by exact name.
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.iter().find(|p| p.name() == name)
    }

    #[inline]
    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    /// Returns a declared method; method names are case-insensitive.
    pub fn method(&self, name: &str) -> Option<&MethodInfo> {
        self.methods
            .iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }

    /// Returns the raw class doc comment.
    #[inline]
    pub const fn docs(&self) -> Option<&'static str> {
        self.docs
    }
}
