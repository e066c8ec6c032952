//! Provide the class registry a reflector resolves names against.
//!
//! ## Menu
//!
//! - [`GetClassInfo`]: A trait provide a function to create a `ClassInfo` from a type.
//! - [`ClassRegistry`]: A container for storaging and querying `ClassInfo`s.
//! - [`ClassRegistryArc`]: A `ClassRegistry` behind `Arc<RwLock<..>>`.
//!
//! ## auto_register
//!
//! See [`ClassRegistry::auto_register`] and [`impl_auto_register`](crate::impl_auto_register).
//!
//! We use [`inventory`] crate to implement static registration,
//! not all platforms support it (although major platforms do).
//! On unsupported platforms the function returns false without
//! registering anything.
//!
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod class_registry;

// -----------------------------------------------------------------------------
// Exports

pub use class_registry::{ClassRegistry, ClassRegistryArc};

use alloc::string::String;

use crate::info::ClassInfo;

// -----------------------------------------------------------------------------
// GetClassInfo

/// A type that can describe itself as a class or interface.
///
/// Implement it by hand with a [`ClassBuilder`](crate::info::ClassBuilder)
/// or an [`InterfaceBuilder`](crate::info::InterfaceBuilder). Interfaces
/// have no instances, so any marker type will do as `Self`.
pub trait GetClassInfo: 'static {
    /// Returns the [`ClassInfo`] for this type.
    fn get_class_info() -> ClassInfo;

    /// Registers other classes needed by this one, usually the parent and
    /// the implemented interfaces.
    ///
    /// **Allow** not to register oneself.
    fn register_dependencies(_registry: &mut ClassRegistry) {}
}

/// Normalizes a class name for lookup: one leading `\` is dropped and
/// ASCII letters are lowercased.
pub(crate) fn class_key(name: &str) -> String {
    name.strip_prefix('\\').unwrap_or(name).to_ascii_lowercase()
}
