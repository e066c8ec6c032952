//! Visibility-bypassing access to registered classes.
//!
//! Every operation is a free function taking the [`ClassRegistry`] to
//! resolve against and a [`Target`]: a live instance or a class name.
//! Nothing is cached; each call walks the registry again.
//!
//! ## Menu
//!
//! - Parameters:
//!     - [`method_parameters`]: A [`ParameterDescriptor`] per parameter, doc tags merged in.
//!
//! - Members:
//!     - [`properties`] / [`methods`]: Enumerate members passing a [`VisibilityFilter`].
//!     - [`get_property`] / [`set_property`]: Read or write one property.
//!     - [`has_property`] / [`has_method`]: Existence checks.
//!     - [`call_method`]: Invoke a method with positional arguments.
//!
//! - Metadata:
//!     - [`constants`], [`get_constant`], [`has_constant`].
//!     - [`class_name`], [`parent_class`], [`interface_names`].
//!     - [`implements_interface`], [`is_subclass_of`].
//!     - [`class_doc_comment`], [`method_doc_comment`].
//!
//! ## Failures
//!
//! Only [`call_method`] reports failure, as an [`InvokeError`]. Every other
//! operation turns an unresolvable target or a missing member into `None`,
//! `false` or an empty collection.
//!
//! [`VisibilityFilter`]: crate::VisibilityFilter

// -----------------------------------------------------------------------------
// Modules

mod error;
mod members;
mod metadata;
mod params;
mod target;

// -----------------------------------------------------------------------------
// Exports

pub use error::InvokeError;
pub use members::{
    MethodHandle, call_method, get_property, has_method, has_property, methods, properties,
    set_property,
};
pub use metadata::{
    class_doc_comment, class_name, constants, get_constant, has_constant, implements_interface,
    interface_names, is_subclass_of, method_doc_comment, parent_class,
};
pub use params::{ParameterDescriptor, method_parameters};
pub use target::{Target, TargetMut};

use crate::info::ClassInfo;
use crate::registry::ClassRegistry;

/// Resolves `target`, logging when it cannot be reflected.
fn resolve<'r>(registry: &'r ClassRegistry, target: Target<'_>) -> Option<&'r ClassInfo> {
    let class = registry.resolve(target);
    if class.is_none() {
        log::debug!("cannot reflect {target:?}");
    }
    class
}
