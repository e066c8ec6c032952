//! Registered class metadata.
//!
//! ## Menu
//!
//! - [`ParamInfo`]: One declared method parameter: name, declared type, default, variadic and by-ref flags.
//!
//! - [`Signature`]: A method's name, visibility, parameters and raw doc comment.
//!     - [`required_parameter_count`](Signature::required_parameter_count): Leading parameters a call must supply.
//!
//! - [`MethodInfo`]: A `Signature` plus its body, one of:
//!     - [`InstanceBody`]: Runs on a receiver already viewed as the declaring type.
//!     - [`StaticBody`]: Runs without a receiver.
//!     - abstract: No body, e.g. interface methods.
//!
//! - [`PropertyInfo`]: A declared property, either instance-backed (getter and setter closures,
//!   see [`PropertyGetter`] and [`PropertySetter`]) or static (the value is owned by the class).
//!
//! - [`ClassInfo`]: Everything declared by one class or interface.
//!     - [`ClassKind`]: `Class` or `Interface`.
//!     - [`ParentLink`]: The declared parent and how to view an instance as it.
//!
//! - Builders:
//!     - [`ClassBuilder`]: Builds a `ClassInfo` for a Rust type `T`.
//!     - [`InterfaceBuilder`]: Builds an interface `ClassInfo`.

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod class_info;
mod method_info;
mod param_info;
mod property_info;

// -----------------------------------------------------------------------------
// Exports

pub use builder::{ClassBuilder, InterfaceBuilder};
pub use class_info::{ClassInfo, ClassKind, ParentLink};
pub use method_info::{InstanceBody, MethodInfo, Signature, StaticBody};
pub use param_info::ParamInfo;
pub use property_info::{PropertyGetter, PropertyInfo, PropertySetter};

pub(crate) use class_info::FieldUpcast;
pub(crate) use method_info::Invoker;
