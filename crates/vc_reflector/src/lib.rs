#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Doc tests and the `impl_auto_register!` macro refer to `vc_reflector`,
// so the crate must also be reachable under its own name internally.
extern crate self as vc_reflector;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod args;
mod value;
mod visibility;

pub mod docs;
pub mod hash;
pub mod info;
pub mod reflector;
pub mod registry;

#[cfg(test)]
mod tests_support;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use args::Arguments;
pub use value::{FromValue, Value, ValueError};
pub use visibility::{Visibility, VisibilityFilter};
