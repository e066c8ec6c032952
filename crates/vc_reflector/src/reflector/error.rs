use alloc::string::String;

use thiserror::Error;

use crate::ValueError;

// -----------------------------------------------------------------------------
// InvokeError

/// Why [`call_method`](crate::reflector::call_method) could not produce a
/// value.
///
/// Every other reflector operation is fail-soft; invocation reports its
/// failure instead.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum InvokeError {
    #[error("Class \"{0}\" does not exist")]
    UnknownClass(String),

    #[error("Instance type is not registered as a class")]
    UnregisteredInstance,

    #[error("Method {class}::{method}() does not exist")]
    MethodNotFound { class: &'static str, method: String },

    #[error("Non-static method {class}::{method}() cannot be called statically")]
    NonStaticCall {
        class: &'static str,
        method: &'static str,
    },

    #[error("Cannot call abstract method {class}::{method}()")]
    AbstractMethod {
        class: &'static str,
        method: &'static str,
    },

    #[error("Too few arguments to {class}::{method}(), {given} passed and at least {expected} expected")]
    TooFewArguments {
        class: &'static str,
        method: &'static str,
        expected: usize,
        given: usize,
    },

    #[error("Too many arguments to {class}::{method}(), {given} passed and at most {expected} expected")]
    TooManyArguments {
        class: &'static str,
        method: &'static str,
        expected: usize,
        given: usize,
    },

    #[error(
        "{class}::{method}(): Argument #{position} (${param}) must be of type {expected}, {found} given"
    )]
    ArgumentType {
        class: &'static str,
        method: &'static str,
        /// One-based, as reported to humans.
        position: usize,
        param: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Instance cannot be viewed as {class}")]
    InstanceMismatch { class: &'static str },

    #[error("Receiver of {method}() is not a `{expected}`")]
    Receiver {
        method: &'static str,
        expected: &'static str,
    },

    #[error(transparent)]
    Value(#[from] ValueError),

    /// Raised by a method body.
    #[error("{0}")]
    Failed(String),
}

impl InvokeError {
    /// Creates the error a method body raises to report its own failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_reflector::reflector::InvokeError;
    ///
    /// let err = InvokeError::failed("balance too low");
    /// assert_eq!(err.to_string(), "balance too low");
    /// ```
    #[inline]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}
