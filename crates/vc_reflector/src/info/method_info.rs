use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::info::ParamInfo;
use crate::reflector::InvokeError;
use crate::{Arguments, Value, Visibility};

// -----------------------------------------------------------------------------
// Signature

/// The declared shape of a method: name, visibility, parameters and docs.
///
/// # Examples
///
/// ```
/// use vc_reflector::{Visibility, info::{ParamInfo, Signature}};
///
/// let sig = Signature::new("greet", Visibility::Public)
///     .with_docs("/** @param string $name Who to greet. */")
///     .with_param(ParamInfo::new("name").with_type("string").with_default("World"));
///
/// assert_eq!(sig.parameters().len(), 1);
/// assert_eq!(sig.required_parameter_count(), 0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Signature {
    name: &'static str,
    visibility: Visibility,
    params: Vec<ParamInfo>,
    docs: Option<&'static str>,
}

impl Signature {
    #[inline]
    pub const fn new(name: &'static str, visibility: Visibility) -> Self {
        Self {
            name,
            visibility,
            params: Vec::new(),
            docs: None,
        }
    }

    /// Appends a parameter.
    #[inline]
    pub fn with_param(mut self, param: ParamInfo) -> Self {
        self.params.push(param);
        self
    }

    /// Appends parameters in order.
    #[inline]
    pub fn with_params(mut self, params: impl IntoIterator<Item = ParamInfo>) -> Self {
        self.params.extend(params);
        self
    }

    /// Replaces docs (overwrite, do not merge).
    ///
    /// `docs` is the raw block comment, delimiters included.
    #[inline]
    pub fn with_docs(self, docs: &'static str) -> Self {
        Self {
            docs: Some(docs),
            ..self
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub fn parameters(&self) -> &[ParamInfo] {
        &self.params
    }

    #[inline]
    pub const fn docs(&self) -> Option<&'static str> {
        self.docs
    }

    /// Number of leading parameters a call must supply.
    ///
    /// A parameter with a default that is followed by a required one is
    /// still required.
    pub fn required_parameter_count(&self) -> usize {
        self.params
            .iter()
            .rposition(|p| !p.has_default() && !p.is_variadic())
            .map_or(0, |index| index + 1)
    }

    /// Whether the parameter at `position` may be omitted by a caller.
    #[inline]
    pub fn is_optional(&self, position: usize) -> bool {
        position >= self.required_parameter_count()
    }

    #[inline]
    pub fn is_variadic(&self) -> bool {
        self.params.last().is_some_and(ParamInfo::is_variadic)
    }
}

// -----------------------------------------------------------------------------
// Invoker

/// Body of an instance method; the receiver is already the declaring type.
pub type InstanceBody =
    Box<dyn Fn(&mut dyn Any, Arguments) -> Result<Value, InvokeError> + Send + Sync>;

/// Body of a static method.
pub type StaticBody = Box<dyn Fn(Arguments) -> Result<Value, InvokeError> + Send + Sync>;

pub(crate) enum Invoker {
    Instance(InstanceBody),
    Static(StaticBody),
    /// Declared without a body, e.g. on an interface.
    Abstract,
}

// -----------------------------------------------------------------------------
// MethodInfo

/// A declared method: its [`Signature`] plus the body to run.
pub struct MethodInfo {
    signature: Signature,
    invoker: Invoker,
}

impl MethodInfo {
    /// Creates an instance method whose receiver is `T`.
    pub fn instance<T: Any>(
        signature: Signature,
        body: impl Fn(&mut T, Arguments) -> Result<Value, InvokeError> + Send + Sync + 'static,
    ) -> Self {
        let name = signature.name();
        let body: InstanceBody = Box::new(move |receiver: &mut dyn Any, args: Arguments| {
            match receiver.downcast_mut::<T>() {
                Some(receiver) => body(receiver, args),
                None => Err(InvokeError::Receiver {
                    method: name,
                    expected: core::any::type_name::<T>(),
                }),
            }
        });
        Self {
            signature,
            invoker: Invoker::Instance(body),
        }
    }

    /// Creates a static method.
    pub fn new_static(
        signature: Signature,
        body: impl Fn(Arguments) -> Result<Value, InvokeError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            signature,
            invoker: Invoker::Static(Box::new(body)),
        }
    }

    /// Creates a method without a body.
    #[inline]
    pub const fn new_abstract(signature: Signature) -> Self {
        Self {
            signature,
            invoker: Invoker::Abstract,
        }
    }

    #[inline]
    pub const fn signature(&self) -> &Signature {
        &self.signature
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.signature.name
    }

    #[inline]
    pub const fn visibility(&self) -> Visibility {
        self.signature.visibility
    }

    #[inline]
    pub fn parameters(&self) -> &[ParamInfo] {
        self.signature.parameters()
    }

    #[inline]
    pub const fn docs(&self) -> Option<&'static str> {
        self.signature.docs
    }

    #[inline]
    pub const fn is_static(&self) -> bool {
        matches!(self.invoker, Invoker::Static(_))
    }

    #[inline]
    pub const fn is_abstract(&self) -> bool {
        matches!(self.invoker, Invoker::Abstract)
    }

    #[inline]
    pub(crate) const fn invoker(&self) -> &Invoker {
        &self.invoker
    }
}

impl fmt::Debug for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInfo")
            .field("signature", &self.signature)
            .field("static", &self.is_static())
            .field("abstract", &self.is_abstract())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Signature;
    use crate::Visibility;
    use crate::info::ParamInfo;

    #[test]
    fn default_before_required_is_required() {
        let sig = Signature::new("f", Visibility::Public).with_params([
            ParamInfo::new("a").with_default(1),
            ParamInfo::new("b"),
            ParamInfo::new("c").with_default(2),
        ]);
        assert_eq!(sig.required_parameter_count(), 2);
        assert!(!sig.is_optional(0));
        assert!(!sig.is_optional(1));
        assert!(sig.is_optional(2));
    }

    #[test]
    fn variadic_tail_is_optional() {
        let sig = Signature::new("f", Visibility::Public).with_params([
            ParamInfo::new("first").with_type("string"),
            ParamInfo::new("rest").with_type("string").variadic(),
        ]);
        assert_eq!(sig.required_parameter_count(), 1);
        assert!(sig.is_variadic());
        assert!(sig.is_optional(1));
    }
}
