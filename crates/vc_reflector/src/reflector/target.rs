use core::any::Any;
use core::fmt;

// -----------------------------------------------------------------------------
// Target

/// What a read-only reflector operation inspects.
///
/// A bare class name only reaches class-level members: static properties,
/// static methods, constants and hierarchy metadata.
///
/// # Examples
///
/// ```
/// use vc_reflector::reflector::Target;
///
/// struct Order { id: i64 }
///
/// let order = Order { id: 7 };
/// assert!(Target::object(&order).instance().is_some());
/// assert!(Target::from("Shop\\Order").instance().is_none());
/// ```
#[derive(Clone, Copy)]
pub enum Target<'a> {
    Instance(&'a dyn Any),
    Class(&'a str),
}

impl<'a> Target<'a> {
    #[inline]
    pub fn object<T: Any>(instance: &'a T) -> Self {
        Self::Instance(instance)
    }

    #[inline]
    pub const fn class(name: &'a str) -> Self {
        Self::Class(name)
    }

    /// Returns the instance, if the target is one.
    #[inline]
    pub const fn instance(self) -> Option<&'a dyn Any> {
        match self {
            Self::Instance(instance) => Some(instance),
            Self::Class(_) => None,
        }
    }
}

impl<'a> From<&'a str> for Target<'a> {
    #[inline]
    fn from(name: &'a str) -> Self {
        Self::Class(name)
    }
}

impl fmt::Debug for Target<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(_) => f.write_str("Instance(..)"),
            Self::Class(name) => f.debug_tuple("Class").field(name).finish(),
        }
    }
}

// -----------------------------------------------------------------------------
// TargetMut

/// What a writing reflector operation acts on.
pub enum TargetMut<'a> {
    Instance(&'a mut dyn Any),
    Class(&'a str),
}

impl<'a> TargetMut<'a> {
    #[inline]
    pub fn object<T: Any>(instance: &'a mut T) -> Self {
        Self::Instance(instance)
    }

    #[inline]
    pub const fn class(name: &'a str) -> Self {
        Self::Class(name)
    }

    /// Reborrows as a read-only [`Target`].
    #[inline]
    pub fn as_target(&self) -> Target<'_> {
        match self {
            Self::Instance(instance) => Target::Instance(&**instance),
            Self::Class(name) => Target::Class(name),
        }
    }
}

impl<'a> From<&'a str> for TargetMut<'a> {
    #[inline]
    fn from(name: &'a str) -> Self {
        Self::Class(name)
    }
}

impl fmt::Debug for TargetMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.as_target(), f)
    }
}
