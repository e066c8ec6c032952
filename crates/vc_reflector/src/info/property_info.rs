use alloc::boxed::Box;
use core::any::Any;
use core::fmt;
use std::sync::{PoisonError, RwLock};

use crate::{Value, ValueError, Visibility};

// -----------------------------------------------------------------------------
// Accessor types

/// Reads an instance property. `None` means the property is not set.
pub type PropertyGetter = Box<dyn Fn(&dyn Any) -> Option<Value> + Send + Sync>;

/// Writes an instance property.
pub type PropertySetter = Box<dyn Fn(&mut dyn Any, Value) -> Result<(), ValueError> + Send + Sync>;

enum Storage {
    Instance {
        get: PropertyGetter,
        set: PropertySetter,
    },
    /// Class-level storage, owned by the registered class.
    Static(RwLock<Value>),
}

// -----------------------------------------------------------------------------
// PropertyInfo

/// A declared property and the way to reach its value.
///
/// Instance properties carry a getter and a setter over the declaring type;
/// static properties own their value.
///
/// # Examples
///
/// ```
/// use vc_reflector::{Value, Visibility, info::PropertyInfo};
///
/// struct Point { x: i64 }
///
/// let x = PropertyInfo::instance::<Point>(
///     "x",
///     Visibility::Private,
///     |p| Some(Value::Int(p.x)),
///     |p, v| { p.x = v.as_int().unwrap_or_default(); Ok(()) },
/// );
/// assert!(!x.is_static());
///
/// let mut point = Point { x: 3 };
/// assert_eq!(x.read(&point), Some(Value::Int(3)));
/// assert!(x.write(&mut point, Value::Int(5)).is_ok());
/// assert_eq!(point.x, 5);
///
/// let count = PropertyInfo::new_static("count", Visibility::Protected, 0);
/// assert_eq!(count.static_value(), Some(Value::Int(0)));
/// ```
pub struct PropertyInfo {
    name: &'static str,
    visibility: Visibility,
    docs: Option<&'static str>,
    storage: Storage,
}

impl PropertyInfo {
    /// Creates an instance property of type `T`.
    ///
    /// `get` returns `None` while the property is unset.
    pub fn instance<T: Any>(
        name: &'static str,
        visibility: Visibility,
        get: impl Fn(&T) -> Option<Value> + Send + Sync + 'static,
        set: impl Fn(&mut T, Value) -> Result<(), ValueError> + Send + Sync + 'static,
    ) -> Self {
        let get: PropertyGetter =
            Box::new(move |obj: &dyn Any| obj.downcast_ref::<T>().and_then(&get));
        let set: PropertySetter =
            Box::new(move |obj: &mut dyn Any, value: Value| match obj.downcast_mut::<T>() {
                Some(obj) => set(obj, value),
                None => Err(ValueError::Mismatch {
                    expected: core::any::type_name::<T>(),
                    found: "object",
                }),
            });
        Self {
            name,
            visibility,
            docs: None,
            storage: Storage::Instance { get, set },
        }
    }

    /// Creates a static property holding `initial`.
    pub fn new_static(
        name: &'static str,
        visibility: Visibility,
        initial: impl Into<Value>,
    ) -> Self {
        Self {
            name,
            visibility,
            docs: None,
            storage: Storage::Static(RwLock::new(initial.into())),
        }
    }

    /// Replaces docs (overwrite, do not merge).
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
    pub const fn docs(&self) -> Option<&'static str> {
        self.docs
    }

    #[inline]
    pub const fn is_static(&self) -> bool {
        matches!(self.storage, Storage::Static(_))
    }

    /// Reads the property from `instance`, which must already be viewed as
    /// the declaring type.
    ///
    /// Static properties ignore `instance`.
    pub fn read(&self, instance: &dyn Any) -> Option<Value> {
        match &self.storage {
            Storage::Instance { get, .. } => get(instance),
            Storage::Static(_) => self.static_value(),
        }
    }

    /// Writes the property on `instance`, which must already be viewed as
    /// the declaring type.
    ///
    /// Static properties ignore `instance`.
    pub fn write(&self, instance: &mut dyn Any, value: Value) -> Result<(), ValueError> {
        match &self.storage {
            Storage::Instance { set, .. } => set(instance, value),
            Storage::Static(_) => self.set_static_value(value),
        }
    }

    /// Returns the current value of a static property, `None` for instance
    /// properties.
    pub fn static_value(&self) -> Option<Value> {
        match &self.storage {
            Storage::Static(cell) => {
                Some(cell.read().unwrap_or_else(PoisonError::into_inner).clone())
            }
            Storage::Instance { .. } => None,
        }
    }

    /// Replaces the value of a static property.
    ///
    /// Fails for instance properties, which need an instance to write to.
    pub fn set_static_value(&self, value: Value) -> Result<(), ValueError> {
        match &self.storage {
            Storage::Static(cell) => {
                *cell.write().unwrap_or_else(PoisonError::into_inner) = value;
                Ok(())
            }
            Storage::Instance { .. } => Err(ValueError::Mismatch {
                expected: "object",
                found: "class",
            }),
        }
    }
}

impl fmt::Debug for PropertyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyInfo")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("static", &self.is_static())
            .finish_non_exhaustive()
    }
}
