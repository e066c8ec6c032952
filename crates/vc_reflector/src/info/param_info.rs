use crate::Value;

// -----------------------------------------------------------------------------
// ParamInfo

/// The declared signature of one method parameter.
///
/// The declared type is kept as written, so `?string` and `int|null` stay
/// distinguishable; [`type_name`](Self::type_name) drops the nullable `?`.
///
/// # Examples
///
/// ```
/// use vc_reflector::{Value, info::ParamInfo};
///
/// let param = ParamInfo::new("limit").with_type("?int").with_default(10);
///
/// assert_eq!(param.type_name(), Some("int"));
/// assert!(param.allows_null());
/// assert_eq!(param.default_value(), Some(&Value::Int(10)));
///
/// let untyped = ParamInfo::new("anything");
/// assert_eq!(untyped.type_name(), None);
/// assert!(untyped.allows_null());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ParamInfo {
    name: &'static str,
    declared_type: Option<&'static str>,
    default: Option<Value>,
    variadic: bool,
    by_ref: bool,
}

impl ParamInfo {
    /// Creates an untyped, required parameter.
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            declared_type: None,
            default: None,
            variadic: false,
            by_ref: false,
        }
    }

    #[inline]
    pub fn with_type(self, declared_type: &'static str) -> Self {
        Self {
            declared_type: Some(declared_type),
            ..self
        }
    }

    #[inline]
    pub fn with_default(self, value: impl Into<Value>) -> Self {
        Self {
            default: Some(value.into()),
            ..self
        }
    }

    /// Marks the parameter as collecting every remaining argument.
    ///
    /// Only meaningful on the last parameter of a signature.
    #[inline]
    pub fn variadic(self) -> Self {
        Self {
            variadic: true,
            ..self
        }
    }

    #[inline]
    pub fn by_ref(self) -> Self {
        Self {
            by_ref: true,
            ..self
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the type exactly as declared, including a leading `?`.
    #[inline]
    pub const fn declared_type(&self) -> Option<&'static str> {
        self.declared_type
    }

    /// Returns the declared type name, without the nullable `?` marker.
    pub fn type_name(&self) -> Option<&'static str> {
        self.declared_type
            .map(|ty| ty.strip_prefix('?').unwrap_or(ty))
    }

    /// Whether `null` is an acceptable argument.
    ///
    /// True for untyped parameters, `?T`, `mixed`, unions naming `null`, and
    /// parameters whose default is `null`.
    pub fn allows_null(&self) -> bool {
        let Some(ty) = self.declared_type else {
            return true;
        };
        ty.starts_with('?')
            || ty.split('|').map(str::trim).any(|t| {
                t.eq_ignore_ascii_case("null") || t.eq_ignore_ascii_case("mixed")
            })
            || matches!(self.default, Some(Value::Null))
    }

    #[inline]
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }

    #[inline]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    #[inline]
    pub const fn is_variadic(&self) -> bool {
        self.variadic
    }

    #[inline]
    pub const fn is_by_ref(&self) -> bool {
        self.by_ref
    }

    /// Whether `value` may be bound to this parameter.
    pub(crate) fn accepts(&self, value: &Value) -> bool {
        if value.is_null() && self.allows_null() {
            return true;
        }
        match self.declared_type {
            Some(ty) => value.matches_type(ty),
            None => true,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::ParamInfo;
    use crate::Value;

    #[test]
    fn null_default_implies_nullable() {
        let param = ParamInfo::new("tag").with_type("string").with_default(Value::Null);
        assert!(param.allows_null());
        assert!(param.accepts(&Value::Null));
        assert!(!param.accepts(&Value::Int(1)));
    }

    #[test]
    fn union_with_null() {
        let param = ParamInfo::new("id").with_type("int|null");
        assert_eq!(param.type_name(), Some("int|null"));
        assert!(param.allows_null());
        assert!(param.accepts(&Value::Int(3)));
        assert!(!param.accepts(&Value::from("3")));
    }

    #[test]
    fn plain_scalar_rejects_null() {
        let param = ParamInfo::new("name").with_type("string");
        assert!(!param.allows_null());
        assert!(!param.accepts(&Value::Null));
    }
}
