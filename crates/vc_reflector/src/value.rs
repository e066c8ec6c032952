use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use indexmap::IndexMap;
use thiserror::Error;

// -----------------------------------------------------------------------------
// Value

/// The dynamic value exchanged with registered accessors and invokers.
///
/// Property snapshots, constants, default values, method arguments and
/// return values are all carried as `Value`. The variants follow the loose
/// scalar/array model of a dynamic runtime rather than Rust's type system,
/// so a registered class decides how its fields map onto them.
///
/// # Examples
///
/// ```
/// use vc_reflector::Value;
///
/// let v = Value::from("alice");
/// assert_eq!(v.type_name(), "string");
/// assert_eq!(v.as_str(), Some("alice"));
///
/// let n: Value = 42.into();
/// assert_eq!(n, Value::Int(42));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Returns the runtime type name used in signatures: `null`, `bool`,
    /// `int`, `float`, `string` or `array`.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) | Self::Map(_) => "array",
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as `f64`, widening integers.
    #[inline]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(list) => Some(list.as_slice()),
            _ => None,
        }
    }

    /// Whether this value satisfies a declared type name.
    ///
    /// `type_name` is a single name or a `|` separated union, optionally
    /// prefixed with `?`. Names outside the scalar set (class names,
    /// `object`, `callable`, ...) accept any non-null value, since the
    /// registry does not track the runtime class of nested values.
    pub fn matches_type(&self, type_name: &str) -> bool {
        let (nullable, body) = match type_name.strip_prefix('?') {
            Some(rest) => (true, rest),
            None => (false, type_name),
        };

        if self.is_null() {
            return nullable
                || body
                    .split('|')
                    .any(|t| t.eq_ignore_ascii_case("null") || t.eq_ignore_ascii_case("mixed"));
        }

        body.split('|').any(|t| self.matches_single_type(t.trim()))
    }

    fn matches_single_type(&self, ty: &str) -> bool {
        let ty = ty.to_ascii_lowercase();
        match ty.as_str() {
            "mixed" => true,
            "null" | "void" | "never" => false,
            "bool" => matches!(self, Self::Bool(_)),
            "false" => matches!(self, Self::Bool(false)),
            "true" => matches!(self, Self::Bool(true)),
            "int" => matches!(self, Self::Int(_)),
            // Integers widen to floats, as a dynamic runtime coerces them.
            "float" => matches!(self, Self::Float(_) | Self::Int(_)),
            "string" => matches!(self, Self::Str(_)),
            "array" | "iterable" => matches!(self, Self::List(_) | Self::Map(_)),
            _ => true,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::List(list) => f.debug_list().entries(list).finish(),
            Self::Map(map) => f.debug_map().entries(map).finish(),
        }
    }
}

// -----------------------------------------------------------------------------
// Into Value

macro_rules! impl_from_for_value {
    ($variant:ident: $($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )+
    };
}

impl_from_for_value!(Bool: bool);
impl_from_for_value!(Int: i8, i16, i32, i64, u8, u16, u32);
impl_from_for_value!(Float: f32, f64);
impl_from_for_value!(Str: String);

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<()> for Value {
    #[inline]
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Map(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// -----------------------------------------------------------------------------
// ValueError

/// A failed conversion out of a [`Value`].
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ValueError {
    #[error("expected a value of type `{expected}`, found `{found}`")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("integer {value} is out of range for `{target}`")]
    OutOfRange { value: i64, target: &'static str },

    #[error("no argument at position {0}")]
    MissingArgument(usize),
}

impl ValueError {
    #[inline]
    pub(crate) fn mismatch(expected: &'static str, found: &Value) -> Self {
        Self::Mismatch {
            expected,
            found: found.type_name(),
        }
    }
}

// -----------------------------------------------------------------------------
// FromValue

/// Fallible conversion out of a [`Value`].
///
/// Used by setters and by [`Arguments::take`](crate::Arguments::take) to
/// turn dynamic values back into field types.
///
/// # Examples
///
/// ```
/// use vc_reflector::{FromValue, Value, ValueError};
///
/// assert_eq!(i32::from_value(Value::Int(7)), Ok(7));
/// assert_eq!(Option::<String>::from_value(Value::Null), Ok(None));
/// assert!(matches!(
///     bool::from_value(Value::Int(1)),
///     Err(ValueError::Mismatch { expected: "bool", found: "int" }),
/// ));
/// ```
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, ValueError>;
}

impl FromValue for Value {
    #[inline]
    fn from_value(value: Value) -> Result<Self, ValueError> {
        Ok(value)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(ValueError::mismatch("bool", &other)),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(ValueError::mismatch("int", &other)),
        }
    }
}

macro_rules! impl_from_value_for_int {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self, ValueError> {
                    let i = i64::from_value(value)?;
                    <$ty>::try_from(i).map_err(|_| ValueError::OutOfRange {
                        value: i,
                        target: stringify!($ty),
                    })
                }
            }
        )+
    };
}

impl_from_value_for_int!(i8, i16, i32, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value.as_float() {
            Some(f) => Ok(f),
            None => Err(ValueError::mismatch("float", &value)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(ValueError::mismatch("string", &other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::List(list) => list.into_iter().map(T::from_value).collect(),
            other => Err(ValueError::mismatch("array", &other)),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{FromValue, Value, ValueError};
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn nullable_and_union_types() {
        assert!(Value::Null.matches_type("?string"));
        assert!(Value::Null.matches_type("int|null"));
        assert!(Value::Null.matches_type("mixed"));
        assert!(!Value::Null.matches_type("string"));

        assert!(Value::Int(3).matches_type("int|string"));
        assert!(Value::from("x").matches_type("int|string"));
        assert!(!Value::Bool(true).matches_type("int|string"));
    }

    #[test]
    fn int_widens_to_float() {
        assert!(Value::Int(3).matches_type("float"));
        assert_eq!(f64::from_value(Value::Int(3)), Ok(3.0));
        assert!(!Value::Float(3.0).matches_type("int"));
    }

    #[test]
    fn class_types_accept_non_null() {
        assert!(Value::from("x").matches_type("App\\Model"));
        assert!(!Value::Null.matches_type("App\\Model"));
    }

    #[test]
    fn narrowing_out_of_range() {
        assert_eq!(
            u8::from_value(Value::Int(300)),
            Err(ValueError::OutOfRange {
                value: 300,
                target: "u8"
            })
        );
    }

    #[test]
    fn nested_collections() {
        let v = Value::from(vec![1, 2, 3]);
        assert_eq!(v.type_name(), "array");
        assert_eq!(Vec::<i32>::from_value(v), Ok(vec![1, 2, 3]));

        let map: Value = [("a", 1), ("b", 2)].into_iter().collect();
        let Value::Map(map) = map else {
            panic!("expected a map");
        };
        assert_eq!(map.get("b"), Some(&Value::Int(2)));
        assert_eq!(map.keys().cloned().collect::<Vec<String>>(), ["a", "b"]);
    }
}
