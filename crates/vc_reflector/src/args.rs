use alloc::vec::Vec;
use core::mem;

use crate::{FromValue, Value, ValueError};

// -----------------------------------------------------------------------------
// Arguments

/// Positional arguments handed to a registered method body.
///
/// By the time a body sees them, the invoker has already checked the count
/// and declared types, and appended the defaults of omitted optional
/// parameters. A variadic tail is left as individual trailing values.
///
/// # Examples
///
/// ```
/// use vc_reflector::{Arguments, Value};
///
/// let mut args = Arguments::from(vec![Value::from("bob"), Value::Int(3)]);
/// let name: String = args.take(0).unwrap();
/// let times: u32 = args.take(1).unwrap();
///
/// assert_eq!(name, "bob");
/// assert_eq!(times, 3);
/// assert!(args.take::<u32>(2).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arguments {
    values: Vec<Value>,
}

impl Arguments {
    #[inline]
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns a reference to the argument at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Moves the argument at `index` out and converts it.
    ///
    /// The slot is left as [`Value::Null`], so a second `take` of the same
    /// index sees `null`.
    pub fn take<T: FromValue>(&mut self, index: usize) -> Result<T, ValueError> {
        match self.values.get_mut(index) {
            Some(slot) => T::from_value(mem::take(slot)),
            None => Err(ValueError::MissingArgument(index)),
        }
    }

    /// Moves every argument from `start` onward out, for variadic tails.
    pub fn take_rest<T: FromValue>(&mut self, start: usize) -> Result<Vec<T>, ValueError> {
        if start >= self.values.len() {
            return Ok(Vec::new());
        }
        self.values
            .drain(start..)
            .map(T::from_value)
            .collect()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    #[inline]
    pub fn into_vec(self) -> Vec<Value> {
        self.values
    }

    #[inline]
    pub(crate) fn push(&mut self, value: Value) {
        self.values.push(value);
    }
}

impl From<Vec<Value>> for Arguments {
    #[inline]
    fn from(values: Vec<Value>) -> Self {
        Self { values }
    }
}

impl FromIterator<Value> for Arguments {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Arguments;
    use crate::{Value, ValueError};

    #[test]
    fn take_rest_drains_tail() {
        let mut args: Arguments = [1, 2, 3, 4].into_iter().map(Value::from).collect();
        assert_eq!(args.take::<i64>(0), Ok(1));
        assert_eq!(args.take_rest::<i64>(1), Ok(vec![2, 3, 4]));
        assert_eq!(args.len(), 1);
        assert_eq!(args.take_rest::<i64>(5), Ok(vec![]));
    }

    #[test]
    fn take_twice_sees_null() {
        let mut args = Arguments::from(vec![Value::from("x")]);
        assert_eq!(args.take::<String>(0), Ok("x".into()));
        assert_eq!(args.take::<Option<String>>(0), Ok(None));
        assert_eq!(args.take::<String>(3), Err(ValueError::MissingArgument(3)));
    }
}
