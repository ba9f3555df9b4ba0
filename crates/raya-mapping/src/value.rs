//! Value — resolved constructor argument representation
//!
//! The mapping engine resolves each constructor-bound attribute into a
//! `Value` and hands the strategy an ordered slice of them. Factories read
//! typed values back out through [`Arguments`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::ValueError;

/// A dynamically typed, resolved attribute value.
#[derive(Clone, Default)]
pub enum Value {
    /// Absent / null value
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer (all integer widths are widened to i64)
    Int(i64),
    /// Floating point number
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Ordered collection
    List(Vec<Value>),
    /// Already-materialized nested instance (embedded entity, association)
    Object(Arc<dyn Any + Send + Sync>),
}

impl Value {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a null value
    #[inline]
    pub const fn null() -> Self {
        Value::Null
    }

    /// Create a boolean value
    #[inline]
    pub const fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    /// Create an integer value
    #[inline]
    pub const fn int(i: i64) -> Self {
        Value::Int(i)
    }

    /// Create a float value
    #[inline]
    pub const fn float(f: f64) -> Self {
        Value::Float(f)
    }

    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Create a bytes value
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(data.into())
    }

    /// Create a list value
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    /// Wrap an already-constructed instance
    pub fn object<T: Any + Send + Sync>(obj: T) -> Self {
        Value::Object(Arc::new(obj))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Check if value is null
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as bool if this is a bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is a float or an integer
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get as &str if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as byte slice if this is a bytes value
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Get as list if this is a list
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Downcast a wrapped object
    pub fn as_object<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Object(obj) => obj.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Type name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Int(i) => write!(f, "Int({})", i),
            Value::Float(x) => write!(f, "Float({})", x),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Bytes(b) => write!(f, "Bytes(len={})", b.len()),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Object(obj) => write!(f, "Object({:p})", Arc::as_ptr(obj)),
        }
    }
}

// Objects compare by identity
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// ============================================================================
// Conversion Traits
// ============================================================================

/// Convert from a resolved `Value` into a Rust type.
///
/// Implement this trait to let factories read your type with
/// [`Arguments::get`] / [`Arguments::named`].
pub trait FromValue: Sized {
    /// Convert from a Value, returning an error if the type doesn't match.
    fn from_value(value: &Value) -> Result<Self, ValueError>;
}

/// Convert a Rust type into a `Value`.
pub trait IntoValue {
    /// Convert to Value.
    fn into_value(self) -> Value;
}

fn mismatch(expected: &'static str, value: &Value) -> ValueError {
    ValueError::TypeMismatch {
        expected,
        got: value.type_name(),
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        Ok(value.clone())
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        value.as_bool().ok_or_else(|| mismatch("bool", value))
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        value.as_int().ok_or_else(|| mismatch("i64", value))
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        let i = value.as_int().ok_or_else(|| mismatch("i32", value))?;
        i32::try_from(i).map_err(|_| ValueError::OutOfRange {
            expected: "i32",
            value: i,
        })
    }
}

impl FromValue for u32 {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        let i = value.as_int().ok_or_else(|| mismatch("u32", value))?;
        u32::try_from(i).map_err(|_| ValueError::OutOfRange {
            expected: "u32",
            value: i,
        })
    }
}

impl FromValue for u8 {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        let i = value.as_int().ok_or_else(|| mismatch("u8", value))?;
        u8::try_from(i).map_err(|_| ValueError::OutOfRange {
            expected: "u8",
            value: i,
        })
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        value.as_float().ok_or_else(|| mismatch("f64", value))
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| mismatch("string", value))
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

// Bytes are read element-wise, so `Vec<u8>` accepts both bytes and int lists
impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        match value {
            Value::Bytes(bytes) => bytes
                .iter()
                .map(|&b| T::from_value(&Value::Int(b as i64)))
                .collect(),
            Value::List(items) => items.iter().map(T::from_value).collect(),
            other => Err(mismatch("list", other)),
        }
    }
}

/// Byte buffer that converts to and from [`Value::Bytes`].
///
/// `Vec<u8>` converts to a list of integers; wrap it in `Bytes` to keep
/// the compact representation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    /// Unwrap the buffer
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(data: Vec<u8>) -> Self {
        Bytes(data)
    }
}

impl FromValue for Bytes {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        value
            .as_bytes()
            .map(|b| Bytes(b.to_vec()))
            .ok_or_else(|| mismatch("bytes", value))
    }
}

impl<T: Any + Send + Sync> FromValue for Arc<T> {
    fn from_value(value: &Value) -> Result<Self, ValueError> {
        match value {
            Value::Object(obj) => Arc::clone(obj).downcast::<T>().map_err(|_| {
                ValueError::TypeMismatch {
                    expected: std::any::type_name::<T>(),
                    got: "object",
                }
            }),
            other => Err(mismatch(std::any::type_name::<T>(), other)),
        }
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl IntoValue for i32 {
    fn into_value(self) -> Value {
        Value::Int(self as i64)
    }
}

impl IntoValue for i64 {
    fn into_value(self) -> Value {
        Value::Int(self)
    }
}

impl IntoValue for u32 {
    fn into_value(self) -> Value {
        Value::Int(self as i64)
    }
}

impl IntoValue for u8 {
    fn into_value(self) -> Value {
        Value::Int(self as i64)
    }
}

impl IntoValue for Bytes {
    fn into_value(self) -> Value {
        Value::Bytes(self.0)
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::String(self.to_owned())
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        self.map_or(Value::Null, IntoValue::into_value)
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(IntoValue::into_value).collect())
    }
}

macro_rules! impl_from_for_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    value.into_value()
                }
            }
        )*
    };
}

impl_from_for_value!(bool, u8, i32, i64, u32, f64, String, &str, Bytes);

impl<T: IntoValue> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.into_value()
    }
}

impl<T: IntoValue> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        value.into_value()
    }
}

// ============================================================================
// Arguments
// ============================================================================

/// Positional argument view handed to functional factories.
///
/// Carries the descriptor's parameter names so values can be read by
/// name as well as by position.
#[derive(Debug, Clone, Copy)]
pub struct Arguments<'a> {
    values: &'a [Value],
    names: &'a [String],
}

impl<'a> Arguments<'a> {
    /// Wrap a value slice together with the parameter names it was ordered by
    pub fn new(values: &'a [Value], names: &'a [String]) -> Self {
        Self { values, names }
    }

    /// Number of supplied values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no values were supplied
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The raw value slice
    pub fn values(&self) -> &'a [Value] {
        self.values
    }

    /// Declared parameter names
    pub fn names(&self) -> &'a [String] {
        self.names
    }

    /// Raw value at a position
    pub fn raw(&self, index: usize) -> Result<&'a Value, ValueError> {
        self.values.get(index).ok_or(ValueError::MissingArgument {
            index,
            len: self.values.len(),
        })
    }

    /// Typed value at a position
    pub fn get<T: FromValue>(&self, index: usize) -> Result<T, ValueError> {
        T::from_value(self.raw(index)?)
    }

    /// Typed value for a declared parameter name
    pub fn named<T: FromValue>(&self, name: &str) -> Result<T, ValueError> {
        let index = self
            .names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| ValueError::UnknownParameter(name.to_string()))?;
        self.get(index)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert!(Value::null().is_null());
        assert_eq!(Value::bool(true).as_bool(), Some(true));
        assert_eq!(Value::int(42).as_int(), Some(42));
        assert_eq!(Value::int(2).as_float(), Some(2.0));
        assert_eq!(Value::string("hi").as_str(), Some("hi"));
        assert_eq!(Value::bytes(vec![1u8, 2]).as_bytes(), Some(&[1u8, 2][..]));
        assert_eq!(Value::int(1).as_str(), None);
    }

    #[test]
    fn test_from_value_conversions() {
        assert_eq!(i64::from_value(&Value::int(7)).unwrap(), 7);
        assert_eq!(i32::from_value(&Value::int(-3)).unwrap(), -3);
        assert_eq!(String::from_value(&Value::string("x")).unwrap(), "x");
        assert_eq!(Option::<i64>::from_value(&Value::Null).unwrap(), None);
        assert_eq!(
            Vec::<i64>::from_value(&Value::list([Value::int(1), Value::int(2)])).unwrap(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_from_value_errors() {
        assert_eq!(
            bool::from_value(&Value::int(1)),
            Err(ValueError::TypeMismatch {
                expected: "bool",
                got: "int"
            })
        );
        assert_eq!(
            i32::from_value(&Value::int(i64::MAX)),
            Err(ValueError::OutOfRange {
                expected: "i32",
                value: i64::MAX
            })
        );
        assert!(u32::from_value(&Value::int(-1)).is_err());
    }

    #[test]
    fn test_object_identity_and_downcast() {
        #[derive(Debug, PartialEq)]
        struct Address(String);

        let obj = Value::object(Address("Main St".to_string()));
        assert_eq!(obj.as_object::<Address>(), Some(&Address("Main St".to_string())));
        assert_eq!(obj, obj.clone());
        assert_ne!(obj, Value::object(Address("Main St".to_string())));

        let arc = Arc::<Address>::from_value(&obj).unwrap();
        assert_eq!(arc.0, "Main St");
        assert!(Arc::<String>::from_value(&obj).is_err());
    }

    #[test]
    fn test_bytes_round_trip() {
        let value = Value::from(Bytes(vec![0, 7, 255]));
        assert_eq!(value, Value::bytes(vec![0u8, 7, 255]));
        assert_eq!(Bytes::from_value(&value).unwrap().into_inner(), vec![0, 7, 255]);
        assert_eq!(Vec::<u8>::from_value(&value).unwrap(), vec![0, 7, 255]);

        let list = Value::from(vec![1u8, 2]);
        assert_eq!(list, Value::list([Value::int(1), Value::int(2)]));
        assert_eq!(Vec::<u8>::from_value(&list).unwrap(), vec![1, 2]);

        assert!(Bytes::from_value(&list).is_err());
        assert_eq!(
            Vec::<u8>::from_value(&Value::list([Value::int(256)])),
            Err(ValueError::OutOfRange {
                expected: "u8",
                value: 256
            })
        );
    }

    #[test]
    fn test_into_value() {
        assert_eq!(Value::from(5i32), Value::int(5));
        assert_eq!(Value::from("a"), Value::string("a"));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(vec![1i64, 2]), Value::list([Value::int(1), Value::int(2)]));
    }

    #[test]
    fn test_arguments_positional_and_named() {
        let values = vec![Value::int(3), Value::string("p")];
        let names = vec!["x".to_string(), "label".to_string()];
        let args = Arguments::new(&values, &names);

        assert_eq!(args.len(), 2);
        assert_eq!(args.get::<i64>(0).unwrap(), 3);
        assert_eq!(args.named::<String>("label").unwrap(), "p");
        assert_eq!(
            args.get::<i64>(5),
            Err(ValueError::MissingArgument { index: 5, len: 2 })
        );
        assert_eq!(
            args.named::<i64>("z"),
            Err(ValueError::UnknownParameter("z".to_string()))
        );
    }
}
