//! Conversion of D-Bus wire values into native values.
use std::fmt;

use dbus::arg::{ArgType, RefArg};

/// A property or reply value read from the daemon.
///
/// Only the wire types sessiond actually uses are represented. Anything else (signed integers,
/// bytes, signatures, structs, dictionaries, file descriptors) becomes [`Value::Null`] rather
/// than an error, so callers must be prepared for `Null` even on successful calls.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A string (`s`) or object path (`o`)
    Str(String),
    /// A boolean (`b`)
    Bool(bool),
    /// An unsigned 32 or 64-bit integer (`u`, `t`)
    UInt(u64),
    /// A double (`d`)
    Double(f64),
    /// An array, with every element converted in order
    Array(Vec<Value>),
    /// Any other wire type
    Null,
}

impl Value {
    /// Converts a wire value. Variants are transparent: the value they contain is converted.
    pub fn from_ref_arg(arg: &dyn RefArg) -> Value {
        let converted = match arg.arg_type() {
            ArgType::String | ArgType::ObjectPath => arg.as_str().map(|s| Value::Str(s.to_string())),
            ArgType::Boolean => arg
                .as_u64()
                .or_else(|| arg.as_i64().map(|b| b as u64))
                .map(|b| Value::Bool(b != 0)),
            ArgType::UInt32 | ArgType::UInt64 => arg.as_u64().map(Value::UInt),
            ArgType::Double => arg.as_f64().map(Value::Double),
            // Dictionaries are arrays of dict entries on the wire, but not sequences
            ArgType::Array if arg.signature().starts_with("a{") => None,
            ArgType::Array => arg
                .as_iter()
                .map(|items| Value::Array(items.map(Value::from_ref_arg).collect())),
            ArgType::Variant => arg
                .as_iter()
                .and_then(|mut inner| inner.next().map(Value::from_ref_arg)),
            _ => None,
        };
        converted.unwrap_or(Value::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::UInt(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Double(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Human-readable name of the value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Str(_) => "a string",
            Value::Bool(_) => "a boolean",
            Value::UInt(_) => "an integer",
            Value::Double(_) => "a double",
            Value::Array(_) => "an array",
            Value::Null => "null",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::UInt(n) => write!(f, "{}", n),
            Value::Double(d) => write!(f, "{}", d),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Null => f.write_str("null"),
        }
    }
}

/// Narrowing of a [`Value`] into the native type a typed accessor returns.
pub(crate) trait FromValue: Sized {
    /// Description of the expected kind, as in [`Value::kind`]
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for String {
    const EXPECTED: &'static str = "a string";

    fn from_value(value: &Value) -> Option<String> {
        value.as_str().map(str::to_string)
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "a boolean";

    fn from_value(value: &Value) -> Option<bool> {
        value.as_bool()
    }
}

impl FromValue for u64 {
    const EXPECTED: &'static str = "an integer";

    fn from_value(value: &Value) -> Option<u64> {
        value.as_u64()
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "a double";

    fn from_value(value: &Value) -> Option<f64> {
        value.as_f64()
    }
}

impl FromValue for Vec<String> {
    const EXPECTED: &'static str = "an array of strings";

    fn from_value(value: &Value) -> Option<Vec<String>> {
        value.as_array()?.iter().map(String::from_value).collect()
    }
}
