//! Mixed message/field arguments
//!
//! Structured call variants accept a list of [`LogArg`]s. Field maps are
//! pulled out and merged into the record (later keys win); everything else
//! becomes the message, in order.

use super::fields::{FieldValue, Fields};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub enum LogArg {
    /// A string operand
    Text(String),
    /// Any other operand, already rendered
    Value(String),
    /// Fields merged into the record instead of the message
    Fields(Fields),
}

impl LogArg {
    /// Render a non-string operand.
    pub fn value(value: impl Display) -> Self {
        LogArg::Value(value.to_string())
    }
}

impl From<&str> for LogArg {
    fn from(text: &str) -> Self {
        LogArg::Text(text.to_string())
    }
}

impl From<String> for LogArg {
    fn from(text: String) -> Self {
        LogArg::Text(text)
    }
}

impl From<Fields> for LogArg {
    fn from(fields: Fields) -> Self {
        LogArg::Fields(fields)
    }
}

impl From<FieldValue> for LogArg {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::String(text) => LogArg::Text(text),
            other => LogArg::Value(other.to_string()),
        }
    }
}

macro_rules! log_arg_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for LogArg {
                fn from(value: $ty) -> Self {
                    LogArg::Value(value.to_string())
                }
            }
        )*
    };
}

log_arg_from_display!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char);

/// Split `args` into the message and the merged fields.
///
/// Operands are joined without separators, except that a space goes
/// between two adjacent operands when neither of them is text.
pub fn split_args(args: impl IntoIterator<Item = LogArg>) -> (String, Fields) {
    let mut message = String::new();
    let mut fields = Fields::new();
    let mut previous_was_value = false;

    for arg in args {
        match arg {
            LogArg::Fields(extra) => fields.merge(extra),
            LogArg::Text(text) => {
                message.push_str(&text);
                previous_was_value = false;
            }
            LogArg::Value(value) => {
                if previous_was_value {
                    message.push(' ');
                }
                message.push_str(&value);
                previous_was_value = true;
            }
        }
    }

    (message, fields)
}
