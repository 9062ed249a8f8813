//! `serde_json` as a tree codec.
//!
//! Built with `arbitrary_precision`, so every number keeps its source token, and with
//! `preserve_order`, so object fields come back in document order.
use std::io::Read;

use serde_json::Value;

use crate::{
    tree::{Leaf, NumberToken, NumberType, TreeCodec, TreeNode, TreeParser},
    Decimal, Error, JsonValue, Number,
};

/// [`TreeParser`] backed by `serde_json`.
pub type SerdeJsonParser = TreeParser<SerdeJsonCodec>;

/// Reads input into a `serde_json::Value` tree.
///
/// Input consisting only of whitespace holds no value and yields no tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonCodec;

impl TreeCodec for SerdeJsonCodec {
    type Node = Value;

    fn read_tree(&self, input: &mut dyn Read) -> Result<Option<Value>, Error> {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes)?;
        if bytes
            .iter()
            .all(|byte| matches!(byte, b' ' | b'\t' | b'\n' | b'\r'))
        {
            return Ok(None);
        }
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(Error::malformed)
    }
}

impl TreeNode for Value {
    fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    fn is_value_node(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
        )
    }

    fn is_missing_node(&self) -> bool {
        false
    }

    fn size(&self) -> usize {
        match self {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => 0,
        }
    }

    fn get_index(&self, index: usize) -> Option<&Self> {
        match self {
            Value::Array(items) => items.get(index),
            _ => None,
        }
    }

    fn field_names(&self) -> impl Iterator<Item = &str> {
        self.as_object()
            .into_iter()
            .flat_map(|map| map.keys().map(String::as_str))
    }

    fn get_field(&self, name: &str) -> Option<&Self> {
        match self {
            Value::Object(map) => map.get(name),
            _ => None,
        }
    }

    fn leaf(&self) -> Leaf<'_> {
        match self {
            Value::Bool(true) => Leaf::Boolean("true"),
            Value::Bool(false) => Leaf::Boolean("false"),
            Value::String(value) => Leaf::String(value),
            Value::Number(number) => {
                let text = number.to_string();
                Leaf::Number(NumberToken::new(number_type(&text), text))
            }
            Value::Null | Value::Array(_) | Value::Object(_) => Leaf::Other,
        }
    }
}

/// Categorize a number token the way a tree library reports it.
fn number_type(text: &str) -> NumberType {
    if text.bytes().any(|byte| matches!(byte, b'.' | b'e' | b'E')) {
        if text.parse::<f64>().is_ok_and(f64::is_finite) {
            NumberType::Double
        } else {
            NumberType::BigDecimal
        }
    } else if text.parse::<i32>().is_ok() {
        NumberType::Int
    } else if text.parse::<i64>().is_ok() {
        NumberType::Long
    } else {
        NumberType::BigInteger
    }
}

impl PartialEq<Value> for JsonValue {
    fn eq(&self, other: &Value) -> bool {
        eq(other, self)
    }
}

impl PartialEq<JsonValue> for Value {
    fn eq(&self, other: &JsonValue) -> bool {
        eq(self, other)
    }
}

fn eq(lhs: &Value, rhs: &JsonValue) -> bool {
    match (lhs, rhs) {
        (Value::Null, JsonValue::Null) => true,
        (Value::Bool(l), JsonValue::Bool(r)) => l == r,
        (Value::Number(l), JsonValue::Number(r)) => compare_number(l, r),
        (Value::String(l), JsonValue::String(r)) => l == r,
        (Value::Array(l), JsonValue::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r.iter()).all(|(l, r)| eq(l, r))
        }
        (Value::Object(l), JsonValue::Object(r)) => {
            // Both sides keep document order, so fields are compared pairwise.
            l.len() == r.len()
                && l
                    .iter()
                    .zip(r.iter())
                    .all(|((lk, lv), (rk, rv))| lk == rk && eq(lv, rv))
        }
        _ => false,
    }
}

#[inline]
fn compare_number(lhs: &serde_json::Number, rhs: &Number) -> bool {
    let text = lhs.to_string();
    match (number_type(&text), rhs) {
        (NumberType::Int | NumberType::Long, Number::Integer(i)) => lhs.as_i64() == Some(*i),
        #[allow(clippy::float_cmp)]
        (NumberType::Float | NumberType::Double, Number::Float(f)) => lhs.as_f64() == Some(*f),
        (NumberType::BigInteger | NumberType::BigDecimal, Number::Decimal(d)) => {
            text.parse::<Decimal>().is_ok_and(|parsed| &parsed == d)
        }
        _ => false,
    }
}
