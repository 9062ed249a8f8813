//! `sonic-rs` as an object mapper.
use sonic_rs::{JsonContainerTrait, JsonValueTrait, Value};

use crate::{
    graph::{Category, GraphNode, GraphParser, NativeNumber, ObjectMapper},
    Error,
};

/// [`GraphParser`] backed by `sonic-rs`.
pub type SonicParser = GraphParser<SonicMapper>;

/// Deserializes JSON text into a `sonic_rs::Value` graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct SonicMapper;

impl ObjectMapper for SonicMapper {
    type Node = Value;

    fn read_graph(&self, text: &str) -> Result<Value, Error> {
        sonic_rs::from_str(text).map_err(Error::malformed)
    }
}

impl GraphNode for Value {
    fn category(&self) -> Category<'_, Self> {
        if let Some(value) = self.as_str() {
            Category::String(value)
        } else if self.is_number() {
            native_number(self).map_or(Category::Other, Category::Number)
        } else if let Some(value) = self.as_bool() {
            Category::Boolean(value)
        } else if let Some(items) = self.as_array() {
            Category::List(Box::new(items.iter().map(Some)))
        } else if let Some(object) = self.as_object() {
            Category::Map(Box::new(object.iter().map(|(key, value)| (key, Some(value)))))
        } else if self.is_null() {
            Category::Null
        } else {
            Category::Other
        }
    }
}

fn native_number(value: &Value) -> Option<NativeNumber> {
    if let Some(value) = value.as_i64() {
        Some(NativeNumber::I64(value))
    } else if let Some(value) = value.as_u64() {
        Some(NativeNumber::U64(value))
    } else {
        value.as_f64().map(NativeNumber::F64)
    }
}
