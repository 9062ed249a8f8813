mod decimal;
mod number;

pub use decimal::{Decimal, ParseDecimalError};
pub use number::Number;

/// An immutable JSON value tree.
///
/// Every parser in this crate produces one of these. Containers own their children, so the
/// whole document lives exactly as long as its root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JsonValue {
    String(String),
    Number(Number),
    Bool(bool),
    Object(Object),
    Array(Array),
    /// An explicit JSON `null`.
    Null,
    /// A node position that was requested but is not present in the source document.
    ///
    /// Only produced by backends that can tell a missing node from `null`.
    Nothing,
}

/// A single object member.
pub type Field = (String, JsonValue);

/// JSON object with members in document order.
///
/// Names are not required to be unique; lookups return the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Object {
    fields: Vec<Field>,
}

impl Object {
    #[must_use]
    pub fn new(fields: Vec<Field>) -> Object {
        Object { fields }
    }

    /// Value of the first field called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.fields
            .iter()
            .find_map(|(key, value)| (key == name).then_some(value))
    }

    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.fields.iter().any(|(key, _)| key == name)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &JsonValue)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<Field> for Object {
    fn from_iter<T: IntoIterator<Item = Field>>(iter: T) -> Self {
        Object::new(iter.into_iter().collect())
    }
}

/// JSON array. Element order is significant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Array {
    values: Vec<JsonValue>,
}

impl Array {
    #[must_use]
    pub fn new(values: Vec<JsonValue>) -> Array {
        Array { values }
    }

    /// Element at `index`, or `None` when the index is out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&JsonValue> {
        self.values.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JsonValue> {
        self.values.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[JsonValue] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<JsonValue> for Array {
    fn from_iter<T: IntoIterator<Item = JsonValue>>(iter: T) -> Self {
        Array::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a JsonValue;
    type IntoIter = std::slice::Iter<'a, JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Marker payload for [`JsonValue::Null`], used as a narrowing target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Null;

/// Marker payload for [`JsonValue::Nothing`], used as a narrowing target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nothing;

/// A type that one [`JsonValue`] variant carries.
///
/// Implemented for the payload of every variant, which makes [`JsonValue::to`] usable as a
/// single narrowing operation for all of them.
pub trait Variant: private::Sealed {
    /// Returns the payload if `value` is the variant carrying `Self`.
    fn narrow(value: &JsonValue) -> Option<&Self>;
}

mod private {
    pub trait Sealed {}
}

macro_rules! impl_variant {
    ($ty:ty, $pattern:pat => $payload:expr) => {
        impl private::Sealed for $ty {}

        impl Variant for $ty {
            #[inline]
            fn narrow(value: &JsonValue) -> Option<&Self> {
                match value {
                    $pattern => Some($payload),
                    _ => None,
                }
            }
        }
    };
}

impl_variant!(String, JsonValue::String(inner) => inner);
impl_variant!(Number, JsonValue::Number(inner) => inner);
impl_variant!(bool, JsonValue::Bool(inner) => inner);
impl_variant!(Object, JsonValue::Object(inner) => inner);
impl_variant!(Array, JsonValue::Array(inner) => inner);
impl_variant!(Null, JsonValue::Null => &Null);
impl_variant!(Nothing, JsonValue::Nothing => &Nothing);

impl JsonValue {
    /// View this value as the variant carrying `T`.
    ///
    /// Never coerces across variants: a string is never narrowed to an object.
    ///
    /// ```rust
    /// use jsontree::{JsonValue, Object};
    ///
    /// let value = JsonValue::String("hello".to_string());
    /// assert_eq!(value.to::<String>().map(String::as_str), Some("hello"));
    /// assert!(value.to::<Object>().is_none());
    /// ```
    #[must_use]
    pub fn to<T: Variant>(&self) -> Option<&T> {
        T::narrow(self)
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        self.to()
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        self.to()
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.to::<String>().map(String::as_str)
    }

    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        self.to()
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        self.to::<bool>().copied()
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    #[must_use]
    pub fn is_nothing(&self) -> bool {
        matches!(self, JsonValue::Nothing)
    }

    /// Name of the variant, suitable for messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            JsonValue::String(_) => "string",
            JsonValue::Number(_) => "number",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Object(_) => "object",
            JsonValue::Array(_) => "array",
            JsonValue::Null => "null",
            JsonValue::Nothing => "nothing",
        }
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::String(value.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        JsonValue::String(value)
    }
}

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        JsonValue::Bool(value)
    }
}

impl From<i64> for JsonValue {
    fn from(value: i64) -> Self {
        JsonValue::Number(Number::Integer(value))
    }
}

impl From<f64> for JsonValue {
    fn from(value: f64) -> Self {
        JsonValue::Number(Number::Float(value))
    }
}

impl From<Number> for JsonValue {
    fn from(value: Number) -> Self {
        JsonValue::Number(value)
    }
}

impl From<Object> for JsonValue {
    fn from(value: Object) -> Self {
        JsonValue::Object(value)
    }
}

impl From<Array> for JsonValue {
    fn from(value: Array) -> Self {
        JsonValue::Array(value)
    }
}
