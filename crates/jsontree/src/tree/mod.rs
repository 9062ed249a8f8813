//! Decomposition of generic parse trees.
//!
//! A [`TreeCodec`] builds its own tree out of the raw input; [`TreeParser`] then walks that tree
//! through the [`TreeNode`] contract and rebuilds it as a [`JsonValue`]. Missing nodes become
//! [`JsonValue::Nothing`], so callers can tell them apart from an explicit `null`.
use std::{borrow::Cow, io::Read};

use crate::{Array, Decimal, Error, JsonParser, JsonValue, Number, Object, ParserOptions};

/// Numeric category a tree library reports for a number token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberType {
    /// Integer that fits into 32 bits.
    Int,
    /// Integer that fits into 64 bits.
    Long,
    /// Integer beyond 64 bits.
    BigInteger,
    Float,
    Double,
    /// Floating point literal that has no finite `f64` representation.
    BigDecimal,
}

/// A number leaf: its category together with the token as written in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberToken<'a> {
    number_type: NumberType,
    text: Cow<'a, str>,
}

impl<'a> NumberToken<'a> {
    #[must_use]
    pub fn new(number_type: NumberType, text: impl Into<Cow<'a, str>>) -> Self {
        Self {
            number_type,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn number_type(&self) -> NumberType {
        self.number_type
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Payload of a value node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf<'a> {
    /// Boolean with its textual token, `true` or `false`.
    Boolean(&'a str),
    /// Decoded string contents.
    String(&'a str),
    Number(NumberToken<'a>),
    /// Any other value node, e.g. `null`.
    Other,
}

/// Read-only view of a node in a library-specific parse tree.
pub trait TreeNode {
    fn is_array(&self) -> bool;
    fn is_object(&self) -> bool;
    /// Whether this node is a scalar.
    fn is_value_node(&self) -> bool;
    /// Whether this node stands for a position that does not exist in the document.
    fn is_missing_node(&self) -> bool;
    /// Number of array elements or object fields.
    fn size(&self) -> usize;
    fn get_index(&self, index: usize) -> Option<&Self>;
    /// Field names in the order the library enumerates them.
    fn field_names(&self) -> impl Iterator<Item = &str>;
    fn get_field(&self, name: &str) -> Option<&Self>;
    /// Payload of a value node. Only consulted when [`TreeNode::is_value_node`] holds.
    fn leaf(&self) -> Leaf<'_>;
}

/// A configured tree library that turns raw input into its native tree.
pub trait TreeCodec {
    type Node: TreeNode;

    /// Read the whole `input` and build a tree from it.
    ///
    /// Returns `Ok(None)` when the input holds no value at all.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedInput`] when the input is not JSON, [`Error::Io`] when reading fails.
    fn read_tree(&self, input: &mut dyn Read) -> Result<Option<Self::Node>, Error>;
}

/// [`JsonParser`] that walks the tree built by a [`TreeCodec`].
///
/// Numbers are classified by the category the codec reports: 32/64-bit integers become
/// [`Number::Integer`], floating point literals become [`Number::Float`] and everything else
/// becomes an exact [`Number::Decimal`].
#[derive(Debug, Clone, Default)]
pub struct TreeParser<C> {
    codec: C,
    options: ParserOptions,
}

impl<C: TreeCodec> TreeParser<C> {
    #[must_use]
    pub fn new(codec: C) -> Self {
        Self::with_options(codec, ParserOptions::default())
    }

    #[must_use]
    pub fn with_options(codec: C, options: ParserOptions) -> Self {
        Self { codec, options }
    }

    #[must_use]
    pub fn codec(&self) -> &C {
        &self.codec
    }

    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    fn decompose(&self, node: Option<&C::Node>, depth: usize) -> Result<JsonValue, Error> {
        let Some(node) = node else {
            return Ok(JsonValue::Nothing);
        };
        if node.is_missing_node() {
            return Ok(JsonValue::Nothing);
        }
        if node.is_array() {
            self.options.enter_container(depth)?;
            let values = (0..node.size())
                .map(|idx| self.decompose(node.get_index(idx), depth + 1))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(JsonValue::Array(Array::new(values)));
        }
        if node.is_object() {
            self.options.enter_container(depth)?;
            let fields = node
                .field_names()
                .map(|name| {
                    let value = self.decompose(node.get_field(name), depth + 1)?;
                    Ok((name.to_string(), value))
                })
                .collect::<Result<Vec<_>, Error>>()?;
            return Ok(JsonValue::Object(Object::new(fields)));
        }
        if node.is_value_node() {
            return decompose_leaf(node.leaf());
        }
        Err(Error::internal(
            "node is neither an array, an object, a value nor missing",
        ))
    }
}

fn decompose_leaf(leaf: Leaf<'_>) -> Result<JsonValue, Error> {
    match leaf {
        Leaf::Boolean(token) => token
            .parse::<bool>()
            .map(JsonValue::Bool)
            .map_err(|_| Error::internal(format!("`{token}` is not a boolean token"))),
        Leaf::String(text) => Ok(JsonValue::String(text.to_string())),
        Leaf::Number(token) => decompose_number(&token).map(JsonValue::Number),
        Leaf::Other => Ok(JsonValue::Null),
    }
}

fn decompose_number(token: &NumberToken<'_>) -> Result<Number, Error> {
    let text = token.text();
    let mismatch = || {
        Error::internal(format!(
            "`{text}` does not match its number type {:?}",
            token.number_type()
        ))
    };
    match token.number_type() {
        NumberType::Int | NumberType::Long => {
            text.parse::<i64>().map(Number::Integer).map_err(|_| mismatch())
        }
        NumberType::Float | NumberType::Double => text
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(Number::Float)
            .ok_or_else(mismatch),
        NumberType::BigInteger | NumberType::BigDecimal => text
            .parse::<Decimal>()
            .map(Number::Decimal)
            .map_err(|_| mismatch()),
    }
}

impl<C: TreeCodec> JsonParser for TreeParser<C> {
    fn parse<R: Read>(&self, mut input: R) -> Result<JsonValue, Error> {
        log::trace!("Parsing input as a parse tree");
        let root = self
            .codec
            .read_tree(&mut input)
            .inspect_err(|error| log::debug!("Tree codec rejected input: {error}"))?;
        let value = self.decompose(root.as_ref(), 0)?;
        log::trace!("Decomposed parse tree into {} root", value.kind());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[derive(Debug, Clone)]
    enum FakeNode {
        Array(Vec<Option<FakeNode>>),
        Object(Vec<(&'static str, Option<FakeNode>)>),
        Boolean(&'static str),
        String(&'static str),
        Number(NumberType, &'static str),
        Null,
        Missing,
        /// Reports no shape at all.
        Opaque,
    }

    impl TreeNode for FakeNode {
        fn is_array(&self) -> bool {
            matches!(self, FakeNode::Array(_))
        }
        fn is_object(&self) -> bool {
            matches!(self, FakeNode::Object(_))
        }
        fn is_value_node(&self) -> bool {
            matches!(
                self,
                FakeNode::Boolean(_) | FakeNode::String(_) | FakeNode::Number(..) | FakeNode::Null
            )
        }
        fn is_missing_node(&self) -> bool {
            matches!(self, FakeNode::Missing)
        }
        fn size(&self) -> usize {
            match self {
                FakeNode::Array(items) => items.len(),
                FakeNode::Object(fields) => fields.len(),
                _ => 0,
            }
        }
        fn get_index(&self, index: usize) -> Option<&Self> {
            match self {
                FakeNode::Array(items) => items.get(index).and_then(Option::as_ref),
                _ => None,
            }
        }
        fn field_names(&self) -> impl Iterator<Item = &str> {
            let fields = match self {
                FakeNode::Object(fields) => fields.as_slice(),
                _ => &[],
            };
            fields.iter().map(|(name, _)| *name)
        }
        fn get_field(&self, name: &str) -> Option<&Self> {
            match self {
                FakeNode::Object(fields) => fields
                    .iter()
                    .find(|(key, _)| *key == name)
                    .and_then(|(_, value)| value.as_ref()),
                _ => None,
            }
        }
        fn leaf(&self) -> Leaf<'_> {
            match self {
                FakeNode::Boolean(token) => Leaf::Boolean(token),
                FakeNode::String(text) => Leaf::String(text),
                FakeNode::Number(number_type, text) => {
                    Leaf::Number(NumberToken::new(*number_type, *text))
                }
                _ => Leaf::Other,
            }
        }
    }

    /// Drains the input and hands out a prepared tree.
    struct FakeCodec(Option<FakeNode>);

    impl TreeCodec for FakeCodec {
        type Node = FakeNode;

        fn read_tree(&self, input: &mut dyn Read) -> Result<Option<FakeNode>, Error> {
            let mut buffer = Vec::new();
            input.read_to_end(&mut buffer)?;
            if buffer == b"!" {
                return Err(Error::malformed("unexpected `!`"));
            }
            Ok(self.0.clone())
        }
    }

    fn decompose(root: Option<FakeNode>) -> Result<JsonValue, Error> {
        TreeParser::new(FakeCodec(root)).parse_slice(b"")
    }

    #[test_case(NumberType::Int, "1", Number::Integer(1); "int")]
    #[test_case(NumberType::Long, "-9223372036854775808", Number::Integer(i64::MIN); "long")]
    #[test_case(NumberType::Float, "1.5", Number::Float(1.5); "float")]
    #[test_case(NumberType::Double, "-2.5e3", Number::Float(-2500.0); "double")]
    #[test_case(
        NumberType::BigInteger,
        "99999999999999999999",
        Number::Decimal("99999999999999999999".parse().unwrap());
        "big integer"
    )]
    #[test_case(
        NumberType::BigDecimal,
        "1e400",
        Number::Decimal("1e400".parse().unwrap());
        "big decimal"
    )]
    fn numbers(number_type: NumberType, text: &'static str, expected: Number) {
        let value = decompose(Some(FakeNode::Number(number_type, text))).expect("Valid number");
        assert_eq!(value, JsonValue::Number(expected));
    }

    #[test_case(NumberType::Int, "1.5"; "float text as int")]
    #[test_case(NumberType::Long, "99999999999999999999"; "overflowing long")]
    #[test_case(NumberType::Double, "1e400"; "infinite double")]
    #[test_case(NumberType::BigInteger, "NaN"; "not a number")]
    fn number_type_mismatch(number_type: NumberType, text: &'static str) {
        let error = decompose(Some(FakeNode::Number(number_type, text))).expect_err("Mismatch");
        assert!(error.is_internal_consistency(), "{error}");
    }

    #[test_case("true", true)]
    #[test_case("false", false)]
    fn booleans_are_parsed_from_tokens(token: &'static str, expected: bool) {
        let value = decompose(Some(FakeNode::Boolean(token))).expect("Valid boolean");
        assert_eq!(value, JsonValue::Bool(expected));
    }

    #[test]
    fn unknown_boolean_token() {
        let error = decompose(Some(FakeNode::Boolean("yes"))).expect_err("Invalid token");
        assert_eq!(
            error.to_string(),
            "Unexpected JSON node: `yes` is not a boolean token"
        );
    }

    #[test]
    fn strings_are_taken_verbatim() {
        let value = decompose(Some(FakeNode::String("a\\\"b"))).expect("Valid string");
        assert_eq!(value.as_str(), Some("a\\\"b"));
    }

    #[test]
    fn other_leaf_is_null() {
        assert_eq!(decompose(Some(FakeNode::Null)).expect("Valid"), JsonValue::Null);
    }

    #[test]
    fn absent_root_is_nothing() {
        assert_eq!(decompose(None).expect("Valid"), JsonValue::Nothing);
    }

    #[test]
    fn missing_node_is_nothing() {
        assert_eq!(decompose(Some(FakeNode::Missing)).expect("Valid"), JsonValue::Nothing);
    }

    #[test]
    fn absent_children_are_nothing() {
        let root = FakeNode::Object(vec![
            ("gap", None),
            (
                "items",
                Some(FakeNode::Array(vec![
                    Some(FakeNode::Number(NumberType::Int, "1")),
                    None,
                    Some(FakeNode::Missing),
                ])),
            ),
        ]);
        let value = decompose(Some(root)).expect("Valid tree");
        let object = value.as_object().expect("Object");
        assert_eq!(object.get("gap"), Some(&JsonValue::Nothing));
        let items = object
            .get("items")
            .and_then(JsonValue::as_array)
            .expect("Array");
        assert_eq!(
            items.as_slice(),
            &[JsonValue::from(1_i64), JsonValue::Nothing, JsonValue::Nothing]
        );
    }

    #[test]
    fn fields_keep_enumeration_order() {
        let root = FakeNode::Object(vec![
            ("z", Some(FakeNode::Null)),
            ("a", Some(FakeNode::Boolean("true"))),
            ("m", Some(FakeNode::String("x"))),
        ]);
        let value = decompose(Some(root)).expect("Valid tree");
        let keys: Vec<_> = value.as_object().expect("Object").keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn unknown_shape_is_internal_error() {
        let root = FakeNode::Array(vec![Some(FakeNode::Opaque)]);
        let error = decompose(Some(root)).expect_err("Opaque node");
        assert!(error.is_internal_consistency());
    }

    #[test]
    fn codec_errors_are_surfaced() {
        let parser = TreeParser::new(FakeCodec(Some(FakeNode::Null)));
        let error = parser.parse_slice(b"!").expect_err("Malformed");
        assert!(error.is_malformed_input());
    }

    #[test_case(1, true; "one level")]
    #[test_case(2, true; "two levels")]
    #[test_case(3, false; "three levels")]
    fn depth_limit(levels: usize, accepted: bool) {
        let mut node = FakeNode::Number(NumberType::Int, "0");
        for _ in 0..levels {
            node = FakeNode::Array(vec![Some(node)]);
        }
        let parser = ParserOptions::new()
            .max_depth(2)
            .build_tree_parser(FakeCodec(Some(node)));
        let result = parser.parse_slice(b"");
        if accepted {
            assert!(result.is_ok());
        } else {
            assert!(matches!(
                result,
                Err(Error::DepthLimitExceeded { limit: 2 })
            ));
        }
    }
}
