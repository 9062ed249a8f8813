//! Decomposition of loosely-typed object graphs.
//!
//! An [`ObjectMapper`] deserializes text into native containers; [`GraphParser`] dispatches on
//! the runtime [`Category`] of every node. This backend has no notion of a missing node: absent
//! entries and anything it does not recognize become [`JsonValue::Null`].
use std::io::Read;

use crate::{Array, Decimal, Error, JsonParser, JsonValue, Number, Object, ParserOptions};

/// A number exactly as the object mapper typed it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NativeNumber {
    I64(i64),
    /// Only used for values above `i64::MAX`.
    U64(u64),
    F64(f64),
}

impl From<NativeNumber> for Number {
    fn from(value: NativeNumber) -> Self {
        match value {
            NativeNumber::I64(value) => Number::Integer(value),
            NativeNumber::U64(value) => match i64::try_from(value) {
                Ok(value) => Number::Integer(value),
                Err(_) => Number::Decimal(Decimal::from(value)),
            },
            NativeNumber::F64(value) => Number::Float(value),
        }
    }
}

/// Entries of a native list. `None` is an absent reference.
pub type ListEntries<'a, N> = Box<dyn Iterator<Item = Option<&'a N>> + 'a>;
/// Entries of a native map in the order the map yields them.
pub type MapEntries<'a, N> = Box<dyn Iterator<Item = (&'a str, Option<&'a N>)> + 'a>;

/// Runtime category of a node in an object graph.
pub enum Category<'a, N> {
    String(&'a str),
    Number(NativeNumber),
    Boolean(bool),
    List(ListEntries<'a, N>),
    Map(MapEntries<'a, N>),
    Null,
    /// Anything the mapper produced that is none of the above.
    Other,
}

/// A node in a loosely-typed object graph.
pub trait GraphNode: Sized {
    fn category(&self) -> Category<'_, Self>;
}

/// A configured object mapper that turns JSON text into its native object graph.
pub trait ObjectMapper {
    type Node: GraphNode;

    /// Deserialize `text` into native containers.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedInput`] when `text` is not a JSON document.
    fn read_graph(&self, text: &str) -> Result<Self::Node, Error>;
}

/// [`JsonParser`] that walks the object graph built by an [`ObjectMapper`].
///
/// The whole input is read as UTF-8 text first. Numbers keep the mapper's native typing; no
/// overflow detection happens on this side.
///
/// Nesting is checked against [`ParserOptions::max_depth`] on the raw text before the mapper
/// runs.
#[derive(Debug, Clone, Default)]
pub struct GraphParser<M> {
    mapper: M,
    options: ParserOptions,
}

impl<M: ObjectMapper> GraphParser<M> {
    #[must_use]
    pub fn new(mapper: M) -> Self {
        Self::with_options(mapper, ParserOptions::default())
    }

    #[must_use]
    pub fn with_options(mapper: M, options: ParserOptions) -> Self {
        Self { mapper, options }
    }

    #[must_use]
    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    fn decompose(&self, node: Option<&M::Node>, depth: usize) -> Result<JsonValue, Error> {
        let Some(node) = node else {
            return Ok(JsonValue::Null);
        };
        let value = match node.category() {
            Category::String(value) => JsonValue::String(value.to_string()),
            Category::Number(value) => JsonValue::Number(value.into()),
            Category::Boolean(value) => JsonValue::Bool(value),
            Category::List(entries) => {
                self.options.enter_container(depth)?;
                let values = entries
                    .map(|entry| self.decompose(entry, depth + 1))
                    .collect::<Result<Vec<_>, _>>()?;
                JsonValue::Array(Array::new(values))
            }
            Category::Map(entries) => {
                self.options.enter_container(depth)?;
                let fields = entries
                    .map(|(key, entry)| Ok((key.to_string(), self.decompose(entry, depth + 1)?)))
                    .collect::<Result<Vec<_>, Error>>()?;
                JsonValue::Object(Object::new(fields))
            }
            Category::Null | Category::Other => JsonValue::Null,
        };
        Ok(value)
    }
}

impl<M: ObjectMapper + Sync> JsonParser for GraphParser<M> {
    fn parse<R: Read>(&self, mut input: R) -> Result<JsonValue, Error> {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes)?;
        log::trace!("Parsing {} bytes as an object graph", bytes.len());
        let text = String::from_utf8(bytes).map_err(Error::malformed)?;
        // Mappers recurse without a bound, so the limit has to hold before they run.
        let depth = self.options.scan_nesting(text.as_bytes())?;
        if depth <= INLINE_DEPTH {
            return self.parse_text(&text);
        }
        let stack_size = depth
            .saturating_mul(STACK_PER_LEVEL)
            .saturating_add(BASE_STACK);
        log::debug!("Parsing {depth} levels of nesting on a {stack_size} byte stack");
        std::thread::scope(|scope| -> Result<JsonValue, Error> {
            std::thread::Builder::new()
                .name("jsontree-graph".to_string())
                .stack_size(stack_size)
                .spawn_scoped(scope, || self.parse_text(&text))?
                .join()
                .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
        })
    }
}

/// Documents nested deeper than this are parsed on a dedicated thread.
const INLINE_DEPTH: usize = 32;
/// Generous for unoptimized builds of the native mappers.
const STACK_PER_LEVEL: usize = 64 * 1024;
const BASE_STACK: usize = 2 * 1024 * 1024;

impl<M: ObjectMapper> GraphParser<M> {
    fn parse_text(&self, text: &str) -> Result<JsonValue, Error> {
        let graph = self
            .mapper
            .read_graph(text)
            .inspect_err(|error| log::debug!("Object mapper rejected input: {error}"))?;
        let value = self.decompose(Some(&graph), 0)?;
        log::trace!("Decomposed object graph into {} root", value.kind());
        Ok(value)
    }
}
