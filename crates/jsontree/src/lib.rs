//! # jsontree
//!
//! An immutable JSON value tree with interchangeable parsing backends.
//!
//! Every backend implements [`JsonParser`] and produces the same [`JsonValue`] model:
//!
//! - [`SerdeJsonParser`] walks a `serde_json` parse tree. Integers become [`Number::Integer`],
//!   floating point literals become [`Number::Float`] and anything that does not fit either
//!   becomes an exact [`Number::Decimal`]. A document without any value yields
//!   [`JsonValue::Nothing`].
//! - [`SonicParser`] walks a `sonic-rs` object graph and keeps its native number typing. It
//!   has no notion of a missing node: absent values are [`JsonValue::Null`].
//!
//! ```rust
//! # #[cfg(feature = "serde_json")]
//! # fn main() -> Result<(), jsontree::Error> {
//! use jsontree::{JsonParser, SerdeJsonParser};
//!
//! let parser = SerdeJsonParser::default();
//! let document = parser.parse(r#"{"handlers": [{"name": "api"}]}"#.as_bytes())?;
//! let name = document
//!     .as_object()
//!     .and_then(|root| root.get("handlers"))
//!     .and_then(|handlers| handlers.as_array())
//!     .and_then(|handlers| handlers.get(0))
//!     .and_then(|handler| handler.as_object())
//!     .and_then(|handler| handler.get("name"));
//! assert_eq!(name.and_then(|name| name.as_str()), Some("api"));
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "serde_json"))]
//! # fn main() {}
//! ```
mod error;
pub mod graph;
mod impls;
mod options;
mod parse;
pub mod tree;
mod value;

pub use error::Error;
pub use graph::GraphParser;
#[cfg(feature = "serde_json")]
pub use impls::serde_json::{SerdeJsonCodec, SerdeJsonParser};
#[cfg(feature = "sonic-rs")]
pub use impls::sonic_rs::{SonicMapper, SonicParser};
pub use options::{ParserOptions, DEFAULT_MAX_DEPTH};
pub use parse::JsonParser;
pub use tree::TreeParser;
pub use value::{
    Array, Decimal, Field, JsonValue, Nothing, Null, Number, Object, ParseDecimalError, Variant,
};

/// Create a builder for configuring parsers.
///
/// ```rust
/// # #[cfg(feature = "sonic-rs")]
/// # fn main() {
/// use jsontree::{JsonParser, SonicMapper};
///
/// let parser = jsontree::options().max_depth(2).build_graph_parser(SonicMapper);
/// assert!(parser.parse_str("[[1]]").is_ok());
/// assert!(parser.parse_str("[[[1]]]").is_err());
/// # }
/// # #[cfg(not(feature = "sonic-rs"))]
/// # fn main() {}
/// ```
#[must_use]
pub fn options() -> ParserOptions {
    ParserOptions::new()
}
