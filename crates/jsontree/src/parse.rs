use std::io::Read;

use crate::{Error, JsonValue};

/// Turns one complete JSON document into a [`JsonValue`] tree.
///
/// Implementations consume the whole input. The reader is moved into the call, so it is released
/// when `parse` returns, whether it succeeded or not.
pub trait JsonParser {
    /// Parse the document read from `input`.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedInput`] if the backend cannot parse the bytes as JSON.
    /// - [`Error::InternalConsistency`] if the backend hands over a node it does not describe
    ///   consistently.
    /// - [`Error::DepthLimitExceeded`] if the document nests deeper than allowed.
    /// - [`Error::Io`] if reading `input` fails.
    fn parse<R: Read>(&self, input: R) -> Result<JsonValue, Error>;

    /// Parse a document held in memory.
    ///
    /// # Errors
    ///
    /// See [`JsonParser::parse`].
    fn parse_slice(&self, input: &[u8]) -> Result<JsonValue, Error> {
        self.parse(input)
    }

    /// Parse a document held in a string.
    ///
    /// # Errors
    ///
    /// See [`JsonParser::parse`].
    fn parse_str(&self, input: &str) -> Result<JsonValue, Error> {
        self.parse(input.as_bytes())
    }
}
