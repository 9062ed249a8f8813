use crate::{
    graph::{GraphParser, ObjectMapper},
    tree::{TreeCodec, TreeParser},
    Error,
};

/// Maximum container nesting accepted by default.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Configuration shared by all parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    max_depth: usize,
}

impl ParserOptions {
    /// Create [`ParserOptions`] with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Maximum number of nested arrays and objects a document may have.
    ///
    /// Deeper documents fail with [`Error::DepthLimitExceeded`](crate::Error::DepthLimitExceeded)
    /// instead of growing the call stack without bound.
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn get_max_depth(&self) -> usize {
        self.max_depth
    }

    /// Fails once a container would open at `depth` enclosing containers or more.
    pub(crate) fn enter_container(&self, depth: usize) -> Result<(), Error> {
        if depth >= self.max_depth {
            log::debug!("JSON nesting exceeds the limit of {} levels", self.max_depth);
            return Err(Error::depth_limit_exceeded(self.max_depth));
        }
        Ok(())
    }

    /// Deepest container nesting in `text`, failing as soon as it passes the limit.
    ///
    /// Brackets inside strings are skipped. Anything else malformed is left for the parser.
    pub(crate) fn scan_nesting(&self, text: &[u8]) -> Result<usize, Error> {
        let mut depth = 0_usize;
        let mut deepest = 0_usize;
        let mut in_string = false;
        let mut escaped = false;
        for &byte in text {
            if in_string {
                if escaped {
                    escaped = false;
                } else if byte == b'\\' {
                    escaped = true;
                } else if byte == b'"' {
                    in_string = false;
                }
                continue;
            }
            match byte {
                b'"' => in_string = true,
                b'[' | b'{' => {
                    self.enter_container(depth)?;
                    depth += 1;
                    deepest = deepest.max(depth);
                }
                b']' | b'}' => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        Ok(deepest)
    }

    /// Build a tree-walking parser around `codec` using these options.
    #[must_use]
    pub fn build_tree_parser<C: TreeCodec>(self, codec: C) -> TreeParser<C> {
        TreeParser::with_options(codec, self)
    }

    /// Build an object-graph parser around `mapper` using these options.
    #[must_use]
    pub fn build_graph_parser<M: ObjectMapper>(self, mapper: M) -> GraphParser<M> {
        GraphParser::with_options(mapper, self)
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self::new()
    }
}
