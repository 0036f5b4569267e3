//! Error types for page-decorator.
//!
//! Nothing in the decoration pipeline is fatal: most of these errors are
//! logged and swallowed at the phase boundary that produced them. They are
//! still surfaced as values so individual helpers can be tested in isolation.

/// Error type for decoration and loading operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTML could not be turned into a usable document.
    #[error("HTML parsing failed: {0}")]
    ParseError(String),

    /// A URL (href, image source, script source) could not be parsed.
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl {
        /// The offending URL as found in the markup.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// No behavior is registered for a block name.
    #[error("no behavior registered for block {0:?}")]
    BlockNotRegistered(String),

    /// A block behavior reported a failure.
    #[error("block {name:?} failed: {reason}")]
    BlockFailed {
        /// Canonical block name.
        name: String,
        /// Failure description returned by the behavior.
        reason: String,
    },

    /// A stylesheet request resolved with an error.
    #[error("stylesheet {href:?} failed to load: {reason}")]
    StylesheetFailed {
        /// Stylesheet URL.
        href: String,
        /// Failure description returned by the resource loader.
        reason: String,
    },

    /// An image failed to load while waiting for the LCP candidate.
    #[error("image {src:?} failed to load: {reason}")]
    ImageFailed {
        /// Image URL.
        src: String,
        /// Failure description returned by the resource loader.
        reason: String,
    },

    /// Configuration could not be read.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Shorthand used by block behaviors to report a failure.
    #[must_use]
    pub fn block(name: &str, reason: impl Into<String>) -> Self {
        Self::BlockFailed {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for decoration operations.
pub type Result<T> = std::result::Result<T, Error>;
