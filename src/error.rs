//! # Error Types
//!
//! Parsing song text, querying element history and correcting chord spaces
//! never fail: malformed input degrades to plain lyrics. Only the outer
//! layers (document construction, serialization, configuration and search
//! highlighting) report errors, all through [`SongtextError`].
//!
//! ## Usage
//! ```rust
//! use songtext::{export, ExportFormat, Song, SongtextError};
//!
//! let song = Song::new("Amazing Grace").with_lyrics("G        C\nAmazing grace");
//! match export(&ExportFormat::default(), &[song]) {
//!     Ok(bytes) => assert!(!bytes.is_empty()),
//!     Err(SongtextError::Document { page, message }) => {
//!         eprintln!("Document error on page {}: {}", page, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SongtextError {
    /// The document model refused some content.
    ///
    /// Raised while building an export, e.g. when a song contains control
    /// characters the output format cannot carry. The whole export is
    /// abandoned; no partial document is returned.
    ///
    /// # Example
    /// ```
    /// # use songtext::SongtextError;
    /// let err = SongtextError::Document {
    ///     page: 2,
    ///     message: "control character U+0007 in lyrics".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Document error on page 2: control character U+0007 in lyrics");
    /// ```
    #[error("Document error on page {page}: {message}")]
    Document { page: usize, message: String },

    /// Writing the serialized document failed.
    #[error("XML output error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Invalid songbook or export configuration.
    ///
    /// # Example
    /// ```
    /// # use songtext::SongtextError;
    /// let err = SongtextError::Config("songs: invalid type".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: songs: invalid type");
    /// ```
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The search pattern used for list highlighting is not a valid regex.
    #[error("Invalid highlight pattern: {0}")]
    Highlight(String),
}
