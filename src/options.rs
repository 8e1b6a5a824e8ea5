//! Configuration options for TOML output.
//!
//! [`TomlOptions`] carries the single formatting switch the stringifier
//! knows about: whether `key = value` lines are padded so their `=` signs
//! line up.
//!
//! ## Examples
//!
//! ```rust
//! use serde_toml_lite::{parse, stringify, TomlOptions};
//!
//! let doc = parse("a = 1\nlonger = 2").unwrap();
//!
//! assert_eq!(stringify(&doc, &TomlOptions::new()), "a = 1\nlonger = 2\n");
//! assert_eq!(stringify(&doc, &TomlOptions::aligned()), "a      = 1\nlonger = 2\n");
//! ```

/// Configuration options for TOML stringification.
///
/// # Examples
///
/// ```rust
/// use serde_toml_lite::TomlOptions;
///
/// let options = TomlOptions::new();
/// assert!(!options.key_alignment);
///
/// let options = TomlOptions::new().with_key_alignment(true);
/// assert!(options.key_alignment);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TomlOptions {
    /// Pad every declaration key to the width of the longest one in the
    /// document.
    pub key_alignment: bool,
}

impl TomlOptions {
    /// Creates default options (no key alignment).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options with key alignment switched on.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_toml_lite::TomlOptions;
    ///
    /// assert!(TomlOptions::aligned().key_alignment);
    /// ```
    #[must_use]
    pub fn aligned() -> Self {
        TomlOptions {
            key_alignment: true,
        }
    }

    #[must_use]
    pub fn with_key_alignment(mut self, key_alignment: bool) -> Self {
        self.key_alignment = key_alignment;
        self
    }
}
