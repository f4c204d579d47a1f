//! Separator strings for joining items one at a time.
//!
//! A [`Separator`] renders as an empty string the first time and as the
//! configured separator every time after that, so a loop can emit
//! `separator, item` pairs without tracking whether it is on the first item.
//!
//! ```
//! use infra_core::Separator;
//!
//! let sep = Separator::default();
//! let mut out = String::new();
//! for item in ["a", "b", "c"] {
//!     sep.write_to(&mut out);
//!     out.push_str(item);
//! }
//! assert_eq!(out, "a, b, c");
//! ```

use crate::constants::DEFAULT_SEPARATOR;
use std::borrow::Cow;
use std::cell::Cell;
use std::fmt;

/// Supplies separators for joining multiple items
#[derive(Debug, Clone)]
pub struct Separator {
    separator: Cow<'static, str>,
    first_item: Cell<bool>,
}

impl Separator {
    /// Create a separator that emits `separator` between items
    pub fn new(separator: impl Into<Cow<'static, str>>) -> Self {
        Self {
            separator: separator.into(),
            first_item: Cell::new(true),
        }
    }

    /// Create a separator of a single character
    pub fn from_char(separator: char) -> Self {
        Self::new(separator.to_string())
    }

    /// The text emitted between items
    pub fn as_str(&self) -> &str {
        &self.separator
    }

    /// Start over; the next rendering is blank again
    pub fn reset(&self) {
        self.first_item.set(true);
    }

    /// Return the text to emit before the next item and advance
    pub fn next_str(&self) -> &str {
        if self.first_item.replace(false) {
            ""
        } else {
            &self.separator
        }
    }

    /// Append the separator for the next item to `buffer`
    pub fn write_to(&self, buffer: &mut String) {
        buffer.push_str(self.next_str());
    }
}

impl Default for Separator {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR)
    }
}

impl From<char> for Separator {
    fn from(separator: char) -> Self {
        Self::from_char(separator)
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.next_str())
    }
}
