//! Textual frame paths.
//!
//! Paths address frames with a `/`-separated grammar: `/` is the root,
//! `/base/lidar` a nested frame, `.` the current frame and `..` its parent.
//! Parsing is pure; resolution against a tree happens in the graph.

use crate::error::FrameError;

/// Characters that may not appear in a frame name.
const FORBIDDEN: &str = "/!@#$%^&*\t ()\":;'.~`_+=,<>";

/// True when `name` is usable as a frame name: non-empty and free of
/// separator, whitespace and punctuation characters.
///
/// `.` and `..` are reserved path elements, not names, and are rejected.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(|c: char| FORBIDDEN.contains(c))
}

/// A parsed, validated frame path.
///
/// Splitting on `/` drops empty elements and `.` (a no-op during
/// resolution) and keeps `..` (resolved as "parent"). Any other element must
/// be a valid frame name or parsing fails with
/// [`FrameError::InvalidPath`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FramePath {
    text: String,
    elems: Vec<String>,
}

impl FramePath {
    /// Parse and validate `text`. The empty string is rejected.
    pub fn parse(text: &str) -> Result<Self, FrameError> {
        if text.is_empty() {
            return Err(FrameError::invalid(text, "empty path"));
        }
        let mut elems = Vec::new();
        for item in text.split('/') {
            if item.is_empty() || item == "." {
                continue;
            }
            if item != ".." && !is_valid_name(item) {
                return Err(FrameError::invalid(
                    text,
                    format!("invalid element `{item}`"),
                ));
            }
            elems.push(item.to_owned());
        }
        Ok(Self {
            text: text.to_owned(),
            elems,
        })
    }

    /// The retained path elements, in order.
    #[inline]
    pub fn elements(&self) -> &[String] {
        &self.elems
    }

    /// The original text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True when the path starts at the root and cannot escape it.
    ///
    /// The root is addressed as `/`; the first element of an absolute path
    /// names a top-level frame. A `..` anywhere disqualifies the path, even
    /// where it would not actually escape.
    pub fn is_absolute(&self) -> bool {
        self.text.starts_with('/') && self.elems.iter().all(|e| e != "..")
    }
}
