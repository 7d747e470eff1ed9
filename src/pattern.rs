//! Compiled pattern wrapper with full-string match semantics.

use std::fmt;

use regex::Regex;

use crate::error::Result;

/// A compiled regular expression that only matches whole inputs.
///
/// `regex` searches for substrings, so the engine is fed the pattern wrapped
/// in `\A(?:...)\z`. The pattern is first compiled as written so that text
/// which only becomes valid once wrapped (e.g. `a)|(b`) is still rejected.
pub struct CompiledPattern {
    source: String,
    anchored: Regex,
}

impl CompiledPattern {
    /// Compiles `pattern` for full-string matching.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::PatternSyntax` if the engine rejects the pattern.
    pub fn compile(pattern: &str) -> Result<Self> {
        Regex::new(pattern)?;
        let anchored = Regex::new(&format!(r"\A(?:{pattern})\z"))?;
        Ok(Self {
            source: pattern.to_string(),
            anchored,
        })
    }

    /// Returns true if the entire `text` matches the pattern.
    pub fn is_full_match(&self, text: &str) -> bool {
        self.anchored.is_match(text)
    }

    /// The pattern text this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompiledPattern").field(&self.source).finish()
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
