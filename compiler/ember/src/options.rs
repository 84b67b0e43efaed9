//! Compilation options.

use ember_lexer::{LexOptions, DEFAULT_MAX_CAST_DEPTH};
use serde::Deserialize;

/// Options controlling how source text is compiled.
///
/// Deserializable so hosts can keep it in their own configuration files;
/// missing fields take their defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileOptions {
    /// Maximum nesting of casts such as `Int(Double(String(x)))`.
    pub max_cast_depth: u32,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            max_cast_depth: DEFAULT_MAX_CAST_DEPTH,
        }
    }
}

impl From<CompileOptions> for LexOptions {
    fn from(options: CompileOptions) -> Self {
        LexOptions {
            max_cast_depth: options.max_cast_depth,
        }
    }
}
