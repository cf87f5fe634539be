//! Target language selection.

use crate::emitter::Emitter;
use crate::rust::{RustEmitter, RustOptions};
use crate::typescript::{TypeScriptEmitter, TypeScriptOptions};
use std::fmt;
use std::str::FromStr;

/// Languages with a bundled emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lang {
    /// TypeScript declarations.
    #[default]
    TypeScript,
    /// Serde-annotated Rust types.
    Rust,
}

impl Lang {
    /// All supported languages.
    pub const ALL: [Lang; 2] = [Lang::TypeScript, Lang::Rust];

    /// Returns the name used on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::Rust => "rust",
        }
    }

    /// Creates the emitter for this language, prefixing type names with
    /// `root_name`, or with a name derived from each root's schema id when
    /// `names_from_ids` is set.
    #[must_use]
    pub fn emitter(&self, root_name: &str, names_from_ids: bool) -> Box<dyn Emitter> {
        match self {
            Self::TypeScript => Box::new(TypeScriptEmitter::with_options(
                TypeScriptOptions::new()
                    .root_name(root_name)
                    .names_from_ids(names_from_ids),
            )),
            Self::Rust => Box::new(RustEmitter::with_options(
                RustOptions::new()
                    .root_name(root_name)
                    .names_from_ids(names_from_ids),
            )),
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(Self::TypeScript),
            "rust" | "rs" => Ok(Self::Rust),
            other => Err(format!(
                "unknown lang '{other}', expected one of: typescript, rust"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("typescript".parse::<Lang>(), Ok(Lang::TypeScript));
        assert_eq!("TS".parse::<Lang>(), Ok(Lang::TypeScript));
        assert_eq!("rust".parse::<Lang>(), Ok(Lang::Rust));
        assert!("go".parse::<Lang>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for lang in Lang::ALL {
            assert_eq!(lang.to_string().parse::<Lang>(), Ok(lang));
        }
    }

    #[test]
    fn test_emitter_primitives() {
        assert_eq!(Lang::TypeScript.emitter("Default", false).primitive_number(), "number");
        assert_eq!(Lang::Rust.emitter("Default", false).primitive_number(), "f64");
    }
}
