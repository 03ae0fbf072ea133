//! Core shared types and errors (loader-agnostic).

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Which attribute list a face index points into.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum AttributeKind {
    Position,
    TexCoord,
    Normal,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeKind::Position => "position",
            AttributeKind::TexCoord => "texture coordinate",
            AttributeKind::Normal => "normal",
        };
        f.write_str(name)
    }
}

/// Fatal failures of the model loader. No partial mesh accompanies any of them.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read line {line_no}: {source}")]
    Io {
        line_no: usize,
        #[source]
        source: io::Error,
    },

    #[error("parse error on line {line_no} ({reason}): '{line}'")]
    Parse {
        line_no: usize,
        line: String,
        reason: String,
    },

    #[error("{kind} index {index} out of range (1..={len})")]
    IndexResolution {
        kind: AttributeKind,
        index: i64,
        len: usize,
    },

    #[error("position index {index} does not fit a 32-bit index buffer")]
    IndexOverflow { index: i64 },
}

impl LoadError {
    pub fn parse(line_no: usize, line: &str, reason: impl Into<String>) -> Self {
        LoadError::Parse {
            line_no,
            line: line.to_owned(),
            reason: reason.into(),
        }
    }
}

pub type LoadResult<T> = Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_mentions_line() {
        let err = LoadError::parse(7, "v 1.0 x 2.0", "invalid float 'x'");
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("v 1.0 x 2.0"));
    }

    #[test]
    fn index_error_names_attribute() {
        let err = LoadError::IndexResolution {
            kind: AttributeKind::Normal,
            index: 0,
            len: 4,
        };
        assert_eq!(err.to_string(), "normal index 0 out of range (1..=4)");
    }
}
