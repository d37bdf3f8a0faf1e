// Copyright 2025 Sqlregex Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for sqlregex
//!
//! Every failure a function call can produce is surfaced through [`Error`];
//! nothing is swallowed into a default result. Failures are deterministic
//! given identical input, so callers never need retry logic.

use thiserror::Error;

/// Result type alias for sqlregex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for sqlregex operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Pattern failed to compile.
    ///
    /// `offset` is the byte offset of the syntax error within the pattern,
    /// when the matching primitive reports one.
    #[error("error parsing pattern '{pattern}': {message}")]
    Compile {
        pattern: String,
        message: String,
        offset: Option<usize>,
    },

    /// Requested capture group index exceeds the pattern's group count
    #[error("invalid group index {requested}: pattern has {available} capture group(s)")]
    InvalidGroupIndex { requested: i64, available: usize },

    /// Replacement template references a capture group that does not exist
    #[error("replacement references unknown group '{reference}': pattern has {available_groups} capture group(s)")]
    InvalidTemplate {
        reference: String,
        available_groups: usize,
    },

    /// Argument has an unexpected type, or is NULL where NULL is disallowed
    #[error("{function}: unexpected type for argument {position}")]
    ArgumentType { function: String, position: usize },

    /// Invalid argument for function (wrong count, out-of-range value)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Function name not present in the registry
    #[error("function '{0}' not found")]
    UnknownFunction(String),

    /// Cache capacity must be nonzero at registration time
    #[error("cache capacity must be nonzero")]
    InvalidCapacity,

    /// Internal error for unexpected conditions (including caught panics)
    #[error("{message}")]
    Internal { message: String },
}

impl Error {
    /// Create a new Compile error
    pub fn compile(
        pattern: impl Into<String>,
        message: impl Into<String>,
        offset: Option<usize>,
    ) -> Self {
        Error::Compile {
            pattern: pattern.into(),
            message: message.into(),
            offset,
        }
    }

    /// Create a new InvalidGroupIndex error
    pub fn invalid_group_index(requested: i64, available: usize) -> Self {
        Error::InvalidGroupIndex {
            requested,
            available,
        }
    }

    /// Create a new InvalidTemplate error
    pub fn invalid_template(reference: impl Into<String>, available_groups: usize) -> Self {
        Error::InvalidTemplate {
            reference: reference.into(),
            available_groups,
        }
    }

    /// Create a new ArgumentType error (position is 1-based)
    pub fn argument_type(function: impl Into<String>, position: usize) -> Self {
        Error::ArgumentType {
            function: function.into(),
            position,
        }
    }

    /// Create a new InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    /// Create a new Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }

    /// Check if this is a pattern compilation error
    pub fn is_compile_error(&self) -> bool {
        matches!(self, Error::Compile { .. })
    }

    /// Check if this is a caller-usage error (bad arguments rather than bad pattern)
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidGroupIndex { .. }
                | Error::InvalidTemplate { .. }
                | Error::ArgumentType { .. }
                | Error::InvalidArgument(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::compile("a(", "unclosed group", None).to_string(),
            "error parsing pattern 'a(': unclosed group"
        );
        assert_eq!(
            Error::invalid_group_index(5, 1).to_string(),
            "invalid group index 5: pattern has 1 capture group(s)"
        );
        assert_eq!(
            Error::invalid_template("3", 2).to_string(),
            "replacement references unknown group '3': pattern has 2 capture group(s)"
        );
        assert_eq!(
            Error::argument_type("REGEX_LIKE", 1).to_string(),
            "REGEX_LIKE: unexpected type for argument 1"
        );
        assert_eq!(
            Error::UnknownFunction("nope".to_string()).to_string(),
            "function 'nope' not found"
        );
        assert_eq!(
            Error::InvalidCapacity.to_string(),
            "cache capacity must be nonzero"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::compile("(", "oops", None).is_compile_error());
        assert!(!Error::invalid_group_index(1, 0).is_compile_error());

        assert!(Error::invalid_group_index(1, 0).is_usage_error());
        assert!(Error::invalid_template("x", 0).is_usage_error());
        assert!(Error::argument_type("F", 2).is_usage_error());
        assert!(!Error::compile("(", "oops", None).is_usage_error());
        assert!(!Error::InvalidCapacity.is_usage_error());
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            Error::invalid_group_index(2, 1),
            Error::invalid_group_index(2, 1)
        );
        assert_ne!(
            Error::invalid_group_index(2, 1),
            Error::invalid_group_index(3, 1)
        );
    }
}
