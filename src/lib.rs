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

//! # sqlregex - regex scalar functions for SQL engines
//!
//! sqlregex provides the regex function layer of a database extension:
//! pattern test, capture extraction, substitution, and match counting,
//! callable per row by a host query engine. Patterns compile once into a
//! bounded, LRU-evicted cache shared across calls and threads, so
//! compilation never dominates per-row cost.
//!
//! ## Key Features
//!
//! - **Bounded pattern cache** - LRU eviction, configurable capacity,
//!   safe for concurrent queries over shared connections
//! - **SQL NULL semantics** - `regex_like`/`regex_find` propagate NULL
//!   arguments as NULL results
//! - **Linear-time matching** - automaton-based engine, no pathological
//!   backtracking patterns
//! - **Safe host boundary** - panics are caught at [`Extension::invoke`]
//!   and reported as errors, never unwound into the host
//!
//! ## Quick Start
//!
//! ```rust
//! use sqlregex::{Extension, ExtensionConfig, Value};
//!
//! // Register once per scope (process-wide or per-connection)
//! let ext = Extension::register(ExtensionConfig::default()).unwrap();
//!
//! let matched = ext
//!     .invoke("regex_like", &[Value::text(r"^\d+$"), Value::text("12345")])
//!     .unwrap();
//! assert_eq!(matched, Value::Boolean(true));
//!
//! let replaced = ext
//!     .invoke(
//!         "regex_replace",
//!         &[Value::text(r"(\w+)@\w+"), Value::text("bob@host"), Value::text("$1")],
//!     )
//!     .unwrap();
//! assert_eq!(replaced, Value::text("bob"));
//! ```
//!
//! ## Modules
//!
//! - [`core`] - Core types ([`Value`], [`DataType`], [`Error`], [`Result`])
//! - [`matcher`] - Pattern compilation and the bounded [`PatternCache`]
//! - [`functions`] - Scalar function implementations and the registry
//! - [`extension`] - Registration boundary ([`Extension`])
//!
//! ## Known limitation
//!
//! Matching runs synchronously to completion on the calling thread; a host
//! that supports statement interruption can only cancel between rows, at
//! the next function-call boundary.

pub mod core;
pub mod extension;
pub mod functions;
pub mod matcher;

// Re-export main types for convenience
pub use crate::core::{DataType, Error, Result, Value};

// Re-export matcher types
pub use crate::matcher::{
    compile, CacheStats, CompiledMatcher, MatchResult, MatchSpans, PatternCache, PatternFlags,
    PatternKey, Span, DEFAULT_CACHE_CAPACITY,
};

// Re-export function types
pub use crate::functions::{
    FunctionDataType, FunctionInfo, FunctionRegistry, FunctionSignature, RegexCountFunction,
    RegexFindAtFunction, RegexFindFunction, RegexLikeFunction, RegexReplaceFunction,
    RegexValidFunction, RegexVersionFunction, RegexpFunction, ScalarFunction,
};

// Re-export extension types
pub use crate::extension::{Extension, ExtensionConfig};
