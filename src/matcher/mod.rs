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

//! Pattern compilation and caching
//!
//! A textual pattern plus [`PatternFlags`] forms a [`PatternKey`]; the
//! [`PatternCache`] maps keys to shared [`CompiledMatcher`] instances so a
//! pattern that is constant across a query's rows compiles exactly once.
//! Subjects are never cached, only patterns.

pub mod cache;
pub mod compile;
mod template;

pub use cache::{CacheStats, PatternCache, DEFAULT_CACHE_CAPACITY};
pub use compile::{compile, CompiledMatcher, MatchResult, MatchSpans, Span};

use std::sync::Arc;

/// Compilation flags for a pattern
///
/// This is a closed set; every combination is supported by the matching
/// primitive. Flags participate in cache-key equality, so the same pattern
/// text compiled with different flags occupies separate cache entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PatternFlags {
    /// Letters match both cases
    pub case_insensitive: bool,
    /// `^` and `$` match at line boundaries, not just text boundaries
    pub multiline: bool,
    /// `.` also matches `\n`
    pub dot_matches_newline: bool,
}

impl PatternFlags {
    /// Flags with everything disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable case-insensitive matching
    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = enabled;
        self
    }

    /// Enable multiline mode
    pub fn multiline(mut self, enabled: bool) -> Self {
        self.multiline = enabled;
        self
    }

    /// Make `.` match newlines
    pub fn dot_matches_newline(mut self, enabled: bool) -> Self {
        self.dot_matches_newline = enabled;
        self
    }
}

/// Cache key: pattern text plus compilation flags
///
/// Equality and hashing are by exact text and flags, so two textually
/// identical patterns with identical flags always map to the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternKey {
    pattern: Arc<str>,
    flags: PatternFlags,
}

impl PatternKey {
    /// Create a key from pattern text and flags
    pub fn new(pattern: impl Into<Arc<str>>, flags: PatternFlags) -> Self {
        Self {
            pattern: pattern.into(),
            flags,
        }
    }

    /// The pattern text
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The compilation flags
    pub fn flags(&self) -> PatternFlags {
        self.flags
    }
}
