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

//! Pattern compiler: textual pattern + flags to an immutable matcher
//!
//! The matching primitive is the `regex` crate, an automaton-based engine
//! with linear-time matching, so pathological backtracking patterns are
//! ruled out by construction. Compilation is pure: it never consults or
//! mutates the cache.

use regex::{Regex, RegexBuilder};

use super::{template, PatternFlags};
use crate::core::{Error, Result};

/// Compile a pattern with the given flags
///
/// The empty pattern compiles to a matcher that matches the empty span at
/// every position. Fails with [`Error::Compile`] on malformed patterns.
pub fn compile(pattern: &str, flags: PatternFlags) -> Result<CompiledMatcher> {
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(flags.case_insensitive)
        .multi_line(flags.multiline)
        .dot_matches_new_line(flags.dot_matches_newline)
        .build()
        // The primitive reports syntax errors as formatted text without a
        // structured byte offset, so offset stays None here.
        .map_err(|err| Error::compile(pattern, err.to_string(), None))?;
    Ok(CompiledMatcher { regex })
}

/// The executable form of a pattern, produced once and reused
///
/// Immutable after construction and safe to share read-only across
/// concurrent callers.
#[derive(Debug)]
pub struct CompiledMatcher {
    regex: Regex,
}

impl CompiledMatcher {
    /// The original pattern text
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Number of capture groups, excluding group 0 (the whole match)
    pub fn group_count(&self) -> usize {
        self.regex.captures_len() - 1
    }

    /// Test whether the pattern matches anywhere in `text`
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// First match with captures, or None
    pub fn find(&self, text: &str) -> Option<MatchResult> {
        self.regex.captures(text).map(|caps| {
            // Group 0 always participates when there is a match.
            let whole = caps.get(0).map(|m| Span {
                start: m.start(),
                end: m.end(),
            });
            MatchResult {
                span: whole.unwrap_or(Span { start: 0, end: 0 }),
                groups: caps
                    .iter()
                    .map(|g| g.map(|m| m.as_str().to_string()))
                    .collect(),
            }
        })
    }

    /// First match with captures at or after byte `offset`, or None
    ///
    /// Anchors and word boundaries still see the full subject, so this is
    /// not equivalent to matching against a slice. Offsets past the end of
    /// the subject, or inside a multi-byte character, match nothing.
    pub fn find_at(&self, text: &str, offset: usize) -> Option<MatchResult> {
        if offset > text.len() || !text.is_char_boundary(offset) {
            return None;
        }
        self.regex.captures_at(text, offset).map(|caps| {
            let whole = caps.get(0).map(|m| Span {
                start: m.start(),
                end: m.end(),
            });
            MatchResult {
                span: whole.unwrap_or(Span { start: 0, end: 0 }),
                groups: caps
                    .iter()
                    .map(|g| g.map(|m| m.as_str().to_string()))
                    .collect(),
            }
        })
    }

    /// Lazy left-to-right iteration over non-overlapping match spans
    ///
    /// A zero-length match advances the scan by one unit, so iteration
    /// always terminates.
    pub fn matches<'m, 't>(&'m self, text: &'t str) -> MatchSpans<'m, 't> {
        MatchSpans {
            inner: self.regex.find_iter(text),
        }
    }

    /// Count of non-overlapping matches, left-to-right
    pub fn count_matches(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }

    /// Replace all non-overlapping matches with an expanded template
    ///
    /// Template placeholders: `$0`..`$n` and `${name}` reference capture
    /// groups, `$$` is a literal dollar. Fails with [`Error::InvalidTemplate`]
    /// if a placeholder references a group the pattern does not define.
    pub fn replace_all(&self, text: &str, replacement: &str) -> Result<String> {
        template::validate(&self.regex, replacement)?;
        Ok(self.regex.replace_all(text, replacement).into_owned())
    }
}

/// Lazy iterator over non-overlapping match spans, left to right
pub struct MatchSpans<'m, 't> {
    inner: regex::Matches<'m, 't>,
}

impl Iterator for MatchSpans<'_, '_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        self.inner.next().map(|m| Span {
            start: m.start(),
            end: m.end(),
        })
    }
}

/// A start/end byte-offset pair identifying a match's location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the match start
    pub start: usize,
    /// Byte offset one past the match end
    pub end: usize,
}

impl Span {
    /// Length of the span in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for a zero-length match
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Result of a single find: span plus captured groups
///
/// Ephemeral, produced per call and never retained. `groups[0]` is the
/// whole match; a group that did not participate in the match is None.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    span: Span,
    groups: Vec<Option<String>>,
}

impl MatchResult {
    /// Span of the whole match
    pub fn span(&self) -> Span {
        self.span
    }

    /// Matched text of group `index`, or None if it did not participate
    ///
    /// Index 0 is the whole match. Out-of-range indexes return None; the
    /// dispatch layer validates range against the pattern's group count
    /// before matching so it can distinguish the two cases.
    pub fn group(&self, index: usize) -> Option<&str> {
        self.groups.get(index).and_then(|g| g.as_deref())
    }

    /// Number of groups, including group 0
    pub fn group_len(&self) -> usize {
        self.groups.len()
    }
}
