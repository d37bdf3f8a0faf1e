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

//! Regex scalar functions
//!
//! NULL handling follows SQL semantics for the matching functions:
//! `REGEX_LIKE` and `REGEX_FIND` propagate NULL pattern/subject arguments as
//! a NULL result. `REGEX_REPLACE` and `REGEX_COUNT` require all arguments,
//! and a NULL there is an argument-type error rather than a silent NULL.

use std::sync::Arc;

use crate::core::{DataType, Error, Result, Value};
use crate::functions::{FunctionDataType, FunctionInfo, FunctionSignature, ScalarFunction};
use crate::matcher::{CompiledMatcher, PatternCache, PatternFlags, PatternKey};
use crate::validate_arg_count;

/// Extract a text argument; `position` is 1-based
fn text_arg<'a>(args: &'a [Value], position: usize, function: &str) -> Result<&'a Arc<str>> {
    args[position - 1]
        .as_text()
        .ok_or_else(|| Error::argument_type(function, position))
}

/// Resolve the pattern argument through the cache
///
/// The fixed SQL signatures carry no flags argument, so the dispatch layer
/// always compiles with default flags; inline modifiers like `(?i)` still
/// apply because the matching primitive parses them.
fn cached_matcher(cache: &PatternCache, pattern: &Arc<str>) -> Result<Arc<CompiledMatcher>> {
    cache.get_or_compile(&PatternKey::new(
        Arc::clone(pattern),
        PatternFlags::default(),
    ))
}

// ============================================================================
// REGEX_LIKE
// ============================================================================

/// REGEX_LIKE function - tests whether a pattern matches a subject
pub struct RegexLikeFunction {
    cache: Arc<PatternCache>,
}

impl RegexLikeFunction {
    /// Create the function over a shared pattern cache
    pub fn new(cache: Arc<PatternCache>) -> Self {
        Self { cache }
    }
}

impl ScalarFunction for RegexLikeFunction {
    fn name(&self) -> &str {
        "REGEX_LIKE"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "REGEX_LIKE",
            "Tests whether a regex pattern matches anywhere in the subject",
            FunctionSignature::new(
                FunctionDataType::Boolean,
                vec![FunctionDataType::String, FunctionDataType::String],
                2,
                2,
            ),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "REGEX_LIKE", 2);

        // NULL propagates as NULL, not false
        if args[0].is_null() || args[1].is_null() {
            return Ok(Value::null(DataType::Boolean));
        }

        let pattern = text_arg(args, 1, "REGEX_LIKE")?;
        let subject = text_arg(args, 2, "REGEX_LIKE")?;
        let matcher = cached_matcher(&self.cache, pattern)?;
        Ok(Value::Boolean(matcher.is_match(subject)))
    }
}

// ============================================================================
// REGEXP
// ============================================================================

/// REGEXP function - boolean pattern test under the operator-hook name
///
/// Engines that rewrite `subject REGEXP pattern` into a function call look
/// this name up; the semantics are those of [`RegexLikeFunction`].
pub struct RegexpFunction {
    cache: Arc<PatternCache>,
}

impl RegexpFunction {
    /// Create the function over a shared pattern cache
    pub fn new(cache: Arc<PatternCache>) -> Self {
        Self { cache }
    }
}

impl ScalarFunction for RegexpFunction {
    fn name(&self) -> &str {
        "REGEXP"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "REGEXP",
            "Tests whether a regex pattern matches; alias of REGEX_LIKE for the REGEXP operator",
            FunctionSignature::new(
                FunctionDataType::Boolean,
                vec![FunctionDataType::String, FunctionDataType::String],
                2,
                2,
            ),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "REGEXP", 2);

        if args[0].is_null() || args[1].is_null() {
            return Ok(Value::null(DataType::Boolean));
        }

        let pattern = text_arg(args, 1, "REGEXP")?;
        let subject = text_arg(args, 2, "REGEXP")?;
        let matcher = cached_matcher(&self.cache, pattern)?;
        Ok(Value::Boolean(matcher.is_match(subject)))
    }
}

// ============================================================================
// REGEX_FIND
// ============================================================================

/// REGEX_FIND function - first match, or a capture group of it
pub struct RegexFindFunction {
    cache: Arc<PatternCache>,
}

impl RegexFindFunction {
    /// Create the function over a shared pattern cache
    pub fn new(cache: Arc<PatternCache>) -> Self {
        Self { cache }
    }
}

impl ScalarFunction for RegexFindFunction {
    fn name(&self) -> &str {
        "REGEX_FIND"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "REGEX_FIND",
            "Returns the first match, or the given capture group of it",
            FunctionSignature::new(
                FunctionDataType::String,
                vec![
                    FunctionDataType::String,
                    FunctionDataType::String,
                    FunctionDataType::Integer,
                ],
                2,
                3,
            ),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "REGEX_FIND", 2, 3);

        if args[0].is_null() || args[1].is_null() {
            return Ok(Value::null(DataType::Text));
        }

        let pattern = text_arg(args, 1, "REGEX_FIND")?;
        let subject = text_arg(args, 2, "REGEX_FIND")?;
        // Group index defaults to 0, the whole match
        let group = if args.len() == 3 {
            match &args[2] {
                Value::Integer(index) => *index,
                _ => return Err(Error::argument_type("REGEX_FIND", 3)),
            }
        } else {
            0
        };

        let matcher = cached_matcher(&self.cache, pattern)?;
        let available = matcher.group_count();
        if group < 0 || group as usize > available {
            return Err(Error::invalid_group_index(group, available));
        }

        match matcher.find(subject) {
            Some(found) => match found.group(group as usize) {
                Some(text) => Ok(Value::text(text)),
                // Group did not participate in this match
                None => Ok(Value::null(DataType::Text)),
            },
            None => Ok(Value::null(DataType::Text)),
        }
    }
}

// ============================================================================
// REGEX_FIND_AT
// ============================================================================

/// REGEX_FIND_AT function - first match at or after a byte offset
pub struct RegexFindAtFunction {
    cache: Arc<PatternCache>,
}

impl RegexFindAtFunction {
    /// Create the function over a shared pattern cache
    pub fn new(cache: Arc<PatternCache>) -> Self {
        Self { cache }
    }
}

impl ScalarFunction for RegexFindAtFunction {
    fn name(&self) -> &str {
        "REGEX_FIND_AT"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "REGEX_FIND_AT",
            "Returns the first match starting at or after the given byte offset",
            FunctionSignature::new(
                FunctionDataType::String,
                vec![
                    FunctionDataType::String,
                    FunctionDataType::String,
                    FunctionDataType::Integer,
                ],
                3,
                3,
            ),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "REGEX_FIND_AT", 3);

        if args[0].is_null() || args[1].is_null() {
            return Ok(Value::null(DataType::Text));
        }

        let pattern = text_arg(args, 1, "REGEX_FIND_AT")?;
        let subject = text_arg(args, 2, "REGEX_FIND_AT")?;
        let offset = match &args[2] {
            Value::Integer(offset) => *offset,
            _ => return Err(Error::argument_type("REGEX_FIND_AT", 3)),
        };
        if offset < 0 {
            return Err(Error::invalid_argument(format!(
                "REGEX_FIND_AT offset must be non-negative, got {}",
                offset
            )));
        }

        let matcher = cached_matcher(&self.cache, pattern)?;
        match matcher.find_at(subject, offset as usize) {
            Some(found) => match found.group(0) {
                Some(text) => Ok(Value::text(text)),
                None => Ok(Value::null(DataType::Text)),
            },
            None => Ok(Value::null(DataType::Text)),
        }
    }
}

// ============================================================================
// REGEX_REPLACE
// ============================================================================

/// REGEX_REPLACE function - replaces all non-overlapping matches
pub struct RegexReplaceFunction {
    cache: Arc<PatternCache>,
}

impl RegexReplaceFunction {
    /// Create the function over a shared pattern cache
    pub fn new(cache: Arc<PatternCache>) -> Self {
        Self { cache }
    }
}

impl ScalarFunction for RegexReplaceFunction {
    fn name(&self) -> &str {
        "REGEX_REPLACE"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "REGEX_REPLACE",
            "Replaces all matches with a template; $1/${name} reference capture groups",
            FunctionSignature::new(
                FunctionDataType::String,
                vec![
                    FunctionDataType::String,
                    FunctionDataType::String,
                    FunctionDataType::String,
                ],
                3,
                3,
            ),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "REGEX_REPLACE", 3);

        let pattern = text_arg(args, 1, "REGEX_REPLACE")?;
        let subject = text_arg(args, 2, "REGEX_REPLACE")?;
        let replacement = text_arg(args, 3, "REGEX_REPLACE")?;

        let matcher = cached_matcher(&self.cache, pattern)?;
        let replaced = matcher.replace_all(subject, replacement)?;
        Ok(Value::text(replaced))
    }
}

// ============================================================================
// REGEX_COUNT
// ============================================================================

/// REGEX_COUNT function - number of non-overlapping matches
pub struct RegexCountFunction {
    cache: Arc<PatternCache>,
}

impl RegexCountFunction {
    /// Create the function over a shared pattern cache
    pub fn new(cache: Arc<PatternCache>) -> Self {
        Self { cache }
    }
}

impl ScalarFunction for RegexCountFunction {
    fn name(&self) -> &str {
        "REGEX_COUNT"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "REGEX_COUNT",
            "Counts non-overlapping matches, scanning left to right",
            FunctionSignature::new(
                FunctionDataType::Integer,
                vec![FunctionDataType::String, FunctionDataType::String],
                2,
                2,
            ),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "REGEX_COUNT", 2);

        let pattern = text_arg(args, 1, "REGEX_COUNT")?;
        let subject = text_arg(args, 2, "REGEX_COUNT")?;

        let matcher = cached_matcher(&self.cache, pattern)?;
        Ok(Value::Integer(matcher.count_matches(subject) as i64))
    }
}

// ============================================================================
// REGEX_VALID
// ============================================================================

/// REGEX_VALID function - true if the pattern compiles
pub struct RegexValidFunction {
    cache: Arc<PatternCache>,
}

impl RegexValidFunction {
    /// Create the function over a shared pattern cache
    pub fn new(cache: Arc<PatternCache>) -> Self {
        Self { cache }
    }
}

impl ScalarFunction for RegexValidFunction {
    fn name(&self) -> &str {
        "REGEX_VALID"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "REGEX_VALID",
            "Returns true if the pattern is a valid regex",
            FunctionSignature::new(
                FunctionDataType::Boolean,
                vec![FunctionDataType::String],
                1,
                1,
            ),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "REGEX_VALID", 1);

        if args[0].is_null() {
            return Ok(Value::null(DataType::Boolean));
        }

        let pattern = text_arg(args, 1, "REGEX_VALID")?;
        // A valid pattern primes the cache; a failed compile caches nothing
        Ok(Value::Boolean(cached_matcher(&self.cache, pattern).is_ok()))
    }
}

// ============================================================================
// REGEX_VERSION
// ============================================================================

/// REGEX_VERSION function - the extension's version string
#[derive(Default)]
pub struct RegexVersionFunction;

impl ScalarFunction for RegexVersionFunction {
    fn name(&self) -> &str {
        "REGEX_VERSION"
    }

    fn info(&self) -> FunctionInfo {
        FunctionInfo::new(
            "REGEX_VERSION",
            "Returns the extension version",
            FunctionSignature::new(FunctionDataType::String, vec![], 0, 0),
        )
    }

    fn evaluate(&self, args: &[Value]) -> Result<Value> {
        validate_arg_count!(args, "REGEX_VERSION", 0);
        Ok(Value::text(format!("v{}", env!("CARGO_PKG_VERSION"))))
    }
}
