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

//! Replacement-template validation
//!
//! The matching primitive expands `$N`, `$name`, `${name}` and `$$` in
//! replacement strings, silently expanding references to nonexistent groups
//! as empty text. Substitution must instead fail on such references, so the
//! template is walked with the same parsing rules the primitive uses and
//! every reference is checked against the pattern's groups before expansion.

use regex::Regex;

use crate::core::{Error, Result};

/// Check every group reference in `template` against `regex`'s groups
///
/// Malformed placeholder syntax (a trailing `$`, an unclosed `${`, a braced
/// body that is not a group name) is left alone because the primitive
/// expands it literally; only well-formed references to unknown groups are
/// errors.
pub(crate) fn validate(regex: &Regex, template: &str) -> Result<()> {
    let mut rest = template;
    while let Some(dollar) = rest.find('$') {
        rest = &rest[dollar + 1..];
        let mut chars = rest.char_indices();
        match chars.next() {
            // Literal "$$"
            Some((_, '$')) => {
                rest = &rest[1..];
            }
            Some((_, '{')) => {
                match rest.find('}') {
                    Some(close) => {
                        let name = &rest[1..close];
                        // A braced body that is not a well-formed group name
                        // (empty, or containing other characters) expands
                        // literally, matching the primitive
                        if !name.is_empty() && name.chars().all(is_reference_char) {
                            check_reference(regex, name)?;
                        }
                        rest = &rest[close + 1..];
                    }
                    // Unclosed brace expands literally
                    None => break,
                }
            }
            Some((start, c)) if is_reference_char(c) => {
                let end = rest[start..]
                    .find(|c: char| !is_reference_char(c))
                    .map(|i| start + i)
                    .unwrap_or(rest.len());
                check_reference(regex, &rest[start..end])?;
                rest = &rest[end..];
            }
            // Bare "$" expands literally
            _ => {}
        }
    }
    Ok(())
}

/// The primitive takes the longest run of these as an unbraced group name
fn is_reference_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn check_reference(regex: &Regex, name: &str) -> Result<()> {
    let available = regex.captures_len() - 1;
    if name.bytes().all(|b| b.is_ascii_digit()) {
        let index: usize = name
            .parse()
            .map_err(|_| Error::invalid_template(name, available))?;
        if index > available {
            return Err(Error::invalid_template(name, available));
        }
        return Ok(());
    }
    if regex.capture_names().flatten().any(|n| n == name) {
        return Ok(());
    }
    Err(Error::invalid_template(name, available))
}
