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

//! SQL function dispatch layer
//!
//! Each exposed SQL function is a [`ScalarFunction`]: the host hands it
//! decoded argument [`Value`]s for a row and receives a typed result or an
//! error. Functions resolve patterns through the shared pattern cache and
//! never compile directly.

pub mod registry;
pub mod scalar;

use crate::core::{Error, Result, Value};

/// Data type for function signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionDataType {
    /// Any type
    Any,
    /// Integer type
    Integer,
    /// String type
    String,
    /// Boolean type
    Boolean,
}

/// Function signature information
#[derive(Debug, Clone)]
pub struct FunctionSignature {
    /// Return type
    pub return_type: FunctionDataType,
    /// Argument types
    pub argument_types: Vec<FunctionDataType>,
    /// Minimum number of arguments
    pub min_args: usize,
    /// Maximum number of arguments
    pub max_args: usize,
}

impl FunctionSignature {
    /// Create a new function signature
    pub fn new(
        return_type: FunctionDataType,
        argument_types: Vec<FunctionDataType>,
        min_args: usize,
        max_args: usize,
    ) -> Self {
        Self {
            return_type,
            argument_types,
            min_args,
            max_args,
        }
    }

    /// Validate argument count
    pub fn validate_arg_count(&self, count: usize) -> Result<()> {
        if count < self.min_args {
            return Err(Error::invalid_argument(format!(
                "expected at least {} arguments, got {}",
                self.min_args, count
            )));
        }
        if count > self.max_args {
            return Err(Error::invalid_argument(format!(
                "expected at most {} arguments, got {}",
                self.max_args, count
            )));
        }
        Ok(())
    }
}

/// Function information, queryable through the registry catalog
#[derive(Debug, Clone)]
pub struct FunctionInfo {
    /// Function name
    pub name: String,
    /// Description
    pub description: String,
    /// Signature
    pub signature: FunctionSignature,
}

impl FunctionInfo {
    /// Create a new function info
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        signature: FunctionSignature,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            signature,
        }
    }

    /// Get the function name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the signature
    pub fn signature(&self) -> &FunctionSignature {
        &self.signature
    }
}

/// Trait for scalar functions invoked once per row
pub trait ScalarFunction: Send + Sync {
    /// Get the function name
    fn name(&self) -> &str;

    /// Get function information
    fn info(&self) -> FunctionInfo;

    /// Evaluate the function with the given arguments
    fn evaluate(&self, args: &[Value]) -> Result<Value>;
}

/// Validate the argument count of a scalar function call
#[macro_export]
macro_rules! validate_arg_count {
    ($args:expr, $name:expr, $count:expr) => {
        if $args.len() != $count {
            return Err($crate::core::Error::invalid_argument(format!(
                "{} expects {} argument(s), got {}",
                $name,
                $count,
                $args.len()
            )));
        }
    };
    ($args:expr, $name:expr, $min:expr, $max:expr) => {
        if $args.len() < $min || $args.len() > $max {
            return Err($crate::core::Error::invalid_argument(format!(
                "{} expects {} to {} arguments, got {}",
                $name,
                $min,
                $max,
                $args.len()
            )));
        }
    };
}

// Re-export main types
pub use registry::FunctionRegistry;
pub use scalar::{
    RegexCountFunction, RegexFindAtFunction, RegexFindFunction, RegexLikeFunction,
    RegexReplaceFunction, RegexValidFunction, RegexVersionFunction, RegexpFunction,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_signature_validation() {
        let sig = FunctionSignature::new(
            FunctionDataType::Boolean,
            vec![FunctionDataType::String, FunctionDataType::String],
            2,
            2,
        );
        assert!(sig.validate_arg_count(2).is_ok());
        assert!(sig.validate_arg_count(1).is_err());
        assert!(sig.validate_arg_count(3).is_err());
    }

    #[test]
    fn test_optional_argument_range() {
        let sig = FunctionSignature::new(
            FunctionDataType::String,
            vec![
                FunctionDataType::String,
                FunctionDataType::String,
                FunctionDataType::Integer,
            ],
            2,
            3,
        );
        assert!(sig.validate_arg_count(2).is_ok());
        assert!(sig.validate_arg_count(3).is_ok());
        assert!(sig.validate_arg_count(4).is_err());
    }

    #[test]
    fn test_function_info() {
        let info = FunctionInfo::new(
            "REGEX_LIKE",
            "Tests whether a pattern matches",
            FunctionSignature::new(FunctionDataType::Boolean, vec![], 0, 0),
        );
        assert_eq!(info.name(), "REGEX_LIKE");
        assert_eq!(info.description(), "Tests whether a pattern matches");
        assert_eq!(info.signature().return_type, FunctionDataType::Boolean);
    }
}
