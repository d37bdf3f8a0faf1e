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

//! Function registry
//!
//! Maps function names to [`ScalarFunction`] instances, case-insensitively.
//! Functions are registered as shared instances rather than factories
//! because each one carries its injected pattern-cache handle.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{FunctionInfo, ScalarFunction};

/// Registry for scalar function lookup and catalog queries
pub struct FunctionRegistry {
    scalar_functions: RwLock<HashMap<String, Arc<dyn ScalarFunction>>>,
    function_info: RwLock<HashMap<String, FunctionInfo>>,
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            scalar_functions: RwLock::new(HashMap::new()),
            function_info: RwLock::new(HashMap::new()),
        }
    }

    /// Register a scalar function under its own name
    pub fn register(&self, function: Arc<dyn ScalarFunction>) {
        let name = function.name().to_uppercase();
        let info = function.info();

        self.scalar_functions.write().insert(name.clone(), function);
        self.function_info.write().insert(name, info);
    }

    /// Get a scalar function by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn ScalarFunction>> {
        // Fast path - if name is already uppercase, avoid allocation
        let funcs = self.scalar_functions.read();
        if let Some(f) = funcs.get(name) {
            return Some(Arc::clone(f));
        }
        // Slow path - try uppercase
        let upper = name.to_uppercase();
        funcs.get(&upper).map(Arc::clone)
    }

    /// Check if a function name is registered
    pub fn exists(&self, name: &str) -> bool {
        let funcs = self.scalar_functions.read();
        if funcs.contains_key(name) {
            return true;
        }
        let upper = name.to_uppercase();
        funcs.contains_key(&upper)
    }

    /// Get function info by name
    pub fn get_info(&self, name: &str) -> Option<FunctionInfo> {
        let name = name.to_uppercase();
        let infos = self.function_info.read();
        infos.get(&name).cloned()
    }

    /// List all registered function names, sorted
    pub fn list(&self) -> Vec<String> {
        let funcs = self.scalar_functions.read();
        let mut names: Vec<String> = funcs.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::scalar::{RegexLikeFunction, RegexVersionFunction};
    use crate::matcher::PatternCache;

    fn registry_with_builtins() -> FunctionRegistry {
        let cache = Arc::new(PatternCache::new());
        let registry = FunctionRegistry::new();
        registry.register(Arc::new(RegexLikeFunction::new(cache)));
        registry.register(Arc::new(RegexVersionFunction));
        registry
    }

    #[test]
    fn test_register_and_get() {
        let registry = registry_with_builtins();
        let f = registry.get("REGEX_LIKE");
        assert!(f.is_some());
        assert_eq!(f.unwrap().name(), "REGEX_LIKE");
        assert!(registry.get("NO_SUCH_FUNCTION").is_none());
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let registry = registry_with_builtins();
        assert!(registry.exists("regex_like"));
        assert!(registry.exists("REGEX_LIKE"));
        assert!(registry.exists("Regex_Like"));
        assert!(registry.get("regex_version").is_some());
    }

    #[test]
    fn test_get_info() {
        let registry = registry_with_builtins();
        let info = registry.get_info("regex_like").unwrap();
        assert_eq!(info.name(), "REGEX_LIKE");
        assert_eq!(info.signature().min_args, 2);
        assert!(registry.get_info("missing").is_none());
    }

    #[test]
    fn test_list_sorted() {
        let registry = registry_with_builtins();
        assert_eq!(
            registry.list(),
            vec!["REGEX_LIKE".to_string(), "REGEX_VERSION".to_string()]
        );
    }
}
