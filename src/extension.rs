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

//! Extension registration boundary
//!
//! An [`Extension`] owns one pattern cache and the registry of function
//! entry points wired over it. Hosts that share one extension across
//! connections get a process-wide cache; hosts that want per-connection
//! isolation register one extension per connection. The cache is injected
//! into each function at registration, never reached through a global.
//!
//! [`Extension::invoke`] is the host-facing entry point: it catches any
//! panic raised during evaluation and converts it into an error, so no
//! unwinding ever crosses into host code.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::core::{Error, Result, Value};
use crate::functions::scalar::{
    RegexCountFunction, RegexFindAtFunction, RegexFindFunction, RegexLikeFunction,
    RegexReplaceFunction, RegexValidFunction, RegexVersionFunction, RegexpFunction,
};
use crate::functions::{FunctionInfo, FunctionRegistry, ScalarFunction};
use crate::matcher::{CacheStats, PatternCache, DEFAULT_CACHE_CAPACITY};

/// Registration-time configuration
///
/// Cache capacity is the single tunable and cannot change after
/// registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionConfig {
    /// Maximum number of compiled patterns kept resident
    pub cache_capacity: usize,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl ExtensionConfig {
    /// Config with the given cache capacity
    pub fn with_cache_capacity(cache_capacity: usize) -> Self {
        Self { cache_capacity }
    }
}

/// A registered regex function extension
///
/// Created once per registration scope; dropping it tears the cache down.
/// The host guarantees quiescence at unload, so teardown never races an
/// in-flight call.
pub struct Extension {
    cache: Arc<PatternCache>,
    registry: FunctionRegistry,
}

impl std::fmt::Debug for Extension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extension").finish_non_exhaustive()
    }
}

impl Extension {
    /// Register the regex functions, allocating the pattern cache
    ///
    /// Fails (registering nothing) if the configured cache capacity is
    /// zero, leaving the extension unloaded rather than partially wired.
    pub fn register(config: ExtensionConfig) -> Result<Self> {
        let cache = Arc::new(PatternCache::with_capacity(config.cache_capacity)?);
        let registry = FunctionRegistry::new();

        registry.register(Arc::new(RegexLikeFunction::new(Arc::clone(&cache))));
        registry.register(Arc::new(RegexpFunction::new(Arc::clone(&cache))));
        registry.register(Arc::new(RegexFindFunction::new(Arc::clone(&cache))));
        registry.register(Arc::new(RegexFindAtFunction::new(Arc::clone(&cache))));
        registry.register(Arc::new(RegexReplaceFunction::new(Arc::clone(&cache))));
        registry.register(Arc::new(RegexCountFunction::new(Arc::clone(&cache))));
        registry.register(Arc::new(RegexValidFunction::new(Arc::clone(&cache))));
        registry.register(Arc::new(RegexVersionFunction));

        Ok(Self { cache, registry })
    }

    /// Register with the default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::register(ExtensionConfig::default())
    }

    /// Invoke a registered function by name with decoded argument values
    ///
    /// This is the boundary the host calls per row. Lookup is
    /// case-insensitive. A panic inside evaluation is caught and reported
    /// as [`Error::Internal`] instead of unwinding into the host.
    pub fn invoke(&self, name: &str, args: &[Value]) -> Result<Value> {
        let function = self
            .registry
            .get(name)
            .ok_or_else(|| Error::UnknownFunction(name.to_string()))?;

        match catch_unwind(AssertUnwindSafe(|| function.evaluate(args))) {
            Ok(result) => result,
            Err(panic) => Err(Error::internal(panic_message(&panic))),
        }
    }

    /// Look up a function entry point by name
    pub fn function(&self, name: &str) -> Option<Arc<dyn ScalarFunction>> {
        self.registry.get(name)
    }

    /// Catalog info for a function name
    pub fn function_info(&self, name: &str) -> Option<FunctionInfo> {
        self.registry.get_info(name)
    }

    /// All registered function names, sorted
    pub fn catalog(&self) -> Vec<String> {
        self.registry.list()
    }

    /// Snapshot of the pattern-cache counters
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Number of compiled patterns currently resident
    pub fn cached_patterns(&self) -> usize {
        self.cache.len()
    }
}

impl Drop for Extension {
    fn drop(&mut self) {
        // Teardown: release every compiled matcher. Callers holding an Arc
        // from an in-flight call keep their matcher alive independently.
        self.cache.clear();
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        format!("function panicked: {}", message)
    } else if let Some(message) = panic.downcast_ref::<String>() {
        format!("function panicked: {}", message)
    } else {
        "function panicked".to_string()
    }
}
