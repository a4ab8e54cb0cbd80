//! Alias table: long command names to canonical codes.

use std::collections::HashMap;

use crate::command::registry::{command_registry, RegistryError};

/// Case-insensitive name → canonical code lookup.
///
/// Lookups are exact string matches on the lowercased token; a token that
/// merely appears inside a longer name never matches.
#[derive(Debug, Default)]
pub struct AliasTable {
    names: HashMap<&'static str, &'static str>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` as pointing at `code`.
    ///
    /// Names are stored lowercased by the caller; a name may point at one
    /// code only.
    pub fn insert(&mut self, name: &'static str, code: &'static str) -> Result<(), RegistryError> {
        match self.names.get(name) {
            Some(existing) if *existing != code => Err(RegistryError::AmbiguousName {
                name: name.to_string(),
                first: existing.to_string(),
                second: code.to_string(),
            }),
            _ => {
                self.names.insert(name, code);
                Ok(())
            }
        }
    }

    /// The canonical code registered for an exact (lowercase) name.
    pub fn canonical(&self, name: &str) -> Option<&'static str> {
        self.names.get(name).copied()
    }

    /// Trim and lowercase `token`, then map it to its canonical code.
    ///
    /// Unknown names come back lowercased so they can still be tried as a
    /// canonical code.
    pub fn resolve(&self, token: &str) -> String {
        let lowered = token.trim().to_lowercase();
        match self.canonical(&lowered) {
            Some(code) => code.to_string(),
            None => lowered,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Resolve a command token against the built-in registry.
pub fn resolve_alias(token: &str) -> String {
    command_registry().aliases().resolve(token)
}
