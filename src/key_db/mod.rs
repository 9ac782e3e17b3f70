//! Karabiner key-code database and validation.
//!
//! This module provides access to the embedded key-code database,
//! validation functions, and substring search for suggestions.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Category of key codes for organization in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCodeCategory {
    /// Category ID (e.g., "letter", "navigation")
    pub id: String,
    /// Display name (e.g., "Letters", "Navigation")
    pub name: String,
    /// Description of what keys are in this category
    pub description: String,
}

/// Individual key-code definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCodeDefinition {
    /// Karabiner key code (e.g., "semicolon", "f1")
    pub code: String,
    /// Display name (e.g., "Semicolon", "F1")
    pub name: String,
    /// Category ID
    pub category: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Optional regex pattern for enumerable families (f1-f24, keypad keys)
    #[serde(default)]
    pub pattern: Option<String>,
    /// Common alternative spellings, used for search only.
    ///
    /// Aliases are NOT accepted by [`KeyDb::is_valid`]: the compiler
    /// passes key symbols through to the engine verbatim, so only codes
    /// the engine itself accepts may validate.
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Database schema from `key_codes.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct KeyCodeDatabase {
    version: String,
    categories: Vec<KeyCodeCategory>,
    key_codes: Vec<KeyCodeDefinition>,
}

/// Karabiner key-code database with fast lookup and search.
///
/// The database is embedded in the binary at compile time. It provides
/// O(1) validation of canonical key codes, pattern matching for
/// enumerable families, and substring search for "did you mean"
/// suggestions.
#[derive(Debug, Clone)]
pub struct KeyDb {
    /// All key-code definitions
    key_codes: Vec<KeyCodeDefinition>,
    /// Category definitions
    categories: Vec<KeyCodeCategory>,
    /// Fast lookup by canonical code
    lookup: HashMap<String, usize>,
    /// Compiled regex patterns for enumerable families
    patterns: Vec<Regex>,
}

impl KeyDb {
    /// Loads the key-code database from the embedded JSON file.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("key_codes.json");
        let db: KeyCodeDatabase =
            serde_json::from_str(json_data).context("Failed to parse embedded key_codes.json")?;

        let mut lookup = HashMap::new();
        let mut patterns = Vec::new();

        for (idx, key_code) in db.key_codes.iter().enumerate() {
            lookup.insert(key_code.code.clone(), idx);

            if let Some(pattern) = &key_code.pattern {
                let regex = Regex::new(pattern)
                    .with_context(|| format!("Invalid pattern for '{}'", key_code.code))?;
                patterns.push(regex);
            }
        }

        Ok(Self {
            key_codes: db.key_codes,
            categories: db.categories,
            lookup,
            patterns,
        })
    }

    /// Validates a key code against the database.
    ///
    /// Returns true if the code is canonical or matches an enumerable
    /// family pattern (e.g., "f13"). Aliases do not validate.
    #[must_use]
    pub fn is_valid(&self, code: &str) -> bool {
        if self.lookup.contains_key(code) {
            return true;
        }

        self.patterns.iter().any(|regex| regex.is_match(code))
    }

    /// Gets a key-code definition by canonical code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&KeyCodeDefinition> {
        let idx = self.lookup.get(code)?;
        self.key_codes.get(*idx)
    }

    /// Returns the category definitions.
    #[must_use]
    pub fn categories(&self) -> &[KeyCodeCategory] {
        &self.categories
    }

    /// Searches for key codes matching the query as a case-insensitive
    /// substring of the code, name, aliases, or description. Matching
    /// ignores underscores, hyphens, and spaces so "leftarrow" still
    /// finds "left_arrow".
    ///
    /// Codes that start with the query sort first; used to build
    /// "did you mean" suggestions for unknown key symbols.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&KeyCodeDefinition> {
        if query.is_empty() {
            return self.key_codes.iter().collect();
        }

        let query = normalize(query);
        let mut matches: Vec<(&KeyCodeDefinition, usize)> = self
            .key_codes
            .iter()
            .filter_map(|def| {
                let code = normalize(&def.code);
                let rank = if code.starts_with(&query) {
                    0
                } else if code.contains(&query)
                    || def.aliases.iter().any(|a| normalize(a).contains(&query))
                {
                    1
                } else if normalize(&def.name).contains(&query)
                    || def
                        .description
                        .as_deref()
                        .is_some_and(|d| normalize(d).contains(&query))
                {
                    2
                } else {
                    return None;
                };
                Some((def, rank))
            })
            .collect();

        matches.sort_by_key(|(def, rank)| (*rank, def.code.clone()));
        matches.into_iter().map(|(def, _)| def).collect()
    }

    /// Builds a suggestion string for an unknown key symbol.
    #[must_use]
    pub fn suggest(&self, unknown: &str) -> String {
        let results = self.search(unknown);
        if results.is_empty() {
            "Check the Karabiner key-code reference for valid codes".to_string()
        } else {
            let similar: Vec<&str> = results.iter().take(3).map(|d| d.code.as_str()).collect();
            format!("Did you mean one of: {}", similar.join(", "))
        }
    }
}

/// Lowercases and strips separator characters for lenient matching.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .collect::<String>()
        .to_lowercase()
}
