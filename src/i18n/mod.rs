// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! User-facing text.
//!
//! Catalogs are embedded at build time and addressed with dotted keys (`app.days.monday`).
//! Presentation code receives a [`Translate`] implementation; the grid and layout never translate.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

const EN_CATALOG: &str = include_str!("../../locales/en.json");
const UK_CATALOG: &str = include_str!("../../locales/uk.json");
const PL_CATALOG: &str = include_str!("../../locales/pl.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Uk,
    Pl,
}

impl Language {
    pub const ALL: [Self; 3] = [Self::En, Self::Uk, Self::Pl];

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Uk => "uk",
            Self::Pl => "pl",
        }
    }

    /// Name of the language in that language.
    pub fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Uk => "Українська",
            Self::Pl => "Polski",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::En => Self::Uk,
            Self::Uk => Self::Pl,
            Self::Pl => Self::En,
        }
    }

    fn catalog_source(self) -> &'static str {
        match self {
            Self::En => EN_CATALOG,
            Self::Uk => UK_CATALOG,
            Self::Pl => PL_CATALOG,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language code `{code}` (expected en, uk or pl)")]
pub struct UnknownLanguageError {
    pub code: String,
}

impl FromStr for Language {
    type Err = UnknownLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            // Older settings files store Ukrainian as `ukr`.
            "uk" | "ukr" => Ok(Self::Uk),
            "pl" => Ok(Self::Pl),
            _ => Err(UnknownLanguageError { code: s.to_owned() }),
        }
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Key to text lookup injected into presentation code.
pub trait Translate {
    /// Returns the text for `key`, or the key itself when nothing matches.
    fn translate(&self, key: &str) -> Cow<'_, str>;
}

/// Flattened catalog for one language with English as fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    language: Language,
    entries: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl Catalog {
    pub fn new(language: Language) -> Self {
        let entries = load_entries(language);
        let fallback = if language == Language::En {
            HashMap::new()
        } else {
            load_entries(Language::En)
        };
        Self {
            language,
            entries,
            fallback,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .or_else(|| self.fallback.get(key))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Language::En)
    }
}

impl Translate for Catalog {
    fn translate(&self, key: &str) -> Cow<'_, str> {
        match self.get(key) {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(key.to_owned()),
        }
    }
}

/// Identity translator: every key renders as itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeysOnly;

impl Translate for KeysOnly {
    fn translate(&self, key: &str) -> Cow<'_, str> {
        Cow::Owned(key.to_owned())
    }
}

fn load_entries(language: Language) -> HashMap<String, String> {
    let mut entries = HashMap::new();
    match serde_json::from_str::<Value>(language.catalog_source()) {
        Ok(root) => flatten_into(&root, &mut String::new(), &mut entries),
        Err(err) => warn!(language = %language, %err, "embedded catalog is not valid JSON"),
    }
    entries
}

fn flatten_into(value: &Value, prefix: &mut String, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let restore = prefix.len();
                if !prefix.is_empty() {
                    prefix.push('.');
                }
                prefix.push_str(key);
                flatten_into(child, prefix, out);
                prefix.truncate(restore);
            }
        }
        Value::String(text) => {
            out.insert(prefix.clone(), text.clone());
        }
        // Only strings are translatable; numbers and arrays are ignored like missing keys.
        _ => {}
    }
}
