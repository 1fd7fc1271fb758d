//! Location vocabulary.
//!
//! The fixed set of canonical stop names that queries are matched
//! against, plus the alias table, speech-to-text corrections and time
//! keywords used by the query interpreter. The vocabulary is static
//! configuration: it is built once at startup and shared read-only.

mod error;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use error::VocabularyError;

/// One row of the alias table.
///
/// `aliases` is a comma-separated list of alternate spellings. The
/// `standard` key is always treated as an alias of itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    /// Key that alias matches resolve through.
    pub standard: String,

    /// Comma-separated aliases; also the value an alias match returns.
    pub aliases: String,
}

/// A whole-word replacement applied to lowercased queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    pub wrong: String,
    pub correct: String,
}

/// A word that implies a time range, e.g. "morning".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeKeyword {
    pub keyword: String,
    pub range: String,
}

/// The location vocabulary and its satellite tables.
///
/// All lists are ordered; where two entries score equally the earlier
/// one wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Canonical location names.
    pub locations: Vec<String>,

    /// Alias table.
    pub aliases: Vec<AliasEntry>,

    /// Corrections for common speech-to-text and typing errors.
    pub common_fixes: Vec<Correction>,

    /// Keywords mapped to time ranges.
    pub time_keywords: Vec<TimeKeyword>,
}

impl Vocabulary {
    /// Load a vocabulary from a JSON file.
    ///
    /// Missing tables fall back to the built-in defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, VocabularyError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let vocabulary: Vocabulary =
            serde_json::from_str(&contents).map_err(|e| VocabularyError::Json {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if vocabulary.locations.is_empty() {
            return Err(VocabularyError::NoLocations);
        }

        Ok(vocabulary)
    }

    /// Flatten the alias table into `(alias, entry index)` pairs.
    ///
    /// Aliases are trimmed and lowercased. Each entry's own key is
    /// appended after its listed aliases.
    pub fn alias_pairs(&self) -> Vec<(String, usize)> {
        self.aliases
            .iter()
            .enumerate()
            .flat_map(|(idx, entry)| {
                entry
                    .aliases
                    .split(',')
                    .chain(std::iter::once(entry.standard.as_str()))
                    .map(move |alias| (alias.trim().to_lowercase(), idx))
            })
            .collect()
    }

    /// The alias table row at `idx`.
    pub fn alias_entry(&self, idx: usize) -> Option<&AliasEntry> {
        self.aliases.get(idx)
    }

    /// The first time keyword contained in `text`.
    pub fn time_keyword_in(&self, text: &str) -> Option<&TimeKeyword> {
        self.time_keywords
            .iter()
            .find(|k| text.contains(k.keyword.as_str()))
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        let locations = [
            "Khayelitsha",
            "Cape Town",
            "Bellville",
            "Mitchells Plain",
            "Claremont",
            "Woodstock",
            "Wynberg",
            "Table View",
            "Mowbray",
            "Makhaza",
            "Harare",
            "Site C",
            "MAITLAND",
            "ELITHA PARK",
        ];

        let aliases = [
            ("Khayelitsha", "SITE C, SITE B, MAKHAZA, HARARE"),
            ("kasi", "Khayelitsha"),
            ("mowbray train station", "Mowbray"),
            ("chills", "Nyanga"),
            ("gugs", "Gugulethu"),
            ("VILLAGE 1 SOUTH", "ELITHA PARK"),
            ("VILLAGE 3 SOUTH", "HARARE"),
            ("umrhabulo triangle", "MAKHAZA"),
        ];

        let common_fixes = [
            ("fom", "from"),
            ("frm", "from"),
            ("khyelistha", "khayelitsha"),
            ("cpt", "cape town"),
            ("capetown", "cape town"),
            ("michels plain", "mitchells plain"),
        ];

        let time_keywords = [
            ("morning", "before 12 pm"),
            ("afternoon", "12 pm to 6 pm"),
            ("evening", "after 6 pm"),
            ("noon", "12 pm"),
            ("night", "after 7 pm"),
        ];

        Self {
            locations: locations.iter().map(|s| s.to_string()).collect(),
            aliases: aliases
                .iter()
                .map(|(standard, aliases)| AliasEntry {
                    standard: standard.to_string(),
                    aliases: aliases.to_string(),
                })
                .collect(),
            common_fixes: common_fixes
                .iter()
                .map(|(wrong, correct)| Correction {
                    wrong: wrong.to_string(),
                    correct: correct.to_string(),
                })
                .collect(),
            time_keywords: time_keywords
                .iter()
                .map(|(keyword, range)| TimeKeyword {
                    keyword: keyword.to_string(),
                    range: range.to_string(),
                })
                .collect(),
        }
    }
}
