//! Parent → child option lookup for the state/district selects

use super::forms::{SelectOption, DISTRICT_PLACEHOLDER};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::LazyLock;
use thiserror::Error;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

/// Errors raised while building an [`OptionTable`]
#[derive(Debug, Error)]
pub enum OptionTableError {
    #[error("option table key must not be empty")]
    EmptyKey,

    #[error("duplicate option table key: {0}")]
    DuplicateKey(String),

    #[error("no child options listed for key: {0}")]
    EmptyList(String),

    #[error("duplicate label {label:?} listed for key {key}")]
    DuplicateLabel { key: String, label: String },

    #[error("failed to parse option table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One parent entry as stored in an option table file
#[derive(Debug, Deserialize)]
struct OptionGroup {
    key: String,
    children: Vec<String>,
}

/// Immutable mapping from a normalized parent key to its ordered child labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionTable {
    entries: Vec<(String, Vec<String>)>,
}

impl OptionTable {
    /// Build a table, checking that keys are unique and every list is
    /// non-empty and free of duplicate labels
    pub fn new<K, L>(entries: impl IntoIterator<Item = (K, Vec<L>)>) -> Result<Self, OptionTableError>
    where
        K: Into<String>,
        L: Into<String>,
    {
        let mut seen_keys = HashSet::new();
        let mut table = Vec::new();

        for (key, labels) in entries {
            let key = key.into();
            if key.is_empty() {
                return Err(OptionTableError::EmptyKey);
            }
            if !seen_keys.insert(key.clone()) {
                return Err(OptionTableError::DuplicateKey(key));
            }

            let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
            if labels.is_empty() {
                return Err(OptionTableError::EmptyList(key));
            }
            let mut seen_labels = HashSet::new();
            for label in &labels {
                if !seen_labels.insert(label.as_str()) {
                    return Err(OptionTableError::DuplicateLabel {
                        key,
                        label: label.clone(),
                    });
                }
            }

            table.push((key, labels));
        }

        Ok(Self { entries: table })
    }

    /// Parse a JSON array of `{ "key": ..., "children": [...] }` groups
    pub fn from_json(json: &str) -> Result<Self, OptionTableError> {
        let groups: Vec<OptionGroup> = serde_json::from_str(json)?;
        Self::new(groups.into_iter().map(|g| (g.key, g.children)))
    }

    /// The state → district data shipped with the form
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                (
                    "uttar-pradesh".to_string(),
                    UTTAR_PRADESH_DISTRICTS.iter().map(|d| d.to_string()).collect(),
                ),
                (
                    "uttarakhand".to_string(),
                    UTTARAKHAND_DISTRICTS.iter().map(|d| d.to_string()).collect(),
                ),
            ],
        }
    }

    /// Parent keys in table order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Child labels for `key`; empty when the key is unknown
    pub fn children(&self, key: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, labels)| labels.as_slice())
            .unwrap_or(&[])
    }

    /// Parent select entries, labelled in proper case
    pub fn parent_options(&self) -> Vec<SelectOption> {
        self.keys()
            .map(|key| SelectOption::new(key, format_proper_case(key)))
            .collect()
    }

    /// Placeholder followed by one entry per child label, in table order
    pub fn child_options(&self, key: &str) -> Vec<SelectOption> {
        let mut options = vec![SelectOption::placeholder(DISTRICT_PLACEHOLDER)];
        options.extend(
            self.children(key)
                .iter()
                .map(|label| SelectOption::new(normalize_option_value(label), label.as_str())),
        );
        options
    }
}

impl Default for OptionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Lowercase a display label and collapse whitespace runs into single hyphens
pub fn normalize_option_value(label: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&label.to_lowercase(), "-")
        .into_owned()
}

/// Turn a hyphenated key into a title-cased label: `uttar-pradesh` → `Uttar Pradesh`
pub fn format_proper_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_alpha = false;
    for c in value.replace('-', " ").chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

const UTTAR_PRADESH_DISTRICTS: &[&str] = &[
    "Agra",
    "Aligarh",
    "Amroha",
    "Auraiya",
    "Ayodhya",
    "Azamgarh",
    "Baghpat",
    "Bahraich",
    "Ballia",
    "Balrampur",
    "Banda",
    "Barabanki",
    "Bareilly",
    "Basti",
    "Bhadohi",
    "Bijnor",
    "Budaun",
    "Bulandshahr",
    "Chandauli",
    "Chitrakoot",
    "Deoria",
    "Etah",
    "Etawah",
    "Farrukhabad",
    "Fatehpur",
    "Firozabad",
    "Gautam Buddha Nagar",
    "Ghaziabad",
    "Ghazipur",
    "Gonda",
    "Gorakhpur",
    "Hamirpur",
    "Hapur",
    "Hardoi",
    "Hathras",
    "Jalaun",
    "Jaunpur",
    "Jhansi",
    "Kannauj",
    "Kanpur Dehat",
    "Kanpur Nagar",
    "Kasganj",
    "Kaushambi",
    "Kushinagar",
    "Lakhimpur Kheri",
    "Lalitpur",
    "Lucknow",
    "Maharajganj",
    "Mahoba",
    "Mainpuri",
    "Mathura",
    "Mau",
    "Meerut",
    "Mirzapur",
    "Moradabad",
    "Muzaffarnagar",
    "Pilibhit",
    "Pratapgarh",
    "Prayagraj",
    "Raebareli",
    "Rampur",
    "Saharanpur",
    "Sambhal",
    "Sant Kabir Nagar",
    "Shahjahanpur",
    "Shamli",
    "Shravasti",
    "Siddharthnagar",
    "Sitapur",
    "Sonbhadra",
    "Sultanpur",
    "Unnao",
    "Varanasi",
];

const UTTARAKHAND_DISTRICTS: &[&str] = &[
    "Almora",
    "Bageshwar",
    "Chamoli",
    "Champawat",
    "Dehradun",
    "Haridwar",
    "Nainital",
    "Pauri Garhwal",
    "Pithoragarh",
    "Rudraprayag",
    "Tehri Garhwal",
    "Udham Singh Nagar",
    "Uttarkashi",
];
