use log::debug;
use serde::Deserialize;
use std::collections::BTreeMap;

/// One selectable quiz item: a country (flags quiz) or a language
/// (scripts quiz, where `group` is the region its distractors come from).
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub code: String,
    pub name: String,
    pub group: Option<String>,
    pub sentences: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct LanguageJson {
    name: String,
    sentences: Vec<String>,
}

const FLAGS_JSON: &str = include_str!("../../data/flags.json");
const LANGUAGES_JSON: &str = include_str!("../../data/languages.json");

impl Entry {
    /// Regional indicator rendering of the country code, e.g. "fr" -> 🇫🇷.
    pub fn flag(&self) -> String {
        self.code
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| {
                char::from_u32(0x1F1E6 + (c.to_ascii_lowercase() as u32 - 'a' as u32)).unwrap_or(c)
            })
            .collect()
    }

    pub fn image_url(&self) -> String {
        format!("https://flagcdn.com/w320/{}.png", self.code)
    }
}

/// Flattens the code -> name map into entries with no group or sentences.
pub fn flag_entries() -> Result<Vec<Entry>, serde_json::Error> {
    let map: BTreeMap<String, String> = serde_json::from_str(FLAGS_JSON)?;
    let entries = map
        .into_iter()
        .map(|(code, name)| Entry {
            code,
            name,
            group: None,
            sentences: Vec::new(),
        })
        .collect::<Vec<_>>();
    debug!("[Dataset] Loaded {} flag entries.", entries.len());
    Ok(entries)
}

/// Flattens the region -> code -> language map; the region key becomes
/// each entry's group.
pub fn script_entries() -> Result<Vec<Entry>, serde_json::Error> {
    let map: BTreeMap<String, BTreeMap<String, LanguageJson>> =
        serde_json::from_str(LANGUAGES_JSON)?;
    let mut entries = Vec::new();
    for (region, languages) in map {
        for (code, language) in languages {
            entries.push(Entry {
                code,
                name: language.name,
                group: Some(region.clone()),
                sentences: language.sentences,
            });
        }
    }
    debug!("[Dataset] Loaded {} script entries.", entries.len());
    Ok(entries)
}
