use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("unmapped item string id {0:?}")]
    UnmappedStringId(String),
    #[error("unmapped item numeric id {0}")]
    UnmappedNumericId(i32),
    #[error("duplicate item type entry {string_id:?} / {numeric_id}")]
    DuplicateEntry { string_id: String, numeric_id: i32 },
    #[error("malformed item type table: {0}")]
    MalformedTable(String),
}

/// One row of the session item table, as delivered during session
/// negotiation. The wire name of the fields matches the JSON document the
/// peer sends.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemTypeEntry {
    #[serde(rename = "name")]
    pub string_id: String,
    #[serde(rename = "id")]
    pub numeric_id: i32,
}

/// Session-scoped bijection between textual and numeric item identifiers.
///
/// Built once when the session table arrives, immutable afterwards, so it is
/// safe to share across packet decodes for the rest of the connection.
#[derive(Debug)]
pub struct ItemTypeDictionary {
    entries: Vec<ItemTypeEntry>,
    string_to_int: HashMap<String, i32>,
    int_to_string: HashMap<i32, String>,
    shield_runtime_id: Option<i32>,
}

impl ItemTypeDictionary {
    pub const SHIELD_STRING_ID: &'static str = "minecraft:shield";

    pub fn new(entries: Vec<ItemTypeEntry>) -> Result<Self, DictionaryError> {
        let mut string_to_int = HashMap::with_capacity(entries.len());
        let mut int_to_string = HashMap::with_capacity(entries.len());
        for entry in &entries {
            let clash = string_to_int
                .insert(entry.string_id.clone(), entry.numeric_id)
                .is_some()
                | int_to_string
                    .insert(entry.numeric_id, entry.string_id.clone())
                    .is_some();
            if clash {
                return Err(DictionaryError::DuplicateEntry {
                    string_id: entry.string_id.clone(),
                    numeric_id: entry.numeric_id,
                });
            }
        }
        let shield_runtime_id = string_to_int.get(Self::SHIELD_STRING_ID).copied();
        log::trace!("item type dictionary built with {} entries", entries.len());
        Ok(Self {
            entries,
            string_to_int,
            int_to_string,
            shield_runtime_id,
        })
    }

    /// Builds the dictionary from the session JSON table, a plain array of
    /// `{"name": ..., "id": ...}` rows.
    pub fn from_json(table: &str) -> Result<Self, DictionaryError> {
        let entries: Vec<ItemTypeEntry> = serde_json::from_str(table)
            .map_err(|e| DictionaryError::MalformedTable(e.to_string()))?;
        Self::new(entries)
    }

    pub fn entries(&self) -> &[ItemTypeEntry] {
        &self.entries
    }

    pub fn from_string_id(&self, string_id: &str) -> Result<i32, DictionaryError> {
        self.string_to_int
            .get(string_id)
            .copied()
            .ok_or_else(|| DictionaryError::UnmappedStringId(string_id.to_string()))
    }

    pub fn from_int_id(&self, int_id: i32) -> Result<&str, DictionaryError> {
        self.int_to_string
            .get(&int_id)
            .map(String::as_str)
            .ok_or(DictionaryError::UnmappedNumericId(int_id))
    }

    /// Numeric id of the shield item if the session table maps one. Item
    /// encoding consults this to decide blocking-tick presence.
    pub fn shield_runtime_id(&self) -> Option<i32> {
        self.shield_runtime_id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn entry(string_id: &str, numeric_id: i32) -> ItemTypeEntry {
        ItemTypeEntry {
            string_id: string_id.to_string(),
            numeric_id,
        }
    }

    #[test]
    fn bijection() {
        let dict = ItemTypeDictionary::new(vec![
            entry("minecraft:apple", 257),
            entry("minecraft:shield", 355),
        ])
        .unwrap();

        for e in dict.entries() {
            assert_eq!(
                dict.from_int_id(dict.from_string_id(&e.string_id).unwrap())
                    .unwrap(),
                e.string_id
            );
            assert_eq!(
                dict.from_string_id(dict.from_int_id(e.numeric_id).unwrap())
                    .unwrap(),
                e.numeric_id
            );
        }
    }

    #[test]
    fn lookup_miss_is_an_error_not_a_default() {
        let dict = ItemTypeDictionary::new(vec![entry("minecraft:apple", 257)]).unwrap();
        assert!(matches!(
            dict.from_string_id("minecraft:missing"),
            Err(DictionaryError::UnmappedStringId(_))
        ));
        assert!(matches!(
            dict.from_int_id(9000),
            Err(DictionaryError::UnmappedNumericId(9000))
        ));
    }

    #[test]
    fn duplicate_entries_rejected() {
        let result = ItemTypeDictionary::new(vec![
            entry("minecraft:apple", 257),
            entry("minecraft:apple", 258),
        ]);
        assert!(matches!(result, Err(DictionaryError::DuplicateEntry { .. })));

        let result = ItemTypeDictionary::new(vec![
            entry("minecraft:apple", 257),
            entry("minecraft:golden_apple", 257),
        ]);
        assert!(matches!(result, Err(DictionaryError::DuplicateEntry { .. })));
    }

    #[test]
    fn from_json_table() {
        let dict = ItemTypeDictionary::from_json(
            r#"[{"name": "minecraft:shield", "id": 355}, {"name": "minecraft:apple", "id": 257}]"#,
        )
        .unwrap();
        assert_eq!(dict.from_string_id("minecraft:apple").unwrap(), 257);
        assert_eq!(dict.shield_runtime_id(), Some(355));

        assert!(matches!(
            ItemTypeDictionary::from_json("not json"),
            Err(DictionaryError::MalformedTable(_))
        ));
    }

    #[test]
    fn shield_id_absent_when_unmapped() {
        let dict = ItemTypeDictionary::new(vec![entry("minecraft:apple", 257)]).unwrap();
        assert_eq!(dict.shield_runtime_id(), None);
    }
}
