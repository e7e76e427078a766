use std::collections::BTreeMap;

use drill_core::model::{
    Auxiliary, ConjugationMap, EntryId, EntryKind, LexicalEntry, SourceLanguage, Tense,
};
use sqlx::Row;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn entry_id_to_i64(id: EntryId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("entry_id overflow".into()))
}

pub(crate) fn entry_id_from_i64(v: i64) -> Result<EntryId, StorageError> {
    u64::try_from(v)
        .map(EntryId::new)
        .map_err(|_| StorageError::Serialization("entry_id sign overflow".into()))
}

/// Encodes conjugation tables as `{"presente": {"io": ...}, ...}`.
pub(crate) fn conjugations_to_json(entry: &LexicalEntry) -> Result<String, StorageError> {
    let keyed: BTreeMap<&str, &ConjugationMap> = entry
        .conjugations()
        .iter()
        .map(|(tense, map)| (tense.key(), map))
        .collect();
    serde_json::to_string(&keyed).map_err(ser)
}

pub(crate) fn conjugations_from_json(raw: &str) -> Result<Vec<(Tense, ConjugationMap)>, StorageError> {
    let keyed: BTreeMap<String, ConjugationMap> = serde_json::from_str(raw).map_err(ser)?;
    keyed
        .into_iter()
        .map(|(key, map)| key.parse::<Tense>().map(|tense| (tense, map)).map_err(ser))
        .collect()
}

pub(crate) fn map_entry_row(row: &sqlx::sqlite::SqliteRow) -> Result<LexicalEntry, StorageError> {
    let id = entry_id_from_i64(row.try_get("id").map_err(ser)?)?;
    let kind: EntryKind = row
        .try_get::<String, _>("kind")
        .map_err(ser)?
        .parse()
        .map_err(ser)?;
    let canonical: String = row.try_get("canonical").map_err(ser)?;

    let mut entry = match kind {
        EntryKind::Verb => LexicalEntry::verb(id, canonical),
        EntryKind::FunctionWord => LexicalEntry::function_word(id, canonical),
    }
    .map_err(ser)?;

    for (language, column) in [
        (SourceLanguage::En, "translation_en"),
        (SourceLanguage::De, "translation_de"),
    ] {
        if let Some(text) = row.try_get::<Option<String>, _>(column).map_err(ser)? {
            entry = entry.with_translation(language, text).map_err(ser)?;
        }
    }

    if let Some(aux) = row.try_get::<Option<String>, _>("auxiliary").map_err(ser)? {
        entry = entry.with_auxiliary(aux.parse::<Auxiliary>().map_err(ser)?);
    }

    let raw: String = row.try_get("conjugations").map_err(ser)?;
    for (tense, map) in conjugations_from_json(&raw)? {
        entry = entry.with_conjugation(tense, map).map_err(ser)?;
    }

    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conjugations_round_trip_by_tense_key() {
        let entry = LexicalEntry::verb(EntryId::new(1), "parlare")
            .unwrap()
            .with_conjugation(
                Tense::PassatoProssimo,
                ConjugationMap::from_list("ho parlato, hai parlato"),
            )
            .unwrap();
        let json = conjugations_to_json(&entry).unwrap();
        assert!(json.contains("\"passato_prossimo\""));

        let back = conjugations_from_json(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].0, Tense::PassatoProssimo);
        assert!(!back[0].1.is_usable());
    }

    #[test]
    fn unknown_tense_key_is_a_serialization_error() {
        let err = conjugations_from_json(r#"{"futuro": {}}"#).unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }
}
