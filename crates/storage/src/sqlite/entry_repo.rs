use drill_core::model::{EntryKind, LexicalEntry, SourceLanguage};

use super::{
    SqliteRepository,
    mapping::{conjugations_to_json, entry_id_to_i64, map_entry_row},
};
use crate::repository::{LexiconRepository, StorageError};

fn write_error(e: sqlx::Error, canonical: &str) -> StorageError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StorageError::Conflict(canonical.to_string())
        }
        _ => StorageError::Connection(e.to_string()),
    }
}

#[async_trait::async_trait]
impl LexiconRepository for SqliteRepository {
    async fn list_entries(&self, kind: EntryKind) -> Result<Vec<LexicalEntry>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, kind, canonical, translation_en, translation_de, auxiliary, conjugations
            FROM lexical_entries
            WHERE kind = ?1
            ORDER BY id ASC
            ",
        )
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            entries.push(map_entry_row(&row)?);
        }
        Ok(entries)
    }

    async fn upsert_entry(&self, entry: &LexicalEntry) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO lexical_entries (
                id, kind, canonical, translation_en, translation_de, auxiliary, conjugations
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(kind, id) DO UPDATE SET
                canonical = excluded.canonical,
                translation_en = excluded.translation_en,
                translation_de = excluded.translation_de,
                auxiliary = excluded.auxiliary,
                conjugations = excluded.conjugations
            ",
        )
        .bind(entry_id_to_i64(entry.id())?)
        .bind(entry.kind().as_str())
        .bind(entry.canonical())
        .bind(entry.translation(SourceLanguage::En))
        .bind(entry.translation(SourceLanguage::De))
        .bind(entry.auxiliary().map(|aux| aux.as_str()))
        .bind(conjugations_to_json(entry)?)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, entry.canonical()))?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM lexical_entries")
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(())
    }
}
