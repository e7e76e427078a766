use std::path::PathBuf;

use anyhow::Context;
use storage::LexiconFile;

use crate::options::open_sqlite;

/// Import `lexicon` into the database at `db_url`, clearing it first unless `keep`.
pub async fn execute(lexicon: PathBuf, db_url: String, keep: bool) -> anyhow::Result<()> {
    let parsed = LexiconFile::load(&lexicon)
        .and_then(LexiconFile::into_lexicon)
        .with_context(|| format!("loading {}", lexicon.display()))?;
    tracing::info!(
        verbs = parsed.verbs.len(),
        function_words = parsed.function_words.len(),
        "loaded lexicon file"
    );

    let storage = open_sqlite(&db_url).await?;
    if !keep {
        storage.lexicon.clear().await?;
        tracing::info!("cleared existing entries");
    }
    let stored = parsed.import_into(storage.lexicon.as_ref()).await?;

    println!("Imported {stored} entries into {db_url}");
    Ok(())
}
