use std::sync::Arc;

use drill_core::model::{ConjugationMap, EntryId, LexicalEntry, SourceLanguage, Tense};
use drill_core::time::fixed_now;
use services::{Advance, Clock, DrillLoopService, DrillRequest, DrillSource, SessionError};
use storage::repository::{InMemoryRepository, LexiconRepository};

async fn seeded_repo() -> InMemoryRepository {
    let repo = InMemoryRepository::new();
    let verbs = [
        (1, "parlare", "to speak", "parlo, parli, parla, parliamo, parlate, parlano"),
        (2, "dormire", "to sleep", "dormo, dormi, dorme, dormiamo, dormite, dormono"),
        (3, "finire", "to finish", "finisco, finisci, finisce, finiamo, finite, finiscono"),
    ];
    for (id, infinitive, english, presente) in verbs {
        let entry = LexicalEntry::verb(EntryId::new(id), infinitive)
            .unwrap()
            .with_translation(SourceLanguage::En, english)
            .unwrap()
            .with_conjugation(Tense::Presente, ConjugationMap::from_list(presente))
            .unwrap();
        repo.upsert_entry(&entry).await.unwrap();
    }
    repo
}

#[tokio::test]
async fn conjugation_session_runs_to_completion() {
    let repo = seeded_repo().await;
    let service =
        DrillLoopService::new(Clock::fixed(fixed_now()), Arc::new(repo)).with_seed(Some(11));
    let request = DrillRequest::conjugation(SourceLanguage::En, [Tense::Presente]).unwrap();

    let mut engine = service.start_session(&request).await.unwrap();
    assert_eq!(engine.total(), 3);

    let mut steps = 0;
    let summary = loop {
        let answer = engine.current_question().unwrap().correct_answer().to_string();
        engine.submit(&answer);
        steps += 1;
        if let Advance::Complete(summary) = engine.advance() {
            break summary;
        }
    };

    assert_eq!(steps, 3);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.correct_count, 3);
    assert_eq!(summary.completed_at, fixed_now());
}

#[tokio::test]
async fn same_seed_same_session() {
    let repo = Arc::new(seeded_repo().await);
    let request = DrillRequest::translation(DrillSource::Verbs, SourceLanguage::En);

    let a = DrillLoopService::new(Clock::default(), repo.clone())
        .with_seed(Some(42))
        .preview(&request)
        .await
        .unwrap();
    let b = DrillLoopService::new(Clock::default(), repo)
        .with_seed(Some(42))
        .preview(&request)
        .await
        .unwrap();

    let ids = |qs: &[drill_core::model::Question]| {
        qs.iter().map(|q| q.id().to_string()).collect::<Vec<_>>()
    };
    assert_eq!(ids(&a), ids(&b));
}

#[tokio::test]
async fn empty_lexicon_cannot_start() {
    let service = DrillLoopService::in_memory(Clock::default());
    let request = DrillRequest::translation(DrillSource::FunctionWords, SourceLanguage::De);
    let err = service.start_session(&request).await.unwrap_err();
    assert!(matches!(err, SessionError::Empty));
}

#[tokio::test]
async fn missing_tense_tables_cannot_start() {
    let repo = seeded_repo().await;
    let service = DrillLoopService::new(Clock::default(), Arc::new(repo));
    let request = DrillRequest::conjugation(SourceLanguage::En, [Tense::Imperfetto]).unwrap();
    let err = service.start_session(&request).await.unwrap_err();
    assert!(matches!(err, SessionError::Empty));
}

#[tokio::test]
async fn limit_truncates_session() {
    let repo = seeded_repo().await;
    let service = DrillLoopService::new(Clock::default(), Arc::new(repo))
        .with_seed(Some(3))
        .with_limit(Some(2));
    let request = DrillRequest::translation(DrillSource::Verbs, SourceLanguage::En);
    let engine = service.start_session(&request).await.unwrap();
    assert_eq!(engine.total(), 2);
}
