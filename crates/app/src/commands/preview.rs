use drill_core::model::Question;
use serde_json::json;

use crate::options::{DrillArgs, StoreArgs};

pub async fn execute(store: StoreArgs, drill: DrillArgs, json: bool) -> anyhow::Result<()> {
    let request = drill.request()?;
    let service = drill.service(store.open().await?);
    let questions = service.preview(&request).await?;

    if questions.is_empty() {
        eprintln!("No questions for this configuration.");
        return Ok(());
    }

    for (index, question) in questions.iter().enumerate() {
        if json {
            println!("{}", serde_json::to_string(&question_json(question))?);
        } else {
            println!("{}", question_line(index, question));
        }
    }
    Ok(())
}

fn question_json(question: &Question) -> serde_json::Value {
    json!({
        "id": question.id().as_str(),
        "prompt": question.prompt(),
        "subPrompt": question.sub_prompt(),
        "tense": question.tense(),
        "person": question.person(),
        "correctAnswer": question.correct_answer(),
    })
}

fn question_line(index: usize, question: &Question) -> String {
    let context = question
        .sub_prompt()
        .map(|s| format!(" [{s}]"))
        .unwrap_or_default();
    format!(
        "{:>3}. {}{} => {}",
        index + 1,
        question.prompt(),
        context,
        question.correct_answer()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::model::{
        ConjugationMap, EntryId, LexicalEntry, Person, SourceLanguage, Tense,
    };
    use std::sync::Arc;

    fn question() -> Question {
        let entry = Arc::new(
            LexicalEntry::verb(EntryId::new(2), "venire")
                .unwrap()
                .with_translation(SourceLanguage::De, "kommen")
                .unwrap()
                .with_conjugation(
                    Tense::Presente,
                    ConjugationMap::from_list("vengo, vieni, viene, veniamo, venite, vengono"),
                )
                .unwrap(),
        );
        Question::conjugation(&entry, Tense::Presente, Person::Loro, SourceLanguage::De).unwrap()
    }

    #[test]
    fn text_line_shows_prompt_context_and_answer() {
        assert_eq!(
            question_line(0, &question()),
            "  1. kommen (venire) [loro • Presente] => vengono"
        );
    }

    #[test]
    fn json_line_uses_camel_case() {
        let value = question_json(&question());
        assert_eq!(value["id"], "2-Presente-loro");
        assert_eq!(value["subPrompt"], "loro • Presente");
        assert_eq!(value["correctAnswer"], "vengono");
        assert_eq!(value["person"], "loro");
        assert_eq!(value["tense"], "Presente");
    }
}
