use anyhow::bail;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;

use services::session::TimerTicket;
use services::{
    AttemptStatus, Rejection, SessionEngine, SessionError, SessionSnapshot, SubmitOutcome,
    TickOutcome,
};

use crate::options::{DrillArgs, StoreArgs};

/// One line typed by the learner.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineCommand {
    Answer(String),
    Skip,
    Quit,
}

fn parse_line(line: &str) -> LineCommand {
    match line.trim() {
        ":q" | ":quit" => LineCommand::Quit,
        ":s" | ":skip" => LineCommand::Skip,
        _ => LineCommand::Answer(line.to_string()),
    }
}

pub async fn execute(store: StoreArgs, drill: DrillArgs, json: bool) -> anyhow::Result<()> {
    let request = drill.request()?;
    let service = drill.service(store.open().await?);
    let mut engine = match service.start_session(&request).await {
        Ok(engine) => engine,
        Err(SessionError::Empty) => {
            bail!("no questions for this configuration; try other tenses or seed more entries")
        }
        Err(e) => return Err(e.into()),
    };

    if !json {
        println!("Type your answer and press Enter. :skip moves on, :quit stops.");
    }
    let mut screen = Screen::new(json);
    screen.show(&engine)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Option<(TimerTicket, Instant)> = None;

    while !engine.is_complete() {
        let deadline = pending.map(|(_, at)| at);
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&line) {
                    LineCommand::Quit => break,
                    LineCommand::Skip => {
                        pending = None;
                        engine.advance();
                    }
                    LineCommand::Answer(_) if engine.status().is_closed() => {
                        pending = None;
                        engine.advance();
                    }
                    LineCommand::Answer(text) => {
                        let outcome = engine.submit(&text);
                        if let SubmitOutcome::Rejected(reason) = outcome {
                            screen.rejected(reason);
                            continue;
                        }
                        pending = outcome
                            .timer()
                            .map(|timer| (timer.ticket, Instant::now() + timer.delay));
                    }
                }
            }
            () = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                let Some((ticket, _)) = pending.take() else { continue };
                if engine.tick(ticket) == TickOutcome::Stale {
                    continue;
                }
            }
        }
        screen.show(&engine)?;
    }

    if let Some(summary) = engine.summary() {
        tracing::info!(
            correct = summary.correct_count,
            total = summary.total,
            "drill finished"
        );
    }
    Ok(())
}

/// Prints what changed since the previous snapshot.
struct Screen {
    json: bool,
    last: Option<SessionSnapshot>,
}

impl Screen {
    fn new(json: bool) -> Self {
        Self { json, last: None }
    }

    fn show(&mut self, engine: &SessionEngine) -> anyhow::Result<()> {
        let snapshot = engine.snapshot();
        if self.last.as_ref() == Some(&snapshot) {
            return Ok(());
        }
        if self.json {
            println!("{}", serde_json::to_string(&snapshot)?);
        } else {
            for line in describe(self.last.as_ref(), &snapshot) {
                println!("{line}");
            }
        }
        self.last = Some(snapshot);
        Ok(())
    }

    fn rejected(&self, reason: Rejection) {
        if self.json {
            return;
        }
        match reason {
            Rejection::EmptyInput => println!("  (type an answer first)"),
            Rejection::AttemptClosed => println!("  (press Enter to continue)"),
            Rejection::SessionComplete => {}
        }
    }
}

/// Text lines for the transition from `prev` to `next`.
fn describe(prev: Option<&SessionSnapshot>, next: &SessionSnapshot) -> Vec<String> {
    let mut out = Vec::new();

    if let Some(summary) = &next.summary {
        out.push(String::new());
        out.push(format!(
            "Session complete: {}/{} correct ({}%)",
            summary.correct_count,
            summary.total,
            summary.accuracy_percent()
        ));
        return out;
    }

    let new_question = prev.is_none_or(|p| p.question_id != next.question_id);
    if new_question {
        out.push(String::new());
        out.push(format!(
            "[{}/{}] {}",
            next.index + 1,
            next.total,
            next.prompt.as_deref().unwrap_or_default()
        ));
        if let Some(sub) = &next.sub_prompt {
            out.push(format!("      {sub}"));
        }
    }

    match next.status {
        AttemptStatus::Idle => {}
        AttemptStatus::Correct => out.push("  ✓ correct".to_string()),
        AttemptStatus::Wrong1 => match &next.wrong_input {
            Some(input) => out.push(format!("  ✗ \"{}\" is not it, one more try", input.trim())),
            None => out.push("  try again:".to_string()),
        },
        AttemptStatus::Wrong2 => {
            if let Some(reveal) = &next.reveal {
                out.push(format!("  ✗ the answer is \"{}\"", reveal.correct_answer));
                if let (Some(canonical), Some(translation)) = (&reveal.canonical, &reveal.translation)
                {
                    out.push(format!("    {canonical}: {translation}"));
                }
            }
            out.push("  press Enter to continue".to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::model::{
        ConjugationMap, EntryId, LexicalEntry, Person, Question, SourceLanguage, Tense,
    };
    use drill_core::time::fixed_clock;
    use std::sync::Arc;

    fn engine() -> SessionEngine {
        let entry = Arc::new(
            LexicalEntry::verb(EntryId::new(1), "parlare")
                .unwrap()
                .with_translation(SourceLanguage::En, "to speak")
                .unwrap()
                .with_conjugation(
                    Tense::Presente,
                    ConjugationMap::from_list("parlo, parli, parla, parliamo, parlate, parlano"),
                )
                .unwrap(),
        );
        let questions = [Person::Io, Person::Tu]
            .into_iter()
            .map(|p| Question::conjugation(&entry, Tense::Presente, p, SourceLanguage::En).unwrap())
            .collect();
        SessionEngine::new(questions, fixed_clock()).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_line(" :quit "), LineCommand::Quit);
        assert_eq!(parse_line(":s"), LineCommand::Skip);
        assert_eq!(
            parse_line(" Parlo"),
            LineCommand::Answer(" Parlo".to_string())
        );
    }

    #[test]
    fn first_screen_shows_prompt_and_context() {
        let e = engine();
        let lines = describe(None, &e.snapshot());
        assert_eq!(lines[1], "[1/2] to speak (parlare)");
        assert_eq!(lines[2], "      io • Presente");
    }

    #[test]
    fn misses_report_then_reveal() {
        let mut e = engine();
        let before = e.snapshot();
        e.submit("parli");
        let wrong1 = e.snapshot();
        assert_eq!(
            describe(Some(&before), &wrong1),
            vec!["  ✗ \"parli\" is not it, one more try".to_string()]
        );

        e.submit("parla");
        let lines = describe(Some(&wrong1), &e.snapshot());
        assert_eq!(lines[0], "  ✗ the answer is \"parlo\"");
        assert_eq!(lines[1], "    parlare: to speak");
    }

    #[test]
    fn completion_prints_tally() {
        let mut e = engine();
        e.submit("parlo");
        e.advance();
        e.advance();
        let lines = describe(None, &e.snapshot());
        assert_eq!(lines[1], "Session complete: 1/2 correct (50%)");
    }
}
