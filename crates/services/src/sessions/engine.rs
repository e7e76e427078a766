use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use drill_core::Clock;
use drill_core::model::Question;

use super::progress::SessionProgress;
use super::timer::{ScheduledTimer, TimerKind, TimerTicket};
use crate::error::SessionError;

//
// ─── STATUS & OUTCOMES ─────────────────────────────────────────────────────────
//

/// Attempt status of the current question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptStatus {
    /// Waiting for an attempt.
    #[default]
    Idle,
    /// One wrong attempt recorded; one more is allowed.
    Wrong1,
    /// Two wrong attempts; the answer is revealed.
    Wrong2,
    /// Answered correctly.
    Correct,
}

impl AttemptStatus {
    /// `Correct` and `Wrong2` accept no further attempts.
    #[must_use]
    pub fn is_closed(self) -> bool {
        matches!(self, AttemptStatus::Correct | AttemptStatus::Wrong2)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AttemptStatus::Idle => "idle",
            AttemptStatus::Wrong1 => "wrong1",
            AttemptStatus::Wrong2 => "wrong2",
            AttemptStatus::Correct => "correct",
        }
    }
}

impl fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a submission was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Blank or whitespace-only input.
    EmptyInput,
    /// The current question is already answered or revealed.
    AttemptClosed,
    /// The session has finished.
    SessionComplete,
}

/// Result of [`SessionEngine::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Right answer. Deliver `timer` to move on automatically.
    Correct { timer: ScheduledTimer },
    /// First miss. Deliver `timer` to drop the retained input.
    FirstMiss { timer: ScheduledTimer },
    /// Second miss. The correct answer is revealed until the next advance.
    SecondMiss,
    /// Nothing changed.
    Rejected(Rejection),
}

impl SubmitOutcome {
    #[must_use]
    pub fn timer(&self) -> Option<ScheduledTimer> {
        match self {
            SubmitOutcome::Correct { timer } | SubmitOutcome::FirstMiss { timer } => Some(*timer),
            SubmitOutcome::SecondMiss | SubmitOutcome::Rejected(_) => None,
        }
    }

    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, SubmitOutcome::Rejected(_))
    }
}

/// Final tally of a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub correct_count: usize,
    pub total: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl SessionSummary {
    /// Share of questions answered correctly, in percent.
    #[must_use]
    pub fn accuracy_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let pct = self.correct_count.saturating_mul(100) / self.total;
        u32::try_from(pct).unwrap_or(100)
    }
}

/// Result of [`SessionEngine::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Now showing the question at `index`.
    Next { index: usize },
    /// No questions left.
    Complete(SessionSummary),
}

/// Result of [`SessionEngine::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced(Advance),
    InputCleared,
    /// The ticket was superseded or already delivered.
    Stale,
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Single-pass drill over a fixed question sequence.
///
/// All state changes go through [`submit`](Self::submit),
/// [`advance`](Self::advance) and [`tick`](Self::tick). Delays are not run by
/// the engine; it hands out [`ScheduledTimer`]s and the driver delivers the
/// ticket back when the delay has elapsed.
pub struct SessionEngine {
    questions: Vec<Question>,
    current: usize,
    status: AttemptStatus,
    wrong_input: Option<String>,
    correct_count: usize,
    live_timer: Option<TimerTicket>,
    next_serial: u64,
    clock: Clock,
    started_at: DateTime<Utc>,
    summary: Option<SessionSummary>,
}

impl SessionEngine {
    /// Start a session over `questions`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if there are no questions.
    pub fn new(questions: Vec<Question>, clock: Clock) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }
        let started_at = clock.now();
        tracing::info!(total = questions.len(), "session started");
        Ok(Self {
            questions,
            current: 0,
            status: AttemptStatus::Idle,
            wrong_input: None,
            correct_count: 0,
            live_timer: None,
            next_serial: 0,
            clock,
            started_at,
            summary: None,
        })
    }

    /// Replace this session with a fresh one over `questions`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if there are no questions; the current
    /// session is left untouched in that case.
    pub fn reset(&mut self, questions: Vec<Question>) -> Result<(), SessionError> {
        let mut fresh = Self::new(questions, self.clock)?;
        // Ticket serials keep counting so tickets from the old session stay stale.
        fresh.next_serial = self.next_serial;
        *self = fresh;
        Ok(())
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question being asked, or `None` once the session is complete.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_complete() {
            return None;
        }
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn status(&self) -> AttemptStatus {
        self.status
    }

    /// Raw text of the first wrong attempt, until the shake delay clears it.
    #[must_use]
    pub fn wrong_input(&self) -> Option<&str> {
        self.wrong_input.as_deref()
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.summary.is_some()
    }

    #[must_use]
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    /// The ticket that [`tick`](Self::tick) would currently act on.
    #[must_use]
    pub fn live_timer(&self) -> Option<TimerTicket> {
        self.live_timer
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let answered = if self.is_complete() {
            self.total()
        } else {
            self.current + usize::from(self.status.is_closed())
        };
        SessionProgress {
            total: self.total(),
            answered,
            remaining: self.total().saturating_sub(answered),
            correct: self.correct_count,
            is_complete: self.is_complete(),
        }
    }

    /// Check `input` against the current question.
    pub fn submit(&mut self, input: &str) -> SubmitOutcome {
        if self.is_complete() {
            return SubmitOutcome::Rejected(Rejection::SessionComplete);
        }
        if self.status.is_closed() {
            return SubmitOutcome::Rejected(Rejection::AttemptClosed);
        }
        if input.trim().is_empty() {
            return SubmitOutcome::Rejected(Rejection::EmptyInput);
        }

        let question = &self.questions[self.current];
        let question_id = question.id().clone();

        let outcome = if question.accepts(input) {
            self.status = AttemptStatus::Correct;
            self.wrong_input = None;
            self.correct_count += 1;
            SubmitOutcome::Correct {
                timer: self.schedule(TimerKind::AutoAdvance),
            }
        } else if self.status == AttemptStatus::Idle {
            self.status = AttemptStatus::Wrong1;
            self.wrong_input = Some(input.to_string());
            SubmitOutcome::FirstMiss {
                timer: self.schedule(TimerKind::ClearWrongInput),
            }
        } else {
            self.status = AttemptStatus::Wrong2;
            self.wrong_input = None;
            self.live_timer = None;
            SubmitOutcome::SecondMiss
        };

        tracing::debug!(question = %question_id, status = %self.status, "answer submitted");
        outcome
    }

    /// Move to the next question, or finish the session after the last one.
    ///
    /// Any pending timer is superseded. On a finished session this returns
    /// the existing summary and changes nothing.
    pub fn advance(&mut self) -> Advance {
        if let Some(summary) = &self.summary {
            return Advance::Complete(summary.clone());
        }

        self.live_timer = None;
        self.wrong_input = None;

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.status = AttemptStatus::Idle;
            tracing::debug!(index = self.current, "advanced");
            return Advance::Next {
                index: self.current,
            };
        }

        let summary = SessionSummary {
            correct_count: self.correct_count,
            total: self.questions.len(),
            started_at: self.started_at,
            completed_at: self.clock.now(),
        };
        tracing::info!(
            correct = summary.correct_count,
            total = summary.total,
            "session complete"
        );
        self.summary = Some(summary.clone());
        Advance::Complete(summary)
    }

    /// Deliver an elapsed delay. Only the live ticket has an effect.
    pub fn tick(&mut self, ticket: TimerTicket) -> TickOutcome {
        if self.live_timer != Some(ticket) {
            return TickOutcome::Stale;
        }
        self.live_timer = None;
        match ticket.kind() {
            TimerKind::AutoAdvance => TickOutcome::Advanced(self.advance()),
            TimerKind::ClearWrongInput => {
                self.wrong_input = None;
                TickOutcome::InputCleared
            }
        }
    }

    fn schedule(&mut self, kind: TimerKind) -> ScheduledTimer {
        self.next_serial += 1;
        let timer = ScheduledTimer::new(kind, self.next_serial);
        self.live_timer = Some(timer.ticket);
        timer
    }
}

impl fmt::Debug for SessionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionEngine")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("status", &self.status)
            .field("correct_count", &self.correct_count)
            .field("live_timer", &self.live_timer)
            .field("complete", &self.is_complete())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::model::{
        ConjugationMap, EntryId, LexicalEntry, Person, SourceLanguage, Tense,
    };
    use drill_core::time::{fixed_clock, fixed_now};
    use std::sync::Arc;

    use crate::sessions::timer::{CORRECT_DISPLAY_DELAY, SHAKE_DELAY};

    fn parlare() -> Arc<LexicalEntry> {
        Arc::new(
            LexicalEntry::verb(EntryId::new(1), "parlare")
                .unwrap()
                .with_translation(SourceLanguage::En, "to speak")
                .unwrap()
                .with_conjugation(
                    Tense::Presente,
                    ConjugationMap::from_list("parlo, parli, parla, parliamo, parlate, parlano"),
                )
                .unwrap(),
        )
    }

    fn questions(persons: &[Person]) -> Vec<Question> {
        let entry = parlare();
        persons
            .iter()
            .map(|p| Question::conjugation(&entry, Tense::Presente, *p, SourceLanguage::En).unwrap())
            .collect()
    }

    fn engine(persons: &[Person]) -> SessionEngine {
        SessionEngine::new(questions(persons), fixed_clock()).unwrap()
    }

    #[test]
    fn empty_session_cannot_start() {
        let err = SessionEngine::new(Vec::new(), fixed_clock()).unwrap_err();
        assert!(matches!(err, SessionError::Empty));
    }

    #[test]
    fn correct_answer_from_idle() {
        let mut e = engine(&[Person::Io]);
        let outcome = e.submit("  Parlo  ");
        assert!(matches!(outcome, SubmitOutcome::Correct { .. }));
        assert_eq!(outcome.timer().unwrap().delay, CORRECT_DISPLAY_DELAY);
        assert_eq!(e.status(), AttemptStatus::Correct);
        assert_eq!(e.correct_count(), 1);
    }

    #[test]
    fn two_misses_reveal_the_answer() {
        let mut e = engine(&[Person::Io]);

        let first = e.submit("xyz");
        assert!(matches!(first, SubmitOutcome::FirstMiss { .. }));
        assert_eq!(first.timer().unwrap().delay, SHAKE_DELAY);
        assert_eq!(e.status(), AttemptStatus::Wrong1);
        assert_eq!(e.wrong_input(), Some("xyz"));

        assert_eq!(e.submit("abc"), SubmitOutcome::SecondMiss);
        assert_eq!(e.status(), AttemptStatus::Wrong2);
        assert_eq!(e.wrong_input(), None);
        assert_eq!(e.correct_count(), 0);
    }

    #[test]
    fn wrong_input_is_kept_raw() {
        let mut e = engine(&[Person::Io]);
        e.submit("  Parli ");
        assert_eq!(e.wrong_input(), Some("  Parli "));
    }

    #[test]
    fn correct_after_one_miss_counts() {
        let mut e = engine(&[Person::Tu]);
        e.submit("parlo");
        assert!(matches!(e.submit("PARLI"), SubmitOutcome::Correct { .. }));
        assert_eq!(e.status(), AttemptStatus::Correct);
        assert_eq!(e.wrong_input(), None);
        assert_eq!(e.correct_count(), 1);
    }

    #[test]
    fn closed_states_reject_submissions() {
        let mut e = engine(&[Person::Io, Person::Tu]);
        e.submit("parlo");
        assert_eq!(
            e.submit("parlo"),
            SubmitOutcome::Rejected(Rejection::AttemptClosed)
        );
        assert_eq!(e.correct_count(), 1);

        e.advance();
        e.submit("x");
        e.submit("y");
        assert_eq!(e.submit("parli"), SubmitOutcome::Rejected(Rejection::AttemptClosed));
        assert_eq!(e.status(), AttemptStatus::Wrong2);
        assert_eq!(e.correct_count(), 1);
    }

    #[test]
    fn blank_submissions_consume_nothing() {
        let mut e = engine(&[Person::Io]);
        assert_eq!(e.submit("   "), SubmitOutcome::Rejected(Rejection::EmptyInput));
        assert_eq!(e.status(), AttemptStatus::Idle);

        e.submit("nope");
        let live = e.live_timer();
        assert_eq!(e.submit(""), SubmitOutcome::Rejected(Rejection::EmptyInput));
        assert_eq!(e.status(), AttemptStatus::Wrong1);
        assert_eq!(e.wrong_input(), Some("nope"));
        assert_eq!(e.live_timer(), live);
    }

    #[test]
    fn shake_timer_clears_input_but_keeps_status() {
        let mut e = engine(&[Person::Io]);
        let timer = e.submit("xyz").timer().unwrap();
        assert_eq!(e.tick(timer.ticket), TickOutcome::InputCleared);
        assert_eq!(e.status(), AttemptStatus::Wrong1);
        assert_eq!(e.wrong_input(), None);
        assert_eq!(e.tick(timer.ticket), TickOutcome::Stale);
    }

    #[test]
    fn second_submission_supersedes_shake_timer() {
        let mut e = engine(&[Person::Io]);
        let timer = e.submit("xyz").timer().unwrap();
        e.submit("abc");
        assert_eq!(e.tick(timer.ticket), TickOutcome::Stale);
        assert_eq!(e.status(), AttemptStatus::Wrong2);
    }

    #[test]
    fn auto_advance_moves_on_once() {
        let mut e = engine(&[Person::Io, Person::Tu, Person::Noi]);
        let timer = e.submit("parlo").timer().unwrap();
        assert_eq!(
            e.tick(timer.ticket),
            TickOutcome::Advanced(Advance::Next { index: 1 })
        );
        assert_eq!(e.status(), AttemptStatus::Idle);
        assert_eq!(e.tick(timer.ticket), TickOutcome::Stale);
        assert_eq!(e.current_index(), 1);
    }

    #[test]
    fn explicit_advance_supersedes_auto_advance() {
        let mut e = engine(&[Person::Io, Person::Tu, Person::Noi]);
        let timer = e.submit("parlo").timer().unwrap();
        assert_eq!(e.advance(), Advance::Next { index: 1 });
        assert_eq!(e.tick(timer.ticket), TickOutcome::Stale);
        assert_eq!(e.current_index(), 1);
    }

    #[test]
    fn tickets_from_earlier_questions_stay_stale() {
        let mut e = engine(&[Person::Io, Person::Tu]);
        let first = e.submit("wrong").timer().unwrap();
        e.advance();
        e.submit("wrong again");
        assert_eq!(e.tick(first.ticket), TickOutcome::Stale);
        assert_eq!(e.wrong_input(), Some("wrong again"));
    }

    #[test]
    fn three_question_session_reports_total_and_correct() {
        let mut e = engine(&[Person::Io, Person::Tu, Person::Noi]);

        e.submit("parlo");
        e.advance();
        e.submit("x");
        e.submit("y");
        e.advance();
        e.submit("parliamo");

        match e.advance() {
            Advance::Complete(summary) => {
                assert_eq!(summary.total, 3);
                assert_eq!(summary.correct_count, 2);
                assert_eq!(summary.started_at, fixed_now());
                assert_eq!(summary.accuracy_percent(), 66);
            }
            other => panic!("expected completion, got {other:?}"),
        }
        assert!(e.is_complete());
        assert!(e.current_question().is_none());
    }

    #[test]
    fn completed_session_is_inert() {
        let mut e = engine(&[Person::Io]);
        let timer = e.submit("parlo").timer().unwrap();
        let Advance::Complete(summary) = e.advance() else {
            panic!("single question session should complete");
        };
        assert_eq!(e.tick(timer.ticket), TickOutcome::Stale);
        assert_eq!(e.advance(), Advance::Complete(summary));
        assert_eq!(
            e.submit("parlo"),
            SubmitOutcome::Rejected(Rejection::SessionComplete)
        );
        assert_eq!(e.correct_count(), 1);
    }

    #[test]
    fn skipping_an_open_question_does_not_count() {
        let mut e = engine(&[Person::Io, Person::Tu]);
        e.submit("x");
        assert_eq!(e.advance(), Advance::Next { index: 1 });
        assert_eq!(e.wrong_input(), None);
        assert_eq!(e.status(), AttemptStatus::Idle);
        assert_eq!(e.correct_count(), 0);
    }

    #[test]
    fn progress_tracks_closed_questions() {
        let mut e = engine(&[Person::Io, Person::Tu]);
        assert_eq!(e.progress().answered, 0);
        e.submit("parlo");
        let p = e.progress();
        assert_eq!((p.answered, p.remaining, p.correct), (1, 1, 1));
        e.advance();
        e.advance();
        let p = e.progress();
        assert!(p.is_complete);
        assert_eq!(p.remaining, 0);
    }

    #[test]
    fn reset_starts_over() {
        let mut e = engine(&[Person::Io]);
        e.submit("parlo");
        e.advance();
        e.reset(questions(&[Person::Voi, Person::Loro])).unwrap();
        assert!(!e.is_complete());
        assert_eq!(e.total(), 2);
        assert_eq!(e.correct_count(), 0);
        assert_eq!(e.status(), AttemptStatus::Idle);

        assert!(matches!(e.reset(Vec::new()), Err(SessionError::Empty)));
        assert_eq!(e.total(), 2);
    }

    #[test]
    fn tickets_from_before_reset_stay_stale() {
        let mut e = engine(&[Person::Io]);
        let old = e.submit("parlo").timer().unwrap();

        e.reset(questions(&[Person::Io, Person::Tu])).unwrap();
        let fresh = e.submit("parlo").timer().unwrap();
        assert_ne!(fresh.ticket, old.ticket);

        assert_eq!(e.tick(old.ticket), TickOutcome::Stale);
        assert_eq!(e.current_index(), 0);
        assert_eq!(e.status(), AttemptStatus::Correct);
        assert_eq!(
            e.tick(fresh.ticket),
            TickOutcome::Advanced(Advance::Next { index: 1 })
        );
    }
}
