//! The session facade - one player's full state tree.
//!
//! The presentation layer forwards intents (answer picked, message tapped,
//! verdict, ending choice, restart) and delivers elapsed time through
//! [`Session::advance`]. After every call it reads the state back through the
//! accessors or a [`SessionSnapshot`], and drains [`NarrativeEvent`]s.

mod snapshot;

pub use snapshot::*;

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use story_content::{Catalog, DialogueStep, EvidenceKey, MessageId, ThreadId};

use crate::config::SessionConfig;
use crate::dialogue::{DialogueMachine, Settlement, Submission};
use crate::ending::{EndingBranch, EndingChoice, FileRevealState, Resolution, SessionPhase};
use crate::error::SessionError;
use crate::events::NarrativeEvent;
use crate::evidence::EvidenceTracker;
use crate::gate::session_unlocked;
use crate::scheduler::{Scheduler, TimerAction, TimerId};

/// Unique identifier for a session, used to tell sessions apart in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Events kept for [`Session::take_events`] before the oldest are dropped.
pub const MAX_QUEUED_EVENTS: usize = 1024;

#[derive(Debug, Clone)]
struct Highlight {
    key: EvidenceKey,
    timer: TimerId,
}

/// A single play-through.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    catalog: Arc<Catalog>,
    config: SessionConfig,

    dialogue: DialogueMachine,
    evidence: EvidenceTracker,
    ending: EndingBranch,
    highlight: Option<Highlight>,

    scheduler: Scheduler,
    events: VecDeque<NarrativeEvent>,
}

impl Session {
    /// Start a session over validated content.
    pub fn new(catalog: Arc<Catalog>, config: SessionConfig) -> Result<Self, SessionError> {
        config.validate()?;

        let session = Self {
            id: SessionId::new(),
            catalog,
            config,
            dialogue: DialogueMachine::new(),
            evidence: EvidenceTracker::new(),
            ending: EndingBranch::new(),
            highlight: None,
            scheduler: Scheduler::new(),
            events: VecDeque::new(),
        };

        tracing::info!(
            session = %session.id,
            title = session.catalog.title(),
            steps = session.catalog.step_count(),
            total_evidence = session.catalog.total_evidence(),
            "session started"
        );
        Ok(session)
    }

    /// Start a session with the reference timings.
    pub fn with_defaults(catalog: Arc<Catalog>) -> Result<Self, SessionError> {
        Self::new(catalog, SessionConfig::default())
    }

    /// Start a session over the bundled scenario.
    pub fn builtin() -> Result<Self, SessionError> {
        Self::with_defaults(Arc::new(Catalog::builtin()?))
    }

    // ------------------------------------------------------------------
    // Inputs
    // ------------------------------------------------------------------

    /// Answer the current dialogue step.
    pub fn submit_answer(&mut self, correct: bool) {
        let step = self.dialogue.step_index();

        match self.dialogue.submit(correct) {
            Submission::Ignored => {
                tracing::debug!(
                    session = %self.id,
                    step,
                    in_transition = self.dialogue.in_transition(),
                    "answer ignored"
                );
            }
            Submission::Pending { correct } => {
                let delay = if correct {
                    self.config.answer_reveal_delay()
                } else {
                    self.config.wrong_answer_delay()
                };
                self.scheduler
                    .schedule_once(delay, TimerAction::SettleAnswer { correct });

                tracing::debug!(session = %self.id, step, correct, "answer accepted");
                self.emit(NarrativeEvent::AnswerAccepted { step, correct });
            }
        }
    }

    /// Answer with the option at `index` of the current step.
    pub fn choose_option(&mut self, index: usize) {
        let correct = self
            .current_step()
            .and_then(|step| step.is_option_correct(index));

        match correct {
            Some(correct) => self.submit_answer(correct),
            None => tracing::debug!(session = %self.id, index, "no such option"),
        }
    }

    /// A message was tapped and the caller says whether it is evidence.
    ///
    /// The catalog has the last word: a message it does not flag is never
    /// recorded, whatever the caller claims.
    pub fn message_tapped(&mut self, thread: &ThreadId, message: MessageId, is_evidence: bool) {
        let flagged = self
            .catalog
            .is_evidence(&EvidenceKey::new(thread.clone(), message));

        if is_evidence && !flagged {
            tracing::warn!(
                session = %self.id,
                %thread,
                %message,
                "tapped message is not evidence in the catalog"
            );
        }

        self.record_evidence(thread, message, is_evidence && flagged);
    }

    /// A message was tapped; its evidence flag is looked up in the catalog.
    pub fn tap_message(&mut self, thread: &ThreadId, message: MessageId) {
        let is_evidence = match self.catalog.message(thread, message) {
            Some(found) => found.is_evidence,
            None => {
                tracing::debug!(session = %self.id, %thread, %message, "no such message");
                false
            }
        };

        self.record_evidence(thread, message, is_evidence);
    }

    /// Call the verdict. Ignored unless playing and unlocked.
    pub fn trigger_verdict(&mut self) {
        let unlocked = self.is_unlocked();

        if self.ending.trigger_verdict(unlocked) {
            tracing::info!(session = %self.id, "verdict triggered");
            self.emit(NarrativeEvent::VerdictTriggered);
        } else {
            tracing::debug!(
                session = %self.id,
                unlocked,
                phase = ?self.ending.phase(),
                "verdict ignored"
            );
        }
    }

    /// Pick an ending. Ignored before the verdict or once a choice is made.
    pub fn choose_ending(&mut self, choice: Resolution) {
        if !self.ending.choose(choice) {
            tracing::debug!(
                session = %self.id,
                ?choice,
                phase = ?self.ending.phase(),
                current = ?self.ending.choice(),
                "ending choice ignored"
            );
            return;
        }

        tracing::info!(session = %self.id, ?choice, "ending chosen");
        self.emit(NarrativeEvent::EndingChosen { choice });

        if choice == Resolution::RevealFile {
            self.scheduler
                .schedule_once(self.config.file_reveal_delay(), TimerAction::RevealFile);
        }
    }

    /// Start over: every component back to its initial state, every timer cancelled.
    pub fn restart(&mut self) {
        let cancelled = self.scheduler.cancel_all();

        self.dialogue.reset();
        self.evidence.reset();
        self.ending.reset();
        self.highlight = None;

        tracing::info!(session = %self.id, cancelled_timers = cancelled, "session restarted");
        self.emit(NarrativeEvent::SessionRestarted);
    }

    /// Cancel every outstanding timer without touching the story state.
    ///
    /// Call when the presentation goes away; nothing fires afterwards until a
    /// new transition schedules something. An answer still waiting to settle
    /// is dropped, so the dialogue accepts answers again.
    pub fn teardown(&mut self) {
        let cancelled = self.scheduler.cancel_all();
        self.dialogue.abort();
        self.highlight = None;
        tracing::debug!(session = %self.id, cancelled_timers = cancelled, "session torn down");
    }

    /// Let `elapsed` time pass, firing every timer that comes due in order.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.scheduler.now().saturating_add(elapsed);
        while let Some(fired) = self.scheduler.pop_due(until) {
            self.apply_timer(fired.action, fired.times);
        }
        self.scheduler.advance_to(until);
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Virtual time since the session was created.
    pub fn elapsed(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Time until the next timer fires, if any is pending.
    pub fn next_timer_in(&self) -> Option<Duration> {
        self.scheduler
            .next_due()
            .map(|due| due.saturating_sub(self.scheduler.now()))
    }

    pub fn step_index(&self) -> usize {
        self.dialogue.step_index()
    }

    /// The step awaiting an answer, `None` once the subject has confessed.
    pub fn current_step(&self) -> Option<&DialogueStep> {
        self.dialogue.current_step(self.catalog.script())
    }

    pub fn is_wrong_answer(&self) -> bool {
        self.dialogue.wrong_answer()
    }

    pub fn is_in_transition(&self) -> bool {
        self.dialogue.in_transition()
    }

    pub fn confession_raised(&self) -> bool {
        self.dialogue.confession_raised()
    }

    /// The confession text, once it has been made.
    pub fn confession_line(&self) -> Option<&str> {
        self.confession_raised()
            .then(|| self.catalog.epilogue().confession.as_str())
    }

    pub fn found_count(&self) -> usize {
        self.evidence.found_count()
    }

    pub fn is_found(&self, key: &EvidenceKey) -> bool {
        self.evidence.is_found(key)
    }

    /// Found evidence keys in a stable order.
    pub fn found_keys(&self) -> Vec<EvidenceKey> {
        let mut keys: Vec<_> = self.evidence.found_keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn total_evidence(&self) -> usize {
        self.catalog.total_evidence()
    }

    pub fn evidence_complete(&self) -> bool {
        self.evidence.is_complete(self.total_evidence())
    }

    /// Whether the verdict may be called. Recomputed on every read.
    pub fn is_unlocked(&self) -> bool {
        session_unlocked(
            self.confession_raised(),
            self.found_count(),
            self.total_evidence(),
        )
    }

    pub fn phase(&self) -> SessionPhase {
        self.ending.phase()
    }

    pub fn ending_choice(&self) -> EndingChoice {
        self.ending.choice()
    }

    pub fn file_reveal(&self) -> FileRevealState {
        self.ending.file()
    }

    /// The most recently found evidence, while its highlight lasts.
    pub fn highlighted(&self) -> Option<&EvidenceKey> {
        self.highlight.as_ref().map(|h| &h.key)
    }

    /// Where the player is in the story.
    pub fn status(&self) -> SessionStatus {
        match (self.phase(), self.ending_choice().resolution()) {
            (SessionPhase::Ending, Some(resolution)) => SessionStatus::Concluded { resolution },
            (SessionPhase::Ending, None) => SessionStatus::AwaitingChoice,
            (SessionPhase::Playing, _) if !self.confession_raised() => {
                SessionStatus::Interrogating {
                    stage: self.step_index() + 1,
                    stages: self.catalog.step_count(),
                }
            }
            (SessionPhase::Playing, _) if !self.evidence_complete() => SessionStatus::Searching {
                found: self.found_count(),
                total: self.total_evidence(),
            },
            (SessionPhase::Playing, _) => SessionStatus::ReadyForVerdict,
        }
    }

    /// Everything the presentation reads, in one serializable value.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(self)
    }

    /// Drain the events produced since the last call.
    ///
    /// At most [`MAX_QUEUED_EVENTS`] are kept between drains; older ones are dropped.
    pub fn take_events(&mut self) -> Vec<NarrativeEvent> {
        self.events.drain(..).collect()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn emit(&mut self, event: NarrativeEvent) {
        if self.events.len() >= MAX_QUEUED_EVENTS {
            self.events.pop_front();
            tracing::warn!(session = %self.id, "event queue full, dropping oldest event");
        }
        self.events.push_back(event);
    }

    fn record_evidence(&mut self, thread: &ThreadId, message: MessageId, is_evidence: bool) {
        let was_unlocked = self.is_unlocked();

        let Some(key) = self.evidence.record_if_evidence(thread, message, is_evidence) else {
            return;
        };

        tracing::info!(
            session = %self.id,
            key = %key,
            found = self.found_count(),
            total = self.total_evidence(),
            "evidence found"
        );

        self.set_highlight(key.clone());
        self.emit(NarrativeEvent::EvidenceFound { key });
        self.note_unlock(was_unlocked);
    }

    fn set_highlight(&mut self, key: EvidenceKey) {
        if let Some(previous) = self.highlight.take() {
            self.scheduler.cancel(previous.timer);
        }
        let timer = self
            .scheduler
            .schedule_once(self.config.highlight_duration(), TimerAction::ClearHighlight);
        self.highlight = Some(Highlight { key, timer });
    }

    fn note_unlock(&mut self, was_unlocked: bool) {
        if !was_unlocked && self.is_unlocked() {
            tracing::info!(session = %self.id, "session unlocked");
            self.emit(NarrativeEvent::SessionUnlocked);
        }
    }

    fn apply_timer(&mut self, action: TimerAction, times: u64) {
        match action {
            TimerAction::SettleAnswer { correct } => self.settle_answer(correct),
            TimerAction::RevealFile => {
                if self.ending.reveal_file() {
                    tracing::info!(session = %self.id, "secret file revealed");
                    self.emit(NarrativeEvent::FileRevealed);
                    self.scheduler
                        .schedule_once(self.config.alarm_delay(), TimerAction::RaiseAlarm);
                }
            }
            TimerAction::RaiseAlarm => {
                if self.ending.raise_alarm() {
                    tracing::info!(session = %self.id, "alarm raised");
                    self.emit(NarrativeEvent::AlarmRaised);
                    self.scheduler
                        .schedule_repeating(self.config.flash_period(), TimerAction::ToggleFlash);
                }
            }
            TimerAction::ToggleFlash => {
                if times % 2 == 1 {
                    self.ending.toggle_flash();
                }
            }
            TimerAction::ClearHighlight => {
                self.highlight = None;
            }
        }
    }

    fn settle_answer(&mut self, correct: bool) {
        let was_unlocked = self.is_unlocked();

        match self.dialogue.settle(correct, self.catalog.step_count()) {
            Settlement::Advanced { step } => {
                tracing::debug!(session = %self.id, step, "dialogue advanced");
                self.emit(NarrativeEvent::StepAdvanced { step });
            }
            Settlement::Confessed => {
                tracing::info!(session = %self.id, "confession raised");
                self.emit(NarrativeEvent::ConfessionRaised);
                self.note_unlock(was_unlocked);
            }
            Settlement::Reset => {
                tracing::debug!(session = %self.id, "wrong answer, interrogation reset");
                self.emit(NarrativeEvent::InterrogationReset);
            }
            Settlement::Stale => {
                tracing::debug!(session = %self.id, "stale answer timer");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_content::{CatalogSource, ChatThread, Contact, DialogueOption, Message};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn test_catalog() -> Arc<Catalog> {
        let source = CatalogSource::new("Test case", "Tima")
            .with_step(
                DialogueStep::new("What?")
                    .with_option(DialogueOption::wrong("Nothing."))
                    .with_option(DialogueOption::correct("Talk.")),
            )
            .with_step(
                DialogueStep::new("Fine.")
                    .with_option(DialogueOption::correct("Now."))
                    .with_option(DialogueOption::wrong("Later.")),
            )
            .with_thread(
                ChatThread::new("mika", Contact::new("Mika"))
                    .with_message(Message::new(1, "Mika", "hey"))
                    .with_message(Message::new(2, "Mika", "last night was fun").evidence()),
            )
            .with_thread(
                ChatThread::new("boss", Contact::new("Boss"))
                    .with_message(Message::new(1, "Boss", "the hotel is booked").evidence())
                    .with_message(Message::new(2, "Tima", "shh").from_subject().evidence()),
            );
        Arc::new(Catalog::try_from(source).unwrap())
    }

    fn session() -> Session {
        Session::with_defaults(test_catalog()).unwrap()
    }

    fn thread(id: &str) -> ThreadId {
        ThreadId::new(id)
    }

    fn confess(session: &mut Session) {
        session.submit_answer(true);
        session.advance(ms(800));
        session.submit_answer(true);
        session.advance(ms(800));
        assert!(session.confession_raised());
    }

    fn find_all(session: &mut Session) {
        session.tap_message(&thread("mika"), MessageId(2));
        session.tap_message(&thread("boss"), MessageId(1));
        session.tap_message(&thread("boss"), MessageId(2));
        assert!(session.evidence_complete());
    }

    fn at_ending() -> Session {
        let mut session = session();
        confess(&mut session);
        find_all(&mut session);
        session.trigger_verdict();
        assert_eq!(session.phase(), SessionPhase::Ending);
        session
    }

    #[test]
    fn test_initial_state() {
        let session = session();
        assert_eq!(session.step_index(), 0);
        assert_eq!(session.current_step().unwrap().line, "What?");
        assert!(!session.confession_raised());
        assert_eq!(session.found_count(), 0);
        assert_eq!(session.total_evidence(), 3);
        assert!(!session.is_unlocked());
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.ending_choice(), EndingChoice::Undecided);
        assert_eq!(session.pending_timers(), 0);
    }

    #[test]
    fn test_zero_flash_period_rejected() {
        let config = SessionConfig {
            flash_period_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            Session::new(test_catalog(), config),
            Err(SessionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_correct_answer_waits_for_reveal_delay() {
        let mut session = session();
        session.submit_answer(true);

        assert!(session.is_in_transition());
        session.advance(ms(799));
        assert_eq!(session.step_index(), 0);

        session.advance(ms(1));
        assert_eq!(session.step_index(), 1);
        assert!(!session.is_in_transition());
    }

    #[test]
    fn test_wrong_answer_flags_then_resets() {
        let mut session = session();
        session.submit_answer(true);
        session.advance(ms(800));

        session.submit_answer(false);
        assert!(session.is_wrong_answer());
        assert_eq!(session.step_index(), 1);

        session.advance(ms(1499));
        assert!(session.is_wrong_answer());

        session.advance(ms(1));
        assert!(!session.is_wrong_answer());
        assert_eq!(session.step_index(), 0);
        assert!(!session.confession_raised());
    }

    #[test]
    fn test_rapid_submissions_are_serialized() {
        let mut session = session();
        session.submit_answer(true);
        session.submit_answer(false);
        session.submit_answer(true);

        assert_eq!(session.pending_timers(), 1);
        assert!(!session.is_wrong_answer());

        session.advance(ms(800));
        assert_eq!(session.step_index(), 1);
    }

    #[test]
    fn test_choose_option_uses_current_step() {
        let mut session = session();
        session.choose_option(1);
        session.advance(ms(800));
        assert_eq!(session.step_index(), 1);

        // Option 1 of the second step is wrong.
        session.choose_option(1);
        assert!(session.is_wrong_answer());

        session.advance(ms(1500));
        session.choose_option(7);
        assert!(!session.is_in_transition());
    }

    #[test]
    fn test_confession_line() {
        let mut session = session();
        assert!(session.confession_line().is_none());

        confess(&mut session);
        assert!(session.current_step().is_none());
        assert_eq!(
            session.confession_line(),
            Some(session.catalog().epilogue().confession.as_str())
        );
    }

    #[test]
    fn test_wrong_answer_keeps_evidence() {
        let mut session = session();
        session.tap_message(&thread("mika"), MessageId(2));

        session.submit_answer(false);
        session.advance(ms(1500));

        assert_eq!(session.found_count(), 1);
    }

    #[test]
    fn test_tap_ordinary_message() {
        let mut session = session();
        session.tap_message(&thread("mika"), MessageId(1));
        session.message_tapped(&thread("mika"), MessageId(1), false);

        assert_eq!(session.found_count(), 0);
        assert!(session.take_events().is_empty());
        assert!(session.highlighted().is_none());
    }

    #[test]
    fn test_caller_cannot_forge_evidence() {
        let mut session = session();
        session.message_tapped(&thread("mika"), MessageId(1), true);
        session.message_tapped(&thread("ghost"), MessageId(9), true);
        session.tap_message(&thread("ghost"), MessageId(9));

        assert_eq!(session.found_count(), 0);
    }

    #[test]
    fn test_duplicate_taps_count_once() {
        let mut session = session();
        for _ in 0..3 {
            session.message_tapped(&thread("boss"), MessageId(1), true);
        }

        assert_eq!(session.found_count(), 1);
        let found: Vec<_> = session
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, NarrativeEvent::EvidenceFound { .. }))
            .collect();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_highlight_expires() {
        let mut session = session();
        session.tap_message(&thread("boss"), MessageId(1));
        assert_eq!(
            session.highlighted(),
            Some(&EvidenceKey::new("boss", MessageId(1)))
        );

        session.advance(ms(1500));
        assert!(session.highlighted().is_none());
    }

    #[test]
    fn test_newer_highlight_replaces_older() {
        let mut session = session();
        session.tap_message(&thread("boss"), MessageId(1));
        session.advance(ms(1000));
        session.tap_message(&thread("boss"), MessageId(2));

        // The first highlight timer would have fired here.
        session.advance(ms(600));
        assert_eq!(
            session.highlighted(),
            Some(&EvidenceKey::new("boss", MessageId(2)))
        );

        session.advance(ms(900));
        assert!(session.highlighted().is_none());
    }

    #[test]
    fn test_repeat_tap_does_not_highlight() {
        let mut session = session();
        session.tap_message(&thread("boss"), MessageId(1));
        session.advance(ms(1500));

        session.tap_message(&thread("boss"), MessageId(1));
        assert!(session.highlighted().is_none());
    }

    #[test]
    fn test_unlock_requires_both_conditions() {
        let mut session = session();
        find_all(&mut session);
        assert!(!session.is_unlocked());

        confess(&mut session);
        assert!(session.is_unlocked());

        let events = session.take_events();
        assert_eq!(
            events
                .iter()
                .filter(|e| **e == NarrativeEvent::SessionUnlocked)
                .count(),
            1
        );
    }

    #[test]
    fn test_verdict_ignored_while_locked() {
        let mut session = session();
        confess(&mut session);
        session.trigger_verdict();
        assert_eq!(session.phase(), SessionPhase::Playing);
    }

    #[test]
    fn test_choose_ending_before_verdict_ignored() {
        let mut session = session();
        session.choose_ending(Resolution::RevealFile);
        assert_eq!(session.ending_choice(), EndingChoice::Undecided);
        assert_eq!(session.pending_timers(), 0);
    }

    #[test]
    fn test_forgive_is_terminal() {
        let mut session = at_ending();
        session.choose_ending(Resolution::Forgive);
        session.choose_ending(Resolution::RevealFile);

        assert_eq!(session.ending_choice(), EndingChoice::Forgive);
        session.advance(ms(10_000));
        assert_eq!(session.file_reveal(), FileRevealState::default());
        assert_eq!(
            session.status(),
            SessionStatus::Concluded {
                resolution: Resolution::Forgive
            }
        );
    }

    #[test]
    fn test_reveal_file_sequence() {
        let mut session = at_ending();
        session.choose_ending(Resolution::RevealFile);

        session.advance(ms(1999));
        assert!(!session.file_reveal().revealed);

        session.advance(ms(1));
        assert!(session.file_reveal().revealed);
        assert!(!session.file_reveal().alarm_active);

        session.advance(ms(2000));
        assert!(session.file_reveal().alarm_active);
        assert!(session.file_reveal().flashing);

        session.advance(ms(300));
        assert!(!session.file_reveal().flashing);
        session.advance(ms(300));
        assert!(session.file_reveal().flashing);

        // An even number of periods leaves the flash where it was.
        session.advance(ms(1200));
        assert!(session.file_reveal().flashing);
    }

    #[test]
    fn test_restart_cancels_flashing() {
        let mut session = at_ending();
        session.choose_ending(Resolution::RevealFile);
        session.advance(ms(4000));
        assert!(session.file_reveal().alarm_active);

        session.restart();
        assert_eq!(session.pending_timers(), 0);

        session.advance(ms(10_000));
        assert_eq!(session.file_reveal(), FileRevealState::default());
        assert_eq!(session.phase(), SessionPhase::Playing);
    }

    #[test]
    fn test_restart_cancels_pending_answer() {
        let mut session = session();
        session.submit_answer(true);
        session.restart();

        session.advance(ms(800));
        assert_eq!(session.step_index(), 0);
        assert!(!session.is_in_transition());
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut session = at_ending();
        session.choose_ending(Resolution::RevealFile);
        session.advance(ms(2500));

        session.restart();

        assert_eq!(session.step_index(), 0);
        assert!(!session.confession_raised());
        assert!(!session.is_wrong_answer());
        assert!(!session.is_in_transition());
        assert_eq!(session.found_count(), 0);
        assert!(!session.is_unlocked());
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.ending_choice(), EndingChoice::Undecided);
        assert_eq!(session.file_reveal(), FileRevealState::default());
        assert!(session.highlighted().is_none());
    }

    #[test]
    fn test_teardown_stops_timers_but_keeps_state() {
        let mut session = at_ending();
        session.choose_ending(Resolution::RevealFile);
        session.advance(ms(4000));
        let frozen = session.file_reveal();

        session.teardown();
        session.advance(ms(3000));

        assert_eq!(session.pending_timers(), 0);
        assert_eq!(session.file_reveal(), frozen);
        assert_eq!(session.ending_choice(), EndingChoice::RevealFile);
    }

    #[test]
    fn test_teardown_closes_pending_answer() {
        let mut session = session();
        session.submit_answer(false);
        assert!(session.is_wrong_answer());

        session.teardown();
        session.advance(ms(5000));
        assert!(!session.is_wrong_answer());
        assert!(!session.is_in_transition());
        assert_eq!(session.step_index(), 0);

        session.submit_answer(true);
        session.advance(ms(5000));
        assert_eq!(session.step_index(), 1);
    }

    #[test]
    fn test_advance_to_end_of_time() {
        let mut session = at_ending();
        session.choose_ending(Resolution::RevealFile);
        session.advance(ms(4000));
        assert!(session.file_reveal().flashing);

        session.advance(Duration::MAX);
        assert!(session.file_reveal().alarm_active);
        assert_eq!(session.elapsed(), Duration::MAX);
        assert_eq!(session.pending_timers(), 0);

        session.advance(Duration::MAX);
        assert_eq!(session.elapsed(), Duration::MAX);
        assert_eq!(session.snapshot().elapsed_ms, u64::MAX);
    }

    #[test]
    fn test_flash_catch_up_keeps_phase() {
        let mut session = at_ending();
        session.choose_ending(Resolution::RevealFile);
        session.advance(ms(4000));

        // Three periods in one call end up where three single steps would.
        session.advance(ms(900));
        assert!(!session.file_reveal().flashing);
        session.advance(ms(300));
        assert!(session.file_reveal().flashing);
    }

    #[test]
    fn test_event_queue_is_bounded() {
        let mut session = session();
        for _ in 0..MAX_QUEUED_EVENTS {
            session.submit_answer(false);
            session.advance(ms(1500));
        }

        let events = session.take_events();
        assert_eq!(events.len(), MAX_QUEUED_EVENTS);
        assert_eq!(events.last(), Some(&NarrativeEvent::InterrogationReset));
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_status_progression() {
        let mut session = session();
        assert_eq!(
            session.status(),
            SessionStatus::Interrogating {
                stage: 1,
                stages: 2
            }
        );

        confess(&mut session);
        assert_eq!(
            session.status(),
            SessionStatus::Searching { found: 0, total: 3 }
        );

        find_all(&mut session);
        assert_eq!(session.status(), SessionStatus::ReadyForVerdict);

        session.trigger_verdict();
        assert_eq!(session.status(), SessionStatus::AwaitingChoice);
    }

    #[test]
    fn test_next_timer_in() {
        let mut session = session();
        assert_eq!(session.next_timer_in(), None);

        session.submit_answer(false);
        session.advance(ms(500));
        assert_eq!(session.next_timer_in(), Some(ms(1000)));
    }

    #[test]
    fn test_event_sequence() {
        let mut session = session();
        session.submit_answer(true);
        session.advance(ms(800));
        session.submit_answer(false);
        session.advance(ms(1500));

        assert_eq!(
            session.take_events(),
            vec![
                NarrativeEvent::AnswerAccepted {
                    step: 0,
                    correct: true
                },
                NarrativeEvent::StepAdvanced { step: 1 },
                NarrativeEvent::AnswerAccepted {
                    step: 1,
                    correct: false
                },
                NarrativeEvent::InterrogationReset,
            ]
        );
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_builtin_session() {
        let session = Session::builtin().unwrap();
        assert_eq!(session.catalog().step_count(), 3);
        assert!(session.current_step().is_some());
    }
}
