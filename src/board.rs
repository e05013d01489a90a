//! The answer board
//!
//! [`AnswerBoard`] is the per-client state behind the answer screen of a
//! single question. It receives snapshots of the shared game document,
//! keeps the local player's optimistic selection, forwards taps to the
//! store, and projects everything into a [`BoardView`] for rendering.

use itertools::Itertools;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{
    game_id::GameId,
    phase::GamePhase,
    player::{PlayerId, Role},
    question::{GuessVector, Question},
    selection,
    session::{Authenticator, GuessStore, GuessSubmission, SubmitError, submit_guess},
    tally,
    visual::{self, Feedback, VisualState},
};

/// Runtime configuration for a board
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Origin the share link is built from, e.g. `https://quiz.example.com`
    #[serde(default)]
    pub origin: String,
}

/// One snapshot of the shared game document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// The current game phase
    pub phase: GamePhase,
    /// The live question
    pub question: Question,
}

impl GameSnapshot {
    /// Parses a snapshot from the store's JSON document
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the document does not have the
    /// expected shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// What happened to a tap
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TapOutcome {
    /// The phase or role does not accept selections, nothing changed
    Ignored,
    /// The selection changed and the store accepted it
    Submitted,
    /// The selection changed locally but the submission failed
    ///
    /// The local selection is kept.
    SubmitFailed(SubmitError),
}

/// Display data for a single answer option
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionView {
    /// The answer text
    pub text: String,
    /// Whether the local player selected this answer
    pub selected: bool,
    /// How the answer should be styled
    pub state: VisualState,
    /// Number of players who selected this answer
    pub count: usize,
    /// `count` as a percentage of responders
    pub percentage: f64,
    /// Width to draw the tally bar at, in percent
    pub bar_width: f64,
    /// Personalised feedback, players only
    pub feedback: Option<Feedback>,
}

/// Everything needed to render the answer screen
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    /// The question text
    pub prompt: String,
    /// The phase the view was computed for
    pub phase: GamePhase,
    /// "Pick N answers" hint, shown until the reveal
    pub pick_guidance: Option<String>,
    /// Explanation, shown with the correct answers
    pub explanation: Option<String>,
    /// Join link for the QR code
    pub share_link: String,
    /// Number of players who have answered
    pub responders: usize,
    /// One entry per answer, in question order
    pub options: Vec<OptionView>,
}

/// Per-client state of the answer screen
#[derive(Debug, Clone)]
pub struct AnswerBoard {
    game_id: GameId,
    player: PlayerId,
    role: Role,
    config: BoardConfig,

    phase: GamePhase,
    question: Question,
    /// Selection of the local player, `None` until a question has been seen
    local_guess: Option<GuessVector>,
    /// Set by a tap until a snapshot echoes `local_guess` back
    pending: bool,
}

impl AnswerBoard {
    /// Creates a board for `player` in game `game_id`
    pub fn new(game_id: GameId, player: PlayerId, role: Role, config: BoardConfig) -> Self {
        Self {
            game_id,
            player,
            role,
            config,
            phase: GamePhase::default(),
            question: Question::default(),
            local_guess: None,
            pending: false,
        }
    }

    /// Creates a board for the user currently signed in with `auth`
    pub fn for_current_user<A: Authenticator + ?Sized>(
        game_id: GameId,
        auth: &A,
        role: Role,
        config: BoardConfig,
    ) -> Self {
        Self::new(game_id, auth.current_user_id(), role, config)
    }

    /// The game this board belongs to
    pub fn game_id(&self) -> &GameId {
        &self.game_id
    }

    /// The current phase
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// The latest question snapshot, including the local guess
    pub fn question(&self) -> &Question {
        &self.question
    }

    /// The local player's current selection
    ///
    /// All answers are unselected until the player taps one.
    pub fn local_guess(&self) -> GuessVector {
        self.local_guess
            .clone()
            .unwrap_or_else(|| GuessVector::empty(self.question.answer_count()))
    }

    /// Replaces the board state with a newer snapshot
    ///
    /// The local selection follows the snapshot's entry for the player,
    /// all unselected when there is none. The one exception is a tap the
    /// store has not echoed back yet: that selection is kept and written
    /// into the snapshot so the tally shows it. A new question, or a phase
    /// that reopens answering, drops any pending tap.
    pub fn apply_snapshot(&mut self, snapshot: GameSnapshot) {
        let GameSnapshot { phase, mut question } = snapshot;

        if let Err(e) = question.check() {
            warn!("game {} published an inconsistent question: {e}", self.game_id);
        }

        let is_new_question =
            self.local_guess.is_none() || !self.question.is_same_question(&question);
        let reopened = phase.accepts_answers() && !self.phase.accepts_answers();

        if is_new_question {
            info!(
                "game {} showing question with {} answers",
                self.game_id,
                question.answer_count()
            );
        }

        if self.pending && !is_new_question && !reopened {
            let guess = self.local_guess();
            if question.player_guesses.get(&self.player) == Some(&guess) {
                self.pending = false;
            } else {
                question.record_guess(self.player.clone(), guess);
            }
        } else {
            self.pending = false;
            self.local_guess = Some(question.guess_for(&self.player));
        }

        debug!(
            "game {} snapshot applied: phase {phase:?}, {} responders",
            self.game_id,
            tally::responders(&question)
        );

        self.phase = phase;
        self.question = question;
    }

    /// Handles a tap on answer `index`
    ///
    /// When the selection changes it is applied locally first and then
    /// submitted. A failed submission is logged and reported through the
    /// outcome, the local selection is not rolled back.
    ///
    /// # Errors
    ///
    /// Returns [`selection::Error::IndexOutOfRange`] when `index` is not an
    /// answer on the current question.
    pub fn tap<A: Authenticator + ?Sized, S: GuessStore + ?Sized>(
        &mut self,
        index: usize,
        auth: &A,
        store: &S,
    ) -> Result<TapOutcome, selection::Error> {
        let current = self.local_guess();
        let next = selection::toggle(&current, index, self.phase)?;

        if self.role == Role::Presenter || next == current {
            debug!(
                "game {} ignoring tap on {index} in phase {:?}",
                self.game_id, self.phase
            );
            return Ok(TapOutcome::Ignored);
        }

        self.local_guess = Some(next.clone());
        self.pending = true;
        self.question.record_guess(self.player.clone(), next.clone());

        let submission = GuessSubmission {
            guess_vector: next,
            game_id: self.game_id.clone(),
        };
        debug!("game {} submitting {}", self.game_id, submission.to_message());

        match submit_guess(auth, store, &submission) {
            Ok(()) => {
                debug!("game {} guess submitted for {}", self.game_id, self.player);
                Ok(TapOutcome::Submitted)
            }
            Err(e) => {
                warn!(
                    "game {} failed to submit guess for {}: {e}",
                    self.game_id, self.player
                );
                Ok(TapOutcome::SubmitFailed(e))
            }
        }
    }

    /// Projects the current state for rendering
    pub fn view(&self) -> BoardView {
        let guess = self.local_guess();
        let reveal = self.phase.reveals_correctness();

        let options = self
            .question
            .answers
            .iter()
            .zip(tally::tally(&self.question))
            .enumerate()
            .map(|(index, (answer, option_tally))| {
                let selected = guess.is_selected(index);
                let state = visual::classify(answer, selected, self.phase);
                OptionView {
                    text: answer.text.clone(),
                    selected,
                    state,
                    count: option_tally.count,
                    percentage: option_tally.percentage,
                    bar_width: tally::bar_width(option_tally.percentage),
                    feedback: visual::feedback(state, self.role),
                }
            })
            .collect_vec();

        BoardView {
            prompt: self.question.prompt.clone(),
            phase: self.phase,
            pick_guidance: (!reveal)
                .then(|| visual::pick_guidance(visual::total_correct_options(&self.question))),
            explanation: (reveal && !self.question.explanation.is_empty())
                .then(|| self.question.explanation.clone()),
            share_link: self.game_id.share_link(&self.config.origin),
            responders: tally::responders(&self.question),
            options,
        }
    }

    /// Applies a snapshot pushed by the store and returns the new view
    ///
    /// Intended to be registered as the store subscription callback.
    pub fn on_snapshot(&mut self, snapshot: GameSnapshot) -> BoardView {
        self.apply_snapshot(snapshot);
        self.view()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::{
        question::Answer,
        session::tests::{MockAuth, MockStore},
    };

    fn create_test_question() -> Question {
        Question::new(
            "Which of these is a mammal?",
            "Dolphins breathe air and nurse their young.",
            vec![
                Answer::new("Shark", false),
                Answer::new("Dolphin", true),
                Answer::new("Octopus", false),
                Answer::new("Salmon", false),
            ],
        )
    }

    fn create_test_board(role: Role) -> AnswerBoard {
        AnswerBoard::new(
            GameId::new("game-1"),
            PlayerId::new("alice"),
            role,
            BoardConfig {
                origin: "https://quiz.example.com".to_string(),
            },
        )
    }

    fn snapshot(phase: GamePhase, question: Question) -> GameSnapshot {
        GameSnapshot { phase, question }
    }

    #[test]
    fn test_tap_toggles_and_submits() {
        let mut board = create_test_board(Role::Player);
        let auth = MockAuth::signed_in("alice");
        let store = MockStore::default();
        board.apply_snapshot(snapshot(GamePhase::AwaitingPlayerAnswers, create_test_question()));

        assert_eq!(board.tap(2, &auth, &store), Ok(TapOutcome::Submitted));
        assert_eq!(*board.local_guess(), vec![false, false, true, false]);
        {
            let submissions = store.submissions.borrow();
            assert_eq!(submissions.len(), 1);
            assert_eq!(submissions[0].0, "token-alice");
            assert_eq!(
                submissions[0].1,
                GuessSubmission {
                    guess_vector: vec![false, false, true, false].into(),
                    game_id: GameId::new("game-1"),
                }
            );
        }

        assert_eq!(board.tap(2, &auth, &store), Ok(TapOutcome::Submitted));
        assert_eq!(*board.local_guess(), vec![false; 4]);
        assert_eq!(store.submissions.borrow().len(), 2);
    }

    #[test]
    fn test_tap_ignored_outside_answer_phase() {
        let mut board = create_test_board(Role::Player);
        let auth = MockAuth::signed_in("alice");
        let store = MockStore::default();
        board.apply_snapshot(snapshot(GamePhase::ShowingCorrectAnswers, create_test_question()));

        assert_eq!(board.tap(1, &auth, &store), Ok(TapOutcome::Ignored));
        assert_eq!(board.local_guess().selected_count(), 0);
        assert!(store.submissions.borrow().is_empty());
    }

    #[test]
    fn test_tap_ignored_for_presenter() {
        let mut board = create_test_board(Role::Presenter);
        let auth = MockAuth::signed_in("alice");
        let store = MockStore::default();
        board.apply_snapshot(snapshot(GamePhase::AwaitingPlayerAnswers, create_test_question()));

        assert_eq!(board.tap(1, &auth, &store), Ok(TapOutcome::Ignored));
        assert!(store.submissions.borrow().is_empty());
    }

    #[test]
    fn test_tap_out_of_range() {
        let mut board = create_test_board(Role::Player);
        let auth = MockAuth::signed_in("alice");
        let store = MockStore::default();
        board.apply_snapshot(snapshot(GamePhase::AwaitingPlayerAnswers, create_test_question()));

        assert_eq!(
            board.tap(4, &auth, &store),
            Err(selection::Error::IndexOutOfRange { index: 4, len: 4 })
        );
        assert!(store.submissions.borrow().is_empty());
    }

    #[test]
    fn test_tap_keeps_selection_when_submission_fails() {
        let mut board = create_test_board(Role::Player);
        let auth = MockAuth::signed_in("alice");
        let store = MockStore::rejecting();
        board.apply_snapshot(snapshot(GamePhase::AwaitingPlayerAnswers, create_test_question()));

        let outcome = board.tap(0, &auth, &store).unwrap();

        assert!(matches!(
            outcome,
            TapOutcome::SubmitFailed(SubmitError::Store(_))
        ));
        assert!(board.local_guess().is_selected(0));
        assert!(board.view().options[0].selected);
    }

    #[test]
    fn test_tap_with_auth_failure_keeps_selection() {
        let mut board = create_test_board(Role::Player);
        let auth = MockAuth::failing("alice");
        let store = MockStore::default();
        board.apply_snapshot(snapshot(GamePhase::AwaitingPlayerAnswers, create_test_question()));

        let outcome = board.tap(3, &auth, &store).unwrap();

        assert!(matches!(
            outcome,
            TapOutcome::SubmitFailed(SubmitError::Auth(_))
        ));
        assert!(board.local_guess().is_selected(3));
        assert!(store.submissions.borrow().is_empty());
    }

    #[test]
    fn test_local_guess_seeded_from_snapshot() {
        let mut board = create_test_board(Role::Player);
        let mut question = create_test_question();
        question.record_guess(PlayerId::new("alice"), vec![false, true, false, false].into());

        board.apply_snapshot(snapshot(GamePhase::AwaitingPlayerAnswers, question));

        assert_eq!(*board.local_guess(), vec![false, true, false, false]);
    }

    #[test]
    fn test_stale_snapshot_keeps_optimistic_selection() {
        let mut board = create_test_board(Role::Player);
        let auth = MockAuth::signed_in("alice");
        let store = MockStore::default();
        board.apply_snapshot(snapshot(GamePhase::AwaitingPlayerAnswers, create_test_question()));
        board.tap(1, &auth, &store).unwrap();

        let mut stale = create_test_question();
        stale.record_guess(PlayerId::new("bob"), vec![true, false, false, false].into());
        let view = board.on_snapshot(snapshot(GamePhase::AwaitingPlayerAnswers, stale));

        assert!(board.local_guess().is_selected(1));
        assert!(view.options[1].selected);
        assert_eq!(view.responders, 2);
        assert_eq!(view.options[1].count, 1);
    }

    fn true_false(prompt: &str) -> Question {
        Question::new(
            prompt,
            "",
            vec![Answer::new("True", true), Answer::new("False", false)],
        )
    }

    #[test]
    fn test_consecutive_questions_with_same_answers_reset_selection() {
        let mut board = create_test_board(Role::Player);
        let auth = MockAuth::signed_in("alice");
        let store = MockStore::default();
        board.apply_snapshot(snapshot(
            GamePhase::AwaitingPlayerAnswers,
            true_false("The sun is a star."),
        ));
        board.tap(0, &auth, &store).unwrap();

        let view = board.on_snapshot(snapshot(
            GamePhase::AwaitingPlayerAnswers,
            true_false("Bats are birds."),
        ));

        assert_eq!(*board.local_guess(), vec![false, false]);
        assert!(!view.options[0].selected);
        assert_eq!(view.options[0].count, 0);
        assert_eq!(view.responders, 0);
        assert!(!board.question().has_guess(&PlayerId::new("alice")));
    }

    #[test]
    fn test_reopened_answering_adopts_snapshot_selection() {
        let mut board = create_test_board(Role::Player);
        let auth = MockAuth::signed_in("alice");
        let store = MockStore::default();
        board.apply_snapshot(snapshot(GamePhase::AwaitingPlayerAnswers, true_false("Same?")));
        board.tap(1, &auth, &store).unwrap();

        board.apply_snapshot(snapshot(GamePhase::ShowingLeaderboard, true_false("Same?")));
        let view = board.on_snapshot(snapshot(
            GamePhase::AwaitingPlayerAnswers,
            true_false("Same?"),
        ));

        assert_eq!(*board.local_guess(), vec![false, false]);
        assert!(!view.options[1].selected);
        assert_eq!(view.responders, 0);
    }

    #[test]
    fn test_snapshot_guess_wins_without_pending_tap() {
        let mut board = create_test_board(Role::Player);
        board.apply_snapshot(snapshot(GamePhase::AwaitingPlayerAnswers, true_false("Q")));

        let mut from_other_device = true_false("Q");
        from_other_device.record_guess(PlayerId::new("alice"), vec![true, false].into());
        let view = board.on_snapshot(snapshot(GamePhase::AwaitingPlayerAnswers, from_other_device));

        assert_eq!(*board.local_guess(), vec![true, false]);
        assert!(view.options[0].selected);
        assert_eq!(view.options[0].count, 1);
        assert_eq!(view.responders, 1);
    }

    #[test]
    fn test_echoed_tap_clears_pending_selection() {
        let mut board = create_test_board(Role::Player);
        let auth = MockAuth::signed_in("alice");
        let store = MockStore::default();
        board.apply_snapshot(snapshot(GamePhase::AwaitingPlayerAnswers, true_false("Q")));
        board.tap(0, &auth, &store).unwrap();

        let mut echoed = true_false("Q");
        echoed.record_guess(PlayerId::new("alice"), vec![true, false].into());
        board.apply_snapshot(snapshot(GamePhase::AwaitingPlayerAnswers, echoed));

        let mut changed_elsewhere = true_false("Q");
        changed_elsewhere.record_guess(PlayerId::new("alice"), vec![false, true].into());
        let view = board.on_snapshot(snapshot(GamePhase::AwaitingPlayerAnswers, changed_elsewhere));

        assert_eq!(*board.local_guess(), vec![false, true]);
        assert!(view.options[1].selected);
        assert_eq!(view.options[0].count, 0);
    }

    #[test]
    fn test_new_question_resets_selection() {
        let mut board = create_test_board(Role::Player);
        let auth = MockAuth::signed_in("alice");
        let store = MockStore::default();
        board.apply_snapshot(snapshot(GamePhase::AwaitingPlayerAnswers, create_test_question()));
        board.tap(1, &auth, &store).unwrap();

        let next = Question::new(
            "Next one",
            "",
            vec![Answer::new("Yes", true), Answer::new("No", false)],
        );
        board.apply_snapshot(snapshot(GamePhase::ShowingQuestion, next));

        assert_eq!(*board.local_guess(), vec![false, false]);
    }

    #[test]
    fn test_view_tally_scenario() {
        let mut board = create_test_board(Role::Presenter);
        let mut question = create_test_question();
        question.record_guess(PlayerId::new("p1"), vec![true, false, false, false].into());
        question.record_guess(PlayerId::new("p2"), vec![false, true, false, false].into());
        question.record_guess(PlayerId::new("p3"), vec![true, true, false, false].into());

        let view = board.on_snapshot(snapshot(GamePhase::AwaitingPlayerAnswers, question));

        assert_eq!(view.responders, 3);
        assert_eq!(
            view.options.iter().map(|o| o.count).collect_vec(),
            vec![2, 2, 0, 0]
        );
        assert!((view.options[0].percentage - 66.7).abs() < 0.1);
        assert!((view.options[2].bar_width - 2.).abs() < f64::EPSILON);
        assert_eq!(view.pick_guidance.as_deref(), Some("Pick 1 answer"));
        assert_eq!(view.explanation, None);
        assert_eq!(view.share_link, "https://quiz.example.com/game/game-1");
    }

    #[test]
    fn test_view_reveal_for_player() {
        let mut board = create_test_board(Role::Player);
        let mut question = create_test_question();
        question.record_guess(PlayerId::new("alice"), vec![true, false, false, false].into());

        let view = board.on_snapshot(snapshot(GamePhase::ShowingCorrectAnswers, question));

        assert_eq!(view.options[0].state, VisualState::SelectedIncorrect);
        assert_eq!(view.options[1].state, VisualState::UnselectedMissedCorrect);
        assert_eq!(view.options[1].feedback, Some(Feedback::Missed));
        assert_eq!(view.options[2].state, VisualState::UnselectedNeutral);
        assert_eq!(view.pick_guidance, None);
        assert_eq!(
            view.explanation.as_deref(),
            Some("Dolphins breathe air and nurse their young.")
        );
    }

    #[test]
    fn test_view_reveal_for_presenter_has_no_feedback() {
        let mut board = create_test_board(Role::Presenter);
        let mut question = create_test_question();
        question.record_guess(PlayerId::new("bob"), vec![false, true, false, false].into());

        let view = board.on_snapshot(snapshot(GamePhase::ShowingCorrectAnswers, question));

        assert_eq!(view.options[1].state, VisualState::UnselectedMissedCorrect);
        assert_eq!(view.options[1].count, 1);
        assert!(view.options.iter().all(|o| o.feedback.is_none()));
    }

    #[test]
    fn test_view_before_any_snapshot() {
        let board = create_test_board(Role::Player);
        let view = board.view();

        assert!(view.options.is_empty());
        assert_eq!(view.responders, 0);
        assert_eq!(view.phase, GamePhase::WaitingForPlayers);
    }

    #[test]
    fn test_for_current_user_uses_auth_identity() {
        let auth = MockAuth::signed_in("carol");
        let mut board = AnswerBoard::for_current_user(
            GameId::new("g"),
            &auth,
            Role::Player,
            BoardConfig::default(),
        );
        let store = MockStore::default();
        board.apply_snapshot(snapshot(GamePhase::AwaitingPlayerAnswers, create_test_question()));
        board.tap(0, &auth, &store).unwrap();

        assert!(board.question().has_guess(&PlayerId::new("carol")));
        assert_eq!(board.game_id(), &GameId::new("g"));
    }

    #[test]
    fn test_snapshot_from_store_json() {
        let json = r#"{
            "phase": "AWAITING_PLAYER_ANSWERS",
            "question": {
                "prompt": "2 + 2?",
                "explanation": "",
                "answers": [
                    {"text": "3", "isCorrect": false},
                    {"text": "4", "isCorrect": true}
                ],
                "playerGuesses": {"bob": [false, true]}
            }
        }"#;
        let snapshot = GameSnapshot::from_json(json).unwrap();

        assert_eq!(snapshot.phase, GamePhase::AwaitingPlayerAnswers);
        assert_eq!(snapshot.question.answer_count(), 2);
        assert!(GameSnapshot::from_json("{").is_err());
    }

    #[test]
    fn test_view_serializes_without_empty_fields() {
        let mut board = create_test_board(Role::Player);
        let view = board.on_snapshot(snapshot(
            GamePhase::AwaitingPlayerAnswers,
            create_test_question(),
        ));
        let json = serde_json::to_string(&view).unwrap();

        assert!(!json.contains("explanation"));
        assert!(!json.contains("feedback"));
        assert!(json.contains("\"pick_guidance\":\"Pick 1 answer\""));
    }
}
