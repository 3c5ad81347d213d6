//! One room's round state machine.
//!
//! A [`Room`] is plain data plus synchronous transitions. Every operation
//! takes the caller's identity, mutates the room (or doesn't), and returns
//! the events to deliver as `(Recipient, ServerEvent)` pairs. Nothing here
//! does I/O, so an operation either applies completely or not at all.
//!
//! Three kinds of outcome:
//! - applied: state changes and the outbox is non-empty
//! - ignored: wrong phase or a non-host issuing a host command; no state
//!   change, empty outbox, a debug log line
//! - rejected: `Err(RoomError)` for the caller only, no state change

use bidquiz_protocol::{
    BidStatus, PlayerId, PlayerView, Question, Recipient, ReviewEntry,
    RoomCode, ServerEvent, Standing,
};

use crate::resolve::resolve;
use crate::roster::{Player, Roster};
use crate::{Phase, RoomError};

/// Events produced by one room operation, in delivery order.
pub type Outbox = Vec<(Recipient, ServerEvent)>;

/// A single game instance.
#[derive(Debug, Clone)]
pub struct Room {
    code: RoomCode,
    host: PlayerId,
    questions: Vec<Question>,
    /// `None` until the first round starts. Only ever moves forward and
    /// stops at `questions.len()`.
    current_question: Option<usize>,
    phase: Phase,
    players: Roster,
    /// Knocked-out identities in the order they went out. Entries are never
    /// removed, even after the player disconnects.
    eliminated: Vec<PlayerId>,
    starting_money: u64,
}

impl Room {
    pub fn new(
        code: RoomCode,
        host: PlayerId,
        questions: Vec<Question>,
        starting_money: u64,
    ) -> Self {
        Self {
            code,
            host,
            questions,
            current_question: None,
            phase: Phase::Lobby,
            players: Roster::new(),
            eliminated: Vec::new(),
            starting_money,
        }
    }

    // -- Accessors --------------------------------------------------------

    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    pub fn host(&self) -> PlayerId {
        self.host
    }

    pub fn is_host(&self, id: PlayerId) -> bool {
        self.host == id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Zero-based index of the current question, `None` before the start.
    pub fn current_question(&self) -> Option<usize> {
        self.current_question
    }

    pub fn players(&self) -> &Roster {
        &self.players
    }

    pub fn eliminated(&self) -> &[PlayerId] {
        &self.eliminated
    }

    pub fn is_eliminated(&self, id: &PlayerId) -> bool {
        self.eliminated.contains(id)
    }

    /// Everyone a room-wide event reaches: the host and every player.
    pub fn members(&self) -> Vec<PlayerId> {
        let mut members = Vec::with_capacity(self.players.len() + 1);
        members.push(self.host);
        members.extend(self.players.ids().filter(|id| *id != self.host));
        members
    }

    /// Players still in the running, in join order.
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !self.is_eliminated(&p.id))
    }

    /// Active players by money, richest first. Ties keep join order.
    pub fn standings(&self) -> Vec<&Player> {
        let mut standings: Vec<&Player> = self.active_players().collect();
        standings.sort_by(|a, b| b.money.cmp(&a.money));
        standings
    }

    /// Names of knocked-out players. A player who has since left shows up
    /// as their raw identity.
    pub fn eliminated_names(&self) -> Vec<String> {
        self.eliminated
            .iter()
            .map(|id| match self.players.get(id) {
                Some(p) => p.name.clone(),
                None => id.0.to_string(),
            })
            .collect()
    }

    // -- Membership -------------------------------------------------------

    /// Adds a player under `name`.
    ///
    /// # Errors
    /// - [`RoomError::AlreadyStarted`] once the room has left the lobby
    /// - [`RoomError::NameTaken`] if a current member uses the same name
    pub fn join(
        &mut self,
        caller: PlayerId,
        name: String,
    ) -> Result<Outbox, RoomError> {
        if !self.phase.is_joinable() {
            return Err(RoomError::AlreadyStarted);
        }
        if self.players.name_taken(&name) {
            return Err(RoomError::NameTaken);
        }

        self.players
            .insert(Player::new(caller, name.clone(), self.starting_money));
        tracing::info!(
            code = %self.code,
            player_id = %caller,
            %name,
            players = self.players.len(),
            "player joined"
        );

        Ok(vec![
            (Recipient::Room, self.roster_update()),
            (
                Recipient::Player(caller),
                ServerEvent::Joined {
                    name,
                    money: self.starting_money,
                    code: self.code.clone(),
                },
            ),
        ])
    }

    /// Drops a departed player's record. Their entry in the eliminated
    /// list, if any, stays.
    pub fn remove_player(&mut self, id: PlayerId) -> Outbox {
        match self.players.remove(&id) {
            Some(player) => {
                tracing::info!(
                    code = %self.code,
                    player_id = %id,
                    name = %player.name,
                    "player left"
                );
                vec![(Recipient::Room, self.roster_update())]
            }
            None => Vec::new(),
        }
    }

    // -- Host commands ----------------------------------------------------

    /// Lobby → first round.
    pub fn start(&mut self, caller: PlayerId) -> Outbox {
        if !self.is_host(caller) {
            return self.ignored(caller, "host:start", "not the host");
        }
        if self.phase != Phase::Lobby {
            return self.ignored(caller, "host:start", "wrong phase");
        }
        tracing::info!(
            code = %self.code,
            players = self.players.len(),
            questions = self.questions.len(),
            "game started"
        );
        self.advance()
    }

    /// Moves to the next question, or finishes the game after the last.
    pub fn next_question(&mut self, caller: PlayerId) -> Outbox {
        if !self.is_host(caller) {
            return self.ignored(caller, "host:next", "not the host");
        }
        if !self.phase.can_advance() {
            return self.ignored(caller, "host:next", "wrong phase");
        }
        self.advance()
    }

    /// Bidding → answering.
    pub fn lock_bids(&mut self, caller: PlayerId) -> Outbox {
        if !self.is_host(caller) {
            return self.ignored(caller, "host:lock_bids", "not the host");
        }
        if self.phase != Phase::Bidding {
            return self.ignored(caller, "host:lock_bids", "wrong phase");
        }
        self.phase = Phase::Answering;
        vec![(Recipient::Room, ServerEvent::AnswerPhase)]
    }

    /// Answering → review. The host gets the judging sheet; everyone else
    /// only learns that judging has begun.
    pub fn end_round(&mut self, caller: PlayerId) -> Outbox {
        if !self.is_host(caller) {
            return self.ignored(caller, "host:end_round", "not the host");
        }
        if self.phase != Phase::Answering {
            return self.ignored(caller, "host:end_round", "wrong phase");
        }
        self.phase = Phase::Review;

        let answers = self
            .active_players()
            .map(|p| ReviewEntry {
                correct: None,
                ..review_entry(p)
            })
            .collect();

        vec![
            (Recipient::Player(self.host), ServerEvent::Review { answers }),
            (Recipient::Room, ServerEvent::ReviewStarted),
        ]
    }

    /// Judges `target`'s answer and settles their money.
    ///
    /// Every mark is applied against the player's current money, so
    /// marking the same player again stacks on the first result.
    pub fn mark(
        &mut self,
        caller: PlayerId,
        target: PlayerId,
        correct: bool,
    ) -> Outbox {
        if !self.is_host(caller) {
            return self.ignored(caller, "host:mark", "not the host");
        }
        if self.phase != Phase::Review {
            return self.ignored(caller, "host:mark", "wrong phase");
        }
        let Some(player) = self.players.get_mut(&target) else {
            return self.ignored(caller, "host:mark", "unknown player");
        };

        let judgment = resolve(player.money, player.bid, correct);
        player.correct = Some(correct);
        player.money = judgment.money;
        let (bid, money) = (player.bid, player.money);

        if judgment.eliminated && !self.eliminated.contains(&target) {
            self.eliminated.push(target);
            tracing::info!(
                code = %self.code,
                player_id = %target,
                bid,
                "player eliminated"
            );
        }

        let answers = self
            .players
            .iter()
            .filter(|p| !self.is_eliminated(&p.id) || p.correct.is_some())
            .map(review_entry)
            .collect();
        let standings = self
            .standings()
            .into_iter()
            .map(|p| Standing {
                name: p.name.clone(),
                money: p.money,
            })
            .collect();

        vec![
            (
                Recipient::Player(target),
                ServerEvent::Result {
                    correct,
                    bid,
                    money,
                    eliminated: self.is_eliminated(&target),
                },
            ),
            (
                Recipient::Player(self.host),
                ServerEvent::ReviewUpdate {
                    answers,
                    eliminated: self.eliminated_names(),
                    standings,
                },
            ),
        ]
    }

    // -- Player commands --------------------------------------------------

    /// Records a bid. `amount` is `None` when the submitted value did not
    /// parse as a non-negative integer.
    ///
    /// # Errors
    /// [`RoomError::InvalidBid`] if the amount is missing or exceeds the
    /// player's money.
    pub fn bid(
        &mut self,
        caller: PlayerId,
        amount: Option<u64>,
    ) -> Result<Outbox, RoomError> {
        if self.phase != Phase::Bidding {
            return Ok(self.ignored(caller, "player:bid", "wrong phase"));
        }
        let Some(player) = self.players.get_mut(&caller) else {
            return Ok(self.ignored(caller, "player:bid", "not a player"));
        };
        let amount = match amount {
            Some(a) if a <= player.money => a,
            _ => return Err(RoomError::InvalidBid),
        };

        player.bid = amount;
        player.answer = None;

        let bids = self
            .players
            .iter()
            .map(|p| BidStatus {
                id: p.id,
                name: p.name.clone(),
                has_bid: p.bid > 0 || p.answer.is_none(),
                bid: p.bid,
            })
            .collect();

        Ok(vec![
            (Recipient::Room, ServerEvent::Bids { bids }),
            (
                Recipient::Player(caller),
                ServerEvent::BidConfirmed { bid: amount },
            ),
        ])
    }

    /// Stores an answer verbatim. Correctness is always the host's call.
    pub fn answer(&mut self, caller: PlayerId, answer: Option<String>) -> Outbox {
        if self.phase != Phase::Answering {
            return self.ignored(caller, "player:answer", "wrong phase");
        }
        let Some(player) = self.players.get_mut(&caller) else {
            return self.ignored(caller, "player:answer", "not a player");
        };
        player.answer = answer;

        let (answered, total) =
            self.active_players().fold((0, 0), |(answered, total), p| {
                (answered + usize::from(p.answer.is_some()), total + 1)
            });

        let mut out = vec![(
            Recipient::Room,
            ServerEvent::AnswersProgress { answered, total },
        )];
        if answered == total {
            out.push((Recipient::Room, ServerEvent::AllAnswered));
        }
        out.push((Recipient::Player(caller), ServerEvent::AnswerConfirmed));
        out
    }

    // -- Internals --------------------------------------------------------

    /// Shared by start and next: step to the next question or finish.
    fn advance(&mut self) -> Outbox {
        let index = self.current_question.map_or(0, |i| i + 1);
        self.current_question = Some(index);

        let Some(question) = self.questions.get(index) else {
            self.phase = Phase::Finished;
            let standings: Vec<PlayerView> =
                self.standings().into_iter().map(Player::view).collect();
            tracing::info!(
                code = %self.code,
                survivors = standings.len(),
                eliminated = self.eliminated.len(),
                "game finished"
            );
            return vec![(
                Recipient::Room,
                ServerEvent::Finished {
                    standings,
                    eliminated: self.eliminated_names(),
                },
            )];
        };
        let question = question.text.clone();

        for player in self.players.iter_mut() {
            player.reset_round();
        }
        self.phase = Phase::Bidding;
        tracing::debug!(code = %self.code, round = index, "round started");

        vec![(
            Recipient::Room,
            ServerEvent::RoundStart {
                question_index: index,
                total: self.questions.len(),
                question,
                players: self.players.iter().map(Player::entry).collect(),
            },
        )]
    }

    fn roster_update(&self) -> ServerEvent {
        ServerEvent::Players {
            players: self.players.iter().map(Player::view).collect(),
        }
    }

    fn ignored(
        &self,
        caller: PlayerId,
        event: &'static str,
        reason: &'static str,
    ) -> Outbox {
        tracing::debug!(
            code = %self.code,
            %caller,
            event,
            reason,
            phase = %self.phase,
            "event ignored"
        );
        Vec::new()
    }
}

fn review_entry(p: &Player) -> ReviewEntry {
    ReviewEntry {
        id: p.id,
        name: p.name.clone(),
        bid: p.bid,
        answer: p.answer_or_placeholder().to_string(),
        correct: p.correct,
        money: p.money,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: PlayerId = PlayerId(1);
    const ALICE: PlayerId = PlayerId(2);
    const BOB: PlayerId = PlayerId(3);

    fn room_with(questions: &[&str]) -> Room {
        Room::new(
            RoomCode::new("TEST1"),
            HOST,
            questions.iter().map(|q| Question::new(*q)).collect(),
            1000,
        )
    }

    /// A room in the bidding phase of round 0 with Alice and Bob joined.
    fn bidding_room() -> Room {
        let mut room = room_with(&["2+2?", "3+3?"]);
        room.join(ALICE, "Alice".into()).unwrap();
        room.join(BOB, "Bob".into()).unwrap();
        room.start(HOST);
        room
    }

    fn money(room: &Room, id: PlayerId) -> u64 {
        room.players().get(&id).unwrap().money
    }

    // =====================================================================
    // join
    // =====================================================================

    #[test]
    fn test_join_broadcasts_roster_and_confirms() {
        let mut room = room_with(&["q"]);
        let out = room.join(ALICE, "Alice".into()).unwrap();

        assert_eq!(out.len(), 2);
        assert!(matches!(
            &out[0],
            (Recipient::Room, ServerEvent::Players { players }) if players.len() == 1
        ));
        assert_eq!(
            out[1],
            (
                Recipient::Player(ALICE),
                ServerEvent::Joined {
                    name: "Alice".into(),
                    money: 1000,
                    code: RoomCode::new("TEST1"),
                }
            )
        );
    }

    #[test]
    fn test_join_duplicate_name_rejected_roster_unchanged() {
        let mut room = room_with(&["q"]);
        room.join(ALICE, "Alice".into()).unwrap();
        assert_eq!(room.join(BOB, "Alice".into()), Err(RoomError::NameTaken));
        assert_eq!(room.players().len(), 1);
        assert!(!room.players().contains(&BOB));
    }

    #[test]
    fn test_join_after_start_rejected() {
        let mut room = bidding_room();
        assert_eq!(
            room.join(PlayerId(9), "Late".into()),
            Err(RoomError::AlreadyStarted)
        );
    }

    #[test]
    fn test_members_include_host_first() {
        let room = bidding_room();
        assert_eq!(room.members(), vec![HOST, ALICE, BOB]);
    }

    // =====================================================================
    // round advance
    // =====================================================================

    #[test]
    fn test_start_opens_first_round() {
        let mut room = room_with(&["2+2?", "3+3?"]);
        room.join(ALICE, "Alice".into()).unwrap();
        let out = room.start(HOST);

        assert_eq!(room.phase(), Phase::Bidding);
        assert_eq!(room.current_question(), Some(0));
        match &out[..] {
            [(Recipient::Room, ServerEvent::RoundStart { question_index, total, question, players })] => {
                assert_eq!(*question_index, 0);
                assert_eq!(*total, 2);
                assert_eq!(question, "2+2?");
                assert_eq!(players[0].money, 1000);
            }
            other => panic!("expected RoundStart, got {other:?}"),
        }
    }

    #[test]
    fn test_advance_index_steps_by_one_then_finishes() {
        let mut room = bidding_room();
        assert_eq!(room.current_question(), Some(0));

        room.next_question(HOST);
        assert_eq!(room.current_question(), Some(1));
        assert_eq!(room.phase(), Phase::Bidding);

        let out = room.next_question(HOST);
        assert_eq!(room.current_question(), Some(2));
        assert_eq!(room.phase(), Phase::Finished);
        assert!(matches!(&out[..], [(Recipient::Room, ServerEvent::Finished { .. })]));

        // Finished is terminal: the index never passes the question count.
        assert!(room.next_question(HOST).is_empty());
        assert_eq!(room.current_question(), Some(2));
    }

    #[test]
    fn test_start_with_no_questions_finishes_immediately() {
        let mut room = room_with(&[]);
        room.join(ALICE, "Alice".into()).unwrap();
        room.start(HOST);
        assert_eq!(room.phase(), Phase::Finished);
    }

    #[test]
    fn test_next_round_resets_bids_answers_and_judgments() {
        let mut room = bidding_room();
        room.bid(ALICE, Some(100)).unwrap();
        room.lock_bids(HOST);
        room.answer(ALICE, Some("4".into()));
        room.end_round(HOST);
        room.mark(HOST, ALICE, true);

        room.next_question(HOST);
        let alice = room.players().get(&ALICE).unwrap();
        assert_eq!((alice.bid, alice.answer.clone(), alice.correct), (0, None, None));
        assert_eq!(alice.money, 1100);
    }

    #[test]
    fn test_final_standings_exclude_eliminated_and_sort_stably() {
        // Bob joins first; the tie with Alice must keep join order, not
        // name or identity order.
        let mut room = room_with(&["only"]);
        room.join(BOB, "Bob".into()).unwrap();
        room.join(ALICE, "Alice".into()).unwrap();
        room.join(PlayerId(4), "Cy".into()).unwrap();
        room.start(HOST);
        room.bid(ALICE, Some(100)).unwrap();
        room.bid(BOB, Some(100)).unwrap();
        room.lock_bids(HOST);
        room.end_round(HOST);
        room.mark(HOST, ALICE, true);
        room.mark(HOST, BOB, true);
        room.mark(HOST, PlayerId(4), true); // bid 0 → out

        let out = room.next_question(HOST);
        match &out[..] {
            [(Recipient::Room, ServerEvent::Finished { standings, eliminated })] => {
                let names: Vec<&str> =
                    standings.iter().map(|p| p.name.as_str()).collect();
                assert_eq!(names, ["Bob", "Alice"]);
                assert!(standings.iter().all(|p| p.money == 1100));
                assert_eq!(eliminated, &["Cy".to_string()]);
            }
            other => panic!("expected Finished, got {other:?}"),
        }
    }

    // =====================================================================
    // ignored host commands
    // =====================================================================

    #[test]
    fn test_non_host_commands_are_ignored() {
        let mut room = bidding_room();
        room.bid(ALICE, Some(100)).unwrap();

        assert!(room.next_question(ALICE).is_empty());
        assert!(room.lock_bids(ALICE).is_empty());
        assert_eq!(room.phase(), Phase::Bidding);

        room.lock_bids(HOST);
        assert!(room.end_round(BOB).is_empty());
        assert_eq!(room.phase(), Phase::Answering);

        room.end_round(HOST);
        assert!(room.mark(ALICE, ALICE, true).is_empty());
        assert_eq!(money(&room, ALICE), 1000);
        assert!(room.players().get(&ALICE).unwrap().correct.is_none());
    }

    #[test]
    fn test_non_host_start_is_ignored() {
        let mut room = room_with(&["q"]);
        room.join(ALICE, "Alice".into()).unwrap();
        assert!(room.start(ALICE).is_empty());
        assert_eq!(room.phase(), Phase::Lobby);
        assert_eq!(room.current_question(), None);
    }

    #[test]
    fn test_wrong_phase_commands_are_ignored() {
        let mut room = room_with(&["q"]);
        assert!(room.lock_bids(HOST).is_empty());
        assert!(room.end_round(HOST).is_empty());
        assert!(room.next_question(HOST).is_empty());
        assert!(room.mark(HOST, ALICE, true).is_empty());
        assert_eq!(room.phase(), Phase::Lobby);

        let mut room = bidding_room();
        assert!(room.start(HOST).is_empty());
        assert_eq!(room.current_question(), Some(0));
    }

    #[test]
    fn test_mark_unknown_player_is_ignored() {
        let mut room = bidding_room();
        room.lock_bids(HOST);
        room.end_round(HOST);
        assert!(room.mark(HOST, PlayerId(99), true).is_empty());
    }

    // =====================================================================
    // bidding
    // =====================================================================

    #[test]
    fn test_bid_stores_and_confirms() {
        let mut room = bidding_room();
        let out = room.bid(ALICE, Some(100)).unwrap();

        let alice = room.players().get(&ALICE).unwrap();
        assert_eq!((alice.bid, alice.money), (100, 1000));
        match &out[..] {
            [(Recipient::Room, ServerEvent::Bids { bids }), (Recipient::Player(p), ServerEvent::BidConfirmed { bid: 100 })] => {
                assert_eq!(*p, ALICE);
                assert_eq!(bids.len(), 2);
                assert_eq!(bids[0].bid, 100);
            }
            other => panic!("unexpected outbox {other:?}"),
        }
    }

    #[test]
    fn test_bid_over_money_rejected_without_mutation() {
        let mut room = bidding_room();
        room.bid(ALICE, Some(50)).unwrap();
        assert_eq!(room.bid(ALICE, Some(1001)), Err(RoomError::InvalidBid));
        assert_eq!(room.players().get(&ALICE).unwrap().bid, 50);
    }

    #[test]
    fn test_bid_unparseable_rejected() {
        let mut room = bidding_room();
        assert_eq!(room.bid(ALICE, None), Err(RoomError::InvalidBid));
    }

    #[test]
    fn test_bid_all_money_accepted() {
        let mut room = bidding_room();
        assert!(room.bid(ALICE, Some(1000)).is_ok());
    }

    #[test]
    fn test_bid_outside_bidding_ignored() {
        let mut room = bidding_room();
        room.lock_bids(HOST);
        assert_eq!(room.bid(ALICE, Some(100)), Ok(Vec::new()));
        assert_eq!(room.players().get(&ALICE).unwrap().bid, 0);
    }

    #[test]
    fn test_bid_from_non_player_ignored() {
        let mut room = bidding_room();
        assert_eq!(room.bid(PlayerId(77), Some(1)), Ok(Vec::new()));
    }

    // =====================================================================
    // answering
    // =====================================================================

    #[test]
    fn test_answer_progress_and_all_answered() {
        let mut room = bidding_room();
        room.lock_bids(HOST);

        let out = room.answer(ALICE, Some("4".into()));
        assert_eq!(
            out,
            vec![
                (Recipient::Room, ServerEvent::AnswersProgress { answered: 1, total: 2 }),
                (Recipient::Player(ALICE), ServerEvent::AnswerConfirmed),
            ]
        );

        let out = room.answer(BOB, Some("5".into()));
        assert_eq!(
            out,
            vec![
                (Recipient::Room, ServerEvent::AnswersProgress { answered: 2, total: 2 }),
                (Recipient::Room, ServerEvent::AllAnswered),
                (Recipient::Player(BOB), ServerEvent::AnswerConfirmed),
            ]
        );
        // All answered is a hint only.
        assert_eq!(room.phase(), Phase::Answering);
    }

    #[test]
    fn test_answer_in_bidding_ignored() {
        let mut room = bidding_room();
        assert!(room.answer(ALICE, Some("4".into())).is_empty());
        assert!(room.players().get(&ALICE).unwrap().answer.is_none());
    }

    // =====================================================================
    // review and marking
    // =====================================================================

    #[test]
    fn test_end_round_sends_sheet_to_host_only() {
        let mut room = bidding_room();
        room.bid(ALICE, Some(100)).unwrap();
        room.lock_bids(HOST);
        room.answer(ALICE, Some("4".into()));
        let out = room.end_round(HOST);

        assert_eq!(room.phase(), Phase::Review);
        match &out[..] {
            [(Recipient::Player(h), ServerEvent::Review { answers }), (Recipient::Room, ServerEvent::ReviewStarted)] => {
                assert_eq!(*h, HOST);
                assert_eq!(answers[0].answer, "4");
                assert_eq!(answers[0].bid, 100);
                assert_eq!(answers[1].answer, "(no answer)");
                assert!(answers.iter().all(|a| a.correct.is_none()));
            }
            other => panic!("unexpected outbox {other:?}"),
        }
    }

    #[test]
    fn test_mark_correct_notifies_player_and_host() {
        let mut room = bidding_room();
        room.bid(ALICE, Some(100)).unwrap();
        room.lock_bids(HOST);
        room.answer(ALICE, Some("4".into()));
        room.end_round(HOST);

        let out = room.mark(HOST, ALICE, true);
        assert_eq!(
            out[0],
            (
                Recipient::Player(ALICE),
                ServerEvent::Result {
                    correct: true,
                    bid: 100,
                    money: 1100,
                    eliminated: false,
                }
            )
        );
        match &out[1] {
            (Recipient::Player(h), ServerEvent::ReviewUpdate { standings, eliminated, .. }) => {
                assert_eq!(*h, HOST);
                assert!(eliminated.is_empty());
                assert_eq!(standings[0], Standing { name: "Alice".into(), money: 1100 });
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_mark_zero_bid_eliminates_even_if_correct() {
        let mut room = bidding_room();
        room.lock_bids(HOST);
        room.end_round(HOST);
        let out = room.mark(HOST, BOB, true);

        assert_eq!(money(&room, BOB), 0);
        assert_eq!(room.eliminated(), &[BOB]);
        assert!(matches!(
            out[0],
            (_, ServerEvent::Result { eliminated: true, money: 0, .. })
        ));
    }

    #[test]
    fn test_review_update_keeps_just_judged_eliminated_player() {
        let mut room = bidding_room();
        room.lock_bids(HOST);
        room.end_round(HOST);
        let out = room.mark(HOST, BOB, false);

        match &out[1] {
            (_, ServerEvent::ReviewUpdate { answers, eliminated, standings }) => {
                let ids: Vec<PlayerId> = answers.iter().map(|a| a.id).collect();
                assert_eq!(ids, vec![ALICE, BOB]);
                assert_eq!(eliminated, &["Bob".to_string()]);
                assert_eq!(standings.len(), 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_remark_compounds_against_current_money() {
        let mut room = bidding_room();
        room.bid(ALICE, Some(100)).unwrap();
        room.lock_bids(HOST);
        room.end_round(HOST);

        room.mark(HOST, ALICE, true);
        room.mark(HOST, ALICE, true);
        assert_eq!(money(&room, ALICE), 1200);

        room.mark(HOST, ALICE, false);
        assert_eq!(money(&room, ALICE), 1100);
    }

    #[test]
    fn test_elimination_is_recorded_once() {
        let mut room = bidding_room();
        room.lock_bids(HOST);
        room.end_round(HOST);
        room.mark(HOST, BOB, false);
        room.mark(HOST, BOB, false);
        assert_eq!(room.eliminated(), &[BOB]);
    }

    // =====================================================================
    // departures
    // =====================================================================

    #[test]
    fn test_remove_player_keeps_elimination_record() {
        let mut room = bidding_room();
        room.lock_bids(HOST);
        room.end_round(HOST);
        room.mark(HOST, BOB, true);

        let out = room.remove_player(BOB);
        assert!(matches!(
            &out[..],
            [(Recipient::Room, ServerEvent::Players { players })] if players.len() == 1
        ));
        assert_eq!(room.eliminated(), &[BOB]);
        assert_eq!(room.eliminated_names(), vec![BOB.0.to_string()]);
    }

    #[test]
    fn test_remove_unknown_player_is_silent() {
        let mut room = bidding_room();
        assert!(room.remove_player(PlayerId(42)).is_empty());
    }

    #[test]
    fn test_player_disconnect_does_not_eliminate() {
        let mut room = bidding_room();
        room.remove_player(ALICE);
        assert!(room.eliminated().is_empty());
        assert_eq!(money(&room, BOB), 1000);
    }
}
