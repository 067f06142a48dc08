//! Game session state and the turn-taking synchronizer.

use crate::game::{heuristic, rules, Board, Mark, MoveEvent, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// The full mutable state of one ongoing match.
///
/// Exactly one session is live per process; a finished session is replaced
/// wholesale rather than mutated back into play.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Unique identifier of this game, shared by both peers.
    #[serde(rename = "gameId")]
    pub game_id: String,
    /// Whether a winner has been found.
    pub ended: bool,
    /// The local player.
    pub player1: Player,
    /// The remote player, known once the first inbound move arrives.
    pub player2: Option<Player>,
    /// The board.
    pub board: Board,
}

/// The turn-taking state machine.
///
/// Owns the single live [`GameSession`] and the buffered move history;
/// nothing else retains a reference across calls. Decides whether an inbound
/// move belongs to the current game or starts a new one, applies it, checks
/// for a winner, and computes the local reply.
#[derive(Debug)]
pub struct Synchronizer {
    /// Stable identifier of this process, reused across games.
    player_id: String,
    session: Option<GameSession>,
    history: Vec<MoveEvent>,
}

impl Synchronizer {
    /// Creates a synchronizer with a fresh process-wide player id.
    #[instrument]
    pub fn new() -> Self {
        Self {
            player_id: Uuid::new_v4().to_string(),
            session: None,
            history: Vec::new(),
        }
    }

    /// Returns the local player of the live session, if any.
    pub fn local_player(&self) -> Option<&Player> {
        self.session.as_ref().map(|s| &s.player1)
    }

    /// Returns a read-only clone of the live session for display purposes.
    pub fn snapshot(&self) -> Option<GameSession> {
        self.session.clone()
    }

    /// Returns the buffered move history of the current game.
    pub fn history(&self) -> &[MoveEvent] {
        &self.history
    }

    /// Starts a fresh self-initiated game.
    ///
    /// The local player takes the default mark X (the self-initiated peer
    /// always plays first) and a new game id is drawn.
    #[instrument(skip(self))]
    pub fn start_local(&mut self) {
        let game_id = Uuid::new_v4().to_string();
        info!(game_id = %game_id, "Starting new game");
        self.session = Some(GameSession {
            game_id,
            ended: false,
            player1: Player {
                id: self.player_id.clone(),
                mark: Mark::X,
            },
            player2: None,
            board: Board::new(),
        });
        self.history.clear();
    }

    /// Joins a game another peer initiated.
    ///
    /// The local player takes the mark opposite to the inbound move's sender
    /// and the session reuses the inbound game id.
    #[instrument(skip(self, first_move), fields(game_id = %first_move.game_id))]
    pub fn start_local_from(&mut self, first_move: &MoveEvent) {
        info!(
            game_id = %first_move.game_id,
            remote_mark = ?first_move.player.mark,
            "Joining game started by remote peer"
        );
        self.session = Some(GameSession {
            game_id: first_move.game_id.clone(),
            ended: false,
            player1: Player {
                id: self.player_id.clone(),
                mark: first_move.player.mark.opposite(),
            },
            player2: Some(first_move.player.clone()),
            board: Board::new(),
        });
        self.history.clear();
    }

    /// Starts a new game from the inbound move if its game id is unrecognized.
    ///
    /// Idempotent: repeated calls with the live session's game id are no-ops.
    #[instrument(skip(self, inbound), fields(game_id = %inbound.game_id))]
    pub fn ensure_session(&mut self, inbound: &MoveEvent) {
        let known = self
            .session
            .as_ref()
            .is_some_and(|s| s.game_id == inbound.game_id);
        if !known {
            debug!(game_id = %inbound.game_id, "Inbound game id not recognized");
            self.start_local_from(inbound);
        }
    }

    /// Applies an inbound move and computes the local reply.
    ///
    /// Precondition: [`ensure_session`](Self::ensure_session) has run for
    /// this move. The inbound mark is written at `(row = y, col = x)` only if
    /// the game ids match; a mismatch is silently ignored and the reply is
    /// computed from the unchanged board. Winner detection runs before the
    /// reply is computed, so a reply is never generated for a just-won
    /// board: a finished game rolls straight into a fresh one and the reply
    /// is that game's opening move.
    #[instrument(skip(self, inbound), fields(game_id = %inbound.game_id, x = inbound.x, y = inbound.y))]
    pub fn apply_and_respond(&mut self, inbound: &MoveEvent) -> MoveEvent {
        self.apply(inbound);
        self.check_winner_and_start_again();
        self.make_move()
    }

    /// First move of a self-initiated game, published right after connect.
    #[instrument(skip(self))]
    pub fn opening_move(&mut self) -> MoveEvent {
        self.start_local();
        self.make_move()
    }

    /// Writes the inbound mark into the board if the move belongs to the
    /// live session.
    fn apply(&mut self, inbound: &MoveEvent) {
        let Some(session) = self.session.as_mut() else {
            warn!("No live session, dropping move");
            return;
        };
        if session.game_id != inbound.game_id {
            warn!(
                live_game_id = %session.game_id,
                inbound_game_id = %inbound.game_id,
                "Game id mismatch, dropping move"
            );
            return;
        }
        if session.player2.is_none() && inbound.player.id != session.player1.id {
            session.player2 = Some(inbound.player.clone());
        }
        match session.board.set(inbound.y, inbound.x, inbound.player.mark) {
            Ok(()) => {
                info!(
                    mark = ?inbound.player.mark,
                    x = inbound.x,
                    y = inbound.y,
                    "Applied move"
                );
                self.history.push(inbound.clone());
            }
            Err(reason) => {
                warn!(x = inbound.x, y = inbound.y, reason, "Dropping invalid move");
            }
        }
    }

    /// Checks the live board for a winner (or a drawn full board) and rolls
    /// over into a fresh game when the match is over.
    fn check_winner_and_start_again(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(mark) = rules::winner(&session.board) {
            info!(winner = ?mark, game_id = %session.game_id, "Game won");
            session.ended = true;
            self.start_local();
        } else if session.board.is_full() {
            info!(game_id = %session.game_id, "Game drawn");
            session.ended = true;
            self.start_local();
        }
    }

    /// Computes the local player's next move, applies it to the board and
    /// records it in the history.
    ///
    /// Callers guarantee a session exists (every public path runs a start or
    /// ensure first).
    fn make_move(&mut self) -> MoveEvent {
        if self.session.is_none() {
            self.start_local();
        }
        let session = self.session.as_mut().unwrap();
        let (row, col) = heuristic::next_move(&mut session.board, session.player1.mark);
        session.board.set(row, col, session.player1.mark).unwrap();
        info!(
            mark = ?session.player1.mark,
            x = col,
            y = row,
            "Local player made move"
        );
        let event = MoveEvent {
            game_id: session.game_id.clone(),
            player: session.player1.clone(),
            x: col,
            y: row,
        };
        self.history.push(event.clone());
        event
    }
}

impl Default for Synchronizer {
    fn default() -> Self {
        Self::new()
    }
}
