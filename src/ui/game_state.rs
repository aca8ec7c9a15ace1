//! Game state management for the Isolation GUI

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::eval::Heuristic;
use crate::search::Timer;
use crate::{AIEngine, Board, Game, MoveResult, Player, Pos};

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs AI
    PvE {
        human: Player,
    },
    /// Player vs Player (hotseat)
    PvP {
        show_suggestions: bool,
    },
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE { human: Player::One }
    }
}

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<MoveResult>,
        start_time: Instant,
    },
}

/// Main game state
pub struct GameState {
    pub board: Board,
    pub mode: GameMode,
    pub winner: Option<Player>,
    pub last_move: Option<Pos>,
    pub move_history: Vec<Pos>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub suggested_move: Option<Pos>,
    pub message: Option<String>,
    pub config: EngineConfig,
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

impl GameState {
    pub fn new(mode: GameMode, config: EngineConfig) -> Self {
        Self {
            board: Self::fresh_board(&config),
            mode,
            winner: None,
            last_move: None,
            move_history: Vec::new(),
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            suggested_move: None,
            message: None,
            config,
        }
    }

    fn fresh_board(config: &EngineConfig) -> Board {
        Board::new(config.board_width, config.board_height).unwrap_or_else(|e| {
            warn!("{e}, falling back to the default board");
            Board::default()
        })
    }

    pub fn reset(&mut self) {
        self.board = Self::fresh_board(&self.config);
        self.winner = None;
        self.last_move = None;
        self.move_history.clear();
        self.last_ai_result = None;
        self.ai_state = AiState::Idle;
        self.move_timer = MoveTimer::default();
        self.suggested_move = None;
        self.message = None;
    }

    pub fn current_player(&self) -> Player {
        self.board.active_player()
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human } => self.current_player() == human,
            GameMode::PvP { .. } => true,
        }
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human } => self.current_player() != human,
            GameMode::PvP { .. } => false,
        }
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Legal destinations for the player to move
    pub fn legal_moves(&self) -> Vec<Pos> {
        if self.winner.is_some() {
            return Vec::new();
        }
        self.board.legal_moves(self.current_player())
    }

    /// Attempt to move the human's piece to `pos`
    pub fn try_move(&mut self, pos: Pos) -> Result<(), String> {
        if self.winner.is_some() {
            return Err("Game is over".to_string());
        }

        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }

        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }

        self.execute_move(pos).map_err(|e| e.to_string())
    }

    /// Execute a move (for both human and AI)
    fn execute_move(&mut self, pos: Pos) -> crate::Result<()> {
        self.board.apply_move(pos)?;

        self.move_history.push(pos);
        self.last_move = Some(pos);
        self.suggested_move = None;
        self.move_timer.stop();
        self.message = None;

        self.check_game_over();
        if self.winner.is_none() {
            self.move_timer.start();
        }
        Ok(())
    }

    /// The game ends as soon as the player to move is stuck
    fn check_game_over(&mut self) {
        let mover = self.current_player();
        if self.board.is_loser(mover) {
            debug!(winner = ?mover.opponent(), plies = self.move_history.len(), "game over");
            self.winner = Some(mover.opponent());
        }
    }

    /// Start AI thinking on a worker thread
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.winner.is_some() {
            return;
        }

        let board = self.board.clone();
        let config = self.config.clone();

        let (tx, rx) = channel();

        thread::spawn(move || {
            let mut engine = AIEngine::with_config(config);
            let result = engine.get_move_with_stats(&board);
            let _ = tx.send(result);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking { receiver, start_time } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        if let Some((move_result, elapsed)) = result {
            self.ai_state = AiState::Idle;
            self.last_ai_result = Some(move_result.clone());
            self.move_timer.set_ai_time(elapsed);

            match move_result.best_move {
                Some(pos) => {
                    if let Err(e) = self.execute_move(pos) {
                        self.message = Some(format!("AI played an illegal move: {e}"));
                    }
                }
                None => self.message = Some("AI has no legal move".to_string()),
            }
        }
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Request a move suggestion for PvP mode
    pub fn request_suggestion(&mut self) {
        if self.winner.is_some() || self.is_ai_thinking() {
            return;
        }

        // Quick suggestion on a shorter budget
        let budget = (self.config.time_limit_ms / 4).max(50);
        let mut engine = AIEngine::with_config(self.config.clone());
        let result = engine.decide_move_with_stats(&self.board, &Timer::from_millis(budget));

        self.suggested_move = result.best_move;
        self.last_ai_result = Some(result);
    }

    pub fn set_heuristic(&mut self, heuristic: Heuristic) {
        self.config.heuristic = heuristic;
    }

    /// Undo the last move, or the last two against the AI
    pub fn undo(&mut self) {
        if self.move_history.is_empty() || self.is_ai_thinking() {
            return;
        }

        let undo_count = match self.mode {
            GameMode::PvE { .. } if self.move_history.len() >= 2 => 2,
            _ => 1,
        };

        // Reset and replay
        let keep = self.move_history.len().saturating_sub(undo_count);
        let moves: Vec<Pos> = self.move_history.drain(..).take(keep).collect();

        self.board = Self::fresh_board(&self.config);
        self.winner = None;
        self.last_move = None;
        self.suggested_move = None;

        for pos in moves {
            if let Err(e) = self.execute_move(pos) {
                warn!("replay failed at {pos}: {e}");
                break;
            }
        }

        self.move_timer.start();
    }
}
