//! Tick-driven game engine.
//!
//! One call to [`GameEngine::tick`] is one pass of the main loop:
//! sample input → debounce → move/rotate/soft drop → gravity →
//! (lock → line clear → spawn). The engine never sleeps; gravity is a
//! timestamp comparison against the caller's clock.

use arrayvec::ArrayVec;
use tracing::{debug, info, trace};

use crate::debounce::{Fired, InputDebouncer};
use crate::device::{InputSource, Tone};
use crate::game_state::GameState;
use crate::gravity::GravityScheduler;
use crate::rng::PieceSource;
use crate::types::{Direction, GameAction, FALL_INTERVAL_MS};

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Board or active piece changed; the caller should draw a frame
    pub render: bool,
    /// Tone to forward to the tone device
    pub tone: Option<Tone>,
    /// A piece was locked into the board
    pub locked: bool,
    /// Rows removed by the lock
    pub lines_cleared: usize,
    /// The next piece did not fit and the board was wiped
    pub board_reset: bool,
}

/// Turn this tick's fired directions into at most one horizontal move, one
/// rotation and one soft drop, in that order. Left wins over right.
pub fn plan_actions(fired: Fired) -> ArrayVec<GameAction, 3> {
    let horizontal = [Direction::Left, Direction::Right]
        .into_iter()
        .find(|&d| fired.contains(d));
    let others = [Direction::Up, Direction::Down]
        .into_iter()
        .filter(|&d| fired.contains(d));

    let mut actions = ArrayVec::new();
    for direction in horizontal.into_iter().chain(others) {
        actions.push(direction.action());
    }
    actions
}

/// Owns the game state and everything that advances it.
#[derive(Debug, Clone)]
pub struct GameEngine<P> {
    state: GameState,
    debouncer: InputDebouncer,
    gravity: GravityScheduler,
    pieces: P,
    started: bool,
}

impl<P: PieceSource> GameEngine<P> {
    /// Engine with the default 700ms gravity
    pub fn new(pieces: P) -> Self {
        Self::with_fall_interval(pieces, FALL_INTERVAL_MS as u64)
    }

    pub fn with_fall_interval(pieces: P, fall_interval_ms: u64) -> Self {
        Self {
            state: GameState::new(),
            debouncer: InputDebouncer::new(),
            gravity: GravityScheduler::new(fall_interval_ms),
            pieces,
            started: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable state access for setting up positions.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn gravity(&self) -> &GravityScheduler {
        &self.gravity
    }

    pub fn started(&self) -> bool {
        self.started
    }

    /// Spawn the first piece and start the gravity clock.
    pub fn start(&mut self, now_ms: u64) -> TickReport {
        self.started = true;
        self.gravity.arm(now_ms);
        let kind = self.pieces.next_kind();
        let board_reset = self.state.spawn(kind);
        info!(kind = kind.as_str(), "game started");
        TickReport {
            render: true,
            board_reset,
            ..TickReport::default()
        }
    }

    /// Throw the current game away and start over on an empty board.
    pub fn restart(&mut self, now_ms: u64) -> TickReport {
        self.state.reset();
        self.debouncer = InputDebouncer::new();
        info!("game restarted");
        self.start(now_ms)
    }

    /// Run one tick against a live input source.
    pub fn tick(&mut self, input: &mut impl InputSource, now_ms: u64) -> TickReport {
        let fired = self.debouncer.poll(input);
        self.step(fired, now_ms)
    }

    /// Run one tick with already debounced input.
    pub fn step(&mut self, fired: Fired, now_ms: u64) -> TickReport {
        if !self.started {
            return self.start(now_ms);
        }

        let mut report = TickReport::default();

        for action in plan_actions(fired) {
            if !self.state.apply_action(action) {
                trace!(action = action.as_str(), "action dropped");
                continue;
            }
            report.render = true;
            if action == GameAction::SoftDrop {
                report.tone = Some(Tone::SOFT_DROP);
            }
        }

        if self.gravity.due_for_fall(now_ms) {
            self.gravity.reset(now_ms);
            report.render = true;
            if !self.state.try_move(0, 1) {
                report.locked = true;
                report.lines_cleared = self.state.lock();
                if report.lines_cleared > 0 {
                    debug!(lines = report.lines_cleared, "rows cleared");
                }
                let kind = self.pieces.next_kind();
                report.board_reset = self.state.spawn(kind);
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedPieces;
    use crate::types::PieceKind;

    fn fired(directions: &[Direction]) -> Fired {
        let mut f = Fired::NONE;
        for &d in directions {
            f.insert(d);
        }
        f
    }

    #[test]
    fn plan_prefers_left_over_right() {
        let actions = plan_actions(fired(&[Direction::Right, Direction::Left]));
        assert_eq!(actions.as_slice(), &[GameAction::MoveLeft]);

        let actions = plan_actions(fired(&Direction::ALL));
        assert_eq!(
            actions.as_slice(),
            &[GameAction::MoveLeft, GameAction::RotateCw, GameAction::SoftDrop]
        );
        assert!(plan_actions(Fired::NONE).is_empty());
    }

    #[test]
    fn first_step_starts_the_game() {
        let mut engine = GameEngine::new(ScriptedPieces::repeat(PieceKind::T));
        let report = engine.step(Fired::NONE, 0);
        assert!(report.render);
        assert!(engine.started());
        assert!(engine.state().active().is_some());
    }

    #[test]
    fn idle_tick_requests_no_render() {
        let mut engine = GameEngine::new(ScriptedPieces::repeat(PieceKind::T));
        engine.start(0);
        assert_eq!(engine.step(Fired::NONE, 80), TickReport::default());
    }

    #[test]
    fn soft_drop_plays_tone_only_when_it_moves() {
        let mut engine = GameEngine::new(ScriptedPieces::repeat(PieceKind::O));
        engine.start(0);
        let report = engine.step(fired(&[Direction::Down]), 80);
        assert!(report.render);
        assert_eq!(report.tone, Some(Tone::SOFT_DROP));

        // Rest the piece on the floor; further soft drops are dropped and never lock.
        while engine.state_mut().try_move(0, 1) {}
        let report = engine.step(fired(&[Direction::Down]), 160);
        assert_eq!(report, TickReport::default());
        assert_eq!(engine.state().pieces_locked(), 0);
    }

    #[test]
    fn gravity_moves_then_locks() {
        let mut engine = GameEngine::with_fall_interval(ScriptedPieces::repeat(PieceKind::I), 100);
        engine.start(0);

        let report = engine.step(Fired::NONE, 100);
        assert!(report.render);
        assert!(!report.locked);
        assert_eq!(engine.state().active().unwrap().y, 1);

        // Not due again until another interval has passed.
        assert!(!engine.step(Fired::NONE, 150).render);

        while engine.state_mut().try_move(0, 1) {}
        let report = engine.step(Fired::NONE, 300);
        assert!(report.render && report.locked);
        assert_eq!(engine.state().pieces_locked(), 1);
        assert_eq!(engine.state().active().unwrap().y, 0);

        // The failed fall re-armed the timer: the new piece waits a full interval.
        assert!(!engine.gravity().due_for_fall(399));
        assert!(!engine.step(Fired::NONE, 399).render);
        assert_eq!(engine.state().active().unwrap().y, 0);
        assert!(engine.step(Fired::NONE, 400).render);
        assert_eq!(engine.state().active().unwrap().y, 1);
    }

    #[test]
    fn restart_clears_board() {
        let mut engine = GameEngine::new(ScriptedPieces::repeat(PieceKind::O));
        engine.start(0);
        engine.state_mut().board_mut().set(0, 19, 1);
        let report = engine.restart(1_000);
        assert!(report.render);
        assert_eq!(engine.state().board().occupied_count(), 0);
        assert!(!engine.gravity().due_for_fall(1_000));
    }
}
