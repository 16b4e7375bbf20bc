use std::time::Duration;

use engine::schedule::Scheduler;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::color::TileColor;

/// Gap between consecutive playback flashes. The first flash also waits this long.
pub const PLAYBACK_STEP_INTERVAL: Duration = Duration::from_millis(500);
/// How long a tile stays lit after a flash or click.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(250);
/// Pause after the last playback flash before input opens.
pub const INPUT_SETTLE_DELAY: Duration = Duration::from_millis(250);
/// Pause between finishing a round and the next round's playback.
pub const ROUND_ADVANCE_DELAY: Duration = Duration::from_millis(500);

pub const IDLE_MESSAGE: &str = "Click 'Start' to play!";
pub const WATCH_MESSAGE: &str = "Watch the sequence...";
pub const YOUR_TURN_MESSAGE: &str = "Your turn!";
pub const ROUND_WON_MESSAGE: &str = "Good job! Moving to the next level...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Playing,
    AwaitingInput,
    RoundWon,
    GameOver,
}

/// Side effects the presentation layer must carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    PlayTone(TileColor),
    Highlight(TileColor),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    PlaybackStep(usize),
    OpenInput,
    NextRound,
}

/// Owns one Simon session: sequence, cursor, level, phase and pending timers.
///
/// Time only moves through `tick`, so the whole state machine is deterministic
/// given a seed and a sequence of calls.
#[derive(Debug, Clone)]
pub struct GameController {
    rng: StdRng,
    phase: Phase,
    sequence: Vec<TileColor>,
    cursor: usize,
    level: u32,
    final_level: Option<u32>,
    message: String,
    tasks: Scheduler<Task>,
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}

impl GameController {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            phase: Phase::Idle,
            sequence: Vec::new(),
            cursor: 0,
            level: 1,
            final_level: None,
            message: IDLE_MESSAGE.to_string(),
            tasks: Scheduler::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn sequence(&self) -> &[TileColor] {
        &self.sequence
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Level reached by the last failed game, until the next restart.
    pub fn final_level(&self) -> Option<u32> {
        self.final_level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn action_label(&self) -> &'static str {
        if self.phase == Phase::GameOver {
            "Restart Game"
        } else {
            "Start Game"
        }
    }

    pub fn accepts_input(&self) -> bool {
        self.phase == Phase::AwaitingInput
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Starts a new game from any phase, discarding the previous session and
    /// every timer it still had pending.
    pub fn start_or_restart(&mut self) {
        let cancelled = self.tasks.cancel_all();
        let first = self.random_color();
        self.sequence = vec![first];
        self.cursor = 0;
        self.level = 1;
        self.final_level = None;
        self.message = WATCH_MESSAGE.to_string();
        debug!(cancelled, "game started");
        self.begin_playback();
    }

    /// Evaluates one tile press. Ignored unless the game is waiting for input.
    pub fn tile_click(&mut self, color: TileColor) -> Vec<Effect> {
        if !self.accepts_input() {
            debug!(%color, phase = ?self.phase, "tile click ignored");
            return Vec::new();
        }

        let effects = flash(color);
        if color != self.sequence[self.cursor] {
            self.phase = Phase::GameOver;
            self.final_level = Some(self.level);
            self.message = format!("Game Over! You reached Level {}", self.level);
            info!(
                level = self.level,
                expected = %self.sequence[self.cursor],
                got = %color,
                "game over"
            );
            return effects;
        }

        self.cursor += 1;
        if self.cursor == self.sequence.len() {
            self.phase = Phase::RoundWon;
            self.level += 1;
            self.message = ROUND_WON_MESSAGE.to_string();
            debug!(level = self.level, "round won");
            self.tasks.schedule(ROUND_ADVANCE_DELAY, Task::NextRound);
        }
        effects
    }

    /// Advances the game clock by `dt`, running every timer that falls due.
    pub fn tick(&mut self, dt: Duration) -> Vec<Effect> {
        let deadline = self.tasks.now().saturating_add(dt);
        let mut effects = Vec::new();
        while let Some(task) = self.tasks.pop_due(deadline) {
            self.run_task(task, &mut effects);
        }
        self.tasks.advance_to(deadline);
        effects
    }

    fn run_task(&mut self, task: Task, effects: &mut Vec<Effect>) {
        match task {
            Task::PlaybackStep(index) => {
                let Some(&color) = self.sequence.get(index) else {
                    return;
                };
                effects.extend(flash(color));
                if index + 1 < self.sequence.len() {
                    self.tasks
                        .schedule(PLAYBACK_STEP_INTERVAL, Task::PlaybackStep(index + 1));
                } else {
                    self.tasks.schedule(INPUT_SETTLE_DELAY, Task::OpenInput);
                }
            }
            Task::OpenInput => {
                self.phase = Phase::AwaitingInput;
                self.cursor = 0;
                self.message = YOUR_TURN_MESSAGE.to_string();
                debug!(length = self.sequence.len(), "awaiting input");
            }
            Task::NextRound => {
                let next = self.random_color();
                self.sequence.push(next);
                self.cursor = 0;
                self.begin_playback();
            }
        }
    }

    fn begin_playback(&mut self) {
        self.phase = Phase::Playing;
        debug!(length = self.sequence.len(), "playback started");
        self.tasks
            .schedule(PLAYBACK_STEP_INTERVAL, Task::PlaybackStep(0));
    }

    fn random_color(&mut self) -> TileColor {
        TileColor::ALL[self.rng.gen_range(0..TileColor::ALL.len())]
    }

    /// Replaces the session with a known sequence, ready for input.
    #[doc(hidden)]
    pub fn set_sequence_for_test(&mut self, sequence: Vec<TileColor>) {
        self.tasks.cancel_all();
        self.level = sequence.len().max(1) as u32;
        self.sequence = sequence;
        self.cursor = 0;
        self.final_level = None;
        self.phase = Phase::AwaitingInput;
        self.message = YOUR_TURN_MESSAGE.to_string();
    }
}

fn flash(color: TileColor) -> Vec<Effect> {
    vec![Effect::PlayTone(color), Effect::Highlight(color)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_with_prompt() {
        let game = GameController::with_seed(1);
        assert_eq!(game.phase(), Phase::Idle);
        assert!(game.sequence().is_empty());
        assert_eq!(game.level(), 1);
        assert_eq!(game.message(), IDLE_MESSAGE);
        assert_eq!(game.action_label(), "Start Game");
        assert_eq!(game.pending_tasks(), 0);
    }

    #[test]
    fn same_seed_yields_same_sequence() {
        let mut a = GameController::with_seed(42);
        let mut b = GameController::with_seed(42);
        a.start_or_restart();
        b.start_or_restart();
        assert_eq!(a.sequence(), b.sequence());
    }

    #[test]
    fn playback_flashes_first_step_after_one_interval() {
        let mut game = GameController::with_seed(3);
        game.start_or_restart();
        let first = game.sequence()[0];

        assert!(game.tick(PLAYBACK_STEP_INTERVAL - Duration::from_millis(1)).is_empty());
        assert_eq!(
            game.tick(Duration::from_millis(1)),
            vec![Effect::PlayTone(first), Effect::Highlight(first)]
        );
        assert_eq!(game.phase(), Phase::Playing);

        game.tick(INPUT_SETTLE_DELAY);
        assert_eq!(game.phase(), Phase::AwaitingInput);
        assert_eq!(game.message(), YOUR_TURN_MESSAGE);
    }

    #[test]
    fn click_during_round_won_is_ignored() {
        let mut game = GameController::with_seed(0);
        game.set_sequence_for_test(vec![TileColor::Red]);
        game.tile_click(TileColor::Red);
        assert_eq!(game.phase(), Phase::RoundWon);

        assert!(game.tile_click(TileColor::Blue).is_empty());
        assert_eq!(game.phase(), Phase::RoundWon);
        assert_eq!(game.cursor(), 1);
    }
}
