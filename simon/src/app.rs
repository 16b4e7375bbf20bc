use std::time::Duration;

use engine::app::{AppContext, GameApp};
use engine::graphics::{CpuRenderer, Renderer2d};
use engine::surface::{RgbaBufferSurface, SurfaceSize};
use engine::view_tree::{ViewTree, draw_view};

use crate::board::{Board, BoardAction, COLOR_BACKGROUND};
use crate::controller::{Effect, GameController};
use crate::sound::TonePlayer;

/// Everything that changes from frame to frame.
#[derive(Debug, Clone)]
pub struct SimonState {
    pub controller: GameController,
    pub board: Board,
}

impl SimonState {
    pub fn new(controller: GameController, size: SurfaceSize) -> Self {
        Self {
            controller,
            board: Board::new(size),
        }
    }

    /// Runs one frame: advances timers by `dt`, then applies the clicked
    /// actions in order.
    ///
    /// Highlights are applied to the board here; the returned effects still
    /// include them so callers see the full picture. A restart discards every
    /// effect gathered earlier in the same frame.
    pub fn step(&mut self, dt: Duration, actions: &[BoardAction]) -> Vec<Effect> {
        self.board.tick(dt);
        let mut effects = self.controller.tick(dt);

        for &action in actions {
            match action {
                BoardAction::Tile(color) => effects.extend(self.controller.tile_click(color)),
                BoardAction::StartOrRestart => {
                    effects.clear();
                    self.controller.start_or_restart();
                    self.board.clear_highlights();
                }
            }
        }

        self.board.apply(&effects);
        effects
    }

    pub fn view(&self) -> ViewTree<BoardAction> {
        self.board.build_view(&self.controller)
    }

    /// Draws the current frame into an offscreen buffer.
    pub fn render_into(&self, surface: &mut RgbaBufferSurface) {
        let size = surface.size();
        let view = self.view();
        let mut gfx = CpuRenderer::new(surface.frame_mut(), size);
        gfx.clear(COLOR_BACKGROUND);
        draw_view(&view, &mut gfx);
    }
}

pub fn play_tones<P: TonePlayer + ?Sized>(player: &mut P, effects: &[Effect]) {
    for effect in effects {
        if let Effect::PlayTone(color) = *effect {
            player.play_tone(color);
        }
    }
}

/// Windowed front end: wires the board's clicks into the controller and the
/// controller's tones into `P`.
pub struct SimonApp<P> {
    tones: P,
    seed: Option<u64>,
}

impl<P: TonePlayer> SimonApp<P> {
    pub fn new(tones: P, seed: Option<u64>) -> Self {
        Self { tones, seed }
    }
}

impl<P: TonePlayer> GameApp for SimonApp<P> {
    type State = SimonState;
    type Action = BoardAction;
    type Effect = Effect;

    fn init_state(&mut self, ctx: &mut AppContext) -> Self::State {
        let controller = match self.seed {
            Some(seed) => GameController::with_seed(seed),
            None => GameController::new(),
        };
        SimonState::new(controller, ctx.surface_size)
    }

    fn build_view(&self, state: &Self::State, _surface: SurfaceSize) -> ViewTree<Self::Action> {
        state.view()
    }

    fn update_state(
        &mut self,
        state: &mut Self::State,
        dt: Duration,
        actions: &[Self::Action],
    ) -> Vec<Self::Effect> {
        state.step(dt, actions)
    }

    fn handle_effects(&mut self, effects: Vec<Self::Effect>, _ctx: &mut AppContext) {
        play_tones(&mut self.tones, &effects);
    }

    fn on_resize(&mut self, state: &mut Self::State, size: SurfaceSize) {
        state.board.resize(size);
    }
}
