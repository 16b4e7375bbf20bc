use std::error::Error;
use std::time::{Duration, Instant};

use pixels::{PixelsBuilder, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::graphics::{Color, Renderer2d};
use crate::pixels_renderer::PixelsRenderer2d;
use crate::surface::SurfaceSize;
use crate::view_tree::{ViewTree, draw_view, hit_test_actions};

/// Upper bound on a single frame's delta so a stalled window (dragging,
/// suspend) doesn't fast-forward gameplay timers in one jump.
pub const MAX_FRAME_DT: Duration = Duration::from_millis(250);

pub struct AppConfig {
    pub title: String,
    pub desired_size: PhysicalSize<u32>,
    pub clamp_to_monitor: bool,
    pub vsync: bool,
    pub clear_color: Color,
}

pub struct AppContext {
    pub window: Window,
    pub renderer: PixelsRenderer2d,
    pub surface_size: SurfaceSize,
}

/// Mouse state gathered between two redraws.
#[derive(Debug, Clone, Default)]
struct InputFrame {
    mouse_pos: Option<(u32, u32)>,
    /// Cursor position of every left-button release, oldest first.
    clicks: Vec<(u32, u32)>,
}

/// A game driven by `run_game`.
///
/// Each frame: build the view, hit-test every click against it (one action per
/// click, topmost node wins), update state with those actions, build the view
/// again and draw it, then hand the returned effects back for side effects
/// (audio).
pub trait GameApp {
    type State;
    type Action: Clone;
    type Effect;

    fn init_state(&mut self, ctx: &mut AppContext) -> Self::State;

    fn build_view(&self, state: &Self::State, surface: SurfaceSize) -> ViewTree<Self::Action>;

    fn update_state(
        &mut self,
        state: &mut Self::State,
        dt: Duration,
        actions: &[Self::Action],
    ) -> Vec<Self::Effect>;

    fn render(&mut self, view: &ViewTree<Self::Action>, renderer: &mut dyn Renderer2d) {
        draw_view(view, renderer);
    }

    fn handle_effects(&mut self, _effects: Vec<Self::Effect>, _ctx: &mut AppContext) {}

    fn on_resize(&mut self, _state: &mut Self::State, _size: SurfaceSize) {}
}

pub fn run_game<G: GameApp + 'static>(config: AppConfig, mut game: G) -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoop::new();
    let initial_size = match event_loop.primary_monitor().map(|m| m.size()) {
        Some(monitor) if config.clamp_to_monitor => PhysicalSize::new(
            config.desired_size.width.min(monitor.width),
            config.desired_size.height.min(monitor.height),
        ),
        _ => config.desired_size,
    };
    let window = WindowBuilder::new()
        .with_title(config.title)
        .with_inner_size(initial_size)
        .build(&event_loop)?;

    let window_size = window.inner_size();
    let surface_size = SurfaceSize::new(window_size.width, window_size.height);

    let surface_texture = SurfaceTexture::new(surface_size.width, surface_size.height, &window);
    let pixels = PixelsBuilder::new(surface_size.width, surface_size.height, surface_texture)
        .enable_vsync(config.vsync)
        .build()?;
    let renderer = PixelsRenderer2d::new(pixels, surface_size)?;

    let mut ctx = AppContext {
        window,
        renderer,
        surface_size,
    };
    let mut state = game.init_state(&mut ctx);
    let mut input = InputFrame::default();
    let mut last_frame = Instant::now();
    let clear_color = config.clear_color;

    tracing::info!(
        width = surface_size.width,
        height = surface_size.height,
        "window opened"
    );

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match &event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    tracing::info!("close requested");
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    let size = SurfaceSize::new(size.width, size.height);
                    if let Err(err) = ctx.renderer.resize(size) {
                        tracing::warn!(%err, "resize failed");
                    }
                    ctx.surface_size = ctx.renderer.size();
                    game.on_resize(&mut state, ctx.surface_size);
                    ctx.window.request_redraw();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    input.mouse_pos = Some((position.x.max(0.0) as u32, position.y.max(0.0) as u32));
                }
                WindowEvent::CursorLeft { .. } => {
                    input.mouse_pos = None;
                }
                WindowEvent::MouseInput {
                    state: ElementState::Released,
                    button: MouseButton::Left,
                    ..
                } => {
                    if let Some(pos) = input.mouse_pos {
                        input.clicks.push(pos);
                    }
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                let now = Instant::now();
                let dt = now.saturating_duration_since(last_frame).min(MAX_FRAME_DT);
                last_frame = now;

                let view_for_input = game.build_view(&state, ctx.surface_size);
                let actions: Vec<G::Action> = input
                    .clicks
                    .drain(..)
                    .filter_map(|pos| hit_test_actions(&view_for_input, pos).into_iter().next())
                    .collect();
                let effects = game.update_state(&mut state, dt, &actions);

                let view_for_render = game.build_view(&state, ctx.surface_size);
                ctx.renderer.draw_frame(|gfx| {
                    gfx.clear(clear_color);
                    game.render(&view_for_render, gfx);
                });
                if let Err(err) = ctx.renderer.present() {
                    tracing::warn!(%err, "present failed");
                }

                game.handle_effects(effects, &mut ctx);
            }
            Event::MainEventsCleared => {
                ctx.window.request_redraw();
            }
            _ => {}
        }
    })
}
