//! App state and main loop: input handling, poll results, per-frame animation and drawing.
//!
//! `App` is the single owner of every piece of mutable state. Poll results
//! arrive as [`PollOutcome`] messages and are applied in [`App::handle_poll`];
//! the frame loop only advances motion (rotation, camera damping, particles)
//! and repaints.

use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::Config;
use crate::particles::ParticleCloud;
use crate::poller::{spawn_poller, MetricsClient, PollOutcome};
use crate::scene::{camera::Viewport, DrawList, Scene};
use crate::types::MetricsSnapshot;
use crate::ui::{
    dashboard::draw_dashboard,
    header::{draw_error_banner, draw_header, draw_status},
    layout,
    viewport::{draw_viewport, viewport_for},
};
use crate::visuals::reconcile;

// ~60 frames per second
const FRAME: Duration = Duration::from_millis(16);

/// The animation loop is either running or fully stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    Running,
    Stopped,
}

pub struct App {
    agent_url: String,

    // Written only by handle_poll
    last_snapshot: Option<MetricsSnapshot>,
    fetch_error: bool,

    scene: Scene,
    particles: ParticleCloud,
    // Last painted frame; repainted as-is while stopped
    frame: DrawList,

    animation: Animation,
    auto_rotate: bool,
    started: Instant,
    rng: StdRng,

    should_quit: bool,
}

impl App {
    pub fn new(agent_url: &str, auto_rotate: bool) -> Self {
        Self::with_rng(agent_url, auto_rotate, StdRng::from_entropy())
    }

    pub fn with_rng(agent_url: &str, auto_rotate: bool, mut rng: StdRng) -> Self {
        let particles = ParticleCloud::new(&mut rng);
        Self {
            agent_url: agent_url.to_string(),
            last_snapshot: None,
            fetch_error: false,
            scene: Scene::new(Viewport::new(1.0, 1.0)),
            particles,
            frame: DrawList::default(),
            animation: Animation::Running,
            auto_rotate,
            started: Instant::now(),
            rng,
            should_quit: false,
        }
    }

    pub fn last_snapshot(&self) -> Option<&MetricsSnapshot> {
        self.last_snapshot.as_ref()
    }

    pub fn fetch_error(&self) -> bool {
        self.fetch_error
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn particles(&self) -> &ParticleCloud {
        &self.particles
    }

    pub fn animation(&self) -> Animation {
        self.animation
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn elapsed_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    /// CPU percent the particles follow; zero until the first snapshot.
    pub fn particle_cpu(&self) -> f64 {
        self.last_snapshot.map(|s| s.cpu_percent).unwrap_or(0.0)
    }

    /// Apply one poll result using the current clock.
    pub fn handle_poll(&mut self, outcome: PollOutcome) {
        let now = self.elapsed_ms();
        self.handle_poll_at(outcome, now);
    }

    /// Success replaces the snapshot, clears the error flag and reconciles the
    /// scene. Failure only logs and raises the flag.
    pub fn handle_poll_at(&mut self, outcome: PollOutcome, elapsed_ms: f64) {
        match outcome {
            PollOutcome::Snapshot(s) => {
                if self.fetch_error {
                    info!("metrics agent reachable again");
                }
                self.last_snapshot = Some(s);
                self.fetch_error = false;
                self.scene.apply(&reconcile(&s, elapsed_ms));
            }
            PollOutcome::Failed(e) => {
                warn!("metrics update failed: {e}");
                self.fetch_error = true;
            }
        }
    }

    pub fn toggle_animation(&mut self) {
        self.animation = match self.animation {
            Animation::Running => Animation::Stopped,
            Animation::Stopped => Animation::Running,
        };
    }

    pub fn toggle_auto_rotate(&mut self) {
        self.auto_rotate = !self.auto_rotate;
    }

    pub fn handle_key(&mut self, k: KeyEvent) {
        if k.kind == KeyEventKind::Release {
            return;
        }
        match k.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => self.toggle_animation(),
            KeyCode::Char('a') | KeyCode::Char('A') => self.toggle_auto_rotate(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.scene.reset_camera(),
            KeyCode::Left => self.scene.controls.rotate_left(),
            KeyCode::Right => self.scene.controls.rotate_right(),
            KeyCode::Up => self.scene.controls.rotate_up(),
            KeyCode::Down => self.scene.controls.rotate_down(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.scene.controls.zoom_in(),
            KeyCode::Char('-') => self.scene.controls.zoom_out(),
            _ => {}
        }
    }

    /// One iteration of the animation loop. While stopped nothing moves and
    /// the previous frame is kept.
    pub fn tick(&mut self, viewport: Viewport) -> &DrawList {
        self.scene.resize(viewport);
        if self.animation == Animation::Running {
            self.scene.advance(self.auto_rotate);
            let cpu = self.particle_cpu();
            self.particles.step(cpu, &mut self.rng);
            self.frame = self.scene.render(&self.particles);
        }
        &self.frame
    }

    pub async fn run(&mut self, config: &Config) -> anyhow::Result<()> {
        let client = MetricsClient::new(&config.url)?;
        info!("polling {} every {:?}", client.endpoint(), config.interval);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let poller = spawn_poller(client, config.interval, tx);

        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // Main loop
        let res = self.event_loop(&mut terminal, &mut rx).await;

        // Teardown
        poller.abort();
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        rx: &mut UnboundedReceiver<PollOutcome>,
    ) -> anyhow::Result<()> {
        loop {
            // Input (non-blocking)
            while event::poll(Duration::ZERO)? {
                if let Event::Key(k) = event::read()? {
                    self.handle_key(k);
                }
            }
            if self.should_quit {
                break;
            }

            // Poll results, in arrival order
            loop {
                match rx.try_recv() {
                    Ok(outcome) => self.handle_poll(outcome),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        anyhow::bail!("metrics poller stopped")
                    }
                }
            }

            // Layout is recomputed every frame so the camera always matches the terminal size
            let size = terminal.size()?;
            let panes = layout(Rect::new(0, 0, size.width, size.height), self.fetch_error);
            self.tick(viewport_for(panes.viewport));

            terminal.draw(|f| self.draw(f))?;

            sleep(FRAME).await;
        }

        Ok(())
    }

    pub fn draw(&self, f: &mut ratatui::Frame<'_>) {
        let panes = layout(f.area(), self.fetch_error);

        draw_header(f, panes.header, &self.agent_url, self.last_snapshot.is_some());
        if self.fetch_error {
            draw_error_banner(f, panes.banner);
        }
        draw_viewport(f, panes.viewport, &self.frame);
        draw_dashboard(f, panes.dashboard, self.last_snapshot.as_ref());
        draw_status(
            f,
            panes.status,
            self.animation == Animation::Running,
            self.auto_rotate,
        );
    }
}
