/// Terminal render driver for spinning wireframes
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::debug;
use wire3d_core::{project_scene, Camera, Scene, Turntable, Viewport, WireError};

pub mod renderer;

pub use renderer::CellRenderer;

/// Map core errors onto `io::Error` for the binary's `main`
pub fn into_io_error(err: WireError) -> io::Error {
    match err {
        WireError::Io(e) => e,
        WireError::InvalidConfig(_) => io::Error::new(io::ErrorKind::InvalidInput, err),
        other => io::Error::new(io::ErrorKind::InvalidData, other),
    }
}

/// Per-run settings for [`TerminalApp`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppConfig {
    pub camera: Camera,
    pub viewport: Viewport,
    /// Degrees turned about the object's own center each frame
    pub step_degrees: f64,
    /// Stop after this many frames; `None` runs until quit
    pub frames: Option<u64>,
    pub fps: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            camera: Camera::new(2.0),
            viewport: Viewport::default(),
            step_degrees: 2.0,
            frames: None,
            fps: 30,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), WireError> {
        self.camera.validate()?;
        self.viewport.validate()?;
        if !self.step_degrees.is_finite() {
            return Err(WireError::InvalidConfig(format!(
                "rotation step must be finite, got {}",
                self.step_degrees
            )));
        }
        if self.fps == 0 {
            return Err(WireError::InvalidConfig("fps must be at least 1".into()));
        }
        Ok(())
    }
}

/// Main application struct for terminal wireframe rendering
pub struct TerminalApp {
    turntable: Turntable,
    camera: Camera,
    viewport: Viewport,
    renderer: CellRenderer,
    origin: (u16, u16),
    frame_limit: Option<u64>,
    frame_time: Duration,
    running: bool,
    paused: bool,
    frames_drawn: u64,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: Scene, config: AppConfig) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Self::with_size(scene, config, cols, rows)
    }

    /// Build the app for a terminal of `cols x rows` cells
    pub fn with_size(scene: Scene, config: AppConfig, cols: u16, rows: u16) -> io::Result<Self> {
        config.validate().map_err(into_io_error)?;

        // Row 0 is the status line
        let (width, height) = fit_grid(cols, rows.saturating_sub(1));
        let origin = ((cols - width) / 2, 1 + (rows.saturating_sub(1) - height) / 2);
        debug!(cols, rows, width, height, "sized render grid");

        Ok(Self {
            turntable: Turntable::new(scene, config.step_degrees),
            camera: config.camera,
            viewport: config.viewport,
            renderer: CellRenderer::new(width as usize, height as usize),
            origin,
            frame_limit: config.frames,
            frame_time: Duration::from_secs_f64(1.0 / config.fps as f64),
            running: true,
            paused: false,
            frames_drawn: 0,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn scene(&self) -> &Scene {
        self.turntable.current()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        // First frame is the scene as handed in
        self.render()?;

        while self.running {
            let frame_start = Instant::now();

            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            self.update();
            self.render()?;

            // Hand the frame to the terminal and wait out the rest of the slot
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let event = event::read()?;
        self.handle_event(&event);
        Ok(())
    }

    /// Only key presses count; repeat and release events are ignored
    fn handle_event(&mut self, event: &Event) {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        {
            self.handle_key(*code);
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char(' ') => {
                self.paused = !self.paused;
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.camera.focal_length *= 1.1;
            }
            KeyCode::Char('-') => {
                self.camera.focal_length /= 1.1;
            }
            KeyCode::Char('a') | KeyCode::Left => {
                let step = self.turntable.step_degrees().abs();
                self.turntable.set_step_degrees(-step);
            }
            KeyCode::Char('d') | KeyCode::Right => {
                let step = self.turntable.step_degrees().abs();
                self.turntable.set_step_degrees(step);
            }
            _ => {}
        }
    }

    fn update(&mut self) {
        if self.paused {
            return;
        }
        self.turntable.advance();
        self.frames_drawn += 1;
        if self.frame_limit.is_some_and(|limit| self.frames_drawn >= limit) {
            self.running = false;
        }
    }

    /// Project the current frame into the cell grid
    fn rasterize(&mut self) {
        let segments = project_scene(self.turntable.current(), &self.camera);
        self.renderer.clear();
        self.renderer.render_segments(&segments, &self.viewport);
    }

    fn render(&mut self) -> io::Result<()> {
        self.rasterize();
        let mut stdout = stdout();
        self.write_frame(&mut stdout)?;
        stdout.flush()
    }

    /// Queue the grid and status line.
    ///
    /// Grid rows are rewritten in full every frame, so only the status row
    /// is cleared. The screen is cleared once when the loop starts.
    fn write_frame<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.renderer.draw(out, self.origin.0, self.origin.1)?;

        // Draw UI overlay
        let scene = self.turntable.current();
        queue!(
            out,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "wire3d | {} vertices {} edges | f={:.2} | FPS: {:.1} | Space=Pause +/-=Focal A/D=Direction Q=Quit",
                scene.len(),
                scene.edge_count(),
                self.camera.focal_length,
                self.fps
            )),
            ResetColor
        )?;
        Ok(())
    }
}

/// Largest grid with roughly square cells on screen.
///
/// Terminal cells are about twice as tall as wide, so a square viewport
/// wants twice as many columns as rows.
pub fn fit_grid(cols: u16, rows: u16) -> (u16, u16) {
    let height = rows.min(cols / 2);
    (height.saturating_mul(2).min(cols), height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use wire3d_core::normalize_with;

    fn app(config: AppConfig) -> TerminalApp {
        let scene = normalize_with(&Scene::cube(), 10.0, 6.0).unwrap();
        TerminalApp::with_size(scene, config, 80, 25).unwrap()
    }

    #[test]
    fn test_fit_grid() {
        assert_eq!(fit_grid(80, 24), (48, 24));
        assert_eq!(fit_grid(40, 30), (40, 20));
        assert_eq!(fit_grid(0, 10), (0, 0));
    }

    #[test]
    fn test_frame_limit_stops_loop() {
        let mut app = app(AppConfig {
            frames: Some(3),
            ..AppConfig::default()
        });
        for _ in 0..3 {
            assert!(app.running);
            app.update();
        }
        assert!(!app.running);
    }

    #[test]
    fn test_pause_freezes_scene() {
        let mut app = app(AppConfig::default());
        app.handle_key(KeyCode::Char(' '));
        let before = app.scene().clone();
        app.update();
        assert_eq!(app.scene(), &before);

        app.handle_key(KeyCode::Char(' '));
        app.update();
        assert_ne!(app.scene(), &before);
    }

    #[test]
    fn test_only_key_presses_handled() {
        let mut app = app(AppConfig::default());
        let space = |kind| {
            Event::Key(KeyEvent::new_with_kind(
                KeyCode::Char(' '),
                KeyModifiers::NONE,
                kind,
            ))
        };

        app.handle_event(&space(KeyEventKind::Press));
        app.handle_event(&space(KeyEventKind::Release));
        assert!(app.paused);

        app.handle_event(&space(KeyEventKind::Repeat));
        assert!(app.paused);

        app.handle_event(&space(KeyEventKind::Press));
        assert!(!app.paused);
    }

    #[test]
    fn test_frame_does_not_clear_whole_screen() {
        let mut app = app(AppConfig::default());
        app.rasterize();
        let mut out = Vec::new();
        app.write_frame(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        // ESC[2J clears everything, ESC[2K only the status row
        assert!(!text.contains("\x1b[2J"));
        assert!(text.contains("\x1b[2K"));
        assert!(text.contains("wire3d |"));
    }

    #[test]
    fn test_keys_adjust_camera_and_direction() {
        let mut app = app(AppConfig::default());
        app.handle_key(KeyCode::Char('+'));
        assert!(app.camera().focal_length > 2.0);
        app.handle_key(KeyCode::Left);
        assert_eq!(app.turntable.step_degrees(), -2.0);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.turntable.step_degrees(), 2.0);
        app.handle_key(KeyCode::Esc);
        assert!(!app.running);
    }

    #[test]
    fn test_rasterize_draws_cube() {
        let mut app = app(AppConfig::default());
        app.rasterize();
        let renderer = &app.renderer;
        let lit = (0..renderer.height())
            .flat_map(|y| renderer.row(y).chars().collect::<Vec<_>>())
            .filter(|c| *c != ' ')
            .count();
        assert!(lit > 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let scene = Scene::cube();
        let config = AppConfig {
            camera: Camera::new(-1.0),
            ..AppConfig::default()
        };
        let err = TerminalApp::with_size(scene, config, 80, 25).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
