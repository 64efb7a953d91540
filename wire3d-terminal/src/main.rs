/// wire3d terminal viewer - spinning wireframe
///
/// Loads an OBJ file (or a built-in shape), fits it in front of the camera
/// and spins it about its own center.
/// Controls:
///   - Space: Pause
///   - +/-: Focal length
///   - A/D / Arrow Keys: Spin direction
///   - Q/ESC: Quit
use clap::{Parser, ValueEnum};
use std::io;
use std::path::PathBuf;
use wire3d_core::{load_obj_scene, normalize, Camera, NormalizeOptions, Scene, Viewport};
use wire3d_terminal::{into_io_error, AppConfig, TerminalApp};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Shape {
    Cube,
    Pyramid,
}

#[derive(Parser, Debug)]
#[command(name = "wire3d-terminal", version, about = "Spin a wireframe mesh in the terminal")]
struct Cli {
    /// Wavefront OBJ file to display
    path: Option<PathBuf>,

    /// Built-in shape used when no file is given
    #[arg(long, value_enum, default_value_t = Shape::Cube)]
    shape: Shape,

    /// Distance from the camera plane after normalization
    #[arg(long, default_value_t = 10.0)]
    distance: f64,

    /// Largest half-extent after normalization
    #[arg(long, default_value_t = 6.0)]
    scale: f64,

    /// Focal length (>1 narrows the field of view, <1 widens it)
    #[arg(long, default_value_t = 2.0)]
    focal_length: f64,

    /// Half width of the visible region
    #[arg(long, default_value_t = 5.0)]
    half_width: f64,

    /// Half height of the visible region
    #[arg(long, default_value_t = 5.0)]
    half_height: f64,

    /// Rotation applied once before the animation starts, in degrees
    #[arg(long, default_value_t = 130.0, allow_negative_numbers = true)]
    initial_angle: f64,

    /// Rotation per frame, in degrees
    #[arg(long, default_value_t = 2.0, allow_negative_numbers = true)]
    step: f64,

    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,
}

fn load_scene(cli: &Cli) -> io::Result<Scene> {
    let scene = match (&cli.path, cli.shape) {
        (Some(path), _) => load_obj_scene(path).map_err(into_io_error)?,
        (None, Shape::Cube) => Scene::cube(),
        (None, Shape::Pyramid) => Scene::pyramid(),
    };

    let options = NormalizeOptions::new(cli.distance, cli.scale);
    let scene = normalize(&scene, &options).map_err(into_io_error)?;
    Ok(scene.rotated_about_center(cli.initial_angle))
}

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let scene = load_scene(&cli)?;

    let config = AppConfig {
        camera: Camera::new(cli.focal_length),
        viewport: Viewport::new(cli.half_width, cli.half_height),
        step_degrees: cli.step,
        frames: cli.frames,
        fps: cli.fps,
    };

    let mut app = TerminalApp::new(scene, config)?;
    app.run()
}
