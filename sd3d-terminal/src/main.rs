/// SD3D Terminal Preview
///
/// Parses a scene-description file and previews it as ASCII in the terminal.
/// Controls:
///   - WASD / Arrow Keys: Orbit the camera
///   - Q/ESC: Quit

use std::env;
use std::io;

use simplelog::TermLogger;

use sd3d_core::reader;
use sd3d_terminal::TerminalApp;

const DEMO_SCENE: &str = include_str!("../scenes/demo.txt");

fn main() -> io::Result<()> {
    TermLogger::init(
        simplelog::LevelFilter::Warn,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let args: Vec<String> = env::args().collect();
    let scene = match args.get(1) {
        Some(path) => reader::load_scene(path)
            .map_err(|e| io::Error::new(io::ErrorKind::NotFound, e.to_string()))?,
        None => {
            eprintln!("Usage: {} <scene-file>", args[0]);
            log::warn!("no scene file provided, using built-in demo scene");
            reader::parse_scene(DEMO_SCENE)
        }
    };

    println!(
        "Loaded {} objects and {} lights",
        scene.objects.len(),
        scene.lights.len()
    );
    println!("Starting terminal preview (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(scene)?;
    app.run()
}
