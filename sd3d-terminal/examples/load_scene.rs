/// Example: Parse a scene-description file and print what was loaded
///
/// Usage: cargo run --example load_scene -- path/to/scene.txt

use std::env;
use std::io;
use std::process;

use sd3d_core::reader;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let Some(path) = args.get(1) else {
        eprintln!("Usage: {} <scene-file>", args[0]);
        process::exit(2);
    };

    println!("Loading scene file: {}", path);

    let scene = reader::load_scene(path)
        .map_err(|e| io::Error::new(io::ErrorKind::NotFound, e.to_string()))?;

    println!(
        "size: {}x{}, camera at {:?}, fovy {} degrees",
        scene.width, scene.height, scene.camera.eye, scene.camera.fovy
    );
    println!("{} lights", scene.lights.len());
    for (i, object) in scene.objects.iter().enumerate() {
        println!(
            "object {}: {:?} size {} diffuse {:?}",
            i, object.kind, object.size, object.material.diffuse
        );
        println!("  transform: {:.3}", object.transform);
    }

    Ok(())
}
