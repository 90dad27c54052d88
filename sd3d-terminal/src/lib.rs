/// Terminal-based ASCII preview for parsed scene descriptions
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use nalgebra::{Matrix4, Vector3};
use sd3d_core::{Material, Mesh, PrimitiveKind, Scene, Transform};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiRenderer;

const ORBIT_STEP_DEGREES: f32 = 5.0;

/// Main application struct for previewing a scene in the terminal
pub struct TerminalApp {
    scene: Scene,
    meshes: Vec<(Mesh, Matrix4<f32>, Color)>,
    light_dir: Vector3<f32>,
    renderer: AsciiRenderer,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mut scene: Scene) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        // Terminal cells are roughly twice as tall as wide.
        scene.camera.aspect = width as f32 / (height as f32 * 2.0);

        let meshes = scene
            .objects
            .iter()
            .map(|obj| {
                let mesh = match obj.kind {
                    PrimitiveKind::Sphere => Mesh::sphere(obj.size, 24, 12),
                    PrimitiveKind::Cube => Mesh::cube(obj.size),
                    PrimitiveKind::Teapot => Mesh::teapot(obj.size),
                };
                (mesh, obj.transform, material_color(&obj.material))
            })
            .collect();

        let light_dir = match scene.lights.first() {
            Some(light) => light.position.xyz().normalize(),
            None => {
                log::warn!("scene declares no lights, shading from the default direction");
                Vector3::z()
            }
        };

        log::debug!(
            "preview surface {}x{} cells, {} meshes",
            width,
            height,
            scene.objects.len()
        );

        Ok(Self {
            scene,
            meshes,
            light_dir,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
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
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            let camera = &mut self.scene.camera;
            match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char('a') | KeyCode::Left => {
                    Transform::orbit_left(ORBIT_STEP_DEGREES, &mut camera.eye, &camera.up);
                }
                KeyCode::Char('d') | KeyCode::Right => {
                    Transform::orbit_left(-ORBIT_STEP_DEGREES, &mut camera.eye, &camera.up);
                }
                KeyCode::Char('w') | KeyCode::Up => {
                    Transform::orbit_up(ORBIT_STEP_DEGREES, &mut camera.eye, &mut camera.up);
                }
                KeyCode::Char('s') | KeyCode::Down => {
                    Transform::orbit_up(-ORBIT_STEP_DEGREES, &mut camera.eye, &mut camera.up);
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();

        for (mesh, model, color) in &self.meshes {
            self.renderer
                .render_mesh(mesh, model, &self.scene.camera, &self.light_dir, *color);
        }

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "SD3D Preview | {} objects, {} lights | FPS: {:.1} | WASD/Arrows=Orbit Q=Quit",
                self.scene.objects.len(),
                self.scene.lights.len(),
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Pick a terminal color from the material's dominant diffuse channel.
fn material_color(material: &Material) -> Color {
    let [r, g, b, _] = material.diffuse;
    if r.max(g).max(b) < 0.1 {
        return Color::Grey;
    }
    if r >= g && r >= b {
        Color::Red
    } else if g >= b {
        Color::Green
    } else {
        Color::Blue
    }
}
