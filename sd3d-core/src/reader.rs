/// Scene-description file reader
///
/// Line-oriented format: one command per line, `#` starts a comment. Each
/// command is a keyword followed by a fixed number of numeric parameters.
/// Transform commands compose onto a transform stack; primitive declarations
/// capture the stack's top as their world transform.
use std::fs;
use std::path::Path;

use nalgebra::{Point3, Vector3, Vector4};
use nom::{
    bytes::complete::take_while1,
    character::complete::{multispace0, multispace1},
    multi::count,
    number::complete::float,
    sequence::preceded,
    IResult,
};
use thiserror::Error;

use crate::scene::{Light, Material, PrimitiveKind, Scene, SceneObject};
use crate::stack::TransformStack;
use crate::transform::Transform;

/// Fatal failures of a whole scene load. Anything recoverable (malformed or
/// unknown commands, capacity overruns) is logged and skipped instead.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("unable to open scene file {path}")]
    FileNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read and parse a scene file from disk.
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
    let text = fs::read_to_string(path.as_ref()).map_err(|source| SceneError::FileNotFound {
        path: path.as_ref().display().to_string(),
        source,
    })?;
    Ok(parse_scene(&text))
}

/// Parse scene-description text. Infallible: offending lines are skipped
/// with a diagnostic and parsing continues.
pub fn parse_scene(input: &str) -> Scene {
    let mut state = ReaderState::new();
    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        state.command(line);
    }
    state.finish()
}

fn keyword(input: &str) -> IResult<&str, &str> {
    preceded(multispace0, take_while1(|c: char| !c.is_whitespace()))(input)
}

/// Read exactly `N` whitespace-separated numeric values, mirroring the
/// per-command arity table. Failure skips the whole command.
fn read_vals<const N: usize>(cmd: &str, input: &str) -> Option<[f32; N]> {
    let parsed: IResult<&str, Vec<f32>> = count(preceded(multispace1, float), N)(input);
    match parsed {
        Ok((_, vals)) => {
            let mut out = [0.0f32; N];
            out.copy_from_slice(&vals);
            Some(out)
        }
        Err(_) => {
            log::warn!("{}: expected {} numeric values, skipping command", cmd, N);
            None
        }
    }
}

/// Parser state threaded through a single scene load: the scene under
/// construction, the transform stack, and the material that upcoming
/// primitive declarations will capture.
struct ReaderState {
    scene: Scene,
    stack: TransformStack,
    material: Material,
}

impl ReaderState {
    fn new() -> Self {
        Self {
            scene: Scene::new(),
            stack: TransformStack::new(),
            material: Material::default(),
        }
    }

    fn finish(self) -> Scene {
        self.scene
    }

    fn command(&mut self, line: &str) {
        let Ok((rest, cmd)) = keyword(line) else {
            return;
        };
        match cmd {
            "size" => {
                if let Some(v) = read_vals::<2>(cmd, rest) {
                    self.scene.set_size(v[0] as u32, v[1] as u32);
                }
            }
            "camera" => {
                if let Some(v) = read_vals::<10>(cmd, rest) {
                    self.set_camera(&v);
                }
            }
            "light" => {
                if let Some(v) = read_vals::<8>(cmd, rest) {
                    let light = Light {
                        position: Vector4::new(v[0], v[1], v[2], v[3]),
                        color: [v[4], v[5], v[6], v[7]],
                    };
                    if let Err(err) = self.scene.add_light(light) {
                        log::warn!("{}, ignoring further lights", err);
                    }
                }
            }
            "ambient" => {
                if let Some(v) = read_vals::<4>(cmd, rest) {
                    self.material.ambient = v;
                }
            }
            "diffuse" => {
                if let Some(v) = read_vals::<4>(cmd, rest) {
                    self.material.diffuse = v;
                }
            }
            "specular" => {
                if let Some(v) = read_vals::<4>(cmd, rest) {
                    self.material.specular = v;
                }
            }
            "emission" => {
                if let Some(v) = read_vals::<4>(cmd, rest) {
                    self.material.emission = v;
                }
            }
            "shininess" => {
                if let Some(v) = read_vals::<1>(cmd, rest) {
                    self.material.shininess = v[0];
                }
            }
            "sphere" => self.primitive(PrimitiveKind::Sphere, cmd, rest),
            "cube" => self.primitive(PrimitiveKind::Cube, cmd, rest),
            "teapot" => self.primitive(PrimitiveKind::Teapot, cmd, rest),
            "translate" => {
                if let Some(v) = read_vals::<3>(cmd, rest) {
                    self.stack.compose(&Transform::translate(v[0], v[1], v[2]));
                }
            }
            "scale" => {
                if let Some(v) = read_vals::<3>(cmd, rest) {
                    self.stack.compose(&Transform::scale(v[0], v[1], v[2]));
                }
            }
            "rotate" => {
                if let Some(v) = read_vals::<4>(cmd, rest) {
                    let axis = Vector3::new(v[0], v[1], v[2]);
                    let rotation = Transform::rotate(v[3], &axis).to_homogeneous();
                    self.stack.compose(&rotation);
                }
            }
            "pushTransform" => self.stack.push(),
            "popTransform" => self.stack.pop(),
            _ => log::warn!("unknown command {}, skipping", cmd),
        }
    }

    fn set_camera(&mut self, v: &[f32; 10]) {
        let eye = Point3::new(v[0], v[1], v[2]);
        let up_hint = Vector3::new(v[6], v[7], v[8]);
        let camera = &mut self.scene.camera;
        camera.eye = eye;
        camera.center = Point3::new(v[3], v[4], v[5]);
        camera.up = Transform::up_vector(&up_hint, &-eye.coords);
        camera.fovy = v[9];
    }

    /// Declare a primitive: capture size, the current material, and a
    /// snapshot of the transform stack's top.
    fn primitive(&mut self, kind: PrimitiveKind, cmd: &str, rest: &str) {
        let Some(v) = read_vals::<1>(cmd, rest) else {
            return;
        };
        let object = SceneObject {
            kind,
            size: v[0],
            material: self.material,
            transform: self.stack.current(),
        };
        if let Err(err) = self.scene.add_object(object) {
            log::warn!("{}, ignoring further objects", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Matrix4;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_nested_transform_scopes() {
        let scene = parse_scene(
            "pushTransform\n\
             translate 1 0 0\n\
             sphere 1.0\n\
             popTransform\n\
             sphere 1.0\n",
        );
        assert_eq!(scene.objects.len(), 2);
        let translated = Transform::translate(1.0, 0.0, 0.0);
        assert!((scene.objects[0].transform - translated).norm() < EPS);
        assert!((scene.objects[1].transform - Matrix4::identity()).norm() < EPS);
    }

    #[test]
    fn test_transforms_compose_in_file_order() {
        let scene = parse_scene(
            "translate 1 0 0\n\
             rotate 0 1 0 90\n\
             cube 2.0\n",
        );
        let expected = Transform::translate(1.0, 0.0, 0.0)
            * Transform::rotate(90.0, &Vector3::y()).to_homogeneous();
        assert_eq!(scene.objects.len(), 1);
        assert_eq!(scene.objects[0].kind, PrimitiveKind::Cube);
        assert!((scene.objects[0].transform - expected).norm() < EPS);
    }

    #[test]
    fn test_camera_command_orthonormalizes_up() {
        let scene = parse_scene("camera 0 -2 6 0 0 0 0.2 1 0.1 60\n");
        let camera = &scene.camera;
        assert!((camera.eye - Point3::new(0.0, -2.0, 6.0)).norm() < EPS);
        assert!((camera.fovy - 60.0).abs() < EPS);
        assert!((camera.up.norm() - 1.0).abs() < EPS);
        // Up is orthogonal to the view direction (toward the origin).
        assert!(camera.up.dot(&-camera.eye.coords).abs() < 1e-4);
    }

    #[test]
    fn test_size_and_lights() {
        let scene = parse_scene(
            "size 640 480\n\
             light 0 0 1 0 1 1 1 1\n\
             light 2 4 6 1 0.5 0.5 0.5 1\n",
        );
        assert_eq!((scene.width, scene.height), (640, 480));
        assert_eq!(scene.lights.len(), 2);
        assert!((scene.lights[0].position.w).abs() < EPS);
        assert!((scene.lights[1].position - Vector4::new(2.0, 4.0, 6.0, 1.0)).norm() < EPS);
    }

    #[test]
    fn test_material_is_captured_per_object() {
        let scene = parse_scene(
            "diffuse 1 0 0 1\n\
             shininess 32\n\
             sphere 1.0\n\
             diffuse 0 1 0 1\n\
             sphere 1.0\n",
        );
        assert_eq!(scene.objects.len(), 2);
        assert_eq!(scene.objects[0].material.diffuse, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(scene.objects[0].material.shininess, 32.0);
        assert_eq!(scene.objects[1].material.diffuse, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(scene.objects[1].material.shininess, 32.0);
    }

    #[test]
    fn test_bad_lines_are_skipped() {
        let scene = parse_scene(
            "# a comment\n\
             \n\
             frobnicate 1 2 3\n\
             translate 1 nope 0\n\
             sphere 1.0\n",
        );
        // The malformed translate must not have composed anything.
        assert_eq!(scene.objects.len(), 1);
        assert!((scene.objects[0].transform - Matrix4::identity()).norm() < EPS);
    }

    #[test]
    fn test_unbalanced_pop_is_survivable() {
        let scene = parse_scene(
            "popTransform\n\
             popTransform\n\
             translate 0 1 0\n\
             teapot 1.0\n",
        );
        assert_eq!(scene.objects.len(), 1);
        let expected = Transform::translate(0.0, 1.0, 0.0);
        assert!((scene.objects[0].transform - expected).norm() < EPS);
    }

    #[test]
    fn test_object_limit_is_enforced() {
        let mut input = String::new();
        for _ in 0..Scene::DEFAULT_MAX_OBJECTS + 3 {
            input.push_str("sphere 1.0\n");
        }
        let scene = parse_scene(&input);
        assert_eq!(scene.objects.len(), Scene::DEFAULT_MAX_OBJECTS);
    }

    #[test]
    fn test_scale_before_declaration() {
        let scene = parse_scene("scale 2 3 4\ncube 1.0\n");
        let expected = Transform::scale(2.0, 3.0, 4.0);
        assert!((scene.objects[0].transform - expected).norm() < EPS);
    }

    #[test]
    fn test_missing_file_is_a_typed_error() {
        let err = load_scene("definitely/not/a/scene.txt").unwrap_err();
        assert!(matches!(err, SceneError::FileNotFound { .. }));
    }
}
