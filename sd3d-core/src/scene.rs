/// Scene data model produced by the scene-description reader
use nalgebra::{Matrix4, Vector4};
use thiserror::Error;

use crate::camera::Camera;

/// Primitive shapes a scene file can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Sphere,
    Cube,
    Teapot,
}

/// Surface properties, captured per object at declaration time.
///
/// Colors are RGBA; transforms never apply to them.
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub emission: [f32; 4],
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: [0.2, 0.2, 0.2, 1.0],
            diffuse: [0.0, 0.0, 0.0, 0.0],
            specular: [0.0, 0.0, 0.0, 0.0],
            emission: [0.0, 0.0, 0.0, 0.0],
            shininess: 0.0,
        }
    }
}

/// A light source: homogeneous position (w = 0 for directional) and RGBA
/// color.
#[derive(Debug, Clone, Copy)]
pub struct Light {
    pub position: Vector4<f32>,
    pub color: [f32; 4],
}

/// A declared primitive with its world transform frozen at the moment the
/// declaration line was parsed.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub kind: PrimitiveKind,
    pub size: f32,
    pub material: Material,
    pub transform: Matrix4<f32>,
}

/// Signal returned when an insertion would exceed a scene's configured
/// capacity limit.
#[derive(Debug, Error)]
#[error("reached maximum number of {kind}s ({limit})")]
pub struct CapacityError {
    pub kind: &'static str,
    pub limit: usize,
}

/// A parsed scene: ordered object and light lists, camera, and window size.
///
/// The lists grow dynamically but enforce an explicit capacity limit at
/// insertion time.
#[derive(Debug)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
    pub lights: Vec<Light>,
    pub camera: Camera,
    pub width: u32,
    pub height: u32,
    max_objects: usize,
    max_lights: usize,
}

impl Scene {
    pub const DEFAULT_MAX_OBJECTS: usize = 10;
    pub const DEFAULT_MAX_LIGHTS: usize = 10;

    pub fn new() -> Self {
        Self::with_limits(Self::DEFAULT_MAX_OBJECTS, Self::DEFAULT_MAX_LIGHTS)
    }

    pub fn with_limits(max_objects: usize, max_lights: usize) -> Self {
        let width = 800;
        let height = 600;
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            camera: Camera::new(width, height),
            width,
            height,
            max_objects,
            max_lights,
        }
    }

    pub fn add_object(&mut self, object: SceneObject) -> Result<(), CapacityError> {
        if self.objects.len() >= self.max_objects {
            return Err(CapacityError {
                kind: "object",
                limit: self.max_objects,
            });
        }
        self.objects.push(object);
        Ok(())
    }

    pub fn add_light(&mut self, light: Light) -> Result<(), CapacityError> {
        if self.lights.len() >= self.max_lights {
            return Err(CapacityError {
                kind: "light",
                limit: self.max_lights,
            });
        }
        self.lights.push(light);
        Ok(())
    }

    /// Update the output size and keep the camera aspect in sync.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.camera.aspect = width as f32 / height as f32;
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
