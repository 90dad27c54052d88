/// Camera parameters and screen projection
use nalgebra::{Matrix4, Point3, Vector3, Vector4};

use crate::transform::Transform;

/// Camera configuration assembled from the scene file's `camera` and `size`
/// commands. `fovy` is in degrees; `up` is stored already orthonormalized
/// against the view direction.
#[derive(Debug, Clone)]
pub struct Camera {
    pub eye: Point3<f32>,
    pub center: Point3<f32>,
    pub up: Vector3<f32>,
    pub fovy: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            eye: Point3::new(0.0, 0.0, 5.0),
            center: Point3::origin(),
            up: Vector3::y(),
            fovy: 45.0,
            aspect: width as f32 / height as f32,
            near: 0.1,
            far: 100.0,
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Transform::look_at(&self.eye, &self.center, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Transform::perspective(self.fovy, self.aspect, self.near, self.far)
    }

    /// Project a world-space point through `model`, the view, and the
    /// projection down to screen space. Returns `None` for points behind the
    /// camera or outside the frustum.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = self.projection_matrix() * self.view_matrix() * model;
        let clip = mvp * Vector4::new(point.x, point.y, point.z, 1.0);

        if clip.w.abs() < 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        // Clip test
        if !(-1.0..=1.0).contains(&ndc_x)
            || !(-1.0..=1.0).contains(&ndc_y)
            || !(-1.0..=1.0).contains(&depth)
        {
            return None;
        }

        // Convert to screen space
        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, depth))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}
