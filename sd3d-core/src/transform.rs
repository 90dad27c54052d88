/// Transform matrix construction from first principles
use nalgebra::{Matrix3, Matrix4, Point3, Vector3, Vector4};

/// Builder for the standard 3D transform matrices.
///
/// Every function is stateless and pure. Matrices are assembled column by
/// column; constructions that are easier to state row-wise build the rows as
/// columns and transpose at the end, so the stored layout stays column-major.
pub struct Transform;

impl Transform {
    /// Rotation by `degrees` around `axis` via Rodrigues' formula:
    /// `R = cos(t)*I + (1 - cos(t))*(n*n^T) + sin(t)*[n]x`.
    ///
    /// `axis` must be non-zero; it is normalized here, not validated.
    pub fn rotate(degrees: f32, axis: &Vector3<f32>) -> Matrix3<f32> {
        let n = axis.normalize();
        let theta = degrees.to_radians();
        let (sin_t, cos_t) = theta.sin_cos();

        cos_t * Matrix3::identity()
            + (1.0 - cos_t) * (n * n.transpose())
            + sin_t * n.cross_matrix()
    }

    /// View matrix for a camera at `eye` looking toward the world origin.
    ///
    /// `center` is part of the scene-description camera command but does not
    /// influence the view direction: the frame is derived from `-eye`. Scene
    /// files place `center` at the origin, and existing scenes' expected
    /// output depends on this behavior.
    pub fn look_at(
        eye: &Point3<f32>,
        _center: &Point3<f32>,
        up: &Vector3<f32>,
    ) -> Matrix4<f32> {
        let z = (-eye.coords).normalize();
        let x = z.cross(up).normalize();
        let y = x.cross(&z);
        let w = -z;

        // Basis vectors as rows, translation as the negated projections of
        // eye onto each row.
        Matrix4::from_columns(&[
            Vector4::new(x.x, x.y, x.z, -x.dot(&eye.coords)),
            Vector4::new(y.x, y.y, y.z, -y.dot(&eye.coords)),
            Vector4::new(w.x, w.y, w.z, -w.dot(&eye.coords)),
            Vector4::new(0.0, 0.0, 0.0, 1.0),
        ])
        .transpose()
    }

    /// Symmetric perspective projection. `fovy` is in degrees.
    ///
    /// `z_far` must differ from `z_near`.
    pub fn perspective(fovy: f32, aspect: f32, z_near: f32, z_far: f32) -> Matrix4<f32> {
        let f = 1.0 / (fovy.to_radians() * 0.5).tan();
        let depth = z_far - z_near;

        Matrix4::from_columns(&[
            Vector4::new(f / aspect, 0.0, 0.0, 0.0),
            Vector4::new(0.0, f, 0.0, 0.0),
            Vector4::new(0.0, 0.0, -(z_far + z_near) / depth, -2.0 * z_far * z_near / depth),
            Vector4::new(0.0, 0.0, -1.0, 0.0),
        ])
        .transpose()
    }

    /// Non-uniform scale with a unit homogeneous component.
    pub fn scale(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::from_columns(&[
            Vector4::new(sx, 0.0, 0.0, 0.0),
            Vector4::new(0.0, sy, 0.0, 0.0),
            Vector4::new(0.0, 0.0, sz, 0.0),
            Vector4::new(0.0, 0.0, 0.0, 1.0),
        ])
    }

    /// Translation in the last column, applied as `v' = T * v`.
    pub fn translate(tx: f32, ty: f32, tz: f32) -> Matrix4<f32> {
        Matrix4::from_columns(&[
            Vector4::new(1.0, 0.0, 0.0, 0.0),
            Vector4::new(0.0, 1.0, 0.0, 0.0),
            Vector4::new(0.0, 0.0, 1.0, 0.0),
            Vector4::new(tx, ty, tz, 1.0),
        ])
    }

    /// Orthonormalize an approximate `up` hint against a known view
    /// direction: the result is unit length, orthogonal to `view_dir`, and
    /// lies in the plane spanned by `up` and `view_dir`.
    pub fn up_vector(up: &Vector3<f32>, view_dir: &Vector3<f32>) -> Vector3<f32> {
        let x = up.cross(view_dir);
        let y = view_dir.cross(&x);
        y.normalize()
    }

    /// Orbit the camera horizontally: rotate `eye` by `-degrees` about `up`.
    pub fn orbit_left(degrees: f32, eye: &mut Point3<f32>, up: &Vector3<f32>) {
        let rot = Self::rotate(-degrees, up);
        *eye = Point3::from(rot * eye.coords);
    }

    /// Orbit the camera vertically: rotate `eye` and `up` about the camera's
    /// right axis, keeping `up` unit length.
    pub fn orbit_up(degrees: f32, eye: &mut Point3<f32>, up: &mut Vector3<f32>) {
        let axis = (-eye.coords).cross(up).normalize();
        let rot = Self::rotate(degrees, &axis);
        *eye = Point3::from(rot * eye.coords);
        *up = (rot * *up).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_zero_rotation_is_identity() {
        let axis = Vector3::new(0.0, 1.0, 0.0);
        let r = Transform::rotate(0.0, &axis);
        assert!((r - Matrix3::identity()).norm() < EPS);
    }

    #[test]
    fn test_rotation_is_orthogonal() {
        let axis = Vector3::new(1.0, 2.0, -0.5).normalize();
        let r = Transform::rotate(37.0, &axis);
        assert!((r.transpose() * r - Matrix3::identity()).norm() < EPS);
    }

    #[test]
    fn test_opposite_rotations_cancel() {
        let axis = Vector3::new(0.3, -0.8, 0.5).normalize();
        let product = Transform::rotate(73.0, &axis) * Transform::rotate(-73.0, &axis);
        assert!((product - Matrix3::identity()).norm() < EPS);
    }

    #[test]
    fn test_full_turn_is_identity() {
        let axis = Vector3::new(0.0, 0.0, 1.0);
        let r = Transform::rotate(360.0, &axis);
        assert!((r - Matrix3::identity()).norm() < 1e-4);
    }

    #[test]
    fn test_same_axis_rotations_add() {
        let axis = Vector3::new(1.0, 1.0, 1.0).normalize();
        let composed = Transform::rotate(25.0, &axis) * Transform::rotate(40.0, &axis);
        let direct = Transform::rotate(65.0, &axis);
        assert!((composed - direct).norm() < EPS);
    }

    #[test]
    fn test_rotation_handedness() {
        // Right-handed quarter turn about +z maps +x onto +y.
        let r = Transform::rotate(90.0, &Vector3::z());
        let v = r * Vector3::x();
        assert!((v - Vector3::y()).norm() < EPS);
    }

    #[test]
    fn test_axis_is_normalized_internally() {
        let unit = Transform::rotate(50.0, &Vector3::new(0.0, 1.0, 0.0));
        let scaled = Transform::rotate(50.0, &Vector3::new(0.0, 10.0, 0.0));
        assert!((unit - scaled).norm() < EPS);
    }

    #[test]
    fn test_translate_moves_origin() {
        let t = Transform::translate(3.0, -1.0, 2.5);
        let p = t * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!((p - Vector4::new(3.0, -1.0, 2.5, 1.0)).norm() < EPS);
    }

    #[test]
    fn test_scale_stretches_unit_point() {
        let s = Transform::scale(2.0, 3.0, 4.0);
        let p = s * Vector4::new(1.0, 1.0, 1.0, 1.0);
        assert!((p - Vector4::new(2.0, 3.0, 4.0, 1.0)).norm() < EPS);
    }

    #[test]
    fn test_perspective_depth_terms() {
        let p = Transform::perspective(90.0, 1.0, 1.0, 10.0);
        assert!(p.iter().all(|v| v.is_finite()));
        assert!((p[(2, 3)] - (-20.0 / 9.0)).abs() < EPS);
        assert!((p[(3, 2)] - (-1.0)).abs() < EPS);
        assert!(p[(3, 3)].abs() < EPS);
        // f = 1/tan(45 deg) = 1
        assert!((p[(0, 0)] - 1.0).abs() < EPS);
        assert!((p[(1, 1)] - 1.0).abs() < EPS);
    }

    #[test]
    fn test_look_at_maps_eye_to_origin() {
        let eye = Point3::new(3.0, 2.0, 5.0);
        let view = Transform::look_at(&eye, &Point3::origin(), &Vector3::y());
        let mapped = view * Vector4::new(eye.x, eye.y, eye.z, 1.0);
        assert!((mapped - Vector4::new(0.0, 0.0, 0.0, 1.0)).norm() < EPS);
    }

    #[test]
    fn test_look_at_ignores_center() {
        let eye = Point3::new(0.0, 1.0, 4.0);
        let up = Vector3::y();
        let a = Transform::look_at(&eye, &Point3::origin(), &up);
        let b = Transform::look_at(&eye, &Point3::new(7.0, -2.0, 1.0), &up);
        assert!((a - b).norm() < EPS);
    }

    #[test]
    fn test_up_vector_is_orthonormal() {
        let view_dir = Vector3::new(0.0, 0.0, -1.0);
        let hint = Vector3::new(0.3, 1.0, -0.4);
        let up = Transform::up_vector(&hint, &view_dir);
        assert!((up.norm() - 1.0).abs() < EPS);
        assert!(up.dot(&view_dir).abs() < EPS);
    }

    #[test]
    fn test_orbit_left_preserves_distance() {
        let mut eye = Point3::new(0.0, 0.0, 5.0);
        let up = Vector3::y();
        Transform::orbit_left(30.0, &mut eye, &up);
        assert!((eye.coords.norm() - 5.0).abs() < EPS);
        assert!(eye.y.abs() < EPS);
    }

    #[test]
    fn test_orbit_up_keeps_frame_orthogonal() {
        let mut eye = Point3::new(0.0, 0.0, 5.0);
        let mut up = Vector3::y();
        Transform::orbit_up(20.0, &mut eye, &mut up);
        assert!((eye.coords.norm() - 5.0).abs() < EPS);
        assert!((up.norm() - 1.0).abs() < EPS);
        assert!(up.dot(&eye.coords).abs() < 1e-3);
    }
}
