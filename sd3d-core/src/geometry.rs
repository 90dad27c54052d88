/// Geometry primitives for 3D rendering
use std::f32::consts::{PI, TAU};

use nalgebra::{Point3, Vector3};

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Axis-aligned cube with edge length `size`, two triangles per face.
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let mut mesh = Self::with_capacity(12);

        let normals: [Vector3<f32>; 6] = [
            Vector3::x(),
            -Vector3::x(),
            Vector3::y(),
            -Vector3::y(),
            Vector3::z(),
            -Vector3::z(),
        ];
        for n in normals {
            // Tangent frame with u x v = n, so both triangles wind outward.
            let u = if n.x.abs() > 0.5 {
                Vector3::y()
            } else {
                Vector3::x()
            };
            let v = n.cross(&u);
            let corner = |s: f32, t: f32| {
                let p = n * h + u * (s * h) + v * (t * h);
                Vertex::new(p.x, p.y, p.z, n.x, n.y, n.z)
            };
            let (a, b, c, d) = (
                corner(-1.0, -1.0),
                corner(1.0, -1.0),
                corner(1.0, 1.0),
                corner(-1.0, 1.0),
            );
            mesh.add_triangle(Triangle::new(a, b, c));
            mesh.add_triangle(Triangle::new(a, c, d));
        }

        mesh
    }

    /// Latitude/longitude sphere with smooth normals.
    pub fn sphere(radius: f32, slices: u32, stacks: u32) -> Self {
        let mut mesh = Self::with_capacity((slices * stacks * 2) as usize);

        let vertex = |i: u32, j: u32| {
            let theta = PI * j as f32 / stacks as f32;
            let phi = TAU * i as f32 / slices as f32;
            let dir = Vector3::new(
                theta.sin() * phi.cos(),
                theta.cos(),
                theta.sin() * phi.sin(),
            );
            let p = dir * radius;
            Vertex::new(p.x, p.y, p.z, dir.x, dir.y, dir.z)
        };

        for j in 0..stacks {
            for i in 0..slices {
                let a = vertex(i, j);
                let b = vertex(i + 1, j);
                let c = vertex(i + 1, j + 1);
                let d = vertex(i, j + 1);
                // The pole rows collapse one triangle of each quad.
                if j > 0 {
                    mesh.add_triangle(Triangle::new(a, b, c));
                }
                if j < stacks - 1 {
                    mesh.add_triangle(Triangle::new(a, c, d));
                }
            }
        }

        mesh
    }

    /// Lathed stand-in for the classic teapot: a pot-shaped profile revolved
    /// around the y axis, flat shaded.
    pub fn teapot(size: f32) -> Self {
        // (radius, height) silhouette from base to lid knob.
        let profile = [
            (0.0, -0.70),
            (0.42, -0.63),
            (0.63, -0.35),
            (0.70, 0.00),
            (0.56, 0.35),
            (0.28, 0.49),
            (0.33, 0.56),
            (0.07, 0.63),
            (0.0, 0.70),
        ];
        let slices = 24u32;
        let mut mesh = Self::new();

        let ring = |&(r, h): &(f32, f32), i: u32| {
            let phi = TAU * i as f32 / slices as f32;
            Point3::new(r * phi.cos() * size, h * size, r * phi.sin() * size)
        };

        for pair in profile.windows(2) {
            for i in 0..slices {
                let a = ring(&pair[0], i);
                let b = ring(&pair[0], i + 1);
                let c = ring(&pair[1], i + 1);
                let d = ring(&pair[1], i);
                if pair[0].0 > 0.0 {
                    mesh.add_triangle(flat_triangle(a, c, b));
                }
                if pair[1].0 > 0.0 {
                    mesh.add_triangle(flat_triangle(a, d, c));
                }
            }
        }

        mesh
    }
}

fn flat_triangle(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Triangle {
    let n = (b - a).cross(&(c - a)).normalize();
    Triangle::new(
        Vertex::new(a.x, a.y, a.z, n.x, n.y, n.z),
        Vertex::new(b.x, b.y, b.z, n.x, n.y, n.z),
        Vertex::new(c.x, c.y, c.z, n.x, n.y, n.z),
    )
}
