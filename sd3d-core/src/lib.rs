/// SD3D Core Library - Scene description parsing and transform mathematics
///
/// This library provides the stateless core functionality for the scene
/// renderer: transform matrix construction, the hierarchical transform
/// stack, the scene-description reader, and primitive mesh generation.

pub mod camera;
pub mod geometry;
pub mod reader;
pub mod scene;
pub mod stack;
pub mod transform;

// Re-export commonly used types
pub use camera::Camera;
pub use geometry::{Mesh, Triangle, Vertex};
pub use reader::{load_scene, parse_scene, SceneError};
pub use scene::{CapacityError, Light, Material, PrimitiveKind, Scene, SceneObject};
pub use stack::TransformStack;
pub use transform::Transform;
