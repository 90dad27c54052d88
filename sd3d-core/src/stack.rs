/// Hierarchical transform stack for scene-graph evaluation
use nalgebra::{Matrix4, Vector4};

/// LIFO stack of 4x4 transforms driven by the scene-description reader.
///
/// The base identity element is always present: `pop` refuses to remove it,
/// so `current` can never observe an empty stack.
pub struct TransformStack {
    stack: Vec<Matrix4<f32>>,
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            stack: vec![Matrix4::identity()],
        }
    }

    /// Enter a nested transform scope by duplicating the current top.
    pub fn push(&mut self) {
        let top = self.current();
        self.stack.push(top);
    }

    /// Leave a transform scope. Popping with only the base identity left is
    /// a diagnosed no-op, never an error.
    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        } else {
            log::warn!("transform stack holds only the base identity, ignoring pop");
        }
    }

    /// Right-multiply the top by `m`, applying `m` first in object-local
    /// space: the top `T` becomes `T * m`, not `m * T`.
    pub fn compose(&mut self, m: &Matrix4<f32>) {
        let top = self.stack.last_mut().expect("base identity always present");
        *top = *top * m;
    }

    /// Snapshot of the current top, without modifying the stack.
    pub fn current(&self) -> Matrix4<f32> {
        *self.stack.last().expect("base identity always present")
    }

    /// Transform a homogeneous point by the current top in place.
    pub fn apply(&self, values: &mut [f32; 4]) {
        let v = self.current() * Vector4::new(values[0], values[1], values[2], values[3]);
        values.copy_from_slice(v.as_slice());
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}
