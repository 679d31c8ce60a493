//! Object draw descriptors and model-transform composition.
//!
//! A scene is an ordered list of [`ObjectDraw`] values; each one carries
//! everything a single draw needs: the mesh kind, the transform, the
//! material tag and the appearance. The render module interprets the list
//! once per frame.

use cgmath::{Deg, Matrix4, Vector3};

use crate::data_structures::mesh::MeshKind;

/// How an object is colored: a flat RGBA color, or a registered texture
/// tiled by a UV scale. The two are mutually exclusive per draw.
#[derive(Debug, Clone, PartialEq)]
pub enum Appearance {
    Flat([f32; 4]),
    Textured {
        texture: &'static str,
        uv_scale: [f32; 2],
    },
}

/// One drawable object of the scene.
#[derive(Debug, Clone)]
pub struct ObjectDraw {
    pub label: &'static str,
    pub mesh: MeshKind,
    pub scale: Vector3<f32>,
    /// Rotation in degrees about the world X, Y and Z axes, applied in
    /// that order.
    pub rotation_deg: Vector3<f32>,
    pub position: Vector3<f32>,
    pub material: &'static str,
    pub appearance: Appearance,
}

impl ObjectDraw {
    pub fn model_matrix(&self) -> Matrix4<f32> {
        compose_transform(self.scale, self.rotation_deg, self.position)
    }
}

/// Compose a model matrix as `T · Rx · Ry · Rz · S`.
///
/// The rotation order (X, then Y, then Z, about the world axes) is a
/// contract of the scene data: the authored rotations only produce the
/// intended poses under exactly this composition.
pub fn compose_transform(
    scale: Vector3<f32>,
    rotation_deg: Vector3<f32>,
    position: Vector3<f32>,
) -> Matrix4<f32> {
    let translation = Matrix4::from_translation(position);
    let rotation_x = Matrix4::from_angle_x(Deg(rotation_deg.x));
    let rotation_y = Matrix4::from_angle_y(Deg(rotation_deg.y));
    let rotation_z = Matrix4::from_angle_z(Deg(rotation_deg.z));
    let scaling = Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z);
    translation * rotation_x * rotation_y * rotation_z * scaling
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::vec3;

    fn assert_matrix_eq(a: Matrix4<f32>, b: Matrix4<f32>) {
        let a: [[f32; 4]; 4] = a.into();
        let b: [[f32; 4]; 4] = b.into();
        for (col_a, col_b) in a.iter().zip(b.iter()) {
            for (x, y) in col_a.iter().zip(col_b.iter()) {
                assert!((x - y).abs() < 1e-5, "{a:?} != {b:?}");
            }
        }
    }

    #[test]
    fn identity_inputs_compose_to_identity() {
        use cgmath::SquareMatrix;
        let m = compose_transform(vec3(1.0, 1.0, 1.0), vec3(0.0, 0.0, 0.0), vec3(0.0, 0.0, 0.0));
        assert_matrix_eq(m, Matrix4::identity());
    }

    #[test]
    fn translation_lands_in_the_last_column() {
        let m = compose_transform(vec3(2.0, 3.0, 4.0), vec3(10.0, 20.0, 30.0), vec3(5.0, -6.0, 7.0));
        let col: [f32; 4] = m.w.into();
        assert_eq!(col, [5.0, -6.0, 7.0, 1.0]);
    }

    #[test]
    fn rotation_order_is_x_then_y_then_z() {
        let scale = vec3(1.5, 2.0, 0.5);
        let rotation = vec3(100.0, 45.0, 90.0);
        let position = vec3(-6.0, 4.0, -2.5);
        let composed = compose_transform(scale, rotation, position);
        let expected = Matrix4::from_translation(position)
            * Matrix4::from_angle_x(Deg(rotation.x))
            * Matrix4::from_angle_y(Deg(rotation.y))
            * Matrix4::from_angle_z(Deg(rotation.z))
            * Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z);
        assert_matrix_eq(composed, expected);

        // the reversed order must give a different matrix, or the order
        // contract means nothing
        let reversed = Matrix4::from_translation(position)
            * Matrix4::from_angle_z(Deg(rotation.z))
            * Matrix4::from_angle_y(Deg(rotation.y))
            * Matrix4::from_angle_x(Deg(rotation.x))
            * Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z);
        let a: [[f32; 4]; 4] = composed.into();
        let b: [[f32; 4]; 4] = reversed.into();
        assert!(a != b);
    }
}
