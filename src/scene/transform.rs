use glam::{Affine3A, EulerRot, Quat, Vec3};

/// Transform component
///
/// Holds a node's position, rotation and scale (TRS), the cached local and
/// world matrices, and the two flags animation writers use to tell the
/// transform system that the matrices are stale.
///
/// Rotation can be driven either by the quaternion (`use_quaternion == true`)
/// or by the XYZ Euler angles in `euler`.
#[derive(Debug, Clone)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub euler: Vec3,
    pub use_quaternion: bool,
    pub scale: Vec3,

    /// Recompute the local matrix from TRS during the next matrix update.
    pub matrix_auto_update: bool,
    /// The world matrix must be recomputed during the next matrix update.
    pub matrix_world_needs_update: bool,

    pub(crate) local_matrix: Affine3A,
    pub(crate) world_matrix: Affine3A,

    // Shadow state for dirty checking
    last_position: Vec3,
    last_rotation: Quat,
    last_scale: Vec3,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            euler: Vec3::ZERO,
            use_quaternion: true,
            scale: Vec3::ONE,

            matrix_auto_update: true,
            matrix_world_needs_update: true,

            local_matrix: Affine3A::IDENTITY,
            world_matrix: Affine3A::IDENTITY,

            last_position: Vec3::ZERO,
            last_rotation: Quat::IDENTITY,
            last_scale: Vec3::ONE,
        }
    }

    /// Rotation actually applied to the local matrix.
    #[inline]
    #[must_use]
    pub fn effective_rotation(&self) -> Quat {
        if self.use_quaternion {
            self.rotation
        } else {
            Quat::from_euler(EulerRot::XYZ, self.euler.x, self.euler.y, self.euler.z)
        }
    }

    /// Recomputes the local matrix when TRS changed or the node was flagged.
    ///
    /// Returns `true` if the local matrix changed. Nodes with
    /// `matrix_auto_update == false` keep their matrix untouched.
    pub fn update_local_matrix(&mut self) -> bool {
        if !self.matrix_auto_update {
            return false;
        }

        let rotation = self.effective_rotation();
        let changed = self.position != self.last_position
            || rotation != self.last_rotation
            || self.scale != self.last_scale
            || self.matrix_world_needs_update;

        if changed {
            self.local_matrix =
                Affine3A::from_scale_rotation_translation(self.scale, rotation, self.position);

            self.last_position = self.position;
            self.last_rotation = rotation;
            self.last_scale = self.scale;
        }

        changed
    }

    /// Sets the XYZ Euler rotation, keeping the quaternion in sync.
    pub fn set_rotation_euler(&mut self, x: f32, y: f32, z: f32) {
        self.euler = Vec3::new(x, y, z);
        self.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
    }

    /// Current XYZ Euler angles.
    #[must_use]
    pub fn rotation_euler(&self) -> Vec3 {
        if self.use_quaternion {
            let (x, y, z) = self.rotation.to_euler(EulerRot::XYZ);
            Vec3::new(x, y, z)
        } else {
            self.euler
        }
    }

    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Affine3A {
        &self.local_matrix
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world_matrix
    }

    pub fn set_world_matrix(&mut self, mat: Affine3A) {
        self.world_matrix = mat;
        self.matrix_world_needs_update = false;
    }

    /// Flags the node so the next matrix update recomputes it.
    pub fn mark_dirty(&mut self) {
        self.matrix_auto_update = true;
        self.matrix_world_needs_update = true;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
