use glam::{Quat, Vec3};

/// Values a keyframe track can hold and blend.
pub trait Interpolatable: Copy + Sized {
    /// Blend from `start` to `end` by `t` in `[0, 1]`.
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }
}

impl Interpolatable for Quat {
    /// Spherical interpolation, renormalised so accumulated float error never
    /// leaks a non-unit rotation into the transform.
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.slerp(end, t).normalize()
    }
}
