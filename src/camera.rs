use crate::constants::CAMERA_FOVY_RAD;
use glam::{Mat4, Vec3, Vec4};

#[inline]
/// Compute a world-space ray from canvas backing-store coordinates.
///
/// The widget uses a fixed perspective camera on the +Z axis looking at the
/// origin, matching the render view matrix.
pub fn screen_to_world_ray(width: f32, height: f32, sx: f32, sy: f32, camera_z: f32) -> (Vec3, Vec3) {
    let ndc_x = (2.0 * sx / width.max(1.0)) - 1.0;
    let ndc_y = 1.0 - (2.0 * sy / height.max(1.0));
    let aspect = width / height.max(1.0);
    let proj = Mat4::perspective_rh(CAMERA_FOVY_RAD, aspect, 0.1, 100.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, camera_z), Vec3::ZERO, Vec3::Y);
    let inv = (proj * view).inverse();
    let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let far: Vec3 = p_far.truncate() / p_far.w;
    let ro = Vec3::new(0.0, 0.0, camera_z);
    let rd = (far - ro).normalize();
    (ro, rd)
}
