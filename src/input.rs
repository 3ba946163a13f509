use crate::constants::{DRAG_THRESHOLD_PX, INERTIA_DECAY, PITCH_CLAMP_RAD, ROTATION_SENSITIVITY};
use glam::{Vec2, Vec3};

/// What the caller should do after a pointer-move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveAction {
    /// Dragging; rotation velocity was updated.
    Drag,
    /// Not dragging; run a hover hit-test for cursor affordance only.
    Hover,
}

/// Raw pointer state owned by the interaction controller.
///
/// `pitch`/`yaw` are the accumulated camera-relative rotation consumed by the
/// frame loop; nothing else reads the rest of the fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerDragState {
    pub dragging: bool,
    pub has_dragged: bool,
    pub prev: Vec2,
    /// Velocity in radians per frame: x = pitch, y = yaw.
    pub velocity: Vec2,
    pub pitch: f32,
    pub yaw: f32,
}

impl PointerDragState {
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.dragging = true;
        self.has_dragged = false;
        self.prev = Vec2::new(x, y);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> MoveAction {
        if !self.dragging {
            return MoveAction::Hover;
        }
        let delta = Vec2::new(x, y) - self.prev;
        if delta.x.abs() > DRAG_THRESHOLD_PX || delta.y.abs() > DRAG_THRESHOLD_PX {
            self.has_dragged = true;
        }
        self.velocity = Vec2::new(delta.y, delta.x) * ROTATION_SENSITIVITY;
        self.prev = Vec2::new(x, y);
        MoveAction::Drag
    }

    /// Returns true when the gesture ended as a click and the caller should
    /// hit-test for a country under the pointer.
    pub fn pointer_up(&mut self) -> bool {
        let was_click = self.dragging && !self.has_dragged;
        self.dragging = false;
        self.has_dragged = false;
        was_click
    }

    /// Leaving the surface ends any drag but never produces a click.
    pub fn pointer_leave(&mut self) {
        self.dragging = false;
        self.has_dragged = false;
    }

    /// Per-frame integration, run every rendered frame regardless of input.
    ///
    /// While dragging the velocity feeds straight into the accumulators.
    /// Once released it decays geometrically and the constant auto-rotation
    /// takes over, so drag inertia fades into the idle spin instead of
    /// stopping abruptly.
    pub fn step_frame(&mut self, auto_rotation_speed: f32) {
        if self.dragging {
            self.pitch += self.velocity.x;
            self.yaw += self.velocity.y;
        } else {
            self.velocity *= INERTIA_DECAY;
            self.pitch += self.velocity.x;
            self.yaw += self.velocity.y;
            self.yaw -= auto_rotation_speed;
        }
        self.pitch = self.pitch.clamp(-PITCH_CLAMP_RAD, PITCH_CLAMP_RAD);
    }
}

/// Ray/sphere intersection; returns the near-hit parameter along the ray.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}
