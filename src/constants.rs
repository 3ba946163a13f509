// Pointer displacement (px) above which a gesture counts as a drag, not a click
pub const DRAG_THRESHOLD_PX: f32 = 2.0;

// Pointer delta (px) to rotation velocity (radians per frame)
pub const ROTATION_SENSITIVITY: f32 = 0.005;

// Geometric velocity decay per frame while not dragging
pub const INERTIA_DECAY: f32 = 0.95;

// Accumulated pitch clamp; keeps the globe from inverting
pub const PITCH_CLAMP_RAD: f32 = std::f32::consts::FRAC_PI_3;

// Camera
// Z distance used by both picking and the render view matrix.
pub const CAMERA_Z: f32 = 3.5;
pub const CAMERA_FOVY_RAD: f32 = std::f32::consts::FRAC_PI_3;

// Default country material
pub const DEFAULT_EMISSIVE_INTENSITY: f32 = 0.1;
pub const DEFAULT_ROUGHNESS: f32 = 0.8;
pub const DEFAULT_METALNESS: f32 = 0.1;

// Highlighted country material (glow look under bloom)
pub const HIGHLIGHT_ROUGHNESS: f32 = 0.3;
pub const HIGHLIGHT_METALNESS: f32 = 0.7;

// Clicked highlight style
pub const CLICKED_COLOR: u32 = 0x1f6feb;
pub const CLICKED_EMISSIVE: u32 = 0x58a6ff;
pub const CLICKED_EMISSIVE_INTENSITY: f32 = 1.5;

// Language-default highlight style
pub const LANGUAGE_COLOR: u32 = 0x3fb950;
pub const LANGUAGE_EMISSIVE: u32 = 0x56d364;
pub const LANGUAGE_EMISSIVE_INTENSITY: f32 = 1.5;

// Highlighted border material
pub const BORDER_HIGHLIGHT_COLOR: u32 = 0xffffff;
pub const BORDER_HIGHLIGHT_EMISSIVE: u32 = 0xffffff;
pub const BORDER_HIGHLIGHT_EMISSIVE_INTENSITY: f32 = 1.0;

// Render ordering: the fill is drawn first, highlighted borders last so
// they are never occluded by fill geometry.
pub const GLOBE_FILL_RENDER_ORDER: i32 = -10;
pub const BORDER_HIGHLIGHT_RENDER_ORDER: i32 = 10;

// Frames of forced reconciliation after the scene graph attaches; the
// upstream globe asset pipeline is known to reset materials shortly after load.
pub const DEFENSIVE_RECONCILE_FRAMES: u32 = 12;
