use crate::config::GlobeConfig;
use crate::constants::{
    BORDER_HIGHLIGHT_COLOR, BORDER_HIGHLIGHT_EMISSIVE, BORDER_HIGHLIGHT_EMISSIVE_INTENSITY,
    BORDER_HIGHLIGHT_RENDER_ORDER, DEFAULT_EMISSIVE_INTENSITY, DEFAULT_METALNESS,
    DEFAULT_ROUGHNESS, GLOBE_FILL_RENDER_ORDER, HIGHLIGHT_METALNESS, HIGHLIGHT_ROUGHNESS,
};
use crate::input::ray_sphere;
use crate::selection::{base_country_code, Highlight};
use fnv::FnvHashMap;
use glam::{Mat3, Vec3};
use smallvec::SmallVec;

/// Widget lifecycle. Load failures degrade (defaults, or no globe rendered);
/// there is no error-terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetPhase {
    Unloaded,
    Loading,
    Ready,
    Unmounted,
}

/// PBR-ish material state re-asserted by reconciliation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: u32,
    pub emissive: u32,
    pub emissive_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub opaque: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: 0x000000,
            emissive: 0x000000,
            emissive_intensity: 0.0,
            roughness: DEFAULT_ROUGHNESS,
            metalness: DEFAULT_METALNESS,
            opaque: true,
        }
    }
}

/// What a mesh name identifies the node as.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// `country_<CODE>`; `code` keeps any fragment suffix, `base` strips it.
    Country { code: String, base: String },
    Border { base: String },
    GlobeFill,
    City,
    Other,
}

/// Case-insensitive mesh name classification. Only recognized patterns are
/// ever touched by reconciliation.
pub fn classify(name: &str) -> NodeKind {
    let lower = name.to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix("country_") {
        let code = rest.to_ascii_uppercase();
        let base = base_country_code(&code).to_owned();
        return NodeKind::Country { code, base };
    }
    if let Some(rest) = lower.strip_prefix("border_") {
        let code = rest.to_ascii_uppercase();
        let base = base_country_code(&code).to_owned();
        return NodeKind::Border { base };
    }
    if lower.starts_with("city_") {
        return NodeKind::City;
    }
    // The fill surface shows up under a few names depending on asset export
    if lower == "globefill" || lower == "globe_fill" || lower == "globe" || lower == "earth"
        || lower.contains("fill")
    {
        return NodeKind::GlobeFill;
    }
    NodeKind::Other
}

/// Model-space bounding sphere used for picking.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub center: Vec3,
    pub radius: f32,
}

/// One named mesh in the renderer's scene graph. Geometry stays with the
/// renderer; the widget only references and mutates visual properties.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub kind: NodeKind,
    pub material: Material,
    pub scale: f32,
    pub visible: bool,
    pub render_order: i32,
    pub bounds: Bounds,
}

impl SceneNode {
    pub fn new(name: &str, bounds: Bounds) -> Self {
        Self {
            name: name.to_owned(),
            kind: classify(name),
            material: Material::default(),
            scale: 1.0,
            visible: true,
            render_order: 0,
            bounds,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    pub nodes: Vec<SceneNode>,
}

/// Root transform applied to the whole globe group each frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct RootTransform {
    pub yaw: f32,
    pub pitch: f32,
    pub float_y: f32,
}

impl RootTransform {
    pub fn rotation(&self) -> Mat3 {
        Mat3::from_rotation_y(self.yaw) * Mat3::from_rotation_x(self.pitch)
    }
}

/// Vertical idle "breathing" offset, independent of interaction.
#[inline]
pub fn float_offset(elapsed_sec: f32, config: &GlobeConfig) -> f32 {
    config.floating_amplitude * (elapsed_sec * config.floating_speed).sin()
}

/// Derived index from uppercase base country code to scene-graph handles.
/// Built exactly once per scene-graph load, never incrementally.
#[derive(Clone, Debug, Default)]
pub struct Registries {
    pub countries: FnvHashMap<String, SmallVec<[usize; 2]>>,
    pub borders: FnvHashMap<String, SmallVec<[usize; 2]>>,
    pub globe_fill: Vec<usize>,
    pub cities: Vec<usize>,
}

impl Registries {
    pub fn build(scene: &SceneGraph) -> Self {
        let mut regs = Self::default();
        for (i, node) in scene.nodes.iter().enumerate() {
            match &node.kind {
                NodeKind::Country { base, .. } => {
                    regs.countries.entry(base.clone()).or_default().push(i);
                }
                NodeKind::Border { base } => {
                    regs.borders.entry(base.clone()).or_default().push(i);
                }
                NodeKind::GlobeFill => regs.globe_fill.push(i),
                NodeKind::City => regs.cities.push(i),
                NodeKind::Other => {}
            }
        }
        regs
    }
}

/// Re-apply the expected visual state for every recognized mesh.
///
/// Safe to run any number of times with unchanged inputs; unknown mesh names
/// are never touched. Callers gate on config readiness and skip entirely
/// while the registries do not exist yet.
pub fn reconcile(
    scene: &mut SceneGraph,
    regs: &Registries,
    highlight: Option<&Highlight>,
    config: &GlobeConfig,
) {
    // The upstream package intermittently overrides the fill meshes; assets
    // may expose several, so every one gets re-asserted to a fixed opaque
    // material drawn below everything else.
    for &i in &regs.globe_fill {
        let node = &mut scene.nodes[i];
        node.material = Material {
            color: config.globe_fill_color,
            ..Material::default()
        };
        node.scale = config.globe_fill_scale;
        node.visible = true;
        node.render_order = GLOBE_FILL_RENDER_ORDER;
    }

    let highlighted = highlight.map(|h| h.country.as_str());

    for (base, indices) in &regs.countries {
        let style = highlight
            .filter(|h| h.country == *base)
            .map(|h| h.style);
        for &i in indices {
            let node = &mut scene.nodes[i];
            if let Some(style) = style {
                node.scale = config.highlight_scale;
                node.material = Material {
                    color: style.color(),
                    emissive: style.emissive(),
                    emissive_intensity: style.emissive_intensity(),
                    roughness: HIGHLIGHT_ROUGHNESS,
                    metalness: HIGHLIGHT_METALNESS,
                    opaque: true,
                };
            } else {
                node.scale = config.country_scale;
                node.material = Material {
                    color: config.country_color,
                    emissive: 0x000000,
                    emissive_intensity: DEFAULT_EMISSIVE_INTENSITY,
                    roughness: DEFAULT_ROUGHNESS,
                    metalness: DEFAULT_METALNESS,
                    opaque: true,
                };
            }
            node.visible = true;
            node.render_order = 0;
        }
    }

    for (base, indices) in &regs.borders {
        let is_highlighted = highlighted == Some(base.as_str());
        for &i in indices {
            let node = &mut scene.nodes[i];
            node.scale = config.border_scale;
            node.visible = true;
            if is_highlighted {
                node.material = Material {
                    color: BORDER_HIGHLIGHT_COLOR,
                    emissive: BORDER_HIGHLIGHT_EMISSIVE,
                    emissive_intensity: BORDER_HIGHLIGHT_EMISSIVE_INTENSITY,
                    roughness: HIGHLIGHT_ROUGHNESS,
                    metalness: HIGHLIGHT_METALNESS,
                    opaque: true,
                };
                node.render_order = BORDER_HIGHLIGHT_RENDER_ORDER;
            } else {
                node.material = Material {
                    color: config.border_color,
                    ..Material::default()
                };
                node.render_order = 0;
            }
        }
    }

    // Asset artifacts not used by this product
    for &i in &regs.cities {
        scene.nodes[i].visible = false;
    }
}

/// Hit-test the country meshes with a world-space ray; returns the base code
/// of the nearest hit fragment. A miss is not an error.
pub fn pick_country(
    scene: &SceneGraph,
    regs: &Registries,
    ray_origin: Vec3,
    ray_dir: Vec3,
    root: &RootTransform,
) -> Option<String> {
    // Bring the ray into the globe's model space instead of re-deriving
    // world transforms per fragment.
    let inv_rot = root.rotation().transpose();
    let origin = inv_rot * (ray_origin - Vec3::new(0.0, root.float_y, 0.0));
    let dir = (inv_rot * ray_dir).normalize();

    let mut best: Option<(&str, f32)> = None;
    for (base, indices) in &regs.countries {
        for &i in indices {
            let node = &scene.nodes[i];
            if !node.visible {
                continue;
            }
            // Same placement the renderer uses: the scale moves the center too
            let center = node.bounds.center * node.scale;
            let radius = node.bounds.radius * node.scale;
            if let Some(t) = ray_sphere(origin, dir, center, radius) {
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((base.as_str(), t)),
                }
            }
        }
    }
    best.map(|(base, _)| base.to_owned())
}
