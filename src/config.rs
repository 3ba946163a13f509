use serde::Deserialize;

/// Immutable-after-load rendering parameters for the globe.
///
/// Replaced wholesale when a document load succeeds; never partially mutated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlobeConfig {
    pub country_color: u32,
    pub border_color: u32,
    pub globe_fill_color: u32,
    pub highlight_color: u32,
    pub rotation_speed: f32,
    pub country_scale: f32,
    pub border_scale: f32,
    pub globe_fill_scale: f32,
    pub highlight_scale: f32,
    pub floating_amplitude: f32,
    pub floating_speed: f32,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            country_color: 0x000000,
            border_color: 0xffffff,
            globe_fill_color: 0x000000,
            highlight_color: 0xffffff,
            rotation_speed: 0.002,
            country_scale: 1.0,
            border_scale: 1.01,
            globe_fill_scale: 0.98,
            // Very light extrusion unless the document says otherwise
            highlight_scale: 1.02,
            floating_amplitude: 0.15,
            floating_speed: 0.5,
        }
    }
}

impl GlobeConfig {
    /// Derive scale factors from a loaded document, starting from defaults.
    pub fn with_document(doc: &ConfigDocument) -> Self {
        let mut cfg = Self::default();
        let country = doc.extrusions.country;
        cfg.highlight_scale = 1.0 + country.above;
        cfg.country_scale = 1.0 - country.below;
        cfg.border_scale = 1.0 + doc.border.height;
        cfg
    }
}

/// Recognized shape of the remote configuration document. All fields are
/// optional; absence means 0.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct ConfigDocument {
    #[serde(default)]
    pub extrusions: Extrusions,
    #[serde(default)]
    pub border: BorderParams,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct Extrusions {
    #[serde(default)]
    pub country: CountryExtrusion,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct CountryExtrusion {
    #[serde(default)]
    pub above: f32,
    #[serde(default)]
    pub below: f32,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct BorderParams {
    #[serde(default)]
    pub height: f32,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed configuration document: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn parse_document(body: &str) -> Result<ConfigDocument, ConfigError> {
    Ok(serde_json::from_str(body)?)
}

/// Interpret a fetched configuration body, falling back to defaults when the
/// document is malformed.
pub fn config_from_body(body: &str) -> GlobeConfig {
    match parse_document(body) {
        Ok(doc) => GlobeConfig::with_document(&doc),
        Err(e) => {
            log::warn!("[config] {e}; using defaults");
            GlobeConfig::default()
        }
    }
}
