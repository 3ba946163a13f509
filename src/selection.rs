use crate::constants::{
    CLICKED_COLOR, CLICKED_EMISSIVE, CLICKED_EMISSIVE_INTENSITY, LANGUAGE_COLOR,
    LANGUAGE_EMISSIVE, LANGUAGE_EMISSIVE_INTENSITY,
};
use std::cell::{Cell, RefCell};

/// Languages the surrounding page can switch between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Language {
    English,
    Spanish,
    French,
}

impl Language {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "en" => Some(Self::English),
            "es" => Some(Self::Spanish),
            "fr" => Some(Self::French),
            _ => None,
        }
    }

    /// Fixed language-to-country mapping for the default highlight.
    pub fn default_country(self) -> &'static str {
        match self {
            Self::English => "UNITED_STATES_OF_AMERICA",
            Self::Spanish => "SPAIN",
            Self::French => "FRANCE",
        }
    }
}

/// Strip a trailing `_<digits>` fragment suffix; countries split across
/// multiple meshes share a code prefix (e.g. `FRANCE_2` -> `FRANCE`).
pub fn base_country_code(code: &str) -> &str {
    if let Some(pos) = code.rfind('_') {
        let (head, tail) = (&code[..pos], &code[pos + 1..]);
        if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) {
            return head;
        }
    }
    code
}

/// Which of the two visually distinct highlight styles applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HighlightStyle {
    Clicked,
    LanguageDefault,
}

impl HighlightStyle {
    pub fn color(self) -> u32 {
        match self {
            Self::Clicked => CLICKED_COLOR,
            Self::LanguageDefault => LANGUAGE_COLOR,
        }
    }

    pub fn emissive(self) -> u32 {
        match self {
            Self::Clicked => CLICKED_EMISSIVE,
            Self::LanguageDefault => LANGUAGE_EMISSIVE,
        }
    }

    pub fn emissive_intensity(self) -> f32 {
        match self {
            Self::Clicked => CLICKED_EMISSIVE_INTENSITY,
            Self::LanguageDefault => LANGUAGE_EMISSIVE_INTENSITY,
        }
    }
}

/// The resolved highlight: one country and the style to paint it with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Highlight {
    pub country: String,
    pub style: HighlightStyle,
}

/// Click selection plus the externally supplied language signal.
///
/// An explicit click always takes precedence over the language-derived
/// default; changing the language never clears a click, and there is no
/// un-click. At most one country is clicked-highlighted at a time.
#[derive(Clone, Debug, Default)]
pub struct SelectionState {
    pub clicked_country: Option<String>,
    pub active_language: Option<Language>,
}

impl SelectionState {
    /// Register a country click; replaces any previous click.
    pub fn click(&mut self, country_code: &str) {
        self.clicked_country = Some(base_country_code(country_code).to_owned());
    }

    pub fn set_language(&mut self, language: Option<Language>) {
        self.active_language = language;
    }

    /// Resolve which country (if any) is highlighted and with which style.
    pub fn highlight(&self) -> Option<Highlight> {
        if let Some(clicked) = &self.clicked_country {
            return Some(Highlight {
                country: clicked.clone(),
                style: HighlightStyle::Clicked,
            });
        }
        self.active_language.map(|lang| Highlight {
            country: lang.default_country().to_owned(),
            style: HighlightStyle::LanguageDefault,
        })
    }
}

/// Single entry point for a country click, shared by the widget's own
/// raycasting path and the renderer-driven callback variant. Clicks arriving
/// after teardown are discarded.
pub fn handle_country_click(
    selection: &RefCell<SelectionState>,
    dirty: &Cell<bool>,
    alive: &Cell<bool>,
    country_id: &str,
) {
    if !alive.get() {
        return;
    }
    selection.borrow_mut().click(country_id);
    dirty.set(true);
    log::info!("[click] country {}", country_id);
}
