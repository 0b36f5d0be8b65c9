//! Page Configuration
//!
//! Selectors, attribute names and tunables for every handler. Defaults
//! match the markup the expedientes server renders; a page can override
//! any subset through a JSON `data-ui-config` attribute on `<body>`.

use serde::Deserialize;

use crate::dom::Dom;
use crate::error::UiResult;

/// Attribute on `<body>` carrying JSON overrides
pub const CONFIG_ATTR: &str = "data-ui-config";

const ROW_SELECTOR: &str = "tr[data-search]";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub radio: RadioConfig,
    pub theme: ThemeConfig,
    pub bulk: BulkSelectConfig,
    pub filter: FilterConfig,
    pub sort: SortConfig,
    pub counter: CounterConfig,
    pub menu: MenuConfig,
}

impl PageConfig {
    pub fn from_json(json: &str) -> UiResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read overrides from the page, falling back to defaults
    pub fn from_page<D: Dom>(dom: &D) -> Self {
        let raw = dom
            .query("body")
            .and_then(|body| dom.attr(&body, CONFIG_ATTR))
            .filter(|raw| !raw.trim().is_empty());

        match raw {
            Some(raw) => Self::from_json(&raw).unwrap_or_else(|e| {
                log::warn!("[Config] {}, using defaults", e);
                Self::default()
            }),
            None => Self::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RadioConfig {
    /// Radios that can be deselected by clicking them again
    pub selector: String,
    /// Per-radio "was checked before this click" flag
    pub flag_attr: String,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            selector: "input.toggle-radio".to_string(),
            flag_attr: "data-was-checked".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub toggle_selector: String,
    pub storage_key: String,
    /// Attribute set on `<html>` for the stylesheet
    pub root_attr: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            toggle_selector: "#themeToggle".to_string(),
            storage_key: "theme".to_string(),
            root_attr: "data-theme".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BulkSelectConfig {
    pub master_selector: String,
    pub member_selector: String,
}

impl Default for BulkSelectConfig {
    fn default() -> Self {
        Self {
            master_selector: "#selectAll".to_string(),
            member_selector: "input[name=\"ids\"]".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub input_selector: String,
    pub row_selector: String,
    /// Lowercase concatenated text the server precomputes per row
    pub search_attr: String,
    pub count_selector: String,
    pub debounce_ms: u32,
    /// URL parameter restored into an empty search box at load
    pub query_param: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            input_selector: "#q".to_string(),
            row_selector: ROW_SELECTOR.to_string(),
            search_attr: "data-search".to_string(),
            count_selector: "#visibleCount".to_string(),
            debounce_ms: 120,
            query_param: "q".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    pub row_selector: String,
    pub param: String,
    pub year_attr: String,
    pub month_attr: String,
    pub num_attr: String,
    /// Optional control that flips the direction client-side
    pub toggle_selector: String,
    pub direction_attr: String,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            row_selector: ROW_SELECTOR.to_string(),
            param: "sort".to_string(),
            year_attr: "data-year".to_string(),
            month_attr: "data-month".to_string(),
            num_attr: "data-num".to_string(),
            toggle_selector: "[data-sort-toggle]".to_string(),
            direction_attr: "data-sort-dir".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    /// Region carrying the expediente id
    pub region_selector: String,
    pub id_attr: String,
    pub button_selector: String,
    pub action_attr: String,
    pub badge_selector: String,
    pub ok_class: String,
    pub warn_class: String,
    pub bad_class: String,
    pub endpoint_base: String,
    pub failure_message: String,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            region_selector: "[data-exp-id]".to_string(),
            id_attr: "data-exp-id".to_string(),
            button_selector: "[data-aviso-action]".to_string(),
            action_attr: "data-aviso-action".to_string(),
            badge_selector: ".aviso-badge".to_string(),
            ok_class: "badge--ok".to_string(),
            warn_class: "badge--warn".to_string(),
            bad_class: "badge--bad".to_string(),
            endpoint_base: "/expedientes".to_string(),
            failure_message: "No se pudo actualizar avisos/verificaciones.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub trigger_selector: String,
    pub menu_selector: String,
    pub open_class: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            trigger_selector: "[data-menu-trigger]".to_string(),
            menu_selector: ".action-menu".to_string(),
            open_class: "is-open".to_string(),
        }
    }
}
