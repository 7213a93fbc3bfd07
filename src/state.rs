//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::convert::{format_celsius, kelvin_to_celsius};

/// City and country as submitted from the form
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Query {
    pub city: String,
    pub country: String,
}

/// One API response worth of temperatures, all in Kelvin
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReading {
    pub city_name: String,
    pub current_temp_k: f64,
    pub max_temp_k: f64,
    pub min_temp_k: f64,
}

impl WeatherReading {
    pub fn current_label(&self) -> String {
        format_celsius(kelvin_to_celsius(self.current_temp_k))
    }

    pub fn max_label(&self) -> String {
        format_celsius(kelvin_to_celsius(self.max_temp_k))
    }

    pub fn min_label(&self) -> String {
        format_celsius(kelvin_to_celsius(self.min_temp_k))
    }
}

/// Which form input receives typed characters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum FormField {
    #[default]
    City,
    Country,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::City => FormField::Country,
            FormField::Country => FormField::City,
        }
    }
}

/// Contents of the city/country form
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormState {
    pub city: String,
    pub country: String,
    pub focus: FormField,
}

impl FormState {
    /// Build a query, or `None` if either field is blank.
    pub fn query(&self) -> Option<Query> {
        let city = self.city.trim();
        let country = self.country.trim();
        if city.is_empty() || country.is_empty() {
            return None;
        }
        Some(Query {
            city: city.to_string(),
            country: country.to_string(),
        })
    }
}

/// The transient error message under the form
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Banner {
    pub id: u64,
    pub message: String,
}

pub const VALIDATION_MESSAGE: &str = "Ambos campos son obligatorios...!";
pub const NOT_FOUND_MESSAGE: &str = "Ciudad No Encontrada";

/// How long a banner stays up.
pub const BANNER_TIMEOUT_MS: u64 = 3000;

/// Spinner timing.
pub const LOADING_ANIM_TICK_MS: u64 = 80;
pub const SPINNER_DOTS: u32 = 12;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Form ---
    #[debug(section = "Form", label = "Fields", debug_fmt)]
    pub form: FormState,

    // --- Result panel ---
    /// Display lifecycle: Empty (idle) → Loading → Loaded/Failed
    #[debug(section = "Weather", label = "Display", debug_fmt)]
    pub display: DataResource<WeatherReading>,

    /// Bumped on every submitted query; completions for older ones are dropped
    #[debug(section = "Weather", label = "Generation")]
    pub generation: u64,

    // --- Banner ---
    #[debug(section = "Banner", label = "Current", debug_fmt)]
    pub banner: Option<Banner>,

    #[debug(skip)]
    pub next_banner_id: u64,

    // --- Animation internals (skipped) ---
    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    /// Create state with the form prefilled
    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            form: FormState {
                city: city.into(),
                country: country.into(),
                focus: FormField::City,
            },
            display: DataResource::Empty,
            generation: 0,
            banner: None,
            next_banner_id: 0,
            tick_count: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.display.is_loading()
    }

    /// Index of the brightest spinner dot
    pub fn spinner_head(&self) -> u32 {
        self.tick_count % SPINNER_DOTS
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new("", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_requires_both_fields() {
        let form = FormState {
            city: "".into(),
            country: "Spain".into(),
            ..Default::default()
        };
        assert_eq!(form.query(), None);

        let form = FormState {
            city: "Madrid".into(),
            country: "   ".into(),
            ..Default::default()
        };
        assert_eq!(form.query(), None);
    }

    #[test]
    fn test_query_trims_fields() {
        let form = FormState {
            city: " London ".into(),
            country: "GB\t".into(),
            ..Default::default()
        };
        assert_eq!(
            form.query(),
            Some(Query {
                city: "London".into(),
                country: "GB".into(),
            })
        );
    }

    #[test]
    fn test_reading_labels() {
        let reading = WeatherReading {
            city_name: "London".into(),
            current_temp_k: 290.0,
            max_temp_k: 292.0,
            min_temp_k: 288.0,
        };
        assert_eq!(reading.current_label(), "16℃");
        assert_eq!(reading.max_label(), "18℃");
        assert_eq!(reading.min_label(), "14℃");
    }

    #[test]
    fn test_banner_messages_are_exact() {
        assert_eq!(VALIDATION_MESSAGE, "Ambos campos son obligatorios...!");
        assert_eq!(NOT_FOUND_MESSAGE, "Ciudad No Encontrada");
    }

    #[test]
    fn test_focus_cycles() {
        assert_eq!(FormField::City.next(), FormField::Country);
        assert_eq!(FormField::Country.next(), FormField::City);
    }
}
