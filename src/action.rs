//! Actions: form intents, async results, and global events

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::WeatherReading;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Form edits and submit =====
    /// City input text changed
    FormCityChange(String),

    /// Country input text changed
    FormCountryChange(String),

    /// Move input focus to the other field
    FormFocusNext,

    /// Intent: validate the form and look up the weather
    FormSubmit,

    // ===== Lookup results (weather_did) =====
    /// Result: reading decoded for the given request generation
    WeatherDidLoad {
        generation: u64,
        reading: WeatherReading,
    },

    /// Result: the API reported the location does not exist
    WeatherDidNotFind { generation: u64 },

    /// Result: request or response decoding failed
    WeatherDidError { generation: u64, message: String },

    // ===== Banner (banner_did) =====
    /// The banner timer with this id fired
    BannerDidExpire(u64),

    // ===== UI =====
    /// Force a re-render (cursor movement)
    UiRender,

    // ===== Uncategorized (global) =====
    /// Periodic tick for the loading spinner
    Tick,

    /// Exit the application
    Quit,
}
