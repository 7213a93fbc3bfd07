//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, Banner, BANNER_TIMEOUT_MS, NOT_FOUND_MESSAGE, VALIDATION_MESSAGE};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Form actions =====
        Action::FormCityChange(city) => {
            state.form.city = city;
            DispatchResult::changed()
        }

        Action::FormCountryChange(country) => {
            state.form.country = country;
            DispatchResult::changed()
        }

        Action::FormFocusNext => {
            state.form.focus = state.form.focus.next();
            DispatchResult::changed()
        }

        Action::FormSubmit => {
            let Some(query) = state.form.query() else {
                return show_banner(state, VALIDATION_MESSAGE);
            };

            state.generation = state.generation.wrapping_add(1);
            state.display = DataResource::Loading;
            state.tick_count = 0;
            DispatchResult::changed_with(Effect::FetchWeather {
                query,
                generation: state.generation,
            })
        }

        // ===== Weather actions =====
        Action::WeatherDidLoad { generation, reading } => {
            if generation != state.generation {
                return DispatchResult::unchanged();
            }
            state.display = DataResource::Loaded(reading);
            DispatchResult::changed()
        }

        Action::WeatherDidNotFind { generation } => {
            if generation != state.generation {
                return DispatchResult::unchanged();
            }
            state.display = DataResource::Empty;
            let result = show_banner(state, NOT_FOUND_MESSAGE);
            if result.changed {
                result
            } else {
                // Panel was cleared even though the banner slot is taken
                DispatchResult::changed()
            }
        }

        Action::WeatherDidError {
            generation,
            message,
        } => {
            if generation != state.generation {
                return DispatchResult::unchanged();
            }
            state.display = DataResource::Failed(message);
            DispatchResult::changed()
        }

        // ===== Banner actions =====
        Action::BannerDidExpire(id) => match &state.banner {
            Some(banner) if banner.id == id => {
                state.banner = None;
                DispatchResult::changed()
            }
            _ => DispatchResult::unchanged(),
        },

        // ===== UI actions =====
        Action::UiRender => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if state.is_loading() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Raise the banner unless one is already showing.
fn show_banner(state: &mut AppState, message: &str) -> DispatchResult<Effect> {
    if state.banner.is_some() {
        return DispatchResult::unchanged();
    }

    let id = state.next_banner_id;
    state.next_banner_id = state.next_banner_id.wrapping_add(1);
    state.banner = Some(Banner {
        id,
        message: message.to_string(),
    });
    DispatchResult::changed_with(Effect::ExpireBanner {
        id,
        after_ms: BANNER_TIMEOUT_MS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FormField, Query, WeatherReading};
    use pretty_assertions::assert_eq;

    fn filled_state() -> AppState {
        AppState::new("London", "GB")
    }

    fn london() -> WeatherReading {
        WeatherReading {
            city_name: "London".into(),
            current_temp_k: 290.0,
            max_temp_k: 292.0,
            min_temp_k: 288.0,
        }
    }

    #[test]
    fn test_submit_sets_loading_and_fetches() {
        let mut state = filled_state();
        state.tick_count = 9;

        let result = reducer(&mut state, Action::FormSubmit);

        assert!(result.changed);
        assert!(state.display.is_loading());
        assert_eq!(state.tick_count, 0);
        assert_eq!(state.generation, 1);
        assert_eq!(
            result.effects,
            vec![Effect::FetchWeather {
                query: Query {
                    city: "London".into(),
                    country: "GB".into(),
                },
                generation: 1,
            }]
        );
    }

    #[test]
    fn test_submit_with_empty_field_shows_banner_only() {
        let mut state = AppState::new("", "Spain");

        let result = reducer(&mut state, Action::FormSubmit);

        assert!(result.changed);
        assert!(state.display.is_empty());
        assert_eq!(state.generation, 0);
        assert_eq!(
            state.banner.as_ref().map(|b| b.message.as_str()),
            Some(VALIDATION_MESSAGE)
        );
        assert_eq!(
            result.effects,
            vec![Effect::ExpireBanner {
                id: 0,
                after_ms: BANNER_TIMEOUT_MS,
            }]
        );
    }

    #[test]
    fn test_validation_keeps_previous_result() {
        let mut state = filled_state();
        state.display = DataResource::Loaded(london());
        state.form.city.clear();

        reducer(&mut state, Action::FormSubmit);

        assert_eq!(state.display.data(), Some(&london()));
        assert!(state.banner.is_some());
    }

    #[test]
    fn test_second_banner_is_suppressed() {
        let mut state = AppState::default();

        reducer(&mut state, Action::FormSubmit);
        let first = state.banner.clone();
        let result = reducer(&mut state, Action::FormSubmit);

        assert!(!result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.banner, first);
    }

    #[test]
    fn test_banner_expiry_matches_id() {
        let mut state = AppState::default();
        reducer(&mut state, Action::FormSubmit);

        // A stale timer does not touch the current banner
        assert!(!reducer(&mut state, Action::BannerDidExpire(7)).changed);
        assert!(state.banner.is_some());

        assert!(reducer(&mut state, Action::BannerDidExpire(0)).changed);
        assert!(state.banner.is_none());

        // The next banner gets a fresh id
        reducer(&mut state, Action::FormSubmit);
        assert_eq!(state.banner.as_ref().map(|b| b.id), Some(1));
    }

    #[test]
    fn test_load_for_current_generation() {
        let mut state = filled_state();
        reducer(&mut state, Action::FormSubmit);

        let result = reducer(
            &mut state,
            Action::WeatherDidLoad {
                generation: 1,
                reading: london(),
            },
        );

        assert!(result.changed);
        assert_eq!(state.display.data(), Some(&london()));
    }

    #[test]
    fn test_stale_completions_are_dropped() {
        let mut state = filled_state();
        reducer(&mut state, Action::FormSubmit);
        reducer(&mut state, Action::FormSubmit);
        assert_eq!(state.generation, 2);

        let stale = [
            Action::WeatherDidLoad {
                generation: 1,
                reading: london(),
            },
            Action::WeatherDidNotFind { generation: 1 },
            Action::WeatherDidError {
                generation: 1,
                message: "boom".into(),
            },
        ];
        for action in stale {
            assert!(!reducer(&mut state, action).changed);
        }
        assert!(state.display.is_loading());
        assert!(state.banner.is_none());
    }

    #[test]
    fn test_not_found_clears_and_banners() {
        let mut state = filled_state();
        reducer(&mut state, Action::FormSubmit);

        let result = reducer(&mut state, Action::WeatherDidNotFind { generation: 1 });

        assert!(result.changed);
        assert!(state.display.is_empty());
        assert_eq!(
            state.banner.as_ref().map(|b| b.message.as_str()),
            Some(NOT_FOUND_MESSAGE)
        );
        assert_eq!(result.effects.len(), 1);
    }

    #[test]
    fn test_not_found_with_banner_up_still_clears() {
        let mut state = filled_state();
        state.banner = Some(Banner {
            id: 3,
            message: VALIDATION_MESSAGE.into(),
        });
        reducer(&mut state, Action::FormSubmit);

        let result = reducer(&mut state, Action::WeatherDidNotFind { generation: 1 });

        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert!(state.display.is_empty());
        assert_eq!(state.banner.as_ref().map(|b| b.id), Some(3));
    }

    #[test]
    fn test_transport_error_replaces_spinner() {
        let mut state = filled_state();
        reducer(&mut state, Action::FormSubmit);

        reducer(
            &mut state,
            Action::WeatherDidError {
                generation: 1,
                message: "connection refused".into(),
            },
        );

        assert!(state.display.is_failed());
        assert_eq!(state.display.error(), Some("connection refused"));
    }

    #[test]
    fn test_form_editing() {
        let mut state = AppState::default();

        reducer(&mut state, Action::FormCityChange("Lima".into()));
        reducer(&mut state, Action::FormFocusNext);
        reducer(&mut state, Action::FormCountryChange("PE".into()));

        assert_eq!(state.form.city, "Lima");
        assert_eq!(state.form.country, "PE");
        assert_eq!(state.form.focus, FormField::Country);
    }

    #[test]
    fn test_tick_only_while_loading() {
        let mut state = filled_state();
        assert!(!reducer(&mut state, Action::Tick).changed);

        reducer(&mut state, Action::FormSubmit);
        assert!(reducer(&mut state, Action::Tick).changed);
        assert_eq!(state.tick_count, 1);
    }
}
