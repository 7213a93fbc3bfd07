//! Clima - look up the current weather for a city and country

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use clima::action::Action;
use clima::api::{ApiConfig, DEFAULT_BASE_URL};
use clima::components::{Component, WeatherDisplay, WeatherDisplayProps};
use clima::effect::{self, Effect};
use clima::logger;
use clima::reducer::reducer;
use clima::state::{AppState, LOADING_ANIM_TICK_MS};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::LevelFilter;
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Clima - current weather by city and country (OpenWeatherMap)
#[derive(Parser, Debug)]
#[command(name = "clima")]
#[command(about = "Look up the current weather for a city and country")]
struct Args {
    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", default_value = "", hide_env_values = true)]
    api_key: String,

    /// API scheme and host
    #[arg(long, env = "OPENWEATHER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Prefill the city field
    #[arg(long, default_value = "")]
    city: String,

    /// Prefill the country field
    #[arg(long, default_value = "")]
    country: String,

    /// Where log records are appended
    #[arg(long, default_value = "clima.log")]
    log_file: PathBuf,

    /// Minimum log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum ClimaComponentId {
    Display,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum ClimaContext {
    Main,
}

impl EventRoutingState<ClimaComponentId, ClimaContext> for AppState {
    fn focused(&self) -> Option<ClimaComponentId> {
        Some(ClimaComponentId::Display)
    }

    fn modal(&self) -> Option<ClimaComponentId> {
        None
    }

    fn binding_context(&self, id: ClimaComponentId) -> ClimaContext {
        match id {
            ClimaComponentId::Display => ClimaContext::Main,
        }
    }

    fn default_context(&self) -> ClimaContext {
        ClimaContext::Main
    }
}

/// Shared by every effect: one HTTP client, one API config
#[derive(Clone, Debug)]
struct EffectEnv {
    client: reqwest::Client,
    api: Arc<ApiConfig>,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        api_key,
        base_url,
        city,
        country,
        log_file,
        log_level,
        debug: debug_args,
    } = Args::parse();

    logger::initialize(&log_file, log_level).map_err(io::Error::other)?;

    let api = ApiConfig { base_url, api_key };
    if api.api_key.is_empty() {
        log::warn!("no API key configured; set OPENWEATHER_API_KEY or pass --api-key");
    }
    log::info!("using weather API at {}", api.base_url);

    let env = EffectEnv {
        client: reqwest::Client::new(),
        api: Arc::new(api),
    };

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(city, country))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions, env).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    log::info!("clima exiting");
    Ok(())
}

struct ClimaUi {
    display: WeatherDisplay,
}

impl ClimaUi {
    fn new() -> Self {
        Self {
            display: WeatherDisplay::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<ClimaComponentId>,
    ) {
        event_ctx.set_component_area(ClimaComponentId::Display, area);

        let props = WeatherDisplayProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.display.render(frame, area, props);
    }

    fn handle_display_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = WeatherDisplayProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .display
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    env: EffectEnv,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(ClimaUi::new()));
    let mut bus: EventBus<AppState, Action, ClimaComponentId, ClimaContext> = EventBus::new();
    let keybindings: Keybindings<ClimaContext> = Keybindings::new();

    let ui_display = Rc::clone(&ui);
    bus.register(ClimaComponentId::Display, move |event, state| {
        ui_display
            .borrow_mut()
            .handle_display_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            None,
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_ANIM_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &env),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, env: &EffectEnv) {
    match effect {
        Effect::FetchWeather { query, generation } => {
            let client = env.client.clone();
            let api = Arc::clone(&env.api);
            // Same key: a resubmission cancels the request still in flight
            ctx.tasks().spawn(TaskKey::new("weather"), async move {
                effect::fetch_weather(client, &api, query, generation).await
            });
        }
        Effect::ExpireBanner { id, after_ms } => {
            ctx.tasks().spawn(TaskKey::new("banner"), async move {
                effect::expire_banner(id, after_ms).await
            });
        }
    }
}
