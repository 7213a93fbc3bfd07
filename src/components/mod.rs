pub mod error_banner;
pub mod result_panel;
pub mod weather_display;
pub mod weather_form;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use error_banner::{ErrorBanner, ErrorBannerProps};
pub use result_panel::{ResultPanel, ResultPanelProps, spinner_text};
pub use weather_display::{WeatherDisplay, WeatherDisplayProps};
pub use weather_form::{WeatherForm, WeatherFormProps};
