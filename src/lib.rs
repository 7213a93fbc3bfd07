//! Clima - city/country weather lookup on tui-dispatch
//!
//! The library exposes the app's modules so the binary and the tests share them.

pub mod action;
pub mod api;
pub mod components;
pub mod convert;
pub mod effect;
pub mod logger;
pub mod reducer;
pub mod state;
