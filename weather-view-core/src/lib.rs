//! Core library for the weather display.
//!
//! This crate defines:
//! - The view state machine (search, candidate selection, detail modal)
//! - View models resolved from weather snapshots and static asset tables
//! - An async session that debounces lookups and drops stale results
//! - Mocked location search and weather fetch collaborators
//! - Configuration handling
//!
//! It is used by `weather-view-cli`, but can also be driven by any other front-end.

pub mod assets;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod format;
pub mod model;
pub mod provider;
pub mod session;
pub mod view;

pub use assets::DisplayLocale;
pub use config::Config;
pub use controller::{ControllerSettings, Effect, Event, Phase, SelectedDay, ViewController, ViewState};
pub use error::{AssetKind, ViewError};
pub use model::{DayForecast, LocationCandidate, WeatherSnapshot};
pub use provider::{LocationSearch, Providers, WeatherFetcher, providers_from_config};
pub use session::Session;
pub use view::Screen;
