pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::FileChartStore, Settings};
pub use core::{box_office::BoxOffice, shared::SharedBoxOffice};
pub use utils::error::{ReservationError, Result};
