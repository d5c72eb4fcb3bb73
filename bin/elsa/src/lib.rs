mod config;
mod controller;
mod error;
mod executor;
mod listing;
mod locator;
mod registry;
mod scanner;
mod strip;

#[cfg(test)]
mod fake;

pub mod cli;

pub use config::{default_rc_files, Config, ADDRESSES_VARIABLE};
pub use controller::{edit_registry, Controller};
pub use error::{ConfigError, ErasedError, Error, StripError};
pub use executor::{Action, Executor, Report, SettleIntervals};
pub use listing::Listing;
pub use locator::locate;
pub use registry::{Edit, FileOutcome, FileReport, Registry};
pub use scanner::{Scanner, StripScan};
pub use strip::{Outlet, OutletInfo, PowerState, StripClient, StripSession};

pub type Result<T> = std::result::Result<T, Error>;
