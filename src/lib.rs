#![allow(clippy::similar_names, clippy::module_name_repetitions)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
//! Navigation indicator data model for a horizontal situation indicator.
//!
//! [`HsiModel`] picks the CDI source among two VOR/LOC receivers and the area-nav
//! computer, smooths the deviation needle and course pointer independent of frame rate,
//! and resolves two bearing pointers and a DME window from persisted pilot selections.

pub mod error;
pub mod logger;
pub mod nav_indicator;
pub mod settings;
pub mod sim;
pub mod telemetry;

pub use error::{HsiError, SettingsError};
pub use nav_indicator::{HsiModel, HsiSnapshot};
pub use settings::{FileStore, MemoryStore, SettingsStore};
pub use telemetry::{NavRadio, Telemetry, ToFrom};
