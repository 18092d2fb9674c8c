//! In-memory stores for the analyzer's rubric and logbook.
//!
//! Nothing here touches disk; these back the `SettingsStore` and `LogStore`
//! traits for tests and single-process use.

pub mod logbook;
pub mod settings;

pub use logbook::InMemoryLogStore;
pub use settings::InMemorySettingsStore;
