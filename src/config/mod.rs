//! Configuration module for the rateio engine
//!
//! Settings are loaded by the caller and passed into the functions that need
//! a tolerance or threshold; the engine keeps no global configuration.

pub mod settings;

pub use settings::Settings;
