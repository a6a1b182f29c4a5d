//! Configuration module for student-finance
//!
//! - Platform path resolution with an environment override
//! - User settings persistence (currency, date format, session)

pub mod paths;
pub mod settings;

pub use paths::FinancePaths;
pub use settings::Settings;
