pub mod clean;
pub mod config;
pub mod error;
pub mod inspect;
pub mod logging;
pub mod table;
