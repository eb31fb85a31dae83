pub mod app;
pub mod catalog;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod history;
pub mod logging;
pub mod query;
pub mod store;
pub mod surface;
