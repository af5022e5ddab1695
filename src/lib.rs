pub mod api;
pub mod config;
pub mod data_models;
pub mod emphasis;
pub mod error;
pub mod pagination;
pub mod preview_controller;
pub mod query_controller;
pub mod renderer;
pub mod terminal;
