//! Host-driven writing portfolio viewer.
//!
//! Loads a JSON collection of written pieces, renders them as cards,
//! filters them by category, and shows one piece at a time in a reader
//! overlay. The host owns the markup and delivers events; see [`app::App`].

pub mod app;
pub mod boot;
pub mod config;
pub mod dom;
pub mod export;
pub mod feed;
pub mod filter;
pub mod format;
pub mod loader;
pub mod models;
pub mod page;
pub mod reader;
pub mod render;
pub mod view;

mod tests;
