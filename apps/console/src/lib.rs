pub mod app;
pub mod chat;
pub mod commands;
pub mod config;
pub mod navigation;
pub mod store;
pub mod transport;
pub mod view;
