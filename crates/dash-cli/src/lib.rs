//! Sales dashboard CLI library: configuration, logging, page loading and
//! terminal rendering.

pub mod cli;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod render;
