#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod plugins;
pub mod project;
pub mod storage;
pub mod utils;
