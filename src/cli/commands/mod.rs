pub mod config;
pub mod install;
pub mod show;
pub mod status;
