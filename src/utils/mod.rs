pub mod clipboard;
pub mod config;
pub mod constants;
pub mod helper_functions;
