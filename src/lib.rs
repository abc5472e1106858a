pub mod errors;
pub mod config;
pub mod utils;
pub mod scroll;
pub mod replay;
