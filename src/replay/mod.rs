mod script;
pub use script::*;
mod runner;
pub use runner::*;
