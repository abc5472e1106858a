mod core;
mod kinds;
mod tracing;

pub use self::core::{Error, Result, set_debug_output};
pub use self::kinds::ErrorKind;
pub use self::tracing::{error, trace, debug, info, warn};
