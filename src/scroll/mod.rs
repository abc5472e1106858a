mod constants;
pub use constants::*;
mod event;
pub use event::*;
mod status;
pub use status::*;
mod surface;
pub use surface::*;
mod throttle;
pub use throttle::*;
mod tracker;
pub use tracker::*;
