use std::fmt;

/// Scroll offsets of a surface at the time it was read.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollPosition {
    pub x: f64,
    pub y: f64,
}

impl ScrollPosition {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for ScrollPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Emitted by a surface whenever it scrolled, with the offsets read at
/// that moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSignal {
    pub position: ScrollPosition,
}
