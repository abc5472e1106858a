use std::fmt;

use super::event::ScrollPosition;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    #[default]
    None,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VerticalDirection {
    Up,
    Down,
    #[default]
    None,
}

impl fmt::Display for HorizontalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HorizontalDirection::Left => "left",
            HorizontalDirection::Right => "right",
            HorizontalDirection::None => "none",
        })
    }
}

impl fmt::Display for VerticalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VerticalDirection::Up => "up",
            VerticalDirection::Down => "down",
            VerticalDirection::None => "none",
        })
    }
}

/// Published scrolling state.
///
/// `is_scrolling` is always `is_scrolling_x || is_scrolling_y` and each
/// direction is `None` exactly when its axis is not scrolling. The default
/// value is the idle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollStatus {
    pub is_scrolling: bool,
    pub is_scrolling_x: bool,
    pub is_scrolling_y: bool,
    pub direction_x: HorizontalDirection,
    pub direction_y: VerticalDirection,
}

impl ScrollStatus {
    pub const IDLE: ScrollStatus = ScrollStatus {
        is_scrolling: false,
        is_scrolling_x: false,
        is_scrolling_y: false,
        direction_x: HorizontalDirection::None,
        direction_y: VerticalDirection::None,
    };

    /// Movement observed going from `last` to `next`.
    pub fn between(last: ScrollPosition, next: ScrollPosition) -> Self {
        let is_scrolling_x = next.x != last.x;
        let is_scrolling_y = next.y != last.y;

        let direction_x = if !is_scrolling_x {
            HorizontalDirection::None
        } else if next.x < last.x {
            HorizontalDirection::Left
        } else {
            HorizontalDirection::Right
        };

        let direction_y = if !is_scrolling_y {
            VerticalDirection::None
        } else if next.y < last.y {
            VerticalDirection::Up
        } else {
            VerticalDirection::Down
        };

        Self {
            is_scrolling: is_scrolling_x || is_scrolling_y,
            is_scrolling_x,
            is_scrolling_y,
            direction_x,
            direction_y,
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::IDLE
    }
}

impl fmt::Display for ScrollStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_scrolling {
            return f.write_str("idle");
        }
        write!(f, "scrolling x={} y={}", self.direction_x, self.direction_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_consistent(status: &ScrollStatus) {
        assert_eq!(status.is_scrolling, status.is_scrolling_x || status.is_scrolling_y);
        assert_eq!(status.direction_x == HorizontalDirection::None, !status.is_scrolling_x);
        assert_eq!(status.direction_y == VerticalDirection::None, !status.is_scrolling_y);
    }

    #[test]
    fn left_movement() {
        let status = ScrollStatus::between(
            ScrollPosition::new(100.0, 200.0),
            ScrollPosition::new(80.0, 200.0),
        );

        assert_eq!(status, ScrollStatus {
            is_scrolling: true,
            is_scrolling_x: true,
            is_scrolling_y: false,
            direction_x: HorizontalDirection::Left,
            direction_y: VerticalDirection::None,
        });
    }

    #[test]
    fn down_movement() {
        let status = ScrollStatus::between(
            ScrollPosition::new(100.0, 200.0),
            ScrollPosition::new(100.0, 250.0),
        );

        assert_eq!(status.direction_y, VerticalDirection::Down);
        assert_eq!(status.direction_x, HorizontalDirection::None);
        assert!(!status.is_scrolling_x);
        assert!(status.is_scrolling_y);
        assert!(status.is_scrolling);
    }

    #[test]
    fn no_movement_is_idle() {
        let pos = ScrollPosition::new(3.5, 7.25);
        let status = ScrollStatus::between(pos, pos);

        assert!(status.is_idle());
        assert_eq!(status, ScrollStatus::default());
    }

    #[test]
    fn invariants_hold_for_every_combination() {
        let last = ScrollPosition::new(10.0, 10.0);
        for x in [0.0, 10.0, 20.0] {
            for y in [0.0, 10.0, 20.0] {
                assert_consistent(&ScrollStatus::between(last, ScrollPosition::new(x, y)));
            }
        }
    }

    #[test]
    fn display() {
        let status = ScrollStatus::between(
            ScrollPosition::new(0.0, 50.0),
            ScrollPosition::new(30.0, 10.0),
        );

        assert_eq!(status.to_string(), "scrolling x=right y=up");
        assert_eq!(ScrollStatus::IDLE.to_string(), "idle");
    }
}
