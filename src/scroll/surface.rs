use std::sync::RwLock;

use tokio::sync::broadcast;

use super::event::{ScrollPosition, ScrollSignal};

pub const SIGNAL_CAPACITY: usize = 64;

pub type ScrollSignalRx = broadcast::Receiver<ScrollSignal>;

/// Something that scrolls and announces it.
///
/// Dropping a receiver returned by `subscribe` unregisters that listener.
pub trait ScrollSurface: Send + Sync {
    fn position(&self) -> ScrollPosition;

    fn subscribe(&self) -> ScrollSignalRx;
}

/// In-memory surface whose offsets are set by the caller.
pub struct VirtualSurface {
    position: RwLock<ScrollPosition>,
    signal: broadcast::Sender<ScrollSignal>,
}

impl VirtualSurface {
    pub fn new() -> Self {
        Self::at(ScrollPosition::default())
    }

    pub fn at(position: ScrollPosition) -> Self {
        let (signal, _) = broadcast::channel(SIGNAL_CAPACITY);
        Self {
            position: RwLock::new(position),
            signal,
        }
    }

    pub fn scroll_to(&self, x: f64, y: f64) {
        let position = ScrollPosition::new(x, y);
        *self.position.write().unwrap() = position;
        self.emit(position);
    }

    pub fn scroll_by(&self, delta_x: f64, delta_y: f64) {
        let position = {
            let mut position = self.position.write().unwrap();
            position.x += delta_x;
            position.y += delta_y;
            *position
        };
        self.emit(position);
    }

    pub fn listeners(&self) -> usize {
        self.signal.receiver_count()
    }

    fn emit(&self, position: ScrollPosition) {
        // No listeners is fine, the scroll simply goes unobserved
        let _ = self.signal.send(ScrollSignal { position });
    }
}

impl Default for VirtualSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollSurface for VirtualSurface {
    fn position(&self) -> ScrollPosition {
        *self.position.read().unwrap()
    }

    fn subscribe(&self) -> ScrollSignalRx {
        self.signal.subscribe()
    }
}
