mod clock;
mod driver;

pub use clock::TickClock;
pub use driver::{PlaybackDriver, PlaybackFrame, PlaybackState, cursor_for_tick, tick_for_cursor};
