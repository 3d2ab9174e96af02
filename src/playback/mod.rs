pub mod device;
pub mod session;

pub use device::{PlaybackDevice, PlaybackError, PlaybackHandle};
pub use session::PlaybackSession;
