mod controls;
mod error;
mod header;
mod message;
mod progress;

pub use controls::Controls;
pub use error::ErrorMsg;
pub use header::Header;
pub use message::MessageWindow;
pub use progress::Progress;

const DUR_WIDTH: u16 = 5;
