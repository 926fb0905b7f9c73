mod layout;
mod renderer;
mod widgets;

pub use layout::{AppLayout, message_frame};
pub use renderer::render;
pub use widgets::{Controls, ErrorMsg, Header, MessageWindow, Progress};
