pub mod render;
pub mod state;

pub use render::render_segments;
pub use state::{ChatState, RevealEvent, TypingResponse};
