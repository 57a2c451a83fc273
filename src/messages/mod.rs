pub mod export;
pub mod storage;
pub mod types;

pub use export::{export_chat, ChatExport};
pub use storage::MessageStorage;
pub use types::{
    format_timestamp, thread_title_from_input, ChatThread, FileUpload, Message, Sender, User,
};
