mod message;
mod options;
mod traits;

pub use message::{ChatMessage, ChatMessageBuilder, ChatRole};
pub use options::ChatOptions;
pub use traits::{ChatProvider, ChatResponse};
