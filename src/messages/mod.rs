mod message;
mod raw;

pub use message::{MessageListParams, MessageUpdate, Messages};
pub use raw::{Mailbox, RawMessage};

pub(crate) use message::{find_raw_request, find_request, list_request, update_request};
