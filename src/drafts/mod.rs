mod sending;

pub use sending::Sending;

pub(crate) use sending::send_request;
