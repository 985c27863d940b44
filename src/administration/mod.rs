mod grant;

pub use grant::{GrantListParams, GrantUpdate, Grants};

pub(crate) use grant::{delete_request, find_request, list_request, update_request};
