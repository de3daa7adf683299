//! Opaque page tokens and the codec between records and range predicates.
//!
//! A token is the colon-separated string form of one record's ordering
//! field values. Tokens are self-describing: nothing needs to be stored on
//! the server between page requests.

mod codec;
mod page_token;

pub use codec::{CursorMode, TOKEN_SEPARATOR, TokenCodec};
pub use page_token::{FIRST_PAGE_NUMBER, PageRequest, PageToken};
