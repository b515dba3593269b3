//! Export-by-email relay
//!
//! - **`relay`** - `MailRelay` trait and the HTTP gateway client
//! - **`handlers`** - `POST /email`

pub mod relay;
pub mod handlers;

pub use relay::{HttpMailRelay, MailRelay, OutgoingMail, RelayError, SharedMailRelay};
