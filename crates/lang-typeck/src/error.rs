//! Re-exports the shared error type so the rest of this crate can
//! write `crate::error::Result` without naming `lang_common` at every
//! call site.

pub use lang_common::{ErrorCode, Result, TypeError};
