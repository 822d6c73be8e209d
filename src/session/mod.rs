// file: src/session/mod.rs
// description: session store and upload staging exports
// reference: internal module structure

pub mod store;
pub mod upload;

pub use store::{SessionId, SessionStatus, SessionStore};
pub use upload::StagedUpload;
