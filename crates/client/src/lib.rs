pub mod backend_client;
pub mod dto;

pub use backend_client::{BackendAssignmentSink, BackendClient};
