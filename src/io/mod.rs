//! Background I/O for the external services.

pub mod pending;
pub mod request_dispatcher;

pub use pending::PendingRequests;
pub use request_dispatcher::{DispatchResult, RequestDispatcher};
