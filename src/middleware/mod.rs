pub mod gate;
pub mod resolve_session;
pub mod response;

pub use gate::{access_gate_middleware, decide, Access, GateDecision};
pub use resolve_session::{resolve_session_middleware, CurrentSession};
pub use response::ApiResponse;
