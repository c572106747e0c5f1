pub mod server;
pub mod shim;

pub use server::{router, router_with_stats, HealthResponse};
pub use shim::{FunctionRequest, FunctionResponse, TransportShim};
