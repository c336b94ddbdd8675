//! twintop_agent library: metrics collection and HTTP routes, shared by the
//! binary and the integration tests.

pub mod battery;
pub mod metrics;
pub mod routes;
pub mod state;
pub mod types;
