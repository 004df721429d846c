//! Interceptors (middleware) around stage execution.
//!
//! Interceptors observe every stage call made through
//! [`instrument`](crate::stages::instrument) without participating in the
//! data flow between stages.

mod chain;
mod logging;
mod metrics;

pub use chain::{Interceptor, InterceptorChain};
pub use logging::LoggingInterceptor;
pub use metrics::MonitoringInterceptor;
