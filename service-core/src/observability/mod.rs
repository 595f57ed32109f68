pub mod logging;

pub use logging::{LogFormat, TracingSettings, init_tracing, shutdown_tracing};
