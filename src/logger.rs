/// Sink for the two diagnostic events a check can emit.
///
/// `alert` fires on clean unavailability, `debug` on an unexpected problem.
/// Nothing is logged when the connection succeeds.
pub trait Logger: Send + Sync {
    fn alert(&self, message: &str);
    fn debug(&self, message: &str);
}

/// Forwards checker events to `tracing`. There is no alert level, so alerts go out as errors.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn alert(&self, message: &str) {
        tracing::error!(target: "netcheck", "{}", message);
    }

    fn debug(&self, message: &str) {
        tracing::debug!(target: "netcheck", "{}", message);
    }
}
