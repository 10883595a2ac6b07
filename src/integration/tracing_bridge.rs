//! Bridge onto the `tracing` ecosystem
//!
//! Installing a [`TracingBridge`] turns every record into a `tracing` event
//! with target `rust_leveled_logger`, so an application's subscriber
//! receives the logger's output.

use super::{Integrable, Integration, StructuredLevel, StructuredLogger};
use crate::core::Fields;
use tracing::Level;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingBridge;

impl TracingBridge {
    pub fn new() -> Self {
        Self
    }
}

macro_rules! emit {
    ($level:expr, $message:expr, $fields:expr) => {
        if $fields.is_empty() {
            tracing::event!(target: "rust_leveled_logger", $level, "{}", $message)
        } else {
            tracing::event!(
                target: "rust_leveled_logger",
                $level,
                fields = %$fields.format_fields(),
                "{}",
                $message
            )
        }
    };
}

impl StructuredLogger for TracingBridge {
    fn log(&self, level: StructuredLevel, message: &str, fields: &Fields) {
        match level {
            StructuredLevel::Error => emit!(Level::ERROR, message, fields),
            StructuredLevel::Warn => emit!(Level::WARN, message, fields),
            StructuredLevel::Info => emit!(Level::INFO, message, fields),
            StructuredLevel::Debug => emit!(Level::DEBUG, message, fields),
        }
    }
}

impl Integrable for TracingBridge {
    fn integration(self) -> Option<Integration> {
        Some(Integration::structured(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Logger;
    use crate::destinations::BufferDestination;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct Capture(BufferDestination);

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = BufferDestination;

        fn make_writer(&'a self) -> Self::Writer {
            self.0.clone()
        }
    }

    #[test]
    fn test_records_become_tracing_events() {
        let captured = BufferDestination::new();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(Capture(captured.clone()))
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .finish();

        let direct = BufferDestination::new();
        let logger = Logger::builder().output(direct.clone()).build();
        logger.install(TracingBridge::new());

        tracing::subscriber::with_default(subscriber, || {
            logger.warn_with_fields("disk low", Fields::new().with_field("free_mb", 12));
        });

        let output = captured.contents();
        assert!(output.contains("WARN"));
        assert!(output.contains("rust_leveled_logger"));
        assert!(output.contains("disk low"));
        assert!(output.contains("free_mb=12"));
        assert!(direct.is_empty());
    }
}
