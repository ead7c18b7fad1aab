//! TUI message types (Elm Messages).

use std::time::Duration;

/// System metrics snapshot.
#[derive(Debug, Clone)]
pub struct SystemMetrics {
    /// CPU usage as a percentage (0.0 - 100.0).
    pub cpu_percent: f64,
    /// Memory usage in megabytes.
    pub memory_mb: f64,
    /// Throughput in bits per second.
    pub throughput_bits_per_sec: f64,
}

/// Messages that drive the TUI update cycle.
#[derive(Debug, Clone)]
pub enum TuiMessage {
    /// Progress update from a calculator.
    Progress {
        index: usize,
        progress: f64,
        algorithm: &'static str,
    },
    /// Log message.
    Log(String),
    /// Sparkline data point.
    SparklineData(f64),
    /// Calculation started.
    Started,
    /// Calculation complete.
    Complete {
        algorithm: String,
        duration: Duration,
    },
    /// Quit the application.
    Quit,
    /// Tick event for periodic updates.
    Tick,
    /// Terminal resize event.
    Resize { width: u16, height: u16 },
    /// Key press event forwarded from the event loop.
    KeyPress(crate::keymap::KeyAction),
    /// Error message.
    Error(String),
    /// System metrics update (CPU, memory, throughput).
    SystemMetrics(SystemMetrics),
    /// All calculations finished — freezes the elapsed timer.
    Finished,
}
