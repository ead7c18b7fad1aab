//! Runtime metrics panel with sysinfo collection.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use sysinfo::System;

/// Metrics collector using sysinfo.
pub struct MetricsCollector {
    system: System,
    /// Last collected CPU usage (0.0 - 100.0).
    pub cpu_percent: f64,
    /// Last collected memory usage in MB.
    pub memory_mb: f64,
    /// Throughput in bits/s (must be set externally).
    pub throughput_bits_per_sec: f64,
}

impl MetricsCollector {
    /// Create a new metrics collector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            system: System::new(),
            cpu_percent: 0.0,
            memory_mb: 0.0,
            throughput_bits_per_sec: 0.0,
        }
    }

    /// Refresh system metrics.
    pub fn refresh(&mut self) {
        self.system.refresh_cpu_usage();
        self.system.refresh_memory();

        // Average CPU across all cores
        let cpus = self.system.cpus();
        if !cpus.is_empty() {
            self.cpu_percent =
                cpus.iter().map(|c| f64::from(c.cpu_usage())).sum::<f64>() / cpus.len() as f64;
        }

        // Memory in MB
        self.memory_mb = self.system.used_memory() as f64 / (1024.0 * 1024.0);
    }

    /// Set the throughput value (calculated externally from progress).
    pub fn set_throughput(&mut self, bits_per_sec: f64) {
        self.throughput_bits_per_sec = bits_per_sec;
    }

    /// Create a `SystemMetrics` snapshot for sending as a message.
    #[must_use]
    pub fn snapshot(&self) -> crate::messages::SystemMetrics {
        crate::messages::SystemMetrics {
            cpu_percent: self.cpu_percent,
            memory_mb: self.memory_mb,
            throughput_bits_per_sec: self.throughput_bits_per_sec,
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a throughput value into a human-readable string.
#[must_use]
pub fn format_throughput(bits_per_sec: f64) -> String {
    if bits_per_sec >= 1_000_000_000.0 {
        format!("{:.1} Gbit/s", bits_per_sec / 1_000_000_000.0)
    } else if bits_per_sec >= 1_000_000.0 {
        format!("{:.1} Mbit/s", bits_per_sec / 1_000_000.0)
    } else if bits_per_sec >= 1_000.0 {
        format!("{:.1} Kbit/s", bits_per_sec / 1_000.0)
    } else {
        format!("{bits_per_sec:.0} bit/s")
    }
}

/// Render the metrics panel.
pub fn render_metrics(
    frame: &mut Frame,
    area: Rect,
    elapsed_secs: f64,
    memory_mb: f64,
    cpu_percent: f64,
    throughput_bits_per_sec: f64,
) {
    let text = vec![
        Line::raw(format!("Elapsed:    {elapsed_secs:.1}s")),
        Line::raw(format!("Memory:     {memory_mb:.1} MB")),
        Line::raw(format!("CPU:        {cpu_percent:.0}%")),
        Line::raw(format!(
            "Throughput: {}",
            format_throughput(throughput_bits_per_sec)
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Metrics ")
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new(text).block(block);
    frame.render_widget(paragraph, area);
}
