//! Scrollable log panel with navigation.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

/// Scroll state for the log panel.
#[derive(Debug, Clone)]
pub struct LogScrollState {
    /// Current scroll offset (first visible line index).
    pub offset: usize,
    /// Whether auto-scroll to bottom is enabled.
    pub auto_scroll: bool,
}

impl LogScrollState {
    /// Create a new scroll state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            offset: 0,
            auto_scroll: true,
        }
    }

    /// Handle a new log message (auto-scroll if enabled).
    pub fn on_new_message(&mut self, total_logs: usize) {
        if self.auto_scroll {
            self.offset = total_logs.saturating_sub(1);
        }
    }

    /// Scroll up by one line.
    pub fn scroll_up(&mut self) {
        self.auto_scroll = false;
        self.offset = self.offset.saturating_sub(1);
    }

    /// Scroll down by one line.
    pub fn scroll_down(&mut self, total_logs: usize) {
        self.offset = (self.offset + 1).min(total_logs.saturating_sub(1));
        if self.offset >= total_logs.saturating_sub(1) {
            self.auto_scroll = true;
        }
    }

    /// Page up.
    pub fn page_up(&mut self, page_size: usize) {
        self.auto_scroll = false;
        self.offset = self.offset.saturating_sub(page_size);
    }

    /// Page down.
    pub fn page_down(&mut self, page_size: usize, total_logs: usize) {
        self.offset = (self.offset + page_size).min(total_logs.saturating_sub(1));
        if self.offset >= total_logs.saturating_sub(1) {
            self.auto_scroll = true;
        }
    }

    /// Jump to top.
    pub fn home(&mut self) {
        self.auto_scroll = false;
        self.offset = 0;
    }

    /// Jump to bottom.
    pub fn end(&mut self, total_logs: usize) {
        self.auto_scroll = true;
        self.offset = total_logs.saturating_sub(1);
    }
}

impl Default for LogScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the scrollable log panel.
pub fn render_logs(frame: &mut Frame, area: Rect, logs: &[String], scroll_offset: usize) {
    let visible_height = area.height.saturating_sub(2) as usize; // account for borders
    let total = logs.len();

    // Clamp offset so we never skip past the point where
    // the last log sits at the bottom of the visible area.
    let max_offset = total.saturating_sub(visible_height);
    let effective_offset = scroll_offset.min(max_offset);

    let items: Vec<ListItem> = logs
        .iter()
        .skip(effective_offset)
        .take(visible_height)
        .map(|log| {
            let style = if log.starts_with("[ERROR]") {
                Style::default().fg(Color::Red)
            } else if log.starts_with("[WARN]") {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            ListItem::new(Line::raw(log.as_str())).style(style)
        })
        .collect();

    let scroll_indicator = if total > visible_height {
        let pct = if max_offset == 0 {
            100
        } else {
            (effective_offset * 100) / max_offset
        };
        format!(" Logs ({pct}%) ")
    } else {
        " Logs ".to_string()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(scroll_indicator)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(list, area);
}
