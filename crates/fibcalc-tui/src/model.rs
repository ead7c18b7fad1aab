//! TUI application model (Elm architecture).

use std::collections::VecDeque;
use std::io;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use crossterm::event::{self, Event};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{event::DisableMouseCapture, event::EnableMouseCapture, execute};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Terminal;

use crate::chart::render_progress;
use crate::footer::render_footer;
use crate::header::render_header;
use crate::keymap::{map_key, KeyAction};
use crate::logs::render_logs;
use crate::messages::TuiMessage;
use crate::metrics::render_metrics;
use crate::sparkline::render_sparkline;

/// TUI application state (Elm Model).
pub struct TuiApp {
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Whether the calculation is paused.
    pub paused: bool,
    /// Current calculation progress per algorithm.
    pub progress: Vec<f64>,
    /// Algorithm names.
    pub algorithms: Vec<String>,
    /// Completed algorithms with their durations.
    pub completed: Vec<(String, Duration)>,
    /// Log messages.
    pub logs: VecDeque<String>,
    /// Sparkline data for throughput.
    pub sparkline_data: VecDeque<f64>,
    /// Start time of the calculation.
    pub start_time: Option<Instant>,
    /// Message receiver.
    rx: Receiver<TuiMessage>,
    /// Current generation for message filtering.
    generation: u64,
    /// Terminal width.
    pub terminal_width: u16,
    /// Terminal height.
    pub terminal_height: u16,
    /// Log scroll offset.
    pub log_scroll_offset: usize,
    /// Whether to auto-scroll logs.
    pub log_auto_scroll: bool,
    /// Show details toggle.
    pub show_details: bool,
    /// Show logs toggle.
    pub show_logs: bool,
    /// Current CPU usage.
    pub cpu_percent: f64,
    /// Current memory usage in MB.
    pub memory_mb: f64,
    /// Current throughput in bits/s.
    pub throughput_bits_per_sec: f64,
    /// N value being computed.
    pub n_value: u64,
    /// Error messages.
    pub errors: Vec<String>,
    /// Frozen elapsed time once calculations finish.
    pub finished_elapsed: Option<Duration>,
    /// Last summed progress for throughput calculation.
    last_progress_sum: f64,
    /// Last timestamp for throughput calculation.
    last_throughput_time: Option<Instant>,
}

impl TuiApp {
    /// Create a new TUI app.
    #[must_use]
    pub fn new(rx: Receiver<TuiMessage>) -> Self {
        Self {
            should_quit: false,
            paused: false,
            progress: Vec::new(),
            algorithms: Vec::new(),
            completed: Vec::new(),
            logs: VecDeque::new(),
            sparkline_data: VecDeque::new(),
            start_time: None,
            rx,
            generation: 0,
            terminal_width: 80,
            terminal_height: 24,
            log_scroll_offset: 0,
            log_auto_scroll: true,
            show_details: true,
            show_logs: true,
            cpu_percent: 0.0,
            memory_mb: 0.0,
            throughput_bits_per_sec: 0.0,
            n_value: 0,
            errors: Vec::new(),
            finished_elapsed: None,
            last_progress_sum: 0.0,
            last_throughput_time: None,
        }
    }

    /// Set the N value being computed.
    pub fn set_n(&mut self, n: u64) {
        self.n_value = n;
    }

    /// Get the current generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Update the model with incoming messages (Elm Update).
    pub fn update(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.handle_message(msg);
        }
    }

    /// Handle a single message.
    #[allow(clippy::too_many_lines, clippy::cast_precision_loss)]
    pub fn handle_message(&mut self, msg: TuiMessage) {
        match msg {
            TuiMessage::Progress {
                index,
                progress,
                algorithm,
            } => {
                // Ensure vectors are large enough
                while self.progress.len() <= index {
                    self.progress.push(0.0);
                    self.algorithms.push(String::new());
                }
                self.progress[index] = progress;
                self.algorithms[index] = algorithm;
            }
            TuiMessage::Log(msg) => {
                self.logs.push_back(msg);
                // Keep only last 500 log entries
                if self.logs.len() > 500 {
                    self.logs.pop_front();
                    // Adjust scroll offset when removing items
                    if self.log_scroll_offset > 0 {
                        self.log_scroll_offset -= 1;
                    }
                }
                // Auto-scroll to bottom on new messages
                if self.log_auto_scroll {
                    self.scroll_logs_to_bottom();
                }
            }
            TuiMessage::SparklineData(value) => {
                self.sparkline_data.push_back(value);
                // Ring buffer: keep last 60 values
                if self.sparkline_data.len() > 60 {
                    self.sparkline_data.pop_front();
                }
            }
            TuiMessage::Started => {
                self.start_time = Some(Instant::now());
                self.finished_elapsed = None;
                self.last_progress_sum = 0.0;
                self.last_throughput_time = None;
                self.generation += 1;
                self.progress.clear();
                self.algorithms.clear();
                self.completed.clear();
                self.errors.clear();
            }
            TuiMessage::Quit => {
                self.should_quit = true;
            }
            TuiMessage::Complete {
                algorithm,
                duration,
            } => {
                self.completed.push((algorithm, duration));
            }
            TuiMessage::Tick => {
                // Tick triggers re-render, nothing to update in model
            }
            TuiMessage::Resize { width, height } => {
                self.terminal_width = width;
                self.terminal_height = height;
            }
            TuiMessage::KeyPress(action) => {
                self.handle_key_action(action);
            }
            TuiMessage::Error(err) => {
                self.errors.push(err.clone());
                self.logs.push_back(format!("[ERROR] {err}"));
            }
            TuiMessage::Finished => {
                self.finished_elapsed = self.start_time.map(|t| t.elapsed());
            }
            TuiMessage::SystemMetrics(metrics) => {
                // Ignore updates after calculations have finished
                if self.finished_elapsed.is_none() {
                    self.cpu_percent = metrics.cpu_percent;
                    self.memory_mb = metrics.memory_mb;

                    // Calculate throughput from progress delta over time
                    let current_progress_sum: f64 = self.progress.iter().sum();
                    let now = Instant::now();
                    let throughput = if let Some(last_time) = self.last_throughput_time {
                        let delta_progress = current_progress_sum - self.last_progress_sum;
                        let delta_secs = now.duration_since(last_time).as_secs_f64();
                        if delta_secs > 0.0 && delta_progress > 0.0 {
                            // F(n) has approximately n * log2(phi) bits
                            let estimated_total_bits = self.n_value as f64 * 0.694;
                            let num_algos = self.progress.len().max(1) as f64;
                            delta_progress / num_algos * estimated_total_bits / delta_secs
                        } else {
                            0.0
                        }
                    } else {
                        0.0
                    };
                    self.last_progress_sum = current_progress_sum;
                    self.last_throughput_time = Some(now);
                    self.throughput_bits_per_sec = throughput;

                    self.sparkline_data.push_back(throughput);
                    if self.sparkline_data.len() > 60 {
                        self.sparkline_data.pop_front();
                    }
                }
            }
        }
    }

    /// Handle a keyboard action.
    pub fn handle_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit | KeyAction::Cancel => {
                self.should_quit = true;
            }
            KeyAction::Pause => {
                self.paused = true;
            }
            KeyAction::Resume => {
                self.paused = false;
            }
            KeyAction::ToggleDetails => {
                self.show_details = !self.show_details;
            }
            KeyAction::ToggleLogs => {
                self.show_logs = !self.show_logs;
            }
            KeyAction::ScrollUp => {
                self.log_auto_scroll = false;
                if self.log_scroll_offset > 0 {
                    self.log_scroll_offset -= 1;
                }
            }
            KeyAction::ScrollDown => {
                self.log_scroll_offset += 1;
                let max_offset = self.logs.len().saturating_sub(1);
                if self.log_scroll_offset >= max_offset {
                    self.log_scroll_offset = max_offset;
                    self.log_auto_scroll = true;
                }
            }
            KeyAction::PageUp => {
                self.page_up(10);
            }
            KeyAction::PageDown => {
                self.page_down(10);
            }
            KeyAction::Home => {
                self.scroll_home();
            }
            KeyAction::End => {
                self.scroll_end();
            }
            KeyAction::None => {}
        }
    }

    /// Scroll logs to the bottom.
    fn scroll_logs_to_bottom(&mut self) {
        self.log_scroll_offset = self.logs.len().saturating_sub(1);
    }

    /// Scroll logs up by a page.
    pub fn page_up(&mut self, page_size: usize) {
        self.log_auto_scroll = false;
        self.log_scroll_offset = self.log_scroll_offset.saturating_sub(page_size);
    }

    /// Scroll logs down by a page.
    pub fn page_down(&mut self, page_size: usize) {
        self.log_scroll_offset += page_size;
        let max_offset = self.logs.len().saturating_sub(1);
        if self.log_scroll_offset >= max_offset {
            self.log_scroll_offset = max_offset;
            self.log_auto_scroll = true;
        }
    }

    /// Scroll logs to the very top.
    pub fn scroll_home(&mut self) {
        self.log_auto_scroll = false;
        self.log_scroll_offset = 0;
    }

    /// Scroll logs to the very bottom.
    pub fn scroll_end(&mut self) {
        self.log_auto_scroll = true;
        self.scroll_logs_to_bottom();
    }

    /// Get the elapsed time since calculation started.
    ///
    /// Returns the frozen elapsed time if calculations have finished,
    /// or the live elapsed time if still running.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.finished_elapsed
            .or_else(|| self.start_time.map(|t| t.elapsed()))
    }

    /// Compute the adaptive 60/40 layout.
    ///
    /// Returns (header, `progress_panel`, `info_panel`, footer) rects.
    #[must_use]
    pub fn compute_layout(area: Rect) -> (Rect, Rect, Rect, Rect) {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // header
                Constraint::Min(5),    // main content
                Constraint::Length(2), // footer
            ])
            .split(area);

        let header = outer[0];
        let footer = outer[2];

        // Split main content 60/40
        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(60), // progress panel
                Constraint::Percentage(40), // info panel
            ])
            .split(outer[1]);

        (header, main[0], main[1], footer)
    }

    /// Compute the info panel sub-layout (metrics + sparkline left, logs right).
    #[must_use]
    pub fn compute_info_layout(info_area: Rect) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40), // metrics + sparkline
                Constraint::Percentage(60), // logs
            ])
            .split(info_area);

        (chunks[0], chunks[1])
    }

    /// Compute metrics sub-layout (metrics top, sparkline bottom).
    #[must_use]
    pub fn compute_metrics_layout(metrics_area: Rect) -> (Rect, Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7), // metrics
                Constraint::Min(3),    // sparkline
            ])
            .split(metrics_area);

        (chunks[0], chunks[1])
    }

    /// Render the full TUI view.
    pub fn render(&mut self, frame: &mut ratatui::Frame) {
        // Make VecDeques contiguous so we can borrow slices during render.
        self.sparkline_data.make_contiguous();
        self.logs.make_contiguous();

        let (header_area, progress_area, info_area, footer_area) =
            Self::compute_layout(frame.area());

        // Header
        let algo_display = if self.algorithms.is_empty() {
            "N/A".to_string()
        } else {
            self.algorithms.join(", ")
        };
        render_header(frame, header_area, self.n_value, &algo_display);

        // Progress panel (60% top)
        render_progress(frame, progress_area, &self.algorithms, &self.progress);

        // SAFETY of unwrap: make_contiguous was called above, so as_slices().1 is empty.
        let (sparkline_slice, _) = self.sparkline_data.as_slices();
        let (logs_slice, _) = self.logs.as_slices();

        // Info panel (40% bottom)
        if self.show_logs {
            let (metrics_col, logs_col) = Self::compute_info_layout(info_area);

            // Left column: metrics + sparkline
            let (metrics_rect, sparkline_rect) = Self::compute_metrics_layout(metrics_col);

            let elapsed_secs = self.elapsed().map_or(0.0, |d| d.as_secs_f64());
            render_metrics(
                frame,
                metrics_rect,
                elapsed_secs,
                self.memory_mb,
                self.cpu_percent,
                self.throughput_bits_per_sec,
            );
            render_sparkline(frame, sparkline_rect, sparkline_slice, "Throughput");

            // Right column: logs
            render_logs(frame, logs_col, logs_slice, self.log_scroll_offset);
        } else {
            // No logs, show full metrics + sparkline
            let (metrics_rect, sparkline_rect) = Self::compute_metrics_layout(info_area);
            let elapsed_secs = self.elapsed().map_or(0.0, |d| d.as_secs_f64());
            render_metrics(
                frame,
                metrics_rect,
                elapsed_secs,
                self.memory_mb,
                self.cpu_percent,
                self.throughput_bits_per_sec,
            );
            render_sparkline(frame, sparkline_rect, sparkline_slice, "Throughput");
        }

        // Footer
        render_footer(frame, footer_area);
    }

    /// Set up the terminal for TUI mode.
    ///
    /// Returns a configured Terminal or an error.
    pub fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    /// Tear down the terminal, restoring normal mode.
    pub fn teardown_terminal(
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Run the TUI event loop.
    ///
    /// This sets up the terminal, runs the main loop (poll events, update, render),
    /// and tears down on exit.
    pub fn run(&mut self) -> io::Result<()> {
        let mut terminal = Self::setup_terminal()?;

        let tick_rate = Duration::from_millis(250);

        loop {
            // Render
            terminal.draw(|frame| {
                self.render(frame);
            })?;

            if self.should_quit {
                break;
            }

            // Poll for events with tick rate timeout
            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key_event) => {
                        let action = map_key(key_event);
                        self.handle_key_action(action);
                    }
                    Event::Resize(w, h) => {
                        self.terminal_width = w;
                        self.terminal_height = h;
                    }
                    _ => {}
                }
            }

            // Process any pending messages from the calculation
            self.update();
        }

        Self::teardown_terminal(&mut terminal)?;
        Ok(())
    }
}
