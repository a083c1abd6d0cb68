//! Main TUI application state and logic

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::playback::{Controller, StepView};
use crate::render::anim::EntranceAnimator;
use crate::structure::layout::{lay_out, StructureLayout};
use crate::trace::TraceResponse;

use super::panes;
use super::panes::status::StatusRenderData;

/// Poll timeout while playing or animating; roughly frame rate.
const ANIMATION_POLL: Duration = Duration::from_millis(33);

/// Poll timeout when nothing is moving.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Speed adjustment granularity and clamp range.
const SPEED_STEP: Duration = Duration::from_millis(100);
const SPEED_RANGE: (Duration, Duration) = (Duration::from_millis(100), Duration::from_millis(3000));

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Variables,
    Stack,
    Structures,
    Output,
}

impl FocusedPane {
    /// Move focus to the next pane
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Variables,
            FocusedPane::Variables => FocusedPane::Stack,
            FocusedPane::Stack => FocusedPane::Structures,
            FocusedPane::Structures => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Output,
            FocusedPane::Variables => FocusedPane::Source,
            FocusedPane::Stack => FocusedPane::Variables,
            FocusedPane::Structures => FocusedPane::Stack,
            FocusedPane::Output => FocusedPane::Structures,
        }
    }
}

/// The main application state
pub struct App {
    /// Playback controller owning the installed trace
    controller: Controller,

    /// Entrance animation scheduler for the structure view
    animator: EntranceAnimator,

    /// Presentation bundle of the currently displayed step
    view: Option<StepView>,

    /// Draw geometry derived from the current view
    layouts: Vec<StructureLayout>,

    /// Run-level data from the tracer response
    code_lines: Vec<String>,
    stdout: String,
    stderr: String,
    trace_truncated: bool,

    /// Currently focused pane
    focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    variables_scroll: usize,
    stack_scroll: usize,
    output_scroll: usize,

    /// Target visual row for the current source line (None = not initialized)
    target_line_row: Option<usize>,

    /// Whether the app should quit
    should_quit: bool,

    /// Status message to display
    status_message: String,

    /// Last time space was pressed (for debouncing)
    last_space_press: Instant,
}

impl App {
    /// Create the app from a tracer response. A response with an empty
    /// trace is legal; every control simply no-ops until a trace is loaded.
    pub fn new(response: TraceResponse, speed: Duration) -> Self {
        let TraceResponse {
            trace,
            stdout,
            stderr,
            code_lines,
            trace_truncated,
        } = response;

        let mut controller = Controller::new(speed);
        controller.install(trace);

        let mut app = App {
            controller,
            animator: EntranceAnimator::new(),
            view: None,
            layouts: Vec::new(),
            code_lines,
            stdout,
            stderr,
            trace_truncated,
            focused_pane: FocusedPane::Source,
            variables_scroll: 0,
            stack_scroll: 0,
            output_scroll: 0,
            target_line_row: None,
            should_quit: false,
            status_message: String::from("Ready!"),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or_else(Instant::now),
        };

        if app.controller.is_empty() {
            app.status_message = String::from("Empty trace — nothing to visualize");
        } else {
            let now = Instant::now();
            if let Some(view) = app.controller.show_step(0) {
                app.apply_view(view, now);
            }
            app.status_message = format!("Loaded {} step(s)", app.controller.len());
        }
        app
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            let now = Instant::now();

            // Step-advance timer (coarse, user-speed-controlled)
            if let Some(view) = self.controller.advance(now) {
                self.apply_view(view, now);
                self.status_message = if self.controller.is_playing() {
                    String::from("Playing...")
                } else {
                    String::from("Playback complete")
                };
            }

            // Animation tick (fine, frame-driven); idle once all
            // transitions complete
            let animating = self.animator.tick(now);

            let timeout = if animating || self.controller.is_playing() {
                ANIMATION_POLL
            } else {
                IDLE_POLL
            };
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Install a freshly displayed step: recompute geometry and restart the
    /// entrance animation, superseding any in-flight transitions.
    fn apply_view(&mut self, view: StepView, now: Instant) {
        self.layouts = lay_out(&view.structures);
        self.animator.begin(&self.layouts, now);
        self.view = Some(view);
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        // Left column: Source | Output. Right column: Variables | Stack |
        // Structures.
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(pane_area);

        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(28),
                Constraint::Percentage(22),
                Constraint::Percentage(50),
            ])
            .split(columns[1]);

        panes::render_source_pane(
            frame,
            left_rows[0],
            &self.code_lines,
            self.view.as_ref().map(|v| v.line),
            self.focused_pane == FocusedPane::Source,
            &mut self.target_line_row,
        );

        panes::render_output_pane(
            frame,
            left_rows[1],
            &self.stdout,
            &self.stderr,
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        panes::render_variables_pane(
            frame,
            right_rows[0],
            self.view.as_ref().map(|v| v.variables.as_slice()),
            self.focused_pane == FocusedPane::Variables,
            &mut self.variables_scroll,
        );

        panes::render_stack_pane(
            frame,
            right_rows[1],
            self.view.as_ref().map(|v| v.call_stack.as_slice()),
            self.focused_pane == FocusedPane::Stack,
            &mut self.stack_scroll,
        );

        panes::render_structures_pane(
            frame,
            right_rows[2],
            &self.layouts,
            &self.animator,
            self.focused_pane == FocusedPane::Structures,
        );

        panes::render_status_bar(
            frame,
            status_area,
            StatusRenderData {
                message: &self.status_message,
                current_step: self.controller.index(),
                total_steps: self.controller.len(),
                mode: self.controller.mode(),
                speed_ms: self.controller.speed().as_millis() as u64,
                trace_truncated: self.trace_truncated,
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        let now = Instant::now();
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.controller.pause();
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let mut stepped = 0;
                for _ in 0..n {
                    match self.controller.step_forward() {
                        Some(view) => {
                            self.apply_view(view, now);
                            stepped += 1;
                        }
                        None => break,
                    }
                }
                self.status_message = format!("Stepped forward {} step(s)", stepped);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.controller.pause();
                match self.controller.step_back() {
                    Some(view) => {
                        self.apply_view(view, now);
                        self.status_message = String::from("Stepped backward");
                    }
                    None => self.status_message = String::from("At first step"),
                }
            }
            KeyCode::Right => {
                self.controller.pause();
                match self.controller.step_forward() {
                    Some(view) => {
                        self.apply_view(view, now);
                        self.status_message = String::from("Stepped forward");
                    }
                    None => self.status_message = String::from("At last step"),
                }
            }
            KeyCode::Char(' ') => {
                // Toggle play/pause (with 200ms debounce to prevent key
                // repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = now;
                    if self.controller.is_playing() {
                        self.controller.pause();
                        self.status_message = String::from("Paused");
                    } else if self.controller.is_empty() {
                        self.status_message = String::from("No trace loaded");
                    } else {
                        if let Some(view) = self.controller.play(now) {
                            // Rewound from the end before starting.
                            self.apply_view(view, now);
                        }
                        self.status_message = String::from("Playing...");
                    }
                }
            }
            KeyCode::Char('[') => {
                let slower = (self.controller.speed() + SPEED_STEP).min(SPEED_RANGE.1);
                self.controller.set_speed(slower, now);
                self.status_message =
                    format!("Speed: {}ms per step", self.controller.speed().as_millis());
            }
            KeyCode::Char(']') => {
                let faster = self
                    .controller
                    .speed()
                    .saturating_sub(SPEED_STEP)
                    .max(SPEED_RANGE.0);
                self.controller.set_speed(faster, now);
                self.status_message =
                    format!("Speed: {}ms per step", self.controller.speed().as_millis());
            }
            KeyCode::Char('r') => {
                if let Some(view) = self.controller.restart() {
                    self.apply_view(view, now);
                }
                self.status_message = String::from("Restarted");
            }
            KeyCode::Enter => {
                // Jump to end of trace
                self.controller.pause();
                let total = self.controller.len();
                if total > 0 {
                    if let Some(view) = self.controller.show_step(total - 1) {
                        self.apply_view(view, now);
                    }
                    self.status_message = String::from("Jumped to end");
                }
            }
            KeyCode::Backspace => {
                // Jump to start of trace
                self.controller.pause();
                if let Some(view) = self.controller.show_step(0) {
                    self.apply_view(view, now);
                    self.status_message = String::from("Jumped to start");
                }
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up moves the current line down visually
                    if let Some(row) = self.target_line_row {
                        self.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Variables => {
                    self.variables_scroll = self.variables_scroll.saturating_sub(1);
                }
                FocusedPane::Stack => {
                    self.stack_scroll = self.stack_scroll.saturating_sub(1);
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_sub(1);
                }
                FocusedPane::Structures => {}
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling down moves the current line up visually
                    if let Some(row) = self.target_line_row {
                        self.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Variables => {
                    self.variables_scroll = self.variables_scroll.saturating_add(1);
                }
                FocusedPane::Stack => {
                    self.stack_scroll = self.stack_scroll.saturating_add(1);
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_add(1);
                }
                FocusedPane::Structures => {}
            },
            _ => {}
        }
    }
}
