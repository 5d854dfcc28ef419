use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, error, info, trace};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame, Terminal,
};
use std::{io, time::Duration};

use crate::calculator::{
    sanitize_positive_int, BandwidthDisplay, BandwidthReport, CalculatorInputs, Field, Preset, RawFields,
};

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Continue,
    Quit,
}

/// Interactive terminal form for the bandwidth calculator
/// Holds the raw text of each field and recalculates after every change
pub struct CalculatorForm {
    /// Raw text of the five input fields
    fields: RawFields,
    /// Index into `Field::ALL` of the field being edited
    focus: usize,
    presets: Vec<Preset>,
    /// Preset highlighted in the preset bar
    selected_preset: usize,
    /// Preset whose values are currently loaded, cleared by manual edits
    active_preset: Option<usize>,
    /// Result of the latest calculation
    report: Option<BandwidthReport>,
    /// Error message to display in UI
    error_message: Option<String>,
}

impl CalculatorForm {
    pub fn new(defaults: CalculatorInputs, presets: Vec<Preset>) -> Self {
        let mut form = Self {
            fields: RawFields::from(defaults),
            focus: 0,
            presets,
            selected_preset: 0,
            active_preset: None,
            report: None,
            error_message: None,
        };
        form.recalculate();
        form
    }

    pub fn fields(&self) -> &RawFields {
        &self.fields
    }

    pub fn focused_field(&self) -> Field {
        Field::ALL[self.focus]
    }

    pub fn active_preset(&self) -> Option<&Preset> {
        self.active_preset.and_then(|i| self.presets.get(i))
    }

    pub fn report(&self) -> Option<&BandwidthReport> {
        self.report.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Reads the fields and recomputes the report
    /// A failed calculation keeps the form running and shows the error instead
    pub fn recalculate(&mut self) {
        match CalculatorInputs::from_fields(&self.fields).and_then(BandwidthReport::from_inputs) {
            Ok(report) => {
                trace!("Recalculated: {}", report.total.primary);
                self.report = Some(report);
                self.error_message = None;
            }
            Err(e) => {
                debug!("Calculation failed: {}", e);
                self.report = None;
                self.error_message = Some(e.to_string());
            }
        }
    }

    /// Loads every field from a preset and marks it active
    pub fn apply_preset(&mut self, index: usize) {
        let Some(preset) = self.presets.get(index) else {
            return;
        };

        info!("Applying preset '{}'", preset.label);
        self.fields = RawFields::from(preset.inputs());
        self.selected_preset = index;
        self.active_preset = Some(index);
        self.recalculate();
    }

    /// Dispatches one key press
    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        if key.kind != KeyEventKind::Press {
            return FormAction::Continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return FormAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return FormAction::Quit,
            KeyCode::Tab | KeyCode::Down => self.move_focus(1),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(Field::ALL.len() - 1),
            KeyCode::Left => self.select_preset(self.presets.len().saturating_sub(1)),
            KeyCode::Right => self.select_preset(1),
            KeyCode::Enter => self.apply_preset(self.selected_preset),
            KeyCode::Backspace => {
                self.fields.get_mut(self.focused_field()).pop();
                self.field_edited();
            }
            KeyCode::Char(ch) => self.type_char(ch),
            _ => {}
        }

        FormAction::Continue
    }

    /// Types a character into the focused field if the field accepts it
    pub fn type_char(&mut self, ch: char) {
        let field = self.focused_field();
        if !field.accepts_key(ch) {
            trace!("Rejected key {:?} for {:?}", ch, field);
            return;
        }

        self.fields.get_mut(field).push(ch);
        self.field_edited();
    }

    fn field_edited(&mut self) {
        // Stream count is independent of the presets' stream shape
        if self.focused_field() != Field::Streams {
            self.active_preset = None;
        }
        self.recalculate();
    }

    /// Moves focus by `step` positions (wrapping), sanitizing the field being left
    fn move_focus(&mut self, step: usize) {
        self.blur(self.focused_field());
        self.focus = (self.focus + step) % Field::ALL.len();
    }

    /// Applies the positive-integer rule to count fields on loss of focus
    pub fn blur(&mut self, field: Field) {
        if let Some(max) = field.max() {
            let raw = self.fields.get_mut(field);
            if let Some(replacement) = sanitize_positive_int(raw, max) {
                debug!("Sanitized {:?} from '{}' to '{}'", field, raw, replacement);
                *raw = replacement;
            }
        }
        self.recalculate();
    }

    fn select_preset(&mut self, step: usize) {
        if !self.presets.is_empty() {
            self.selected_preset = (self.selected_preset + step) % self.presets.len();
        }
    }

    /// Main entry point for the form
    /// Sets up terminal, runs the UI loop, and cleans up on exit
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting calculator form");

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_app(&mut terminal).await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        if let Err(err) = res {
            error!("Form error: {err:?}");
            eprintln!("Error: {err:?}");
        } else {
            info!("Calculator form exited normally");
        }

        Ok(())
    }

    async fn run_app<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()>
    where
        B::Error: Send + Sync + 'static,
    {
        loop {
            terminal.draw(|f| self.ui(f))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if self.handle_key(key) == FormAction::Quit {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Lays out header, fields, presets, results, status and footer
    pub fn ui(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(
                [
                    Constraint::Length(3),  // Header
                    Constraint::Length(7),  // Input fields
                    Constraint::Length(3),  // Presets
                    Constraint::Min(8),     // Results
                    Constraint::Length(3),  // Status
                    Constraint::Length(2),  // Footer
                ]
                .as_ref(),
            )
            .split(frame.area());

        self.render_header(frame, chunks[0]);
        self.render_fields(frame, chunks[1]);
        self.render_presets(frame, chunks[2]);
        self.render_results(frame, chunks[3]);
        self.render_status(frame, chunks[4]);
        self.render_footer(frame, chunks[5]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = vec![Line::from(vec![
            Span::raw("AoIP Bandwidth Calculator"),
            Span::raw("    "),
            Span::styled(
                Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
                Style::default().fg(Color::Yellow),
            ),
        ])];

        let block = Block::default()
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::White));

        frame.render_widget(Paragraph::new(header).block(block), area);
    }

    fn render_fields(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = Field::ALL
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let focused = i == self.focus;
                let marker = if focused { "> " } else { "  " };
                let value_style = if focused {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                let cursor = if focused { "_" } else { "" };

                Line::from(vec![
                    Span::raw(marker),
                    Span::styled(format!("{:<18}", field.label()), Style::default().fg(Color::Gray)),
                    Span::styled(format!("{}{}", self.fields.get(*field), cursor), value_style),
                ])
            })
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Stream Parameters");

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_presets(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = self
            .presets
            .iter()
            .enumerate()
            .map(|(i, preset)| {
                if Some(i) == self.active_preset {
                    Line::from(Span::styled(preset.label.clone(), Style::default().fg(Color::Green)))
                } else {
                    Line::from(preset.label.clone())
                }
            })
            .collect();

        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL).title("Presets"))
            .select(self.selected_preset)
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

        frame.render_widget(tabs, area);
    }

    fn render_results(&self, frame: &mut Frame, area: Rect) {
        let lines = match &self.report {
            Some(report) => vec![
                bandwidth_line("Per stream", &report.per_stream),
                bandwidth_line(&report.total_label, &report.total),
                Line::from(""),
                detail_line("Packet rate", &report.packet_rate),
                detail_line("Samples/packet", &report.samples_per_packet),
                detail_line("Payload size", &report.payload_size),
                detail_line("Packet size", &report.packet_size),
            ],
            None => vec![Line::from(Span::styled(
                "No result",
                Style::default().fg(Color::DarkGray),
            ))],
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Bandwidth")
            .style(Style::default().fg(Color::White));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let status = match (&self.error_message, self.active_preset()) {
            (Some(error), _) => Line::from(vec![
                Span::styled("! ", Style::default().fg(Color::Yellow)),
                Span::styled(error.clone(), Style::default().fg(Color::Yellow)),
            ]),
            (None, Some(preset)) => Line::from(vec![
                Span::styled("Preset: ", Style::default().fg(Color::DarkGray)),
                Span::styled(preset.label.clone(), Style::default().fg(Color::Green)),
            ]),
            (None, None) => Line::from(Span::styled("Custom values", Style::default().fg(Color::DarkGray))),
        };

        let block = Block::default().borders(Borders::ALL).title("Status");
        frame.render_widget(Paragraph::new(status).block(block), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let footer = Paragraph::new("Tab/Up/Down: field  Left/Right: preset  Enter: apply preset  q/Esc: quit")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::TOP));

        frame.render_widget(footer, area);
    }
}

fn bandwidth_line<'a>(label: &str, display: &'a BandwidthDisplay) -> Line<'a> {
    let mut spans = vec![
        Span::raw(format!("{:<22}", format!("{label}:"))),
        Span::styled(
            display.primary.value.clone(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {}", display.primary.unit), Style::default().fg(Color::Green)),
    ];
    if !display.alt.is_empty() {
        spans.push(Span::styled(
            format!("  ({})", display.alt),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn detail_line<'a>(label: &str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw(format!("{:<22}", format!("{label}:"))),
        Span::raw(value),
    ])
}
