use super::{AppEvent, EventHandler, TerminalManager};
use crate::config::Config;
use crate::error::Error;
use crate::export;
use crate::extract::{extract_songs, ProfileParser, SimulatedSource, SongRecord, VideoSource};
use anyhow::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState},
    Frame,
};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};

type ExtractionOutcome = crate::error::Result<Vec<SongRecord>>;

pub struct App {
    config: Config,
    terminal: TerminalManager,
    event_handler: EventHandler,
    outcome_tx: mpsc::UnboundedSender<ExtractionOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<ExtractionOutcome>,

    // State
    pub songs: Vec<SongRecord>,
    pub mode: Mode,
    pub should_quit: bool,

    // UI State
    focus: Focus,
    profile_input: String,
    max_videos_input: String,
    status: Status,
    table_state: TableState,
    export_prompt: Option<ExportPrompt>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Idle,
    Extracting,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Focus {
    Profile,
    MaxVideos,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ExportFormat {
    Csv,
    Json,
    Txt,
}

impl ExportFormat {
    fn label(self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
            ExportFormat::Txt => "TXT",
        }
    }

    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Txt => "txt",
        }
    }
}

struct ExportPrompt {
    format: ExportFormat,
    path: String,
}

#[derive(Debug, Clone)]
struct Status {
    text: String,
    kind: StatusKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum StatusKind {
    Ready,
    Working,
    Success,
    Warning,
    Error,
}

impl StatusKind {
    fn color(self) -> Color {
        match self {
            StatusKind::Ready => Color::Gray,
            StatusKind::Working => Color::Cyan,
            StatusKind::Success => Color::Green,
            StatusKind::Warning => Color::Yellow,
            StatusKind::Error => Color::Red,
        }
    }
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let terminal = TerminalManager::new()?;
        let event_handler = EventHandler::new();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        let max_videos_input = config.default_max_videos.to_string();

        Ok(Self {
            config,
            terminal,
            event_handler,
            outcome_tx,
            outcome_rx,
            songs: Vec::new(),
            mode: Mode::Idle,
            should_quit: false,
            focus: Focus::Profile,
            profile_input: String::new(),
            max_videos_input,
            status: Status {
                text: "Ready".to_string(),
                kind: StatusKind::Ready,
            },
            table_state: TableState::default(),
            export_prompt: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Start the terminal input pump in the background
        let sender = self.event_handler.sender();
        let tick_rate = Duration::from_millis(self.config.ui.tick_rate_ms);
        tokio::spawn(async move {
            let _ = EventHandler::pump_terminal_events(sender, tick_rate).await;
        });

        // Main event loop
        while !self.should_quit {
            self.draw()?;

            tokio::select! {
                Some(event) = self.event_handler.next_event() => {
                    self.handle_event(event);
                }
                Some(outcome) = self.outcome_rx.recv() => {
                    self.finish_extraction(outcome);
                }
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Quit => {
                self.should_quit = true;
            }
            AppEvent::Tick | AppEvent::Render => {}
            AppEvent::Cancel => {
                if self.export_prompt.take().is_some() {
                    self.set_status("Export cancelled", StatusKind::Ready);
                } else {
                    self.should_quit = true;
                }
            }
            AppEvent::Char(c) => self.insert_char(c),
            AppEvent::Backspace => self.delete_char(),
            AppEvent::NextField => {
                if self.export_prompt.is_none() {
                    self.focus = match self.focus {
                        Focus::Profile => Focus::MaxVideos,
                        Focus::MaxVideos => Focus::Profile,
                    };
                }
            }
            AppEvent::Enter => {
                if self.export_prompt.is_some() {
                    self.confirm_export();
                } else {
                    self.start_extraction();
                }
            }
            AppEvent::Up => self.move_selection(-1),
            AppEvent::Down => self.move_selection(1),
            AppEvent::ExportCsv => self.open_export_prompt(ExportFormat::Csv),
            AppEvent::ExportJson => self.open_export_prompt(ExportFormat::Json),
            AppEvent::ExportTxt => self.open_export_prompt(ExportFormat::Txt),
        }
    }

    fn insert_char(&mut self, c: char) {
        if let Some(prompt) = &mut self.export_prompt {
            prompt.path.push(c);
        } else {
            match self.focus {
                Focus::Profile => self.profile_input.push(c),
                Focus::MaxVideos => self.max_videos_input.push(c),
            }
        }
    }

    fn delete_char(&mut self) {
        if let Some(prompt) = &mut self.export_prompt {
            prompt.path.pop();
        } else {
            match self.focus {
                Focus::Profile => self.profile_input.pop(),
                Focus::MaxVideos => self.max_videos_input.pop(),
            };
        }
    }

    fn start_extraction(&mut self) {
        // One extraction at a time
        if self.mode == Mode::Extracting {
            return;
        }

        let input = self.profile_input.trim().to_string();
        if input.is_empty() {
            self.set_status("Please enter a TikTok username or URL", StatusKind::Error);
            return;
        }

        // Non-integer input silently falls back to the default
        let max_videos = self
            .max_videos_input
            .trim()
            .parse()
            .unwrap_or(self.config.default_max_videos);

        self.mode = Mode::Extracting;
        self.set_status("Extracting songs...", StatusKind::Working);

        let tx = self.outcome_tx.clone();
        tokio::task::spawn_blocking(move || {
            let outcome = ProfileParser::new().normalize(&input).and_then(|handle| {
                let videos = SimulatedSource::new().fetch_videos(&handle, max_videos)?;
                Ok(extract_songs(&videos))
            });

            // Send failure just means the app already shut down
            let _ = tx.send(outcome);
        });
    }

    /// Runs back on the event loop once the background task reports in.
    /// The app returns to Idle whatever the outcome was.
    fn finish_extraction(&mut self, outcome: ExtractionOutcome) {
        self.mode = Mode::Idle;

        match outcome {
            Ok(songs) => {
                info!("Extraction finished with {} songs", songs.len());
                self.songs = songs;
                self.table_state.select(if self.songs.is_empty() {
                    None
                } else {
                    Some(0)
                });
                self.set_status(
                    format!("Found {} unique songs", self.songs.len()),
                    StatusKind::Success,
                );
            }
            Err(Error::InvalidProfile(_)) => {
                self.set_status("Invalid username or URL format", StatusKind::Error);
            }
            Err(e) => {
                error!("Extraction failed: {e}");
                self.set_status(format!("An error occurred: {e}"), StatusKind::Error);
            }
        }
    }

    fn open_export_prompt(&mut self, format: ExportFormat) {
        if self.songs.is_empty() {
            self.set_status(
                "No songs to export. Please extract songs first.",
                StatusKind::Warning,
            );
            return;
        }

        let default_path = self
            .config
            .export_dir
            .join(format!("tiktok_songs.{}", format.extension()));
        self.export_prompt = Some(ExportPrompt {
            format,
            path: default_path.to_string_lossy().into_owned(),
        });
    }

    fn confirm_export(&mut self) {
        let Some(prompt) = self.export_prompt.take() else {
            return;
        };

        let path = prompt.path.trim();
        if path.is_empty() {
            self.set_status("Export cancelled", StatusKind::Ready);
            return;
        }
        let path = PathBuf::from(path);

        let result = match prompt.format {
            ExportFormat::Csv => export::export_csv(&self.songs, &path),
            ExportFormat::Json => export::export_json(&self.songs, &path),
            ExportFormat::Txt => export::export_txt(&self.songs, &path),
        };

        match result {
            Ok(()) => {
                self.set_status(
                    format!("Songs exported to {}", path.display()),
                    StatusKind::Success,
                );
            }
            Err(Error::NothingToExport) => {
                self.set_status(
                    "No songs to export. Please extract songs first.",
                    StatusKind::Warning,
                );
            }
            Err(e) => {
                error!("Export failed: {e}");
                self.set_status(
                    format!("Failed to export {}: {e}", prompt.format.label()),
                    StatusKind::Error,
                );
            }
        }
    }

    fn move_selection(&mut self, delta: i32) {
        if self.songs.is_empty() {
            return;
        }

        let current = self.table_state.selected().unwrap_or(0);
        let new_index = if delta < 0 {
            current.saturating_sub((-delta) as usize)
        } else {
            (current + delta as usize).min(self.songs.len() - 1)
        };

        self.table_state.select(Some(new_index));
    }

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Status {
            text: text.into(),
            kind,
        };
    }

    fn draw(&mut self) -> Result<()> {
        let songs = &self.songs;
        let profile_input = &self.profile_input;
        let max_videos_input = &self.max_videos_input;
        let focus = self.focus;
        let status = &self.status;
        let prompt = self.export_prompt.as_ref();
        let mut table_state = self.table_state.clone();

        self.terminal.draw(|f| {
            Self::render_ui(
                f,
                profile_input,
                max_videos_input,
                focus,
                songs,
                status,
                prompt,
                &mut table_state,
            );
        })?;

        self.table_state = table_state;
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn render_ui(
        f: &mut Frame,
        profile_input: &str,
        max_videos_input: &str,
        focus: Focus,
        songs: &[SongRecord],
        status: &Status,
        prompt: Option<&ExportPrompt>,
        table_state: &mut TableState,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Inputs
                Constraint::Length(3), // Status
                Constraint::Min(0),    // Results table
                Constraint::Length(3), // Key hints
            ])
            .split(f.area());

        Self::render_header(f, chunks[0]);
        Self::render_inputs(f, chunks[1], profile_input, max_videos_input, focus);
        Self::render_status(f, chunks[2], status);
        Self::render_songs(f, chunks[3], songs, table_state);
        Self::render_hints(f, chunks[4]);

        if let Some(prompt) = prompt {
            Self::render_export_prompt(f, prompt);
        }
    }

    fn render_header(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("🎵 TikTunes - TikTok Song Extractor")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(title, area);
    }

    fn render_inputs(
        f: &mut Frame,
        area: Rect,
        profile_input: &str,
        max_videos_input: &str,
        focus: Focus,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);

        let field_style = |focused: bool| {
            if focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            }
        };

        let profile = Paragraph::new(profile_input).block(
            Block::default()
                .borders(Borders::ALL)
                .title("TikTok Username or URL")
                .border_style(field_style(focus == Focus::Profile)),
        );
        f.render_widget(profile, chunks[0]);

        let max_videos = Paragraph::new(max_videos_input).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Max Videos")
                .border_style(field_style(focus == Focus::MaxVideos)),
        );
        f.render_widget(max_videos, chunks[1]);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &Status) {
        let widget = Paragraph::new(status.text.as_str())
            .style(Style::default().fg(status.kind.color()))
            .block(Block::default().borders(Borders::ALL).title("Status"));

        f.render_widget(widget, area);
    }

    fn render_songs(f: &mut Frame, area: Rect, songs: &[SongRecord], table_state: &mut TableState) {
        let header = Row::new(["Song Title", "Artist", "Duration (s)", "Video ID"])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows = songs.iter().map(|song| {
            Row::new([
                song.title.clone(),
                song.artist.clone(),
                song.duration.to_string(),
                song.video_id.clone(),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(35),
                Constraint::Percentage(30),
                Constraint::Length(12),
                Constraint::Percentage(20),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Extracted Songs"))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("► ");

        f.render_stateful_widget(table, area, table_state);
    }

    fn render_hints(f: &mut Frame, area: Rect) {
        let hints = Paragraph::new(
            "Enter: extract | Tab: switch field | F2: CSV  F3: JSON  F4: TXT | ↑/↓: scroll | Esc: quit",
        )
        .block(Block::default().borders(Borders::ALL).title("Keys"));

        f.render_widget(hints, area);
    }

    fn render_export_prompt(f: &mut Frame, prompt: &ExportPrompt) {
        let area = Self::centered_rect(60, 3, f.area());

        let title = format!("Export {} - Enter saves, Esc cancels", prompt.format.label());
        let input = Paragraph::new(format!("{}_", prompt.path)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::Yellow)),
        );

        f.render_widget(Clear, area);
        f.render_widget(input, area);
    }

    fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(height),
                Constraint::Min(0),
            ])
            .split(area);

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(vertical[1]);

        horizontal[1]
    }
}
