use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum AppEvent {
    // UI Events
    Quit,
    Tick,
    Render,

    // Text editing
    Char(char),
    Backspace,

    // Triggers
    Enter,
    ExportCsv,
    ExportJson,
    ExportTxt,

    // Navigation
    NextField,
    Cancel,
    Up,
    Down,
}

pub struct EventHandler {
    event_sender: mpsc::UnboundedSender<AppEvent>,
    event_receiver: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (event_sender, event_receiver) = mpsc::unbounded_channel();

        Self {
            event_sender,
            event_receiver,
        }
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.event_sender.clone()
    }

    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.event_receiver.recv().await
    }

    /// Terminal input pump. Runs on its own task and feeds the app loop
    /// through the channel.
    pub async fn pump_terminal_events(
        sender: mpsc::UnboundedSender<AppEvent>,
        tick_rate: Duration,
    ) -> Result<()> {
        loop {
            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) => {
                        if key.kind == KeyEventKind::Press {
                            if let Some(app_event) = Self::key_to_app_event(key) {
                                if sender.send(app_event).is_err() {
                                    return Ok(());
                                }
                            }
                        }
                    }
                    Event::Resize(_, _) => {
                        let _ = sender.send(AppEvent::Render);
                    }
                    _ => {}
                }
            }

            // Send periodic tick events
            if sender.send(AppEvent::Tick).is_err() {
                return Ok(());
            }
            tokio::time::sleep(tick_rate).await;
        }
    }

    fn key_to_app_event(key: KeyEvent) -> Option<AppEvent> {
        // Ctrl-C always quits, raw mode swallows the signal
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(AppEvent::Quit);
        }

        match key.code {
            // Text entry - most keys type into whichever field has focus
            KeyCode::Char(c) => Some(AppEvent::Char(c)),
            KeyCode::Backspace => Some(AppEvent::Backspace),

            // Triggers
            KeyCode::Enter => Some(AppEvent::Enter),
            KeyCode::F(2) => Some(AppEvent::ExportCsv),
            KeyCode::F(3) => Some(AppEvent::ExportJson),
            KeyCode::F(4) => Some(AppEvent::ExportTxt),

            // Navigation
            KeyCode::Tab | KeyCode::BackTab => Some(AppEvent::NextField),
            KeyCode::Esc => Some(AppEvent::Cancel),
            KeyCode::Up => Some(AppEvent::Up),
            KeyCode::Down => Some(AppEvent::Down),

            _ => None,
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
