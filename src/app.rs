//! Application state and core logic

use crate::config::TuiConfig;
use crate::state::{Form, FormController};
use crate::submit::{SubmitClient, SubmitClientTrait, SubmitError, SubmitResponse};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;

type SubmitResult = Result<SubmitResponse, SubmitError>;

/// Main application struct
pub struct App {
    /// Form controller, sole owner of the form
    pub controller: FormController,
    /// Client used by spawned submission tasks
    client: Arc<dyn SubmitClientTrait>,
    results_tx: mpsc::UnboundedSender<SubmitResult>,
    results_rx: mpsc::UnboundedReceiver<SubmitResult>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance from configuration
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let options = config.option_table()?;
        let client = SubmitClient::new(config)?;
        tracing::info!("Posting submissions to {}", client.url());

        let controller = FormController::new(options, config.csrf_token());
        Ok(Self::with_client(controller, Arc::new(client)))
    }

    pub fn with_client(controller: FormController, client: Arc<dyn SubmitClientTrait>) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            client,
            results_tx,
            results_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let on_submit = self.controller.form().is_submit_active();

        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true
            }
            KeyCode::Char('s') if key.modifiers.contains(crate::platform::SUBMIT_MODIFIER) => {
                self.start_submission()
            }
            KeyCode::Enter if on_submit => self.start_submission(),
            KeyCode::Enter => self.controller.next_field(),
            KeyCode::Tab | KeyCode::Down => self.controller.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.controller.prev_field(),
            KeyCode::Right => self.controller.cycle_option(true),
            KeyCode::Left => self.controller.cycle_option(false),
            KeyCode::Char(' ') if self.active_is_select() => self.controller.cycle_option(true),
            KeyCode::Char(c) if !on_submit && !Self::has_command_modifier(&key) => {
                self.controller.input_char(c)
            }
            KeyCode::Backspace if !on_submit => self.controller.backspace(),
            _ => {}
        }
        Ok(())
    }

    /// Modifier chords never type into a field
    fn has_command_modifier(key: &KeyEvent) -> bool {
        key.modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
    }

    fn active_is_select(&self) -> bool {
        let form = self.controller.form();
        form.get_field(form.active_field())
            .is_some_and(|f| f.is_select())
    }

    /// Validate and, if accepted, post the form on a background task. The
    /// result is picked up by [`App::poll_submissions`].
    pub fn start_submission(&mut self) {
        let Some(payload) = self.controller.begin_submit() else {
            return;
        };

        let client = Arc::clone(&self.client);
        let tx = self.results_tx.clone();
        tokio::spawn(async move {
            let result = client.submit(&payload).await;
            // The receiver lives as long as the app
            let _ = tx.send(result);
        });
    }

    /// Settle any submission whose result has arrived
    pub fn poll_submissions(&mut self) {
        while let Ok(result) = self.results_rx.try_recv() {
            self.controller.finish_submit(result);
        }
    }

    /// Wait for the outstanding submission to settle
    #[cfg(test)]
    async fn wait_for_submission(&mut self) {
        if let Some(result) = self.results_rx.recv().await {
            self.controller.finish_submit(result);
        }
    }

    /// Key hints for the status bar
    pub fn hints(&self) -> String {
        let form = self.controller.form();
        let submit = crate::platform::SUBMIT_SHORTCUT;
        if !self.controller.state().controls_enabled() {
            "Submitting...".to_string()
        } else if form.is_submit_active() {
            "Enter: submit | Tab: next field | Esc: quit".to_string()
        } else if self.active_is_select() {
            format!("←/→: choose | Tab: next field | {submit}: submit | Esc: quit")
        } else {
            format!("Type to edit | Tab: next field | {submit}: submit | Esc: quit")
        }
    }
}
