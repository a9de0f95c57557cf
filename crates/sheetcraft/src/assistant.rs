//! Assistant session
//!
//! [`Assistant`] ties the pieces together the way the task pane does: quick
//! actions and chat commands render templates onto a surface, and every
//! exchange is recorded in a timestamped transcript.

use std::fmt;

use chrono::{DateTime, Local};
use log::{debug, warn};

use crate::error::RenderResult;
use crate::render::Renderer;
use crate::resolve;
use crate::settings::Session;
use crate::surface::{GridSurface, SheetHandle};
use crate::template::{InputRequirement, TemplateId};

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Assistant => "Assistant",
        }
    }
}

/// One entry in the transcript
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    /// Local time the message was recorded, for display
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    fn new<S: Into<String>>(sender: Sender, text: S) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: Local::now(),
        }
    }

    /// Hour and minute, e.g. "09:41"
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.time_label(), self.sender.label(), self.text)
    }
}

/// Status indicator
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Ready,
    Processing,
    Success(String),
    Error(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ready => f.write_str("Ready"),
            Status::Processing => f.write_str("Processing..."),
            Status::Success(msg) | Status::Error(msg) => f.write_str(msg),
        }
    }
}

/// Fixed wording of a quick action button
struct QuickAction {
    prompt: &'static str,
    progress: &'static str,
    success: &'static str,
    /// Used as "Error <failure>: <cause>"
    failure: &'static str,
}

impl QuickAction {
    fn for_template(template: TemplateId) -> Self {
        match template {
            TemplateId::Budget => QuickAction {
                prompt: "Create a comprehensive budget template",
                progress: "Creating template...",
                success: "Template created successfully!",
                failure: "creating template",
            },
            TemplateId::Analysis => QuickAction {
                prompt: "Analyze the selected data",
                progress: "Analyzing data...",
                success: "Data analysis completed!",
                failure: "analyzing data",
            },
            TemplateId::FormulaReference => QuickAction {
                prompt: "Generate advanced Excel formulas",
                progress: "Generating formulas...",
                success: "Formulas generated successfully!",
                failure: "generating formulas",
            },
            TemplateId::Dashboard => QuickAction {
                prompt: "Build an executive dashboard",
                progress: "Building dashboard...",
                success: "Dashboard created successfully!",
                failure: "building dashboard",
            },
        }
    }
}

/// A chat session driving a grid surface
///
/// Each command takes `&mut self`, so commands never overlap.
#[derive(Debug)]
pub struct Assistant<S: GridSurface> {
    surface: S,
    session: Session,
    status: Status,
    transcript: Vec<ChatMessage>,
}

impl<S: GridSurface> Assistant<S> {
    /// Create an assistant with default settings
    pub fn new(surface: S) -> Self {
        Self::with_session(surface, Session::default())
    }

    /// Create an assistant with loaded settings
    pub fn with_session(surface: S, session: Session) -> Self {
        Self {
            surface,
            session,
            status: Status::Ready,
            transcript: Vec::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Switch response provider
    pub fn set_provider<P: Into<String>>(&mut self, provider: P) {
        self.session.set_provider(provider);
        debug!("provider set to '{}'", self.session.provider);
    }

    /// Store an API key; blank keys are ignored
    pub fn save_api_key(&mut self, key: &str) -> bool {
        let saved = self.session.set_api_key(key);
        if saved {
            self.status = Status::Success("API key saved".into());
        }
        saved
    }

    /// Run a quick action button
    pub fn quick_action(&mut self, template: TemplateId) -> RenderResult<SheetHandle> {
        let action = QuickAction::for_template(template);
        self.status = Status::Processing;
        debug!("{}", action.progress);
        self.record(Sender::User, action.prompt);

        match self.render(template) {
            Ok(sheet) => {
                let reply = self.respond(resolve::acknowledgment(template));
                self.record(Sender::Assistant, reply);
                self.status = Status::Success(action.success.into());
                Ok(sheet)
            }
            Err(e) => {
                self.record(Sender::Assistant, format!("Error {}: {e}", action.failure));
                self.status = Status::Error(format!("Error {}", action.failure));
                Err(e)
            }
        }
    }

    /// Handle a free-text chat message
    ///
    /// Blank input is ignored. Returns the rendered sheet when the message
    /// resolved to a template.
    pub fn send_message(&mut self, text: &str) -> RenderResult<Option<SheetHandle>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        self.record(Sender::User, text);
        self.status = Status::Processing;

        let resolution = resolve::resolve(text);
        let outcome = match resolution.template {
            Some(template) => self.render(template).map(Some),
            None => Ok(None),
        };

        match outcome {
            Ok(sheet) => {
                let reply = self.respond(&resolution.acknowledgment);
                self.record(Sender::Assistant, reply);
                self.status = Status::Ready;
                Ok(sheet)
            }
            Err(e) => {
                self.record(Sender::Assistant, format!("Error: {e}"));
                self.status = Status::Error("Error".into());
                Err(e)
            }
        }
    }

    fn render(&mut self, template: TemplateId) -> RenderResult<SheetHandle> {
        let definition = template.definition();
        let selection = match definition.input {
            InputRequirement::Selection { .. } => Some(self.surface.selection()?),
            InputRequirement::None => None,
        };
        Renderer::render(&mut self.surface, definition, selection.as_ref())
    }

    /// The provider's reply; only the simulated provider is wired up
    fn respond(&self, acknowledgment: &str) -> String {
        if !self.session.is_simulation() {
            warn!(
                "no client for provider '{}', using the simulated response",
                self.session.provider
            );
        }
        acknowledgment.to_string()
    }

    fn record<T: Into<String>>(&mut self, sender: Sender, text: T) {
        self.transcript.push(ChatMessage::new(sender, text));
    }
}
