//! Single-line command prompt.
//!
//! ```text
//!   Idle ──char──▶ Editing ──Enter──▶ Idle   (command ok)
//!                     │      └──────▶ Error  (command rejected)
//!   Error ──char / Backspace──▶ Editing | Idle
//! ```
//!
//! The buffer is emptied on every submit. The error flag survives until the
//! next keystroke or a successful submit; pausing does not touch it.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    Idle,
    Editing,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prompt {
    buffer: String,
    error: bool,
}

impl Prompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PromptState {
        if self.error {
            PromptState::Error
        } else if self.buffer.is_empty() {
            PromptState::Idle
        } else {
            PromptState::Editing
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn has_error(&self) -> bool {
        self.error
    }

    pub fn push(&mut self, c: char) {
        self.error = false;
        self.buffer.push(c);
    }

    pub fn backspace(&mut self) {
        self.error = false;
        self.buffer.pop();
    }

    /// Take the buffer for submission, leaving it empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }

    pub fn fail(&mut self) {
        self.error = true;
    }

    pub fn succeed(&mut self) {
        self.error = false;
    }
}
