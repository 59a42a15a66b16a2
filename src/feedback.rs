//! Status messages shown above each view.

use std::time::{Duration, Instant};

/// Tone of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Error,
}

impl Tone {
    fn prefix(self) -> &'static str {
        match self {
            Tone::Success => "✅",
            Tone::Warning => "⚠",
            Tone::Error => "❌",
        }
    }
}

/// A message with its tone and optional expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub tone: Tone,
    pub text: String,
    pub expires_at: Option<Instant>,
}

impl Feedback {
    /// Text with its tone prefix.
    pub fn display(&self) -> String {
        format!("{} {}", self.tone.prefix(), self.text)
    }
}

/// Holds the current message of a view. A new message replaces the old one.
#[derive(Debug, Default)]
pub struct FeedbackSlot {
    current: Option<Feedback>,
    ttl: Option<Duration>,
}

impl FeedbackSlot {
    /// Messages auto-dismiss after `ttl`.
    pub fn expiring(ttl: Duration) -> Self {
        Self { current: None, ttl: Some(ttl) }
    }

    /// Messages stay until replaced or cleared.
    pub fn persistent() -> Self {
        Self::default()
    }

    pub fn set(&mut self, tone: Tone, text: impl Into<String>, now: Instant) {
        self.current = Some(Feedback {
            tone,
            text: text.into(),
            expires_at: self.ttl.map(|ttl| now + ttl),
        });
    }

    pub fn success(&mut self, text: impl Into<String>, now: Instant) {
        self.set(Tone::Success, text, now);
    }

    pub fn warning(&mut self, text: impl Into<String>, now: Instant) {
        self.set(Tone::Warning, text, now);
    }

    pub fn error(&mut self, text: impl Into<String>, now: Instant) {
        self.set(Tone::Error, text, now);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Feedback> {
        self.current.as_ref()
    }

    /// Drop the message once its deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if self
            .current
            .as_ref()
            .and_then(|f| f.expires_at)
            .is_some_and(|deadline| now >= deadline)
        {
            self.current = None;
        }
    }

    /// Whether a deadline is pending (the UI keeps repainting until it passes).
    pub fn has_deadline(&self) -> bool {
        self.current.as_ref().is_some_and(|f| f.expires_at.is_some())
    }
}
