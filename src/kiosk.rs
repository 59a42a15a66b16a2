//! Kiosk state machine: phone lookup, member selection, pointage feedback.
//!
//! Pure state; the view drives it and performs the requests it asks for.

use std::time::{Duration, Instant};

use crate::config::KioskConfig;
use crate::error::{FALLBACK_MESSAGE, Result};
use crate::feedback::FeedbackSlot;
use crate::models::{CheckInResponse, Member};

/// What the view must do after the phone field changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    /// Below the minimum length: drop any pending lookup.
    Cancel,
    /// (Re)schedule a debounced lookup for this fragment.
    Schedule(String),
}

/// Results of kiosk requests.
#[derive(Debug)]
pub enum KioskEvent {
    SearchCompleted {
        fragment: String,
        result: Result<Vec<Member>>,
    },
    CheckInCompleted(Result<CheckInResponse>),
}

pub struct KioskState {
    pub phone: String,
    suggestions: Vec<Member>,
    /// Fragment the displayed suggestions belong to.
    shown_for: Option<String>,
    submitting: bool,
    feedback: FeedbackSlot,
    reset_at: Option<Instant>,
    min_search_len: usize,
    reset_delay: Duration,
}

impl KioskState {
    pub fn new(config: &KioskConfig) -> Self {
        Self {
            phone: String::new(),
            suggestions: Vec::new(),
            shown_for: None,
            submitting: false,
            feedback: FeedbackSlot::persistent(),
            reset_at: None,
            min_search_len: config.min_search_len,
            reset_delay: Duration::from_secs(config.reset_delay_secs),
        }
    }

    fn searchable(&self) -> bool {
        self.phone.chars().count() >= self.min_search_len
    }

    /// Call after every edit of the phone field.
    pub fn on_phone_changed(&mut self) -> SearchAction {
        if self.searchable() {
            SearchAction::Schedule(self.phone.clone())
        } else {
            self.suggestions.clear();
            self.shown_for = None;
            SearchAction::Cancel
        }
    }

    /// Apply a lookup result. Stale results (field edited since) are dropped.
    pub fn handle(&mut self, event: KioskEvent, now: Instant) {
        match event {
            KioskEvent::SearchCompleted { fragment, result } => {
                if fragment != self.phone || !self.searchable() {
                    tracing::debug!("Dropping stale results for {}", fragment);
                    return;
                }
                match result {
                    Ok(members) => {
                        self.suggestions = members;
                        self.shown_for = Some(fragment);
                    }
                    Err(e) => {
                        tracing::warn!("Member search failed: {}", e);
                        self.suggestions.clear();
                        self.shown_for = None;
                    }
                }
            }
            KioskEvent::CheckInCompleted(result) => self.check_in_finished(result, now),
        }
    }

    /// Suggestions to render, empty while none are shown.
    pub fn suggestions(&self) -> &[Member] {
        if self.shown_for.is_some() { &self.suggestions } else { &[] }
    }

    /// A lookup answered with no member for the current field.
    pub fn shows_not_found(&self) -> bool {
        self.shown_for.is_some() && self.suggestions.is_empty() && self.searchable()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Start a pointage for `member`. Returns the id to submit, or `None`
    /// while another submission is in flight.
    pub fn select(&mut self, member: &Member) -> Option<i64> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        self.feedback.clear();
        self.shown_for = None;
        tracing::info!("Pointage requested for member {}", member.id);
        Some(member.id)
    }

    fn check_in_finished(&mut self, result: Result<CheckInResponse>, now: Instant) {
        self.submitting = false;
        match result {
            Ok(response) => {
                tracing::info!("Pointage recorded: {:?} for member {}", response.kind, response.membre.id);
                self.feedback.success(response.confirmation(), now);
                self.reset_at = Some(now + self.reset_delay);
            }
            Err(e) => {
                tracing::warn!("Pointage failed: {}", e);
                self.feedback.error(e.user_message(FALLBACK_MESSAGE), now);
            }
        }
    }

    /// Reset the kiosk once the confirmation delay has passed.
    ///
    /// Returns true when a reset happened, so the caller can drop any pending lookup.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.reset_at {
            Some(deadline) if now >= deadline => {
                self.phone.clear();
                self.suggestions.clear();
                self.shown_for = None;
                self.feedback.clear();
                self.reset_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn feedback(&self) -> &FeedbackSlot {
        &self.feedback
    }

    /// Whether a reset deadline is pending.
    pub fn awaiting_reset(&self) -> bool {
        self.reset_at.is_some()
    }
}
