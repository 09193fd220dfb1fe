//! Session data structures

use super::turn::Turn;
use crate::view::{Section, Tab};

/// The full mutable state of one conversation instance.
///
/// Only the chat controller mutates a session; everything else reads it
/// through a shared reference.
#[derive(Debug, Clone, Default)]
pub struct Session {
    turns: Vec<Turn>,
    input: String,
    loading: bool,
    section: Section,
    tab: Tab,
}

impl Session {
    /// Create an empty session (Home section, Checkup tab)
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns in conversation order
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Current draft text
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether a request is in flight (the request gate)
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Append a turn at the end of the conversation
    pub fn push_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_section(&mut self, section: Section) {
        self.section = section;
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// Drop every turn and reset the topic tab. The section is left alone.
    pub fn clear(&mut self) {
        self.turns.clear();
        self.tab = Tab::default();
    }
}
