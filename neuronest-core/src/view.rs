//! Navigation section and topic tab selectors
//!
//! Both axes are purely presentational. Selecting [`Section::NewChat`] is the
//! only transition with a side effect, and that side effect is owned by the
//! chat controller.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sidebar navigation section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    #[default]
    Home,
    NewChat,
    History,
    Settings,
    Profile,
    Info,
}

impl Section {
    pub fn label(&self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::NewChat => "New Chat",
            Section::History => "History",
            Section::Settings => "Settings",
            Section::Profile => "Profile",
            Section::Info => "Info",
        }
    }

    /// Home and New Chat both lead to the conversation screen
    pub fn shows_chat(&self) -> bool {
        matches!(self, Section::Home | Section::NewChat)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Topic tab shown under the conversation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tab {
    #[default]
    Checkup,
    BloodTest,
    Ultrasound,
    IvDrip,
    Injection,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Checkup,
        Tab::BloodTest,
        Tab::Ultrasound,
        Tab::IvDrip,
        Tab::Injection,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Checkup => "Checkup",
            Tab::BloodTest => "Blood Test",
            Tab::Ultrasound => "Ultrasound",
            Tab::IvDrip => "IV Drip",
            Tab::Injection => "Injection",
        }
    }

    /// Position in [`Tab::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Tab::Checkup => 0,
            Tab::BloodTest => 1,
            Tab::Ultrasound => 2,
            Tab::IvDrip => 3,
            Tab::Injection => 4,
        }
    }

    /// Next tab, wrapping around
    pub fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    /// Previous tab, wrapping around
    pub fn previous(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
