//! # Conversation Modes
//!
//! The fixed catalog of conversational styles. A mode only decides which
//! lead-in phrases the simulated assistant picks from; icons and colors are
//! the front end's business.
//!
//! ```text
//! casual ──Tab──▶ formal ──Tab──▶ technical ──Tab──▶ casual
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::SessionError;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModeId {
    /// Relaxed, friendly conversation
    #[default]
    Casual,
    /// Professional, formal register
    Formal,
    /// Detailed, technical explanations
    #[serde(alias = "professional")]
    Technical,
}

/// Display metadata for a mode.
#[derive(Debug, PartialEq, Eq)]
pub struct Mode {
    pub id: ModeId,
    pub display_name: &'static str,
    pub description: &'static str,
}

static MODES: [Mode; 3] = [
    Mode {
        id: ModeId::Casual,
        display_name: "Günlük",
        description: "Rahat ve samimi sohbet",
    },
    Mode {
        id: ModeId::Formal,
        display_name: "Resmi",
        description: "Profesyonel ve resmi iletişim",
    },
    Mode {
        id: ModeId::Technical,
        display_name: "Teknik",
        description: "Detaylı ve teknik açıklamalar",
    },
];

/// Returns the catalog in its stable order: casual, formal, technical.
pub fn list_modes() -> &'static [Mode] {
    &MODES
}

/// Looks up a mode by its string id.
pub fn describe(mode_id: &str) -> Result<&'static Mode, SessionError> {
    mode_id.parse::<ModeId>().map(ModeId::mode)
}

impl ModeId {
    pub fn mode(self) -> &'static Mode {
        &MODES[self.index()]
    }

    /// Position in the catalog (also the tab index in the front end).
    pub fn index(self) -> usize {
        match self {
            ModeId::Casual => 0,
            ModeId::Formal => 1,
            ModeId::Technical => 2,
        }
    }

    /// Cycles to the next mode (wraps around)
    pub fn next(self) -> ModeId {
        match self {
            ModeId::Casual => ModeId::Formal,
            ModeId::Formal => ModeId::Technical,
            ModeId::Technical => ModeId::Casual,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModeId::Casual => "casual",
            ModeId::Formal => "formal",
            ModeId::Technical => "technical",
        }
    }
}

impl FromStr for ModeId {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "casual" => Ok(ModeId::Casual),
            "formal" => Ok(ModeId::Formal),
            "technical" | "professional" => Ok(ModeId::Technical),
            _ => Err(SessionError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
