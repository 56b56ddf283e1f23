use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The feature modules the shell can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleId {
    Dashboard,
    News,
    RiskCalculator,
    Journal,
    Ebooks,
    Auth,
}

impl ModuleId {
    /// The module shown when the hash is empty.
    pub const HOME: ModuleId = ModuleId::Dashboard;

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::News => "news",
            Self::RiskCalculator => "risk-calculator",
            Self::Journal => "journal",
            Self::Ebooks => "ebooks",
            Self::Auth => "auth",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "dashboard" => Some(Self::Dashboard),
            "news" => Some(Self::News),
            "risk-calculator" => Some(Self::RiskCalculator),
            "journal" => Some(Self::Journal),
            "ebooks" => Some(Self::Ebooks),
            "auth" => Some(Self::Auth),
            _ => None,
        }
    }

    pub fn all() -> [ModuleId; 6] {
        [
            Self::Dashboard,
            Self::News,
            Self::RiskCalculator,
            Self::Journal,
            Self::Ebooks,
            Self::Auth,
        ]
    }
}

impl Display for ModuleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
