use serde::{Deserialize, Serialize};

/// Canonical two-party vocabulary every sender label collapses into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Agent,
    Customer,
    Unknown,
}

impl Sender {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Customer => "customer",
            Self::Unknown => "unknown",
        }
    }

    /// Label used when rendering transcript lines, e.g. `Customer: ...`.
    pub fn display_label(self) -> &'static str {
        match self {
            Self::Agent => "Agent",
            Self::Customer => "Customer",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn normalize_role(raw: Option<&str>) -> Sender {
    let Some(raw) = raw else {
        return Sender::Unknown;
    };
    match raw.trim().to_lowercase().as_str() {
        "service provider" | "agent" => Sender::Agent,
        "customer" | "user" => Sender::Customer,
        _ => Sender::Unknown,
    }
}
