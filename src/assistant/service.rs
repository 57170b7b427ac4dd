use serde::{Deserialize, Serialize};

/// The six external integrations Celesta can talk about. The wire token
/// doubles as the name shown in gating messages and the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceId {
    Gmail,
    Drive,
    Calendar,
    GitHub,
    Twitter,
    Maps,
}

impl ServiceId {
    pub const ALL: [ServiceId; 6] = [
        ServiceId::Gmail,
        ServiceId::Drive,
        ServiceId::Calendar,
        ServiceId::GitHub,
        ServiceId::Twitter,
        ServiceId::Maps,
    ];

    pub fn token(self) -> &'static str {
        match self {
            ServiceId::Gmail => "gmail",
            ServiceId::Drive => "drive",
            ServiceId::Calendar => "calendar",
            ServiceId::GitHub => "github",
            ServiceId::Twitter => "twitter",
            ServiceId::Maps => "maps",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ServiceId::Gmail => "Gmail",
            ServiceId::Drive => "Google Drive",
            ServiceId::Calendar => "Google Calendar",
            ServiceId::GitHub => "GitHub",
            ServiceId::Twitter => "Twitter",
            ServiceId::Maps => "Google Maps",
        }
    }

    pub fn from_token(token: &str) -> Option<ServiceId> {
        ServiceId::ALL
            .into_iter()
            .find(|service| service.token() == token)
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}
