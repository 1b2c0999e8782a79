//! Guild roles and account status

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Guild rank of a dashboard user
///
/// Variants are declared from highest to lowest authority, so the derived
/// `Ord` places `GuildMaster` first. JSON uses the English display name; the
/// guild's original Spanish labels are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GuildRole {
    #[serde(rename = "Guild Master", alias = "Maestro del Gremio")]
    GuildMaster,
    #[serde(rename = "Right Hand", alias = "Mano Derecha")]
    RightHand,
    #[serde(rename = "Officer", alias = "Oficial")]
    Officer,
    #[serde(rename = "Member", alias = "Miembro")]
    Member,
    #[serde(rename = "Initiate", alias = "Iniciado")]
    Initiate,
    #[serde(rename = "Guest", alias = "Invitado")]
    Guest,
}

impl GuildRole {
    /// All roles, highest authority first
    pub const ALL: [GuildRole; 6] = [
        GuildRole::GuildMaster,
        GuildRole::RightHand,
        GuildRole::Officer,
        GuildRole::Member,
        GuildRole::Initiate,
        GuildRole::Guest,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GuildMaster => "Guild Master",
            Self::RightHand => "Right Hand",
            Self::Officer => "Officer",
            Self::Member => "Member",
            Self::Initiate => "Initiate",
            Self::Guest => "Guest",
        }
    }

    const fn spanish_label(self) -> &'static str {
        match self {
            Self::GuildMaster => "Maestro del Gremio",
            Self::RightHand => "Mano Derecha",
            Self::Officer => "Oficial",
            Self::Member => "Miembro",
            Self::Initiate => "Iniciado",
            Self::Guest => "Invitado",
        }
    }

    /// Check whether this role outranks another
    #[inline]
    pub fn outranks(self, other: GuildRole) -> bool {
        self < other
    }
}

impl fmt::Display for GuildRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GuildRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|role| {
                role.as_str().eq_ignore_ascii_case(s) || role.spanish_label().eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| format!("unknown guild role: {s}"))
    }
}

/// Approval state of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Pending,
    Active,
    Rejected,
}

impl UserStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown user status: {other}")),
        }
    }
}
