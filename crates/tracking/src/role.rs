use core::str::FromStr;

use serde::{Deserialize, Serialize};

use chainguard_core::DomainError;

/// Acting party in the supply chain.
///
/// A role is a locally selected acting mode, not an authenticated identity.
/// It scopes which lifecycle transitions may be requested (see
/// [`crate::policy::allowed_targets`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Manufacturer,
    Logistics,
    Consumer,
}

impl Role {
    /// All roles, in selection order.
    pub const ALL: [Role; 3] = [Role::Manufacturer, Role::Logistics, Role::Consumer];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Manufacturer => "manufacturer",
            Role::Logistics => "logistics",
            Role::Consumer => "consumer",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manufacturer" => Ok(Role::Manufacturer),
            "logistics" => Ok(Role::Logistics),
            "consumer" => Ok(Role::Consumer),
            other => Err(DomainError::validation(format!("unknown role: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!("admin".parse::<Role>().is_err());
        assert!("Manufacturer".parse::<Role>().is_err());
    }
}
