//! Role model and role-matching rules

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Platform roles.
///
/// Stored on user profiles and compared against per-route requirements
/// by the role gate. Unknown codes coming off the wire degrade to
/// `User`, never to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "USER")]
    User,
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "MODERATOR")]
    Moderator,
    #[serde(rename = "GUIDE")]
    Guide,
    #[serde(rename = "ARTISAN")]
    Artisan,
    #[serde(rename = "AGENTE_CULTURAL")]
    CulturalAgent,
    #[serde(rename = "PREMIUM")]
    Premium,
}

pub const ALL_ROLES: [Role; 7] = [
    Role::User,
    Role::Admin,
    Role::Moderator,
    Role::Guide,
    Role::Artisan,
    Role::CulturalAgent,
    Role::Premium,
];

impl Role {
    /// Stable wire code for this role
    pub fn code(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
            Role::Moderator => "MODERATOR",
            Role::Guide => "GUIDE",
            Role::Artisan => "ARTISAN",
            Role::CulturalAgent => "AGENTE_CULTURAL",
            Role::Premium => "PREMIUM",
        }
    }

    /// Parse a role code, tolerating case and a transport-level `ROLE_`
    /// prefix. Returns `None` for codes outside the closed set.
    pub fn try_from_code(code: &str) -> Option<Role> {
        let normalized = code.trim();
        let normalized = normalized.strip_prefix("ROLE_").unwrap_or(normalized);

        ALL_ROLES
            .into_iter()
            .find(|role| role.code().eq_ignore_ascii_case(normalized))
    }

    /// Parse a role code, falling back to `User` for anything unknown.
    ///
    /// Read paths use this: a profile with a mangled role still
    /// authenticates as a regular user.
    pub fn from_code(code: &str) -> Role {
        Role::try_from_code(code).unwrap_or(Role::User)
    }

    /// Whether a holder of `self` passes a requirement for `required`.
    ///
    /// `User` requirements admit any authenticated identity. `Admin`
    /// passes moderator, guide, and premium requirements but not the
    /// artisan or cultural-agent specialist requirements, and an
    /// `Admin` requirement admits only admins.
    pub fn satisfies(self, required: Role) -> bool {
        match required {
            Role::User => true,
            Role::Admin => self == Role::Admin,
            Role::Moderator | Role::Guide | Role::Premium => {
                self == required || self == Role::Admin
            }
            Role::Artisan | Role::CulturalAgent => self == required,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A set of roles held by one identity.
///
/// Profiles store a single role today; the resolver still attaches a
/// set so requirements with several admissible roles compare uniformly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn insert(&mut self, role: Role) {
        self.0.insert(role);
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }

    /// OR semantics: the set qualifies when any held role satisfies any
    /// required role.
    pub fn satisfies_any(&self, required: &[Role]) -> bool {
        required
            .iter()
            .any(|req| self.iter().any(|held| held.satisfies(*req)))
    }
}

impl From<Role> for RoleSet {
    fn from(role: Role) -> Self {
        let mut set = BTreeSet::new();
        set.insert(role);
        Self(set)
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for role in self.iter() {
            if !first {
                f.write_str(",")?;
            }
            f.write_str(role.code())?;
            first = false;
        }
        Ok(())
    }
}
