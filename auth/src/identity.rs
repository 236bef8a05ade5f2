use std::collections::BTreeSet;

/// Capability granted to an authenticated principal.
///
/// Derived from role tags through [`Authority::from_role`]. The set is closed:
/// role tags outside it grant nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Authority {
    User,
    Admin,
}

impl Authority {
    pub const USER_ROLE: &'static str = "ROLE_USER";
    pub const ADMIN_ROLE: &'static str = "ROLE_ADMIN";

    /// Map a role tag to the authority it grants.
    pub fn from_role(role: &str) -> Option<Self> {
        match role {
            Self::USER_ROLE => Some(Authority::User),
            Self::ADMIN_ROLE => Some(Authority::Admin),
            _ => None,
        }
    }

    /// Role tag this authority is granted by.
    pub fn as_role(&self) -> &'static str {
        match self {
            Authority::User => Self::USER_ROLE,
            Authority::Admin => Self::ADMIN_ROLE,
        }
    }
}

/// A principal as seen by the authentication core.
///
/// Read-only view of a credential record: unique identifier (email), stored
/// password hash and role tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    identifier: String,
    password_hash: String,
    roles: BTreeSet<String>,
}

impl Identity {
    pub fn new<R>(
        identifier: impl Into<String>,
        password_hash: impl Into<String>,
        roles: impl IntoIterator<Item = R>,
    ) -> Self
    where
        R: Into<String>,
    {
        Self {
            identifier: identifier.into(),
            password_hash: password_hash.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    /// Authorities granted by this identity's roles.
    pub fn authorities(&self) -> BTreeSet<Authority> {
        self.roles
            .iter()
            .filter_map(|role| {
                let authority = Authority::from_role(role);
                if authority.is_none() {
                    tracing::debug!(role = %role, "Role grants no authority");
                }
                authority
            })
            .collect()
    }
}
