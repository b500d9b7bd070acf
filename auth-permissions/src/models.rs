use crate::error::ParsePermissionError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Resource string that stands for "all resources" in a grant.
pub const ALL_RESOURCES: &str = "*";

/// Operation a permission grants or requires. There is no hierarchy among
/// actions: `configure` does not imply `update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Execute,
    Configure,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
        Action::Execute,
        Action::Configure,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Execute => "execute",
            Self::Configure => "configure",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ParsePermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| ParsePermissionError::UnknownAction(s.to_string()))
    }
}

/// Granularity of a grant.
///
/// Scopes nest: `global` covers `project`, which covers `own`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Own,
    Project,
    Global,
}

impl Scope {
    /// Probe order used when looking for the widest matching grant.
    pub const BROADEST_FIRST: [Scope; 3] = [Scope::Global, Scope::Project, Scope::Own];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Own => "own",
            Self::Project => "project",
            Self::Global => "global",
        }
    }

    fn breadth(self) -> u8 {
        match self {
            Self::Own => 0,
            Self::Project => 1,
            Self::Global => 2,
        }
    }

    /// Whether a grant at `self` covers a requirement at `required`.
    ///
    /// Directional: `Project.satisfies(Own)` holds, `Own.satisfies(Project)`
    /// does not.
    #[must_use]
    pub fn satisfies(self, required: Scope) -> bool {
        self.breadth() >= required.breadth()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = ParsePermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "own" => Ok(Self::Own),
            "project" => Ok(Self::Project),
            "global" => Ok(Self::Global),
            other => Err(ParsePermissionError::UnknownScope(other.to_string())),
        }
    }
}

/// A capability grant or a capability requirement; the same shape serves
/// both roles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
pub struct Permission {
    #[validate(length(min = 1, message = "resource must not be empty"))]
    pub resource: String,
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
}

impl Permission {
    /// Unscoped permission.
    pub fn new(resource: impl Into<String>, action: Action) -> Self {
        Self {
            resource: resource.into(),
            action,
            scope: None,
        }
    }

    pub fn scoped(resource: impl Into<String>, action: Action, scope: Scope) -> Self {
        Self {
            resource: resource.into(),
            action,
            scope: Some(scope),
        }
    }

    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// The grant that makes a user a global administrator.
    #[must_use]
    pub fn global_admin() -> Self {
        Self::scoped(ALL_RESOURCES, Action::Configure, Scope::Global)
    }
}

/// Compact form: `resource:action` or `resource:action:scope`.
impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope {
            Some(scope) => write!(f, "{}:{}:{}", self.resource, self.action, scope),
            None => write!(f, "{}:{}", self.resource, self.action),
        }
    }
}

impl FromStr for Permission {
    type Err = ParsePermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let resource = parts
            .next()
            .filter(|r| !r.is_empty())
            .ok_or_else(|| ParsePermissionError::Malformed(s.to_string()))?;
        let action = parts
            .next()
            .ok_or_else(|| ParsePermissionError::Malformed(s.to_string()))?
            .parse::<Action>()?;
        let scope = parts.next().map(str::parse::<Scope>).transpose()?;
        if parts.next().is_some() {
            return Err(ParsePermissionError::Malformed(s.to_string()));
        }

        Ok(Self {
            resource: resource.to_string(),
            action,
            scope,
        })
    }
}

/// Authenticated user as supplied by the identity layer. This crate only
/// reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[validate(length(min = 1, message = "id must not be empty"))]
    pub id: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[serde(default)]
    #[validate(nested)]
    pub permissions: Vec<Permission>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            permissions: Vec::new(),
            is_active: true,
            last_login: None,
        }
    }

    #[must_use]
    pub fn with_permissions(mut self, permissions: Vec<Permission>) -> Self {
        self.permissions = permissions;
        self
    }

    #[must_use]
    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permissions.push(permission);
        self
    }

    #[must_use]
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }
}
