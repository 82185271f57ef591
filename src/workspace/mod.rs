//! Tenancy around saved forms: organizations, users, roles and the permissions that gate
//! access to each organization's forms.

mod library;
mod repository;

pub use library::FormLibrary;
pub use repository::{JsonFileRepository, MemoryRepository, Repository, StoreConfig};

use crate::form::SavedForm;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    #[serde(rename = "user:create")]
    UserCreate,
    #[serde(rename = "user:read")]
    UserRead,
    #[serde(rename = "user:update")]
    UserUpdate,
    #[serde(rename = "user:delete")]
    UserDelete,
    #[serde(rename = "user:invite")]
    UserInvite,
    #[serde(rename = "form:create")]
    FormCreate,
    #[serde(rename = "form:read")]
    FormRead,
    #[serde(rename = "form:update")]
    FormUpdate,
    #[serde(rename = "form:delete")]
    FormDelete,
    #[serde(rename = "form:share")]
    FormShare,
    #[serde(rename = "role:create")]
    RoleCreate,
    #[serde(rename = "role:read")]
    RoleRead,
    #[serde(rename = "role:update")]
    RoleUpdate,
    #[serde(rename = "role:delete")]
    RoleDelete,
    #[serde(rename = "organization:create")]
    OrganizationCreate,
    #[serde(rename = "organization:read")]
    OrganizationRead,
    #[serde(rename = "organization:update")]
    OrganizationUpdate,
    #[serde(rename = "organization:delete")]
    OrganizationDelete,
}

impl Permission {
    pub const ALL: [Permission; 18] = [
        Permission::UserCreate,
        Permission::UserRead,
        Permission::UserUpdate,
        Permission::UserDelete,
        Permission::UserInvite,
        Permission::FormCreate,
        Permission::FormRead,
        Permission::FormUpdate,
        Permission::FormDelete,
        Permission::FormShare,
        Permission::RoleCreate,
        Permission::RoleRead,
        Permission::RoleUpdate,
        Permission::RoleDelete,
        Permission::OrganizationCreate,
        Permission::OrganizationRead,
        Permission::OrganizationUpdate,
        Permission::OrganizationDelete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::UserCreate => "user:create",
            Permission::UserRead => "user:read",
            Permission::UserUpdate => "user:update",
            Permission::UserDelete => "user:delete",
            Permission::UserInvite => "user:invite",
            Permission::FormCreate => "form:create",
            Permission::FormRead => "form:read",
            Permission::FormUpdate => "form:update",
            Permission::FormDelete => "form:delete",
            Permission::FormShare => "form:share",
            Permission::RoleCreate => "role:create",
            Permission::RoleRead => "role:read",
            Permission::RoleUpdate => "role:update",
            Permission::RoleDelete => "role:delete",
            Permission::OrganizationCreate => "organization:create",
            Permission::OrganizationRead => "organization:read",
            Permission::OrganizationUpdate => "organization:update",
            Permission::OrganizationDelete => "organization:delete",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: String,
    pub permissions: Vec<Permission>,
}

/// An account. Credentials are handled outside this crate and never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub organization_id: String,
    pub role_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
}

/// The whole persisted workspace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DbState {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub organizations: Vec<Organization>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub forms: Vec<SavedForm>,
}

pub const SYSTEM_ADMIN_ROLE_ID: &str = "role_system_admin";
pub const ORG_ADMIN_ROLE_ID: &str = "role_org_admin";
pub const FORM_CREATOR_ROLE_ID: &str = "role_form_creator";
pub const SYSTEM_ORG_ID: &str = "org_system";
pub const DEFAULT_ORG_ID: &str = "org_default";
pub const SYSTEM_ADMIN_USER_ID: &str = "user_system_admin";
pub const DEFAULT_USER_ID: &str = "user_default";

impl DbState {
    /// The initial workspace: three roles, a system and a default organization, and one
    /// user in each.
    pub fn seeded() -> Self {
        use Permission::*;

        let roles = vec![
            Role {
                id: SYSTEM_ADMIN_ROLE_ID.to_string(),
                name: "System Admin".to_string(),
                description: "Has all permissions across the entire system.".to_string(),
                permissions: Permission::ALL.to_vec(),
            },
            Role {
                id: ORG_ADMIN_ROLE_ID.to_string(),
                name: "Organization Admin".to_string(),
                description: "Manages users and forms within their organization.".to_string(),
                permissions: vec![
                    UserInvite, UserRead, UserUpdate, UserDelete, FormCreate, FormRead,
                    FormUpdate, FormDelete, FormShare,
                ],
            },
            Role {
                id: FORM_CREATOR_ROLE_ID.to_string(),
                name: "Form Creator".to_string(),
                description: "Can create and manage their own forms.".to_string(),
                permissions: vec![FormCreate, FormRead, FormUpdate, FormDelete],
            },
        ];

        Self {
            users: vec![
                User {
                    id: SYSTEM_ADMIN_USER_ID.to_string(),
                    email: "admin@system.com".to_string(),
                    organization_id: SYSTEM_ORG_ID.to_string(),
                    role_id: SYSTEM_ADMIN_ROLE_ID.to_string(),
                },
                User {
                    id: DEFAULT_USER_ID.to_string(),
                    email: "user@example.com".to_string(),
                    organization_id: DEFAULT_ORG_ID.to_string(),
                    role_id: ORG_ADMIN_ROLE_ID.to_string(),
                },
            ],
            organizations: vec![
                Organization {
                    id: SYSTEM_ORG_ID.to_string(),
                    name: "System Administration".to_string(),
                },
                Organization {
                    id: DEFAULT_ORG_ID.to_string(),
                    name: "Default Inc.".to_string(),
                },
            ],
            roles,
            forms: Vec::new(),
        }
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
    }

    pub fn role(&self, id: &str) -> Option<&Role> {
        self.roles.iter().find(|role| role.id == id)
    }

    pub fn organization(&self, id: &str) -> Option<&Organization> {
        self.organizations.iter().find(|org| org.id == id)
    }

    pub fn form(&self, id: &str) -> Option<&SavedForm> {
        self.forms.iter().find(|form| form.id == id)
    }

    /// Resolves the acting identity of a user. A user whose role is missing gets no
    /// permissions.
    pub fn identity(&self, user_id: &str) -> Option<Identity> {
        let user = self.user(user_id)?;
        let permissions = self
            .role(&user.role_id)
            .map(|role| role.permissions.clone())
            .unwrap_or_default();
        Some(Identity {
            user_id: user.id.clone(),
            organization_id: user.organization_id.clone(),
            permissions,
        })
    }
}

/// Who is acting, as far as access checks are concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub organization_id: String,
    pub permissions: Vec<Permission>,
}

impl Identity {
    pub fn can(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}
