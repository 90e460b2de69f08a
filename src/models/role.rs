use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Member,
    Pastor,
    Admin,
    Elder,
    Clerk,
}

impl Role {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Pastor => "pastor",
            Role::Admin => "admin",
            Role::Elder => "elder",
            Role::Clerk => "clerk",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "member" => Some(Role::Member),
            "pastor" => Some(Role::Pastor),
            "admin" => Some(Role::Admin),
            "elder" => Some(Role::Elder),
            "clerk" => Some(Role::Clerk),
            _ => None,
        }
    }

    /// Roles that never run out of trial.
    pub fn is_trial_exempt(&self) -> bool {
        matches!(self, Role::Admin | Role::Pastor)
    }

    /// Back-office roles: may list, approve and (de)activate accounts.
    pub fn can_manage_members(&self) -> bool {
        matches!(self, Role::Admin | Role::Clerk)
    }

    /// Admins manage everyone; clerks only congregation accounts.
    pub fn can_manage(&self, target: Role) -> bool {
        match self {
            Role::Admin => true,
            Role::Clerk => matches!(target, Role::Member | Role::Elder),
            _ => false,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Member => "Member",
            Role::Pastor => "Pastor",
            Role::Admin => "Administrator",
            Role::Elder => "Elder",
            Role::Clerk => "Clerk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Inactive,
    Pending,
}

impl AccountStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Inactive => "inactive",
            AccountStatus::Pending => "pending",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(AccountStatus::Active),
            "inactive" => Some(AccountStatus::Inactive),
            "pending" => Some(AccountStatus::Pending),
            _ => None,
        }
    }
}
