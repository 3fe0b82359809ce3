use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Admin,
    Caissier,
}

impl Role {
    /// Landing route after login.
    pub fn default_route(&self) -> &'static str {
        match self {
            Role::Caissier => "/paiements",
            _ => "/dashboard",
        }
    }

    pub fn peut_gerer_entreprises(&self) -> bool {
        *self == Role::SuperAdmin
    }

    pub fn peut_gerer_paiements(&self) -> bool {
        matches!(self, Role::Admin | Role::Caissier)
    }
}
