use serde::{Deserialize, Serialize};

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "Administrador")]
    Admin,
    #[serde(rename = "Programador")]
    Programmer,
    #[serde(rename = "Mantenimiento")]
    Maintenance,
    #[serde(rename = "Operador Isla")]
    IslandOperator,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "Administrador",
            UserRole::Programmer => "Programador",
            UserRole::Maintenance => "Mantenimiento",
            UserRole::IslandOperator => "Operador Isla",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Administrador" => Some(UserRole::Admin),
            "Programador" => Some(UserRole::Programmer),
            "Mantenimiento" => Some(UserRole::Maintenance),
            "Operador Isla" => Some(UserRole::IslandOperator),
            _ => None,
        }
    }

    /// Roles administrativos: ven todos los reportes y gestionan maestros
    pub fn is_administrative(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Programmer)
    }
}

/// Claims del JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // user_id
    pub email: String,
    pub role: String,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}
