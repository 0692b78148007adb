use serde::Serialize;

use crate::models::auth::UserRole;
use crate::models::report::{InspectionType, Report};
use crate::models::User;
use crate::utils::errors::{forbidden_error, AppResult};

/// Tabla de capacidades por rol, calculada una vez y pasada como valor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// Tipo de chequeo que puede realizar el rol (ninguno para roles administrativos)
    pub inspection_type: Option<InspectionType>,
    /// Conductores y vehículos
    pub can_manage_catalogs: bool,
    pub can_manage_items: bool,
    pub can_manage_users: bool,
    pub can_view_all_reports: bool,
}

impl Capabilities {
    pub fn for_role(role: UserRole) -> Self {
        match role {
            UserRole::Admin | UserRole::Programmer => Self {
                inspection_type: None,
                can_manage_catalogs: true,
                can_manage_items: true,
                can_manage_users: true,
                can_view_all_reports: true,
            },
            UserRole::Maintenance => Self {
                inspection_type: Some(InspectionType::Full),
                can_manage_catalogs: false,
                can_manage_items: false,
                can_manage_users: false,
                can_view_all_reports: false,
            },
            UserRole::IslandOperator => Self {
                inspection_type: Some(InspectionType::Simplified),
                can_manage_catalogs: false,
                can_manage_items: false,
                can_manage_users: false,
                can_view_all_reports: false,
            },
        }
    }

    pub fn can_inspect(&self) -> bool {
        self.inspection_type.is_some()
    }
}

/// Servicio de autorización para verificar permisos por rol
pub struct AuthorizationService;

impl AuthorizationService {
    pub fn require_catalog_manager(user: &User) -> AppResult<Capabilities> {
        let caps = Capabilities::for_role(user.role);
        if !caps.can_manage_catalogs {
            return Err(forbidden_error("manage catalogs", user.role.as_str()));
        }
        Ok(caps)
    }

    pub fn require_item_manager(user: &User) -> AppResult<Capabilities> {
        let caps = Capabilities::for_role(user.role);
        if !caps.can_manage_items {
            return Err(forbidden_error("manage check items", user.role.as_str()));
        }
        Ok(caps)
    }

    pub fn require_user_manager(user: &User) -> AppResult<Capabilities> {
        let caps = Capabilities::for_role(user.role);
        if !caps.can_manage_users {
            return Err(forbidden_error("manage users", user.role.as_str()));
        }
        Ok(caps)
    }

    /// Devuelve el tipo de chequeo permitido o Forbidden
    pub fn require_inspector(user: &User) -> AppResult<InspectionType> {
        Capabilities::for_role(user.role)
            .inspection_type
            .ok_or_else(|| forbidden_error("perform inspections", user.role.as_str()))
    }

    /// Roles administrativos ven todo; los demás solo sus propios reportes
    pub fn can_view_report(user: &User, report: &Report) -> bool {
        Capabilities::for_role(user.role).can_view_all_reports || report.inspector.id == user.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole) -> User {
        User {
            id: "u1".to_string(),
            full_name: "Test".to_string(),
            national_id: "1001".to_string(),
            email: "test@example.com".to_string(),
            phone: "3000000000".to_string(),
            role,
            password_hash: String::new(),
            security_answers: None,
            failed_login_attempts: 0,
            is_blocked: false,
        }
    }

    #[test]
    fn test_role_capabilities() {
        let admin = Capabilities::for_role(UserRole::Admin);
        assert!(admin.can_manage_users && admin.can_view_all_reports);
        assert!(!admin.can_inspect());

        let programmer = Capabilities::for_role(UserRole::Programmer);
        assert!(programmer.can_manage_items && programmer.can_manage_catalogs);

        let mechanic = Capabilities::for_role(UserRole::Maintenance);
        assert_eq!(mechanic.inspection_type, Some(InspectionType::Full));
        assert!(!mechanic.can_view_all_reports);

        let islero = Capabilities::for_role(UserRole::IslandOperator);
        assert_eq!(islero.inspection_type, Some(InspectionType::Simplified));
        assert!(!islero.can_manage_catalogs);
    }

    #[test]
    fn test_require_helpers() {
        assert!(AuthorizationService::require_inspector(&user(UserRole::Admin)).is_err());
        assert_eq!(
            AuthorizationService::require_inspector(&user(UserRole::IslandOperator)).unwrap(),
            InspectionType::Simplified
        );
        assert!(AuthorizationService::require_user_manager(&user(UserRole::Maintenance)).is_err());
        assert!(AuthorizationService::require_catalog_manager(&user(UserRole::Programmer)).is_ok());
    }
}
