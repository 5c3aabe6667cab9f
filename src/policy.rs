//! Política de autorización
//!
//! Tabla declarativa acción -> capacidad, consultada una vez por request.
//! Los roles no forman una jerarquía lineal: cada acción lista qué roles
//! la tienen permitida.

use crate::models::user::UserRole;
use crate::utils::errors::AppError;

/// Acciones protegidas del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ViewBookings,
    CreateBooking,
    /// Cambiar status a approved/rejected/completed
    ApproveBooking,
    /// Cualquier usuario autenticado puede borrar cualquier reserva.
    /// Gap conocido del producto, mantenido tal cual.
    DeleteBooking,
    ViewVehicles,
    ManageVehicles,
    ViewDrivers,
    ManageDrivers,
    ManageUsers,
    ViewSummary,
}

/// Tabla de capacidades por rol
pub fn allowed(role: UserRole, action: Action) -> bool {
    use Action::*;
    use UserRole::*;

    match action {
        ViewBookings | CreateBooking | DeleteBooking => true,
        ViewVehicles | ViewDrivers | ViewSummary => true,
        ApproveBooking => matches!(role, Admin | Approver),
        ManageVehicles | ManageDrivers | ManageUsers => matches!(role, Admin),
    }
}

/// Consulta la tabla y devuelve Forbidden si el rol no tiene la capacidad
pub fn authorize(role: UserRole, action: Action) -> Result<(), AppError> {
    if allowed(role, action) {
        Ok(())
    } else {
        Err(AppError::Forbidden("Forbidden".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use UserRole::*;

    #[test]
    fn test_approve_requires_approver_or_admin() {
        assert!(allowed(Admin, Action::ApproveBooking));
        assert!(allowed(Approver, Action::ApproveBooking));
        assert!(!allowed(User, Action::ApproveBooking));
    }

    #[test]
    fn test_inventory_management_is_admin_only() {
        for action in [Action::ManageVehicles, Action::ManageDrivers, Action::ManageUsers] {
            assert!(allowed(Admin, action));
            assert!(!allowed(Approver, action));
            assert!(!allowed(User, action));
        }
    }

    #[test]
    fn test_reads_open_to_all_authenticated_roles() {
        for role in [Admin, Approver, User] {
            assert!(allowed(role, Action::ViewBookings));
            assert!(allowed(role, Action::ViewVehicles));
            assert!(allowed(role, Action::ViewDrivers));
            assert!(allowed(role, Action::ViewSummary));
        }
    }

    #[test]
    fn test_any_authenticated_role_may_delete_bookings() {
        // Gap documentado: el borrado no distingue rol ni propiedad
        for role in [Admin, Approver, User] {
            assert!(allowed(role, Action::DeleteBooking));
        }
    }

    #[test]
    fn test_authorize_maps_to_forbidden() {
        let err = authorize(User, Action::ManageUsers).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
