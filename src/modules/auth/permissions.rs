use crate::modules::auth::service::Claims;
use crate::modules::users::entities::enums::Role;
use crate::shared::error::{AppError, AppResult};

/// Actions gated by role. Kept separate from the user record so the
/// persistence model carries no authorization logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ManageCatalog,
    ViewAnyUser,
    PlaceOrder,
    WriteReview,
}

impl Role {
    pub fn permits(self, action: Action) -> bool {
        match self {
            Role::Admin => true,
            Role::User => matches!(action, Action::PlaceOrder | Action::WriteReview),
        }
    }
}

impl Claims {
    /// Checks the token's role against the requested action.
    pub fn authorize(&self, action: Action) -> AppResult<()> {
        let role = Role::parse(&self.role)
            .ok_or_else(|| AppError::Forbidden("Unknown role".to_string()))?;
        if role.permits(action) {
            Ok(())
        } else {
            Err(AppError::Forbidden("Insufficient role".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_permits_everything() {
        assert!(Role::Admin.permits(Action::ManageCatalog));
        assert!(Role::Admin.permits(Action::PlaceOrder));
    }

    #[test]
    fn user_cannot_manage_catalog() {
        assert!(!Role::User.permits(Action::ManageCatalog));
        assert!(!Role::User.permits(Action::ViewAnyUser));
        assert!(Role::User.permits(Action::PlaceOrder));
    }

    #[test]
    fn unknown_role_is_forbidden() {
        let claims = Claims {
            sub: "u".to_string(),
            role: "SUPERVISOR".to_string(),
            exp: 0,
            iat: 0,
        };
        assert!(matches!(
            claims.authorize(Action::PlaceOrder),
            Err(AppError::Forbidden(_))
        ));
    }
}
