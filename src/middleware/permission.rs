//! Single capability check used by every mutating handler.
//!
//! Reads are open to any authenticated user (the `AuthClaims` extractor
//! already enforces authentication); writes go through `require_admin`,
//! and self-service enrollment through `require_student`.

use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::ApiError;
use crate::utils::jwt::TokenClaims;

pub fn require_admin(claims: &TokenClaims) -> Result<(), ApiError> {
    if claims.role != RoleEnum::Admin {
        return Err(ApiError::forbidden("Only admins can perform this action"));
    }
    Ok(())
}

pub fn require_student(claims: &TokenClaims) -> Result<(), ApiError> {
    if claims.role != RoleEnum::Student {
        return Err(ApiError::forbidden("Only students can enroll in subjects"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    fn claims(role: RoleEnum) -> TokenClaims {
        TokenClaims {
            sub: 1,
            name: "Test User".to_string(),
            role,
            iat: 0,
            exp: i64::MAX,
        }
    }

    #[test]
    fn admin_passes_admin_check() {
        assert!(require_admin(&claims(RoleEnum::Admin)).is_ok());
    }

    #[test]
    fn non_admins_are_forbidden_from_admin_actions() {
        for role in [RoleEnum::Student, RoleEnum::Other] {
            let err = require_admin(&claims(role)).unwrap_err();
            assert_eq!(err.status, StatusCode::FORBIDDEN);
        }
    }

    #[test]
    fn only_students_pass_student_check() {
        assert!(require_student(&claims(RoleEnum::Student)).is_ok());
        assert!(require_student(&claims(RoleEnum::Admin)).is_err());
        assert!(require_student(&claims(RoleEnum::Other)).is_err());
    }
}
