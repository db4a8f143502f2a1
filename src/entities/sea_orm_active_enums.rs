use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Closed role set. Every user is exactly one of these; the permission
/// checks branch on the variant.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "role_enum")]
#[serde(rename_all = "lowercase")]
pub enum RoleEnum {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "student")]
    Student,
    #[sea_orm(string_value = "other")]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RoleEnum::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&RoleEnum::Student).unwrap(),
            "\"student\""
        );
        assert_eq!(serde_json::to_string(&RoleEnum::Other).unwrap(), "\"other\"");
    }

    #[test]
    fn role_deserializes_lowercase() {
        let role: RoleEnum = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(role, RoleEnum::Student);
        assert!(serde_json::from_str::<RoleEnum>("\"teacher\"").is_err());
    }
}
