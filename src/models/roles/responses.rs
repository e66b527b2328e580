use super::entities::Role;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/role.ts")]
pub struct RoleListResponse {
    pub items: Vec<Role>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/role.ts")]
pub struct PermissionListResponse {
    pub items: Vec<String>,
}
