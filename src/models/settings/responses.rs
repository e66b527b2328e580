use super::entities::Setting;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/setting.ts")]
pub struct SettingListResponse {
    pub items: Vec<Setting>,
}
