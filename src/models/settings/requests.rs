use std::collections::BTreeMap;

use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/setting.ts")]
pub struct UpdateSettingRequest {
    #[ts(type = "unknown")]
    pub value: serde_json::Value,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/setting.ts")]
pub struct BatchUpdateSettingsRequest {
    #[ts(type = "Record<string, unknown>")]
    pub settings: BTreeMap<String, serde_json::Value>,
}
