use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 系统设置项，值为任意 JSON
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/setting.ts")]
pub struct Setting {
    pub key: String,
    #[ts(type = "unknown")]
    pub value: serde_json::Value,
    pub updated_by: Option<i64>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
