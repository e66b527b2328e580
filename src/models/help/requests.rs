use serde::Deserialize;
use ts_rs::TS;

use super::entities::TicketStatus;
use crate::models::common::PaginationQuery;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/help.ts")]
pub struct FaqRequest {
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/help.ts")]
pub struct CreateTicketRequest {
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/help.ts")]
pub struct UpdateTicketRequest {
    pub status: Option<TicketStatus>,
    pub admin_response: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/help.ts")]
pub struct TicketListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<TicketStatus>,
}

/// 存储层使用的工单过滤条件，user_id 用于"我的工单"
#[derive(Debug, Clone, Default)]
pub struct TicketListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<TicketStatus>,
    pub user_id: Option<i64>,
}
