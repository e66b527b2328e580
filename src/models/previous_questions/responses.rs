use super::entities::{PreviousQuestionSet, ResourceKind};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/previous_question.ts")]
pub struct PreviousQuestionListResponse {
    pub items: Vec<PreviousQuestionSet>,
    pub pagination: PaginationInfo,
}

// 预览信息
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/previous_question.ts")]
pub struct PreviewResponse {
    pub id: i64,
    pub kind: ResourceKind,
    /// 前端嵌入使用的地址
    pub viewer_url: String,
    /// 是否经由本服务代理
    pub proxied: bool,
    pub resource_url: String,
}
