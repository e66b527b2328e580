use super::entities::{Faq, SupportTicket};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/help.ts")]
pub struct FaqListResponse {
    pub items: Vec<Faq>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/help.ts")]
pub struct TicketListResponse {
    pub items: Vec<SupportTicket>,
    pub pagination: PaginationInfo,
}
