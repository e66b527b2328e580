use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HelpService;
use crate::middlewares::RequireJWT;
use crate::models::help::requests::{
    CreateTicketRequest, TicketListParams, TicketListQuery, UpdateTicketRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, unauthorized_response};

pub async fn create_ticket(
    service: &HelpService,
    request: &HttpRequest,
    ticket: CreateTicketRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(unauthorized_response());
    };

    let subject = ticket.subject.trim();
    let message = ticket.message.trim();
    if subject.is_empty() || message.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Subject and message are required",
        )));
    }

    match storage.create_ticket(user_id, subject, message).await {
        Ok(ticket) => {
            tracing::info!("Support ticket {} opened by user {}", ticket.id, user_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                ticket,
                "Support ticket created successfully",
            )))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

/// `mine` 为 true 时只返回当前用户自己的工单
pub async fn list_tickets(
    service: &HelpService,
    request: &HttpRequest,
    params: TicketListParams,
    mine: bool,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user_id = if mine {
        match RequireJWT::extract_user_id(request) {
            Some(id) => Some(id),
            None => return Ok(unauthorized_response()),
        }
    } else {
        None
    };

    let query = TicketListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        status: params.status,
        user_id,
    };

    match storage.list_tickets(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Support tickets retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn update_ticket(
    service: &HelpService,
    request: &HttpRequest,
    id: i64,
    update: UpdateTicketRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let admin_response = update
        .admin_response
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match storage.update_ticket(id, update.status, admin_response).await {
        Ok(Some(ticket)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ticket,
            "Support ticket updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TicketNotFound,
            "Support ticket not found",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}
