use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::HelpService;
use crate::models::help::requests::FaqRequest;
use crate::models::help::responses::FaqListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

fn faq_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::FaqNotFound,
        "FAQ not found",
    ))
}

/// 问题与答案去首尾空白后不能为空
fn clean_faq(mut faq: FaqRequest) -> Option<FaqRequest> {
    faq.question = faq.question.trim().to_string();
    faq.answer = faq.answer.trim().to_string();
    faq.category = faq
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    (!faq.question.is_empty() && !faq.answer.is_empty()).then_some(faq)
}

fn invalid_faq() -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        "Question and answer are required",
    ))
}

pub async fn list_faqs(service: &HelpService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_faqs().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            FaqListResponse { items },
            "FAQs retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn create_faq(
    service: &HelpService,
    request: &HttpRequest,
    faq: FaqRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(faq) = clean_faq(faq) else {
        return Ok(invalid_faq());
    };

    match storage.create_faq(faq).await {
        Ok(faq) => Ok(HttpResponse::Created().json(ApiResponse::success(
            faq,
            "FAQ created successfully",
        ))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn update_faq(
    service: &HelpService,
    request: &HttpRequest,
    id: i64,
    faq: FaqRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(faq) = clean_faq(faq) else {
        return Ok(invalid_faq());
    };

    match storage.update_faq(id, faq).await {
        Ok(Some(faq)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            faq,
            "FAQ updated successfully",
        ))),
        Ok(None) => Ok(faq_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}

pub async fn delete_faq(
    service: &HelpService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_faq(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "FAQ deleted successfully",
        ))),
        Ok(false) => Ok(faq_not_found()),
        Err(e) => Ok(error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_faq() {
        let faq = clean_faq(FaqRequest {
            question: " How do I see my rank? ".into(),
            answer: "Open the results page.".into(),
            category: Some("  ".into()),
            sort_order: 1,
        })
        .unwrap();
        assert_eq!(faq.question, "How do I see my rank?");
        assert_eq!(faq.category, None);

        assert!(
            clean_faq(FaqRequest {
                question: "Q".into(),
                answer: "   ".into(),
                category: None,
                sort_order: 0,
            })
            .is_none()
        );
    }
}
