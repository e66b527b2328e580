pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod questions;
pub mod sets;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::exams::requests::{
    CreateExamRequest, CreateSetRequest, ExamListParams, UpdateExamRequest,
};
use crate::models::questions::requests::QuestionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct ExamService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_exams(
        &self,
        request: &HttpRequest,
        params: ExamListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_exams(self, request, params).await
    }

    pub async fn create_exam(
        &self,
        request: &HttpRequest,
        create_request: CreateExamRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_exam(self, request, create_request).await
    }

    pub async fn get_exam(&self, request: &HttpRequest, exam_id: i64) -> ActixResult<HttpResponse> {
        detail::get_exam(self, request, exam_id).await
    }

    pub async fn update_exam(
        &self,
        request: &HttpRequest,
        exam_id: i64,
        update_request: UpdateExamRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_exam(self, request, exam_id, update_request).await
    }

    pub async fn delete_exam(
        &self,
        request: &HttpRequest,
        exam_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_exam(self, request, exam_id).await
    }

    pub async fn list_sets(&self, request: &HttpRequest, exam_id: i64) -> ActixResult<HttpResponse> {
        sets::list_sets(self, request, exam_id).await
    }

    pub async fn create_set(
        &self,
        request: &HttpRequest,
        exam_id: i64,
        set_request: CreateSetRequest,
    ) -> ActixResult<HttpResponse> {
        sets::create_set(self, request, exam_id, set_request).await
    }

    pub async fn list_questions(
        &self,
        request: &HttpRequest,
        exam_id: i64,
    ) -> ActixResult<HttpResponse> {
        questions::list_questions(self, request, exam_id).await
    }

    pub async fn create_question(
        &self,
        request: &HttpRequest,
        exam_id: i64,
        question: QuestionRequest,
    ) -> ActixResult<HttpResponse> {
        questions::create_question(self, request, exam_id, question).await
    }

    pub async fn update_question(
        &self,
        request: &HttpRequest,
        exam_id: i64,
        question_id: i64,
        question: QuestionRequest,
    ) -> ActixResult<HttpResponse> {
        questions::update_question(self, request, exam_id, question_id, question).await
    }

    pub async fn delete_question(
        &self,
        request: &HttpRequest,
        exam_id: i64,
        question_id: i64,
    ) -> ActixResult<HttpResponse> {
        questions::delete_question(self, request, exam_id, question_id).await
    }
}

pub(crate) const DUPLICATE_SET_MESSAGE: &str =
    "Exam set already exists for this title, start date and set type";

pub(crate) fn duplicate_set_response() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::ExamAlreadyExists,
        DUPLICATE_SET_MESSAGE,
    ))
}

pub(crate) fn exam_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::ExamNotFound,
        "Exam not found",
    ))
}
