//! 帮助中心：常见问题与支持工单

pub mod faqs;
pub mod tickets;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::help::requests::{
    CreateTicketRequest, FaqRequest, TicketListParams, UpdateTicketRequest,
};
use crate::storage::Storage;

pub struct HelpService {
    storage: Option<Arc<dyn Storage>>,
}

impl HelpService {
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

    pub async fn list_faqs(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        faqs::list_faqs(self, request).await
    }

    pub async fn create_faq(
        &self,
        request: &HttpRequest,
        faq: FaqRequest,
    ) -> ActixResult<HttpResponse> {
        faqs::create_faq(self, request, faq).await
    }

    pub async fn update_faq(
        &self,
        request: &HttpRequest,
        id: i64,
        faq: FaqRequest,
    ) -> ActixResult<HttpResponse> {
        faqs::update_faq(self, request, id, faq).await
    }

    pub async fn delete_faq(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        faqs::delete_faq(self, request, id).await
    }

    pub async fn create_ticket(
        &self,
        request: &HttpRequest,
        ticket: CreateTicketRequest,
    ) -> ActixResult<HttpResponse> {
        tickets::create_ticket(self, request, ticket).await
    }

    pub async fn list_tickets(
        &self,
        request: &HttpRequest,
        params: TicketListParams,
    ) -> ActixResult<HttpResponse> {
        tickets::list_tickets(self, request, params, false).await
    }

    pub async fn list_my_tickets(
        &self,
        request: &HttpRequest,
        params: TicketListParams,
    ) -> ActixResult<HttpResponse> {
        tickets::list_tickets(self, request, params, true).await
    }

    pub async fn update_ticket(
        &self,
        request: &HttpRequest,
        id: i64,
        update: UpdateTicketRequest,
    ) -> ActixResult<HttpResponse> {
        tickets::update_ticket(self, request, id, update).await
    }
}
