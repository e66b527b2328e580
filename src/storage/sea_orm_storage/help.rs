use super::SeaOrmStorage;
use crate::entity::help_faqs::{
    ActiveModel as FaqActiveModel, Column as FaqColumn, Entity as HelpFaqs,
};
use crate::entity::support_tickets::{ActiveModel, Column, Entity as SupportTickets};
use crate::errors::{ExamAdminError, Result};
use crate::models::{
    PaginationInfo,
    common::normalize_page,
    help::{
        entities::{Faq, SupportTicket, TicketStatus},
        requests::{FaqRequest, TicketListQuery},
        responses::TicketListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn list_faqs_impl(&self) -> Result<Vec<Faq>> {
        let models = HelpFaqs::find()
            .order_by_asc(FaqColumn::SortOrder)
            .order_by_asc(FaqColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to list FAQs", e))?;

        Ok(models.into_iter().map(|m| m.into_faq()).collect())
    }

    pub async fn create_faq_impl(&self, faq: FaqRequest) -> Result<Faq> {
        let now = chrono::Utc::now().timestamp();
        let model = FaqActiveModel {
            question: Set(faq.question),
            answer: Set(faq.answer),
            category: Set(faq.category),
            sort_order: Set(faq.sort_order),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to create FAQ", e))?;

        Ok(result.into_faq())
    }

    pub async fn update_faq_impl(&self, id: i64, faq: FaqRequest) -> Result<Option<Faq>> {
        let exists = HelpFaqs::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to query FAQ", e))?
            .is_some();
        if !exists {
            return Ok(None);
        }

        let model = FaqActiveModel {
            id: Set(id),
            question: Set(faq.question),
            answer: Set(faq.answer),
            category: Set(faq.category),
            sort_order: Set(faq.sort_order),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to update FAQ", e))?;

        Ok(Some(result.into_faq()))
    }

    pub async fn delete_faq_impl(&self, id: i64) -> Result<bool> {
        let result = HelpFaqs::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to delete FAQ", e))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn create_ticket_impl(
        &self,
        user_id: i64,
        subject: &str,
        message: &str,
    ) -> Result<SupportTicket> {
        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            user_id: Set(user_id),
            subject: Set(subject.to_string()),
            message: Set(message.to_string()),
            status: Set(TicketStatus::Open.to_string()),
            admin_response: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to create ticket", e))?;

        Ok(result.into_ticket())
    }

    pub async fn list_tickets_impl(&self, query: TicketListQuery) -> Result<TicketListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = SupportTickets::find();
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(user_id) = query.user_id {
            select = select.filter(Column::UserId.eq(user_id));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to count tickets", e))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to count ticket pages", e))?;
        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to list tickets", e))?;

        Ok(TicketListResponse {
            items: items.into_iter().map(|m| m.into_ticket()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn update_ticket_impl(
        &self,
        id: i64,
        status: Option<TicketStatus>,
        admin_response: Option<String>,
    ) -> Result<Option<SupportTicket>> {
        let Some(existing) = SupportTickets::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to query ticket", e))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        if let Some(status) = status {
            model.status = Set(status.to_string());
        }
        if let Some(response) = admin_response {
            model.admin_response = Set(Some(response));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to update ticket", e))?;

        Ok(Some(result.into_ticket()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::role_names;
    use crate::test_support::create_user_with_role;

    fn faq(question: &str, sort_order: i32) -> FaqRequest {
        FaqRequest {
            question: question.into(),
            answer: "See the exam guide".into(),
            category: Some("general".into()),
            sort_order,
        }
    }

    #[tokio::test]
    async fn test_faqs_ordered_by_sort_order() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage.create_faq_impl(faq("How are ranks computed?", 2)).await.unwrap();
        let first = storage.create_faq_impl(faq("How do I register?", 1)).await.unwrap();

        let questions: Vec<_> = storage
            .list_faqs_impl()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.question)
            .collect();
        assert_eq!(questions, vec!["How do I register?", "How are ranks computed?"]);

        let updated = storage
            .update_faq_impl(first.id, faq("How do I register for an exam?", 5))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.sort_order, 5);
        assert!(storage.update_faq_impl(9999, faq("x", 0)).await.unwrap().is_none());
        assert!(storage.delete_faq_impl(first.id).await.unwrap());
        assert_eq!(storage.list_faqs_impl().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ticket_lifecycle_and_filters() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let alice = create_user_with_role(&storage, "alice", role_names::STUDENT).await;
        let bob = create_user_with_role(&storage, "bob", role_names::STUDENT).await;

        let ticket = storage
            .create_ticket_impl(alice.id, "Hall ticket missing", "I cannot download it")
            .await
            .unwrap();
        assert_eq!(ticket.status, TicketStatus::Open);
        storage
            .create_ticket_impl(bob.id, "Wrong score", "Physics score is wrong")
            .await
            .unwrap();

        let mine = storage
            .list_tickets_impl(TicketListQuery {
                user_id: Some(alice.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(mine.pagination.total, 1);

        let resolved = storage
            .update_ticket_impl(ticket.id, Some(TicketStatus::Resolved), Some("Re-issued".into()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resolved.status, TicketStatus::Resolved);
        assert_eq!(resolved.admin_response.as_deref(), Some("Re-issued"));

        let open = storage
            .list_tickets_impl(TicketListQuery {
                status: Some(TicketStatus::Open),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(open.items.len(), 1);
        assert_eq!(open.items[0].user_id, bob.id);
    }
}
