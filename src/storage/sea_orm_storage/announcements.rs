use super::SeaOrmStorage;
use crate::entity::announcements::{ActiveModel, Column, Entity as Announcements};
use crate::errors::{ExamAdminError, Result};
use crate::models::{
    PaginationInfo,
    announcements::{
        entities::{Announcement, AnnouncementPriority, AnnouncementStatus, TargetAudience},
        requests::{AnnouncementDraft, AnnouncementListQuery},
        responses::AnnouncementListResponse,
    },
    common::normalize_page,
};
use crate::utils::contains_pattern;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

fn priority_weight(priority: AnnouncementPriority) -> u8 {
    match priority {
        AnnouncementPriority::Urgent => 0,
        AnnouncementPriority::High => 1,
        AnnouncementPriority::Normal => 2,
        AnnouncementPriority::Low => 3,
    }
}

impl SeaOrmStorage {
    pub async fn list_announcements_impl(
        &self,
        query: AnnouncementListQuery,
    ) -> Result<AnnouncementListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Announcements::find();
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(Column::Title.like(contains_pattern(search.trim())))
                    .add(Column::Content.like(contains_pattern(search.trim()))),
            );
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(priority) = query.priority {
            select = select.filter(Column::Priority.eq(priority.to_string()));
        }
        if let Some(audience) = query.target_audience {
            select = select.filter(Column::TargetAudience.eq(audience.to_string()));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to count announcements", e))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to count announcement pages", e))?;
        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to list announcements", e))?;

        Ok(AnnouncementListResponse {
            items: items.into_iter().map(|m| m.into_announcement()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn get_announcement_impl(&self, id: i64) -> Result<Option<Announcement>> {
        let model = Announcements::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to query announcement", e))?;

        Ok(model.map(|m| m.into_announcement()))
    }

    pub async fn create_announcement_impl(
        &self,
        draft: AnnouncementDraft,
        created_by: Option<i64>,
    ) -> Result<Announcement> {
        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            title: Set(draft.title),
            content: Set(draft.content),
            announcement_type: Set(draft.announcement_type),
            media_url: Set(draft.media_url),
            video_url: Set(draft.video_url),
            priority: Set(draft.priority.to_string()),
            status: Set(draft.status.to_string()),
            target_audience: Set(draft.target_audience.to_string()),
            views: Set(0),
            expires_at: Set(draft.expires_at.map(|t| t.timestamp())),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to create announcement", e))?;

        Ok(result.into_announcement())
    }

    /// 用合并后的完整数据覆盖，浏览数与创建者不变
    pub async fn update_announcement_impl(
        &self,
        id: i64,
        draft: AnnouncementDraft,
    ) -> Result<Option<Announcement>> {
        if self.get_announcement_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            title: Set(draft.title),
            content: Set(draft.content),
            announcement_type: Set(draft.announcement_type),
            media_url: Set(draft.media_url),
            video_url: Set(draft.video_url),
            priority: Set(draft.priority.to_string()),
            status: Set(draft.status.to_string()),
            target_audience: Set(draft.target_audience.to_string()),
            expires_at: Set(draft.expires_at.map(|t| t.timestamp())),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to update announcement", e))?;

        Ok(Some(result.into_announcement()))
    }

    pub async fn delete_announcement_impl(&self, id: i64) -> Result<bool> {
        let result = Announcements::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to delete announcement", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 已发布、未过期、对该角色可见；按优先级再按时间排序
    pub async fn list_active_announcements_impl(&self, role: &str) -> Result<Vec<Announcement>> {
        let now = chrono::Utc::now().timestamp();
        let audiences: Vec<String> = TargetAudience::visible_to(role)
            .iter()
            .map(|a| a.to_string())
            .collect();

        let models = Announcements::find()
            .filter(Column::Status.eq(AnnouncementStatus::Published.to_string()))
            .filter(
                Condition::any()
                    .add(Column::ExpiresAt.is_null())
                    .add(Column::ExpiresAt.gt(now)),
            )
            .filter(Column::TargetAudience.is_in(audiences))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to list active announcements", e))?;

        let mut items: Vec<Announcement> = models.into_iter().map(|m| m.into_announcement()).collect();
        // sort_by_key 是稳定排序，同优先级保持时间倒序
        items.sort_by_key(|a| priority_weight(a.priority));
        Ok(items)
    }

    pub async fn increment_announcement_views_impl(&self, id: i64) -> Result<Option<i64>> {
        let result = Announcements::update_many()
            .col_expr(Column::Views, Expr::cust("views + 1"))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to increment views", e))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        Ok(self.get_announcement_impl(id).await?.map(|a| a.views))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::role_names;
    use crate::test_support::create_user_with_role;

    fn draft(title: &str, priority: AnnouncementPriority, audience: TargetAudience) -> AnnouncementDraft {
        AnnouncementDraft {
            title: title.into(),
            content: format!("{title} content"),
            announcement_type: "general".into(),
            media_url: None,
            video_url: None,
            priority,
            status: AnnouncementStatus::Published,
            target_audience: audience,
            expires_at: None,
        }
    }

    #[tokio::test]
    async fn test_active_filters_status_expiry_and_audience() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_announcement_impl(draft("Everyone", AnnouncementPriority::Normal, TargetAudience::All), None)
            .await
            .unwrap();
        storage
            .create_announcement_impl(draft("Admins only", AnnouncementPriority::Normal, TargetAudience::Admins), None)
            .await
            .unwrap();
        storage
            .create_announcement_impl(draft("Urgent students", AnnouncementPriority::Urgent, TargetAudience::Students), None)
            .await
            .unwrap();

        let mut expired = draft("Expired", AnnouncementPriority::High, TargetAudience::All);
        expired.expires_at = Some(chrono::Utc::now() - chrono::Duration::days(1));
        storage.create_announcement_impl(expired, None).await.unwrap();

        let mut hidden = draft("Draft", AnnouncementPriority::High, TargetAudience::All);
        hidden.status = AnnouncementStatus::Draft;
        storage.create_announcement_impl(hidden, None).await.unwrap();

        let for_students = storage
            .list_active_announcements_impl(role_names::STUDENT)
            .await
            .unwrap();
        let titles: Vec<_> = for_students.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Urgent students", "Everyone"]);

        let for_admins = storage
            .list_active_announcements_impl(role_names::ADMIN)
            .await
            .unwrap();
        let titles: Vec<_> = for_admins.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Admins only", "Everyone"]);
    }

    #[tokio::test]
    async fn test_views_and_update_preserve_counters() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let author = create_user_with_role(&storage, "editor", role_names::ADMIN).await;
        let created = storage
            .create_announcement_impl(draft("Results out", AnnouncementPriority::High, TargetAudience::All), Some(author.id))
            .await
            .unwrap();

        assert_eq!(storage.increment_announcement_views_impl(created.id).await.unwrap(), Some(1));
        assert_eq!(storage.increment_announcement_views_impl(created.id).await.unwrap(), Some(2));
        assert_eq!(storage.increment_announcement_views_impl(9999).await.unwrap(), None);

        let updated = storage
            .update_announcement_impl(created.id, draft("Results published", AnnouncementPriority::Low, TargetAudience::All))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.views, 2);
        assert_eq!(updated.created_by, Some(author.id));
        assert_eq!(updated.title, "Results published");

        assert!(storage.delete_announcement_impl(created.id).await.unwrap());
        assert!(storage.get_announcement_impl(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_search_and_filters() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_announcement_impl(draft("Hall ticket", AnnouncementPriority::High, TargetAudience::Students), None)
            .await
            .unwrap();
        storage
            .create_announcement_impl(draft("Staff meeting", AnnouncementPriority::Low, TargetAudience::Admins), None)
            .await
            .unwrap();

        let found = storage
            .list_announcements_impl(AnnouncementListQuery {
                search: Some("ticket".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.items.len(), 1);

        let admins = storage
            .list_announcements_impl(AnnouncementListQuery {
                target_audience: Some(TargetAudience::Admins),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(admins.pagination.total, 1);
        assert_eq!(admins.items[0].title, "Staff meeting");
    }
}
