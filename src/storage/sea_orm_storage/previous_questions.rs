use super::SeaOrmStorage;
use crate::entity::previous_question_sets::{ActiveModel, Column, Entity as PreviousQuestionSets};
use crate::errors::{ExamAdminError, Result};
use crate::models::{
    PaginationInfo,
    common::normalize_page,
    previous_questions::{
        entities::PreviousQuestionSet,
        requests::{PreviousQuestionDraft, PreviousQuestionListQuery},
        responses::PreviousQuestionListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn list_previous_questions_impl(
        &self,
        query: PreviousQuestionListQuery,
    ) -> Result<PreviousQuestionListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = PreviousQuestionSets::find();
        if let Some(ref course) = query.course
            && !course.trim().is_empty()
        {
            select = select.filter(Column::Course.like(contains_pattern(course.trim())));
        }
        if let Some(mode) = query.subject_mode {
            select = select.filter(Column::SubjectMode.eq(mode.to_string()));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to count previous question sets", e))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to count previous question pages", e))?;
        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to list previous question sets", e))?;

        Ok(PreviousQuestionListResponse {
            items: items
                .into_iter()
                .map(|m| m.into_previous_question_set())
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn get_previous_question_impl(&self, id: i64) -> Result<Option<PreviousQuestionSet>> {
        let model = PreviousQuestionSets::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to query previous question set", e))?;

        Ok(model.map(|m| m.into_previous_question_set()))
    }

    pub async fn create_previous_question_impl(
        &self,
        draft: PreviousQuestionDraft,
    ) -> Result<PreviousQuestionSet> {
        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            course: Set(draft.course),
            subject_mode: Set(draft.subject_mode.to_string()),
            subjects: Set(serde_json::to_string(&draft.subjects)?),
            exam_conducted_on: Set(draft.exam_conducted_on),
            resource_url: Set(draft.resource_url),
            notes: Set(draft.notes),
            uploaded_by: Set(draft.uploaded_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to create previous question set", e))?;

        Ok(result.into_previous_question_set())
    }

    /// 仅上传者可删除；记录不存在返回 false，非上传者返回授权错误
    pub async fn delete_previous_question_impl(&self, id: i64, requester_id: i64) -> Result<bool> {
        let Some(existing) = self.get_previous_question_impl(id).await? else {
            return Ok(false);
        };
        if existing.uploaded_by != requester_id {
            return Err(ExamAdminError::authorization(
                "Only the uploader can delete this question set",
            ));
        }

        // 条件里带上上传者，防止检查与删除之间被改写
        let result = PreviousQuestionSets::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::UploadedBy.eq(requester_id))
            .exec(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to delete previous question set", e))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::previous_questions::entities::SubjectMode;
    use crate::models::users::entities::role_names;
    use crate::test_support::create_user_with_role;

    fn draft(course: &str, mode: SubjectMode, subjects: &[&str], uploaded_by: i64) -> PreviousQuestionDraft {
        PreviousQuestionDraft {
            course: course.into(),
            subject_mode: mode,
            subjects: subjects.iter().map(|s| s.to_string()).collect(),
            exam_conducted_on: Some("2024-04-06".into()),
            resource_url: "https://example.com/paper.pdf".into(),
            notes: None,
            uploaded_by,
        }
    }

    #[tokio::test]
    async fn test_only_uploader_can_delete() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let owner = create_user_with_role(&storage, "owner", role_names::ADMIN).await;
        let other = create_user_with_role(&storage, "other", role_names::ADMIN).await;

        let set = storage
            .create_previous_question_impl(draft("JEE Main", SubjectMode::Single, &["Physics"], owner.id))
            .await
            .unwrap();
        assert_eq!(set.subjects, vec!["Physics".to_string()]);

        let err = storage
            .delete_previous_question_impl(set.id, other.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ExamAdminError::Authorization(_)));
        assert!(storage.get_previous_question_impl(set.id).await.unwrap().is_some());

        assert!(storage.delete_previous_question_impl(set.id, owner.id).await.unwrap());
        assert!(storage.get_previous_question_impl(set.id).await.unwrap().is_none());
        assert!(!storage.delete_previous_question_impl(set.id, owner.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_filters() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let owner = create_user_with_role(&storage, "owner", role_names::ADMIN).await;

        storage
            .create_previous_question_impl(draft("JEE Main", SubjectMode::Single, &["Physics"], owner.id))
            .await
            .unwrap();
        storage
            .create_previous_question_impl(draft(
                "NEET",
                SubjectMode::Multiple,
                &["Physics", "Biology"],
                owner.id,
            ))
            .await
            .unwrap();

        let multiple = storage
            .list_previous_questions_impl(PreviousQuestionListQuery {
                subject_mode: Some(SubjectMode::Multiple),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(multiple.pagination.total, 1);
        assert_eq!(multiple.items[0].course, "NEET");

        let jee = storage
            .list_previous_questions_impl(PreviousQuestionListQuery {
                course: Some("jee".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(jee.items.len(), 1);
    }
}
