use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::question_options::{
    ActiveModel as OptionActiveModel, Column as OptionColumn, Entity as QuestionOptions,
    Model as OptionModel,
};
use crate::entity::questions::{ActiveModel, Column, Entity as Questions};
use crate::errors::{ExamAdminError, Result};
use crate::models::questions::{
    entities::Question,
    requests::{McqOptions, QuestionDraft},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 考试下的全部题目，选项按 option_order 排序
    pub async fn list_questions_impl(&self, exam_id: i64) -> Result<Vec<Question>> {
        let questions = Questions::find()
            .filter(Column::ExamId.eq(exam_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to list questions", e))?;

        if questions.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = questions.iter().map(|q| q.id).collect();
        let options = QuestionOptions::find()
            .filter(OptionColumn::QuestionId.is_in(ids))
            .order_by_asc(OptionColumn::QuestionId)
            .order_by_asc(OptionColumn::OptionOrder)
            .all(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to list question options", e))?;

        let mut grouped: HashMap<i64, Vec<OptionModel>> = HashMap::new();
        for option in options {
            grouped.entry(option.question_id).or_default().push(option);
        }

        Ok(questions
            .into_iter()
            .map(|q| {
                let opts = grouped.remove(&q.id).unwrap_or_default();
                q.into_question(opts)
            })
            .collect())
    }

    /// 新增题目与选项（事务）
    pub async fn create_question_impl(&self, exam_id: i64, draft: QuestionDraft) -> Result<Question> {
        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to begin transaction", e))?;

        let question = ActiveModel {
            exam_id: Set(exam_id),
            question_text: Set(draft.question_text),
            question_type: Set(draft.question_type.to_string()),
            difficulty: Set(draft.difficulty.to_string()),
            marks: Set(draft.marks),
            explanation: Set(draft.explanation),
            subject: Set(draft.subject),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| ExamAdminError::from_db("Failed to create question", e))?;

        let options = Self::insert_options(&txn, question.id, draft.options.as_ref()).await?;

        txn.commit()
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to commit question", e))?;

        Ok(question.into_question(options))
    }

    /// 更新题目，选项整体替换（事务）
    pub async fn update_question_impl(
        &self,
        exam_id: i64,
        question_id: i64,
        draft: QuestionDraft,
    ) -> Result<Option<Question>> {
        let existing = Questions::find_by_id(question_id)
            .filter(Column::ExamId.eq(exam_id))
            .one(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to query question", e))?;
        if existing.is_none() {
            return Ok(None);
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to begin transaction", e))?;

        let question = ActiveModel {
            id: Set(question_id),
            question_text: Set(draft.question_text),
            question_type: Set(draft.question_type.to_string()),
            difficulty: Set(draft.difficulty.to_string()),
            marks: Set(draft.marks),
            explanation: Set(draft.explanation),
            subject: Set(draft.subject),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(|e| ExamAdminError::from_db("Failed to update question", e))?;

        QuestionOptions::delete_many()
            .filter(OptionColumn::QuestionId.eq(question_id))
            .exec(&txn)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to clear question options", e))?;
        let options = Self::insert_options(&txn, question_id, draft.options.as_ref()).await?;

        txn.commit()
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to commit question update", e))?;

        Ok(Some(question.into_question(options)))
    }

    pub async fn delete_question_impl(&self, exam_id: i64, question_id: i64) -> Result<bool> {
        let result = Questions::delete_many()
            .filter(Column::Id.eq(question_id))
            .filter(Column::ExamId.eq(exam_id))
            .exec(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to delete question", e))?;

        Ok(result.rows_affected > 0)
    }

    async fn insert_options(
        txn: &DatabaseTransaction,
        question_id: i64,
        options: Option<&McqOptions>,
    ) -> Result<Vec<OptionModel>> {
        let Some(options) = options else {
            return Ok(Vec::new());
        };

        let mut inserted = Vec::new();
        for (text, is_correct, order) in options.rows() {
            let row = OptionActiveModel {
                question_id: Set(question_id),
                option_text: Set(text.to_string()),
                is_correct: Set(is_correct),
                option_order: Set(order),
                ..Default::default()
            }
            .insert(txn)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to create question option", e))?;
            inserted.push(row);
        }
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::questions::entities::{Difficulty, QuestionType};
    use crate::test_support::exam_draft;

    fn mcq(text: &str, options: &[&str], correct: usize) -> QuestionDraft {
        QuestionDraft {
            question_text: text.into(),
            question_type: QuestionType::Mcq,
            difficulty: Difficulty::Easy,
            marks: 4,
            explanation: None,
            subject: Some("Physics".into()),
            options: Some(
                McqOptions::new(options.iter().map(|s| s.to_string()).collect(), Some(correct))
                    .unwrap(),
            ),
        }
    }

    async fn storage_with_exam() -> (SeaOrmStorage, i64) {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let exam = storage
            .create_exam_impl(exam_draft("Physics Drill", "practice", None), vec![], None)
            .await
            .unwrap();
        (storage, exam.exam.id)
    }

    #[tokio::test]
    async fn test_create_and_list_with_ordered_options() {
        let (storage, exam_id) = storage_with_exam().await;
        let created = storage
            .create_question_impl(exam_id, mcq("Unit of force?", &["Joule", "Newton", "Watt"], 1))
            .await
            .unwrap();
        assert_eq!(created.options.len(), 3);

        let listed = storage.list_questions_impl(exam_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        let texts: Vec<_> = listed[0].options.iter().map(|o| o.option_text.as_str()).collect();
        assert_eq!(texts, vec!["Joule", "Newton", "Watt"]);
        let correct: Vec<_> = listed[0].options.iter().filter(|o| o.is_correct).collect();
        assert_eq!(correct.len(), 1);
        assert_eq!(correct[0].option_text, "Newton");
    }

    #[tokio::test]
    async fn test_update_replaces_or_clears_options() {
        let (storage, exam_id) = storage_with_exam().await;
        let created = storage
            .create_question_impl(exam_id, mcq("Unit of power?", &["Joule", "Watt"], 1))
            .await
            .unwrap();

        let updated = storage
            .update_question_impl(exam_id, created.id, mcq("Unit of energy?", &["Joule", "Watt", "Volt"], 0))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.question_text, "Unit of energy?");
        assert_eq!(updated.options.len(), 3);
        assert!(updated.options[0].is_correct);

        let descriptive = QuestionDraft {
            question_text: "Explain Newton's third law".into(),
            question_type: QuestionType::Descriptive,
            difficulty: Difficulty::Hard,
            marks: 10,
            explanation: None,
            subject: None,
            options: None,
        };
        let updated = storage
            .update_question_impl(exam_id, created.id, descriptive)
            .await
            .unwrap()
            .unwrap();
        assert!(updated.options.is_empty());
        assert!(storage.list_questions_impl(exam_id).await.unwrap()[0].options.is_empty());
    }

    #[tokio::test]
    async fn test_question_scoped_to_exam() {
        let (storage, exam_id) = storage_with_exam().await;
        let created = storage
            .create_question_impl(exam_id, mcq("Q", &["a", "b"], 0))
            .await
            .unwrap();

        let other_exam = exam_id + 1000;
        assert!(
            storage
                .update_question_impl(other_exam, created.id, mcq("Q", &["a", "b"], 0))
                .await
                .unwrap()
                .is_none()
        );
        assert!(!storage.delete_question_impl(other_exam, created.id).await.unwrap());
        assert!(storage.delete_question_impl(exam_id, created.id).await.unwrap());
        assert!(storage.list_questions_impl(exam_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_question_for_missing_exam_is_validation_error() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let err = storage
            .create_question_impl(424242, mcq("Q", &["a", "b"], 0))
            .await
            .unwrap_err();
        assert!(matches!(err, ExamAdminError::Validation(_)));
    }
}
