use std::collections::HashSet;

use super::SeaOrmStorage;
use crate::entity::exam_subjects::{
    ActiveModel as SubjectActiveModel, Column as SubjectColumn, Entity as ExamSubjects,
};
use crate::entity::exams::{ActiveModel, Column, Entity as Exams};
use crate::entity::questions::{Column as QuestionColumn, Entity as Questions};
use crate::errors::{ExamAdminError, Result};
use crate::models::{
    PaginationInfo,
    common::normalize_page,
    exams::{
        entities::{Exam, ExamSetKey, ExamSubject},
        requests::{ExamDraft, ExamListQuery, ExamSubjectInput},
        responses::{ExamDetail, ExamListResponse},
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 科目同步计划
#[derive(Debug, Default, PartialEq)]
pub(crate) struct SubjectSyncPlan {
    /// (id, subject, marks)，只包含有变化的行
    pub updates: Vec<(i64, String, i32)>,
    pub inserts: Vec<(String, i32)>,
    pub deletes: Vec<i64>,
}

/// 计算现有科目与提交列表之间的差异
///
/// 提交项带 id 且属于该考试时按 id 匹配，否则按名称（忽略大小写）匹配未被占用的行。
pub(crate) fn plan_subject_sync(
    existing: &[ExamSubject],
    submitted: &[ExamSubjectInput],
) -> SubjectSyncPlan {
    let mut plan = SubjectSyncPlan::default();
    let mut claimed: HashSet<i64> = HashSet::new();

    for input in submitted {
        let name = input.subject.trim();
        let matched = input
            .id
            .and_then(|id| existing.iter().find(|s| s.id == id && !claimed.contains(&s.id)))
            .or_else(|| {
                existing.iter().find(|s| {
                    !claimed.contains(&s.id) && s.subject.trim().eq_ignore_ascii_case(name)
                })
            });

        match matched {
            Some(row) => {
                claimed.insert(row.id);
                if row.subject != name || row.marks != input.marks {
                    plan.updates.push((row.id, name.to_string(), input.marks));
                }
            }
            None => plan.inserts.push((name.to_string(), input.marks)),
        }
    }

    plan.deletes = existing
        .iter()
        .filter(|s| !claimed.contains(&s.id))
        .map(|s| s.id)
        .collect();
    plan
}

impl SeaOrmStorage {
    /// 分页列出考试
    pub async fn list_exams_impl(&self, query: ExamListQuery) -> Result<ExamListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Exams::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(Column::Title.like(contains_pattern(search.trim())));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(ref category) = query.category
            && !category.is_empty()
        {
            select = select.filter(Column::Category.eq(category.as_str()));
        }
        if let Some(ref exam_type) = query.exam_type
            && !exam_type.is_empty()
        {
            select = select.filter(Column::ExamType.eq(exam_type.as_str()));
        }

        select = select
            .order_by_desc(Column::StartDate)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to count exams", e))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to count exam pages", e))?;
        let exams = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to list exams", e))?;

        Ok(ExamListResponse {
            items: exams.into_iter().map(|m| m.into_exam()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn get_exam_impl(&self, id: i64) -> Result<Option<Exam>> {
        let exam = Exams::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to query exam", e))?;

        Ok(exam.map(|m| m.into_exam()))
    }

    /// 考试详情：科目与题目数
    pub async fn get_exam_detail_impl(&self, id: i64) -> Result<Option<ExamDetail>> {
        let Some(exam) = self.get_exam_impl(id).await? else {
            return Ok(None);
        };

        let subjects = Self::load_subjects(&self.db, id).await?;
        let question_count = Questions::find()
            .filter(QuestionColumn::ExamId.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to count questions", e))?;

        Ok(Some(ExamDetail {
            exam,
            subjects,
            question_count: question_count as i64,
        }))
    }

    pub async fn find_exam_set_conflict_impl(
        &self,
        key: &ExamSetKey,
        exclude_id: Option<i64>,
    ) -> Result<Option<i64>> {
        let mut select = Exams::find()
            .filter(Column::Title.eq(key.title.as_str()))
            .filter(Column::StartDate.eq(key.start_date.as_str()))
            .filter(Column::Category.eq(key.category.as_str()))
            .filter(Column::SetType.eq(key.set_type.as_str()));
        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }

        let existing = select
            .one(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to check exam set", e))?;

        Ok(existing.map(|m| m.id))
    }

    /// 创建考试及科目（事务）
    pub async fn create_exam_impl(
        &self,
        draft: ExamDraft,
        subjects: Vec<ExamSubjectInput>,
        created_by: Option<i64>,
    ) -> Result<ExamDetail> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to begin transaction", e))?;

        let model = ActiveModel {
            title: Set(draft.title),
            exam_type: Set(draft.exam_type),
            exam_format: Set(draft.exam_format.to_string()),
            total_marks: Set(draft.total_marks),
            duration: Set(draft.duration),
            start_date: Set(draft.start_date),
            start_time: Set(draft.start_time),
            venue: Set(draft.venue),
            description: Set(draft.description),
            status: Set(draft.status.to_string()),
            category: Set(draft.category),
            set_type: Set(draft.set_type),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let exam = model
            .insert(&txn)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to create exam", e))?;

        let mut inserted = Vec::with_capacity(subjects.len());
        for subject in subjects {
            let row = SubjectActiveModel {
                exam_id: Set(exam.id),
                subject: Set(subject.subject.trim().to_string()),
                marks: Set(subject.marks),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to create exam subject", e))?;
            inserted.push(row.into_exam_subject());
        }

        txn.commit()
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to commit exam", e))?;

        Ok(ExamDetail {
            exam: exam.into_exam(),
            subjects: inserted,
            question_count: 0,
        })
    }

    /// 更新考试（事务），subjects 为 Some 时按差异同步
    pub async fn update_exam_impl(
        &self,
        id: i64,
        draft: ExamDraft,
        subjects: Option<Vec<ExamSubjectInput>>,
    ) -> Result<Option<ExamDetail>> {
        if self.get_exam_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to begin transaction", e))?;

        let model = ActiveModel {
            id: Set(id),
            title: Set(draft.title),
            exam_type: Set(draft.exam_type),
            exam_format: Set(draft.exam_format.to_string()),
            total_marks: Set(draft.total_marks),
            duration: Set(draft.duration),
            start_date: Set(draft.start_date),
            start_time: Set(draft.start_time),
            venue: Set(draft.venue),
            description: Set(draft.description),
            status: Set(draft.status.to_string()),
            category: Set(draft.category),
            set_type: Set(draft.set_type),
            updated_at: Set(now),
            ..Default::default()
        };
        model
            .update(&txn)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to update exam", e))?;

        if let Some(submitted) = subjects {
            let existing = Self::load_subjects(&txn, id).await?;
            let plan = plan_subject_sync(&existing, &submitted);

            if !plan.deletes.is_empty() {
                ExamSubjects::delete_many()
                    .filter(SubjectColumn::Id.is_in(plan.deletes.clone()))
                    .exec(&txn)
                    .await
                    .map_err(|e| ExamAdminError::from_db("Failed to remove exam subjects", e))?;
            }
            for (subject_id, subject, marks) in plan.updates {
                SubjectActiveModel {
                    id: Set(subject_id),
                    subject: Set(subject),
                    marks: Set(marks),
                    ..Default::default()
                }
                .update(&txn)
                .await
                .map_err(|e| ExamAdminError::from_db("Failed to update exam subject", e))?;
            }
            for (subject, marks) in plan.inserts {
                SubjectActiveModel {
                    exam_id: Set(id),
                    subject: Set(subject),
                    marks: Set(marks),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|e| ExamAdminError::from_db("Failed to add exam subject", e))?;
            }
        }

        txn.commit()
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to commit exam update", e))?;

        self.get_exam_detail_impl(id).await
    }

    /// 删除考试，科目、题目与报名记录由外键级联删除
    pub async fn delete_exam_impl(&self, id: i64) -> Result<bool> {
        let result = Exams::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to delete exam", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 同组试卷
    pub async fn list_exam_sets_impl(&self, exam: &Exam) -> Result<Vec<Exam>> {
        let exams = Exams::find()
            .filter(Column::Title.eq(exam.title.as_str()))
            .filter(Column::StartDate.eq(exam.start_date.as_str()))
            .filter(Column::Category.eq(exam.category.as_str()))
            .order_by_asc(Column::SetType)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to list exam sets", e))?;

        Ok(exams.into_iter().map(|m| m.into_exam()).collect())
    }

    async fn load_subjects<C: ConnectionTrait>(conn: &C, exam_id: i64) -> Result<Vec<ExamSubject>> {
        let rows = ExamSubjects::find()
            .filter(SubjectColumn::ExamId.eq(exam_id))
            .order_by_asc(SubjectColumn::Id)
            .all(conn)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to load exam subjects", e))?;

        Ok(rows.into_iter().map(|m| m.into_exam_subject()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{exam_draft, subjects};

    fn row(id: i64, subject: &str, marks: i32) -> ExamSubject {
        ExamSubject {
            id,
            exam_id: 1,
            subject: subject.into(),
            marks,
        }
    }

    #[test]
    fn test_plan_matches_by_name_and_id() {
        let existing = vec![row(1, "Physics", 100), row(2, "Chemistry", 100), row(3, "Biology", 100)];
        let mut submitted = subjects(&[("physics", 120), ("Mathematics", 100)]);
        submitted.push(ExamSubjectInput {
            id: Some(2),
            subject: "Organic Chemistry".into(),
            marks: 80,
        });

        let plan = plan_subject_sync(&existing, &submitted);
        assert_eq!(
            plan.updates,
            vec![
                (1, "physics".to_string(), 120),
                (2, "Organic Chemistry".to_string(), 80)
            ]
        );
        assert_eq!(plan.inserts, vec![("Mathematics".to_string(), 100)]);
        assert_eq!(plan.deletes, vec![3]);
    }

    #[test]
    fn test_plan_no_changes() {
        let existing = vec![row(1, "Physics", 100)];
        let plan = plan_subject_sync(&existing, &subjects(&[("Physics", 100)]));
        assert_eq!(plan, SubjectSyncPlan::default());
    }

    #[tokio::test]
    async fn test_create_exam_with_subjects() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let detail = storage
            .create_exam_impl(
                exam_draft("Mock 1", "realtime", Some("A")),
                subjects(&[("Physics", 100), ("Chemistry", 100)]),
                None,
            )
            .await
            .unwrap();

        assert_eq!(detail.subjects.len(), 2);
        let loaded = storage.get_exam_detail_impl(detail.exam.id).await.unwrap().unwrap();
        assert_eq!(loaded.subjects, detail.subjects);
        assert_eq!(loaded.question_count, 0);
    }

    #[tokio::test]
    async fn test_unique_index_rejects_duplicate_set_and_rolls_back() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_exam_impl(exam_draft("Mock 1", "realtime", Some("A")), vec![], None)
            .await
            .unwrap();

        let err = storage
            .create_exam_impl(
                exam_draft("Mock 1", "realtime", Some("A")),
                subjects(&[("Physics", 100)]),
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ExamAdminError::Conflict(_)));

        let all = storage
            .list_exams_impl(ExamListQuery::default())
            .await
            .unwrap();
        assert_eq!(all.pagination.total, 1);
        let orphan_subjects = ExamSubjects::find().count(&storage.db).await.unwrap();
        assert_eq!(orphan_subjects, 0);

        // 不同 set_type 可以共存
        storage
            .create_exam_impl(exam_draft("Mock 1", "realtime", Some("B")), vec![], None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_reconciles_subjects_exactly() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let created = storage
            .create_exam_impl(
                exam_draft("Mock 2", "practice", None),
                subjects(&[("Physics", 100), ("Chemistry", 100), ("Biology", 100)]),
                None,
            )
            .await
            .unwrap();
        let physics_id = created.subjects[0].id;

        let submitted = subjects(&[("Physics", 150), ("Mathematics", 150)]);
        let updated = storage
            .update_exam_impl(
                created.exam.id,
                exam_draft("Mock 2", "practice", None),
                Some(submitted),
            )
            .await
            .unwrap()
            .unwrap();

        let mut names: Vec<(String, i32)> = updated
            .subjects
            .iter()
            .map(|s| (s.subject.clone(), s.marks))
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![("Mathematics".to_string(), 150), ("Physics".to_string(), 150)]
        );
        // 匹配到的行保留原 id
        assert!(updated.subjects.iter().any(|s| s.id == physics_id));
    }

    #[tokio::test]
    async fn test_update_without_subjects_keeps_them() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let created = storage
            .create_exam_impl(
                exam_draft("Mock 3", "practice", None),
                subjects(&[("Physics", 100)]),
                None,
            )
            .await
            .unwrap();

        let mut draft = exam_draft("Mock 3 (revised)", "practice", None);
        draft.duration = 200;
        let updated = storage
            .update_exam_impl(created.exam.id, draft, None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.exam.title, "Mock 3 (revised)");
        assert_eq!(updated.exam.duration, 200);
        assert_eq!(updated.subjects, created.subjects);

        assert!(
            storage
                .update_exam_impl(9999, exam_draft("x", "practice", None), None)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_delete_cascades_and_sets() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let a = storage
            .create_exam_impl(
                exam_draft("Grand Test", "realtime", Some("A")),
                subjects(&[("Physics", 100)]),
                None,
            )
            .await
            .unwrap();
        storage
            .create_exam_impl(exam_draft("Grand Test", "realtime", Some("B")), vec![], None)
            .await
            .unwrap();

        let sets = storage.list_exam_sets_impl(&a.exam).await.unwrap();
        let set_types: Vec<_> = sets.iter().filter_map(|e| e.set_type.clone()).collect();
        assert_eq!(set_types, vec!["A".to_string(), "B".to_string()]);

        assert!(storage.delete_exam_impl(a.exam.id).await.unwrap());
        assert!(!storage.delete_exam_impl(a.exam.id).await.unwrap());
        let remaining_subjects = ExamSubjects::find().count(&storage.db).await.unwrap();
        assert_eq!(remaining_subjects, 0);
    }

    #[tokio::test]
    async fn test_list_filters_and_escaped_search() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_exam_impl(exam_draft("100% Physics", "practice", None), vec![], None)
            .await
            .unwrap();
        storage
            .create_exam_impl(exam_draft("Chemistry Drill", "practice", None), vec![], None)
            .await
            .unwrap();

        let found = storage
            .list_exams_impl(ExamListQuery {
                search: Some("100%".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.items.len(), 1);
        assert_eq!(found.items[0].title, "100% Physics");

        let by_category = storage
            .list_exams_impl(ExamListQuery {
                category: Some("realtime".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(by_category.items.is_empty());
    }
}
