use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::exam_subjects::{Column as ExamSubjectColumn, Entity as ExamSubjects};
use crate::entity::exams::{Column as ExamColumn, Entity as Exams};
use crate::entity::student_exam_subjects::{
    ActiveModel as ScoreActiveModel, Column as ScoreColumn, Entity as StudentExamSubjects,
};
use crate::entity::student_exams::{
    self, ActiveModel as AttemptActiveModel, Column as AttemptColumn, Entity as StudentExams,
};
use crate::entity::ts_to_datetime;
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{ExamAdminError, Result};
use crate::models::{
    PaginationInfo,
    common::normalize_page,
    students::{
        entities::{AttemptStatus, StudentExamAttempt, StudentStats, SubjectScore},
        requests::{RecordAttemptRequest, StudentListQuery},
        responses::{StudentListResponse, StudentResponse},
    },
    users::entities::role_names,
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

// 按 (学生, 考试类型) 聚合的已完成考试
#[derive(Debug, FromQueryResult)]
struct AttemptAggregate {
    user_id: i64,
    exam_type: String,
    attempts: i64,
    percentage_sum: Option<f64>,
    percentage_count: i64,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// 把聚合行折叠为每个学生的统计；最常见的考试类型同次数时取字典序较小者
fn fold_stats(rows: Vec<AttemptAggregate>) -> HashMap<i64, StudentStats> {
    struct Acc {
        taken: i64,
        pct_sum: f64,
        pct_count: i64,
        preferred: Option<(String, i64)>,
    }

    let mut acc: HashMap<i64, Acc> = HashMap::new();
    for row in rows {
        let entry = acc.entry(row.user_id).or_insert(Acc {
            taken: 0,
            pct_sum: 0.0,
            pct_count: 0,
            preferred: None,
        });
        entry.taken += row.attempts;
        entry.pct_sum += row.percentage_sum.unwrap_or(0.0);
        entry.pct_count += row.percentage_count;

        let better = match &entry.preferred {
            None => true,
            Some((name, count)) => {
                row.attempts > *count || (row.attempts == *count && row.exam_type < *name)
            }
        };
        if better {
            entry.preferred = Some((row.exam_type, row.attempts));
        }
    }

    acc.into_iter()
        .map(|(user_id, a)| {
            let stats = StudentStats {
                exams_taken: a.taken,
                average_percentage: (a.pct_count > 0)
                    .then(|| round2(a.pct_sum / a.pct_count as f64)),
                preferred_exam_type: a.preferred.map(|(name, _)| name),
            };
            (user_id, stats)
        })
        .collect()
}

impl SeaOrmStorage {
    /// 一次聚合查询得到一批学生的统计
    async fn load_student_stats(&self, user_ids: &[i64]) -> Result<HashMap<i64, StudentStats>> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = StudentExams::find()
            .select_only()
            .column(AttemptColumn::UserId)
            .column_as(ExamColumn::ExamType, "exam_type")
            .column_as(AttemptColumn::Id.count(), "attempts")
            .column_as(AttemptColumn::Percentage.sum(), "percentage_sum")
            .column_as(AttemptColumn::Percentage.count(), "percentage_count")
            .join(JoinType::InnerJoin, student_exams::Relation::Exam.def())
            .filter(AttemptColumn::UserId.is_in(user_ids.to_vec()))
            .filter(AttemptColumn::Status.eq(AttemptStatus::Completed.to_string()))
            .group_by(AttemptColumn::UserId)
            .group_by(ExamColumn::ExamType)
            .into_model::<AttemptAggregate>()
            .all(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to aggregate student stats", e))?;

        Ok(fold_stats(rows))
    }

    /// 分页列出学生及统计
    pub async fn list_students_impl(&self, query: StudentListQuery) -> Result<StudentListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Users::find().filter(UserColumn::Role.eq(role_names::STUDENT));

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = search.trim();
            select = select.filter(
                Condition::any()
                    .add(UserColumn::Username.like(contains_pattern(pattern)))
                    .add(UserColumn::FullName.like(contains_pattern(pattern)))
                    .add(UserColumn::Email.like(contains_pattern(pattern)))
                    .add(UserColumn::StudentId.like(contains_pattern(pattern))),
            );
        }
        // 精确匹配过滤
        let exact = [
            (UserColumn::State, &query.state),
            (UserColumn::District, &query.district),
            (UserColumn::Region, &query.region),
            (UserColumn::College, &query.college),
        ];
        for (column, value) in exact {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                select = select.filter(column.eq(value));
            }
        }
        if let Some(status) = query.status {
            select = select.filter(UserColumn::Status.eq(status.to_string()));
        }

        select = select
            .order_by_desc(UserColumn::CreatedAt)
            .order_by_desc(UserColumn::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to count students", e))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to count student pages", e))?;
        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to list students", e))?;

        let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
        let mut stats = self.load_student_stats(&ids).await?;

        let items = users
            .into_iter()
            .map(|m| {
                let stats = stats.remove(&m.id).unwrap_or_default();
                StudentResponse {
                    user: m.into_user(),
                    stats,
                }
            })
            .collect();

        Ok(StudentListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn get_student_impl(&self, id: i64) -> Result<Option<StudentResponse>> {
        let user = Users::find_by_id(id)
            .filter(UserColumn::Role.eq(role_names::STUDENT))
            .one(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to query student", e))?;
        let Some(user) = user else {
            return Ok(None);
        };

        let stats = self
            .load_student_stats(&[id])
            .await?
            .remove(&id)
            .unwrap_or_default();

        Ok(Some(StudentResponse {
            user: user.into_user(),
            stats,
        }))
    }

    /// 删除学生，考试记录随外键级联删除
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_many()
            .filter(UserColumn::Id.eq(id))
            .filter(UserColumn::Role.eq(role_names::STUDENT))
            .exec(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to delete student", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 学生的全部考试记录，含分科得分
    pub async fn list_student_attempts_impl(&self, user_id: i64) -> Result<Vec<StudentExamAttempt>> {
        let attempts = StudentExams::find()
            .filter(AttemptColumn::UserId.eq(user_id))
            .order_by_desc(AttemptColumn::CreatedAt)
            .order_by_desc(AttemptColumn::Id)
            .find_also_related(Exams)
            .all(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to list student exams", e))?;

        self.assemble_attempts(attempts).await
    }

    async fn get_attempt(&self, user_id: i64, exam_id: i64) -> Result<Option<StudentExamAttempt>> {
        let attempts = StudentExams::find()
            .filter(AttemptColumn::UserId.eq(user_id))
            .filter(AttemptColumn::ExamId.eq(exam_id))
            .find_also_related(Exams)
            .all(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to query student exam", e))?;

        Ok(self.assemble_attempts(attempts).await?.into_iter().next())
    }

    async fn assemble_attempts(
        &self,
        attempts: Vec<(student_exams::Model, Option<crate::entity::exams::Model>)>,
    ) -> Result<Vec<StudentExamAttempt>> {
        if attempts.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = attempts.iter().map(|(a, _)| a.id).collect();
        let scores = StudentExamSubjects::find()
            .filter(ScoreColumn::StudentExamId.is_in(ids))
            .order_by_asc(ScoreColumn::ExamSubjectId)
            .find_also_related(ExamSubjects)
            .all(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to load subject scores", e))?;

        let mut grouped: HashMap<i64, Vec<SubjectScore>> = HashMap::new();
        for (score, subject) in scores {
            let Some(subject) = subject else { continue };
            grouped
                .entry(score.student_exam_id)
                .or_default()
                .push(SubjectScore {
                    exam_subject_id: subject.id,
                    subject: subject.subject,
                    marks: subject.marks,
                    score: score.score,
                });
        }

        Ok(attempts
            .into_iter()
            .map(|(attempt, exam)| {
                let (exam_title, exam_type) = exam
                    .map(|e| (e.title, e.exam_type))
                    .unwrap_or_default();
                StudentExamAttempt {
                    id: attempt.id,
                    user_id: attempt.user_id,
                    exam_id: attempt.exam_id,
                    exam_title,
                    exam_type,
                    status: attempt
                        .status
                        .parse::<AttemptStatus>()
                        .unwrap_or(AttemptStatus::Registered),
                    score: attempt.score,
                    percentage: attempt.percentage,
                    started_at: attempt.started_at.map(ts_to_datetime),
                    completed_at: attempt.completed_at.map(ts_to_datetime),
                    subject_scores: grouped.remove(&attempt.id).unwrap_or_default(),
                }
            })
            .collect())
    }

    /// 报名：(user_id, exam_id) 已存在时返回原记录
    pub async fn register_student_exam_impl(
        &self,
        user_id: i64,
        exam_id: i64,
    ) -> Result<StudentExamAttempt> {
        if let Some(existing) = self.get_attempt(user_id, exam_id).await? {
            return Ok(existing);
        }

        let now = chrono::Utc::now().timestamp();
        let inserted = AttemptActiveModel {
            user_id: Set(user_id),
            exam_id: Set(exam_id),
            status: Set(AttemptStatus::Registered.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| ExamAdminError::from_db("Failed to register student exam", e));

        match inserted {
            Ok(_) => {}
            // 并发报名撞上唯一索引，读回已有记录
            Err(ExamAdminError::Conflict(_)) => {}
            Err(e) => return Err(e),
        }

        self.get_attempt(user_id, exam_id)
            .await?
            .ok_or_else(|| ExamAdminError::database_operation("Registered exam not found"))
    }

    /// 记录考试结果，考试不存在时返回 None
    ///
    /// 百分比按考试总分计算；状态首次变为 completed 时写入 completed_at。
    /// 提交了分科得分时整体替换原有分科记录，未给总分则取分科之和。
    pub async fn record_student_exam_impl(
        &self,
        user_id: i64,
        exam_id: i64,
        record: RecordAttemptRequest,
    ) -> Result<Option<StudentExamAttempt>> {
        let Some(exam) = Exams::find_by_id(exam_id)
            .one(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to query exam", e))?
        else {
            return Ok(None);
        };

        let subjects: HashMap<i64, i32> = ExamSubjects::find()
            .filter(ExamSubjectColumn::ExamId.eq(exam_id))
            .all(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to load exam subjects", e))?
            .into_iter()
            .map(|s| (s.id, s.marks))
            .collect();

        let mut seen = std::collections::HashSet::new();
        for input in &record.subject_scores {
            let Some(marks) = subjects.get(&input.exam_subject_id) else {
                return Err(ExamAdminError::validation(format!(
                    "Subject {} does not belong to exam {exam_id}",
                    input.exam_subject_id
                )));
            };
            if !seen.insert(input.exam_subject_id) {
                return Err(ExamAdminError::validation(format!(
                    "Duplicate score for subject {}",
                    input.exam_subject_id
                )));
            }
            if input.score < 0.0 || input.score > *marks as f64 {
                return Err(ExamAdminError::validation(format!(
                    "Score for subject {} must be between 0 and {marks}",
                    input.exam_subject_id
                )));
            }
        }

        let score = record.score.or_else(|| {
            (!record.subject_scores.is_empty())
                .then(|| record.subject_scores.iter().map(|s| s.score).sum())
        });
        if let Some(score) = score
            && (score < 0.0 || score > exam.total_marks as f64)
        {
            return Err(ExamAdminError::validation(format!(
                "Score must be between 0 and {}",
                exam.total_marks
            )));
        }
        let percentage = score
            .filter(|_| exam.total_marks > 0)
            .map(|s| round2(s / exam.total_marks as f64 * 100.0));

        let existing = StudentExams::find()
            .filter(AttemptColumn::UserId.eq(user_id))
            .filter(AttemptColumn::ExamId.eq(exam_id))
            .one(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to query student exam", e))?;

        let now = chrono::Utc::now().timestamp();
        let started_at = match record.status {
            AttemptStatus::InProgress | AttemptStatus::Completed => existing
                .as_ref()
                .and_then(|e| e.started_at)
                .or(Some(now)),
            _ => existing.as_ref().and_then(|e| e.started_at),
        };
        let completed_at = match record.status {
            AttemptStatus::Completed => existing
                .as_ref()
                .and_then(|e| e.completed_at)
                .or(Some(now)),
            _ => None,
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to begin transaction", e))?;

        let attempt_id = match existing {
            Some(row) => {
                AttemptActiveModel {
                    id: Set(row.id),
                    status: Set(record.status.to_string()),
                    score: Set(score),
                    percentage: Set(percentage),
                    started_at: Set(started_at),
                    completed_at: Set(completed_at),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .update(&txn)
                .await
                .map_err(|e| ExamAdminError::from_db("Failed to update student exam", e))?;
                row.id
            }
            None => {
                AttemptActiveModel {
                    user_id: Set(user_id),
                    exam_id: Set(exam_id),
                    status: Set(record.status.to_string()),
                    score: Set(score),
                    percentage: Set(percentage),
                    started_at: Set(started_at),
                    completed_at: Set(completed_at),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|e| ExamAdminError::from_db("Failed to record student exam", e))?
                .id
            }
        };

        if !record.subject_scores.is_empty() {
            StudentExamSubjects::delete_many()
                .filter(ScoreColumn::StudentExamId.eq(attempt_id))
                .exec(&txn)
                .await
                .map_err(|e| ExamAdminError::from_db("Failed to clear subject scores", e))?;
            for input in &record.subject_scores {
                ScoreActiveModel {
                    student_exam_id: Set(attempt_id),
                    exam_subject_id: Set(input.exam_subject_id),
                    score: Set(input.score),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|e| ExamAdminError::from_db("Failed to record subject score", e))?;
            }
        }

        txn.commit()
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to commit student exam", e))?;

        self.get_attempt(user_id, exam_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::requests::SubjectScoreInput;
    use crate::test_support::{exam_draft, new_student, subjects};

    fn completed(score: f64) -> RecordAttemptRequest {
        RecordAttemptRequest {
            status: AttemptStatus::Completed,
            score: Some(score),
            subject_scores: vec![],
        }
    }

    #[test]
    fn test_fold_stats_prefers_most_common_type() {
        let rows = vec![
            AttemptAggregate {
                user_id: 1,
                exam_type: "NEET".into(),
                attempts: 2,
                percentage_sum: Some(150.0),
                percentage_count: 2,
            },
            AttemptAggregate {
                user_id: 1,
                exam_type: "IIT".into(),
                attempts: 2,
                percentage_sum: Some(90.0),
                percentage_count: 2,
            },
            AttemptAggregate {
                user_id: 1,
                exam_type: "KEAM".into(),
                attempts: 1,
                percentage_sum: None,
                percentage_count: 0,
            },
        ];
        let stats = fold_stats(rows).remove(&1).unwrap();
        assert_eq!(stats.exams_taken, 5);
        assert_eq!(stats.average_percentage, Some(60.0));
        assert_eq!(stats.preferred_exam_type.as_deref(), Some("IIT"));
    }

    #[tokio::test]
    async fn test_stats_and_filters() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let asha = storage
            .create_user_impl(new_student("asha01", "STU-001"))
            .await
            .unwrap();
        let mut other = new_student("ravi02", "STU-002");
        other.state = Some("Tamil Nadu".into());
        storage.create_user_impl(other).await.unwrap();

        let exam = storage
            .create_exam_impl(exam_draft("Mock", "practice", None), vec![], None)
            .await
            .unwrap();
        storage
            .record_student_exam_impl(asha.id, exam.exam.id, completed(150.0))
            .await
            .unwrap()
            .unwrap();

        let kerala = storage
            .list_students_impl(StudentListQuery {
                state: Some("Kerala".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(kerala.pagination.total, 1);
        let item = &kerala.items[0];
        assert_eq!(item.user.id, asha.id);
        assert_eq!(item.stats.exams_taken, 1);
        assert_eq!(item.stats.average_percentage, Some(50.0));
        assert_eq!(item.stats.preferred_exam_type.as_deref(), Some("IIT"));

        let searched = storage
            .list_students_impl(StudentListQuery {
                search: Some("STU-002".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(searched.items.len(), 1);
        assert_eq!(searched.items[0].stats, StudentStats::default());
    }

    #[tokio::test]
    async fn test_registration_is_idempotent() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let user = storage
            .create_user_impl(new_student("asha01", "STU-001"))
            .await
            .unwrap();
        let exam = storage
            .create_exam_impl(exam_draft("Mock", "practice", None), vec![], None)
            .await
            .unwrap();

        let first = storage
            .register_student_exam_impl(user.id, exam.exam.id)
            .await
            .unwrap();
        let second = storage
            .register_student_exam_impl(user.id, exam.exam.id)
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.status, AttemptStatus::Registered);
        assert_eq!(storage.list_student_attempts_impl(user.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_record_with_subject_scores() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let user = storage
            .create_user_impl(new_student("asha01", "STU-001"))
            .await
            .unwrap();
        let exam = storage
            .create_exam_impl(
                exam_draft("Mock", "practice", None),
                subjects(&[("Physics", 100), ("Chemistry", 100), ("Mathematics", 100)]),
                None,
            )
            .await
            .unwrap();
        let ids: Vec<i64> = exam.subjects.iter().map(|s| s.id).collect();

        let record = RecordAttemptRequest {
            status: AttemptStatus::Completed,
            score: None,
            subject_scores: vec![
                SubjectScoreInput { exam_subject_id: ids[0], score: 80.0 },
                SubjectScoreInput { exam_subject_id: ids[1], score: 70.0 },
                SubjectScoreInput { exam_subject_id: ids[2], score: 90.0 },
            ],
        };
        let attempt = storage
            .record_student_exam_impl(user.id, exam.exam.id, record)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(attempt.score, Some(240.0));
        assert_eq!(attempt.percentage, Some(80.0));
        assert!(attempt.completed_at.is_some());
        assert!(attempt.started_at.is_some());
        assert_eq!(attempt.subject_scores.len(), 3);

        // 分科不属于该考试
        let bad = RecordAttemptRequest {
            status: AttemptStatus::Completed,
            score: None,
            subject_scores: vec![SubjectScoreInput { exam_subject_id: 9999, score: 1.0 }],
        };
        let err = storage
            .record_student_exam_impl(user.id, exam.exam.id, bad)
            .await
            .unwrap_err();
        assert!(matches!(err, ExamAdminError::Validation(_)));

        // 删除科目后分科成绩随之删除
        storage
            .update_exam_impl(
                exam.exam.id,
                exam_draft("Mock", "practice", None),
                Some(subjects(&[("Physics", 100)])),
            )
            .await
            .unwrap();
        let attempts = storage.list_student_attempts_impl(user.id).await.unwrap();
        assert_eq!(attempts[0].subject_scores.len(), 1);
        assert_eq!(attempts[0].subject_scores[0].subject, "Physics");
    }

    #[tokio::test]
    async fn test_record_rejects_score_above_total_and_missing_exam() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let user = storage
            .create_user_impl(new_student("asha01", "STU-001"))
            .await
            .unwrap();
        let exam = storage
            .create_exam_impl(exam_draft("Mock", "practice", None), vec![], None)
            .await
            .unwrap();

        let err = storage
            .record_student_exam_impl(user.id, exam.exam.id, completed(301.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ExamAdminError::Validation(_)));

        assert!(
            storage
                .record_student_exam_impl(user.id, 777, completed(1.0))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_delete_student_only_touches_students() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let admin = crate::test_support::create_user_with_role(&storage, "staff01", role_names::ADMIN).await;
        assert!(!storage.delete_student_impl(admin.id).await.unwrap());
        assert!(storage.get_student_impl(admin.id).await.unwrap().is_none());

        let student = storage
            .create_user_impl(new_student("asha01", "STU-001"))
            .await
            .unwrap();
        assert!(storage.delete_student_impl(student.id).await.unwrap());
    }
}
