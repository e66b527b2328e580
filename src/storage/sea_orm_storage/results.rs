use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::exam_subjects::{Column as ExamSubjectColumn, Entity as ExamSubjects};
use crate::entity::exams::Column as ExamColumn;
use crate::entity::student_exams::{self, Column as AttemptColumn, Entity as StudentExams};
use crate::entity::ts_to_datetime;
use crate::entity::users::Column as UserColumn;
use crate::errors::{ExamAdminError, Result};
use crate::models::results::{
    entities::{ExamResultSummary, ResultRow},
    requests::ResultsWindow,
};
use crate::models::students::entities::AttemptStatus;
use crate::utils::subject_label::subject_label;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Select,
};

// 四个维度的排名，都按分数降序，同分同名次
const EXAM_RANK: &str =
    "RANK() OVER (PARTITION BY student_exams.exam_id ORDER BY student_exams.score DESC)";
const STATE_RANK: &str = "RANK() OVER (PARTITION BY student_exams.exam_id, users.state ORDER BY student_exams.score DESC)";
const DISTRICT_RANK: &str = "RANK() OVER (PARTITION BY student_exams.exam_id, users.state, users.district ORDER BY student_exams.score DESC)";
const OVERALL_RANK: &str = "RANK() OVER (ORDER BY student_exams.score DESC)";

#[derive(Debug, FromQueryResult)]
struct RankedRow {
    student_exam_id: i64,
    user_id: i64,
    username: String,
    student_name: Option<String>,
    student_id: Option<String>,
    state: Option<String>,
    district: Option<String>,
    exam_id: i64,
    exam_title: String,
    exam_type: String,
    exam_format: String,
    total_marks: i32,
    score: f64,
    percentage: Option<f64>,
    completed_at: Option<i64>,
    exam_rank: i64,
    state_rank: i64,
    district_rank: i64,
    overall_rank: i64,
}

#[derive(Debug, FromQueryResult)]
struct SummaryRow {
    exam_id: i64,
    exam_title: String,
    exam_type: String,
    attempts: i64,
    average_score: Option<f64>,
    highest_score: Option<f64>,
    lowest_score: Option<f64>,
    average_percentage: Option<f64>,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// 已完成且有分数的考试记录，按时间窗口与考试过滤
fn completed_in_window(window: &ResultsWindow) -> Select<StudentExams> {
    let mut select = StudentExams::find()
        .filter(AttemptColumn::Status.eq(AttemptStatus::Completed.to_string()))
        .filter(AttemptColumn::Score.is_not_null());

    if let Some(from) = window.from_ts {
        select = select.filter(AttemptColumn::CompletedAt.gte(from));
    }
    if let Some(to) = window.to_ts {
        select = select.filter(AttemptColumn::CompletedAt.lt(to));
    }
    if let Some(exam_id) = window.exam_id {
        select = select.filter(AttemptColumn::ExamId.eq(exam_id));
    }
    select
}

impl SeaOrmStorage {
    /// 成绩列表，排名在时间窗口与考试过滤后的集合上计算
    pub async fn list_results_impl(&self, window: ResultsWindow) -> Result<Vec<ResultRow>> {
        let rows = completed_in_window(&window)
            .select_only()
            .column_as(AttemptColumn::Id, "student_exam_id")
            .column(AttemptColumn::UserId)
            .column_as(UserColumn::Username, "username")
            .column_as(UserColumn::FullName, "student_name")
            .column_as(UserColumn::StudentId, "student_id")
            .column_as(UserColumn::State, "state")
            .column_as(UserColumn::District, "district")
            .column(AttemptColumn::ExamId)
            .column_as(ExamColumn::Title, "exam_title")
            .column_as(ExamColumn::ExamType, "exam_type")
            .column_as(ExamColumn::ExamFormat, "exam_format")
            .column_as(ExamColumn::TotalMarks, "total_marks")
            .column(AttemptColumn::Score)
            .column(AttemptColumn::Percentage)
            .column(AttemptColumn::CompletedAt)
            .column_as(Expr::cust(EXAM_RANK), "exam_rank")
            .column_as(Expr::cust(STATE_RANK), "state_rank")
            .column_as(Expr::cust(DISTRICT_RANK), "district_rank")
            .column_as(Expr::cust(OVERALL_RANK), "overall_rank")
            .join(JoinType::InnerJoin, student_exams::Relation::User.def())
            .join(JoinType::InnerJoin, student_exams::Relation::Exam.def())
            .order_by_desc(AttemptColumn::Score)
            .order_by_asc(AttemptColumn::Id)
            .into_model::<RankedRow>()
            .all(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to query results", e))?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut exam_ids: Vec<i64> = rows.iter().map(|r| r.exam_id).collect();
        exam_ids.sort_unstable();
        exam_ids.dedup();

        let mut subjects: HashMap<i64, Vec<String>> = HashMap::new();
        for subject in ExamSubjects::find()
            .filter(ExamSubjectColumn::ExamId.is_in(exam_ids))
            .order_by_asc(ExamSubjectColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to load exam subjects", e))?
        {
            subjects.entry(subject.exam_id).or_default().push(subject.subject);
        }

        Ok(rows
            .into_iter()
            .map(|r| {
                let names = subjects.get(&r.exam_id).map(Vec::as_slice).unwrap_or(&[]);
                ResultRow {
                    subject: subject_label(names, &r.exam_format, &r.exam_title),
                    student_exam_id: r.student_exam_id,
                    user_id: r.user_id,
                    username: r.username,
                    student_name: r.student_name,
                    student_id: r.student_id,
                    state: r.state,
                    district: r.district,
                    exam_id: r.exam_id,
                    exam_title: r.exam_title,
                    exam_type: r.exam_type,
                    exam_format: r.exam_format,
                    total_marks: r.total_marks,
                    score: r.score,
                    percentage: r.percentage,
                    completed_at: r.completed_at.map(ts_to_datetime),
                    exam_rank: r.exam_rank,
                    state_rank: r.state_rank,
                    district_rank: r.district_rank,
                    overall_rank: r.overall_rank,
                }
            })
            .collect())
    }

    /// 每场考试的人数、平均分、最高分、最低分与平均百分比
    pub async fn summarize_results_impl(
        &self,
        window: ResultsWindow,
    ) -> Result<Vec<ExamResultSummary>> {
        let rows = completed_in_window(&window)
            .select_only()
            .column(AttemptColumn::ExamId)
            .column_as(ExamColumn::Title, "exam_title")
            .column_as(ExamColumn::ExamType, "exam_type")
            .column_as(AttemptColumn::Id.count(), "attempts")
            .column_as(Expr::cust("AVG(student_exams.score)"), "average_score")
            .column_as(AttemptColumn::Score.max(), "highest_score")
            .column_as(AttemptColumn::Score.min(), "lowest_score")
            .column_as(Expr::cust("AVG(student_exams.percentage)"), "average_percentage")
            .join(JoinType::InnerJoin, student_exams::Relation::Exam.def())
            .group_by(AttemptColumn::ExamId)
            .group_by(ExamColumn::Title)
            .group_by(ExamColumn::ExamType)
            .order_by_asc(AttemptColumn::ExamId)
            .into_model::<SummaryRow>()
            .all(&self.db)
            .await
            .map_err(|e| ExamAdminError::from_db("Failed to summarize results", e))?;

        Ok(rows
            .into_iter()
            .map(|r| ExamResultSummary {
                exam_id: r.exam_id,
                exam_title: r.exam_title,
                exam_type: r.exam_type,
                attempts: r.attempts,
                average_score: r.average_score.map(round2),
                highest_score: r.highest_score,
                lowest_score: r.lowest_score,
                average_percentage: r.average_percentage.map(round2),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::requests::RecordAttemptRequest;
    use crate::test_support::{exam_draft, new_student, subjects};

    async fn student(storage: &SeaOrmStorage, name: &str, state: &str, district: &str) -> i64 {
        let mut user = new_student(name, &format!("ID-{name}"));
        user.state = Some(state.into());
        user.district = Some(district.into());
        storage.create_user_impl(user).await.unwrap().id
    }

    async fn complete(storage: &SeaOrmStorage, user_id: i64, exam_id: i64, score: f64) {
        storage
            .record_student_exam_impl(
                user_id,
                exam_id,
                RecordAttemptRequest {
                    status: AttemptStatus::Completed,
                    score: Some(score),
                    subject_scores: vec![],
                },
            )
            .await
            .unwrap()
            .unwrap();
    }

    fn rank_of(rows: &[ResultRow], user_id: i64, exam_id: i64) -> &ResultRow {
        rows.iter()
            .find(|r| r.user_id == user_id && r.exam_id == exam_id)
            .unwrap()
    }

    #[tokio::test]
    async fn test_competition_ranking_per_partition() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let exam = storage
            .create_exam_impl(
                exam_draft("JEE Grand Test", "practice", None),
                subjects(&[("Physics", 100), ("Chemistry", 100), ("Mathematics", 100)]),
                None,
            )
            .await
            .unwrap()
            .exam
            .id;

        let a = student(&storage, "anu01", "Kerala", "Ernakulam").await;
        let b = student(&storage, "biju02", "Kerala", "Ernakulam").await;
        let c = student(&storage, "chitra03", "Kerala", "Kollam").await;
        let d = student(&storage, "devi04", "Tamil Nadu", "Chennai").await;

        complete(&storage, a, exam, 250.0).await;
        complete(&storage, b, exam, 200.0).await;
        complete(&storage, c, exam, 250.0).await;
        complete(&storage, d, exam, 180.0).await;
        // 仅报名的记录不参与排名
        let e = student(&storage, "eby05", "Kerala", "Kollam").await;
        storage.register_student_exam_impl(e, exam).await.unwrap();

        let rows = storage
            .list_results_impl(ResultsWindow::default())
            .await
            .unwrap();
        assert_eq!(rows.len(), 4);

        let ranks: Vec<i64> = rows.iter().map(|r| r.exam_rank).collect();
        assert_eq!(ranks, vec![1, 1, 3, 4]);

        assert_eq!(rank_of(&rows, b, exam).state_rank, 3);
        assert_eq!(rank_of(&rows, d, exam).state_rank, 1);
        assert_eq!(rank_of(&rows, b, exam).district_rank, 2);
        assert_eq!(rank_of(&rows, c, exam).district_rank, 1);
        assert_eq!(rank_of(&rows, d, exam).overall_rank, 4);
        assert_eq!(rows[0].subject, "Physics, Chemistry, Mathematics");
    }

    #[tokio::test]
    async fn test_window_and_exam_filters_change_rank_basis() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let first = storage
            .create_exam_impl(exam_draft("PCM Test", "practice", None), vec![], None)
            .await
            .unwrap()
            .exam
            .id;
        let second = storage
            .create_exam_impl(exam_draft("Second Test", "practice", None), vec![], None)
            .await
            .unwrap()
            .exam
            .id;

        let a = student(&storage, "anu01", "Kerala", "Ernakulam").await;
        let b = student(&storage, "biju02", "Kerala", "Ernakulam").await;
        complete(&storage, a, first, 100.0).await;
        complete(&storage, b, second, 200.0).await;

        // 把第二场的完成时间移到 2024 年
        StudentExams::update_many()
            .col_expr(AttemptColumn::CompletedAt, Expr::value(1_704_067_200_i64))
            .filter(AttemptColumn::ExamId.eq(second))
            .exec(&storage.db)
            .await
            .unwrap();

        let all = storage
            .list_results_impl(ResultsWindow::default())
            .await
            .unwrap();
        assert_eq!(rank_of(&all, a, first).overall_rank, 2);
        assert_eq!(rank_of(&all, a, first).subject, "PCM");

        let recent = storage
            .list_results_impl(ResultsWindow {
                from_ts: Some(1_735_689_600),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].overall_rank, 1);

        let only_second = storage
            .list_results_impl(ResultsWindow {
                exam_id: Some(second),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(only_second.len(), 1);
        assert_eq!(only_second[0].user_id, b);
    }

    #[tokio::test]
    async fn test_summary_aggregates() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let exam = storage
            .create_exam_impl(exam_draft("Mock", "practice", None), vec![], None)
            .await
            .unwrap()
            .exam
            .id;
        let a = student(&storage, "anu01", "Kerala", "Ernakulam").await;
        let b = student(&storage, "biju02", "Kerala", "Kollam").await;
        complete(&storage, a, exam, 240.0).await;
        complete(&storage, b, exam, 150.0).await;

        let summary = storage
            .summarize_results_impl(ResultsWindow::default())
            .await
            .unwrap();
        assert_eq!(summary.len(), 1);
        let s = &summary[0];
        assert_eq!(s.attempts, 2);
        assert_eq!(s.average_score, Some(195.0));
        assert_eq!(s.highest_score, Some(240.0));
        assert_eq!(s.lowest_score, Some(150.0));
        assert_eq!(s.average_percentage, Some(65.0));
    }
}
