//! 考试实体

use sea_orm::entity::prelude::*;

use super::ts_to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub exam_type: String,
    pub exam_format: String,
    pub total_marks: i32,
    pub duration: i32,
    pub start_date: String,
    pub start_time: Option<String>,
    pub venue: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub status: String,
    pub category: String,
    pub set_type: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::exam_subjects::Entity")]
    ExamSubjects,
    #[sea_orm(has_many = "super::questions::Entity")]
    Questions,
    #[sea_orm(has_many = "super::student_exams::Entity")]
    StudentExams,
}

impl Related<super::exam_subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamSubjects.def()
    }
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Questions.def()
    }
}

impl Related<super::student_exams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentExams.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_exam(self) -> crate::models::exams::entities::Exam {
        use crate::models::exams::entities::{Exam, ExamFormat, ExamStatus};

        Exam {
            id: self.id,
            title: self.title,
            exam_type: self.exam_type,
            exam_format: self
                .exam_format
                .parse::<ExamFormat>()
                .unwrap_or(ExamFormat::Single),
            total_marks: self.total_marks,
            duration: self.duration,
            start_date: self.start_date,
            start_time: self.start_time,
            venue: self.venue,
            description: self.description,
            status: self.status.parse::<ExamStatus>().unwrap_or(ExamStatus::Draft),
            category: self.category,
            set_type: self.set_type,
            created_by: self.created_by,
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}
