//! 题目实体

use sea_orm::entity::prelude::*;

use super::ts_to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub exam_id: i64,
    #[sea_orm(column_type = "Text")]
    pub question_text: String,
    pub question_type: String,
    pub difficulty: String,
    pub marks: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub explanation: Option<String>,
    pub subject: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::exams::Entity",
        from = "Column::ExamId",
        to = "super::exams::Column::Id",
        on_delete = "Cascade"
    )]
    Exam,
    #[sea_orm(has_many = "super::question_options::Entity")]
    QuestionOptions,
}

impl Related<super::exams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exam.def()
    }
}

impl Related<super::question_options::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuestionOptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 转换为业务模型，选项需按 option_order 排好序传入
    pub fn into_question(
        self,
        options: Vec<super::question_options::Model>,
    ) -> crate::models::questions::entities::Question {
        use crate::models::questions::entities::{Difficulty, Question, QuestionType};

        Question {
            id: self.id,
            exam_id: self.exam_id,
            question_text: self.question_text,
            question_type: QuestionType::from(self.question_type.as_str()),
            difficulty: self
                .difficulty
                .parse::<Difficulty>()
                .unwrap_or(Difficulty::Medium),
            marks: self.marks,
            explanation: self.explanation,
            subject: self.subject,
            options: options.into_iter().map(|o| o.into_option()).collect(),
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}
