//! 历年真题实体

use sea_orm::entity::prelude::*;

use super::ts_to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "previous_question_sets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course: String,
    pub subject_mode: String,
    /// JSON 数组文本
    #[sea_orm(column_type = "Text")]
    pub subjects: String,
    pub exam_conducted_on: Option<String>,
    pub resource_url: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub uploaded_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UploadedBy",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Uploader,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Uploader.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_previous_question_set(
        self,
    ) -> crate::models::previous_questions::entities::PreviousQuestionSet {
        use crate::models::previous_questions::entities::{PreviousQuestionSet, SubjectMode};

        PreviousQuestionSet {
            id: self.id,
            course: self.course,
            subject_mode: self
                .subject_mode
                .parse::<SubjectMode>()
                .unwrap_or(SubjectMode::Single),
            subjects: serde_json::from_str(&self.subjects).unwrap_or_default(),
            exam_conducted_on: self.exam_conducted_on,
            resource_url: self.resource_url,
            notes: self.notes,
            uploaded_by: self.uploaded_by,
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}
