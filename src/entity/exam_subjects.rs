//! 考试科目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exam_subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub exam_id: i64,
    pub subject: String,
    pub marks: i32,
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
    #[sea_orm(has_many = "super::student_exam_subjects::Entity")]
    StudentExamSubjects,
}

impl Related<super::exams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exam.def()
    }
}

impl Related<super::student_exam_subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentExamSubjects.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_exam_subject(self) -> crate::models::exams::entities::ExamSubject {
        crate::models::exams::entities::ExamSubject {
            id: self.id,
            exam_id: self.exam_id,
            subject: self.subject,
            marks: self.marks,
        }
    }
}
