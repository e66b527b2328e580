//! 学生分科成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_exam_subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_exam_id: i64,
    pub exam_subject_id: i64,
    pub score: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student_exams::Entity",
        from = "Column::StudentExamId",
        to = "super::student_exams::Column::Id",
        on_delete = "Cascade"
    )]
    StudentExam,
    #[sea_orm(
        belongs_to = "super::exam_subjects::Entity",
        from = "Column::ExamSubjectId",
        to = "super::exam_subjects::Column::Id",
        on_delete = "Cascade"
    )]
    ExamSubject,
}

impl Related<super::student_exams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentExam.def()
    }
}

impl Related<super::exam_subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamSubject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
