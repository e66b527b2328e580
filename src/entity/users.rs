//! 用户实体

use sea_orm::entity::prelude::*;

use super::ts_to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: Option<String>,
    #[sea_orm(unique)]
    pub student_id: Option<String>,
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub region: Option<String>,
    pub college: Option<String>,
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::student_exams::Entity")]
    StudentExams,
    #[sea_orm(has_many = "super::previous_question_sets::Entity")]
    PreviousQuestionSets,
    #[sea_orm(has_many = "super::support_tickets::Entity")]
    SupportTickets,
}

impl Related<super::student_exams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentExams.def()
    }
}

impl Related<super::previous_question_sets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PreviousQuestionSets.def()
    }
}

impl Related<super::support_tickets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SupportTickets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        use crate::models::users::entities::{User, UserStatus};

        User {
            id: self.id,
            username: self.username,
            email: self.email,
            student_id: self.student_id,
            password_hash: self.password_hash,
            role: self.role,
            status: self
                .status
                .parse::<UserStatus>()
                .unwrap_or(UserStatus::Active),
            full_name: self.full_name,
            phone: self.phone,
            state: self.state,
            district: self.district,
            region: self.region,
            college: self.college,
            last_login: self.last_login.map(ts_to_datetime),
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}
