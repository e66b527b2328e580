//! 公告实体

use sea_orm::entity::prelude::*;

use super::ts_to_datetime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "announcements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub announcement_type: String,
    pub media_url: Option<String>,
    pub video_url: Option<String>,
    pub priority: String,
    pub status: String,
    pub target_audience: String,
    pub views: i64,
    pub expires_at: Option<i64>,
    pub created_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_announcement(self) -> crate::models::announcements::entities::Announcement {
        use crate::models::announcements::entities::{
            Announcement, AnnouncementPriority, AnnouncementStatus, TargetAudience,
        };

        Announcement {
            id: self.id,
            title: self.title,
            content: self.content,
            announcement_type: self.announcement_type,
            media_url: self.media_url,
            video_url: self.video_url,
            priority: self
                .priority
                .parse::<AnnouncementPriority>()
                .unwrap_or(AnnouncementPriority::Normal),
            status: self
                .status
                .parse::<AnnouncementStatus>()
                .unwrap_or(AnnouncementStatus::Draft),
            target_audience: self
                .target_audience
                .parse::<TargetAudience>()
                .unwrap_or(TargetAudience::All),
            views: self.views,
            expires_at: self.expires_at.map(ts_to_datetime),
            created_by: self.created_by,
            created_at: ts_to_datetime(self.created_at),
            updated_at: ts_to_datetime(self.updated_at),
        }
    }
}
