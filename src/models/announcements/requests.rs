use serde::Deserialize;
use ts_rs::TS;

use super::entities::{Announcement, AnnouncementPriority, AnnouncementStatus, TargetAudience};
use crate::errors::{ExamAdminError, Result};
use crate::models::common::PaginationQuery;
use crate::utils::media_url::{normalize_media_url, normalize_video_url};

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/announcement.ts")]
pub struct AnnouncementListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<AnnouncementStatus>,
    pub priority: Option<AnnouncementPriority>,
    pub target_audience: Option<TargetAudience>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/announcement.ts")]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub content: String,
    pub announcement_type: Option<String>,
    pub media_url: Option<String>,
    pub video_url: Option<String>,
    pub priority: Option<AnnouncementPriority>,
    pub status: Option<AnnouncementStatus>,
    pub target_audience: Option<TargetAudience>,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/announcement.ts")]
pub struct UpdateAnnouncementRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub announcement_type: Option<String>,
    /// 传空字符串表示清除
    pub media_url: Option<String>,
    pub video_url: Option<String>,
    pub priority: Option<AnnouncementPriority>,
    pub status: Option<AnnouncementStatus>,
    pub target_audience: Option<TargetAudience>,
    /// 省略表示不变，显式 `null` 表示取消过期时间
    #[serde(default, deserialize_with = "deserialize_present")]
    #[ts(optional)]
    pub expires_at: Option<Option<chrono::DateTime<chrono::Utc>>>,
}

// 字段出现时（包括 null）包一层 Some，与字段缺失区分开
fn deserialize_present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// 存储层使用的公告数据，链接已规范化
#[derive(Debug, Clone)]
pub struct AnnouncementDraft {
    pub title: String,
    pub content: String,
    pub announcement_type: String,
    pub media_url: Option<String>,
    pub video_url: Option<String>,
    pub priority: AnnouncementPriority,
    pub status: AnnouncementStatus,
    pub target_audience: TargetAudience,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// 存储层使用的列表过滤条件
#[derive(Debug, Clone, Default)]
pub struct AnnouncementListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<AnnouncementStatus>,
    pub priority: Option<AnnouncementPriority>,
    pub target_audience: Option<TargetAudience>,
    pub search: Option<String>,
}

impl From<AnnouncementListParams> for AnnouncementListQuery {
    fn from(params: AnnouncementListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            status: params.status,
            priority: params.priority,
            target_audience: params.target_audience,
            search: params.search,
        }
    }
}

fn required_text(label: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ExamAdminError::validation(format!("{label} is required")));
    }
    Ok(value.to_string())
}

fn normalize_links(
    media_url: Option<&str>,
    video_url: Option<&str>,
) -> Result<(Option<String>, Option<String>)> {
    let media_url = match media_url {
        Some(raw) => normalize_media_url(raw)?,
        None => None,
    };
    let video_url = match video_url {
        Some(raw) => normalize_video_url(raw)?,
        None => None,
    };
    Ok((media_url, video_url))
}

impl CreateAnnouncementRequest {
    /// 校验必填项并规范化媒体链接
    pub fn into_draft(self) -> Result<AnnouncementDraft> {
        let (media_url, video_url) =
            normalize_links(self.media_url.as_deref(), self.video_url.as_deref())?;

        Ok(AnnouncementDraft {
            title: required_text("Title", &self.title)?,
            content: required_text("Content", &self.content)?,
            announcement_type: self
                .announcement_type
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "general".to_string()),
            media_url,
            video_url,
            priority: self.priority.unwrap_or(AnnouncementPriority::Normal),
            status: self.status.unwrap_or(AnnouncementStatus::Draft),
            target_audience: self.target_audience.unwrap_or(TargetAudience::All),
            expires_at: self.expires_at,
        })
    }
}

impl UpdateAnnouncementRequest {
    /// 以现有公告为底合并，链接字段传空串表示清除
    pub fn merge_into(self, existing: &Announcement) -> Result<AnnouncementDraft> {
        let media_url = match self.media_url.as_deref() {
            Some(raw) => normalize_media_url(raw)?,
            None => existing.media_url.clone(),
        };
        let video_url = match self.video_url.as_deref() {
            Some(raw) => normalize_video_url(raw)?,
            None => existing.video_url.clone(),
        };

        Ok(AnnouncementDraft {
            title: match self.title {
                Some(ref title) => required_text("Title", title)?,
                None => existing.title.clone(),
            },
            content: match self.content {
                Some(ref content) => required_text("Content", content)?,
                None => existing.content.clone(),
            },
            announcement_type: self
                .announcement_type
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| existing.announcement_type.clone()),
            media_url,
            video_url,
            priority: self.priority.unwrap_or(existing.priority),
            status: self.status.unwrap_or(existing.status),
            target_audience: self.target_audience.unwrap_or(existing.target_audience),
            expires_at: self.expires_at.unwrap_or(existing.expires_at),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(media_url: Option<&str>) -> CreateAnnouncementRequest {
        CreateAnnouncementRequest {
            title: " Results published ".into(),
            content: "Check the results page".into(),
            announcement_type: None,
            media_url: media_url.map(Into::into),
            video_url: None,
            priority: None,
            status: None,
            target_audience: None,
            expires_at: None,
        }
    }

    #[test]
    fn test_create_defaults_and_media_check() {
        let draft = create(Some("https://cdn.example.com/banner.png")).into_draft().unwrap();
        assert_eq!(draft.title, "Results published");
        assert_eq!(draft.announcement_type, "general");
        assert_eq!(draft.priority, AnnouncementPriority::Normal);
        assert_eq!(draft.target_audience, TargetAudience::All);

        assert!(create(Some("https://cdn.example.com/banner.bmp")).into_draft().is_err());
        assert_eq!(create(Some("  ")).into_draft().unwrap().media_url, None);
    }

    #[test]
    fn test_update_clears_and_keeps_links() {
        let now = chrono::Utc::now();
        let existing = Announcement {
            id: 1,
            title: "Old".into(),
            content: "Old content".into(),
            announcement_type: "exam".into(),
            media_url: Some("/uploads/media/1-a.png".into()),
            video_url: Some("https://youtu.be/abc".into()),
            priority: AnnouncementPriority::High,
            status: AnnouncementStatus::Published,
            target_audience: TargetAudience::Students,
            views: 5,
            expires_at: None,
            created_by: Some(1),
            created_at: now,
            updated_at: now,
        };

        let draft = UpdateAnnouncementRequest {
            media_url: Some(String::new()),
            ..Default::default()
        }
        .merge_into(&existing)
        .unwrap();
        assert_eq!(draft.media_url, None);
        assert_eq!(draft.video_url.as_deref(), Some("https://youtu.be/abc"));
        assert_eq!(draft.title, "Old");
        assert_eq!(draft.priority, AnnouncementPriority::High);

        let bad = UpdateAnnouncementRequest {
            title: Some("   ".into()),
            ..Default::default()
        };
        assert!(bad.merge_into(&existing).is_err());
    }

    #[test]
    fn test_update_expiry_null_clears_and_missing_keeps() {
        let now = chrono::Utc::now();
        let expires = now + chrono::Duration::days(3);
        let existing = Announcement {
            id: 2,
            title: "Hall tickets".into(),
            content: "Download from the portal".into(),
            announcement_type: "exam".into(),
            media_url: None,
            video_url: None,
            priority: AnnouncementPriority::Normal,
            status: AnnouncementStatus::Published,
            target_audience: TargetAudience::All,
            views: 0,
            expires_at: Some(expires),
            created_by: None,
            created_at: now,
            updated_at: now,
        };

        let keep: UpdateAnnouncementRequest =
            serde_json::from_value(serde_json::json!({ "title": "Hall tickets out" })).unwrap();
        assert!(keep.expires_at.is_none());
        assert_eq!(keep.merge_into(&existing).unwrap().expires_at, Some(expires));

        let clear: UpdateAnnouncementRequest =
            serde_json::from_value(serde_json::json!({ "expires_at": null })).unwrap();
        assert_eq!(clear.expires_at, Some(None));
        assert_eq!(clear.merge_into(&existing).unwrap().expires_at, None);

        let later = expires + chrono::Duration::days(1);
        let extend: UpdateAnnouncementRequest =
            serde_json::from_value(serde_json::json!({ "expires_at": later })).unwrap();
        assert_eq!(extend.merge_into(&existing).unwrap().expires_at, Some(later));
    }
}
