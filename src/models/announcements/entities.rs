use serde::{Deserialize, Serialize};
use ts_rs::TS;

macro_rules! string_enum {
    ($name:ident, { $($variant:ident => $text:literal),* $(,)? }) => {
        #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
        #[serde(rename_all = "snake_case")]
        #[ts(export, export_to = "../frontend/src/types/generated/announcement.ts")]
        pub enum $name {
            $($variant,)*
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $($name::$variant => f.write_str($text),)*
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)*
                    _ => Err(format!("Invalid {}: {s}", stringify!($name))),
                }
            }
        }
    };
}

string_enum!(AnnouncementPriority, {
    Low => "low",
    Normal => "normal",
    High => "high",
    Urgent => "urgent",
});

string_enum!(AnnouncementStatus, {
    Draft => "draft",
    Published => "published",
    Archived => "archived",
});

string_enum!(TargetAudience, {
    All => "all",
    Students => "students",
    Admins => "admins",
});

impl TargetAudience {
    /// 某个角色可见的受众范围
    pub fn visible_to(role: &str) -> [TargetAudience; 2] {
        if role == crate::models::users::entities::role_names::STUDENT {
            [TargetAudience::All, TargetAudience::Students]
        } else {
            [TargetAudience::All, TargetAudience::Admins]
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/announcement.ts")]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub announcement_type: String,
    pub media_url: Option<String>,
    pub video_url: Option<String>,
    pub priority: AnnouncementPriority,
    pub status: AnnouncementStatus,
    pub target_audience: TargetAudience,
    pub views: i64,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
