// Dashboard domain model
use super::announcement::AnnouncementRecord;
use super::class::ClassRecord;
use super::schedule::WeeklySchedule;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_DISPLAY_NAME: &str = "YMCA of Saskatoon";
pub const DEFAULT_ANNOUNCEMENT_ROTATION_SECONDS: u64 = 4;
pub const DEFAULT_MEDIA_ROTATION_SECONDS: u64 = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    #[serde(rename = "gymName")]
    pub display_name: String,
    #[serde(rename = "rotationSpeed")]
    pub announcement_rotation_seconds: u64,
    #[serde(rename = "mediaRotationSpeed")]
    pub media_rotation_seconds: u64,
    /// Keys this service does not interpret, carried through to the document
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            announcement_rotation_seconds: DEFAULT_ANNOUNCEMENT_ROTATION_SECONDS,
            media_rotation_seconds: DEFAULT_MEDIA_ROTATION_SECONDS,
            extra: Map::new(),
        }
    }
}

/// Settings as they appear in a stored document: every key optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsPatch {
    #[serde(rename = "gymName", alias = "displayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(
        rename = "rotationSpeed",
        alias = "announcementRotationSeconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub announcement_rotation_seconds: Option<u64>,
    #[serde(
        rename = "mediaRotationSpeed",
        alias = "mediaRotationSeconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub media_rotation_seconds: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Settings {
    /// Shallow key-wise union: keys present in the patch win.
    pub fn merged(&self, patch: &SettingsPatch) -> Self {
        let mut extra = self.extra.clone();
        extra.extend(patch.extra.iter().map(|(k, v)| (k.clone(), v.clone())));

        Self {
            display_name: patch
                .display_name
                .clone()
                .unwrap_or_else(|| self.display_name.clone()),
            announcement_rotation_seconds: patch
                .announcement_rotation_seconds
                .unwrap_or(self.announcement_rotation_seconds),
            media_rotation_seconds: patch
                .media_rotation_seconds
                .unwrap_or(self.media_rotation_seconds),
            extra,
        }
    }

    pub fn to_patch(&self) -> SettingsPatch {
        SettingsPatch {
            display_name: Some(self.display_name.clone()),
            announcement_rotation_seconds: Some(self.announcement_rotation_seconds),
            media_rotation_seconds: Some(self.media_rotation_seconds),
            extra: self.extra.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MediaKind {
    Image,
    Video,
    EmbeddedVideo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub src: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardState {
    pub settings: Settings,
    pub media: Vec<MediaItem>,
    pub weekly_schedule: WeeklySchedule,
    pub classes: Vec<ClassRecord>,
    pub announcements: Vec<AnnouncementRecord>,
}

impl DashboardState {
    pub fn class_mut(&mut self, id: &str) -> Option<&mut ClassRecord> {
        self.classes.iter_mut().find(|c| c.id == id)
    }

    pub fn admin_classes(&self) -> impl Iterator<Item = &ClassRecord> {
        self.classes.iter().filter(|c| !c.from_schedule)
    }

    pub fn admin_announcements(&self) -> impl Iterator<Item = &AnnouncementRecord> {
        self.announcements.iter().filter(|a| !a.permanent)
    }
}
