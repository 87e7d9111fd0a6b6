// Class record domain model
use super::record_id::{deserialize_id, Record};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub cancelled: bool,
    /// Derived from the weekly schedule in the current reconciliation pass
    #[serde(default)]
    pub from_schedule: bool,
}

impl Record for ClassRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Admin-supplied class fields
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassDraft {
    pub name: String,
    pub time: String,
    pub location: String,
    pub instructor: String,
    pub cancelled: bool,
}

impl ClassDraft {
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            time: self.time.trim().to_string(),
            location: self.location.trim().to_string(),
            instructor: self.instructor.trim().to_string(),
            cancelled: self.cancelled,
        }
    }

    pub fn into_record(self, id: String) -> ClassRecord {
        ClassRecord {
            id,
            name: self.name,
            time: self.time,
            location: self.location,
            instructor: self.instructor,
            cancelled: self.cancelled,
            from_schedule: false,
        }
    }

    pub fn apply_to(self, record: &mut ClassRecord) {
        record.name = self.name;
        record.time = self.time;
        record.location = self.location;
        record.instructor = self.instructor;
        record.cancelled = self.cancelled;
    }
}
