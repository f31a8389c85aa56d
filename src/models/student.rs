use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Student record as returned by the portal backend.
///
/// Only `admission_number` is guaranteed. Fields the portal does not model
/// are kept in `extra` so a cached snapshot round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub admission_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, rename = "class", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StudentRecord {
    pub fn new(admission_number: impl Into<String>) -> Self {
        Self {
            admission_number: admission_number.into(),
            first_name: None,
            middle_name: None,
            last_name: None,
            full_name: None,
            class_name: None,
            status: None,
            email: None,
            phone: None,
            profile_picture: None,
            extra: Map::new(),
        }
    }

    /// Name to greet the student with: `full_name`, else the joined name
    /// parts, else the admission number.
    pub fn display_name(&self) -> String {
        if let Some(full) = self.full_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return full.to_string();
        }

        let parts: Vec<&str> = [&self.first_name, &self.middle_name, &self.last_name]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.trim().is_empty())
            .collect();

        if parts.is_empty() {
            self.admission_number.clone()
        } else {
            parts.join(" ")
        }
    }

    /// Shallow merge: every field present in `patch` replaces ours.
    pub fn merge(&mut self, patch: StudentPatch) {
        let StudentPatch {
            first_name,
            middle_name,
            last_name,
            full_name,
            class_name,
            status,
            email,
            phone,
            profile_picture,
            extra,
        } = patch;

        merge_field(&mut self.first_name, first_name);
        merge_field(&mut self.middle_name, middle_name);
        merge_field(&mut self.last_name, last_name);
        merge_field(&mut self.full_name, full_name);
        merge_field(&mut self.class_name, class_name);
        merge_field(&mut self.status, status);
        merge_field(&mut self.email, email);
        merge_field(&mut self.phone, phone);
        merge_field(&mut self.profile_picture, profile_picture);
        self.extra.extend(extra);
    }
}

fn merge_field(target: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *target = value;
    }
}

/// Partial student update for optimistic local edits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, rename = "class", skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StudentPatch {
    pub fn profile_picture(url: impl Into<String>) -> Self {
        Self {
            profile_picture: Some(url.into()),
            ..Self::default()
        }
    }
}
