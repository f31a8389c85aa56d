use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct NewsItem {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct GalleryItem {
    pub id: u64,
    pub image_url: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// One subject result on the student's report.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct GradeRecord {
    pub subject: String,
    pub term: String,
    pub session: String,
    #[serde(default)]
    pub ca_score: Option<f64>,
    #[serde(default)]
    pub exam_score: Option<f64>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub grade: Option<String>,
}
