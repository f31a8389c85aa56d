pub mod auth;
pub mod content;
pub mod student;

pub use auth::{LoginRequest, LoginResponse};
pub use content::{GalleryItem, GradeRecord, NewsItem};
pub use student::{StudentPatch, StudentRecord};
