use serde::{Deserialize, Serialize};

use super::student::StudentRecord;

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub admission_number: String,
    pub password: String,
}

/// Body of `POST /api/auth/student/login`.
///
/// `student` is optional on the wire: a 200 without it is still a failed
/// login for the portal.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct LoginResponse {
    #[serde(default)]
    pub student: Option<StudentRecord>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}
