// ============================================================================
// API CLIENT - HTTP only (stateless apart from the admission-number lookup)
// ============================================================================

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use web_sys::{File, FormData, RequestCredentials};

use crate::config::CONFIG;
use crate::error::ApiError;
use crate::models::{GalleryItem, GradeRecord, LoginRequest, LoginResponse, NewsItem, StudentRecord};
use crate::services::portal_api::{AuthApi, ProfileApi};
use crate::utils::{BrowserStore, KeyValueStore, ADMISSION_NUMBER_HEADER, ADMISSION_NUMBER_KEY};

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct UploadResponse {
    profile_picture: String,
}

/// Client for the MOLEK backend
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    store: BrowserStore,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: CONFIG.backend_url().trim_end_matches('/').to_string(),
            store: BrowserStore,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach cookies and the persisted admission number
    fn authenticated(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.credentials(RequestCredentials::Include);
        match self.store.get(ADMISSION_NUMBER_KEY) {
            Ok(Some(number)) => builder.header(ADMISSION_NUMBER_HEADER, &number),
            _ => builder,
        }
    }

    /// Published school news
    pub async fn news(&self) -> Result<Vec<NewsItem>, ApiError> {
        let response = Request::get(&self.url("/api/news"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }

    /// Gallery images
    pub async fn gallery(&self) -> Result<Vec<GalleryItem>, ApiError> {
        let response = Request::get(&self.url("/api/gallery"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }

    /// Results of the logged-in student
    pub async fn grades(&self) -> Result<Vec<GradeRecord>, ApiError> {
        let response = self
            .authenticated(Request::get(&self.url("/api/student/grades")))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }

    /// Upload a new passport photo; returns its public URL
    pub async fn upload_profile_picture(&self, file: &File) -> Result<String, ApiError> {
        let form = FormData::new().map_err(|_| ApiError::Network("FormData unavailable".into()))?;
        form.append_with_blob_and_filename("profile_picture", file, &file.name())
            .map_err(|_| ApiError::Network("could not attach file".into()))?;

        log::info!("📤 [API] Uploading profile picture ({} bytes)", file.size());

        let response = self
            .authenticated(Request::post(&self.url("/api/student/profile-picture")))
            .body(form)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let body: UploadResponse = read_json(response).await?;
        Ok(body.profile_picture)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthApi for ApiClient {
    async fn login(&self, admission_number: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            admission_number: admission_number.to_string(),
            password: password.to_string(),
        };

        log::info!("🔐 [API] Login request for {}", admission_number);

        let response = Request::post(&self.url("/api/auth/student/login"))
            .credentials(RequestCredentials::Include)
            .json(&body)
            .map_err(|e| ApiError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        read_json(response).await
    }
}

impl ProfileApi for ApiClient {
    async fn get_profile(&self) -> Result<StudentRecord, ApiError> {
        let response = self
            .authenticated(Request::get(&self.url("/api/student/profile")))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        read_json(response).await
    }
}

/// Decode a 2xx body, or turn the failure into `ApiError::Http`
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message.or(body.error))
            .unwrap_or_else(|| response.status_text());
        log::warn!("⚠️ [API] {} {}: {}", response.url(), status, message);
        return Err(ApiError::Http { status, message });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}
