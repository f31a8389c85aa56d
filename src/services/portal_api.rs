// ============================================================================
// PORTAL API - Collaborator contracts used by the session store
// ============================================================================
// The browser build implements these with HTTP (api_client.rs); tests use
// in-memory fakes. Futures are not `Send`: everything runs on the UI thread.
// ============================================================================

use std::future::Future;
use std::rc::Rc;

use crate::error::ApiError;
use crate::models::{LoginResponse, StudentRecord};

/// Authenticates a student by admission number and password.
pub trait AuthApi {
    fn login(
        &self,
        admission_number: &str,
        password: &str,
    ) -> impl Future<Output = Result<LoginResponse, ApiError>>;
}

/// Fetches the profile of the student established by a prior login.
pub trait ProfileApi {
    fn get_profile(&self) -> impl Future<Output = Result<StudentRecord, ApiError>>;
}

impl<T: AuthApi> AuthApi for Rc<T> {
    fn login(
        &self,
        admission_number: &str,
        password: &str,
    ) -> impl Future<Output = Result<LoginResponse, ApiError>> {
        (**self).login(admission_number, password)
    }
}

impl<T: ProfileApi> ProfileApi for Rc<T> {
    fn get_profile(&self) -> impl Future<Output = Result<StudentRecord, ApiError>> {
        (**self).get_profile()
    }
}
