// ============================================================================
// SESSION VIEWMODEL - Student session store
// ============================================================================
// Single source of truth for the logged-in student. Views hold an
// Rc<SessionViewModel> and observe `state()`; no RefCell borrow is held
// across an .await.
// ============================================================================

use crate::error::{AuthError, StorageError};
use crate::models::{LoginResponse, StudentPatch, StudentRecord};
use crate::services::{AuthApi, CachedSession, PersistedEntries, ProfileApi, SnapshotCache};
use crate::state::{Session, SessionState};
use crate::utils::KeyValueStore;

pub struct SessionViewModel<A, S>
where
    A: AuthApi + ProfileApi,
    S: KeyValueStore,
{
    api: A,
    cache: SnapshotCache<S>,
    state: SessionState,
}

impl<A, S> SessionViewModel<A, S>
where
    A: AuthApi + ProfileApi,
    S: KeyValueStore,
{
    pub fn new(api: A, store: S) -> Self {
        Self::with_cache(api, SnapshotCache::new(store))
    }

    pub fn with_cache(api: A, cache: SnapshotCache<S>) -> Self {
        Self {
            api,
            cache,
            state: SessionState::new(Session::initial()),
        }
    }

    /// Observable session; clone it to subscribe
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session(&self) -> Session {
        self.state.get()
    }

    pub fn student(&self) -> Option<StudentRecord> {
        self.state.with(|session| session.student.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(|session| session.is_authenticated)
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|session| session.loading)
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Restore the session from storage at startup.
    ///
    /// A valid snapshot authenticates immediately, then a fresh profile is
    /// fetched; if that fetch fails the snapshot is kept. Unreadable storage
    /// forces a logout. `loading` is false afterwards in every case.
    pub async fn rehydrate(&self) {
        log::info!("🔄 [SESSION] Checking persisted session...");

        match self.cache.load() {
            Ok(CachedSession::Valid { admission_number, student, cached_at }) => {
                match cached_at {
                    Some(at) => log::info!("💾 [SESSION] Cached snapshot for {} from {}", admission_number, at.to_rfc3339()),
                    None => log::info!("💾 [SESSION] Cached snapshot for {} (age unknown)", admission_number),
                }
                self.state.update(|session| {
                    session.student = Some(student);
                    session.is_authenticated = true;
                });

                match self.api.get_profile().await {
                    Ok(fresh) => {
                        self.apply_fresh_profile(fresh);
                    }
                    Err(e) => {
                        log::warn!("⚠️ [SESSION] Profile refresh failed, keeping cached snapshot: {}", e);
                    }
                }
            }
            Ok(CachedSession::Expired { admission_number }) => {
                log::info!("⌛ [SESSION] Snapshot for {} expired, fetching profile", admission_number);
                match self.api.get_profile().await {
                    Ok(fresh) => {
                        self.apply_fresh_profile(fresh);
                    }
                    Err(e) => {
                        log::warn!("⚠️ [SESSION] No usable snapshot and profile fetch failed: {}", e);
                        self.logout();
                    }
                }
            }
            Ok(CachedSession::Partial) => {
                log::warn!("⚠️ [SESSION] Incomplete persisted session, clearing it");
                self.logout();
            }
            Ok(CachedSession::Empty) => {
                log::info!("ℹ️ [SESSION] No persisted session");
            }
            Err(e) => {
                log::error!("❌ [SESSION] Persisted session unreadable ({}), forcing logout", e);
                self.logout();
            }
        }

        self.state.update(|session| session.loading = false);
    }

    /// Authenticate and persist the student.
    ///
    /// State is only touched on success; the whole response is returned so
    /// the caller can navigate. A failed write puts the previous persisted
    /// session back.
    pub async fn login(&self, admission_number: &str, password: &str) -> Result<LoginResponse, AuthError> {
        log::info!("🔐 [SESSION] Login for {}", admission_number);

        let response = self.api.login(admission_number, password).await.map_err(|e| {
            log::warn!("❌ [SESSION] Login rejected: {}", e);
            AuthError::from(e)
        })?;

        let student = response.student.clone().ok_or_else(|| {
            log::warn!("❌ [SESSION] Login response without student record");
            AuthError::MissingStudent
        })?;

        let marker = if student.admission_number.trim().is_empty() {
            admission_number
        } else {
            student.admission_number.as_str()
        };

        let previous = self.cache.entries();
        if let Err(e) = self.cache.save(marker, &student) {
            log::error!("❌ [SESSION] Could not persist session: {}", e);
            self.roll_back_login(previous);
            return Err(AuthError::Storage(e));
        }

        log::info!("✅ [SESSION] Logged in as {}", student.display_name());
        self.state.set(Session::signed_in(student));
        Ok(response)
    }

    /// Undo a partial login write. Storage must keep describing whoever is
    /// in memory; when it cannot, both are signed out.
    fn roll_back_login(&self, previous: Result<PersistedEntries, StorageError>) {
        let restored = previous.and_then(|entries| self.cache.restore(&entries));
        if let Err(e) = restored {
            log::error!("❌ [SESSION] Could not restore previous session ({}), signing out", e);
            self.logout();
        }
    }

    /// Clear memory and storage. Never fails; safe to call repeatedly.
    pub fn logout(&self) {
        if let Err(e) = self.cache.clear() {
            log::warn!("⚠️ [SESSION] Could not clear persisted session: {}", e);
        }

        let loading = self.is_loading();
        self.state.set(Session {
            loading,
            ..Session::signed_out()
        });
        log::info!("👋 [SESSION] Logged out");
    }

    /// Shallow-merge a local edit and re-persist, without a round trip.
    /// Returns the merged record, or `None` when nobody is logged in.
    pub fn update_student(&self, patch: StudentPatch) -> Option<StudentRecord> {
        let mut student = match self.student() {
            Some(student) => student,
            None => {
                log::warn!("⚠️ [SESSION] update_student ignored: not authenticated");
                return None;
            }
        };

        student.merge(patch);

        if let Err(e) = self.cache.save_snapshot(&student) {
            log::error!("❌ [SESSION] Could not persist updated snapshot: {}", e);
        }

        self.state.update(|session| session.student = Some(student.clone()));
        Some(student)
    }

    /// Fetch the profile again and replace state and snapshot.
    /// Errors leave the current session untouched.
    pub async fn refresh_student(&self) -> Result<StudentRecord, AuthError> {
        if self.cache.admission_number()?.is_none() {
            return Err(AuthError::NotAuthenticated);
        }

        log::info!("🔄 [SESSION] Refreshing student profile...");
        let fresh = self.api.get_profile().await.map_err(|e| {
            log::warn!("❌ [SESSION] Profile refresh failed: {}", e);
            AuthError::Api(e)
        })?;

        if self.apply_fresh_profile(fresh.clone()) {
            Ok(fresh)
        } else {
            Err(AuthError::NotAuthenticated)
        }
    }

    /// Install a freshly fetched record, unless a logout happened while it
    /// was in flight. Returns whether it was applied.
    fn apply_fresh_profile(&self, fresh: StudentRecord) -> bool {
        match self.cache.admission_number() {
            Ok(Some(_)) => {}
            _ => {
                log::info!("ℹ️ [SESSION] Session ended during profile fetch, discarding result");
                return false;
            }
        }

        if let Err(e) = self.cache.save_snapshot(&fresh) {
            log::error!("❌ [SESSION] Could not persist fresh snapshot: {}", e);
        }

        self.state.update(|session| {
            session.student = Some(fresh);
            session.is_authenticated = true;
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, StorageError};
    use crate::utils::{MemoryStore, ADMISSION_NUMBER_KEY, SNAPSHOT_CACHED_AT_KEY, STUDENT_SNAPSHOT_KEY};
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct FakeApi {
        login: RefCell<Result<LoginResponse, ApiError>>,
        profile: RefCell<Result<StudentRecord, ApiError>>,
        profile_calls: Cell<usize>,
    }

    impl FakeApi {
        fn new() -> Self {
            Self {
                login: RefCell::new(Err(ApiError::Network("not stubbed".into()))),
                profile: RefCell::new(Err(ApiError::Network("offline".into()))),
                profile_calls: Cell::new(0),
            }
        }

        fn with_login(self, result: Result<LoginResponse, ApiError>) -> Self {
            *self.login.borrow_mut() = result;
            self
        }

        fn with_profile(self, result: Result<StudentRecord, ApiError>) -> Self {
            *self.profile.borrow_mut() = result;
            self
        }
    }

    impl AuthApi for FakeApi {
        async fn login(&self, _admission_number: &str, _password: &str) -> Result<LoginResponse, ApiError> {
            self.login.borrow().clone()
        }
    }

    impl ProfileApi for FakeApi {
        async fn get_profile(&self) -> Result<StudentRecord, ApiError> {
            self.profile_calls.set(self.profile_calls.get() + 1);
            self.profile.borrow().clone()
        }
    }

    fn jane() -> StudentRecord {
        serde_json::from_value(serde_json::json!({
            "admission_number": "MOL/2024/001",
            "full_name": "Jane Doe"
        }))
        .unwrap()
    }

    fn persisted_student(store: &MemoryStore) -> Option<StudentRecord> {
        store
            .get(STUDENT_SNAPSHOT_KEY)
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    fn seed(store: &MemoryStore, student: &StudentRecord) {
        SnapshotCache::new(store.clone())
            .save(&student.admission_number, student)
            .unwrap();
    }

    #[test]
    fn login_authenticates_and_persists_snapshot() {
        let store = MemoryStore::new();
        let api = FakeApi::new().with_login(Ok(LoginResponse {
            student: Some(jane()),
            ..LoginResponse::default()
        }));
        let vm = SessionViewModel::new(api, store.clone());

        let response = block_on(vm.login("MOL/2024/001", "correct horse")).unwrap();

        assert_eq!(response.student, Some(jane()));
        assert!(vm.is_authenticated());
        assert_eq!(vm.student().unwrap().full_name.as_deref(), Some("Jane Doe"));
        assert_eq!(persisted_student(&store), Some(jane()));
        assert_eq!(
            store.get(ADMISSION_NUMBER_KEY).unwrap().as_deref(),
            Some("MOL/2024/001")
        );
    }

    #[test]
    fn login_without_student_leaves_state_alone() {
        let store = MemoryStore::new();
        let api = FakeApi::new().with_login(Ok(LoginResponse {
            message: Some("Account pending".into()),
            ..LoginResponse::default()
        }));
        let vm = SessionViewModel::new(api, store.clone());
        let before = vm.session();

        let err = block_on(vm.login("MOL/2024/001", "pw")).unwrap_err();

        assert_eq!(err, AuthError::MissingStudent);
        assert_eq!(vm.session(), before);
        assert!(store.is_empty());
    }

    #[test]
    fn rejected_credentials_are_reported_as_such() {
        let api = FakeApi::new().with_login(Err(ApiError::Http {
            status: 401,
            message: "Invalid credentials".into(),
        }));
        let vm = SessionViewModel::new(api, MemoryStore::new());

        let err = block_on(vm.login("MOL/2024/001", "wrong")).unwrap_err();

        assert_eq!(err, AuthError::InvalidCredentials);
        assert!(!vm.is_authenticated());
    }

    #[test]
    fn logout_is_idempotent_and_clears_residual_keys() {
        let store = MemoryStore::new();
        store.set(STUDENT_SNAPSHOT_KEY, "{\"stale\":true}").unwrap();
        store.set(SNAPSHOT_CACHED_AT_KEY, "yesterday").unwrap();
        let vm = SessionViewModel::new(FakeApi::new(), store.clone());
        block_on(vm.rehydrate());

        vm.logout();
        let once = vm.session();
        vm.logout();

        assert_eq!(vm.session(), once);
        assert!(once.student.is_none());
        assert!(!once.is_authenticated);
        assert!(store.is_empty());
    }

    #[test]
    fn rehydrate_prefers_fresh_profile() {
        let store = MemoryStore::new();
        seed(&store, &jane());

        let mut fresh = jane();
        fresh.class_name = Some("JSS3".into());
        let vm = SessionViewModel::new(FakeApi::new().with_profile(Ok(fresh.clone())), store.clone());

        assert!(vm.is_loading());
        block_on(vm.rehydrate());

        let session = vm.session();
        assert!(session.is_authenticated);
        assert!(!session.loading);
        assert_eq!(session.student, Some(fresh.clone()));
        assert_eq!(persisted_student(&store), Some(fresh));
    }

    #[test]
    fn rehydrate_keeps_cache_when_profile_fetch_fails() {
        let store = MemoryStore::new();
        seed(&store, &jane());
        let api = FakeApi::new().with_profile(Err(ApiError::Network("offline".into())));
        let vm = SessionViewModel::new(api, store.clone());

        block_on(vm.rehydrate());

        let session = vm.session();
        assert!(session.is_authenticated);
        assert!(!session.loading);
        assert_eq!(session.student, Some(jane()));
        assert_eq!(vm.api().profile_calls.get(), 1);
    }

    #[test]
    fn rehydrate_without_persisted_session_skips_network() {
        let vm = SessionViewModel::new(FakeApi::new(), MemoryStore::new());

        block_on(vm.rehydrate());

        assert_eq!(vm.session(), Session::signed_out());
        assert_eq!(vm.api().profile_calls.get(), 0);
    }

    #[test]
    fn corrupt_snapshot_forces_logout() {
        let store = MemoryStore::new();
        store.set(ADMISSION_NUMBER_KEY, "MOL/2024/001").unwrap();
        store.set(STUDENT_SNAPSHOT_KEY, "{\"admission_number\":").unwrap();
        let vm = SessionViewModel::new(FakeApi::new().with_profile(Ok(jane())), store.clone());

        block_on(vm.rehydrate());

        assert_eq!(vm.session(), Session::signed_out());
        assert!(store.is_empty());
        assert_eq!(vm.api().profile_calls.get(), 0);
    }

    #[test]
    fn expired_snapshot_needs_a_successful_fetch() {
        let store = MemoryStore::new();
        seed(&store, &jane());
        let old = (chrono::Utc::now() - chrono::Duration::days(3)).to_rfc3339();
        store.set(SNAPSHOT_CACHED_AT_KEY, &old).unwrap();

        let cache = SnapshotCache::new(store.clone()).with_max_age(Some(chrono::Duration::hours(24)));
        let vm = SessionViewModel::with_cache(FakeApi::new(), cache);

        block_on(vm.rehydrate());

        assert_eq!(vm.session(), Session::signed_out());
        assert!(store.is_empty());
    }

    #[test]
    fn refresh_requires_a_persisted_marker() {
        let vm = SessionViewModel::new(FakeApi::new().with_profile(Ok(jane())), MemoryStore::new());

        let err = block_on(vm.refresh_student()).unwrap_err();

        assert_eq!(err, AuthError::NotAuthenticated);
        assert_eq!(vm.api().profile_calls.get(), 0);
    }

    #[test]
    fn refresh_failure_keeps_current_student() {
        let store = MemoryStore::new();
        seed(&store, &jane());
        let vm = SessionViewModel::new(FakeApi::new(), store.clone());
        block_on(vm.rehydrate());

        *vm.api().profile.borrow_mut() = Err(ApiError::Http { status: 500, message: "boom".into() });
        let err = block_on(vm.refresh_student()).unwrap_err();

        assert!(matches!(err, AuthError::Api(ApiError::Http { status: 500, .. })));
        assert!(vm.is_authenticated());
        assert_eq!(vm.student(), Some(jane()));
    }

    #[test]
    fn refresh_replaces_state_and_snapshot() {
        let store = MemoryStore::new();
        seed(&store, &jane());
        let vm = SessionViewModel::new(FakeApi::new(), store.clone());
        block_on(vm.rehydrate());

        let mut fresh = jane();
        fresh.status = Some("graduated".into());
        *vm.api().profile.borrow_mut() = Ok(fresh.clone());

        assert_eq!(block_on(vm.refresh_student()).unwrap(), fresh);
        assert_eq!(vm.student(), Some(fresh.clone()));
        assert_eq!(persisted_student(&store), Some(fresh));
    }

    #[test]
    fn update_student_merges_and_persists() {
        let store = MemoryStore::new();
        let api = FakeApi::new().with_login(Ok(LoginResponse {
            student: Some(jane()),
            ..LoginResponse::default()
        }));
        let vm = SessionViewModel::new(api, store.clone());
        block_on(vm.login("MOL/2024/001", "pw")).unwrap();

        let merged = vm
            .update_student(StudentPatch::profile_picture("https://cdn.example/jane.png"))
            .unwrap();

        assert_eq!(merged.full_name.as_deref(), Some("Jane Doe"));
        assert_eq!(merged.profile_picture.as_deref(), Some("https://cdn.example/jane.png"));
        assert_eq!(persisted_student(&store), Some(merged));
    }

    #[test]
    fn update_student_without_session_is_ignored() {
        let store = MemoryStore::new();
        let vm = SessionViewModel::new(FakeApi::new(), store.clone());

        assert!(vm.update_student(StudentPatch::default()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn observers_see_login_and_logout() {
        let api = FakeApi::new().with_login(Ok(LoginResponse {
            student: Some(jane()),
            ..LoginResponse::default()
        }));
        let vm = SessionViewModel::new(api, MemoryStore::new());

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let observed = vm.state().clone();
        vm.state().subscribe(move || sink.borrow_mut().push(observed.with(|s| s.is_authenticated)));

        block_on(vm.login("MOL/2024/001", "pw")).unwrap();
        vm.logout();

        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    /// localStorage that refuses writes (quota, private mode)
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write { key: key.to_string() })
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn login_that_cannot_persist_is_an_error() {
        let api = FakeApi::new().with_login(Ok(LoginResponse {
            student: Some(jane()),
            ..LoginResponse::default()
        }));
        let vm = SessionViewModel::new(api, ReadOnlyStore);

        let err = block_on(vm.login("MOL/2024/001", "pw")).unwrap_err();

        assert!(matches!(err, AuthError::Storage(StorageError::Write { .. })));
        assert!(!vm.is_authenticated());
        assert!(vm.student().is_none());
    }

    #[test]
    fn half_persisted_session_is_cleared() {
        let store = MemoryStore::new();
        store.set(ADMISSION_NUMBER_KEY, "MOL/2024/001").unwrap();
        let vm = SessionViewModel::new(FakeApi::new().with_profile(Ok(jane())), store.clone());

        block_on(vm.rehydrate());

        assert!(!vm.is_authenticated());
        assert!(!vm.is_loading());
        assert!(store.is_empty());
        assert_eq!(vm.api().profile_calls.get(), 0);
    }

    /// Profile endpoint that answers only after the student logged out
    struct LogoutDuringFetch {
        store: MemoryStore,
    }

    impl AuthApi for LogoutDuringFetch {
        async fn login(&self, _admission_number: &str, _password: &str) -> Result<LoginResponse, ApiError> {
            Err(ApiError::Network("not stubbed".into()))
        }
    }

    impl ProfileApi for LogoutDuringFetch {
        async fn get_profile(&self) -> Result<StudentRecord, ApiError> {
            SnapshotCache::new(self.store.clone()).clear().unwrap();
            Ok(jane())
        }
    }

    #[test]
    fn refresh_result_is_dropped_after_logout() {
        let store = MemoryStore::new();
        seed(&store, &jane());
        let vm = SessionViewModel::new(LogoutDuringFetch { store: store.clone() }, store.clone());

        let err = block_on(vm.refresh_student()).unwrap_err();

        assert_eq!(err, AuthError::NotAuthenticated);
        assert!(!vm.is_authenticated());
        assert!(store.is_empty());
    }

    /// Store with a per-value size quota and an optional write budget
    struct LimitedStore {
        inner: MemoryStore,
        max_value_len: Cell<usize>,
        writes_left: Cell<Option<usize>>,
    }

    impl LimitedStore {
        fn new() -> Self {
            Self {
                inner: MemoryStore::new(),
                max_value_len: Cell::new(usize::MAX),
                writes_left: Cell::new(None),
            }
        }
    }

    impl KeyValueStore for LimitedStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            let out_of_writes = self.writes_left.get() == Some(0);
            if out_of_writes || value.len() > self.max_value_len.get() {
                return Err(StorageError::Write { key: key.to_string() });
            }
            if let Some(left) = self.writes_left.get() {
                self.writes_left.set(Some(left - 1));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    fn kemi_with_large_photo() -> StudentRecord {
        let mut kemi = StudentRecord::new("MOL/2024/002");
        kemi.full_name = Some("Kemi Adeyemi".into());
        kemi.profile_picture = Some(format!("data:image/png;base64,{}", "A".repeat(4096)));
        kemi
    }

    #[test]
    fn failed_login_keeps_the_current_student_persisted() {
        let store = Rc::new(LimitedStore::new());
        let api = FakeApi::new().with_login(Ok(LoginResponse {
            student: Some(jane()),
            ..LoginResponse::default()
        }));
        let vm = SessionViewModel::new(api, store.clone());
        block_on(vm.login("MOL/2024/001", "pw")).unwrap();
        let jane_snapshot = store.get(STUDENT_SNAPSHOT_KEY).unwrap();

        store.max_value_len.set(1024);
        *vm.api().login.borrow_mut() = Ok(LoginResponse {
            student: Some(kemi_with_large_photo()),
            ..LoginResponse::default()
        });
        let err = block_on(vm.login("MOL/2024/002", "pw")).unwrap_err();

        assert!(matches!(err, AuthError::Storage(StorageError::Write { .. })));
        assert!(vm.is_authenticated());
        assert_eq!(vm.student(), Some(jane()));
        assert_eq!(
            store.get(ADMISSION_NUMBER_KEY).unwrap().as_deref(),
            Some("MOL/2024/001")
        );
        assert_eq!(store.get(STUDENT_SNAPSHOT_KEY).unwrap(), jane_snapshot);
        assert!(store.inner.contains(SNAPSHOT_CACHED_AT_KEY));
    }

    #[test]
    fn unrecoverable_login_write_signs_everyone_out() {
        let store = Rc::new(LimitedStore::new());
        let api = FakeApi::new().with_login(Ok(LoginResponse {
            student: Some(jane()),
            ..LoginResponse::default()
        }));
        let vm = SessionViewModel::new(api, store.clone());
        block_on(vm.login("MOL/2024/001", "pw")).unwrap();

        // The new marker lands, then storage refuses everything
        store.writes_left.set(Some(1));
        *vm.api().login.borrow_mut() = Ok(LoginResponse {
            student: Some(kemi_with_large_photo()),
            ..LoginResponse::default()
        });
        let err = block_on(vm.login("MOL/2024/002", "pw")).unwrap_err();

        assert!(matches!(err, AuthError::Storage(_)));
        assert!(!vm.is_authenticated());
        assert!(vm.student().is_none());
        assert!(store.inner.is_empty());
    }
}
