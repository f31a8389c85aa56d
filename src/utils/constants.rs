// Storage keys shared by the session store and the HTTP client

/// Admission number of the logged-in student (the session marker)
pub const ADMISSION_NUMBER_KEY: &str = "molek_admission_number";

/// JSON snapshot of the logged-in student's record
pub const STUDENT_SNAPSHOT_KEY: &str = "molek_student";

/// RFC 3339 time at which the snapshot was last written
pub const SNAPSHOT_CACHED_AT_KEY: &str = "molek_student_cached_at";

/// Header carrying the admission number on profile requests
pub const ADMISSION_NUMBER_HEADER: &str = "X-Admission-Number";

pub const SCHOOL_NAME: &str = "MOLEK Schools";
