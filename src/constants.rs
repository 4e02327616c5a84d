// Fundamental configuration constants
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3030;

// Bearer credential wire format: exact prefix, single space, case-sensitive
pub const BEARER_PREFIX: &str = "Bearer ";

// Issued tokens are valid for seven days; there is no revocation list
pub const TOKEN_TTL_SECS: usize = 7 * 24 * 60 * 60;

// scrypt cost parameters: N = 2^14, r = 8, p = 1, 32-byte digest
pub const SCRYPT_LOG_N: u8 = 14;
pub const SCRYPT_R: u32 = 8;
pub const SCRYPT_P: u32 = 1;
pub const SCRYPT_DK_LEN: usize = 32;

// Request body limits
pub const MAX_JSON_BODY_BYTES: u64 = 16 * 1024;
pub const MAX_IMAGE_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

// Minimum wall-clock duration of a failed login response
pub const MIN_AUTH_RESPONSE_MS: u64 = 100;
