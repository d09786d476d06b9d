pub const BITTREX_HTTP_BASE_URL: &str = "https://bittrex.com/api/v1.1/";

pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_BACKOFF_IN_MILLIS: u64 = 2_000;
pub const DEFAULT_REQUEST_TIMEOUT_IN_SECS: u64 = 30;

pub const API_SIGN_HEADER: &str = "apisign";
