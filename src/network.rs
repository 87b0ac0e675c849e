//! Network constants for the Corridor SDK.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.corridorpay.io";

/// Environment variable consulted by the client builder for the base URL.
pub const API_URL_ENV: &str = "CORRIDOR_API_URL";
