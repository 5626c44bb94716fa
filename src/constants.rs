//! Shared constants for the mehandi backend.

/// Default HTTP port for the API server.
pub const DEFAULT_PORT: u16 = 8080;

/// Browser origin allowed to call the API during local development.
pub const DEFAULT_CLIENT_ORIGIN: &str = "http://localhost:3000";

/// Notification recipient used when no admin email has been configured.
pub const DEFAULT_ADMIN_EMAIL: &str = "studio@mehandi.example.com";

/// Minimum accepted admin token length after trimming.
pub const MIN_TOKEN_LEN: usize = 4;

/// Maximum accepted upload size in bytes (25 MB).
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Directory for collection files, relative to the storage base.
pub const DATA_DIR: &str = "data";

/// Directory for uploaded media, relative to the storage base.
pub const UPLOADS_DIR: &str = "uploads";

/// Collection file holding all design records.
pub const DESIGNS_FILE: &str = "designs.json";

/// Collection file holding all booking records.
pub const BOOKINGS_FILE: &str = "bookings.json";

/// Singleton admin config file.
pub const CONFIG_FILE: &str = "config.json";

/// MIME types accepted for design media uploads.
pub const ALLOWED_MEDIA_TYPES: [&str; 6] = [
    "image/jpeg",
    "image/png",
    "image/webp",
    "video/mp4",
    "video/quicktime",
    "video/webm",
];
