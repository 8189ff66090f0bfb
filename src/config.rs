use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "MediScan";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default HTTP port for the local API server.
pub const DEFAULT_PORT: u16 = 8000;

/// Safety settings. The summarizer is informational only.
pub const ALLOW_DIAGNOSIS: bool = false;
pub const ALLOW_TREATMENT_ADVICE: bool = false;
pub const SUMMARY_READING_LEVEL: &str = "middle_school";

/// Default OCR language.
pub const OCR_LANGUAGE: &str = "eng";

/// Local frontend origins allowed by CORS.
pub const ALLOWED_ORIGINS: [&str; 4] = [
    "http://127.0.0.1:5500",
    "http://localhost:5500",
    "http://127.0.0.1:8000",
    "http://localhost:8000",
];

/// Get the application data directory
/// ~/MediScan/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("MediScan")
}

/// Get the SQLite database path
pub fn db_path() -> PathBuf {
    app_data_dir().join("mediscan.db")
}

/// Get the tessdata directory for the bundled OCR engine.
/// `TESSDATA_PREFIX` overrides the default location under the data dir.
#[cfg(feature = "ocr")]
pub fn tessdata_dir() -> PathBuf {
    std::env::var_os("TESSDATA_PREFIX")
        .map(PathBuf::from)
        .unwrap_or_else(|| app_data_dir().join("tessdata"))
}

/// Default log filter when RUST_LOG is not set.
pub fn default_log_filter() -> &'static str {
    "info,mediscan=debug"
}
