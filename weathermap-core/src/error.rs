use reqwest::StatusCode;

/// Why a single city's reading could not be obtained.
///
/// These never abort a load; the fan-out logs them and leaves the city
/// without a reading.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("provider answered {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("could not decode provider JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("provider response has no `main.temp`")]
    MissingTemperature,
}
