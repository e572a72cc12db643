use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tuneye_logging::tuneye_debug;

use crate::wire::ProcessRequest;
use crate::{DetectError, DetectionInput, DetectionReport, FailureKind};

/// Name of the header carrying the record-this-scan flag.
pub(crate) const LOG_HEADER: &str = "X-Log";

#[derive(Debug, Clone)]
pub struct DetectorSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:1234/api/process".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[async_trait::async_trait]
pub trait Detector: Send + Sync {
    async fn detect(&self, input: &DetectionInput) -> Result<DetectionReport, DetectError>;
}

/// Detector backed by the external inference service.
#[derive(Debug, Clone)]
pub struct HttpDetector {
    settings: DetectorSettings,
}

impl HttpDetector {
    pub fn new(settings: DetectorSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, DetectError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| DetectError::new(FailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Detector for HttpDetector {
    async fn detect(&self, input: &DetectionInput) -> Result<DetectionReport, DetectError> {
        let client = self.build_client()?;
        let body = ProcessRequest::from_input(input);

        tuneye_debug!(
            "POST {} kind={} value_len={} record={}",
            self.settings.endpoint,
            body.kind,
            input.value.len(),
            input.settings.enable_record
        );

        let response = client
            .post(&self.settings.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(LOG_HEADER, input.settings.enable_record.to_string())
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DetectError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        response
            .json::<DetectionReport>()
            .await
            .map_err(|err| DetectError::new(FailureKind::MalformedResponse, err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> DetectError {
    if err.is_timeout() {
        return DetectError::new(FailureKind::Timeout, err.to_string());
    }
    DetectError::new(FailureKind::Network, err.to_string())
}
