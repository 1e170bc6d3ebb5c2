/// Typed views of the analysis service's JSON responses
///
/// Every field is optional: a partial response still decodes and the
/// presenter simply skips what is missing. Counts are kept as f64 because the
/// service is free to send them as either integers or floats.

use base64::Engine;
use serde::Deserialize;

use super::ResponseKind;

/// `/predict_liquid`, `/predict_infusion`, `/predict_tea_variant`
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct PredictionResponse {
    pub prediction: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct FiberStatistics {
    pub total_number_of_particles: Option<f64>,
    pub number_of_thin_particles: Option<f64>,
    pub fiber_percentage: Option<f64>,
}

/// `/identify-fiber`
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct FiberResponse {
    pub result_image: Option<String>,
    pub statistics: Option<FiberStatistics>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct StrokeStatistics {
    pub number_of_external_contours: Option<f64>,
    pub number_of_brown_particles: Option<f64>,
    pub brown_particle_ratio: Option<f64>,
}

/// `/identify-stroke`
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct StrokeResponse {
    pub result_image: Option<String>,
    pub statistics: Option<StrokeStatistics>,
}

/// `/generate_report`
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ReportResponse {
    pub tea_variant: Option<String>,
    pub fiber_image: Option<String>,
    pub fiber_statistics: Option<FiberStatistics>,
    pub stroke_image: Option<String>,
    pub stroke_statistics: Option<StrokeStatistics>,
}

/// Error body the service sends alongside non-2xx statuses
#[derive(Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

/// Identifies one base64 image inside a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    /// `result_image` of fiber and stroke responses
    Result,
    /// `fiber_image` of a report
    Fiber,
    /// `stroke_image` of a report
    Stroke,
}

/// A decoded response from any endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResult {
    Prediction(PredictionResponse),
    Fiber(FiberResponse),
    Stroke(StrokeResponse),
    Report(ReportResponse),
}

impl AnalysisResult {
    /// Decode a response body according to the endpoint's response shape
    pub fn decode(kind: ResponseKind, body: &[u8]) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            ResponseKind::Prediction => AnalysisResult::Prediction(serde_json::from_slice(body)?),
            ResponseKind::Fiber => AnalysisResult::Fiber(serde_json::from_slice(body)?),
            ResponseKind::Stroke => AnalysisResult::Stroke(serde_json::from_slice(body)?),
            ResponseKind::Report => AnalysisResult::Report(serde_json::from_slice(body)?),
        })
    }

    /// A prediction result carrying a fixed message
    pub fn synthetic_prediction(message: &str) -> Self {
        AnalysisResult::Prediction(PredictionResponse {
            prediction: Some(message.to_string()),
        })
    }

    /// The base64 payload stored in `slot`, if this result has one
    pub fn image(&self, slot: ImageSlot) -> Option<&str> {
        let encoded = match (self, slot) {
            (AnalysisResult::Fiber(r), ImageSlot::Result) => r.result_image.as_deref(),
            (AnalysisResult::Stroke(r), ImageSlot::Result) => r.result_image.as_deref(),
            (AnalysisResult::Report(r), ImageSlot::Fiber) => r.fiber_image.as_deref(),
            (AnalysisResult::Report(r), ImageSlot::Stroke) => r.stroke_image.as_deref(),
            _ => None,
        };
        encoded.filter(|s| !s.trim().is_empty())
    }
}

/// Decode a base64 result image into raw (JPEG) bytes
pub fn decode_image(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    // The service may wrap long payloads; whitespace is not part of the data
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    base64::engine::general_purpose::STANDARD.decode(compact)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_fiber() {
        let body = br#"{
            "result_image": "aGVsbG8=",
            "statistics": {
                "total_number_of_particles": 100,
                "number_of_thin_particles": 25,
                "fiber_percentage": 25.0
            }
        }"#;

        let result = AnalysisResult::decode(ResponseKind::Fiber, body).unwrap();
        let AnalysisResult::Fiber(fiber) = &result else {
            panic!("expected a fiber result, got {:?}", result);
        };

        let stats = fiber.statistics.as_ref().unwrap();
        assert_eq!(stats.total_number_of_particles, Some(100.0));
        assert_eq!(stats.fiber_percentage, Some(25.0));
        assert_eq!(result.image(ImageSlot::Result), Some("aGVsbG8="));
        assert_eq!(result.image(ImageSlot::Fiber), None);
    }

    #[test]
    fn test_decode_partial_report() {
        let body = br#"{ "tea_variant": "BOPF", "unexpected": true }"#;
        let result = AnalysisResult::decode(ResponseKind::Report, body).unwrap();

        assert_eq!(
            result,
            AnalysisResult::Report(ReportResponse {
                tea_variant: Some("BOPF".to_string()),
                ..ReportResponse::default()
            })
        );
    }

    #[test]
    fn test_decode_rejects_non_json() {
        assert!(AnalysisResult::decode(ResponseKind::Prediction, b"<html>").is_err());
    }

    #[test]
    fn test_decode_rejects_wrong_field_type() {
        let body = br#"{ "prediction": 42 }"#;
        assert!(AnalysisResult::decode(ResponseKind::Prediction, body).is_err());
    }

    #[test]
    fn test_blank_image_counts_as_missing() {
        let result = AnalysisResult::Stroke(StrokeResponse {
            result_image: Some("  ".to_string()),
            statistics: None,
        });
        assert_eq!(result.image(ImageSlot::Result), None);
    }

    #[test]
    fn test_decode_image_ignores_whitespace() {
        assert_eq!(decode_image(" aGVs\nbG8=\n").unwrap(), b"hello");
        assert!(decode_image("not base64!").is_err());
    }
}
