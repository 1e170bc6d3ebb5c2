use reqwest::multipart::{Form, Part};
use reqwest::Client;
use url::Url;

use super::response::{AnalysisResult, ErrorResponse};
use super::Endpoint;
use crate::config::Config;
use crate::error::ClientError;
use crate::state::data::SelectedImage;

/// Name of the multipart field every endpoint reads the upload from
pub const IMAGE_FIELD: &str = "image";

/// Sends picked images to the analysis service.
///
/// Cloning is cheap (reqwest::Client is reference counted), so each
/// submission task gets its own handle.
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    client: Client,
    base_url: String,
}

impl SubmissionClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL for an endpoint. The path is appended to the base, so a base
    /// like "http://host/api" keeps its prefix.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, ClientError> {
        Ok(Url::parse(&format!("{}{}", self.base_url, endpoint.path()))?)
    }

    /// Upload one image and decode the endpoint's answer.
    ///
    /// The file is read at submission time, so whatever is on disk now is
    /// what gets analysed. Single attempt, no retry.
    pub async fn submit(
        self,
        endpoint: Endpoint,
        image: SelectedImage,
    ) -> Result<AnalysisResult, ClientError> {
        let url = self.endpoint_url(endpoint)?;

        let bytes = tokio::fs::read(&image.path)
            .await
            .map_err(|source| ClientError::ReadImage {
                path: image.path.clone(),
                source,
            })?;

        log::info!(
            "📤 Uploading {} ({} bytes) to {}",
            image.file_name,
            bytes.len(),
            url
        );

        let part = Part::bytes(bytes)
            .file_name(endpoint.upload_name(&image.file_name))
            .mime_str(image.content_type())?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let response = self.client.post(url).multipart(form).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).trim().to_string());
            return Err(ClientError::Server { status, message });
        }

        log::debug!("📥 {} answered with {} bytes", endpoint.path(), body.len());

        Ok(AnalysisResult::decode(endpoint.response_kind(), &body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::response::PredictionResponse;
    use axum::extract::Multipart;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::io::Write;

    /// Serve `app` on an ephemeral local port and return its base URL
    async fn spawn_service(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// Describe the received multipart fields back to the caller
    async fn describe_upload(mut multipart: Multipart) -> Json<Value> {
        let mut parts = Vec::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let len = field.bytes().await.unwrap().len();
            parts.push(format!("{}|{}|{}|{}", name, file_name, content_type, len));
        }
        Json(json!({ "prediction": parts.join(";") }))
    }

    fn client_for(base_url: String) -> SubmissionClient {
        SubmissionClient::new(&Config {
            base_url,
            timeout_secs: Some(10),
        })
        .unwrap()
    }

    fn temp_image(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[test]
    fn test_endpoint_url_keeps_base_prefix() {
        let client = client_for("http://127.0.0.1:8080/api/".to_string());
        let url = client.endpoint_url(Endpoint::Fiber).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/api/identify-fiber");
    }

    #[tokio::test]
    async fn test_submit_sends_single_image_part() {
        let app = Router::new().route("/predict_liquid", post(describe_upload));
        let base_url = spawn_service(app).await;

        let file = temp_image(".png", b"not really a png");
        let image = SelectedImage::new(file.path().to_path_buf());

        let result = client_for(base_url)
            .submit(Endpoint::Liquid, image)
            .await
            .unwrap();

        assert_eq!(
            result,
            AnalysisResult::Prediction(PredictionResponse {
                prediction: Some("image|liquidImage.jpg|image/png|16".to_string()),
            })
        );
    }

    #[tokio::test]
    async fn test_submit_keeps_original_name_for_fiber() {
        async fn fiber(mut multipart: Multipart) -> Json<Value> {
            let field = multipart.next_field().await.unwrap().unwrap();
            assert_eq!(field.name(), Some("image"));
            let file_name = field.file_name().unwrap_or_default().to_string();
            Json(json!({
                "result_image": file_name,
                "statistics": {
                    "total_number_of_particles": 100,
                    "number_of_thin_particles": 25,
                    "fiber_percentage": 25.0
                }
            }))
        }

        let app = Router::new().route("/identify-fiber", post(fiber));
        let base_url = spawn_service(app).await;

        let file = temp_image(".jpg", b"\xff\xd8\xff\xd9");
        let image = SelectedImage::new(file.path().to_path_buf());
        let expected_name = image.file_name.clone();

        let result = client_for(base_url)
            .submit(Endpoint::Fiber, image)
            .await
            .unwrap();

        let AnalysisResult::Fiber(fiber) = result else {
            panic!("expected a fiber result");
        };
        assert_eq!(fiber.result_image, Some(expected_name));
        assert_eq!(
            fiber.statistics.unwrap().number_of_thin_particles,
            Some(25.0)
        );
    }

    #[tokio::test]
    async fn test_server_error_message_is_extracted() {
        async fn failing() -> (StatusCode, Json<Value>) {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "model not loaded" })),
            )
        }

        let app = Router::new().route("/predict_tea_variant", post(failing));
        let base_url = spawn_service(app).await;

        let file = temp_image(".jpg", b"leaf");
        let image = SelectedImage::new(file.path().to_path_buf());

        let err = client_for(base_url)
            .submit(Endpoint::TeaVariant, image)
            .await
            .unwrap_err();

        match err {
            ClientError::Server { status, message } => {
                assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(message, "model not loaded");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_decode_error() {
        async fn html() -> &'static str {
            "<html>oops</html>"
        }

        let app = Router::new().route("/generate_report", post(html));
        let base_url = spawn_service(app).await;

        let file = temp_image(".jpg", b"leaf");
        let image = SelectedImage::new(file.path().to_path_buf());

        let err = client_for(base_url)
            .submit(Endpoint::Report, image)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_missing_file_fails_before_sending() {
        let image = SelectedImage::new("/nonexistent/leaf.jpg".into());

        let err = client_for("http://127.0.0.1:9".to_string())
            .submit(Endpoint::Stroke, image)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::ReadImage { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_an_http_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let file = temp_image(".jpg", b"leaf");
        let image = SelectedImage::new(file.path().to_path_buf());

        let err = client_for(format!("http://{}", addr))
            .submit(Endpoint::Infusion, image)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Http(_)));
    }
}
