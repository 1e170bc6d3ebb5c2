/// Shared data structures for the application state
///
/// These structs flow between the picker, the submission client and the UI.

use std::path::PathBuf;

use base64::Engine;
use iced::widget::image::Handle;

/// Fallback content type for files whose extension says nothing useful
pub const OCTET_STREAM: &str = "application/octet-stream";

/// A file the user picked for analysis
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    /// Full path to the file on disk
    pub path: PathBuf,
    /// Filename only (e.g., "leaves_01.jpg")
    pub file_name: String,
}

impl SelectedImage {
    pub fn new(path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        Self { path, file_name }
    }

    /// Content type inferred from the extension
    pub fn content_type(&self) -> &'static str {
        image::ImageFormat::from_path(&self.path)
            .map(|format| format.to_mime_type())
            .unwrap_or(OCTET_STREAM)
    }
}

/// Local preview of a selected image
#[derive(Debug, Clone)]
pub struct Preview {
    /// `data:<mime>;base64,<payload>` encoding of the file
    pub data_url: String,
    /// Decoded handle for the image widget
    pub handle: Handle,
    /// Size of the file in bytes
    pub size: usize,
}

impl Preview {
    pub fn from_bytes(bytes: Vec<u8>, content_type: &str) -> Self {
        let data_url = data_url(&bytes, content_type);
        let size = bytes.len();

        Self {
            data_url,
            handle: Handle::from_bytes(bytes),
            size,
        }
    }

    /// The content type recorded in the data URL header
    pub fn content_type(&self) -> &str {
        self.data_url
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .unwrap_or(OCTET_STREAM)
    }
}

/// Encode bytes as a base64 data URL
pub fn data_url(bytes: &[u8], content_type: &str) -> String {
    format!(
        "data:{};base64,{}",
        content_type,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}
