/// Image picking and local preview generation
use rfd::FileDialog;
use std::path::PathBuf;

use crate::analysis::Endpoint;
use crate::error::PreviewError;
use crate::state::data::{Preview, SelectedImage};

/// Extensions offered by the dialog's image filter. "All files" stays
/// available since nothing is validated before upload.
const IMAGE_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "bmp", "gif", "tif", "tiff", "webp"];

/// Show the native file dialog for one picker
pub fn pick_image(endpoint: Endpoint) -> Option<PathBuf> {
    FileDialog::new()
        .set_title(endpoint.picker_label().trim_end_matches(':'))
        .add_filter("Images", &IMAGE_EXTENSIONS)
        .add_filter("All files", &["*"])
        .pick_file()
}

/// Read a picked file and build its preview
pub async fn load_preview(image: SelectedImage) -> Result<Preview, PreviewError> {
    let bytes = tokio::fs::read(&image.path)
        .await
        .map_err(|source| PreviewError::Read {
            path: image.path.clone(),
            source,
        })?;

    if bytes.is_empty() {
        return Err(PreviewError::Empty(image.path));
    }

    Ok(Preview::from_bytes(bytes, image.content_type()))
}
