/// Upload → analyse → display workflow for one page
///
/// Each page moves through Idle → Loading → Showing → Idle, driven by
/// submit, response arrival and close. A page runs one submission at a
/// time: while it is loading every submit button on it is disabled, so
/// pages with several pickers never race on the overlay.

use std::sync::Arc;

use iced::widget::image::Handle;

use super::data::{Preview, SelectedImage};
use crate::analysis::response::{decode_image, AnalysisResult, ImageSlot};
use crate::analysis::{Endpoint, Page};
use crate::error::{ClientError, PreviewError};

/// State of a single picker (file selection + its submit button)
#[derive(Debug, Clone)]
pub struct PickerState {
    pub endpoint: Endpoint,
    pub selected: Option<SelectedImage>,
    pub preview: Option<Preview>,
    /// Bumped on every pick. Reads and submissions remember the value they
    /// started with so late completions for an old pick can be recognised.
    pub generation: u64,
    /// The current selection has already been analysed
    pub submitted: bool,
}

impl PickerState {
    fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            selected: None,
            preview: None,
            generation: 0,
            submitted: false,
        }
    }
}

/// A result currently on screen
#[derive(Debug, Clone)]
pub struct ShownResult {
    pub endpoint: Endpoint,
    pub result: AnalysisResult,
    /// Result images that decoded successfully
    images: Vec<(ImageSlot, Handle)>,
    /// Image opened in the full-size viewer, if any
    pub viewing: Option<ImageSlot>,
}

impl ShownResult {
    pub fn new(endpoint: Endpoint, result: AnalysisResult) -> Self {
        let images = [ImageSlot::Result, ImageSlot::Fiber, ImageSlot::Stroke]
            .into_iter()
            .filter_map(|slot| {
                let encoded = result.image(slot)?;
                match decode_image(encoded) {
                    Ok(bytes) => Some((slot, Handle::from_bytes(bytes))),
                    Err(e) => {
                        log::warn!("⚠️  Dropping undecodable {:?} image: {}", slot, e);
                        None
                    }
                }
            })
            .collect();

        Self {
            endpoint,
            result,
            images,
            viewing: None,
        }
    }

    pub fn image(&self, slot: ImageSlot) -> Option<&Handle> {
        self.images
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, handle)| handle)
    }
}

/// Where a page is in the workflow
#[derive(Debug, Clone, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// A submission from this picker is in flight
    Loading(Endpoint),
    /// The overlay is open
    Showing(ShownResult),
}

/// Everything one page holds
#[derive(Debug, Clone)]
pub struct PageState {
    pub page: Page,
    pub pickers: Vec<PickerState>,
    pub phase: Phase,
}

impl PageState {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            pickers: page.endpoints().iter().copied().map(PickerState::new).collect(),
            phase: Phase::Idle,
        }
    }

    pub fn picker(&self, endpoint: Endpoint) -> Option<&PickerState> {
        self.pickers.iter().find(|p| p.endpoint == endpoint)
    }

    fn picker_mut(&mut self, endpoint: Endpoint) -> Option<&mut PickerState> {
        self.pickers.iter_mut().find(|p| p.endpoint == endpoint)
    }

    /// Record a new pick. Returns the generation the preview read must carry.
    pub fn select(&mut self, endpoint: Endpoint, image: SelectedImage) -> Option<u64> {
        let picker = self.picker_mut(endpoint)?;
        picker.generation += 1;
        picker.selected = Some(image);
        picker.preview = None;
        picker.submitted = false;
        Some(picker.generation)
    }

    /// Apply a finished preview read. Reads for a superseded pick are dropped.
    pub fn preview_loaded(
        &mut self,
        endpoint: Endpoint,
        generation: u64,
        preview: Result<Preview, Arc<PreviewError>>,
    ) -> bool {
        let Some(picker) = self.picker_mut(endpoint) else {
            return false;
        };

        if picker.generation != generation {
            log::debug!("Discarding stale preview for {:?}", endpoint);
            return false;
        }

        match preview {
            Ok(preview) => {
                log::info!("🖼️  Preview ready ({} bytes, {})", preview.size, preview.content_type());
                picker.preview = Some(preview);
            }
            Err(e) => {
                log::error!("❌ Preview failed: {}", e);
                picker.preview = None;
            }
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading(_))
    }

    /// Whether this picker's submission is the one in flight
    pub fn is_loading_picker(&self, endpoint: Endpoint) -> bool {
        matches!(self.phase, Phase::Loading(e) if e == endpoint)
    }

    pub fn is_showing(&self) -> bool {
        matches!(self.phase, Phase::Showing(_))
    }

    pub fn shown(&self) -> Option<&ShownResult> {
        match &self.phase {
            Phase::Showing(shown) => Some(shown),
            _ => None,
        }
    }

    /// Submit is enabled with a fresh selection on an idle page
    pub fn can_submit(&self, endpoint: Endpoint) -> bool {
        matches!(self.phase, Phase::Idle)
            && self
                .picker(endpoint)
                .is_some_and(|p| p.selected.is_some() && !p.submitted)
    }

    /// Move to Loading. Returns what to upload and the pick generation.
    pub fn begin_submit(&mut self, endpoint: Endpoint) -> Option<(SelectedImage, u64)> {
        if !self.can_submit(endpoint) {
            return None;
        }

        let picker = self.picker(endpoint)?;
        let request = (picker.selected.clone()?, picker.generation);
        self.phase = Phase::Loading(endpoint);
        Some(request)
    }

    /// Leave Loading with the submission's outcome.
    ///
    /// Success opens the overlay. A failure is logged; endpoints with a
    /// failure message show it as the prediction, the rest return to Idle.
    pub fn finish_submit(
        &mut self,
        endpoint: Endpoint,
        generation: u64,
        outcome: Result<AnalysisResult, Arc<ClientError>>,
    ) {
        if !self.is_loading_picker(endpoint) {
            log::warn!("⚠️  Ignoring unexpected response for {:?}", endpoint);
            return;
        }

        if let Some(picker) = self.picker_mut(endpoint) {
            if picker.generation == generation {
                picker.submitted = true;
            }
        }

        self.phase = match outcome {
            Ok(result) => {
                log::info!("✅ {} succeeded", endpoint.path());
                Phase::Showing(ShownResult::new(endpoint, result))
            }
            Err(e) => {
                log::error!("❌ {} failed: {}", endpoint.path(), e);
                match endpoint.failure_prediction() {
                    Some(message) => Phase::Showing(ShownResult::new(
                        endpoint,
                        AnalysisResult::synthetic_prediction(message),
                    )),
                    None => Phase::Idle,
                }
            }
        };
    }

    /// Close the overlay, discarding the result
    pub fn close_overlay(&mut self) {
        if self.is_showing() {
            self.phase = Phase::Idle;
        }
    }

    /// Open a result image in the full-size viewer
    pub fn view_image(&mut self, slot: ImageSlot) {
        if let Phase::Showing(shown) = &mut self.phase {
            if shown.image(slot).is_some() {
                shown.viewing = Some(slot);
            }
        }
    }

    pub fn close_image(&mut self) {
        if let Phase::Showing(shown) = &mut self.phase {
            shown.viewing = None;
        }
    }
}
