/// Result presenter
///
/// Turns an analysis result into a flat list of display blocks. Only the
/// fields present in the response produce blocks. Widgets are built from
/// these blocks in `overlay.rs`.

use crate::analysis::response::{
    AnalysisResult, FiberResponse, FiberStatistics, ImageSlot, ReportResponse, StrokeResponse,
    StrokeStatistics,
};
use crate::analysis::{Endpoint, ResponseKind};

/// One element of the result overlay
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading(String),
    /// Bold label followed by a value
    Field { label: String, value: String },
    Line(String),
    /// A base64 result image with its full-size viewer button.
    /// `missing` is shown instead when the payload cannot be decoded.
    Image {
        slot: ImageSlot,
        heading: &'static str,
        view_label: &'static str,
        missing: &'static str,
    },
}

impl Block {
    fn heading(text: impl Into<String>) -> Self {
        Block::Heading(text.into())
    }

    fn field(label: &str, value: impl Into<String>) -> Self {
        Block::Field {
            label: label.to_string(),
            value: value.into(),
        }
    }

    fn line(text: impl Into<String>) -> Self {
        Block::Line(text.into())
    }

    /// Plain-text rendering, e.g. "Fiber Ratio: 25.00%"
    pub fn text(&self) -> String {
        match self {
            Block::Heading(text) | Block::Line(text) => text.clone(),
            Block::Field { label, value } => format!("{} {}", label, value),
            Block::Image { heading, .. } => heading.to_string(),
        }
    }
}

/// Overlay title for an endpoint's results
pub fn title(endpoint: Endpoint) -> &'static str {
    match endpoint.response_kind() {
        ResponseKind::Prediction => "Results!",
        ResponseKind::Fiber | ResponseKind::Stroke => "Analysis Results",
        ResponseKind::Report => "Report",
    }
}

/// Build the overlay content for a result
pub fn present(endpoint: Endpoint, result: &AnalysisResult) -> Vec<Block> {
    match result {
        AnalysisResult::Prediction(response) => {
            let label = endpoint.prediction_label().unwrap_or("Prediction:");
            response
                .prediction
                .iter()
                .map(|prediction| Block::field(label, prediction.as_str()))
                .collect()
        }
        AnalysisResult::Fiber(response) => present_fiber(response),
        AnalysisResult::Stroke(response) => present_stroke(response),
        AnalysisResult::Report(response) => present_report(response),
    }
}

/// Plain-text lines of a result, in display order
pub fn lines(endpoint: Endpoint, result: &AnalysisResult) -> Vec<String> {
    present(endpoint, result).iter().map(Block::text).collect()
}

fn present_fiber(response: &FiberResponse) -> Vec<Block> {
    let mut blocks = Vec::new();

    if has_image(&response.result_image) {
        blocks.push(Block::Image {
            slot: ImageSlot::Result,
            heading: "Detected Fibers:",
            view_label: "View Full Image",
            missing: "No image available.",
        });
    }

    if let Some(stats) = &response.statistics {
        blocks.push(Block::heading("Fiber Statistics"));
        if let Some(total) = stats.total_number_of_particles {
            blocks.push(Block::field("Total Particles:", format_count(total)));
        }
        if let Some(thin) = stats.number_of_thin_particles {
            blocks.push(Block::field("Fiber Particles:", format_count(thin)));
        }
        if let Some(percentage) = stats.fiber_percentage {
            blocks.push(Block::field("Fiber Ratio:", format_percentage(percentage)));
        }
    }

    blocks
}

fn present_stroke(response: &StrokeResponse) -> Vec<Block> {
    let mut blocks = Vec::new();

    if has_image(&response.result_image) {
        blocks.push(Block::Image {
            slot: ImageSlot::Result,
            heading: "Processed Image:",
            view_label: "View Full Image",
            missing: "No image available.",
        });
    }

    if let Some(stats) = &response.statistics {
        blocks.push(Block::heading("Stroke Statistics"));
        if let Some(contours) = stats.number_of_external_contours {
            blocks.push(Block::field("Total Particles:", format_count(contours)));
        }
        if let Some(brown) = stats.number_of_brown_particles {
            blocks.push(Block::field("Brown Particles:", format_count(brown)));
        }
        if let Some(ratio) = stats.brown_particle_ratio {
            blocks.push(Block::field("Brown Particle Ratio:", format_percentage(ratio)));
        }
    }

    blocks
}

fn present_report(response: &ReportResponse) -> Vec<Block> {
    let mut blocks = Vec::new();

    if let Some(variant) = &response.tea_variant {
        blocks.push(Block::field("Tea Variant:", variant.as_str()));
    }

    let thin = thin_particles(response.fiber_statistics.as_ref());
    if thin > 0.0 {
        if has_image(&response.fiber_image) {
            blocks.push(Block::Image {
                slot: ImageSlot::Fiber,
                heading: "Extracted Fibers:",
                view_label: "View Fiber Image",
                missing: "No fiber image available.",
            });
        } else {
            blocks.push(Block::heading("Extracted Fibers:"));
            blocks.push(Block::line("No fiber image available."));
        }
    } else {
        blocks.push(Block::line("No fibers detected."));
    }

    if let Some(stats) = &response.fiber_statistics {
        blocks.push(Block::field(
            "Total Number of Particles:",
            format_count(stats.total_number_of_particles.unwrap_or(0.0)),
        ));
        blocks.push(Block::heading("Fiber Analysis:"));
        blocks.push(Block::field("Number of Fiber Particles:", format_count(thin)));
        blocks.push(Block::field(
            "Fiber Percentage:",
            format_percentage(stats.fiber_percentage.unwrap_or(0.0)),
        ));
    }

    let brown = brown_particles(response.stroke_statistics.as_ref());
    if brown > 0.0 {
        if has_image(&response.stroke_image) {
            blocks.push(Block::Image {
                slot: ImageSlot::Stroke,
                heading: "Extracted Strokes:",
                view_label: "View Stroke Image",
                missing: "No stroke image available.",
            });
        } else {
            blocks.push(Block::heading("Extracted Strokes:"));
            blocks.push(Block::line("No stroke image available."));
        }
    } else {
        blocks.push(Block::line("No strokes detected to display."));
    }

    if response.stroke_statistics.is_some() {
        let total = response
            .fiber_statistics
            .as_ref()
            .and_then(|s| s.total_number_of_particles);

        blocks.push(Block::heading("Stroke Analysis:"));
        blocks.push(Block::field("Number of Stroke Particles:", format_count(brown)));
        blocks.push(Block::field(
            "Stroke Percentage:",
            format_percentage(stroke_percentage(brown, total)),
        ));
    }

    blocks
}

fn has_image(encoded: &Option<String>) -> bool {
    encoded.as_deref().is_some_and(|s| !s.trim().is_empty())
}

fn thin_particles(stats: Option<&FiberStatistics>) -> f64 {
    stats.and_then(|s| s.number_of_thin_particles).unwrap_or(0.0)
}

fn brown_particles(stats: Option<&StrokeStatistics>) -> f64 {
    stats.and_then(|s| s.number_of_brown_particles).unwrap_or(0.0)
}

/// Brown particles as a share of all particles counted by the fiber pass.
/// Zero when the total is missing or zero.
pub fn stroke_percentage(brown: f64, total: Option<f64>) -> f64 {
    match total {
        Some(total) if total > 0.0 => {
            let percentage = brown / total * 100.0;
            if percentage.is_finite() {
                percentage
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

/// Whole counts print without a fractional part ("100", not "100.0")
fn format_count(value: f64) -> String {
    format!("{}", value)
}

fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}
