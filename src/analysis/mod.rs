/// Remote analysis module
///
/// This module handles:
/// - The fixed set of analysis endpoints and what each one returns
/// - Multipart submission of a picked image (client.rs)
/// - Typed decoding of the service's JSON responses (response.rs)

pub mod client;
pub mod response;

/// One remote analysis endpoint. Each picker in the UI submits to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Elevation from an image of the brewed liquid
    Liquid,
    /// Elevation from an image of the infused leaves
    Infusion,
    /// Tea variant from an image of dry particles
    TeaVariant,
    /// Fiber detection with particle statistics
    Fiber,
    /// Stroke (brown particle) detection with statistics
    Stroke,
    /// Combined variant + fiber + stroke report
    Report,
}

/// Which JSON shape an endpoint answers with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Prediction,
    Fiber,
    Stroke,
    Report,
}

impl Endpoint {
    /// URL path on the analysis service
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Liquid => "/predict_liquid",
            Endpoint::Infusion => "/predict_infusion",
            Endpoint::TeaVariant => "/predict_tea_variant",
            Endpoint::Fiber => "/identify-fiber",
            Endpoint::Stroke => "/identify-stroke",
            Endpoint::Report => "/generate_report",
        }
    }

    pub fn response_kind(self) -> ResponseKind {
        match self {
            Endpoint::Liquid | Endpoint::Infusion | Endpoint::TeaVariant => ResponseKind::Prediction,
            Endpoint::Fiber => ResponseKind::Fiber,
            Endpoint::Stroke => ResponseKind::Stroke,
            Endpoint::Report => ResponseKind::Report,
        }
    }

    /// File name sent with the multipart part.
    /// Fiber and stroke keep the user's file name, the others use a fixed one.
    pub fn upload_name(self, original: &str) -> String {
        match self {
            Endpoint::Liquid => "liquidImage.jpg".to_string(),
            Endpoint::Infusion => "infusionImage.jpg".to_string(),
            Endpoint::TeaVariant | Endpoint::Report => "particleImage.jpg".to_string(),
            Endpoint::Fiber | Endpoint::Stroke => original.to_string(),
        }
    }

    /// Label shown above the picker
    pub fn picker_label(self) -> &'static str {
        match self {
            Endpoint::Liquid => "Add Liquid Image:",
            Endpoint::Infusion => "Add Infusion Image:",
            Endpoint::TeaVariant | Endpoint::Report => "Add Particle Image:",
            Endpoint::Fiber => "Upload Fiber Image:",
            Endpoint::Stroke => "Upload Stroke Image:",
        }
    }

    /// Heading used for prediction results, e.g. "Elevation (Liquid):"
    pub fn prediction_label(self) -> Option<&'static str> {
        match self {
            Endpoint::Liquid => Some("Elevation (Liquid):"),
            Endpoint::Infusion => Some("Elevation (Infusion):"),
            Endpoint::TeaVariant => Some("Tea Variant (Particle):"),
            _ => None,
        }
    }

    /// Prediction shown in place of a result when the submission fails.
    /// Endpoints without one keep the overlay closed on failure.
    pub fn failure_prediction(self) -> Option<&'static str> {
        match self {
            Endpoint::TeaVariant => Some("Error predicting tea variant."),
            _ => None,
        }
    }

    /// The page this endpoint's picker lives on
    pub fn page(self) -> Page {
        match self {
            Endpoint::Liquid | Endpoint::Infusion => Page::Elevation,
            Endpoint::TeaVariant => Page::Variant,
            Endpoint::Fiber => Page::Fiber,
            Endpoint::Stroke => Page::Stroke,
            Endpoint::Report => Page::Report,
        }
    }
}

/// A screen of the application, grouping one or more pickers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Variant,
    Elevation,
    Fiber,
    Stroke,
    Report,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Variant,
        Page::Elevation,
        Page::Fiber,
        Page::Stroke,
        Page::Report,
    ];

    /// Short name for the navigation bar
    pub fn nav_label(self) -> &'static str {
        match self {
            Page::Variant => "Variant",
            Page::Elevation => "Elevation",
            Page::Fiber => "Fiber",
            Page::Stroke => "Stroke",
            Page::Report => "Report",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Variant => "Tea Variant Identification",
            Page::Elevation => "Tea Elevation Identification",
            Page::Fiber => "Fiber Analysis",
            Page::Stroke => "Stroke Analysis",
            Page::Report => "Generate Report",
        }
    }

    /// Pickers on this page, in display order
    pub fn endpoints(self) -> &'static [Endpoint] {
        match self {
            Page::Variant => &[Endpoint::TeaVariant],
            Page::Elevation => &[Endpoint::Liquid, Endpoint::Infusion],
            Page::Fiber => &[Endpoint::Fiber],
            Page::Stroke => &[Endpoint::Stroke],
            Page::Report => &[Endpoint::Report],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ENDPOINTS: [Endpoint; 6] = [
        Endpoint::Liquid,
        Endpoint::Infusion,
        Endpoint::TeaVariant,
        Endpoint::Fiber,
        Endpoint::Stroke,
        Endpoint::Report,
    ];

    #[test]
    fn test_every_endpoint_belongs_to_its_page() {
        for endpoint in ALL_ENDPOINTS {
            assert!(endpoint.page().endpoints().contains(&endpoint));
        }
    }

    #[test]
    fn test_every_page_has_a_picker() {
        for page in Page::ALL {
            assert!(!page.endpoints().is_empty());
        }
    }

    #[test]
    fn test_upload_names() {
        assert_eq!(Endpoint::Liquid.upload_name("leaf.png"), "liquidImage.jpg");
        assert_eq!(Endpoint::Report.upload_name("leaf.png"), "particleImage.jpg");
        assert_eq!(Endpoint::Fiber.upload_name("leaf.png"), "leaf.png");
    }

    #[test]
    fn test_only_variant_reports_failures() {
        let with_message: Vec<_> = ALL_ENDPOINTS
            .into_iter()
            .filter(|e| e.failure_prediction().is_some())
            .collect();
        assert_eq!(with_message, vec![Endpoint::TeaVariant]);
    }

    #[test]
    fn test_prediction_labels_match_response_kind() {
        for endpoint in ALL_ENDPOINTS {
            assert_eq!(
                endpoint.prediction_label().is_some(),
                endpoint.response_kind() == ResponseKind::Prediction
            );
        }
    }
}
