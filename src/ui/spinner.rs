/// Loading spinner drawn next to "Processing..." while a submission runs
use iced::widget::canvas::{self, path, Path, Stroke};
use iced::{Color, Radians, Rectangle};
use std::f32::consts::PI;

use crate::Message;

/// Fraction of a turn the arc moves per animation tick
const STEP: f32 = 0.025;

/// Rotating quarter-circle. `phase` is the rotation in turns (0.0..1.0).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spinner {
    pub phase: f32,
}

impl Spinner {
    /// Advance by one animation tick
    pub fn advance(self) -> Self {
        Self {
            phase: (self.phase + STEP).fract(),
        }
    }
}

impl canvas::Program<Message> for Spinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        let radius = bounds.width.min(bounds.height) / 2.0 - 2.0;
        if radius <= 0.0 {
            return vec![frame.into_geometry()];
        }

        let center = frame.center();
        let text = theme.palette().text;

        // Faint full ring as the track
        frame.stroke(
            &Path::circle(center, radius),
            Stroke::default()
                .with_color(Color { a: 0.25, ..text })
                .with_width(3.0),
        );

        let start = self.phase * 2.0 * PI;
        let arc = Path::new(|builder| {
            builder.arc(path::Arc {
                center,
                radius,
                start_angle: Radians(start),
                end_angle: Radians(start + PI / 2.0),
            });
        });
        frame.stroke(&arc, Stroke::default().with_color(text).with_width(3.0));

        vec![frame.into_geometry()]
    }
}
