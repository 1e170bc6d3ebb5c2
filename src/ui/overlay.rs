/// Result overlay and full-size image viewer
use iced::widget::{button, center, column, container, opaque, row, scrollable, stack, text, Image};
use iced::{Alignment, Color, ContentFit, Element, Font, Length, Theme};

use super::presenter::{self, Block};
use crate::analysis::Page;
use crate::state::workflow::ShownResult;
use crate::Message;

/// Layer `content` above `base` on a dimmed backdrop that swallows input
pub fn modal<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(center(opaque(content)).style(|_theme: &Theme| container::Style {
            background: Some(Color { a: 0.7, ..Color::BLACK }.into()),
            ..container::Style::default()
        }))
    ]
    .into()
}

/// The results dialog for a page
pub fn results(page: Page, shown: &ShownResult) -> Element<'_, Message> {
    let mut content = column![text(presenter::title(shown.endpoint)).size(32)]
        .spacing(12)
        .padding(24)
        .align_x(Alignment::Center);

    for block in presenter::present(shown.endpoint, &shown.result) {
        content = content.push(block_view(page, shown, block));
    }

    content = content.push(
        button("Close")
            .on_press(Message::CloseOverlay(page))
            .style(button::success)
            .padding(10),
    );

    container(scrollable(content))
        .max_width(640.0)
        .max_height(720.0)
        .style(container::rounded_box)
        .into()
}

fn block_view(page: Page, shown: &ShownResult, block: Block) -> Element<'_, Message> {
    match block {
        Block::Heading(heading) => text(heading).size(22).into(),
        Block::Field { label, value } => row![
            text(label).font(Font {
                weight: iced::font::Weight::Bold,
                ..Font::DEFAULT
            }),
            text(value),
        ]
        .spacing(6)
        .into(),
        Block::Line(line) => text(line).into(),
        Block::Image {
            slot,
            heading,
            view_label,
            missing,
        } => match shown.image(slot) {
            Some(handle) => column![
                text(heading).size(18),
                Image::new(handle.clone())
                    .width(Length::Fill)
                    .height(Length::Fixed(260.0))
                    .content_fit(ContentFit::Contain),
                button(view_label)
                    .on_press(Message::ViewImage(page, slot))
                    .style(button::primary)
                    .padding(10),
            ]
            .spacing(10)
            .align_x(Alignment::Center)
            .into(),
            None => column![text(heading).size(18), text(missing)]
                .spacing(10)
                .align_x(Alignment::Center)
                .into(),
        },
    }
}

/// Full-size viewer for the image being inspected, if any
pub fn full_image(page: Page, shown: &ShownResult) -> Option<Element<'_, Message>> {
    let handle = shown.image(shown.viewing?)?;

    let viewer = column![
        Image::new(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Contain),
        button("Close")
            .on_press(Message::CloseImage(page))
            .style(button::secondary)
            .padding(10),
    ]
    .spacing(12)
    .padding(16)
    .align_x(Alignment::Center);

    Some(
        container(viewer)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(container::rounded_box)
            .into(),
    )
}
