/// Page layout: one column per picker with preview and submit button
use iced::widget::{button, canvas, column, row, text, Image, Space};
use iced::{Alignment, ContentFit, Element, Length};

use super::spinner::Spinner;
use crate::analysis::Endpoint;
use crate::state::workflow::{PageState, PickerState};
use crate::Message;

const PREVIEW_SIZE: f32 = 280.0;

pub fn view(state: &PageState, spinner: Spinner) -> Element<'_, Message> {
    let pickers = state
        .pickers
        .iter()
        .fold(row![].spacing(48), |pickers, picker| {
            pickers.push(picker_view(state, picker, spinner))
        });

    column![text(state.page.title()).size(36), pickers]
        .spacing(24)
        .align_x(Alignment::Center)
        .into()
}

fn picker_view<'a>(
    state: &'a PageState,
    picker: &'a PickerState,
    spinner: Spinner,
) -> Element<'a, Message> {
    let endpoint = picker.endpoint;

    let file_line = match (&picker.selected, &picker.preview) {
        (Some(selected), Some(preview)) => format!(
            "{} ({}, {:.1} KB)",
            selected.file_name,
            preview.content_type(),
            preview.size as f64 / 1024.0
        ),
        (Some(selected), None) => selected.file_name.clone(),
        (None, _) => "No file chosen".to_string(),
    };

    let preview: Element<'a, Message> = match &picker.preview {
        Some(preview) => Image::new(preview.handle.clone())
            .width(Length::Fixed(PREVIEW_SIZE))
            .height(Length::Fixed(PREVIEW_SIZE))
            .content_fit(ContentFit::Contain)
            .into(),
        None => Space::new(Length::Fixed(PREVIEW_SIZE), Length::Fixed(PREVIEW_SIZE)).into(),
    };

    column![
        text(endpoint.picker_label()).size(18),
        row![
            button("Choose Image").on_press(Message::PickImage(endpoint)),
            text(file_line),
        ]
        .spacing(10)
        .align_y(Alignment::Center),
        preview,
        submit_button(state, endpoint, spinner),
    ]
    .spacing(16)
    .align_x(Alignment::Center)
    .into()
}

fn submit_button(state: &PageState, endpoint: Endpoint, spinner: Spinner) -> Element<'_, Message> {
    let label: Element<'_, Message> = if state.is_loading_picker(endpoint) {
        row![
            canvas(spinner)
                .width(Length::Fixed(20.0))
                .height(Length::Fixed(20.0)),
            text("Processing..."),
        ]
        .spacing(10)
        .align_y(Alignment::Center)
        .into()
    } else {
        text("Submit").into()
    };

    button(label)
        .on_press_maybe(state.can_submit(endpoint).then_some(Message::Submit(endpoint)))
        .style(button::success)
        .padding(10)
        .into()
}
