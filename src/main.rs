use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length, Subscription, Task, Theme};
use std::sync::Arc;
use std::time::Duration;

mod analysis;
mod config;
mod error;
mod picker;
mod state;
mod ui;

use analysis::client::SubmissionClient;
use analysis::response::{AnalysisResult, ImageSlot};
use analysis::{Endpoint, Page};
use error::{ClientError, PreviewError};
use state::data::{Preview, SelectedImage};
use ui::spinner::Spinner;

/// Main application state
struct QualiTea {
    /// HTTP client for the analysis service
    client: SubmissionClient,
    /// Workflow state of every page
    pages: state::Pages,
    /// Page currently on screen
    current: Page,
    /// Loading animation, only ticking while a submission runs
    spinner: Spinner,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User picked a page in the navigation bar
    Navigate(Page),
    /// User clicked "Choose Image" on a picker
    PickImage(Endpoint),
    /// Background preview read finished (picker, pick generation, outcome)
    PreviewLoaded(Endpoint, u64, Result<Preview, Arc<PreviewError>>),
    /// User clicked "Submit" on a picker
    Submit(Endpoint),
    /// Background submission finished (picker, pick generation, outcome)
    Submitted(Endpoint, u64, Result<AnalysisResult, Arc<ClientError>>),
    /// Open a result image at full size
    ViewImage(Page, ImageSlot),
    /// Close the full-size viewer
    CloseImage(Page),
    /// Close the result overlay
    CloseOverlay(Page),
    /// Spinner animation tick
    Tick,
}

impl QualiTea {
    /// Create a new instance of the application
    fn new(client: SubmissionClient) -> (Self, Task<Message>) {
        (
            QualiTea {
                client,
                pages: state::Pages::new(),
                current: Page::default(),
                spinner: Spinner::default(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(page) => {
                self.current = page;
                Task::none()
            }
            Message::PickImage(endpoint) => {
                // Show the native file picker dialog
                let Some(path) = picker::pick_image(endpoint) else {
                    return Task::none();
                };

                let image = SelectedImage::new(path);
                log::info!("📂 Selected {} for {}", image.path.display(), endpoint.path());

                let page = self.pages.get_mut(endpoint.page());
                match page.select(endpoint, image.clone()) {
                    Some(generation) => Task::perform(picker::load_preview(image), move |preview| {
                        Message::PreviewLoaded(endpoint, generation, preview.map_err(Arc::new))
                    }),
                    None => Task::none(),
                }
            }
            Message::PreviewLoaded(endpoint, generation, preview) => {
                self.pages
                    .get_mut(endpoint.page())
                    .preview_loaded(endpoint, generation, preview);
                Task::none()
            }
            Message::Submit(endpoint) => {
                let page = self.pages.get_mut(endpoint.page());
                let Some((image, generation)) = page.begin_submit(endpoint) else {
                    log::debug!("Submit ignored for {:?}", endpoint);
                    return Task::none();
                };

                Task::perform(
                    self.client.clone().submit(endpoint, image),
                    move |outcome| {
                        Message::Submitted(endpoint, generation, outcome.map_err(Arc::new))
                    },
                )
            }
            Message::Submitted(endpoint, generation, outcome) => {
                let page = self.pages.get_mut(endpoint.page());
                page.finish_submit(endpoint, generation, outcome);

                if let Some(shown) = page.shown() {
                    log::debug!(
                        "📋 {}",
                        ui::presenter::lines(shown.endpoint, &shown.result).join(" | ")
                    );
                }
                Task::none()
            }
            Message::ViewImage(page, slot) => {
                self.pages.get_mut(page).view_image(slot);
                Task::none()
            }
            Message::CloseImage(page) => {
                self.pages.get_mut(page).close_image();
                Task::none()
            }
            Message::CloseOverlay(page) => {
                self.pages.get_mut(page).close_overlay();
                Task::none()
            }
            Message::Tick => {
                self.spinner = self.spinner.advance();
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let nav = Page::ALL.iter().fold(row![].spacing(8), |nav, &page| {
            let style: fn(&Theme, button::Status) -> button::Style = if page == self.current {
                button::primary
            } else {
                button::secondary
            };
            nav.push(
                button(page.nav_label())
                    .on_press(Message::Navigate(page))
                    .style(style)
                    .padding(10),
            )
        });

        let page = self.pages.get(self.current);

        let content = column![
            text("QualiTea").size(48),
            nav,
            ui::page::view(page, self.spinner),
        ]
        .spacing(20)
        .padding(40)
        .align_x(Alignment::Center);

        let base = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill);

        let Some(shown) = page.shown() else {
            return base.into();
        };

        let with_results = ui::overlay::modal(base, ui::overlay::results(self.current, shown));

        match ui::overlay::full_image(self.current, shown) {
            Some(viewer) => ui::overlay::modal(with_results, viewer),
            None => with_results,
        }
    }

    /// Drive the spinner only while something is loading
    fn subscription(&self) -> Subscription<Message> {
        if self.pages.any_loading() {
            iced::time::every(Duration::from_millis(16)).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("qualitea=info"))
        .init();

    let config = config::Config::load();
    log::info!("🍵 QualiTea using analysis service at {}", config.base_url);

    let client = match SubmissionClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            log::error!("❌ Failed to create HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    iced::application("QualiTea", QualiTea::update, QualiTea::view)
        .subscription(QualiTea::subscription)
        .theme(QualiTea::theme)
        .centered()
        .run_with(move || QualiTea::new(client))
}
