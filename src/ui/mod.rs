/// User interface module
///
/// - Page layout with pickers and submit buttons (page.rs)
/// - Result overlay and full-size image viewer (overlay.rs)
/// - Response → display block mapping (presenter.rs)
/// - Loading spinner canvas (spinner.rs)

pub mod overlay;
pub mod page;
pub mod presenter;
pub mod spinner;
