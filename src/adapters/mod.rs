//! Console adapters for the bootstrap ports.

mod console_error_presenter;
mod console_navigation;
mod splash_renderer;

pub use console_error_presenter::ConsoleErrorPresenter;
pub use console_navigation::ConsoleNavigation;
pub use splash_renderer::render_splash;
