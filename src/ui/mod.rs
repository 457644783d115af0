//! GUI screens, portal pages, and application state.

pub mod app;
pub mod appointments_panel;
pub mod booking_panel;
pub mod components;
pub mod health_tips_panel;
pub mod home;
pub mod login_screen;
pub mod records_panel;
pub mod signup_screen;
pub mod toasts;
pub mod welcome;

pub use app::{App, Page, Screen};
pub use toasts::Toasts;
