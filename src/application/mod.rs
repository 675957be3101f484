//! Application layer: the session gate and per-screen controllers.

pub mod screens;
pub mod session;

pub use screens::{
    BookingsScreen, FormPhase, LoginMode, LoginScreen, NewBookingForm, ScreenPhase,
    SettingsScreen, TutorsScreen,
};
pub use session::{Destination, SessionController, SessionView};
