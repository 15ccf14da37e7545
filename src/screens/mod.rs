pub mod forms;
pub mod home;
pub mod list;
pub mod render;

pub use forms::{Destination, FormOutcome, LoginForm, Notification, SignupForm};
pub use home::{HomeScreen, HomeTab};
pub use list::{ListScreen, ListState};
pub use render::{Card, ListView};
