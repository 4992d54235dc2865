mod about;
mod quiz;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use about::AboutView;
pub use quiz::QuizView;
pub use state::{ViewError, ViewState};
