mod catalog;
mod charts;
mod countdown;
mod entry;
mod home;
mod progress;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use catalog::CatalogView;
pub use countdown::CountdownWidget;
pub use home::HomeView;
pub use state::{SaveState, ViewError, ViewState, view_state_from_resource};
