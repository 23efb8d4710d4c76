use dioxus::prelude::*;

/// Failures a view can show; the cause is already logged by the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Load,
    Save,
    Delete,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Load => "Veriler yüklenemedi. Lütfen tekrar deneyin.",
            ViewError::Save => "Kaydedilemedi. Lütfen tekrar deneyin.",
            ViewError::Delete => "Kayıt silinemedi. Lütfen tekrar deneyin.",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

/// Write progress of a save button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveState {
    Idle,
    Saving,
    Saved,
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Load),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
