#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    ExportFailed,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::ExportFailed => "Could not write the PDF. Check the export folder and try again.",
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

impl<T> ViewState<T> {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_failure_points_at_the_folder() {
        let state = ViewState::<String>::Error(ViewError::ExportFailed);
        let ViewState::Error(err) = state else {
            panic!("expected an error state");
        };
        assert!(err.message().contains("export folder"));
        assert!(!ViewState::<String>::Idle.is_loading());
        assert!(ViewState::<String>::Loading.is_loading());
    }
}
