/// Lifecycle phase shared by the three request flows.
///
/// `Locating` is only entered by the weather flow, while a device fix is
/// being acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Locating,
    Loading,
    Ready,
    Error,
}

/// One flow's status, latest value, and error banner text.
///
/// Flows are siblings, not a composite: each is reset, loaded, and failed
/// independently by the state machine.
#[derive(Debug, Clone)]
pub struct Flow<T> {
    pub status: Status,
    pub value: Option<T>,
    pub error: Option<String>,
}

impl<T> Default for Flow<T> {
    fn default() -> Self {
        Self {
            status: Status::default(),
            value: None,
            error: None,
        }
    }
}

impl<T> Flow<T> {
    /// Back to `Idle` with no value and no error.
    pub(crate) fn reset(&mut self) {
        self.status = Status::Idle;
        self.value = None;
        self.error = None;
    }

    /// Into `Loading`, clearing any previous error banner.
    pub(crate) fn loading(&mut self) {
        self.status = Status::Loading;
        self.error = None;
    }

    /// Into `Ready` with a fresh value, replacing the previous one.
    pub(crate) fn ready(&mut self, value: T) {
        self.status = Status::Ready;
        self.value = Some(value);
        self.error = None;
    }

    /// Into `Error`. The value is left untouched; callers that must clear
    /// it do so explicitly.
    pub(crate) fn fail(&mut self, message: String) {
        self.status = Status::Error;
        self.error = Some(message);
    }
}
