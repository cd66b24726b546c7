use doctor_directory::{DoctorRecord, FetchFailure};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone)]
pub(super) enum Action {
    /// Start the one listing fetch for this page load.
    LoadDoctors,
    RetryLoad,
    DoctorsLoaded(Result<Vec<DoctorRecord>, FetchFailure>),
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
