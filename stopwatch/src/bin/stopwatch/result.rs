use stopwatch::clock::ClockUnsupported;
use stopwatch::stopwatch::StopwatchStateError;
use thiserror::Error;

pub(crate) type StopwatchResult<T> = Result<T, StopwatchError>;

#[derive(Error, Debug)]
pub(crate) enum StopwatchError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("The monotonic clock is unusable, more details: {0}")]
    Clock(#[from] ClockUnsupported),
    #[error("Stopwatch state violation, more details: {0}")]
    State(#[from] StopwatchStateError),
}
