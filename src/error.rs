use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("no cyclists available in your area")]
    NoCandidatesNearby,

    #[error("could not complete the search, please try again")]
    SearchFailed,

    #[error("internal error: {0}")]
    Internal(String),
}
