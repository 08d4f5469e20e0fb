#[derive(Debug, thiserror::Error)]
pub enum LandingError {
    #[error("required element #{0} not found")]
    MissingElement(&'static str),
    #[error("no window or document")]
    NoDocument,
}
