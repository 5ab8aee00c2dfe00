#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "event name \"{0}\" is invalid, only alphanumeric characters, underscores, and periods are allowed"
    )]
    InvalidName(String),
}
