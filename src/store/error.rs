use derive_more::Display;

// Same trick as the old import errors: derive_more for
// Display and an empty Error impl. The reasons are for
// logs and the CLI, I don't want visitors to see them,
// the web layer picks its own wording.
#[derive(Debug, Display, PartialEq)]
pub enum StoreError {
  #[display(fmt = "Invalid comment: {}", _0)]
  Validation(String),
  #[display(fmt = "Comments file is corrupt: {}", _0)]
  CorruptStore(String),
  #[display(fmt = "Comments file could not be read: {}", _0)]
  Unreadable(String),
  #[display(fmt = "Comments could not be saved: {}", _0)]
  Persist(String)
}

impl std::error::Error for StoreError {}

impl StoreError {
  pub fn is_validation(&self) -> bool {
    matches!(self, StoreError::Validation(_))
  }
}
