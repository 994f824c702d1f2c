/*
 * The comment store owns the reviews JSON file
 * and the in-memory list of comments.
 *
 * Everything is blocking std::fs, the file is tiny.
 * There's no locking between processes: if two of
 * them write the same file, the last one wins.
 */

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use log::{debug, error, info};
use crate::utils::time_utils;
pub mod entities;
pub mod error;
pub mod rating;
mod helpers;
mod seed;
pub use entities::{Comment, NewComment};
pub use error::StoreError;
pub use rating::RatingSummary;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

pub struct CommentStore {
  path: PathBuf,
  // None until load() has been called once.
  comments: Option<Vec<Comment>>
}

impl CommentStore {

  pub fn new<P: AsRef<Path>>(path: P) -> Self {
    Self {
      path: path.as_ref().to_path_buf(),
      comments: None
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn is_loaded(&self) -> bool {
    self.comments.is_some()
  }

  // Empty slice if nothing was loaded yet. I thought about
  // loading lazily in here but that would need &mut self
  // everywhere, and the page only reads.
  pub fn comments(&self) -> &[Comment] {
    self.comments.as_deref().unwrap_or(&[])
  }

  // A missing file gives the seed list. A file that's
  // there but broken is an error: falling back to the
  // seed list would overwrite it on the next append.
  pub fn load(&mut self) -> Result<&[Comment], StoreError> {
    let comments = match fs::read_to_string(&self.path) {
      Ok(contents) => {
        let comments = parse_comments(&contents)?;
        info!("Loaded {} comments from {:?}", comments.len(), self.path);
        comments
      },
      Err(e) if e.kind() == ErrorKind::NotFound => {
        info!("No comments file at {:?}, using the seed comments", self.path);
        seed::seed_comments()
      },
      Err(e) => {
        error!("Could not read comments file {:?} - {}", self.path, e);
        return Err(StoreError::Unreadable(e.to_string()));
      }
    };
    self.comments = Some(comments);
    Ok(self.comments())
  }

  // Write-through: when this returns Ok the file has the
  // new comment in it. If saving fails, the comment is
  // taken back out of memory too.
  pub fn append(&mut self, new_comment: NewComment) -> Result<&Comment, StoreError> {
    let comment = validate(new_comment)?;
    if !self.is_loaded() {
      self.load()?;
    }
    // Taking the Vec out is the easiest way I found to
    // push, persist with &self and still put it back
    // afterwards without fighting the borrow checker.
    let mut comments = self.comments.take().unwrap_or_default();
    comments.push(comment);
    if let Err(e) = self.persist(&comments) {
      error!("Rolling back comment from {} - {}",
        comments.last().map(|c| c.name.as_str()).unwrap_or(""), e);
      comments.pop();
      self.comments = Some(comments);
      return Err(e);
    }
    debug!("Appended comment, {} comments total", comments.len());
    self.comments = Some(comments);
    // Can't be empty, we just pushed to it.
    self.comments().last()
      .ok_or_else(|| StoreError::Persist(String::from("Comment list is empty after append")))
  }

  pub fn persist(&self, records: &[Comment]) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(records)
      .map_err(|e| StoreError::Persist(e.to_string()))?;
    helpers::atomic_write(&self.path, json.as_bytes())
      .map_err(|e| {
        error!("Could not write comments file {:?} - {}", self.path, e);
        StoreError::Persist(e.to_string())
      })
  }

  pub fn average_rating(&self) -> RatingSummary {
    rating::rating_summary(self.comments())
  }

}

fn parse_comments(contents: &str) -> Result<Vec<Comment>, StoreError> {
  let comments: Vec<Comment> = serde_json::from_str(contents)
    .map_err(|e| StoreError::CorruptStore(e.to_string()))?;
  // Ratings have to stay in range for everything stored,
  // a file saying otherwise was not written by us.
  if let Some((i, c)) = comments.iter()
    .enumerate()
    .find(|(_, c)| c.rating.map_or(false, |r| !is_valid_rating(r))) {
      return Err(StoreError::CorruptStore(
        format!("Comment {} has an invalid rating: {:?}", i, c.rating)
      ));
    }
  Ok(comments)
}

pub fn is_valid_rating(rating: u8) -> bool {
  (MIN_RATING..=MAX_RATING).contains(&rating)
}

fn validate(new_comment: NewComment) -> Result<Comment, StoreError> {
  let name = new_comment.name.trim();
  let comment = new_comment.comment.trim();
  if name.is_empty() || comment.is_empty() {
    return Err(StoreError::Validation(
      String::from("Name and comment cannot be empty")
    ));
  }
  if let Some(rating) = new_comment.rating {
    if !is_valid_rating(rating) {
      return Err(StoreError::Validation(
        format!("Rating must be between {} and {}", MIN_RATING, MAX_RATING)
      ));
    }
  }
  Ok(Comment {
    name: name.to_string(),
    comment: comment.to_string(),
    date: time_utils::current_date_string(),
    rating: new_comment.rating
  })
}
