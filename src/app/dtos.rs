use serde::{Deserialize, Serialize};
use derive_more::Display;
use crate::config::SiteInfo;
use crate::store::{Comment, RatingSummary};
use crate::store::rating::{star_glyphs, MAX_STARS};
use crate::utils::time_utils;

/* --- Form bodies --- */
// Everything is optional so that a missing field gives
// a nice warning on the page instead of a 400.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CommentForm {
  pub name: Option<String>,
  pub comment: Option<String>,
  pub rating: Option<u8>
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ContactForm {
  pub name: Option<String>,
  pub email: Option<String>,
  pub subject: Option<String>,
  pub message: Option<String>
}
/* --- End form bodies --- */

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CommentDto {
  pub name: String,
  pub comment: String,
  pub date: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub rating: Option<u8>,
  // Only used by the templates:
  #[serde(skip_deserializing)]
  pub stars: String
}

impl From<&Comment> for CommentDto {
  fn from(comment: &Comment) -> Self {
    Self {
      name: comment.name.clone(),
      comment: comment.comment.clone(),
      date: comment.date.clone(),
      rating: comment.rating,
      stars: comment.rating
        .map(|r| star_glyphs(usize::from(r)))
        .unwrap_or_default()
    }
  }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RatingDto {
  pub average: f64,
  pub count: usize,
  pub stars: usize,
  #[serde(skip_deserializing)]
  pub glyphs: String,
  // Pre-formatted so that 4 shows as "4.0":
  #[serde(skip_deserializing)]
  pub display: String
}

impl From<RatingSummary> for RatingDto {
  fn from(summary: RatingSummary) -> Self {
    Self {
      average: summary.rounded(),
      count: summary.count,
      stars: summary.stars(),
      glyphs: summary.star_glyphs(),
      display: format!("{:.1}", summary.rounded())
    }
  }
}

#[derive(Debug, Display, Clone, Copy, PartialEq)]
pub enum NoticeType {
  #[display(fmt = "success")]
  Success,
  #[display(fmt = "warning")]
  Warning
}

// The little colored box at the top of the page. I gave
// up on putting it inside the right section because
// handlebars would need an "eq" helper, so it just links
// back to the section instead.
#[derive(Debug, Serialize)]
pub struct Notice {
  pub kind: String,
  pub is_success: bool,
  pub message: String,
  // Anchor of the section the notice belongs to:
  pub section: String
}

impl Notice {
  pub fn new(kind: NoticeType, section: &str, message: &str) -> Self {
    Self {
      kind: kind.to_string(),
      is_success: kind == NoticeType::Success,
      message: String::from(message),
      section: String::from(section)
    }
  }
}

// Everything the index template gets.
#[derive(Serialize)]
pub struct PageData<'a> {
  pub site: &'a SiteInfo,
  pub comments: Vec<CommentDto>,
  pub rating: RatingDto,
  pub rating_options: Vec<RatingOption>,
  pub notice: Option<Notice>,
  pub comment_form: CommentForm,
  pub contact_form: ContactForm,
  pub year: i32
}

#[derive(Serialize)]
pub struct RatingOption {
  pub value: usize,
  pub label: String,
  pub selected: bool
}

impl<'a> PageData<'a> {
  pub fn new(site: &'a SiteInfo, comments: &[Comment], summary: RatingSummary) -> Self {
    Self {
      site,
      comments: comments.iter().map(CommentDto::from).collect(),
      rating: summary.into(),
      rating_options: rating_options(None),
      notice: None,
      comment_form: CommentForm::default(),
      contact_form: ContactForm::default(),
      year: time_utils::current_year()
    }
  }

  pub fn with_notice(mut self, notice: Notice) -> Self {
    self.notice = Some(notice);
    self
  }

  // Puts back what the visitor typed so they don't have
  // to do it all over again.
  pub fn with_comment_form(mut self, form: CommentForm) -> Self {
    self.rating_options = rating_options(form.rating);
    self.comment_form = form;
    self
  }

  pub fn with_contact_form(mut self, form: ContactForm) -> Self {
    self.contact_form = form;
    self
  }
}

// Highest rating first, that's the default pick on the
// form when nothing was selected before.
pub fn rating_options(selected: Option<u8>) -> Vec<RatingOption> {
  let selected = selected.map(usize::from).unwrap_or(MAX_STARS);
  (1..=MAX_STARS).rev()
    .map(|value| RatingOption {
      value,
      label: star_glyphs(value),
      selected: value == selected
    })
    .collect()
}
