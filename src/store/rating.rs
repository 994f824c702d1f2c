use serde::Serialize;
use super::entities::Comment;

pub const MAX_STARS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingSummary {
  pub average: f64,
  pub count: usize
}

// Unrated records (the old ones from before ratings
// existed) are left out of both the sum and the count.
// Counting them as zeros would drag the average down for
// no reason, and I'm not sure that's what anybody wants.
pub fn rating_summary(comments: &[Comment]) -> RatingSummary {
  let (sum, count) = comments.iter()
    .filter_map(|c| c.rating)
    .fold((0u64, 0usize), |(sum, count), r| (sum + u64::from(r), count + 1));
  if count == 0 {
    return RatingSummary { average: 0.0, count: 0 };
  }
  RatingSummary {
    average: sum as f64 / count as f64,
    count
  }
}

impl RatingSummary {

  // One decimal, for display.
  pub fn rounded(&self) -> f64 {
    (self.average * 10.0).round() / 10.0
  }

  // f64::round goes half away from zero, so 4.5 gives
  // 5 stars.
  pub fn stars(&self) -> usize {
    stars_for(self.average)
  }

  pub fn star_glyphs(&self) -> String {
    star_glyphs(self.stars())
  }
}

pub fn stars_for(value: f64) -> usize {
  let rounded = value.round();
  if rounded <= 0.0 || rounded.is_nan() {
    0
  } else if rounded >= MAX_STARS as f64 {
    MAX_STARS
  } else {
    rounded as usize
  }
}

pub fn star_glyphs(filled: usize) -> String {
  let filled = filled.min(MAX_STARS);
  let mut glyphs = "★".repeat(filled);
  glyphs.push_str(&"☆".repeat(MAX_STARS - filled));
  glyphs
}
