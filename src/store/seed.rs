use super::entities::Comment;

// Shown when there's no comments file yet so that
// the reviews section is never empty on a first run.
const SEED: [(&str, &str, &str, u8); 4] = [
  (
    "Anna L.",
    "Ecopure is amazing! My water bottle has never been cleaner, and I love that it's eco-friendly.",
    "2025-09-28",
    5
  ),
  (
    "Ben K.",
    "Finally, a cleaner that works without harsh chemicals. Highly recommend!",
    "2025-10-01",
    4
  ),
  (
    "Chloe P.",
    "The best way to keep my reusable bottles fresh. No weird aftertaste!",
    "2025-10-05",
    5
  ),
  (
    "David M.",
    "Works great on my stainless steel bottles. Smells lovely too.",
    "2025-10-08",
    4
  )
];

pub fn seed_comments() -> Vec<Comment> {
  SEED.iter()
    .map(|(name, comment, date, rating)| Comment {
      name: name.to_string(),
      comment: comment.to_string(),
      date: date.to_string(),
      rating: Some(*rating)
    })
    .collect()
}
