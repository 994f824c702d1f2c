use serde::{Deserialize, Serialize};

// What actually lands in the JSON file. Field names
// are the ones the page has always been writing, so
// don't rename anything in here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
  pub name: String,
  pub comment: String,
  pub date: String,
  // The first versions of the page didn't have ratings
  // at all, these records just don't have the key.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rating: Option<u8>
}

// What the caller hands to the store. No date in there,
// the store stamps it.
#[derive(Debug, Clone)]
pub struct NewComment {
  pub name: String,
  pub comment: String,
  pub rating: Option<u8>
}

impl NewComment {
  pub fn new(name: &str, comment: &str, rating: Option<u8>) -> Self {
    Self {
      name: String::from(name),
      comment: String::from(comment),
      rating
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unrated_comment_omits_rating_key() {
    let sut = Comment {
      name: "Anna L.".to_string(),
      comment: "Great product!".to_string(),
      date: "2025-09-28".to_string(),
      rating: None
    };
    let json = serde_json::to_string(&sut).unwrap();
    assert!(!json.contains("rating"));
  }

  #[test]
  fn legacy_record_without_rating_parses() {
    let json = r#"{"comment": "Nice", "date": "2025-10-01", "name": "Ben K."}"#;
    let parsed: Comment = serde_json::from_str(json).unwrap();
    assert_eq!("Ben K.", parsed.name);
    assert_eq!(None, parsed.rating);
  }

}
