use actix_web::{
  error::ResponseError,
  HttpResponse
};
use derive_more::Display;

// Still not sure calling it "Error" is a great idea.
// The String payloads are only there for the logs, I
// don't want paths or IO errors to show up to random
// internet people.
#[derive(Debug, Display)]
pub enum Error {
  #[display(fmt = "Internal Server Error")]
  InternalServerError(String),
  #[display(fmt = "Not Found: {}", _0)]
  NotFound(String),
  #[display(fmt = "Bad Request (check request params)")]
  BadRequest(String),
  #[display(fmt = "Too Many Requests")]
  TooManyRequests
}

// Plain text for error responses, the page itself
// never shows these.
impl ResponseError for Error {
  fn error_response(&self) -> HttpResponse {
    match self {
      Error::InternalServerError(_) =>
        HttpResponse::InternalServerError().body(self.to_string()),
      Error::NotFound(_) => HttpResponse::NotFound().body(self.to_string()),
      Error::BadRequest(_) => HttpResponse::BadRequest().body(self.to_string()),
      Error::TooManyRequests => HttpResponse::TooManyRequests().body(self.to_string())
    }
  }
}
