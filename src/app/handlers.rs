use actix_web::{
  http::StatusCode,
  web,
  HttpResponse,
  HttpRequest,
  Result
};
use log::{error, info, warn};
use handlebars::Handlebars;
use crate::store::{NewComment, StoreError};
use crate::utils::text_utils;
use super::dtos::*;
use super::error::Error;
use super::AppState;
use super::helpers;

// Module with all the page handler functions.

// Same limits as the form fields in the template:
pub const MAX_NAME_LENGTH: usize = 50;
pub const MAX_COMMENT_LENGTH: usize = 500;

const REVIEWS_SECTION: &'static str = "reviews";
const BUY_SECTION: &'static str = "buy";
const CONTACT_SECTION: &'static str = "contact";

// Renders the whole page with whatever is in the store
// right now. Every POST ends up in here too.
fn render_page<'a>(
  app_state: &'a AppState,
  hb: &Handlebars<'_>,
  status: StatusCode,
  customize: impl FnOnce(PageData<'a>) -> PageData<'a>
) -> Result<HttpResponse, Error> {
  let body = {
    let store = app_state.store.read()
      .map_err(|e| {
        error!("Could not get a read handle on the comment store - {}", e);
        Error::InternalServerError(e.to_string())
      })?;
    let data = customize(PageData::new(
      &app_state.site_info,
      store.comments(),
      store.average_rating()
    ));
    hb.render("index", &data)
      .map_err(|e| {
        error!("A template engine error occured when rendering the page: {}", e);
        Error::InternalServerError("Template engine error".to_string())
      })?
  };
  Ok(
    HttpResponse::build(status)
      .content_type("text/html; charset=utf-8")
      .body(body)
  )
}

pub async fn index(
  app_state: web::Data<AppState>,
  hb: web::Data<Handlebars<'_>>
) -> Result<HttpResponse, Error> {
  render_page(&app_state, &hb, StatusCode::OK, |page| page)
}

// Default response when no route matched the request:
pub async fn not_found() -> Result<HttpResponse, Error> {
  Err(Error::NotFound(String::from("Page doesn't exist")))
}

pub async fn comments(
  app_state: web::Data<AppState>
) -> Result<HttpResponse, Error> {
  let store = app_state.store.read()
    .map_err(|e| Error::InternalServerError(e.to_string()))?;
  let comments: Vec<CommentDto> = store.comments()
    .iter()
    .map(CommentDto::from)
    .collect();
  Ok(HttpResponse::Ok().json(comments))
}

pub async fn rating(
  app_state: web::Data<AppState>
) -> Result<HttpResponse, Error> {
  let store = app_state.store.read()
    .map_err(|e| Error::InternalServerError(e.to_string()))?;
  Ok(HttpResponse::Ok().json(RatingDto::from(store.average_rating())))
}

pub async fn post_comment(
  app_state: web::Data<AppState>,
  hb: web::Data<Handlebars<'_>>,
  comment_form: web::Form<CommentForm>,
  req: HttpRequest
) -> Result<HttpResponse, Error> {
  let mut form = comment_form.into_inner();
  // Same limits the form fields have, the browser
  // enforces them but nothing forces a client to use
  // a browser.
  if let Some(name) = form.name.as_mut() {
    text_utils::truncate_utf8(name, MAX_NAME_LENGTH);
  }
  if let Some(comment) = form.comment.as_mut() {
    text_utils::truncate_utf8(comment, MAX_COMMENT_LENGTH);
  }

  if app_state.check_rate_limit() {
    warn!("Comment form is rate limited, rejecting a submission");
    return Err(Error::TooManyRequests);
  }

  let new_comment = NewComment {
    name: form.name.clone().unwrap_or_default(),
    comment: form.comment.clone().unwrap_or_default(),
    rating: form.rating
  };

  let result = match app_state.store.write() {
    Ok(mut store) => store.append(new_comment).map(|_| ()),
    Err(e) => {
      error!("Could not get a write handle on the comment store - {}", e);
      return Err(Error::InternalServerError(e.to_string()));
    }
  };

  match result {
    Ok(()) => {
      info!("New comment posted from {:?}", helpers::real_ip_addr(&req));
      render_page(&app_state, &hb, StatusCode::OK, |page| page.with_notice(
        Notice::new(
          NoticeType::Success,
          REVIEWS_SECTION,
          "Thank you for your comment! It has been added to the list."
        )
      ))
    },
    Err(e) => {
      let (status, message) = match &e {
        StoreError::Validation(_) if !has_text(&form.name) || !has_text(&form.comment) => (
          StatusCode::BAD_REQUEST,
          String::from("Please enter both your name and comment before submitting.")
        ),
        StoreError::Validation(reason) => (StatusCode::BAD_REQUEST, format!("{}.", reason)),
        _ => (
          StatusCode::INTERNAL_SERVER_ERROR,
          String::from("Sorry, your comment could not be saved. Please try again.")
        )
      };
      warn!("Comment submission failed - {}", e);
      render_page(&app_state, &hb, status, |page| page
        .with_notice(Notice::new(NoticeType::Warning, REVIEWS_SECTION, &message))
        .with_comment_form(form)
      )
    }
  }
}

// Simulated, nothing is stored anywhere.
pub async fn add_to_cart(
  app_state: web::Data<AppState>,
  hb: web::Data<Handlebars<'_>>
) -> Result<HttpResponse, Error> {
  let message = format!(
    "Product '{}' added to your cart! (This is a simulated purchase for demonstration purposes.)",
    app_state.site_info.product_name
  );
  render_page(&app_state, &hb, StatusCode::OK, |page| page.with_notice(
    Notice::new(NoticeType::Success, BUY_SECTION, &message)
  ))
}

// Also simulated, the message just gets echoed back.
pub async fn post_contact(
  app_state: web::Data<AppState>,
  hb: web::Data<Handlebars<'_>>,
  contact_form: web::Form<ContactForm>
) -> Result<HttpResponse, Error> {
  let form = contact_form.into_inner();
  match (
    trimmed(&form.name),
    trimmed(&form.email),
    trimmed(&form.message)
  ) {
    (Some(name), Some(email), Some(_)) => {
      let message = contact_reply(name, form.subject.as_deref().unwrap_or(""), email);
      render_page(&app_state, &hb, StatusCode::OK, |page| page.with_notice(
        Notice::new(NoticeType::Success, CONTACT_SECTION, &message)
      ))
    },
    _ => render_page(&app_state, &hb, StatusCode::BAD_REQUEST, |page| page
      .with_notice(Notice::new(
        NoticeType::Warning,
        CONTACT_SECTION,
        "Please fill in all required fields (Name, Email, Message)."
      ))
      .with_contact_form(form.clone())
    )
  }
}

// The subject is optional on the form. I echo back exactly
// what was typed, even when that's nothing at all, the old
// page did the same and nobody ever complained.
pub fn contact_reply(name: &str, subject: &str, email: &str) -> String {
  format!(
    "Thank you, {}! Your message regarding '{}' has been sent. We will get \
    back to you at {} shortly. (This is a simulated message send.)",
    name, subject, email
  )
}

fn has_text(value: &Option<String>) -> bool {
  trimmed(value).is_some()
}

fn trimmed(value: &Option<String>) -> Option<&str> {
  value.as_deref()
    .map(str::trim)
    .filter(|v| !v.is_empty())
}
