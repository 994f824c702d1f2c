use actix_web::{middleware, web, App, HttpServer};
use color_eyre::Result;
use eyre::{WrapErr, eyre};
use log::{debug, error, info, warn};
use handlebars::Handlebars;
use rate_limiter::BasicRateLimiter;
use std::sync::RwLock;
// I think we have to add crate here because
// of the other crate named "config" that we
// use as a dependency.
use crate::config::{Config, SiteInfo};
use crate::store::CommentStore;
mod handlers;
mod dtos;
mod error;
mod helpers;
mod rate_limiter;

// Declare app state struct:
pub struct AppState {
  pub store: RwLock<CommentStore>,
  pub rate_limiter: RwLock<BasicRateLimiter>,
  pub site_info: SiteInfo
}

impl AppState {

  // Returns true when the request has to be rejected.
  pub fn check_rate_limit(&self) -> bool {
    match self.rate_limiter.write() {
      Ok(mut rl) => rl.update(),
      Err(e) => {
        // A poisoned lock shouldn't block the comment
        // form forever.
        error!("Could not get a write handle on the \
          rate limiter, SHOULD NEVER HAPPEN - {}", e);
        false
      }
    }
  }

}

// Function to start the server.
pub async fn run() -> Result<()> {
  let config = Config::from_env()?;
  debug!("Current config: {:?}", config);

  // The store is loaded once for the lifetime of the
  // process. If the file is there but unusable we'd
  // rather not start than overwrite it later.
  let mut store = CommentStore::new(&config.comments_path);
  let count = match store.load() {
    Ok(comments) => comments.len(),
    Err(e) => return Err(e).context("Loading the comments file")
  };
  info!("Comment store ready with {} comments", count);

  // Declare the template system, currently using
  // handlebars:
  let mut handlebars = Handlebars::new();
  if let Err(e) = handlebars
    .register_templates_directory(".html", &config.template_dir) {
      return Err(eyre!("Templates directory might be missing or \
        not accessible - {}", e));
    }
  let handlebars_ref = web::Data::new(handlebars);

  // Got to save the bind_address for later because
  // we'll be destroying "config" by moving it into
  // app_state as SiteInfo.
  let bind_address = config.bind_address.clone();

  let app_state = web::Data::new(
    AppState {
      store: RwLock::new(store),
      rate_limiter: RwLock::new(
        BasicRateLimiter::new(
          config.rl_max_requests,
          config.rl_max_requests_time,
          config.rl_block_duration
        )
      ),
      site_info: config.into()
    }
  );

  info!("Starting server on {}", bind_address);
  HttpServer::new(move|| {
    App::new()
      .app_data(app_state.clone())
      .app_data(handlebars_ref.clone())
      .app_data(form_config())
      .wrap(middleware::Logger::default())
      .configure(base_endpoints_config)
      .default_service(web::route().to(handlers::not_found))
  })
  .bind(bind_address)?
  .run()
  .await
  .context("Start Actix web server")

}

// A garbled form body (like a rating that isn't a number)
// should be a plain 400 with our own error type, not
// whatever Actix decides to say about it.
fn form_config() -> web::FormConfig {
  web::FormConfig::default().error_handler(|err, _| {
    warn!("Rejected a malformed form body - {}", err);
    error::Error::BadRequest(err.to_string()).into()
  })
}

// Route configuration:
fn base_endpoints_config(cfg: &mut web::ServiceConfig) {
  cfg.route("/", web::get().to(handlers::index))
    .route("/comments", web::get().to(handlers::comments))
    .route("/comments", web::post().to(handlers::post_comment))
    .route("/rating", web::get().to(handlers::rating))
    .route("/cart", web::post().to(handlers::add_to_cart))
    .route("/contact", web::post().to(handlers::post_contact));
}
