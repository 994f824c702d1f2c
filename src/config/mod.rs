// Adding the context method to errors:
use eyre::WrapErr;
use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::convert::From;

#[derive(Debug, Deserialize)]
pub struct Config {
  pub comments_path: String,
  pub bind_address: String,
  pub template_dir: String,
  // Rate limiter settings (comment form only):
  pub rl_max_requests: u32,
  pub rl_max_requests_time: u32,
  pub rl_block_duration: u32,
  // Everything the page displays about the product:
  pub site_title: String,
  pub product_name: String,
  pub product_size: String,
  pub product_price: String,
  pub product_price_note: String,
  pub contact_email: String
}

// The templates only get this part of the config,
// the rest has no business ending up in a page.
#[derive(Debug, Serialize)]
pub struct SiteInfo {
  pub title: String,
  pub product_name: String,
  pub product_size: String,
  pub product_price: String,
  pub product_price_note: String,
  pub contact_email: String
}

impl From<Config> for SiteInfo {
  fn from(config: Config) -> Self {
    Self {
      title: config.site_title,
      product_name: config.product_name,
      product_size: config.product_size,
      product_price: config.product_price,
      product_price_note: config.product_price_note,
      contact_email: config.contact_email
    }
  }
}

impl Config {

  pub fn from_env() -> Result<Config> {
    let mut c = config::Config::new();
    // RUST_LOG is already set in main.rs if it
    // was absent.
    // You have to use lowercase when compared to
    // what's in the .env file.
    c.set_default("comments_path", "./comments.json")?;
    c.set_default("bind_address", "127.0.0.1:8080")?;
    c.set_default("template_dir", "./templates")?;
    c.set_default("rl_max_requests", 30)?;
    c.set_default("rl_max_requests_time", 60)?;
    c.set_default("rl_block_duration", 60)?;
    c.set_default("site_title", "Ecopure: Green Bottle Cleaner")?;
    c.set_default("product_name", "Ecopure Water Bottle Cleaner")?;
    c.set_default("product_size", "500ml Bottle")?;
    c.set_default("product_price", "$12.99")?;
    c.set_default("product_price_note", "-5% Today Only!")?;
    c.set_default("contact_email", "info@ecopure.com")?;

    c.merge(config::Environment::default())?;
    // The error has to be given a context for
    // color_eyre to work here:
    c.try_into()
      .context("Loading configuration from env")
  }

}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_are_used_without_env() {
    // Only asserts on keys nobody sets in a test environment.
    let config = Config::from_env().unwrap();
    assert!(config.rl_max_requests > 0);
    assert!(!config.comments_path.is_empty());
  }

  #[test]
  fn site_info_keeps_display_fields() {
    let config = Config {
      comments_path: "./comments.json".to_string(),
      bind_address: "127.0.0.1:8080".to_string(),
      template_dir: "./templates".to_string(),
      rl_max_requests: 30,
      rl_max_requests_time: 60,
      rl_block_duration: 60,
      site_title: "Ecopure".to_string(),
      product_name: "Cleaner".to_string(),
      product_size: "500ml".to_string(),
      product_price: "$12.99".to_string(),
      product_price_note: "-5%".to_string(),
      contact_email: "info@ecopure.com".to_string()
    };
    let site_info: SiteInfo = config.into();
    assert_eq!("Cleaner", site_info.product_name);
    assert_eq!("info@ecopure.com", site_info.contact_email);
  }

}
