#![allow(dead_code)]
mod config;
mod store;
mod utils;

use std::env;
use color_eyre::Result;
use eyre::{eyre, WrapErr};
use dotenv::dotenv;
use log::info;
use getopts::{Matches, Options};
use crate::config::Config;
use crate::store::{CommentStore, NewComment};

// Copy pasted this from getopts doc.
fn print_usage(program: &str, opts: Options) {
  let brief = format!("Usage: {} [options]", program);
  print!("{}", opts.usage(&brief));
}

fn build_options() -> Options {
  let mut opts = Options::new();
  opts.optflag("l", "list", "Print all the comments, oldest first");
  opts.optflag("s", "summary", "Print the average rating");
  opts.optopt("a", "add", "Add a comment under that name", "NAME");
  opts.optopt("c", "comment", "Text of the comment to add", "TEXT");
  opts.optopt("r", "rating", "Rating of the comment to add (1 to 5)", "N");
  opts.optopt("f", "file", "Comments file to use instead of COMMENTS_PATH", "PATH");
  opts.optflag("h", "help", "Program usage");
  opts
}

// Rating is optional, but if it's there it has to be
// a number. Range is checked by the store.
fn parse_rating(value: Option<String>) -> Result<Option<u8>> {
  match value {
    None => Ok(None),
    Some(r) => match r.trim().parse::<u8>() {
      Ok(rating) => Ok(Some(rating)),
      Err(_) => Err(eyre!("Rating must be a number between 1 and 5, got '{}'", r))
    }
  }
}

// I used to silently ignore -c and -r when -a was missing
// and it took me a while to understand why nothing got added.
fn new_comment_from(matches: &Matches) -> Result<Option<NewComment>> {
  let name = match matches.opt_str("a") {
    Some(name) => name,
    None => {
      if matches.opt_present("c") || matches.opt_present("r") {
        return Err(eyre!("Options --comment and --rating need --add NAME"));
      }
      return Ok(None);
    }
  };
  let comment = matches.opt_str("c").unwrap_or_default();
  let rating = parse_rating(matches.opt_str("r"))?;
  Ok(Some(NewComment { name, comment, rating }))
}

fn format_comment(comment: &store::Comment) -> String {
  let stars = comment.rating
    .map(|r| store::rating::star_glyphs(usize::from(r)))
    .unwrap_or_else(|| String::from("(unrated)"));
  format!("{} - {} {}\n  \"{}\"", comment.date, comment.name, stars, comment.comment)
}

fn run(store: &mut CommentStore, matches: &Matches) -> Result<bool> {
  let mut did_something = false;
  let loaded = store.load().map(|_| ());
  if let Err(e) = loaded {
    return Err(e).context(format!("Loading comments from {:?}", store.path()));
  }

  if let Some(new_comment) = new_comment_from(matches)? {
    let appended = match store.append(new_comment) {
      Ok(c) => c.clone(),
      Err(e) => return Err(e).context("Adding comment")
    };
    info!("Added comment from {} to {:?}", appended.name, store.path());
    println!("Added: {}", format_comment(&appended));
    did_something = true;
  }

  if matches.opt_present("l") {
    for comment in store.comments() {
      println!("{}", format_comment(comment));
    }
    did_something = true;
  }

  if matches.opt_present("s") {
    let summary = store.average_rating();
    println!(
      "Average rating: {:.1} {} ({} rated comments out of {})",
      summary.rounded(),
      summary.star_glyphs(),
      summary.count,
      store.comments().len()
    );
    did_something = true;
  }

  Ok(did_something)
}

/**
 * Small tool to look at or add to the comments file
 * without going through the web page.
 */
fn main() -> Result<()> {
  dotenv().ok();
  env_logger::init();

  let args: Vec<String> = env::args().collect();
  let program = args[0].clone();
  let opts = build_options();
  let opt_matches = opts.parse(&args[1..])?;
  if opt_matches.opt_present("h") {
    print_usage(&program, opts);
    return Ok(());
  }

  let comments_path = match opt_matches.opt_str("f") {
    Some(path) => path,
    None => Config::from_env()?.comments_path
  };
  let mut store = CommentStore::new(&comments_path);

  if !run(&mut store, &opt_matches)? {
    print_usage(&program, opts);
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn matches_for(args: &[&str]) -> Matches {
    build_options().parse(args).unwrap()
  }

  #[test]
  fn rating_must_be_a_number() {
    assert_eq!(None, parse_rating(None).unwrap());
    assert_eq!(Some(4), parse_rating(Some(" 4".to_string())).unwrap());
    assert!(parse_rating(Some("four".to_string())).is_err());
  }

  #[test]
  fn add_option_builds_a_new_comment() {
    let matches = matches_for(&["-a", "Zoe", "-c", "Nice!", "-r", "3"]);
    let new_comment = new_comment_from(&matches).unwrap().unwrap();
    assert_eq!("Zoe", new_comment.name);
    assert_eq!("Nice!", new_comment.comment);
    assert_eq!(Some(3), new_comment.rating);
  }

  #[test]
  fn no_add_option_means_no_comment() {
    let matches = matches_for(&["-l"]);
    assert!(new_comment_from(&matches).unwrap().is_none());
  }

  #[test]
  fn comment_or_rating_without_add_is_an_error() {
    assert!(new_comment_from(&matches_for(&["-c", "Nice!"])).is_err());
    assert!(new_comment_from(&matches_for(&["-r", "4", "-l"])).is_err());
  }

  #[test]
  fn run_stops_on_comment_without_add() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("comments.json");
    let mut store = CommentStore::new(&path);
    assert!(run(&mut store, &matches_for(&["-c", "Nice!", "-r", "5"])).is_err());
    assert!(!path.exists());
  }

  #[test]
  fn run_appends_to_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("comments.json");
    let mut store = CommentStore::new(&path);
    let matches = matches_for(&["-a", "Zoe", "-c", "Nice!", "-r", "3", "-s"]);
    assert!(run(&mut store, &matches).unwrap());
    let mut reopened = CommentStore::new(&path);
    assert_eq!(5, reopened.load().unwrap().len());
  }

  #[test]
  fn run_reports_validation_errors() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CommentStore::new(dir.path().join("comments.json"));
    let matches = matches_for(&["-a", "Zoe"]);
    assert!(run(&mut store, &matches).is_err());
    assert_eq!(4, store.comments().len());
  }

  #[test]
  fn run_without_options_does_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CommentStore::new(dir.path().join("comments.json"));
    assert!(!run(&mut store, &matches_for(&[])).unwrap());
  }

}
