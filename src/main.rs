use std::io;
use std::io::prelude::*;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use err_derive::Error;
use log::*;
use validator::Validate;

mod config;
mod parsy;
mod review;
mod senti;

use self::config::Config;
use self::parsy::{Parse, Parsy};
use self::review::{ReviewInput, Reviewer};

#[derive(Debug, Error)]
pub enum Error {
    #[error(display = "Config file invalid")]
    ValidationError(#[error(source)] validator::ValidationErrors),
    #[error(display = "Config syntax invalid")]
    ConfigError(#[error(source)] toml::de::Error),
    #[error(display = "Cannot read input")]
    IoError(#[error(source)] std::io::Error),
    #[error(display = "Tokenizer model unavailable")]
    ModelError(#[error(source)] nlprule::Error),
    #[error(display = "Cannot render response")]
    JsonError(#[error(source)] serde_json::Error),
}

const CONFIG_FILE: &str = "revue.toml";

fn main() -> Result<(), Error> {
    let config: Config = read_config(CONFIG_FILE)?;
    config.validate()?;

    if config.debug {
        std::env::set_var("RUST_LOG", "revue=debug");
    } else if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "revue=info");
    }
    pretty_env_logger::init();

    info!("Loading tokenizer model from {}", config.model_path);
    let parsy = Parsy::new(&config.model_path)?;

    let reviewer = Reviewer::new(parsy, config.aspects.clone(), config.context_window);

    let keep_running_arc = Arc::new(AtomicBool::new(true));

    debug!("Setting up stop signals");
    let keep_running_signal = keep_running_arc.clone();
    let mut signal_count = 0;
    ctrlc::set_handler(move || {
        if signal_count > 0 {
            std::process::exit(1);
        } else {
            (*keep_running_signal).store(false, Ordering::Relaxed);
            signal_count += 1;
        }
    })
    .expect("Error setting Ctrl-C handler");

    console_loop(keep_running_arc, &reviewer)
}

fn console_loop<P: Parse>(
    keep_running: Arc<AtomicBool>,
    reviewer: &Reviewer<P>,
) -> Result<(), Error> {
    println!("Customer Review Analysis");
    println!("An empty review quits.");
    while (*keep_running).load(Ordering::Relaxed) {
        let review_text = match prompt("Review: ")? {
            Some(line) => line,
            None => break,
        };
        if review_text.trim().is_empty() {
            break;
        }
        if !(*keep_running).load(Ordering::Relaxed) {
            break;
        }
        let rating = match prompt("Rating 1-5 (optional): ")? {
            Some(line) => parse_rating(&line),
            None => break,
        };

        let analysis = reviewer.analyze(&ReviewInput {
            text: review_text,
            rating,
        });

        println!("Analysis Results:");
        println!(
            "Overall Sentiment: {} (polarity {:.3})",
            analysis.overall_sentiment, analysis.polarity
        );
        println!("Aspect Sentiments:");
        for (aspect, label) in &analysis.aspect_sentiments {
            println!("  {}: {}", aspect, label);
        }
        println!("Key Phrases: {}", analysis.key_phrases.join(", "));
        println!("Inferred Rating: {}", analysis.inferred_rating);
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    }
    Ok(())
}

/// A missing config file runs the stock demo; any other read failure is
/// surfaced rather than silently falling back to defaults.
fn read_config(path: &str) -> Result<Config, Error> {
    let config_str = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
        Err(err) => return Err(err.into()),
    };
    Ok(toml::from_str(&config_str)?)
}

/// One line from stdin, without the trailing newline. None on EOF.
fn prompt(label: &str) -> Result<Option<String>, Error> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim_end_matches(&['\r', '\n'][..]).to_string()))
}

/// Blank means no rating was given. Anything outside 1-5 is reported and
/// treated the same as blank rather than silently kept.
fn parse_rating(line: &str) -> Option<u8> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match line.parse::<u8>() {
        Ok(rating) if (1..=5).contains(&rating) => Some(rating),
        _ => {
            warn!("Ignoring rating {:?}, expected a number from 1 to 5", line);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_file_runs_stock_defaults() -> anyhow::Result<()> {
        let config = read_config("./no-such-revue.toml")?;
        assert_eq!(config.aspects.len(), 3);
        assert_eq!(config.context_window, 3);
        Ok(())
    }

    #[test]
    fn unreadable_config_file_is_an_error() {
        // A directory is readable as a path but not as a file, so this
        // fails with something other than NotFound.
        assert!(read_config(".").is_err());
    }

    #[test]
    fn blank_rating_means_absent() {
        assert_eq!(parse_rating(""), None);
        assert_eq!(parse_rating("   "), None);
    }

    #[test]
    fn in_range_ratings_are_kept() {
        for rating in 1..=5 {
            assert_eq!(parse_rating(&rating.to_string()), Some(rating));
        }
    }

    #[test]
    fn out_of_range_ratings_are_dropped() {
        assert_eq!(parse_rating("0"), None);
        assert_eq!(parse_rating("6"), None);
        assert_eq!(parse_rating("five"), None);
        assert_eq!(parse_rating("-1"), None);
    }
}
