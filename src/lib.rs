// Copyright © 2014, Peter Atashian

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use std::error::Error as StdError;
use std::fmt;
use std::io::Error as IoError;
use std::time::Duration;
use tracing::{error, info, warn};

pub mod config;
pub mod export;
pub mod extract;
pub mod images;
pub mod sanitize;

pub use crate::config::Config;
pub use crate::export::{save_csv, Saved};
pub use crate::extract::{extract, Border, Extraction, ImageSource, Record, Skip};
pub use crate::images::Images;

#[derive(Debug)]
pub enum Error {
    Http(reqwest::Error),
    Io(IoError),
    Csv(csv::Error),
    Status(StatusCode),
    InvalidName(String),
}
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Error {
        Error::Http(err)
    }
}
impl From<IoError> for Error {
    fn from(err: IoError) -> Error {
        Error::Io(err)
    }
}
impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Error {
        Error::Csv(err)
    }
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Http(e) => write!(f, "request failed: {}", e),
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Csv(e) => write!(f, "csv error: {}", e),
            Error::Status(code) => write!(f, "unexpected status code: {}", code),
            Error::InvalidName(name) => write!(f, "unusable path component: {:?}", name),
        }
    }
}
impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Http(e) => Some(e),
            Error::Io(e) => Some(e),
            Error::Csv(e) => Some(e),
            _ => None,
        }
    }
}

pub struct Wiki {
    client: Client,
    config: Config,
}
impl Wiki {
    pub fn new(config: Config) -> Result<Wiki, Error> {
        let client = Client::builder()
            .user_agent(config.useragent.clone())
            .timeout(None::<Duration>)
            .build()?;
        Ok(Wiki::with_client(config, client))
    }
    pub fn with_client(config: Config, client: Client) -> Wiki {
        Wiki { client, config }
    }
    /// Single GET, anything but 200 is an error. Nothing is retried.
    fn get(&self, url: &str) -> Result<Response, Error> {
        let response = self.client.get(url).send()?;
        if response.status() != StatusCode::OK {
            return Err(Error::Status(response.status()));
        }
        Ok(response)
    }
    pub fn fetch_page(&self) -> Result<String, Error> {
        let response = self.get(&self.config.page_url)?;
        Ok(response.text()?)
    }
}

/// Outcome of one full run.
#[derive(Debug)]
pub struct Report {
    pub extraction: Extraction,
    pub downloaded: usize,
    pub failed: usize,
    pub saved: Saved,
}

/// Fetch, extract, download every remote image in record order, then write the CSV.
///
/// A failed fetch yields an empty dataset and the save becomes a no-op. Image
/// failures are logged and counted. Only a failure to write the CSV is returned.
pub fn run(wiki: &Wiki) -> Result<Report, Error> {
    let extraction = match wiki.fetch_page() {
        Ok(html) => extract(&html),
        Err(e) => {
            error!("Failed to fetch the page {}: {}", wiki.config.page_url, e);
            Extraction::default()
        }
    };
    let mut downloaded = 0;
    let mut failed = 0;
    for record in &extraction.records {
        match &record.image {
            ImageSource::Remote(url) => {
                match wiki.download_image(url, &record.group, &record.image_filename) {
                    Ok(_) => downloaded += 1,
                    Err(e) => {
                        warn!("Failed to download {} from {}: {}", record.image_filename, url, e);
                        failed += 1;
                    }
                }
            }
            ImageSource::Inline => {
                info!("Skipping image with base64 data URL for {}", record.name)
            }
            ImageSource::Unsupported(url) => warn!("Skipping image with invalid URL: {}", url),
            ImageSource::Missing => {}
        }
    }
    let saved = save_csv(&extraction.records, &wiki.config.csv_path)?;
    Ok(Report { extraction, downloaded, failed, saved })
}
