#![deny(unused_crate_dependencies)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod cache;
mod config;
mod error;
mod fetch;
mod parse;

use std::{
    io::{self, Write},
    iter,
    path::PathBuf,
};

use clap::{Parser, ValueEnum};
use url::Url;

use crate::{
    cache::PageCache,
    config::InspectionQuery,
    fetch::{make_client, Loader},
    parse::{extract_restaurants, Document},
};

pub use error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Query the inspection site and refresh the snapshot
    Live,
    /// Re-read the last saved snapshot
    Test,
}

#[derive(Parser, Debug)]
#[command(
    name = "kc_inspections",
    about = "Average and high inspection scores for King County food establishments"
)]
struct Cli {
    #[arg(value_enum, default_value_t = Mode::Live)]
    mode: Mode,

    #[arg(long, default_value = config::DEFAULT_ZIP_CODE)]
    zip_code: String,

    /// Extra query parameter as KEY=VALUE, ex. City=Seattle. Unknown keys are ignored.
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    params: Vec<(String, String)>,

    /// Where the page snapshot is written and read
    #[arg(long, env = "INSPECTION_CACHE", default_value = config::DEFAULT_CACHE_PATH)]
    cache: PathBuf,

    #[arg(long, env = "INSPECTION_URL", default_value = config::INSPECTION_URL)]
    url: Url,

    /// Pretty-print each restaurant instead of one per line
    #[arg(long)]
    pretty: bool,
}

fn parse_param(s: &str) -> core::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {s:?}"))?;
    Ok((key.trim().to_owned(), value.to_owned()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> core::result::Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let loader = Loader::new(
        make_client()?,
        cli.url,
        InspectionQuery::default(),
        PageCache::new(&cli.cache),
    );
    let page = match cli.mode {
        Mode::Test => loader.load_cached().await?,
        Mode::Live => {
            let overrides = iter::once(("Zip_Code".to_owned(), cli.zip_code)).chain(cli.params);
            loader.fetch(overrides).await?
        }
    };

    let document = Document::parse(&page)?;
    let outcomes = extract_restaurants(&document);

    let mut stdout = io::stdout().lock();
    let mut failed = 0usize;
    for outcome in &outcomes {
        match &outcome.record {
            Ok(record) => {
                if cli.pretty {
                    serde_json::to_writer_pretty(&mut stdout, record)?;
                } else {
                    serde_json::to_writer(&mut stdout, record)?;
                }
                writeln!(stdout)?;
            }
            Err(e) => {
                failed += 1;
                eprintln!("{}: {e}", outcome.id);
            }
        }
    }
    stdout.flush()?;
    log::info!(
        "extracted {} of {} listings ({failed} failed)",
        outcomes.len() - failed,
        outcomes.len()
    );
    Ok(())
}
