//! # seawiki
//!
//! Deduplication pipeline for the Southeast Asia Wikipedia corpus.
//!
//! ```sh
//! seawiki 0.1.0
//! Southeast Asia Wikipedia corpus tool.
//!
//! USAGE:
//!     seawiki <SUBCOMMAND>
//!
//! SUBCOMMANDS:
//!     concat    Concatenate extraction batches into a single split
//!     dedup     Drop hard and soft duplicates of a raw split
//!     help      Prints this message or the help of the given subcommand(s)
//!     locate    Locate dataset files by language or country
//!     stats     Token statistics of splits
//! ```
use structopt::StructOpt;

use seawiki::error::Error;
use seawiki::loader::{self, Selection};
use seawiki::processing::{concat, dedup, stats};

#[macro_use]
extern crate log;

mod cli;

fn run(opt: cli::SeaWiki) -> Result<(), Error> {
    match opt {
        cli::SeaWiki::Dedup(d) => {
            let config = d.config();
            let dst = dedup::dedup(
                &d.raw_csv_path,
                &d.save_dir_path,
                d.audit_path.as_deref(),
                config,
            )?;
            info!("deduplicated data saved to {:?}", dst);
        }

        cli::SeaWiki::Concat(c) => {
            let nb_records = concat::concat(&c.load_dir_path, &c.dst)?;
            info!("{} records saved to {:?}", nb_records, c.dst);
        }

        cli::SeaWiki::Stats(s) => {
            let stats = stats::stats(&s.src[..], s.csv.as_deref())?;
            println!("{}", stats::markdown_table(&stats));
        }

        cli::SeaWiki::Locate(l) => {
            let locations = if l.all {
                loader::all(l.mode, l.with_countries)?
            } else {
                let selection = match (l.lang, l.country) {
                    (Some(lang), _) => Selection::Lang(lang),
                    (None, Some(country)) => Selection::Country(country),
                    (None, None) => {
                        return Err(Error::Config(
                            "one of --lang, --country or --all is required".to_string(),
                        ))
                    }
                };
                let date = l
                    .date
                    .unwrap_or_else(|| seawiki::lang::latest_dump_date().to_string());
                loader::locate(&selection, &date, l.mode)?
            };

            for location in locations {
                println!("{}", serde_json::to_string(&location)?);
            }
        }
    };
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opt = cli::SeaWiki::from_args();
    debug!("cli args\n{:#?}", opt);

    if let Err(e) = run(opt) {
        error!("{}", e);
        std::process::exit(1);
    }
}
