use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::utils::version;

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
#[command(group(ArgGroup::new("source").required(true).args(["json", "sqlite"])))]
pub struct Cli {
  #[arg(short, long, value_name = "FLOAT", help = "Tick rate, i.e. number of ticks per second", default_value_t = 1.0)]
  pub tick_rate: f64,

  #[arg(
    short('r'),
    long,
    value_name = "FLOAT",
    help = "Frame rate, i.e. number of frames per second",
    default_value_t = 4.0
  )]
  pub frame_rate: f64,

  #[arg(long, value_name = "FILE", help = "JSON file holding an array of documents")]
  pub json: Option<PathBuf>,

  #[arg(long, value_name = "FILE", help = "SQLite database file to browse")]
  pub sqlite: Option<PathBuf>,

  #[arg(long, value_name = "NAME", help = "Table to read from the SQLite database", default_value = "documents")]
  pub table: String,

  #[arg(long, value_name = "N", help = "Rows per page (overrides the config file)")]
  pub page_size: Option<usize>,

  #[arg(long, value_name = "N", help = "Record count at which paging moves to the data source")]
  pub threshold: Option<usize>,
}
