use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use csv2wiki::config::Settings;
use csv2wiki::{Error, FormattingOptions, Splitter};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("csv2wiki")
        .version(env!("CARGO_PKG_VERSION"))
        .about(
            "Converts a table from comma-separated values (csv) to MediaWiki-compatible markup. \
             Prints result to stdout.",
        )
        .arg(
            Arg::new("file")
                .help("CSV file to convert")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("caption")
                .short('c')
                .long("caption")
                .value_name("TEXT")
                .default_value("")
                .help("Optional table caption/title"),
        )
        .arg(
            Arg::new("header")
                .short('H')
                .long("header")
                .action(ArgAction::SetTrue)
                .help("Treat first line as column labels (make text bold). Same as -b 1"),
        )
        .arg(
            Arg::new("bold-rows")
                .short('b')
                .long("bold-rows")
                .value_name("N")
                .default_value("0")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i64))
                .help("Make the first N rows bold. Takes precedence over -H when N > 0"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Write the table to a file instead of stdout"),
        )
        .arg(
            Arg::new("splitter")
                .short('s')
                .long("splitter")
                .value_name("SPLITTER")
                .value_parser(["naive", "quoted"])
                .help("How cells are split: naive quoted-comma heuristic or full csv parsing"),
        )
        .arg(
            Arg::new("class")
                .long("class")
                .value_name("CLASS")
                .help("CSS class of the generated table"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Additional configuration file"),
        )
}

// Negative counts mean no bold rows.
fn bold_rows(matches: &ArgMatches) -> usize {
    matches
        .get_one::<i64>("bold-rows")
        .and_then(|&n| usize::try_from(n).ok())
        .unwrap_or(0)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    let file_path = matches
        .get_one::<PathBuf>("file")
        .expect("file is a required argument");

    let mut settings = Settings::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))
        .map_err(Error::from)?;
    if let Some(class) = matches.get_one::<String>("class") {
        settings.table_class = class.clone();
    }
    if let Some(splitter) = matches.get_one::<String>("splitter") {
        settings.splitter = splitter.parse::<Splitter>()?;
    }

    let header_rows =
        csv2wiki::resolve_header_rows(matches.get_flag("header"), bold_rows(&matches));
    let options = FormattingOptions {
        caption: matches.get_one::<String>("caption").cloned(),
        header_rows,
        table_class: settings.table_class,
    };

    let wikitable = csv2wiki::convert_from_path(file_path, &options, settings.splitter)?;

    match matches.get_one::<PathBuf>("output") {
        Some(output_path) => {
            std::fs::write(output_path, &wikitable).map_err(|source| Error::Write {
                path: output_path.clone(),
                source,
            })?;
            info!(path = %output_path.display(), "output written");
        }
        None => println!("{}", wikitable),
    }

    Ok(())
}
