use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use std::path::PathBuf;
use std::process;

//===========================================================================//

/// Converts a PNG image into a single-image ICO file.
#[derive(Debug, Parser)]
#[command(name = "png2ico", version)]
struct Args {
    /// Input PNG file
    #[arg(
        short,
        long,
        value_name = "PATH",
        value_parser = NonEmptyStringValueParser::new()
    )]
    input: String,

    /// Output ICO file
    #[arg(
        short,
        long,
        value_name = "PATH",
        value_parser = NonEmptyStringValueParser::new()
    )]
    output: String,

    /// Log each step of the conversion
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter),
    )
    .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    let input = PathBuf::from(&args.input);
    let output = PathBuf::from(&args.output);
    if let Err(error) = png2ico::convert_file(&input, &output) {
        eprintln!("error: {}", error);
        process::exit(1);
    }
}

//===========================================================================//


//===========================================================================//
