use clap::{Arg, Command, arg, value_parser};

pub const NORMALIZE_CMD: &str = "normalize";

pub fn create_normalize_cli() -> Command {
    Command::new(NORMALIZE_CMD)
        .about("Normalize a raw interval count table to reads per million.")
        .arg(
            arg!(--counts <TSV>)
                .required(true)
                .help("Raw counts in `bedtools coverage -counts` layout"),
        )
        .arg(
            Arg::new("total-reads")
                .long("total-reads")
                .required(true)
                .value_parser(value_parser!(u64))
                .help("Total mapped reads of the sample"),
        )
        .arg(
            arg!(--output <TSV>)
                .required(true)
                .help("Normalized count table to write"),
        )
}
