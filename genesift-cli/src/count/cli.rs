use clap::{Arg, Command, arg, value_parser};

pub const COUNT_CMD: &str = "count";

pub fn create_count_cli() -> Command {
    Command::new(COUNT_CMD)
        .about("Count reads over intervals and normalize them to reads per million.")
        .arg(
            arg!(--peaks <BED>)
                .required(true)
                .help("Peak or promoter intervals in BED format"),
        )
        .arg(
            arg!(--bam <BAM>)
                .required(true)
                .help("Coordinate sorted BAM file"),
        )
        .arg(
            arg!(--output <TSV>)
                .required(true)
                .help("Normalized count table to write"),
        )
        .arg(
            Arg::new("sample-name")
                .long("sample-name")
                .required(true)
                .help("Sample label used in log messages"),
        )
        .arg(
            arg!(--threads <THREADS>)
                .required(false)
                .default_value("1")
                .value_parser(value_parser!(usize))
                .help("Threads passed to samtools"),
        )
        .arg(
            arg!(--backend <BACKEND>)
                .required(false)
                .default_value("external")
                .value_parser(["external", "native"])
                .help("`external` runs samtools and bedtools, `native` reads the BAM in-process"),
        )
}
