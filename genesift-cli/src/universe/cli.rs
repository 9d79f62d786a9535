use clap::{Arg, ArgAction, Command, arg};

pub const UNIVERSE_CMD: &str = "universe";

pub fn create_universe_cli() -> Command {
    Command::new(UNIVERSE_CMD)
        .about("Write the gene universe of a GTF annotation, one gene symbol per line.")
        .arg(
            arg!(--gtf <GTF>)
                .required(true)
                .help("Gzip compressed GTF annotation"),
        )
        .arg(
            arg!(--output <CSV>)
                .required(true)
                .help("Output gene list"),
        )
        .arg(
            Arg::new("biotype")
                .long("biotype")
                .action(ArgAction::Append)
                .help("Gene biotype to keep, repeatable [default: protein_coding]"),
        )
}
