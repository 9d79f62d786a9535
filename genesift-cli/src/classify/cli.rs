use clap::{Arg, ArgAction, Command, arg, value_parser};

pub const CLASSIFY_CMD: &str = "classify";

pub fn create_classify_cli() -> Command {
    Command::new(CLASSIFY_CMD)
        .about("Split genes into targets and non-targets and filter target lists by expression.")
        .arg(
            arg!(--dea <CSV>)
                .required(true)
                .help("Differential expression table with `gene` and `baseMean` columns"),
        )
        .arg(
            arg!(--targets1 <CSV>)
                .required(true)
                .help("First target gene list, one symbol per line"),
        )
        .arg(
            arg!(--targets2 <CSV>)
                .required(true)
                .help("Second target gene list, one symbol per line"),
        )
        .arg(
            arg!(--gtf <GTF>)
                .required(true)
                .help("Gzip compressed GTF annotation"),
        )
        .arg(
            arg!(--output <DIR>)
                .required(true)
                .help("Directory the gene lists are written to"),
        )
        .arg(
            arg!(--threshold <THRESHOLD>)
                .required(false)
                .value_parser(value_parser!(f64))
                .help("baseMean a gene must exceed to count as highly expressed [default: 100]"),
        )
        .arg(
            Arg::new("biotype")
                .long("biotype")
                .action(ArgAction::Append)
                .help("Gene biotype to keep from the annotation, repeatable [default: protein_coding]"),
        )
        .arg(
            Arg::new("target-definition")
                .long("target-definition")
                .value_parser(["list2_only", "union"])
                .help("Which target lists define a target [default: list2_only]"),
        )
        .arg(
            arg!(--config <TOML>)
                .required(false)
                .help("TOML file with classification settings; flags override it"),
        )
}
