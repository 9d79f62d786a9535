mod classify;
mod count;
mod logging;
mod normalize;
mod universe;

use anyhow::Result;
use clap::{ArgAction, ArgMatches, Command, arg};
use log::error;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "genesift";
    pub const BIN_NAME: &str = "genesift";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Classify gene targets by expression and quantify reads over genomic intervals.")
        .subcommand_required(true)
        .arg(
            arg!(-v --verbose "More log output: -v for progress, -vv for debug")
                .global(true)
                .action(ArgAction::Count),
        )
        .subcommand(classify::cli::create_classify_cli())
        .subcommand(universe::cli::create_universe_cli())
        .subcommand(count::cli::create_count_cli())
        .subcommand(normalize::cli::create_normalize_cli())
}

fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        //
        // TARGET CLASSIFICATION
        //
        Some((classify::cli::CLASSIFY_CMD, matches)) => {
            classify::handlers::run_classify(matches)?;
        }

        //
        // GENE UNIVERSE
        //
        Some((universe::cli::UNIVERSE_CMD, matches)) => {
            universe::handlers::run_universe(matches)?;
        }

        //
        // READ COUNTING
        //
        Some((count::cli::COUNT_CMD, matches)) => {
            count::handlers::run_count(matches)?;
        }

        //
        // NORMALIZATION
        //
        Some((normalize::cli::NORMALIZE_CMD, matches)) => {
            normalize::handlers::run_normalize(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

fn main() {
    let matches = build_parser().get_matches();
    logging::init_logger(matches.get_count("verbose"));

    if let Err(e) = run(&matches) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_parser_is_consistent() {
        build_parser().debug_assert();
    }

    #[rstest]
    #[case(&["genesift", "count", "--peaks", "p.bed", "--bam", "s.bam", "--output", "o.tsv", "--sample-name", "NSC", "-v"])]
    #[case(&["genesift", "-v", "normalize", "--counts", "c.tsv", "--total-reads", "5000000", "--output", "o.tsv"])]
    #[case(&["genesift", "universe", "--gtf", "g.gtf.gz", "--output", "u.csv", "--biotype", "lincRNA"])]
    fn test_subcommands_parse(#[case] args: &[&str]) {
        assert!(build_parser().try_get_matches_from(args).is_ok());
    }

    #[rstest]
    fn test_verbose_is_global() {
        let matches = build_parser()
            .try_get_matches_from(["genesift", "normalize", "--counts", "c.tsv", "--total-reads", "1", "--output", "o.tsv", "--verbose"])
            .unwrap();
        assert_eq!(matches.get_count("verbose"), 1);
    }

    #[rstest]
    fn test_verbose_counts_repeats() {
        let matches = build_parser()
            .try_get_matches_from(["genesift", "-vv", "universe", "--gtf", "g.gtf.gz", "--output", "u.csv"])
            .unwrap();
        assert_eq!(matches.get_count("verbose"), 2);
    }

    #[rstest]
    fn test_unknown_backend_is_rejected() {
        let result = build_parser().try_get_matches_from([
            "genesift", "count", "--peaks", "p.bed", "--bam", "s.bam", "--output", "o.tsv",
            "--sample-name", "NSC", "--backend", "gpu",
        ]);
        assert!(result.is_err());
    }
}
