//! Set calculator.
//!
//! Parses sets in the text format, combines them and prints the result with its SQL predicate.
//!
//! ```bash
//! cargo run --example set_calc -- union "1-3,10-" "4-6"
//! cargo run --example set_calc -- --text invert "apple"
//! ```

use clap::{Parser, Subcommand};
use color_eyre::Result;
use rangeset_rs::domain::{Domain, Integer, Text};
use rangeset_rs::set::Set;
use rangeset_rs::sql::{Placeholder, Quote, SqlConfig, StandardQuoter};

#[derive(Parser)]
#[command(author, version, about = "Interval set calculator")]
struct Cli {
    /// Treat values as text instead of integers
    #[arg(long)]
    text: bool,

    /// Column name used in the SQL predicate
    #[arg(long, default_value = "x")]
    column: String,

    /// Emit bind parameters instead of inline literals
    #[arg(long)]
    params: bool,

    /// Log every operation
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a set
    Show { set: String },
    /// Union of two sets
    Union { left: String, right: String },
    /// Values of the left set missing from the right one
    Difference { left: String, right: String },
    /// Values present in both sets
    Intersection { left: String, right: String },
    /// Complement of a set
    Invert { set: String },
    /// Check whether the left set contains the right one
    Contains { left: String, right: String },
}

fn run<D>(cli: &Cli) -> Result<()>
where
    D: Domain,
    StandardQuoter: Quote<D::Value>,
{
    let result: Set<D> = match &cli.command {
        Commands::Show { set } => Set::parse(set)?,
        Commands::Union { left, right } => Set::<D>::parse(left)?.union(&Set::parse(right)?),
        Commands::Difference { left, right } => Set::<D>::parse(left)?.difference(&Set::parse(right)?)?,
        Commands::Intersection { left, right } => Set::<D>::parse(left)?.intersection(&Set::parse(right)?),
        Commands::Invert { set } => {
            let mut set = Set::<D>::parse(set)?;
            set.invert()?;
            set
        }
        Commands::Contains { left, right } => {
            let left = Set::<D>::parse(left)?;
            let right = Set::<D>::parse(right)?;
            println!("{}", left.contains_set(&right));
            return Ok(());
        }
    };

    println!("set = {}", result);
    println!("intervals:");
    for interval in result.intervals() {
        println!("  {:?}", interval);
    }
    if let Some(cardinality) = result.cardinality() {
        println!("cardinality = {}", cardinality);
    }

    let result = result.with_identifier(cli.column.as_str());
    if cli.params {
        let config = SqlConfig::default().with_placeholder(Placeholder::Dollar);
        let predicate = result.to_sql_with_params(&config)?;
        println!("sql = {}", predicate.sql);
        println!("params = {:?}", predicate.params);
    } else {
        println!("sql = {}", result.to_sql(&StandardQuoter)?);
    }
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    simplelog::TermLogger::init(
        if cli.verbose {
            simplelog::LevelFilter::Trace
        } else {
            simplelog::LevelFilter::Warn
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    if cli.text {
        run::<Text>(&cli)
    } else {
        run::<Integer>(&cli)
    }
}
