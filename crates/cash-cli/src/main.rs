//! # Cash Command-Line Tool
//!
//! Formats, parses and splits money values from the shell.
//!
//! ## Usage
//! ```bash
//! # Format minor units
//! cash fmt 1001897                 # $10,018.97
//!
//! # Parse text (rounds half to even)
//! cash parse 666.995               # 66700  $667.00
//!
//! # Split fairly
//! cash split 100.00 3              # $33.34 $33.33 $33.33
//! cash ratio 100.00 1,1,1          # $33.34 $33.33 $33.33
//!
//! # Multiply by a fraction
//! cash mul 18.18 3/4               # $13.64
//!
//! # Other currencies
//! cash --preset btc fmt 5          # ฿0.00000005
//! cash --config ./cash.toml fmt 5
//! ```

use std::env;
use std::path::PathBuf;

use cash_core::{CashConfig, CurrencyConfig, Money, MoneyError};
use num_bigint::BigInt;
use num_rational::BigRational;
use tracing::debug;
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() -> CliResult<()> {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(options) = parse_args(&args)? else {
        print_help();
        return Ok(());
    };
    let CliOptions {
        config_path,
        preset,
        positional,
    } = options;

    let mut config = CashConfig::load(config_path.as_deref())?;
    if let Some(preset) = preset {
        config.currency.preset = preset.parse()?;
        config.validate()?;
    }
    let currency = config.currency();
    debug!(%currency, "Resolved currency");

    match positional.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["fmt", cents] => {
            let money = Money::new(currency).with_cents(cents.parse()?);
            println!("{}", money);
        }
        ["parse", text] => {
            let money = Money::parse(currency, text)?;
            println!("{}\t{}", money.amount(), money);
        }
        ["split", amount, parts] => {
            let money = Money::parse(currency, amount)?;
            print_parts(&money.divide_by_scalar(parts.parse()?)?);
        }
        ["ratio", amount, weights] => {
            let money = Money::parse(currency, amount)?;
            let ratio = weights
                .split(',')
                .map(|w| w.trim().parse::<i64>())
                .collect::<Result<Vec<_>, _>>()?;
            print_parts(&money.divide_into_ratio(&ratio)?);
        }
        ["mul", amount, fraction] => {
            let money = Money::parse(currency, amount)?;
            let mut product = Money::new(currency);
            product.mul_by_rational(&money, &parse_fraction(fraction)?)?;
            println!("{}", product);
        }
        _ => {
            print_help();
            return Err("unrecognized command".into());
        }
    }

    Ok(())
}

#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    config_path: Option<PathBuf>,
    preset: Option<String>,
    positional: Vec<String>,
}

/// Splits flags from positional arguments. `None` means help was requested.
fn parse_args(args: &[String]) -> CliResult<Option<CliOptions>> {
    let mut options = CliOptions::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let path = args.get(i + 1).ok_or("--config requires a path")?;
                options.config_path = Some(PathBuf::from(path));
                i += 1;
            }
            "--preset" | "-p" => {
                let name = args.get(i + 1).ok_or("--preset requires a name")?;
                options.preset = Some(name.clone());
                i += 1;
            }
            "--help" | "-h" => return Ok(None),
            other => options.positional.push(other.to_string()),
        }
        i += 1;
    }

    Ok(Some(options))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,cash=info,cash_core=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Parses `3/4` or a plain integer `3`.
fn parse_fraction(text: &str) -> CliResult<BigRational> {
    let (numer, denom) = match text.split_once('/') {
        Some((n, d)) => (n.trim().parse::<BigInt>()?, d.trim().parse::<BigInt>()?),
        None => (text.trim().parse::<BigInt>()?, BigInt::from(1)),
    };
    if denom == BigInt::from(0) {
        return Err(Box::new(MoneyError::MalformedInput {
            input: text.to_string(),
            reason: "zero denominator".to_string(),
        }));
    }
    Ok(BigRational::new(numer, denom))
}

fn print_parts(parts: &[Money]) {
    let rendered: Vec<String> = parts.iter().map(Money::to_string).collect();
    println!("{}", rendered.join(" "));
}

fn print_help() {
    let usd = CurrencyConfig::USD;
    println!("Cash - fixed-point money calculator");
    println!();
    println!("Usage: cash [OPTIONS] <COMMAND>");
    println!();
    println!("Commands:");
    println!("  fmt <minor-units>          Format an integer amount ({})", Money::new(usd).with_cents(1001897));
    println!("  parse <text>               Parse text into minor units");
    println!("  split <amount> <n>         Divide into n parts");
    println!("  ratio <amount> <w1,w2,..>  Divide by weights");
    println!("  mul <amount> <p/q>         Multiply by a fraction");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>  TOML config file");
    println!("  -p, --preset <NAME>  Currency preset: usd, eur, btc");
    println!("  -h, --help           Show this help message");
}

// =============================================================================
// Unit Tests
// =============================================================================
