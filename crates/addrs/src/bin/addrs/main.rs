mod cli;

use addrs::parse::{parse_target_str, Target};
use addrs::Targetable;

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("ADDRS_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let command_result = match cli.command {
        cli::Command::Parse(parse_cli) => parse(parse_cli),
        cli::Command::Contains(contains_cli) => contains(contains_cli),
    };

    match command_result {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            for error in e.chain() {
                eprintln!("{error}")
            }
            std::process::exit(1);
        }
    }
}

pub fn parse(cli: cli::ParseCommand) -> anyhow::Result<i32> {
    let subjects = cli
        .targets
        .iter()
        .map(|text| target(text).map(|target| target.subject))
        .collect::<anyhow::Result<Vec<Targetable>>>()?;

    output(&cli.output, &subjects)?;
    Ok(0)
}

pub fn contains(cli: cli::ContainsCommand) -> anyhow::Result<i32> {
    let addr = target(&cli.addr)?.subject;
    let other = target(&cli.other)?.subject;

    let contains = addr.target_contains(&other);
    tracing::info!(%addr, %other, contains, "containment checked");
    println!("{contains}");

    Ok(if contains { 0 } else { 2 })
}

/// Parses a target, printing source snippets for its diagnostics on failure
fn target(text: &str) -> anyhow::Result<Target> {
    let diagnostics = match parse_target_str(text) {
        Ok(target) => return Ok(target),
        Err(diagnostics) => diagnostics,
    };

    for snippet in diagnostics.iter().filter_map(|diag| diag.snippet(text)) {
        eprintln!("{snippet}");
    }

    let Some(err) = diagnostics.err_with_warnings() else {
        anyhow::bail!("Invalid target {text:?}");
    };

    Err(anyhow::Error::new(err).context(format!("Invalid target {text:?}")))
}

fn output(output: &cli::OutputArgs, subjects: &[Targetable]) -> anyhow::Result<()> {
    match output.format {
        cli::OutputFormat::Yaml => serde_yaml::to_writer(std::io::stdout(), subjects)?,
        cli::OutputFormat::Json => serde_json::to_writer_pretty(std::io::stdout(), subjects)?,
    };

    Ok(())
}
