use anyhow::Result;
use clap::Parser;
use cribar::cli::{Cli, OutputFormat};
use cribar::{analysis, ingest};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Validate ranges clap cannot express
    if !(args.alpha > 0.0 && args.alpha <= 1.0) {
        anyhow::bail!(
            "significance level must be a value in (0, 1], got {}",
            args.alpha
        );
    }
    if args.max_comb == Some(0) {
        anyhow::bail!("--max-comb must be >= 1");
    }

    init_tracing(args.debug);

    let (transactions, item_names) = ingest::read_inputs(&args.matrix_file, &args.outcome_file)?;
    tracing::info!(
        transactions = transactions.len(),
        items = item_names.len(),
        "input ingested"
    );

    let config = analysis::AnalysisConfig {
        alpha: args.alpha,
        method: args.method,
        max_comb: args.max_comb,
    };
    let report = analysis::run(&transactions, &item_names, &config)?;

    match args.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}
