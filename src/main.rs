use anyhow::{Context, Result};
use billclean::{
    cli::{BatchArgs, CleanArgs, Cli, Command, PreviewArgs},
    preview::render_preview,
    session::{self, ResultState},
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) dispatch ─────────────────────────────────────────────────
    let cli = Cli::parse();
    match cli.command {
        Command::Clean(args) => run_clean(args),
        Command::Preview(args) => run_preview(args),
        Command::Batch(args) => run_batch(args),
    }
}

fn run_clean(args: CleanArgs) -> Result<()> {
    let state = match session::upload(args.input.as_deref()) {
        Ok(upload) => ResultState::ResultReady(upload),
        Err(e) => return Err(e).context("cleaning failed"),
    };

    if let (true, Some(upload)) = (args.preview, state.result()) {
        print!("{}", render_preview(&upload.records, args.preview_rows));
    }

    let dest = match &args.output {
        Some(path) => state.export_to_path(path),
        None => state.export_to_dir(&args.out_dir),
    }
    .context("saving filtered CSV")?;

    info!(dest = %dest.display(), "Filtered data saved");
    println!("{}", dest.display());
    Ok(())
}

fn run_preview(args: PreviewArgs) -> Result<()> {
    let upload = session::upload(args.input.as_deref()).context("cleaning failed")?;
    print!("{}", render_preview(&upload.records, args.rows));
    Ok(())
}

fn run_batch(args: BatchArgs) -> Result<()> {
    let report = session::clean_batch(&args.pattern, &args.out_dir)?;
    for (input, dest) in &report.exported {
        println!("{} -> {}", input.display(), dest.display());
    }
    for (input, msg) in &report.failed {
        eprintln!("{}: {}", input.display(), msg);
    }
    if !report.is_clean() {
        anyhow::bail!(
            "{} of {} files failed",
            report.failed.len(),
            report.failed.len() + report.exported.len()
        );
    }
    Ok(())
}
