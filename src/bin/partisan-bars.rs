use anyhow::{Result, ensure};
use clap::{Args, Parser, Subcommand};
use partisan_bars::{Chart, ChartConfig, stats, storage, table};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "partisan-bars",
    version,
    about = "Render, tabulate & summarize the median-income / partisanship bar chart"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the chart (or a sequence of animation frames) to SVG.
    Render(RenderArgs),
    /// Print the data table.
    Table(DataArgs),
    /// Print summary statistics of median income.
    Stats(DataArgs),
}

#[derive(Args, Debug)]
struct DataArgs {
    /// Dataset file (.json or .csv) with name, medianIncome, democraticReps, republicanReps.
    #[arg(short, long)]
    data: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    data: DataArgs,
    /// Output SVG path.
    #[arg(short, long)]
    out: PathBuf,
    /// JSON chart config; missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override chart width.
    #[arg(long)]
    width: Option<u32>,
    /// Override chart height.
    #[arg(long)]
    height: Option<u32>,
    /// Switch the sort toggle on at t=0 (cancels the automatic sort).
    #[arg(long, default_value_t = false)]
    sorted: bool,
    /// Virtual time in ms at which the chart is captured.
    #[arg(long, default_value_t = 0)]
    at: u64,
    /// Also write one SVG per frame step from 0 to --at into this directory.
    #[arg(long)]
    frames_dir: Option<PathBuf>,
    /// Frame step in ms for --frames-dir.
    #[arg(long, default_value_t = 50)]
    frame_step: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Table(args) => cmd_table(args),
        Command::Stats(args) => cmd_stats(args),
    }
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let dataset = storage::load_dataset(&args.data.data)?;
    let mut config = match &args.config {
        Some(p) => ChartConfig::from_json_file(p)?,
        None => ChartConfig::default(),
    };
    if let Some(w) = args.width {
        config.width = w;
    }
    if let Some(h) = args.height {
        config.height = h;
    }

    let mut chart = Chart::new(dataset, config)?;
    if args.sorted {
        chart.toggle(true)?;
    }

    if let Some(dir) = args.frames_dir.as_ref() {
        ensure!(args.frame_step > 0, "--frame-step must be positive");
        std::fs::create_dir_all(dir)?;
        let mut n = 0usize;
        loop {
            let path = dir.join(format!("frame_{n:05}.svg"));
            chart.write_svg(&path)?;
            n += 1;
            if chart.now() >= args.at {
                break;
            }
            let next = (chart.now() + args.frame_step).min(args.at);
            chart.advance_to(next)?;
        }
        eprintln!("Wrote {} frames to {}", n, dir.display());
    } else {
        chart.advance_to(args.at)?;
    }

    chart.write_svg(&args.out)?;
    eprintln!(
        "Wrote chart at t={} ms ({:?}) to {}",
        chart.now(),
        chart.order(),
        args.out.display()
    );
    Ok(())
}

fn cmd_table(args: DataArgs) -> Result<()> {
    let dataset = storage::load_dataset(&args.data)?;
    print!("{}", table::render_text(&table::table_rows(&dataset)));
    Ok(())
}

fn cmd_stats(args: DataArgs) -> Result<()> {
    let dataset = storage::load_dataset(&args.data)?;
    let s = stats::summary(&dataset);
    println!(
        "count={}  min={}  max={}  mean={}  median={}  democratic_reps={}  republican_reps={}",
        s.count,
        partisan_bars::format::currency(s.min),
        partisan_bars::format::currency(s.max),
        partisan_bars::format::currency(s.mean.round()),
        partisan_bars::format::currency(s.median),
        s.democratic_reps,
        s.republican_reps
    );
    Ok(())
}
