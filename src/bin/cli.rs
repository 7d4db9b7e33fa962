//! CLI application for facial feature analysis and hairstyle suggestions.
//!
//! Usage:
//!   face-stylist <frames...> --detections det.json              # Human-readable output
//!   face-stylist <frames...> --detections det.json --json       # JSON output
//!   face-stylist <frames...> --detections det.json -o out.json  # Save to file

use clap::Parser;
use face_stylist::{
    Analysis, CaptureSession, Composer, Config, Error, ImageSequenceCamera, ReplayDetector,
    SessionEvent,
};
use serde::Serialize;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

#[derive(Parser, Debug)]
#[command(name = "face-stylist")]
#[command(author, version, about = "Facial feature analysis and hairstyle suggestions", long_about = None)]
struct Args {
    /// Input frames, played in order
    #[arg(required = true)]
    frames: Vec<PathBuf>,

    /// Detector results for the frames (JSON array, one entry per frame)
    #[arg(long)]
    detections: PathBuf,

    /// Configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for the style pick
    #[arg(long)]
    seed: Option<u64>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Output structure for JSON serialization
#[derive(Serialize)]
struct Output<'a> {
    frames: Vec<String>,
    #[serde(flatten)]
    analysis: &'a Analysis,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(level);
    tracing_subscriber::registry().with(stderr_layer).init();
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    // The sequence does not loop, so give every frame one tick plus a spare
    let deadline = config.capture.poll_interval() * (args.frames.len() as u32 + 1);

    let detector = ReplayDetector::load(&args.detections)?;
    let camera = ImageSequenceCamera::from_paths(&args.frames);
    let composer = match args.seed {
        Some(seed) => Composer::seeded(seed),
        None => Composer::new(),
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut session = CaptureSession::new(config, camera, detector)?
        .with_composer(composer)
        .with_events(tx);
    let stop = session.stop_handle();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let result = runtime.block_on(async {
        let capture = session.run();
        tokio::pin!(capture);
        tokio::select! {
            result = &mut capture => result,
            _ = tokio::time::sleep(deadline) => {
                info!("All frames played");
                stop.stop();
                capture.await
            }
        }
    });

    while let Ok(event) = rx.try_recv() {
        match event {
            SessionEvent::Status(status) => eprintln!("{}", status),
            SessionEvent::NoFace => eprintln!("{}", Error::NoFace),
            SessionEvent::Analysis(_) => {}
        }
    }

    let analysis = result?.ok_or(Error::NoFace)?;

    let output_str = if args.json {
        let output = Output {
            frames: args.frames.iter().map(|p| p.display().to_string()).collect(),
            analysis: &analysis,
        };
        serde_json::to_string_pretty(&output)?
    } else {
        format_human_readable(&analysis)
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output_str)?;
        info!("Output written to {}", path.display());
    } else {
        println!("{}", output_str);
    }

    Ok(())
}

fn format_human_readable(analysis: &Analysis) -> String {
    let mut s = String::new();

    s.push_str("Features:\n");
    for row in analysis.features.summary_rows() {
        s.push_str(&format!("  {:<11} {}\n", format!("{}:", row.heading), row.value));
        if !row.detail.is_empty() {
            s.push_str(&format!("  {:<11} {}\n", "", row.detail));
        }
    }

    s.push_str(&format!("\nSuggested style: {}\n", analysis.suggestion.style));
    s.push_str(&format!("\n{}\n", analysis.suggestion.text));

    s
}
