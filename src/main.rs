//! gesturedrop CLI
//!
//! Replays recorded hand-keypoint traces through the gesture pipeline and
//! fires the transfer trigger on each completed grab/release gesture.

use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use gesturedrop::{
    config::Config,
    core::DetectionSession,
    report::ReportBuilder,
    source::{ReplaySource, SourceRunner},
    stats::create_shared_stats_with_persistence,
    transfer::LoggingTrigger,
    VERSION,
};

#[derive(Parser)]
#[command(name = "gesturedrop")]
#[command(version = VERSION)]
#[command(about = "Gesture-driven file transfer trigger", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the gesture pipeline over a recorded keypoint trace
    Run {
        /// Path to a JSON trace of frame observations
        #[arg(long)]
        trace: PathBuf,

        /// File label armed for transfer on each release
        #[arg(long, default_value = "file.bin")]
        file: String,

        /// Proximity threshold in pixels (overrides the config file)
        #[arg(long)]
        threshold: Option<f64>,

        /// Subject identifier tagged onto emitted transitions
        #[arg(long)]
        subject: Option<String>,

        /// Milliseconds between frames (overrides the config file)
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Skip writing the session report
        #[arg(long)]
        no_report: bool,
    },

    /// Show cumulative session statistics
    Status,

    /// Show configuration
    Config,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            trace,
            file,
            threshold,
            subject,
            interval_ms,
            no_report,
        } => {
            cmd_run(&trace, file, threshold, subject, interval_ms, no_report);
        }
        Commands::Status => {
            cmd_status();
        }
        Commands::Config => {
            cmd_config();
        }
    }
}

fn cmd_run(
    trace: &PathBuf,
    file: String,
    threshold: Option<f64>,
    subject: Option<String>,
    interval_ms: Option<u64>,
    no_report: bool,
) {
    println!("gesturedrop v{VERSION}");
    println!();

    // Load or create configuration, then apply CLI overrides
    let mut config = Config::load().unwrap_or_default();
    if let Some(t) = threshold {
        config.gesture.threshold = t;
    }
    if subject.is_some() {
        config.gesture.subject = subject;
    }
    let interval = Duration::from_millis(interval_ms.unwrap_or(config.frame_interval_ms));

    if let Err(e) = config.ensure_directories() {
        eprintln!("Warning: Could not create directories: {e}");
    }

    // Load the trace
    let source = match ReplaySource::from_file(trace) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error loading trace {trace:?}: {e}");
            std::process::exit(1);
        }
    };

    // Set up the session stats log
    let stats = create_shared_stats_with_persistence(config.data_path.join("stats.json"));

    // Build the detection session; an invalid configuration must not run
    let mut session = match DetectionSession::new(
        config.gesture.clone(),
        file.clone(),
        Box::new(LoggingTrigger),
    ) {
        Ok(session) => session.with_stats(stats.clone()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut report_builder = ReportBuilder::new();

    println!("Trace: {trace:?}");
    println!("Armed file: {file}");
    println!("Threshold: {} px", config.gesture.threshold);
    if let Some(ref subject) = config.gesture.subject {
        println!("Subject: {subject}");
    }
    println!("Instance ID: {}", report_builder.instance_id());
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    // Frame loop: the runner feeds frames in source order over a channel
    let runner = SourceRunner::spawn(source, interval);

    while running.load(Ordering::SeqCst) {
        match runner.receiver().recv_timeout(Duration::from_millis(100)) {
            Ok(frame) => {
                if let Some(transition) = session.process_frame(&frame) {
                    println!(
                        "[{}] Frame {}: {} (close pairs: {})",
                        transition.timestamp.format("%H:%M:%S%.3f"),
                        transition.seq,
                        transition.kind,
                        transition.close_count
                    );
                    report_builder.record(transition);
                }
            }
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {
                // No frame within the tick; keep polling until Ctrl+C.
            }
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                // Trace exhausted.
                break;
            }
        }
    }
    runner.join();

    println!();
    println!("Trace complete.");
    println!();

    // Persist stats for `gesturedrop status`
    if let Err(e) = stats.save() {
        eprintln!("Warning: Could not save session stats: {e}");
    }

    // Export the session report
    if !no_report && report_builder.transition_count() > 0 {
        let report_path = config.export_path.join(format!(
            "session_{}.json",
            Utc::now().format("%Y%m%d_%H%M%S")
        ));
        let report = report_builder.build(&config.gesture, file);
        match report.write_to(&report_path) {
            Ok(()) => println!(
                "Exported report with {} transitions to {:?}",
                report.transitions.len(),
                report_path
            ),
            Err(e) => eprintln!("Error writing report: {e}"),
        }
    }

    println!();
    println!("{}", stats.summary());
}

fn cmd_status() {
    let config = Config::load().unwrap_or_default();

    println!("gesturedrop Status");
    println!("==================");
    println!();
    println!("Configuration:");
    println!("  Threshold: {} px", config.gesture.threshold);
    println!("  Proximity pairs: {}", config.gesture.proximity_pairs.len());
    println!("  Export path: {:?}", config.export_path);
    println!();

    let stats_path = config.data_path.join("stats.json");
    if stats_path.exists() {
        if let Ok(content) = std::fs::read_to_string(&stats_path) {
            if let Ok(stats) = serde_json::from_str::<serde_json::Value>(&content) {
                println!("Cumulative Statistics:");
                if let Some(frames) = stats.get("frames_processed") {
                    println!("  Frames processed: {frames}");
                }
                if let Some(grabs) = stats.get("grabs") {
                    println!("  Grabs: {grabs}");
                }
                if let Some(releases) = stats.get("releases") {
                    println!("  Releases: {releases}");
                }
                if let Some(transfers) = stats.get("transfers_triggered") {
                    println!("  Transfers triggered: {transfers}");
                }
                if let Some(failures) = stats.get("transfer_failures") {
                    println!("  Transfer failures: {failures}");
                }
            }
        }
    } else {
        println!("No previous session data found.");
    }
}

fn cmd_config() {
    let config = Config::load().unwrap_or_default();

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_else(|_| "Error".to_string())
    );
}
