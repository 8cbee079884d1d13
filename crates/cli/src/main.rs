//! Phase detector CLI.
//!
//! This binary replays access streams through the phase detector. It performs:
//! 1. **Trace run:** Feed a recorded text trace (`R|W|E|P <address>` per line).
//! 2. **Bench run:** Feed one of the built-in synthetic workloads.
//!
//! Both modes print detector statistics, or the full JSON report with `--json`, and can
//! optionally write every dispatched prefetch to a file in the same trace format.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use phasedet_core::common::AccessEvent;
use phasedet_core::config::Config;
use phasedet_core::phase::{PhaseId, PhaseListener};
use phasedet_core::prefetch::{PrefetchRequest, PrefetchSink};
use phasedet_core::sim::trace;
use phasedet_core::workload::{
    GappedStream, GappedStreamParams, Pattern, PatternParams, SingleStream, SingleStreamParams,
    StreamBench, Workload,
};
use phasedet_core::{PhaseDetector, stats::PhaseReport};

#[derive(Parser, Debug)]
#[command(
    name = "phasedet",
    author,
    version,
    about = "Working-set phase detector and interval stride prefetcher",
    long_about = "Replay a memory-access stream through the phase detector.\n\nExamples:\n  phasedet run --trace accesses.trace\n  phasedet run --trace accesses.trace --config detector.json --json\n  phasedet bench stream-bench --count 200000 --phases\n  phasedet bench pattern --pattern 'Gather,0,8,16,24,delta:64,count:50000'"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a recorded access trace.
    Run {
        /// Trace file to replay.
        #[arg(short, long)]
        trace: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run a built-in synthetic workload.
    Bench {
        /// Workload to generate.
        workload: BenchKind,

        /// Number of requests to issue (workload default if omitted).
        #[arg(short, long)]
        count: Option<u64>,

        /// Pattern description for the `pattern` workload.
        #[arg(long, required_if_eq("workload", "pattern"))]
        pattern: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// JSON detector configuration (defaults for anything omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the full JSON report instead of statistics.
    #[arg(long)]
    json: bool,

    /// Print every phase transition to stderr as it happens.
    #[arg(long)]
    phases: bool,

    /// Write dispatched prefetches to this file in trace format.
    #[arg(long)]
    prefetch_out: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum BenchKind {
    /// Strided bursts with a gap after each burst.
    SingleStream,
    /// Strided bursts with a one-off jump inside each burst.
    GappedStream,
    /// STREAM triad replay.
    StreamBench,
    /// Gather/scatter delta pattern (requires --pattern).
    Pattern,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run { trace, output } => cmd_run(&trace, &output),
        Commands::Bench {
            workload,
            count,
            pattern,
            output,
        } => cmd_bench(workload, count, pattern.as_deref(), &output),
    }
}

/// Installs the stderr `tracing` subscriber.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Replays a trace file through a freshly built detector.
fn cmd_run(path: &Path, output: &OutputArgs) {
    let events = trace::load_trace(path).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: could not load trace '{}': {e}", path.display());
        process::exit(1);
    });
    debug!(events = events.len(), trace = %path.display(), "trace loaded");
    run_detector(events, output);
}

/// Builds the requested workload and replays it.
fn cmd_bench(kind: BenchKind, count: Option<u64>, pattern: Option<&str>, output: &OutputArgs) {
    let workload: Result<Box<dyn Workload>, String> = match kind {
        BenchKind::SingleStream => {
            let mut params = SingleStreamParams::default();
            if let Some(n) = count {
                params.count = n;
            }
            SingleStream::new(params)
                .map(|w| Box::new(w) as Box<dyn Workload>)
                .map_err(|e| e.to_string())
        }
        BenchKind::GappedStream => {
            let mut params = GappedStreamParams::default();
            if let Some(n) = count {
                params.count = n;
            }
            GappedStream::new(params)
                .map(|w| Box::new(w) as Box<dyn Workload>)
                .map_err(|e| e.to_string())
        }
        BenchKind::StreamBench => Ok(Box::new(
            count.map_or_else(StreamBench::default, StreamBench::new),
        )),
        BenchKind::Pattern => PatternParams::parse(pattern.unwrap_or(""))
            .and_then(|mut params| {
                if let Some(n) = count {
                    params.count = n;
                }
                Pattern::new(params)
            })
            .map(|w| Box::new(w) as Box<dyn Workload>)
            .map_err(|e| e.to_string()),
    };

    let workload = workload.unwrap_or_else(|e| {
        eprintln!("[!] FATAL: invalid workload: {e}");
        process::exit(1);
    });
    debug!(workload = workload.name(), requests = workload.remaining(), "workload ready");
    run_detector(workload, output);
}

/// Builds the detector, attaches sinks and listeners, feeds `events`, and reports.
fn run_detector(events: impl IntoIterator<Item = AccessEvent>, output: &OutputArgs) {
    let config = match &output.config {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    };
    let config = config.unwrap_or_else(|e| {
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    });

    let mut detector = PhaseDetector::new(config).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    });

    if let Some(path) = &output.prefetch_out {
        let file = File::create(path).unwrap_or_else(|e| {
            eprintln!("[!] FATAL: could not create '{}': {e}", path.display());
            process::exit(1);
        });
        detector.register_callback(Box::new(TraceSink::new(BufWriter::new(file))));
    }
    if output.phases {
        detector.register_phase_listener(Box::new(TransitionPrinter::new(io::stderr())));
    }

    let intervals = detector.run(events);
    debug!(intervals, pending = detector.pending().len(), "stream drained");

    if output.json {
        print_report(&detector.export_history());
    } else {
        detector.stats.print();
    }
}

fn print_report(report: &PhaseReport) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = serde_json::to_writer_pretty(&mut out, report)
        .map_err(io::Error::from)
        .and_then(|()| writeln!(out));
    if let Err(e) = written {
        eprintln!("[!] FATAL: could not write report: {e}");
        process::exit(1);
    }
}

/// Writes each dispatched prefetch as a `P <address>` trace line.
struct TraceSink<W: Write> {
    out: W,
    failed: bool,
}

impl<W: Write> TraceSink<W> {
    const fn new(out: W) -> Self {
        Self { out, failed: false }
    }
}

impl<W: Write> PrefetchSink for TraceSink<W> {
    fn on_prefetch(&mut self, request: &PrefetchRequest) {
        if self.failed {
            return;
        }
        if let Err(e) = writeln!(self.out, "P {:#x}", request.addr) {
            warn!(error = %e, "prefetch output failed, further prefetches are not written");
            self.failed = true;
        }
    }
}

impl<W: Write> Drop for TraceSink<W> {
    fn drop(&mut self) {
        if let Err(e) = self.out.flush() {
            warn!(error = %e, "could not flush prefetch output");
        }
    }
}

/// Writes a line whenever the phase changes between intervals.
///
/// The CLI hands it stderr; stdout carries only the statistics or JSON report.
struct TransitionPrinter<W: Write> {
    out: W,
    last: Option<PhaseId>,
}

impl<W: Write> TransitionPrinter<W> {
    const fn new(out: W) -> Self {
        Self { out, last: None }
    }
}

impl<W: Write> PhaseListener for TransitionPrinter<W> {
    fn on_phase(&mut self, interval: u64, phase: PhaseId) {
        if self.last == Some(phase) {
            return;
        }
        self.last = Some(phase);
        if let Err(e) = writeln!(self.out, "interval {interval:>8}: phase {phase}") {
            warn!(error = %e, "could not write phase transition");
        }
    }
}
