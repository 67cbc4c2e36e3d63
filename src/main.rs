//! Storage Cost-Model Simulator CLI.
//!
//! A small demonstration driver for the cost model. It builds the device
//! stack described by a TOML configuration file (or the defaults), replays
//! a deterministic mix of sequential writes, strided reads, and partial
//! overwrites against it, and prints the resulting counter ledger.
//!
//! The driver implements no index or workload-analysis logic; it exists to
//! exercise the library surface end to end.

use clap::Parser;
use std::process;

use memcost::config::Config;
use memcost::disk::counter;
use memcost::Disk;

/// Command-line arguments for the cost-model simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "Analytical storage-device cost simulator")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<String>,

    /// Number of operations per workload phase.
    #[arg(short, long, default_value_t = 1024)]
    ops: u64,

    /// Print the full JSON snapshot instead of the text report.
    #[arg(long)]
    json: bool,
}

/// Main entry point.
///
/// # Behavior
///
/// 1. **Configuration**: Parses arguments and loads the TOML file if given.
/// 2. **Construction**: Builds the Disk → MemoryController → MemoryModel
///    stack from the selected preset.
/// 3. **Workload**: Runs three deterministic phases (sequential writes,
///    strided reads, partial overwrites) with a flush after each phase.
/// 4. **Report**: Prints a banner-formatted counter summary, or the JSON
///    snapshot with `--json`.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let config = match args.config {
        Some(ref path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("[!] FATAL: Could not load config '{}': {}", path, e);
                process::exit(1);
            }
        },
        None => Config::default(),
    };

    let mut disk = match config.build_disk() {
        Ok(disk) => disk,
        Err(e) => {
            eprintln!("[!] FATAL: {}", e);
            process::exit(1);
        }
    };

    println!("Device Configuration");
    println!("--------------------");
    println!("Model:                {}", disk.model().name());
    println!("Page Size:            {} B", disk.model().page_size());
    println!("Block Size:           {} B", disk.model().block_size());
    println!(
        "Read Cache Line:      {} B",
        disk.controller().read_line_bytes()
    );
    println!(
        "Write Cache Line:     {} B",
        disk.controller().write_line_bytes()
    );
    println!("--------------------");

    let elapsed = run_workload(&mut disk, args.ops);

    if args.json {
        println!("{}", disk.to_json());
    } else {
        print_report(&disk, elapsed);
    }
}

/// Replays the three workload phases and returns the simulated seconds.
fn run_workload(disk: &mut Disk, ops: u64) -> f64 {
    let page = disk.model().page_size().max(1);
    let mut elapsed = 0.0;

    // Phase 1: sequential whole-page writes.
    for i in 0..ops {
        elapsed += disk.write_bytes(i * page, page);
    }
    elapsed += disk.flush_cache();

    // Phase 2: strided reads, revisiting every fourth page to exercise the
    // read cache.
    for i in 0..ops {
        let stride = if i % 4 == 0 { i / 4 } else { i };
        elapsed += disk.read_bytes(stride * page, page);
    }

    // Phase 3: partial overwrites of half a page each.
    for i in 0..ops {
        elapsed += disk.overwrite_bytes(i * page, page / 2 + 1);
    }
    elapsed += disk.flush_cache();

    elapsed
}

/// Prints the counter ledger in a banner-formatted report.
fn print_report(disk: &Disk, elapsed: f64) {
    let row = |id| {
        let (name, value) = disk.counter(id);
        println!("  {:<28} {:.9}", name, value);
    };

    println!("\n==========================================================");
    println!("STORAGE COST SIMULATION");
    println!("==========================================================");
    println!("device                 {}", disk.model().name());
    println!("sim_seconds            {:.9}", elapsed);
    println!("wear_out_bytes         {}", disk.model().wear_out());
    println!("memory_cursor          {:#x}", disk.current_memory_addr());
    println!("----------------------------------------------------------");
    println!("READ");
    row(counter::READ_TOTAL_TIME);
    row(counter::READ_TOTAL_OPERATIONS);
    row(counter::READ_TOTAL_BYTES);
    row(counter::READ_AVG_TIME);
    println!("WRITE");
    row(counter::WRITE_TOTAL_TIME);
    row(counter::WRITE_TOTAL_OPERATIONS);
    row(counter::WRITE_TOTAL_BYTES);
    row(counter::WRITE_AVG_TIME);
    println!("OVERWRITE");
    row(counter::OVERWRITE_TOTAL_TIME);
    row(counter::OVERWRITE_TOTAL_OPERATIONS);
    row(counter::OVERWRITE_TOTAL_BYTES);
    row(counter::OVERWRITE_AVG_TIME);
    println!("==========================================================");
}
