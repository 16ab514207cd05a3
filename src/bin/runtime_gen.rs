use clap::Parser;
use srcroute_rs::runtime::write_runtime_configs;
use srcroute_rs::topo::{LookupMode, Topology};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "runtime-gen",
    about = "Write per-switch runtime json files for a topology"
)]
struct Args {
    /// Path to the json topology file
    #[arg(short = 'T', long)]
    topo_path: PathBuf,

    /// Directory receiving `<switch>-runtime.json`
    #[arg(short, long, default_value = "topo")]
    out_dir: PathBuf,
}

fn run(args: &Args) -> srcroute_rs::Result<()> {
    let topo = Topology::load(&args.topo_path)?;
    write_runtime_configs(&topo, &args.out_dir)?;

    print!("{}", topo.lookup(LookupMode::Node));
    print!("{}", topo.lookup(LookupMode::Edge));
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
