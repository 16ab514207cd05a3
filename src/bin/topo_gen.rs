use clap::Parser;
use srcroute_rs::Error;
use srcroute_rs::topo::generator::{GeneratorOpts, generate_topology};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    name = "topo-gen",
    about = "Generate a source-routing topology json file"
)]
struct Args {
    /// Number of switches in the topology (max: 9)
    #[arg(short = 'S', long, value_name = "N")]
    num_switch: usize,

    /// Number of hosts behind every switch (max: 5)
    #[arg(short = 'H', long, value_name = "N")]
    num_host: usize,

    /// Links between switches, e.g. s1-s2,s1-s3
    #[arg(short = 'L', long, conflicts_with = "links_file")]
    links: Option<String>,

    /// File whose first line holds the switch links
    #[arg(short = 'l', long)]
    links_file: Option<PathBuf>,

    /// Where to save the topology; printed to stdout when absent
    #[arg(short = 't', long)]
    topo_path: Option<PathBuf>,
}

fn run(args: &Args) -> srcroute_rs::Result<()> {
    let switch_links = match (&args.links, &args.links_file) {
        (Some(links), _) => links.clone(),
        (None, Some(path)) => {
            let raw = fs::read_to_string(path).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            raw.lines().next().unwrap_or_default().to_string()
        }
        (None, None) => {
            return Err(Error::InvalidParameters(
                "both `--links` and `--links-file` are not defined".to_string(),
            ));
        }
    };

    let spec = generate_topology(&GeneratorOpts {
        num_switch: args.num_switch,
        num_host: args.num_host,
        switch_links,
    })?;

    match &args.topo_path {
        Some(path) => {
            let json = spec.to_json_with_indent(b"\t")?;
            fs::write(path, json + "\n").map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            info!(path = %path.display(), links = spec.links.len(), "💾 拓扑已保存");
        }
        None => println!("{}", spec.to_json_with_indent(b"    ")?),
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
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
