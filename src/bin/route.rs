use clap::Parser;
use srcroute_rs::net::{RouteResolver, SourceRouteHeader};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "route",
    about = "Resolve the source-route port list between two hosts"
)]
struct Args {
    /// Path to the json topology file
    #[arg(short = 'T', long, default_value = "topo/topology.json")]
    topo_path: PathBuf,

    /// Source host name or IPv4 address
    #[arg(short, long)]
    source: String,

    /// Target host name or IPv4 address
    #[arg(short, long)]
    target: String,
}

fn run(args: &Args) -> srcroute_rs::Result<()> {
    let resolver = RouteResolver::load(&args.topo_path)?;
    let route = resolver.resolve(&args.source, &args.target)?;
    let header = SourceRouteHeader::new(route.ports.clone());

    let topo = resolver.topology();
    let switches: Vec<&str> = route
        .switches
        .iter()
        .map(|&id| topo.switch(id).name())
        .collect();
    let ports: Vec<String> = route.ports.iter().map(|p| p.to_string()).collect();

    println!("src={} dst={}", route.src, route.dst);
    println!("switches={}", switches.join(","));
    println!("ports={}", ports.join(","));
    println!("header={}", header.to_hex()?);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
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
