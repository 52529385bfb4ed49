use std::io;

use rulewalk::{AnalyzerBuilder, RuleTree};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .expect("usage: describe <rule_tree.json> [asset_id]");

    let mut builder = AnalyzerBuilder::new();
    if let Some(asset_id) = args.next() {
        builder = builder.asset_id(asset_id);
    }
    let analyzer = builder.build();

    let tree = RuleTree::from_file(&path).expect("failed to load rule tree");
    let description = analyzer.describe(&tree).expect("failed to describe property");

    eprintln!("{description}");
    println!(
        "{}",
        serde_json::to_string_pretty(&description).expect("failed to serialize description")
    );
}
