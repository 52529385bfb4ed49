use std::io;

use rulewalk::{RuleTree, collate_origins};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let path = std::env::args()
        .nth(1)
        .expect("usage: collate <rule_tree.json>");
    let tree = RuleTree::from_file(&path).expect("failed to load rule tree");
    let records = collate_origins(&tree.rules).expect("failed to collate origins");

    for record in &records {
        println!("{record}");
    }
    eprintln!("{} origin records", records.len());
}
