use std::env;

use library::{Library, TracingSink};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let source = env::args()
        .nth(1)
        .or_else(|| env::var("LYREBOX_SOURCE").ok())
        .ok_or("LYREBOX_SOURCE not set and no path argument")?;

    let library = Library::build(&source, &TracingSink)?;
    let stats = library.stats();
    println!("Source: {}", library.root().display());

    for identifier in library.identifiers() {
        let group = library.group(identifier)?;
        let flagged = library
            .diagnostics()
            .iter()
            .filter(|diagnostic| diagnostic.identifier() == identifier.as_str())
            .count();
        println!(
            "{}: {} images, {} resources, {} flagged",
            identifier,
            group.images().len(),
            group.resources().len(),
            flagged
        );
    }
    for diagnostic in library.diagnostics() {
        println!("warning: {}", diagnostic);
    }
    println!(
        "Indexed: {} identifiers, {} images, {} resources, {} diagnostics",
        stats.identifiers, stats.images, stats.resources, stats.diagnostics
    );

    Ok(())
}
