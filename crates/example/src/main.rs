//! Example hookline host.
//!
//! Runs each command-line argument through the text pipeline and prints the
//! joined result.
//!
//! # Usage
//!
//! ```bash
//! hookline-demo "  first   line " "second line"
//! ```
//!
//! Set `HOOKLINE_LOG=hookline_hooks=trace` to watch registration and
//! retrieval.

use example::{TextPipeline, install_default_plugins};
use hookline_tracing::TracingConfig;

fn main() {
    let _ = dotenvy::dotenv();
    TracingConfig::from_env().init();

    let lines: Vec<String> = std::env::args().skip(1).collect();
    if lines.is_empty() {
        eprintln!("Usage: hookline-demo <line>...");
        eprintln!("Example: hookline-demo \"  first   line \" \"second line\"");
        std::process::exit(1);
    }

    let pipeline = TextPipeline::new();
    install_default_plugins(&pipeline);
    tracing::info!(extension_points = ?pipeline.registry().identifiers(), "plugins installed");

    let processed: Vec<String> = lines.iter().map(|line| pipeline.process(line)).collect();

    match pipeline.join("\n", processed) {
        Ok(Some(output)) => println!("{output}"),
        Ok(None) => eprintln!("Error: no join hook registered"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
