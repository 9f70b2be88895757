//! Customizing the line format with FlatOptions.
//!
//! Run with: cargo run --example custom_options

use serde::{Deserialize, Serialize};
use serde_flatpath::{to_string_with_options, FlatOptions, IndexMarker};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    name: String,
    debug: bool,
    ports: Vec<u16>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "MyApp".to_string(),
        debug: true,
        ports: vec![8080, 8081],
    };

    // Default format: "." separator, "=", implicit 1-based indexes
    println!("Default:");
    println!("{}", serde_flatpath::to_string(&config)?);

    // Explicit index markers, numbered from 0
    println!("Index markers:");
    let marker_options = FlatOptions::new()
        .with_write_index_using_markers(true)
        .with_first_array_offset(0);
    println!("{}", to_string_with_options(&config, marker_options)?);

    // Scoped under a prefix, colon-separated
    println!("Prefixed, colon-separated:");
    let scoped_options = FlatOptions::new()
        .with_key_prefix("app")
        .with_key_value_separator(": ");
    println!("{}", to_string_with_options(&config, scoped_options)?);

    // Custom separator and markers, with a header
    println!("Custom separator and markers:");
    let custom_options = FlatOptions::new()
        .with_path_separator("/")
        .with_index_marker(IndexMarker::new("<", ">"))
        .with_write_index_using_markers(true)
        .with_header("# generated by custom_options\n");
    println!("{}", to_string_with_options(&config, custom_options)?);

    Ok(())
}
