//! Basic flat-path serialization and deserialization.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_flatpath::{from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Server {
    host: String,
    port: u16,
    replicas: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let server = Server {
        host: "db1.internal".to_string(),
        port: 5432,
        replicas: vec!["db2.internal".to_string(), "db3.internal".to_string()],
    };

    // Serialize to flat key/value lines
    let flat = to_string(&server)?;
    println!("Flat output:\n{}", flat);

    // Deserialize back to struct
    let server_back: Server = from_str(&flat)?;
    assert_eq!(server, server_back);
    println!("✓ Round-trip successful");

    Ok(())
}
