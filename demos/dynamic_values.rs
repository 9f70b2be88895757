//! Working with FlatValue when the structure isn't known at compile time.
//!
//! Run with: cargo run --example dynamic_values

use serde_flatpath::{flat, from_str, to_string, FlatValue};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Parse an arbitrary document into a tree
    let input = "name=demo\nserver.host=db1\nserver.port=5432\ntags.1=edge\ntags.2=v2";
    let value: FlatValue = from_str(input)?;

    println!("name = {:?}", value.get("name").and_then(|v| v.as_str()));
    let host = value.get("server").and_then(|s| s.get("host"));
    println!("server.host = {:?}", host.and_then(|v| v.as_str()));

    if let Some(tags) = value.get("tags").and_then(|t| t.as_array()) {
        println!("{} tags", tags.len());
    }

    // Branch values: a path that is both a value and a prefix
    let branchy: FlatValue = from_str("p=first\np.b=second")?;
    let p = branchy.get("p").expect("p exists");
    println!("p itself = {:?}", p.as_str());
    println!("p.b      = {:?}", p.get("b").and_then(|v| v.as_str()));

    // Build a tree with the flat! macro and write it out
    let built = flat!({
        "service": {
            "name": "ingest",
            "workers": [4, 8]
        }
    });
    println!("\nBuilt tree flattened:\n{}", to_string(&built)?);

    Ok(())
}
