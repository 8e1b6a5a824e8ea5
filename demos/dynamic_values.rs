//! Working with TomlValue for runtime flexibility.
//!
//! Run with: cargo run --example dynamic_values

use serde::Serialize;
use serde_toml_lite::{parse, to_string, to_value, toml, TomlValue};
use std::error::Error;

#[derive(Debug, Serialize)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Build config dynamically with toml! macro
    let config = toml!({
        "host": "localhost",
        "port": 8080,
        "features": ["auth", "logging", "metrics"],
        "debug": true
    });

    println!("Config as TOML:\n{}", to_string(&config)?);

    if let TomlValue::Table(table) = &config {
        if let Some(host) = table.get("host").and_then(TomlValue::as_str) {
            println!("Accessing field 'host': {}", host);
        }
        if let Some(port) = table.get("port").and_then(TomlValue::as_i64) {
            println!("Accessing field 'port': {}", port);
        }
        if let Some(features) = table.get("features").and_then(TomlValue::as_array) {
            println!("Accessing field 'features': {} items\n", features.len());
        }
    }

    let user = User {
        id: 123,
        name: "Alice".to_string(),
        roles: vec!["admin".to_string(), "developer".to_string()],
    };
    let user_value = to_value(&user)?;
    println!("User inline: {}\n", user_value);

    // Dates, local times and radix integers from a parsed document
    let doc = parse("when = 1979-05-27T07:32:00-08:00\nalarm = 07:30:00\nmask = 0o755")?;
    for (key, value) in &doc {
        println!("{} is a {}: {}", key, value.type_str(), value);
    }

    Ok(())
}
