//! Aligned output and parse errors.
//!
//! Run with: cargo run --example custom_options

use serde_toml_lite::{parse, stringify, TomlOptions};
use std::error::Error;

const SOURCE: &str = r#"
title = "TOML Example"

[database]
server = "192.168.1.1"
ports = [ 8000, 8001, 8002 ]
connection_max = 5000

[servers.alpha]
ip = "10.0.0.1"
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let doc = parse(SOURCE)?;

    println!("Default:\n{}", stringify(&doc, &TomlOptions::new()));
    println!("Aligned keys:\n{}", stringify(&doc, &TomlOptions::aligned()));

    match parse("a = 1\nb = [1, 2") {
        Ok(_) => println!("unexpectedly parsed"),
        Err(err) => println!("Error: {}", err),
    }

    Ok(())
}
