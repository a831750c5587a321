//! Load a server configuration from TOML, then inspect it dynamically.
//!
//! Run with: cargo run --example server_config

use serde::Deserialize;
use serde_toml_lite::{from_str, parse, to_json, Value};
use std::error::Error;

const CONFIG: &str = r#"
# Service definition
name = "gateway"
started = 2024-03-01T09:30:00Z

[listen]
host = "0.0.0.0"
port = 8443
tls = { cert = "/etc/tls/cert.pem", key = "/etc/tls/key.pem" }

[[upstream]]
name = "auth"
url = 'http://10.0.0.5:9000'
weight = 1.0

[[upstream]]
name = "billing"
url = 'http://10.0.0.6:9000'
weight = 0.5
"#;

#[derive(Debug, Deserialize)]
struct Config {
    name: String,
    listen: Listen,
    upstream: Vec<Upstream>,
}

#[derive(Debug, Deserialize)]
struct Listen {
    host: String,
    port: u16,
    tls: Option<Tls>,
}

#[derive(Debug, Deserialize)]
struct Tls {
    cert: String,
    key: String,
}

#[derive(Debug, Deserialize)]
struct Upstream {
    name: String,
    url: String,
    weight: f64,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Typed access
    let config: Config = from_str(CONFIG)?;
    println!("{} listening on {}:{}", config.name, config.listen.host, config.listen.port);
    if let Some(tls) = &config.listen.tls {
        println!("  tls cert={} key={}", tls.cert, tls.key);
    }
    for upstream in &config.upstream {
        println!("  upstream {} -> {} (weight {})", upstream.name, upstream.url, upstream.weight);
    }

    // Dynamic access
    let root = parse(CONFIG)?;
    if let Some(started) = root.get("started").and_then(Value::parse_datetime) {
        println!("\nstarted at unix time {}", started.timestamp());
    }
    let second = root
        .get("upstream")
        .and_then(|u| u.get_index(1))
        .and_then(|u| u.get("name"))
        .and_then(Value::as_str);
    println!("second upstream: {:?}", second);

    println!("\nFlat rendering:\n{}", root);
    println!("As JSON:\n{}", serde_json::to_string_pretty(&to_json(&root))?);

    // Errors carry positions
    if let Err(err) = parse("[listen]\nport = 80\nport = 81\n") {
        println!("\nrejected: {}", err);
    }

    Ok(())
}
