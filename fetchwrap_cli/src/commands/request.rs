use anyhow::{anyhow, Context, Result};
use clap::Args;
use fetchwrap_lib::{ApiClient, Method, RequestOptions};
use serde_json::Value;

use crate::output::print_json;

#[derive(Args)]
pub struct RequestArgs {
    /// Path relative to the base URL, or an absolute URL
    pub path: String,

    /// HTTP method (GET, POST, PUT, PATCH, DELETE, ...)
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// JSON request body
    #[arg(long, short = 'd')]
    pub data: Option<String>,

    /// Extra header as NAME:VALUE (repeatable)
    #[arg(long = "header", short = 'H')]
    pub headers: Vec<String>,
}

pub async fn run(args: &RequestArgs, client: &ApiClient) -> Result<()> {
    let method = Method::from_bytes(args.method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("invalid HTTP method {:?}", args.method))?;

    let mut options = RequestOptions::new().with_method(method);
    for raw in &args.headers {
        let (name, value) = parse_header(raw)?;
        options = options.with_header(name, value);
    }
    if let Some(data) = &args.data {
        let body: Value = serde_json::from_str(data).context("--data is not valid JSON")?;
        options = options.with_json(body);
    }

    match client.request::<Value>(&args.path, options).await? {
        Some(value) => print_json(&value),
        None => eprintln!("(no content)"),
    }

    Ok(())
}

/// Splits `NAME:VALUE`, trimming whitespace around both parts.
pub fn parse_header(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("header {:?} must look like NAME:VALUE", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("header {:?} has an empty name", raw));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
