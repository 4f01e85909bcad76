//! vtb — command-line front end for the recognition façade
//!
//! Sends one named operation through the dispatch surface and prints the
//! response (or the error envelope) as JSON, exactly as a host application
//! would receive it.

use anyhow::{Context, Result};
use base64::prelude::*;
use clap::Parser;
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use vision_text_bridge::TextRecognizer;

/// Bridge to the platform's native text-recognition engine
#[derive(Parser, Debug)]
#[command(name = "vtb")]
#[command(about = "Run a text-recognition operation against the native OCR engine")]
struct Args {
    /// Operation name (recognizeText, recognizeTextWithConfig,
    /// getPlatformInfo, isAvailable, getSupportedLanguages)
    operation: String,

    /// Image file to recognize
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Recognition configuration as a JSON object
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let image_bytes = match &args.image {
        Some(path) => {
            Some(std::fs::read(path).with_context(|| format!("Failed to read image: {path:?}"))?)
        }
        None => None,
    };
    let config = match &args.config {
        Some(raw) => Some(serde_json::from_str(raw).context("--config is not valid JSON")?),
        None => None,
    };

    let request = build_args(image_bytes.as_deref(), config);
    let recognizer = TextRecognizer::new();

    match recognizer.handle(&args.operation, &request).await {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(envelope) => {
            eprintln!("{}", serde_json::to_string_pretty(&envelope)?);
            std::process::exit(1);
        }
    }
}

/// Pack the CLI inputs into the operation argument map.
fn build_args(image_bytes: Option<&[u8]>, config: Option<Value>) -> Value {
    let mut args = json!({});
    if let Some(bytes) = image_bytes {
        args["imageBytes"] = Value::String(BASE64_STANDARD.encode(bytes));
    }
    if let Some(config) = config {
        args["config"] = config;
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_build_args_with_image_and_config() {
        let args = build_args(Some(b"abc"), Some(json!({ "recognitionLevel": "fast" })));
        assert_eq!(args["imageBytes"], BASE64_STANDARD.encode(b"abc"));
        assert_eq!(args["config"]["recognitionLevel"], "fast");
    }

    #[test]
    fn test_build_args_empty() {
        let args = build_args(None, None);
        assert!(args.get("imageBytes").is_none());
        assert!(args.get("config").is_none());
    }

    #[test]
    fn test_image_file_roundtrip() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"\x89PNG fake").unwrap();

        let bytes = std::fs::read(file.path()).unwrap();
        let args = build_args(Some(&bytes), None);
        let decoded = BASE64_STANDARD
            .decode(args["imageBytes"].as_str().unwrap())
            .unwrap();
        assert_eq!(decoded, bytes);
    }
}
