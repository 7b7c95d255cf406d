// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() -> Result<(), String> {
    let mut out: Option<PathBuf> = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--out" {
            out = Some(
                args.next()
                    .map(PathBuf::from)
                    .ok_or_else(|| "missing value for --out <path>".to_string())?,
            );
        }
    }

    let spec = spy_agency_api::openapi_v1_spec();
    let mut text = serde_json::to_string_pretty(&spec).map_err(|e| e.to_string())?;
    text.push('\n');
    let Some(out) = out else {
        print!("{text}");
        return Ok(());
    };
    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    fs::write(&out, text).map_err(|e| e.to_string())?;
    eprintln!("wrote OpenAPI spec: {}", out.display());
    Ok(())
}
