//! Command implementations for the dotson binary.

use std::fs;

use dotson::{Document, Value, expand_tilde};
use tracing::info;

use crate::cli::{DelArgs, FmtArgs, GetArgs, SetArgs};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

pub fn get(args: GetArgs) -> CommandResult {
    let doc = Document::from_file(&args.file)?;
    let value = doc.get(&args.path)?;
    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", serde_json::to_string(&value)?);
    }
    Ok(())
}

pub fn set(args: SetArgs) -> CommandResult {
    let doc = Document::from_file(&args.file)?;
    let value = parse_value(&args.value, args.strict)?;
    doc.set(&args.path, value)?;
    write_back(&args.file, &doc, &args.indent)?;
    info!(path = %args.path, file = %args.file, "value set");
    Ok(())
}

pub fn del(args: DelArgs) -> CommandResult {
    let doc = Document::from_file(&args.file)?;
    doc.delete(&args.path)?;
    write_back(&args.file, &doc, &args.indent)?;
    info!(path = %args.path, file = %args.file, "value deleted");
    Ok(())
}

pub fn fmt(args: FmtArgs) -> CommandResult {
    let doc = Document::from_file(&args.file)?;
    let mut out = doc.to_vec_pretty(&args.indent)?;
    out.push(b'\n');
    print!("{}", String::from_utf8_lossy(&out));
    Ok(())
}

/// Interpret the value argument: JSON first, bare string as a fallback.
fn parse_value(raw: &str, strict: bool) -> Result<Value, Box<dyn std::error::Error>> {
    match serde_json::from_str(raw) {
        Ok(value) => Ok(value),
        Err(err) if strict => Err(err.into()),
        Err(_) => Ok(Value::String(raw.to_owned())),
    }
}

fn write_back(file: &str, doc: &Document, indent: &str) -> CommandResult {
    let mut out = doc.to_vec_pretty(indent)?;
    out.push(b'\n');
    fs::write(expand_tilde(file), out)?;
    Ok(())
}
