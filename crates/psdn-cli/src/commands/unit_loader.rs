use std::fs;
use std::io::{self, Read};
use std::path::Path;

use psdn_core::ParserUnit;
use serde_json::Value;

use super::error::CliError;

/// Load parser units from a file, or stdin when `path` is `-`.
///
/// The document is either one unit object or an array of units.
pub fn load_units(path: &Path) -> Result<Vec<ParserUnit>, CliError> {
    let (text, origin) = if path.as_os_str() == "-" {
        (read_stdin()?, "<stdin>".to_string())
    } else {
        (read_file(path)?, path.display().to_string())
    };
    parse_units(&text, &origin)
}

pub fn parse_units(text: &str, origin: &str) -> Result<Vec<ParserUnit>, CliError> {
    let json_err = |source: serde_json::Error| CliError::Json {
        path: origin.to_string(),
        source,
    };

    let value: Value = serde_json::from_str(text).map_err(json_err)?;
    let units = if value.is_array() {
        serde_json::from_value::<Vec<ParserUnit>>(value).map_err(json_err)?
    } else {
        vec![serde_json::from_value::<ParserUnit>(value).map_err(json_err)?]
    };

    if units.is_empty() {
        return Err(CliError::NoUnits(origin.to_string()));
    }
    Ok(units)
}

/// Parser source for diagnostic snippets.
pub struct SourceText {
    pub path: String,
    pub text: String,
}

pub fn load_source(path: Option<&Path>) -> Result<Option<SourceText>, CliError> {
    let Some(path) = path else {
        return Ok(None);
    };
    Ok(Some(SourceText {
        path: path.display().to_string(),
        text: read_file(path)?,
    }))
}

fn read_stdin() -> Result<String, CliError> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(CliError::Stdin)?;
    Ok(buf)
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })
}
