//! Human-readable byte sizes (`500MB`, `1.5 GiB`, `2,048`).
//!
//! Decimal suffixes (`k`, `kb`, `m`, `mb`, ...) are powers of 1000, binary
//! suffixes (`ki`, `kib`, ...) powers of 1024. Units are case-insensitive.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, SourceError};

static SIZE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^([0-9.,]*)(.*)$").unwrap());

const KB: u64 = 1000;
const KIB: u64 = 1024;

fn unit_multiplier(unit: &str) -> Option<u64> {
    let m = match unit {
        "" | "b" => 1,
        "k" | "kb" => KB,
        "m" | "mb" => KB.pow(2),
        "g" | "gb" => KB.pow(3),
        "t" | "tb" => KB.pow(4),
        "p" | "pb" => KB.pow(5),
        "e" | "eb" => KB.pow(6),
        "ki" | "kib" => KIB,
        "mi" | "mib" => KIB.pow(2),
        "gi" | "gib" => KIB.pow(3),
        "ti" | "tib" => KIB.pow(4),
        "pi" | "pib" => KIB.pow(5),
        "ei" | "eib" => KIB.pow(6),
        _ => return None,
    };
    Some(m)
}

fn invalid(input: &str, reason: impl Into<String>) -> SourceError {
    SourceError::InvalidByteSizeFormat {
        input: input.to_string(),
        reason: reason.into(),
    }
}

/// Parse a human-readable size into a byte count.
pub fn parse_bytes(input: &str) -> Result<u64> {
    let caps = SIZE_RE
        .captures(input)
        .ok_or_else(|| invalid(input, "unrecognized size"))?;

    let number: String = caps[1].chars().filter(|&c| c != ',').collect();
    let value: f64 = number
        .parse()
        .map_err(|e: std::num::ParseFloatError| invalid(input, e.to_string()))?;

    let unit = caps[2].trim().to_lowercase();
    let multiplier =
        unit_multiplier(&unit).ok_or_else(|| invalid(input, format!("unhandled size name: {unit}")))?;

    let bytes = value * multiplier as f64;
    if bytes >= u64::MAX as f64 {
        return Err(invalid(input, "too large"));
    }
    Ok(bytes as u64)
}

/// Resolve the configured layer size. Empty means "not configured".
pub fn resolve_max_layer_size(input: &str) -> Result<Option<u64>> {
    if input.is_empty() {
        return Ok(None);
    }
    parse_bytes(input).map(Some)
}
