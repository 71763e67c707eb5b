//! Per-country indicator tables (World Bank CSV export)
//!
//! Rows have six comma-separated columns; the country code is column 5 and
//! the value column 6. Missing values are written as `..`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;

const COLUMNS: usize = 6;
const KEY_COLUMN: usize = 4;
const VALUE_COLUMN: usize = 5;
const MISSING: &str = "..";

/// Read an indicator CSV into a `country code -> value` map.
pub fn read_indicator_csv<P: AsRef<Path>>(path: P) -> Result<HashMap<String, f64>> {
    let text = fs::read_to_string(path.as_ref())?;
    let table = parse_indicator_csv(&text);
    debug!("Loaded {} indicator entries from {}", table.len(), path.as_ref().display());
    Ok(table)
}

/// Parse indicator rows, skipping headers, short rows and missing values.
pub fn parse_indicator_csv(text: &str) -> HashMap<String, f64> {
    text.lines()
        .map(|line| line.split(',').map(str::trim).collect::<Vec<_>>())
        .filter(|cols| cols.len() == COLUMNS && cols[VALUE_COLUMN] != MISSING)
        .filter_map(|cols| {
            let value = cols[VALUE_COLUMN].parse::<f64>().ok()?;
            Some((cols[KEY_COLUMN].to_string(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_indicator_rows() {
        let text = "\
Series Name,Series Code,Year,Country Name,Country Code,Value
Life expectancy,SP.DYN.LE00.IN,2012,Chile,CHL,79.6
Life expectancy,SP.DYN.LE00.IN,2012,Somalia,SOM,..
Life expectancy,SP.DYN.LE00.IN,2012,Japan,JPN,83.1
broken,row
";
        let table = parse_indicator_csv(text);
        assert_eq!(table.len(), 2);
        assert_eq!(table["CHL"], 79.6);
        assert_eq!(table["JPN"], 83.1);
        assert!(!table.contains_key("SOM"));
    }
}
