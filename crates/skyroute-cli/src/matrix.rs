//! Headered travel-time matrix parser.
//!
//! Column headers name the cities, each row starts with the origin city, and
//! integer cells are travel minutes. Non-numeric cells mean "no edge". The
//! same matrix doubles as the travel-duration table the advisor uses to
//! estimate arrival times.

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use skyroute_core::{Graph, MatrixEntry, RouteError, TravelDurations};

/// Parsed travel-time matrix: the city list plus every numeric cell.
#[derive(Debug, Clone)]
pub struct FlightMatrix {
    pub cities: Vec<String>,
    pub entries: Vec<MatrixEntry>,
}

impl FlightMatrix {
    /// Build the routing graph from the parsed cells.
    pub fn to_graph(&self) -> Result<Graph, RouteError> {
        Graph::build(&self.cities, &self.entries)
    }
}

/// Parse a headered CSV matrix.
///
/// Cells are applied in row-major order, so when both `(A,B)` and `(B,A)`
/// carry different values the later row wins.
pub fn parse_matrix(input: &str) -> Result<FlightMatrix> {
    let mut lines = input.lines().filter(|line| !line.trim().is_empty());
    let header = lines.next().context("matrix file is empty")?;

    let mut columns = header.split(',').map(str::trim);
    columns.next(); // corner cell above the origin column
    let cities: Vec<String> = columns.map(String::from).collect();
    if cities.is_empty() {
        bail!("matrix header names no cities");
    }

    let mut entries = Vec::new();
    for line in lines {
        let mut cells = line.split(',').map(str::trim);
        let origin = cells.next().context("row is missing its origin city")?;
        if !cities.iter().any(|city| city == origin) {
            bail!("row city '{origin}' does not appear in the header");
        }
        for (i, cell) in cells.enumerate() {
            let Some(destination) = cities.get(i) else {
                bail!("row for '{origin}' has more cells than header columns");
            };
            // Non-numeric cells (dashes, blanks) mean no direct flight.
            if let Ok(minutes) = cell.parse::<u32>() {
                entries.push(MatrixEntry {
                    origin: origin.to_string(),
                    destination: destination.clone(),
                    minutes,
                });
            }
        }
    }

    Ok(FlightMatrix { cities, entries })
}

/// Load and parse a matrix file.
pub fn load_matrix(path: &Path) -> Result<FlightMatrix> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading matrix file {}", path.display()))?;
    parse_matrix(&text)
}

/// Minutes lookup backed by the parsed matrix.
#[derive(Debug, Clone)]
pub struct DurationTable {
    minutes: HashMap<String, HashMap<String, u32>>,
}

impl From<&FlightMatrix> for DurationTable {
    fn from(matrix: &FlightMatrix) -> Self {
        let mut minutes: HashMap<String, HashMap<String, u32>> = HashMap::new();
        for entry in &matrix.entries {
            minutes
                .entry(entry.origin.clone())
                .or_default()
                .insert(entry.destination.clone(), entry.minutes);
        }
        Self { minutes }
    }
}

impl TravelDurations for DurationTable {
    fn minutes(&self, origin: &str, destination: &str) -> Option<u32> {
        self.minutes.get(origin)?.get(destination).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATRIX: &str = "\
City,Kanpur,Indore,Bhopal
Kanpur,0,45,-
Indore,45,0,30
Bhopal,-,30,0
";

    #[test]
    fn parses_header_and_numeric_cells() {
        let matrix = parse_matrix(MATRIX).unwrap();

        assert_eq!(matrix.cities, vec!["Kanpur", "Indore", "Bhopal"]);
        // Diagonal zeros parse as entries but are dropped at graph build.
        let graph = matrix.to_graph().unwrap();
        assert_eq!(graph.edge_minutes("Kanpur", "Indore"), Some(45));
        assert_eq!(graph.edge_minutes("Indore", "Bhopal"), Some(30));
        // Dash cells mean no direct flight.
        assert_eq!(graph.edge_minutes("Kanpur", "Bhopal"), None);
    }

    #[test]
    fn duration_table_serves_the_advisor_lookup() {
        let matrix = parse_matrix(MATRIX).unwrap();
        let table = DurationTable::from(&matrix);

        assert_eq!(table.minutes("Kanpur", "Indore"), Some(45));
        assert_eq!(table.minutes("Kanpur", "Bhopal"), None);
        assert_eq!(table.minutes("Nowhere", "Indore"), None);
    }

    #[test]
    fn rejects_row_city_missing_from_header() {
        let input = "City,A,B\nA,0,5\nC,5,0\n";
        let err = parse_matrix(input).unwrap_err();
        assert!(err.to_string().contains("'C'"));
    }

    #[test]
    fn rejects_empty_input_and_oversized_rows() {
        assert!(parse_matrix("").is_err());
        assert!(parse_matrix("City,A,B\nA,0,5,9\n").is_err());
    }

    #[test]
    fn asymmetric_cells_resolve_to_the_later_row() {
        let input = "City,A,B\nA,0,10\nB,25,0\n";
        let graph = parse_matrix(input).unwrap().to_graph().unwrap();
        assert_eq!(graph.edge_minutes("A", "B"), Some(25));
    }
}
