use serde::Deserialize;
use std::collections::HashMap;
use crate::error::{Result, SubwayError};
use crate::models::{LineId, StationId};
use crate::network::{LineRequest, SectionRequest, SubwayNetwork};

/// Header every section table must start with
pub const EXPECTED_HEADERS: [&str; 6] = ["line", "color", "up_station", "down_station", "distance", "duration"];

/// One row of a section table
#[derive(Debug, Clone, Deserialize)]
struct SectionRow {
    line: String,
    #[serde(default)]
    color: String,
    up_station: String,
    down_station: String,
    distance: u64,
    #[serde(default)]
    duration: Option<u64>,
}

/// What an import added to the network
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub stations_created: usize,
    pub lines_created: usize,
    pub sections_registered: usize,
}

/// Build a fresh network from a section table
///
/// # Errors
/// Returns `SubwayError::Import` naming the first row that could not be applied
pub fn import_network(content: &str) -> Result<SubwayNetwork> {
    let network = SubwayNetwork::new();
    import_into(&network, content)?;
    Ok(network)
}

/// Apply a section table to an existing network.
///
/// Stations are matched by name and created on first sight. The first row of
/// an unknown line creates it; every later row goes through the normal section
/// registration rules, so rows must be ordered such that each one connects to
/// its line. Rows applied before a failing row are kept; stations created for
/// the failing row itself are removed again.
///
/// # Errors
/// Returns `SubwayError::Import` naming the first row that could not be applied
pub fn import_into(network: &SubwayNetwork, content: &str) -> Result<ImportSummary> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()
        .map_err(|e| SubwayError::import(format!("failed to read header: {e}")))?;
    if headers.len() != EXPECTED_HEADERS.len()
        || !headers.iter().zip(EXPECTED_HEADERS).all(|(found, expected)| found.eq_ignore_ascii_case(expected))
    {
        return Err(SubwayError::import(format!(
            "expected header {}, found {}",
            EXPECTED_HEADERS.join(","),
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let mut summary = ImportSummary::default();
    let mut line_ids: HashMap<String, LineId> = network
        .lines()
        .into_iter()
        .map(|line| (line.name, line.id))
        .collect();

    for (index, record) in reader.deserialize::<SectionRow>().enumerate() {
        // Header is row 1
        let row_number = index + 2;
        let row = record.map_err(|e| SubwayError::import(format!("row {row_number}: {e}")))?;

        apply_row(network, &row, &mut line_ids, &mut summary)
            .map_err(|e| SubwayError::import(format!("row {row_number}: {e}")))?;
    }

    log::info!(
        "Imported {} sections: {} new stations, {} new lines",
        summary.sections_registered, summary.stations_created, summary.lines_created
    );
    Ok(summary)
}

fn apply_row(
    network: &SubwayNetwork,
    row: &SectionRow,
    line_ids: &mut HashMap<String, LineId>,
    summary: &mut ImportSummary,
) -> Result<()> {
    let mut created = Vec::new();
    let outcome = station_by_name(network, &row.up_station, &mut created)
        .and_then(|up| station_by_name(network, &row.down_station, &mut created).map(|down| (up, down)))
        .and_then(|(up, down)| add_section(network, row, up, down, line_ids));

    match outcome {
        Ok(created_line) => {
            summary.stations_created += created.len();
            summary.lines_created += usize::from(created_line);
            summary.sections_registered += 1;
            Ok(())
        }
        Err(e) => {
            // Stations named only by the rejected row would be orphans
            for id in created {
                if let Err(cleanup) = network.delete_station(id) {
                    log::debug!("Kept station {id} after rejected row: {cleanup}");
                }
            }
            Err(e)
        }
    }
}

/// Returns whether the row created its line
fn add_section(
    network: &SubwayNetwork,
    row: &SectionRow,
    up_station_id: StationId,
    down_station_id: StationId,
    line_ids: &mut HashMap<String, LineId>,
) -> Result<bool> {
    let duration = row.duration.unwrap_or(0);

    if let Some(&line_id) = line_ids.get(&row.line) {
        network.register_section(line_id, SectionRequest {
            up_station_id,
            down_station_id,
            distance: row.distance,
            duration,
        })?;
        return Ok(false);
    }

    let line = network.create_line(LineRequest {
        name: row.line.clone(),
        color: row.color.clone(),
        up_station_id,
        down_station_id,
        distance: row.distance,
        duration,
    })?;
    line_ids.insert(row.line.clone(), line.id);
    Ok(true)
}

fn station_by_name(network: &SubwayNetwork, name: &str, created: &mut Vec<StationId>) -> Result<StationId> {
    if let Some(station) = network.find_station_by_name(name) {
        return Ok(station.id);
    }

    let station = network.create_station(name)?;
    created.push(station.id);
    Ok(station.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathFindType;

    const SAMPLE: &str = "\
line,color,up_station,down_station,distance,duration
Line 2,green,Gangnam,Yangjae,100,5
Line 2,,Yangjae,Jamsil,200,5
Line 3,orange,Gangnam,Sinsa,150,10
Line 3,orange,Sinsa,Jamsil,100,
";

    fn names(network: &SubwayNetwork, line: &str) -> Vec<String> {
        let line = network.lines().into_iter().find(|l| l.name == line).expect("line imported");
        line.stations.into_iter().map(|s| s.name).collect()
    }

    #[test]
    fn test_import_sample_network() {
        let network = SubwayNetwork::new();
        let summary = import_into(&network, SAMPLE).expect("sample imports");

        assert_eq!(summary, ImportSummary { stations_created: 4, lines_created: 2, sections_registered: 4 });
        assert_eq!(names(&network, "Line 2"), vec!["Gangnam", "Yangjae", "Jamsil"]);
        assert_eq!(names(&network, "Line 3"), vec!["Gangnam", "Sinsa", "Jamsil"]);
    }

    #[test]
    fn test_imported_network_answers_path_queries() {
        let network = import_network(SAMPLE).expect("sample imports");
        let gangnam = network.find_station_by_name("Gangnam").expect("station").id;
        let jamsil = network.find_station_by_name("Jamsil").expect("station").id;

        let path = network
            .find_shortest_path(gangnam, jamsil, PathFindType::Distance)
            .expect("path exists");
        assert_eq!(path.distance, 250);
        // Missing duration counts as zero
        assert_eq!(path.duration, 10);
    }

    #[test]
    fn test_import_splits_sections() {
        let content = "\
line,color,up_station,down_station,distance,duration
Line 2,green,Gangnam,Yangjae,100,
Line 2,green,Gangnam,Sinsa,50,
";
        let network = import_network(content).expect("imports");
        assert_eq!(names(&network, "Line 2"), vec!["Gangnam", "Sinsa", "Yangjae"]);
    }

    #[test]
    fn test_import_reports_failing_row() {
        let content = "\
line,color,up_station,down_station,distance,duration
Line 2,green,Gangnam,Yangjae,100,5
Line 2,green,Sinsa,Jamsil,100,5
";
        let err = import_network(content).expect_err("disconnected row");
        match err {
            SubwayError::Import(message) => assert!(message.starts_with("row 3:"), "{message}"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_rejected_row_leaves_no_new_stations() {
        let network = import_network(SAMPLE).expect("sample imports");
        let content = "\
line,color,up_station,down_station,distance,duration
Line 2,green,Sinsa,Seongsu,100,5
Line 4,,Dongdaemun,Hyehwa,100,5
";
        let err = import_into(&network, content).expect_err("row 2 does not connect");
        assert!(matches!(err, SubwayError::Import(ref message) if message.starts_with("row 2:")), "{err:?}");

        assert_eq!(network.stations().len(), 4);
        assert!(network.find_station_by_name("Sinsa").is_some());
        assert!(network.find_station_by_name("Seongsu").is_none());
    }

    #[test]
    fn test_first_row_of_line_needs_color() {
        let content = "\
line,color,up_station,down_station,distance,duration
Line 2,,Gangnam,Yangjae,100,5
";
        let network = SubwayNetwork::new();
        let err = import_into(&network, content).expect_err("blank color");
        assert!(matches!(err, SubwayError::Import(_)));
        assert!(network.stations().is_empty());
    }

    #[test]
    fn test_import_rejects_bad_distance() {
        let content = "\
line,color,up_station,down_station,distance,duration
Line 2,green,Gangnam,Yangjae,far,5
";
        assert!(matches!(import_network(content), Err(SubwayError::Import(_))));
    }

    #[test]
    fn test_import_rejects_wrong_header() {
        let content = "name,from,to\nLine 2,Gangnam,Yangjae\n";
        assert!(matches!(import_network(content), Err(SubwayError::Import(_))));
    }

    #[test]
    fn test_import_bundled_network() {
        let network = import_network(include_str!("../../test-data/network.csv")).expect("bundled data imports");

        assert_eq!(network.stations().len(), 17);
        assert_eq!(network.lines().len(), 5);
        assert_eq!(
            names(&network, "Line 2"),
            vec!["Gyodae", "Gangnam", "Yeoksam", "Seolleung", "Samseong", "Jamsil", "Sports Complex"]
        );
        assert_eq!(names(&network, "Sinbundang"), vec!["Sinsa", "Nonhyeon", "Gangnam", "Yangjae"]);

        let gyodae = network.find_station_by_name("Gyodae").expect("station").id;
        let stadium = network.find_station_by_name("Sports Complex").expect("station").id;
        let path = network
            .find_shortest_path(gyodae, stadium, PathFindType::Distance)
            .expect("path exists");
        let route: Vec<&str> = path.stations.iter().map(|s| s.name.as_str()).collect();

        // Transfers at Seolleung rather than staying on Line 2
        assert_eq!(
            route,
            vec![
                "Gyodae",
                "Gangnam",
                "Yeoksam",
                "Seolleung",
                "Seonjeongneung",
                "Samseong Jungang",
                "Bongeunsa",
                "Sports Complex"
            ]
        );
        assert_eq!(path.distance, 69);
        assert_eq!(path.duration, 12);
    }

    #[test]
    fn test_import_extends_existing_line() {
        let network = import_network(SAMPLE).expect("sample imports");
        let more = "\
line,color,up_station,down_station,distance,duration
Line 2,green,Jamsil,Seongsu,80,4
";
        let summary = import_into(&network, more).expect("extends line 2");

        assert_eq!(summary, ImportSummary { stations_created: 1, lines_created: 0, sections_registered: 1 });
        assert_eq!(names(&network, "Line 2"), vec!["Gangnam", "Yangjae", "Jamsil", "Seongsu"]);
    }
}
