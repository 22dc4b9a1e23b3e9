//! CSV profile ingestion and result output
//!
//! Input layout: header `distance_km,topography_m,bouguer_mgal`, one row per
//! sample in increasing distance order. Values are converted to SI on load.
//!
//! `bouguer_mgal` is the vertical component along the upward axis, so the
//! mass deficit of a crustal root reads positive. Anomalies signed the other
//! way (downward `g_z`, negative over a root) must be negated before loading,
//! or the recovered root comes out mirrored about the compensation depth.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::constants::{KM_TO_M, MGAL_TO_MS2};
use crate::error::InversionError;
use crate::inversion::InversionResult;
use crate::profile::Profile;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid profile: {0}")]
    Profile(#[from] InversionError),
}

/// One CSV row in survey units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct ProfileRecord {
    distance_km: f64,
    topography_m: f64,
    bouguer_mgal: f64,
}

/// Load a profile CSV from disk
pub fn load_profile(path: impl AsRef<Path>) -> Result<Profile, DataError> {
    let file = std::fs::File::open(path)?;
    read_profile(file)
}

/// Read a profile CSV from any reader
pub fn read_profile<R: io::Read>(reader: R) -> Result<Profile, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut distance_km = Vec::new();
    let mut topography_m = Vec::new();
    let mut bouguer_mgal = Vec::new();

    for record in reader.deserialize::<ProfileRecord>() {
        let record = record?;
        distance_km.push(record.distance_km);
        topography_m.push(record.topography_m);
        bouguer_mgal.push(record.bouguer_mgal);
    }

    Ok(Profile::from_survey_units(&distance_km, &topography_m, &bouguer_mgal)?)
}

/// Write a profile to disk in the ingestion layout
pub fn write_profile_csv(path: impl AsRef<Path>, profile: &Profile) -> Result<(), DataError> {
    let file = std::fs::File::create(path)?;
    write_profile(file, profile)
}

/// Write a profile in the ingestion layout (km, m, mGal)
pub fn write_profile<W: io::Write>(writer: W, profile: &Profile) -> Result<(), DataError> {
    let mut writer = csv::Writer::from_writer(writer);

    let rows = profile
        .distance_m()
        .iter()
        .zip(profile.topography_m())
        .zip(profile.bouguer_ms2());
    for ((&distance, &topography), &bouguer) in rows {
        writer.serialize(ProfileRecord {
            distance_km: distance / KM_TO_M,
            topography_m: topography,
            bouguer_mgal: bouguer / MGAL_TO_MS2,
        })?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the Moho profile to disk
pub fn write_moho_profile(
    path: impl AsRef<Path>,
    distance_m: &[f64],
    result: &InversionResult,
    include_history: bool,
) -> Result<(), DataError> {
    let file = std::fs::File::create(path)?;
    write_moho(file, distance_m, result, include_history)
}

/// Write `distance_km,moho_depth_m`, plus `root_iter_<i>` columns when requested
pub fn write_moho<W: io::Write>(
    writer: W,
    distance_m: &[f64],
    result: &InversionResult,
    include_history: bool,
) -> Result<(), DataError> {
    if distance_m.len() != result.moho_depth_m.len() {
        return Err(InversionError::ColumnLengthMismatch {
            column: "moho_depth_m",
            expected: distance_m.len(),
            found: result.moho_depth_m.len(),
        }
        .into());
    }

    let mut writer = csv::Writer::from_writer(writer);
    let snapshots: &[Vec<f64>] = if include_history {
        result.history.roots()
    } else {
        &[]
    };

    let mut header = vec!["distance_km".to_string(), "moho_depth_m".to_string()];
    header.extend((0..snapshots.len()).map(|i| format!("root_iter_{i}")));
    writer.write_record(&header)?;

    for (j, (&distance, &depth)) in distance_m.iter().zip(&result.moho_depth_m).enumerate() {
        let mut row = vec![(distance / KM_TO_M).to_string(), depth.to_string()];
        row.extend(snapshots.iter().map(|root| root[j].to_string()));
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PhysicalConstants;
    use crate::data::synthetic::{generate, SyntheticSpec};
    use crate::gravity::PrismGravity;
    use crate::inversion::IterationHistory;

    const SAMPLE: &str = "distance_km,topography_m,bouguer_mgal\n\
                          0,0,-10.5\n\
                          1, 150.0 ,-20\n\
                          2,300,-30\n";

    #[test]
    fn test_read_profile_converts_units() {
        let profile = read_profile(SAMPLE.as_bytes()).unwrap();

        assert_eq!(profile.len(), 3);
        assert_eq!(profile.distance_m(), &[0.0, 1000.0, 2000.0]);
        assert_eq!(profile.topography_m(), &[0.0, 150.0, 300.0]);
        assert!((profile.bouguer_ms2()[0] + 10.5e-5).abs() < 1e-15);
    }

    #[test]
    fn test_read_rejects_irregular_grid() {
        let text = "distance_km,topography_m,bouguer_mgal\n0,0,0\n1,0,0\n3,0,0\n";
        let err = read_profile(text.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Profile(InversionError::NonUniformSpacing { .. })));
    }

    #[test]
    fn test_read_rejects_missing_column() {
        let text = "distance_km,topography_m\n0,0\n1,0\n";
        let err = read_profile(text.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Csv(_)));
    }

    #[test]
    fn test_profile_write_read() {
        let profile = read_profile(SAMPLE.as_bytes()).unwrap();
        let mut buffer = Vec::new();
        write_profile(&mut buffer, &profile).unwrap();

        let restored = read_profile(buffer.as_slice()).unwrap();
        assert_eq!(restored.distance_m(), profile.distance_m());
        for (a, b) in restored.bouguer_ms2().iter().zip(profile.bouguer_ms2()) {
            assert!((a - b).abs() < 1e-15);
        }
    }

    #[test]
    fn test_root_anomaly_is_positive_through_csv() {
        let spec = SyntheticSpec {
            num_points: 101,
            dx_m: 5000.0,
            ..SyntheticSpec::default()
        };
        let synthetic =
            generate(&spec, &PrismGravity::default(), &PhysicalConstants::default()).unwrap();

        let mut buffer = Vec::new();
        write_profile(&mut buffer, &synthetic.profile).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        // Row for 250 km sits over the centre of the root
        let centre: Vec<f64> = text
            .lines()
            .nth(51)
            .unwrap()
            .split(',')
            .map(|v| v.parse().unwrap())
            .collect();
        assert_eq!(centre[0], 250.0);
        assert!(centre[2] > 0.0);

        let restored = read_profile(text.as_bytes()).unwrap();
        assert!(restored.bouguer_ms2()[50] > 0.0);
        assert!(restored.bouguer_ms2()[50] > restored.bouguer_ms2()[0]);
    }

    #[test]
    fn test_write_moho_with_history() {
        let mut history = IterationHistory::default();
        history.push_root(vec![10.0, 20.0]);
        history.push_root(vec![11.0, 21.0]);
        let result = InversionResult {
            moho_depth_m: vec![30_011.0, 30_021.0],
            history,
            compensation_depth_m: 30_000.0,
        };

        let mut buffer = Vec::new();
        write_moho(&mut buffer, &[0.0, 1000.0], &result, true).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "distance_km,moho_depth_m,root_iter_0,root_iter_1");
        assert_eq!(lines[1], "0,30011,10,11");
        assert_eq!(lines[2], "1,30021,20,21");
    }

    #[test]
    fn test_write_moho_length_check() {
        let result = InversionResult {
            moho_depth_m: vec![30_000.0],
            history: IterationHistory::default(),
            compensation_depth_m: 30_000.0,
        };
        let err = write_moho(Vec::new(), &[0.0, 1000.0], &result, false).unwrap_err();
        assert!(matches!(err, DataError::Profile(_)));
    }
}
