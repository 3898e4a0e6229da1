use anyhow::Result;
use serde_json::Value;

use sensordash_core::analyze_sheet;
use sensordash_core::export::{flagged_rows_csv, TEMPERATURE_EXPORT_STEM, VIBRATION_EXPORT_STEM};
use sensordash_parser::Sheet;

const EXPORT: &str = "\
Condition Monitoring Export,,,,,,
Site,North Hall,,,,,
Period,2024-04-01,2024-04-30,,,,
Generated,2024-05-02 09:14:00,,,,,
X1,X4,X8,X9,X10,X26,X27
,,,,,,
1,Main drive bearing,07KD,5.2,4.0,2024-04-01 06:00:00,36.5
2,Main drive bearing,07KD,3.1,4.0,2024-04-01 12:00:00,45.0
3,Main drive bearing,07KD,4.8,4.0,N/A,55.2
4,Gearbox output,12BF,2.4,6.5,2024-04-01 06:00:00,39.9
5,Gearbox output,12BF,fault,6.5,2024-04-01 12:00:00,50.0
6,Spare channel,17ND,9.9,1.0,2024-04-01 06:00:00,61.0
7,Fan housing,03XC,,2.0,2024-04-01 06:00:00,
8,Fan housing,03XC,1.5,2.0,2024-04-02 08:30:00,22.4
";

#[test]
fn analyzes_a_full_export() -> Result<()> {
    let sheet = Sheet::from_csv(EXPORT)?;
    let analysis = analyze_sheet(&sheet)?;

    assert_eq!(analysis.readings.height(), 8);
    assert_eq!(analysis.summary.vibration_warnings, 3);
    assert_eq!(analysis.summary.temperature_warnings, 4);
    assert_eq!(analysis.vibration_flags.height(), 3);
    assert_eq!(analysis.temperature_flags.height(), 4);

    // The placeholder id is flagged and counted but never plotted.
    let flagged_ids = analysis.vibration_flags.column("sensor_id")?.str()?;
    assert_eq!(flagged_ids.get(2), Some("17ND"));
    assert!(analysis
        .vibration_trends
        .iter()
        .all(|trend| trend.sensor_id != "17ND"));

    let trend_ids: Vec<&str> = analysis
        .vibration_trends
        .iter()
        .map(|trend| trend.sensor_id.as_str())
        .collect();
    assert_eq!(trend_ids, ["07KD", "12BF", "03XC"]);

    // The "N/A" timestamp row warns but cannot plot.
    assert_eq!(analysis.vibration_trends[0].readings.len(), 2);
    assert_eq!(analysis.vibration_trends[1].readings.len(), 1);
    assert_eq!(analysis.vibration_trends[2].readings.len(), 1);

    // The 55.2 reading has no timestamp, so the hottest surviving reading of
    // the first group is 45.0 and the band ceiling follows it.
    let first = &analysis.temperature_trends[0];
    assert_eq!(first.sensor_id, "07KD");
    assert_eq!(first.readings.len(), 2);
    assert_eq!(first.bands.ceiling, 45.0 + 5.0);

    Ok(())
}

#[test]
fn analysis_is_deterministic() -> Result<()> {
    let sheet = Sheet::from_csv(EXPORT)?;
    let first = analyze_sheet(&sheet)?;
    let second = analyze_sheet(&sheet)?;

    assert!(first.readings.equals_missing(&second.readings));
    assert!(first
        .vibration_flags
        .equals_missing(&second.vibration_flags));
    assert_eq!(first.summary, second.summary);
    assert_eq!(first.vibration_trends, second.vibration_trends);
    assert_eq!(first.temperature_trends, second.temperature_trends);

    let first_bytes = flagged_rows_csv(&first.vibration_flags)?;
    let second_bytes = flagged_rows_csv(&second.vibration_flags)?;
    assert_eq!(first_bytes, second_bytes);

    Ok(())
}

#[test]
fn flagged_rows_export_with_derived_columns() -> Result<()> {
    let sheet = Sheet::from_csv(EXPORT)?;
    let analysis = analyze_sheet(&sheet)?;

    let bytes = flagged_rows_csv(&analysis.vibration_flags)?.expect("export should be offered");
    let text = String::from_utf8(bytes)?;
    let mut lines = text.lines();

    let header = lines.next().expect("export missing header row");
    assert!(header.contains("sensor_id"));
    assert!(header.contains("sensor_label"));
    assert!(header.contains("vibration_warning"));
    assert!(header.contains("temperature_status"));

    assert_eq!(lines.count(), analysis.vibration_flags.height());

    assert_eq!(VIBRATION_EXPORT_STEM, "vibration_warnings");
    assert_eq!(TEMPERATURE_EXPORT_STEM, "temperature_warnings");

    Ok(())
}

#[test]
fn empty_flag_set_offers_no_export() -> Result<()> {
    // All readings are calm; both filtered sets are empty.
    let calm = "\
,,,,,,
,,,,,,
,,,,,,
,,,,,,
X4,X8,X9,X10,X26,X27
,,,,,,
Main drive bearing,07KD,1.0,4.0,2024-04-01 06:00:00,20.0
";
    let sheet = Sheet::from_csv(calm)?;
    let analysis = analyze_sheet(&sheet)?;

    assert_eq!(analysis.summary.vibration_warnings, 0);
    assert_eq!(analysis.summary.temperature_warnings, 0);
    assert_eq!(flagged_rows_csv(&analysis.vibration_flags)?, None);
    assert_eq!(flagged_rows_csv(&analysis.temperature_flags)?, None);

    Ok(())
}

#[test]
fn trend_series_serialize_for_the_view_layer() -> Result<()> {
    let sheet = Sheet::from_csv(EXPORT)?;
    let analysis = analyze_sheet(&sheet)?;

    let summary = serde_json::to_value(analysis.summary)?;
    assert_eq!(summary["vibration_warnings"], Value::from(3));
    assert_eq!(summary["temperature_warnings"], Value::from(4));

    let trend = serde_json::to_value(&analysis.vibration_trends[0])?;
    assert_eq!(trend["sensor_id"], Value::from("07KD"));
    assert_eq!(trend["label"], Value::from("07KD - Main drive bearing"));
    assert_eq!(trend["unit"], Value::from("mm/s"));
    assert_eq!(trend["readings"][0]["value"], Value::from(5.2));
    assert!(trend["readings"][0]["timestamp"].is_string());
    assert_eq!(
        trend["thresholds"].as_array().map(Vec::len),
        trend["readings"].as_array().map(Vec::len)
    );

    let trend = serde_json::to_value(&analysis.temperature_trends[1])?;
    assert_eq!(trend["unit"], Value::from("°C"));
    assert_eq!(trend["bands"]["caution_floor"], Value::from(40.0));
    assert_eq!(trend["bands"]["critical_floor"], Value::from(50.0));

    Ok(())
}
