//! Decoding of InfluxDB annotated-CSV query results into samples.

use chrono::{DateTime, Utc};
use hub_core::{HubError, RawReading, Result, Sample};

/// Column positions resolved from the CSV header.
struct Columns {
    time: usize,
    temperature: Option<usize>,
    humidity: Option<usize>,
    light_status: Option<usize>,
    light_value: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let time = find("_time")
            .ok_or_else(|| HubError::History("response has no _time column".to_string()))?;
        Ok(Self {
            time,
            temperature: find("temperature"),
            humidity: find("humidity"),
            light_status: find("light_status"),
            light_value: find("light_value"),
        })
    }
}

/// Parse an annotated-CSV query response into samples, preserving row order
/// (the query sorts newest-first; the loader reverses into chronological
/// order).  Any malformed row fails the whole parse — bootstrap is
/// all-or-nothing.
pub fn parse_history_csv(body: &str) -> Result<Vec<Sample>> {
    let mut reader = csv::ReaderBuilder::new()
        .comment(Some(b'#')) // skip #group / #datatype / #default annotations
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| HubError::History(format!("bad CSV header: {e}")))?
        .clone();
    let columns = Columns::resolve(&headers)?;

    let mut samples = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| HubError::History(format!("bad CSV row: {e}")))?;
        if record.iter().all(str::is_empty) {
            continue; // table separator line
        }
        samples.push(parse_row(&record, &columns)?);
    }
    Ok(samples)
}

fn parse_row(record: &csv::StringRecord, columns: &Columns) -> Result<Sample> {
    let time_raw = record
        .get(columns.time)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| HubError::History("row is missing _time".to_string()))?;
    let captured_at: DateTime<Utc> = DateTime::parse_from_rfc3339(time_raw)
        .map_err(|e| HubError::History(format!("bad _time '{time_raw}': {e}")))?
        .with_timezone(&Utc);

    let number = |col: Option<usize>| {
        col.and_then(|i| record.get(i))
            .filter(|v| !v.is_empty())
            .and_then(|v| v.parse::<f64>().ok())
    };
    let string = |col: Option<usize>| {
        col.and_then(|i| record.get(i))
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    // Same normalization rules as the live path, with the stored time as
    // the capture time.
    let raw = RawReading {
        temperature: number(columns.temperature),
        humidity: number(columns.humidity),
        light_status: string(columns.light_status),
        light_value: number(columns.light_value),
        timestamp: None,
    };
    Ok(raw.normalize(captured_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub_core::LightStatus;

    const FIXTURE: &str = "\
#group,false,false,true,true,true,true,true\n\
#datatype,string,long,dateTime:RFC3339,double,double,string,double\n\
#default,_result,,,,,,\n\
,result,table,_time,temperature,humidity,light_status,light_value\n\
,,0,2026-08-29T10:02:00Z,21.8,47.1,bright,1\n\
,,0,2026-08-29T10:01:00Z,21.6,47.5,,0\n\
,,0,2026-08-29T10:00:00Z,,,dark,0\n";

    #[test]
    fn parses_rows_in_file_order() {
        let samples = parse_history_csv(FIXTURE).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].temperature, Some(21.8));
        assert_eq!(samples[0].light, LightStatus::Bright);
        assert_eq!(samples[2].captured_at.to_rfc3339(), "2026-08-29T10:00:00+00:00");
    }

    #[test]
    fn derives_light_status_when_column_empty() {
        let samples = parse_history_csv(FIXTURE).unwrap();
        assert_eq!(samples[1].light, LightStatus::Dark); // light_value 0
    }

    #[test]
    fn metric_less_row_is_a_valid_light_only_sample() {
        let samples = parse_history_csv(FIXTURE).unwrap();
        assert!(samples[2].is_light_only());
        assert_eq!(samples[2].light, LightStatus::Dark);
    }

    #[test]
    fn missing_time_column_is_an_error() {
        let body = ",result,table,temperature\n,,0,21.0\n";
        assert!(parse_history_csv(body).is_err());
    }

    #[test]
    fn bad_timestamp_is_an_error() {
        let body = ",result,table,_time,temperature\n,,0,around-noon,21.0\n";
        assert!(parse_history_csv(body).is_err());
    }

    #[test]
    fn empty_result_set_is_fine() {
        let body = ",result,table,_time,temperature,humidity,light_status,light_value\n";
        assert_eq!(parse_history_csv(body).unwrap().len(), 0);
    }
}
