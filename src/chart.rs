use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One timed note entry from the chart, immutable after load.
///
/// `beat_time` is a chart-relative beat offset. `lane` and `layer` pick the
/// spawn column/row, `cut_direction` the approach angle. `note_type` is
/// carried through from the chart but not consumed by the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NoteEvent {
    pub beat_time: f32,
    pub lane: i32,
    pub layer: i32,
    pub note_type: i32,
    pub cut_direction: i32,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChartError {
    /// A recognized field carried a non-numeric value. Fatal to the whole
    /// load; the caller must not start playback with a half-parsed chart.
    #[error("malformed chart: record {record}, field {field}: {value:?} is not a number")]
    MalformedChart {
        record: usize,
        field: &'static str,
        value: String,
    },
}

/// The parsed note timeline for one song. Events stay in input order and are
/// never mutated after load; playback walks them with a forward-only cursor.
#[derive(Debug, Clone, Default)]
pub struct Chart {
    events: Vec<NoteEvent>,
}

impl Chart {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&NoteEvent> {
        self.events.get(index)
    }

    pub fn events(&self) -> &[NoteEvent] {
        &self.events
    }
}

/// Recognized field keys, matched by substring containment.
///
/// This is intentional fixed-vocabulary design, not a general KV parser: none
/// of these keys is a substring of another, so containment is unambiguous for
/// the chart format while shrugging off decoration like leading underscores
/// or quoting left over from the source blob.
const FIELD_TIME: &str = "_time";
const FIELD_LANE: &str = "_lineIndex";
const FIELD_LAYER: &str = "_lineLayer";
const FIELD_TYPE: &str = "_type";
const FIELD_CUT: &str = "_cutDirection";

/// Parses a serialized note chart into an ordered [`Chart`].
///
/// Records are `key:value` fields separated by `,`, records separated by the
/// literal `},{` boundary, with the leading and trailing braces stripped.
/// Whitespace and quote characters anywhere in the blob are incidental and
/// removed before splitting. Unknown keys are ignored and missing keys
/// default to zero; a non-numeric value for a known key fails the load.
pub fn parse_chart(raw: &str) -> Result<Chart, ChartError> {
    info!("parsing song data...");

    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '"' | '\n' | '\r' | '\t'))
        .collect();

    if cleaned.is_empty() {
        return Ok(Chart::default());
    }

    let cleaned = cleaned
        .trim_start_matches('{')
        .trim_end_matches('}');

    let mut events = Vec::new();
    for (record, note) in cleaned.split("},{").enumerate() {
        let mut event = NoteEvent::default();

        for field in note.split(',') {
            let Some((key, value)) = field.split_once(':') else {
                continue;
            };

            if key.contains(FIELD_TIME) {
                event.beat_time = parse_field(record, FIELD_TIME, value)?;
            } else if key.contains(FIELD_LANE) {
                event.lane = parse_field(record, FIELD_LANE, value)?;
            } else if key.contains(FIELD_LAYER) {
                event.layer = parse_field(record, FIELD_LAYER, value)?;
            } else if key.contains(FIELD_CUT) {
                event.cut_direction = parse_field(record, FIELD_CUT, value)?;
            } else if key.contains(FIELD_TYPE) {
                event.note_type = parse_field(record, FIELD_TYPE, value)?;
            }
        }

        events.push(event);
    }

    info!("parse completed: {} notes", events.len());
    Ok(Chart { events })
}

fn parse_field<T: std::str::FromStr>(
    record: usize,
    field: &'static str,
    value: &str,
) -> Result<T, ChartError> {
    value.parse::<T>().map_err(|_| ChartError::MalformedChart {
        record,
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"_time": 0, "_lineIndex": 1, "_lineLayer": 0, "_type": 0, "_cutDirection": 1},
        {"_time": 2.5, "_lineIndex": 3, "_lineLayer": 2, "_type": 1, "_cutDirection": 7}"#;

    #[test]
    fn parses_records_in_input_order_with_exact_values() {
        let chart = parse_chart(SAMPLE).expect("well-formed chart");
        assert_eq!(chart.len(), 2);
        assert_eq!(
            *chart.get(0).unwrap(),
            NoteEvent { beat_time: 0.0, lane: 1, layer: 0, note_type: 0, cut_direction: 1 }
        );
        assert_eq!(
            *chart.get(1).unwrap(),
            NoteEvent { beat_time: 2.5, lane: 3, layer: 2, note_type: 1, cut_direction: 7 }
        );
    }

    #[test]
    fn stripping_is_idempotent() {
        let chart_a = parse_chart(SAMPLE).unwrap();
        let pre_stripped: String = SAMPLE
            .chars()
            .filter(|c| !matches!(c, ' ' | '"' | '\n' | '\r' | '\t'))
            .collect();
        let chart_b = parse_chart(&pre_stripped).unwrap();
        assert_eq!(chart_a.events(), chart_b.events());
    }

    #[test]
    fn field_order_is_irrelevant() {
        let chart = parse_chart("{_cutDirection:3,_time:1.5,_lineIndex:2}").unwrap();
        assert_eq!(chart.get(0).unwrap().beat_time, 1.5);
        assert_eq!(chart.get(0).unwrap().lane, 2);
        assert_eq!(chart.get(0).unwrap().cut_direction, 3);
    }

    #[test]
    fn missing_keys_default_to_zero() {
        let chart = parse_chart("{_time:4}").unwrap();
        assert_eq!(
            *chart.get(0).unwrap(),
            NoteEvent { beat_time: 4.0, ..NoteEvent::default() }
        );
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let chart = parse_chart("{_time:1,_flavor:9}").unwrap();
        assert_eq!(chart.len(), 1);
        assert_eq!(chart.get(0).unwrap().beat_time, 1.0);
    }

    #[test]
    fn non_numeric_value_fails_the_whole_load() {
        let err = parse_chart("{_time:0},{_time:oops}").unwrap_err();
        assert_eq!(
            err,
            ChartError::MalformedChart { record: 1, field: "_time", value: "oops".into() }
        );
    }

    #[test]
    fn empty_input_is_an_empty_chart() {
        assert!(parse_chart("").unwrap().is_empty());
        assert!(parse_chart("  \n\t").unwrap().is_empty());
    }
}
