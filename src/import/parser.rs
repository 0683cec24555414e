use crate::roi::ProcessForm;
use csv::StringRecord;
use std::collections::HashMap;
use std::io::Read;

/// One data row, tagged with the line it started on in the source file.
#[derive(Debug)]
pub(crate) struct FormRow {
    pub(crate) line: u64,
    pub(crate) form: ProcessForm,
}

pub(crate) fn parse_rows<R: Read>(mut reader: R) -> Result<Vec<FormRow>, csv::Error> {
    let mut source = Vec::new();
    reader.read_to_end(&mut source)?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source.as_slice());
    let headers = normalize_headers(csv_reader.headers()?);
    let mut rows = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let line = record
            .position()
            .map(|pos| source_line(&source, pos.byte()))
            .unwrap_or_default();
        let cells: HashMap<String, String> = record.deserialize(Some(&headers))?;

        rows.push(FormRow {
            line,
            form: ProcessForm::from_text_fields(cells),
        });
    }

    Ok(rows)
}

/// 1-based line of the record starting at `offset`.
///
/// The reader positions a record before any blank lines it skipped, so those
/// are stepped over before counting.
fn source_line(source: &[u8], offset: u64) -> u64 {
    let offset = usize::try_from(offset)
        .unwrap_or(source.len())
        .min(source.len());
    let start = offset
        + source[offset..]
            .iter()
            .take_while(|byte| matches!(byte, b'\r' | b'\n'))
            .count();
    let newlines = source[..start].iter().filter(|&&byte| byte == b'\n').count();
    newlines as u64 + 1
}

fn normalize_headers(headers: &StringRecord) -> StringRecord {
    headers
        .iter()
        .map(|header| header.trim_start_matches('\u{feff}').trim().to_ascii_lowercase())
        .collect()
}
