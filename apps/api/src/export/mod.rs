// Spreadsheet exports: the self-assessment record and the career plan.
// Both are returned to the client as xlsx downloads.

pub mod career_plan;
pub mod record;

use axum::{
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Response header naming the record file saved by the save-and-plan action.
pub const RECORD_FILE_HEADER: &str = "x-record-file";

/// Turns a respondent name into a filename fragment.
///
/// Spaces become underscores. Path separators, quotes and the other
/// characters Windows rejects in filenames become underscores too, so the
/// result never escapes the output directory.
pub fn sanitize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// An xlsx file handed to the client as an attachment.
#[derive(Debug)]
pub struct Download {
    pub filename: String,
    pub bytes: Vec<u8>,
    /// Set when the action also saved a record on the server.
    pub saved_record: Option<String>,
}

impl IntoResponse for Download {
    fn into_response(self) -> Response {
        let mut response = (
            [(header::CONTENT_TYPE, HeaderValue::from_static(XLSX_MIME))],
            Bytes::from(self.bytes),
        )
            .into_response();

        let headers = response.headers_mut();
        if let Ok(value) = HeaderValue::from_str(&content_disposition(&self.filename)) {
            headers.insert(header::CONTENT_DISPOSITION, value);
        }
        if let Some(record) = self.saved_record {
            if let Ok(value) = HeaderValue::from_str(&percent_encode(&record)) {
                headers.insert(HeaderName::from_static(RECORD_FILE_HEADER), value);
            }
        }
        response
    }
}

/// `attachment` disposition with an ASCII fallback and an RFC 5987 UTF-8 name.
fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| if c.is_ascii_graphic() || c == ' ' { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{ascii}\"; filename*=UTF-8''{}",
        percent_encode(filename)
    )
}

/// Escapes everything except ASCII alphanumerics and `-._~`.
const FILENAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn percent_encode(value: &str) -> String {
    utf8_percent_encode(value, FILENAME_ENCODE_SET).to_string()
}
