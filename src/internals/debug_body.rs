use ::bytesize::ByteSize;
use ::std::fmt::Display;
use ::std::fmt::Formatter;
use ::std::fmt::Result as FmtResult;

/// An arbituary limit to avoid printing megabytes of upload to the terminal.
const MAX_TEXT_PRINT_LEN: usize = 10_000;

/// Renders a request or response body for logs and assertion messages,
/// based on its content type.
#[derive(Debug)]
pub struct DebugBody<'a> {
    content_type: Option<&'a str>,
    body: &'a [u8],
}

impl<'a> DebugBody<'a> {
    pub fn new(content_type: Option<&'a str>, body: &'a [u8]) -> Self {
        Self { content_type, body }
    }
}

impl Display for DebugBody<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let essence = self
            .content_type
            .map(|content_type| content_type.split(';').next().unwrap_or("").trim());

        match essence {
            Some("application/json") | Some("text/json") => write_json(f, self.body),

            Some("application/x-www-form-urlencoded") => write_text(f, self.body),

            Some(s) if s.starts_with("text/") => write_text(f, self.body),

            Some("multipart/form-data") => {
                write!(f, "<Multipart, with len {}>", ByteSize(self.body.len() as u64))
            }

            Some("application/octet-stream") => {
                write!(f, "<Bytes, with len {}>", ByteSize(self.body.len() as u64))
            }

            Some(_) => write!(
                f,
                "<Unknown content type, with len {}>",
                ByteSize(self.body.len() as u64)
            ),

            // We just default to text
            None => write_text(f, self.body),
        }
    }
}

fn write_text(f: &mut Formatter<'_>, body: &[u8]) -> FmtResult {
    let text = String::from_utf8_lossy(body);

    if text.chars().count() <= MAX_TEXT_PRINT_LEN {
        write!(f, "'{text}'")
    } else {
        write!(f, "'")?;
        for c in text.chars().take(MAX_TEXT_PRINT_LEN) {
            write!(f, "{c}")?;
        }
        write!(f, "...'")
    }
}

fn write_json(f: &mut Formatter<'_>, body: &[u8]) -> FmtResult {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Err(_) => {
            write!(f, "!!! MALFORMED JSON !!!\nBody: ")?;
            write_text(f, body)
        }
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(pretty_raw) => write!(f, "{pretty_raw}"),
            Err(_) => write_text(f, body),
        },
    }
}

#[cfg(test)]
mod test_fmt {
    use super::*;
    use ::pretty_assertions::assert_eq;

    #[test]
    fn it_should_display_text_as_text() {
        let output = DebugBody::new(Some("text/plain"), b"Blah blah").to_string();

        assert_eq!(output, "'Blah blah'");
    }

    #[test]
    fn it_should_default_to_text_without_content_type() {
        let output = DebugBody::new(None, b"a=1&b=2").to_string();

        assert_eq!(output, "'a=1&b=2'");
    }

    #[test]
    fn it_should_cutoff_very_long_text() {
        let max_len = MAX_TEXT_PRINT_LEN + 100;
        let text = (0..max_len).map(|_| "🦊").collect::<String>();

        let output = DebugBody::new(Some("text/plain"), text.as_bytes()).to_string();

        let expected_content = (0..MAX_TEXT_PRINT_LEN).map(|_| "🦊").collect::<String>();
        assert_eq!(output, format!("'{expected_content}...'"));
    }

    #[test]
    fn it_should_pretty_print_json() {
        let output =
            DebugBody::new(Some("application/json"), br#"{"age":20,"name":"Joe"}"#).to_string();
        let expected = r###"{
  "age": 20,
  "name": "Joe"
}"###;

        assert_eq!(output, expected);
    }

    #[test]
    fn it_should_warn_malformed_json() {
        let output = DebugBody::new(Some("application/json"), br#"{ "name": "Joe" "#).to_string();
        let expected = r###"!!! MALFORMED JSON !!!
Body: '{ "name": "Joe" '"###;

        assert_eq!(output, expected);
    }

    #[test]
    fn it_should_summarise_multipart_bodies() {
        let output = DebugBody::new(
            Some("multipart/form-data; boundary=abc123"),
            b"--abc123\r\n--abc123--\r\n",
        )
        .to_string();

        assert_eq!(output, "<Multipart, with len 22 B>");
    }
}
