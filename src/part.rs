use bytes::Bytes;

use crate::Error;

pub(crate) const CRLF: &str = "\r\n";

/// How file parts with empty content are treated.
///
/// The original contract only rejected missing content, so a zero length
/// file slips through while a blank text value does not. `Allow` keeps
/// that behavior, `Reject` closes the asymmetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyFilePolicy {
    Allow,
    Reject,
}

/// One named unit of a multipart body, either a text field or a file.
/// Immutable once built; the builder appends it and never looks back.
#[derive(Debug)]
pub struct Part {
    name: String,
    content_type: String,
    payload: Payload,
}

#[derive(Debug)]
enum Payload {
    Text(String),
    File { content: Bytes, file_name: String },
}

impl Part {
    pub fn text<N, V, C>(name: N, value: V, content_type: C) -> Result<Self, Error>
    where
        N: Into<String>,
        V: Into<String>,
        C: Into<String>,
    {
        let name = name.into();
        let value = value.into();
        let content_type = content_type.into();

        if is_blank(&name) || is_blank(&value) || is_blank(&content_type) {
            return Err(Error::InvalidTextPart);
        }

        Ok(Part {
            name,
            content_type,
            payload: Payload::Text(value),
        })
    }

    pub fn file<N, M, F>(name: N, content: Bytes, mime_type: M, file_name: F) -> Result<Self, Error>
    where
        N: Into<String>,
        M: Into<String>,
        F: Into<String>,
    {
        let name = name.into();
        let mime_type = mime_type.into();
        let file_name = file_name.into();

        if is_blank(&name) || is_blank(&mime_type) || is_blank(&file_name) {
            return Err(Error::InvalidFilePart);
        }

        Ok(Part {
            name,
            content_type: mime_type,
            payload: Payload::File { content, file_name },
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn file_name(&self) -> Option<&str> {
        match self.payload {
            Payload::Text(_) => None,
            Payload::File { ref file_name, .. } => Some(file_name),
        }
    }

    /// Appends this part's headers and content to the hex accumulator.
    /// The opening boundary segment is the builder's job.
    pub(crate) fn encode_into(&self, buf: &mut String) {
        match self.payload {
            Payload::Text(ref value) => {
                push_text(
                    buf,
                    &format!(
                        "Content-Disposition: form-data; name=\"{}\"; {}",
                        self.name, CRLF
                    ),
                );
                push_text(
                    buf,
                    &format!("Content-Type: {}; {}{}", self.content_type, CRLF, CRLF),
                );
                push_text(buf, value);
                push_text(buf, CRLF);
            }

            Payload::File {
                ref content,
                ref file_name,
            } => {
                push_text(
                    buf,
                    &format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\" {}",
                        self.name, file_name, CRLF
                    ),
                );
                push_text(
                    buf,
                    &format!("Content-Type: {}; {}{}", self.content_type, CRLF, CRLF),
                );
                // Raw bytes go straight to hex, no utf8 reinterpretation.
                buf.push_str(&hex::encode(content));
                push_text(buf, CRLF);
            }
        }
    }
}

/// Hex encodes a text fragment onto the accumulator. Concatenation always
/// happens on hex digits, so content that looks like CRLFs or boundary
/// markers can never be misread as one.
pub(crate) fn push_text(buf: &mut String, s: &str) {
    buf.push_str(&hex::encode(s));
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {

    use super::*;

    fn decoded(buf: &str) -> Vec<u8> {
        hex::decode(buf).expect("accumulator holds valid hex")
    }

    #[test]
    fn text_part_encodes_headers_and_value() {
        let part = Part::text("data", "hello world", "text/plain").expect("valid text part");

        let mut buf = String::new();
        part.encode_into(&mut buf);

        let bs = decoded(&buf);
        let s = std::str::from_utf8(&bs).expect("text part decodes to utf8");

        assert!(s.contains("Content-Disposition: form-data; name=\"data\"; \r\n"));
        assert!(s.contains("Content-Type: text/plain; \r\n\r\n"));
        assert!(s.ends_with("hello world\r\n"));
    }

    #[test]
    fn file_part_preserves_exact_bytes() {
        // Content full of CRLFs, hyphens and non utf8 bytes.
        let content = Bytes::from(&[0x00, 0x0d, 0x0a, 0x2d, 0x2d, 0xff, 0xfe, 0x0d, 0x0a][..]);
        let part = Part::file("files", content.clone(), "application/octet-stream", "blob.bin")
            .expect("valid file part");

        let mut buf = String::new();
        part.encode_into(&mut buf);

        let bs = decoded(&buf);
        assert!(twoway::find_bytes(&bs, &content).is_some());
        assert!(twoway::find_bytes(
            &bs,
            b"Content-Disposition: form-data; name=\"files\"; filename=\"blob.bin\" \r\n"
        )
        .is_some());
        assert!(twoway::find_bytes(&bs, b"Content-Type: application/octet-stream; \r\n\r\n").is_some());
    }

    #[test]
    fn blank_text_fields_are_rejected() {
        let tests = [
            ("", "value", "text/plain"),
            ("   ", "value", "text/plain"),
            ("name", "", "text/plain"),
            ("name", " \t ", "text/plain"),
            ("name", "value", ""),
            ("name", "value", "  "),
        ];

        for (name, value, ct) in &tests {
            let err = Part::text(*name, *value, *ct).expect_err("blank field must fail");
            assert_eq!(
                err.to_string(),
                "Name, value and contentType cannot be null or empty"
            );
        }
    }

    #[test]
    fn blank_file_fields_are_rejected() {
        let tests = [
            ("", "image/png", "test.png"),
            ("  ", "image/png", "test.png"),
            ("files", "", "test.png"),
            ("files", " ", "test.png"),
            ("files", "image/png", ""),
            ("files", "image/png", "\t"),
        ];

        for (name, mime_type, file_name) in &tests {
            let err = Part::file(*name, Bytes::from(&b"x"[..]), *mime_type, *file_name)
                .expect_err("blank field must fail");
            assert_eq!(
                err.to_string(),
                "Name, file, mimeType, and fileName cannot be null or empty"
            );
        }
    }

    #[test]
    fn part_accessors() {
        let text = Part::text("data", "v", "application/json").expect("text part");
        assert_eq!(text.name(), "data");
        assert_eq!(text.content_type(), "application/json");
        assert_eq!(text.file_name(), None);

        let file = Part::file("files", Bytes::from(&b"x"[..]), "image/png", "test.png")
            .expect("file part");
        assert_eq!(file.name(), "files");
        assert_eq!(file.content_type(), "image/png");
        assert_eq!(file.file_name(), Some("test.png"));
    }
}
