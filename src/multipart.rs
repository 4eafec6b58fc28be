use bytes::Bytes;
use http::header::{HeaderMap, HeaderValue, CONNECTION, CONTENT_LENGTH, CONTENT_TYPE};
use http::Method;
use rand::{distr::Alphanumeric, Rng};

use crate::part::{push_text, CRLF};
use crate::{EmptyFilePolicy, Error, Part, RequestDescriptor};

/// Length of the random alphanumeric boundary token.
pub const BOUNDARY_LEN: usize = 22;

/// Accumulates parts in call order and produces the finished request
/// descriptor on [`finish`](MultipartBuilder::finish).
///
/// The body under construction is kept as a string of hex digits and only
/// decoded back into bytes once, when finishing. Every chainable call takes
/// the builder by value, so adding parts after finishing, or finishing
/// twice, does not compile.
#[derive(Debug)]
pub struct MultipartBuilder {
    boundary: String,
    content_type: String,

    // hex accumulator
    buf: String,

    method: Option<Method>,
    empty_file_policy: EmptyFilePolicy,
}

impl MultipartBuilder {
    pub fn new() -> Self {
        Self::with_boundary(gen_boundary())
    }

    /// Uses the given boundary token instead of a random one.
    /// The token must be usable inside a Content-Type header value.
    pub fn with_boundary<S: Into<String>>(boundary: S) -> Self {
        let boundary = boundary.into();

        log::debug!("Creating builder with boundary: {:?}", boundary);

        let content_type = format!("multipart/mixed; boundary={}", boundary);

        Self {
            boundary,
            content_type,
            buf: String::new(),
            method: None,
            empty_file_policy: EmptyFilePolicy::Allow,
        }
    }

    /// Sets the request verb. Overwrites any earlier choice; when never
    /// called, [`finish`](MultipartBuilder::finish) defaults to `POST`.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn empty_file_policy(mut self, policy: EmptyFilePolicy) -> Self {
        self.empty_file_policy = policy;
        self
    }

    /// Appends a text field. All three arguments must be non blank.
    pub fn add_text<N, V, C>(self, name: N, value: V, content_type: C) -> Result<Self, Error>
    where
        N: Into<String>,
        V: Into<String>,
        C: Into<String>,
    {
        let part = Part::text(name, value, content_type)?;
        Ok(self.append(part))
    }

    /// Appends a file field. Name, mime type and file name must be non
    /// blank; empty content is accepted unless
    /// [`EmptyFilePolicy::Reject`] was selected.
    pub fn add_file<N, M, F>(
        self,
        name: N,
        file: impl Into<Bytes>,
        mime_type: M,
        file_name: F,
    ) -> Result<Self, Error>
    where
        N: Into<String>,
        M: Into<String>,
        F: Into<String>,
    {
        let file = file.into();

        if self.empty_file_policy == EmptyFilePolicy::Reject && file.is_empty() {
            return Err(Error::InvalidFilePart);
        }

        let part = Part::file(name, file, mime_type, file_name)?;
        Ok(self.append(part))
    }

    fn append(mut self, part: Part) -> Self {
        self.buf.push_str(&boundary_segment(&self.boundary, false));
        part.encode_into(&mut self.buf);
        self
    }

    /// Appends the closing boundary, decodes the accumulator into the true
    /// body bytes and assembles the descriptor. Consumes the builder.
    pub fn finish(mut self) -> RequestDescriptor {
        self.buf.push_str(&boundary_segment(&self.boundary, true));

        let body = hex::decode(&self.buf).expect("accumulator only ever holds hex digits");

        log::debug!("Finished multipart body, {} bytes", body.len());

        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(&self.content_type).expect("boundary token forms a valid header"),
        );
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(
            CONTENT_LENGTH,
            HeaderValue::from_str(&body.len().to_string()).expect("lengths are valid headers"),
        );

        RequestDescriptor::new(
            self.method.unwrap_or(Method::POST),
            headers,
            Bytes::from(body),
        )
    }
}

impl Default for MultipartBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The delimiter between parts, as hex text ready for the accumulator.
/// Opening boundaries end with CRLF, the closing one with `--`.
fn boundary_segment(boundary: &str, closing: bool) -> String {
    let mut buf = String::new();

    if closing {
        push_text(&mut buf, &format!("--{}--", boundary));
    } else {
        push_text(&mut buf, &format!("--{}{}", boundary, CRLF));
    }

    buf
}

fn gen_boundary() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(BOUNDARY_LEN)
        .map(char::from)
        .collect()
}
