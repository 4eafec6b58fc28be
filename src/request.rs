use bytes::Bytes;
use http::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use http::Method;

/// The finished method, headers and body triple, ready to hand to whatever
/// transport sends it. Convert into an [`http::Request`] for clients that
/// speak `http` types.
pub struct RequestDescriptor {
    method: Method,
    headers: HeaderMap<HeaderValue>,
    body: Bytes,
}

impl RequestDescriptor {
    pub(crate) fn new(method: Method, headers: HeaderMap<HeaderValue>, body: Bytes) -> Self {
        Self {
            method,
            headers,
            body,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn headers(&self) -> &HeaderMap<HeaderValue> {
        &self.headers
    }

    /// Returns a header as a string, if present and valid utf8.
    pub fn header_value<K>(&self, key: K) -> Option<&str>
    where
        K: AsRef<str>,
    {
        self.headers
            .get(key.as_ref())
            .and_then(|hv| hv.to_str().ok())
    }

    /// The declared media type, parsed from the Content-Type header.
    pub fn content_type(&self) -> Option<mime::Mime> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|hv| hv.to_str().ok())
            .and_then(|s| s.parse::<mime::Mime>().ok())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }

    pub fn body_len(&self) -> usize {
        self.body.len()
    }
}

impl From<RequestDescriptor> for http::Request<Bytes> {
    fn from(desc: RequestDescriptor) -> Self {
        let mut req = http::Request::new(desc.body);
        *req.method_mut() = desc.method;
        *req.headers_mut() = desc.headers;
        req
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::MultipartBuilder;

    #[test]
    fn converts_into_an_http_request() {
        let res = MultipartBuilder::with_boundary("blockmehere")
            .method(Method::PUT)
            .add_text("data", "value", "text/plain")
            .expect("valid part")
            .finish();

        let body_len = res.body_len();
        let req: http::Request<Bytes> = res.into();

        assert_eq!(req.method(), &Method::PUT);
        assert_eq!(req.body().len(), body_len);

        let ct = req
            .headers()
            .get("content-type")
            .and_then(|hv| hv.to_str().ok())
            .expect("content-type carried over");
        assert_eq!(ct, "multipart/mixed; boundary=blockmehere");
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let res = MultipartBuilder::new().finish();

        assert_eq!(res.header_value("Connection"), Some("keep-alive"));
        assert_eq!(res.header_value("CONNECTION"), Some("keep-alive"));
        assert_eq!(res.header_value("x-missing"), None);
    }
}
