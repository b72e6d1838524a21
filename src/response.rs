use http::{HeaderMap, StatusCode, Version};

/// Head of a response without any body.
///
/// This is what [`Outcome::Ok`][crate::Outcome::Ok] and
/// [`Outcome::Error`][crate::Outcome::Error] carry as `response`.
pub type RawResponse = http::Response<()>;

/// A response as delivered by the transport.
///
/// A successful (2xx) response carries a body of type `T`, which may be absent.
/// Any other response may carry the raw error body sent by the server.
#[derive(Debug, Clone)]
pub struct Response<T> {
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    body: Option<T>,
    error_body: Option<Vec<u8>>,
}

impl<T> Response<T> {
    /// A `200 OK` response with a body.
    pub fn success(body: T) -> Self {
        Response {
            body: Some(body),
            ..Response::with_status(StatusCode::OK)
        }
    }

    /// A `200 OK` response where the body is absent.
    pub fn empty() -> Self {
        Response::with_status(StatusCode::OK)
    }

    /// A response with the given status, holding an error body.
    ///
    /// The status is not checked, but the intention is for a non-2xx status.
    pub fn error(status: StatusCode, error_body: Vec<u8>) -> Self {
        Response {
            error_body: Some(error_body),
            ..Response::with_status(status)
        }
    }

    fn with_status(status: StatusCode) -> Self {
        Response {
            status,
            version: Version::HTTP_11,
            headers: HeaderMap::new(),
            body: None,
            error_body: None,
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_successful(&self) -> bool {
        self.status.is_success()
    }

    /// Status of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Status code as a number.
    pub fn code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Reason phrase for the status, or `"Unknown"`.
    pub fn message(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("Unknown")
    }

    /// HTTP version of the response.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable response headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// The body, if present.
    pub fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }

    /// Take the body out of the response.
    pub fn into_body(self) -> Option<T> {
        self.body
    }

    /// Split into the head and the (possibly absent) body.
    pub fn into_parts(self) -> (RawResponse, Option<T>) {
        let raw = self.raw();
        (raw, self.body)
    }

    /// Raw error body of a non-2xx response.
    pub fn error_body(&self) -> Option<&[u8]> {
        self.error_body.as_deref()
    }

    /// The head of this response, without any body.
    pub fn raw(&self) -> RawResponse {
        let mut raw = http::Response::new(());
        *raw.status_mut() = self.status;
        *raw.version_mut() = self.version;
        *raw.headers_mut() = self.headers.clone();
        raw
    }
}

impl<T> From<http::Response<Option<T>>> for Response<T> {
    fn from(value: http::Response<Option<T>>) -> Self {
        let (parts, body) = value.into_parts();

        Response {
            status: parts.status,
            version: parts.version,
            headers: parts.headers,
            body,
            error_body: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use http::header;

    #[test]
    fn success_has_body() {
        let r = Response::success("Done!");
        assert!(r.is_successful());
        assert_eq!(r.code(), 200);
        assert_eq!(r.message(), "OK");
        assert_eq!(r.body(), Some(&"Done!"));
        assert!(r.error_body().is_none());
    }

    #[test]
    fn empty_has_no_body() {
        let r = Response::<String>::empty();
        assert!(r.is_successful());
        assert!(r.body().is_none());
        assert!(r.into_body().is_none());
    }

    #[test]
    fn error_keeps_error_body() {
        let r = Response::<String>::error(StatusCode::BAD_REQUEST, b"Error response 400".to_vec());
        assert!(!r.is_successful());
        assert_eq!(r.code(), 400);
        assert_eq!(r.error_body(), Some(&b"Error response 400"[..]));
        assert!(r.body().is_none());
    }

    #[test]
    fn raw_copies_head() {
        let mut r = Response::success(42);
        r.headers_mut()
            .insert(header::CONTENT_TYPE, "text/plain".parse().unwrap());

        let raw = r.raw();
        assert_eq!(raw.status(), StatusCode::OK);
        assert_eq!(raw.version(), Version::HTTP_11);
        assert_eq!(raw.headers().get(header::CONTENT_TYPE).unwrap(), "text/plain");
    }

    #[test]
    fn from_http_response() {
        let http = http::Response::builder()
            .status(StatusCode::CREATED)
            .version(Version::HTTP_2)
            .body(Some("created"))
            .unwrap();

        let r: Response<&str> = http.into();
        assert_eq!(r.status(), StatusCode::CREATED);
        assert_eq!(r.version(), Version::HTTP_2);

        let (raw, body) = r.into_parts();
        assert_eq!(raw.status(), StatusCode::CREATED);
        assert_eq!(body, Some("created"));
    }
}
