//! Minimal `multipart/form-data` body encoder for file uploads.

use uuid::Uuid;

/// In-memory multipart form body.
#[derive(Debug)]
pub(crate) struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartForm {
    /// Start an empty form with a random boundary.
    pub(crate) fn new() -> Self {
        Self::with_boundary(format!("damagecheck-{}", Uuid::new_v4().simple()))
    }

    pub(crate) fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            body: Vec::new(),
        }
    }

    /// Value for the request `Content-Type` header.
    pub(crate) fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Append a plain text field.
    pub(crate) fn text(&mut self, name: &str, value: &str) {
        self.open_part();
        self.push_line(&format!(
            "Content-Disposition: form-data; name=\"{}\"",
            escape_quoted(name)
        ));
        self.push_line("");
        self.body.extend_from_slice(value.as_bytes());
        self.push_line("");
    }

    /// Append a file field with its original filename.
    pub(crate) fn file(&mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) {
        self.open_part();
        self.push_line(&format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"",
            escape_quoted(name),
            escape_quoted(filename)
        ));
        self.push_line(&format!("Content-Type: {content_type}"));
        self.push_line("");
        self.body.extend_from_slice(bytes);
        self.push_line("");
    }

    /// Close the form and return the encoded body.
    pub(crate) fn finish(mut self) -> Vec<u8> {
        let closing = format!("--{}--", self.boundary);
        self.push_line(&closing);
        self.body
    }

    fn open_part(&mut self) {
        let delimiter = format!("--{}", self.boundary);
        self.push_line(&delimiter);
    }

    fn push_line(&mut self, line: &str) {
        self.body.extend_from_slice(line.as_bytes());
        self.body.extend_from_slice(b"\r\n");
    }
}

fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
