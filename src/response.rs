//! Buffered response built up by the pipeline stages.

use std::io;

use axum::http::StatusCode;
use bytes::{Bytes, BytesMut};
use mime::Mime;

use crate::context::Context;

/// Response buffer plus status and diagnostics
///
/// Bytes are appended through [`io::Write`], so template rendering can
/// stream straight into the buffer. Status and error follow last-write-wins.
#[derive(Debug)]
pub struct Response {
    buf: BytesMut,
    size: usize,
    status: StatusCode,
    error: Option<String>,
    layout: Option<String>,
    view: Option<String>,
    content_type: Mime,
}

impl Response {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::new(),
            size: 0,
            status: StatusCode::OK,
            error: None,
            layout: None,
            view: None,
            content_type: mime::TEXT_HTML_UTF_8,
        }
    }

    pub fn body(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_body(self) -> Bytes {
        self.buf.freeze()
    }

    /// Drop everything written so far
    pub fn reset_body(&mut self) {
        self.buf.clear();
        self.size = 0;
    }

    /// Number of bytes successfully written
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// Record a failure on the response and return the failed context.
    pub fn set_error(
        &mut self,
        ctx: Context,
        status: StatusCode,
        message: impl Into<String>,
    ) -> Context {
        let message = message.into();
        self.status = status;
        self.error = Some(message.clone());
        ctx.fail(message)
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn layout(&self) -> Option<&str> {
        self.layout.as_deref()
    }

    pub fn set_layout(&mut self, name: impl Into<String>) {
        self.layout = Some(name.into());
    }

    pub fn view(&self) -> Option<&str> {
        self.view.as_deref()
    }

    pub fn set_view(&mut self, name: impl Into<String>) {
        self.view = Some(name.into());
    }

    pub fn content_type(&self) -> &Mime {
        &self.content_type
    }

    pub fn set_content_type(&mut self, content_type: Mime) {
        self.content_type = content_type;
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl io::Write for Response {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        self.size += data.len();
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
