use ::anyhow::Context;
use ::anyhow::Result;
use ::axum::body::Body as AxumBody;
use ::bytes::Bytes;
use ::futures::executor::block_on;
use ::futures::TryStreamExt;
use ::rust_multipart_rfc7578_2::client::multipart::Body as CommonMultipartBody;
use ::rust_multipart_rfc7578_2::client::multipart::Form;
use ::std::fmt::Display;
use ::std::io::Cursor;

use crate::UploadFile;

///
/// A `multipart/form-data` body, built up from text fields and [`UploadFile`]s.
///
/// Set it onto a request using [`RequestConfig::set_multipart()`](crate::RequestConfig::set_multipart()).
///
pub struct MultipartForm {
    inner: Form<'static>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self {
            inner: Form::default(),
        }
    }

    /// Creates a text part, and adds it to be sent.
    pub fn add_text<N, T>(mut self, name: N, text: T) -> Self
    where
        N: Display,
        T: ToString,
    {
        self.inner.add_text(name, text.to_string());
        self
    }

    /// Adds a file to be sent, under the upload's field name.
    ///
    /// Uploads without in memory content are read from disk here.
    /// An error is returned if that fails.
    pub fn add_upload(self, upload: &UploadFile) -> Result<Self> {
        let content = upload.read_content()?;
        Ok(self.add_file(upload, content))
    }

    /// Adds a file section, with content already read.
    pub(crate) fn add_file(mut self, upload: &UploadFile, content: Bytes) -> Self {
        self.inner.add_reader_2(
            &upload.name,
            Cursor::new(content),
            Some(upload.file_name()),
            Some(upload.mime_type.clone()),
            Vec::new(),
        );

        self
    }

    /// Returns the content type this form will use when it is sent,
    /// including the boundary.
    pub fn content_type(&self) -> String {
        self.inner.content_type()
    }

    /// Encodes the whole form into a single body.
    ///
    /// All parts are held in memory, so this never waits on IO.
    pub fn into_bytes(self) -> Result<Bytes> {
        let body: CommonMultipartBody = self.inner.into();
        let encoded = block_on(body.try_fold(Vec::new(), |mut buffer, chunk| async move {
            buffer.extend_from_slice(&chunk);
            Ok(buffer)
        }))
        .map_err(|err| ::anyhow::anyhow!("{err}"))
        .context("Failed to encode multipart form")?;

        Ok(encoded.into())
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

impl From<MultipartForm> for AxumBody {
    fn from(multipart: MultipartForm) -> Self {
        let inner_body: CommonMultipartBody = multipart.inner.into();
        AxumBody::from_stream(inner_body)
    }
}
