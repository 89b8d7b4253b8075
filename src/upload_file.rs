use ::anyhow::Context;
use ::anyhow::Result;
use ::bytes::Bytes;
use ::mime::Mime;
use ::std::path::Path;
use ::std::path::PathBuf;

///
/// A file to upload, as part of a multipart form.
///
/// See [`RequestConfig::set_file_from_path()`](crate::RequestConfig::set_file_from_path()),
/// or [`MultipartForm::add_upload()`](crate::multipart::MultipartForm::add_upload()).
///
/// The file name sent is the last component of `path`.
/// When `content` is empty, the file is read from `path`,
/// otherwise `content` is sent and `path` is only used for the file name.
///
/// Uploads are sent as `application/octet-stream`, unless a mime type is given.
///
/// ```rust
/// use ::axum_fight::UploadFile;
///
/// let upload = UploadFile::with_content("docs/README.md", "readme", "# Hello")
///     .mime_type(::mime::TEXT_PLAIN_UTF_8);
///
/// assert_eq!(upload.file_name(), "README.md");
/// ```
///
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub path: PathBuf,
    pub name: String,
    pub content: Bytes,
    pub mime_type: Mime,
}

impl UploadFile {
    /// An upload which reads the file at the path given.
    pub fn new<P, N>(path: P, name: N) -> Self
    where
        P: Into<PathBuf>,
        N: Into<String>,
    {
        Self::with_content(path, name, Bytes::new())
    }

    /// An upload which sends the content given, under the file name of the path.
    pub fn with_content<P, N, C>(path: P, name: N, content: C) -> Self
    where
        P: Into<PathBuf>,
        N: Into<String>,
        C: Into<Bytes>,
    {
        Self {
            path: path.into(),
            name: name.into(),
            content: content.into(),
            mime_type: ::mime::APPLICATION_OCTET_STREAM,
        }
    }

    /// Sets the mime type this upload is sent with.
    pub fn mime_type(mut self, mime_type: Mime) -> Self {
        self.mime_type = mime_type;
        self
    }

    pub fn file_name(&self) -> String {
        file_name_of(&self.path)
    }

    /// Returns the bytes to send for this upload.
    ///
    /// The file is read fully here, and closed before returning.
    pub fn read_content(&self) -> Result<Bytes> {
        if !self.content.is_empty() {
            return Ok(self.content.clone());
        }

        let contents = ::std::fs::read(&self.path).with_context(|| {
            format!(
                "Failed to read file {}, for upload '{}'",
                self.path.display(),
                self.name
            )
        })?;

        Ok(Bytes::from(contents))
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod test_file_name {
    use super::*;

    #[test]
    fn it_should_use_last_path_component() {
        let upload = UploadFile::new("fixtures/images/cat.png", "photo");

        assert_eq!(upload.file_name(), "cat.png");
    }

    #[test]
    fn it_should_fall_back_to_whole_path() {
        let upload = UploadFile::new("..", "photo");

        assert_eq!(upload.file_name(), "..");
    }
}


#[cfg(test)]
mod test_read_content {
    use super::*;
    use ::std::io::Write;

    #[test]
    fn it_should_use_content_over_path() {
        let upload = UploadFile::with_content("does/not/exist.txt", "doc", "in memory");

        assert_eq!(upload.read_content().unwrap(), "in memory");
        assert_eq!(upload.file_name(), "exist.txt");
    }

    #[test]
    fn it_should_read_file_when_content_is_empty() {
        let mut file = ::tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"from disk").unwrap();

        let upload = UploadFile::new(file.path(), "doc");

        assert_eq!(upload.read_content().unwrap(), "from disk");
    }

    #[test]
    fn it_should_name_the_upload_when_file_is_missing() {
        let upload = UploadFile::new("does/not/exist.txt", "doc");
        let err = upload.read_content().unwrap_err();

        assert!(format!("{err:#}").contains("for upload 'doc'"));
    }
}
