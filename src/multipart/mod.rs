//!
//! This supplies the building blocks for sending multipart forms,
//! using [`RequestConfig::set_multipart()`](crate::RequestConfig::set_multipart()).
//!
//! Most uploads only need [`RequestConfig::set_file_from_path()`](crate::RequestConfig::set_file_from_path()).
//! This is for when more control is needed, such as custom mime types,
//! or mixing text fields in between files.
//!
//! ```rust
//! # fn test() -> Result<(), Box<dyn ::std::error::Error>> {
//! #
//! use ::axum_fight::RequestConfig;
//! use ::axum_fight::UploadFile;
//! use ::axum_fight::multipart::MultipartForm;
//!
//! let readme = UploadFile::with_content("README.md", "file", "# Hello")
//!     .mime_type("text/markdown".parse()?);
//!
//! let multipart_form = MultipartForm::new()
//!     .add_text("name", "Joe")
//!     .add_upload(&readme)?;
//!
//! let request = RequestConfig::new()
//!     .post("/my-form")
//!     .set_multipart(multipart_form);
//! #
//! # Ok(())
//! # }
//! ```
//!

mod multipart_form;
pub use self::multipart_form::*;
