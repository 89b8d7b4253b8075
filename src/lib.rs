//!
//! Axum Fight is a library for testing HTTP handlers, without running a server:
//!
//!  * You build a [`RequestConfig`] within a test,
//!  * run it against a [`Handler`] or any `tower::Service`, such as an Axum [`Router`](::axum::Router),
//!  * receive back the [`TestResponse`] alongside the [`TestRequest`] that was sent,
//!  * then assert both are how you expect.
//!
//! It includes built in support for query parameters, form and Json bodies using Serde,
//! multipart file uploads, cookies, headers, and request contexts with deadlines.
//!
//! ## Getting Started
//!
//! Write a handler, which writes it's response into a [`ResponseRecorder`]:
//!
//! ```rust
//! use ::axum_fight::RequestConfig;
//! use ::axum_fight::ResponseRecorder;
//! use ::axum_fight::TestRequest;
//!
//! fn hello_handler(request: &TestRequest, recorder: &mut ResponseRecorder) {
//!     let name = request.query_param("name").unwrap_or_else(|| "World".to_string());
//!     recorder.write_str(&format!("Hello {name}"));
//! }
//!
//! RequestConfig::new()
//!     .get("/hello")
//!     .set_query(&[("name", "Joe")])
//!     .run(hello_handler, |response, request| {
//!         assert_eq!(request.uri(), "/hello?name=Joe");
//!         response.assert_status_ok();
//!         response.assert_text("Hello Joe");
//!     });
//! ```
//!
//! Or run the same request against an Axum application:
//!
//! ```rust
//! # async fn test() -> Result<(), Box<dyn ::std::error::Error>> {
//! #
//! use ::axum::Router;
//! use ::axum::extract::Json;
//! use ::axum::routing::put;
//! use ::axum_fight::RequestConfig;
//! use ::serde_json::json;
//! use ::serde_json::Value;
//!
//! async fn route_put_user(Json(user): Json<Value>) -> Json<Value> {
//!     Json(user)
//! }
//!
//! let my_app = Router::new()
//!     .route("/users", put(route_put_user));
//!
//! RequestConfig::new()
//!     .put("/users")
//!     .set_json(&json!({
//!         "username": "Terrance Pencilworth",
//!     }))
//!     .run_service(my_app, |response, _request| {
//!         response.assert_json(&json!({
//!             "username": "Terrance Pencilworth",
//!         }));
//!     })
//!     .await?;
//! #
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Features
//!
//!  * `pretty-assertions` **on by default**, uses the [pretty assertions crate](https://crates.io/crates/pretty_assertions) for the output to the `assert_*` functions.
//!
//! ## Features
//!
//! ### Content Type 📇
//!
//! Requests which usually carry a body (`POST`, `PUT`, and `PATCH`) get a content type guessed from it.
//! A body wrapped in `{ }` or `[ ]` is sent as `application/json`,
//! and anything else as `application/x-www-form-urlencoded`.
//!
//! A default can be set for all requests, using the `default_content_type` on [`FightConfig`].
//! This will be used instead of guessing.
//!
//! ```rust
//! use ::axum_fight::FightConfig;
//! use ::axum_fight::RequestConfig;
//!
//! let config = FightConfig::builder()
//!     .default_content_type("application/json")
//!     .build();
//!
//! let request = RequestConfig::new_with_config(config)
//!     .post("/users")
//!     .set_body("raw body")
//!     .materialize();
//!
//! assert_eq!(request.header("content-type"), Some("application/json"));
//! ```
//!
//! Finally on each `RequestConfig`, one can set the content type to use.
//! By calling [`RequestConfig::set_content_type()`] on it.
//! A `Content-Type` passed to [`RequestConfig::set_header()`] wins over all of these.
//!
//! ### Debugging 🐛
//!
//! Calling `set_debug(true)` logs the full request at `debug` level when it is built,
//! using [`tracing`](https://crates.io/crates/tracing).
//! Mistakes made setting up a request, such as invalid header names, are logged as warnings.
//! They are also kept on the request, for checking with [`RequestConfig::assert_no_errors()`].
//!

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub(crate) mod internals;

pub mod multipart;

mod fight_config;
pub use self::fight_config::*;

mod fight_config_builder;
pub use self::fight_config_builder::*;

mod handler;
pub use self::handler::*;

mod query_value;
pub use self::query_value::*;

mod request_config;
pub use self::request_config::*;

mod request_context;
pub use self::request_context::*;

mod response_recorder;
pub use self::response_recorder::*;

mod test_request;
pub use self::test_request::*;

mod test_response;
pub use self::test_response::*;

mod upload_file;
pub use self::upload_file::*;

pub use ::http;
