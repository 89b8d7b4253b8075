use crate::ResponseRecorder;
use crate::TestRequest;

///
/// Something which serves a single request, by writing a response into a [`ResponseRecorder`].
///
/// This is the synchronous counterpart to a `tower::Service`,
/// and is what [`RequestConfig::run()`](crate::RequestConfig::run()) dispatches to.
///
/// It is implemented for all closures of the matching shape:
///
/// ```rust
/// use ::axum_fight::RequestConfig;
/// use ::axum_fight::ResponseRecorder;
/// use ::axum_fight::TestRequest;
///
/// fn hello_handler(_request: &TestRequest, recorder: &mut ResponseRecorder) {
///     recorder.write_str("Hello World");
/// }
///
/// RequestConfig::new()
///     .get("/")
///     .run(hello_handler, |response, _request| {
///         response.assert_text("Hello World");
///     });
/// ```
///
pub trait Handler {
    fn serve(&self, request: &TestRequest, recorder: &mut ResponseRecorder);
}

impl<F> Handler for F
where
    F: Fn(&TestRequest, &mut ResponseRecorder),
{
    fn serve(&self, request: &TestRequest, recorder: &mut ResponseRecorder) {
        self(request, recorder)
    }
}
