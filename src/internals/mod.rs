mod content_type;
pub use self::content_type::*;

mod debug_body;
pub use self::debug_body::*;

mod request_path_formatter;
pub use self::request_path_formatter::*;

mod query_params_store;
pub use self::query_params_store::*;
