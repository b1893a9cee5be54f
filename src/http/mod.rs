//! HTTP protocol layer module
//!
//! Response builders decoupled from business logic. Handlers produce
//! bodies; this module turns them into well-formed responses.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_405_response, build_500_response, build_html_response,
    build_json_body_response, build_options_response, build_text_response,
};
