mod api;
pub mod models;

pub use api::{
    build_generate_body, convert_body_parts_gemini, response_to_text_data, send_generate_request,
};
