pub mod analyze;
pub mod cli;
pub mod constants;
pub mod fetch;
pub mod validate;

pub use analyze::analyze_image_similarities;
pub use cli::run;
pub use fetch::{FetchError, TempImage, download_and_validate_image, download_file};
pub use validate::{has_allowed_extension, is_valid_url};
