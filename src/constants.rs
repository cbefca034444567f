pub const DEFAULT_VISION_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

pub const FIRST_IMAGE_FILE: &str = "image1.jpg";
pub const SECOND_IMAGE_FILE: &str = "image2.jpg";

pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

pub const COMPARISON_PROMPT: &str = "\
Compare these two images and provide a detailed analysis of their similarities and differences:
1. Describe the main elements in each image
2. Compare their color palettes and overall tone
3. Analyze the mood or emotional feeling of each image
4. Identify any common themes or visual elements
5. Suggest how these images might complement each other

Please structure your response in clear sections.";
