// Cross-cutting prompt fragments for the model gateway.
// Task-specific instructions live next to the code that builds them (cv::prompts).

/// System instruction fixing the assistant's role for every CV request.
pub const RESUME_PARSER_SYSTEM: &str = "You are an expert resume parser. \
    Extract information from resume text and return structured JSON. \
    Always return valid JSON format.";
