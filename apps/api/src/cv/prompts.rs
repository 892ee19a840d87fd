// Instruction template for CV restructuring.
// The schema mirrors `models::resume::ResumeStructure` field for field.

use crate::cv::models::JobTargeting;

/// Fixed target schema. Placeholder values tell the model to use real resume data.
pub const CV_SCHEMA_INSTRUCTION: &str = r#"Extract and improve the following resume content. Return ONLY valid JSON in this exact format:

{
  "header": {
    "name": "ACTUAL NAME FROM RESUME",
    "email": "ACTUAL EMAIL",
    "phone": "ACTUAL PHONE",
    "linkedinUrl": "",
    "githubUrl": ""
  },
  "summary": "Professional summary based on the resume",
  "experience": [
    {
      "title": "ACTUAL JOB TITLE",
      "company": "ACTUAL COMPANY",
      "duration": "ACTUAL DATES",
      "bullets": ["Improved responsibility 1", "Enhanced responsibility 2"]
    }
  ],
  "projects": [
    {
      "title": "ACTUAL PROJECT NAME",
      "description": "Project description",
      "bullets": ["Project detail 1", "Project detail 2"]
    }
  ],
  "education": [
    {
      "degree": "ACTUAL DEGREE",
      "institution": "ACTUAL INSTITUTION",
      "duration": "ACTUAL DATES",
      "gpa": "ACTUAL GPA IF MENTIONED"
    }
  ],
  "skills": {
    "technical": ["ACTUAL SKILLS FROM RESUME"]
  },
  "achievements": ["ACTUAL ACHIEVEMENTS"]
}

Use an empty string or an empty array when the resume does not contain a field."#;

/// Renders the instruction sent to the model.
///
/// Targeting lines appear only when non-blank, always in the order
/// job description, company, position.
pub fn build_cv_prompt(cv_text: &str, targeting: &JobTargeting) -> String {
    let mut prompt = String::with_capacity(CV_SCHEMA_INSTRUCTION.len() + cv_text.len() + 256);
    prompt.push_str(CV_SCHEMA_INSTRUCTION);
    prompt.push_str("\n\nResume content:\n");
    prompt.push_str(cv_text);
    prompt.push('\n');

    let lines = [
        ("Target job", targeting.job_description()),
        ("Company", targeting.company_name()),
        ("Position", targeting.position()),
    ];
    for (label, value) in lines {
        if let Some(value) = value {
            prompt.push('\n');
            prompt.push_str(label);
            prompt.push_str(": ");
            prompt.push_str(value);
        }
    }

    prompt
}
