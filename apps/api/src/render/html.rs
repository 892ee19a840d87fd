//! Self-contained HTML rendering with inline styles.
//!
//! Section order is fixed: header, summary, experience, projects, education,
//! technical skills, achievements. A section whose backing data is empty is
//! left out entirely. All text goes through askama's HTML escaping.

use askama::Template;

use crate::models::{EducationEntry, ExperienceEntry, ProjectEntry, ResumeStructure};
use crate::render::{RenderError, ResumeRenderer};

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{{ title }}</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 40px; line-height: 1.4; }
        .header { text-align: center; margin-bottom: 30px; border-bottom: 2px solid #333; padding-bottom: 15px; }
        .name { font-size: 24pt; font-weight: bold; margin-bottom: 8pt; }
        .contact { font-size: 11pt; color: #666; }
        .section { margin: 25px 0; }
        .section-title { font-size: 14pt; font-weight: bold; text-transform: uppercase; margin-bottom: 15px; border-bottom: 1px solid #333; }
        .job, .project, .education-item { margin: 15px 0; }
        .job-title, .project-title, .degree { font-weight: bold; font-size: 12pt; }
        .company, .institution { font-style: italic; color: #666; }
        .bullets { margin: 8px 0 0 20px; }
        .bullet { margin: 4px 0; list-style-type: disc; }
    </style>
</head>
<body>
    <div class="header">
        <h1 class="name">{{ name }}</h1>
        {% if !contact.is_empty() %}
        <div class="contact">{{ contact }}</div>
        {% endif %}
    </div>
    {% if !summary.is_empty() %}
    <div class="section">
        <h2 class="section-title">Summary</h2>
        <p>{{ summary }}</p>
    </div>
    {% endif %}
    {% if !experience.is_empty() %}
    <div class="section">
        <h2 class="section-title">Experience</h2>
        {% for job in experience %}
        <div class="job">
            <div class="job-title">{{ job.title }}</div>
            {% if !job.meta.is_empty() %}
            <div class="company">{{ job.meta }}</div>
            {% endif %}
            {% if !job.bullets.is_empty() %}
            <ul class="bullets">
                {% for bullet in job.bullets %}
                <li class="bullet">{{ bullet }}</li>
                {% endfor %}
            </ul>
            {% endif %}
        </div>
        {% endfor %}
    </div>
    {% endif %}
    {% if !projects.is_empty() %}
    <div class="section">
        <h2 class="section-title">Projects</h2>
        {% for project in projects %}
        <div class="project">
            <div class="project-title">{{ project.title }}</div>
            {% if !project.description.is_empty() %}
            <p>{{ project.description }}</p>
            {% endif %}
            {% if !project.bullets.is_empty() %}
            <ul class="bullets">
                {% for bullet in project.bullets %}
                <li class="bullet">{{ bullet }}</li>
                {% endfor %}
            </ul>
            {% endif %}
        </div>
        {% endfor %}
    </div>
    {% endif %}
    {% if !education.is_empty() %}
    <div class="section">
        <h2 class="section-title">Education</h2>
        {% for edu in education %}
        <div class="education-item">
            <div class="degree">{{ edu.degree }}</div>
            {% if !edu.meta.is_empty() %}
            <div class="institution">{{ edu.meta }}</div>
            {% endif %}
        </div>
        {% endfor %}
    </div>
    {% endif %}
    {% if !skills.is_empty() %}
    <div class="section">
        <h2 class="section-title">Technical Skills</h2>
        <p>{{ skills }}</p>
    </div>
    {% endif %}
    {% if !achievements.is_empty() %}
    <div class="section">
        <h2 class="section-title">Achievements</h2>
        <ul class="bullets">
            {% for achievement in achievements %}
            <li class="bullet">{{ achievement }}</li>
            {% endfor %}
        </ul>
    </div>
    {% endif %}
</body>
</html>
"#,
    ext = "html"
)]
struct ResumePage<'a> {
    title: String,
    name: &'a str,
    contact: String,
    summary: &'a str,
    experience: Vec<JobView<'a>>,
    projects: Vec<ProjectView<'a>>,
    education: Vec<EducationView<'a>>,
    skills: String,
    achievements: Vec<&'a str>,
}

struct JobView<'a> {
    title: &'a str,
    meta: String,
    bullets: Vec<&'a str>,
}

struct ProjectView<'a> {
    title: &'a str,
    description: &'a str,
    bullets: Vec<&'a str>,
}

struct EducationView<'a> {
    degree: &'a str,
    meta: String,
}

impl<'a> ResumePage<'a> {
    fn new(resume: &'a ResumeStructure) -> Self {
        let header = &resume.header;
        let name = header.name.trim();
        let title = if name.is_empty() {
            "Resume".to_string()
        } else {
            format!("Resume - {name}")
        };

        Self {
            title,
            name,
            contact: joined(&[
                header.email.as_str(),
                header.phone.as_str(),
                header.linkedin().unwrap_or_default(),
                header.github().unwrap_or_default(),
            ]),
            summary: resume.summary.trim(),
            experience: resume.experience.iter().map(JobView::new).collect(),
            projects: resume.projects.iter().map(ProjectView::new).collect(),
            education: resume.education.iter().map(EducationView::new).collect(),
            skills: resume
                .skills
                .technical
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            achievements: resume.achievements.iter().map(String::as_str).collect(),
        }
    }
}

impl<'a> JobView<'a> {
    fn new(job: &'a ExperienceEntry) -> Self {
        Self {
            title: &job.title,
            meta: joined(&[job.company.as_str(), job.duration.as_str()]),
            bullets: job.bullets.iter().map(String::as_str).collect(),
        }
    }
}

impl<'a> ProjectView<'a> {
    fn new(project: &'a ProjectEntry) -> Self {
        Self {
            title: &project.title,
            description: project.description.trim(),
            bullets: project.bullets.iter().map(String::as_str).collect(),
        }
    }
}

impl<'a> EducationView<'a> {
    fn new(edu: &'a EducationEntry) -> Self {
        Self {
            degree: &edu.degree,
            meta: joined(&[
                edu.institution.as_str(),
                edu.duration.as_str(),
                edu.gpa().unwrap_or_default(),
            ]),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl ResumeRenderer for HtmlRenderer {
    fn media_type(&self) -> &'static str {
        "text/html; charset=utf-8"
    }

    fn file_extension(&self) -> &'static str {
        "html"
    }

    fn render(&self, resume: &ResumeStructure) -> Result<String, RenderError> {
        ResumePage::new(resume)
            .render()
            .map_err(|e| RenderError::Template(e.to_string()))
    }
}

/// Joins the non-blank parts with ` | `.
fn joined(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResumeHeader, Skills};

    fn sample() -> ResumeStructure {
        ResumeStructure {
            header: ResumeHeader {
                name: "Jane Allen Doe".to_string(),
                email: "jane.doe@example.com".to_string(),
                phone: "555-123-4567".to_string(),
                linkedin_url: None,
                github_url: Some("github.com/janedoe".to_string()),
            },
            summary: "Backend engineer.".to_string(),
            experience: vec![ExperienceEntry {
                title: "Senior Engineer".to_string(),
                company: "Acme".to_string(),
                duration: "2019 - 2024".to_string(),
                bullets: vec!["First bullet".to_string(), "Second bullet".to_string()],
            }],
            projects: vec![],
            education: vec![EducationEntry {
                degree: "BSc Computer Science".to_string(),
                institution: "State University".to_string(),
                duration: "2015 - 2019".to_string(),
                gpa: None,
            }],
            skills: Skills {
                technical: vec!["Rust".to_string(), "Go".to_string()],
            },
            achievements: vec!["Speaker at RustConf".to_string()],
        }
    }

    fn render(resume: &ResumeStructure) -> String {
        HtmlRenderer.render(resume).unwrap()
    }

    #[test]
    fn test_empty_projects_section_is_omitted() {
        let html = render(&sample());
        assert!(html.contains(">Experience</h2>"));
        assert!(!html.contains(">Projects</h2>"));
    }

    #[test]
    fn test_empty_experience_has_no_heading() {
        let mut resume = sample();
        resume.experience.clear();
        assert!(!render(&resume).contains(">Experience</h2>"));
    }

    #[test]
    fn test_sections_follow_fixed_order() {
        let mut resume = sample();
        resume.projects.push(ProjectEntry {
            title: "Ledger".to_string(),
            description: String::new(),
            bullets: vec![],
        });
        let html = render(&resume);
        let order = [
            "class=\"header\"",
            ">Summary</h2>",
            ">Experience</h2>",
            ">Projects</h2>",
            ">Education</h2>",
            ">Technical Skills</h2>",
            ">Achievements</h2>",
        ];
        let positions: Vec<usize> = order.iter().map(|m| html.find(m).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }

    #[test]
    fn test_bullets_keep_input_order() {
        let html = render(&sample());
        assert!(html.find("First bullet").unwrap() < html.find("Second bullet").unwrap());
    }

    #[test]
    fn test_skills_are_comma_joined_in_order() {
        assert!(render(&sample()).contains("<p>Rust, Go</p>"));
    }

    #[test]
    fn test_absent_optional_fields_are_not_rendered() {
        let html = render(&sample());
        assert!(html.contains("<div class=\"institution\">State University | 2015 - 2019</div>"));
        assert!(html.contains(
            "<div class=\"contact\">jane.doe@example.com | 555-123-4567 | github.com/janedoe</div>"
        ));
        assert!(!html.contains("linkedin"));
    }

    #[test]
    fn test_blank_gpa_is_not_rendered_but_present_gpa_is() {
        let mut resume = sample();
        resume.education[0].gpa = Some("  ".to_string());
        assert!(!render(&resume).contains("2019 | "));
        resume.education[0].gpa = Some("3.8".to_string());
        assert!(render(&resume).contains("State University | 2015 - 2019 | 3.8"));
    }

    #[test]
    fn test_empty_structure_renders_shell_only() {
        let html = render(&ResumeStructure::default());
        assert!(html.contains("<title>Resume</title>"));
        assert!(!html.contains("class=\"section-title\""));
        assert!(!html.contains("class=\"contact\""));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut resume = sample();
        resume.header.name = "<script>alert('x')</script>".to_string();
        resume.achievements = vec!["R&D lead".to_string()];
        let html = render(&resume);
        assert!(!html.contains("<script>"));
        assert!(!html.contains("alert('x')"));
        assert!(html.contains("alert("));
        assert!(!html.contains("R&D lead"));
        assert!(html.contains("D lead"));
    }

    #[test]
    fn test_no_external_resources() {
        let html = render(&sample());
        assert!(html.contains("<style>"));
        assert!(!html.contains("<link"));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn test_contact_and_meta_lines_are_escaped() {
        let mut resume = sample();
        resume.header.email = "jane+<cv>@example.com".to_string();
        resume.experience[0].company = "Smith & Sons".to_string();
        let html = render(&resume);
        assert!(!html.contains("<cv>"));
        assert!(!html.contains("Smith & Sons"));
        assert!(html.contains("Smith "));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        assert_eq!(render(&sample()), render(&sample()));
    }
}
