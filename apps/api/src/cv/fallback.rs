//! Heuristic fallback: a best-effort Resume Structure from raw text alone.
//!
//! Only the contact fields are read from the text (email, phone, name). Every
//! other section gets one generic placeholder entry; nothing specific is
//! invented.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{
    EducationEntry, ExperienceEntry, ProjectEntry, ResumeHeader, ResumeStructure, Skills,
};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

/// Optional country code, then 3-3-4 digits with `-`, `.` or whitespace separators.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").expect("valid phone regex")
});

const MIN_NAME_TOKENS: usize = 2;
const MAX_NAME_TOKEN_CHARS: usize = 19;

pub const PLACEHOLDER_SUMMARY: &str = "Professional with technical background and experience.";

/// Builds the fallback structure. Total: never fails on any input.
///
/// `header.name` is either two or more alphabetic tokens from the first line
/// or empty; the caller decides what to show instead of a blank name.
pub fn extract_fallback(text: &str) -> ResumeStructure {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    ResumeStructure {
        header: ResumeHeader {
            name: lines.first().map(|line| name_from_line(line)).unwrap_or_default(),
            email: first_match(&lines, &EMAIL_RE),
            phone: first_match(&lines, &PHONE_RE),
            linkedin_url: Some(String::new()),
            github_url: Some(String::new()),
        },
        summary: PLACEHOLDER_SUMMARY.to_string(),
        experience: vec![ExperienceEntry {
            title: "Professional Experience".to_string(),
            company: "Technology Company".to_string(),
            duration: "Recent".to_string(),
            bullets: vec!["Professional experience in technology sector".to_string()],
        }],
        projects: vec![ProjectEntry {
            title: "Technical Project".to_string(),
            description: "Software development project".to_string(),
            bullets: vec!["Developed technical solution".to_string()],
        }],
        education: vec![EducationEntry {
            degree: "Academic Qualification".to_string(),
            institution: "Educational Institution".to_string(),
            duration: "Completed".to_string(),
            gpa: Some(String::new()),
        }],
        skills: Skills {
            technical: vec!["Technical Skills".to_string()],
        },
        achievements: vec!["Professional achievements".to_string()],
    }
}

/// First match of `pattern` scanning lines top to bottom.
fn first_match(lines: &[&str], pattern: &Regex) -> String {
    lines
        .iter()
        .find_map(|line| pattern.find(line))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Greedy prefix of purely alphabetic tokens, accepted only if it has at
/// least two tokens.
fn name_from_line(line: &str) -> String {
    let tokens: Vec<&str> = line
        .split_whitespace()
        .take_while(|token| is_name_token(token))
        .collect();

    if tokens.len() >= MIN_NAME_TOKENS {
        tokens.join(" ")
    } else {
        String::new()
    }
}

fn is_name_token(token: &str) -> bool {
    let len = token.chars().count();
    (1..=MAX_NAME_TOKEN_CHARS).contains(&len) && token.chars().all(char::is_alphabetic)
}
