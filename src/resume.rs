//! Résumé profile extraction.
//!
//! A lightweight keyword scan over the résumé text (or just the filename when
//! no text could be extracted) that buckets detected technologies. The
//! profile seeds the interview setup form; it never has to be accurate, only
//! helpful, so unknown content falls back to a generic developer profile.

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const PROGRAMMING: &[&str] = &[
    "javascript", "python", "java", "c++", "c#", "ruby", "php", "swift", "kotlin", "go", "rust",
    "scala",
];
const WEB: &[&str] = &[
    "react",
    "angular",
    "vue",
    "node",
    "express",
    "django",
    "flask",
    "spring",
    "laravel",
    "rails",
    "html",
    "css",
    "typescript",
];
const DATABASE: &[&str] = &[
    "mysql",
    "postgresql",
    "mongodb",
    "redis",
    "oracle",
    "sql",
    "nosql",
    "elasticsearch",
    "cassandra",
];
const CLOUD: &[&str] = &[
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "terraform",
    "jenkins",
    "ci/cd",
    "devops",
];
const TOOLS: &[&str] = &[
    "git", "jira", "slack", "trello", "figma", "sketch", "postman", "vscode", "intellij",
];

/// File extensions the upload form accepts.
const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt"];

#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("Unsupported file format. Please upload PDF or Word document.")]
    UnsupportedFormat,
}

/// Skills detected in a résumé, grouped the way the setup form displays them.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ResumeProfile {
    pub programming: Vec<String>,
    pub web: Vec<String>,
    pub database: Vec<String>,
    pub cloud: Vec<String>,
    pub tools: Vec<String>,
}

impl ResumeProfile {
    pub fn is_empty(&self) -> bool {
        self.programming.is_empty()
            && self.web.is_empty()
            && self.database.is_empty()
            && self.cloud.is_empty()
            && self.tools.is_empty()
    }

    /// Every detected skill, programming first, for the languages field of
    /// the setup form.
    pub fn all_skills(&self) -> Vec<String> {
        let mut skills = Vec::new();
        for bucket in [
            &self.programming,
            &self.web,
            &self.database,
            &self.cloud,
            &self.tools,
        ] {
            for skill in bucket {
                if !skills.contains(skill) {
                    skills.push(skill.clone());
                }
            }
        }
        skills
    }

    /// Generic developer profile used when nothing was detected.
    fn generic() -> Self {
        Self {
            programming: vec!["JavaScript".to_string(), "Python".to_string()],
            web: vec![
                "React".to_string(),
                "Node".to_string(),
                "HTML".to_string(),
                "CSS".to_string(),
            ],
            database: vec!["MySQL".to_string(), "MongoDB".to_string()],
            cloud: vec!["AWS".to_string()],
            tools: vec!["Git".to_string()],
        }
    }
}

/// Reject files whose name does not end in a supported extension.
pub fn check_supported(filename: &str) -> Result<(), ResumeError> {
    let supported = filename
        .rsplit('.')
        .next()
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false);
    if supported {
        Ok(())
    } else {
        Err(ResumeError::UnsupportedFormat)
    }
}

/// Scan résumé text for known technologies. An empty scan result yields the
/// generic profile so the setup form always has something to offer.
pub fn parse_resume_text(text: &str) -> ResumeProfile {
    let haystack = text.to_lowercase();

    let profile = ResumeProfile {
        programming: matches_in(&haystack, PROGRAMMING),
        web: matches_in(&haystack, WEB),
        database: matches_in(&haystack, DATABASE),
        cloud: matches_in(&haystack, CLOUD),
        tools: matches_in(&haystack, TOOLS),
    };

    if profile.is_empty() {
        info!("No known skills detected in résumé, using generic profile");
        return ResumeProfile::generic();
    }

    info!("📄 Detected {} skills in résumé", profile.all_skills().len());
    profile
}

/// Validate the file name, then scan whatever text came out of it.
pub fn parse_resume(filename: &str, text: &str) -> Result<ResumeProfile, ResumeError> {
    check_supported(filename)?;
    // Filenames like "jane_react_developer.pdf" often carry skills too.
    let combined = format!("{}\n{}", filename, text);
    Ok(parse_resume_text(&combined))
}

fn matches_in(haystack: &str, keywords: &[&str]) -> Vec<String> {
    keywords
        .iter()
        .filter(|keyword| haystack.contains(*keyword))
        .map(|keyword| canonical_case(keyword))
        .collect()
}

/// Display casing for a matched keyword.
fn canonical_case(keyword: &str) -> String {
    match keyword {
        "javascript" => "JavaScript".to_string(),
        "typescript" => "TypeScript".to_string(),
        "html" | "css" | "sql" | "nosql" | "aws" | "gcp" | "php" => keyword.to_uppercase(),
        "ci/cd" => "CI/CD".to_string(),
        "mysql" => "MySQL".to_string(),
        "postgresql" => "PostgreSQL".to_string(),
        "mongodb" => "MongoDB".to_string(),
        "devops" => "DevOps".to_string(),
        "vscode" => "VSCode".to_string(),
        "intellij" => "IntelliJ".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_skills_across_buckets() {
        let text = "Built services in Rust and Python, React frontends on AWS, \
                    PostgreSQL storage, everything in Git.";
        let profile = parse_resume_text(text);

        assert!(profile.programming.contains(&"Rust".to_string()));
        assert!(profile.programming.contains(&"Python".to_string()));
        assert!(profile.web.contains(&"React".to_string()));
        assert!(profile.cloud.contains(&"AWS".to_string()));
        assert!(profile.database.contains(&"PostgreSQL".to_string()));
        assert!(profile.tools.contains(&"Git".to_string()));
    }

    #[test]
    fn empty_scan_falls_back_to_generic_profile() {
        let profile = parse_resume_text("Worked as a florist for ten years.");
        assert!(!profile.is_empty());
        assert!(profile.programming.contains(&"JavaScript".to_string()));
        assert!(profile.tools.contains(&"Git".to_string()));
    }

    #[test]
    fn filename_contributes_skills() {
        let profile = parse_resume("jane_react_developer.pdf", "").unwrap();
        assert!(profile.web.contains(&"React".to_string()));
    }

    #[test]
    fn rejects_unsupported_extensions() {
        assert!(check_supported("resume.pdf").is_ok());
        assert!(check_supported("resume.DOCX").is_ok());
        assert!(check_supported("resume.png").is_err());
        assert!(check_supported("resume").is_err());
    }

    #[test]
    fn repeated_mentions_produce_one_entry() {
        let profile = parse_resume_text("swift Swift SWIFT react React");
        let skills = profile.all_skills();
        assert_eq!(skills.iter().filter(|s| s.as_str() == "Swift").count(), 1);
        assert_eq!(skills.iter().filter(|s| s.as_str() == "React").count(), 1);
    }
}
