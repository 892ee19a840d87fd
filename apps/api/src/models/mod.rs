pub mod resume;

pub use resume::{EducationEntry, ExperienceEntry, ProjectEntry, ResumeHeader, ResumeStructure, Skills};
