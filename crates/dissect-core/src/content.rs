//! The fixed content store.
//!
//! Holds the article's six sections, each with an excerpt and a bonus
//! question. The table is compiled in and validated when the store is built.

use std::collections::HashSet;

use crate::error::QuizError;
use crate::model::SectionRecord;

/// A problem found in a content table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The section name (if applicable).
    pub section: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Read-only mapping of section name to section record, in table order.
#[derive(Debug, Clone)]
pub struct ContentStore {
    sections: Vec<SectionRecord>,
}

impl ContentStore {
    /// Build a store from records, rejecting any table that breaks an invariant.
    pub fn new(sections: Vec<SectionRecord>) -> Result<Self, QuizError> {
        let warnings = validate_sections(&sections);
        if let Some(first) = warnings.first() {
            let message = match &first.section {
                Some(name) => format!("[{name}] {}", first.message),
                None => first.message.clone(),
            };
            return Err(QuizError::InvalidContent(message));
        }
        Ok(Self { sections })
    }

    /// The article's compiled-in sections.
    pub fn builtin() -> Self {
        Self {
            sections: BUILTIN_SECTIONS.iter().map(BuiltinSection::to_record).collect(),
        }
    }

    /// Section names in table order.
    pub fn section_names(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.name.as_str()).collect()
    }

    /// Look up a section by exact name.
    pub fn lookup(&self, name: &str) -> Result<&SectionRecord, QuizError> {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| QuizError::NotFound(name.to_string()))
    }

    pub fn sections(&self) -> &[SectionRecord] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Check a content table for every invariant violation.
pub fn validate_sections(sections: &[SectionRecord]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if sections.is_empty() {
        warnings.push(ValidationWarning {
            section: None,
            message: "content table has no sections".into(),
        });
    }

    let mut seen = HashSet::new();
    for section in sections {
        if !seen.insert(section.name.as_str()) {
            warnings.push(ValidationWarning {
                section: Some(section.name.clone()),
                message: format!("duplicate section name: {}", section.name),
            });
        }
    }

    for section in sections {
        let count = section.bonus_options.len();
        if !(2..=3).contains(&count) {
            warnings.push(ValidationWarning {
                section: Some(section.name.clone()),
                message: format!("bonus question has {count} options, expected 2 or 3"),
            });
        }
        if !section
            .bonus_options
            .iter()
            .any(|o| *o == section.bonus_correct_answer)
        {
            warnings.push(ValidationWarning {
                section: Some(section.name.clone()),
                message: format!(
                    "correct bonus answer '{}' is not one of the options",
                    section.bonus_correct_answer
                ),
            });
        }
        if section.excerpt_text.trim().is_empty() {
            warnings.push(ValidationWarning {
                section: Some(section.name.clone()),
                message: "excerpt is empty".into(),
            });
        }
    }

    warnings
}

struct BuiltinSection {
    name: &'static str,
    text: &'static str,
    question: &'static str,
    options: &'static [&'static str],
    answer: &'static str,
    explanation: &'static str,
}

impl BuiltinSection {
    fn to_record(&self) -> SectionRecord {
        SectionRecord {
            name: self.name.to_string(),
            excerpt_text: self.text.to_string(),
            bonus_question: self.question.to_string(),
            bonus_options: self.options.iter().map(|o| o.to_string()).collect(),
            bonus_correct_answer: self.answer.to_string(),
            explanation: self.explanation.to_string(),
        }
    }
}

const BUILTIN_SECTIONS: &[BuiltinSection] = &[
    BuiltinSection {
        name: "Abstract",
        text: "This meta-analysis looked at 18 studies with 8,798 participants to find out if using Facebook makes people feel more or less lonely. The study found a small but significant positive correlation: more Facebook use was linked with more loneliness. The analysis also explored whether loneliness causes people to use Facebook more, or if using Facebook leads to loneliness.",
        question: "What was the main purpose of the abstract?",
        options: &[
            "To present detailed statistics",
            "To summarize the study's purpose and results",
            "To explain the methods",
        ],
        answer: "To summarize the study's purpose and results",
        explanation: "The abstract provides a concise overview of the entire study including its aims, methods, and key findings.",
    },
    BuiltinSection {
        name: "Introduction",
        text: "Loneliness is a growing concern in modern society. The authors introduce the idea that online social networking sites like Facebook may play a role in either reducing or contributing to loneliness. They aim to explore this question through a meta-analysis.",
        question: "What is the main role of the Introduction section?",
        options: &[
            "To explain statistical results",
            "To describe previous studies in detail",
            "To introduce the research question and purpose",
        ],
        answer: "To introduce the research question and purpose",
        explanation: "The introduction briefly sets up the research question, provides rationale, and outlines the study’s intent.",
    },
    BuiltinSection {
        name: "Literature Review",
        text: "Previous research has produced mixed findings about Facebook and loneliness. Some studies suggest Facebook helps people connect socially, while others show it may replace face-to-face interaction, increasing loneliness. Researchers have examined both time spent on Facebook and psychological motives for its use.",
        question: "Which best describes the purpose of the Literature Review section?",
        options: &[
            "To present the data analysis",
            "To explain the hypothesis",
            "To summarize past studies and theoretical models",
        ],
        answer: "To summarize past studies and theoretical models",
        explanation: "The literature review synthesizes prior research findings and identifies gaps that the current study aims to fill.",
    },
    BuiltinSection {
        name: "Methods",
        text: "The researchers searched databases for studies using keywords like 'Facebook' and 'loneliness.' They only included studies with quantitative data that could be used to calculate effect sizes. Different ways of measuring Facebook use and loneliness were categorized.",
        question: "Which best describes a key part of the Methods section?",
        options: &[
            "Describing survey results",
            "Explaining how data was collected and selected",
            "Summarizing prior research",
        ],
        answer: "Explaining how data was collected and selected",
        explanation: "The methods describe how the researchers gathered and processed the data used in the study.",
    },
    BuiltinSection {
        name: "Results",
        text: "The overall correlation between Facebook use and loneliness was small but positive (r = .166). People who used Facebook more tended to report more loneliness. This effect varied depending on how Facebook use and loneliness were measured.",
        question: "What does the Results section do in a research article?",
        options: &[
            "Offers opinions",
            "Presents data and findings",
            "Explains theoretical implications",
        ],
        answer: "Presents data and findings",
        explanation: "The Results section objectively presents the study’s findings using statistics and data summaries.",
    },
    BuiltinSection {
        name: "Discussion",
        text: "The authors concluded that lonely people are more likely to use Facebook as a way to feel connected. This supports the 'social compensation' model. They emphasized that more research is needed to examine long-term effects and differences across age groups.",
        question: "What is the main role of the Discussion section?",
        options: &[
            "To present raw data",
            "To connect results to larger theories",
            "To restate the method",
        ],
        answer: "To connect results to larger theories",
        explanation: "The discussion interprets results, connects them to the broader field, and suggests implications for future research.",
    },
];
