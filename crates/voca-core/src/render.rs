use std::fmt::Write;

use voca_types::{Chrome, LookupRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub lines: Vec<String>,
}

/// Stateless presentation of a resolved record
pub struct ResultRenderer;

impl ResultRenderer {
    /// Sections in display order; empty sections are left out
    pub fn sections(record: &LookupRecord) -> Vec<Section> {
        let mut sections = Vec::new();

        let mut push = |title, lines: Vec<String>| {
            if lines.iter().any(|l| !l.trim().is_empty()) {
                sections.push(Section { title, lines });
            }
        };

        push("Definition", vec![record.definition.clone()]);
        push("Simple explanation", vec![record.simple_explanation.clone()]);
        push(
            "Examples",
            record
                .examples
                .iter()
                .enumerate()
                .flat_map(|(i, ex)| {
                    [
                        format!("{}. {}", i + 1, ex.primary_text),
                        format!("   {}", ex.secondary_text),
                    ]
                })
                .collect(),
        );
        push("Synonyms", join_set(&record.synonyms));
        push("Antonyms", join_set(&record.antonyms));
        push("Etymology", vec![record.etymology.clone()]);
        push("Memory aid", vec![record.memory_aid.clone()]);

        sections
    }

    pub fn render(record: &LookupRecord, chrome: Chrome) -> String {
        let mut out = String::new();

        let bar = match chrome {
            Chrome::TopBar => "[< back]  [search........]",
            Chrome::BottomToolbar => "[< back]",
        };
        if chrome == Chrome::TopBar {
            let _ = writeln!(out, "{bar}");
        }

        let _ = writeln!(out, "{}  ({})", record.term, record.part_of_speech);
        if !record.pronunciation.is_empty() {
            let _ = writeln!(out, "{}", record.pronunciation);
        }

        for section in Self::sections(record) {
            let _ = writeln!(out, "\n{}", section.title);
            for line in section.lines {
                let _ = writeln!(out, "  {line}");
            }
        }

        if chrome == Chrome::BottomToolbar {
            let _ = writeln!(out, "\n{bar}  [favorite] [retry] [copy]");
        }

        out
    }

    /// Text placed on the clipboard by the copy action
    pub fn clipboard_summary(record: &LookupRecord) -> String {
        format!("{} - {}", record.term, record.definition)
    }
}

fn join_set(set: &std::collections::BTreeSet<String>) -> Vec<String> {
    if set.is_empty() {
        return vec![];
    }
    vec![set.iter().map(String::as_str).collect::<Vec<_>>().join(", ")]
}
