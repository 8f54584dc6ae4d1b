use grep::regex::RegexMatcher;
use grep::searcher::{Searcher, Sink, SinkMatch};
use std::error::Error;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// Directories holding this crate's Rust sources. Nothing outside them is scanned.
const SOURCE_ROOTS: &[&str] = &["risk", "model", "cli", "tests", "benches"];

// Collects every matching line of one file so a single error can list them all.
struct ViolationCollector {
    violations: Vec<String>,
    file_path: PathBuf,
    kind: Violation,
}

#[derive(Clone, Copy)]
enum Violation {
    UnderscorePrefix,
    ForbiddenComment,
    UppercaseComment,
    AllowDeadCode,
}

impl Violation {
    fn title(self) -> &'static str {
        match self {
            Violation::UnderscorePrefix => "underscore-prefixed variables",
            Violation::ForbiddenComment => "forbidden comment patterns",
            Violation::UppercaseComment => "comments with all uppercase alphabetic characters",
            Violation::AllowDeadCode => "#[allow(dead_code)] attributes",
        }
    }

    fn advice(self) -> &'static str {
        match self {
            Violation::UnderscorePrefix => {
                "Underscore-prefixed variable names are not allowed in this project.\n   Either use the variable (removing the underscore) or remove it completely."
            }
            Violation::ForbiddenComment => {
                "Changelog-style comments ('FIXED', 'CHANGED', 'UPDATED', 'NEW', ...) and '**' in regular comments are not allowed.\n   Remove them completely rather than commenting them out."
            }
            Violation::UppercaseComment => {
                "Comments where all alphabetic characters are uppercase are not allowed.\n   Strongly consider deleting the comment completely."
            }
            Violation::AllowDeadCode => {
                "#[allow(dead_code)] attributes are not allowed in this project.\n   Either use the code or remove it completely."
            }
        }
    }
}

impl ViolationCollector {
    fn new(file_path: &Path, kind: Violation) -> Self {
        Self {
            violations: Vec::new(),
            file_path: file_path.to_path_buf(),
            kind,
        }
    }

    fn check_and_get_error_message(&self) -> Option<String> {
        if self.violations.is_empty() {
            return None;
        }

        let file_name = self.file_path.to_str().unwrap_or("?");
        let mut error_msg = format!(
            "\n❌ ERROR: Found {} {} in {}:\n",
            self.violations.len(),
            self.kind.title(),
            file_name
        );
        for violation in &self.violations {
            error_msg.push_str(&format!("   {violation}\n"));
        }
        error_msg.push_str(&format!("\n⚠️ {}\n", self.kind.advice()));
        Some(error_msg)
    }

    fn accepts(&self, line_text: &str) -> bool {
        let trimmed = line_text.trim_start();
        let is_comment = trimmed.starts_with("//") || line_text.contains("/*");
        match self.kind {
            Violation::UnderscorePrefix => {
                // Matches inside comments or string literals are not bindings.
                if is_comment {
                    return false;
                }
                !line_text
                    .split('"')
                    .enumerate()
                    .any(|(i, part)| i % 2 == 1 && part.contains('_'))
            }
            Violation::ForbiddenComment => {
                // '**' is allowed for emphasis in doc comments.
                let is_doc = trimmed.starts_with("///") || trimmed.starts_with("//!");
                !is_doc || has_changelog_word(line_text)
            }
            Violation::UppercaseComment => {
                if !is_comment {
                    return false;
                }
                let comment_text = comment_body(line_text);
                let mut alpha = comment_text.chars().filter(|c| c.is_alphabetic()).peekable();
                alpha.peek().is_some() && alpha.all(|c| c.is_uppercase())
            }
            Violation::AllowDeadCode => true,
        }
    }
}

fn has_changelog_word(line_text: &str) -> bool {
    const WORDS: &[&str] = &[
        "FIXED", "CORRECTED", "FIX", "NEW", "CHANGED", "CHANGE", "MODIFIED", "MODIFY", "UPDATED",
        "UPDATE",
    ];
    WORDS.iter().any(|word| line_text.contains(word))
}

fn comment_body(line_text: &str) -> &str {
    let trimmed = line_text.trim_start();
    if let Some(rest) = trimmed.strip_prefix("///").or_else(|| trimmed.strip_prefix("//!")) {
        rest.trim()
    } else if let Some(rest) = trimmed.strip_prefix("//") {
        rest.trim()
    } else if let Some(idx) = line_text.find("/*") {
        let rest = &line_text[idx + 2..];
        match rest.find("*/") {
            Some(end) => rest[..end].trim(),
            None => rest.trim(),
        }
    } else {
        ""
    }
}

impl Sink for ViolationCollector {
    type Error = std::io::Error;

    fn matched(&mut self, _: &Searcher, mat: &SinkMatch) -> Result<bool, Self::Error> {
        let line_number = mat.line_number().unwrap_or(0);
        let line_text = std::str::from_utf8(mat.bytes()).unwrap_or("").trim_end();
        if self.accepts(line_text) {
            self.violations.push(format!("{line_number}:{line_text}"));
        }
        Ok(true)
    }
}

fn rust_sources() -> impl Iterator<Item = PathBuf> {
    SOURCE_ROOTS.iter().flat_map(|root| {
        WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
            .map(|e| e.into_path())
    })
}

fn scan(pattern: &str, kind: Violation) -> Result<(), Box<dyn Error>> {
    let matcher = RegexMatcher::new_line_matcher(pattern)?;
    let mut searcher = Searcher::new();
    for path in rust_sources() {
        let mut collector = ViolationCollector::new(&path, kind);
        searcher.search_path(&matcher, &path, &mut collector)?;
        if let Some(error_message) = collector.check_and_get_error_message() {
            return Err(error_message.into());
        }
    }
    Ok(())
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    for root in SOURCE_ROOTS {
        println!("cargo:rerun-if-changed={root}");
    }

    let checks: [(&str, Violation); 5] = [
        (r"\b(_[a-zA-Z0-9_]+)\b", Violation::UnderscorePrefix),
        (
            r"(//|/\*).*(?:FIXED|CORRECTED|FIX|NEW|CHANGED|CHANGE|MODIFIED|MODIFY|UPDATED|UPDATE)",
            Violation::ForbiddenComment,
        ),
        (r"(//|/\*).*\*\*", Violation::ForbiddenComment),
        (r"(//|/\*).*", Violation::UppercaseComment),
        (r"#\s*\[\s*allow\s*\(\s*dead_code\s*\)\s*\]", Violation::AllowDeadCode),
    ];
    for (pattern, kind) in checks {
        if let Err(e) = scan(pattern, kind) {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }

    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    println!("cargo:rustc-env=ICURISK_BUILD_TIMESTAMP={timestamp}");
}
