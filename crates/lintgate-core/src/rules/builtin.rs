//! Built-in line-oriented rules

use super::{Rule, RuleContext, SourceFile};
use crate::violation::{Location, Priority, Violation};

fn column(n: usize) -> u32 {
    n as u32 + 1
}

/// Leftover `<<<<<<<`, `=======` or `>>>>>>>` lines from a merge
pub struct MergeConflictMarkerRule;

impl Rule for MergeConflictMarkerRule {
    fn name(&self) -> &'static str {
        "merge conflict marker"
    }

    fn priority(&self) -> Priority {
        Priority::P1
    }

    fn check(&self, source: &SourceFile, _context: &RuleContext) -> Vec<Violation> {
        source
            .numbered_lines()
            .filter(|(_, line)| {
                line.starts_with("<<<<<<< ")
                    || line.starts_with(">>>>>>> ")
                    || *line == "<<<<<<<"
                    || *line == ">>>>>>>"
                    || *line == "======="
            })
            .map(|(n, line)| {
                Violation::new(
                    self.name(),
                    self.priority(),
                    Location::new(&source.path, n, 1).with_end(n, column(line.len())),
                    "Unresolved merge conflict marker",
                )
            })
            .collect()
    }
}

/// Files longer than `LONG_FILE` lines
pub struct LongFileRule;

impl LongFileRule {
    pub const OPTION: &'static str = "LONG_FILE";
    pub const DEFAULT_THRESHOLD: i64 = 1000;
}

impl Rule for LongFileRule {
    fn name(&self) -> &'static str {
        "long file"
    }

    fn priority(&self) -> Priority {
        Priority::P2
    }

    fn check(&self, source: &SourceFile, context: &RuleContext) -> Vec<Violation> {
        let threshold = context.int_option(Self::OPTION, Self::DEFAULT_THRESHOLD);
        let lines = source.content.lines().count() as i64;
        if lines <= threshold {
            return Vec::new();
        }

        vec![Violation::new(
            self.name(),
            self.priority(),
            Location::new(&source.path, 1, 1).with_end(lines as u32, 1),
            format!(
                "File with {} lines exceeds limit of {}",
                lines, threshold
            ),
        )]
    }
}

/// Lines longer than `LONG_LINE` characters
pub struct LongLineRule;

impl LongLineRule {
    pub const OPTION: &'static str = "LONG_LINE";
    pub const DEFAULT_THRESHOLD: i64 = 100;
}

impl Rule for LongLineRule {
    fn name(&self) -> &'static str {
        "long line"
    }

    fn priority(&self) -> Priority {
        Priority::P3
    }

    fn check(&self, source: &SourceFile, context: &RuleContext) -> Vec<Violation> {
        let threshold = context.int_option(Self::OPTION, Self::DEFAULT_THRESHOLD);

        source
            .numbered_lines()
            .filter_map(|(n, line)| {
                let length = line.chars().count() as i64;
                (length > threshold).then(|| {
                    Violation::new(
                        self.name(),
                        self.priority(),
                        Location::new(&source.path, n, 1).with_end(n, length as u32),
                        format!(
                            "Line with {} characters exceeds limit of {}",
                            length, threshold
                        ),
                    )
                })
            })
            .collect()
    }
}

/// Spaces or tabs before the end of a line
pub struct TrailingWhitespaceRule;

impl Rule for TrailingWhitespaceRule {
    fn name(&self) -> &'static str {
        "trailing whitespace"
    }

    fn priority(&self) -> Priority {
        Priority::P3
    }

    fn check(&self, source: &SourceFile, _context: &RuleContext) -> Vec<Violation> {
        source
            .numbered_lines()
            .filter_map(|(n, line)| {
                let trimmed = line.trim_end_matches([' ', '\t']);
                (trimmed.len() < line.len()).then(|| {
                    Violation::new(
                        self.name(),
                        self.priority(),
                        Location::new(&source.path, n, column(trimmed.chars().count()))
                            .with_end(n, line.chars().count() as u32),
                        "Trailing whitespace",
                    )
                })
            })
            .collect()
    }
}

/// `TODO` and `FIXME` notes left in comments
pub struct TodoCommentRule;

impl TodoCommentRule {
    const MARKERS: [&'static str; 2] = ["TODO", "FIXME"];
}

impl Rule for TodoCommentRule {
    fn name(&self) -> &'static str {
        "todo comment"
    }

    fn priority(&self) -> Priority {
        Priority::P3
    }

    fn check(&self, source: &SourceFile, _context: &RuleContext) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (n, line) in source.numbered_lines() {
            let Some(comment_start) = line.find("//").or_else(|| line.find("/*")) else {
                continue;
            };
            let comment = &line[comment_start..];
            let found = Self::MARKERS
                .iter()
                .filter_map(|marker| comment.find(marker).map(|at| (at, *marker)))
                .min_by_key(|(at, _)| *at);

            if let Some((at, marker)) = found {
                let byte_offset = comment_start + at;
                violations.push(Violation::new(
                    self.name(),
                    self.priority(),
                    Location::new(&source.path, n, column(line[..byte_offset].chars().count())),
                    format!("{} comment left in source", marker),
                ));
            }
        }

        violations
    }
}
