use time::Date;
use time::macros::format_description;
use tfguard_types::ids::{IGNORE_ALL, IGNORE_EXPIRY_MARKER, IGNORE_MARKER};
use tfguard_types::{SourcePath, SourceRange};

/// One `tfguard:ignore:<ids>[:exp:YYYY-MM-DD]` marker found in a comment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IgnoreDirective {
    pub path: SourcePath,
    /// Line of the comment (1-based).
    pub line: u32,
    /// Rule ids or legacy ids; `*` matches every rule.
    pub rules: Vec<String>,
    pub expires: Option<Date>,
}

impl IgnoreDirective {
    /// Extract every marker from one comment's text. Markers with an unreadable expiry
    /// date are dropped.
    pub fn parse_comment(comment: &str, path: &SourcePath, line: u32) -> Vec<IgnoreDirective> {
        let mut out = Vec::new();
        let mut rest = comment;
        while let Some(pos) = rest.find(IGNORE_MARKER) {
            rest = &rest[pos + IGNORE_MARKER.len()..];
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let token = &rest[..end];
            rest = &rest[end..];

            let (ids, expires) = match token.split_once(IGNORE_EXPIRY_MARKER) {
                Some((ids, date)) => match parse_date(date) {
                    Some(d) => (ids, Some(d)),
                    None => {
                        tracing::debug!(%path, line, date, "ignoring marker with invalid expiry");
                        continue;
                    }
                },
                None => (token, None),
            };

            let rules: Vec<String> = ids
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            if rules.is_empty() {
                continue;
            }
            out.push(IgnoreDirective {
                path: path.clone(),
                line,
                rules,
                expires,
            });
        }
        out
    }

    pub fn matches_rule(&self, rule_id: &str, legacy_id: Option<&str>) -> bool {
        self.rules
            .iter()
            .any(|r| r == IGNORE_ALL || r == rule_id || Some(r.as_str()) == legacy_id)
    }

    /// An ignore stays active through its expiry date.
    pub fn is_active(&self, today: Date) -> bool {
        self.expires.is_none_or(|exp| today <= exp)
    }

    /// Covers a finding starting on the comment's line or the next one, or anything inside a
    /// block whose first line directly follows the comment.
    pub fn covers(&self, finding: &SourceRange, block: &SourceRange) -> bool {
        if finding.path != self.path {
            return false;
        }
        let next = self.line + 1;
        finding.start_line == self.line
            || finding.start_line == next
            || (block.start_line == next && block.encloses(finding))
    }
}

fn parse_date(s: &str) -> Option<Date> {
    Date::parse(s, format_description!("[year]-[month]-[day]")).ok()
}
