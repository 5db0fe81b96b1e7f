use tfguard_model::IgnoreDirective;
use tfguard_types::SourcePath;
use tfguard_types::ids::IGNORE_MARKER;

/// Find `# tfguard:ignore:...` and `// tfguard:ignore:...` markers, line by line.
///
/// A marker only counts when it follows a `#` or `//` on the same line.
pub fn scan_ignores(path: &SourcePath, text: &str) -> Vec<IgnoreDirective> {
    let mut out = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let Some(marker) = line.find(IGNORE_MARKER) else {
            continue;
        };
        let Some(comment_start) = comment_start(&line[..marker]) else {
            continue;
        };
        out.extend(IgnoreDirective::parse_comment(
            &line[comment_start..],
            path,
            (i + 1) as u32,
        ));
    }
    out
}

/// Byte offset of the first `#` or `//` that is not inside a string literal.
fn comment_start(prefix: &str) -> Option<usize> {
    let mut in_string = false;
    let mut escaped = false;
    let mut chars = prefix.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '#' => return Some(i),
            '/' if chars.peek().is_some_and(|&(_, next)| next == '/') => return Some(i),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_hash_and_slash_comments_with_their_lines() {
        let src = r#"
resource "aws_ebs_volume" "a" { # tfguard:ignore:aws-ebs-enable-volume-encryption
}
// tfguard:ignore:AWS087,AWS043
resource "aws_redshift_cluster" "b" {}
description = "tfguard:ignore:not-a-comment"
"#;
        let found = scan_ignores(&SourcePath::new("main.tf"), src);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].line, 2);
        assert_eq!(found[0].rules, vec!["aws-ebs-enable-volume-encryption"]);
        assert_eq!(found[1].line, 4);
        assert_eq!(found[1].rules, vec!["AWS087", "AWS043"]);
    }

    #[test]
    fn markers_inside_string_literals_are_not_comments() {
        let src = r##"
name = "a#b tfguard:ignore:aws-ebs-enable-volume-encryption"
url  = "https://example.com/tfguard:ignore:AWS087"
note = "x" # tfguard:ignore:AWS043
esc  = "say \"#\" tfguard:ignore:AWS001"
"##;
        let found = scan_ignores(&SourcePath::new("main.tf"), src);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 4);
        assert_eq!(found[0].rules, vec!["AWS043"]);
    }
}
