use sha2::{Digest, Sha256};
use tfguard_types::SourceRange;

/// Compute a stable SHA-256 fingerprint for a finding.
///
/// Identity fields:
/// - rule_id
/// - path (scan-root relative)
/// - start and end line
/// - message
pub fn fingerprint_for_finding(rule_id: &str, range: &SourceRange, message: &str) -> String {
    let start = range.start_line.to_string();
    let end = range.end_line.to_string();
    let canonical = [rule_id, range.path.as_str(), start.as_str(), end.as_str(), message].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfguard_types::SourcePath;

    #[test]
    fn fingerprint_is_stable_and_sensitive_to_location() {
        let a = SourceRange::new(SourcePath::new("main.tf"), 3, 5);
        let b = SourceRange::new(SourcePath::new("main.tf"), 4, 5);
        let fa = fingerprint_for_finding("aws-ebs-enable-volume-encryption", &a, "msg");
        assert_eq!(fa.len(), 64);
        assert_eq!(
            fa,
            fingerprint_for_finding("aws-ebs-enable-volume-encryption", &a, "msg")
        );
        assert_ne!(
            fa,
            fingerprint_for_finding("aws-ebs-enable-volume-encryption", &b, "msg")
        );
    }
}
