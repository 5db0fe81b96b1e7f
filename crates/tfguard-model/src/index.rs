use crate::block::Block;
use std::collections::HashMap;

/// `(kind, labels)` → positions of top-level blocks with that address. Built once per module.
#[derive(Clone, Debug, Default)]
pub(crate) struct ReferenceIndex {
    entries: HashMap<(String, Vec<String>), Vec<usize>>,
}

impl ReferenceIndex {
    pub(crate) fn build(blocks: &[Block]) -> Self {
        let mut entries: HashMap<(String, Vec<String>), Vec<usize>> = HashMap::new();
        for (i, b) in blocks.iter().enumerate() {
            entries
                .entry((b.kind().to_string(), b.labels().to_vec()))
                .or_default()
                .push(i);
        }
        Self { entries }
    }

    pub(crate) fn lookup(&self, kind: &str, labels: &[String]) -> &[usize] {
        self.entries
            .get(&(kind.to_string(), labels.to_vec()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::block;

    #[test]
    fn duplicates_share_one_entry() {
        let blocks = vec![
            block("resource", &["aws_kms_key", "main"]),
            block("data", &["aws_kms_key", "main"]),
            block("resource", &["aws_kms_key", "main"]),
        ];
        let index = ReferenceIndex::build(&blocks);
        assert_eq!(index.len(), 2);
        let labels = vec!["aws_kms_key".to_string(), "main".to_string()];
        assert_eq!(index.lookup("resource", &labels), &[0, 2]);
        assert_eq!(index.lookup("data", &labels), &[1]);
        assert!(index.lookup("module", &labels).is_empty());
    }
}
