use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum BlockKind {
    Collapsible,
    Image,
    Link,
    Tooltip,
}

impl BlockKind {
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            '#' => Some(Self::Collapsible),
            '%' => Some(Self::Image),
            '$' => Some(Self::Link),
            '?' => Some(Self::Tooltip),
            _ => None,
        }
    }

    pub fn marker(self) -> char {
        match self {
            Self::Collapsible => '#',
            Self::Image => '%',
            Self::Link => '$',
            Self::Tooltip => '?',
        }
    }
}

/// A bracket-tagged construct lifted out of the source before line parsing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpecialBlock {
    pub kind: BlockKind,
    pub body: String,
    /// `None` when no `(` followed the closing `]` on the same line.
    pub url: Option<String>,
}

impl SpecialBlock {
    /// Rebuilds the markup the block was extracted from.
    pub fn to_source(&self) -> String {
        match &self.url {
            Some(url) => format!("[{}{}]({})", self.kind.marker(), self.body, url),
            None => format!("[{}{}]", self.kind.marker(), self.body),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Placeholder(pub usize);

impl Placeholder {
    pub const PREFIX: &'static str = "__BLOCK_";
    pub const SUFFIX: &'static str = "__";
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", Self::PREFIX, self.0, Self::SUFFIX)
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BlockTable {
    blocks: BTreeMap<Placeholder, SpecialBlock>,
}

impl BlockTable {
    pub(crate) fn insert(&mut self, placeholder: Placeholder, block: SpecialBlock) {
        self.blocks.insert(placeholder, block);
    }

    pub fn get(&self, placeholder: Placeholder) -> Option<&SpecialBlock> {
        self.blocks.get(&placeholder)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Placeholder, &SpecialBlock)> {
        self.blocks.iter().map(|(placeholder, block)| (*placeholder, block))
    }
}

#[cfg(test)]
mod tests {
    use super::{BlockKind, Placeholder, SpecialBlock};

    #[test]
    fn placeholder_tokens_are_numbered() {
        assert_eq!(Placeholder(0).to_string(), "__BLOCK_0__");
        assert_eq!(Placeholder(12).to_string(), "__BLOCK_12__");
    }

    #[test]
    fn markers_round_trip() {
        for marker in ['#', '%', '$', '?'] {
            let kind = BlockKind::from_marker(marker).expect("known marker");
            assert_eq!(kind.marker(), marker);
        }
        assert_eq!(BlockKind::from_marker('!'), None);
    }

    #[test]
    fn source_reconstruction_keeps_missing_url_absent() {
        let block = SpecialBlock {
            kind: BlockKind::Link,
            body: "label".to_string(),
            url: None,
        };
        assert_eq!(block.to_source(), "[$label]");

        let block = SpecialBlock {
            url: Some("a (b)".to_string()),
            ..block
        };
        assert_eq!(block.to_source(), "[$label](a (b))");
    }
}
