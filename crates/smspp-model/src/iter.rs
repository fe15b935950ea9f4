//! Depth-first traversal over a block tree.

use crate::block::Block;

/// Pre-order iterator over a block and its descendants.
///
/// Yields `(path, block)` pairs where the starting block has the empty
/// path and descendants get slash-separated paths such as
/// `"Block_0/UnitBlock_1"`. Siblings appear in insertion order.
pub struct BlockIter<'a> {
    stack: Vec<(String, &'a Block)>,
}

impl<'a> BlockIter<'a> {
    pub(crate) fn new(root: &'a Block) -> Self {
        Self {
            stack: vec![(String::new(), root)],
        }
    }
}

impl<'a> Iterator for BlockIter<'a> {
    type Item = (String, &'a Block);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, block) = self.stack.pop()?;
        // Push children reversed so the first-inserted child pops first.
        for (name, child) in block.blocks().iter().rev() {
            let child_path = if path.is_empty() {
                name.clone()
            } else {
                format!("{path}/{name}")
            };
            self.stack.push((child_path, child));
        }
        Some((path, block))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::DuplicatePolicy;

    #[test]
    fn test_iter_preorder_paths() {
        let mut root = Block::new();
        root.add_child("UCBlock", "Block_0", Vec::new(), DuplicatePolicy::Reject)
            .unwrap();
        root.block_mut("Block_0")
            .unwrap()
            .add_child(
                "ThermalUnitBlock",
                "UnitBlock_0",
                Vec::new(),
                DuplicatePolicy::Reject,
            )
            .unwrap();
        root.block_mut("Block_0")
            .unwrap()
            .add_child(
                "ThermalUnitBlock",
                "UnitBlock_1",
                Vec::new(),
                DuplicatePolicy::Reject,
            )
            .unwrap();

        let paths: Vec<String> = root.iter().map(|(path, _)| path).collect();
        assert_eq!(
            paths,
            vec![
                "".to_string(),
                "Block_0".to_string(),
                "Block_0/UnitBlock_0".to_string(),
                "Block_0/UnitBlock_1".to_string(),
            ]
        );
    }

    #[test]
    fn test_iter_single_block() {
        let root = Block::new();
        let all: Vec<(String, &Block)> = root.iter().collect();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].0, "");
    }
}
