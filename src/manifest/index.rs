//! Lookup of prior campaign blocks by directory name.
//!
//! Each block is registered under up to three aliases: its folder key
//! (explicit `folder`, else `title`), the slug of that key, and the slug of
//! its title. Blocks are registered in manifest order and a later block
//! replaces an earlier one on an alias collision.

use super::CampaignBlock;
use crate::utils::slugify;
use std::collections::HashMap;

/// Alias table from identity strings to campaign blocks.
#[derive(Debug, Clone, Default)]
pub struct CampaignIndex<'a> {
    /// Registered blocks, in manifest order
    blocks: Vec<&'a CampaignBlock>,
    /// Alias -> position in `blocks`
    by_alias: HashMap<String, usize>,
}

impl<'a> CampaignIndex<'a> {
    /// Builds the index over `blocks`, registering them in order.
    #[must_use]
    pub fn build(blocks: &'a [CampaignBlock]) -> Self {
        let mut index = Self::default();
        for block in blocks {
            index.register(block);
        }
        index
    }

    /// Registers `block` under all of its aliases, replacing any earlier
    /// block that held the same alias.
    pub fn register(&mut self, block: &'a CampaignBlock) {
        let position = self.blocks.len();
        self.blocks.push(block);

        for alias in Self::aliases(block) {
            self.by_alias.insert(alias, position);
        }
    }

    /// The aliases a block is reachable under.
    fn aliases(block: &CampaignBlock) -> [String; 3] {
        let key = block.folder_key();
        [key.to_string(), slugify(key), slugify(&block.title)]
    }

    /// Finds the prior block for an on-disk directory name.
    ///
    /// The exact name is tried first; only if it has no entry is the slug of
    /// the name tried.
    #[must_use]
    pub fn lookup(&self, folder: &str) -> Option<&'a CampaignBlock> {
        self.by_alias
            .get(folder)
            .or_else(|| self.by_alias.get(&slugify(folder)))
            .map(|&position| self.blocks[position])
    }

    /// Number of registered blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True if no blocks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
