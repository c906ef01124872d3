//! Constant environment for one propagation pass.
//!
//! Two flat maps keyed by identifier name, with no block or function
//! scoping:
//! - scalars: name -> constant literal
//! - arrays: name -> table of index key -> constant literal
//!
//! Array tables live in an arena and names bind to a [`TableId`], so two
//! names holding the same array (`b = a`) share one table and a store
//! through either is seen by both. Missing names and keys are never an
//! error.

use rustc_hash::FxHashMap;
use swc_ecma_ast::Lit;

pub type IndexMap = FxHashMap<String, Lit>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

#[derive(Debug, Default)]
pub struct ConstEnv {
    scalars: FxHashMap<String, Lit>,
    arrays: FxHashMap<String, TableId>,
    tables: Vec<IndexMap>,
}

impl ConstEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_scalar(&mut self, name: &str, lit: Lit) {
        self.scalars.insert(name.to_string(), lit);
    }

    /// Returns whether an entry was removed.
    pub fn drop_scalar(&mut self, name: &str) -> bool {
        self.scalars.remove(name).is_some()
    }

    pub fn lookup_scalar(&self, name: &str) -> Option<&Lit> {
        self.scalars.get(name)
    }

    /// Installs a fresh table for `name`, replacing whatever it was bound to.
    /// Other names aliasing the previous table keep it.
    pub fn record_array(&mut self, name: &str, entries: IndexMap) {
        let id = TableId(self.tables.len());
        self.tables.push(entries);
        self.arrays.insert(name.to_string(), id);
    }

    pub fn record_array_entry(&mut self, name: &str, index: &str, lit: Lit) -> bool {
        match self.table_mut(name) {
            Some(table) => {
                table.insert(index.to_string(), lit);
                true
            }
            None => false,
        }
    }

    /// Returns whether an entry was removed.
    pub fn drop_array_entry(&mut self, name: &str, index: &str) -> bool {
        self.table_mut(name)
            .map(|table| table.remove(index).is_some())
            .unwrap_or(false)
    }

    pub fn lookup_array_entry(&self, name: &str, index: &str) -> Option<&Lit> {
        let id = self.arrays.get(name)?;
        self.tables.get(id.0)?.get(index)
    }

    /// Forgets every slot of the table `name` is bound to.
    pub fn clear_array(&mut self, name: &str) -> bool {
        match self.table_mut(name) {
            Some(table) if !table.is_empty() => {
                table.clear();
                true
            }
            _ => false,
        }
    }

    /// Binds `target` to the table `source` is bound to. Returns false (and
    /// leaves `target` alone) when `source` is not a tracked array.
    pub fn alias_array(&mut self, target: &str, source: &str) -> bool {
        match self.arrays.get(source).copied() {
            Some(id) => {
                self.arrays.insert(target.to_string(), id);
                true
            }
            None => false,
        }
    }

    /// `name` no longer refers to its array; the table stays alive for
    /// any aliases.
    pub fn unbind_array(&mut self, name: &str) -> bool {
        self.arrays.remove(name).is_some()
    }

    #[cfg(test)]
    fn is_array(&self, name: &str) -> bool {
        self.arrays.contains_key(name)
    }

    fn table_mut(&mut self, name: &str) -> Option<&mut IndexMap> {
        let id = *self.arrays.get(name)?;
        self.tables.get_mut(id.0)
    }
}
