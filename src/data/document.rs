//! Registry of the interactive tables on one report page
//!
//! Tables are registered first and bound on demand. Binding moves a table
//! into its [`TableController`]; binding the same identifier again hands back
//! the existing controller untouched.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::data::datatable::{Table, TableId};
use crate::data::table_controller::{ControllerOptions, TableController};
use crate::error::TableError;

const GENERATED_ID_PREFIX: &str = "table-";
const GENERATED_ID_LEN: usize = 9;

#[derive(Debug, Default)]
pub struct Document {
    unbound: HashMap<TableId, Table>,
    controllers: HashMap<TableId, TableController>,
    options: ControllerOptions,
    generated_ids: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Controllers created by `bind_table` use these options
    pub fn with_options(options: ControllerOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        let id = TableId::from(id);
        self.unbound.contains_key(&id) || self.controllers.contains_key(&id)
    }

    pub fn is_bound(&self, id: &str) -> bool {
        self.controllers.contains_key(&TableId::from(id))
    }

    pub fn table_count(&self) -> usize {
        self.unbound.len() + self.controllers.len()
    }

    /// Identifiers of every registered table, sorted
    pub fn table_ids(&self) -> Vec<TableId> {
        let mut ids: Vec<TableId> = self
            .unbound
            .keys()
            .chain(self.controllers.keys())
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    /// Register a table; identifiers must be unique within the document
    pub fn insert_table(&mut self, table: Table) -> Result<TableId, TableError> {
        let id = table.id().clone();
        if self.contains(id.as_str()) {
            return Err(TableError::DuplicateTable(id.to_string()));
        }
        debug!("Registered table {} ({} rows)", id, table.row_count());
        self.unbound.insert(id.clone(), table);
        Ok(id)
    }

    /// Register a table that arrived without an identifier of its own
    pub fn insert_anonymous(&mut self, mut table: Table) -> Result<TableId, TableError> {
        table.set_id(self.next_table_id());
        self.insert_table(table)
    }

    /// Generate a fresh `table-xxxxxxxxx` identifier not used in this document
    pub fn next_table_id(&mut self) -> TableId {
        loop {
            self.generated_ids += 1;
            let candidate = TableId::new(format!(
                "{}{}",
                GENERATED_ID_PREFIX,
                to_base36(self.generated_ids, GENERATED_ID_LEN)
            ));
            if !self.contains(candidate.as_str()) {
                return candidate;
            }
        }
    }

    /// Bind the table `id` for interaction
    ///
    /// Rebinding is a no-op that returns the existing controller. An unknown
    /// identifier fails with [`TableError::NotFound`] and binds nothing.
    pub fn bind_table(&mut self, id: &str) -> Result<&mut TableController, TableError> {
        let key = TableId::from(id);

        if !self.controllers.contains_key(&key) {
            let table = self
                .unbound
                .remove(&key)
                .ok_or_else(|| TableError::NotFound(id.to_string()))?;
            info!("Bound table {} for interaction", key);
            self.controllers.insert(
                key.clone(),
                TableController::with_options(table, self.options.clone()),
            );
        }

        self.controllers
            .get_mut(&key)
            .ok_or_else(|| TableError::NotFound(id.to_string()))
    }

    pub fn controller(&self, id: &str) -> Option<&TableController> {
        self.controllers.get(&TableId::from(id))
    }
}

fn to_base36(mut value: u64, width: usize) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut out = vec![b'0'; width];
    for slot in out.iter_mut().rev() {
        *slot = DIGITS[(value % 36) as usize];
        value /= 36;
    }
    String::from_utf8_lossy(&out).into_owned()
}
