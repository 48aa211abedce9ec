use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::DistTable;

/// Slot for a lazily built [`DistTable`].
///
/// Cloning shares an already built table. A fresh slot is installed on every
/// mutation of the owning expression, so a table handed out once is never
/// changed afterwards. Concurrent first use of the same slot builds the table
/// only once; the other callers block until it is ready.
#[derive(Debug, Clone, Default)]
pub(crate) struct TableCache {
    cell: OnceCell<Arc<DistTable>>,
}

impl TableCache {
    pub(crate) fn get_or_build<F: FnOnce() -> DistTable>(&self, build: F) -> Arc<DistTable> {
        Arc::clone(self.cell.get_or_init(|| Arc::new(build())))
    }

    #[cfg(test)]
    pub(crate) fn is_built(&self) -> bool {
        self.cell.get().is_some()
    }
}
