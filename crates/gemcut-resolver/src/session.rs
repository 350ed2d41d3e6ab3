//! Runtime gem selection over a resolved build.
//!
//! A [`Session`] loads gems one at a time from the set a build made
//! available, pulling in dependencies first, and can be locked or sealed to
//! refuse further changes.

use gemcut_core::gem::GemTable;
use gemcut_core::SELF_GEM;
use gemcut_util::errors::GemcutError;

use crate::bitmap::Bitmap;

/// Whether a session still accepts requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionStatus {
    Normal,
    /// No more loading; queries still answered.
    Locked,
    /// Everything refused.
    Sealed,
}

/// Loaded-gem state for one runtime instance.
#[derive(Debug, Clone)]
pub struct Session<'t> {
    table: &'t GemTable,
    available: Bitmap,
    loaded: Bitmap,
    order: Vec<usize>,
    status: SessionStatus,
}

impl<'t> Session<'t> {
    /// Start with only the selector gem loaded, if the table has one.
    /// `available` is usually a build's pass bitmap.
    pub fn new(table: &'t GemTable, available: Bitmap) -> Self {
        let mut loaded = Bitmap::zeroed(table.len());
        let mut order = Vec::new();
        if let Some(idx) = table.lookup(SELF_GEM) {
            loaded.insert(idx);
            order.push(idx);
        }
        Self {
            table,
            loaded,
            available,
            order,
            status: SessionStatus::Normal,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Load `name` and its dependencies.
    ///
    /// Returns `Ok(false)` if it was already loaded.
    pub fn require(&mut self, name: &str) -> Result<bool, GemcutError> {
        if self.status != SessionStatus::Normal {
            return Err(GemcutError::Sealed);
        }
        let Some(idx) = self.table.lookup(name) else {
            return Err(GemcutError::Load {
                name: name.to_string(),
            });
        };
        if self.loaded.contains(idx) {
            return Ok(false);
        }
        if !self.available.contains(idx) {
            return Err(GemcutError::Load {
                name: name.to_string(),
            });
        }
        self.load_with_deps(idx);
        Ok(true)
    }

    /// Depth-first, dependencies before dependents. A gem already on the
    /// stack is not entered twice, so cycles load each member once.
    fn load_with_deps(&mut self, root: usize) {
        let table = self.table;
        let mut entered = vec![false; table.len()];
        entered[root] = true;
        let mut stack = vec![(root, 0usize)];

        while let Some(top) = stack.last_mut() {
            let (idx, next) = *top;
            let deps = table.dependencies_of(idx);
            if next < deps.len() {
                top.1 += 1;
                let dep = deps[next];
                if !self.loaded.contains(dep) && !entered[dep] {
                    entered[dep] = true;
                    stack.push((dep, 0));
                }
            } else {
                stack.pop();
                self.loaded.insert(idx);
                self.order.push(idx);
                tracing::debug!(gem = table.name(idx), "loaded gem");
            }
        }
    }

    fn check_sealed(&self) -> Result<(), GemcutError> {
        if self.status == SessionStatus::Sealed {
            Err(GemcutError::Sealed)
        } else {
            Ok(())
        }
    }

    /// Names of loaded gems in table order.
    pub fn loaded_features(&self) -> Result<Vec<&'t str>, GemcutError> {
        self.check_sealed()?;
        let table = self.table;
        Ok(self.loaded.iter().map(|i| table.name(i)).collect())
    }

    pub fn loaded_count(&self) -> Result<usize, GemcutError> {
        self.check_sealed()?;
        Ok(self.loaded.count())
    }

    pub fn is_loaded(&self, name: &str) -> Result<bool, GemcutError> {
        self.check_sealed()?;
        Ok(self
            .table
            .lookup(name)
            .is_some_and(|idx| self.loaded.contains(idx)))
    }

    /// Names of gems this session may load, in table order.
    pub fn loadable_features(&self) -> Result<Vec<&'t str>, GemcutError> {
        self.check_sealed()?;
        let table = self.table;
        Ok(self.available.iter().map(|i| table.name(i)).collect())
    }

    pub fn loadable_count(&self) -> Result<usize, GemcutError> {
        self.check_sealed()?;
        Ok(self.available.count())
    }

    pub fn is_loadable(&self, name: &str) -> Result<bool, GemcutError> {
        self.check_sealed()?;
        Ok(self
            .table
            .lookup(name)
            .is_some_and(|idx| self.available.contains(idx)))
    }

    /// Gems in the order they were loaded.
    pub fn init_order(&self) -> Vec<&'t str> {
        let table = self.table;
        self.order.iter().map(|&i| table.name(i)).collect()
    }

    /// Stop accepting `require`. Has no effect on a sealed session.
    pub fn lock(&mut self) {
        if self.status == SessionStatus::Normal {
            self.status = SessionStatus::Locked;
        }
    }

    pub fn seal(&mut self) {
        self.status = SessionStatus::Sealed;
    }

    /// Load every gem `other` has loaded that this session has not, by name
    /// in `other`'s table order.
    pub fn imitate(&mut self, other: &Session<'_>) -> Result<(), GemcutError> {
        if self.status != SessionStatus::Normal {
            return Err(GemcutError::Sealed);
        }
        for idx in other.loaded.iter() {
            let name = other.table.name(idx);
            if !self.is_loaded(name)? {
                self.require(name)?;
            }
        }
        Ok(())
    }
}
