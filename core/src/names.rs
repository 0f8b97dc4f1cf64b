use std::collections::hash_set;
use std::collections::HashSet;

/// Lowercased names of the tables and views visible to one connection.
///
/// Built fresh for every lookup and never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableNameSet {
    names: HashSet<String>,
}

impl TableNameSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str) -> bool {
        self.names.insert(name.to_lowercase())
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, String> {
        self.names.iter()
    }

    pub fn sorted(&self) -> Vec<&str> {
        let mut v: Vec<&str> = self.names.iter().map(String::as_str).collect();
        v.sort_unstable();
        v
    }
}

impl<'a> Extend<&'a str> for TableNameSet {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name);
        }
    }
}

impl<'a> FromIterator<&'a str> for TableNameSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = TableNameSet::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for TableNameSet {
    type Item = String;
    type IntoIter = hash_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.into_iter()
    }
}
