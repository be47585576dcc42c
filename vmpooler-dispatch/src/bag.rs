use anyhow::{anyhow, Result};
use indexmap::IndexMap;

use crate::spec::ArgValue;

/// Resolved argument values for one invocation, keyed by argument name in
/// declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentBag {
    values: IndexMap<String, ArgValue>,
}

impl ArgumentBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: ArgValue) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Text value of a declared argument.
    pub fn text(&self, name: &str) -> Result<&str> {
        self.supplied(name)?
            .as_text()
            .ok_or_else(|| anyhow!("Argument '{name}' is not text"))
    }

    /// Integer value of a declared argument.
    pub fn integer(&self, name: &str) -> Result<i64> {
        self.supplied(name)?
            .as_integer()
            .ok_or_else(|| anyhow!("Argument '{name}' is not an integer"))
    }

    fn supplied(&self, name: &str) -> Result<&ArgValue> {
        self.values
            .get(name)
            .ok_or_else(|| anyhow!("Argument '{name}' was not supplied"))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, ArgValue)> for ArgumentBag {
    fn from_iter<I: IntoIterator<Item = (K, ArgValue)>>(iter: I) -> Self {
        let mut bag = ArgumentBag::new();
        for (name, value) in iter {
            bag.insert(name, value);
        }
        bag
    }
}
