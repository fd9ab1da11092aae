use std::collections::BTreeMap;

use serde::Serialize;

/// Branch targets discovered while decoding, keyed by byte position.
/// Positions may fall outside the input buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    by_position: BTreeMap<i64, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    pub position: i64,
    pub name: String,
}

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a label at `position` and returns its name. Recording the
    /// same position again is a no-op.
    pub fn record(&mut self, position: i64) -> &str {
        self.by_position
            .entry(position)
            .or_insert_with(|| label_name(position))
    }

    pub fn get(&self, position: i64) -> Option<&str> {
        self.by_position.get(&position).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_position.is_empty()
    }

    /// Labels in ascending position order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> + '_ {
        self.by_position.iter().map(|(p, n)| (*p, n.as_str()))
    }

    pub fn to_vec(&self) -> Vec<Label> {
        self.iter()
            .map(|(position, name)| Label { position, name: name.to_string() })
            .collect()
    }
}

pub fn label_name(position: i64) -> String {
    if position < 0 {
        format!("label_neg_{}", position.unsigned_abs())
    } else {
        format!("label_{position}")
    }
}

/// Relative branches count from the byte after the displacement.
pub fn branch_target(next: usize, displacement: i16) -> i64 {
    next as i64 + i64::from(displacement)
}
