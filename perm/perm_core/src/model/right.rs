//! Rights.

use serde::{Deserialize, Serialize};

use crate::name::RightName;

/// A named permission atom held by a role.
///
/// A right is immutable once created and is identified by its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Right {
    name: RightName,
}

impl Right {
    /// Create a new right.
    pub fn new(name: impl Into<RightName>) -> Self {
        Self { name: name.into() }
    }

    /// The name of this right.
    pub fn name(&self) -> &RightName {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_name() {
        let right = Right::new("use");
        assert_eq!(right.name().as_str(), "use");
        assert_eq!(right, Right::new(RightName::from("use")));
    }
}
