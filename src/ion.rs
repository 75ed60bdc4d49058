// src/ion.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// An `(element, oxidation_state)` pair identifying an ion species.
///
/// The sentinel `Ion::lone_pair()` (element `"LP"`, oxidation state -2)
/// designates a synthesized lone-pair dummy site (see `lone_pair.rs`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ion {
    pub element: String,
    pub oxidation_state: i32,
}

impl Ion {
    pub fn new(element: impl Into<String>, oxidation_state: i32) -> Self {
        Self {
            element: element.into(),
            oxidation_state,
        }
    }

    pub fn lone_pair() -> Self {
        Self::new("LP", -2)
    }

    pub fn is_lone_pair(&self) -> bool {
        self.element == "LP"
    }
}

impl PartialEq for Ion {
    fn eq(&self, other: &Self) -> bool {
        self.element == other.element && self.oxidation_state == other.oxidation_state
    }
}
impl Eq for Ion {}

impl std::hash::Hash for Ion {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.element.hash(state);
        self.oxidation_state.hash(state);
    }
}

impl fmt::Display for Ion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:+}", self.element, self.oxidation_state)
    }
}

/// Key format used by the bond-valence parameter cache: `"ion1.ion2"`.
pub fn pair_key(a: &Ion, b: &Ion) -> String {
    format!("{a}.{b}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_original_dict_key_style() {
        let pb = Ion::new("Pb", 2);
        let f = Ion::new("F", -1);
        assert_eq!(pair_key(&pb, &f), "Pb+2.F-1");
    }

    #[test]
    fn equality_is_over_both_fields() {
        assert_eq!(Ion::new("Fe", 2), Ion::new("Fe", 2));
        assert_ne!(Ion::new("Fe", 2), Ion::new("Fe", 3));
        assert_ne!(Ion::new("Fe", 2), Ion::new("Co", 2));
    }

    #[test]
    fn lone_pair_sentinel() {
        let lp = Ion::lone_pair();
        assert!(lp.is_lone_pair());
        assert_eq!(lp.oxidation_state, -2);
    }
}
