//! Collection key table
//!
//! Every logical collection lives under one fixed string key in the flat
//! keyspace. The legacy store used the same key names, which is what makes
//! the first-run migration a straight copy.

/// A named logical collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Records,
    NotToDo,
    Success,
    Ideas,
    Inspiration,
    Dreams,
    Finance,
    Plans,
    MasteryGoals,
}

impl Collection {
    /// Every known collection, in keyspace order
    pub const ALL: [Collection; 9] = [
        Collection::Records,
        Collection::NotToDo,
        Collection::Success,
        Collection::Ideas,
        Collection::Inspiration,
        Collection::Dreams,
        Collection::Finance,
        Collection::Plans,
        Collection::MasteryGoals,
    ];

    /// The storage key this collection lives under
    pub const fn key(self) -> &'static str {
        match self {
            Collection::Records => "essence_records",
            Collection::NotToDo => "essence_not_to_do",
            Collection::Success => "essence_success",
            Collection::Ideas => "essence_ideas",
            Collection::Inspiration => "essence_inspiration",
            Collection::Dreams => "essence_dreams",
            Collection::Finance => "essence_finance_v2",
            Collection::Plans => "essence_plans",
            Collection::MasteryGoals => "essence_mastery_goals",
        }
    }

    /// Reverse lookup, used to filter snapshot keys on restore
    pub fn from_key(key: &str) -> Option<Collection> {
        Collection::ALL.into_iter().find(|c| c.key() == key)
    }
}

/// The four curated list kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    NotToDo,
    Success,
    Ideas,
    Inspiration,
}

impl ListKind {
    /// The collection backing this list
    pub const fn collection(self) -> Collection {
        match self {
            ListKind::NotToDo => Collection::NotToDo,
            ListKind::Success => Collection::Success,
            ListKind::Ideas => Collection::Ideas,
            ListKind::Inspiration => Collection::Inspiration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_distinct() {
        for a in Collection::ALL {
            for b in Collection::ALL {
                if a != b {
                    assert_ne!(a.key(), b.key());
                }
            }
        }
    }

    #[test]
    fn from_key_round_trips() {
        for c in Collection::ALL {
            assert_eq!(Collection::from_key(c.key()), Some(c));
        }
        assert_eq!(Collection::from_key("essence_unknown"), None);
    }
}
