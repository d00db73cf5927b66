use serde::{Deserialize, Serialize};

/// One shop of the chain.
///
/// Identity is city-scoped: the same id may denote different shops in
/// different cities, so a `Shop` is only ever joined against tables loaded
/// for the same city. Ids are opaque strings as the feed spells them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub id: String,
    pub name: String,
}
