use serde::{Deserialize, Serialize};

/// Write-off type reference entry. Global, not city-scoped; loaded once per
/// run from `losstype.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LossType {
    pub id: String,
    pub name: String,
}
