use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStatus {
    New,
    Active,
    Rug,
}

impl TokenStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TokenStatus::New => "NEW",
            TokenStatus::Active => "ACTIVE",
            TokenStatus::Rug => "RUG",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub contract_address: String,
    pub creator: String,
    pub initial_supply: String,
    pub deployed_at: DateTime<Utc>,
    pub status: TokenStatus,
}

impl TokenInfo {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        name: String,
        symbol: String,
        contract_address: String,
        creator: String,
        initial_supply: String,
        deployed_at: DateTime<Utc>,
        status: TokenStatus,
    ) -> Self {
        Self {
            id,
            name,
            symbol,
            contract_address,
            creator,
            initial_supply,
            deployed_at,
            status,
        }
    }

    pub fn log_creation(&self) {
        info!(
            id = %self.id,
            name = %self.name,
            symbol = %self.symbol,
            contract = %self.contract_address,
            creator = %self.creator,
            supply = %self.initial_supply,
            status = self.status.label(),
            "🆕 new token deployed"
        );
    }
}
