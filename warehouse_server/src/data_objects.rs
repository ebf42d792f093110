use serde::{Deserialize, Serialize};

/// The body returned when a delivery has been recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStockMovementResponse {
    pub id: i64,
}

impl NewStockMovementResponse {
    pub fn location(&self) -> String {
        format!("/warehouse/{}", self.id)
    }
}
