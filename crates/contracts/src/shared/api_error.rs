use serde::{Deserialize, Serialize};

/// Тело ошибки, которое возвращает REST API (`{"message": "..."}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}
