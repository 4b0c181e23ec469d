use actix_web::{HttpResponse, http::StatusCode};
use std::fmt;

#[derive(Debug, Clone)]
pub enum EtalaseError {
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Serialization(String),
    DateParse(String),
}

impl EtalaseError {
    /// Stable machine-checkable error code
    pub fn code(&self) -> &'static str {
        match self {
            EtalaseError::DatabaseConnection(_) => "E001",
            EtalaseError::DatabaseOperation(_) => "E002",
            EtalaseError::FileOperation(_) => "E003",
            EtalaseError::Validation(_) => "E004",
            EtalaseError::NotFound(_) => "E005",
            EtalaseError::Conflict(_) => "E006",
            EtalaseError::Unauthorized(_) => "E007",
            EtalaseError::Serialization(_) => "E008",
            EtalaseError::DateParse(_) => "E009",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            EtalaseError::DatabaseConnection(_) => "Database Connection Error",
            EtalaseError::DatabaseOperation(_) => "Database Operation Error",
            EtalaseError::FileOperation(_) => "File Operation Error",
            EtalaseError::Validation(_) => "Validation Error",
            EtalaseError::NotFound(_) => "Resource Not Found",
            EtalaseError::Conflict(_) => "Duplicate Resource",
            EtalaseError::Unauthorized(_) => "Unauthorized",
            EtalaseError::Serialization(_) => "Serialization Error",
            EtalaseError::DateParse(_) => "Date Parse Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            EtalaseError::DatabaseConnection(msg)
            | EtalaseError::DatabaseOperation(msg)
            | EtalaseError::FileOperation(msg)
            | EtalaseError::Validation(msg)
            | EtalaseError::NotFound(msg)
            | EtalaseError::Conflict(msg)
            | EtalaseError::Unauthorized(msg)
            | EtalaseError::Serialization(msg)
            | EtalaseError::DateParse(msg) => msg,
        }
    }
}

impl fmt::Display for EtalaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for EtalaseError {}

// 便捷的构造函数
impl EtalaseError {
    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        EtalaseError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        EtalaseError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        EtalaseError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        EtalaseError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        EtalaseError::NotFound(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        EtalaseError::Conflict(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        EtalaseError::Unauthorized(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        EtalaseError::Serialization(msg.into())
    }

    pub fn date_parse<T: Into<String>>(msg: T) -> Self {
        EtalaseError::DateParse(msg.into())
    }
}

impl From<sea_orm::DbErr> for EtalaseError {
    fn from(err: sea_orm::DbErr) -> Self {
        EtalaseError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for EtalaseError {
    fn from(err: std::io::Error) -> Self {
        EtalaseError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for EtalaseError {
    fn from(err: serde_json::Error) -> Self {
        EtalaseError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for EtalaseError {
    fn from(err: chrono::ParseError) -> Self {
        EtalaseError::DateParse(err.to_string())
    }
}

impl actix_web::ResponseError for EtalaseError {
    fn status_code(&self) -> StatusCode {
        match self {
            EtalaseError::Validation(_) | EtalaseError::DateParse(_) => StatusCode::BAD_REQUEST,
            EtalaseError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            EtalaseError::NotFound(_) => StatusCode::NOT_FOUND,
            EtalaseError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Internal detail stays in the logs; the wire gets code + short message
        HttpResponse::build(self.status_code())
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(serde_json::json!({
                "code": self.code(),
                "msg": self.message(),
            }))
    }
}

pub type Result<T> = std::result::Result<T, EtalaseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            EtalaseError::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            EtalaseError::not_found("missing").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            EtalaseError::conflict("dup").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            EtalaseError::database_operation("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(EtalaseError::validation("x").code(), "E004");
        assert_eq!(EtalaseError::date_parse("x").code(), "E009");
    }

    #[test]
    fn test_from_chrono_parse_error() {
        let err = chrono::NaiveDate::parse_from_str("nope", "%Y-%m-%d").unwrap_err();
        let e: EtalaseError = err.into();
        assert!(matches!(e, EtalaseError::DateParse(_)));
    }
}
