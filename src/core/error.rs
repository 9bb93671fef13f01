use thiserror::Error;

/// Failures of a single poll: fetching, validating and parsing the API answer.
///
/// None of these are fatal. The poller turns them into a chat message and
/// tries again after the retry period.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("Ошибка при запросе к API-сервису: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Код запроса не равен 200. Код запроса {0}")]
    UnexpectedStatus(u16),

    #[error("Ответ API не является корректным JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error("Ответ API не содержит ни одной работы")]
    EmptyResult,

    #[error("Отсутствует значение \"{0}\"")]
    MissingField(&'static str),

    #[error("Неизвестный статус: {0}")]
    UnknownStatus(String),
}

impl PollError {
    /// Short machine-friendly name of the failure, used in logs and JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            PollError::Network(_) => "network",
            PollError::UnexpectedStatus(_) => "unexpected_status",
            PollError::Decode(_) => "decode",
            PollError::Shape(_) => "shape",
            PollError::EmptyResult => "empty_result",
            PollError::MissingField(_) => "missing_field",
            PollError::UnknownStatus(_) => "unknown_status",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("Ответ API по структуре данных не является словарём")]
    NotAnObject,

    #[error("Ответ API по ключу \"homeworks\" не является списком")]
    HomeworksNotAList,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Отсутствует обязательная переменная окружения: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

/// A chat message that could not be delivered. Logged, never propagated past
/// the poller.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("не удалось связаться с Telegram: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Telegram отклонил сообщение ({status}): {description}")]
    Rejected { status: u16, description: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_text() {
        let err = PollError::UnknownStatus("unknown_x".to_string());
        assert_eq!(err.to_string(), "Неизвестный статус: unknown_x");
        assert_eq!(err.kind(), "unknown_status");
    }

    #[test]
    fn test_shape_error_text() {
        let err: PollError = ShapeError::HomeworksNotAList.into();
        assert_eq!(
            err.to_string(),
            "Ответ API по ключу \"homeworks\" не является списком"
        );
    }

    #[test]
    fn test_missing_config_lists_all_names() {
        let err = ConfigError::Missing(vec!["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"]);
        assert_eq!(
            err.to_string(),
            "Отсутствует обязательная переменная окружения: PRACTICUM_TOKEN, TELEGRAM_CHAT_ID"
        );
    }
}
