use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(HomeworkStatus::Approved),
            "reviewing" => Some(HomeworkStatus::Reviewing),
            "rejected" => Some(HomeworkStatus::Rejected),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// The most recent submission as reported by the review API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Homework {
    pub name: String,
    pub status: HomeworkStatus,
}

impl Homework {
    pub fn status_message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.name,
            self.status.verdict()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        for status in [
            HomeworkStatus::Approved,
            HomeworkStatus::Reviewing,
            HomeworkStatus::Rejected,
        ] {
            assert_eq!(HomeworkStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(HomeworkStatus::from_code("Approved"), None);
        assert_eq!(HomeworkStatus::from_code(""), None);
    }

    #[test]
    fn test_rejected_message() {
        let homework = Homework {
            name: "proj2".to_string(),
            status: HomeworkStatus::Rejected,
        };
        assert_eq!(
            homework.status_message(),
            "Изменился статус проверки работы \"proj2\". Работа проверена: у ревьюера есть замечания."
        );
    }

    #[test]
    fn test_status_serializes_as_code() {
        let json = serde_json::to_string(&HomeworkStatus::Reviewing).unwrap();
        assert_eq!(json, "\"reviewing\"");
    }
}
