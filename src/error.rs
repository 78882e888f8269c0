// src/error.rs
use thiserror::Error;

/// Ошибки загрузки и проверки конфигурации генератора.
///
/// Сама генерация этажа ошибок не возвращает: все фазы деградируют
/// (меньше комнат, нет коридоров, нет пола), но не падают.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("не удалось прочитать конфигурацию: {0}")]
    Io(#[from] std::io::Error),

    #[error("некорректный TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("недопустимый параметр `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
