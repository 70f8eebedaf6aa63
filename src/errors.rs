use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenIconError {
    #[error("Invalid network id: {0}")]
    InvalidNetworkId(String),

    #[error("Invalid token address: {0}")]
    InvalidAddress(String),

    #[error("Token list provider error: {0}")]
    Provider(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    TomlSerialization(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Custom error: {0}")]
    Custom(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),
}

impl From<&str> for TokenIconError {
    fn from(msg: &str) -> Self {
        Self::Custom(msg.to_string())
    }
}

impl From<String> for TokenIconError {
    fn from(msg: String) -> Self {
        Self::Custom(msg)
    }
}

pub type Result<T> = std::result::Result<T, TokenIconError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_conversions_map_to_custom() {
        let err: TokenIconError = "boom".into();
        assert!(matches!(err, TokenIconError::Custom(ref m) if m == "boom"));

        let err: TokenIconError = String::from("bang").into();
        assert_eq!(err.to_string(), "Custom error: bang");
    }

    #[test]
    fn test_io_error_converts() {
        fn open_missing() -> Result<String> {
            Ok(std::fs::read_to_string("/definitely/not/here.toml")?)
        }

        assert!(matches!(open_missing(), Err(TokenIconError::Io(_))));
    }
}
