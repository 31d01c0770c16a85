//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("非法的边权重: {0}")]
    InvalidWeight(String),

    #[error("边权重缺失: {0}")]
    MissingWeight(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidWeight("a -> b: -1".to_string());
        assert!(err.to_string().contains("非法的边权重"));

        let err = Error::MissingWeight("a -> b".to_string());
        assert!(err.to_string().contains("边权重缺失"));
    }
}
