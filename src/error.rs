use thiserror::Error;

/// 库内参数校验错误。所有检查都在计算开始前同步完成。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// k = 0、间隔 = 0、分段不足等非法参数
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// 模式串中出现 {A,C,G,T,N} 之外的字符
    #[error("invalid base 0x{base:02x} at pattern position {pos}")]
    InvalidBase { pos: usize, base: u8 },
}

pub type Result<T> = std::result::Result<T, Error>;
