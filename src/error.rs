//! # 统一错误处理模块
//!
//! 定义 TAVI 的所有错误类型，使用 `thiserror` 派生。
//!
//! - `GeometryError`: 晶格/倒易空间几何错误，始终返回给调用方
//! - `TaviError`: 顶层错误，包装 I/O、JSON、CSV 与几何错误
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// 晶格几何错误
///
/// 表示无效的实验配置，不允许静默回退到默认值。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Lattice length {name} must be positive and finite (got {value})")]
    InvalidLength { name: &'static str, value: f64 },

    #[error("Lattice angle {name} must lie strictly between 0° and 180° (got {value})")]
    InvalidAngle { name: &'static str, value: f64 },

    #[error("Degenerate unit cell: volume is zero or negative (V = {volume:e})")]
    DegenerateCell { volume: f64 },

    #[error("Reciprocal matrix is ill-conditioned (condition number: {condition:.2e})")]
    IllConditioned { condition: f64 },

    #[error("Reciprocal matrix is singular; check lattice parameters")]
    Singular,
}

/// TAVI 统一错误类型
#[derive(Error, Debug)]
pub enum TaviError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // 几何错误
    // ─────────────────────────────────────────────────────────────
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Space group not found: {0}")]
    SpaceGroupNotFound(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, TaviError>;
