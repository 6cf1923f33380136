/*!
 * Error types for the traduki application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur while reading from or writing to the history database
#[derive(Error, Debug)]
pub enum StorageError {
    /// Error opening the database file or initializing its schema
    #[error("Failed to open history database: {0}")]
    OpenFailed(String),

    /// Error committing a transaction (quota, corruption, lock contention)
    #[error("History transaction failed: {0}")]
    TransactionFailed(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(error: rusqlite::Error) -> Self {
        Self::TransactionFailed(error.to_string())
    }
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The caller handed us nothing to translate
    #[error("Input text is empty")]
    EmptyInput,
}

/// Errors that can occur when retrieving an article for vocabulary extraction
#[derive(Error, Debug)]
pub enum FetchError {
    /// The URL could not be parsed
    #[error("Invalid article URL: {0}")]
    InvalidUrl(String),

    /// Transport-level failure
    #[error("Failed to fetch article: {0}")]
    RequestFailed(String),

    /// Non-2xx response from the reader endpoint
    #[error("Article fetch returned status {0}")]
    BadStatus(u16),
}

/// Errors that can occur during image text recognition
#[derive(Error, Debug)]
pub enum OcrError {
    /// The OCR engine binary is missing or could not be spawned
    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The engine ran but recognition failed for this image
    #[error("Recognition failed for {path}: {message}")]
    RecognitionFailed {
        /// Path of the image that failed
        path: String,
        /// Engine output or exit status
        message: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the history database
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error fetching an article
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Error recognizing text in an image
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
