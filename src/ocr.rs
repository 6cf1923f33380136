/*!
 * Image text recognition.
 *
 * The OCR engine is an external collaborator behind a narrow trait; the
 * default implementation shells out to the tesseract binary. Engine
 * internals are out of scope here - this module only maps languages, runs
 * the tool, and isolates per-image failures in the batch flow.
 */

use async_trait::async_trait;
use log::{debug, error};
use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::errors::{AppError, OcrError};
use crate::history::store::HistoryStore;
use crate::languages::to_tesseract_lang;
use crate::translation::service::TranslationService;

/// Fractional recognition progress
#[derive(Debug, Clone)]
pub struct OcrProgress {
    /// Stage label, e.g. "recognizing"
    pub status: String,
    /// Completed fraction in 0.0..=1.0
    pub progress: f32,
}

/// Text recognition engine
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognize the text in one image.
    ///
    /// Progress is reported through the callback as coarse fractional
    /// steps. The recognized text is returned trimmed.
    async fn recognize(
        &self,
        image: &Path,
        langs: &[String],
        on_progress: &(dyn Fn(OcrProgress) + Send + Sync),
    ) -> Result<String, OcrError>;
}

/// OCR engine backed by the tesseract command-line tool
pub struct TesseractCli {
    /// Binary name or path
    binary: PathBuf,
}

impl TesseractCli {
    /// Use the `tesseract` binary from PATH
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("tesseract"),
        }
    }

    /// Use a specific tesseract binary
    pub fn with_binary<P: AsRef<Path>>(binary: P) -> Self {
        Self {
            binary: binary.as_ref().to_path_buf(),
        }
    }

    /// Map app language codes to tesseract's `lang+lang` argument
    fn build_lang_arg(langs: &[String]) -> Result<String, OcrError> {
        if langs.is_empty() {
            return Ok("eng".to_string());
        }

        let mapped: Result<Vec<String>, OcrError> = langs
            .iter()
            .map(|code| {
                to_tesseract_lang(code).map_err(|e| OcrError::EngineUnavailable(e.to_string()))
            })
            .collect();

        Ok(mapped?.join("+"))
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OcrEngine for TesseractCli {
    async fn recognize(
        &self,
        image: &Path,
        langs: &[String],
        on_progress: &(dyn Fn(OcrProgress) + Send + Sync),
    ) -> Result<String, OcrError> {
        let lang_arg = Self::build_lang_arg(langs)?;

        on_progress(OcrProgress {
            status: "recognizing".to_string(),
            progress: 0.0,
        });

        debug!("Running {:?} on {:?} (langs: {})", self.binary, image, lang_arg);

        // "stdout" makes tesseract print the recognized text instead of
        // writing an output file
        let output = Command::new(&self.binary)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&lang_arg)
            .output()
            .await
            .map_err(|e| OcrError::EngineUnavailable(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::RecognitionFailed {
                path: image.display().to_string(),
                message: format!("exit {}: {}", output.status, stderr.trim()),
            });
        }

        on_progress(OcrProgress {
            status: "done".to_string(),
            progress: 1.0,
        });

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Outcome of one image in the batch flow
#[derive(Debug, Clone)]
pub struct ImageOutcome {
    /// The processed image
    pub path: PathBuf,
    /// Recognized text, if recognition succeeded
    pub recognized: Option<String>,
    /// History record id, if the translation was recorded
    pub record_id: Option<i64>,
    /// Error message, if this image failed at either stage
    pub error: Option<String>,
}

impl ImageOutcome {
    /// Whether this image made it all the way into the history
    pub fn succeeded(&self) -> bool {
        self.record_id.is_some()
    }
}

/// Recognize and translate a batch of images.
///
/// Each image proceeds independently: a recognition or translation failure
/// flags that image's outcome and the rest continue. A storage failure is
/// different - the history layer never swallows those, so it aborts the
/// whole run.
#[allow(clippy::too_many_arguments)]
pub async fn translate_images(
    engine: &dyn OcrEngine,
    service: &TranslationService,
    store: &HistoryStore,
    images: &[PathBuf],
    langs: &[String],
    from_lang: &str,
    to_lang: &str,
    on_progress: impl Fn(usize, usize),
) -> Result<Vec<ImageOutcome>, AppError> {
    let total = images.len();
    let mut outcomes = Vec::with_capacity(total);

    for (index, image) in images.iter().enumerate() {
        let recognized = engine
            .recognize(image, langs, &|p: OcrProgress| {
                debug!("{:?}: {} {:.0}%", image, p.status, p.progress * 100.0);
            })
            .await;

        let outcome = match recognized {
            Ok(text) if text.is_empty() => ImageOutcome {
                path: image.clone(),
                recognized: Some(text),
                record_id: None,
                error: Some("no text recognized".to_string()),
            },
            Ok(text) => match service.translate_and_record(store, &text, from_lang, to_lang).await
            {
                Ok((id, _)) => ImageOutcome {
                    path: image.clone(),
                    recognized: Some(text),
                    record_id: Some(id),
                    error: None,
                },
                // Storage failures abort the run; translation failures only
                // flag this image
                Err(AppError::Storage(e)) => return Err(AppError::Storage(e)),
                Err(e) => {
                    error!("Translation failed for {:?}: {}", image, e);
                    ImageOutcome {
                        path: image.clone(),
                        recognized: Some(text),
                        record_id: None,
                        error: Some(e.to_string()),
                    }
                }
            },
            Err(e) => {
                error!("Recognition failed for {:?}: {}", image, e);
                ImageOutcome {
                    path: image.clone(),
                    recognized: None,
                    record_id: None,
                    error: Some(e.to_string()),
                }
            }
        };

        outcomes.push(outcome);
        on_progress(index + 1, total);
    }

    Ok(outcomes)
}

/// Fixed-output engine for tests: maps image file names to canned results
pub struct FixedOcr {
    /// Text returned for every image
    text: String,
    /// Whether recognition should fail
    failing: bool,
}

impl FixedOcr {
    /// Engine that recognizes the same text in every image
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            failing: false,
        }
    }

    /// Engine that fails on every image
    pub fn failing() -> Self {
        Self {
            text: String::new(),
            failing: true,
        }
    }
}

#[async_trait]
impl OcrEngine for FixedOcr {
    async fn recognize(
        &self,
        image: &Path,
        _langs: &[String],
        on_progress: &(dyn Fn(OcrProgress) + Send + Sync),
    ) -> Result<String, OcrError> {
        if self.failing {
            return Err(OcrError::RecognitionFailed {
                path: image.display().to_string(),
                message: "fixed engine configured to fail".to_string(),
            });
        }
        on_progress(OcrProgress {
            status: "done".to_string(),
            progress: 1.0,
        });
        Ok(self.text.trim().to_string())
    }
}
