//! External encoding adapter
//!
//! Wraps the tiktoken encodings behind a small capability surface: an
//! `available()` probe and a per-run [`ModelEncoder`]. The pipeline never
//! checks for the library itself, only for this capability, so a build
//! without the `tiktoken` feature still runs Basic mode untouched.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncoderError {
    #[error("tiktoken encodings are not available in this build (enable the `tiktoken` feature)")]
    Unavailable,

    #[error("failed to load encoding: {0}")]
    Load(String),
}

#[cfg(feature = "tiktoken")]
mod imp {
    use super::EncoderError;
    use once_cell::sync::Lazy;
    use tiktoken_rs::{cl100k_base, get_bpe_from_model, CoreBPE};

    // Loaded once on first use; doubles as the availability probe.
    static CL100K_BPE: Lazy<Result<CoreBPE, String>> =
        Lazy::new(|| cl100k_base().map_err(|e| e.to_string()));

    /// Whether encodings can be resolved in this build/runtime
    pub fn available() -> bool {
        CL100K_BPE.is_ok()
    }

    enum Resolved {
        Named(CoreBPE),
        Fallback(&'static CoreBPE),
    }

    /// An encoding resolved for one model name, reused across the batch.
    ///
    /// Unknown model names warn once and fall back to the general-purpose
    /// `cl100k_base` encoding.
    pub struct ModelEncoder {
        resolved: Resolved,
    }

    impl ModelEncoder {
        pub fn resolve(model: &str) -> Result<Self, EncoderError> {
            match get_bpe_from_model(model) {
                Ok(bpe) => Ok(Self {
                    resolved: Resolved::Named(bpe),
                }),
                Err(_) => {
                    eprintln!(
                        "Warning: model '{}' not recognized. Falling back to 'cl100k_base'.",
                        model
                    );
                    let bpe = CL100K_BPE
                        .as_ref()
                        .map_err(|e| EncoderError::Load(e.clone()))?;
                    Ok(Self {
                        resolved: Resolved::Fallback(bpe),
                    })
                }
            }
        }

        /// Encode text into the sequence of integer token IDs
        pub fn encode(&self, text: &str) -> Vec<u32> {
            let bpe = match &self.resolved {
                Resolved::Named(bpe) => bpe,
                Resolved::Fallback(bpe) => bpe,
            };
            bpe.encode_with_special_tokens(text)
                .into_iter()
                .map(|id| id as u32)
                .collect()
        }
    }
}

#[cfg(not(feature = "tiktoken"))]
mod imp {
    use super::EncoderError;

    pub fn available() -> bool {
        false
    }

    pub struct ModelEncoder;

    impl ModelEncoder {
        pub fn resolve(_model: &str) -> Result<Self, EncoderError> {
            Err(EncoderError::Unavailable)
        }

        pub fn encode(&self, _text: &str) -> Vec<u32> {
            Vec::new()
        }
    }
}

pub use imp::{available, ModelEncoder};
