pub mod ocr_client;

pub use ocr_client::{clean_ocr_text, DocumentReader, OcrClient};
