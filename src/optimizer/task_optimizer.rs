//! # Task Optimizer Module
//!
//! Worker per la conversione di un singolo file.
//! Ogni errore resta confinato al file corrente e diventa un `ConversionResult::Failure`.

use crate::{
    error::ConvertError,
    file_manager::{DiscoveredFile, FileManager},
    image_processor::{ColorMode, EncodeOptions, ImageCodec, PngCodec},
    optimizer::path_resolver::PathResolver,
    stats::ConversionResult,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Converts single files; cheap to clone and share between concurrent tasks
#[derive(Clone)]
pub struct TaskOptimizer {
    codec: Arc<dyn ImageCodec>,
    output_root: PathBuf,
    mode: ColorMode,
    options: EncodeOptions,
}

impl TaskOptimizer {
    pub fn new(output_root: PathBuf, preserve_alpha: bool) -> Self {
        Self::with_codec(Arc::new(PngCodec), output_root, preserve_alpha)
    }

    pub fn with_codec(codec: Arc<dyn ImageCodec>, output_root: PathBuf, preserve_alpha: bool) -> Self {
        Self {
            codec,
            output_root,
            mode: ColorMode::from_preserve_alpha(preserve_alpha),
            options: EncodeOptions::default(),
        }
    }

    /// Map the output path (creating parents) then convert
    pub async fn process_single_file(&self, file: &DiscoveredFile) -> ConversionResult {
        let output_path = match PathResolver::map(&self.output_root, file).await {
            Ok(path) => path,
            Err(e) => return self.failure(file, e),
        };
        self.convert(file, &output_path).await
    }

    /// Read, decode, normalize, encode, write, measure
    pub async fn convert(&self, file: &DiscoveredFile, output_path: &Path) -> ConversionResult {
        match self.try_convert(file, output_path).await {
            Ok((original_size, new_size)) => {
                debug!(
                    "Converted {} ({} -> {} bytes)",
                    file.relative_path, original_size, new_size
                );
                ConversionResult::success(original_size, new_size)
            }
            Err(e) => self.failure(file, e),
        }
    }

    async fn try_convert(&self, file: &DiscoveredFile, output_path: &Path) -> Result<(u64, u64), ConvertError> {
        let original_size = FileManager::file_size(&file.path)
            .await
            .map_err(|e| ConvertError::io(&file.path, e))?;

        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|e| ConvertError::io(&file.path, e))?;

        let codec = Arc::clone(&self.codec);
        let (mode, options) = (self.mode, self.options);
        let encoded = tokio::task::spawn_blocking(move || codec.transcode(&bytes, mode, options))
            .await
            .map_err(|e| ConvertError::Codec(e.to_string()))??;

        tokio::fs::write(output_path, &encoded)
            .await
            .map_err(|e| ConvertError::io(output_path, e))?;
        drop(encoded);

        let new_size = FileManager::file_size(output_path)
            .await
            .map_err(|e| ConvertError::io(output_path, e))?;

        Ok((original_size, new_size))
    }

    fn failure(&self, file: &DiscoveredFile, error: ConvertError) -> ConversionResult {
        warn!("Conversion failed for {}: {}", file.relative_path, error);
        ConversionResult::failure(file.relative_path.clone(), error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ColorType, DynamicImage, GrayImage, Luma, Rgb, RgbImage};
    use tempfile::TempDir;

    struct BrokenEncoder;

    impl ImageCodec for BrokenEncoder {
        fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, ConvertError> {
            PngCodec.decode(bytes)
        }

        fn encode(&self, _image: &DynamicImage, _options: EncodeOptions) -> Result<Vec<u8>, ConvertError> {
            Err(ConvertError::Encode(image::ImageError::Unsupported(
                image::error::UnsupportedError::from_format_and_kind(
                    image::error::ImageFormatHint::Unknown,
                    image::error::UnsupportedErrorKind::GenericFeature("test".to_string()),
                ),
            )))
        }
    }

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in");
        let output = temp_dir.path().join("out");
        std::fs::create_dir_all(input.join("sub")).unwrap();
        (temp_dir, input, output)
    }

    #[tokio::test]
    async fn test_success_measures_disk_sizes() {
        let (_tmp, input, output) = setup();
        let src = input.join("sub/y.png");
        DynamicImage::ImageLuma8(GrayImage::from_pixel(32, 32, Luma([7])))
            .save(&src)
            .unwrap();

        let task = TaskOptimizer::new(output.clone(), true);
        let file = DiscoveredFile::new(&input, src.clone());
        let result = task.process_single_file(&file).await;

        let out_path = output.join("sub/y.png");
        assert_eq!(
            result,
            ConversionResult::success(
                std::fs::metadata(&src).unwrap().len(),
                std::fs::metadata(&out_path).unwrap().len()
            )
        );
        assert_eq!(image::open(&out_path).unwrap().color(), ColorType::Rgba8);
    }

    #[tokio::test]
    async fn test_rgb_mode_without_alpha() {
        let (_tmp, input, output) = setup();
        let src = input.join("x.png");
        DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([1, 2, 3])))
            .save(&src)
            .unwrap();

        let task = TaskOptimizer::new(output.clone(), false);
        let result = task.process_single_file(&DiscoveredFile::new(&input, src)).await;

        assert!(matches!(result, ConversionResult::Success { .. }));
        assert_eq!(image::open(output.join("x.png")).unwrap().color(), ColorType::Rgb8);
    }

    #[tokio::test]
    async fn test_corrupt_file_fails_without_output() {
        let (_tmp, input, output) = setup();
        let src = input.join("sub/bad.png");
        std::fs::write(&src, b"definitely not a png").unwrap();

        let task = TaskOptimizer::new(output.clone(), true);
        let result = task.process_single_file(&DiscoveredFile::new(&input, src)).await;

        match result {
            ConversionResult::Failure { relative_path, message } => {
                assert_eq!(relative_path, "sub/bad.png");
                assert!(message.starts_with("Decode error"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(!output.join("sub/bad.png").exists());
    }

    #[tokio::test]
    async fn test_encode_failure_is_isolated() {
        let (_tmp, input, output) = setup();
        let src = input.join("x.png");
        DynamicImage::ImageLuma8(GrayImage::new(4, 4)).save(&src).unwrap();

        let task = TaskOptimizer::with_codec(Arc::new(BrokenEncoder), output.clone(), true);
        let result = task.process_single_file(&DiscoveredFile::new(&input, src)).await;

        match result {
            ConversionResult::Failure { message, .. } => assert!(message.starts_with("Encode error")),
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(!output.join("x.png").exists());
    }

    #[tokio::test]
    async fn test_missing_source_is_io_failure() {
        let (_tmp, input, output) = setup();
        let task = TaskOptimizer::new(output, true);
        let result = task
            .process_single_file(&DiscoveredFile::new(&input, input.join("gone.png")))
            .await;

        match result {
            ConversionResult::Failure { message, .. } => assert!(message.starts_with("IO error")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_overwrites_existing_output() {
        let (_tmp, input, output) = setup();
        let src = input.join("x.png");
        DynamicImage::ImageLuma8(GrayImage::new(4, 4)).save(&src).unwrap();
        std::fs::create_dir_all(&output).unwrap();
        std::fs::write(output.join("x.png"), vec![0u8; 100_000]).unwrap();

        let task = TaskOptimizer::new(output.clone(), true);
        let result = task.process_single_file(&DiscoveredFile::new(&input, src)).await;

        match result {
            ConversionResult::Success { new_size, .. } => assert!(new_size < 100_000),
            other => panic!("expected success, got {:?}", other),
        }
    }
}
