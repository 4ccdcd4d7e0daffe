use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::NamedTempFile;

use sbci_format::{
    Color, NfpWriter, PaletteCollector, PixelSource, RgbImage, SnfpWriter,
};

use crate::error::ConvertError;
use crate::imaging::{
    decode_image, encode_preview, ensure_dimensions, fit_within, quantize, MAX_COLORS,
};
use crate::models::{AppConfig, OutputFormat};

/// Suffix appended to the input stem for the preview PNG
const PREVIEW_SUFFIX: &str = "-quantized";

/// In-memory result of converting one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Encoded sbci or nfp data
    pub data: Vec<u8>,
    /// Quantized preview PNG, when enabled
    pub preview: Option<Vec<u8>>,
    pub width: u32,
    pub height: u32,
    /// Distinct colors after quantization
    pub unique_colors: usize,
    /// Colors that found no slot
    pub dropped: Vec<Color>,
}

/// Summary of one converted file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub preview: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    pub bytes: usize,
    pub dropped: usize,
}

/// Converts image files to sbci or nfp using one shared configuration
pub struct Converter {
    config: AppConfig,
    sbci: SnfpWriter,
    nfp: NfpWriter,
}

impl Converter {
    pub fn new(config: AppConfig) -> Result<Self, ConvertError> {
        let palette = config.reference_palette()?;
        let sbci = SnfpWriter::new(config.mode())
            .palette(palette.clone())
            .palette_table(config.palette_table)
            .strict(config.strict);
        let nfp = NfpWriter::new(palette);

        Ok(Self { config, sbci, nfp })
    }

    /// Resize and reduce an image to what the encoders store.
    pub fn prepare(&self, image: &RgbImage) -> Result<RgbImage, ConvertError> {
        let resized = fit_within(image, self.config.size)?;
        quantize(&resized, MAX_COLORS, self.config.dither)
    }

    /// Convert a decoded image without touching the filesystem.
    pub fn convert_image(&self, image: &RgbImage) -> Result<Conversion, ConvertError> {
        ensure_dimensions(image)?;
        let prepared = self.prepare(image)?;

        let (data, unique_colors, dropped) = match self.config.format {
            OutputFormat::Sbci => {
                let (data, report) = self.sbci.encode_with_report(&prepared)?;
                (data, report.unique_colors, report.dropped)
            }
            OutputFormat::Nfp => {
                let unique = prepared
                    .pixels()
                    .iter()
                    .copied()
                    .collect::<PaletteCollector>()
                    .len();
                (self.nfp.encode(&prepared).into_bytes(), unique, Vec::new())
            }
        };

        let preview = if self.config.write_quantized {
            Some(encode_preview(&prepared)?)
        } else {
            None
        };

        Ok(Conversion {
            data,
            preview,
            width: prepared.width(),
            height: prepared.height(),
            unique_colors,
            dropped,
        })
    }

    fn target_dir(&self, input: &Path) -> PathBuf {
        match &self.config.out_dir {
            Some(dir) => dir.clone(),
            None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
        }
    }

    /// Output file for `input`: same stem, format extension.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let name = Path::new(input.file_name().unwrap_or(input.as_os_str()))
            .with_extension(self.config.format.extension());
        self.target_dir(input).join(name)
    }

    /// Preview file for `input`: `<stem>-quantized.png`.
    pub fn preview_path(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.target_dir(input)
            .join(format!("{stem}{PREVIEW_SUFFIX}.png"))
    }

    /// Convert one image file and write its outputs.
    ///
    /// Nothing is written unless encoding succeeds, and the output and its
    /// preview are committed together.
    pub fn convert_file(&self, input: &Path) -> Result<ConvertReport, ConvertError> {
        let data = std::fs::read(input)?;
        let image = decode_image(&data)?;
        let conversion = self.convert_image(&image)?;

        if let Some(dir) = &self.config.out_dir {
            std::fs::create_dir_all(dir)?;
        }

        let output = self.output_path(input);
        let preview = conversion
            .preview
            .as_ref()
            .map(|png| (self.preview_path(input), png.as_slice()));
        commit(&output, &conversion.data, preview.clone())?;
        let preview = preview.map(|(path, _)| path);

        if !conversion.dropped.is_empty() {
            tracing::warn!(
                input = %input.display(),
                dropped = conversion.dropped.len(),
                "Some colors fell back to slot 0"
            );
        }
        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            width = conversion.width,
            height = conversion.height,
            colors = conversion.unique_colors,
            "Converted image"
        );

        Ok(ConvertReport {
            input: input.to_path_buf(),
            output,
            preview,
            width: conversion.width,
            height: conversion.height,
            bytes: conversion.data.len(),
            dropped: conversion.dropped.len(),
        })
    }

    /// Convert files concurrently, one blocking task per file.
    ///
    /// Results come back in input order.
    pub async fn convert_all(
        self: Arc<Self>,
        inputs: Vec<PathBuf>,
    ) -> Vec<(PathBuf, Result<ConvertReport, ConvertError>)> {
        let handles: Vec<_> = inputs
            .into_iter()
            .map(|input| {
                let converter = Arc::clone(&self);
                let path = input.clone();
                let handle = tokio::task::spawn_blocking(move || converter.convert_file(&path));
                (input, handle)
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (input, handle) in handles {
            let result = handle
                .await
                .map_err(|e| ConvertError::Task(e.to_string()))
                .and_then(|r| r);
            results.push((input, result));
        }
        results
    }
}

/// Write `data` to a temporary file in the directory of `path`.
fn stage(path: &Path, data: &[u8]) -> Result<NamedTempFile, ConvertError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    Ok(tmp)
}

/// Write the output and optional preview, all or nothing.
///
/// Both files are fully staged before either is renamed into place. If the
/// preview cannot be renamed, the freshly committed output is removed again.
fn commit(
    output: &Path,
    data: &[u8],
    preview: Option<(PathBuf, &[u8])>,
) -> Result<(), ConvertError> {
    let staged_output = stage(output, data)?;
    let staged_preview = match &preview {
        Some((path, png)) => Some((path, stage(path, png)?)),
        None => None,
    };

    staged_output
        .persist(output)
        .map_err(|e| ConvertError::Io(e.error))?;

    if let Some((path, tmp)) = staged_preview {
        if let Err(e) = tmp.persist(path) {
            if let Err(cleanup) = std::fs::remove_file(output) {
                tracing::warn!(
                    output = %output.display(),
                    error = %cleanup,
                    "Failed to remove output after preview error"
                );
            }
            return Err(ConvertError::Io(e.error));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbci_format::{SbciImage, SnfpMode};

    fn scenario() -> RgbImage {
        RgbImage::new(
            2,
            2,
            vec![
                Color::new(240, 240, 240),
                Color::new(242, 178, 51),
                Color::new(240, 240, 240),
                Color::new(17, 17, 17),
            ],
        )
        .unwrap()
    }

    fn config() -> AppConfig {
        AppConfig {
            size: 0,
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_convert_image_sbci() {
        let converter = Converter::new(config()).unwrap();
        let conversion = converter.convert_image(&scenario()).unwrap();

        let decoded = SbciImage::decode(&conversion.data).unwrap();
        assert_eq!(decoded.indices(), &[0, 1, 0, 15]);
        assert_eq!(conversion.unique_colors, 3);
        assert!(conversion.dropped.is_empty());
        assert!(conversion.preview.is_some());
    }

    #[test]
    fn test_convert_image_nfp() {
        let converter = Converter::new(AppConfig {
            format: OutputFormat::Nfp,
            write_quantized: false,
            ..config()
        })
        .unwrap();
        let conversion = converter.convert_image(&scenario()).unwrap();

        assert_eq!(conversion.data, b"01\n0f\n".to_vec());
        assert!(conversion.preview.is_none());
    }

    #[test]
    fn test_convert_image_full_palette_table() {
        let converter = Converter::new(AppConfig {
            palette_table: sbci_format::PaletteTable::Full,
            ..config()
        })
        .unwrap();
        let conversion = converter.convert_image(&scenario()).unwrap();
        assert_eq!(conversion.data.len(), 12 + 16 * 4 + 4);
    }

    #[test]
    fn test_ascii_not_implemented() {
        let converter = Converter::new(AppConfig {
            ascii: true,
            ..config()
        })
        .unwrap();
        let result = converter.convert_image(&scenario());
        assert!(matches!(
            result,
            Err(ConvertError::Encode(sbci_format::EncodeError::NotImplemented(
                SnfpMode::Ascii
            )))
        ));
    }

    #[test]
    fn test_resize_applies() {
        let converter = Converter::new(AppConfig {
            size: 4,
            ..AppConfig::default()
        })
        .unwrap();
        let conversion = converter.convert_image(&scenario()).unwrap();
        assert_eq!((conversion.width, conversion.height), (4, 4));
    }

    #[test]
    fn test_output_paths() {
        let converter = Converter::new(config()).unwrap();
        let input = Path::new("/tmp/pics/logo.png");

        assert_eq!(
            converter.output_path(input),
            PathBuf::from("/tmp/pics/logo.sbci")
        );
        assert_eq!(
            converter.preview_path(input),
            PathBuf::from("/tmp/pics/logo-quantized.png")
        );
    }

    #[test]
    fn test_output_paths_with_out_dir() {
        let converter = Converter::new(AppConfig {
            format: OutputFormat::Nfp,
            out_dir: Some(PathBuf::from("/out")),
            ..config()
        })
        .unwrap();

        assert_eq!(
            converter.output_path(Path::new("pics/my.logo.png")),
            PathBuf::from("/out/my.logo.nfp")
        );
    }

    #[test]
    fn test_zero_width_image_rejected() {
        let converter = Converter::new(config()).unwrap();
        let empty = RgbImage::new(0, 3, Vec::new()).unwrap();

        let result = converter.convert_image(&empty);

        assert!(matches!(
            result,
            Err(ConvertError::UnsupportedDimensions { width: 0, height: 3 })
        ));
    }

    #[test]
    fn test_commit_removes_output_when_preview_fails() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("scene.sbci");
        // A directory in the preview's place makes the rename fail.
        let preview = dir.path().join("scene-quantized.png");
        std::fs::create_dir(&preview).unwrap();

        let result = commit(&output, b"sbci", Some((preview, b"png".as_slice())));

        assert!(matches!(result, Err(ConvertError::Io(_))));
        assert!(!output.exists());
    }

    #[test]
    fn test_commit_writes_both() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("a.sbci");
        let preview = dir.path().join("a-quantized.png");

        commit(&output, b"data", Some((preview.clone(), b"png".as_slice()))).unwrap();

        assert_eq!(std::fs::read(&output).unwrap(), b"data");
        assert_eq!(std::fs::read(&preview).unwrap(), b"png");
    }

    #[test]
    fn test_bad_palette_rejected() {
        let result = Converter::new(AppConfig {
            palette: Some(vec!["#000000".to_string()]),
            ..config()
        });
        assert!(matches!(result, Err(ConvertError::Palette(_))));
    }
}
