//! ImageMagick command-line backend.

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use artpaper_core::Dimensions;
use async_trait::async_trait;
use tokio::process::Command;

use crate::processor::{Annotation, ImageProcessor};
use crate::ImagingError;

/// Runs ImageMagick as a child process for every operation.
#[derive(Debug, Clone)]
pub struct MagickProcessor {
    program: String,
}

impl MagickProcessor {
    /// `program` is `convert` for ImageMagick 6 or `magick` for ImageMagick 7.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    async fn run(&self, args: Vec<OsString>) -> Result<String, ImagingError> {
        tracing::debug!(program = %self.program, ?args, "Running image command");
        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ImagingError::Spawn { program: self.program.clone(), source })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ImagingError::CommandFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: stderr.trim().to_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for MagickProcessor {
    fn default() -> Self {
        Self::new("convert")
    }
}

#[async_trait]
impl ImageProcessor for MagickProcessor {
    async fn create_canvas(&self, path: &Path, size: Dimensions, color: &str) -> Result<(), ImagingError> {
        self.run(canvas_args(path, size, color)).await.map(drop)
    }

    async fn dimensions(&self, path: &Path) -> Result<Dimensions, ImagingError> {
        let stdout = self.run(identify_args(path)).await?;
        parse_dimensions(&stdout).ok_or_else(|| ImagingError::UnexpectedOutput {
            program: self.program.clone(),
            output: stdout.trim().to_owned(),
        })
    }

    async fn resize_and_composite(
        &self,
        canvas: &Path,
        overlay: &Path,
        size: Dimensions,
    ) -> Result<(), ImagingError> {
        if !size.is_valid() {
            return Err(ImagingError::EmptyImage(overlay.display().to_string()));
        }
        self.run(composite_args(canvas, overlay, size)).await.map(drop)
    }

    async fn annotate(&self, path: &Path, annotation: &Annotation) -> Result<(), ImagingError> {
        self.run(annotate_args(path, annotation)).await.map(drop)
    }
}

fn canvas_args(path: &Path, size: Dimensions, color: &str) -> Vec<OsString> {
    vec![
        "-size".into(),
        size.to_string().into(),
        format!("canvas:{color}").into(),
        path.into(),
    ]
}

fn identify_args(path: &Path) -> Vec<OsString> {
    // `[0]` keeps multi-frame inputs to a single line of output.
    let mut first_frame = path.as_os_str().to_owned();
    first_frame.push("[0]");
    vec![first_frame, "-format".into(), "%w,%h".into(), "info:".into()]
}

fn composite_args(canvas: &Path, overlay: &Path, size: Dimensions) -> Vec<OsString> {
    vec![
        canvas.into(),
        "(".into(),
        overlay.into(),
        "-resize".into(),
        // `!` forces the exact size; the aspect ratio was already fitted.
        format!("{size}!").into(),
        ")".into(),
        "-gravity".into(),
        "center".into(),
        "-composite".into(),
        canvas.into(),
    ]
}

fn annotate_args(path: &Path, annotation: &Annotation) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        path.into(),
        "-gravity".into(),
        annotation.position.as_gravity().into(),
        "-fill".into(),
        annotation.fill_color.as_str().into(),
    ];
    if let Some(outline) = &annotation.outline_color {
        args.push("-stroke".into());
        args.push(outline.as_str().into());
    }
    let text: [OsString; 8] = [
        "-font".into(),
        annotation.font_family.as_str().into(),
        "-pointsize".into(),
        annotation.point_size.to_string().into(),
        "-annotate".into(),
        format!("+{0}+{0}", annotation.offset_px).into(),
        escape_annotation_text(&annotation.text).into(),
        path.into(),
    ];
    args.extend(text);
    args
}

/// Parses `identify`-style `W,H` output.
#[must_use]
pub fn parse_dimensions(output: &str) -> Option<Dimensions> {
    let (w, h) = output.trim().split_once(',')?;
    let dims = Dimensions::new(w.trim().parse().ok()?, h.trim().parse().ok()?);
    dims.is_valid().then_some(dims)
}

/// Escapes text so ImageMagick draws it literally.
///
/// `-annotate` expands `%` escapes and reads a file for text starting with `@`.
#[must_use]
pub fn escape_annotation_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    if text.starts_with('@') {
        escaped.push('\\');
    }
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '%' => escaped.push_str("%%"),
            _ => escaped.push(c),
        }
    }
    escaped
}
