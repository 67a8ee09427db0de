//! Batch progress display: one bar for the image set, rolling bars per image

use crate::io::configuration::{MAX_IMAGE_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

/// Progress of one image's measurement pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageProgress {
    /// File name shown next to the bar
    pub name: String,
    /// Objects measured so far
    pub measured: usize,
    /// Objects in the image
    pub total: usize,
    /// Whether the image's tables were written
    pub done: bool,
}

/// Coordinates progress display for a batch of images
///
/// Small batches get one bar per image. Larger ones add a batch bar and
/// only the most recent images keep a bar of their own.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    image_bars: Vec<ProgressBar>,
    images: Vec<ImageProgress>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static IMAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.green/blue}}] {{prefix}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Images: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a progress manager with no bars yet
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            image_bars: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Create the bars for a batch of `image_count` images
    pub fn initialize(&mut self, image_count: usize) {
        self.images = vec![ImageProgress::default(); image_count];

        if image_count > MAX_IMAGE_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(image_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..image_count.min(MAX_IMAGE_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(IMAGE_STYLE.clone());
            self.image_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Tracked state of every image, in batch order
    pub fn images(&self) -> &[ImageProgress] {
        &self.images
    }

    /// Register the start of an image with `total` objects
    pub fn start_image(&mut self, index: usize, path: &Path, total: usize) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.images.len() {
            self.images.resize(index + 1, ImageProgress::default());
        }
        if let Some(image) = self.images.get_mut(index) {
            *image = ImageProgress {
                name,
                measured: 0,
                total,
                done: false,
            };
        }
        self.update_bars();
    }

    /// Report the number of objects measured in an image
    pub fn update_objects(&mut self, index: usize, measured: usize) {
        if let Some(image) = self.images.get_mut(index) {
            image.measured = measured;
        }
        self.update_bars();
    }

    /// Mark an image as written
    pub fn complete_image(&mut self, index: usize, _elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(image) = self.images.get_mut(index) {
            image.measured = image.total;
            image.done = true;
        }
        self.update_bars();
    }

    /// Clear every bar
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All images measured");
        }
        let _ = self.multi_progress.clear();
    }

    /// Show the most recently started images on the available bars
    fn update_bars(&self) {
        let started: Vec<&ImageProgress> = self
            .images
            .iter()
            .filter(|image| !image.name.is_empty())
            .collect();
        let first_visible = started.len().saturating_sub(self.image_bars.len());
        let visible = started.get(first_visible..).unwrap_or(&[]);

        for (bar, image) in self.image_bars.iter().zip(visible) {
            bar.set_length(image.total as u64);
            bar.set_position(image.measured as u64);
            let width = image.total.to_string().len();
            bar.set_message(format!("{:>width$}/{}", image.measured, image.total));
            let mark = if image.done { "✓ " } else { "" };
            bar.set_prefix(format!("{mark}{}", image.name));
        }

        for bar in self.image_bars.iter().skip(visible.len()) {
            bar.set_length(0);
            bar.set_position(0);
            bar.set_message(String::new());
            bar.set_prefix(String::new());
        }
    }
}
