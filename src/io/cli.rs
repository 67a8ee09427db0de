//! Command-line interface for batch measurement of segmented images

use crate::algorithm::executor::MeasurementPass;
use crate::io::configuration::{
    AVERAGES_DIR, AVERAGES_SUFFIX, DEFAULT_GRID_CELL_SIZE, DEFAULT_NEIGHBOR_RADIUS, EngineConfig,
    INDIVIDUAL_DIR, INDIVIDUAL_SUFFIX, INPUT_EXTENSION,
};
use crate::io::error::{Result, WithPath, invalid_parameter};
use crate::io::input::load_objects;
use crate::io::progress::ProgressManager;
use crate::io::table::{TableFormat, write_table_file};
use crate::model::registry::Registry;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "histospatial")]
#[command(
    author,
    version,
    about = "Measure spatial relationships between segmented nuclei, cells and vessels"
)]
/// Command-line arguments for the measurement tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input JSON object list or directory of them
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Center distance within which two nuclei are neighbours
    #[arg(short = 'r', long, default_value_t = DEFAULT_NEIGHBOR_RADIUS)]
    pub neighbor_radius: f64,

    /// Edge length of a spatial index cell
    #[arg(short = 'g', long, default_value_t = DEFAULT_GRID_CELL_SIZE)]
    pub grid_cell_size: f64,

    /// Leave border vessels out of vessel search and vessel averages
    #[arg(short = 'b', long)]
    pub ignore_border_vessels: bool,

    /// Separate fields with semicolons instead of commas
    #[arg(short, long)]
    pub semicolon: bool,

    /// Write decimal commas instead of decimal points
    #[arg(short, long)]
    pub decimal_comma: bool,

    /// Skip the group-average table
    #[arg(short = 'A', long)]
    pub no_averages: bool,

    /// Output directory (defaults to the input's directory)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Log pass details
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Engine parameters selected on the command line
    pub const fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            neighbor_radius: self.neighbor_radius,
            grid_cell_size: self.grid_cell_size,
            ignore_border_vessels: self.ignore_border_vessels,
        }
    }

    /// Field and decimal separators selected on the command line
    pub const fn table_format(&self) -> TableFormat {
        TableFormat {
            field_separator: if self.semicolon { ';' } else { ',' },
            decimal_separator: if self.decimal_comma { ',' } else { '.' },
        }
    }

    /// Per-object table path for an input document
    pub fn individual_path(&self, input_path: &Path) -> PathBuf {
        self.output_path(input_path, INDIVIDUAL_DIR, INDIVIDUAL_SUFFIX)
    }

    /// Group-average table path for an input document
    pub fn averages_path(&self, input_path: &Path) -> PathBuf {
        self.output_path(input_path, AVERAGES_DIR, AVERAGES_SUFFIX)
    }

    fn output_path(&self, input_path: &Path, directory: &str, suffix: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let name = format!("{}{suffix}", stem.to_string_lossy());
        let root = self
            .output
            .clone()
            .or_else(|| input_path.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        root.join(directory).join(name)
    }
}

/// Orchestrates batch measurement of object lists with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters or target are invalid, or if an
    /// image cannot be read or its tables written
    pub fn process(&mut self) -> Result<()> {
        self.cli.engine_config().validate()?;
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Input documents to measure, in sorted order
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a JSON file nor a readable directory
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if has_input_extension(target) {
                if self.should_process_file(target) {
                    Ok(vec![target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"must be a JSON object list",
                ))
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).with_path(target, "list input directory")? {
                let path = entry.with_path(target, "list input directory")?.path();
                if has_input_extension(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a JSON file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        if self.cli.individual_path(input_path).exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();
        let objects = load_objects(input_path)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_image(index, input_path, objects.len());
        }

        let registry = Registry::new(objects, self.cli.engine_config());
        let mut pass = MeasurementPass::new(&registry);
        while pass.execute_iteration() {
            if let Some(ref mut pm) = self.progress_manager {
                pm.update_objects(index, pass.processed());
            }
        }
        let report = pass.finish();

        let format = self.cli.table_format();
        let individual_path = self.cli.individual_path(input_path);
        write_table_file(&individual_path, &report.objects, format)?;
        info!(path = %individual_path.display(), rows = report.objects.len(), "wrote object table");

        if !self.cli.no_averages {
            let averages_path = self.cli.averages_path(input_path);
            write_table_file(&averages_path, &report.averages, format)?;
            info!(path = %averages_path.display(), groups = report.averages.len(), "wrote averages table");
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_image(index, start_time.elapsed());
        }

        Ok(())
    }
}

fn has_input_extension(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(INPUT_EXTENSION)
}
