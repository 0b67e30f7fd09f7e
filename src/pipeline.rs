use crate::{
    config::Config,
    error::{Error, Result},
    render::{TreeRenderer, TreeStats},
    writer::Writer,
};
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// Statistics collected during a run.
#[derive(Debug, Clone)]
pub struct RunStats {
    /// Counts from the renderer
    pub tree: TreeStats,

    /// Lines in the output, including the root label
    pub lines: usize,

    /// Bytes written to the output file (0 in dry run mode)
    pub bytes_written: usize,

    /// Total execution time
    pub duration: Duration,

    /// Output file path
    pub output_file: String,
}

impl RunStats {
    /// Prints a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!(
            "{} directories, {} files",
            self.tree.directories, self.tree.files
        );
        if self.tree.skipped > 0 {
            println!("{} unreadable directories skipped", self.tree.skipped);
        }
    }
}

/// Renders the configured root and saves the diagram.
pub struct Pipeline {
    config: Config,
    renderer: TreeRenderer,
    writer: Writer,
}

impl Pipeline {
    /// Creates a new pipeline with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let renderer = TreeRenderer::new(&config);
        let writer = Writer::new(&config);

        Ok(Self {
            config,
            renderer,
            writer,
        })
    }

    /// Renders the full diagram without writing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RootNotFound`] if the root is missing, or
    /// [`Error::Access`] if a directory cannot be listed.
    pub fn render(&self) -> Result<(String, TreeStats)> {
        self.check_root()?;

        self.renderer
            .render_with_stats(&self.config.root_dir, &self.config.root_label)
    }

    /// Checks that the root exists and is a directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RootNotFound`] otherwise.
    pub fn check_root(&self) -> Result<()> {
        let root = &self.config.root_dir;
        if root.is_dir() {
            Ok(())
        } else {
            Err(Error::root_not_found(root))
        }
    }

    /// Returns the configuration this pipeline runs with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Executes the run and returns statistics.
    ///
    /// # Process
    ///
    /// 1. **Check**: the root directory must exist
    /// 2. **Render**: builds the whole diagram in memory
    /// 3. **Write**: persists it, or prints it in dry run mode
    ///
    /// Nothing is written unless rendering succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is missing, a directory cannot be
    /// listed, or the output file cannot be written.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use project_tree::{Config, Pipeline};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = Config::builder().root_dir("src").build()?;
    ///
    /// let stats = Pipeline::new(config)?.run()?;
    /// stats.print_summary();
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self), fields(root_dir = %self.config.root_dir.display()))]
    pub fn run(self) -> Result<RunStats> {
        let start_time = Instant::now();

        info!("Rendering {}", self.config.root_dir.display());
        let (text, tree) = self.render()?;
        let lines = text.lines().count();

        let bytes_written = if self.config.dry_run {
            warn!("Dry run mode enabled - skipping file write");
            print!("{text}");
            0
        } else {
            self.writer.write(&text)?
        };

        let duration = start_time.elapsed();
        info!(
            "✓ Rendered {} entries in {:.2}s",
            tree.entries(),
            duration.as_secs_f64()
        );

        Ok(RunStats {
            tree,
            lines,
            bytes_written,
            duration,
            output_file: self.writer.output_file().display().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use std::fs;

    fn create_project() -> assert_fs::TempDir {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("src/b.txt").write_str("b").unwrap();
        temp.child("src/a.txt").write_str("a").unwrap();
        temp.child("src/sub/c.txt").write_str("c").unwrap();
        temp
    }

    fn create_config(temp: &assert_fs::TempDir) -> Config {
        Config::builder()
            .root_dir(temp.child("src").path())
            .output_file(temp.child("project_structure.txt").path())
            .build()
            .unwrap()
    }

    #[test]
    fn test_pipeline_writes_reference_output() {
        let temp = create_project();

        let stats = Pipeline::new(create_config(&temp)).unwrap().run().unwrap();

        temp.child("project_structure.txt")
            .assert("src/\n├── a.txt\n├── b.txt\n└── sub\n    └── c.txt\n");
        assert_eq!(stats.tree.directories, 1);
        assert_eq!(stats.tree.files, 3);
        assert_eq!(stats.lines, 5);
        assert!(stats.bytes_written > 0);
    }

    #[test]
    fn test_missing_root_writes_nothing() {
        let temp = assert_fs::TempDir::new().unwrap();

        let err = Pipeline::new(create_config(&temp)).unwrap().run().unwrap_err();

        assert!(err.is_root_not_found());
        assert!(!temp.child("project_structure.txt").exists());
    }

    #[test]
    fn test_root_that_is_a_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("src").write_str("not a directory").unwrap();

        let err = Pipeline::new(create_config(&temp)).unwrap().run().unwrap_err();

        assert!(err.is_root_not_found());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = create_project();
        let config = Config::builder()
            .root_dir(temp.child("src").path())
            .output_file(temp.child("project_structure.txt").path())
            .dry_run(true)
            .build()
            .unwrap();

        let stats = Pipeline::new(config).unwrap().run().unwrap();

        assert_eq!(stats.bytes_written, 0);
        assert!(!temp.child("project_structure.txt").exists());
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let temp = create_project();
        let output = temp.child("project_structure.txt");

        Pipeline::new(create_config(&temp)).unwrap().run().unwrap();
        let first = fs::read(output.path()).unwrap();
        Pipeline::new(create_config(&temp)).unwrap().run().unwrap();
        let second = fs::read(output.path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_output_inside_root_is_listed_on_rerun() {
        let temp = create_project();
        let config = Config::builder()
            .root_dir(temp.child("src").path())
            .output_file(temp.child("src/tree.txt").path())
            .build()
            .unwrap();

        Pipeline::new(config.clone()).unwrap().run().unwrap();
        Pipeline::new(config).unwrap().run().unwrap();

        let text = fs::read_to_string(temp.child("src/tree.txt").path()).unwrap();
        assert_eq!(
            text,
            "src/\n├── a.txt\n├── b.txt\n├── sub\n│   └── c.txt\n└── tree.txt\n"
        );
    }

    #[test]
    fn test_render_does_not_write() {
        let temp = create_project();

        let (text, stats) = Pipeline::new(create_config(&temp)).unwrap().render().unwrap();

        assert!(text.starts_with("src/\n"));
        assert_eq!(stats.entries(), 4);
        assert!(!temp.child("project_structure.txt").exists());
    }

    #[test]
    fn test_check_root() {
        let temp = create_project();
        let missing = assert_fs::TempDir::new().unwrap();

        assert!(Pipeline::new(create_config(&temp)).unwrap().check_root().is_ok());
        let err = Pipeline::new(create_config(&missing))
            .unwrap()
            .check_root()
            .unwrap_err();
        assert!(err.is_root_not_found());
    }
}
