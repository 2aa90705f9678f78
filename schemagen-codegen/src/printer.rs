//! Writing generated files to a module directory.

use crate::error::CodegenError;
use crate::generator::Generator;
use std::fs;
use std::path::{Path, PathBuf};

/// Runs generators and writes their output into one directory.
pub struct Printer {
    module: String,
    dir: PathBuf,
    generators: Vec<Box<dyn Generator>>,
}

impl Printer {
    /// Creates a printer for a module directory.
    ///
    /// The directory is created when the printer runs if it does not exist.
    #[must_use]
    pub fn new(module: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            module: module.into(),
            dir: dir.into(),
            generators: Vec::new(),
        }
    }

    /// Adds a generator.
    #[must_use]
    pub fn with_generator(mut self, generator: impl Generator + 'static) -> Self {
        self.generators.push(Box::new(generator));
        self
    }

    /// Returns the module name written into file headers.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Returns the target directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the header written at the top of every file.
    #[must_use]
    pub fn header(&self) -> String {
        format!(
            "// Code generated by schemagen for module `{}`. DO NOT EDIT.\n\n",
            self.module
        )
    }

    /// Runs every generator and writes its file.
    ///
    /// Returns the paths written, in generator order. A generator that fails
    /// leaves its file untouched and stops the run.
    ///
    /// # Errors
    /// Returns an error if the target path exists and is not a directory,
    /// if the directory cannot be created, or if a generator or write fails.
    pub fn run(&self) -> Result<Vec<PathBuf>, CodegenError> {
        tracing::info!("Beginning generation for module '{}'", self.module);
        self.ensure_dir()?;

        let mut written = Vec::with_capacity(self.generators.len());
        for generator in &self.generators {
            let path = self.dir.join(generator.filename());
            tracing::info!("Generating {}", path.display());

            let mut buf = self.header().into_bytes();
            generator.run(&mut buf)?;
            fs::write(&path, buf)?;
            written.push(path);
        }
        Ok(written)
    }

    fn ensure_dir(&self) -> Result<(), CodegenError> {
        if self.dir.exists() {
            if !self.dir.is_dir() {
                return Err(CodegenError::generation(format!(
                    "'{}' exists and is not a directory",
                    self.dir.display()
                )));
            }
            return Ok(());
        }
        fs::create_dir_all(&self.dir)?;
        tracing::info!("Created directory {}", self.dir.display());
        Ok(())
    }
}
