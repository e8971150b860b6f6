use std::{
	borrow::Cow,
	env::VarError,
	path::{Path, PathBuf},
};

use crate::Error;

/// Environment variable overriding the default output directory.
pub const OUTPUT_DIR_VAR: &str = "AUTOMATA_OUTPUT_DIR";

pub const DEFAULT_OUTPUT_DIR: &str = "output";

pub const NFA_FILE: &str = "NFA.txt";
pub const DFA_FILE: &str = "DFA.txt";
pub const REVERSE_FILE: &str = "DFA_reverse.txt";
pub const COMPLEMENT_FILE: &str = "DFA_complement.txt";

/// Pipeline options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
	/// Directory receiving the automaton descriptions.
	pub output_dir: PathBuf,

	/// Word to test, overriding the one given by the grammar file.
	pub word: Option<String>,
}

impl Options {
	/// Creates the options, falling back to [`OUTPUT_DIR_VAR`] then
	/// [`DEFAULT_OUTPUT_DIR`] when no output directory is given.
	pub fn new(output_dir: Option<PathBuf>, word: Option<String>) -> Result<Self, Error> {
		let output_dir = match output_dir {
			Some(dir) => dir,
			None => find_output_dir()
				.map_err(Error::OutputDirNotFound)?
				.into_owned()
				.into(),
		};

		Ok(Self { output_dir, word })
	}

	pub fn output_path(&self, file_name: impl AsRef<Path>) -> PathBuf {
		self.output_dir.join(file_name)
	}
}

fn find_output_dir() -> Result<Cow<'static, str>, VarError> {
	match std::env::var(OUTPUT_DIR_VAR) {
		Ok(dir) => Ok(Cow::Owned(dir)),
		Err(VarError::NotPresent) => Ok(Cow::Borrowed(DEFAULT_OUTPUT_DIR)),
		Err(e) => Err(e),
	}
}
