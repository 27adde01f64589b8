//! Cosmetic names for individuals.
//!
//! Every generation each individual is renamed `G{generation}, {adjective}
//! {animal}`. Labels never influence the algorithm; they only make the
//! progress report easier to follow.

use crate::error::{Error, Result};
use rand::Rng;
use std::path::Path;

const BUILTIN_ADJECTIVES: &[&str] = &[
    "angry", "bold", "brave", "clumsy", "curious", "dizzy", "eager", "fancy", "fluffy",
    "gentle", "grumpy", "happy", "hungry", "jolly", "lazy", "lucky", "mighty", "nervous",
    "proud", "quiet", "sleepy", "sneaky", "speedy", "wise",
];

const BUILTIN_ANIMALS: &[&str] = &[
    "alpaca", "badger", "beaver", "camel", "crab", "dingo", "ferret", "gecko", "heron",
    "ibex", "koala", "lemur", "llama", "mole", "newt", "otter", "panda", "quokka", "raven",
    "sloth", "tapir", "walrus", "wombat", "yak",
];

/// Adjective and animal lists used to build labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameLists {
    adjectives: Vec<String>,
    animals: Vec<String>,
}

impl NameLists {
    /// Builds lists from memory. Both lists must be non-empty.
    pub fn new(adjectives: Vec<String>, animals: Vec<String>) -> Result<Self> {
        if adjectives.is_empty() {
            return Err(Error::EmptyNameList("adjectives".into()));
        }
        if animals.is_empty() {
            return Err(Error::EmptyNameList("animals".into()));
        }
        Ok(Self {
            adjectives,
            animals,
        })
    }

    /// The lists compiled into the crate.
    pub fn builtin() -> Self {
        Self {
            adjectives: BUILTIN_ADJECTIVES.iter().map(|s| s.to_string()).collect(),
            animals: BUILTIN_ANIMALS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Reads two line-delimited files. Lines are trimmed and blank lines
    /// skipped.
    ///
    /// A missing or unreadable file, or one without any names, is an error.
    pub fn load(adjectives: impl AsRef<Path>, animals: impl AsRef<Path>) -> Result<Self> {
        let adjectives = read_list(adjectives.as_ref())?;
        let animals = read_list(animals.as_ref())?;
        tracing::debug!(
            adjectives = adjectives.len(),
            animals = animals.len(),
            "name lists loaded"
        );
        Ok(Self {
            adjectives,
            animals,
        })
    }

    pub fn adjectives(&self) -> &[String] {
        &self.adjectives
    }

    pub fn animals(&self) -> &[String] {
        &self.animals
    }

    /// Draws a label for an individual of `generation`.
    pub fn label<R: Rng>(&self, generation: usize, rng: &mut R) -> String {
        let adjective = &self.adjectives[rng.random_range(0..self.adjectives.len())];
        let animal = &self.animals[rng.random_range(0..self.animals.len())];
        format!("G{generation}, {adjective} {animal}")
    }
}

impl Default for NameLists {
    fn default() -> Self {
        Self::builtin()
    }
}

fn read_list(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::NameList {
        path: path.to_path_buf(),
        source,
    })?;
    let names: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();
    if names.is_empty() {
        return Err(Error::EmptyNameList(path.display().to_string()));
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use std::io::Write;

    fn write_list(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_trims_and_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let adj = write_list(&dir, "adjectives.txt", "  shiny \n\nsmelly\r\n");
        let ani = write_list(&dir, "animals.txt", "aardvark\n");

        let names = NameLists::load(&adj, &ani).unwrap();
        assert_eq!(names.adjectives(), &["shiny".to_string(), "smelly".to_string()]);
        assert_eq!(names.animals(), &["aardvark".to_string()]);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let ani = write_list(&dir, "animals.txt", "aardvark\n");
        let missing = dir.path().join("adjectives.txt");

        let err = NameLists::load(&missing, &ani).unwrap_err();
        match err {
            Error::NameList { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let adj = write_list(&dir, "adjectives.txt", "happy\n");
        let ani = write_list(&dir, "animals.txt", "\n   \n");

        assert!(matches!(
            NameLists::load(&adj, &ani),
            Err(Error::EmptyNameList(name)) if name == ani.display().to_string()
        ));
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(
            NameLists::new(vec![], vec!["cat".into()]),
            Err(Error::EmptyNameList(name)) if name == "adjectives"
        ));
        assert!(matches!(
            NameLists::new(vec!["fat".into()], vec![]),
            Err(Error::EmptyNameList(name)) if name == "animals"
        ));
        assert!(NameLists::new(vec!["fat".into()], vec!["cat".into()]).is_ok());
    }

    #[test]
    fn test_label_format() {
        let names = NameLists::new(vec!["fat".into()], vec!["cat".into()]).unwrap();
        let mut rng = create_rng(1);
        assert_eq!(names.label(12, &mut rng), "G12, fat cat");
    }

    #[test]
    fn test_builtin_label_uses_lists() {
        let names = NameLists::builtin();
        let mut rng = create_rng(4);
        let label = names.label(0, &mut rng);
        let rest = label.strip_prefix("G0, ").unwrap();
        let (adj, animal) = rest.split_once(' ').unwrap();
        assert!(names.adjectives().iter().any(|a| a == adj));
        assert!(names.animals().iter().any(|a| a == animal));
    }
}
