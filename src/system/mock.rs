//! In-memory doubles for [`System`] and [`ProcessRunner`]

use super::{Invocation, ProcessOutput, ProcessRunner, System};
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::env::VarError;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory filesystem and environment
///
/// Clones share state, so a test can hand one clone to the code under test
/// and inspect the result through another.
///
/// # Example
/// ```
/// use gwi::system::{mock::MockSystem, System};
/// use std::path::Path;
///
/// let system = MockSystem::new()
///     .with_env("GWI_REPO_URL", "https://x/y").unwrap()
///     .with_file("/work/app/package.json", b"{}").unwrap()
///     .with_dir("/work/app/src").unwrap();
///
/// assert_eq!(system.env_var("GWI_REPO_URL").unwrap(), "https://x/y");
/// assert!(system.exists(Path::new("/work/app/package.json")).unwrap());
/// ```
#[derive(Clone)]
pub struct MockSystem {
    state: Arc<RwLock<Tree>>,
}

struct Tree {
    env: HashMap<String, String>,
    cwd: PathBuf,
    files: HashMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
}

impl Tree {
    /// Register `path` and all of its ancestors as directories
    fn add_dir(&mut self, path: &Path) {
        for ancestor in path.ancestors().filter(|a| !a.as_os_str().is_empty()) {
            self.dirs.insert(ancestor.to_path_buf());
        }
    }

    fn has(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.dirs.contains(path)
    }
}

fn not_found(what: &str, path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("{what} not found: {}", path.display()),
    )
}

fn poisoned<T>(err: T) -> io::Error
where
    T: ToString,
{
    io::Error::other(err.to_string())
}

impl MockSystem {
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(Tree {
                env: HashMap::new(),
                cwd: PathBuf::from("/"),
                files: HashMap::new(),
                dirs: BTreeSet::from([PathBuf::from("/")]),
            })),
        }
    }

    fn read(&self) -> io::Result<RwLockReadGuard<'_, Tree>> {
        self.state.read().map_err(poisoned)
    }

    fn write_lock(&self) -> io::Result<RwLockWriteGuard<'_, Tree>> {
        self.state.write().map_err(poisoned)
    }

    /// Set an environment variable
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned
    pub fn with_env(self, key: &str, value: &str) -> io::Result<Self> {
        self.write_lock()?
            .env
            .insert(key.to_owned(), value.to_owned());
        Ok(self)
    }

    /// Set the working directory, creating it
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned
    pub fn with_current_dir<P: AsRef<Path>>(self, dir: P) -> io::Result<Self> {
        {
            let mut tree = self.write_lock()?;
            tree.add_dir(dir.as_ref());
            tree.cwd = dir.as_ref().to_path_buf();
        }
        Ok(self)
    }

    /// Add a file, creating its parent directories
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned
    pub fn with_file<P: AsRef<Path>>(self, path: P, contents: &[u8]) -> io::Result<Self> {
        {
            let mut tree = self.write_lock()?;
            if let Some(parent) = path.as_ref().parent() {
                tree.add_dir(parent);
            }
            tree.files
                .insert(path.as_ref().to_path_buf(), contents.to_vec());
        }
        Ok(self)
    }

    /// Add an empty directory
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned
    pub fn with_dir<P: AsRef<Path>>(self, path: P) -> io::Result<Self> {
        self.write_lock()?.add_dir(path.as_ref());
        Ok(self)
    }
}

impl Default for MockSystem {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl System for MockSystem {
    #[expect(clippy::map_err_ignore, reason = "VarError carries no lock details")]
    fn env_var(&self, key: &str) -> Result<String, VarError> {
        let tree = self.state.read().map_err(|_| VarError::NotPresent)?;
        tree.env.get(key).cloned().ok_or(VarError::NotPresent)
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.read()?.cwd.clone())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let tree = self.read()?;
        let bytes = tree.files.get(path).ok_or_else(|| not_found("File", path))?;
        String::from_utf8(bytes.clone())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut tree = self.write_lock()?;
        if let Some(parent) = path.parent()
            && !tree.dirs.contains(parent)
        {
            return Err(not_found("Parent directory", parent));
        }
        tree.files.insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.write_lock()?.add_dir(path);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut tree = self.write_lock()?;
        if !tree.dirs.contains(path) {
            return Err(not_found("Directory", path));
        }
        tree.files.retain(|p, _| !p.starts_with(path));
        tree.dirs.retain(|p| !p.starts_with(path));
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.write_lock()?
            .files
            .remove(path)
            .map(drop)
            .ok_or_else(|| not_found("File", path))
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let mut tree = self.write_lock()?;

        if let Some(contents) = tree.files.remove(from) {
            tree.files.insert(to.to_path_buf(), contents);
            return Ok(());
        }
        if !tree.dirs.contains(from) {
            return Err(not_found("Path", from));
        }

        let moved = |p: &Path| p.strip_prefix(from).ok().map(|rest| to.join(rest));

        let files: Vec<PathBuf> = tree
            .files
            .keys()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for old in files {
            if let (Some(contents), Some(new)) = (tree.files.remove(&old), moved(&old)) {
                tree.files.insert(new, contents);
            }
        }

        let dirs: Vec<PathBuf> = tree
            .dirs
            .iter()
            .filter(|p| p.starts_with(from))
            .cloned()
            .collect();
        for old in dirs {
            tree.dirs.remove(&old);
            if let Some(new) = moved(&old) {
                tree.dirs.insert(new);
            }
        }

        Ok(())
    }

    fn exists(&self, path: &Path) -> io::Result<bool> {
        Ok(self.read()?.has(path))
    }

    fn is_file(&self, path: &Path) -> io::Result<bool> {
        Ok(self.read()?.files.contains_key(path))
    }

    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        Ok(self.read()?.dirs.contains(path))
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let tree = self.read()?;
        if !tree.dirs.contains(path) {
            return Err(not_found("Directory", path));
        }

        let is_child = |p: &&PathBuf| p.parent() == Some(path) && p.as_path() != path;
        let mut entries: Vec<PathBuf> = tree
            .files
            .keys()
            .filter(is_child)
            .chain(tree.dirs.iter().filter(is_child))
            .cloned()
            .collect();
        entries.sort();
        Ok(entries)
    }
}

/// Scripted outcome for a mocked process
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Exit 0 with the given stdout
    Success(String),
    /// Exit with the given non-zero code and stderr
    Exit(i32, String),
    /// The program could not be spawned because it is not installed
    NotFound,
}

impl MockResponse {
    fn into_result(self) -> io::Result<ProcessOutput> {
        match self {
            Self::Success(stdout) => Ok(ProcessOutput::ok(stdout)),
            Self::Exit(code, stderr) => Ok(ProcessOutput::failed(code, stderr)),
            Self::NotFound => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "No such file or directory (os error 2)",
            )),
        }
    }
}

/// Recording `ProcessRunner` for tests
///
/// Responses are registered against a command-line prefix such as
/// `"git clone"`. Each matching invocation consumes the next queued response
/// for the first prefix that still has one; unmatched invocations succeed
/// with empty output. Every invocation is recorded.
///
/// # Example
/// ```
/// use gwi::system::{Invocation, MockProcessRunner, MockResponse, ProcessRunner};
///
/// let runner = MockProcessRunner::new()
///     .with_response("git rev-parse", MockResponse::Success("abc123\n".to_owned()));
///
/// let output = runner.run(&Invocation::new("git", ["rev-parse", "HEAD"])).unwrap();
/// assert_eq!(output.stdout_trimmed(), "abc123");
/// assert_eq!(runner.count_matching("git rev-parse"), 1);
/// ```
#[derive(Clone, Default)]
pub struct MockProcessRunner {
    state: Arc<RwLock<MockProcessState>>,
}

#[derive(Default)]
struct MockProcessState {
    responses: Vec<(String, VecDeque<MockResponse>)>,
    invocations: Vec<Invocation>,
}

impl MockProcessRunner {
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for invocations whose command line starts with `prefix`
    #[must_use]
    pub fn with_response(self, prefix: &str, response: MockResponse) -> Self {
        if let Ok(mut state) = self.state.write() {
            if let Some((_, queue)) = state.responses.iter_mut().find(|(p, _)| p == prefix) {
                queue.push_back(response);
            } else {
                state
                    .responses
                    .push((prefix.to_owned(), VecDeque::from([response])));
            }
        }
        self
    }

    /// All invocations seen so far, in order
    #[must_use]
    pub fn invocations(&self) -> Vec<Invocation> {
        self.state
            .read()
            .map(|state| state.invocations.clone())
            .unwrap_or_default()
    }

    /// Number of recorded invocations whose command line starts with `prefix`
    #[must_use]
    pub fn count_matching(&self, prefix: &str) -> usize {
        self.invocations()
            .iter()
            .filter(|invocation| invocation.command_line().starts_with(prefix))
            .count()
    }
}

impl ProcessRunner for MockProcessRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        let mut state = self
            .state
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;

        state.invocations.push(invocation.clone());

        let command_line = invocation.command_line();
        let response = state
            .responses
            .iter_mut()
            .filter(|(prefix, _)| command_line.starts_with(prefix.as_str()))
            .find_map(|(_, queue)| queue.pop_front());
        drop(state);

        response.map_or_else(|| Ok(ProcessOutput::ok(String::new())), MockResponse::into_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_moves_directory_tree() {
        let system = MockSystem::new()
            .with_file("/a/b/file.txt", b"x")
            .unwrap();
        system.rename(Path::new("/a/b"), Path::new("/a/c")).unwrap();
        assert!(system.is_file(Path::new("/a/c/file.txt")).unwrap());
        assert!(!system.exists(Path::new("/a/b")).unwrap());
    }

    #[test]
    fn remove_dir_all_removes_descendants() {
        let system = MockSystem::new()
            .with_file("/p/.git/HEAD", b"ref")
            .unwrap()
            .with_file("/p/index.js", b"")
            .unwrap();
        system.remove_dir_all(Path::new("/p/.git")).unwrap();
        assert!(!system.exists(Path::new("/p/.git/HEAD")).unwrap());
        assert!(system.exists(Path::new("/p/index.js")).unwrap());
    }

    #[test]
    fn runner_consumes_responses_in_order() {
        let runner = MockProcessRunner::new()
            .with_response("git clone", MockResponse::Exit(128, "boom".to_owned()))
            .with_response("git clone", MockResponse::Success(String::new()));
        let clone = Invocation::new("git", ["clone"]);
        assert!(!runner.run(&clone).unwrap().success());
        assert!(runner.run(&clone).unwrap().success());
        assert!(runner.run(&clone).unwrap().success());
        assert_eq!(runner.count_matching("git clone"), 3);
    }

    #[test]
    fn runner_reports_missing_program() {
        let runner = MockProcessRunner::new().with_response("npm", MockResponse::NotFound);
        let err = runner
            .run(&Invocation::new("npm", ["install"]))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
