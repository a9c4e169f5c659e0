use std::{
    borrow::Borrow,
    fmt::Formatter,
    ops::Deref,
    path::{Path, PathBuf},
};

use camino::{Utf8Path, Utf8PathBuf};

/// Whether path comparisons fold case on this platform.
///
/// Windows and macOS filesystems are case-insensitive by default; treating
/// them as case-sensitive would split one project root into two identities
/// depending on how the host spelled the path.
const FOLD_CASE: bool = cfg!(any(windows, target_os = "macos"));

/// A UTF-8 filesystem path as handed to us by the host editor.
#[derive(Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct SystemPath(Utf8Path);

impl SystemPath {
    pub fn new(path: &(impl AsRef<Utf8Path> + ?Sized)) -> &Self {
        let path = path.as_ref();
        // SAFETY: SystemPath is a repr-transparent view of Utf8Path.
        unsafe { &*(std::ptr::from_ref::<Utf8Path>(path) as *const Self) }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        self.0.parent().map(Self::new)
    }

    #[inline]
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.0.file_name()
    }

    #[inline]
    #[must_use]
    pub fn join(&self, path: impl AsRef<Self>) -> SystemPathBuf {
        SystemPathBuf::from_utf8_path_buf(self.0.join(&path.as_ref().0))
    }

    #[must_use]
    pub fn to_path_buf(&self) -> SystemPathBuf {
        SystemPathBuf(self.0.to_path_buf())
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[inline]
    #[must_use]
    pub fn as_std_path(&self) -> &Path {
        self.0.as_std_path()
    }

    #[inline]
    #[must_use]
    pub const fn as_utf8_path(&self) -> &Utf8Path {
        &self.0
    }

    #[must_use]
    pub fn from_std_path(path: &Path) -> Option<&Self> {
        Some(Self::new(Utf8Path::from_path(path)?))
    }
}

impl ToOwned for SystemPath {
    type Owned = SystemPathBuf;

    fn to_owned(&self) -> Self::Owned {
        self.to_path_buf()
    }
}

/// The owned counterpart of [`SystemPath`].
#[derive(Eq, PartialEq, Clone, Hash, PartialOrd, Ord)]
pub struct SystemPathBuf(Utf8PathBuf);

impl SystemPathBuf {
    #[must_use]
    pub fn new() -> Self {
        Self(Utf8PathBuf::new())
    }

    #[must_use]
    pub const fn from_utf8_path_buf(path: Utf8PathBuf) -> Self {
        Self(path)
    }

    /// Creates a new [`SystemPathBuf`] from a [`PathBuf`].
    ///
    /// # Errors
    ///
    /// Returns the original path if it is not valid UTF-8.
    pub fn from_path_buf(path: PathBuf) -> Result<Self, PathBuf> {
        Utf8PathBuf::from_path_buf(path).map(Self)
    }

    #[must_use]
    pub fn into_utf8_path_buf(self) -> Utf8PathBuf {
        self.0
    }

    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &SystemPath {
        SystemPath::new(&self.0)
    }
}

impl Borrow<SystemPath> for SystemPathBuf {
    fn borrow(&self) -> &SystemPath {
        self.as_path()
    }
}

impl From<&str> for SystemPathBuf {
    fn from(value: &str) -> Self {
        Self::from_utf8_path_buf(Utf8PathBuf::from(value))
    }
}

impl From<String> for SystemPathBuf {
    fn from(value: String) -> Self {
        Self::from_utf8_path_buf(Utf8PathBuf::from(value))
    }
}

impl From<&Path> for SystemPathBuf {
    fn from(value: &Path) -> Self {
        Self::from_utf8_path_buf(
            Utf8PathBuf::from_path_buf(value.to_path_buf()).unwrap_or_default(),
        )
    }
}

impl From<PathBuf> for SystemPathBuf {
    fn from(value: PathBuf) -> Self {
        Self::from_utf8_path_buf(Utf8PathBuf::from_path_buf(value).unwrap_or_default())
    }
}

impl Default for SystemPathBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<SystemPath> for SystemPathBuf {
    #[inline]
    fn as_ref(&self) -> &SystemPath {
        self.as_path()
    }
}

impl AsRef<Self> for SystemPath {
    #[inline]
    fn as_ref(&self) -> &Self {
        self
    }
}

impl AsRef<SystemPath> for Utf8Path {
    #[inline]
    fn as_ref(&self) -> &SystemPath {
        SystemPath::new(self)
    }
}

impl AsRef<SystemPath> for str {
    #[inline]
    fn as_ref(&self) -> &SystemPath {
        SystemPath::new(self)
    }
}

impl AsRef<SystemPath> for String {
    #[inline]
    fn as_ref(&self) -> &SystemPath {
        SystemPath::new(self)
    }
}

impl AsRef<Path> for SystemPath {
    #[inline]
    fn as_ref(&self) -> &Path {
        self.0.as_std_path()
    }
}

impl Deref for SystemPathBuf {
    type Target = SystemPath;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_path()
    }
}

impl std::fmt::Debug for SystemPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::fmt::Display for SystemPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::fmt::Debug for SystemPathBuf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::fmt::Display for SystemPathBuf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Canonical comparison key for a path: separators unified, trailing
/// separators stripped, case folded on case-insensitive platforms.
///
/// Two paths with equal keys identify the same directory entry for the
/// purposes of project identity and containment checks.
#[must_use]
pub fn normalized_key(path: &SystemPath) -> String {
    let unified = path.as_str().replace('\\', "/");
    let trimmed = match unified.trim_end_matches('/') {
        // `/` trims to nothing; keep the root itself addressable.
        "" if unified.starts_with('/') => "/",
        trimmed => trimmed,
    };
    if FOLD_CASE {
        trimmed.to_lowercase()
    } else {
        trimmed.to_string()
    }
}

/// Returns `true` if `child` lies strictly inside `parent`.
///
/// Boundary-safe: the character after the shared prefix must be a path
/// separator, so `/ws/proj` never claims `/ws/proj2`.
#[must_use]
pub fn is_parent_path(parent: impl AsRef<SystemPath>, child: impl AsRef<SystemPath>) -> bool {
    let parent = normalized_key(parent.as_ref());
    let child = normalized_key(child.as_ref());

    if parent.is_empty() || child.is_empty() {
        return false;
    }
    if parent == "/" {
        return child != "/";
    }

    child.len() > parent.len()
        && child.starts_with(parent.as_str())
        && child.as_bytes()[parent.len()] == b'/'
}

/// Returns `true` if `path` is `root` itself or lies inside it.
#[must_use]
pub fn contains_path(root: impl AsRef<SystemPath>, path: impl AsRef<SystemPath>) -> bool {
    let root = root.as_ref();
    let path = path.as_ref();
    normalized_key(root) == normalized_key(path) || is_parent_path(root, path)
}
