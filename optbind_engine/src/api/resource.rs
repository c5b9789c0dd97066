use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Behaviour of a resource that an option opens from its identifier, and which the result slot then owns.
///
/// A result slot that gives up its resources (ex: a list rolled back after a later open fails) releases them via [`Resource::release`].
pub trait Resource: Sized {
    /// Open the resource named by `identifier`.
    fn open(identifier: &str, spec: &OpenSpec) -> io::Result<Self>;

    /// The identifier this resource was opened from.
    fn identifier(&self) -> &str;

    /// Release the resource.
    fn release(self) -> io::Result<()>;
}

/// How a resource is opened: access flags and, on unix, the permission bits for newly created files.
///
/// The default opens read-only.
///
/// ### Example
/// ```
/// # use optbind_engine as optbind;
/// use optbind::OpenSpec;
///
/// // Open for writing, creating the file with rw-r--r-- if needed.
/// let spec = OpenSpec::default().write(true).create(true).mode(0o644);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenSpec {
    read: bool,
    write: bool,
    append: bool,
    create: bool,
    truncate: bool,
    mode: u32,
}

impl Default for OpenSpec {
    fn default() -> Self {
        Self {
            read: true,
            write: false,
            append: false,
            create: false,
            truncate: false,
            mode: 0o666,
        }
    }
}

impl OpenSpec {
    /// Set read access.
    pub fn read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    /// Set write access.
    pub fn write(mut self, write: bool) -> Self {
        self.write = write;
        self
    }

    /// Set append mode.
    pub fn append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    /// Create the file if it does not exist.
    pub fn create(mut self, create: bool) -> Self {
        self.create = create;
        self
    }

    /// Truncate the file when opening.
    pub fn truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    /// Permission bits used when creating a file (ignored on non-unix platforms).
    pub fn mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }

    pub(crate) fn options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        options
            .read(self.read)
            .write(self.write)
            .append(self.append)
            .create(self.create)
            .truncate(self.truncate);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(self.mode);
        }

        options
    }
}

/// A file opened by a resource option.
#[derive(Debug)]
pub struct FileHandle {
    identifier: String,
    file: File,
}

impl FileHandle {
    /// The path this file was opened from.
    pub fn path(&self) -> &Path {
        Path::new(&self.identifier)
    }

    /// The opened file.
    pub fn file(&self) -> &File {
        &self.file
    }

    /// The opened file, mutably (ex: to read or write through it).
    pub fn file_mut(&mut self) -> &mut File {
        &mut self.file
    }

    /// Take ownership of the opened file.
    pub fn into_file(self) -> File {
        self.file
    }

    /// Take ownership of the opened file, along with its path.
    pub fn into_parts(self) -> (PathBuf, File) {
        (PathBuf::from(self.identifier), self.file)
    }
}

impl Resource for FileHandle {
    fn open(identifier: &str, spec: &OpenSpec) -> io::Result<Self> {
        let file = spec.options().open(identifier)?;
        Ok(Self {
            identifier: identifier.to_string(),
            file,
        })
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn release(self) -> io::Result<()> {
        // Closing a std File does not report errors; dropping it is the release.
        drop(self.file);
        Ok(())
    }
}
