//! Shared, reference-counted font library context.
//!
//! The context (a font database used to resolve family names) only exists
//! while at least one [`LibraryLease`] is alive. The first lease initializes
//! it; dropping the last one tears it down.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock, RwLock};

use cosmic_text::fontdb;

use crate::error::{TextError, TextResult};
use crate::face::{FontSource, FontdueFace};

/// What the font database loads when the library initializes.
#[derive(Debug, Clone, Default)]
pub struct LibraryConfig {
    pub load_system_fonts: bool,
    pub font_dirs: Vec<PathBuf>,
}

impl LibraryConfig {
    /// Load the platform's installed fonts on init.
    pub fn with_system_fonts() -> Self {
        Self {
            load_system_fonts: true,
            font_dirs: Vec::new(),
        }
    }

    /// Add a directory to scan for `.ttf`/`.otf` files on init.
    pub fn with_font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.font_dirs.push(dir.into());
        self
    }
}

struct LibraryState {
    config: LibraryConfig,
    database: Option<fontdb::Database>,
    ref_count: usize,
    init_count: usize,
}

impl LibraryState {
    fn initialize(&mut self) -> TextResult<()> {
        let mut database = fontdb::Database::new();

        for dir in &self.config.font_dirs {
            if !dir.is_dir() {
                return Err(TextError::LibraryInit(format!(
                    "font directory does not exist: {}",
                    dir.display()
                )));
            }
            database.load_fonts_dir(dir);
        }

        if self.config.load_system_fonts {
            database.load_system_fonts();
        }

        tracing::info!("Font library initialized with {} faces", database.len());
        self.database = Some(database);
        self.init_count += 1;
        Ok(())
    }

    fn database(&self) -> TextResult<&fontdb::Database> {
        self.database
            .as_ref()
            .ok_or_else(|| TextError::LibraryInit(String::from("font library is not initialized")))
    }

    fn release(&mut self) {
        self.ref_count = self.ref_count.saturating_sub(1);
        if self.ref_count == 0 && self.database.take().is_some() {
            tracing::info!("Font library torn down");
        }
    }
}

/// Cheaply clonable handle to a shared font library context.
///
/// ```rust
/// use tessera_text::{FontLibrary, LibraryConfig};
///
/// let library = FontLibrary::new(LibraryConfig::default());
/// {
///     let _lease = library.acquire().unwrap();
///     assert!(library.is_initialized());
/// }
/// assert!(!library.is_initialized());
/// ```
#[derive(Clone)]
pub struct FontLibrary {
    state: Arc<RwLock<LibraryState>>,
}

impl FontLibrary {
    /// Create an uninitialized library. Nothing is loaded until the first
    /// [`acquire`](Self::acquire).
    pub fn new(config: LibraryConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(LibraryState {
                config,
                database: None,
                ref_count: 0,
                init_count: 0,
            })),
        }
    }

    /// Process-wide library using system fonts.
    pub fn shared() -> FontLibrary {
        static SHARED: OnceLock<FontLibrary> = OnceLock::new();
        SHARED
            .get_or_init(|| FontLibrary::new(LibraryConfig::with_system_fonts()))
            .clone()
    }

    /// Take a lease on the context, initializing it if this is the first one.
    pub fn acquire(&self) -> TextResult<LibraryLease> {
        let mut state = self.state.write()?;
        if state.ref_count == 0 {
            state.initialize()?;
        }
        state.ref_count += 1;
        tracing::trace!("Font library lease acquired (refs={})", state.ref_count);

        Ok(LibraryLease {
            library: self.clone(),
        })
    }

    /// Number of live leases.
    pub fn ref_count(&self) -> usize {
        self.state.read().map(|s| s.ref_count).unwrap_or(0)
    }

    pub fn is_initialized(&self) -> bool {
        self.state
            .read()
            .map(|s| s.database.is_some())
            .unwrap_or(false)
    }

    /// How many times the context has been initialized since creation.
    pub fn init_count(&self) -> usize {
        self.state.read().map(|s| s.init_count).unwrap_or(0)
    }
}

impl std::fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontLibrary")
            .field("ref_count", &self.ref_count())
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

/// RAII token keeping the font library initialized.
pub struct LibraryLease {
    library: FontLibrary,
}

impl LibraryLease {
    /// The library this lease belongs to.
    pub fn library(&self) -> &FontLibrary {
        &self.library
    }

    /// Resolve `source` and open it at `pixel_size`.
    pub fn open_face(&self, source: &FontSource, pixel_size: f32) -> TextResult<FontdueFace> {
        match source {
            FontSource::File(path) => {
                if !path.exists() {
                    return Err(TextError::FontFileNotFound(path.clone()));
                }
                let data = std::fs::read(path)?;
                tracing::debug!("Loaded font file {} ({} bytes)", path.display(), data.len());
                FontdueFace::from_bytes(&data, 0, pixel_size)
            }
            FontSource::Bytes(data) => FontdueFace::from_bytes(data, 0, pixel_size),
            FontSource::Family(family) => {
                let (data, index) = self.family_data(family)?;
                FontdueFace::from_bytes(&data, index, pixel_size)
            }
        }
    }

    /// Family names known to the font database, sorted and deduplicated.
    pub fn families(&self) -> TextResult<Vec<String>> {
        let state = self.library.state.read()?;
        let mut families: Vec<String> = state
            .database()?
            .faces()
            .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
            .collect();
        families.sort();
        families.dedup();
        Ok(families)
    }

    /// Raw font data and collection index of the best match for `family`.
    pub fn family_data(&self, family: &str) -> TextResult<(Vec<u8>, u32)> {
        let state = self.library.state.read()?;
        let database = state.database()?;

        let query = fontdb::Query {
            families: &[fontdb::Family::Name(family)],
            ..fontdb::Query::default()
        };
        let id = database
            .query(&query)
            .ok_or_else(|| TextError::FontFamilyNotFound(family.to_string()))?;

        database
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| {
                TextError::FontLoad(format!("face data for family {} is unavailable", family))
            })
    }
}

impl Drop for LibraryLease {
    fn drop(&mut self) {
        let mut state = match self.library.state.write() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.release();
    }
}

impl std::fmt::Debug for LibraryLease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryLease").finish_non_exhaustive()
    }
}
