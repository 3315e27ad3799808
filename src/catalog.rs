use std::sync::{Arc, RwLock};

use tracing::{debug, info, instrument, warn};

use crate::constants::{MEMORY_SOURCE_NAME, NUMBER_ATTR};
use crate::document::CatalogDocument;
use crate::error::Result;
use crate::mapper::MovieMapper;
use crate::metadata::MetadataReader;
use crate::source::{CatalogSource, FileSource};
use crate::types::{CatalogInfo, CatalogObject, Movie, MovieLite};

/// Load state of a [`Catalog`]
#[derive(Debug, Clone, Default)]
pub enum CatalogState {
    #[default]
    Unloaded,
    Loaded(Arc<CatalogDocument>),
}

/// Read-only query surface over one catalog document.
///
/// Queries never fail: before a successful load (or after a failed one)
/// they return empty values. A load parses the new document completely
/// before swapping it in, so concurrent queries always see one whole
/// document.
#[derive(Debug, Default)]
pub struct Catalog {
    state: RwLock<CatalogState>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog and load it from `source`
    pub async fn open(source: &dyn CatalogSource) -> Result<Self> {
        let catalog = Self::new();
        catalog.load(source).await?;
        Ok(catalog)
    }

    pub async fn open_file(path: impl Into<std::path::PathBuf>) -> Result<Self> {
        Self::open(&FileSource::new(path)).await
    }

    #[instrument(skip(self, source), fields(source = %source.name()))]
    pub async fn load(&self, source: &dyn CatalogSource) -> Result<()> {
        let name = source.name();
        let loaded = match source.read_bytes().await {
            Ok(bytes) => CatalogDocument::parse(&bytes, &name),
            Err(e) => Err(e),
        };
        self.install(loaded)
    }

    pub async fn load_file(&self, path: impl Into<std::path::PathBuf>) -> Result<()> {
        self.load(&FileSource::new(path)).await
    }

    /// Load synchronously from bytes already in memory
    #[instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub fn load_from_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.install(CatalogDocument::parse(bytes, MEMORY_SOURCE_NAME))
    }

    pub fn load_from_str(&self, xml: &str) -> Result<()> {
        self.load_from_bytes(xml.as_bytes())
    }

    fn install(&self, loaded: Result<CatalogDocument>) -> Result<()> {
        let (next, result) = match loaded {
            Ok(doc) => {
                info!(
                    "Loaded catalog {} with {} movies",
                    doc.source_name(),
                    doc.movie_count()
                );
                (CatalogState::Loaded(Arc::new(doc)), Ok(()))
            }
            Err(e) => {
                warn!("Catalog load failed: {}", e);
                (CatalogState::Unloaded, Err(e))
            }
        };

        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        *state = next;
        result
    }

    fn snapshot(&self) -> Option<Arc<CatalogDocument>> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        match &*state {
            CatalogState::Loaded(doc) => Some(Arc::clone(doc)),
            CatalogState::Unloaded => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot().is_some()
    }

    /// Name of the loaded source, if any
    pub fn source_name(&self) -> Option<String> {
        self.snapshot().map(|doc| doc.source_name().to_string())
    }

    pub fn catalog_info(&self) -> CatalogInfo {
        self.snapshot()
            .map(|doc| MetadataReader::read(&doc))
            .unwrap_or_default()
    }

    /// First movie whose `Number` matches `id`.
    ///
    /// Numbers match when the strings are equal, or when both parse as the
    /// same unsigned integer (`"007"` finds `Number="7"`).
    pub fn movie_by_id(&self, id: &str) -> Option<Movie> {
        let doc = self.snapshot()?;
        let wanted = id.trim().parse::<u64>().ok();
        let movie = doc
            .movie_nodes()
            .find(|node| match node.attribute(NUMBER_ATTR) {
                Some(number) if number == id => true,
                Some(number) => wanted.is_some() && number.trim().parse::<u64>().ok() == wanted,
                None => false,
            })
            .map(MovieMapper::map_movie);

        if movie.is_none() {
            debug!("No movie with Number {}", id);
        }
        movie
    }

    pub fn movie_by_number(&self, number: u64) -> Option<Movie> {
        self.movie_by_id(&number.to_string())
    }

    pub fn all_movies(&self) -> Vec<Movie> {
        self.snapshot()
            .map(|doc| doc.movie_nodes().map(MovieMapper::map_movie).collect())
            .unwrap_or_default()
    }

    pub fn movies_lite(&self) -> Vec<MovieLite> {
        self.snapshot()
            .map(|doc| doc.movie_nodes().map(MovieMapper::map_movie_lite).collect())
            .unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.snapshot().map(|doc| doc.movie_count()).unwrap_or(0)
    }

    /// Metadata plus every full movie record, read from one snapshot
    pub fn catalog_object(&self) -> CatalogObject {
        match self.snapshot() {
            Some(doc) => {
                let info = MetadataReader::read(&doc);
                let movies = doc.movie_nodes().map(MovieMapper::map_movie).collect();
                CatalogObject::from_parts(info, movies)
            }
            None => CatalogObject::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::source::MemorySource;

    const XML: &str = r#"<AntMovieCatalog Version="4.2" Format="43" Date="2020-01-02">
  <Catalog>
    <Properties Owner="Jo"/>
    <Contents>
      <Movie Number="7" FormattedTitle="Seven"/>
      <Movie Number="8" FormattedTitle="Eight"/>
    </Contents>
  </Catalog>
</AntMovieCatalog>"#;

    #[test]
    fn test_unloaded_defaults() {
        let catalog = Catalog::new();
        assert!(!catalog.is_loaded());
        assert_eq!(catalog.count(), 0);
        assert!(catalog.all_movies().is_empty());
        assert!(catalog.movies_lite().is_empty());
        assert!(catalog.movie_by_id("1").is_none());
        assert_eq!(catalog.catalog_info(), CatalogInfo::default());
        assert_eq!(catalog.catalog_object(), CatalogObject::default());
    }

    #[test]
    fn test_movie_by_id_matches_integer_value() {
        let catalog = Catalog::new();
        catalog.load_from_str(XML).unwrap();

        assert_eq!(catalog.movie_by_id("7").unwrap().field("FormattedTitle"), Some("Seven"));
        assert_eq!(catalog.movie_by_id("007").unwrap().number(), Some("7"));
        assert_eq!(catalog.movie_by_number(8).unwrap().number(), Some("8"));
        assert!(catalog.movie_by_id("9").is_none());
        assert!(catalog.movie_by_id("seven").is_none());
    }

    #[test]
    fn test_failed_reload_resets_to_unloaded() {
        let catalog = Catalog::new();
        catalog.load_from_str(XML).unwrap();
        assert_eq!(catalog.count(), 2);

        let err = catalog.load_from_str("<broken").unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
        assert!(!catalog.is_loaded());
        assert_eq!(catalog.count(), 0);
    }

    #[tokio::test]
    async fn test_open_from_memory_source() {
        let source = MemorySource::named("shelf.xml", XML);
        let catalog = Catalog::open(&source).await.unwrap();
        assert_eq!(catalog.source_name().as_deref(), Some("shelf.xml"));
        assert_eq!(catalog.catalog_info().movie_count, 2);
    }
}
